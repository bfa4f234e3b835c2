//! The value inspector and reference table.
//!
//! A [`DataCollector`] assigns stable [`Handle`]s to runtime values within
//! explicit collection scopes. Collection jobs (exception capture,
//! argument/local capture, expression evaluation) allocate handles into the
//! scope of the consumer's choosing; closing the scope invalidates its
//! handles, unless one was explicitly retained first.
//!
//! Descriptions stay lazy: [`DataCollector::lookup_ref`] descends exactly
//! one level, representing nested composites as further handles. A
//! composite already handled in the same scope reuses its existing handle
//! instead of re-descending, which bounds per-request cost and makes
//! cyclic graphs safe.

use crate::error::{DebugResult, DebuggerError};
use crate::runtime::{Runtime, ValueClass};
use crate::value::{Handle, Property, ValueDescription};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

/// Lifetime boundary for a set of issued handles, opened per inspection
/// job and closed on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

/// The reserved scope for retained handles. Always open.
const PERSISTENT: ScopeId = ScopeId(0);

/// Ordered `name → Handle` pairs for one frame's arguments or locals.
///
/// Order is frozen at collection time: declared parameter order for
/// arguments, declaration order for locals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NamedBindings {
    entries: Vec<(String, Handle)>,
}

impl NamedBindings {
    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a binding with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// The handle bound to `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Handle> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, h)| *h)
    }

    /// Iterates bindings in their frozen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Handle)> {
        self.entries.iter().map(|(n, h)| (n.as_str(), *h))
    }

    /// Iterates binding names in their frozen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub(crate) fn push(&mut self, name: String, handle: Handle) {
        self.entries.push((name, handle));
    }
}

/// Result of an expression evaluation job.
///
/// A thrown expression is not a core fault: the thrown value is collected
/// and handed back wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalOutcome {
    /// The expression completed; handle of its result.
    Value(Handle),
    /// The expression raised; handle of the thrown value.
    Threw(Handle),
}

impl EvalOutcome {
    /// The collected handle, completed or thrown.
    #[must_use]
    pub fn handle(self) -> Handle {
        match self {
            Self::Value(h) | Self::Threw(h) => h,
        }
    }

    /// Whether the expression raised.
    #[must_use]
    pub fn threw(self) -> bool {
        matches!(self, Self::Threw(_))
    }
}

#[derive(Debug)]
struct Entry<V> {
    value: V,
    scope: ScopeId,
}

/// The reference table: issues handles for runtime values and resolves
/// them to one-level-deep [`ValueDescription`]s on demand.
///
/// The collector stores clones of the values it handles, which keeps their
/// referents alive for the life of the owning scope.
#[derive(Debug)]
pub struct DataCollector<V> {
    entries: FxHashMap<u64, Entry<V>>,
    /// `(scope, object identity) → handle`, for in-scope reuse.
    identity: FxHashMap<(u32, u64), Handle>,
    open: FxHashSet<u32>,
    next_handle: u64,
    next_scope: u32,
}

impl<V: Clone> Default for DataCollector<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> DataCollector<V> {
    /// Creates an empty collector with only the persistent scope open.
    #[must_use]
    pub fn new() -> Self {
        let mut open = FxHashSet::default();
        open.insert(PERSISTENT.0);
        Self {
            entries: FxHashMap::default(),
            identity: FxHashMap::default(),
            open,
            next_handle: 0,
            next_scope: 1,
        }
    }

    /// Opens a fresh collection scope.
    pub fn open_scope(&mut self) -> ScopeId {
        let scope = ScopeId(self.next_scope);
        self.next_scope += 1;
        self.open.insert(scope.0);
        scope
    }

    /// Closes a scope, invalidating every handle issued into it. Closing
    /// an already-closed scope is a no-op.
    pub fn close_scope(&mut self, scope: ScopeId) {
        if scope == PERSISTENT || !self.open.remove(&scope.0) {
            return;
        }
        self.entries.retain(|_, entry| entry.scope != scope);
        self.identity.retain(|(s, _), _| *s != scope.0);
    }

    /// Moves a handle into the persistent scope, so it survives the close
    /// of the scope it was issued in.
    pub fn retain(&mut self, handle: Handle) -> DebugResult<()> {
        let entry = self
            .entries
            .get_mut(&handle.0)
            .filter(|entry| self.open.contains(&entry.scope.0))
            .ok_or(DebuggerError::InvalidHandle(handle))?;
        entry.scope = PERSISTENT;
        Ok(())
    }

    /// Whether a handle currently resolves.
    #[must_use]
    pub fn is_valid(&self, handle: Handle) -> bool {
        self.entries
            .get(&handle.0)
            .is_some_and(|entry| self.open.contains(&entry.scope.0))
    }

    /// Issues a handle for `value` in the given scope. Any value can be
    /// collected, primitives included; a composite already handled in
    /// this scope reuses its existing handle.
    pub fn collect<R>(&mut self, rt: &R, scope: ScopeId, value: &R::Value) -> Handle
    where
        R: Runtime<Value = V>,
    {
        if let Some(id) = rt.object_id(value) {
            if let Some(handle) = self.identity.get(&(scope.0, id)) {
                return *handle;
            }
            let handle = self.issue(scope, value.clone());
            self.identity.insert((scope.0, id), handle);
            return handle;
        }
        self.issue(scope, value.clone())
    }

    /// Resolves a handle to a one-level-deep description. Primitive
    /// referents are described inline; composite referents list their own
    /// enumerable properties in runtime order, with nested composites
    /// represented as handles issued in this handle's scope.
    pub fn lookup_ref<R>(&mut self, rt: &R, handle: Handle) -> DebugResult<ValueDescription>
    where
        R: Runtime<Value = V>,
    {
        let (value, scope) = {
            let entry = self
                .entries
                .get(&handle.0)
                .filter(|entry| self.open.contains(&entry.scope.0))
                .ok_or(DebuggerError::InvalidHandle(handle))?;
            (entry.value.clone(), entry.scope)
        };

        let class = rt.classify(&value);
        if !class.is_composite() {
            return Ok(describe_primitive(&class));
        }

        let mut properties = Vec::new();
        for (name, prop) in rt.own_properties(&value) {
            let prop_class = rt.classify(&prop);
            if prop_class.is_composite() {
                properties.push(Property::Nested {
                    name,
                    handle: self.collect(rt, scope, &prop),
                });
            } else {
                properties.push(Property::Inline {
                    name,
                    value: describe_primitive(&prop_class),
                });
            }
        }

        Ok(match class {
            ValueClass::Function => ValueDescription::Function { properties },
            _ => ValueDescription::Object { properties },
        })
    }

    fn issue(&mut self, scope: ScopeId, value: V) -> Handle {
        let handle = Handle(self.next_handle);
        self.next_handle += 1;
        self.entries.insert(handle.0, Entry { value, scope });
        handle
    }
}

fn describe_primitive(class: &ValueClass) -> ValueDescription {
    match class {
        ValueClass::Undefined => ValueDescription::Undefined,
        ValueClass::Null => ValueDescription::null(),
        ValueClass::Boolean(b) => ValueDescription::Boolean { value: *b },
        ValueClass::Number(n) => ValueDescription::Number { value: *n },
        ValueClass::String(s) => ValueDescription::String { value: s.clone() },
        // Composites never reach here.
        ValueClass::Object => ValueDescription::Object {
            properties: Vec::new(),
        },
        ValueClass::Function => ValueDescription::Function {
            properties: Vec::new(),
        },
    }
}
