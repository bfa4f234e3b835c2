//! Source/line breakpoints with optional condition expressions.
//!
//! Breakpoints are owned by the control side and persist across
//! pause/resume cycles. A breakpoint may be added before its source has
//! been loaded ("pending"); it becomes live as soon as matching code runs.

use rustc_hash::FxHashMap;

/// A source-location trigger, optionally guarded by a condition
/// expression evaluated in the innermost paused frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoint {
    /// Source name the breakpoint applies to.
    pub source: String,
    /// Line number within the source.
    pub line: u32,
    /// Optional condition expression; the breakpoint triggers only when
    /// the condition evaluates truthy.
    pub condition: Option<String>,
}

/// The set of breakpoints, keyed by `(source, line)`.
///
/// At most one breakpoint exists per `(source, line)` pair; adding to an
/// occupied site replaces its condition. Lookups run on every statement
/// boundary, so the table is keyed for borrowed `&str` access.
#[derive(Debug, Default)]
pub struct BreakpointTable {
    sites: FxHashMap<String, FxHashMap<u32, Option<String>>>,
    len: usize,
}

impl BreakpointTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the breakpoint at `(source, line)`. Valid even if
    /// the source is not yet loaded.
    pub fn add(&mut self, source: &str, line: u32, condition: Option<String>) {
        let lines = self.sites.entry(source.to_owned()).or_default();
        if lines.insert(line, condition).is_none() {
            self.len += 1;
        }
    }

    /// Removes the breakpoint at `(source, line)`. Returns whether one was
    /// present; removing an absent breakpoint is a no-op.
    pub fn remove(&mut self, source: &str, line: u32) -> bool {
        let Some(lines) = self.sites.get_mut(source) else {
            return false;
        };
        let removed = lines.remove(&line).is_some();
        if removed {
            self.len -= 1;
            if lines.is_empty() {
                self.sites.remove(source);
            }
        }
        removed
    }

    /// The breakpoint at `(source, line)`, if any.
    #[must_use]
    pub fn get(&self, source: &str, line: u32) -> Option<Breakpoint> {
        let condition = self.sites.get(source)?.get(&line)?;
        Some(Breakpoint {
            source: source.to_owned(),
            line,
            condition: condition.clone(),
        })
    }

    /// Whether a breakpoint exists at `(source, line)`.
    #[must_use]
    pub fn contains(&self, source: &str, line: u32) -> bool {
        self.sites
            .get(source)
            .is_some_and(|lines| lines.contains_key(&line))
    }

    /// Number of breakpoints in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes all breakpoints.
    pub fn clear(&mut self) {
        self.sites.clear();
        self.len = 0;
    }
}
