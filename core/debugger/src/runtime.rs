//! The capability seam between the debugger core and the embedding engine.
//!
//! The parser, interpreter, value representation and garbage collector live
//! on the engine side; the debugger consumes them exclusively through the
//! [`Runtime`] trait. The execution actor passes `&mut R` into each hook
//! invocation, so the debugger itself keeps no owning pointer to the engine.

use serde::Serialize;

/// Shallow classification of an opaque runtime value.
///
/// Primitive variants carry their payload; composite values are classified
/// only, their contents are enumerated on demand through
/// [`Runtime::own_properties`].
#[derive(Debug, Clone, PartialEq)]
pub enum ValueClass {
    /// The undefined value.
    Undefined,
    /// The null value.
    Null,
    /// A boolean.
    Boolean(bool),
    /// A number.
    Number(f64),
    /// A string.
    String(String),
    /// An object.
    Object,
    /// A function.
    Function,
}

impl ValueClass {
    /// Truthiness under the usual scripting-language rules: `undefined`,
    /// `null`, `false`, `0`, `NaN` and the empty string are falsy,
    /// everything else is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Boolean(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Object | Self::Function => true,
        }
    }

    /// Whether this class describes a heap composite that receives a
    /// reference rather than an inline description.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Object | Self::Function)
    }
}

/// One call-stack activation record, addressed by index from the innermost
/// frame (0) outward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackFrame {
    /// Function name, or the engine's synthetic name for entry code.
    pub function: String,
    /// Source name the frame is executing in.
    pub source: String,
    /// Current line of this frame.
    pub line: u32,
    /// Current column of this frame.
    pub column: u32,
}

/// Failure of an expression evaluation inside the engine.
#[derive(Debug, Clone)]
pub enum EvalError<V> {
    /// The expression source failed to parse.
    Parse(String),
    /// The expression raised; the thrown value is carried along.
    Thrown(V),
}

/// Capabilities the embedding engine provides to the debugger.
///
/// All stack-indexed methods count frames from the innermost (0) outward.
/// Implementations must keep binding enumeration deterministic for the
/// duration of one pause: arguments in declared parameter order, locals in
/// declaration order, with declared-but-unassigned bindings present as the
/// undefined value rather than omitted.
pub trait Runtime {
    /// Opaque runtime value. Cloning must be cheap (reference semantics for
    /// heap values), and a clone must keep its referent alive.
    type Value: Clone;

    /// Classifies a value, exposing primitive payloads inline.
    fn classify(&self, value: &Self::Value) -> ValueClass;

    /// A stable identity for a composite value, unique while the referent
    /// is alive. `None` for primitives. Used to reuse handles within a
    /// collection scope, which also makes cyclic graphs safe to walk.
    fn object_id(&self, value: &Self::Value) -> Option<u64>;

    /// Own enumerable properties of a composite, in the natural runtime
    /// enumeration order. Empty for primitives.
    fn own_properties(&self, value: &Self::Value) -> Vec<(String, Self::Value)>;

    /// The current call stack, innermost frame first.
    fn call_stack(&self) -> Vec<StackFrame>;

    /// Named argument bindings of a frame, in declared parameter order.
    /// An index beyond the stack depth yields an empty vector.
    fn frame_arguments(&self, frame: usize) -> Vec<(String, Self::Value)>;

    /// Named local bindings of a frame, in declaration order within the
    /// active scope. An index beyond the stack depth yields an empty
    /// vector.
    fn frame_locals(&self, frame: usize) -> Vec<(String, Self::Value)>;

    /// Parses and runs `source` as an expression with the scope chain of
    /// the given frame, as if executed at the paused instruction. Side
    /// effects are real and visible to subsequent reads.
    fn evaluate_in_frame(
        &mut self,
        frame: usize,
        source: &str,
    ) -> Result<Self::Value, EvalError<Self::Value>>;

    /// The pending thrown value, if the engine is currently unwinding an
    /// exception.
    fn thrown_value(&self) -> Option<Self::Value>;
}
