//! Error kinds reported to the control side.

use crate::value::Handle;
use thiserror::Error;

/// Failures of control-side requests.
///
/// Thrown evaluation results are not errors: they come back as
/// [`EvalOutcome::Threw`][crate::collector::EvalOutcome] carrying the
/// thrown value's handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DebuggerError {
    /// A reference number that was never issued, or whose owning
    /// collection scope has been closed.
    #[error("unknown or expired reference {0}")]
    InvalidHandle(Handle),

    /// A frame index beyond the captured stack depth.
    #[error("frame index {0} is out of range")]
    InvalidFrame(usize),

    /// A breakpoint condition that fails to parse. The breakpoint is
    /// retained but never matches until the condition is fixed.
    #[error("breakpoint condition at {source_name}:{line} failed to parse: {message}")]
    MalformedCondition {
        /// Source name of the breakpoint.
        source_name: String,
        /// Line number of the breakpoint.
        line: u32,
        /// Parse diagnostic from the engine.
        message: String,
    },

    /// An evaluation request whose expression fails to parse.
    #[error("expression failed to parse: {0}")]
    MalformedExpression(String),
}

/// Result type for debugger operations.
pub type DebugResult<T> = Result<T, DebuggerError>;
