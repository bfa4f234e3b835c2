//! Vela's scripting-language debugger core.
//!
//! This crate suspends a running script at source locations or on thrown
//! exceptions, inspects the call stack and the heap object graph through a
//! stable reference-numbering scheme, evaluates expressions in a paused
//! frame's scope, and resumes execution under various stepping policies.
//!
//! # Overview
//!
//! The debugger consists of several key components:
//!
//! - [`Debugger`]: the pause/resume state machine, shared between the
//!   execution actor (the interpreter loop) and the control actor.
//! - [`BreakpointTable`]: source/line breakpoints with optional condition
//!   expressions, matched at every statement boundary.
//! - [`DataCollector`]: the value inspector and reference table, mapping
//!   transient heap values to long-lived [`Handle`]s within explicit
//!   collection scopes.
//! - [`PausedSession`]: the window handed to the control side while the
//!   runtime is suspended; runs collection and evaluation jobs.
//! - [`Runtime`]: the capability trait the embedding engine implements.
//!   The parser, interpreter, value representation and garbage collector
//!   stay on the engine side of this seam.
//!
//! # Architecture
//!
//! The interpreter drives the debugger through hooks on its execution loop:
//! [`Debugger::on_statement`] before every statement boundary,
//! [`Debugger::on_enter_frame`]/[`Debugger::on_exit_frame`] around calls,
//! and [`Debugger::on_throw`] when an exception is raised. Each hook call
//! carries the runtime capability and the control side's
//! [`DebugEventHandler`]. When a hook decides to pause, the execution actor
//! synchronously captures the execution state and stack snapshot, delivers
//! the notification to the handler, and then blocks until a resume mode
//! arrives, either from the handler itself or from another thread.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vela_debugger::{Debugger, ResumeMode};
//!
//! let debugger = Arc::new(Debugger::new());
//! debugger.add_break_point("script.vs", 10);
//!
//! // The interpreter calls
//! // debugger.on_statement(&mut runtime, &mut handler, source, line)
//! // before each statement; execution pauses at the breakpoint, the
//! // handler inspects state through the session, then resumes.
//! debugger.resume(ResumeMode::FullThrottle);
//! ```

pub mod breakpoint;
pub mod collector;
pub mod debugger;
pub mod error;
pub mod hooks;
pub mod runtime;
pub mod state;
pub mod value;

pub use breakpoint::{Breakpoint, BreakpointTable};
pub use collector::{DataCollector, EvalOutcome, NamedBindings, ScopeId};
pub use debugger::{Debugger, PausedSession};
pub use error::{DebugResult, DebuggerError};
pub use hooks::DebugEventHandler;
pub use runtime::{EvalError, Runtime, StackFrame, ValueClass};
pub use state::{DebuggerState, ExecutionState, PauseReason, ResumeMode};
pub use value::{Handle, Property, ValueDescription};
