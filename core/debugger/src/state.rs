//! Pause/resume state and stepping policy types.

use serde::Serialize;

/// Whether the runtime is executing or suspended. The runtime is exactly
/// one of the two at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebuggerState {
    /// The interpreter is executing script code.
    Running,
    /// The interpreter is blocked at a pause point, awaiting resume.
    Paused,
}

/// Why execution paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseReason {
    /// An explicit [`pause()`][crate::Debugger::pause] request was
    /// satisfied at a statement boundary.
    PauseRequest,
    /// A breakpoint matched (and its condition, if any, was truthy).
    BreakPoint,
    /// An exception was thrown while break-on-throw was enabled.
    Throwing,
    /// A step operation completed.
    Step,
}

/// How to continue after a pause; determines which future statement
/// boundary re-arms the paused state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResumeMode {
    /// Run freely until the next breakpoint, throw or pause request.
    #[default]
    FullThrottle,
    /// Pause at the next statement in the same frame or an outer one.
    StepOver,
    /// Pause at the next statement, wherever it is.
    StepInto,
    /// Pause at the next statement after the current frame returns.
    StepOut,
}

/// The source location captured when execution pauses. One of these
/// accumulates per pause event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionState {
    /// Source name of the triggering instruction.
    pub source: String,
    /// Line number of the triggering instruction.
    pub line: u32,
}

/// An armed step trigger, recorded at resume time.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StepTarget {
    pub(crate) mode: ResumeMode,
    /// Call depth at the moment the step was armed.
    pub(crate) depth: usize,
}

impl StepTarget {
    /// Whether a statement boundary at `depth` completes this step.
    pub(crate) fn triggers(&self, depth: usize) -> bool {
        match self.mode {
            ResumeMode::StepInto => true,
            ResumeMode::StepOver => depth <= self.depth,
            ResumeMode::StepOut => depth < self.depth,
            ResumeMode::FullThrottle => false,
        }
    }
}

/// Mutable half of the state machine, guarded by the debugger's mutex.
#[derive(Debug)]
pub(crate) struct ControlState {
    pub(crate) state: DebuggerState,
    /// One-shot trigger armed by `pause()`, satisfied at the next
    /// statement boundary.
    pub(crate) pending_pause: bool,
    pub(crate) break_on_throw: bool,
    /// Resume mode handed over by the control side; `None` while the
    /// execution actor still has to block.
    pub(crate) resume: Option<ResumeMode>,
    pub(crate) step: Option<StepTarget>,
    /// Call depth maintained by the enter/exit frame hooks.
    pub(crate) call_depth: usize,
    /// Most recent pause location.
    pub(crate) last_state: Option<ExecutionState>,
}

impl ControlState {
    pub(crate) fn new() -> Self {
        Self {
            state: DebuggerState::Running,
            pending_pause: false,
            break_on_throw: false,
            resume: None,
            step: None,
            call_depth: 0,
            last_state: None,
        }
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new()
    }
}
