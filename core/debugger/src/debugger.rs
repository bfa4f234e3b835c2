//! The pause/resume state machine and its hook entry points.
//!
//! One `Debugger` exists per runtime instance. The execution actor drives
//! it through the `on_*` hooks, passing the runtime capability into each
//! call; the control actor issues commands (`pause`, `resume`, breakpoint
//! edits) from any thread. When a hook decides to pause, the execution
//! actor synchronously captures the execution state and stack snapshot,
//! delivers the notification, then blocks on a condition variable until a
//! resume mode arrives. The notification callback and the blocked wait are
//! a rendezvous, not reentrant concurrency: no script execution happens in
//! the same runtime while it is paused.

use crate::breakpoint::BreakpointTable;
use crate::collector::{DataCollector, EvalOutcome, NamedBindings, ScopeId};
use crate::error::{DebugResult, DebuggerError};
use crate::hooks::DebugEventHandler;
use crate::runtime::{EvalError, Runtime, StackFrame};
use crate::state::{ControlState, DebuggerState, ExecutionState, PauseReason, ResumeMode, StepTarget};
use crate::value::Handle;
use std::sync::{Condvar, Mutex};

/// The debugger attached to one runtime instance.
///
/// Shared between the execution and control actors, typically as an
/// `Arc<Debugger>`. The debugger stores no runtime values, so it is `Send`
/// and `Sync` regardless of the engine's value representation; values flow
/// through the [`DataCollector`] the control side owns.
#[derive(Debug, Default)]
pub struct Debugger {
    control: Mutex<ControlState>,
    resumed: Condvar,
    breakpoints: Mutex<BreakpointTable>,
}

impl Debugger {
    /// Creates a debugger in the running state, with no breakpoints.
    #[must_use]
    pub fn new() -> Self {
        Self {
            control: Mutex::new(ControlState::new()),
            resumed: Condvar::new(),
            breakpoints: Mutex::new(BreakpointTable::new()),
        }
    }

    /// Whether the runtime is currently running or paused.
    pub fn state(&self) -> DebuggerState {
        self.control.lock().unwrap().state
    }

    /// The most recent pause location, if execution has paused at all.
    pub fn current_execution_state(&self) -> Option<ExecutionState> {
        self.control.lock().unwrap().last_state.clone()
    }

    /// Arms a one-shot pause trigger, satisfied at the next statement
    /// boundary, independent of breakpoints. Safe to call from any thread
    /// at any time; a request issued during a pause callback stays queued
    /// and fires after resume.
    pub fn pause(&self) {
        self.control.lock().unwrap().pending_pause = true;
        log::debug!("pause requested");
    }

    /// Hands a resume mode to the blocked execution actor and wakes it.
    pub fn resume(&self, mode: ResumeMode) {
        let mut control = self.control.lock().unwrap();
        control.resume = Some(mode);
        self.resumed.notify_all();
    }

    /// Pauses on every thrown exception when enabled.
    pub fn set_break_on_throw(&self, enabled: bool) {
        self.control.lock().unwrap().break_on_throw = enabled;
    }

    /// Adds (or re-adds) a breakpoint at `(source, line)`. Valid even if
    /// the source has not been loaded yet; the breakpoint becomes live as
    /// soon as matching code runs.
    pub fn add_break_point(&self, source: &str, line: u32) {
        self.breakpoints.lock().unwrap().add(source, line, None);
    }

    /// Adds a breakpoint guarded by a condition expression, evaluated in
    /// the innermost frame's scope on every match of `(source, line)`.
    pub fn add_conditional_break_point(&self, source: &str, line: u32, condition: &str) {
        self.breakpoints
            .lock()
            .unwrap()
            .add(source, line, Some(condition.to_owned()));
    }

    /// Removes the breakpoint at `(source, line)`; a no-op if absent.
    /// Takes effect at the next boundary check, even mid-pause. Removing
    /// the breakpoint that caused the current pause does not un-pause.
    pub fn remove_break_point(&self, source: &str, line: u32) {
        self.breakpoints.lock().unwrap().remove(source, line);
    }

    /// Whether a breakpoint exists at `(source, line)`.
    pub fn has_break_point(&self, source: &str, line: u32) -> bool {
        self.breakpoints.lock().unwrap().contains(source, line)
    }

    /// Statement-boundary hook. The execution actor calls this before
    /// every steppable statement; the call blocks for the whole pause
    /// window when a pause triggers.
    pub fn on_statement<R: Runtime>(
        &self,
        rt: &mut R,
        handler: &mut dyn DebugEventHandler<R>,
        source: &str,
        line: u32,
    ) {
        let Some(reason) = self.pause_reason_at(rt, handler, source, line) else {
            return;
        };
        self.pause_and_wait(rt, handler, reason, source, line);
    }

    /// Call hook; maintains the depth used by step-over and step-out.
    pub fn on_enter_frame(&self) {
        self.control.lock().unwrap().call_depth += 1;
    }

    /// Return hook, the counterpart of [`Self::on_enter_frame`].
    pub fn on_exit_frame(&self) {
        let mut control = self.control.lock().unwrap();
        control.call_depth = control.call_depth.saturating_sub(1);
    }

    /// Thrown-exception hook, called before the engine unwinds so the
    /// stack snapshot still contains the throwing frame. Pauses with
    /// [`PauseReason::Throwing`] when break-on-throw is enabled.
    pub fn on_throw<R: Runtime>(
        &self,
        rt: &mut R,
        handler: &mut dyn DebugEventHandler<R>,
        source: &str,
        line: u32,
        caught: bool,
    ) {
        if !self.control.lock().unwrap().break_on_throw {
            return;
        }
        log::debug!("pausing on throw at {source}:{line} (caught: {caught})");
        self.pause_and_wait(rt, handler, PauseReason::Throwing, source, line);
    }

    fn pause_reason_at<R: Runtime>(
        &self,
        rt: &mut R,
        handler: &mut dyn DebugEventHandler<R>,
        source: &str,
        line: u32,
    ) -> Option<PauseReason> {
        // Re-read the table on every boundary so mid-run and mid-pause
        // edits take effect at the next check.
        let breakpoint = self.breakpoints.lock().unwrap().get(source, line);
        if let Some(breakpoint) = breakpoint {
            match &breakpoint.condition {
                None => return Some(PauseReason::BreakPoint),
                Some(condition) => match rt.evaluate_in_frame(0, condition) {
                    Ok(value) => {
                        if rt.classify(&value).is_truthy() {
                            return Some(PauseReason::BreakPoint);
                        }
                    }
                    Err(EvalError::Parse(message)) => {
                        let error = DebuggerError::MalformedCondition {
                            source_name: source.to_owned(),
                            line,
                            message,
                        };
                        log::warn!("{error}");
                        handler.on_condition_error(&breakpoint, &error);
                    }
                    Err(EvalError::Thrown(_)) => {
                        log::warn!(
                            "breakpoint condition at {source}:{line} threw; treated as no match"
                        );
                    }
                },
            }
        }

        let mut control = self.control.lock().unwrap();
        if let Some(step) = control.step {
            if step.triggers(control.call_depth) {
                control.step = None;
                return Some(PauseReason::Step);
            }
        }
        if control.pending_pause {
            control.pending_pause = false;
            return Some(PauseReason::PauseRequest);
        }
        None
    }

    fn pause_and_wait<R: Runtime>(
        &self,
        rt: &mut R,
        handler: &mut dyn DebugEventHandler<R>,
        reason: PauseReason,
        source: &str,
        line: u32,
    ) {
        // Capture synchronously, before any control-side callback, so the
        // snapshot reflects exactly the triggering instruction.
        let execution_state = ExecutionState {
            source: source.to_owned(),
            line,
        };
        let frames = rt.call_stack();
        {
            let mut control = self.control.lock().unwrap();
            control.state = DebuggerState::Paused;
            control.step = None;
            control.resume = None;
            control.last_state = Some(execution_state.clone());
        }
        log::debug!("paused at {source}:{line} ({reason:?})");

        let mut session = PausedSession {
            debugger: self,
            rt,
            reason,
            execution_state,
            frames,
        };
        handler.on_paused(&mut session, reason);

        // Rendezvous: block until a resume mode arrives, from the handler
        // above or from another thread.
        let mut control = self.control.lock().unwrap();
        while control.resume.is_none() {
            control = self.resumed.wait(control).unwrap();
        }
        let mode = control.resume.take().unwrap_or_default();
        control.state = DebuggerState::Running;
        control.step = match mode {
            ResumeMode::FullThrottle => None,
            mode => Some(StepTarget {
                mode,
                depth: control.call_depth,
            }),
        };
        log::debug!("resumed ({mode:?})");
    }
}

/// The window handed to the control side while the runtime is suspended.
///
/// Exposes the snapshot frozen at pause entry and runs collection and
/// evaluation jobs against the suspended runtime. Jobs execute
/// synchronously on the execution actor, so multiple requests within one
/// pause run strictly in submission order.
pub struct PausedSession<'a, R: Runtime> {
    debugger: &'a Debugger,
    rt: &'a mut R,
    reason: PauseReason,
    execution_state: ExecutionState,
    frames: Vec<StackFrame>,
}

impl<R: Runtime> PausedSession<'_, R> {
    /// Why execution paused.
    #[must_use]
    pub fn reason(&self) -> PauseReason {
        self.reason
    }

    /// The source location of the triggering instruction.
    #[must_use]
    pub fn execution_state(&self) -> &ExecutionState {
        &self.execution_state
    }

    /// The call stack captured at pause entry, innermost frame first.
    /// Frozen for the duration of the pause.
    #[must_use]
    pub fn stack_trace(&self) -> &[StackFrame] {
        &self.frames
    }

    /// The owning debugger, for breakpoint edits and pause requests made
    /// during the callback.
    #[must_use]
    pub fn debugger(&self) -> &Debugger {
        self.debugger
    }

    /// Whether the runtime has a pending thrown value.
    #[must_use]
    pub fn has_exception(&self) -> bool {
        self.rt.thrown_value().is_some()
    }

    /// Chooses the resume mode. The session must not be used afterwards.
    pub fn resume(&self, mode: ResumeMode) {
        self.debugger.resume(mode);
    }

    /// Exception collection job: hands back a handle to the pending
    /// thrown value, if any.
    pub fn collect_thrown(
        &mut self,
        collector: &mut DataCollector<R::Value>,
        scope: ScopeId,
    ) -> Option<Handle> {
        let value = self.rt.thrown_value()?;
        Some(collector.collect(&*self.rt, scope, &value))
    }

    /// Argument collection job for one frame, in declared parameter
    /// order. A frame index beyond the stack depth yields empty bindings.
    pub fn collect_arguments(
        &mut self,
        collector: &mut DataCollector<R::Value>,
        scope: ScopeId,
        frame: usize,
    ) -> NamedBindings {
        let mut bindings = NamedBindings::default();
        for (name, value) in self.rt.frame_arguments(frame) {
            let handle = collector.collect(&*self.rt, scope, &value);
            bindings.push(name, handle);
        }
        bindings
    }

    /// Local collection job for one frame, in declaration order. A
    /// declared-but-unassigned binding resolves to the undefined value; a
    /// frame index beyond the stack depth yields empty bindings.
    pub fn collect_locals(
        &mut self,
        collector: &mut DataCollector<R::Value>,
        scope: ScopeId,
        frame: usize,
    ) -> NamedBindings {
        let mut bindings = NamedBindings::default();
        for (name, value) in self.rt.frame_locals(frame) {
            let handle = collector.collect(&*self.rt, scope, &value);
            bindings.push(name, handle);
        }
        bindings
    }

    /// Expression evaluation job: parses and runs `source` with the scope
    /// chain of the given frame, as if executed at the paused instruction.
    /// Side effects are visible to subsequent reads in the same pause. A
    /// thrown result comes back as [`EvalOutcome::Threw`]; an out-of-range
    /// frame index is an [`DebuggerError::InvalidFrame`] failure.
    pub fn evaluate(
        &mut self,
        collector: &mut DataCollector<R::Value>,
        scope: ScopeId,
        frame: usize,
        source: &str,
    ) -> DebugResult<EvalOutcome> {
        if frame >= self.frames.len() {
            return Err(DebuggerError::InvalidFrame(frame));
        }
        match self.rt.evaluate_in_frame(frame, source) {
            Ok(value) => Ok(EvalOutcome::Value(collector.collect(
                &*self.rt,
                scope,
                &value,
            ))),
            Err(EvalError::Thrown(value)) => Ok(EvalOutcome::Threw(collector.collect(
                &*self.rt,
                scope,
                &value,
            ))),
            Err(EvalError::Parse(message)) => Err(DebuggerError::MalformedExpression(message)),
        }
    }
}
