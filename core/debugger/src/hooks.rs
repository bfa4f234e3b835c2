//! Control-side event delivery.

use crate::breakpoint::Breakpoint;
use crate::debugger::PausedSession;
use crate::error::DebuggerError;
use crate::runtime::Runtime;
use crate::state::PauseReason;

/// Receives pause notifications from the debugger.
///
/// The handler is invoked synchronously on the execution actor while it
/// blocks awaiting resume; no script execution interleaves with the
/// callback. The handler may freely call back into the debugger during the
/// callback (mutate breakpoints, run collection and evaluation jobs on the
/// session, request another pause), but must not touch the session after
/// choosing a resume mode.
///
/// A handler that returns without resuming leaves the execution actor
/// blocked until [`Debugger::resume`][crate::Debugger::resume] is called
/// from another thread; this is the cross-actor rendezvous.
pub trait DebugEventHandler<R: Runtime> {
    /// Execution paused. The session exposes the frozen execution state
    /// and stack snapshot, and runs jobs against the suspended runtime.
    fn on_paused(&mut self, session: &mut PausedSession<'_, R>, reason: PauseReason);

    /// A breakpoint condition failed to parse. The breakpoint stays in
    /// the table but never matches until its condition is fixed.
    fn on_condition_error(&mut self, breakpoint: &Breakpoint, error: &DebuggerError) {
        let _ = (breakpoint, error);
    }
}
