//! Timer port.
//!
//! Timers carry a [`TimerTag`] instead of a closure. When one fires the host
//! hands the tag back to the coordinator, which routes it to the owning
//! orchestrator; the tag names the state generation it was scheduled against
//! so a late firing is recognised and ignored.

use std::time::Duration;

use crate::services::last_request::SessionId;

/// Cancellable handle returned by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// What a timer was scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTag {
    /// One-second prep countdown tick of a last request session.
    LastRequestPrep { session: SessionId },
    /// Delayed random warden pick for a given round.
    AutoWarden { round: u32 },
}

pub trait Scheduler {
    /// Fire `tag` once after `delay`.
    fn start_one_shot(&mut self, delay: Duration, tag: TimerTag) -> TimerHandle;

    /// Fire `tag` every `interval` until cancelled.
    fn start_repeating(&mut self, interval: Duration, tag: TimerTag) -> TimerHandle;

    /// Cancelling an unknown or finished handle is a no-op.
    fn cancel(&mut self, handle: TimerHandle);
}
