//! Orchestrators and the coordinator that drives them.

pub mod damage;
pub mod game_flow;
pub mod last_request;
pub mod special_day;

#[cfg(test)]
mod tests_last_request;
#[cfg(test)]
mod tests_special_day;

pub use damage::{DamageArbiter, DamageContext, DamageHook, HookId};
pub use game_flow::JailbreakCore;
pub use last_request::{ActiveSession, LastRequestOrchestrator, RequestId, SessionId, SessionPhase};
pub use special_day::SpecialDayOrchestrator;
