#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod demo;
pub mod domain;
pub mod error;
pub mod errors;
pub mod host;
pub mod services;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::JailbreakConfig;
pub use domain::{RandomWardenSelector, RoleChange, RoleRegistry};
pub use error::CoreError;
pub use errors::DomainError;
pub use host::memory::MemoryHost;
pub use host::{Audience, Host, Message, TimerHandle, TimerTag};
pub use services::{JailbreakCore, RequestId, SessionId, SessionPhase};

// Prelude for test convenience
pub mod prelude {
    pub use jailbreak_api::{
        keys, DamageEvent, HookResult, Hud, LastRequest, PlayerId, PlayerInfo, Prefix,
        RequestSelection, Role, SpecialDay, Team, WeaponChoice,
    };

    pub use super::config::*;
    pub use super::error::*;
    pub use super::errors::*;
    pub use super::host::memory::*;
    pub use super::host::*;
    pub use super::services::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
