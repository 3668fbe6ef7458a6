//! Round lifecycle coordinator.
//!
//! `JailbreakCore` owns the host ports and every orchestrator, and fans host
//! events out to them in a fixed order:
//!
//! - round start: roles reset, special day, last request cleanup, auto-warden
//! - round end: special day, last request cleanup, auto-warden cancel, box off
//! - death: last request, then warden slot
//! - disconnect: as death, then the player is forgotten
//! - damage: [`DamageArbiter`]
//! - timer: routed by [`TimerTag`](crate::host::TimerTag)

mod player_actions;
mod player_events;
mod round_lifecycle;

use std::sync::Arc;

use jailbreak_api::{LastRequest, SpecialDay};
use tracing::info;

use crate::config::JailbreakConfig;
use crate::domain::roles::RoleRegistry;
use crate::domain::warden::RandomWardenSelector;
use crate::host::{Host, TimerHandle};
use crate::services::damage::{DamageArbiter, DamageHook, HookId};
use crate::services::last_request::{LastRequestOrchestrator, RequestId};
use crate::services::special_day::SpecialDayOrchestrator;

pub struct JailbreakCore {
    host: Host,
    config: JailbreakConfig,
    roles: RoleRegistry,
    selector: RandomWardenSelector,
    last_requests: LastRequestOrchestrator,
    special_days: SpecialDayOrchestrator,
    damage: DamageArbiter,
    round: u32,
    auto_warden: Option<TimerHandle>,
}

impl JailbreakCore {
    /// `seed` fixes the warden draw; `None` uses OS entropy.
    pub fn new(config: JailbreakConfig, host: Host, seed: Option<u64>) -> Self {
        info!(
            prep_seconds = config.last_request.prep_seconds,
            cooldown_in_rounds = config.special_day.cooldown_in_rounds,
            auto_warden = ?config.warden.auto_assign_after_seconds,
            seeded = seed.is_some(),
            "Jailbreak core created"
        );
        Self {
            host,
            roles: RoleRegistry::new(),
            selector: RandomWardenSelector::new(seed),
            last_requests: LastRequestOrchestrator::new(config.last_request.clone()),
            special_days: SpecialDayOrchestrator::new(config.special_day.clone()),
            damage: DamageArbiter::new(),
            round: 0,
            auto_warden: None,
            config,
        }
    }

    pub fn config(&self) -> &JailbreakConfig {
        &self.config
    }

    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }

    pub fn last_requests(&self) -> &LastRequestOrchestrator {
        &self.last_requests
    }

    pub fn special_days(&self) -> &SpecialDayOrchestrator {
        &self.special_days
    }

    /// Rounds started so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn auto_warden_pending(&self) -> bool {
        self.auto_warden.is_some()
    }

    // ------------------------------------------------------------------
    // Registration surface
    // ------------------------------------------------------------------

    pub fn register_last_request(&mut self, definition: Arc<dyn LastRequest>) -> RequestId {
        self.last_requests.register(definition)
    }

    pub fn register_special_day(&mut self, day: Arc<dyn SpecialDay>) {
        self.special_days.register(day);
    }

    pub fn unregister_special_day(&mut self, day: &Arc<dyn SpecialDay>) -> bool {
        self.special_days.unregister(day)
    }

    pub fn hook_take_damage(&mut self, hook: impl DamageHook + 'static) -> HookId {
        self.damage.hook(hook)
    }

    pub fn unhook_take_damage(&mut self, id: HookId) -> bool {
        self.damage.unhook(id)
    }
}
