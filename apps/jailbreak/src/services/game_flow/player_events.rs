use jailbreak_api::{DamageEvent, HookResult, PlayerId};
use tracing::{debug, info};

use super::JailbreakCore;
use crate::host::{TimerHandle, TimerTag};
use crate::services::damage::DamageContext;

impl JailbreakCore {
    pub fn on_player_death(&mut self, player: PlayerId) {
        if self.last_requests.on_player_death(player, &mut self.host) {
            debug!(player, "Death ended the last request");
        }

        if self.roles.is_warden(player) {
            let changes = self.roles.set_warden(player, false);
            self.host.announce_roles(&changes);
            info!(player, round = self.round, "Warden died");
        }
    }

    /// A vanished player takes the death path and is then dropped.
    pub fn on_player_disconnect(&mut self, player: PlayerId) {
        self.on_player_death(player);
        let changes = self.roles.forget(player);
        self.host.announce_roles(&changes);
        debug!(player, "Player forgotten");
    }

    /// Run the damage chain. `event.damage` is zeroed when suppressed.
    pub fn on_take_damage(&self, event: &mut DamageEvent) -> HookResult {
        let ctx = DamageContext {
            roles: &self.roles,
            last_request: &self.last_requests,
            roster: &*self.host.roster,
        };
        self.damage.arbitrate(event, &ctx)
    }

    /// Entry point for every timer the host fires.
    pub fn on_timer(&mut self, handle: TimerHandle, tag: TimerTag) {
        match tag {
            TimerTag::LastRequestPrep { session } => {
                self.last_requests
                    .on_prep_tick(session, &mut self.roles, &mut self.host);
            }
            TimerTag::AutoWarden { round } => self.on_auto_warden(handle, round),
        }
    }

    fn on_auto_warden(&mut self, handle: TimerHandle, round: u32) {
        if self.auto_warden != Some(handle) || round != self.round {
            debug!(round, current = self.round, "Ignoring stale auto-warden timer");
            return;
        }
        self.auto_warden = None;

        if let Some(warden) = self.roles.warden() {
            debug!(warden, "Warden already claimed, skipping auto-assign");
            return;
        }
        if let Some(chosen) = self
            .selector
            .assign_random_warden(&mut self.roles, &mut self.host)
        {
            info!(player = chosen, round, "Warden auto-assigned");
        }
    }
}
