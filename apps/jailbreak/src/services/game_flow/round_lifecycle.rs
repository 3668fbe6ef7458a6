use std::time::Duration;

use tracing::{debug, info};

use super::JailbreakCore;
use crate::host::TimerTag;

impl JailbreakCore {
    pub fn on_round_start(&mut self) {
        self.round += 1;
        let players = self.host.roster.players();
        info!(round = self.round, players = players.len(), "Round starting");

        let changes = self.roles.reset_for_round(&players);
        self.host.announce_roles(&changes);
        self.sync_world();

        self.special_days.on_round_start(&mut self.host);
        self.last_requests.end_request(None, None, &mut self.host);
        self.schedule_auto_warden();
    }

    pub fn on_round_end(&mut self) {
        info!(round = self.round, "Round ending");

        self.special_days.on_round_end();
        self.last_requests.end_request(None, None, &mut self.host);
        self.cancel_auto_warden();

        if self.roles.box_active() {
            self.roles.set_box(false);
            self.host.world.set_teammates_are_enemies(false);
        }
    }

    /// Tear down everything that is running: session, day and timers.
    pub fn shutdown(&mut self) {
        self.last_requests.end_request(None, None, &mut self.host);
        self.special_days.end_day();
        self.cancel_auto_warden();
        info!(round = self.round, "Jailbreak core shut down");
    }

    fn schedule_auto_warden(&mut self) {
        self.cancel_auto_warden();
        let Some(secs) = self.config.warden.auto_assign_after_seconds else {
            return;
        };
        let handle = self.host.scheduler.start_one_shot(
            Duration::from_secs(u64::from(secs)),
            TimerTag::AutoWarden { round: self.round },
        );
        debug!(round = self.round, secs, "Auto-warden scheduled");
        self.auto_warden = Some(handle);
    }

    pub(super) fn cancel_auto_warden(&mut self) {
        if let Some(handle) = self.auto_warden.take() {
            self.host.scheduler.cancel(handle);
        }
    }

    /// Push the registry's toggles to the world.
    pub(super) fn sync_world(&mut self) {
        self.host
            .world
            .set_teammates_are_enemies(self.roles.box_active());
        self.host.world.set_cells_open(self.roles.cells_open());
    }
}
