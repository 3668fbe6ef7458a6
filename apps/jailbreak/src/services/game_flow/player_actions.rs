use jailbreak_api::{keys, Hud, PlayerId, Prefix, RequestSelection, Role};
use tracing::{debug, info};

use super::JailbreakCore;
use crate::domain::roles::RoleChange;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::host::Message;
use crate::services::last_request::{RequestId, SessionId};

impl JailbreakCore {
    /// Start a last request between `guardian` and `prisoner`.
    ///
    /// Rejections have already been shown to the prisoner when this returns.
    pub fn select_last_request(
        &mut self,
        id: RequestId,
        guardian: PlayerId,
        prisoner: PlayerId,
        selection: RequestSelection,
    ) -> Result<SessionId, DomainError> {
        self.last_requests
            .select_request(id, guardian, prisoner, selection, &mut self.host)
            .inspect_err(|e| debug!(guardian, prisoner, error = %e, "Last request not started"))
    }

    /// Same as [`Self::select_last_request`], looking the request up by name.
    pub fn select_last_request_by_name(
        &mut self,
        name: &str,
        guardian: PlayerId,
        prisoner: PlayerId,
        selection: RequestSelection,
    ) -> Result<SessionId, DomainError> {
        let id = self.last_requests.find(name).ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::LastRequest,
                format!("no last request named {name:?}"),
            )
        })?;
        self.select_last_request(id, guardian, prisoner, selection)
    }

    /// Force the running last request to end.
    pub fn end_last_request(&mut self, winner: Option<PlayerId>, loser: Option<PlayerId>) -> bool {
        self.last_requests.end_request(winner, loser, &mut self.host)
    }

    pub fn select_special_day(&mut self, player: PlayerId, name: &str) -> Result<(), DomainError> {
        self.special_days
            .select(player, name, &mut self.host)
            .inspect_err(|e| debug!(player, day = name, error = %e, "Special day not queued"))
    }

    pub fn end_special_day(&mut self) {
        self.special_days.end_day();
    }

    pub fn set_warden(&mut self, player: PlayerId, state: bool) {
        let changes = self.roles.set_warden(player, state);
        self.apply(changes);
    }

    pub fn set_rebel(&mut self, player: PlayerId, state: bool) {
        let changes = self.roles.set_rebel(player, state);
        self.apply(changes);
    }

    pub fn set_freeday(&mut self, player: PlayerId, state: bool) {
        let changes = self.roles.set_freeday(player, state);
        self.apply(changes);
    }

    pub fn set_role(&mut self, player: PlayerId, role: Role) {
        let changes = self.roles.set_role(player, role);
        self.apply(changes);
    }

    pub fn assign_random_warden(&mut self) -> Option<PlayerId> {
        self.selector
            .assign_random_warden(&mut self.roles, &mut self.host)
    }

    /// Box mode makes teammates enemies; guards stay protected from each
    /// other by the damage chain.
    pub fn toggle_box(&mut self, state: bool, caller: Option<&str>) {
        self.roles.set_box(state);
        self.host.world.set_teammates_are_enemies(state);
        info!(state, caller = ?caller, "Box toggled");

        if let Some(caller) = caller {
            self.host.broadcast(
                Hud::Chat,
                Message::key(keys::BOX_TOGGLED)
                    .arg(caller)
                    .arg(state)
                    .prefix(Prefix::JB),
            );
        }
    }

    pub fn toggle_cells(&mut self, open: bool, caller: Option<&str>) {
        self.roles.set_cells(open);
        self.host.world.set_cells_open(open);
        info!(open, caller = ?caller, "Cells toggled");

        if let Some(caller) = caller {
            self.host.broadcast(
                Hud::Chat,
                Message::key(keys::CELLS_TOGGLED)
                    .arg(caller)
                    .arg(open)
                    .prefix(Prefix::JB),
            );
        }
    }

    fn apply(&mut self, changes: Vec<RoleChange>) {
        for change in &changes {
            debug!(
                player = change.player,
                from = change.from.as_str(),
                to = change.to.as_str(),
                "Role changed"
            );
        }
        self.host.announce_roles(&changes);
    }
}
