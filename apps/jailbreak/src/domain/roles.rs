//! Role bookkeeping and the global round toggles.
//!
//! `RoleRegistry` is the single source of truth for who holds which role.
//! The warden slot and the role map are updated together, so the registry
//! can never report two wardens.

use std::collections::HashMap;

use jailbreak_api::{PlayerId, PlayerInfo, Role};
use tracing::debug;

/// A role mutation, reported for the host's feedback layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleChange {
    pub player: PlayerId,
    pub from: Role,
    pub to: Role,
}

#[derive(Debug, Clone, Default)]
pub struct RoleRegistry {
    roles: HashMap<PlayerId, Role>,
    warden: Option<PlayerId>,
    /// Role the warden held before taking the slot.
    before_warden: Role,
    box_active: bool,
    cells_open: bool,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current role; untracked players hold `Role::None`.
    pub fn role(&self, player: PlayerId) -> Role {
        self.roles.get(&player).copied().unwrap_or_default()
    }

    pub fn warden(&self) -> Option<PlayerId> {
        self.warden
    }

    pub fn is_warden(&self, player: PlayerId) -> bool {
        self.warden == Some(player)
    }

    /// Players currently holding `role`, in id order.
    pub fn players_with(&self, role: Role) -> Vec<PlayerId> {
        let mut players: Vec<PlayerId> = self
            .roles
            .iter()
            .filter(|(_, r)| **r == role)
            .map(|(p, _)| *p)
            .collect();
        players.sort_unstable();
        players
    }

    /// Grant or revoke the warden role.
    ///
    /// Granting first demotes any existing warden. Revoking only acts when
    /// `player` is the current warden. A demoted warden gets back the role
    /// held before the grant, or `Guardian` if they had none.
    pub fn set_warden(&mut self, player: PlayerId, state: bool) -> Vec<RoleChange> {
        let mut changes = Vec::new();
        if state {
            if self.warden == Some(player) {
                return changes;
            }
            if let Some(previous) = self.warden.take() {
                let restored = self.restored_role();
                changes.extend(self.assign(previous, restored));
            }
            self.before_warden = self.role(player);
            changes.extend(self.assign(player, Role::Warden));
            self.warden = Some(player);
        } else if self.warden == Some(player) {
            self.warden = None;
            let restored = self.restored_role();
            changes.extend(self.assign(player, restored));
        }
        changes
    }

    /// Mark or unmark a prisoner as rebel. Unmarking returns them to `Prisoner`.
    pub fn set_rebel(&mut self, player: PlayerId, state: bool) -> Vec<RoleChange> {
        self.toggle_flag(player, Role::Rebel, state)
    }

    /// Grant or revoke a freeday. Revoking returns the player to `Prisoner`.
    pub fn set_freeday(&mut self, player: PlayerId, state: bool) -> Vec<RoleChange> {
        self.toggle_flag(player, Role::Freeday, state)
    }

    /// Force a role. `Warden` goes through [`Self::set_warden`]; moving the
    /// current warden to any other role releases the slot.
    pub fn set_role(&mut self, player: PlayerId, role: Role) -> Vec<RoleChange> {
        if role == Role::Warden {
            return self.set_warden(player, true);
        }
        if self.warden == Some(player) {
            self.warden = None;
        }
        self.assign(player, role).into_iter().collect()
    }

    /// Give every connected player the base role of their team and clear the
    /// round-scoped state.
    pub fn reset_for_round(&mut self, players: &[PlayerInfo]) -> Vec<RoleChange> {
        self.warden = None;
        self.box_active = false;
        self.cells_open = false;

        let connected: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
        self.roles.retain(|id, _| connected.contains(id));

        let changes: Vec<RoleChange> = players
            .iter()
            .filter_map(|p| self.assign(p.id, Role::for_team(p.team)))
            .collect();
        debug!(players = players.len(), changed = changes.len(), "Roles reset for round");
        changes
    }

    /// Drop a disconnected player.
    pub fn forget(&mut self, player: PlayerId) -> Vec<RoleChange> {
        if self.warden == Some(player) {
            self.warden = None;
        }
        match self.roles.remove(&player) {
            Some(from) if from != Role::None => vec![RoleChange {
                player,
                from,
                to: Role::None,
            }],
            _ => Vec::new(),
        }
    }

    pub fn box_active(&self) -> bool {
        self.box_active
    }

    pub fn set_box(&mut self, state: bool) {
        self.box_active = state;
    }

    pub fn cells_open(&self) -> bool {
        self.cells_open
    }

    pub fn set_cells(&mut self, open: bool) {
        self.cells_open = open;
    }

    fn toggle_flag(&mut self, player: PlayerId, flag: Role, state: bool) -> Vec<RoleChange> {
        let current = self.role(player);
        if state {
            self.set_role(player, flag)
        } else if current == flag {
            self.set_role(player, Role::Prisoner)
        } else {
            Vec::new()
        }
    }

    fn restored_role(&self) -> Role {
        match self.before_warden {
            Role::None | Role::Warden => Role::Guardian,
            role => role,
        }
    }

    fn assign(&mut self, player: PlayerId, role: Role) -> Option<RoleChange> {
        let from = self.roles.insert(player, role).unwrap_or_default();
        (from != role).then_some(RoleChange {
            player,
            from,
            to: role,
        })
    }
}
