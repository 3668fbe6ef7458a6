use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Host-assigned player slot identifier; stable while the player is connected.
pub type PlayerId = u32;

/// Correlation id of a running visual effect (link or beacon).
pub type EffectId = Uuid;

/// Role a player holds for the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    /// Single guard with round authority. At most one per server.
    Warden,
    Prisoner,
    Guardian,
    Rebel,
    Freeday,
    #[default]
    None,
}

impl Role {
    /// Base role for a team at round start.
    pub fn for_team(team: Team) -> Self {
        match team {
            Team::Prisoners => Role::Prisoner,
            Team::Guards => Role::Guardian,
            Team::Spectators | Team::Unassigned => Role::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Warden => "warden",
            Role::Prisoner => "prisoner",
            Role::Guardian => "guardian",
            Role::Rebel => "rebel",
            Role::Freeday => "freeday",
            Role::None => "none",
        }
    }
}

/// Host team membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// Terrorist side; the aggressor team in box mode.
    Prisoners,
    /// Counter-terrorist side; warden candidates come from here.
    Guards,
    Spectators,
    Unassigned,
}

/// Host view of a connected player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub name: String,
    pub team: Team,
    pub alive: bool,
}

impl PlayerInfo {
    pub fn new(id: PlayerId, name: impl Into<String>, team: Team) -> Self {
        Self {
            id,
            name: name.into(),
            team,
            alive: true,
        }
    }
}
