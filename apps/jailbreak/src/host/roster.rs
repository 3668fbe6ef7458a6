use jailbreak_api::{PlayerId, PlayerInfo, Team};

/// Live view of connected players.
///
/// Queried fresh on every action; a player missing from the roster has
/// disconnected.
pub trait Roster {
    fn players(&self) -> Vec<PlayerInfo>;

    fn player(&self, id: PlayerId) -> Option<PlayerInfo> {
        self.players().into_iter().find(|p| p.id == id)
    }

    /// Connected and alive.
    fn is_alive(&self, id: PlayerId) -> bool {
        self.player(id).is_some_and(|p| p.alive)
    }

    fn team_of(&self, id: PlayerId) -> Option<Team> {
        self.player(id).map(|p| p.team)
    }
}
