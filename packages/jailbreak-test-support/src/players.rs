//! Roster builders for tests.
//!
//! Guards get ids starting at 100 and prisoners ids starting at 1 so a
//! failing assertion shows at a glance which side a player is on.

use jailbreak_api::{PlayerId, PlayerInfo, Team};

pub const FIRST_PRISONER: PlayerId = 1;
pub const FIRST_GUARD: PlayerId = 100;

pub fn prisoner(n: u32) -> PlayerInfo {
    let id = FIRST_PRISONER + n;
    PlayerInfo::new(id, format!("prisoner-{id}"), Team::Prisoners)
}

pub fn guard(n: u32) -> PlayerInfo {
    let id = FIRST_GUARD + n;
    PlayerInfo::new(id, format!("guard-{id}"), Team::Guards)
}

/// `prisoners` prisoners followed by `guards` guards, everyone alive.
pub fn roster(prisoners: u32, guards: u32) -> Vec<PlayerInfo> {
    (0..prisoners)
        .map(prisoner)
        .chain((0..guards).map(guard))
        .collect()
}
