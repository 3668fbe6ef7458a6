//! Random warden assignment.

use jailbreak_api::{keys, Hud, PlayerId, Prefix, Team};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::domain::roles::RoleRegistry;
use crate::host::{Host, Message};

/// Picks a warden uniformly among alive guards.
///
/// Seedable so tests and replays draw the same guard.
pub struct RandomWardenSelector {
    rng: StdRng,
}

impl RandomWardenSelector {
    /// `Some(seed)` for reproducible picks, `None` for OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }

    /// Make a random alive guard the warden.
    ///
    /// Returns the chosen player, or `None` (leaving the current warden
    /// untouched) when nobody is eligible.
    pub fn assign_random_warden(
        &mut self,
        roles: &mut RoleRegistry,
        host: &mut Host,
    ) -> Option<PlayerId> {
        let candidates: Vec<PlayerId> = host
            .roster
            .players()
            .into_iter()
            .filter(|p| p.team == Team::Guards && p.alive)
            .map(|p| p.id)
            .collect();

        debug!(candidates = candidates.len(), "AssignRandomWarden candidates");

        if candidates.is_empty() {
            debug!("AssignRandomWarden aborted: no eligible guards");
            return None;
        }

        let chosen = candidates[self.rng.random_range(0..candidates.len())];
        debug!(player = chosen, "AssignRandomWarden selecting player");

        let changes = roles.set_warden(chosen, true);
        host.announce_roles(&changes);
        host.tell(
            chosen,
            Hud::Chat,
            Message::key(keys::WARDEN_TAKE).prefix(Prefix::JB),
        );
        Some(chosen)
    }
}
