use std::time::Duration;

use jailbreak_api::{EffectId, PlayerId};

/// Visual effects surface.
pub trait Effects {
    /// Draw a link between two players that disappears after `duration`.
    fn start_link(&mut self, a: PlayerId, b: PlayerId, duration: Duration) -> EffectId;

    fn stop_link(&mut self, id: EffectId);

    /// Looping beacon that follows `player` until stopped.
    fn start_beacon(&mut self, player: PlayerId) -> EffectId;

    fn stop_beacon(&mut self, id: EffectId);
}
