use crate::player::PlayerId;

/// Verdict of a damage filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookResult {
    /// Let the host apply the damage.
    Continue,
    /// Damage was suppressed; the host must skip its own processing.
    Handled,
}

/// One damage notification from the host.
///
/// Lives for a single dispatch. The arbiter zeroes `damage` when it returns
/// [`HookResult::Handled`].
#[derive(Debug, Clone, PartialEq)]
pub struct DamageEvent {
    pub attacker: PlayerId,
    pub victim: PlayerId,
    pub damage: f32,
}

impl DamageEvent {
    pub fn new(attacker: PlayerId, victim: PlayerId, damage: f32) -> Self {
        Self {
            attacker,
            victim,
            damage,
        }
    }
}
