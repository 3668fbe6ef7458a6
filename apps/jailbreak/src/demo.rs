//! Built-in demo behaviours used by the headless binary.
//!
//! They only log and keep enough state to show the core's calls land in the
//! right order; a real provider would drive the game server here.

use jailbreak_api::{LastRequest, PlayerId, RequestSelection, SpecialDay, WeaponChoice};
use parking_lot::Mutex;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duel {
    pub guardian: PlayerId,
    pub prisoner: PlayerId,
    pub weapon_id: String,
    pub kind: Option<String>,
}

/// Knife-only duel.
#[derive(Default)]
pub struct KnifeFight {
    duel: Mutex<Option<Duel>>,
    finished: Mutex<u32>,
}

impl KnifeFight {
    pub const NAME: &'static str = "Knife Fight";

    pub fn new() -> Self {
        Self::default()
    }

    /// The duel in progress, if any.
    pub fn current(&self) -> Option<Duel> {
        self.duel.lock().clone()
    }

    pub fn finished(&self) -> u32 {
        *self.finished.lock()
    }
}

impl LastRequest for KnifeFight {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Guardian and prisoner fight with knives only."
    }

    fn available_weapons(&self) -> Vec<WeaponChoice> {
        vec![WeaponChoice::new("Knife", "weapon_knife")]
    }

    fn available_types(&self) -> Vec<String> {
        vec!["Normal".into(), "Low gravity".into()]
    }

    fn start(&self, guardian: PlayerId, prisoner: PlayerId, selection: &RequestSelection) {
        info!(guardian, prisoner, weapon = %selection.weapon_id, kind = ?selection.kind, "Knife fight begins");
        *self.duel.lock() = Some(Duel {
            guardian,
            prisoner,
            weapon_id: selection.weapon_id.clone(),
            kind: selection.kind.clone(),
        });
    }

    fn end(&self, winner: Option<PlayerId>, loser: Option<PlayerId>) {
        info!(?winner, ?loser, "Knife fight over");
        *self.duel.lock() = None;
        *self.finished.lock() += 1;
    }
}

/// Everyone fights everyone for one round.
#[derive(Default)]
pub struct FreeForAllDay {
    running: Mutex<bool>,
}

impl FreeForAllDay {
    pub const NAME: &'static str = "Free For All";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        *self.running.lock()
    }
}

impl SpecialDay for FreeForAllDay {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Free For All: no teams, last one standing wins."
    }

    fn start(&self) {
        info!(day = Self::NAME, "Free for all begins");
        *self.running.lock() = true;
    }

    fn end(&self) {
        info!(day = Self::NAME, "Free for all over");
        *self.running.lock() = false;
    }
}
