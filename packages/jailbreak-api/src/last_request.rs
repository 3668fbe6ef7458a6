//! Last request trait definition.
//!
//! How to provide a last request
//!
//! 1) Implement `LastRequest` for your type.
//! 2) Register an `Arc` of it once at startup; the registry is append-only and
//!    keeps registration order.
//! 3) Trait methods take `&self`. Keep per-duel state behind a `Mutex` and
//!    reset it in `end`.

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// A weapon offered by a last request, as shown in the selection menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponChoice {
    pub display_name: String,
    /// Engine class name, e.g. `weapon_knife`.
    pub class_name: String,
}

impl WeaponChoice {
    pub fn new(display_name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            class_name: class_name.into(),
        }
    }
}

/// What the prisoner picked for this duel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSelection {
    pub weapon_name: String,
    pub weapon_id: String,
    /// One of [`LastRequest::available_types`], when the request has sub-types.
    pub kind: Option<String>,
}

impl RequestSelection {
    pub fn new(weapon_name: impl Into<String>, weapon_id: impl Into<String>) -> Self {
        Self {
            weapon_name: weapon_name.into(),
            weapon_id: weapon_id.into(),
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

/// A duel-style interaction a qualifying prisoner can request.
///
/// The core owns the session (participants, selection, prep countdown) and
/// only calls into the implementation at the two edges of the duel.
pub trait LastRequest: Send + Sync {
    /// Human-friendly name, also used for lookups.
    fn name(&self) -> &str;

    /// Short explanation shown in menus.
    fn description(&self) -> &str;

    /// Weapons the prisoner may choose from.
    fn available_weapons(&self) -> Vec<WeaponChoice> {
        Vec::new()
    }

    /// Optional sub-types (e.g. "headshot only").
    fn available_types(&self) -> Vec<String> {
        Vec::new()
    }

    /// Called once when the prep countdown finishes.
    fn start(&self, guardian: PlayerId, prisoner: PlayerId, selection: &RequestSelection);

    /// Called once when the session ends. Both sides are `None` when the
    /// duel was cancelled without a result (round end, forced stop).
    fn end(&self, winner: Option<PlayerId>, loser: Option<PlayerId>);
}
