//! Public contract of the jailbreak core.
//!
//! Third-party behaviour providers only need this crate: implement
//! [`LastRequest`] or [`SpecialDay`] and hand an `Arc` of it to the core's
//! registration surface.

pub mod damage;
pub mod hud;
pub mod keys;
pub mod last_request;
pub mod player;
pub mod special_day;

pub use damage::{DamageEvent, HookResult};
pub use hud::{Hud, Prefix};
pub use last_request::{LastRequest, RequestSelection, WeaponChoice};
pub use player::{EffectId, PlayerId, PlayerInfo, Role, Team};
pub use special_day::SpecialDay;
