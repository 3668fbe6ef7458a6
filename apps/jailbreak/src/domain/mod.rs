//! Domain layer: role bookkeeping and warden selection.

pub mod roles;
pub mod warden;


// Re-exports for ergonomics
pub use roles::{RoleChange, RoleRegistry};
pub use warden::RandomWardenSelector;
