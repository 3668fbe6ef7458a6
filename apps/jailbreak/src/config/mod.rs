//! Runtime configuration.

pub mod game;

pub use game::{JailbreakConfig, LastRequestConfig, SpecialDayConfig, WardenConfig};
