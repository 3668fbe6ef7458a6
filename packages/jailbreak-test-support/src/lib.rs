//! Jailbreak test support utilities
//!
//! This crate provides the shared pieces integration tests need: unified
//! logging initialization, roster builders and scripted behaviour
//! providers.

pub mod behaviours;
pub mod logging;
pub mod players;
