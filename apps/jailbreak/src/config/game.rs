//! Game-mode configuration.
//!
//! Every field has a default, so an empty JSON object (or no config at all)
//! yields a playable setup.
//!
//! # Example JSON Config
//!
//! ```json
//! {
//!   "last_request": { "prep_seconds": 5, "beacons": false },
//!   "special_day": { "cooldown_in_rounds": 2 },
//!   "warden": { "auto_assign_after_seconds": null }
//! }
//! ```

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::CoreError;

/// Path to a JSON config file.
pub const CONFIG_PATH_ENV: &str = "JAILBREAK_CONFIG";
/// Overrides `last_request.prep_seconds`.
pub const PREP_SECONDS_ENV: &str = "JAILBREAK_LR_PREP_SECONDS";
/// Overrides `special_day.cooldown_in_rounds`.
pub const COOLDOWN_ROUNDS_ENV: &str = "JAILBREAK_SD_COOLDOWN_ROUNDS";
/// Upper bound for `last_request.link_pulse_seconds`.
pub const MAX_LINK_PULSE_SECONDS: f32 = 60.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JailbreakConfig {
    pub last_request: LastRequestConfig,
    pub special_day: SpecialDayConfig,
    pub warden: WardenConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LastRequestConfig {
    /// Seconds between selection and duel start. Must be at least 1.
    ///
    /// The countdown decrements before it tests for zero, so the duel starts
    /// on tick `prep_seconds` and the status update shows `prep_seconds - 1`
    /// times.
    pub prep_seconds: u32,
    /// Lifetime of each link-effect pulse drawn between the participants.
    pub link_pulse_seconds: f32,
    /// How long each countdown status overlay stays up.
    pub status_duration_seconds: u32,
    /// Put a beacon on both participants while the countdown runs.
    pub beacons: bool,
}

impl Default for LastRequestConfig {
    fn default() -> Self {
        Self {
            prep_seconds: 5,
            link_pulse_seconds: 1.0,
            status_duration_seconds: 5,
            beacons: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialDayConfig {
    /// Rounds that must pass after a day starts before another can be picked.
    pub cooldown_in_rounds: u32,
}

impl Default for SpecialDayConfig {
    fn default() -> Self {
        Self {
            cooldown_in_rounds: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WardenConfig {
    /// Seconds into the round after which a random guard becomes warden if
    /// nobody claimed it. `None` disables auto-assignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_assign_after_seconds: Option<u32>,
}

impl Default for WardenConfig {
    fn default() -> Self {
        Self {
            auto_assign_after_seconds: Some(15),
        }
    }
}

impl JailbreakConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CoreError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Load from the environment.
    ///
    /// `JAILBREAK_CONFIG` names a JSON file; when unset the defaults are used.
    /// `JAILBREAK_LR_PREP_SECONDS` and `JAILBREAK_SD_COOLDOWN_ROUNDS` then
    /// override individual fields.
    pub fn from_env() -> Result<Self, CoreError> {
        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                info!(path = %path, "Loading jailbreak config file");
                Self::from_path(path.trim())?
            }
            _ => {
                debug!("{CONFIG_PATH_ENV} not set, using default config");
                Self::default()
            }
        };

        if let Some(prep) = parse_env_u32(PREP_SECONDS_ENV)? {
            config.last_request.prep_seconds = prep;
        }
        if let Some(cooldown) = parse_env_u32(COOLDOWN_ROUNDS_ENV)? {
            config.special_day.cooldown_in_rounds = cooldown;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.last_request.prep_seconds == 0 {
            return Err(CoreError::config(
                "last_request.prep_seconds must be at least 1",
            ));
        }
        let pulse = self.last_request.link_pulse_seconds;
        if !(pulse > 0.0 && pulse <= MAX_LINK_PULSE_SECONDS) {
            return Err(CoreError::config(format!(
                "last_request.link_pulse_seconds must be in (0, {MAX_LINK_PULSE_SECONDS}], got {pulse}"
            )));
        }
        if self.warden.auto_assign_after_seconds == Some(0) {
            return Err(CoreError::config(
                "warden.auto_assign_after_seconds must be positive; use null to disable",
            ));
        }
        Ok(())
    }
}

fn parse_env_u32(key: &str) -> Result<Option<u32>, CoreError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|e| CoreError::config(format!("{key} must be a whole number: {e}"))),
        _ => Ok(None),
    }
}
