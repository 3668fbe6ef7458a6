//! Localization keys emitted by the core.
//!
//! Positional arguments are listed next to each key in the order they are sent.

/// Sent to a freshly picked warden. No arguments.
pub const WARDEN_TAKE: &str = "warden_take";
/// Sent to the prisoner when a request is already running. No arguments.
pub const LAST_REQUEST_ALREADY_ACTIVE: &str = "last_request_already_active";
/// Prep countdown status: request name, seconds left, opponent name.
pub const LAST_REQUEST_STARTING: &str = "last_request_starting";
/// Broadcast when the duel begins: request name, selected type.
pub const LAST_REQUEST_STARTED: &str = "last_request_started";
/// Rounds left on the special day cooldown.
pub const DAY_ON_COOLDOWN: &str = "day_on_cooldown";
/// Selecting player name, day name.
pub const SPECIAL_DAY_PENDING: &str = "special_day_pending";
/// Name of the day currently running.
pub const SPECIAL_DAY_ALREADY_ACTIVE: &str = "special_day_already_active";
/// Requested day name.
pub const SPECIAL_DAY_NOT_FOUND: &str = "special_day_not_found";
/// Caller name, new state.
pub const BOX_TOGGLED: &str = "box_toggled";
/// Caller name, new state.
pub const CELLS_TOGGLED: &str = "cells_toggled";
