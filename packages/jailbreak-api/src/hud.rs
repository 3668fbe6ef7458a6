use serde::{Deserialize, Serialize};

/// Channel a message is rendered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hud {
    Chat,
    Center,
    Alert,
    /// Rich overlay; honours the message duration.
    Html,
}

/// Chat prefix family resolved by the localization layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prefix {
    /// Last request.
    LR,
    /// Special day.
    SD,
    /// Generic jailbreak.
    JB,
}
