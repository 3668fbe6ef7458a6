use std::time::Duration;

use jailbreak_api::{Hud, PlayerId, Prefix};

use crate::domain::roles::RoleChange;

/// Who receives a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Player(PlayerId),
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    /// Localization key resolved by the host per recipient.
    Key(&'static str),
    /// Already-final text, e.g. a special day description.
    Raw(String),
}

/// A notification addressed by key plus positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub body: MessageBody,
    pub args: Vec<String>,
    pub prefix: Option<Prefix>,
    /// Display time for overlay channels.
    pub duration: Option<Duration>,
}

impl Message {
    pub fn key(key: &'static str) -> Self {
        Self {
            body: MessageBody::Key(key),
            args: Vec::new(),
            prefix: None,
            duration: None,
        }
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            body: MessageBody::Raw(text.into()),
            args: Vec::new(),
            prefix: None,
            duration: None,
        }
    }

    pub fn arg(mut self, arg: impl ToString) -> Self {
        self.args.push(arg.to_string());
        self
    }

    pub fn prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    pub fn for_secs(mut self, secs: u32) -> Self {
        self.duration = Some(Duration::from_secs(u64::from(secs)));
        self
    }

    /// The localization key, if this is a keyed message.
    pub fn key_name(&self) -> Option<&'static str> {
        match self.body {
            MessageBody::Key(key) => Some(key),
            MessageBody::Raw(_) => None,
        }
    }
}

pub trait Notifier {
    fn send(&mut self, audience: Audience, hud: Hud, message: Message);

    /// Observable role change. Hosts use it for model colours and chat feedback.
    fn role_changed(&mut self, _change: &RoleChange) {}
}
