//! Scripted behaviour providers.
//!
//! Both types record every call the core makes into them, so tests can assert
//! on lifecycle edges without a game server.

use jailbreak_api::{LastRequest, PlayerId, RequestSelection, SpecialDay, WeaponChoice};
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestCall {
    Start {
        guardian: PlayerId,
        prisoner: PlayerId,
        selection: RequestSelection,
    },
    End {
        winner: Option<PlayerId>,
        loser: Option<PlayerId>,
    },
}

pub struct ScriptedRequest {
    name: String,
    calls: Mutex<Vec<RequestCall>>,
}

impl ScriptedRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RequestCall> {
        self.calls.lock().clone()
    }

    pub fn starts(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, RequestCall::Start { .. }))
            .count()
    }

    pub fn ends(&self) -> Vec<(Option<PlayerId>, Option<PlayerId>)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                RequestCall::End { winner, loser } => Some((*winner, *loser)),
                RequestCall::Start { .. } => None,
            })
            .collect()
    }
}

impl LastRequest for ScriptedRequest {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "scripted last request"
    }

    fn available_weapons(&self) -> Vec<WeaponChoice> {
        vec![WeaponChoice::new("Knife", "weapon_knife")]
    }

    fn start(&self, guardian: PlayerId, prisoner: PlayerId, selection: &RequestSelection) {
        self.calls.lock().push(RequestCall::Start {
            guardian,
            prisoner,
            selection: selection.clone(),
        });
    }

    fn end(&self, winner: Option<PlayerId>, loser: Option<PlayerId>) {
        self.calls
            .lock()
            .push(RequestCall::End { winner, loser });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCall {
    Start,
    End,
}

pub struct ScriptedDay {
    name: String,
    description: String,
    calls: Mutex<Vec<DayCall>>,
}

impl ScriptedDay {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            description: format!("{name} is on"),
            name,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<DayCall> {
        self.calls.lock().clone()
    }

    pub fn starts(&self) -> usize {
        self.count(DayCall::Start)
    }

    pub fn ends(&self) -> usize {
        self.count(DayCall::End)
    }

    fn count(&self, kind: DayCall) -> usize {
        self.calls.lock().iter().filter(|c| **c == kind).count()
    }
}

impl SpecialDay for ScriptedDay {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn start(&self) {
        self.calls.lock().push(DayCall::Start);
    }

    fn end(&self) {
        self.calls.lock().push(DayCall::End);
    }
}
