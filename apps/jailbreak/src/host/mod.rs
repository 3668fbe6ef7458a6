//! Host ports: everything the core consumes from the game server.
//!
//! The core never talks to the engine directly. It drives these traits and
//! the host integration (or [`memory`] in tests and the headless binary)
//! turns them into engine calls.

pub mod effects;
pub mod memory;
pub mod notify;
pub mod roster;
pub mod scheduler;
pub mod world;

use jailbreak_api::{Hud, PlayerId};

pub use effects::Effects;
pub use notify::{Audience, Message, MessageBody, Notifier};
pub use roster::Roster;
pub use scheduler::{Scheduler, TimerHandle, TimerTag};
pub use world::World;

use crate::domain::roles::RoleChange;

/// Bundle of host ports owned by the coordinator and lent to orchestrators.
pub struct Host {
    pub scheduler: Box<dyn Scheduler>,
    pub notifier: Box<dyn Notifier>,
    pub effects: Box<dyn Effects>,
    pub world: Box<dyn World>,
    pub roster: Box<dyn Roster>,
}

impl Host {
    pub fn new(
        scheduler: impl Scheduler + 'static,
        notifier: impl Notifier + 'static,
        effects: impl Effects + 'static,
        world: impl World + 'static,
        roster: impl Roster + 'static,
    ) -> Self {
        Self {
            scheduler: Box::new(scheduler),
            notifier: Box::new(notifier),
            effects: Box::new(effects),
            world: Box::new(world),
            roster: Box::new(roster),
        }
    }

    pub fn tell(&mut self, player: PlayerId, hud: Hud, message: Message) {
        self.notifier.send(Audience::Player(player), hud, message);
    }

    pub fn broadcast(&mut self, hud: Hud, message: Message) {
        self.notifier.send(Audience::All, hud, message);
    }

    /// Forward role mutations to the notification surface.
    pub fn announce_roles(&mut self, changes: &[RoleChange]) {
        for change in changes {
            self.notifier.role_changed(change);
        }
    }

    /// Display name of a connected player, empty when they are gone.
    pub fn name_of(&self, player: PlayerId) -> String {
        self.roster
            .player(player)
            .map(|p| p.name)
            .unwrap_or_default()
    }
}
