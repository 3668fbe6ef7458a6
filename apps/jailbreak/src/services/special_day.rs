//! Special day orchestration: registry, pending pick, active day and the
//! round-based cooldown between days.

use std::sync::Arc;

use jailbreak_api::{keys, Hud, PlayerId, Prefix, SpecialDay};
use tracing::{debug, info};

use crate::config::SpecialDayConfig;
use crate::errors::domain::{DomainError, RejectionKind};
use crate::host::{Host, Message};

/// Pending and active are mutually exclusive, so they share one slot.
#[derive(Clone)]
enum DaySlot {
    Idle,
    Pending(Arc<dyn SpecialDay>),
    Active(Arc<dyn SpecialDay>),
}

pub struct SpecialDayOrchestrator {
    days: Vec<Arc<dyn SpecialDay>>,
    slot: DaySlot,
    cooldown: u32,
    config: SpecialDayConfig,
}

impl SpecialDayOrchestrator {
    /// Starts with no cooldown; the first day can be picked right away.
    pub fn new(config: SpecialDayConfig) -> Self {
        Self {
            days: Vec::new(),
            slot: DaySlot::Idle,
            cooldown: 0,
            config,
        }
    }

    pub fn register(&mut self, day: Arc<dyn SpecialDay>) {
        info!(day = day.name(), "Registered special day");
        self.days.push(day);
    }

    /// Remove a day by identity. Returns whether it was registered.
    ///
    /// A pending pick of that day is dropped. An active one keeps running
    /// until its normal end.
    pub fn unregister(&mut self, day: &Arc<dyn SpecialDay>) -> bool {
        let before = self.days.len();
        self.days.retain(|d| !same_day(d, day));
        let removed = self.days.len() != before;

        if matches!(&self.slot, DaySlot::Pending(pending) if same_day(pending, day)) {
            debug!(day = day.name(), "Pending special day unregistered");
            self.slot = DaySlot::Idle;
        }
        if removed {
            info!(day = day.name(), "Unregistered special day");
        }
        removed
    }

    /// Remove every day with a matching name, ignoring case.
    pub fn unregister_by_name(&mut self, name: &str) -> usize {
        let matching: Vec<Arc<dyn SpecialDay>> = self
            .days
            .iter()
            .filter(|d| d.name().eq_ignore_ascii_case(name))
            .cloned()
            .collect();
        let mut removed = 0;
        for day in &matching {
            if self.unregister(day) {
                removed += 1;
            }
        }
        removed
    }

    pub fn days(&self) -> &[Arc<dyn SpecialDay>] {
        &self.days
    }

    pub fn find(&self, name: &str) -> Option<&Arc<dyn SpecialDay>> {
        self.days
            .iter()
            .find(|d| d.name().eq_ignore_ascii_case(name))
    }

    pub fn pending(&self) -> Option<&Arc<dyn SpecialDay>> {
        match &self.slot {
            DaySlot::Pending(day) => Some(day),
            _ => None,
        }
    }

    pub fn active(&self) -> Option<&Arc<dyn SpecialDay>> {
        match &self.slot {
            DaySlot::Active(day) => Some(day),
            _ => None,
        }
    }

    /// Rounds left before another day may be picked.
    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    /// Queue a day for the next round start.
    ///
    /// A later pick replaces an earlier pending one.
    pub fn select(
        &mut self,
        player: PlayerId,
        name: &str,
        host: &mut Host,
    ) -> Result<(), DomainError> {
        if self.cooldown > 0 {
            host.tell(
                player,
                Hud::Chat,
                Message::key(keys::DAY_ON_COOLDOWN)
                    .arg(self.cooldown)
                    .prefix(Prefix::SD),
            );
            return Err(DomainError::rejected(
                RejectionKind::DayOnCooldown {
                    rounds_left: self.cooldown,
                },
                format!("{} rounds left", self.cooldown),
            ));
        }

        if let DaySlot::Active(active) = &self.slot {
            host.tell(
                player,
                Hud::Chat,
                Message::key(keys::SPECIAL_DAY_ALREADY_ACTIVE)
                    .arg(active.name())
                    .prefix(Prefix::SD),
            );
            return Err(DomainError::rejected(
                RejectionKind::DayActive,
                format!("{} is running", active.name()),
            ));
        }

        let Some(day) = self.find(name).cloned() else {
            debug!(player, requested = name, "Special day not found");
            host.tell(
                player,
                Hud::Chat,
                Message::key(keys::SPECIAL_DAY_NOT_FOUND)
                    .arg(name)
                    .prefix(Prefix::SD),
            );
            return Err(DomainError::rejected(
                RejectionKind::UnknownDay,
                format!("no special day named {name:?}"),
            ));
        };

        let player_name = host.name_of(player);
        host.broadcast(
            Hud::Chat,
            Message::key(keys::SPECIAL_DAY_PENDING)
                .arg(player_name)
                .arg(day.name())
                .prefix(Prefix::SD),
        );
        info!(player, day = day.name(), "Special day pending");
        self.slot = DaySlot::Pending(day);
        Ok(())
    }

    /// Tick the cooldown and promote a pending day.
    pub fn on_round_start(&mut self, host: &mut Host) {
        self.cooldown = self.cooldown.saturating_sub(1);

        let DaySlot::Pending(day) = self.slot.clone() else {
            return;
        };

        day.start();
        host.broadcast(
            Hud::Chat,
            Message::raw(day.description()).prefix(Prefix::SD),
        );
        self.cooldown = self.config.cooldown_in_rounds;
        info!(
            day = day.name(),
            cooldown = self.cooldown,
            "Special day started"
        );
        self.slot = DaySlot::Active(day);
    }

    pub fn on_round_end(&mut self) {
        self.finish_active();
    }

    /// End the active day early.
    pub fn end_day(&mut self) {
        self.finish_active();
    }

    fn finish_active(&mut self) {
        if let DaySlot::Active(day) = &self.slot {
            day.end();
            info!(day = day.name(), "Special day ended");
            self.slot = DaySlot::Idle;
        }
    }
}

/// Compares data pointers only.
fn same_day(a: &Arc<dyn SpecialDay>, b: &Arc<dyn SpecialDay>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
