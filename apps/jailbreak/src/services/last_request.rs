//! Last request orchestration.
//!
//! Lifecycle of a session:
//!
//! ```text
//! Idle -> Selected -> Preparing -> Active -> Idle
//!            \___________\___________\____/ end (any non-idle phase)
//! ```
//!
//! Selection starts a repeating one-second timer tagged with the session id.
//! Each tick counts down; when the count reaches zero the duel begins and the
//! timer is cancelled. Damage is fully suppressed until then.

use std::sync::Arc;
use std::time::Duration;

use jailbreak_api::{
    keys, EffectId, HookResult, Hud, LastRequest, PlayerId, Prefix, RequestSelection,
};
use tracing::{debug, info, warn};

use crate::config::LastRequestConfig;
use crate::domain::roles::RoleRegistry;
use crate::errors::domain::{DomainError, NotFoundKind, RejectionKind};
use crate::host::{Host, Message, TimerHandle, TimerTag};

/// Position of a definition in the append-only registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub usize);

/// Generation marker of a session; never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Created, first countdown tick not yet fired.
    Selected,
    /// Countdown running.
    Preparing,
    /// Duel in progress.
    Active,
}

/// The one running last request.
pub struct ActiveSession {
    id: SessionId,
    request: RequestId,
    definition: Arc<dyn LastRequest>,
    guardian: PlayerId,
    prisoner: PlayerId,
    selection: RequestSelection,
    phase: SessionPhase,
    remaining: u32,
    timer: Option<TimerHandle>,
    link: Option<EffectId>,
    beacons: Vec<EffectId>,
}

impl ActiveSession {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn request(&self) -> RequestId {
        self.request
    }

    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn guardian(&self) -> PlayerId {
        self.guardian
    }

    pub fn prisoner(&self) -> PlayerId {
        self.prisoner
    }

    pub fn selection(&self) -> &RequestSelection {
        &self.selection
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Countdown seconds left; zero once the duel started.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// True until the duel starts, including the instant before the first tick.
    pub fn is_prep_timer_active(&self) -> bool {
        matches!(self.phase, SessionPhase::Selected | SessionPhase::Preparing)
    }

    pub fn is_participant(&self, player: PlayerId) -> bool {
        player == self.guardian || player == self.prisoner
    }

    /// The other bound participant, if `player` is one of them.
    pub fn opponent_of(&self, player: PlayerId) -> Option<PlayerId> {
        if player == self.guardian {
            Some(self.prisoner)
        } else if player == self.prisoner {
            Some(self.guardian)
        } else {
            None
        }
    }
}

pub struct LastRequestOrchestrator {
    requests: Vec<Arc<dyn LastRequest>>,
    active: Option<ActiveSession>,
    last_session: u64,
    config: LastRequestConfig,
}

impl LastRequestOrchestrator {
    pub fn new(config: LastRequestConfig) -> Self {
        Self {
            requests: Vec::new(),
            active: None,
            last_session: 0,
            config,
        }
    }

    /// Append a definition. Duplicates are kept; ids follow registration order.
    pub fn register(&mut self, definition: Arc<dyn LastRequest>) -> RequestId {
        let id = RequestId(self.requests.len());
        info!(request = definition.name(), id = id.0, "Registered last request");
        self.requests.push(definition);
        id
    }

    pub fn requests(&self) -> &[Arc<dyn LastRequest>] {
        &self.requests
    }

    pub fn request(&self, id: RequestId) -> Option<&Arc<dyn LastRequest>> {
        self.requests.get(id.0)
    }

    /// First definition whose name matches, ignoring case.
    pub fn find(&self, name: &str) -> Option<RequestId> {
        self.requests
            .iter()
            .position(|r| r.name().eq_ignore_ascii_case(name))
            .map(RequestId)
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Bind a duel and start its prep countdown.
    ///
    /// While a session runs this only tells the prisoner and returns
    /// `Rejected`; the running session is not touched.
    pub fn select_request(
        &mut self,
        id: RequestId,
        guardian: PlayerId,
        prisoner: PlayerId,
        selection: RequestSelection,
        host: &mut Host,
    ) -> Result<SessionId, DomainError> {
        if let Some(active) = &self.active {
            host.tell(
                prisoner,
                Hud::Chat,
                Message::key(keys::LAST_REQUEST_ALREADY_ACTIVE).prefix(Prefix::LR),
            );
            debug!(
                session = active.id.0,
                prisoner, "Last request rejected: session already active"
            );
            return Err(DomainError::rejected(
                RejectionKind::LastRequestActive,
                format!("session {} is still running", active.id.0),
            ));
        }

        let definition = self.requests.get(id.0).cloned().ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::LastRequest,
                format!("no last request registered at {}", id.0),
            )
        })?;

        if guardian == prisoner {
            return Err(DomainError::validation(
                "guardian and prisoner must be different players",
            ));
        }
        for player in [guardian, prisoner] {
            if !host.roster.is_alive(player) {
                return Err(DomainError::not_found(
                    NotFoundKind::Player(player),
                    "last request participant is not alive",
                ));
            }
        }

        self.last_session += 1;
        let session = SessionId(self.last_session);
        let timer = host
            .scheduler
            .start_repeating(Duration::from_secs(1), TimerTag::LastRequestPrep { session });
        let beacons = if self.config.beacons {
            vec![
                host.effects.start_beacon(prisoner),
                host.effects.start_beacon(guardian),
            ]
        } else {
            Vec::new()
        };

        info!(
            session = session.0,
            request = definition.name(),
            guardian,
            prisoner,
            weapon = %selection.weapon_id,
            prep_seconds = self.config.prep_seconds,
            "Last request selected"
        );

        self.active = Some(ActiveSession {
            id: session,
            request: id,
            definition,
            guardian,
            prisoner,
            selection,
            phase: SessionPhase::Selected,
            remaining: self.config.prep_seconds,
            timer: Some(timer),
            link: None,
            beacons,
        });
        Ok(session)
    }

    /// One second of prep countdown for `session`.
    ///
    /// Ticks for a session that is gone or already dueling are ignored.
    pub fn on_prep_tick(&mut self, session: SessionId, roles: &mut RoleRegistry, host: &mut Host) {
        let (guardian, prisoner) = match &self.active {
            Some(active) if active.id == session && active.is_prep_timer_active() => {
                (active.guardian, active.prisoner)
            }
            Some(active) => {
                debug!(
                    stale = session.0,
                    current = active.id.0,
                    "Ignoring stale prep tick"
                );
                return;
            }
            None => {
                debug!(stale = session.0, "Ignoring prep tick without session");
                return;
            }
        };

        // A participant who left or died between ticks forfeits.
        for player in [prisoner, guardian] {
            if !host.roster.is_alive(player) {
                warn!(
                    session = session.0,
                    player, "Participant gone during prep; ending as forfeit"
                );
                self.on_player_death(player, host);
                return;
            }
        }

        let pulse = self.link_pulse();
        let status_secs = self.config.status_duration_seconds;
        let Some(active) = self.active.as_mut() else {
            return;
        };

        active.remaining = active.remaining.saturating_sub(1);
        if active.remaining > 0 {
            active.phase = SessionPhase::Preparing;

            if let Some(previous) = active.link.take() {
                host.effects.stop_link(previous);
            }
            active.link = Some(host.effects.start_link(prisoner, guardian, pulse));

            let name = active.definition.name().to_string();
            let remaining = active.remaining;
            let prisoner_name = host.name_of(prisoner);
            let guardian_name = host.name_of(guardian);
            host.tell(
                prisoner,
                Hud::Html,
                Message::key(keys::LAST_REQUEST_STARTING)
                    .arg(&name)
                    .arg(remaining)
                    .arg(guardian_name)
                    .for_secs(status_secs),
            );
            host.tell(
                guardian,
                Hud::Html,
                Message::key(keys::LAST_REQUEST_STARTING)
                    .arg(&name)
                    .arg(remaining)
                    .arg(prisoner_name)
                    .for_secs(status_secs),
            );
            debug!(session = session.0, remaining, "Last request countdown");
        } else {
            self.begin_duel(roles, host);
        }
    }

    /// End the running session, if any. Returns whether a session ended.
    pub fn end_request(
        &mut self,
        winner: Option<PlayerId>,
        loser: Option<PlayerId>,
        host: &mut Host,
    ) -> bool {
        let Some(mut session) = self.active.take() else {
            return false;
        };

        session.definition.end(winner, loser);
        Self::release_resources(&mut session, host);
        info!(
            session = session.id.0,
            request = session.definition.name(),
            ?winner,
            ?loser,
            "Last request ended"
        );
        true
    }

    /// A participant's death ends the duel in favour of the other one.
    pub fn on_player_death(&mut self, player: PlayerId, host: &mut Host) -> bool {
        let Some(active) = &self.active else {
            return false;
        };
        let (guardian, prisoner) = (active.guardian, active.prisoner);

        if player == prisoner {
            self.end_request(Some(guardian), Some(prisoner), host)
        } else if player == guardian {
            self.end_request(Some(prisoner), Some(guardian), host)
        } else {
            false
        }
    }

    /// Damage rule while a session exists: nothing lands during prep, and
    /// afterwards only the two participants may hurt each other.
    pub fn on_take_damage(&self, attacker: PlayerId, victim: PlayerId) -> HookResult {
        let Some(active) = &self.active else {
            return HookResult::Continue;
        };

        if active.is_prep_timer_active() {
            return HookResult::Handled;
        }

        if active.is_participant(attacker) && active.is_participant(victim) {
            HookResult::Continue
        } else {
            HookResult::Handled
        }
    }

    fn begin_duel(&mut self, roles: &mut RoleRegistry, host: &mut Host) {
        let Some(active) = self.active.as_mut() else {
            return;
        };

        // Duel participants outrank the warden.
        if let Some(warden) = roles.warden() {
            let changes = roles.set_warden(warden, false);
            host.announce_roles(&changes);
        }

        active
            .definition
            .start(active.guardian, active.prisoner, &active.selection);

        host.broadcast(
            Hud::Chat,
            Message::key(keys::LAST_REQUEST_STARTED)
                .arg(active.definition.name())
                .arg(active.selection.kind.clone().unwrap_or_default())
                .prefix(Prefix::LR),
        );

        Self::release_resources(active, host);
        active.remaining = 0;
        active.phase = SessionPhase::Active;

        info!(
            session = active.id.0,
            request = active.definition.name(),
            guardian = active.guardian,
            prisoner = active.prisoner,
            "Last request started"
        );
    }

    /// Pulse length, falling back to one second when the configured value
    /// does not fit a `Duration`.
    fn link_pulse(&self) -> Duration {
        let seconds = self.config.link_pulse_seconds;
        match Duration::try_from_secs_f32(seconds) {
            Ok(pulse) if !pulse.is_zero() => pulse,
            _ => {
                warn!(seconds, "Invalid link pulse length; using 1s");
                Duration::from_secs(1)
            }
        }
    }

    fn release_resources(session: &mut ActiveSession, host: &mut Host) {
        if let Some(timer) = session.timer.take() {
            host.scheduler.cancel(timer);
        }
        if let Some(link) = session.link.take() {
            host.effects.stop_link(link);
        }
        for beacon in session.beacons.drain(..) {
            host.effects.stop_beacon(beacon);
        }
    }
}
