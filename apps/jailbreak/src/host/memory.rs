//! In-memory host.
//!
//! Deterministic implementations of every host port. The headless binary and
//! the test suites drive the core through these. Each type is a cheap clone
//! over shared state, so a caller can keep a handle for inspection after
//! boxing another clone into a [`Host`].

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use jailbreak_api::{EffectId, Hud, PlayerId, PlayerInfo, Team};
use parking_lot::Mutex;
use uuid::Uuid;

use super::{
    Audience, Effects, Host, Message, Notifier, Roster, Scheduler, TimerHandle, TimerTag, World,
};
use crate::domain::roles::RoleChange;
use crate::services::game_flow::JailbreakCore;

// ============================================================================
// Scheduler
// ============================================================================

#[derive(Debug, Clone)]
struct PendingTimer {
    tag: TimerTag,
    due: Duration,
    interval: Option<Duration>,
}

#[derive(Debug, Default)]
struct ClockState {
    now: Duration,
    next_handle: u64,
    timers: BTreeMap<TimerHandle, PendingTimer>,
    cancelled: Vec<TimerHandle>,
}

/// Virtual-time scheduler. Nothing fires until [`ManualScheduler::advance`].
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    state: Arc<Mutex<ClockState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    /// Number of timers still scheduled.
    pub fn pending(&self) -> usize {
        self.state.lock().timers.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.state.lock().timers.contains_key(&handle)
    }

    /// Handles cancelled so far, in cancellation order.
    pub fn cancelled(&self) -> Vec<TimerHandle> {
        self.state.lock().cancelled.clone()
    }

    /// Move virtual time forward by `by`, firing due timers one at a time in
    /// deadline order (ties by creation order).
    ///
    /// The lock is released before `dispatch` runs, so the dispatcher may
    /// schedule or cancel timers on another clone of this scheduler and the
    /// next pick sees the change.
    pub fn advance(&self, by: Duration, mut dispatch: impl FnMut(TimerHandle, TimerTag)) {
        let deadline = self.state.lock().now + by;
        loop {
            let fired = {
                let mut state = self.state.lock();
                let next = state
                    .timers
                    .iter()
                    .filter(|(_, timer)| timer.due <= deadline)
                    .min_by_key(|(handle, timer)| (timer.due, **handle))
                    .map(|(handle, timer)| (*handle, timer.tag, timer.due, timer.interval));

                match next {
                    Some((handle, tag, due, interval)) => {
                        state.now = due;
                        match interval {
                            Some(interval) => {
                                if let Some(timer) = state.timers.get_mut(&handle) {
                                    timer.due = due + interval;
                                }
                            }
                            None => {
                                state.timers.remove(&handle);
                            }
                        }
                        Some((handle, tag))
                    }
                    None => {
                        state.now = deadline;
                        None
                    }
                }
            };

            match fired {
                Some((handle, tag)) => dispatch(handle, tag),
                None => break,
            }
        }
    }

    /// Advance and feed every firing into the coordinator.
    pub fn run(&self, core: &mut JailbreakCore, by: Duration) {
        self.advance(by, |handle, tag| core.on_timer(handle, tag));
    }

    fn insert(&mut self, delay: Duration, interval: Option<Duration>, tag: TimerTag) -> TimerHandle {
        let mut state = self.state.lock();
        state.next_handle += 1;
        let handle = TimerHandle(state.next_handle);
        let due = state.now + delay;
        state.timers.insert(handle, PendingTimer { tag, due, interval });
        handle
    }
}

impl Scheduler for ManualScheduler {
    fn start_one_shot(&mut self, delay: Duration, tag: TimerTag) -> TimerHandle {
        self.insert(delay, None, tag)
    }

    fn start_repeating(&mut self, interval: Duration, tag: TimerTag) -> TimerHandle {
        // A zero interval would never let virtual time move.
        let interval = interval.max(Duration::from_millis(1));
        self.insert(interval, Some(interval), tag)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let mut state = self.state.lock();
        if state.timers.remove(&handle).is_some() {
            state.cancelled.push(handle);
        }
    }
}

// ============================================================================
// Roster
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MemoryRoster {
    players: Arc<Mutex<Vec<PlayerInfo>>>,
}

impl MemoryRoster {
    pub fn new(players: Vec<PlayerInfo>) -> Self {
        Self {
            players: Arc::new(Mutex::new(players)),
        }
    }

    /// Add a player, replacing any entry with the same id.
    pub fn join(&self, player: PlayerInfo) {
        let mut players = self.players.lock();
        players.retain(|p| p.id != player.id);
        players.push(player);
    }

    pub fn leave(&self, id: PlayerId) {
        self.players.lock().retain(|p| p.id != id);
    }

    pub fn kill(&self, id: PlayerId) {
        self.set_alive(id, false);
    }

    pub fn revive_all(&self) {
        for p in self.players.lock().iter_mut() {
            p.alive = true;
        }
    }

    pub fn set_team(&self, id: PlayerId, team: Team) {
        if let Some(p) = self.players.lock().iter_mut().find(|p| p.id == id) {
            p.team = team;
        }
    }

    fn set_alive(&self, id: PlayerId, alive: bool) {
        if let Some(p) = self.players.lock().iter_mut().find(|p| p.id == id) {
            p.alive = alive;
        }
    }
}

impl Roster for MemoryRoster {
    fn players(&self) -> Vec<PlayerInfo> {
        self.players.lock().clone()
    }
}

// ============================================================================
// Notifier
// ============================================================================

/// One message as it reached the notification surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub audience: Audience,
    pub hud: Hud,
    pub message: Message,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    role_changes: Arc<Mutex<Vec<RoleChange>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<SentMessage> {
        self.sent.lock().clone()
    }

    /// Messages sent with the given localization key.
    pub fn with_key(&self, key: &str) -> Vec<SentMessage> {
        self.sent
            .lock()
            .iter()
            .filter(|m| m.message.key_name() == Some(key))
            .cloned()
            .collect()
    }

    pub fn role_changes(&self) -> Vec<RoleChange> {
        self.role_changes.lock().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().clear();
        self.role_changes.lock().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn send(&mut self, audience: Audience, hud: Hud, message: Message) {
        self.sent.lock().push(SentMessage {
            audience,
            hud,
            message,
        });
    }

    fn role_changed(&mut self, change: &RoleChange) {
        self.role_changes.lock().push(*change);
    }
}

// ============================================================================
// Effects
// ============================================================================

#[derive(Debug, Default)]
struct EffectState {
    links: HashSet<EffectId>,
    beacons: HashSet<EffectId>,
    links_started: usize,
    beacons_started: usize,
}

/// Tracks which effects are currently running.
///
/// Links are treated as running until stopped; the host's own expiry of the
/// pulse duration is not modelled.
#[derive(Debug, Clone, Default)]
pub struct RecordingEffects {
    state: Arc<Mutex<EffectState>>,
}

impl RecordingEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_links(&self) -> usize {
        self.state.lock().links.len()
    }

    pub fn active_beacons(&self) -> usize {
        self.state.lock().beacons.len()
    }

    pub fn links_started(&self) -> usize {
        self.state.lock().links_started
    }

    pub fn beacons_started(&self) -> usize {
        self.state.lock().beacons_started
    }
}

impl Effects for RecordingEffects {
    fn start_link(&mut self, _a: PlayerId, _b: PlayerId, _duration: Duration) -> EffectId {
        let id = Uuid::new_v4();
        let mut state = self.state.lock();
        state.links.insert(id);
        state.links_started += 1;
        id
    }

    fn stop_link(&mut self, id: EffectId) {
        self.state.lock().links.remove(&id);
    }

    fn start_beacon(&mut self, _player: PlayerId) -> EffectId {
        let id = Uuid::new_v4();
        let mut state = self.state.lock();
        state.beacons.insert(id);
        state.beacons_started += 1;
        id
    }

    fn stop_beacon(&mut self, id: EffectId) {
        self.state.lock().beacons.remove(&id);
    }
}

// ============================================================================
// World
// ============================================================================

#[derive(Debug, Default)]
struct WorldState {
    teammates_are_enemies: bool,
    cells_open: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingWorld {
    state: Arc<Mutex<WorldState>>,
}

impl RecordingWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn teammates_are_enemies(&self) -> bool {
        self.state.lock().teammates_are_enemies
    }

    pub fn cells_open(&self) -> bool {
        self.state.lock().cells_open
    }
}

impl World for RecordingWorld {
    fn set_teammates_are_enemies(&mut self, enabled: bool) {
        self.state.lock().teammates_are_enemies = enabled;
    }

    fn set_cells_open(&mut self, open: bool) {
        self.state.lock().cells_open = open;
    }
}

// ============================================================================
// Bundle
// ============================================================================

/// All in-memory ports together, with inspection handles kept outside the
/// [`Host`] they are boxed into.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    pub clock: ManualScheduler,
    pub roster: MemoryRoster,
    pub notifier: RecordingNotifier,
    pub effects: RecordingEffects,
    pub world: RecordingWorld,
}

impl MemoryHost {
    pub fn new(players: Vec<PlayerInfo>) -> Self {
        Self {
            roster: MemoryRoster::new(players),
            ..Self::default()
        }
    }

    /// Box clones of every port into a [`Host`].
    pub fn host(&self) -> Host {
        Host::new(
            self.clock.clone(),
            self.notifier.clone(),
            self.effects.clone(),
            self.world.clone(),
            self.roster.clone(),
        )
    }
}
