use std::sync::Arc;
use std::time::Duration;

use jailbreak_api::{keys, HookResult, Hud, PlayerId, RequestSelection, Role};
use jailbreak_test_support::behaviours::ScriptedRequest;
use jailbreak_test_support::players::roster;

use crate::config::LastRequestConfig;
use crate::domain::roles::RoleRegistry;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::host::memory::MemoryHost;
use crate::host::{Audience, Host, TimerTag};
use crate::services::last_request::{LastRequestOrchestrator, RequestId, SessionId, SessionPhase};

const P1: PlayerId = 1;
const P2: PlayerId = 2;
const G1: PlayerId = 100;
const G2: PlayerId = 101;

struct Fixture {
    mem: MemoryHost,
    host: Host,
    roles: RoleRegistry,
    lr: LastRequestOrchestrator,
    knife: Arc<ScriptedRequest>,
    knife_id: RequestId,
}

impl Fixture {
    fn new(prep_seconds: u32) -> Self {
        Self::with_config(LastRequestConfig {
            prep_seconds,
            ..LastRequestConfig::default()
        })
    }

    fn with_config(config: LastRequestConfig) -> Self {
        let mem = MemoryHost::new(roster(2, 2));
        let host = mem.host();
        let mut lr = LastRequestOrchestrator::new(config);
        let knife = Arc::new(ScriptedRequest::new("Knife Fight"));
        let knife_id = lr.register(knife.clone());
        Self {
            mem,
            host,
            roles: RoleRegistry::new(),
            lr,
            knife,
            knife_id,
        }
    }

    fn select(&mut self, guardian: PlayerId, prisoner: PlayerId) -> Result<SessionId, DomainError> {
        self.lr.select_request(
            self.knife_id,
            guardian,
            prisoner,
            RequestSelection::new("Knife", "weapon_knife"),
            &mut self.host,
        )
    }

    /// Advance virtual time, routing prep ticks into the orchestrator.
    fn tick(&mut self, seconds: u64) {
        let Self {
            mem,
            host,
            roles,
            lr,
            ..
        } = self;
        mem.clock.advance(Duration::from_secs(seconds), |_, tag| {
            if let TimerTag::LastRequestPrep { session } = tag {
                lr.on_prep_tick(session, roles, host);
            }
        });
    }

    fn phase(&self) -> Option<SessionPhase> {
        self.lr.active().map(|s| s.phase())
    }
}

#[test]
fn select_binds_session_and_starts_timer() {
    let mut fx = Fixture::new(5);
    let session = fx.select(G1, P1).expect("selection succeeds");

    let active = fx.lr.active().expect("session bound");
    assert_eq!(active.id(), session);
    assert_eq!(active.guardian(), G1);
    assert_eq!(active.prisoner(), P1);
    assert_eq!(active.phase(), SessionPhase::Selected);
    assert!(active.is_prep_timer_active());
    assert_eq!(active.remaining(), 5);
    assert_eq!(active.opponent_of(P1), Some(G1));
    assert_eq!(active.opponent_of(P2), None);

    assert_eq!(fx.mem.clock.pending(), 1);
    assert_eq!(fx.mem.effects.active_beacons(), 2);
    assert_eq!(fx.knife.starts(), 0);
}

#[test]
fn second_selection_is_rejected_and_leaves_session_alone() {
    let mut fx = Fixture::new(5);
    let first = fx.select(G1, P1).expect("first selection");

    let err = fx.select(G2, P2).expect_err("second selection rejected");
    assert!(err.is_rejection());

    let active = fx.lr.active().expect("still bound");
    assert_eq!(active.id(), first);
    assert_eq!(active.prisoner(), P1);

    let notices = fx.mem.notifier.with_key(keys::LAST_REQUEST_ALREADY_ACTIVE);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].audience, Audience::Player(P2));
    assert_eq!(notices[0].hud, Hud::Chat);
    assert_eq!(fx.mem.clock.pending(), 1);
}

#[test]
fn unknown_request_and_dead_participant_fail_without_state() {
    let mut fx = Fixture::new(5);

    let err = fx
        .lr
        .select_request(RequestId(9), G1, P1, RequestSelection::default(), &mut fx.host)
        .expect_err("unknown id");
    assert!(matches!(
        err,
        DomainError::NotFound(NotFoundKind::LastRequest, _)
    ));

    fx.mem.roster.kill(P1);
    let err = fx.select(G1, P1).expect_err("dead prisoner");
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Player(P1), _)));

    assert!(!fx.lr.is_active());
    assert_eq!(fx.mem.clock.pending(), 0);
}

#[test]
fn countdown_reports_status_then_starts_duel() {
    let mut fx = Fixture::new(3);
    fx.roles.set_warden(G2, true);
    fx.select(G1, P1).expect("selection");

    fx.tick(1);
    assert_eq!(fx.phase(), Some(SessionPhase::Preparing));
    assert_eq!(fx.lr.active().map(|s| s.remaining()), Some(2));
    let status = fx.mem.notifier.with_key(keys::LAST_REQUEST_STARTING);
    assert_eq!(status.len(), 2);
    let to_prisoner = status
        .iter()
        .find(|m| m.audience == Audience::Player(P1))
        .expect("prisoner status");
    assert_eq!(to_prisoner.hud, Hud::Html);
    assert_eq!(to_prisoner.message.args, vec!["Knife Fight", "2", "guard-100"]);
    assert_eq!(fx.mem.effects.active_links(), 1);

    fx.tick(1);
    assert_eq!(fx.mem.notifier.with_key(keys::LAST_REQUEST_STARTING).len(), 4);
    // Each tick replaces the previous link pulse.
    assert_eq!(fx.mem.effects.active_links(), 1);
    assert_eq!(fx.mem.effects.links_started(), 2);
    assert_eq!(fx.knife.starts(), 0);

    fx.tick(1);
    assert_eq!(fx.phase(), Some(SessionPhase::Active));
    assert_eq!(fx.knife.starts(), 1);
    assert_eq!(fx.roles.warden(), None);
    assert_eq!(fx.roles.role(G2), Role::Guardian);

    let started = fx.mem.notifier.with_key(keys::LAST_REQUEST_STARTED);
    assert_eq!(started.len(), 1);
    assert_eq!(started[0].audience, Audience::All);

    assert_eq!(fx.mem.clock.pending(), 0);
    assert_eq!(fx.mem.effects.active_links(), 0);
    assert_eq!(fx.mem.effects.active_beacons(), 0);

    // Nothing more happens once the duel runs.
    fx.tick(5);
    assert_eq!(fx.knife.starts(), 1);
    assert_eq!(fx.mem.notifier.with_key(keys::LAST_REQUEST_STARTING).len(), 4);
}

#[test]
fn one_second_prep_starts_on_first_tick() {
    let mut fx = Fixture::new(1);
    fx.select(G1, P1).expect("selection");
    fx.tick(1);

    assert_eq!(fx.phase(), Some(SessionPhase::Active));
    assert!(fx.mem.notifier.with_key(keys::LAST_REQUEST_STARTING).is_empty());
    assert_eq!(fx.knife.starts(), 1);
}

#[test]
fn out_of_range_pulse_falls_back_instead_of_panicking() {
    for seconds in [1e20, f32::INFINITY, f32::NAN, -1.0] {
        let mut fx = Fixture::with_config(LastRequestConfig {
            prep_seconds: 3,
            link_pulse_seconds: seconds,
            ..LastRequestConfig::default()
        });
        fx.select(G1, P1).expect("selection");
        fx.tick(1);

        assert_eq!(fx.phase(), Some(SessionPhase::Preparing));
        assert_eq!(fx.mem.effects.active_links(), 1);
    }
}

#[test]
fn damage_is_blocked_during_prep_and_limited_to_duelists_after() {
    let mut fx = Fixture::new(2);
    assert_eq!(fx.lr.on_take_damage(P2, G2), HookResult::Continue);

    fx.select(G1, P1).expect("selection");
    assert_eq!(fx.lr.on_take_damage(P1, G1), HookResult::Handled);
    assert_eq!(fx.lr.on_take_damage(P2, G2), HookResult::Handled);

    fx.tick(2);
    assert_eq!(fx.phase(), Some(SessionPhase::Active));
    assert_eq!(fx.lr.on_take_damage(P1, G1), HookResult::Continue);
    assert_eq!(fx.lr.on_take_damage(G1, P1), HookResult::Continue);
    assert_eq!(fx.lr.on_take_damage(P2, G1), HookResult::Handled);
    assert_eq!(fx.lr.on_take_damage(G1, P2), HookResult::Handled);
    assert_eq!(fx.lr.on_take_damage(P2, G2), HookResult::Handled);
}

#[test]
fn participant_death_ends_in_favour_of_opponent() {
    let mut fx = Fixture::new(2);
    fx.select(G1, P1).expect("selection");
    fx.tick(2);

    assert!(!fx.lr.on_player_death(P2, &mut fx.host));
    assert!(fx.lr.is_active());

    assert!(fx.lr.on_player_death(P1, &mut fx.host));
    assert!(!fx.lr.is_active());
    assert_eq!(fx.knife.ends(), vec![(Some(G1), Some(P1))]);
}

#[test]
fn guardian_death_during_prep_releases_everything() {
    let mut fx = Fixture::new(5);
    fx.select(G1, P1).expect("selection");
    fx.tick(2);

    assert!(fx.lr.on_player_death(G1, &mut fx.host));
    assert_eq!(fx.knife.ends(), vec![(Some(P1), Some(G1))]);
    assert_eq!(fx.knife.starts(), 0);
    assert_eq!(fx.mem.clock.pending(), 0);
    assert_eq!(fx.mem.effects.active_links(), 0);
    assert_eq!(fx.mem.effects.active_beacons(), 0);
}

#[test]
fn participant_leaving_mid_prep_is_treated_as_death() {
    let mut fx = Fixture::new(5);
    fx.select(G1, P1).expect("selection");
    fx.tick(1);

    fx.mem.roster.leave(P1);
    fx.tick(1);

    assert!(!fx.lr.is_active());
    assert_eq!(fx.knife.ends(), vec![(Some(G1), Some(P1))]);
    assert_eq!(fx.knife.starts(), 0);
    assert_eq!(fx.mem.clock.pending(), 0);
}

#[test]
fn stale_tick_does_not_touch_newer_session() {
    let mut fx = Fixture::new(5);
    let old = fx.select(G1, P1).expect("first selection");
    assert!(fx.lr.end_request(None, None, &mut fx.host));

    let current = fx.select(G2, P2).expect("second selection");
    assert_ne!(old, current);

    fx.lr.on_prep_tick(old, &mut fx.roles, &mut fx.host);
    let active = fx.lr.active().expect("second session bound");
    assert_eq!(active.id(), current);
    assert_eq!(active.remaining(), 5);
    assert_eq!(active.phase(), SessionPhase::Selected);
}

#[test]
fn end_without_session_is_noop() {
    let mut fx = Fixture::new(5);
    assert!(!fx.lr.end_request(Some(P1), None, &mut fx.host));
    assert!(fx.knife.ends().is_empty());
}

#[test]
fn cancelled_session_reports_no_result() {
    let mut fx = Fixture::new(5);
    fx.select(G1, P1).expect("selection");
    assert!(fx.lr.end_request(None, None, &mut fx.host));
    assert_eq!(fx.knife.ends(), vec![(None, None)]);
    assert_eq!(fx.mem.clock.cancelled().len(), 1);
}

#[test]
fn beacons_follow_config() {
    let mut fx = Fixture::with_config(LastRequestConfig {
        beacons: false,
        ..LastRequestConfig::default()
    });
    fx.select(G1, P1).expect("selection");
    assert_eq!(fx.mem.effects.beacons_started(), 0);
}

#[test]
fn registry_keeps_order_and_finds_by_name() {
    let mut fx = Fixture::new(5);
    let dup = fx.lr.register(Arc::new(ScriptedRequest::new("Knife Fight")));
    let shot = fx.lr.register(Arc::new(ScriptedRequest::new("Shot for Shot")));

    assert_eq!(fx.lr.requests().len(), 3);
    assert_eq!(dup, RequestId(1));
    assert_eq!(fx.lr.find("knife fight"), Some(fx.knife_id));
    assert_eq!(fx.lr.find("SHOT FOR SHOT"), Some(shot));
    assert_eq!(fx.lr.find("Rebel"), None);
    assert_eq!(
        fx.lr.request(shot).map(|r| r.name().to_string()),
        Some("Shot for Shot".to_string())
    );
}
