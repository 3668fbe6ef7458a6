use std::sync::Arc;

use jailbreak_api::{keys, Hud, PlayerId, Prefix, SpecialDay};
use jailbreak_test_support::behaviours::{DayCall, ScriptedDay};
use jailbreak_test_support::players::roster;
use proptest::prelude::*;

use crate::config::SpecialDayConfig;
use crate::domain::test_prelude;
use crate::errors::domain::{DomainError, RejectionKind};
use crate::host::memory::MemoryHost;
use crate::host::{Audience, Host, MessageBody};
use crate::services::special_day::SpecialDayOrchestrator;

const P1: PlayerId = 1;

fn setup(cooldown_in_rounds: u32) -> (MemoryHost, Host, SpecialDayOrchestrator) {
    let mem = MemoryHost::new(roster(2, 1));
    let host = mem.host();
    let sd = SpecialDayOrchestrator::new(SpecialDayConfig { cooldown_in_rounds });
    (mem, host, sd)
}

fn register(sd: &mut SpecialDayOrchestrator, name: &str) -> (Arc<ScriptedDay>, Arc<dyn SpecialDay>) {
    let day = Arc::new(ScriptedDay::new(name));
    let erased: Arc<dyn SpecialDay> = day.clone();
    sd.register(erased.clone());
    (day, erased)
}

fn rejection(err: DomainError) -> RejectionKind {
    match err {
        DomainError::Rejected(kind, _) => kind,
        other => panic!("expected rejection, got {other}"),
    }
}

#[test]
fn elevator_scenario_promotes_pending_on_round_start() {
    let (mem, mut host, mut sd) = setup(3);
    let (elevator, _) = register(&mut sd, "Elevator");
    assert_eq!(sd.cooldown(), 0);

    sd.select(P1, "Elevator", &mut host).expect("selection");
    assert_eq!(sd.pending().map(|d| d.name()), Some("Elevator"));
    assert!(sd.active().is_none());

    let pending = mem.notifier.with_key(keys::SPECIAL_DAY_PENDING);
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].audience, Audience::All);
    assert_eq!(pending[0].message.args, vec!["prisoner-1", "Elevator"]);

    sd.on_round_start(&mut host);
    assert_eq!(sd.active().map(|d| d.name()), Some("Elevator"));
    assert!(sd.pending().is_none());
    assert_eq!(sd.cooldown(), 3);
    assert_eq!(elevator.calls(), vec![DayCall::Start]);

    let description = mem
        .notifier
        .messages()
        .into_iter()
        .find(|m| m.message.body == MessageBody::Raw("Elevator is on".into()))
        .expect("description broadcast");
    assert_eq!(description.audience, Audience::All);
    assert_eq!(description.message.prefix, Some(Prefix::SD));
}

#[test]
fn selection_is_case_insensitive_and_replaces_pending() {
    let (_mem, mut host, mut sd) = setup(3);
    register(&mut sd, "Elevator");
    register(&mut sd, "Hide and Seek");

    sd.select(P1, "elevator", &mut host).expect("first pick");
    sd.select(P1, "HIDE AND SEEK", &mut host).expect("second pick");
    assert_eq!(sd.pending().map(|d| d.name()), Some("Hide and Seek"));
}

#[test]
fn unknown_name_keeps_existing_pending() {
    let (mem, mut host, mut sd) = setup(3);
    register(&mut sd, "Elevator");
    sd.select(P1, "Elevator", &mut host).expect("pick");

    let err = sd.select(P1, "Zombie", &mut host).expect_err("unknown day");
    assert_eq!(rejection(err), RejectionKind::UnknownDay);
    assert_eq!(sd.pending().map(|d| d.name()), Some("Elevator"));

    let notices = mem.notifier.with_key(keys::SPECIAL_DAY_NOT_FOUND);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].audience, Audience::Player(P1));
    assert_eq!(notices[0].hud, Hud::Chat);
    assert_eq!(notices[0].message.args, vec!["Zombie"]);
}

#[test]
fn cooldown_blocks_selection_until_it_runs_out() {
    let (mem, mut host, mut sd) = setup(2);
    register(&mut sd, "Elevator");
    sd.select(P1, "Elevator", &mut host).expect("pick");
    sd.on_round_start(&mut host);
    sd.on_round_end();
    assert_eq!(sd.cooldown(), 2);

    let err = sd.select(P1, "Elevator", &mut host).expect_err("cooling down");
    assert_eq!(rejection(err), RejectionKind::DayOnCooldown { rounds_left: 2 });
    let notice = mem.notifier.with_key(keys::DAY_ON_COOLDOWN);
    assert_eq!(notice[0].message.args, vec!["2"]);

    sd.on_round_start(&mut host);
    assert_eq!(sd.cooldown(), 1);
    sd.on_round_start(&mut host);
    assert_eq!(sd.cooldown(), 0);
    sd.on_round_start(&mut host);
    assert_eq!(sd.cooldown(), 0, "cooldown never goes below zero");

    sd.select(P1, "Elevator", &mut host).expect("cooldown over");
}

#[test]
fn active_day_blocks_new_selection() {
    let (mem, mut host, mut sd) = setup(0);
    register(&mut sd, "Elevator");
    sd.select(P1, "Elevator", &mut host).expect("pick");
    sd.on_round_start(&mut host);

    let err = sd.select(P1, "Elevator", &mut host).expect_err("day running");
    assert_eq!(rejection(err), RejectionKind::DayActive);
    assert!(sd.pending().is_none());
    assert_eq!(
        mem.notifier.with_key(keys::SPECIAL_DAY_ALREADY_ACTIVE).len(),
        1
    );
}

#[test]
fn round_end_and_end_day_share_one_path() {
    let (_mem, mut host, mut sd) = setup(0);
    let (day, _) = register(&mut sd, "Elevator");

    sd.on_round_end();
    sd.end_day();
    assert!(day.calls().is_empty(), "no active day, nothing to end");

    sd.select(P1, "Elevator", &mut host).expect("pick");
    sd.on_round_start(&mut host);
    sd.end_day();
    sd.on_round_end();
    assert_eq!(day.calls(), vec![DayCall::Start, DayCall::End]);
    assert!(sd.active().is_none());
}

#[test]
fn unregistering_pending_day_clears_it() {
    let (_mem, mut host, mut sd) = setup(0);
    let (_, elevator) = register(&mut sd, "Elevator");
    sd.select(P1, "Elevator", &mut host).expect("pick");

    assert!(sd.unregister(&elevator));
    assert!(sd.pending().is_none());
    assert!(sd.days().is_empty());
    assert!(!sd.unregister(&elevator));
}

#[test]
fn unregistering_active_day_lets_it_finish() {
    let (_mem, mut host, mut sd) = setup(0);
    let (day, erased) = register(&mut sd, "Elevator");
    sd.select(P1, "Elevator", &mut host).expect("pick");
    sd.on_round_start(&mut host);

    assert!(sd.unregister(&erased));
    assert!(sd.active().is_some());
    sd.on_round_end();
    assert_eq!(day.ends(), 1);
}

#[test]
fn unregister_by_name_removes_duplicates() {
    let (_mem, _host, mut sd) = setup(0);
    register(&mut sd, "Elevator");
    register(&mut sd, "elevator");
    register(&mut sd, "Freeze");

    assert_eq!(sd.unregister_by_name("ELEVATOR"), 2);
    assert_eq!(sd.days().len(), 1);
    assert!(sd.find("freeze").is_some());
}

#[derive(Debug, Clone)]
enum Op {
    Select(usize),
    RoundStart,
    RoundEnd,
    EndDay,
    Unregister(usize),
}

const NAMES: [&str; 3] = ["Elevator", "Freeze", "Nope"];

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..NAMES.len()).prop_map(Op::Select),
        Just(Op::RoundStart),
        Just(Op::RoundEnd),
        Just(Op::EndDay),
        (0..2usize).prop_map(Op::Unregister),
    ]
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_pending_and_active_never_both_set(
        cooldown in 0u32..3,
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let (_mem, mut host, mut sd) = setup(cooldown);
        let registered: Vec<Arc<dyn SpecialDay>> =
            NAMES[..2].iter().map(|n| register(&mut sd, n).1).collect();

        for op in &ops {
            match op {
                Op::Select(i) => {
                    let _ = sd.select(P1, NAMES[*i], &mut host);
                }
                Op::RoundStart => sd.on_round_start(&mut host),
                Op::RoundEnd => sd.on_round_end(),
                Op::EndDay => sd.end_day(),
                Op::Unregister(i) => {
                    sd.unregister(&registered[*i]);
                }
            }
            prop_assert!(!(sd.pending().is_some() && sd.active().is_some()));
            prop_assert!(sd.cooldown() <= cooldown);
        }
    }
}
