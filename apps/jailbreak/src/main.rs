use std::sync::Arc;
use std::time::Duration;

use jailbreak::config::JailbreakConfig;
use jailbreak::demo::{FreeForAllDay, KnifeFight};
use jailbreak::host::memory::MemoryHost;
use jailbreak::{CoreError, JailbreakCore};
use jailbreak_api::{DamageEvent, PlayerId, PlayerInfo, RequestSelection, Team};
use tracing::{error, info};

mod telemetry;

/// Fixes the warden draw for reproducible runs.
const SEED_ENV: &str = "JAILBREAK_SEED";

const PRISONERS: [PlayerId; 3] = [1, 2, 3];
const GUARDS: [PlayerId; 2] = [100, 101];

fn main() {
    telemetry::init_tracing();

    if let Err(e) = run() {
        error!(error = %e, "Headless round failed");
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CoreError> {
    let config = JailbreakConfig::from_env()?;
    let seed = seed_from_env()?;

    let mem = MemoryHost::new(roster());
    let mut core = JailbreakCore::new(config.clone(), mem.host(), seed);

    let knife = Arc::new(KnifeFight::new());
    let knife_id = core.register_last_request(knife.clone());
    let day = Arc::new(FreeForAllDay::new());
    core.register_special_day(day.clone());

    // Round 1: warden, cells, a last request.
    core.on_round_start();
    core.select_special_day(PRISONERS[0], FreeForAllDay::NAME)?;

    match config.warden.auto_assign_after_seconds {
        Some(secs) => mem.clock.run(&mut core, Duration::from_secs(u64::from(secs))),
        None => {
            core.assign_random_warden();
        }
    }
    let warden = core.roles().warden();
    info!(?warden, "Warden in charge");

    core.toggle_cells(true, Some("warden"));
    core.toggle_box(true, Some("warden"));
    report_hit(&core, GUARDS[0], GUARDS[1]);
    report_hit(&core, PRISONERS[0], PRISONERS[1]);
    core.toggle_box(false, Some("warden"));

    let last_prisoner = PRISONERS[PRISONERS.len() - 1];
    for &prisoner in &PRISONERS[..PRISONERS.len() - 1] {
        mem.roster.kill(prisoner);
        core.on_player_death(prisoner);
    }

    let guardian = warden.unwrap_or(GUARDS[0]);
    core.select_last_request(
        knife_id,
        guardian,
        last_prisoner,
        RequestSelection::new("Knife", "weapon_knife").with_kind("Normal"),
    )?;
    report_hit(&core, last_prisoner, guardian);

    let prep = config.last_request.prep_seconds;
    mem.clock.run(&mut core, Duration::from_secs(u64::from(prep)));
    info!(duel = ?knife.current(), "Duel running");
    report_hit(&core, last_prisoner, guardian);

    mem.roster.kill(guardian);
    core.on_player_death(guardian);
    core.on_round_end();

    // Round 2: the queued day runs.
    mem.roster.revive_all();
    core.on_round_start();
    info!(
        day_running = day.is_running(),
        cooldown = core.special_days().cooldown(),
        "Second round started"
    );
    core.on_round_end();
    core.shutdown();

    info!(
        rounds = core.round(),
        duels = knife.finished(),
        messages = mem.notifier.messages().len(),
        role_changes = mem.notifier.role_changes().len(),
        pending_timers = mem.clock.pending(),
        "Headless round finished"
    );
    Ok(())
}

fn roster() -> Vec<PlayerInfo> {
    let prisoners = PRISONERS
        .iter()
        .map(|&id| PlayerInfo::new(id, format!("prisoner-{id}"), Team::Prisoners));
    let guards = GUARDS
        .iter()
        .map(|&id| PlayerInfo::new(id, format!("guard-{id}"), Team::Guards));
    prisoners.chain(guards).collect()
}

fn seed_from_env() -> Result<Option<u64>, CoreError> {
    match std::env::var(SEED_ENV) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| CoreError::config(format!("{SEED_ENV} must be a whole number: {e}"))),
        _ => Ok(None),
    }
}

fn report_hit(core: &JailbreakCore, attacker: PlayerId, victim: PlayerId) {
    let mut event = DamageEvent::new(attacker, victim, 25.0);
    let verdict = core.on_take_damage(&mut event);
    info!(attacker, victim, ?verdict, damage = event.damage, "Damage arbitrated");
}
