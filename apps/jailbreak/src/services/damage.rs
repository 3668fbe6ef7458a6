//! Damage arbitration.
//!
//! Every damage event from the host runs through an ordered chain. The first
//! filter that answers [`HookResult::Handled`] wins; the damage is zeroed and
//! nothing after it is consulted.
//!
//! Chain order:
//! 1. box mode: with the box on, only the prisoner side may hurt teammates
//! 2. last request: see [`LastRequestOrchestrator::on_take_damage`]
//! 3. third-party hooks, in registration order

use jailbreak_api::{DamageEvent, HookResult, Team};
use tracing::debug;

use crate::domain::roles::RoleRegistry;
use crate::host::Roster;
use crate::services::last_request::LastRequestOrchestrator;

/// Side allowed to damage its own members while box mode is on.
pub const BOX_AGGRESSOR: Team = Team::Prisoners;

/// External damage filter.
pub trait DamageHook: Send + Sync {
    fn on_take_damage(&self, event: &DamageEvent) -> HookResult;
}

impl<F> DamageHook for F
where
    F: Fn(&DamageEvent) -> HookResult + Send + Sync,
{
    fn on_take_damage(&self, event: &DamageEvent) -> HookResult {
        self(event)
    }
}

/// Registration token for [`DamageArbiter::hook`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin {
    BoxMode,
    LastRequest,
}

const BUILTINS: [Builtin; 2] = [Builtin::BoxMode, Builtin::LastRequest];

/// State the built-in filters read.
pub struct DamageContext<'a> {
    pub roles: &'a RoleRegistry,
    pub last_request: &'a LastRequestOrchestrator,
    pub roster: &'a dyn Roster,
}

#[derive(Default)]
pub struct DamageArbiter {
    hooks: Vec<(HookId, Box<dyn DamageHook>)>,
    last_hook: u64,
}

impl DamageArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hook(&mut self, hook: impl DamageHook + 'static) -> HookId {
        self.last_hook += 1;
        let id = HookId(self.last_hook);
        self.hooks.push((id, Box::new(hook)));
        id
    }

    /// Returns whether the hook was registered.
    pub fn unhook(&mut self, id: HookId) -> bool {
        let before = self.hooks.len();
        self.hooks.retain(|(h, _)| *h != id);
        self.hooks.len() != before
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    pub fn arbitrate(&self, event: &mut DamageEvent, ctx: &DamageContext<'_>) -> HookResult {
        let builtin = BUILTINS
            .iter()
            .find(|b| Self::run_builtin(**b, event, ctx) == HookResult::Handled);

        let handled = match builtin {
            Some(filter) => {
                debug!(
                    attacker = event.attacker,
                    victim = event.victim,
                    filter = ?filter,
                    "Damage suppressed"
                );
                true
            }
            None => self.hooks.iter().any(|(id, hook)| {
                let verdict = hook.on_take_damage(event);
                if verdict == HookResult::Handled {
                    debug!(
                        attacker = event.attacker,
                        victim = event.victim,
                        hook = ?id,
                        "Damage suppressed by hook"
                    );
                }
                verdict == HookResult::Handled
            }),
        };

        if handled {
            event.damage = 0.0;
            HookResult::Handled
        } else {
            HookResult::Continue
        }
    }

    fn run_builtin(filter: Builtin, event: &DamageEvent, ctx: &DamageContext<'_>) -> HookResult {
        match filter {
            Builtin::BoxMode => box_mode(event, ctx),
            Builtin::LastRequest => ctx
                .last_request
                .on_take_damage(event.attacker, event.victim),
        }
    }
}

fn box_mode(event: &DamageEvent, ctx: &DamageContext<'_>) -> HookResult {
    if !ctx.roles.box_active() {
        return HookResult::Continue;
    }
    let (Some(attacker), Some(victim)) = (
        ctx.roster.team_of(event.attacker),
        ctx.roster.team_of(event.victim),
    ) else {
        return HookResult::Continue;
    };

    if attacker == victim && attacker != BOX_AGGRESSOR {
        HookResult::Handled
    } else {
        HookResult::Continue
    }
}
