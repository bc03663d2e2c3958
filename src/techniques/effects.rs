//! Per-technique effect routines
//!
//! Each routine computes its damage through the shared effect math, applies
//! side effects through the host, and reports whether the original event's
//! outcome should be suppressed. Secondary statuses are best-effort: a
//! status the host cannot apply is skipped without disturbing the primary
//! outcome.

use crate::chance;
use crate::core::config::GlobalConfig;
use crate::core::error::{EngineError, Result};
use crate::core::types::ActorId;
use crate::events::{DamageDescriptor, DamageKind, PartSelection, StatusKind};
use crate::host::{ChanceSource, CombatHost, Presenter};
use crate::resolve::{make_status, prevent_instant_kill, scaled_damage};

/// Everything an effect routine may touch while executing
pub struct EffectContext<'a> {
    pub host: &'a mut dyn CombatHost,
    pub rolls: &'a mut dyn ChanceSource,
    pub presenter: &'a mut dyn Presenter,
    pub config: &'a GlobalConfig,
    /// The actor performing the technique
    pub user: ActorId,
    /// The actor a counter lands on, when the event has one
    pub target: Option<ActorId>,
    /// The user's proficiency level
    pub level: u32,
    /// The original hit, rewritable in place
    pub damage: Option<&'a mut DamageDescriptor>,
}

/// What the dispatcher does with the original event after an effect ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectOutcome {
    pub suppress_original: bool,
}

impl EffectOutcome {
    pub fn suppress() -> Self {
        Self {
            suppress_original: true,
        }
    }

    pub fn pass() -> Self {
        Self {
            suppress_original: false,
        }
    }
}

pub type EffectFn = fn(&mut EffectContext<'_>) -> Result<EffectOutcome>;

impl EffectContext<'_> {
    fn announce(&mut self, name: &str) {
        if self.config.show_technique_text {
            self.presenter.technique_used(self.user, name);
        }
    }

    fn cue_at(&mut self, actor: ActorId) {
        if let Some(cell) = self.host.position(actor) {
            self.presenter.impact_cue(cell);
        }
    }

    /// Clamp `raw` against the target's remaining health and apply it
    fn land_counter(&mut self, target: ActorId, kind: DamageKind, raw: f32) -> Result<()> {
        let clamped = prevent_instant_kill(
            self.host.health_fraction(target),
            self.host.max_health(target),
            raw,
        );
        let descriptor = DamageDescriptor::new(kind, clamped, Some(self.user));
        self.host.apply_damage(target, &descriptor)
    }

    /// Apply a status, skipping it if the host lacks the definition
    fn try_status(&mut self, target: ActorId, kind: StatusKind, severity: f32, duration: u64) {
        let status = make_status(kind, severity, duration, self.config);
        match self.host.apply_status(target, status) {
            Ok(()) => {}
            Err(EngineError::MissingDefinition(def)) => {
                tracing::debug!(?kind, %def, "status definition missing, skipping");
            }
            Err(e) => {
                tracing::warn!(?kind, error = %e, "status application failed, skipping");
            }
        }
    }

    /// Roll the skill-scaled secondary status draw
    fn status_roll(&mut self, base: f32) -> bool {
        let p = chance::status_chance(self.level, base);
        self.rolls.chance(p)
    }
}

/// Unarmed counter: heavy blunt throw plus a stun
pub fn counter_throw(ctx: &mut EffectContext<'_>) -> Result<EffectOutcome> {
    let Some(target) = ctx.target else {
        return Ok(EffectOutcome::pass());
    };
    ctx.announce("Counter Throw");

    let factor = ctx.host.damage_factor(ctx.user);
    let raw = scaled_damage(ctx.level, 20.0 * factor, 45.0, factor);
    ctx.land_counter(target, DamageKind::Blunt, raw)?;
    ctx.try_status(target, StatusKind::Stunned, 0.8, 90);

    ctx.cue_at(target);
    Ok(EffectOutcome::suppress())
}

/// Blade counter: deflect the hit and slash back
pub fn deflecting_parry(ctx: &mut EffectContext<'_>) -> Result<EffectOutcome> {
    let Some(target) = ctx.target else {
        return Ok(EffectOutcome::pass());
    };
    ctx.announce("Deflecting Parry");

    let factor = ctx.host.damage_factor(ctx.user);
    let base = ctx.rolls.sample_range(20.0, 30.0);
    let raw = scaled_damage(ctx.level, base, 40.0, factor);
    ctx.land_counter(target, DamageKind::Cut, raw)?;

    ctx.cue_at(target);
    Ok(EffectOutcome::suppress())
}

/// Short-blade counter: step aside and open a bleeding wound
pub fn sidestep_slash(ctx: &mut EffectContext<'_>) -> Result<EffectOutcome> {
    let Some(target) = ctx.target else {
        return Ok(EffectOutcome::pass());
    };
    ctx.announce("Sidestep Slash");

    let factor = ctx.host.damage_factor(ctx.user);
    let base = ctx.rolls.sample_range(15.0, 25.0);
    let raw = scaled_damage(ctx.level, base, 35.0, factor);
    ctx.land_counter(target, DamageKind::Cut, raw)?;

    if ctx.status_roll(0.2) {
        ctx.try_status(target, StatusKind::Bleeding, 0.2, 600);
    }

    ctx.cue_at(target);
    Ok(EffectOutcome::suppress())
}

/// Blunt counter: crushing blow that staggers
pub fn crushing_counter(ctx: &mut EffectContext<'_>) -> Result<EffectOutcome> {
    let Some(target) = ctx.target else {
        return Ok(EffectOutcome::pass());
    };
    ctx.announce("Crushing Counter");

    let factor = ctx.host.damage_factor(ctx.user);
    let base = ctx.rolls.sample_range(18.0, 28.0);
    let raw = scaled_damage(ctx.level, base, 38.0, factor);
    ctx.land_counter(target, DamageKind::Blunt, raw)?;
    ctx.try_status(target, StatusKind::Staggered, 0.6, 180);

    ctx.cue_at(target);
    Ok(EffectOutcome::suppress())
}

/// Spin attack hitting every adjacent hostile; the original hit still lands
pub fn whirlwind_sweep(ctx: &mut EffectContext<'_>) -> Result<EffectOutcome> {
    ctx.announce("Whirlwind Sweep");

    let Some(position) = ctx.host.position(ctx.user) else {
        return Ok(EffectOutcome::pass());
    };

    let mut victims = Vec::new();
    for cell in position.adjacent8() {
        for other in ctx.host.actors_at(cell) {
            if ctx.host.is_hostile(ctx.user, other) && ctx.host.is_alive(other) {
                victims.push(other);
            }
        }
    }

    let factor = ctx.host.damage_factor(ctx.user);
    for victim in victims {
        let base = ctx.rolls.sample_range(10.0, 15.0);
        let raw = scaled_damage(ctx.level, base, 20.0, factor);
        // One unreachable victim shouldn't cancel the rest of the sweep
        if let Err(e) = ctx.land_counter(victim, DamageKind::Blunt, raw) {
            tracing::warn!(error = %e, "sweep target unreachable, continuing");
            continue;
        }
        ctx.cue_at(victim);
    }

    Ok(EffectOutcome::pass())
}

/// Roll with the impact and refuse the knockdown
pub fn breakfall(ctx: &mut EffectContext<'_>) -> Result<EffectOutcome> {
    ctx.announce("Breakfall");

    // Host orderings differ on whether the downed state is set before the
    // interception point fires; clear it if it already stuck.
    if ctx.host.is_downed(ctx.user) {
        ctx.host.clear_downed(ctx.user)?;
    }

    ctx.cue_at(ctx.user);
    Ok(EffectOutcome::suppress())
}

/// Twist out of the projectile's path entirely
pub fn reflex_dodge(ctx: &mut EffectContext<'_>) -> Result<EffectOutcome> {
    ctx.announce("Reflex Dodge");
    ctx.cue_at(ctx.user);
    Ok(EffectOutcome::suppress())
}

/// Rewrite the landed hit into a harder blunt slam against the wall
pub fn wall_slam(ctx: &mut EffectContext<'_>) -> Result<EffectOutcome> {
    let Some(target) = ctx.target else {
        return Ok(EffectOutcome::pass());
    };
    ctx.announce("Wall Slam");

    let fraction = ctx.host.health_fraction(target);
    let max_health = ctx.host.max_health(target);
    let user = ctx.user;

    if let Some(original) = ctx.damage.as_deref_mut() {
        let boosted = (original.amount * 1.5).min(50.0);
        original.kind = DamageKind::Blunt;
        original.amount = prevent_instant_kill(fraction, max_health, boosted);
        original.source = Some(user);
        original.part_selection = PartSelection::Original;
    }

    ctx.try_status(target, StatusKind::Stunned, 0.8, 120);
    ctx.cue_at(target);

    // The host applies the rewritten hit through its normal pathway
    Ok(EffectOutcome::pass())
}

/// Fast short-blade lunge on top of the incoming hit
pub fn lunging_strike(ctx: &mut EffectContext<'_>) -> Result<EffectOutcome> {
    let Some(target) = ctx.target else {
        return Ok(EffectOutcome::pass());
    };
    ctx.announce("Lunging Strike");

    let factor = ctx.host.damage_factor(ctx.user);
    let base = ctx.rolls.sample_range(12.0, 20.0);
    let raw = scaled_damage(ctx.level, base, 30.0, factor);
    ctx.land_counter(target, DamageKind::Cut, raw)?;

    if ctx.status_roll(0.15) {
        ctx.try_status(target, StatusKind::Bleeding, 0.15, 600);
    }

    ctx.cue_at(target);
    Ok(EffectOutcome::pass())
}

/// Point-blank counter shot; the original melee hit still lands
pub fn point_blank_shot(ctx: &mut EffectContext<'_>) -> Result<EffectOutcome> {
    let Some(target) = ctx.target else {
        return Ok(EffectOutcome::pass());
    };
    ctx.announce("Point-Blank Shot");

    let factor = ctx.host.damage_factor(ctx.user);
    let base = ctx.rolls.sample_range(8.0, 15.0);
    let raw = scaled_damage(ctx.level, base, 25.0, factor);
    ctx.land_counter(target, DamageKind::Gunshot, raw)?;

    ctx.cue_at(target);
    Ok(EffectOutcome::pass())
}
