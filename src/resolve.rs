//! Effect math shared by every technique
//!
//! Damage scaling stops at the nominal level cap even when trigger-chance
//! scaling is uncapped: proficiency past 20 makes techniques more frequent,
//! not harder-hitting. Counters are also forbidden from finishing off a
//! nearly-dead target themselves.

use crate::core::config::GlobalConfig;
use crate::core::types::Tick;
use crate::events::{StatusEffect, StatusKind};
use crate::proficiency::damage_scaling_level;

/// Damage added per effective level, before the actor's damage factor
const DAMAGE_LEVEL_COEFF: f32 = 0.5;

/// Health fraction below which a target counts as nearly dead
const NEAR_DEATH_FRACTION: f32 = 0.1;

/// Share of remaining health a technique may take from a near-death target
const SURVIVABLE_SHARE: f32 = 0.8;

/// Scale a technique's damage with proficiency, bounded by its cap
pub fn scaled_damage(level: u32, base: f32, cap: f32, damage_factor: f32) -> f32 {
    let effective = damage_scaling_level(level) as f32;
    (base + effective * DAMAGE_LEVEL_COEFF * damage_factor).min(cap)
}

/// Clamp damage so a technique never finishes a nearly-dead target
///
/// Targets above the near-death fraction take the damage unchanged.
pub fn prevent_instant_kill(health_fraction: f32, max_health: f32, damage: f32) -> f32 {
    if health_fraction <= NEAR_DEATH_FRACTION {
        let survivable = health_fraction * max_health * SURVIVABLE_SHARE;
        damage.min(survivable)
    } else {
        damage
    }
}

/// Build a status instance with configured duration scaling applied
pub fn make_status(
    kind: StatusKind,
    severity: f32,
    base_duration: Tick,
    config: &GlobalConfig,
) -> StatusEffect {
    let duration = (base_duration as f32 * config.debuff_duration_multiplier).round() as Tick;
    StatusEffect {
        kind,
        severity,
        duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_scaled_damage_grows_to_level_20_only() {
        let at_10 = scaled_damage(10, 20.0, 100.0, 1.0);
        let at_20 = scaled_damage(20, 20.0, 100.0, 1.0);
        let at_50 = scaled_damage(50, 20.0, 100.0, 1.0);

        assert!(at_20 > at_10);
        assert_eq!(at_20, at_50);
    }

    #[test]
    fn test_scaled_damage_respects_cap() {
        assert_eq!(scaled_damage(20, 40.0, 45.0, 2.0), 45.0);
    }

    #[test]
    fn test_damage_factor_scales_level_bonus() {
        let weak = scaled_damage(20, 20.0, 100.0, 0.5);
        let strong = scaled_damage(20, 20.0, 100.0, 2.0);
        assert!(strong > weak);
        // Base is unaffected by the factor
        assert_eq!(scaled_damage(0, 20.0, 100.0, 2.0), 20.0);
    }

    #[test]
    fn test_prevent_instant_kill_near_death() {
        // 8% health of 100 max: at most 0.08 * 100 * 0.8 = 6.4 damage
        let clamped = prevent_instant_kill(0.08, 100.0, 30.0);
        assert!((clamped - 6.4).abs() < 1e-5);
    }

    #[test]
    fn test_prevent_instant_kill_healthy_target_unchanged() {
        assert_eq!(prevent_instant_kill(0.5, 100.0, 30.0), 30.0);
        assert_eq!(prevent_instant_kill(0.11, 100.0, 30.0), 30.0);
    }

    #[test]
    fn test_small_damage_untouched_even_near_death() {
        assert_eq!(prevent_instant_kill(0.09, 100.0, 2.0), 2.0);
    }

    #[test]
    fn test_status_duration_multiplier() {
        let cfg = GlobalConfig {
            debuff_duration_multiplier: 1.5,
            ..GlobalConfig::default()
        };
        let status = make_status(StatusKind::Stunned, 0.8, 90, &cfg);
        assert_eq!(status.duration, 135);
        assert_eq!(status.kind, StatusKind::Stunned);
    }

    proptest! {
        #[test]
        fn prop_scaled_damage_never_exceeds_cap(
            level in 0u32..2000,
            base in 0.0f32..100.0,
            cap in 0.0f32..100.0,
            factor in 0.0f32..5.0,
        ) {
            prop_assert!(scaled_damage(level, base, cap, factor) <= cap);
        }

        #[test]
        fn prop_near_death_damage_survivable(
            fraction in 0.0f32..=0.1,
            max_health in 1.0f32..500.0,
            damage in 0.0f32..1000.0,
        ) {
            let clamped = prevent_instant_kill(fraction, max_health, damage);
            prop_assert!(clamped <= fraction * max_health * 0.8 + 1e-4);
            prop_assert!(clamped <= damage);
        }
    }
}
