//! Trigger probability model
//!
//! Linear growth up to the nominal level cap rewards conventional
//! progression; sub-linear growth past it keeps extreme proficiency from
//! running away; the hard ceiling bounds worst-case trigger frequency no
//! matter how the configuration is tuned.

use crate::core::config::GlobalConfig;
use crate::proficiency::NOMINAL_LEVEL_CAP;

/// No trigger chance ever exceeds this, regardless of configuration
pub const HARD_CAP: f32 = 0.5;

/// Ceiling for the secondary status-effect draw
pub const STATUS_CHANCE_CAP: f32 = 0.8;

/// Per-level slope of the secondary status-effect draw
const STATUS_LEVEL_SLOPE: f32 = 0.01;

/// Beyond the nominal cap, the per-level slope is at most this fraction
/// of the technique's own below-cap slope
const UNCAPPED_SLOPE_FRACTION: f32 = 0.5;

/// Final trigger probability for one technique attempt
///
/// `base` is the technique's base chance, `scaling` its per-level
/// coefficient. Beyond the nominal cap the slope drops to the configured
/// decay coefficient, further clamped below the technique's own slope so
/// growth always slows past the cap (or flattens entirely when uncapped
/// scaling is off).
pub fn trigger_chance(level: u32, base: f32, scaling: f32, config: &GlobalConfig) -> f32 {
    let influence = config.skill_influence;
    let capped = level.min(NOMINAL_LEVEL_CAP) as f32;

    let mut p = base + capped * scaling * influence;

    if level > NOMINAL_LEVEL_CAP && config.uncapped_scaling {
        let beyond = (level - NOMINAL_LEVEL_CAP) as f32;
        let slope = config.uncapped_decay.min(scaling * UNCAPPED_SLOPE_FRACTION);
        p += beyond * slope * influence;
    }

    p *= config.chance_multiplier;
    p.min(HARD_CAP).clamp(0.0, 1.0)
}

/// Probability of the independent secondary-status draw
pub fn status_chance(level: u32, base: f32) -> f32 {
    let capped = level.min(NOMINAL_LEVEL_CAP) as f32;
    (base + capped * STATUS_LEVEL_SLOPE).min(STATUS_CHANCE_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config() -> GlobalConfig {
        GlobalConfig::default()
    }

    #[test]
    fn test_linear_below_nominal_cap() {
        let cfg = config();
        for level in 0..=NOMINAL_LEVEL_CAP {
            let p = trigger_chance(level, 0.05, 0.01, &cfg);
            let expected = (0.05 + level as f32 * 0.01).min(HARD_CAP);
            assert!((p - expected).abs() < 1e-6, "level {level}: {p} vs {expected}");
        }
    }

    #[test]
    fn test_non_decreasing_in_level() {
        let cfg = config();
        let mut last = 0.0;
        for level in 0..=60 {
            let p = trigger_chance(level, 0.03, 0.005, &cfg);
            assert!(p >= last);
            last = p;
        }
    }

    #[test]
    fn test_marginal_gain_shrinks_past_cap_for_every_catalog_entry() {
        let cfg = config();
        for tech in crate::techniques::catalog() {
            let base = tech.base_chance.unwrap_or(cfg.base_chance);
            let s = tech.skill_scaling;
            let below = trigger_chance(20, base, s, &cfg) - trigger_chance(19, base, s, &cfg);
            let beyond = trigger_chance(22, base, s, &cfg) - trigger_chance(21, base, s, &cfg);
            assert!(
                beyond < below,
                "{}: beyond-cap gain {beyond} not below per-level gain {below}",
                tech.name
            );
            assert!(beyond > 0.0, "{}: growth stalled past the cap", tech.name);
        }
    }

    #[test]
    fn test_shallow_scaling_still_slows_past_cap() {
        // A technique whose per-level slope is below the configured decay
        // must not speed up past the cap.
        let cfg = config();
        assert!(cfg.uncapped_decay > 0.001);
        let below = trigger_chance(20, 0.20, 0.001, &cfg) - trigger_chance(19, 0.20, 0.001, &cfg);
        let beyond = trigger_chance(22, 0.20, 0.001, &cfg) - trigger_chance(21, 0.20, 0.001, &cfg);
        assert!(beyond < below);
        assert!(beyond > 0.0);
    }

    #[test]
    fn test_flat_past_cap_when_uncapped_scaling_off() {
        let cfg = GlobalConfig {
            uncapped_scaling: false,
            ..GlobalConfig::default()
        };
        let at_cap = trigger_chance(20, 0.05, 0.01, &cfg);
        let far_past = trigger_chance(200, 0.05, 0.01, &cfg);
        assert!((at_cap - far_past).abs() < 1e-6);
    }

    #[test]
    fn test_level_25_reference_scenario() {
        // base 0.05, influence 1.0, multiplier 1.0, uncapped on, decay 0.002:
        // 0.05 + 20*0.01 + 5*0.002 = 0.26
        let cfg = config();
        let p = trigger_chance(25, 0.05, 0.01, &cfg);
        assert!((p - 0.26).abs() < 1e-6);
    }

    #[test]
    fn test_multiplier_cannot_break_hard_cap() {
        let cfg = GlobalConfig {
            chance_multiplier: 100.0,
            ..GlobalConfig::default()
        };
        assert_eq!(trigger_chance(20, 0.3, 0.01, &cfg), HARD_CAP);
    }

    #[test]
    fn test_status_chance_caps() {
        assert!((status_chance(0, 0.2) - 0.2).abs() < 1e-6);
        assert!((status_chance(10, 0.2) - 0.3).abs() < 1e-6);
        assert_eq!(status_chance(999, 0.75), STATUS_CHANCE_CAP);
    }

    proptest! {
        #[test]
        fn prop_trigger_chance_never_exceeds_hard_cap(
            level in 0u32..2000,
            base in 0.0f32..1.0,
            scaling in 0.0f32..0.1,
            multiplier in 0.0f32..50.0,
            influence in 0.0f32..5.0,
        ) {
            let cfg = GlobalConfig {
                chance_multiplier: multiplier,
                skill_influence: influence,
                ..GlobalConfig::default()
            };
            let p = trigger_chance(level, base, scaling, &cfg);
            prop_assert!((0.0..=HARD_CAP).contains(&p));
        }
    }
}
