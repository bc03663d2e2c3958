//! Uncapped proficiency progression
//!
//! Levels derive from accumulated experience alone, ignoring any cap the
//! host imposes on its own skill display. The threshold for each level-up
//! grows linearly, so late levels cost noticeably more than early ones.

/// Experience required to reach level 1
const BASE_THRESHOLD: f32 = 1000.0;

/// Additional experience required per level already held
const THRESHOLD_GROWTH: f32 = 50.0;

/// Absolute level ceiling, far above anything gameplay-visible
pub const MAX_LEVEL: u32 = 999;

/// The level at which damage scaling (and capped chance scaling) stops
pub const NOMINAL_LEVEL_CAP: u32 = 20;

/// Derive a proficiency level from total accumulated experience
///
/// Total function: non-finite or negative experience yields level 0.
pub fn level_from_experience(xp: f32) -> u32 {
    if !xp.is_finite() || xp <= 0.0 {
        return 0;
    }

    let mut remaining = xp;
    let mut level = 0u32;
    let mut threshold = BASE_THRESHOLD;

    while remaining >= threshold && level < MAX_LEVEL {
        remaining -= threshold;
        level += 1;
        threshold = BASE_THRESHOLD + level as f32 * THRESHOLD_GROWTH;
    }

    level
}

/// Total experience needed to hold `level`
///
/// Inverse of `level_from_experience`, useful for hosts seeding actors at
/// a known proficiency.
pub fn experience_for_level(level: u32) -> f32 {
    let level = level.min(MAX_LEVEL);
    let mut total = 0.0;
    for l in 0..level {
        total += BASE_THRESHOLD + l as f32 * THRESHOLD_GROWTH;
    }
    total
}

/// Effective level for damage scaling purposes
pub fn damage_scaling_level(level: u32) -> u32 {
    level.min(NOMINAL_LEVEL_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_negative_xp() {
        assert_eq!(level_from_experience(0.0), 0);
        assert_eq!(level_from_experience(-500.0), 0);
        assert_eq!(level_from_experience(f32::NAN), 0);
    }

    #[test]
    fn test_first_level_threshold() {
        assert_eq!(level_from_experience(999.0), 0);
        assert_eq!(level_from_experience(1000.0), 1);
    }

    #[test]
    fn test_thresholds_grow_with_level() {
        // Level 2 needs 1000 + 1050, not 2000
        assert_eq!(level_from_experience(2000.0), 1);
        assert_eq!(level_from_experience(2050.0), 2);
    }

    #[test]
    fn test_levels_beyond_nominal_cap() {
        let xp = experience_for_level(25);
        assert_eq!(level_from_experience(xp), 25);
    }

    #[test]
    fn test_absolute_ceiling() {
        assert_eq!(level_from_experience(f32::MAX / 2.0), MAX_LEVEL);
    }

    #[test]
    fn test_inverse_round_trips() {
        for level in [0, 1, 5, 20, 21, 100] {
            assert_eq!(level_from_experience(experience_for_level(level)), level);
        }
    }

    #[test]
    fn test_damage_scaling_level_capped() {
        assert_eq!(damage_scaling_level(10), 10);
        assert_eq!(damage_scaling_level(20), 20);
        assert_eq!(damage_scaling_level(500), 20);
    }
}
