//! Implement categorization
//!
//! Techniques gate on broad categories, not specific weapon defs. The
//! category is recomputed from the equipped implement on every call since
//! equipment can change between events. Derivation is heuristic: name
//! patterns first, then damage-capacity tags and mass as fallback so
//! modded or renamed implements still land in a sensible bucket.

use serde::{Deserialize, Serialize};

use crate::events::DamageKind;

/// Broad implement category a technique can require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImplementCategory {
    Unarmed,
    Blade,
    ShortBlade,
    Blunt,
    Firearm,
    Any,
}

impl ImplementCategory {
    /// Does an actor holding `actual` satisfy a requirement of `self`?
    pub fn matches(&self, actual: ImplementCategory) -> bool {
        *self == ImplementCategory::Any || *self == actual
    }
}

/// Host-supplied snapshot of an equipped implement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplementProfile {
    /// Definition name, lowercased for matching by the derivation
    pub def_name: String,
    pub is_melee: bool,
    pub is_ranged: bool,
    /// Damage kinds the implement is capable of dealing
    pub capacities: Vec<DamageKind>,
    /// Mass in kilograms
    pub mass: f32,
}

impl ImplementProfile {
    pub fn new(def_name: impl Into<String>) -> Self {
        Self {
            def_name: def_name.into(),
            is_melee: false,
            is_ranged: false,
            capacities: Vec::new(),
            mass: 0.0,
        }
    }

    pub fn melee(mut self) -> Self {
        self.is_melee = true;
        self
    }

    pub fn ranged(mut self) -> Self {
        self.is_ranged = true;
        self
    }

    pub fn with_capacity(mut self, kind: DamageKind) -> Self {
        self.capacities.push(kind);
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    fn name_contains(&self, patterns: &[&str]) -> bool {
        let name = self.def_name.to_lowercase();
        patterns.iter().any(|p| name.contains(p))
    }

    fn can_cut(&self) -> bool {
        self.capacities.contains(&DamageKind::Cut)
    }
}

/// Mass above which a cutting implement counts as a full blade
const BLADE_MASS_FLOOR: f32 = 1.5;

/// Derive the category of the currently equipped implement
///
/// `None` means empty hands.
pub fn categorize(implement: Option<&ImplementProfile>) -> ImplementCategory {
    let Some(implement) = implement else {
        return ImplementCategory::Unarmed;
    };

    if implement.is_ranged {
        return ImplementCategory::Firearm;
    }

    // Name patterns are the most reliable signal for vanilla defs
    if implement.name_contains(&["katana", "longsword"]) {
        return ImplementCategory::Blade;
    }
    if implement.name_contains(&["knife", "dagger"]) {
        return ImplementCategory::ShortBlade;
    }
    if implement.is_melee && implement.name_contains(&["mace", "club", "hammer"]) {
        return ImplementCategory::Blunt;
    }

    // Fallback: capacity tags plus mass range
    if implement.is_melee && implement.can_cut() {
        return if implement.mass >= BLADE_MASS_FLOOR {
            ImplementCategory::Blade
        } else {
            ImplementCategory::ShortBlade
        };
    }
    if implement.is_melee {
        return ImplementCategory::Blunt;
    }

    // Equipped but neither melee nor ranged: treat as empty hands
    ImplementCategory::Unarmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_hands() {
        assert_eq!(categorize(None), ImplementCategory::Unarmed);
    }

    #[test]
    fn test_name_patterns() {
        let katana = ImplementProfile::new("MeleeWeapon_Katana").melee();
        assert_eq!(categorize(Some(&katana)), ImplementCategory::Blade);

        let dagger = ImplementProfile::new("MeleeWeapon_Dagger").melee();
        assert_eq!(categorize(Some(&dagger)), ImplementCategory::ShortBlade);

        let hammer = ImplementProfile::new("MeleeWeapon_Warhammer").melee();
        assert_eq!(categorize(Some(&hammer)), ImplementCategory::Blunt);
    }

    #[test]
    fn test_ranged_wins_over_name() {
        let rifle = ImplementProfile::new("Gun_BoltActionRifle").ranged();
        assert_eq!(categorize(Some(&rifle)), ImplementCategory::Firearm);
    }

    #[test]
    fn test_capacity_and_mass_fallback() {
        let heavy_cutter = ImplementProfile::new("TribalCutter")
            .melee()
            .with_capacity(DamageKind::Cut)
            .with_mass(2.2);
        assert_eq!(categorize(Some(&heavy_cutter)), ImplementCategory::Blade);

        let light_cutter = ImplementProfile::new("Shiv")
            .melee()
            .with_capacity(DamageKind::Cut)
            .with_mass(0.4);
        assert_eq!(categorize(Some(&light_cutter)), ImplementCategory::ShortBlade);

        let cudgel = ImplementProfile::new("ImprovisedBat")
            .melee()
            .with_capacity(DamageKind::Blunt)
            .with_mass(1.8);
        assert_eq!(categorize(Some(&cudgel)), ImplementCategory::Blunt);
    }

    #[test]
    fn test_any_matches_everything() {
        for actual in [
            ImplementCategory::Unarmed,
            ImplementCategory::Blade,
            ImplementCategory::ShortBlade,
            ImplementCategory::Blunt,
            ImplementCategory::Firearm,
        ] {
            assert!(ImplementCategory::Any.matches(actual));
            assert!(actual.matches(actual));
            assert!(!actual.matches(ImplementCategory::Any));
        }
    }
}
