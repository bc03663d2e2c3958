//! The technique catalog
//!
//! A fixed, ordered table. Order is the tie-break when several techniques
//! are eligible for the same event: the first one to win its probability
//! draw executes and later entries are never evaluated. The table never
//! changes after process start.

use serde::{Deserialize, Serialize};

use crate::events::TriggerKind;
use crate::implement::ImplementCategory;
use crate::techniques::effects::{self, EffectFn};

/// Stable identity for each technique, used by config toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TechniqueId {
    CounterThrow,
    DeflectingParry,
    SidestepSlash,
    CrushingCounter,
    WhirlwindSweep,
    Breakfall,
    ReflexDodge,
    WallSlam,
    LungingStrike,
    PointBlankShot,
}

/// Immutable description of one technique
#[derive(Clone, Copy)]
pub struct TechniqueDescriptor {
    pub id: TechniqueId,
    pub name: &'static str,
    pub required: ImplementCategory,
    pub trigger: TriggerKind,
    /// Tuned base chance; `None` falls back to the configured global base
    pub base_chance: Option<f32>,
    /// Trigger-chance gain per proficiency level (up to the nominal cap)
    pub skill_scaling: f32,
    pub effect: EffectFn,
}

impl std::fmt::Debug for TechniqueDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TechniqueDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("required", &self.required)
            .field("trigger", &self.trigger)
            .field("base_chance", &self.base_chance)
            .field("skill_scaling", &self.skill_scaling)
            .finish()
    }
}

static CATALOG: [TechniqueDescriptor; 10] = [
    TechniqueDescriptor {
        id: TechniqueId::CounterThrow,
        name: "Counter Throw",
        required: ImplementCategory::Unarmed,
        trigger: TriggerKind::MeleeHitReceived,
        base_chance: Some(0.05),
        skill_scaling: 0.005,
        effect: effects::counter_throw,
    },
    TechniqueDescriptor {
        id: TechniqueId::DeflectingParry,
        name: "Deflecting Parry",
        required: ImplementCategory::Blade,
        trigger: TriggerKind::MeleeHitReceived,
        base_chance: Some(0.10),
        skill_scaling: 0.003,
        effect: effects::deflecting_parry,
    },
    TechniqueDescriptor {
        id: TechniqueId::SidestepSlash,
        name: "Sidestep Slash",
        required: ImplementCategory::ShortBlade,
        trigger: TriggerKind::MeleeHitReceived,
        base_chance: Some(0.08),
        skill_scaling: 0.002,
        effect: effects::sidestep_slash,
    },
    TechniqueDescriptor {
        id: TechniqueId::CrushingCounter,
        name: "Crushing Counter",
        required: ImplementCategory::Blunt,
        trigger: TriggerKind::MeleeHitReceived,
        base_chance: Some(0.07),
        skill_scaling: 0.003,
        effect: effects::crushing_counter,
    },
    TechniqueDescriptor {
        id: TechniqueId::WhirlwindSweep,
        name: "Whirlwind Sweep",
        required: ImplementCategory::Any,
        trigger: TriggerKind::Surrounded,
        base_chance: Some(0.10),
        skill_scaling: 0.002,
        effect: effects::whirlwind_sweep,
    },
    TechniqueDescriptor {
        id: TechniqueId::Breakfall,
        name: "Breakfall",
        required: ImplementCategory::Any,
        trigger: TriggerKind::KnockdownAttempt,
        base_chance: Some(0.20),
        skill_scaling: 0.001,
        effect: effects::breakfall,
    },
    TechniqueDescriptor {
        id: TechniqueId::ReflexDodge,
        name: "Reflex Dodge",
        required: ImplementCategory::Unarmed,
        trigger: TriggerKind::RangedHitReceived,
        base_chance: Some(0.03),
        skill_scaling: 0.002,
        effect: effects::reflex_dodge,
    },
    TechniqueDescriptor {
        id: TechniqueId::WallSlam,
        name: "Wall Slam",
        required: ImplementCategory::Blunt,
        trigger: TriggerKind::NearWall,
        base_chance: Some(0.12),
        skill_scaling: 0.003,
        effect: effects::wall_slam,
    },
    TechniqueDescriptor {
        id: TechniqueId::LungingStrike,
        name: "Lunging Strike",
        required: ImplementCategory::ShortBlade,
        trigger: TriggerKind::MeleeHitReceived,
        base_chance: Some(0.06),
        skill_scaling: 0.002,
        effect: effects::lunging_strike,
    },
    TechniqueDescriptor {
        id: TechniqueId::PointBlankShot,
        name: "Point-Blank Shot",
        required: ImplementCategory::Firearm,
        trigger: TriggerKind::MeleeHitReceived,
        base_chance: Some(0.08),
        skill_scaling: 0.002,
        effect: effects::point_blank_shot,
    },
];

/// The full ordered catalog
pub fn catalog() -> &'static [TechniqueDescriptor] {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_ten_entries() {
        assert_eq!(catalog().len(), 10);
    }

    #[test]
    fn test_catalog_ids_unique() {
        let mut seen = std::collections::HashSet::new();
        for tech in catalog() {
            assert!(seen.insert(tech.id), "duplicate id {:?}", tech.id);
        }
    }

    #[test]
    fn test_counter_techniques_precede_supplemental_ones() {
        // The suppressing unarmed counter outranks the non-suppressing
        // firearm counter for the same trigger.
        let order: Vec<TechniqueId> = catalog().iter().map(|t| t.id).collect();
        let counter = order
            .iter()
            .position(|id| *id == TechniqueId::CounterThrow)
            .unwrap();
        let shot = order
            .iter()
            .position(|id| *id == TechniqueId::PointBlankShot)
            .unwrap();
        assert!(counter < shot);
    }

    #[test]
    fn test_every_trigger_kind_covered() {
        for kind in [
            TriggerKind::MeleeHitReceived,
            TriggerKind::RangedHitReceived,
            TriggerKind::KnockdownAttempt,
            TriggerKind::Surrounded,
            TriggerKind::NearWall,
        ] {
            assert!(catalog().iter().any(|t| t.trigger == kind));
        }
    }
}
