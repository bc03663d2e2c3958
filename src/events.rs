//! Combat events and the damage/status payloads they carry
//!
//! The host raises one `CombatEvent` per interception point and hands it to
//! the dispatch controller. Hit events carry the original damage so a
//! technique can inspect, rewrite, or suppress it.

use serde::{Deserialize, Serialize};

use crate::core::types::ActorId;

/// What kind of combat moment a technique can react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerKind {
    MeleeHitReceived,
    RangedHitReceived,
    KnockdownAttempt,
    Surrounded,
    NearWall,
}

impl TriggerKind {
    /// Reactive triggers fire on something done *to* the actor; a busy or
    /// cooling-down actor still gets to react to these.
    pub fn is_reactive(&self) -> bool {
        matches!(
            self,
            TriggerKind::MeleeHitReceived
                | TriggerKind::RangedHitReceived
                | TriggerKind::KnockdownAttempt
        )
    }
}

/// Damage categories understood by the host's damage pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageKind {
    Blunt,
    Cut,
    Gunshot,
}

/// How the host should pick the body part a hit lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PartSelection {
    /// Any part appropriate for the damage kind
    #[default]
    Random,
    /// Keep whatever part the original hit already selected
    Original,
}

/// A single hit, as the host's damage pipeline understands it
///
/// Mutable in place: a technique that replaces the original hit rewrites
/// these fields and lets the host apply the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageDescriptor {
    pub kind: DamageKind,
    pub amount: f32,
    pub armor_penetration: f32,
    pub source: Option<ActorId>,
    pub part_selection: PartSelection,
}

impl DamageDescriptor {
    pub fn new(kind: DamageKind, amount: f32, source: Option<ActorId>) -> Self {
        Self {
            kind,
            amount,
            armor_penetration: 0.0,
            source,
            part_selection: PartSelection::Random,
        }
    }
}

/// A combat moment the host intercepted before resolving it
#[derive(Debug)]
pub enum CombatEvent {
    /// A melee hit has landed on `defender` and is about to be applied
    MeleeHitReceived {
        attacker: ActorId,
        defender: ActorId,
        damage: DamageDescriptor,
    },
    /// A projectile is about to impact `defender`
    RangedHitReceived {
        attacker: ActorId,
        defender: ActorId,
        damage: DamageDescriptor,
    },
    /// `actor` is about to be knocked down
    KnockdownAttempt { actor: ActorId },
    /// `actor` has at least two hostiles in adjacent cells
    Surrounded { actor: ActorId },
    /// `attacker` landed a hit on `defender` while standing next to a wall
    NearWall {
        attacker: ActorId,
        defender: ActorId,
        damage: DamageDescriptor,
    },
}

impl CombatEvent {
    pub fn trigger_kind(&self) -> TriggerKind {
        match self {
            CombatEvent::MeleeHitReceived { .. } => TriggerKind::MeleeHitReceived,
            CombatEvent::RangedHitReceived { .. } => TriggerKind::RangedHitReceived,
            CombatEvent::KnockdownAttempt { .. } => TriggerKind::KnockdownAttempt,
            CombatEvent::Surrounded { .. } => TriggerKind::Surrounded,
            CombatEvent::NearWall { .. } => TriggerKind::NearWall,
        }
    }

    /// The actor whose techniques are considered for this event
    pub fn subject(&self) -> ActorId {
        match self {
            CombatEvent::MeleeHitReceived { defender, .. } => *defender,
            CombatEvent::RangedHitReceived { defender, .. } => *defender,
            CombatEvent::KnockdownAttempt { actor } => *actor,
            CombatEvent::Surrounded { actor } => *actor,
            CombatEvent::NearWall { attacker, .. } => *attacker,
        }
    }

    /// The actor a counter would land on, if there is one
    pub fn opponent(&self) -> Option<ActorId> {
        match self {
            CombatEvent::MeleeHitReceived { attacker, .. } => Some(*attacker),
            CombatEvent::RangedHitReceived { attacker, .. } => Some(*attacker),
            CombatEvent::KnockdownAttempt { .. } => None,
            CombatEvent::Surrounded { .. } => None,
            CombatEvent::NearWall { defender, .. } => Some(*defender),
        }
    }

    pub fn damage_mut(&mut self) -> Option<&mut DamageDescriptor> {
        match self {
            CombatEvent::MeleeHitReceived { damage, .. }
            | CombatEvent::RangedHitReceived { damage, .. }
            | CombatEvent::NearWall { damage, .. } => Some(damage),
            _ => None,
        }
    }
}

/// Secondary effect a technique can inflict alongside its damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    Stunned,
    Bleeding,
    Staggered,
    Slowed,
    ArmorDegraded,
}

impl StatusKind {
    /// Statuses that keep an actor from performing techniques at all
    pub fn is_incapacitating(&self) -> bool {
        matches!(self, StatusKind::Stunned)
    }
}

/// A status instance, ready for the host to attach to an actor
///
/// Expiry and removal are the host's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub severity: f32,
    pub duration: crate::core::types::Tick,
}
