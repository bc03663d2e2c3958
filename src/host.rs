//! Collaborator interfaces the host simulation must supply
//!
//! The engine holds no actor or map state of its own. Everything it needs
//! is queried through `CombatHost` at resolution time; everything it wants
//! done comes back through the same trait as commands. Randomness and
//! presentation are split out so tests can script the former and drop the
//! latter.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::error::Result;
use crate::core::types::{ActorId, CellCoord};
use crate::events::{DamageDescriptor, StatusEffect};
use crate::implement::ImplementProfile;

/// Query/command surface over the host's actors and map
///
/// Queries must be cheap and non-blocking; the whole pipeline runs inline
/// in the host's combat tick. Commands return `Err` on failure, which the
/// dispatcher treats as "abandon this technique attempt", and
/// `EngineError::MissingDefinition` specifically as "skip this one effect".
pub trait CombatHost {
    // --- actor state queries ---
    fn is_alive(&self, actor: ActorId) -> bool;
    fn is_downed(&self, actor: ActorId) -> bool;
    fn is_player_controlled(&self, actor: ActorId) -> bool;
    /// Panicked, berserk, or similar states that interfere with technique use
    fn in_interfering_state(&self, actor: ActorId) -> bool;
    /// Stunned, unconscious, anesthetized
    fn is_incapacitated(&self, actor: ActorId) -> bool;
    /// Mid-action or on cooldown; ignored for reactive triggers
    fn is_busy(&self, actor: ActorId) -> bool;

    /// Accumulated melee experience, fed to the proficiency model
    fn melee_experience(&self, actor: ActorId) -> f32;
    /// Host's melee damage stat multiplier for this actor
    fn damage_factor(&self, actor: ActorId) -> f32;
    /// Current health as a fraction of maximum, in [0, 1]
    fn health_fraction(&self, actor: ActorId) -> f32;
    fn max_health(&self, actor: ActorId) -> f32;

    fn equipped_implement(&self, actor: ActorId) -> Option<ImplementProfile>;

    // --- map queries ---
    /// `None` when the actor has no map context (caravan, shuttle, ...)
    fn position(&self, actor: ActorId) -> Option<CellCoord>;
    fn actors_at(&self, cell: CellCoord) -> Vec<ActorId>;
    fn is_hostile(&self, actor: ActorId, other: ActorId) -> bool;
    /// Is there a solid, line-of-movement-blocking structure at this cell?
    fn solid_structure_at(&self, cell: CellCoord) -> bool;

    // --- commands ---
    fn apply_damage(&mut self, target: ActorId, damage: &DamageDescriptor) -> Result<()>;
    fn apply_status(&mut self, target: ActorId, status: StatusEffect) -> Result<()>;
    fn clear_downed(&mut self, actor: ActorId) -> Result<()>;
}

/// Count hostile actors in the 8 cells around `actor`
pub fn count_adjacent_hostiles(host: &dyn CombatHost, actor: ActorId) -> usize {
    let Some(position) = host.position(actor) else {
        return 0;
    };
    position
        .adjacent8()
        .iter()
        .flat_map(|cell| host.actors_at(*cell))
        .filter(|other| host.is_hostile(actor, *other))
        .count()
}

/// Is there a solid structure in any of the 8 cells around `actor`?
pub fn near_solid_structure(host: &dyn CombatHost, actor: ActorId) -> bool {
    let Some(position) = host.position(actor) else {
        return false;
    };
    position
        .adjacent8()
        .iter()
        .any(|cell| host.solid_structure_at(*cell))
}

/// Source of probability draws for the resolution pipeline
pub trait ChanceSource {
    /// Bernoulli draw: true with probability `p`
    fn chance(&mut self, p: f32) -> bool;
    /// Uniform sample from [lo, hi)
    fn sample_range(&mut self, lo: f32, hi: f32) -> f32;
}

/// `ChanceSource` over any `rand` RNG
pub struct DiceRolls<R: Rng>(pub R);

impl<R: Rng> ChanceSource for DiceRolls<R> {
    fn chance(&mut self, p: f32) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.0.gen::<f32>() < p
    }

    fn sample_range(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        self.0.gen_range(lo..hi)
    }
}

/// Deterministic rolls for replays and tests
pub type SeededRolls = DiceRolls<ChaCha8Rng>;

impl SeededRolls {
    pub fn seeded(seed: u64) -> Self {
        DiceRolls(ChaCha8Rng::seed_from_u64(seed))
    }
}

/// Fire-and-forget presentation requests
///
/// Implementations must not block; resolution outcomes never depend on
/// what a presenter does with these.
pub trait Presenter {
    /// A technique fired; display its name near the user
    fn technique_used(&mut self, user: ActorId, name: &str);
    /// Particle/sound cue at a cell
    fn impact_cue(&mut self, cell: CellCoord);
}

/// Presenter that drops every request
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPresenter;

impl Presenter for SilentPresenter {
    fn technique_used(&mut self, _user: ActorId, _name: &str) {}
    fn impact_cue(&mut self, _cell: CellCoord) {}
}
