//! Counterplay - Reactive Combat Technique Resolution
//!
//! The host simulation intercepts combat moments (a hit landing, a
//! knockdown attempt, being surrounded, fighting next to a wall) and hands
//! each one to [`TechniqueEngine::handle`]. The engine decides, scaled by
//! proficiency and equipped implement, whether a scripted technique fires
//! instead of (or on top of) the default outcome, executes its effects
//! through the host, and answers with a single suppression flag.

pub mod chance;
pub mod core;
pub mod dispatch;
pub mod eligibility;
pub mod events;
pub mod host;
pub mod implement;
pub mod proficiency;
pub mod resolve;
pub mod techniques;

pub use crate::core::{ActorId, CellCoord, EngineError, GlobalConfig, Result, TechniqueToggles, Tick};
pub use crate::dispatch::TechniqueEngine;
pub use crate::events::{
    CombatEvent, DamageDescriptor, DamageKind, PartSelection, StatusEffect, StatusKind, TriggerKind,
};
pub use crate::host::{
    ChanceSource, CombatHost, DiceRolls, Presenter, SeededRolls, SilentPresenter,
};
pub use crate::implement::{ImplementCategory, ImplementProfile};
pub use crate::techniques::{TechniqueDescriptor, TechniqueId};
