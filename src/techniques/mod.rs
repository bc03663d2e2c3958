pub mod catalog;
pub mod effects;

pub use catalog::{catalog, TechniqueDescriptor, TechniqueId};
pub use effects::{EffectContext, EffectFn, EffectOutcome};
