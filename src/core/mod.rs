pub mod config;
pub mod error;
pub mod types;

pub use config::{GlobalConfig, TechniqueToggles};
pub use error::{EngineError, Result};
pub use types::{ActorId, CellCoord, Tick};
