//! Core type definitions used throughout the crate

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque handle for a host-owned combatant
///
/// The engine never stores actor state; it queries the host per call
/// through this handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

/// Simulation time unit, supplied by the host
pub type Tick = u64;

/// Grid cell position on the host's map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i32,
    pub z: i32,
}

impl CellCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The 8 neighbouring cells
    pub fn adjacent8(&self) -> [CellCoord; 8] {
        let (x, z) = (self.x, self.z);
        [
            CellCoord::new(x - 1, z - 1),
            CellCoord::new(x, z - 1),
            CellCoord::new(x + 1, z - 1),
            CellCoord::new(x - 1, z),
            CellCoord::new(x + 1, z),
            CellCoord::new(x - 1, z + 1),
            CellCoord::new(x, z + 1),
            CellCoord::new(x + 1, z + 1),
        ]
    }
}
