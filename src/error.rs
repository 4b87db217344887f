use thiserror::Error;

use crate::grid::Position;

/// Problems with a loaded `GameConfig` that would break the grid invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("floor plan has no cells")]
    EmptyFloorPlan,

    #[error("start cell {0} is not walkable")]
    UnwalkableStart(Position),

    #[error("{name} hotspot {position} is not walkable")]
    UnwalkableHotspot {
        name: &'static str,
        position: Position,
    },

    #[error("floor plan has no open cell to place the goal on")]
    NoGoalCandidates,

    #[error("zoom factor must be a positive finite number, got {0}")]
    InvalidZoom(f64),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
