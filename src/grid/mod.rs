//! Grid navigation — the maze half of the game.
//!
//! `GridSession` is the explicit state object for one playthrough: the floor
//! plan, the cell classifier, the player controller (position, trail and
//! hidden-room occupancy), the landmarks and the camera. Construction and
//! reset are explicit operations; nothing lives in module-level state.

pub mod camera;
pub mod cell;
pub mod floor;
pub mod player;
pub mod triggers;

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::{ConfigError, Result};
use camera::Camera;
use cell::CellClassifier;
use floor::{FloorPlan, SceneMetrics};
use player::{Direction, PlayerController, Step};
use triggers::{Landmarks, Triggers};

/// A `(col, row)` cell coordinate. Displays as the `"col,row"` trail key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub col: usize,
    pub row: usize,
}

impl Position {
    pub const fn new(col: usize, row: usize) -> Self {
        Position { col, row }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}

/// Result of an accepted move (or a reset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub step: Step,
    pub triggers: Triggers,
    /// The camera re-centred on the new cell.
    pub camera_moved: bool,
}

#[derive(Debug, Clone)]
pub struct GridSession {
    plan: FloorPlan,
    metrics: SceneMetrics,
    classifier: CellClassifier,
    player: PlayerController,
    landmarks: Landmarks,
    camera: Camera,
}

impl GridSession {
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self> {
        let plan = config.floor_plan.clone();
        if plan.is_empty() {
            return Err(ConfigError::EmptyFloorPlan);
        }
        if !(config.zoom_factor.is_finite() && config.zoom_factor > 0.0) {
            return Err(ConfigError::InvalidZoom(config.zoom_factor));
        }

        let mut classifier = CellClassifier::new();
        let mut walkable = |pos: Position| {
            plan.get(pos)
                .is_some_and(|code| classifier.is_walkable(code))
        };
        if !walkable(config.start) {
            return Err(ConfigError::UnwalkableStart(config.start));
        }
        for (name, position) in [("A", config.hotspot_a), ("B", config.hotspot_b)] {
            if !walkable(position) {
                return Err(ConfigError::UnwalkableHotspot { name, position });
            }
        }

        let landmarks = Landmarks::place(&plan, config.hotspot_a, config.hotspot_b, rng)
            .ok_or(ConfigError::NoGoalCandidates)?;
        let metrics = plan.metrics();
        let camera = Camera::new(
            metrics,
            config.zoom_factor,
            config.timings.camera_delay(),
            config.timings.camera_duration(),
        );
        let player = PlayerController::new(config.start, &plan);

        Ok(GridSession {
            plan,
            metrics,
            classifier,
            player,
            landmarks,
            camera,
        })
    }

    pub fn plan(&self) -> &FloorPlan {
        &self.plan
    }

    pub fn metrics(&self) -> SceneMetrics {
        self.metrics
    }

    pub fn classifier_mut(&mut self) -> &mut CellClassifier {
        &mut self.classifier
    }

    pub fn position(&self) -> Position {
        self.player.position()
    }

    pub fn visited(&self) -> &BTreeSet<Position> {
        self.player.visited()
    }

    /// True iff the player stands on a hidden-room cell.
    pub fn occupancy(&self) -> bool {
        self.player.on_hidden_room()
    }

    pub fn landmarks(&self) -> &Landmarks {
        &self.landmarks
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Try to move the player. `None` means the move was rejected and no
    /// state changed.
    pub fn attempt_move(&mut self, direction: Direction) -> Option<MoveOutcome> {
        let step = self
            .player
            .attempt_move(direction, &self.plan, &mut self.classifier)?;
        log::debug!("player moved {direction:?} {} -> {}", step.from, step.to);
        Some(self.settle(step))
    }

    /// Put the player back on the start cell (the "return to grid" control).
    pub fn reset_to_start(&mut self) -> MoveOutcome {
        let step = self.player.reset(&self.plan);
        log::debug!("player reset to {}", step.to);
        self.settle(step)
    }

    /// Drive the camera's entry animation; `elapsed` counts from when the
    /// maze screen was shown.
    pub fn animate_camera(&mut self, elapsed: Duration) -> bool {
        let pos = self.player.position();
        self.camera.animate(elapsed, pos)
    }

    fn settle(&mut self, step: Step) -> MoveOutcome {
        let camera_moved = self.camera.track(step.to);
        let triggers = triggers::evaluate(&self.landmarks, step.to);
        if triggers.enter_main {
            log::info!("goal reached at {}", step.to);
        }
        MoveOutcome {
            step,
            triggers,
            camera_moved,
        }
    }
}
