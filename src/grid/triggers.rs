use rand::Rng;
use rand::seq::SliceRandom;

use super::Position;
use super::floor::FloorPlan;

/// Fixed landmark cells for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landmarks {
    pub goal: Position,
    /// Inside the hidden room; its eye is drawn only while the room is occupied.
    pub hotspot_a: Position,
    pub hotspot_b: Position,
}

impl Landmarks {
    /// Pick the goal uniformly among the plan's open cells.
    pub fn place<R: Rng + ?Sized>(
        plan: &FloorPlan,
        hotspot_a: Position,
        hotspot_b: Position,
        rng: &mut R,
    ) -> Option<Landmarks> {
        let goal = *plan.open_cells().choose(rng)?;
        log::debug!("goal placed at {goal}");
        Some(Landmarks {
            goal,
            hotspot_a,
            hotspot_b,
        })
    }
}

/// What the trigger checks asked for after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Triggers {
    pub enter_main: bool,
    pub overlay_a: bool,
    pub overlay_b: bool,
}

/// Three independent equality checks. Overlay flags are reported on every
/// evaluation, so callers set visibility each time rather than on change.
pub fn evaluate(landmarks: &Landmarks, pos: Position) -> Triggers {
    Triggers {
        enter_main: pos == landmarks.goal,
        overlay_a: pos == landmarks.hotspot_a,
        overlay_b: pos == landmarks.hotspot_b,
    }
}
