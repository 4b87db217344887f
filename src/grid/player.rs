use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Position;
use super::cell::{CellClassifier, HIDDEN_ROOM};
use super::floor::FloorPlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse a move-script token: `u`/`up`, `d`/`down`, `l`/`left`, `r`/`right`.
    pub fn parse(token: &str) -> Option<Direction> {
        match token.to_ascii_lowercase().as_str() {
            "u" | "up" => Some(Direction::Up),
            "d" | "down" => Some(Direction::Down),
            "l" | "left" => Some(Direction::Left),
            "r" | "right" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// A move the controller accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub from: Position,
    pub to: Position,
    /// `from` was not in the visited set before this move.
    pub newly_visited: bool,
    /// The hidden-room occupancy toggle flipped.
    pub occupancy_changed: bool,
}

/// Owns the player position, the visited trail and the occupancy toggle.
#[derive(Debug, Clone)]
pub struct PlayerController {
    position: Position,
    start: Position,
    visited: BTreeSet<Position>,
    on_hidden_room: bool,
}

impl PlayerController {
    pub fn new(start: Position, plan: &FloorPlan) -> Self {
        let mut visited = BTreeSet::new();
        visited.insert(start);
        PlayerController {
            position: start,
            start,
            visited,
            on_hidden_room: plan.get(start) == Some(HIDDEN_ROOM),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn visited(&self) -> &BTreeSet<Position> {
        &self.visited
    }

    pub fn on_hidden_room(&self) -> bool {
        self.on_hidden_room
    }

    /// Candidate cell one step away, kept inside the plan's bounding box.
    pub fn candidate(&self, direction: Direction, plan: &FloorPlan) -> Position {
        let Position { col, row } = self.position;
        let rows = plan.row_count();
        let cols = plan.col_count();
        match direction {
            Direction::Up => Position::new(col, row.saturating_sub(1)),
            Direction::Down if row + 1 < rows => Position::new(col, row + 1),
            Direction::Left => Position::new(col.saturating_sub(1), row),
            Direction::Right if col + 1 < cols => Position::new(col + 1, row),
            Direction::Down | Direction::Right => self.position,
        }
    }

    /// Try to move one cell. Returns the accepted step, or `None` when the
    /// target is the current cell, missing, or not walkable.
    pub fn attempt_move(
        &mut self,
        direction: Direction,
        plan: &FloorPlan,
        classifier: &mut CellClassifier,
    ) -> Option<Step> {
        let target = self.candidate(direction, plan);
        if target == self.position {
            return None;
        }
        let code = plan.get(target)?;
        if !classifier.is_walkable(code) {
            log::debug!("move {direction:?} to {target} blocked by code {code}");
            return None;
        }
        Some(self.relocate(target, plan))
    }

    /// Put the player back on the start cell. Recorded like a move.
    pub fn reset(&mut self, plan: &FloorPlan) -> Step {
        self.relocate(self.start, plan)
    }

    fn relocate(&mut self, to: Position, plan: &FloorPlan) -> Step {
        let from = self.position;
        let newly_visited = self.visited.insert(from);
        let was_on_hidden_room = self.on_hidden_room;
        self.on_hidden_room = plan.get(to) == Some(HIDDEN_ROOM);
        self.position = to;
        Step {
            from,
            to,
            newly_visited,
            occupancy_changed: was_on_hidden_room != self.on_hidden_room,
        }
    }
}
