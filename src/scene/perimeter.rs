//! Outline of the floor plan, traced cell by cell from neighbour rules.

use crate::grid::Position;
use crate::grid::cell::{HIDDEN_ROOM, VOID, WALL};
use crate::grid::floor::{FloorPlan, SceneMetrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sides {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Which sides of the cell at `pos` carry a border.
///
/// Walls border only void. Hidden-room cells border anything that is not
/// hidden room, and only while the room is occupied. Everything else borders
/// void, hidden room and the map edge.
pub fn bordered_sides(plan: &FloorPlan, pos: Position, code: i32, occupied: bool) -> Sides {
    let top = plan.neighbour(pos, 0, -1);
    let bottom = plan.neighbour(pos, 0, 1);
    let left = plan.neighbour(pos, -1, 0);
    let right = plan.neighbour(pos, 1, 0);
    let first_col = pos.col == 0;
    let last_col = pos.col + 1 == plan.row_len(pos.row);

    match code {
        VOID => Sides::default(),
        WALL => Sides {
            top: top == Some(VOID),
            bottom: bottom == Some(VOID),
            left: left == Some(VOID),
            right: right == Some(VOID),
        },
        HIDDEN_ROOM if occupied => Sides {
            top: top != Some(HIDDEN_ROOM),
            bottom: bottom != Some(HIDDEN_ROOM),
            left: left != Some(HIDDEN_ROOM) || first_col,
            right: right != Some(HIDDEN_ROOM) || last_col,
        },
        HIDDEN_ROOM => Sides::default(),
        _ => {
            let edge_or_gap = |n: Option<i32>| n == Some(VOID) || n == Some(HIDDEN_ROOM);
            Sides {
                top: edge_or_gap(top) || pos.row == 0,
                bottom: edge_or_gap(bottom) || pos.row + 1 == plan.row_count(),
                left: edge_or_gap(left) || first_col,
                right: edge_or_gap(right) || last_col,
            }
        }
    }
}

/// One segment per bordered cell side, in scene units.
pub fn trace(plan: &FloorPlan, metrics: &SceneMetrics, occupied: bool) -> Vec<Segment> {
    let (w, h) = (metrics.cell_width, metrics.cell_height);
    let mut segments = Vec::new();
    for (pos, code) in plan.cells() {
        let sides = bordered_sides(plan, pos, code, occupied);
        let (x, y) = metrics.cell_origin(pos);
        if sides.top {
            segments.push(Segment { x1: x, y1: y, x2: x + w, y2: y });
        }
        if sides.bottom {
            segments.push(Segment { x1: x, y1: y + h, x2: x + w, y2: y + h });
        }
        if sides.left {
            segments.push(Segment { x1: x, y1: y, x2: x, y2: y + h });
        }
        if sides.right {
            segments.push(Segment { x1: x + w, y1: y, x2: x + w, y2: y + h });
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::floor::default_floor_plan;

    #[test]
    fn open_corner_cell_borders_map_edges() {
        let plan = default_floor_plan();
        let s = bordered_sides(&plan, Position::new(0, 0), 0, false);
        assert_eq!(s, Sides { top: true, bottom: false, left: true, right: false });
    }

    #[test]
    fn open_cell_borders_void_and_hidden_room() {
        let plan = default_floor_plan();
        // (3,1) has void to its right.
        assert!(bordered_sides(&plan, Position::new(3, 1), 0, false).right);
        // (3,12) has hidden room to its right.
        assert!(bordered_sides(&plan, Position::new(3, 12), 0, false).right);
        // (4,0) sits above void.
        assert!(bordered_sides(&plan, Position::new(4, 0), 0, false).bottom);
    }

    #[test]
    fn wall_borders_only_void() {
        let plan = default_floor_plan();
        let s = bordered_sides(&plan, Position::new(3, 2), 1, false);
        assert_eq!(s, Sides { top: false, bottom: false, left: false, right: true });
        let s = bordered_sides(&plan, Position::new(2, 2), 1, false);
        assert_eq!(s, Sides::default());
    }

    #[test]
    fn hidden_room_has_no_border_while_unoccupied() {
        let plan = default_floor_plan();
        for col in 4..8 {
            for row in 12..14 {
                let pos = Position::new(col, row);
                assert_eq!(bordered_sides(&plan, pos, 3, false), Sides::default());
            }
        }
    }

    #[test]
    fn occupied_hidden_room_outlines_its_block() {
        let plan = default_floor_plan();
        let s = bordered_sides(&plan, Position::new(4, 12), 3, true);
        assert_eq!(s, Sides { top: true, bottom: false, left: true, right: false });
        let s = bordered_sides(&plan, Position::new(7, 13), 3, true);
        assert_eq!(s, Sides { top: false, bottom: true, left: false, right: true });
    }

    #[test]
    fn trace_emits_one_segment_per_side() {
        let plan = FloorPlan::new(vec![vec![0]]);
        let metrics = plan.metrics();
        let segments = trace(&plan, &metrics, false);
        assert_eq!(segments.len(), 4);
    }
}
