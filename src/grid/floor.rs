use serde::{Deserialize, Serialize};

use super::Position;
use super::cell::OPEN;

/// Logical width of the maze scene; height follows the plan's aspect ratio.
pub const SCENE_WIDTH: f64 = 1000.0;

/// The immutable floor plan: rows of cell codes, rows may differ in length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloorPlan {
    rows: Vec<Vec<i32>>,
}

impl FloorPlan {
    pub fn new(rows: Vec<Vec<i32>>) -> Self {
        FloorPlan { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Longest row length.
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.col_count() == 0
    }

    /// Code at `pos`, or `None` outside the plan or past the end of a short row.
    pub fn get(&self, pos: Position) -> Option<i32> {
        self.rows.get(pos.row)?.get(pos.col).copied()
    }

    /// Code of the neighbour at a signed offset from `pos`.
    pub fn neighbour(&self, pos: Position, dcol: isize, drow: isize) -> Option<i32> {
        let col = pos.col.checked_add_signed(dcol)?;
        let row = pos.row.checked_add_signed(drow)?;
        self.get(Position { col, row })
    }

    /// Every defined cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, i32)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, codes)| {
            codes
                .iter()
                .enumerate()
                .map(move |(col, &code)| (Position { col, row }, code))
        })
    }

    /// Open (code 0) cells; the goal is drawn from these.
    pub fn open_cells(&self) -> Vec<Position> {
        self.cells()
            .filter(|&(_, code)| code == OPEN)
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn metrics(&self) -> SceneMetrics {
        SceneMetrics::for_plan(self.row_count(), self.col_count())
    }
}

/// Normalized scene coordinates for a floor plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneMetrics {
    pub width: f64,
    pub height: f64,
    pub cell_width: f64,
    pub cell_height: f64,
    pub rows: usize,
    pub cols: usize,
}

impl SceneMetrics {
    pub fn for_plan(rows: usize, cols: usize) -> Self {
        let cols_f = cols.max(1) as f64;
        let rows_f = rows.max(1) as f64;
        let width = SCENE_WIDTH;
        let height = rows_f / cols_f * width;
        SceneMetrics {
            width,
            height,
            cell_width: width / cols_f,
            cell_height: height / rows_f,
            rows,
            cols,
        }
    }

    /// Top-left corner of a cell in scene units.
    pub fn cell_origin(&self, pos: Position) -> (f64, f64) {
        (
            pos.col as f64 * self.cell_width,
            pos.row as f64 * self.cell_height,
        )
    }

    pub fn cell_center(&self, pos: Position) -> (f64, f64) {
        (
            (pos.col as f64 + 0.5) * self.cell_width,
            (pos.row as f64 + 0.5) * self.cell_height,
        )
    }
}

/// The floor plan shipped with the game.
pub fn default_floor_plan() -> FloorPlan {
    FloorPlan::new(vec![
        vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        vec![0, 0, 0, 0, 2, 2, 2, 2, 0, 0, 0, 0],
        vec![0, 0, 1, 1, 2, 2, 2, 2, 1, 1, 0, 0],
        vec![0, 0, 0, 0, 2, 2, 2, 2, 0, 0, 0, 0],
        vec![0, 0, 1, 1, 2, 2, 2, 2, 1, 1, 0, 0],
        vec![0, 0, 0, 0, 2, 2, 2, 2, 0, 0, 0, 0],
        vec![0, 0, 1, 1, 2, 2, 2, 2, 1, 1, 0, 0],
        vec![0, 0, 0, 0, 2, 2, 2, 2, 0, 0, 0, 0],
        vec![0, 0, 1, 1, 2, 2, 2, 2, 1, 1, 0, 0],
        vec![0, 0, 0, 0, 2, 2, 2, 2, 0, 0, 0, 0],
        vec![0, 0, 1, 1, 2, 2, 2, 2, 1, 1, 0, 0],
        vec![0, 0, 0, 0, 2, 2, 2, 2, 0, 0, 0, 0],
        vec![0, 0, 0, 0, 3, 3, 3, 3, 0, 0, 0, 0],
        vec![0, 0, 0, 0, 3, 3, 3, 3, 0, 0, 0, 0],
    ])
}
