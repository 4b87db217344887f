//! Renderer: the deterministic rasterizer.
//!
//! Takes draw ops (in-memory, from the scene layer) and produces cell grids,
//! then frames: a full frame first, cell diffs after that.
//!
//! Rasterizing is pure. Given the same ops it always produces the same grid.
//! The only state is the previous grid kept by `FrameSequencer` for diffing.

use crate::types::{Cell, CellChange, DrawOp, Frame, TerminalContract};

pub type Grid = Vec<Vec<Cell>>;

pub struct Renderer;

impl Renderer {
    /// Rasterize draw ops onto a fixed-size cell grid.
    ///
    /// Ops are sorted by z-order (stable, so equal z keeps push order) and
    /// higher z paints over lower. An op without a background keeps the
    /// background already painted under it.
    pub fn rasterize(ops: &[DrawOp], contract: &TerminalContract) -> Grid {
        let w = contract.width as usize;
        let h = contract.height as usize;
        let mut grid = vec![vec![Cell::default(); w]; h];

        let mut ops: Vec<_> = ops.iter().collect();
        ops.sort_by_key(|op| op.z_order);

        for op in ops {
            let x = op.x as usize;
            let y = op.y as usize;
            if x < w && y < h {
                let under = grid[y][x].style.bg;
                let mut style = op.style.clone();
                if style.bg.is_none() {
                    style.bg = under;
                }
                grid[y][x] = Cell { ch: op.ch, style };
            }
        }

        grid
    }

    /// Compute a cell-level diff between two grids.
    pub fn diff(prev: &[Vec<Cell>], next: &[Vec<Cell>]) -> Vec<CellChange> {
        let mut changes = Vec::new();
        for (y, (prev_row, next_row)) in prev.iter().zip(next.iter()).enumerate() {
            for (x, (prev_cell, next_cell)) in prev_row.iter().zip(next_row.iter()).enumerate() {
                if prev_cell != next_cell {
                    changes.push(CellChange {
                        x: x as u16,
                        y: y as u16,
                        cell: next_cell.clone(),
                    });
                }
            }
        }
        changes
    }
}

/// Turns successive grids into frames. The first frame, and any frame after
/// a size change, is full; the rest are diffs.
#[derive(Debug, Default)]
pub struct FrameSequencer {
    prev: Option<Grid>,
}

impl FrameSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, grid: Grid) -> Frame {
        let frame = match &self.prev {
            Some(prev) if same_shape(prev, &grid) => Frame::Diff {
                changes: Renderer::diff(prev, &grid),
            },
            _ => Frame::Full {
                cells: grid.clone(),
            },
        };
        self.prev = Some(grid);
        frame
    }

    /// Forget the previous grid so the next frame is full.
    pub fn invalidate(&mut self) {
        self.prev = None;
    }
}

fn same_shape(a: &Grid, b: &Grid) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(ra, rb)| ra.len() == rb.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Style};

    fn op(x: u16, y: u16, ch: char, style: Style, z_order: i32) -> DrawOp {
        DrawOp { x, y, ch, style, z_order }
    }

    const SMALL: TerminalContract = TerminalContract { width: 4, height: 2 };

    #[test]
    fn higher_z_wins_regardless_of_order() {
        let ops = vec![
            op(1, 1, 'b', Style::default(), 5),
            op(1, 1, 'a', Style::default(), 1),
        ];
        let grid = Renderer::rasterize(&ops, &SMALL);
        assert_eq!(grid[1][1].ch, 'b');
    }

    #[test]
    fn glyph_keeps_background_underneath() {
        let ops = vec![
            op(0, 0, ' ', Style::bg(Color::WHITE), 10),
            op(0, 0, '●', Style::fg(Color::BLACK), 50),
        ];
        let grid = Renderer::rasterize(&ops, &SMALL);
        assert_eq!(grid[0][0].ch, '●');
        assert_eq!(grid[0][0].style.bg, Some(Color::WHITE));
        assert_eq!(grid[0][0].style.fg, Some(Color::BLACK));
    }

    #[test]
    fn out_of_bounds_ops_are_dropped() {
        let ops = vec![op(9, 9, 'x', Style::default(), 0)];
        let grid = Renderer::rasterize(&ops, &SMALL);
        assert!(grid.iter().flatten().all(|c| *c == Cell::default()));
    }

    #[test]
    fn sequencer_emits_full_then_diffs() {
        let mut seq = FrameSequencer::new();
        let a = Renderer::rasterize(&[], &SMALL);
        let b = Renderer::rasterize(&[op(2, 0, 'x', Style::default(), 0)], &SMALL);
        assert!(matches!(seq.push(a), Frame::Full { .. }));
        match seq.push(b.clone()) {
            Frame::Diff { changes } => {
                assert_eq!(changes.len(), 1);
                assert_eq!((changes[0].x, changes[0].y), (2, 0));
            }
            other => panic!("expected diff, got {other:?}"),
        }
        match seq.push(b) {
            Frame::Diff { changes } => assert!(changes.is_empty()),
            other => panic!("expected diff, got {other:?}"),
        }
        let bigger = Renderer::rasterize(&[], &TerminalContract { width: 5, height: 2 });
        assert!(matches!(seq.push(bigger), Frame::Full { .. }));
    }
}
