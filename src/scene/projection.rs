use crate::grid::camera::Viewport;
use crate::types::TerminalContract;

/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: f64 = 2.0;

/// Maps scene units onto terminal cells so that `viewport` fits the canvas,
/// centred, with uniform scale (letterboxed like an SVG `viewBox`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub viewport: Viewport,
    scale_x: f64,
    scale_y: f64,
    offset_x: f64,
    offset_y: f64,
    cols: u16,
    rows: u16,
}

impl Projection {
    pub fn fit(viewport: Viewport, canvas: TerminalContract) -> Self {
        let cols = f64::from(canvas.width);
        let rows = f64::from(canvas.height);
        let s = if viewport.width <= 0.0 || viewport.height <= 0.0 {
            0.0
        } else {
            (cols / viewport.width).min(rows * CELL_ASPECT / viewport.height)
        };
        let scale_x = s;
        let scale_y = s / CELL_ASPECT;
        Projection {
            viewport,
            scale_x,
            scale_y,
            offset_x: (cols - viewport.width * scale_x) / 2.0,
            offset_y: (rows - viewport.height * scale_y) / 2.0,
            cols: canvas.width,
            rows: canvas.height,
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Scene point → fractional cell coordinates.
    pub fn to_cell_f(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.offset_x + (x - self.viewport.x) * self.scale_x,
            self.offset_y + (y - self.viewport.y) * self.scale_y,
        )
    }

    /// Scene point → the terminal cell containing it, if on the canvas.
    pub fn to_cell(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        let (cx, cy) = self.to_cell_f(x, y);
        self.clip(cx.floor(), cy.floor())
    }

    pub fn clip(&self, cx: f64, cy: f64) -> Option<(u16, u16)> {
        if cx < 0.0 || cy < 0.0 || cx >= f64::from(self.cols) || cy >= f64::from(self.rows) {
            return None;
        }
        Some((cx as u16, cy as u16))
    }

    /// Centre of a terminal cell → scene point. Used for pointer hit tests.
    pub fn to_scene(&self, col: u16, row: u16) -> (f64, f64) {
        let cx = f64::from(col) + 0.5;
        let cy = f64::from(row) + 0.5;
        let x = if self.scale_x > 0.0 {
            self.viewport.x + (cx - self.offset_x) / self.scale_x
        } else {
            self.viewport.x
        };
        let y = if self.scale_y > 0.0 {
            self.viewport.y + (cy - self.offset_y) / self.scale_y
        } else {
            self.viewport.y
        };
        (x, y)
    }

    /// Scene length along x → number of cells.
    pub fn cells_x(&self, len: f64) -> f64 {
        len * self.scale_x
    }

    pub fn cells_y(&self, len: f64) -> f64 {
        len * self.scale_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(width: u16, height: u16) -> TerminalContract {
        TerminalContract { width, height }
    }

    #[test]
    fn wide_canvas_letterboxes_horizontally() {
        let v = Viewport { x: 0.0, y: 0.0, width: 100.0, height: 100.0 };
        let p = Projection::fit(v, contract(80, 20));
        // 20 rows * 2 / 100 = 0.4 < 80 / 100
        assert!((p.cells_x(100.0) - 40.0).abs() < 1e-9);
        assert!((p.cells_y(100.0) - 20.0).abs() < 1e-9);
        assert_eq!(p.to_cell(0.0, 0.0), Some((20, 0)));
        assert_eq!(p.to_cell(100.0, 100.0), None);
    }

    #[test]
    fn scene_and_cell_round_trip() {
        let v = Viewport { x: -50.0, y: 10.0, width: 200.0, height: 100.0 };
        let p = Projection::fit(v, contract(40, 10));
        let (x, y) = p.to_scene(7, 3);
        assert_eq!(p.to_cell(x, y), Some((7, 3)));
    }
}
