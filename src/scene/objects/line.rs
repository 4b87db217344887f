use crate::types::{Color, DrawOp, Style};

use super::super::projection::Projection;
use super::Resolve;

/// Straight segment between two scene points.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: Color,
    /// Bold strokes render heavier box-drawing glyphs.
    pub heavy: bool,
    pub dim: bool,
    pub z_order: i32,
}

impl Line {
    fn glyph(&self, dx: f64, dy: f64) -> char {
        let (adx, ady) = (dx.abs(), dy.abs());
        if ady <= adx * 0.25 {
            if self.heavy { '━' } else { '─' }
        } else if adx <= ady * 0.25 {
            if self.heavy { '┃' } else { '│' }
        } else if (dx > 0.0) == (dy > 0.0) {
            '╲'
        } else {
            '╱'
        }
    }
}

impl Resolve for Line {
    fn resolve(&self, proj: &Projection, ops: &mut Vec<DrawOp>) {
        let (ax, ay) = proj.to_cell_f(self.x1, self.y1);
        let (bx, by) = proj.to_cell_f(self.x2, self.y2);
        let (dx, dy) = (bx - ax, by - ay);
        let ch = self.glyph(dx, dy);
        let style = Style {
            fg: Some(self.color.clone()),
            dim: self.dim,
            ..Style::default()
        };

        let Some((t0, t1)) = clip_to_canvas(ax, ay, dx, dy, proj) else {
            return;
        };

        // Walk the visible part in cell space, one sample per cell step.
        let span = (dx.abs().max(dy.abs()) * (t1 - t0)).ceil().max(1.0);
        let steps = span as usize;
        let mut last = None;
        for i in 0..=steps {
            let t = t0 + (t1 - t0) * i as f64 / steps as f64;
            let cell = proj.clip((ax + dx * t).floor(), (ay + dy * t).floor());
            let Some((x, y)) = cell else { continue };
            if last == Some((x, y)) {
                continue;
            }
            last = Some((x, y));
            ops.push(DrawOp {
                x,
                y,
                ch,
                style: style.clone(),
                z_order: self.z_order,
            });
        }
    }
}

/// Liang–Barsky: parameter range of `a + t·d` inside the canvas.
fn clip_to_canvas(ax: f64, ay: f64, dx: f64, dy: f64, proj: &Projection) -> Option<(f64, f64)> {
    let (w, h) = (f64::from(proj.cols()), f64::from(proj.rows()));
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;
    for (p, q) in [(-dx, ax), (dx, w - ax), (-dy, ay), (dy, h - ay)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }
    (t0 <= t1).then_some((t0, t1))
}
