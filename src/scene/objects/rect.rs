use crate::types::{Color, DrawOp, Style};

use super::super::projection::Projection;
use super::Resolve;

/// Axis-aligned rectangle in scene units, optionally filled and outlined.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub z_order: i32,
}

impl Rect {
    /// Terminal cell span `[start, end)` whose centres fall inside the rect.
    /// A rect narrower than one cell still covers the cell holding its centre.
    fn span(start: f64, end: f64) -> (i64, i64) {
        let a = (start - 0.5).ceil() as i64;
        let b = (end - 0.5).ceil() as i64;
        if b > a {
            (a, b)
        } else {
            let mid = ((start + end) / 2.0).floor() as i64;
            (mid, mid + 1)
        }
    }
}

impl Resolve for Rect {
    fn resolve(&self, proj: &Projection, ops: &mut Vec<DrawOp>) {
        if self.fill.is_none() && self.stroke.is_none() {
            return;
        }
        let (x0, y0) = proj.to_cell_f(self.x, self.y);
        let (x1, y1) = proj.to_cell_f(self.x + self.width, self.y + self.height);
        let (cx0, cx1) = Self::span(x0, x1);
        let (cy0, cy1) = Self::span(y0, y1);
        let z = self.z_order;

        for cy in cy0..cy1 {
            for cx in cx0..cx1 {
                let Some((x, y)) = proj.clip(cx as f64, cy as f64) else {
                    continue;
                };
                let edge_h = cy == cy0 || cy == cy1 - 1;
                let edge_v = cx == cx0 || cx == cx1 - 1;
                let border = self.stroke.as_ref().filter(|_| edge_h || edge_v);
                let ch = match border {
                    None => ' ',
                    Some(_) => match (cx == cx0, cx == cx1 - 1, cy == cy0, cy == cy1 - 1) {
                        (true, _, true, _) => '┌',
                        (_, true, true, _) => '┐',
                        (true, _, _, true) => '└',
                        (_, true, _, true) => '┘',
                        (_, _, true, _) | (_, _, _, true) => '─',
                        _ => '│',
                    },
                };
                if self.fill.is_none() && border.is_none() {
                    continue;
                }
                ops.push(DrawOp {
                    x,
                    y,
                    ch,
                    style: Style {
                        fg: border.cloned(),
                        bg: self.fill.clone(),
                        ..Style::default()
                    },
                    z_order: z,
                });
            }
        }
    }
}
