use crate::types::{DrawOp, Style};

use super::super::projection::Projection;
use super::Resolve;

/// A single glyph anchored at a scene point: trail dots, markers, icons.
#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    pub x: f64,
    pub y: f64,
    pub ch: char,
    pub style: Style,
    pub z_order: i32,
}

impl Resolve for Dot {
    fn resolve(&self, proj: &Projection, ops: &mut Vec<DrawOp>) {
        if let Some((x, y)) = proj.to_cell(self.x, self.y) {
            ops.push(DrawOp {
                x,
                y,
                ch: self.ch,
                style: self.style.clone(),
                z_order: self.z_order,
            });
        }
    }
}
