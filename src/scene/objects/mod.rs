//! Shape types and their resolve implementations.
//!
//! Each shape lives in its own module with its struct definition and
//! `Resolve` implementation side by side. Shapes are positioned in scene
//! units; resolving projects them onto terminal cells.

mod dot;
mod label;
mod line;
mod rect;

pub use dot::Dot;
pub use label::Label;
pub use line::Line;
pub use rect::Rect;

use crate::types::DrawOp;

use super::projection::Projection;

/// Resolve a shape through a projection into concrete `DrawOp`s.
pub trait Resolve {
    fn resolve(&self, proj: &Projection, ops: &mut Vec<DrawOp>);
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect(Rect),
    Line(Line),
    Dot(Dot),
    Label(Label),
}

impl Resolve for Shape {
    fn resolve(&self, proj: &Projection, ops: &mut Vec<DrawOp>) {
        match self {
            Shape::Rect(o) => o.resolve(proj, ops),
            Shape::Line(o) => o.resolve(proj, ops),
            Shape::Dot(o) => o.resolve(proj, ops),
            Shape::Label(o) => o.resolve(proj, ops),
        }
    }
}

impl From<Rect> for Shape {
    fn from(o: Rect) -> Self {
        Shape::Rect(o)
    }
}

impl From<Line> for Shape {
    fn from(o: Line) -> Self {
        Shape::Line(o)
    }
}

impl From<Dot> for Shape {
    fn from(o: Dot) -> Self {
        Shape::Dot(o)
    }
}

impl From<Label> for Shape {
    fn from(o: Label) -> Self {
        Shape::Label(o)
    }
}
