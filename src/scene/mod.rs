//! Scene layer: shapes in scene units, projected onto terminal cells.

pub mod floor;
pub mod objects;
pub mod perimeter;
pub mod projection;
pub mod room;

use crate::types::DrawOp;
use objects::{Resolve, Shape};
use projection::Projection;

/// Resolve every shape through `proj` into draw ops.
pub fn resolve_all<'a>(shapes: impl IntoIterator<Item = &'a Shape>, proj: &Projection) -> Vec<DrawOp> {
    let mut ops = Vec::new();
    for shape in shapes {
        shape.resolve(proj, &mut ops);
    }
    ops
}
