use crate::types::{DrawOp, Style};

use super::super::projection::Projection;
use super::Resolve;

/// Single-line text centred on a scene point. Text does not scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub style: Style,
    pub z_order: i32,
}

impl Resolve for Label {
    fn resolve(&self, proj: &Projection, ops: &mut Vec<DrawOp>) {
        let (cx, cy) = proj.to_cell_f(self.x, self.y);
        let len = self.text.chars().count() as f64;
        let start = (cx - len / 2.0).round();
        let row = cy.floor();
        for (i, ch) in self.text.chars().enumerate() {
            if let Some((x, y)) = proj.clip(start + i as f64, row) {
                ops.push(DrawOp {
                    x,
                    y,
                    ch,
                    style: self.style.clone(),
                    z_order: self.z_order,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::camera::Viewport;
    use crate::types::TerminalContract;

    #[test]
    fn label_is_centred_and_clipped() {
        let proj = Projection::fit(
            Viewport { x: 0.0, y: 0.0, width: 10.0, height: 10.0 },
            TerminalContract { width: 10, height: 5 },
        );
        let label = Label {
            x: 5.0,
            y: 5.0,
            text: "abcd".into(),
            style: Style::default(),
            z_order: 0,
        };
        let mut ops = Vec::new();
        label.resolve(&proj, &mut ops);
        let xs: Vec<u16> = ops.iter().map(|op| op.x).collect();
        assert_eq!(xs, vec![3, 4, 5, 6]);

        let edge = Label { x: 0.0, ..label };
        let mut ops = Vec::new();
        edge.resolve(&proj, &mut ops);
        assert_eq!(ops.len(), 2);
    }
}
