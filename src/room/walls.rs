//! Room wall geometry as a function of the "space" slider `t`.

use crate::scene::perimeter::Segment;

pub const ROOM_WIDTH: f64 = 1200.0;
pub const ROOM_HEIGHT: f64 = 750.0;

const BACK_X: f64 = 490.0;
const BACK_Y: f64 = 270.0;
const BACK_WIDTH: f64 = 420.0;
const BACK_HEIGHT: f64 = 300.0;
const ARM_TOP_Y: f64 = 120.0;
const ARM_BOTTOM_Y: f64 = 730.0;
const FAR_LEFT_X: f64 = 365.0;
const FAR_RIGHT_X: f64 = 1035.0;
const DIAG_TOP_Y: f64 = 100.0;
const DIAG_BOTTOM_Y: f64 = 740.0;

const MAX_T: f64 = 0.9;
const MIN_SHRINK: f64 = 0.35;
const INWARD: f64 = 100.0;
const INNER_INSET: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl WallRect {
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Size and depth of a sprite at a given point in the room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perspective {
    pub scale: f64,
    pub depth: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomGeometry {
    pub t: f64,
    pub back: WallRect,
    /// Inner outline of the back wall.
    pub back_inner: WallRect,
    pub left_far_x: f64,
    pub right_far_x: f64,
    /// Back-wall corners to the far edges: left top, left bottom, right top, right bottom.
    pub arms: [Segment; 4],
    /// Screen corners to the far edges, same order as `arms`.
    pub diagonals: [Segment; 4],
    pub far_edges: [Segment; 2],
}

impl RoomGeometry {
    pub fn at(t: f64) -> Self {
        let t = if t.is_finite() { t.clamp(0.0, MAX_T) } else { 0.0 };
        let shrink = (1.0 - t).max(MIN_SHRINK);
        let width = BACK_WIDTH * shrink;
        let x = BACK_X + (BACK_WIDTH - width) / 2.0;
        let back = WallRect { x, y: BACK_Y, width, height: BACK_HEIGHT };
        let back_inner = WallRect {
            x: x + INNER_INSET,
            y: BACK_Y,
            width: (width - 2.0 * INNER_INSET).max(0.0),
            height: BACK_HEIGHT,
        };

        let lx = FAR_LEFT_X + t * INWARD;
        let rx = FAR_RIGHT_X - t * INWARD;
        let (left, right) = (x, x + width);
        let bottom = BACK_Y + BACK_HEIGHT;
        let seg = |x1, y1, x2, y2| Segment { x1, y1, x2, y2 };

        RoomGeometry {
            t,
            back,
            back_inner,
            left_far_x: lx,
            right_far_x: rx,
            arms: [
                seg(left, BACK_Y, lx, ARM_TOP_Y),
                seg(left, bottom, lx, ARM_BOTTOM_Y),
                seg(right, BACK_Y, rx, ARM_TOP_Y),
                seg(right, bottom, rx, ARM_BOTTOM_Y),
            ],
            diagonals: [
                seg(0.0, 0.0, lx, DIAG_TOP_Y),
                seg(0.0, ROOM_HEIGHT, lx, DIAG_BOTTOM_Y),
                seg(ROOM_WIDTH, 0.0, rx, DIAG_TOP_Y),
                seg(ROOM_WIDTH, ROOM_HEIGHT, rx, DIAG_BOTTOM_Y),
            ],
            far_edges: [
                seg(lx, DIAG_TOP_Y, lx, DIAG_BOTTOM_Y),
                seg(rx, DIAG_TOP_Y, rx, DIAG_BOTTOM_Y),
            ],
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.arms
            .iter()
            .chain(self.diagonals.iter())
            .chain(self.far_edges.iter())
    }

    /// Scale grows and the sprite moves to the front as it gets farther from
    /// the back-wall centre.
    pub fn perspective(&self, x: f64, y: f64) -> Perspective {
        let (cx, cy) = self.back.center();
        let distance = (x - cx).hypot(y - cy);
        let n = (distance / (ROOM_WIDTH * 0.5)).min(1.0);
        Perspective {
            scale: 0.5 + 0.7 * n,
            depth: (100.0 + 900.0 * n).round() as i32,
        }
    }

    /// Floor edge of the right wall, from the back-wall bottom-right corner
    /// to the far edge at arm height.
    pub fn right_floor_edge(&self) -> Segment {
        self.arms[3]
    }

    /// Point at parameter `p` along the right floor edge.
    pub fn right_floor_point(&self, p: f64) -> (f64, f64) {
        let e = self.right_floor_edge();
        (e.x1 + p * (e.x2 - e.x1), e.y1 + p * (e.y2 - e.y1))
    }

    /// Parameter of the projection of `(x, y)` onto the right floor edge.
    pub fn right_floor_param(&self, x: f64, y: f64) -> f64 {
        let e = self.right_floor_edge();
        let (dx, dy) = (e.x2 - e.x1, e.y2 - e.y1);
        let len2 = dx * dx + dy * dy;
        if len2 == 0.0 {
            return 0.0;
        }
        ((x - e.x1) * dx + (y - e.y1) * dy) / len2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_position_matches_base() {
        let g = RoomGeometry::at(0.0);
        assert_eq!(g.back, WallRect { x: 490.0, y: 270.0, width: 420.0, height: 300.0 });
        assert_eq!(g.back_inner.width, 390.0);
        assert_eq!(g.left_far_x, 365.0);
        assert_eq!(g.right_far_x, 1035.0);
        assert_eq!(g.arms[0], Segment { x1: 490.0, y1: 270.0, x2: 365.0, y2: 120.0 });
        assert_eq!(g.diagonals[3], Segment { x1: 1200.0, y1: 750.0, x2: 1035.0, y2: 740.0 });
    }

    #[test]
    fn shrink_bottoms_out_and_t_is_clamped() {
        let g = RoomGeometry::at(0.9);
        assert!((g.back.width - 0.35 * 420.0).abs() < 1e-9);
        assert!((g.back.center().0 - 700.0).abs() < 1e-9);
        assert_eq!(RoomGeometry::at(5.0), g);
        assert_eq!(RoomGeometry::at(-1.0), RoomGeometry::at(0.0));
    }

    #[test]
    fn far_edges_move_inward() {
        let g = RoomGeometry::at(0.5);
        assert!((g.left_far_x - 415.0).abs() < 1e-9);
        assert!((g.right_far_x - 985.0).abs() < 1e-9);
        assert_eq!(g.segments().count(), 10);
    }

    #[test]
    fn perspective_grows_with_distance() {
        let g = RoomGeometry::at(0.0);
        let near = g.perspective(700.0, 420.0);
        assert_eq!(near, Perspective { scale: 0.5, depth: 100 });
        let far = g.perspective(0.0, 750.0);
        assert!((far.scale - 1.2).abs() < 1e-9);
        assert_eq!(far.depth, 1000);
    }

    #[test]
    fn floor_param_inverts_floor_point() {
        let g = RoomGeometry::at(0.3);
        let (x, y) = g.right_floor_point(0.08);
        assert!((g.right_floor_param(x, y) - 0.08).abs() < 1e-9);
    }
}
