//! Décor sprites: revealed by the stuffiness slider, dragged around the room.

use serde::{Deserialize, Serialize};

use super::walls::{ROOM_HEIGHT, ROOM_WIDTH, RoomGeometry};

/// Ladder parameter along the right floor edge when it first appears.
pub const LADDER_INITIAL_PARAM: f64 = 0.08;
pub const LADDER_MAX_PARAM: f64 = 0.12;
/// Signs and lights sit behind everything placed on the floor.
const WALL_DEPTH: i32 = 50;
/// Sprite boxes are drawn this much shorter than they are wide.
pub const SPRITE_ASPECT: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpriteKind {
    /// Moves anywhere and rescales with depth.
    Free,
    /// Pinned to a side wall, keeps its size.
    Sign { wall: WallSide },
    /// Slides along the right wall's floor edge.
    Ladder,
    /// Fixed in place.
    Light,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteSpec {
    pub name: String,
    pub label: String,
    pub kind: SpriteKind,
    /// Minimum stuffiness at which the sprite is shown.
    pub threshold: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    /// Keeps `x` at this fraction of the distance from the screen edge to
    /// the nearest side wall's far edge as the room changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_fraction: Option<(WallSide, f64)>,
}

fn spec(
    name: &str,
    label: &str,
    kind: SpriteKind,
    threshold: f64,
    (x, y): (f64, f64),
    width: f64,
    wall_fraction: Option<(WallSide, f64)>,
) -> SpriteSpec {
    SpriteSpec {
        name: name.into(),
        label: label.into(),
        kind,
        threshold,
        x,
        y,
        width,
        wall_fraction,
    }
}

pub fn default_sprites() -> Vec<SpriteSpec> {
    use SpriteKind::*;
    use WallSide::*;
    vec![
        spec("light", "lamp", Light, 0.05, (700.0, 60.0), 90.0, None),
        spec("sign1", "EXIT", Sign { wall: Left }, 0.15, (0.0, 300.0), 80.0, Some((Left, 0.5))),
        spec("sign2", "NO SIT", Sign { wall: Left }, 0.3, (0.0, 420.0), 90.0, Some((Left, 0.3))),
        spec("ladder", "ladder", Ladder, 0.4, (0.0, 0.0), 70.0, None),
        spec("sign3", "QUIET", Sign { wall: Right }, 0.5, (0.0, 300.0), 80.0, Some((Right, 0.5))),
        spec("stool1", "stool", Free, 0.6, (0.0, 640.0), 110.0, Some((Right, 0.4))),
        spec("sign4", "ROOM 4", Sign { wall: Right }, 0.7, (0.0, 440.0), 90.0, Some((Right, 0.2))),
        spec("plant", "plant", Free, 0.85, (260.0, 620.0), 120.0, None),
    ]
}

fn ladder_scale(param: f64) -> f64 {
    0.7 + 0.6 * param
}

/// State captured when the pointer goes down on a sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grab {
    pub press_x: f64,
    pub press_y: f64,
    offset: (f64, f64),
    param: f64,
}

#[derive(Debug, Clone)]
pub struct Sprite {
    spec: SpriteSpec,
    visible: bool,
    revealed: bool,
    offset: (f64, f64),
    base_width: Option<f64>,
    width: f64,
    depth: i32,
    ladder_param: f64,
}

impl Sprite {
    pub fn new(spec: SpriteSpec) -> Self {
        let width = spec.width;
        Sprite {
            spec,
            visible: false,
            revealed: false,
            offset: (0.0, 0.0),
            base_width: None,
            width,
            depth: WALL_DEPTH,
            ladder_param: LADDER_INITIAL_PARAM,
        }
    }

    pub fn spec(&self) -> &SpriteSpec {
        &self.spec
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn offset(&self) -> (f64, f64) {
        self.offset
    }

    pub fn ladder_param(&self) -> f64 {
        self.ladder_param
    }

    /// Resting position before any drag.
    pub fn anchor(&self, geo: &RoomGeometry) -> (f64, f64) {
        if self.spec.kind == SpriteKind::Ladder {
            return geo.right_floor_point(self.ladder_param);
        }
        let x = match self.spec.wall_fraction {
            Some((WallSide::Left, f)) => (geo.left_far_x * f).max(0.0),
            Some((WallSide::Right, f)) => ROOM_WIDTH - ((ROOM_WIDTH - geo.right_far_x) * f).max(0.0),
            None => self.spec.x,
        };
        (x, self.spec.y)
    }

    pub fn center(&self, geo: &RoomGeometry) -> (f64, f64) {
        let (x, y) = self.anchor(geo);
        if self.spec.kind == SpriteKind::Ladder {
            return (x, y);
        }
        (x + self.offset.0, y + self.offset.1)
    }

    pub fn contains(&self, geo: &RoomGeometry, x: f64, y: f64) -> bool {
        if !self.visible {
            return false;
        }
        let (cx, cy) = self.center(geo);
        (x - cx).abs() <= self.width / 2.0 && (y - cy).abs() <= self.width * SPRITE_ASPECT / 2.0
    }

    /// Show the sprite, placing it the first time it appears.
    pub fn show(&mut self, geo: &RoomGeometry) {
        if !self.revealed {
            self.revealed = true;
            self.place(geo);
        }
        self.visible = true;
    }

    /// Hide the sprite and forget its placement.
    pub fn hide(&mut self) {
        self.visible = false;
        self.revealed = false;
        self.offset = (0.0, 0.0);
        if self.spec.kind == SpriteKind::Ladder {
            self.base_width = None;
            self.ladder_param = LADDER_INITIAL_PARAM;
        }
    }

    fn place(&mut self, geo: &RoomGeometry) {
        self.offset = (0.0, 0.0);
        self.width = self.spec.width;
        match self.spec.kind {
            SpriteKind::Ladder => {
                self.ladder_param = LADDER_INITIAL_PARAM;
                self.base_width = Some(self.spec.width / ladder_scale(LADDER_INITIAL_PARAM));
                let (x, y) = self.center(geo);
                self.depth = geo.perspective(x, y).depth;
            }
            SpriteKind::Free => {
                let (x, y) = self.anchor(geo);
                let p = geo.perspective(x, y);
                if self.base_width.is_none() {
                    self.base_width = Some(self.spec.width / p.scale);
                }
                self.depth = p.depth;
            }
            SpriteKind::Sign { .. } | SpriteKind::Light => self.depth = WALL_DEPTH,
        }
        log::debug!("sprite {} placed at depth {}", self.spec.name, self.depth);
    }

    /// Re-snap the ladder onto the right wall after the room changed shape.
    pub fn follow_room(&mut self, geo: &RoomGeometry) {
        if self.spec.kind != SpriteKind::Ladder || !self.visible {
            return;
        }
        if let Some(base) = self.base_width {
            self.width = base * ladder_scale(self.ladder_param);
        }
        let (x, y) = self.center(geo);
        self.depth = geo.perspective(x, y).depth;
    }

    /// Start a drag. Lights and hidden sprites cannot be grabbed.
    pub fn grab(&self, x: f64, y: f64) -> Option<Grab> {
        if !self.visible || self.spec.kind == SpriteKind::Light {
            return None;
        }
        Some(Grab {
            press_x: x,
            press_y: y,
            offset: self.offset,
            param: self.ladder_param,
        })
    }

    pub fn drag_to(&mut self, geo: &RoomGeometry, grab: &Grab, x: f64, y: f64) {
        let (dx, dy) = (x - grab.press_x, y - grab.press_y);
        match self.spec.kind {
            SpriteKind::Light => {}
            SpriteKind::Free => {
                self.offset = (grab.offset.0 + dx, grab.offset.1 + dy);
                let (cx, cy) = self.center(geo);
                let p = geo.perspective(cx, cy);
                if let Some(base) = self.base_width {
                    self.width = base * p.scale;
                }
                self.depth = p.depth;
            }
            SpriteKind::Sign { wall } => {
                let (ax, ay) = self.anchor(geo);
                let (min_x, max_x) = match wall {
                    WallSide::Left => (0.0, geo.left_far_x),
                    WallSide::Right => (geo.right_far_x, ROOM_WIDTH),
                };
                let cx = (ax + grab.offset.0 + dx).clamp(min_x, max_x);
                let cy = (ay + grab.offset.1 + dy).clamp(0.0, ROOM_HEIGHT);
                self.offset = (cx - ax, cy - ay);
            }
            SpriteKind::Ladder => {
                // Vertical pointer motion slides the ladder along the wall.
                let edge = geo.right_floor_edge();
                let (ex, ey) = (edge.x2 - edge.x1, edge.y2 - edge.y1);
                let len = ex.hypot(ey);
                if len == 0.0 {
                    return;
                }
                let (sx, sy) = geo.right_floor_point(grab.param);
                let (tx, ty) = (sx + ex / len * dy, sy + ey / len * dy);
                self.ladder_param = geo.right_floor_param(tx, ty).clamp(0.0, LADDER_MAX_PARAM);
                self.follow_room(geo);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(name: &str) -> Sprite {
        let spec = default_sprites().into_iter().find(|s| s.name == name).unwrap();
        Sprite::new(spec)
    }

    #[test]
    fn ladder_appears_snapped_to_right_wall() {
        let geo = RoomGeometry::at(0.0);
        let mut ladder = sprite("ladder");
        ladder.show(&geo);
        let expected = geo.right_floor_point(LADDER_INITIAL_PARAM);
        assert_eq!(ladder.center(&geo), expected);
        assert!((ladder.width() - 70.0).abs() < 1e-9);
    }

    #[test]
    fn ladder_drag_is_clamped_to_wall_segment() {
        let geo = RoomGeometry::at(0.0);
        let mut ladder = sprite("ladder");
        ladder.show(&geo);
        let grab = ladder.grab(0.0, 0.0).unwrap();
        ladder.drag_to(&geo, &grab, 0.0, 10_000.0);
        assert_eq!(ladder.ladder_param(), LADDER_MAX_PARAM);
        ladder.drag_to(&geo, &grab, 0.0, -10_000.0);
        assert_eq!(ladder.ladder_param(), 0.0);
        let (x, y) = ladder.center(&geo);
        assert!((geo.right_floor_param(x, y)).abs() < 1e-9);
    }

    #[test]
    fn sign_stays_on_its_wall() {
        let geo = RoomGeometry::at(0.2);
        let mut sign = sprite("sign1");
        sign.show(&geo);
        let grab = sign.grab(10.0, 10.0).unwrap();
        sign.drag_to(&geo, &grab, 5_000.0, -5_000.0);
        let (x, y) = sign.center(&geo);
        assert_eq!(x, geo.left_far_x);
        assert_eq!(y, 0.0);
        assert!((sign.width() - 80.0).abs() < 1e-9);

        let mut right = sprite("sign3");
        right.show(&geo);
        let grab = right.grab(0.0, 0.0).unwrap();
        right.drag_to(&geo, &grab, -5_000.0, 5_000.0);
        assert_eq!(right.center(&geo), (geo.right_far_x, ROOM_HEIGHT));
    }

    #[test]
    fn lights_cannot_be_grabbed() {
        let geo = RoomGeometry::at(0.0);
        let mut light = sprite("light");
        assert!(light.grab(0.0, 0.0).is_none());
        light.show(&geo);
        assert!(light.grab(0.0, 0.0).is_none());
    }

    #[test]
    fn free_sprite_rescales_with_depth() {
        let geo = RoomGeometry::at(0.0);
        let mut plant = sprite("plant");
        plant.show(&geo);
        let before = plant.width();
        let grab = plant.grab(0.0, 0.0).unwrap();
        // Toward the back-wall centre: smaller and further back.
        let (ax, ay) = plant.anchor(&geo);
        plant.drag_to(&geo, &grab, 700.0 - ax, 420.0 - ay);
        assert!(plant.width() < before);
        assert_eq!(plant.depth(), 100);
    }

    #[test]
    fn hiding_resets_offsets() {
        let geo = RoomGeometry::at(0.0);
        let mut plant = sprite("plant");
        plant.show(&geo);
        let grab = plant.grab(0.0, 0.0).unwrap();
        plant.drag_to(&geo, &grab, 40.0, 40.0);
        plant.hide();
        assert!(!plant.is_visible());
        plant.show(&geo);
        assert_eq!(plant.offset(), (0.0, 0.0));
    }

    #[test]
    fn wall_fraction_tracks_far_edge() {
        let mut sign = sprite("sign1");
        let geo = RoomGeometry::at(0.0);
        sign.show(&geo);
        assert!((sign.anchor(&geo).0 - 182.5).abs() < 1e-9);
        let moved = RoomGeometry::at(0.5);
        assert!((sign.anchor(&moved).0 - 207.5).abs() < 1e-9);
    }
}
