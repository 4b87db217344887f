//! Shapes for the room screen.

use crate::grid::camera::Viewport;
use crate::room::RoomState;
use crate::room::sprites::{SPRITE_ASPECT, SpriteKind};
use crate::room::walls::{ROOM_HEIGHT, ROOM_WIDTH, WallRect};
use crate::types::{Color, NamedColor, Style};

use super::objects::{Label, Line, Rect, Shape};

const Z_WALLS: i32 = 0;
const WALL_COLOR: Color = Color::WHITE;
const INNER_COLOR: Color = Color::Rgb { r: 140, g: 140, b: 140 };

pub fn room_viewport() -> Viewport {
    Viewport {
        x: 0.0,
        y: 0.0,
        width: ROOM_WIDTH,
        height: ROOM_HEIGHT,
    }
}

fn outline(r: &WallRect, color: Color) -> Shape {
    Rect {
        x: r.x,
        y: r.y,
        width: r.width,
        height: r.height,
        fill: None,
        stroke: Some(color),
        z_order: Z_WALLS,
    }
    .into()
}

fn boxed(
    shapes: &mut Vec<Shape>,
    (cx, cy): (f64, f64),
    width: f64,
    text: &str,
    color: Color,
    z_order: i32,
) {
    let height = width * SPRITE_ASPECT;
    shapes.push(
        Rect {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
            fill: Some(Color::BLACK),
            stroke: Some(color),
            z_order,
        }
        .into(),
    );
    shapes.push(
        Label {
            x: cx,
            y: cy,
            text: text.to_string(),
            style: Style::fg(color),
            z_order,
        }
        .into(),
    );
}

/// Walls back to front, then sprites and the chair at their depth.
pub fn room_shapes(room: &RoomState) -> Vec<Shape> {
    let geo = room.geometry();
    let mut shapes = vec![outline(&geo.back, WALL_COLOR)];
    if geo.back_inner.width > 0.0 {
        shapes.push(outline(&geo.back_inner, INNER_COLOR));
    }
    for seg in geo.segments() {
        shapes.push(
            Line {
                x1: seg.x1,
                y1: seg.y1,
                x2: seg.x2,
                y2: seg.y2,
                color: WALL_COLOR,
                heavy: false,
                dim: false,
                z_order: Z_WALLS,
            }
            .into(),
        );
    }

    for sprite in room.sprites().iter().filter(|s| s.is_visible()) {
        let color = match sprite.spec().kind {
            SpriteKind::Free => Color::Named(NamedColor::Green),
            SpriteKind::Sign { .. } => Color::Named(NamedColor::Cyan),
            SpriteKind::Ladder => Color::Named(NamedColor::Yellow),
            SpriteKind::Light => Color::Named(NamedColor::White),
        };
        boxed(
            &mut shapes,
            sprite.center(geo),
            sprite.width(),
            &sprite.spec().label,
            color,
            sprite.depth(),
        );
    }

    let chair = room.chair();
    boxed(
        &mut shapes,
        chair.center(),
        chair.width(),
        &chair.current().name,
        Color::Named(NamedColor::Magenta),
        chair.depth(),
    );
    shapes
}
