//! Floor renderer: turns a `GridSession` into maze shapes.
//!
//! The scene is retained between moves. A full rebuild happens on the first
//! build and whenever the hidden-room occupancy toggle flips (every hidden
//! room cell changes colour at once); ordinary moves only swap the player
//! marker and add a trail dot.

use std::collections::BTreeMap;

use crate::grid::cell::{Fill, HIDDEN_ROOM, VOID, WALL};
use crate::grid::floor::SceneMetrics;
use crate::grid::{GridSession, MoveOutcome, Position};
use crate::types::{Color, Style};

use super::objects::{Dot, Line, Rect, Shape};
use super::perimeter;

/// Background grid lines extend this many cells past the plan on each side.
const GRID_EXTENSION_CELLS: i64 = 50;
/// ...and each line runs this far past the scene edges.
const GRID_EXTENSION: f64 = 2000.0;

const Z_GRID: i32 = 0;
const Z_CELL: i32 = 10;
const Z_WALL_ACCENT: i32 = 11;
const Z_PERIMETER: i32 = 20;
const Z_TRAIL: i32 = 30;
const Z_LANDMARK: i32 = 40;
const Z_PLAYER: i32 = 50;

const GRID_COLOR: Color = Color::Rgb { r: 77, g: 77, b: 77 };
const GOAL_COLOR: Color = Color::Rgb { r: 255, g: 255, b: 0 };

/// How the scene reacted to a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderUpdate {
    Rebuilt,
    Incremental { trail_dot_added: bool },
}

#[derive(Debug, Clone)]
pub struct FloorScene {
    base: Vec<Shape>,
    /// Trail dots keyed by cell; never holds the player's own cell.
    trail: BTreeMap<Position, Shape>,
    player: Shape,
    occupancy: bool,
    rebuilds: usize,
}

impl FloorScene {
    pub fn build(session: &mut GridSession) -> Self {
        let mut scene = FloorScene {
            base: Vec::new(),
            trail: BTreeMap::new(),
            player: player_marker(&session.metrics(), session.position(), false),
            occupancy: false,
            rebuilds: 0,
        };
        scene.rebuild(session);
        scene
    }

    /// Update after an accepted move or reset.
    pub fn apply(&mut self, session: &mut GridSession, outcome: &MoveOutcome) -> RenderUpdate {
        if session.occupancy() != self.occupancy {
            self.rebuild(session);
            return RenderUpdate::Rebuilt;
        }
        let metrics = session.metrics();
        let from = outcome.step.from;
        let mut trail_dot_added = false;
        if from != session.position() && session.plan().get(from) != Some(HIDDEN_ROOM) {
            trail_dot_added = self.add_trail_dot(&metrics, from);
        }
        self.trail.remove(&session.position());
        self.player = player_marker(&metrics, session.position(), self.occupancy);
        RenderUpdate::Incremental { trail_dot_added }
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.base
            .iter()
            .chain(self.trail.values())
            .chain(std::iter::once(&self.player))
    }

    pub fn trail_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.trail.keys().copied()
    }

    pub fn occupancy(&self) -> bool {
        self.occupancy
    }

    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    fn rebuild(&mut self, session: &mut GridSession) {
        let metrics = session.metrics();
        let occupancy = session.occupancy();
        let position = session.position();
        log::debug!("rebuilding floor scene (hidden room occupied: {occupancy})");

        self.occupancy = occupancy;
        self.rebuilds += 1;
        self.base.clear();
        self.trail.clear();

        push_background_grid(&mut self.base, &metrics);
        push_cells(&mut self.base, session, &metrics, occupancy);

        for seg in perimeter::trace(session.plan(), &metrics, occupancy) {
            self.base.push(
                Line {
                    x1: seg.x1,
                    y1: seg.y1,
                    x2: seg.x2,
                    y2: seg.y2,
                    color: Color::WHITE,
                    heavy: true,
                    dim: false,
                    z_order: Z_PERIMETER,
                }
                .into(),
            );
        }

        let trail: Vec<Position> = session
            .visited()
            .iter()
            .copied()
            .filter(|&p| p != position && session.plan().get(p) != Some(HIDDEN_ROOM))
            .collect();
        for p in trail {
            self.add_trail_dot(&metrics, p);
        }

        push_landmarks(&mut self.base, session, &metrics, occupancy);
        self.player = player_marker(&metrics, position, occupancy);
    }

    fn add_trail_dot(&mut self, metrics: &SceneMetrics, pos: Position) -> bool {
        if self.trail.contains_key(&pos) {
            return false;
        }
        let (x, y) = metrics.cell_center(pos);
        self.trail.insert(
            pos,
            Dot {
                x,
                y,
                ch: '·',
                style: Style::fg(Color::WHITE),
                z_order: Z_TRAIL,
            }
            .into(),
        );
        true
    }
}

fn push_background_grid(shapes: &mut Vec<Shape>, m: &SceneMetrics) {
    let line = |x1, y1, x2, y2| -> Shape {
        Line {
            x1,
            y1,
            x2,
            y2,
            color: GRID_COLOR,
            heavy: false,
            dim: true,
            z_order: Z_GRID,
        }
        .into()
    };
    let rows = m.rows as i64;
    let cols = m.cols as i64;
    for row in -GRID_EXTENSION_CELLS..=rows + GRID_EXTENSION_CELLS {
        let y = row as f64 * m.cell_height;
        shapes.push(line(-GRID_EXTENSION, y, m.width + GRID_EXTENSION, y));
    }
    for col in -GRID_EXTENSION_CELLS..=cols + GRID_EXTENSION_CELLS {
        let x = col as f64 * m.cell_width;
        shapes.push(line(x, -GRID_EXTENSION, x, m.height + GRID_EXTENSION));
    }
}

fn push_cells(shapes: &mut Vec<Shape>, session: &mut GridSession, m: &SceneMetrics, occupancy: bool) {
    let cells: Vec<(Position, i32)> = session.plan().cells().collect();
    let classifier = session.classifier_mut();
    for (pos, code) in cells {
        let (x, y) = m.cell_origin(pos);
        let rect = |fill: Option<Color>, stroke: Option<Color>| -> Shape {
            Rect {
                x,
                y,
                width: m.cell_width,
                height: m.cell_height,
                fill,
                stroke,
                z_order: Z_CELL,
            }
            .into()
        };
        match code {
            VOID => {}
            HIDDEN_ROOM => {
                let fill = if occupancy { Color::WHITE } else { Color::BLACK };
                shapes.push(rect(Some(fill), None));
            }
            WALL => {
                let accent = classifier.classify(WALL).fill.color().unwrap_or(Color::WHITE);
                shapes.push(rect(Some(Color::BLACK), None));
                let mid = y + m.cell_height / 2.0;
                shapes.push(
                    Line {
                        x1: x,
                        y1: mid,
                        x2: x + m.cell_width,
                        y2: mid,
                        color: accent,
                        heavy: true,
                        dim: false,
                        z_order: Z_WALL_ACCENT,
                    }
                    .into(),
                );
            }
            _ => {
                let ty = classifier.classify(code);
                let fill = match ty.fill {
                    Fill::Transparent | Fill::Fading => None,
                    f => f.color(),
                };
                let stroke = if ty.has_border() { ty.stroke } else { None };
                shapes.push(rect(fill, stroke));
            }
        }
    }
}

fn eye(m: &SceneMetrics, pos: Position, color: Color) -> Shape {
    let (x, y) = m.cell_center(pos);
    Dot {
        x,
        y,
        ch: '◉',
        style: Style {
            fg: Some(color),
            bold: true,
            ..Style::default()
        },
        z_order: Z_LANDMARK,
    }
    .into()
}

fn push_landmarks(shapes: &mut Vec<Shape>, session: &GridSession, m: &SceneMetrics, occupancy: bool) {
    let landmarks = *session.landmarks();
    let (gx, gy) = m.cell_center(landmarks.goal);
    shapes.push(
        Dot {
            x: gx,
            y: gy,
            ch: '★',
            style: Style {
                fg: Some(GOAL_COLOR),
                bold: true,
                ..Style::default()
            },
            z_order: Z_LANDMARK,
        }
        .into(),
    );
    if occupancy {
        shapes.push(eye(m, landmarks.hotspot_a, Color::BLACK));
    }
    shapes.push(eye(m, landmarks.hotspot_b, Color::WHITE));
}

/// White disc normally; on the white hidden room a black, heavier disc.
fn player_marker(m: &SceneMetrics, pos: Position, occupancy: bool) -> Shape {
    let (x, y) = m.cell_center(pos);
    let (ch, color) = if occupancy {
        ('⬤', Color::BLACK)
    } else {
        ('●', Color::WHITE)
    };
    Dot {
        x,
        y,
        ch,
        style: Style {
            fg: Some(color),
            bold: occupancy,
            ..Style::default()
        },
        z_order: Z_PLAYER,
    }
    .into()
}
