use serde::{Deserialize, Serialize};

use super::walls::{ROOM_WIDTH, RoomGeometry};

/// Pointer travel (scene units, either axis) past which a press becomes a drag.
pub const DRAG_THRESHOLD: f64 = 5.0;
const HOME: (f64, f64) = (700.0, 600.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChairOption {
    pub name: String,
    /// Width as a percentage of the room width at unit scale.
    pub width_percent: f64,
}

pub fn default_chair_options() -> Vec<ChairOption> {
    [18.0, 15.0, 20.0, 22.0, 24.0, 17.0, 21.0, 21.0]
        .into_iter()
        .enumerate()
        .map(|(i, width_percent)| ChairOption {
            name: format!("chairathen{}", i + 1),
            width_percent,
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct Press {
    x: f64,
    y: f64,
    offset: (f64, f64),
    dragged: bool,
}

#[derive(Debug, Clone)]
pub struct Chair {
    options: Vec<ChairOption>,
    index: usize,
    offset: (f64, f64),
    base_width: Option<f64>,
    width: f64,
    depth: i32,
    press: Option<Press>,
}

impl Chair {
    pub fn new(options: Vec<ChairOption>) -> Self {
        let options = if options.is_empty() {
            default_chair_options()
        } else {
            options
        };
        let width = options[0].width_percent / 100.0 * ROOM_WIDTH;
        Chair {
            options,
            index: 0,
            offset: (0.0, 0.0),
            base_width: None,
            width,
            depth: 100,
            press: None,
        }
    }

    pub fn current(&self) -> &ChairOption {
        &self.options[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn is_initialized(&self) -> bool {
        self.base_width.is_some()
    }

    pub fn center(&self) -> (f64, f64) {
        (HOME.0 + self.offset.0, HOME.1 + self.offset.1)
    }

    fn option_width(&self) -> f64 {
        self.current().width_percent / 100.0 * ROOM_WIDTH
    }

    /// Derive the unit-scale width from the current size and position.
    /// Fails while the room surface has no area.
    pub fn initialize(&mut self, geo: &RoomGeometry, surface_has_area: bool) -> bool {
        if !surface_has_area {
            log::debug!("chair not initialized: room surface has no area");
            return false;
        }
        let (x, y) = self.center();
        let p = geo.perspective(x, y);
        self.base_width = Some(self.width / p.scale);
        self.depth = p.depth;
        true
    }

    pub fn update_perspective(&mut self, geo: &RoomGeometry, surface_has_area: bool) {
        if self.base_width.is_none() && !self.initialize(geo, surface_has_area) {
            return;
        }
        let (x, y) = self.center();
        let p = geo.perspective(x, y);
        if let Some(base) = self.base_width {
            self.width = base * p.scale;
        }
        self.depth = p.depth;
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (cx, cy) = self.center();
        (x - cx).abs() <= self.width / 2.0 && (y - cy).abs() <= self.width / 2.0
    }

    pub fn press(&mut self, x: f64, y: f64) {
        self.press = Some(Press {
            x,
            y,
            offset: self.offset,
            dragged: false,
        });
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    pub fn drag_to(&mut self, geo: &RoomGeometry, x: f64, y: f64) {
        let Some(press) = self.press.as_mut() else {
            return;
        };
        let (dx, dy) = (x - press.x, y - press.y);
        if dx.abs() > DRAG_THRESHOLD || dy.abs() > DRAG_THRESHOLD {
            press.dragged = true;
        }
        self.offset = (press.offset.0 + dx, press.offset.1 + dy);
        let (cx, cy) = self.center();
        let p = geo.perspective(cx, cy);
        if let Some(base) = self.base_width {
            self.width = base * p.scale;
        }
        self.depth = p.depth;
    }

    /// End a press. A press that never became a drag cycles to the next
    /// chair; returns true when that happened.
    pub fn release(&mut self, geo: &RoomGeometry) -> bool {
        let Some(press) = self.press.take() else {
            return false;
        };
        if press.dragged {
            return false;
        }
        self.index = (self.index + 1) % self.options.len();
        self.width = self.option_width();
        let (x, y) = self.center();
        self.base_width = Some(self.width / geo.perspective(x, y).scale);
        log::debug!("chair switched to {}", self.current().name);
        true
    }
}
