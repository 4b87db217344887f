//! The room screen: perspective walls driven by the space slider `t`, décor
//! sprites revealed by stuffiness, the chair, autoplay and the screen tint.

pub mod autoplay;
pub mod chair;
pub mod sprites;
pub mod walls;

use std::time::Duration;

use crate::config::GameConfig;
use crate::screens::MainScreenHooks;
use autoplay::Autoplay;
use chair::Chair;
use sprites::{Grab, Sprite};
use walls::RoomGeometry;

/// Slider increment for one key press.
pub const SLIDER_STEP: f64 = 0.05;

#[derive(Debug, Clone, Copy)]
enum DragTarget {
    Sprite { index: usize, grab: Grab },
    Chair,
}

#[derive(Debug, Clone)]
pub struct RoomState {
    geometry: RoomGeometry,
    t: f64,
    stuffiness: f64,
    sprites: Vec<Sprite>,
    chair: Chair,
    autoplay: Autoplay,
    tint: bool,
    surface: (u16, u16),
    drag: Option<DragTarget>,
}

impl RoomState {
    pub fn new(config: &GameConfig) -> Self {
        let mut room = RoomState {
            geometry: RoomGeometry::at(0.0),
            t: 0.0,
            stuffiness: 0.0,
            sprites: config.sprites.iter().cloned().map(Sprite::new).collect(),
            chair: Chair::new(config.chairs.clone()),
            autoplay: Autoplay::default(),
            tint: false,
            surface: (0, 0),
            drag: None,
        };
        room.update_stuffiness(0.0);
        room
    }

    pub fn geometry(&self) -> &RoomGeometry {
        &self.geometry
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn stuffiness(&self) -> f64 {
        self.stuffiness
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn chair(&self) -> &Chair {
        &self.chair
    }

    pub fn tint(&self) -> bool {
        self.tint
    }

    pub fn autoplay_running(&self) -> bool {
        self.autoplay.is_running()
    }

    pub fn surface(&self) -> (u16, u16) {
        self.surface
    }

    /// Size of the terminal area the room is drawn into; zero while hidden.
    pub fn set_surface(&mut self, width: u16, height: u16) {
        self.surface = (width, height);
    }

    fn surface_has_area(&self) -> bool {
        self.surface.0 > 0 && self.surface.1 > 0
    }

    pub fn update_room(&mut self, t: f64) {
        self.t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        self.geometry = RoomGeometry::at(self.t);
        for sprite in &mut self.sprites {
            sprite.follow_room(&self.geometry);
        }
        let has_area = self.surface_has_area();
        self.chair.update_perspective(&self.geometry, has_area);
    }

    pub fn update_stuffiness(&mut self, v: f64) {
        self.stuffiness = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        for sprite in &mut self.sprites {
            if self.stuffiness >= sprite.spec().threshold {
                sprite.show(&self.geometry);
            } else {
                sprite.hide();
            }
        }
    }

    /// Move the space slider by hand; stops autoplay.
    pub fn nudge_t(&mut self, delta: f64) {
        self.autoplay.stop();
        self.update_room(self.t + delta);
    }

    /// Move the stuffiness slider by hand; stops autoplay.
    pub fn nudge_stuffiness(&mut self, delta: f64) {
        self.autoplay.stop();
        self.update_stuffiness(self.stuffiness + delta);
    }

    /// Per-frame update at game time `now`. Returns true when `t` changed.
    pub fn tick_frame(&mut self, now: Duration) -> bool {
        match self.autoplay.tick(now) {
            Some(t) if t != self.t => {
                self.update_room(t);
                true
            }
            _ => false,
        }
    }

    pub fn toggle_tint(&mut self) -> bool {
        self.tint = !self.tint;
        log::debug!("screen tint {}", if self.tint { "on" } else { "off" });
        self.tint
    }

    /// Pointer down at a room point. The front-most sprite or the chair under
    /// the pointer is grabbed.
    pub fn press(&mut self, x: f64, y: f64) -> bool {
        let geo = &self.geometry;
        let sprite_hit = self
            .sprites
            .iter()
            .enumerate()
            .filter(|(_, s)| s.contains(geo, x, y))
            .max_by_key(|(_, s)| s.depth());
        let chair_hit = self.chair.contains(x, y);

        let pick_chair = match sprite_hit {
            Some((_, s)) => chair_hit && self.chair.depth() >= s.depth(),
            None => chair_hit,
        };
        if pick_chair {
            self.chair.press(x, y);
            self.drag = Some(DragTarget::Chair);
            return true;
        }
        let Some((index, sprite)) = sprite_hit else {
            return false;
        };
        match sprite.grab(x, y) {
            Some(grab) => {
                self.drag = Some(DragTarget::Sprite { index, grab });
                true
            }
            None => false,
        }
    }

    pub fn drag_to(&mut self, x: f64, y: f64) {
        match self.drag {
            Some(DragTarget::Chair) => self.chair.drag_to(&self.geometry, x, y),
            Some(DragTarget::Sprite { index, grab }) => {
                if let Some(sprite) = self.sprites.get_mut(index) {
                    sprite.drag_to(&self.geometry, &grab, x, y);
                }
            }
            None => {}
        }
    }

    pub fn release(&mut self) {
        if let Some(DragTarget::Chair) = self.drag.take() {
            self.chair.release(&self.geometry);
        }
    }
}

impl MainScreenHooks for RoomState {
    fn initialize_chair(&mut self) -> bool {
        let has_area = self.surface_has_area();
        self.chair.initialize(&self.geometry, has_area)
    }

    fn update_chair_perspective(&mut self) {
        let has_area = self.surface_has_area();
        self.chair.update_perspective(&self.geometry, has_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> RoomState {
        let mut r = RoomState::new(&GameConfig::default());
        r.set_surface(80, 24);
        r
    }

    fn visible(r: &RoomState) -> Vec<&str> {
        r.sprites()
            .iter()
            .filter(|s| s.is_visible())
            .map(|s| s.spec().name.as_str())
            .collect()
    }

    #[test]
    fn stuffiness_reveals_by_threshold() {
        let mut r = room();
        assert!(visible(&r).is_empty());
        r.update_stuffiness(0.35);
        assert_eq!(visible(&r), vec!["light", "sign1", "sign2"]);
        r.update_stuffiness(2.0);
        assert_eq!(r.stuffiness(), 1.0);
        assert_eq!(visible(&r).len(), r.sprites().len());
        r.update_stuffiness(0.0);
        assert!(visible(&r).is_empty());
    }

    #[test]
    fn manual_slider_stops_autoplay() {
        let mut r = room();
        r.tick_frame(Duration::ZERO);
        assert!(r.tick_frame(Duration::from_millis(100)));
        r.nudge_t(SLIDER_STEP);
        assert!(!r.autoplay_running());
        assert!(!r.tick_frame(Duration::from_millis(200)));

        let mut r = room();
        r.nudge_stuffiness(SLIDER_STEP);
        assert!(!r.autoplay_running());
    }

    #[test]
    fn ladder_follows_the_room() {
        let mut r = room();
        r.update_stuffiness(0.45);
        r.update_room(0.6);
        let ladder = r.sprites().iter().find(|s| s.spec().name == "ladder").unwrap();
        let expected = r.geometry().right_floor_point(ladder.ladder_param());
        assert_eq!(ladder.center(r.geometry()), expected);
    }

    #[test]
    fn hooks_respect_surface_size() {
        let mut r = RoomState::new(&GameConfig::default());
        assert!(!r.initialize_chair());
        r.set_surface(100, 30);
        assert!(r.initialize_chair());
        r.update_chair_perspective();
        assert!(r.chair().is_initialized());
    }

    #[test]
    fn pressing_chair_and_releasing_cycles() {
        let mut r = room();
        r.initialize_chair();
        let (x, y) = r.chair().center();
        assert!(r.press(x, y));
        r.release();
        assert_eq!(r.chair().index(), 1);
    }

    #[test]
    fn tint_toggles() {
        let mut r = room();
        assert!(r.toggle_tint());
        assert!(!r.toggle_tint());
    }
}
