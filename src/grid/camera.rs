//! Camera: a zoomed viewport that follows the player, plus the one-shot
//! zoom-in played when the maze first appears.

use std::time::Duration;

use super::Position;
use super::floor::SceneMetrics;

/// A rectangle in scene units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn lerp(&self, to: &Viewport, t: f64) -> Viewport {
        Viewport {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
            width: self.width + (to.width - self.width) * t,
            height: self.height + (to.height - self.height) * t,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Cubic ease-in-out on `t ∈ [0, 1]`.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Called after every viewport change. The background grid is drawn once,
/// large enough for any pan, so there is nothing to redraw.
pub fn redraw_background_grid(_viewport: &Viewport) {}

#[derive(Debug, Clone, Copy, PartialEq)]
enum EntryPhase {
    Waiting,
    Running,
    Done,
}

#[derive(Debug, Clone)]
pub struct Camera {
    metrics: SceneMetrics,
    zoom: f64,
    viewport: Viewport,
    entry: EntryPhase,
    entry_delay: Duration,
    entry_duration: Duration,
}

impl Camera {
    pub fn new(
        metrics: SceneMetrics,
        zoom: f64,
        entry_delay: Duration,
        entry_duration: Duration,
    ) -> Self {
        let mut camera = Camera {
            metrics,
            zoom,
            viewport: Viewport {
                x: 0.0,
                y: 0.0,
                width: metrics.width,
                height: metrics.height,
            },
            entry: EntryPhase::Waiting,
            entry_delay,
            entry_duration,
        };
        camera.viewport = camera.whole_map();
        camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn whole_map(&self) -> Viewport {
        Viewport {
            x: 0.0,
            y: 0.0,
            width: self.metrics.width,
            height: self.metrics.height,
        }
    }

    /// Steady-state viewport centred on the player's cell. Never clamped to
    /// the map, so the extended background grid shows past the edges.
    pub fn follow(&self, pos: Position) -> Viewport {
        let width = self.metrics.width / self.zoom;
        let height = self.metrics.height / self.zoom;
        let (cx, cy) = self.metrics.cell_center(pos);
        Viewport {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
        }
    }

    pub fn entry_finished(&self) -> bool {
        self.entry == EntryPhase::Done
    }

    /// Re-centre on the player after a move. Ignored while the entry
    /// animation owns the viewport.
    pub fn track(&mut self, pos: Position) -> bool {
        if self.entry != EntryPhase::Done {
            return false;
        }
        let next = self.follow(pos);
        self.apply(next);
        true
    }

    /// Advance the entry animation to `elapsed` (time since the maze was
    /// shown). Returns `true` when the viewport changed.
    pub fn animate(&mut self, elapsed: Duration, pos: Position) -> bool {
        if self.entry == EntryPhase::Done || elapsed < self.entry_delay {
            return false;
        }
        self.entry = EntryPhase::Running;
        let since = elapsed - self.entry_delay;
        let progress = if self.entry_duration.is_zero() {
            1.0
        } else {
            (since.as_secs_f64() / self.entry_duration.as_secs_f64()).min(1.0)
        };
        let end = self.follow(pos);
        let next = if progress >= 1.0 {
            self.entry = EntryPhase::Done;
            log::debug!("camera entry animation finished at {end:?}");
            end
        } else {
            self.whole_map().lerp(&end, ease_in_out_cubic(progress))
        };
        self.apply(next);
        true
    }

    fn apply(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        redraw_background_grid(&self.viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(
            SceneMetrics::for_plan(14, 12),
            2.0,
            Duration::from_millis(800),
            Duration::from_millis(3000),
        )
    }

    #[test]
    fn easing_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-12);
        assert!(ease_in_out_cubic(0.25) < 0.25);
        assert!(ease_in_out_cubic(0.75) > 0.75);
    }

    #[test]
    fn follow_centres_on_cell() {
        let cam = camera();
        let v = cam.follow(Position::new(3, 1));
        let m = SceneMetrics::for_plan(14, 12);
        assert!((v.width - m.width / 2.0).abs() < 1e-9);
        assert!((v.height - m.height / 2.0).abs() < 1e-9);
        let (cx, cy) = v.center();
        assert!((cx - 3.5 * m.cell_width).abs() < 1e-9);
        assert!((cy - 1.5 * m.cell_height).abs() < 1e-9);
        assert!(v.y < 0.0, "camera is not clamped to the map");
    }

    #[test]
    fn entry_animation_waits_then_lands_on_follow() {
        let mut cam = camera();
        let pos = Position::new(3, 1);
        assert!(!cam.animate(Duration::from_millis(500), pos));
        assert_eq!(cam.viewport(), cam.whole_map());

        assert!(cam.animate(Duration::from_millis(2300), pos));
        let mid = cam.viewport();
        assert!(mid.width < cam.whole_map().width);
        assert!(mid.width > cam.follow(pos).width);

        assert!(cam.animate(Duration::from_millis(3800), pos));
        assert_eq!(cam.viewport(), cam.follow(pos));
        assert!(cam.entry_finished());
        assert!(!cam.animate(Duration::from_millis(5000), pos));
    }

    #[test]
    fn tracking_is_ignored_during_entry() {
        let mut cam = camera();
        assert!(!cam.track(Position::new(0, 0)));
        cam.animate(Duration::from_millis(3800), Position::new(0, 0));
        assert!(cam.track(Position::new(1, 0)));
        assert_eq!(cam.viewport(), cam.follow(Position::new(1, 0)));
    }
}
