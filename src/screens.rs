//! Screen transitions: the warning curtain, the maze and the room.
//!
//! Each transition schedules its later steps as `(due, event)` timers. Timers
//! are never cancelled; starting a new transition while an older one is still
//! running just queues more timers, and whichever fires last wins.

use std::time::Duration;

use crate::config::Timings;
use crate::grid::camera::ease_in_out_cubic;
use crate::grid::{GridSession, MoveOutcome};

/// Callbacks into the room screen, run when it becomes visible.
pub trait MainScreenHooks {
    /// Returns false when the room cannot be measured yet.
    fn initialize_chair(&mut self) -> bool;
    fn update_chair_perspective(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Warning,
    Grid,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    /// End of the opening warning: the maze appears and the warning slides away.
    ActivateGrid,
    /// Midpoint of a slide-up-down, with the warning fully covering.
    SwapTo(Screen),
    HideWarning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slide {
    /// Rests on screen until a slide starts.
    Static,
    Up { started: Duration },
    UpDown { started: Duration },
}

#[derive(Debug, Clone)]
pub struct ScreenController {
    timings: Timings,
    base: Screen,
    warning: Option<Slide>,
    timers: Vec<(Duration, ScreenEvent)>,
}

impl ScreenController {
    /// Warning up, maze scheduled.
    pub fn start(timings: &Timings, now: Duration) -> Self {
        let mut c = ScreenController {
            timings: timings.clone(),
            base: Screen::Warning,
            warning: Some(Slide::Static),
            timers: Vec::new(),
        };
        c.schedule(now + timings.warning(), ScreenEvent::ActivateGrid);
        c.schedule(now + timings.warning() + timings.slide(), ScreenEvent::HideWarning);
        c
    }

    /// The screen under the warning curtain.
    pub fn current(&self) -> Screen {
        self.base
    }

    pub fn warning_visible(&self) -> bool {
        self.warning.is_some()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Vertical offset of the warning as a fraction of the screen height:
    /// 0 covers the screen, -1 is fully above it, 1 fully below.
    pub fn warning_offset(&self, now: Duration) -> Option<f64> {
        let slide_ms = self.timings.slide().as_secs_f64();
        let progress = |started: Duration| {
            if slide_ms <= 0.0 {
                1.0
            } else {
                (now.saturating_sub(started).as_secs_f64() / slide_ms).clamp(0.0, 1.0)
            }
        };
        Some(match self.warning? {
            Slide::Static => 0.0,
            Slide::Up { started } => -ease_in_out_cubic(progress(started)),
            Slide::UpDown { started } => {
                let p = progress(started);
                if p < 0.5 {
                    1.0 - ease_in_out_cubic(p * 2.0)
                } else {
                    -ease_in_out_cubic((p - 0.5) * 2.0)
                }
            }
        })
    }

    /// Goal reached: curtain sweep, then the room.
    pub fn enter_main(&mut self, now: Duration) {
        log::info!("entering main screen");
        self.sweep(now, Screen::Main);
    }

    /// Back to the maze; the player is reset to the start cell right away.
    pub fn return_to_grid(&mut self, now: Duration, session: &mut GridSession) -> MoveOutcome {
        log::info!("returning to grid");
        self.sweep(now, Screen::Grid);
        session.reset_to_start()
    }

    fn sweep(&mut self, now: Duration, to: Screen) {
        self.warning = Some(Slide::UpDown { started: now });
        self.schedule(now + self.timings.swap(), ScreenEvent::SwapTo(to));
        self.schedule(now + self.timings.slide(), ScreenEvent::HideWarning);
    }

    fn schedule(&mut self, due: Duration, event: ScreenEvent) {
        let at = self.timers.partition_point(|(d, _)| *d <= due);
        self.timers.insert(at, (due, event));
    }

    /// Fire every timer due at `now`, in due order.
    pub fn tick(&mut self, now: Duration, hooks: &mut dyn MainScreenHooks) -> Vec<ScreenEvent> {
        let due = self.timers.partition_point(|(d, _)| *d <= now);
        let fired: Vec<(Duration, ScreenEvent)> = self.timers.drain(..due).collect();
        for &(at, event) in &fired {
            log::debug!("screen event {event:?}");
            match event {
                ScreenEvent::ActivateGrid => {
                    self.base = Screen::Grid;
                    self.warning = Some(Slide::Up { started: at });
                }
                ScreenEvent::SwapTo(screen) => {
                    self.base = screen;
                    if screen == Screen::Main {
                        if !hooks.initialize_chair() {
                            log::debug!("chair initialization deferred");
                        }
                        hooks.update_chair_perspective();
                    }
                }
                ScreenEvent::HideWarning => self.warning = None,
            }
        }
        fired.into_iter().map(|(_, e)| e).collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::config::GameConfig;
    use crate::grid::Position;
    use crate::grid::player::Direction;

    #[derive(Default)]
    struct Hooks {
        initialized: usize,
        updated: usize,
    }

    impl MainScreenHooks for Hooks {
        fn initialize_chair(&mut self) -> bool {
            self.initialized += 1;
            true
        }
        fn update_chair_perspective(&mut self) {
            self.updated += 1;
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn opening_sequence() {
        let mut hooks = Hooks::default();
        let mut c = ScreenController::start(&Timings::default(), ms(0));
        assert_eq!(c.current(), Screen::Warning);
        assert_eq!(c.warning_offset(ms(500)), Some(0.0));
        assert!(c.tick(ms(999), &mut hooks).is_empty());

        assert_eq!(c.tick(ms(1000), &mut hooks), vec![ScreenEvent::ActivateGrid]);
        assert_eq!(c.current(), Screen::Grid);
        let mid = c.warning_offset(ms(2000)).unwrap();
        assert!((mid + 0.5).abs() < 1e-9);

        assert_eq!(c.tick(ms(3000), &mut hooks), vec![ScreenEvent::HideWarning]);
        assert!(!c.warning_visible());
        assert_eq!(c.warning_offset(ms(3000)), None);
    }

    #[test]
    fn enter_main_swaps_at_midpoint_and_runs_hooks() {
        let mut hooks = Hooks::default();
        let mut c = ScreenController::start(&Timings::default(), ms(0));
        c.tick(ms(3000), &mut hooks);

        c.enter_main(ms(5000));
        assert_eq!(c.warning_offset(ms(5000)), Some(1.0));
        c.tick(ms(5999), &mut hooks);
        assert_eq!(c.current(), Screen::Grid);
        assert_eq!(hooks.initialized, 0);

        c.tick(ms(6000), &mut hooks);
        assert_eq!(c.current(), Screen::Main);
        assert_eq!((hooks.initialized, hooks.updated), (1, 1));
        assert!(c.warning_visible());
        assert_eq!(c.warning_offset(ms(6000)), Some(0.0));

        c.tick(ms(7000), &mut hooks);
        assert!(!c.warning_visible());
        assert_eq!(c.pending_timers(), 0);
    }

    #[test]
    fn return_to_grid_resets_player_immediately() {
        let config = GameConfig::default();
        let mut session = GridSession::new(&config, &mut StdRng::seed_from_u64(5)).unwrap();
        session.attempt_move(Direction::Left).unwrap();

        let mut hooks = Hooks::default();
        let mut c = ScreenController::start(&config.timings, ms(0));
        c.tick(ms(3000), &mut hooks);
        c.enter_main(ms(4000));
        c.tick(ms(6000), &mut hooks);
        assert_eq!(c.current(), Screen::Main);

        let outcome = c.return_to_grid(ms(10_000), &mut session);
        assert_eq!(session.position(), Position::new(3, 1));
        assert_eq!(outcome.step.to, Position::new(3, 1));
        assert_eq!(c.current(), Screen::Main);
        c.tick(ms(11_000), &mut hooks);
        assert_eq!(c.current(), Screen::Grid);
        assert_eq!(hooks.initialized, 1);
    }

    #[test]
    fn overlapping_sequences_last_write_wins() {
        let mut hooks = Hooks::default();
        let mut c = ScreenController::start(&Timings::default(), ms(0));
        c.tick(ms(3000), &mut hooks);
        c.enter_main(ms(4000));
        c.enter_main(ms(4500));
        // The first sequence's hide fires while the second is mid-slide.
        c.tick(ms(6000), &mut hooks);
        assert!(!c.warning_visible());
        assert_eq!(c.current(), Screen::Main);
        assert_eq!(hooks.initialized, 2);
        c.tick(ms(6500), &mut hooks);
        assert_eq!(c.pending_timers(), 0);
    }
}
