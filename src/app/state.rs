//! Everything the game knows, independent of the terminal: the grid session
//! and its retained floor scene, the room, the screen controller and the
//! overlays. The interactive loop and the headless recorder both drive this.

use std::time::Duration;

use rand::Rng;

use crate::config::GameConfig;
use crate::error::Result;
use crate::grid::player::Direction;
use crate::grid::{GridSession, MoveOutcome};
use crate::overlay::Overlays;
use crate::room::RoomState;
use crate::scene::floor::FloorScene;
use crate::scene::projection::Projection;
use crate::scene::resolve_all;
use crate::scene::room::{room_shapes, room_viewport};
use crate::screens::{MainScreenHooks, Screen, ScreenController, ScreenEvent};
use crate::types::{DrawOp, TerminalContract};

use super::input::Action;
use super::ui::{self, Layout};

pub struct GameState {
    session: GridSession,
    floor: FloorScene,
    room: RoomState,
    screens: ScreenController,
    overlays: Overlays,
    layout: Layout,
    /// When the maze screen became visible; the camera intro counts from here.
    grid_shown_at: Option<Duration>,
    goal_arrivals: usize,
    quit: bool,
}

impl GameState {
    pub fn new<R: Rng + ?Sized>(
        config: &GameConfig,
        rng: &mut R,
        canvas: TerminalContract,
        now: Duration,
    ) -> Result<Self> {
        let mut session = GridSession::new(config, rng)?;
        let floor = FloorScene::build(&mut session);
        Ok(GameState {
            session,
            floor,
            room: RoomState::new(config),
            screens: ScreenController::start(&config.timings, now),
            overlays: Overlays::new(config.overlay_a.clone(), config.overlay_b.clone(), &config.timings),
            layout: Layout::new(canvas),
            grid_shown_at: None,
            goal_arrivals: 0,
            quit: false,
        })
    }

    pub fn session(&self) -> &GridSession {
        &self.session
    }

    pub fn floor(&self) -> &FloorScene {
        &self.floor
    }

    pub fn room(&self) -> &RoomState {
        &self.room
    }

    pub fn overlays(&self) -> &Overlays {
        &self.overlays
    }

    pub fn screen(&self) -> Screen {
        self.screens.current()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn goal_arrivals(&self) -> usize {
        self.goal_arrivals
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn resize(&mut self, canvas: TerminalContract) {
        self.layout = Layout::new(canvas);
        self.sync_room_surface();
    }

    /// The room is only measurable while its screen is the one showing.
    fn sync_room_surface(&mut self) {
        let (w, h) = match self.screens.current() {
            Screen::Main => (self.layout.canvas.width, self.layout.canvas.height),
            _ => (0, 0),
        };
        self.room.set_surface(w, h);
    }

    /// Move the player if the maze is the active screen.
    pub fn move_player(&mut self, direction: Direction, now: Duration) -> Option<MoveOutcome> {
        if self.screens.current() != Screen::Grid {
            return None;
        }
        let outcome = self.session.attempt_move(direction)?;
        self.settle(&outcome, now);
        Some(outcome)
    }

    fn settle(&mut self, outcome: &MoveOutcome, now: Duration) {
        self.floor.apply(&mut self.session, outcome);
        self.overlays.apply(&outcome.triggers, now);
        if outcome.triggers.enter_main {
            self.goal_arrivals += 1;
            self.screens.enter_main(now);
        }
    }

    pub fn return_to_grid(&mut self, now: Duration) {
        if self.screens.current() != Screen::Main {
            return;
        }
        let outcome = self.screens.return_to_grid(now, &mut self.session);
        self.settle(&outcome, now);
    }

    pub fn handle(&mut self, action: Action, now: Duration) {
        match action {
            Action::Move(direction) => {
                self.move_player(direction, now);
            }
            Action::Quit => self.quit = true,
            Action::ReturnToGrid => self.return_to_grid(now),
            Action::NudgeT(delta) => {
                if self.screens.current() == Screen::Main {
                    self.room.nudge_t(delta);
                }
            }
            Action::NudgeStuffiness(delta) => {
                if self.screens.current() == Screen::Main {
                    self.room.nudge_stuffiness(delta);
                }
            }
            Action::ToggleTint => {
                if self.screens.current() == Screen::Main {
                    self.room.toggle_tint();
                }
            }
            Action::Scroll(delta) => {
                let max = self.open_overlay_max_scroll();
                if let Some(window) = self.overlays.open_mut() {
                    window.scroll_by(delta, max);
                }
            }
            Action::Press { col, row } => match self.screens.current() {
                Screen::Grid => {
                    if let Some(direction) = self.layout.hit_arrow(col, row) {
                        self.move_player(direction, now);
                    }
                }
                Screen::Main => {
                    let (x, y) = self.room_projection().to_scene(col, row);
                    self.room.press(x, y);
                }
                Screen::Warning => {}
            },
            Action::Drag { col, row } => {
                if self.screens.current() == Screen::Main {
                    let (x, y) = self.room_projection().to_scene(col, row);
                    self.room.drag_to(x, y);
                }
            }
            Action::Release => self.room.release(),
            Action::Resize { width, height } => self.resize(super::canvas_for(width, height)),
            Action::Fullscreen => {}
        }
    }

    fn open_overlay_max_scroll(&self) -> usize {
        if self.overlays.a.is_visible() {
            self.layout.overlay_max_scroll(&self.overlays.a)
        } else if self.overlays.b.is_visible() {
            self.layout.overlay_max_scroll(&self.overlays.b)
        } else {
            0
        }
    }

    /// Per-frame work: screen timers, the camera intro, room autoplay and
    /// overlay auto-scroll.
    pub fn tick(&mut self, now: Duration) {
        let mut hooks = ShownRoom {
            room: &mut self.room,
            canvas: self.layout.canvas,
        };
        for event in self.screens.tick(now, &mut hooks) {
            if event == ScreenEvent::ActivateGrid {
                self.grid_shown_at = Some(now);
            }
        }
        self.sync_room_surface();
        if let Some(shown) = self.grid_shown_at {
            self.session.animate_camera(now.saturating_sub(shown));
        }
        self.room.tick_frame(now);
        let max_a = self.layout.overlay_max_scroll(&self.overlays.a);
        let max_b = self.layout.overlay_max_scroll(&self.overlays.b);
        self.overlays.a.tick(now, max_a);
        self.overlays.b.tick(now, max_b);
    }

    fn room_projection(&self) -> Projection {
        Projection::fit(room_viewport(), self.layout.canvas)
    }

    /// Draw ops for the whole canvas at `now`.
    pub fn compose(&self, now: Duration) -> Vec<DrawOp> {
        let mut ops = match self.screens.current() {
            Screen::Warning => Vec::new(),
            Screen::Grid => {
                let proj = Projection::fit(self.session.camera().viewport(), self.layout.canvas);
                let mut ops = resolve_all(self.floor.shapes(), &proj);
                ui::push_arrow_pad(&mut ops, &self.layout);
                if self.overlays.a.is_visible() {
                    ui::push_overlay(&mut ops, &self.layout, &self.overlays.a);
                } else if self.overlays.b.is_visible() {
                    ui::push_overlay(&mut ops, &self.layout, &self.overlays.b);
                }
                ops
            }
            Screen::Main => {
                let shapes = room_shapes(&self.room);
                let mut ops = resolve_all(&shapes, &self.room_projection());
                if self.room.tint() {
                    for op in &mut ops {
                        op.style.dim = true;
                    }
                }
                ops
            }
        };
        if let Some(offset) = self.screens.warning_offset(now) {
            ui::push_curtain(&mut ops, &self.layout, offset);
        }
        ops
    }
}

/// The room as it is being swapped in: it takes the canvas as its surface
/// before the chair hooks run.
struct ShownRoom<'a> {
    room: &'a mut RoomState,
    canvas: TerminalContract,
}

impl MainScreenHooks for ShownRoom<'_> {
    fn initialize_chair(&mut self) -> bool {
        self.room.set_surface(self.canvas.width, self.canvas.height);
        self.room.initialize_chair()
    }

    fn update_chair_perspective(&mut self) {
        self.room.update_chair_perspective();
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::grid::Position;

    const CANVAS: TerminalContract = TerminalContract { width: 80, height: 22 };

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// The cells the tests walk through; the goal must not land on them.
    const PATH: [Position; 8] = [
        Position::new(2, 1),
        Position::new(1, 1),
        Position::new(1, 2),
        Position::new(1, 3),
        Position::new(1, 4),
        Position::new(1, 5),
        Position::new(1, 6),
        Position::new(3, 1),
    ];

    fn fresh() -> GameState {
        (0..)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                GameState::new(&GameConfig::default(), &mut rng, CANVAS, ms(0)).unwrap()
            })
            .find(|s| !PATH.contains(&s.session().landmarks().goal))
            .unwrap()
    }

    fn state() -> GameState {
        let mut s = fresh();
        s.tick(ms(3_000));
        s
    }

    #[test]
    fn chair_waits_for_the_room_screen() {
        let mut s = fresh();
        s.tick(ms(16));
        assert_eq!(s.screen(), Screen::Warning);
        assert_eq!(s.room().surface(), (0, 0));
        assert!(!s.room().chair().is_initialized());
        s.tick(ms(3_000));
        assert!(!s.room().chair().is_initialized());
    }

    #[test]
    fn moves_are_ignored_behind_the_warning() {
        let mut s = fresh();
        assert!(s.move_player(Direction::Left, ms(10)).is_none());
        s.tick(ms(1_000));
        assert!(s.move_player(Direction::Left, ms(1_010)).is_some());
    }

    #[test]
    fn hotspot_b_opens_its_overlay() {
        let mut s = state();
        for d in [Direction::Left, Direction::Left, Direction::Down] {
            s.move_player(d, ms(3_100));
        }
        for _ in 0..3 {
            s.move_player(Direction::Down, ms(3_200));
        }
        assert_eq!(s.session().position(), Position::new(1, 5));
        assert!(s.overlays().b.is_visible());
        s.move_player(Direction::Down, ms(3_300));
        assert!(!s.overlays().b.is_visible());
    }

    #[test]
    fn arrow_button_click_moves_player() {
        let mut s = state();
        let left = s.layout().arrow_buttons()[1];
        s.handle(Action::Press { col: left.x, row: left.y }, ms(3_100));
        assert_eq!(s.session().position(), Position::new(2, 1));
    }

    #[test]
    fn room_controls_only_act_on_main_screen() {
        let mut s = state();
        s.handle(Action::ToggleTint, ms(3_100));
        assert!(!s.room().tint());
        s.handle(Action::NudgeT(0.1), ms(3_100));
        assert!(s.room().autoplay_running());
    }

    #[test]
    fn compose_draws_player_on_grid() {
        let mut s = state();
        s.tick(ms(7_000));
        assert!(s.session().camera().entry_finished());
        let ops = s.compose(ms(7_000));
        assert!(ops.iter().any(|op| op.ch == '●'));
        // The viewport is centred on the player.
        let player = ops.iter().find(|op| op.ch == '●').unwrap();
        assert!((i32::from(player.x) - 40).abs() <= 1);
    }
}
