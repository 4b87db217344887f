use std::time::Duration;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use chair_maze::app::input::Action;
use chair_maze::app::state::GameState;
use chair_maze::config::GameConfig;
use chair_maze::grid::Position;
use chair_maze::grid::floor::FloorPlan;
use chair_maze::grid::player::Direction;
use chair_maze::record::{parse_moves, record};
use chair_maze::room::RoomState;
use chair_maze::screens::Screen;
use chair_maze::types::{Frame, Recording, TerminalContract};

const CANVAS: TerminalContract = TerminalContract { width: 80, height: 22 };

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// One hidden-room cell next to the only open cell, which must be the goal.
fn corridor() -> GameConfig {
    GameConfig {
        floor_plan: FloorPlan::new(vec![vec![3, 0]]),
        start: Position::new(0, 0),
        hotspot_a: Position::new(0, 0),
        hotspot_b: Position::new(0, 0),
        ..GameConfig::default()
    }
}

#[test]
fn goal_sweeps_into_room_and_back() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut game = GameState::new(&corridor(), &mut rng, CANVAS, ms(0)).unwrap();
    game.tick(ms(1_000));
    assert_eq!(game.screen(), Screen::Grid);

    game.handle(Action::Move(Direction::Right), ms(1_100));
    assert_eq!(game.goal_arrivals(), 1);
    game.tick(ms(2_000));
    assert_eq!(game.screen(), Screen::Grid);
    assert!(!game.room().chair().is_initialized());
    game.tick(ms(2_100));
    assert_eq!(game.screen(), Screen::Main);
    assert_eq!(game.room().surface(), (CANVAS.width, CANVAS.height));
    assert!(game.room().chair().is_initialized());

    // Moves are ignored in the room.
    game.handle(Action::Move(Direction::Left), ms(2_200));
    assert_eq!(game.session().position(), Position::new(1, 0));

    game.handle(Action::ReturnToGrid, ms(3_000));
    assert_eq!(game.session().position(), Position::new(0, 0));
    assert!(game.overlays().a.is_visible());
    game.tick(ms(4_000));
    assert_eq!(game.screen(), Screen::Grid);
    assert_eq!(game.room().surface(), (0, 0));
    game.tick(ms(5_000));
    assert!(game.compose(ms(5_000)).iter().all(|op| op.z_order < 1000));
}

#[test]
fn goal_on_start_cell_reenters_room_after_return() {
    // The only open cell is the start cell, so it must be the goal.
    let config = GameConfig {
        floor_plan: FloorPlan::new(vec![vec![0, 3]]),
        start: Position::new(0, 0),
        hotspot_a: Position::new(1, 0),
        hotspot_b: Position::new(1, 0),
        ..GameConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(0);
    let mut game = GameState::new(&config, &mut rng, CANVAS, ms(0)).unwrap();
    assert_eq!(game.session().landmarks().goal, Position::new(0, 0));
    game.tick(ms(1_000));
    assert_eq!(game.goal_arrivals(), 0);

    game.handle(Action::Move(Direction::Right), ms(1_100));
    game.handle(Action::Move(Direction::Left), ms(1_200));
    assert_eq!(game.goal_arrivals(), 1);
    game.tick(ms(2_200));
    assert_eq!(game.screen(), Screen::Main);

    // Reset lands on the goal again; its swap is queued after the grid's.
    game.handle(Action::ReturnToGrid, ms(3_000));
    assert_eq!(game.goal_arrivals(), 2);
    game.tick(ms(4_000));
    assert_eq!(game.screen(), Screen::Main);
}

#[test]
fn quit_sets_the_flag() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut game = GameState::new(&corridor(), &mut rng, CANVAS, ms(0)).unwrap();
    assert!(!game.should_quit());
    game.handle(Action::Quit, ms(5));
    assert!(game.should_quit());
}

#[test]
fn back_wall_at_space_point_nine() {
    let mut room = RoomState::new(&GameConfig::default());
    room.update_room(0.9);
    assert_eq!(room.geometry().back.width, 0.35 * 420.0);
}

#[test]
fn recording_survives_json() {
    let config = GameConfig {
        seed: Some(9),
        ..GameConfig::default()
    };
    let moves = parse_moves("l,l,d,d,d,d").unwrap();
    let rec = record(&config, &moves, CANVAS).unwrap();
    let json = serde_json::to_string(&rec).unwrap();
    let back: Recording = serde_json::from_str(&json).unwrap();
    assert_eq!(back.frames.len(), rec.frames.len());
    assert_eq!(back.contract, CANVAS);
    match &back.frames[0] {
        Frame::Full { cells } => {
            assert_eq!(cells.len(), usize::from(CANVAS.height));
            assert!(cells.iter().all(|row| row.len() == usize::from(CANVAS.width)));
        }
        other => panic!("expected full frame, got {other:?}"),
    }
}

proptest! {
    #[test]
    fn back_wall_stays_in_bounds(t in -2.0f64..3.0) {
        let mut room = RoomState::new(&GameConfig::default());
        room.update_room(t);
        prop_assert!((0.0..=1.0).contains(&room.t()));
        let w = room.geometry().back.width;
        prop_assert!(w >= 0.35 * 420.0 - 1e-9 && w <= 420.0);
    }

    #[test]
    fn more_stuffiness_never_hides_sprites(a in 0.0f64..1.0, b in 0.0f64..1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let visible = |v: f64| {
            let mut room = RoomState::new(&GameConfig::default());
            room.update_stuffiness(v);
            room.sprites().iter().filter(|s| s.is_visible()).count()
        };
        prop_assert!(visible(lo) <= visible(hi));
    }
}
