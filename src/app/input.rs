//! Key and mouse events → game actions.

use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::config::{KeyBindings, matches_binding};
use crate::grid::player::Direction;
use crate::room::SLIDER_STEP;

/// Overlay lines scrolled per key press.
const SCROLL_PAGE: isize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Move(Direction),
    Quit,
    ReturnToGrid,
    NudgeT(f64),
    NudgeStuffiness(f64),
    ToggleTint,
    Scroll(isize),
    Fullscreen,
    /// Pointer events in canvas cell coordinates.
    Press { col: u16, row: u16 },
    Drag { col: u16, row: u16 },
    Release,
    Resize { width: u16, height: u16 },
}

pub fn key_action(bindings: &KeyBindings, key: &KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let table: [(&str, Action); 15] = [
        (bindings.move_up.as_str(), Action::Move(Direction::Up)),
        (bindings.move_down.as_str(), Action::Move(Direction::Down)),
        (bindings.move_left.as_str(), Action::Move(Direction::Left)),
        (bindings.move_right.as_str(), Action::Move(Direction::Right)),
        (bindings.quit.as_str(), Action::Quit),
        (bindings.cancel.as_str(), Action::Quit),
        (bindings.return_to_grid.as_str(), Action::ReturnToGrid),
        (bindings.room_t_down.as_str(), Action::NudgeT(-SLIDER_STEP)),
        (bindings.room_t_up.as_str(), Action::NudgeT(SLIDER_STEP)),
        (bindings.stuffiness_down.as_str(), Action::NudgeStuffiness(-SLIDER_STEP)),
        (bindings.stuffiness_up.as_str(), Action::NudgeStuffiness(SLIDER_STEP)),
        (bindings.toggle_tint.as_str(), Action::ToggleTint),
        (bindings.scroll_up.as_str(), Action::Scroll(-SCROLL_PAGE)),
        (bindings.scroll_down.as_str(), Action::Scroll(SCROLL_PAGE)),
        (bindings.fullscreen.as_str(), Action::Fullscreen),
    ];
    table
        .into_iter()
        .find(|(binding, _)| matches_binding(binding, key))
        .map(|(_, action)| action)
}

/// Mouse events, shifted up by `canvas_top` rows. Events above the canvas
/// are dropped except releases.
pub fn mouse_action(mouse: &MouseEvent, canvas_top: u16) -> Option<Action> {
    let canvas_row = mouse.row.checked_sub(canvas_top);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => canvas_row.map(|row| Action::Press {
            col: mouse.column,
            row,
        }),
        MouseEventKind::Drag(MouseButton::Left) => canvas_row.map(|row| Action::Drag {
            col: mouse.column,
            row,
        }),
        MouseEventKind::Up(MouseButton::Left) => Some(Action::Release),
        MouseEventKind::ScrollUp => Some(Action::Scroll(-1)),
        MouseEventKind::ScrollDown => Some(Action::Scroll(1)),
        _ => None,
    }
}

pub fn event_action(bindings: &KeyBindings, event: &Event, canvas_top: u16) -> Option<Action> {
    match event {
        Event::Key(key) => key_action(bindings, key),
        Event::Mouse(mouse) => mouse_action(mouse, canvas_top),
        Event::Resize(width, height) => Some(Action::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}
