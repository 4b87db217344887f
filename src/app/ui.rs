//! Screen-space widgets drawn over the scene: the on-screen arrow pad, the
//! open overlay window and the warning curtain.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::grid::player::Direction;
use crate::overlay::OverlayWindow;
use crate::types::{Color, DrawOp, Style, TerminalContract};

const Z_BUTTONS: i32 = 900;
const Z_OVERLAY: i32 = 950;
const Z_CURTAIN: i32 = 1000;

const BUTTON_WIDTH: u16 = 3;
const OVERLAY_MAX_WIDTH: u16 = 44;

const CURTAIN_TEXT: [&str; 3] = [
    "WARNING",
    "",
    "Arrow keys move. Find the star.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrowButton {
    pub direction: Direction,
    pub x: u16,
    pub y: u16,
}

impl ArrowButton {
    fn glyph(&self) -> char {
        match self.direction {
            Direction::Up => '▲',
            Direction::Down => '▼',
            Direction::Left => '◀',
            Direction::Right => '▶',
        }
    }

    fn contains(&self, col: u16, row: u16) -> bool {
        row == self.y && col >= self.x && col < self.x + BUTTON_WIDTH
    }
}

/// Cell rectangle on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub canvas: TerminalContract,
}

impl Layout {
    pub fn new(canvas: TerminalContract) -> Self {
        Layout { canvas }
    }

    /// Inverted-T pad in the bottom-right corner. Empty when the canvas is
    /// too small to hold it.
    pub fn arrow_buttons(&self) -> Vec<ArrowButton> {
        let TerminalContract { width, height } = self.canvas;
        if width < 3 * BUTTON_WIDTH + 1 || height < 3 {
            return Vec::new();
        }
        let right = width - 1;
        let mid_x = right - 2 * BUTTON_WIDTH;
        let button = |direction, x, y| ArrowButton { direction, x, y };
        vec![
            button(Direction::Up, mid_x, height - 2),
            button(Direction::Left, mid_x - BUTTON_WIDTH, height - 1),
            button(Direction::Down, mid_x, height - 1),
            button(Direction::Right, mid_x + BUTTON_WIDTH, height - 1),
        ]
    }

    pub fn hit_arrow(&self, col: u16, row: u16) -> Option<Direction> {
        self.arrow_buttons()
            .into_iter()
            .find(|b| b.contains(col, row))
            .map(|b| b.direction)
    }

    /// Overlay window: a panel down the right side of the canvas.
    pub fn overlay_area(&self) -> Option<Area> {
        let TerminalContract { width, height } = self.canvas;
        let panel = (width / 2).min(OVERLAY_MAX_WIDTH);
        if panel < 8 || height < 6 {
            return None;
        }
        Some(Area {
            x: width - panel - 1,
            y: 1,
            width: panel,
            height: height - 4,
        })
    }

    /// Text area inside the overlay border and padding.
    pub fn overlay_text_area(&self) -> Option<Area> {
        let a = self.overlay_area()?;
        Some(Area {
            x: a.x + 2,
            y: a.y + 1,
            width: a.width - 4,
            height: a.height - 2,
        })
    }

    /// Largest scroll offset for a window, given its wrapped text.
    pub fn overlay_max_scroll(&self, window: &OverlayWindow) -> usize {
        match self.overlay_text_area() {
            Some(text) => window
                .text()
                .lines(text.width as usize)
                .len()
                .saturating_sub(text.height as usize),
            None => 0,
        }
    }
}

fn put(ops: &mut Vec<DrawOp>, x: u16, y: u16, ch: char, style: &Style, z_order: i32) {
    ops.push(DrawOp {
        x,
        y,
        ch,
        style: style.clone(),
        z_order,
    });
}

/// Write `text` from column `x`, stopping before it would pass `max` columns.
/// A wide glyph takes two columns; the cell after it is left alone.
fn put_str(ops: &mut Vec<DrawOp>, x: u16, y: u16, text: &str, max: u16, style: &Style, z: i32) {
    let mut col = 0u16;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0) as u16;
        if w == 0 {
            continue;
        }
        if col + w > max {
            break;
        }
        put(ops, x + col, y, ch, style, z);
        col += w;
    }
}

pub fn push_arrow_pad(ops: &mut Vec<DrawOp>, layout: &Layout) {
    let style = Style {
        fg: Some(Color::BLACK),
        bg: Some(Color::WHITE),
        bold: true,
        dim: false,
    };
    for b in layout.arrow_buttons() {
        put(ops, b.x, b.y, ' ', &style, Z_BUTTONS);
        put(ops, b.x + 1, b.y, b.glyph(), &style, Z_BUTTONS);
        put(ops, b.x + 2, b.y, ' ', &style, Z_BUTTONS);
    }
}

pub fn push_overlay(ops: &mut Vec<DrawOp>, layout: &Layout, window: &OverlayWindow) {
    let (Some(area), Some(text)) = (layout.overlay_area(), layout.overlay_text_area()) else {
        return;
    };
    let frame = Style {
        fg: Some(Color::WHITE),
        bg: Some(Color::BLACK),
        ..Style::default()
    };
    let right = area.x + area.width - 1;
    let bottom = area.y + area.height - 1;
    for y in area.y..=bottom {
        for x in area.x..=right {
            let ch = match (x == area.x, x == right, y == area.y, y == bottom) {
                (true, _, true, _) => '┌',
                (_, true, true, _) => '┐',
                (true, _, _, true) => '└',
                (_, true, _, true) => '┘',
                (_, _, true, _) | (_, _, _, true) => '─',
                (true, _, _, _) | (_, true, _, _) => '│',
                _ => ' ',
            };
            put(ops, x, y, ch, &frame, Z_OVERLAY);
        }
    }

    let lines = window.text().lines(text.width as usize);
    let title = Style {
        bold: true,
        ..frame.clone()
    };
    for (row, line) in lines
        .iter()
        .skip(window.scroll())
        .take(text.height as usize)
        .enumerate()
    {
        let style = if window.scroll() + row == 0 { &title } else { &frame };
        put_str(ops, text.x, text.y + row as u16, line, text.width, style, Z_OVERLAY + 1);
    }
}

/// The warning curtain at `offset` screen heights from covering the canvas.
pub fn push_curtain(ops: &mut Vec<DrawOp>, layout: &Layout, offset: f64) {
    let TerminalContract { width, height } = layout.canvas;
    let shift = (offset * f64::from(height)).round() as i64;
    let style = Style {
        fg: Some(Color::BLACK),
        bg: Some(Color::WHITE),
        ..Style::default()
    };
    let text_top = i64::from(height) / 2 - CURTAIN_TEXT.len() as i64 / 2;
    for row in 0..i64::from(height) {
        let y = row + shift;
        if y < 0 || y >= i64::from(height) {
            continue;
        }
        let y = y as u16;
        for x in 0..width {
            put(ops, x, y, ' ', &style, Z_CURTAIN);
        }
        let line_index = row - text_top;
        if let Some(line) = usize::try_from(line_index).ok().and_then(|i| CURTAIN_TEXT.get(i)) {
            let len = line.width() as u16;
            let x = width.saturating_sub(len) / 2;
            put_str(ops, x, y, line, width, &style, Z_CURTAIN + 1);
        }
    }
}
