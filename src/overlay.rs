//! The two hotspot windows. Each auto-scrolls a short while after it opens,
//! until the player scrolls it by hand.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::config::Timings;
use crate::grid::triggers::Triggers;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayText {
    pub title: String,
    pub paragraphs: Vec<String>,
}

impl OverlayText {
    pub fn default_top_view() -> Self {
        OverlayText {
            title: "TOP VIEW".into(),
            paragraphs: vec![
                "Seen from above, the room is a shallow box. The back wall sits in the middle \
                 and the side walls fan out toward you."
                    .into(),
                "The space slider pushes the side walls in and shrinks the back wall. The \
                 stuffiness slider fills the room, one object at a time."
                    .into(),
                "There is one chair. Click it to see another.".into(),
                "Nothing here is to scale.".into(),
            ],
        }
    }

    pub fn default_floor_plan() -> Self {
        OverlayText {
            title: "FLOOR PLAN".into(),
            paragraphs: vec![
                "You are walking the plan of the building: corridors on either side, a block of \
                 walls and voids down the middle, and a room at the bottom nobody draws."
                    .into(),
                "White bars are walls. Empty cells are nothing at all.".into(),
                "Find the star to leave the plan and enter the room.".into(),
            ],
        }
    }

    /// Title, a blank line, then the paragraphs word-wrapped to `width`
    /// terminal columns with a blank line between them.
    pub fn lines(&self, width: usize) -> Vec<String> {
        let width = width.max(1);
        let mut lines = vec![self.title.clone(), String::new()];
        for (i, paragraph) in self.paragraphs.iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            lines.extend(wrap(paragraph, width));
        }
        lines
    }
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.width() + 1 + word.width() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AutoScroll {
    Off,
    Pending { start: Duration },
    Running { next: Duration },
    Stopped,
}

#[derive(Debug, Clone)]
pub struct OverlayWindow {
    text: OverlayText,
    visible: bool,
    scroll: usize,
    auto: AutoScroll,
    delay: Duration,
    interval: Duration,
}

impl OverlayWindow {
    pub fn new(text: OverlayText, timings: &Timings) -> Self {
        OverlayWindow {
            text,
            visible: false,
            scroll: 0,
            auto: AutoScroll::Off,
            delay: timings.overlay_scroll_delay(),
            interval: timings.overlay_scroll_interval().max(Duration::from_millis(1)),
        }
    }

    pub fn text(&self) -> &OverlayText {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn is_auto_scrolling(&self) -> bool {
        matches!(self.auto, AutoScroll::Running { .. })
    }

    /// Set visibility. Only a hidden-to-shown change rewinds the window and
    /// arms the auto-scroll.
    pub fn set_visible(&mut self, visible: bool, now: Duration) {
        if visible && !self.visible {
            self.scroll = 0;
            self.auto = AutoScroll::Pending {
                start: now + self.delay,
            };
        } else if !visible {
            self.auto = AutoScroll::Off;
        }
        self.visible = visible;
    }

    /// Manual scroll; stops the auto-scroll until the window is next opened.
    pub fn scroll_by(&mut self, delta: isize, max_scroll: usize) {
        if !self.visible {
            return;
        }
        self.auto = AutoScroll::Stopped;
        self.scroll = self.scroll.saturating_add_signed(delta).min(max_scroll);
    }

    /// Advance the auto-scroll. Returns true when the scroll position moved.
    pub fn tick(&mut self, now: Duration, max_scroll: usize) -> bool {
        let mut next = match self.auto {
            AutoScroll::Pending { start } if now >= start => start,
            AutoScroll::Running { next } => next,
            _ => return false,
        };
        let before = self.scroll;
        while next <= now {
            if self.scroll < max_scroll {
                self.scroll += 1;
            }
            next += self.interval;
        }
        self.auto = AutoScroll::Running { next };
        self.scroll != before
    }
}

/// Overlay A (top view) and overlay B (floor plan).
#[derive(Debug, Clone)]
pub struct Overlays {
    pub a: OverlayWindow,
    pub b: OverlayWindow,
}

impl Overlays {
    pub fn new(a: OverlayText, b: OverlayText, timings: &Timings) -> Self {
        Overlays {
            a: OverlayWindow::new(a, timings),
            b: OverlayWindow::new(b, timings),
        }
    }

    pub fn apply(&mut self, triggers: &Triggers, now: Duration) {
        self.a.set_visible(triggers.overlay_a, now);
        self.b.set_visible(triggers.overlay_b, now);
    }

    /// The open window, A first when both are.
    pub fn open_mut(&mut self) -> Option<&mut OverlayWindow> {
        if self.a.is_visible() {
            Some(&mut self.a)
        } else if self.b.is_visible() {
            Some(&mut self.b)
        } else {
            None
        }
    }
}
