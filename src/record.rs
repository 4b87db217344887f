//! Headless recorder: plays a move script against a fresh game on a virtual
//! canvas and captures every frame (one full frame, then diffs).

use std::time::Duration;

use anyhow::{Context, Result, bail};

use crate::app::session_rng;
use crate::app::state::GameState;
use crate::config::GameConfig;
use crate::grid::player::Direction;
use crate::renderer::{FrameSequencer, Renderer};
use crate::types::{Marker, Recording, TerminalContract};

/// Game time between two recorded moves.
const MOVE_INTERVAL: Duration = Duration::from_millis(250);

/// Parse a move script: direction tokens separated by whitespace or commas.
pub fn parse_moves(script: &str) -> Result<Vec<Direction>> {
    script
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(|t| Direction::parse(t).with_context(|| format!("Unknown move {t:?}")))
        .collect()
}

struct Recorder {
    state: GameState,
    canvas: TerminalContract,
    sequencer: FrameSequencer,
    recording: Recording,
    now: Duration,
}

impl Recorder {
    fn capture(&mut self) {
        self.state.tick(self.now);
        let ops = self.state.compose(self.now);
        let grid = Renderer::rasterize(&ops, &self.canvas);
        let frame = self.sequencer.push(grid);
        self.recording.frames.push(frame);
    }

    fn mark(&mut self, label: impl Into<String>) {
        self.recording.markers.push(Marker {
            frame_index: self.recording.frames.len().saturating_sub(1),
            label: label.into(),
        });
    }

    /// Capture frames every `MOVE_INTERVAL` until `until`.
    fn run_until(&mut self, until: Duration) {
        while self.now < until {
            self.now = (self.now + MOVE_INTERVAL).min(until);
            self.capture();
        }
    }
}

/// Record `moves` played from the start cell. The warning, the camera
/// intro and any screen sweep caused by reaching the goal are captured
/// along the way.
pub fn record(config: &GameConfig, moves: &[Direction], canvas: TerminalContract) -> Result<Recording> {
    if canvas.width == 0 || canvas.height == 0 {
        bail!("Canvas must not be empty, got {}x{}", canvas.width, canvas.height);
    }
    let mut rng = session_rng(config);
    let state = GameState::new(config, &mut rng, canvas, Duration::ZERO)?;
    let mut rec = Recorder {
        state,
        canvas,
        sequencer: FrameSequencer::new(),
        recording: Recording {
            contract: canvas,
            frames: Vec::new(),
            markers: Vec::new(),
        },
        now: Duration::ZERO,
    };
    rec.capture();
    rec.mark("warning");

    let t = &config.timings;
    let grid_at = t.warning();
    let settled = grid_at + t.slide().max(t.camera_delay() + t.camera_duration());
    rec.run_until(settled);
    rec.mark("grid");

    for (i, &direction) in moves.iter().enumerate() {
        rec.now += MOVE_INTERVAL;
        let outcome = rec.state.move_player(direction, rec.now);
        rec.capture();
        let Some(outcome) = outcome else {
            log::debug!("move {i} ({direction:?}) rejected");
            rec.mark(format!("{i}: {direction:?} rejected"));
            continue;
        };
        let to = outcome.step.to;
        if outcome.triggers.overlay_a {
            rec.mark(format!("{i}: overlay A at {to}"));
        }
        if outcome.triggers.overlay_b {
            rec.mark(format!("{i}: overlay B at {to}"));
        }
        if outcome.triggers.enter_main {
            rec.mark(format!("{i}: goal at {to}"));
            let until = rec.now + t.slide();
            rec.run_until(until);
            rec.mark("room");
        }
    }

    log::info!(
        "recorded {} frames, {} markers",
        rec.recording.frames.len(),
        rec.recording.markers.len()
    );
    Ok(rec.recording)
}
