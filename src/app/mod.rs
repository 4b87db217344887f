//! App: the interactive terminal front end.
//!
//! Owns the terminal while the game runs. Each pass of the loop ticks the
//! game clock, composes the active screen, rasterizes it and writes the
//! resulting frame (full or diff). Input is polled with the frame period as
//! the timeout.

pub mod draw;
pub mod input;
pub mod state;
pub mod ui;

use std::io::{self, Write};
use std::time::Instant;

use anyhow::{Result, bail};
use crossterm::{cursor, event, execute, terminal};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::renderer::{FrameSequencer, Renderer};
use crate::screens::Screen;
use crate::types::TerminalContract;
use input::Action;
use state::GameState;

/// Rows reserved above the canvas for the menu bar.
pub const CANVAS_OFFSET: u16 = 1;
/// Menu bar plus status line.
pub const CHROME_ROWS: u16 = 2;

const MIN_WIDTH: u16 = 20;
const MIN_HEIGHT: u16 = 8;

/// Canvas left for the game in a terminal of the given size.
pub fn canvas_for(width: u16, height: u16) -> TerminalContract {
    TerminalContract {
        width,
        height: height.saturating_sub(CHROME_ROWS),
    }
}

/// Build the RNG for goal placement: seeded when the config says so.
pub fn session_rng(config: &GameConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub struct App {
    config: GameConfig,
    state: GameState,
    sequencer: FrameSequencer,
    started: Instant,
    fullscreen: bool,
    menu_screen: Option<Screen>,
}

impl App {
    pub fn new(config: GameConfig) -> Result<Self> {
        let (term_w, term_h) = terminal::size()?;
        if term_w < MIN_WIDTH || term_h < MIN_HEIGHT + CHROME_ROWS {
            bail!(
                "Terminal too small: need {}x{}, have {}x{}",
                MIN_WIDTH,
                MIN_HEIGHT + CHROME_ROWS,
                term_w,
                term_h,
            );
        }
        let mut rng = session_rng(&config);
        let started = Instant::now();
        let state = GameState::new(&config, &mut rng, canvas_for(term_w, term_h), started.elapsed())?;
        Ok(App {
            config,
            state,
            sequencer: FrameSequencer::new(),
            started,
            fullscreen: false,
            menu_screen: None,
        })
    }

    /// Run the game in the terminal.
    ///
    /// Sets up the terminal, enters the event loop, and restores the terminal
    /// on exit (even on error).
    pub fn play(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let result = self.run_loop(&mut stdout);

        // Always restore terminal state.
        let _ = execute!(
            stdout,
            cursor::Show,
            event::DisableMouseCapture,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();

        result
    }

    fn run_loop<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let frame = self.config.timings.frame();
        while !self.state.should_quit() {
            let now = self.started.elapsed();
            self.state.tick(now);
            self.render(out, now)?;

            if !event::poll(frame)? {
                continue;
            }
            let ev = event::read()?;
            let Some(action) = input::event_action(&self.config.key_bindings, &ev, CANVAS_OFFSET)
            else {
                continue;
            };
            match action {
                Action::Fullscreen => {
                    self.fullscreen = !self.fullscreen;
                    let seq: &[u8] = if self.fullscreen { b"\x1b[10;1t" } else { b"\x1b[10;0t" };
                    out.write_all(seq)?;
                    out.flush()?;
                }
                Action::Resize { .. } => {
                    self.sequencer.invalidate();
                    self.menu_screen = None;
                    execute!(out, terminal::Clear(terminal::ClearType::All))?;
                }
                _ => {}
            }
            self.state.handle(action, self.started.elapsed());
        }
        Ok(())
    }

    fn render<W: Write>(&mut self, out: &mut W, now: std::time::Duration) -> Result<()> {
        let screen = self.state.screen();
        if self.menu_screen != Some(screen) {
            draw::render_menubar(out, menu_items(screen))?;
            self.menu_screen = Some(screen);
        }

        let canvas = self.state.layout().canvas;
        let ops = self.state.compose(now);
        let grid = Renderer::rasterize(&ops, &canvas);
        let frame = self.sequencer.push(grid);
        draw::render_frame(out, &frame, CANVAS_OFFSET)?;
        draw::render_status(out, canvas.height + CANVAS_OFFSET, &self.status())?;
        out.flush()?;
        Ok(())
    }

    fn status(&self) -> String {
        match self.state.screen() {
            Screen::Warning => " ...".to_string(),
            Screen::Grid => {
                let session = self.state.session();
                format!(
                    " cell {} | visited {} | {}",
                    session.position(),
                    session.visited().len(),
                    if session.occupancy() { "inside" } else { "outside" },
                )
            }
            Screen::Main => {
                let room = self.state.room();
                format!(
                    " space {:.2} | stuffiness {:.2} | {}{}",
                    room.t(),
                    room.stuffiness(),
                    room.chair().current().name,
                    if room.autoplay_running() { " | autoplay" } else { "" },
                )
            }
        }
    }
}

fn menu_items(screen: Screen) -> &'static [&'static str] {
    match screen {
        Screen::Warning => &["[q][Esc] quit"],
        Screen::Grid => &[
            "[←↑↓→] move",
            "[PgUp/PgDn] scroll",
            "[q][Esc] quit",
            "[F11] full",
        ],
        Screen::Main => &[
            "[bracket keys] space",
            "[-][=] stuffiness",
            "[x] tint",
            "[r] back",
            "[q][Esc] quit",
        ],
    }
}
