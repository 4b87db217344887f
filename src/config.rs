use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::grid::Position;
use crate::grid::floor::{FloorPlan, default_floor_plan};
use crate::overlay::OverlayText;
use crate::room::chair::{ChairOption, default_chair_options};
use crate::room::sprites::{SpriteSpec, default_sprites};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default = "default_floor_plan")]
    pub floor_plan: FloorPlan,
    #[serde(default = "default_start")]
    pub start: Position,
    #[serde(default = "default_hotspot_a")]
    pub hotspot_a: Position,
    #[serde(default = "default_hotspot_b")]
    pub hotspot_b: Position,
    #[serde(default = "default_zoom")]
    pub zoom_factor: f64,
    /// Seed for goal placement; random when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub timings: Timings,
    #[serde(default = "OverlayText::default_top_view")]
    pub overlay_a: OverlayText,
    #[serde(default = "OverlayText::default_floor_plan")]
    pub overlay_b: OverlayText,
    #[serde(default = "default_sprites")]
    pub sprites: Vec<SpriteSpec>,
    #[serde(default = "default_chair_options")]
    pub chairs: Vec<ChairOption>,
}

fn default_start() -> Position { Position::new(3, 1) }
fn default_hotspot_a() -> Position { Position::new(6, 12) }
fn default_hotspot_b() -> Position { Position::new(1, 5) }
fn default_zoom() -> f64 { 2.0 }

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            key_bindings: KeyBindings::default(),
            floor_plan: default_floor_plan(),
            start: default_start(),
            hotspot_a: default_hotspot_a(),
            hotspot_b: default_hotspot_b(),
            zoom_factor: default_zoom(),
            seed: None,
            timings: Timings::default(),
            overlay_a: OverlayText::default_top_view(),
            overlay_b: OverlayText::default_floor_plan(),
            sprites: default_sprites(),
            chairs: default_chair_options(),
        }
    }
}

/// Fixed delays, in milliseconds, sequencing the screen and camera animations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// How long the warning screen stays up before the maze appears.
    pub warning_ms: u64,
    /// Full length of a warning-screen slide.
    pub slide_ms: u64,
    /// Point in a slide-up-down at which the screens underneath swap.
    pub swap_ms: u64,
    pub camera_delay_ms: u64,
    pub camera_duration_ms: u64,
    pub overlay_scroll_delay_ms: u64,
    pub overlay_scroll_interval_ms: u64,
    /// Frame period of the event loop.
    pub frame_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Timings {
            warning_ms: 1000,
            slide_ms: 2000,
            swap_ms: 1000,
            camera_delay_ms: 800,
            camera_duration_ms: 3000,
            overlay_scroll_delay_ms: 500,
            overlay_scroll_interval_ms: 600,
            frame_ms: 16,
        }
    }
}

impl Timings {
    pub fn warning(&self) -> Duration { Duration::from_millis(self.warning_ms) }
    pub fn slide(&self) -> Duration { Duration::from_millis(self.slide_ms) }
    pub fn swap(&self) -> Duration { Duration::from_millis(self.swap_ms) }
    pub fn camera_delay(&self) -> Duration { Duration::from_millis(self.camera_delay_ms) }
    pub fn camera_duration(&self) -> Duration { Duration::from_millis(self.camera_duration_ms) }
    pub fn overlay_scroll_delay(&self) -> Duration { Duration::from_millis(self.overlay_scroll_delay_ms) }
    pub fn overlay_scroll_interval(&self) -> Duration { Duration::from_millis(self.overlay_scroll_interval_ms) }
    pub fn frame(&self) -> Duration { Duration::from_millis(self.frame_ms.max(1)) }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_up: String,
    pub move_down: String,
    pub move_left: String,
    pub move_right: String,
    pub quit: String,
    pub cancel: String,
    pub return_to_grid: String,
    pub room_t_down: String,
    pub room_t_up: String,
    pub stuffiness_down: String,
    pub stuffiness_up: String,
    pub toggle_tint: String,
    pub scroll_up: String,
    pub scroll_down: String,
    pub fullscreen: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            move_up: "Up".into(),
            move_down: "Down".into(),
            move_left: "Left".into(),
            move_right: "Right".into(),
            quit: "q".into(),
            cancel: "Esc".into(),
            return_to_grid: "r".into(),
            room_t_down: "[".into(),
            room_t_up: "]".into(),
            stuffiness_down: "-".into(),
            stuffiness_up: "=".into(),
            toggle_tint: "x".into(),
            scroll_up: "PageUp".into(),
            scroll_down: "PageDown".into(),
            fullscreen: "F11".into(),
        }
    }
}

impl GameConfig {
    /// Load from the user config file, falling back to defaults.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("invalid config {} ({e}), using defaults", config_path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Load an explicitly named file; unlike `load`, failures are errors.
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("chair-maze");
        path.push("config.json");
        path
    }
}

/// Check whether a crossterm `KeyEvent` matches a binding string from config.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    if let Some(ch) = binding.strip_prefix("Ctrl-") {
        if !event.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        return ch.chars().next().is_some_and(|c| event.code == KeyCode::Char(c));
    }

    // Plain bindings never fire with Ctrl or Alt held.
    if event.modifiers.contains(KeyModifiers::CONTROL)
        || event.modifiers.contains(KeyModifiers::ALT)
    {
        return false;
    }

    match binding {
        "Right" => event.code == KeyCode::Right,
        "Left" => event.code == KeyCode::Left,
        "Up" => event.code == KeyCode::Up,
        "Down" => event.code == KeyCode::Down,
        "Enter" => event.code == KeyCode::Enter,
        "Esc" => event.code == KeyCode::Esc,
        "Space" => event.code == KeyCode::Char(' '),
        "Tab" => event.code == KeyCode::Tab,
        "PageUp" => event.code == KeyCode::PageUp,
        "PageDown" => event.code == KeyCode::PageDown,
        "Home" => event.code == KeyCode::Home,
        "End" => event.code == KeyCode::End,
        s => {
            if let Some(rest) = s.strip_prefix('F') {
                if let Ok(n) = rest.parse::<u8>() {
                    return event.code == KeyCode::F(n);
                }
            }
            s.chars().next().is_some_and(|c| event.code == KeyCode::Char(c))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn named_and_char_bindings() {
        assert!(matches_binding("Up", &key(KeyCode::Up)));
        assert!(matches_binding("PageDown", &key(KeyCode::PageDown)));
        assert!(matches_binding("F11", &key(KeyCode::F(11))));
        assert!(matches_binding("[", &key(KeyCode::Char('['))));
        assert!(!matches_binding("q", &key(KeyCode::Char('w'))));
    }

    #[test]
    fn modifiers_are_respected() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches_binding("Ctrl-c", &ctrl_c));
        assert!(!matches_binding("c", &ctrl_c));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"zoom_factor": 3.0, "seed": 9}"#).unwrap();
        assert_eq!(config.zoom_factor, 3.0);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.start, Position::new(3, 1));
        assert_eq!(config.key_bindings.move_up, "Up");
        assert_eq!(config.timings.camera_duration_ms, 3000);
        assert_eq!(config.floor_plan, default_floor_plan());
    }

    #[test]
    fn config_round_trips_through_json() {
        let json = serde_json::to_string(&GameConfig::default()).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.floor_plan, default_floor_plan());
        assert_eq!(back.sprites.len(), default_sprites().len());
    }
}
