//! Chair maze: a terminal maze that leads into a room whose walls and
//! furniture respond to two sliders.

pub mod app;
pub mod config;
pub mod error;
pub mod grid;
pub mod overlay;
pub mod record;
pub mod renderer;
pub mod room;
pub mod scene;
pub mod screens;
pub mod types;
