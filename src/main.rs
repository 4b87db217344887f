use std::path::Path;
use std::{fs, process};

use anyhow::{Context, Result, bail};
use env_logger::{Env, Target};

use chair_maze::{
    app::{App, canvas_for},
    config::GameConfig,
    record::{parse_moves, record},
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const PLAY_USAGE: &str = "chair-maze play [config.json]";
const RECORD_USAGE: &str = "chair-maze record <moves> <output.json> [config.json]";
const CONFIG_USAGE: &str = "chair-maze config";

/// Virtual terminal size used for recordings.
const RECORD_TERMINAL: (u16, u16) = (80, 24);

fn run() -> Result<()> {
    init_logging()?;
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        Some("play") => {
            let config = load_config(args.next().as_deref())?;
            play(config)
        }
        Some("record") => {
            let moves = args.next().context(RECORD_USAGE)?;
            let output_path = args.next().context(RECORD_USAGE)?;
            let config = load_config(args.next().as_deref())?;
            record_moves(&moves, &output_path, &config)
        }
        Some("config") => {
            let json = serde_json::to_string_pretty(&GameConfig::default())?;
            println!("{json}");
            Ok(())
        }
        _ => bail!(
            "Chair maze: walk the floor plan, find the star, furnish the room\n\nUsage:\n  {PLAY_USAGE}\n  {RECORD_USAGE}\n  {CONFIG_USAGE}"
        ),
    }
}

/// `CHAIR_MAZE_LOG` sets the filter. Logs go to the file named by
/// `CHAIR_MAZE_LOG_FILE` when set; stderr would draw over the game.
fn init_logging() -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::new().filter_or("CHAIR_MAZE_LOG", "warn"));
    if let Some(path) = std::env::var_os("CHAIR_MAZE_LOG_FILE") {
        let file = fs::File::create(&path)
            .with_context(|| format!("Failed to create log file {}", Path::new(&path).display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn load_config(path: Option<&str>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load_from(Path::new(path)),
        None => Ok(GameConfig::load()),
    }
}

fn play(config: GameConfig) -> Result<()> {
    let mut app = App::new(config)?;
    app.play()
}

fn record_moves(script: &str, output_path: &str, config: &GameConfig) -> Result<()> {
    let moves = parse_moves(script)?;
    let (w, h) = RECORD_TERMINAL;
    let recording = record(config, &moves, canvas_for(w, h))?;

    let output_json = serde_json::to_string_pretty(&recording)?;
    fs::write(output_path, &output_json)
        .with_context(|| format!("Failed to write {output_path}"))?;

    eprintln!(
        "Recorded {} frames from {} moves -> {}",
        recording.frames.len(),
        moves.len(),
        output_path,
    );

    Ok(())
}
