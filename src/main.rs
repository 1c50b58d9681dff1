//! # Tallgrass Main Entry Point
//!
//! Loads the configuration, builds the store and runs the frame loop.

use clap::Parser;
use log::{debug, error, info};
use macroquad::prelude::*;
use tallgrass::{
    config::DEFAULT_TILE_SIZE, input_to_action, GameConfig, GameStore, InputHandler,
    MacroquadDisplay, PlayerInput, TallgrassError, TallgrassResult, WildSource,
};

/// Command line arguments for Tallgrass.
#[derive(Parser, Debug)]
#[command(name = "tallgrass")]
#[command(about = "A top-down creature-collection game with turn-based battles")]
#[command(version)]
struct Args {
    /// Random seed for encounters and battles
    #[arg(short, long)]
    seed: Option<u64>,

    /// Game configuration file (JSON)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Roll wild creatures from the creature dex instead of the starter table
    #[arg(long)]
    dex_encounters: bool,
}

fn window_conf() -> Conf {
    let (width, height) = MacroquadDisplay::new(DEFAULT_TILE_SIZE).window_size(
        tallgrass::config::DEFAULT_MAP_WIDTH,
        tallgrass::config::DEFAULT_MAP_HEIGHT,
    );
    Conf {
        window_title: "Tallgrass".to_string(),
        window_width: width as i32,
        window_height: height as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() -> TallgrassResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;
    info!("Starting Tallgrass v{}", tallgrass::VERSION);

    let config = load_config(&args)?;
    let store = GameStore::from_config(config)?;
    run_game_loop(store).await
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> TallgrassResult<()> {
    let filter: log::LevelFilter = log_level
        .parse()
        .map_err(|_| TallgrassError::InvalidConfig(format!("unknown log level {:?}", log_level)))?;

    #[cfg(feature = "dev-tools")]
    {
        use tracing_subscriber::EnvFilter;

        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter.as_str().to_lowercase()))
            .with_target(false)
            .init();
        tracing::debug!("tracing subscriber installed at {}", filter);
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .filter_level(filter)
            .parse_default_env()
            .init();
    }

    Ok(())
}

fn load_config(args: &Args) -> TallgrassResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            GameConfig::load(path)?
        }
        None => GameConfig::default(),
    };

    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.dex_encounters {
        config.wild_source = WildSource::Dex;
    }
    Ok(config)
}

/// Main game loop: input, dispatch, clock, events, paint.
async fn run_game_loop(mut store: GameStore) -> TallgrassResult<()> {
    let input_handler = InputHandler::new();
    let mut display = MacroquadDisplay::new(store.state().map.tile_size);
    display.add_message("Welcome to Tallgrass!");
    display.add_message("Walk into the tall grass to find wild creatures. F1 toggles help.");

    // sub-millisecond frame time carried to the next frame
    let mut carry_ms = 0.0f32;

    loop {
        if let Some(input) = input_handler.get_input() {
            match input {
                PlayerInput::Quit => {
                    info!("Player quit the game");
                    break;
                }
                PlayerInput::Help => display.show_help = !display.show_help,
                _ => {
                    if let Some(action) = input_to_action(input, store.state()) {
                        store.dispatch(action);
                    }
                }
            }
        }

        carry_ms += get_frame_time() * 1000.0;
        let elapsed = carry_ms.floor();
        carry_ms -= elapsed;
        store.advance(elapsed as u64);

        let events = store.drain_events();
        display.record_events(&events);

        display.render_game(store.state());
        next_frame().await;
    }

    match store.state().to_json() {
        Ok(json) => debug!("final state: {}", json),
        Err(e) => error!("could not serialize final state: {}", e),
    }
    info!("Game loop ended");
    Ok(())
}
