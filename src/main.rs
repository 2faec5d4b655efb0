mod assets;
mod audio;
mod collision;
mod config;
mod effects;
mod error;
mod input;
mod logging;
mod obstacles;
mod player;
mod race;
mod render;
mod types;
mod utils;
mod weather;

use clap::Parser;
use log::{LevelFilter, error, info};
use macroquad::prelude::*;

use crate::input::InputTracker;
use crate::race::{RaceConfig, RaceSession};
use crate::types::MapTheme;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Player vehicle index (0..=4).
    #[arg(long, default_value_t = 0)]
    car: usize,

    /// Map theme: snow, storm or desert.
    #[arg(long, default_value = "snow")]
    theme: String,

    /// Track length in world units.
    #[arg(long, default_value_t = config::TRACK_LENGTH)]
    track_length: f64,

    /// Seed for obstacle and weather randomness (random when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Debug filter to specify log topics (e.g., "input,spawn,collision,race,weather")
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Fuel Racer".to_owned(),
        window_width: config::WINDOW_WIDTH as i32,
        window_height: config::WINDOW_HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize the logger
    let log_level = match args.log_level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    if let Err(e) = logging::init_logger(log_level, args.debug_filter) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    info!("Initializing Fuel Racer...");

    let theme = match MapTheme::parse(&args.theme) {
        Ok(theme) => theme,
        Err(e) => {
            error!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let assets = assets::GameAssets::load();
    let audio = audio::AudioManager::load().await;
    info!("Assets loaded.");

    let race_config = RaceConfig {
        selected_car: args.car,
        theme,
        track_length: args.track_length,
        seed: args.seed,
    };
    // The hosting layer would report the finished run upstream from here
    let on_finish = Box::new(|elapsed: f64| {
        info!("Run complete: {:.2}s", elapsed);
    });
    let mut session = match RaceSession::new(race_config, audio, on_finish) {
        Ok(session) => session,
        Err(e) => {
            error!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut renderer = render::Renderer::new();
    let mut input = InputTracker::new();
    let mut accumulator: f32 = 0.0;
    let mut final_time: Option<f64> = None;

    info!("Starting main loop...");
    loop {
        if is_key_down(KeyCode::Escape) {
            break;
        }

        input.poll_keyboard();

        // Fixed simulation update loop
        accumulator += get_frame_time();
        while accumulator >= config::TICK_DURATION as f32 {
            accumulator -= config::TICK_DURATION as f32;
            let snapshot = input.snapshot();
            session.step(&snapshot);
        }

        if session.finished() && final_time.is_none() {
            final_time = Some(session.elapsed_seconds());
        }

        // Draw frame
        let alpha = accumulator / config::TICK_DURATION as f32;
        renderer.draw_frame(&session, &assets, alpha);
        if let Some(time) = final_time {
            renderer.draw_finish_overlay(time);
        }
        next_frame().await;
    }

    info!("Exiting Fuel Racer.");
}
