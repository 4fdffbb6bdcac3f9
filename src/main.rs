//! tilequest main entry point.
//!
//! A tile-based action game built on:
//! - **bevy_ecs** for the simulation world (the `tilequest` library)
//! - **raylib** for the window, textures, keyboard and audio
//!
//! # Main Loop
//!
//! 1. Load `config.ini`, apply command line overrides
//! 2. Open the window, load assets, build the world and the schedule
//! 3. Start the audio thread and queue the sound/music loads
//! 4. Each frame: [`tick`] into a [`DrawList`], then present it
//! 5. Stop the audio thread on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --level level-last --debug
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod backend;

use std::path::PathBuf;

use bevy_ecs::message::Messages;
use clap::Parser;
use log::{error, info, warn};

use tilequest::events::audio::AudioCmd;
use tilequest::game::{build_schedule, quit_requested, setup_world, tick};
use tilequest::resources::audio::{setup_audio, shutdown_audio};
use tilequest::resources::gameconfig::GameConfig;
use tilequest::resources::highscore::HighScoreStore;
use tilequest::resources::tilemap::JsonTileMapProvider;
use tilequest::systems::render::DrawList;

use crate::backend::assets::load_assets;
use crate::backend::audio::audio_thread;
use crate::backend::canvas::present;
use crate::backend::keyboard::KeyboardInput;
use crate::backend::rendertarget::RenderTarget;

/// tilequest, a tile-based action adventure
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Start with the debug overlays enabled.
    #[arg(long)]
    debug: bool,

    /// Start the level sequence at this level id.
    #[arg(long, value_name = "NAME")]
    level: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if cli.debug {
        config.start_debug = true;
    }
    if let Some(level) = &cli.level {
        config.start_at_level(level);
    }
    if !config.assets_dir.is_dir() {
        error!("Assets directory {:?} not found", config.assets_dir);
        std::process::exit(1);
    }

    let (window_w, window_h) = config.window_size();
    let (mut rl, thread) = raylib::init()
        .size(window_w as i32, window_h as i32)
        .resizable()
        .title("tilequest")
        .build();
    rl.set_target_fps(config.target_fps);
    // Escape is a game key, not a window close
    rl.set_exit_key(None);
    if config.fullscreen {
        rl.toggle_fullscreen();
    }

    let mut target =
        match RenderTarget::new(&mut rl, &thread, config.render_width, config.render_height) {
            Ok(target) => target,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        };

    let assets = load_assets(&mut rl, &thread, &config.assets_dir);
    let provider = JsonTileMapProvider::new(config.levels_dir());
    let highscore = HighScoreStore::new(config.highscore_path.clone());

    let mut world = setup_world(config, provider, assets.catalog, highscore);
    setup_audio(&mut world, audio_thread);
    {
        let mut cmds = world.resource_mut::<Messages<AudioCmd>>();
        for cmd in assets.audio_cmds {
            cmds.write(cmd);
        }
    }
    let textures = assets.textures;

    let mut schedule = build_schedule();
    let mut frame = DrawList::new();

    // --------------- Main loop ---------------
    while !quit_requested(&world) {
        let dt = rl.get_frame_time();
        frame.clear_cmds();
        {
            let keys = KeyboardInput::new(&rl);
            tick(&mut world, &mut schedule, &keys, dt, &mut frame);
        }
        present(&mut rl, &thread, &mut target, &textures, &frame);
    }

    info!("Bye");
    shutdown_audio(&mut world);
}
