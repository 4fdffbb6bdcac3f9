//! Game configuration resource.
//!
//! Settings come from an INI file. Every key is optional; anything missing or
//! unreadable keeps its default so the game always starts.
//!
//! # Configuration File Format
//!
//! ```ini
//! [render]
//! width = 320
//! height = 240
//!
//! [window]
//! scale = 3
//! target_fps = 60
//! fullscreen = false
//!
//! [paths]
//! assets = ./assets
//! highscore = ./data/highscore.txt
//!
//! [game]
//! levels = level-1, level-last
//! start_debug = false
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_RENDER_WIDTH: u32 = 320;
const DEFAULT_RENDER_HEIGHT: u32 = 240;
const DEFAULT_WINDOW_SCALE: u32 = 3;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const DEFAULT_ASSETS_DIR: &str = "./assets";
const DEFAULT_HIGHSCORE_PATH: &str = "./data/highscore.txt";
pub const DEFAULT_LEVELS: [&str; 2] = ["level-1", "level-last"];

/// Game configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Internal render width in pixels.
    pub render_width: u32,
    /// Internal render height in pixels.
    pub render_height: u32,
    /// Integer window scale over the render size.
    pub window_scale: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Root of `images/`, `sounds/`, `music/` and `levels/`.
    pub assets_dir: PathBuf,
    pub highscore_path: PathBuf,
    /// Level ids in play order.
    pub levels: Vec<String>,
    pub start_debug: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            render_width: DEFAULT_RENDER_WIDTH,
            render_height: DEFAULT_RENDER_HEIGHT,
            window_scale: DEFAULT_WINDOW_SCALE,
            target_fps: DEFAULT_TARGET_FPS,
            fullscreen: DEFAULT_FULLSCREEN,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            highscore_path: PathBuf::from(DEFAULT_HIGHSCORE_PATH),
            levels: DEFAULT_LEVELS.iter().map(|s| s.to_string()).collect(),
            start_debug: false,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [render] section
        if let Some(width) = config.getuint("render", "width").ok().flatten() {
            self.render_width = width as u32;
        }
        if let Some(height) = config.getuint("render", "height").ok().flatten() {
            self.render_height = height as u32;
        }

        // [window] section
        if let Some(scale) = config.getuint("window", "scale").ok().flatten() {
            self.window_scale = (scale as u32).max(1);
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(fullscreen) = config.getbool("window", "fullscreen").ok().flatten() {
            self.fullscreen = fullscreen;
        }

        // [paths] section
        if let Some(assets) = config.get("paths", "assets") {
            self.assets_dir = PathBuf::from(assets);
        }
        if let Some(highscore) = config.get("paths", "highscore") {
            self.highscore_path = PathBuf::from(highscore);
        }

        // [game] section
        if let Some(levels) = config.get("game", "levels") {
            let parsed = parse_levels(&levels);
            if parsed.is_empty() {
                warn!("Config [game] levels is empty, keeping {:?}", self.levels);
            } else {
                self.levels = parsed;
            }
        }
        if let Some(debug) = config.getbool("game", "start_debug").ok().flatten() {
            self.start_debug = debug;
        }

        info!(
            "Loaded config: {}x{} render, x{} window, fps={}, fullscreen={}, assets={:?}, levels={:?}",
            self.render_width,
            self.render_height,
            self.window_scale,
            self.target_fps,
            self.fullscreen,
            self.assets_dir,
            self.levels
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("render", "width", Some(self.render_width.to_string()));
        config.set("render", "height", Some(self.render_height.to_string()));

        config.set("window", "scale", Some(self.window_scale.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "fullscreen", Some(self.fullscreen.to_string()));

        config.set(
            "paths",
            "assets",
            Some(self.assets_dir.to_string_lossy().into_owned()),
        );
        config.set(
            "paths",
            "highscore",
            Some(self.highscore_path.to_string_lossy().into_owned()),
        );

        config.set("game", "levels", Some(self.levels.join(", ")));
        config.set("game", "start_debug", Some(self.start_debug.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Rotate the level sequence so it begins at `name`.
    ///
    /// Unknown names are appended as a single-level run in front of the rest.
    pub fn start_at_level(&mut self, name: &str) {
        match self.levels.iter().position(|l| l == name) {
            Some(idx) => {
                self.levels.drain(..idx);
            }
            None => {
                warn!("Level '{}' is not in the configured sequence", name);
                self.levels.insert(0, name.to_string());
            }
        }
    }

    /// Window size in pixels.
    pub fn window_size(&self) -> (u32, u32) {
        (
            self.render_width * self.window_scale,
            self.render_height * self.window_scale,
        )
    }

    pub fn levels_dir(&self) -> PathBuf {
        self.assets_dir.join("levels")
    }
}

fn parse_levels(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
