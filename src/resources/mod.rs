//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `animationstore` – clip definitions shared by every entity of a kind
//! - `assetcatalog` – which sheets, sounds and music the platform has loaded
//! - `audio` – bridge and channels for the background audio thread
//! - `camera2d` – viewport into the level used for culling
//! - `collisiongrid` – per-level solid tiles
//! - `debugmode` – presence toggles the debug overlays
//! - `framecache` – resolved frame regions and placeholders
//! - `gameconfig` – INI-backed settings
//! - `gameprogress` – score, key and level index of the running game
//! - `gamestate` – authoritative and pending screen
//! - `highscore` – persisted best score
//! - `input` – per-tick action state with edges and debounce
//! - `level` – level sequence, transition and background tiles
//! - `palette` – colors used by overlays and placeholders
//! - `screenflow` – fades, pause, victory freeze, logo and credits timers
//! - `systemsstore` – registry of screen enter hooks by name
//! - `tilemap` – level data and the providers that load it
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod assetcatalog;
pub mod audio;
pub mod camera2d;
pub mod collisiongrid;
pub mod debugmode;
pub mod framecache;
pub mod gameconfig;
pub mod gameprogress;
pub mod gamestate;
pub mod highscore;
pub mod input;
pub mod level;
pub mod palette;
pub mod screenflow;
pub mod systemsstore;
pub mod tilemap;
pub mod worldtime;
