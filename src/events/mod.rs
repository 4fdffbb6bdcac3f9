//! Event types and observers.
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`gamestate`] – screen change notifications for the high-level flow
//! - [`switchdebug`] – toggle debug overlays on/off
pub mod audio;
pub mod gamestate;
pub mod switchdebug;
