//! Raylib front end for the binary.
//!
//! - [`keyboard`] – [`InputSource`](tilequest::resources::input::InputSource) over the keyboard
//! - [`rendertarget`] – fixed-resolution framebuffer scaled to the window
//! - [`canvas`] – replay a recorded [`DrawList`](tilequest::systems::render::DrawList)
//! - [`assets`] – load textures and queue audio loads found under the asset root
//! - [`audio`] – the audio thread owning the raylib audio device

pub mod assets;
pub mod audio;
pub mod canvas;
pub mod keyboard;
pub mod rendertarget;
