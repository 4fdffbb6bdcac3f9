//! Framebuffer at the game's internal resolution.
//!
//! Every frame is drawn into the texture at `render_width × render_height`
//! and then scaled to the window, keeping the aspect ratio with black bars.

use raylib::ffi::{self, TextureFilter};
use raylib::prelude::*;

pub struct RenderTarget {
    pub texture: RenderTexture2D,
    pub game_width: u32,
    pub game_height: u32,
}

impl RenderTarget {
    /// Pixel art: point filtering, no blur when scaled.
    pub fn new(
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = rl
            .load_render_texture(th, width, height)
            .map_err(|e| format!("Failed to create render texture: {}", e))?;
        unsafe {
            ffi::SetTextureFilter(
                texture.texture,
                TextureFilter::TEXTURE_FILTER_POINT as i32,
            );
        }
        Ok(Self {
            texture,
            game_width: width,
            game_height: height,
        })
    }

    /// Source rectangle with negative height, OpenGL textures are stored upside down.
    pub fn source_rect(&self) -> Rectangle {
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: self.game_width as f32,
            height: -(self.game_height as f32),
        }
    }

    /// Largest rectangle with the game's aspect ratio centered in the window.
    pub fn dest_rect(&self, window_w: i32, window_h: i32) -> Rectangle {
        let scale = (window_w as f32 / self.game_width as f32)
            .min(window_h as f32 / self.game_height as f32);
        let width = self.game_width as f32 * scale;
        let height = self.game_height as f32 * scale;
        Rectangle {
            x: (window_w as f32 - width) * 0.5,
            y: (window_h as f32 - height) * 0.5,
            width,
            height,
        }
    }
}
