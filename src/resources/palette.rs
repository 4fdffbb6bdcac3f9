//! Colors used by overlays, placeholders and the HUD.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
pub const RETRO_BROWN: Rgba = Rgba::rgb(88, 68, 34);
pub const RETRO_GREEN: Rgba = Rgba::rgb(120, 164, 106);
pub const RETRO_CREAM: Rgba = Rgba::rgb(212, 210, 155);
/// Stand-in for a sheet that failed to load.
pub const MISSING_SHEET: Rgba = Rgba::rgb(255, 0, 255);
/// Stand-in for a frame that could not be cut from its sheet.
pub const BAD_FRAME: Rgba = Rgba::rgb(255, 0, 0);
pub const DEBUG_RED: Rgba = Rgba::rgb(255, 0, 0);
pub const DEBUG_GREEN: Rgba = Rgba::rgb(0, 255, 0);
pub const DEBUG_YELLOW: Rgba = Rgba::rgb(255, 255, 0);
pub const DEBUG_BLUE: Rgba = Rgba::rgb(0, 0, 255);
