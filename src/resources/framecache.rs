//! Memoized frame lookup.
//!
//! Turning `(sheet, clip, frame)` into a source rectangle involves a couple
//! of map lookups and bounds checks against the sheet size. The result never
//! changes during a run, so each key is resolved once and kept. Failures
//! resolve to solid-color placeholders and are cached the same way, which
//! also keeps the warning to one log line per key.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::warn;
use rustc_hash::FxHashMap;

use crate::resources::animationstore::AnimationSet;
use crate::resources::assetcatalog::AssetCatalog;
use crate::resources::palette::{BAD_FRAME, MISSING_SHEET, Rgba};

/// Clip name used to cache tileset cells.
pub const TILES_CLIP: &str = "#tiles";

/// An image the presentation sink can blit.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Cut from a loaded sheet.
    Region {
        sheet: Arc<str>,
        x: u32,
        y: u32,
        w: u32,
        h: u32,
    },
    /// Solid block standing in for a missing or invalid image.
    Placeholder { w: u32, h: u32, color: Rgba },
    /// A whole loaded image (title art, credit slides).
    Image { key: Arc<str>, w: u32, h: u32 },
}

impl Frame {
    pub fn size(&self) -> (u32, u32) {
        match self {
            Frame::Region { w, h, .. } | Frame::Placeholder { w, h, .. } | Frame::Image { w, h, .. } => {
                (*w, *h)
            }
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Frame::Placeholder { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FrameKey {
    sheet: Arc<str>,
    clip: String,
    index: usize,
}

#[derive(Resource, Debug, Default)]
pub struct FrameCache {
    frames: FxHashMap<FrameKey, Frame>,
}

impl FrameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame `index` of `clip_name` in `set`, with the index clamped into the clip.
    pub fn frame(
        &mut self,
        catalog: &AssetCatalog,
        set: &AnimationSet,
        clip_name: &str,
        index: usize,
    ) -> Frame {
        let clip = set.clip(clip_name);
        let index = clip
            .map(|c| index.min(c.frames.len().saturating_sub(1)))
            .unwrap_or(0);
        let key = FrameKey {
            sheet: set.sheet.clone(),
            clip: clip_name.to_string(),
            index,
        };
        if let Some(frame) = self.frames.get(&key) {
            return frame.clone();
        }

        let size = set.frame_size;
        let frame = match (catalog.sheet(&set.sheet), clip.and_then(|c| c.frames.get(index))) {
            (None, _) => {
                warn!("Sheet '{}' not loaded, using placeholder", set.sheet);
                Frame::Placeholder {
                    w: size,
                    h: size,
                    color: MISSING_SHEET,
                }
            }
            (Some(_), None) => {
                warn!("Clip '{}' missing or empty in sheet '{}'", clip_name, set.sheet);
                bad_frame(size)
            }
            (Some(info), Some(&(row, col))) => {
                let (x, y) = (col * size, row * size);
                if x + size > info.width || y + size > info.height {
                    warn!(
                        "Frame ({}, {}) of clip '{}' falls outside sheet '{}' ({}x{})",
                        row, col, clip_name, set.sheet, info.width, info.height
                    );
                    bad_frame(size)
                } else {
                    Frame::Region {
                        sheet: set.sheet.clone(),
                        x,
                        y,
                        w: size,
                        h: size,
                    }
                }
            }
        };
        self.frames.insert(key, frame.clone());
        frame
    }

    /// Cell of a tileset addressed by a 1-based gid (0 means empty and is never drawn).
    pub fn tile(&mut self, catalog: &AssetCatalog, sheet: &Arc<str>, tile_size: u32, gid: u32) -> Frame {
        let key = FrameKey {
            sheet: sheet.clone(),
            clip: TILES_CLIP.to_string(),
            index: gid as usize,
        };
        if let Some(frame) = self.frames.get(&key) {
            return frame.clone();
        }
        let frame = match catalog.sheet(sheet) {
            None => {
                warn!("Tileset '{}' not loaded, using placeholder", sheet);
                Frame::Placeholder {
                    w: tile_size,
                    h: tile_size,
                    color: MISSING_SHEET,
                }
            }
            Some(info) => {
                let per_row = (info.width / tile_size.max(1)).max(1);
                let rows = info.height / tile_size.max(1);
                let cell = gid.saturating_sub(1);
                if gid == 0 || cell / per_row >= rows {
                    warn!("Tile gid {} out of range for tileset '{}'", gid, sheet);
                    bad_frame(tile_size)
                } else {
                    Frame::Region {
                        sheet: sheet.clone(),
                        x: (cell % per_row) * tile_size,
                        y: (cell / per_row) * tile_size,
                        w: tile_size,
                        h: tile_size,
                    }
                }
            }
        };
        self.frames.insert(key, frame.clone());
        frame
    }

    /// A whole registered image, or a placeholder of `fallback` size.
    pub fn image(&mut self, catalog: &AssetCatalog, key: &str, fallback: (u32, u32)) -> Frame {
        match catalog.sheet(key) {
            Some(info) => Frame::Image {
                key: Arc::from(key),
                w: info.width,
                h: info.height,
            },
            None => Frame::Placeholder {
                w: fallback.0,
                h: fallback.1,
                color: MISSING_SHEET,
            },
        }
    }
}

fn bad_frame(size: u32) -> Frame {
    Frame::Placeholder {
        w: size,
        h: size,
        color: BAD_FRAME,
    }
}
