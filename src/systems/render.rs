//! Frame composition.
//!
//! [`render_frame`] walks the world once per tick, after the schedule, and
//! emits draw calls into a [`PresentationSink`]. The core never sees pixels:
//! it hands out [`Frame`]s resolved through the [`FrameCache`] and the sink
//! blits them. [`DrawList`] records the calls; the binary replays it on the
//! window and tests inspect it.
//!
//! Game screen order: background tiles, animated tiles, pickups, enemies and
//! boss, player and sword, HUD, debug overlays, level fade, pause overlay.
//! The screen fade goes on top of every screen.
use bevy_ecs::prelude::*;

use crate::components::animatedtile::AnimatedTile;
use crate::components::animation::Animation;
use crate::components::behavior::Behavior;
use crate::components::boss::Boss;
use crate::components::boxcollider::{BoxCollider, Rect};
use crate::components::door::Door;
use crate::components::enemy::Enemy;
use crate::components::mapposition::{MapPosition, TILE_SIZE};
use crate::components::pickup::Pickup;
use crate::components::player::{Player, SWORD_DRAW_OFFSET, SWORD_SET};
use crate::resources::animationstore::{AnimationClip, AnimationSet, AnimationStore};
use crate::resources::assetcatalog::AssetCatalog;
use crate::resources::camera2d::Camera2D;
use crate::resources::collisiongrid::CollisionGrid;
use crate::resources::debugmode::DebugMode;
use crate::resources::framecache::{Frame, FrameCache};
use crate::resources::gameprogress::GameProgress;
use crate::resources::gamestate::{GameState, Screens};
use crate::resources::level::{LEVEL_TRANSITION_DURATION, LevelState};
use crate::resources::palette::{
    BAD_FRAME, BLACK, DEBUG_BLUE, DEBUG_GREEN, DEBUG_RED, DEBUG_YELLOW, RETRO_BROWN, RETRO_CREAM,
    RETRO_GREEN, Rgba,
};
use crate::resources::screenflow::ScreenFlow;
use crate::resources::worldtime::WorldTime;

pub const HUD_SET: &str = "hud";
pub const LOGO_IMAGE: &str = "logo";
pub const TITLE_IMAGE: &str = "title";
const TEXT_SMALL: i32 = 16;
const TEXT_LARGE: i32 = 24;
const HUD_TEXT: i32 = 12;
const PAUSE_ALPHA: u8 = 96;
const DEBUG_ALPHA: u8 = 128;

/// Where frames end up. Coordinates are screen pixels.
pub trait PresentationSink {
    fn clear(&mut self, color: Rgba);
    fn blit(&mut self, frame: &Frame, x: i32, y: i32);
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    /// `(x, y)` is the center of the text when `centered`, its top-left corner otherwise.
    fn text(&mut self, text: &str, x: i32, y: i32, size: i32, color: Rgba, centered: bool);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear(Rgba),
    Blit { frame: Frame, x: i32, y: i32 },
    Fill { rect: Rect, color: Rgba },
    Text {
        text: String,
        x: i32,
        y: i32,
        size: i32,
        color: Rgba,
        centered: bool,
    },
}

/// Recorded draw calls of one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_cmds(&mut self) {
        self.cmds.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.cmds.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }

    /// Blits cut from `sheet`, with their screen position.
    pub fn blits_from<'a>(&'a self, sheet: &'a str) -> impl Iterator<Item = (&'a Frame, i32, i32)> + 'a {
        self.cmds.iter().filter_map(move |c| match c {
            DrawCmd::Blit { frame, x, y } => match frame {
                Frame::Region { sheet: s, .. } if &**s == sheet => Some((frame, *x, *y)),
                Frame::Image { key, .. } if &**key == sheet => Some((frame, *x, *y)),
                _ => None,
            },
            _ => None,
        })
    }

    pub fn fills_of(&self, color: Rgba) -> usize {
        self.cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Fill { color: fill, .. } if *fill == color))
            .count()
    }
}

impl PresentationSink for DrawList {
    fn clear(&mut self, color: Rgba) {
        self.cmds.push(DrawCmd::Clear(color));
    }

    fn blit(&mut self, frame: &Frame, x: i32, y: i32) {
        self.cmds.push(DrawCmd::Blit {
            frame: frame.clone(),
            x,
            y,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.cmds.push(DrawCmd::Fill { rect, color });
    }

    fn text(&mut self, text: &str, x: i32, y: i32, size: i32, color: Rgba, centered: bool) {
        self.cmds.push(DrawCmd::Text {
            text: text.to_string(),
            x,
            y,
            size,
            color,
            centered,
        });
    }
}

/// Cells of the `ui_hud` sheet used by the HUD.
pub fn hud_set() -> AnimationSet {
    AnimationSet::new("ui_hud", TILE_SIZE as u32)
        .with_clip("heart_full", AnimationClip::new(vec![(0, 0)], 1.0, false))
        .with_clip("heart_empty", AnimationClip::new(vec![(0, 2)], 1.0, false))
        .with_clip("key", AnimationClip::new(vec![(1, 2)], 1.0, false))
}

/// Shared state of one frame's drawing.
struct Painter<'a> {
    sink: &'a mut dyn PresentationSink,
    cache: &'a mut FrameCache,
    catalog: &'a AssetCatalog,
    store: &'a AnimationStore,
    camera: Camera2D,
}

impl Painter<'_> {
    fn screen_size(&self) -> (i32, i32) {
        (self.camera.width, self.camera.height)
    }

    /// Blit at a world position, culled against the camera.
    fn world_blit(&mut self, frame: &Frame, x: i32, y: i32) {
        let (w, h) = frame.size();
        if !self.camera.is_visible(&Rect::new(x, y, w as i32, h as i32)) {
            return;
        }
        let (sx, sy) = self.camera.to_screen(x, y);
        self.sink.blit(frame, sx, sy);
    }

    fn world_fill(&mut self, rect: Rect, color: Rgba) {
        if !self.camera.is_visible(&rect) {
            return;
        }
        let (sx, sy) = self.camera.to_screen(rect.x, rect.y);
        self.sink.fill_rect(Rect::new(sx, sy, rect.w, rect.h), color);
    }

    fn anim_frame(&mut self, set_key: &str, clip: &str, index: usize) -> Frame {
        match self.store.get(set_key) {
            Some(set) => self.cache.frame(self.catalog, set, clip, index),
            None => Frame::Placeholder {
                w: TILE_SIZE as u32,
                h: TILE_SIZE as u32,
                color: BAD_FRAME,
            },
        }
    }

    fn animation(&mut self, anim: &Animation, x: i32, y: i32) {
        let frame = self.anim_frame(&anim.set_key, &anim.clip, anim.frame_index);
        self.world_blit(&frame, x, y);
    }

    /// A whole image centered on screen; nothing when it is not loaded.
    fn centered_image(&mut self, key: &str) {
        if !self.catalog.has_sheet(key) {
            return;
        }
        let (sw, sh) = self.screen_size();
        let frame = self.cache.image(self.catalog, key, (0, 0));
        let (w, h) = frame.size();
        self.sink
            .blit(&frame, (sw - w as i32) / 2, (sh - h as i32) / 2);
    }

    fn overlay(&mut self, color: Rgba) {
        let (w, h) = self.screen_size();
        self.sink.fill_rect(Rect::new(0, 0, w, h), color);
    }
}

/// Compose the current screen into `sink`.
pub fn render_frame(world: &mut World, sink: &mut dyn PresentationSink) {
    world.resource_scope(|world: &mut World, mut cache: Mut<FrameCache>| {
        let mut queries = GameQueries::new(world);
        let world: &World = world;
        let mut painter = Painter {
            sink,
            cache: &mut cache,
            catalog: world.resource::<AssetCatalog>(),
            store: world.resource::<AnimationStore>(),
            camera: *world.resource::<Camera2D>(),
        };
        let flow = world.resource::<ScreenFlow>();
        let progress = world.resource::<GameProgress>();
        let now = world.resource::<WorldTime>().elapsed;
        let (w, h) = painter.screen_size();

        match world.resource::<GameState>().get() {
            Screens::Logo => {
                painter.sink.clear(BLACK);
                painter.centered_image(LOGO_IMAGE);
            }
            Screens::Title => {
                painter.sink.clear(BLACK);
                painter.centered_image(TITLE_IMAGE);
                let high = format!("High Score: {}", progress.high_score);
                painter.sink.text(&high, w / 2, 160, TEXT_SMALL, RETRO_GREEN, true);
                painter
                    .sink
                    .text("PRESS START", w / 2, 192, TEXT_LARGE, RETRO_CREAM, true);
            }
            Screens::Game => draw_game(world, &mut queries, &mut painter, flow, progress, now),
            Screens::GameOver => {
                painter.sink.clear(BLACK);
                painter
                    .sink
                    .text("GAME OVER", w / 2, h / 2 - 30, TEXT_LARGE, RETRO_CREAM, true);
                let score = format!("Score: {}", progress.score);
                painter
                    .sink
                    .text(&score, w / 2, h / 2 + 10, TEXT_LARGE, RETRO_CREAM, true);
                let high = format!("High Score: {}", progress.high_score);
                painter
                    .sink
                    .text(&high, w / 2, h / 2 + 30, TEXT_SMALL, RETRO_CREAM, true);
            }
            Screens::Credits => {
                painter.sink.clear(RETRO_BROWN);
                if let Some(slide) = flow.credits.current() {
                    painter.centered_image(slide);
                }
            }
        }

        if let Some(progress) = flow.transition_progress(now) {
            painter.overlay(RETRO_BROWN.with_alpha((255.0 * progress) as u8));
        }
    });
}

struct GameQueries {
    animated: QueryState<(&'static AnimatedTile, &'static MapPosition)>,
    pickups: QueryState<(&'static Pickup, &'static MapPosition, &'static Animation)>,
    enemies: QueryState<(&'static Enemy, &'static MapPosition, &'static Animation)>,
    bosses: QueryState<(&'static Boss, &'static MapPosition, &'static Animation)>,
    player: QueryState<(&'static Player, &'static MapPosition, &'static Animation)>,
    doors: QueryState<&'static Door>,
    pickup_boxes: QueryState<(&'static Pickup, &'static MapPosition, &'static BoxCollider)>,
}

impl GameQueries {
    fn new(world: &mut World) -> Self {
        Self {
            animated: world.query(),
            pickups: world.query(),
            enemies: world.query(),
            bosses: world.query(),
            player: world.query(),
            doors: world.query(),
            pickup_boxes: world.query(),
        }
    }
}

fn draw_game(
    world: &World,
    q: &mut GameQueries,
    painter: &mut Painter,
    flow: &ScreenFlow,
    progress: &GameProgress,
    now: f32,
) {
    painter.sink.clear(BLACK);
    let Some(level) = world.get_resource::<LevelState>() else {
        return;
    };
    let ts = level.tile_size;

    for tile in &level.background {
        let frame = painter.cache.tile(painter.catalog, &level.tileset, ts, tile.id);
        painter.world_blit(&frame, tile.x as i32 * ts as i32, tile.y as i32 * ts as i32);
    }
    for (tile, pos) in q.animated.iter(world) {
        let frame = painter
            .cache
            .tile(painter.catalog, &level.tileset, ts, tile.gid_at(level.clock));
        painter.world_blit(&frame, pos.x, pos.y);
    }

    for (pickup, pos, anim) in q.pickups.iter(world) {
        if !pickup.collected {
            painter.animation(anim, pos.x, pos.y);
        }
    }
    for (enemy, pos, anim) in q.enemies.iter(world) {
        if enemy.visible_at(now) {
            painter.animation(anim, pos.x, pos.y);
        }
    }
    for (boss, pos, anim) in q.bosses.iter(world) {
        if boss.visible_at(now) {
            painter.animation(anim, pos.x, pos.y);
        }
    }

    let player = q.player.iter(world).next();
    if let Some((player, pos, body)) = player {
        if player.visible_at(now) {
            painter.animation(body, pos.x, pos.y);
        }
        if player.is_attacking() {
            let sword = &player.sword;
            let frame = painter.anim_frame(SWORD_SET, &sword.clip, sword.frame_index);
            painter.world_blit(&frame, pos.x + SWORD_DRAW_OFFSET, pos.y + SWORD_DRAW_OFFSET);
        }
        draw_hud(painter, player, progress);
    }

    let debug = world.contains_resource::<DebugMode>();
    if debug {
        if let Some(grid) = world.get_resource::<CollisionGrid>() {
            for (tx, ty) in grid.blocked_tiles() {
                painter.world_fill(
                    Rect::new(tx * TILE_SIZE, ty * TILE_SIZE, TILE_SIZE, TILE_SIZE),
                    DEBUG_RED.with_alpha(DEBUG_ALPHA),
                );
            }
        }
        for door in q.doors.iter(world) {
            let color = if door.can_enter(progress.has_key) {
                DEBUG_GREEN
            } else {
                DEBUG_YELLOW
            };
            painter.world_fill(door.rect, color.with_alpha(DEBUG_ALPHA));
        }
        for (pickup, pos, collider) in q.pickup_boxes.iter(world) {
            if !pickup.collected {
                painter.world_fill(collider.rect_at(*pos), DEBUG_BLUE.with_alpha(DEBUG_ALPHA));
            }
        }
    }

    if let Some(started) = level.transition_started {
        let t = ((now - started) / LEVEL_TRANSITION_DURATION).clamp(0.0, 1.0);
        painter.overlay(RETRO_BROWN.with_alpha((255.0 * t) as u8));
    }

    if flow.paused && !flow.is_frozen() {
        painter.overlay(BLACK.with_alpha(PAUSE_ALPHA));
        if debug {
            let (w, _) = painter.screen_size();
            painter.sink.fill_rect(Rect::new(w - 8, 4, 4, 4), DEBUG_YELLOW);
        }
    }
}

fn draw_hud(painter: &mut Painter, player: &Player, progress: &GameProgress) {
    let (w, _) = painter.screen_size();
    for i in 0..player.max_health {
        let clip = if i < player.health {
            "heart_full"
        } else {
            "heart_empty"
        };
        let frame = painter.anim_frame(HUD_SET, clip, 0);
        painter.sink.blit(&frame, 16 + TILE_SIZE * i as i32, 16);
    }
    let score = format!("{:03}", progress.score);
    painter.sink.text(&score, w / 2, 16, HUD_TEXT, RETRO_CREAM, true);
    if progress.has_key {
        let frame = painter.anim_frame(HUD_SET, "key", 0);
        painter.sink.blit(&frame, w - 16 - TILE_SIZE, 16);
    }
}
