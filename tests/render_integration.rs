//! Render integration tests: what the recorded frame holds on each screen.

mod common;

use tilequest::resources::framecache::Frame;
use tilequest::resources::gamestate::Screens;
use tilequest::resources::highscore::HighScoreStore;
use tilequest::resources::input::InputAction;
use tilequest::resources::palette::{
    BLACK, DEBUG_BLUE, DEBUG_RED, DEBUG_YELLOW, MISSING_SHEET, RETRO_BROWN,
};
use tilequest::resources::tilemap::{LevelData, MemoryTileMapProvider, Tilelayer, Tileposition};
use tilequest::systems::render::{DrawCmd, DrawList};

use common::{Harness, block_tile, object_at, open_level, sprite_catalog};

fn with_sprites(level: LevelData) -> Harness {
    let mut catalog = sprite_catalog();
    catalog.insert_sheet("enemy_rat", 48, 96);
    catalog.insert_sheet("weapons_animated", 240, 144);
    catalog.insert_sheet("logo", 64, 32);
    let provider = MemoryTileMapProvider::new().with_level("only", level);
    Harness::build(provider, &["only"], catalog, HighScoreStore::detached())
}

/// Full-screen fills tinted with the fade color, at any alpha.
fn fade_alphas(frame: &DrawList) -> Vec<u8> {
    frame
        .cmds
        .iter()
        .filter_map(|c| match c {
            DrawCmd::Fill { rect, color }
                if rect.x == 0
                    && rect.y == 0
                    && (color.r, color.g, color.b)
                        == (RETRO_BROWN.r, RETRO_BROWN.g, RETRO_BROWN.b) =>
            {
                Some(color.a)
            }
            _ => None,
        })
        .collect()
}

#[test]
fn logo_is_centered_on_black() {
    let mut h = with_sprites(open_level(4, 4, 1, 1));
    h.step();
    assert!(matches!(h.frame.cmds.first(), Some(DrawCmd::Clear(c)) if *c == BLACK));
    let blits: Vec<_> = h.frame.blits_from("logo").collect();
    assert_eq!(blits.len(), 1);
    assert_eq!((blits[0].1, blits[0].2), ((320 - 64) / 2, (240 - 32) / 2));
}

#[test]
fn title_shows_stored_high_score() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("highscore.txt");
    std::fs::write(&path, "120\n").expect("write");
    let provider = MemoryTileMapProvider::new().with_level("only", open_level(4, 4, 1, 1));
    let mut h = Harness::build(
        provider,
        &["only"],
        sprite_catalog(),
        HighScoreStore::new(&path),
    );

    h.run_until_screen(Screens::Title, 5.0);
    h.step();
    assert!(h.frame.has_text("High Score: 120"));
    assert!(h.frame.has_text("PRESS START"));
}

#[test]
fn screen_fade_darkens_toward_the_target() {
    let mut h = with_sprites(open_level(4, 4, 1, 1));
    h.run_until_screen(Screens::Title, 5.0);
    h.tap(InputAction::Attack);
    let early = fade_alphas(&h.frame);
    h.run_for(0.3);
    let late = fade_alphas(&h.frame);
    assert_eq!(early.len(), 1);
    assert_eq!(late.len(), 1);
    assert!(late[0] > early[0]);
}

#[test]
fn hud_shows_hearts_score_and_key() {
    let mut level = open_level(10, 5, 1, 1);
    level
        .objects
        .push(object_at("pickup", 2, 1).with_property("pickup_type", "coin"));
    level
        .objects
        .push(object_at("pickup", 3, 1).with_property("pickup_type", "key"));
    let mut h = with_sprites(level);
    h.start_game();
    h.step();
    assert_eq!(h.frame.blits_from("ui_hud").count(), 3);
    assert!(h.frame.has_text("000"));

    h.walk(InputAction::Right);
    assert!(h.frame.has_text("010"));

    h.walk(InputAction::Right);
    let hud: Vec<_> = h.frame.blits_from("ui_hud").collect();
    assert_eq!(hud.len(), 4);
    assert!(hud.iter().any(|(frame, x, y)| {
        matches!(frame, Frame::Region { x: 32, y: 16, .. }) && (*x, *y) == (320 - 32, 16)
    }));
}

#[test]
fn background_tiles_come_from_the_tileset() {
    let mut level = open_level(4, 4, 1, 1);
    level.layers.insert(
        0,
        Tilelayer {
            name: "background".to_string(),
            positions: vec![
                Tileposition { x: 0, y: 0, id: 1 },
                Tileposition { x: 1, y: 0, id: 0 },
                Tileposition { x: 2, y: 0, id: 6 },
            ],
        },
    );
    let mut h = with_sprites(level);
    h.start_game();
    h.step();
    let tiles: Vec<_> = h.frame.blits_from("tiles").collect();
    assert_eq!(tiles.len(), 2);
    assert!(matches!(tiles[1].0, Frame::Region { x: 16, y: 16, .. }));
    assert_eq!((tiles[1].1, tiles[1].2), (32, 0));
}

#[test]
fn far_away_enemies_are_culled() {
    let mut level = open_level(60, 5, 1, 1);
    level.objects.push(object_at("enemy", 3, 3));
    level.objects.push(object_at("enemy", 50, 3));
    let mut h = with_sprites(level);
    h.start_game();
    h.step();
    assert_eq!(h.frame.blits_from("enemy_rat").count(), 1);
}

#[test]
fn sword_is_drawn_only_while_attacking() {
    let mut h = with_sprites(open_level(10, 5, 2, 2));
    h.start_game();
    h.step();
    assert_eq!(h.frame.blits_from("weapons_animated").count(), 0);

    h.tap(InputAction::Attack);
    let sword: Vec<_> = h.frame.blits_from("weapons_animated").collect();
    assert_eq!(sword.len(), 1);
    assert_eq!((sword[0].1, sword[0].2), (32 - 16, 32 - 16));

    h.run_for(0.6);
    assert_eq!(h.frame.blits_from("weapons_animated").count(), 0);
}

#[test]
fn missing_sheets_draw_placeholders() {
    let mut h = Harness::in_game(open_level(4, 4, 1, 1));
    h.step();
    let placeholders = h
        .frame
        .cmds
        .iter()
        .filter(|c| {
            matches!(c, DrawCmd::Blit { frame: Frame::Placeholder { color, .. }, .. }
                if *color == MISSING_SHEET)
        })
        .count();
    // player plus three hearts
    assert_eq!(placeholders, 4);
}

#[test]
fn debug_overlay_marks_walls_doors_and_pickups() {
    let mut level = open_level(6, 4, 1, 1);
    block_tile(&mut level, 0, 0);
    block_tile(&mut level, 5, 3);
    level
        .objects
        .push(object_at("door", 4, 1).with_size(16.0, 16.0));
    level
        .objects
        .push(object_at("pickup", 3, 2).with_property("pickup_type", "coin"));
    let mut h = with_sprites(level);
    h.start_game();

    h.tap(InputAction::Debug);
    assert_eq!(h.frame.fills_of(DEBUG_RED.with_alpha(128)), 2);
    assert_eq!(h.frame.fills_of(DEBUG_YELLOW.with_alpha(128)), 1);
    assert_eq!(h.frame.fills_of(DEBUG_BLUE.with_alpha(128)), 1);

    h.run_for(0.3);
    h.tap(InputAction::Debug);
    assert_eq!(h.frame.fills_of(DEBUG_RED.with_alpha(128)), 0);
}

#[test]
fn pause_dims_the_game() {
    let mut h = with_sprites(open_level(4, 4, 1, 1));
    h.start_game();
    h.tap(InputAction::Pause);
    assert_eq!(h.frame.fills_of(BLACK.with_alpha(96)), 1);
    assert!(h.frame.has_text("000"));

    h.run_for(0.3);
    h.tap(InputAction::Pause);
    assert_eq!(h.frame.fills_of(BLACK.with_alpha(96)), 0);
}

#[test]
fn door_fade_covers_the_level() {
    let mut level = open_level(4, 4, 1, 1);
    level.objects.push(
        object_at("door", 1, 1)
            .with_size(16.0, 16.0)
            .with_property("locked", false),
    );
    let mut h = with_sprites(level);
    h.start_game();
    h.step();
    assert!(fade_alphas(&h.frame).is_empty());

    h.tap(InputAction::Interact);
    assert_eq!(fade_alphas(&h.frame).len(), 1);
}
