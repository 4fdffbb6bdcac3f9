//! Screen flow integration tests: logo, title, credits and quitting.

mod common;

use tilequest::events::audio::AudioCmd;
use tilequest::resources::assetcatalog::AssetCatalog;
use tilequest::resources::gamestate::Screens;
use tilequest::resources::highscore::HighScoreStore;
use tilequest::resources::input::InputAction;
use tilequest::resources::tilemap::MemoryTileMapProvider;

use common::{Harness, boss_arena, open_level};

fn single_level() -> Harness {
    Harness::new(
        MemoryTileMapProvider::new().with_level("only", open_level(4, 4, 1, 1)),
        &["only"],
    )
}

fn credits_harness(slides: usize) -> Harness {
    let mut catalog = AssetCatalog::new();
    for i in 0..slides {
        catalog.insert_sheet(format!("credits_{}", i), 160, 120);
    }
    let provider = MemoryTileMapProvider::new().with_level("arena", boss_arena());
    let mut h = Harness::build(provider, &["arena"], catalog, HighScoreStore::detached());
    h.start_game();
    h.defeat_boss();
    h.take_audio();
    h.run_until_screen(Screens::Credits, 4.0);
    h
}

#[test]
fn logo_plays_its_cue_then_fades_to_title() {
    let mut h = single_level();
    assert_eq!(h.screen(), Screens::Logo);

    h.run_for(0.2);
    assert!(!h.heard_fx("gold_2"));
    h.run_for(0.2);
    assert!(h.heard_fx("gold_2"));

    h.run_for(2.4);
    assert_eq!(h.screen(), Screens::Logo);
    h.run_until_screen(Screens::Title, 1.5);

    let stop = h.audio.iter().position(|c| *c == AudioCmd::StopMusic);
    let title = h
        .audio
        .iter()
        .position(|c| *c == AudioCmd::music("village", true));
    assert!(stop.is_some() && title.is_some());
    assert!(stop < title);
}

#[test]
fn logo_cannot_be_skipped() {
    let mut h = single_level();
    h.tap(InputAction::Attack);
    h.tap(InputAction::Advance);
    assert_eq!(h.screen(), Screens::Logo);
    assert!(!h.flow().is_transitioning());
    assert!(!h.quit());

    h.tap(InputAction::Quit);
    assert!(h.quit());
}

#[test]
fn title_starts_on_interact_with_a_cue() {
    let mut h = single_level();
    h.run_until_screen(Screens::Title, 5.0);
    h.take_audio();

    h.tap(InputAction::Interact);
    assert!(h.heard_fx("accept_2"));
    assert!(h.flow().is_transitioning());
    h.run_until_screen(Screens::Game, 1.0);
    assert_eq!(h.level().loaded.as_deref(), Some("only"));
}

#[test]
fn cancel_is_ignored_during_a_fade_but_quit_is_not() {
    let mut h = single_level();
    h.run_until_screen(Screens::Title, 5.0);
    h.tap(InputAction::Attack);
    assert!(h.flow().is_transitioning());

    h.tap(InputAction::Cancel);
    assert!(!h.quit());

    h.held.press(InputAction::Quit);
    h.step();
    assert!(h.quit());
}

#[test]
fn cancel_on_title_quits() {
    let mut h = single_level();
    h.run_until_screen(Screens::Title, 5.0);
    h.tap(InputAction::Cancel);
    assert!(h.quit());
}

#[test]
fn debug_toggle_is_edge_triggered() {
    let mut h = single_level();
    h.start_game();
    let debug_on = |h: &Harness| {
        h.world
            .contains_resource::<tilequest::resources::debugmode::DebugMode>()
    };

    h.held.press(InputAction::Debug);
    h.run_for(1.0);
    assert!(debug_on(&h));
    h.held.release(InputAction::Debug);
    h.step();

    h.tap(InputAction::Debug);
    assert!(!debug_on(&h));
}

#[test]
fn credits_slides_advance_on_input_then_return_to_title() {
    let mut h = credits_harness(2);
    assert!(h.audio.contains(&AudioCmd::music("village", true)));
    h.step();
    assert_eq!(h.flow().credits.current(), Some("credits_0"));
    assert_eq!(h.frame.blits_from("credits_0").count(), 1);

    h.tap(InputAction::Advance);
    assert_eq!(h.flow().credits.current(), Some("credits_1"));
    assert_eq!(h.frame.blits_from("credits_1").count(), 1);

    h.run_for(0.3);
    h.tap(InputAction::Advance);
    assert!(h.flow().is_transitioning());
    h.run_until_screen(Screens::Title, 1.0);
    assert!(!h.quit());
}

#[test]
fn credits_run_on_their_own() {
    let mut h = credits_harness(2);
    h.run_for(6.5);
    assert_eq!(h.flow().credits.current(), Some("credits_0"));
    h.run_for(0.7);
    assert_eq!(h.flow().credits.current(), Some("credits_1"));
    h.run_for(3.1);
    h.run_until_screen(Screens::Title, 1.0);
}

#[test]
fn cancel_leaves_credits_without_quitting() {
    let mut h = credits_harness(1);
    h.tap(InputAction::Cancel);
    h.run_until_screen(Screens::Title, 1.0);
    assert!(!h.quit());
}
