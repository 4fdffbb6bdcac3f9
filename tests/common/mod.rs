//! Shared harness: a full world driven through `tick` with scripted input.

#![allow(dead_code)]

use bevy_ecs::message::Messages;
use bevy_ecs::prelude::*;

use tilequest::components::boss::Boss;
use tilequest::components::enemy::Enemy;
use tilequest::components::mapposition::MapPosition;
use tilequest::components::pickup::Pickup;
use tilequest::components::player::Player;
use tilequest::events::audio::AudioCmd;
use tilequest::game::{build_schedule, quit_requested, setup_world, tick};
use tilequest::resources::assetcatalog::AssetCatalog;
use tilequest::resources::gameconfig::GameConfig;
use tilequest::resources::gameprogress::GameProgress;
use tilequest::resources::gamestate::{GameState, Screens};
use tilequest::resources::highscore::HighScoreStore;
use tilequest::resources::input::{HeldActions, InputAction};
use tilequest::resources::level::LevelState;
use tilequest::resources::screenflow::ScreenFlow;
use tilequest::resources::tilemap::{
    COLLIDERS_LAYER, LevelData, MapObject, MemoryTileMapProvider, Tilelayer, Tileposition,
};
use tilequest::resources::worldtime::WorldTime;
use tilequest::systems::render::DrawList;

pub const DT: f32 = 0.05;

/// An open level of `w`x`h` tiles with the player at tile (`px`, `py`).
pub fn open_level(w: u32, h: u32, px: i32, py: i32) -> LevelData {
    let mut data = LevelData::new(w, h);
    data.layers.push(Tilelayer {
        name: COLLIDERS_LAYER.to_string(),
        positions: Vec::new(),
    });
    data.objects.push(MapObject::new("player", (px * 16) as f32, (py * 16) as f32));
    data
}

pub fn block_tile(data: &mut LevelData, tx: u32, ty: u32) {
    if let Some(layer) = data.layers.iter_mut().find(|l| l.name == COLLIDERS_LAYER) {
        layer.positions.push(Tileposition { x: tx, y: ty, id: 1 });
    }
}

pub fn object_at(name: &str, tx: i32, ty: i32) -> MapObject {
    MapObject::new(name, (tx * 16) as f32, (ty * 16) as f32)
}

/// A 4x2 arena where the boss fills the right half and can never move:
/// every pattern step is either out of bounds or blocked.
pub fn boss_arena() -> LevelData {
    let mut data = open_level(4, 2, 1, 0);
    block_tile(&mut data, 1, 1);
    data.objects.push(object_at("boss", 2, 0));
    data
}

pub fn sprite_catalog() -> AssetCatalog {
    let mut catalog = AssetCatalog::new();
    catalog.insert_sheet("tiles", 64, 64);
    catalog.insert_sheet("player", 96, 128);
    catalog.insert_sheet("ui_hud", 48, 32);
    catalog
}

pub struct Harness {
    pub world: World,
    pub schedule: Schedule,
    pub held: HeldActions,
    pub frame: DrawList,
    /// Every audio command written since the harness started.
    pub audio: Vec<AudioCmd>,
}

impl Harness {
    pub fn new(provider: MemoryTileMapProvider, sequence: &[&str]) -> Self {
        Self::build(provider, sequence, AssetCatalog::new(), HighScoreStore::detached())
    }

    pub fn build(
        provider: MemoryTileMapProvider,
        sequence: &[&str],
        catalog: AssetCatalog,
        highscore: HighScoreStore,
    ) -> Self {
        let mut config = GameConfig::new();
        config.levels = sequence.iter().map(|s| s.to_string()).collect();
        let world = setup_world(config, provider, catalog, highscore);
        let mut harness = Self {
            world,
            schedule: build_schedule(),
            held: HeldActions::new(),
            frame: DrawList::new(),
            audio: Vec::new(),
        };
        harness.collect_audio();
        harness
    }

    /// A single-level game, already on the `Game` screen.
    pub fn in_game(level: LevelData) -> Self {
        let mut h = Self::new(MemoryTileMapProvider::new().with_level("only", level), &["only"]);
        h.start_game();
        h
    }

    fn collect_audio(&mut self) {
        let drained: Vec<AudioCmd> = self
            .world
            .resource_mut::<Messages<AudioCmd>>()
            .drain()
            .collect();
        self.audio.extend(drained);
    }

    pub fn step(&mut self) {
        self.frame.clear_cmds();
        tick(
            &mut self.world,
            &mut self.schedule,
            &self.held,
            DT,
            &mut self.frame,
        );
        self.collect_audio();
    }

    pub fn run_for(&mut self, seconds: f32) {
        let steps = (seconds / DT).ceil() as usize;
        for _ in 0..steps {
            self.step();
        }
    }

    /// Step until `screen` is current; panics after `limit` seconds.
    pub fn run_until_screen(&mut self, screen: Screens, limit: f32) {
        let steps = (limit / DT).ceil() as usize;
        for _ in 0..steps {
            if self.screen() == screen {
                return;
            }
            self.step();
        }
        assert_eq!(self.screen(), screen, "screen not reached in {}s", limit);
    }

    /// Hold `action` for one tick, then release it for one tick.
    pub fn tap(&mut self, action: InputAction) {
        self.held.press(action);
        self.step();
        self.held.release(action);
        self.step();
    }

    /// One tile step, then wait out the move cooldown.
    pub fn walk(&mut self, action: InputAction) {
        self.held.press(action);
        self.step();
        self.held.release(action);
        self.run_for(0.2);
    }

    /// Logo → Title → Game, stopping on the tick the level is loaded.
    pub fn start_game(&mut self) {
        self.run_until_screen(Screens::Title, 5.0);
        self.tap(InputAction::Attack);
        self.run_until_screen(Screens::Game, 2.0);
    }

    /// Three spaced swings at a boss standing in front of the player.
    pub fn defeat_boss(&mut self) {
        for _ in 0..3 {
            self.tap(InputAction::Attack);
            self.run_for(1.0);
        }
    }

    pub fn now(&self) -> f32 {
        self.world.resource::<WorldTime>().elapsed
    }

    pub fn screen(&self) -> Screens {
        self.world.resource::<GameState>().get()
    }

    pub fn flow(&self) -> &ScreenFlow {
        self.world.resource::<ScreenFlow>()
    }

    pub fn progress(&self) -> &GameProgress {
        self.world.resource::<GameProgress>()
    }

    pub fn level(&self) -> &LevelState {
        self.world.resource::<LevelState>()
    }

    pub fn quit(&self) -> bool {
        quit_requested(&self.world)
    }

    pub fn player(&mut self) -> (Player, MapPosition) {
        let mut query = self.world.query::<(&Player, &MapPosition)>();
        let (player, pos) = query.iter(&self.world).next().expect("no player");
        (player.clone(), *pos)
    }

    pub fn enemies(&mut self) -> Vec<(Enemy, MapPosition)> {
        let mut query = self.world.query::<(&Enemy, &MapPosition)>();
        query
            .iter(&self.world)
            .map(|(e, p)| (e.clone(), *p))
            .collect()
    }

    pub fn boss(&mut self) -> Option<Boss> {
        let mut query = self.world.query::<&Boss>();
        query.iter(&self.world).next().cloned()
    }

    pub fn pickup_count(&mut self) -> usize {
        let mut query = self.world.query::<&Pickup>();
        query.iter(&self.world).count()
    }

    pub fn heard_fx(&self, id: &str) -> bool {
        self.audio.contains(&AudioCmd::fx(id))
    }

    pub fn take_audio(&mut self) -> Vec<AudioCmd> {
        std::mem::take(&mut self.audio)
    }
}
