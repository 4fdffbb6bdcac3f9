//! Score, key and level progress for the running game.

use bevy_ecs::prelude::Resource;

/// Process-wide progress. Only level systems and the screen flow write it.
///
/// `high_score` survives new games and never decreases.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct GameProgress {
    pub score: u32,
    pub has_key: bool,
    pub level_index: usize,
    pub high_score: u32,
}

impl GameProgress {
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            high_score,
            ..Self::default()
        }
    }

    pub fn reset_for_new_game(&mut self) {
        self.score = 0;
        self.has_key = false;
        self.level_index = 0;
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Raise the high score to the current score; `true` if it changed.
    pub fn record_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }
}
