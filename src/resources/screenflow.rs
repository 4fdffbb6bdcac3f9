//! Timed parts of the screen flow: fades, pause, victory freeze, the logo
//! timer and the credits reel.
//!
//! The current screen itself lives in [`GameState`](crate::resources::gamestate::GameState);
//! this resource holds everything that decides *when* it changes.

use bevy_ecs::prelude::Resource;
use log::{debug, info};

use crate::resources::assetcatalog::AssetCatalog;
use crate::resources::gamestate::Screens;

pub const TRANSITION_DURATION: f32 = 0.5;
pub const VICTORY_FREEZE_DURATION: f32 = 3.0;
pub const LOGO_DURATION: f32 = 3.0;
pub const LOGO_CUE_DELAY: f32 = 0.3;
pub const FIRST_CREDIT_DURATION: f32 = 7.0;
pub const CREDIT_DURATION: f32 = 3.0;
pub const MAX_CREDIT_SLIDES: usize = 10;

/// A fade toward `target` that started at `started`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransition {
    pub target: Screens,
    pub started: f32,
}

/// Credit slides found at entry and the one on screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreditsReel {
    pub slides: Vec<String>,
    pub index: usize,
    pub slide_started: f32,
}

impl CreditsReel {
    /// Probe `credits_0`, `credits_1`, ... and stop at the first missing key.
    pub fn probe(catalog: &AssetCatalog, now: f32) -> Self {
        let slides: Vec<String> = (0..MAX_CREDIT_SLIDES)
            .map(|i| format!("credits_{}", i))
            .take_while(|key| catalog.has_sheet(key))
            .collect();
        info!("Found {} credit slide(s)", slides.len());
        Self {
            slides,
            index: 0,
            slide_started: now,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.slides.get(self.index).map(String::as_str)
    }

    pub fn slide_duration(&self) -> f32 {
        if self.index == 0 {
            FIRST_CREDIT_DURATION
        } else {
            CREDIT_DURATION
        }
    }

    pub fn is_done(&self) -> bool {
        self.index >= self.slides.len()
    }

    /// Move to the next slide; `false` once the reel has run out.
    pub fn advance(&mut self, now: f32) -> bool {
        self.index += 1;
        self.slide_started = now;
        debug!("Credits slide {}", self.index);
        !self.is_done()
    }

    /// Auto-advance when the current slide's time is up.
    pub fn tick(&mut self, now: f32) -> bool {
        if !self.is_done() && now - self.slide_started >= self.slide_duration() {
            self.advance(now);
        }
        !self.is_done()
    }
}

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ScreenFlow {
    pub transition: Option<ScreenTransition>,
    /// Orthogonal to the screen; only meaningful in `Game`.
    pub paused: bool,
    /// Start time of the post-boss freeze.
    pub victory_freeze: Option<f32>,
    /// When the current screen was entered.
    pub entered_at: f32,
    pub logo_cue_played: bool,
    pub credits: CreditsReel,
    pub quit_requested: bool,
    /// The running game ended (game over or victory); the next `Game` starts fresh.
    pub session_over: bool,
}

impl ScreenFlow {
    /// Begin a fade toward `target`. Rejected while another fade runs.
    pub fn start_transition(&mut self, target: Screens, now: f32) -> bool {
        if self.transition.is_some() {
            debug!("Transition to {:?} rejected, one is in progress", target);
            return false;
        }
        debug!("Transition to {:?} started", target);
        self.transition = Some(ScreenTransition {
            target,
            started: now,
        });
        true
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Fade progress in `[0, 1]`, `None` without a transition.
    pub fn transition_progress(&self, now: f32) -> Option<f32> {
        self.transition
            .map(|t| ((now - t.started) / TRANSITION_DURATION).clamp(0.0, 1.0))
    }

    /// Take the target once the fade has run its full duration.
    pub fn finish_transition(&mut self, now: f32) -> Option<Screens> {
        match self.transition {
            Some(t) if now - t.started >= TRANSITION_DURATION => {
                self.transition = None;
                Some(t.target)
            }
            _ => None,
        }
    }

    pub fn start_victory_freeze(&mut self, now: f32) -> bool {
        if self.victory_freeze.is_some() {
            return false;
        }
        info!("Victory freeze started");
        self.victory_freeze = Some(now);
        true
    }

    pub fn is_frozen(&self) -> bool {
        self.victory_freeze.is_some()
    }

    /// Clear an expired freeze; `true` exactly when it expires.
    pub fn end_expired_freeze(&mut self, now: f32) -> bool {
        match self.victory_freeze {
            Some(started) if now - started >= VICTORY_FREEZE_DURATION => {
                self.victory_freeze = None;
                true
            }
            _ => false,
        }
    }

    /// Whether level clocks must stand still.
    pub fn world_paused(&self) -> bool {
        self.paused || self.is_frozen()
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        info!("Game {}", if self.paused { "paused" } else { "resumed" });
        self.paused
    }

    pub fn request_quit(&mut self) {
        if !self.quit_requested {
            info!("Quit requested");
        }
        self.quit_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_transitions_are_rejected() {
        let mut flow = ScreenFlow::default();
        assert!(flow.start_transition(Screens::Title, 1.0));
        assert!(!flow.start_transition(Screens::Game, 1.1));
        assert_eq!(flow.finish_transition(1.4), None);
        assert_eq!(flow.transition_progress(1.25), Some(0.5));
        assert_eq!(flow.finish_transition(1.5), Some(Screens::Title));
        assert!(flow.start_transition(Screens::Game, 1.6));
    }

    #[test]
    fn freeze_expires_after_three_seconds() {
        let mut flow = ScreenFlow::default();
        assert!(flow.start_victory_freeze(10.0));
        assert!(flow.world_paused());
        assert!(!flow.end_expired_freeze(12.5));
        assert!(flow.end_expired_freeze(13.0));
        assert!(!flow.world_paused());
    }

    #[test]
    fn credits_probe_stops_at_first_gap() {
        let mut catalog = AssetCatalog::new();
        catalog.insert_sheet("credits_0", 320, 240);
        catalog.insert_sheet("credits_1", 320, 240);
        catalog.insert_sheet("credits_3", 320, 240);
        let reel = CreditsReel::probe(&catalog, 0.0);
        assert_eq!(reel.slides, vec!["credits_0", "credits_1"]);
    }

    #[test]
    fn first_slide_lasts_longer() {
        let mut catalog = AssetCatalog::new();
        catalog.insert_sheet("credits_0", 320, 240);
        catalog.insert_sheet("credits_1", 320, 240);
        let mut reel = CreditsReel::probe(&catalog, 0.0);
        assert!(reel.tick(6.5));
        assert_eq!(reel.index, 0);
        assert!(reel.tick(7.0));
        assert_eq!(reel.index, 1);
        assert!(!reel.tick(10.0));
        assert!(reel.is_done());
    }
}
