use bevy_ecs::prelude::Component;

use crate::components::behavior::Pausable;
use crate::components::mapposition::TILE_SIZE;
use crate::resources::animationstore::{AnimationClip, AnimationSet};

pub const PICKUP_SET: &str = "pickups";
pub const COIN_SCORE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PickupKind {
    Coin,
    #[default]
    Heart,
    Key,
}

impl PickupKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "coin" => Some(PickupKind::Coin),
            "heart" => Some(PickupKind::Heart),
            "key" => Some(PickupKind::Key),
            _ => None,
        }
    }

    pub fn clip(self) -> &'static str {
        match self {
            PickupKind::Coin => "coin",
            PickupKind::Heart => "heart",
            PickupKind::Key => "key",
        }
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Pickup {
    pub kind: PickupKind,
    pub collected: bool,
    pub paused: bool,
}

impl Pickup {
    pub fn new(kind: PickupKind) -> Self {
        Self {
            kind,
            collected: false,
            paused: false,
        }
    }

    /// Mark as taken; `false` if it already was or the pickup is paused.
    pub fn collect(&mut self) -> bool {
        if self.collected || self.paused {
            return false;
        }
        self.collected = true;
        true
    }

    pub fn animation_set() -> AnimationSet {
        AnimationSet::new("pickup_animated", TILE_SIZE as u32)
            .with_clip("coin", AnimationClip::row(0, 0..4, 0.6, true))
            .with_clip("key", AnimationClip::row(1, 0..4, 0.6, true))
            .with_clip("heart", AnimationClip::row(4, 0..4, 0.6, true))
    }
}

impl Pausable for Pickup {
    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_is_one_shot() {
        let mut p = Pickup::new(PickupKind::Coin);
        assert!(p.collect());
        assert!(!p.collect());
        assert!(p.collected);
    }

    #[test]
    fn paused_pickup_cannot_be_taken() {
        let mut p = Pickup::new(PickupKind::Heart);
        p.set_paused(true);
        assert!(!p.collect());
        assert!(!p.collected);
        p.set_paused(false);
        assert!(p.collect());
    }

    #[test]
    fn unknown_kinds_do_not_parse() {
        assert_eq!(PickupKind::parse("KEY"), Some(PickupKind::Key));
        assert_eq!(PickupKind::parse("gem"), None);
    }
}
