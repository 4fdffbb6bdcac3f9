use bevy_ecs::prelude::Component;

use crate::components::boxcollider::Rect;

/// Exit to the next level. A locked door needs the key, which passing consumes.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Door {
    pub rect: Rect,
    pub locked: bool,
}

impl Door {
    pub fn new(rect: Rect, locked: bool) -> Self {
        Self { rect, locked }
    }

    pub fn can_enter(&self, has_key: bool) -> bool {
        !self.locked || has_key
    }

    /// Try to pass; consumes the key when the door is locked.
    pub fn pass(&self, has_key: &mut bool) -> bool {
        if !self.locked {
            return true;
        }
        if *has_key {
            *has_key = false;
            return true;
        }
        false
    }
}
