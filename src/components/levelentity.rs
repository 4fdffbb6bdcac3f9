use bevy_ecs::prelude::Component;

/// Marker for entities owned by the loaded level; they are despawned on reload.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LevelEntity;
