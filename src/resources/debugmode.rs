//! Debug toggle resource.
//!
//! While present, the render pass adds collision, door and pickup overlays
//! and a pause indicator. Toggled in game via
//! [`SwitchDebugEvent`](crate::events::switchdebug::SwitchDebugEvent).

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, overlays are drawn.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct DebugMode {}
