use bevy_ecs::prelude::Component;

/// Background tile cycling through gids, each shown for its own duration.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct AnimatedTile {
    /// `(gid, seconds)` pairs.
    pub frames: Vec<(u32, f32)>,
}

impl AnimatedTile {
    pub fn new(frames: Vec<(u32, f32)>) -> Self {
        Self { frames }
    }

    pub fn cycle(&self) -> f32 {
        self.frames.iter().map(|(_, d)| d.max(0.0)).sum()
    }

    /// Gid shown at `clock` seconds into the level.
    pub fn gid_at(&self, clock: f32) -> u32 {
        let cycle = self.cycle();
        if cycle <= 0.0 {
            return self.frames.first().map(|(gid, _)| *gid).unwrap_or(0);
        }
        let mut t = clock.rem_euclid(cycle);
        for (gid, duration) in &self.frames {
            if t < *duration {
                return *gid;
            }
            t -= duration;
        }
        self.frames.last().map(|(gid, _)| *gid).unwrap_or(0)
    }
}
