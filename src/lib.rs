//! tilequest library.
//!
//! The simulation core of a tile-based action game: components, resources,
//! systems and events of the ECS world, plus [`game`] to assemble and tick it.
//! Exposed as a library for the binary front end and the integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
