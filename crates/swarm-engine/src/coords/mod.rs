//! Coordinate types shared by the simulation and the renderer.
//!
//! Object positions live in normalized device coordinates: the visible area
//! spans `[-1, 1]` on both axes, +Y up.

mod vec2;

pub use vec2::Vec2;
