//! Per-object simulation state.
//!
//! Objects drift with constant velocity across a toroidal play field that is
//! slightly larger than the visible area, so circles leave the screen fully
//! before reappearing on the opposite edge.

mod field;
mod spawn;
mod wrap;

pub use field::{InstanceTransform, ObjectField, ObjectInfo};
pub use spawn::SpawnRanges;
pub use wrap::{wrap_toroidal, FIELD_HALF_EXTENT};
