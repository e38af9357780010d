use bytemuck::{Pod, Zeroable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::coords::Vec2;
use crate::error::{RendererError, Result};
use crate::paint::Rgba8;

use super::spawn::SpawnRanges;
use super::wrap::wrap_toroidal;

/// Logical per-object record: static color plus dynamic motion state.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ObjectInfo {
    /// Uploaded once at init.
    pub color: Rgba8,
    pub scale: f32,
    /// Position in normalized device coordinates, kept inside the play field.
    pub offset: Vec2,
    /// Units per second.
    pub velocity: Vec2,
}

impl ObjectInfo {
    /// Moves the object by `velocity * dt` and wraps it back into the field.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.offset += self.velocity * dt;
        self.offset = self.offset.map(wrap_toroidal);
    }

    /// GPU transform for a surface with the given width / height ratio.
    ///
    /// The x scale is divided by `aspect` so circles stay round.
    #[inline]
    pub fn transform(&self, aspect: f32) -> InstanceTransform {
        InstanceTransform {
            offset: self.offset.to_array(),
            scale: [self.scale / aspect, self.scale],
        }
    }
}

/// Per-instance transform record (16 bytes):
///
///  offset  0  offset  [f32; 2]   loc 3
///  offset  8  scale   [f32; 2]   loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceTransform {
    pub offset: [f32; 2],
    pub scale: [f32; 2],
}

impl InstanceTransform {
    pub const STRIDE: usize = 16;
}

const _: () = assert!(std::mem::size_of::<InstanceTransform>() == InstanceTransform::STRIDE);

/// Fixed-capacity set of objects, of which the first `active` are simulated
/// and drawn.
#[derive(Debug, Clone)]
pub struct ObjectField {
    objects: Vec<ObjectInfo>,
    active: usize,
    transforms: Vec<InstanceTransform>,
}

impl ObjectField {
    /// Creates `capacity` objects with state drawn uniformly from `ranges`.
    ///
    /// The same `seed` always yields the same objects.
    pub fn spawn(capacity: usize, active: usize, ranges: &SpawnRanges, seed: u64) -> Result<Self> {
        ranges.validate()?;

        let mut rng = StdRng::seed_from_u64(seed);
        let objects = (0..capacity)
            .map(|_| {
                let color = Rgba8::opaque(rng.random(), rng.random(), rng.random());
                let scale = rng.random_range(ranges.scale.clone());
                let offset = Vec2::new(
                    rng.random_range(ranges.offset.clone()),
                    rng.random_range(ranges.offset.clone()),
                );
                let velocity = Vec2::new(
                    rng.random_range(ranges.velocity.clone()),
                    rng.random_range(ranges.velocity.clone()),
                );
                ObjectInfo {
                    color,
                    scale,
                    offset,
                    velocity,
                }
            })
            .collect();

        Self::from_objects(objects, active)
    }

    /// Wraps an explicit object list. Offsets are wrapped into the field.
    pub fn from_objects(mut objects: Vec<ObjectInfo>, active: usize) -> Result<Self> {
        check_capacity(active, objects.len())?;
        for obj in &mut objects {
            obj.offset = obj.offset.map(wrap_toroidal);
        }
        Ok(Self {
            transforms: Vec::with_capacity(objects.len()),
            objects,
            active,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn set_active(&mut self, active: usize) -> Result<()> {
        check_capacity(active, self.capacity())?;
        self.active = active;
        Ok(())
    }

    #[inline]
    pub fn objects(&self) -> &[ObjectInfo] {
        &self.objects
    }

    /// Static colors for every object up to capacity.
    pub fn colors(&self) -> Vec<Rgba8> {
        self.objects.iter().map(|o| o.color).collect()
    }

    /// Advances every active object by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        for obj in &mut self.objects[..self.active] {
            obj.advance(dt);
        }
    }

    /// Rebuilds the host-side transform staging for the active objects.
    ///
    /// The returned slice is exactly `active * InstanceTransform::STRIDE` bytes
    /// once cast.
    pub fn write_transforms(&mut self, aspect: f32) -> &[InstanceTransform] {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        self.transforms.clear();
        self.transforms
            .extend(self.objects[..self.active].iter().map(|o| o.transform(aspect)));
        &self.transforms
    }
}

fn check_capacity(requested: usize, capacity: usize) -> Result<()> {
    if requested > capacity {
        return Err(RendererError::BufferOverflow {
            requested,
            capacity,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still(offset: Vec2, velocity: Vec2) -> ObjectInfo {
        ObjectInfo {
            color: Rgba8::WHITE,
            scale: 0.3,
            offset,
            velocity,
        }
    }

    // ── spawn ─────────────────────────────────────────────────────────────

    #[test]
    fn spawn_respects_ranges() {
        let ranges = SpawnRanges::default();
        let field = ObjectField::spawn(2_000, 100, &ranges, 7).unwrap();
        assert_eq!(field.capacity(), 2_000);
        assert_eq!(field.active(), 100);

        for o in field.objects() {
            assert!(ranges.scale.contains(&o.scale));
            assert!(ranges.offset.contains(&o.offset.x) && ranges.offset.contains(&o.offset.y));
            assert!(ranges.velocity.contains(&o.velocity.x));
            assert!(ranges.velocity.contains(&o.velocity.y));
            assert_eq!(o.color.a, 255);
        }
    }

    #[test]
    fn same_seed_is_reproducible() {
        let ranges = SpawnRanges::default();
        let a = ObjectField::spawn(500, 500, &ranges, 42).unwrap();
        let b = ObjectField::spawn(500, 500, &ranges, 42).unwrap();
        assert_eq!(a.objects(), b.objects());
        assert_eq!(a.colors(), b.colors());
    }

    #[test]
    fn different_seeds_diverge() {
        let ranges = SpawnRanges::default();
        let a = ObjectField::spawn(50, 50, &ranges, 1).unwrap();
        let b = ObjectField::spawn(50, 50, &ranges, 2).unwrap();
        assert_ne!(a.objects(), b.objects());
    }

    #[test]
    fn active_above_capacity_overflows() {
        let err = ObjectField::spawn(10, 11, &SpawnRanges::default(), 0).unwrap_err();
        assert!(matches!(
            err,
            RendererError::BufferOverflow { requested: 11, capacity: 10 }
        ));
    }

    #[test]
    fn overflowing_range_width_fails_instead_of_panicking() {
        let ranges = SpawnRanges {
            offset: -f32::MAX..=f32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            ObjectField::spawn(1, 1, &ranges, 0),
            Err(RendererError::InvalidConfig(_))
        ));
    }

    #[test]
    fn invalid_ranges_fail_before_spawning() {
        let ranges = SpawnRanges {
            scale: 1.0..=0.0,
            ..Default::default()
        };
        assert!(matches!(
            ObjectField::spawn(10, 10, &ranges, 0),
            Err(RendererError::InvalidConfig(_))
        ));
    }

    // ── step ──────────────────────────────────────────────────────────────

    #[test]
    fn stationary_object_stays_put() {
        let mut field =
            ObjectField::from_objects(vec![still(Vec2::new(1.4, 0.0), Vec2::zero())], 1).unwrap();
        field.step(1.0);
        assert_eq!(field.objects()[0].offset, Vec2::new(1.4, 0.0));
    }

    #[test]
    fn moving_object_wraps_across_edge() {
        let mut field = ObjectField::from_objects(
            vec![still(Vec2::new(1.4, 0.0), Vec2::new(0.2, 0.0))],
            1,
        )
        .unwrap();
        field.step(1.0);
        let o = field.objects()[0].offset;
        assert!((o.x - -1.4).abs() < 1e-5, "x = {}", o.x);
        assert_eq!(o.y, 0.0);
    }

    #[test]
    fn inactive_objects_are_not_advanced() {
        let objs = vec![
            still(Vec2::zero(), Vec2::new(0.1, 0.0)),
            still(Vec2::zero(), Vec2::new(0.1, 0.0)),
        ];
        let mut field = ObjectField::from_objects(objs, 1).unwrap();
        field.step(1.0);
        assert!((field.objects()[0].offset.x - 0.1).abs() < 1e-6);
        assert_eq!(field.objects()[1].offset, Vec2::zero());
    }

    #[test]
    fn set_active_is_bounded_by_capacity() {
        let mut field = ObjectField::spawn(8, 0, &SpawnRanges::default(), 3).unwrap();
        assert!(field.set_active(8).is_ok());
        assert!(matches!(
            field.set_active(9),
            Err(RendererError::BufferOverflow { .. })
        ));
        assert_eq!(field.active(), 8);
    }

    // ── transforms ────────────────────────────────────────────────────────

    #[test]
    fn transforms_cover_active_slice_only() {
        let mut field = ObjectField::spawn(10_000, 250, &SpawnRanges::default(), 9).unwrap();
        let bytes = bytemuck::cast_slice::<_, u8>(field.write_transforms(1.0)).len();
        assert_eq!(bytes, 250 * InstanceTransform::STRIDE);
        assert!(bytes <= field.capacity() * InstanceTransform::STRIDE);
    }

    #[test]
    fn transform_scale_is_aspect_corrected() {
        let mut field =
            ObjectField::from_objects(vec![still(Vec2::new(0.5, -0.5), Vec2::zero())], 1).unwrap();
        let t = field.write_transforms(2.0)[0];
        assert_eq!(t.offset, [0.5, -0.5]);
        assert!((t.scale[0] - 0.15).abs() < 1e-6);
        assert!((t.scale[1] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn degenerate_aspect_falls_back_to_square() {
        let mut field =
            ObjectField::from_objects(vec![still(Vec2::zero(), Vec2::zero())], 1).unwrap();
        let t = field.write_transforms(0.0)[0];
        assert_eq!(t.scale[0], t.scale[1]);
    }

    #[test]
    fn from_objects_wraps_out_of_field_offsets() {
        let field =
            ObjectField::from_objects(vec![still(Vec2::new(2.0, -2.0), Vec2::zero())], 1).unwrap();
        let o = field.objects()[0].offset;
        assert!((o.x - -1.0).abs() < 1e-5);
        assert!((o.y - 1.0).abs() < 1e-5);
    }
}
