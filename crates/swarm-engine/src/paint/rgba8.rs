use bytemuck::{Pod, Zeroable};

/// Packed 8-bit RGBA color (4 bytes, read by shaders as `unorm8x4`).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Quantizes unit-range float channels, clamping out-of-range values.
    #[inline]
    pub fn from_unit(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::new(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b), unit_to_u8(a))
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[inline]
fn unit_to_u8(v: f32) -> u8 {
    // NaN clamps to 0 through the `as` cast.
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_four_bytes() {
        assert_eq!(std::mem::size_of::<Rgba8>(), 4);
    }

    #[test]
    fn from_unit_quantizes_and_clamps() {
        assert_eq!(Rgba8::from_unit(1.0, 0.0, 0.5, 2.0), Rgba8::new(255, 0, 128, 255));
        assert_eq!(Rgba8::from_unit(-1.0, 0.1, f32::NAN, 1.0), Rgba8::new(0, 26, 0, 255));
    }

    #[test]
    fn bytes_are_in_rgba_order() {
        let c = Rgba8::new(1, 2, 3, 4);
        assert_eq!(bytemuck::bytes_of(&c), &[1, 2, 3, 4]);
        assert_eq!(c.to_array(), [1, 2, 3, 4]);
    }
}
