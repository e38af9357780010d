use core::ops::{Add, AddAssign, Mul};

/// 2D vector in normalized device coordinates.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(f(self.x), f(self.y))
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_scale() {
        let p = Vec2::new(1.0, -2.0) + Vec2::new(0.5, 0.5) * 2.0;
        assert_eq!(p, Vec2::new(2.0, -1.0));
    }

    #[test]
    fn add_assign_accumulates() {
        let mut p = Vec2::zero();
        p += Vec2::new(0.25, 0.5);
        p += Vec2::new(0.25, 0.5);
        assert_eq!(p, Vec2::new(0.5, 1.0));
    }

    #[test]
    fn map_applies_per_component() {
        assert_eq!(Vec2::new(-1.0, 4.0).map(f32::abs), Vec2::new(1.0, 4.0));
    }
}
