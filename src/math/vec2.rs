use std::ops::{Add, Mul, Sub};

/// A two-component vector, generic over integer or floating element types.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

pub type Vec2i = Vec2<i32>;
pub type Vec2f = Vec2<f32>;

impl<T> Vec2<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> Vec2<T>
where
    T: Copy + Add<Output = T> + Mul<Output = T>,
{
    pub fn dot(&self, other: Self) -> T {
        self.x * other.x + self.y * other.y
    }
}

impl Vec2f {
    /// Euclidean length.
    pub fn norm(&self) -> f32 {
        self.dot(*self).sqrt()
    }

    /// Rescales to `length`. A zero vector yields non-finite components.
    pub fn normalize_to(&self, length: f32) -> Self {
        *self * (length / self.norm())
    }

    pub fn normalize(&self) -> Self {
        self.normalize_to(1.0)
    }
}

impl<T: Add<Output = T>> Add for Vec2<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<T: Sub<Output = T>> Sub for Vec2<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// Scalar multiplication of an integer vector.
///
/// Each component is scaled in floating point and truncated toward zero,
/// which is what the scanline filler relies on when stepping along edges.
impl Mul<f32> for Vec2i {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            x: (self.x as f32 * rhs) as i32,
            y: (self.y as f32 * rhs) as i32,
        }
    }
}

impl Mul<f32> for Vec2f {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}
