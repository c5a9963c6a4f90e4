// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 SimpleSTL Contributors

//! 3D vector value type
//!
//! Equality and hashing are bit-exact so a `Vector3` can key the vertex
//! deduplication map. No epsilon merging happens anywhere.

use nalgebra as na;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// Length below which `normalize` leaves a vector untouched
const NORMALIZE_EPS: f32 = 1e-8;

/// Immutable 3D vector with `f32` components
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector3(na::Vector3<f32>);

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self(na::Vector3::new(x, y, z))
    }

    /// A vector with every component set to `value`
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.0.z
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.0.x, self.0.y, self.0.z]
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.0.dot(&other.0)
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self(self.0.cross(&other.0))
    }

    pub fn length_squared(&self) -> f32 {
        self.0.norm_squared()
    }

    pub fn length(&self) -> f32 {
        self.0.norm()
    }

    /// Unit vector in the same direction, or `self` when the length is
    /// too small to divide by
    pub fn normalize(&self) -> Self {
        let length = self.length();
        if length > NORMALIZE_EPS {
            Self(self.0 / length)
        } else {
            *self
        }
    }

    /// Componentwise minimum
    pub fn min(&self, other: &Self) -> Self {
        Self(self.0.inf(&other.0))
    }

    /// Componentwise maximum
    pub fn max(&self, other: &Self) -> Self {
        Self(self.0.sup(&other.0))
    }

    /// Arithmetic mean of a set of points, `None` for an empty set
    pub fn centroid<'a>(points: impl IntoIterator<Item = &'a Vector3>) -> Option<Self> {
        let mut sum = Self::ZERO;
        let mut count = 0usize;
        for point in points {
            sum += *point;
            count += 1;
        }
        (count > 0).then(|| sum / count as f32)
    }
}

impl Default for Vector3 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Vector3 {
    fn eq(&self, other: &Self) -> bool {
        self.0.x.to_bits() == other.0.x.to_bits()
            && self.0.y.to_bits() == other.0.y.to_bits()
            && self.0.z.to_bits() == other.0.z.to_bits()
    }
}

impl Eq for Vector3 {}

impl Hash for Vector3 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.x.to_bits().hash(state);
        self.0.y.to_bits().hash(state);
        self.0.z.to_bits().hash(state);
    }
}

impl fmt::Debug for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector3({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(value: [f32; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl From<na::Vector3<f32>> for Vector3 {
    fn from(value: na::Vector3<f32>) -> Self {
        Self(value)
    }
}

impl From<Vector3> for na::Vector3<f32> {
    fn from(value: Vector3) -> Self {
        value.0
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self(self.0 * rhs)
    }
}

impl Div<f32> for Vector3 {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self(self.0 / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashSet;

    #[test]
    fn test_cross_and_dot() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(x.dot(&y), 0.0);
    }

    #[test]
    fn test_normalize() {
        let v = Vector3::new(3.0, 0.0, 4.0).normalize();
        assert_relative_eq!(v.length(), 1.0, epsilon = 1e-6);

        // Zero-length vectors come back unchanged
        assert_eq!(Vector3::ZERO.normalize(), Vector3::ZERO);
    }

    #[test]
    fn test_min_max() {
        let a = Vector3::new(1.0, 5.0, -2.0);
        let b = Vector3::new(3.0, 2.0, -4.0);
        assert_eq!(a.min(&b), Vector3::new(1.0, 2.0, -4.0));
        assert_eq!(a.max(&b), Vector3::new(3.0, 5.0, -2.0));
    }

    #[test]
    fn test_bit_exact_equality() {
        let a = Vector3::new(0.1, 0.2, 0.3);
        let b = Vector3::new(0.1, 0.2, 0.3);
        assert_eq!(a, b);

        let nudged = Vector3::new(f32::from_bits(0.1f32.to_bits() + 1), 0.2, 0.3);
        assert_ne!(a, nudged);

        // Signed zeros have different bit patterns
        assert_ne!(Vector3::new(0.0, 0.0, 0.0), Vector3::new(-0.0, 0.0, 0.0));

        let set: HashSet<Vector3> = [a, b, nudged].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_centroid() {
        let points = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(0.0, 2.0, 0.0),
            Vector3::new(2.0, 2.0, 0.0),
        ];
        assert_eq!(Vector3::centroid(&points), Some(Vector3::new(1.0, 1.0, 0.0)));
        assert_eq!(Vector3::centroid(std::iter::empty()), None);
    }
}
