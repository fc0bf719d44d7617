use crate::math::Vector3;
use nalgebra as na;
use std::ops::Mul;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Quaternion for representing rotations in 3D space
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Quaternion {
    /// Real component
    pub w: f32,

    /// First imaginary component
    pub x: f32,

    /// Second imaginary component
    pub y: f32,

    /// Third imaginary component
    pub z: f32,
}

impl Quaternion {
    /// Creates a new quaternion
    #[inline]
    pub fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Creates an identity quaternion (no rotation)
    #[inline]
    pub fn identity() -> Self {
        Self { w: 1.0, x: 0.0, y: 0.0, z: 0.0 }
    }

    /// Creates a quaternion from an axis-angle representation
    pub fn from_axis_angle(axis: Vector3, angle: f32) -> Self {
        let half_angle = angle * 0.5;
        let s = half_angle.sin();
        let c = half_angle.cos();

        let axis = axis.normalize();

        Self {
            w: c,
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
        }
    }

    /// Returns the length of the quaternion
    #[inline]
    pub fn length(&self) -> f32 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Returns a normalized version of the quaternion
    pub fn normalize(&self) -> Self {
        let length = self.length();
        if length > crate::math::EPSILON {
            Self {
                w: self.w / length,
                x: self.x / length,
                y: self.y / length,
                z: self.z / length,
            }
        } else {
            Self::identity()
        }
    }

    /// Returns the conjugate of the quaternion
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self { w: self.w, x: -self.x, y: -self.y, z: -self.z }
    }

    /// Returns the inverse rotation (conjugate for unit quaternions)
    #[inline]
    pub fn inverse(&self) -> Self {
        self.conjugate()
    }

    /// Rotates a vector by this quaternion
    pub fn rotate_vector(&self, v: Vector3) -> Vector3 {
        // v' = q * v * q^-1, expanded to avoid constructing intermediates
        let u = Vector3::new(self.x, self.y, self.z);
        let s = self.w;

        u * (2.0 * u.dot(&v)) + v * (s * s - u.dot(&u)) + u.cross(&v) * (2.0 * s)
    }

    /// Convert to nalgebra UnitQuaternion
    #[inline]
    pub fn to_nalgebra(&self) -> na::UnitQuaternion<f32> {
        na::UnitQuaternion::from_quaternion(na::Quaternion::new(self.w, self.x, self.y, self.z))
    }

    /// Convert from nalgebra UnitQuaternion
    #[inline]
    pub fn from_nalgebra(q: &na::UnitQuaternion<f32>) -> Self {
        Self::new(q.w, q.i, q.j, q.k)
    }
}

impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }
}
