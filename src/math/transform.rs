use crate::math::{Quaternion, Vector3};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Represents a rigid transformation in 3D space (position and rotation)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Transform {
    /// Position in 3D space
    pub position: Vector3,

    /// Rotation as a quaternion
    pub rotation: Quaternion,
}

impl Transform {
    /// Creates a new transform with the given position and rotation
    #[inline]
    pub fn new(position: Vector3, rotation: Quaternion) -> Self {
        Self { position, rotation }
    }

    /// Creates a new identity transform (no translation, no rotation)
    #[inline]
    pub fn identity() -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Quaternion::identity(),
        }
    }

    /// Creates a new transform from just a position
    #[inline]
    pub fn from_position(position: Vector3) -> Self {
        Self {
            position,
            rotation: Quaternion::identity(),
        }
    }

    /// Transforms a point from local space to world space
    #[inline]
    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        self.rotation.rotate_vector(point) + self.position
    }

    /// Transforms a point from world space to local space
    #[inline]
    pub fn inverse_transform_point(&self, point: Vector3) -> Vector3 {
        self.rotation.inverse().rotate_vector(point - self.position)
    }

    /// Transforms a direction from local space to world space (ignores translation)
    #[inline]
    pub fn transform_direction(&self, direction: Vector3) -> Vector3 {
        self.rotation.rotate_vector(direction)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
