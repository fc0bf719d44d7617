use crate::math::Vector3;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Ray representation for probe queries against the collision layer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Ray {
    /// Origin of the ray
    pub origin: Vector3,

    /// Direction of the ray (not necessarily normalized)
    pub direction: Vector3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    #[inline]
    pub fn new(origin: Vector3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// Creates a new ray with the given origin and direction, ensuring the direction is normalized
    #[inline]
    pub fn new_normalized(origin: Vector3, direction: Vector3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Returns the point at a given distance along the ray
    #[inline]
    pub fn point_at(&self, t: f32) -> Vector3 {
        self.origin + self.direction * t
    }

    /// Returns the normalized direction of the ray
    #[inline]
    pub fn normalized_direction(&self) -> Vector3 {
        self.direction.normalize()
    }
}
