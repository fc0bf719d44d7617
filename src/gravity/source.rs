use crate::math::Vector3;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// A spherical gravity well with soft inner and outer boundaries.
///
/// Acceleration is directed toward the center at full strength inside
/// `[inner_radius, outer_radius]`, tapers linearly to zero across the two
/// falloff bands, and is zero outside `[inner_falloff_radius,
/// outer_falloff_radius]`. A non-zero inner band turns the well inside out,
/// which is how hollow "walk on the inside" planets are built.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct RadialWell {
    center: Vector3,
    strength: f32,
    inner_falloff_radius: f32,
    inner_radius: f32,
    outer_radius: f32,
    outer_falloff_radius: f32,
    inner_falloff_factor: f32,
    outer_falloff_factor: f32,
}

impl RadialWell {
    /// Creates a new radial gravity well.
    ///
    /// The radii are reordered/clamped so that
    /// `0 <= inner_falloff <= inner <= outer <= outer_falloff` always holds;
    /// out-of-order input is repaired rather than rejected.
    pub fn new(
        center: Vector3,
        strength: f32,
        inner_falloff_radius: f32,
        inner_radius: f32,
        outer_radius: f32,
        outer_falloff_radius: f32,
    ) -> Self {
        let inner_falloff_radius = inner_falloff_radius.max(0.0);
        let inner_radius = inner_radius.max(inner_falloff_radius);
        let outer_radius = outer_radius.max(inner_radius);
        let outer_falloff_radius = outer_falloff_radius.max(outer_radius);

        // Empty bands never get sampled, so a zero factor is safe there.
        let inner_band = inner_radius - inner_falloff_radius;
        let outer_band = outer_falloff_radius - outer_radius;

        Self {
            center,
            strength,
            inner_falloff_radius,
            inner_radius,
            outer_radius,
            outer_falloff_radius,
            inner_falloff_factor: if inner_band > 0.0 { 1.0 / inner_band } else { 0.0 },
            outer_falloff_factor: if outer_band > 0.0 { 1.0 / outer_band } else { 0.0 },
        }
    }

    /// Gets the center of the well
    #[inline]
    pub fn center(&self) -> Vector3 {
        self.center
    }

    /// Gets the full-strength acceleration magnitude
    #[inline]
    pub fn strength(&self) -> f32 {
        self.strength
    }

    /// Gets the four radii as `(inner_falloff, inner, outer, outer_falloff)`
    #[inline]
    pub fn radii(&self) -> (f32, f32, f32, f32) {
        (
            self.inner_falloff_radius,
            self.inner_radius,
            self.outer_radius,
            self.outer_falloff_radius,
        )
    }

    /// Evaluates the well's acceleration at a position
    pub fn get_gravity(&self, position: Vector3) -> Vector3 {
        let vector = self.center - position;
        let distance = vector.length();

        if distance > self.outer_falloff_radius
            || distance < self.inner_falloff_radius
            || distance < crate::math::EPSILON
        {
            return Vector3::zero();
        }

        let mut g = self.strength / distance;

        if distance > self.outer_radius {
            g *= 1.0 - (distance - self.outer_radius) * self.outer_falloff_factor;
        }

        if distance < self.inner_radius {
            g *= 1.0 - (self.inner_radius - distance) * self.inner_falloff_factor;
        }

        vector * g
    }
}

/// One generator of the aggregate gravity field.
///
/// Field evaluation only ever sums contributions, so the set of source kinds
/// is a closed enum rather than an open trait.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum GravitySource {
    /// Constant acceleration everywhere (e.g. Earth-like `(0, -9.81, 0)`)
    Uniform(Vector3),

    /// Spherical well with soft inner/outer boundaries
    RadialWell(RadialWell),
}

impl GravitySource {
    /// Creates an Earth-like uniform source (-9.81 in y direction)
    pub fn earth() -> Self {
        Self::Uniform(Vector3::new(0.0, -9.81, 0.0))
    }

    /// Evaluates this source's acceleration at a position
    #[inline]
    pub fn get_gravity(&self, position: Vector3) -> Vector3 {
        match self {
            Self::Uniform(acceleration) => *acceleration,
            Self::RadialWell(well) => well.get_gravity(position),
        }
    }
}
