//! Passive bodies that fall under the aggregate gravity field and float in
//! water. Like the locomotion controller, these only compute the velocity to
//! request; the external simulation integrates it.

use crate::contact::SurfaceMask;
use crate::gravity::GravityField;
use crate::math::{Ray, Transform, Vector3};
use crate::scene::SceneQuery;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// How long a near-resting body must stay still before gravity is withheld
const FLOAT_SLEEP_DELAY: f32 = 1.0;

/// Squared speed under which a body counts as resting
const REST_SPEED_SQUARED: f32 = 1.0e-4;

/// Configuration shared by the floating body drivers
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct FloatingBodyConfig {
    /// How far above each probe point the submergence ray starts
    pub submergence_offset: f32,

    /// Depth over which submergence scales from 0 to 1
    pub submergence_range: f32,

    /// Fraction of gravity cancelled per unit of submergence
    pub buoyancy: f32,

    /// Velocity damping applied per unit of submergence
    pub water_drag: f32,

    /// Trigger volumes that count as water
    pub water_mask: SurfaceMask,

    /// Stop applying gravity once the body has rested for a while, letting
    /// floating debris settle instead of bobbing forever
    pub float_to_sleep: bool,
}

impl Default for FloatingBodyConfig {
    fn default() -> Self {
        Self {
            submergence_offset: 0.5,
            submergence_range: 1.0,
            buoyancy: 1.0,
            water_drag: 1.0,
            water_mask: SurfaceMask::WATER,
            float_to_sleep: false,
        }
    }
}

/// A passive body with a single buoyancy point
#[derive(Debug, Clone)]
pub struct FloatingBody {
    config: FloatingBodyConfig,
    submergence: f32,
    gravity: Vector3,
    float_delay: f32,
}

impl FloatingBody {
    /// Creates a floating body driver
    pub fn new(config: FloatingBodyConfig) -> Self {
        Self {
            config,
            submergence: 0.0,
            gravity: Vector3::zero(),
            float_delay: 0.0,
        }
    }

    /// Fractional depth of immersion, in [0, 1]
    pub fn submergence(&self) -> f32 {
        self.submergence
    }

    /// Handles a water trigger overlap by probing for the surface
    pub fn water_overlap(&mut self, scene: &dyn SceneQuery, position: Vector3, surface: SurfaceMask) {
        if !surface.intersects(self.config.water_mask) {
            return;
        }
        let up_axis = if self.gravity.is_zero() {
            Vector3::unit_y()
        } else {
            -self.gravity.normalize()
        };
        let ray = Ray::new(position + up_axis * self.config.submergence_offset, -up_axis);
        self.submergence = match scene.cast_ray(
            &ray,
            self.config.submergence_range + 1.0,
            self.config.water_mask,
        ) {
            Some(hit) => (1.0 - hit.distance / self.config.submergence_range).clamp(0.0, 1.0),
            None => 1.0,
        };
    }

    /// Runs one tick, returning the velocity the body should take on
    pub fn simulate(
        &mut self,
        dt: f32,
        position: Vector3,
        velocity: Vector3,
        field: &GravityField,
    ) -> Vector3 {
        if self.config.float_to_sleep {
            if velocity.length_squared() < REST_SPEED_SQUARED {
                self.float_delay += dt;
                if self.float_delay >= FLOAT_SLEEP_DELAY {
                    self.submergence = 0.0;
                    return velocity;
                }
            } else {
                self.float_delay = 0.0;
            }
        }

        self.gravity = field.get_gravity(position);
        let mut velocity = velocity;

        if self.submergence > 0.0 {
            let drag = (1.0 - self.config.water_drag * self.submergence * dt).max(0.0);
            velocity *= drag;
            velocity += self.gravity * (-(self.config.buoyancy * self.submergence) * dt);
            self.submergence = 0.0;
        }

        velocity + self.gravity * dt
    }
}

/// A passive body with several buoyancy points, stable enough for large
/// floating platforms that would tip over with a single point
#[derive(Debug, Clone)]
pub struct StableFloatingBody {
    config: FloatingBodyConfig,
    buoyancy_offsets: Vec<Vector3>,
    submergence: Vec<f32>,
    gravity: Vector3,
    float_delay: f32,

    /// Verify a missed probe is actually inside water before treating it as
    /// fully submerged; needed for shallow water next to tall colliders
    pub safe_floating: bool,
}

impl StableFloatingBody {
    /// Creates a driver with one buoyancy point per local-space offset
    pub fn new(config: FloatingBodyConfig, buoyancy_offsets: Vec<Vector3>) -> Self {
        let count = buoyancy_offsets.len();
        Self {
            config,
            buoyancy_offsets,
            submergence: vec![0.0; count],
            gravity: Vector3::zero(),
            float_delay: 0.0,
            safe_floating: false,
        }
    }

    /// Handles a water trigger overlap by probing at every buoyancy point
    pub fn water_overlap(&mut self, scene: &dyn SceneQuery, pose: &Transform, surface: SurfaceMask) {
        if !surface.intersects(self.config.water_mask) {
            return;
        }
        let down = if self.gravity.is_zero() {
            -Vector3::unit_y()
        } else {
            self.gravity.normalize()
        };
        let offset = down * -self.config.submergence_offset;

        for (i, buoyancy_offset) in self.buoyancy_offsets.iter().enumerate() {
            let point = offset + pose.transform_point(*buoyancy_offset);
            let ray = Ray::new(point, down);
            if let Some(hit) = scene.cast_ray(
                &ray,
                self.config.submergence_range + 1.0,
                self.config.water_mask,
            ) {
                self.submergence[i] =
                    (1.0 - hit.distance / self.config.submergence_range).clamp(0.0, 1.0);
            } else if !self.safe_floating
                || scene.check_sphere(point, 0.01, self.config.water_mask)
            {
                self.submergence[i] = 1.0;
            }
        }
    }

    /// Runs one tick, returning the velocity the body should take on
    pub fn simulate(
        &mut self,
        dt: f32,
        position: Vector3,
        velocity: Vector3,
        field: &GravityField,
    ) -> Vector3 {
        if self.config.float_to_sleep {
            if velocity.length_squared() < REST_SPEED_SQUARED {
                self.float_delay += dt;
                if self.float_delay >= FLOAT_SLEEP_DELAY {
                    return velocity;
                }
            } else {
                self.float_delay = 0.0;
            }
        }

        self.gravity = field.get_gravity(position);
        let count = self.buoyancy_offsets.len().max(1) as f32;
        let drag_factor = self.config.water_drag * dt / count;
        let buoyancy_factor = -self.config.buoyancy / count;

        let mut velocity = velocity;
        for submergence in &mut self.submergence {
            if *submergence > 0.0 {
                velocity *= (1.0 - drag_factor * *submergence).max(0.0);
                velocity += self.gravity * (buoyancy_factor * *submergence * dt);
                *submergence = 0.0;
            }
        }

        velocity + self.gravity * dt
    }
}
