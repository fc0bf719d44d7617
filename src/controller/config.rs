use crate::contact::SurfaceMask;
use crate::error::LocomotionError;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Configuration parameters for one locomotion agent
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ControllerConfig {
    /// Maximum acceleration while grounded
    pub max_acceleration: f32,

    /// Maximum speed while grounded
    pub max_speed: f32,

    /// Maximum acceleration while airborne
    pub max_air_acceleration: f32,

    /// Maximum acceleration while climbing
    pub max_climb_acceleration: f32,

    /// Maximum speed while climbing
    pub max_climb_speed: f32,

    /// Maximum acceleration while fully swimming
    pub max_swim_acceleration: f32,

    /// Maximum speed while fully swimming
    pub max_swim_speed: f32,

    /// Height a jump from flat ground reaches, in meters
    pub jump_height: f32,

    /// Number of jumps allowed after leaving the ground
    pub max_air_jumps: u32,

    /// Steepest slope angle that still counts as ground, in degrees
    pub max_ground_angle: f32,

    /// Steepest slope angle for stairs-classified surfaces, in degrees
    pub max_stairs_angle: f32,

    /// Steepest climbable angle, in degrees; past 90 this allows overhangs
    pub max_climb_angle: f32,

    /// Above this speed the agent is never snapped back to the ground
    pub max_snap_speed: f32,

    /// How far below the agent the snap probe searches for ground
    pub probe_distance: f32,

    /// How far above the agent's center the submergence probe starts
    pub submergence_offset: f32,

    /// Depth over which submergence scales from 0 to 1
    pub submergence_range: f32,

    /// Fraction of gravity cancelled per unit of submergence
    pub buoyancy: f32,

    /// Velocity damping applied per unit of submergence
    pub water_drag: f32,

    /// Submergence at which the agent switches to swimming
    pub swim_threshold: f32,

    /// Surfaces the ground snap probe may hit
    pub probe_mask: SurfaceMask,

    /// Surfaces judged against the stairs slope angle
    pub stairs_mask: SurfaceMask,

    /// Surfaces the agent may climb
    pub climb_mask: SurfaceMask,

    /// Trigger volumes that count as water
    pub water_mask: SurfaceMask,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            max_acceleration: 10.0,
            max_speed: 10.0,
            max_air_acceleration: 1.0,
            max_climb_acceleration: 20.0,
            max_climb_speed: 2.0,
            max_swim_acceleration: 5.0,
            max_swim_speed: 5.0,
            jump_height: 2.0,
            max_air_jumps: 0,
            max_ground_angle: 25.0,
            max_stairs_angle: 50.0,
            max_climb_angle: 140.0,
            max_snap_speed: 100.0,
            probe_distance: 1.0,
            submergence_offset: 0.5,
            submergence_range: 1.0,
            buoyancy: 1.0,
            water_drag: 1.0,
            swim_threshold: 0.5,
            probe_mask: SurfaceMask::GROUND | SurfaceMask::STAIRS | SurfaceMask::CLIMBABLE,
            stairs_mask: SurfaceMask::STAIRS,
            climb_mask: SurfaceMask::CLIMBABLE,
            water_mask: SurfaceMask::WATER,
        }
    }
}

impl ControllerConfig {
    /// Validates that every parameter is finite and inside its allowed range
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("max_acceleration", self.max_acceleration),
            ("max_speed", self.max_speed),
            ("max_air_acceleration", self.max_air_acceleration),
            ("max_climb_acceleration", self.max_climb_acceleration),
            ("max_climb_speed", self.max_climb_speed),
            ("max_swim_acceleration", self.max_swim_acceleration),
            ("max_swim_speed", self.max_swim_speed),
            ("jump_height", self.jump_height),
            ("max_snap_speed", self.max_snap_speed),
            ("probe_distance", self.probe_distance),
            ("buoyancy", self.buoyancy),
            ("water_drag", self.water_drag),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(LocomotionError::InvalidParameter(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }

        if !self.submergence_offset.is_finite() {
            return Err(LocomotionError::InvalidParameter(format!(
                "submergence_offset must be finite, got {}",
                self.submergence_offset
            )));
        }
        if !self.submergence_range.is_finite() || self.submergence_range < 0.1 {
            return Err(LocomotionError::InvalidParameter(format!(
                "submergence_range must be at least 0.1, got {}",
                self.submergence_range
            )));
        }
        if !self.swim_threshold.is_finite()
            || self.swim_threshold <= 0.0
            || self.swim_threshold > 1.0
        {
            return Err(LocomotionError::InvalidParameter(format!(
                "swim_threshold must be in (0, 1], got {}",
                self.swim_threshold
            )));
        }
        if !(0.0..=90.0).contains(&self.max_ground_angle) {
            return Err(LocomotionError::InvalidParameter(format!(
                "max_ground_angle must be in [0, 90], got {}",
                self.max_ground_angle
            )));
        }
        if !(0.0..=90.0).contains(&self.max_stairs_angle) {
            return Err(LocomotionError::InvalidParameter(format!(
                "max_stairs_angle must be in [0, 90], got {}",
                self.max_stairs_angle
            )));
        }
        if !(90.0..=180.0).contains(&self.max_climb_angle) {
            return Err(LocomotionError::InvalidParameter(format!(
                "max_climb_angle must be in [90, 180], got {}",
                self.max_climb_angle
            )));
        }

        Ok(())
    }
}
