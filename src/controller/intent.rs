use crate::math::Vector3;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// The player's desired movement for the upcoming tick.
///
/// The movement vector uses x for the right axis, z for the forward axis,
/// and y for the dive axis (only honored while swimming); its magnitude is
/// clamped to 1. The jump request is a one-shot latch: it stays set until a
/// simulation tick consumes it, so a press between ticks is never lost.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct PlayerIntent {
    movement: Vector3,
    jump_requested: bool,
    climb_desired: bool,
    input_right: Vector3,
    input_forward: Vector3,
}

impl PlayerIntent {
    /// Creates an empty intent with a world-space input basis
    pub fn new() -> Self {
        Self {
            movement: Vector3::zero(),
            jump_requested: false,
            climb_desired: false,
            input_right: Vector3::unit_x(),
            input_forward: Vector3::unit_z(),
        }
    }

    /// Sets the desired movement axes, clamping the magnitude to 1
    pub fn set_movement(&mut self, movement: Vector3) {
        self.movement = movement.clamp_magnitude(1.0);
    }

    /// Gets the clamped movement axes
    #[inline]
    pub fn movement(&self) -> Vector3 {
        self.movement
    }

    /// Latches a jump request until the next tick consumes it
    pub fn request_jump(&mut self) {
        self.jump_requested = true;
    }

    /// Returns whether a jump is currently latched
    #[inline]
    pub fn jump_requested(&self) -> bool {
        self.jump_requested
    }

    /// Consumes the jump latch, returning whether it was set
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_requested)
    }

    /// Sets whether the player wants to grab climbable surfaces
    pub fn set_climb_desired(&mut self, desired: bool) {
        self.climb_desired = desired;
    }

    /// Returns whether the player wants to climb
    #[inline]
    pub fn climb_desired(&self) -> bool {
        self.climb_desired
    }

    /// Sets the input-space basis, typically the camera's right and forward
    /// axes, that movement input is interpreted in
    pub fn set_input_space(&mut self, right: Vector3, forward: Vector3) {
        self.input_right = right;
        self.input_forward = forward;
    }

    /// Resets the input basis to world space
    pub fn clear_input_space(&mut self) {
        self.input_right = Vector3::unit_x();
        self.input_forward = Vector3::unit_z();
    }

    /// Gets the input-space right axis
    #[inline]
    pub fn input_right(&self) -> Vector3 {
        self.input_right
    }

    /// Gets the input-space forward axis
    #[inline]
    pub fn input_forward(&self) -> Vector3 {
        self.input_forward
    }
}

impl Default for PlayerIntent {
    fn default() -> Self {
        Self::new()
    }
}
