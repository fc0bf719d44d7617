mod config;
mod intent;

pub use self::config::ControllerConfig;
pub use self::intent::PlayerIntent;

use crate::contact::{ClassifierParams, ContactClassifier, ContactSample, SurfaceMask};
use crate::gravity::GravityField;
use crate::math::{lerp, Ray, Vector3};
use crate::scene::{AgentBody, BodyHandle, ConnectedBodyState, SceneQuery};
use crate::Result;

/// The movement state resolved once per tick, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementState {
    /// Clinging to a climbable surface
    Climbing,

    /// Submerged past the swim threshold; underlying geometry is ignored
    Swimming,

    /// Standing on ground, snapped to it, or wedged between steep walls
    Grounded,

    /// No qualifying contact
    Airborne,
}

/// What one simulation tick asks the external body integrator to do
#[derive(Debug, Clone, Copy)]
pub struct TickOutput {
    /// The velocity the external body should take on
    pub velocity: Vector3,

    /// The state the agent resolved to this tick
    pub state: MovementState,

    /// The up axis derived from the aggregate gravity at the agent's position
    pub up_axis: Vector3,
}

/// Per-agent locomotion controller.
///
/// Owns the agent's movement state and runs the per-tick decision sequence:
/// contacts and water overlaps accumulate between ticks, then one
/// [`simulate`](Self::simulate) call classifies them, resolves the movement
/// state, adjusts velocity toward the player's intent, applies gravity, and
/// clears the tick's accumulators. The external body simulation owns position
/// and applies the returned velocity; this controller never integrates.
#[derive(Debug, Clone)]
pub struct LocomotionController {
    config: ControllerConfig,
    classifier: ContactClassifier,
    intent: PlayerIntent,
    state: MovementState,

    velocity: Vector3,

    // Axes are derived from gravity and the input space each tick; the up
    // axis persists as the fallback for a degenerate (zero) gravity sum.
    up_axis: Vector3,
    right_axis: Vector3,
    forward_axis: Vector3,

    // The tick's resolved contact normals.
    contact_normal: Vector3,

    connected_body: Option<BodyHandle>,
    previous_connected_body: Option<BodyHandle>,
    connection_velocity: Vector3,
    connection_world_position: Vector3,
    connection_local_position: Vector3,

    jump_phase: u32,
    steps_since_grounded: i32,
    steps_since_jump: i32,

    submergence: f32,
}

impl LocomotionController {
    /// Creates a controller after validating the configuration
    pub fn new(config: ControllerConfig) -> Result<Self> {
        config.validate()?;
        let params = ClassifierParams::from_angles(
            config.max_ground_angle,
            config.max_stairs_angle,
            config.max_climb_angle,
            config.stairs_mask,
            config.climb_mask,
        );
        Ok(Self {
            config,
            classifier: ContactClassifier::new(params),
            intent: PlayerIntent::new(),
            state: MovementState::Airborne,
            velocity: Vector3::zero(),
            up_axis: Vector3::unit_y(),
            right_axis: Vector3::unit_x(),
            forward_axis: Vector3::unit_z(),
            contact_normal: Vector3::unit_y(),
            connected_body: None,
            previous_connected_body: None,
            connection_velocity: Vector3::zero(),
            connection_world_position: Vector3::zero(),
            connection_local_position: Vector3::zero(),
            jump_phase: 0,
            steps_since_grounded: 0,
            steps_since_jump: 0,
            submergence: 0.0,
        })
    }

    /// Gets the configuration
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Gets mutable access to the player intent for the upcoming tick
    pub fn intent_mut(&mut self) -> &mut PlayerIntent {
        &mut self.intent
    }

    /// Gets the player intent
    pub fn intent(&self) -> &PlayerIntent {
        &self.intent
    }

    /// The movement state resolved by the most recent tick
    pub fn state(&self) -> MovementState {
        self.state
    }

    /// The up axis at the agent's position as of the most recent tick
    pub fn up_axis(&self) -> Vector3 {
        self.up_axis
    }

    /// Fractional depth of immersion in water, in [0, 1]
    pub fn submergence(&self) -> f32 {
        self.submergence
    }

    /// Count of jumps taken since last touching a qualifying surface
    pub fn jump_phase(&self) -> u32 {
        self.jump_phase
    }

    /// The body the agent resolved as connected to, as of the most recent tick
    pub fn connected_body(&self) -> Option<BodyHandle> {
        self.previous_connected_body
    }

    fn on_ground(&self) -> bool {
        self.classifier.buckets.ground_count > 0
    }

    fn on_steep(&self) -> bool {
        self.classifier.buckets.steep_count > 0
    }

    fn climbing(&self) -> bool {
        // A wall grabbed within two steps of a jump would cancel the jump
        // that just pushed away from it.
        self.classifier.buckets.climb_count > 0 && self.steps_since_jump > 2
    }

    fn in_water(&self) -> bool {
        self.submergence > 0.0
    }

    fn swimming(&self) -> bool {
        self.submergence >= self.config.swim_threshold
    }

    /// Accumulates one contact sample reported by the collision layer.
    ///
    /// Call once per contact event before `simulate`; samples are not
    /// deduplicated. Contacts are ignored entirely while swimming.
    pub fn contact(&mut self, sample: &ContactSample) {
        if self.swimming() {
            return;
        }
        self.classifier
            .classify(sample, self.up_axis, self.intent.climb_desired());
    }

    /// Handles an overlap notification from a trigger volume.
    ///
    /// Non-water volumes are ignored. For water, submergence is re-evaluated
    /// by probing straight down from slightly above the agent; it decays at
    /// the end of every tick and must be re-asserted by an active overlap.
    pub fn water_overlap(
        &mut self,
        scene: &dyn SceneQuery,
        position: Vector3,
        surface: SurfaceMask,
        volume_body: Option<BodyHandle>,
    ) {
        if !surface.intersects(self.config.water_mask) {
            return;
        }

        let ray = Ray::new(position + self.up_axis * self.config.submergence_offset, -self.up_axis);
        self.submergence = match scene.cast_ray(
            &ray,
            self.config.submergence_range + 1.0,
            self.config.water_mask,
        ) {
            Some(hit) => (1.0 - hit.distance / self.config.submergence_range).clamp(0.0, 1.0),
            // No surface within range means the probe started under water.
            None => 1.0,
        };

        if self.swimming() {
            self.classifier.buckets.connected_body = volume_body;
        }
    }

    /// Latches a jump request for the next tick
    pub fn request_jump(&mut self) {
        self.intent.request_jump();
    }

    /// Forces the next tick to skip ground snapping, as if a jump had just
    /// been performed. Useful for external launch pads and boost volumes.
    pub fn prevent_snap_to_ground(&mut self) {
        self.steps_since_jump = -1;
    }

    /// Runs one fixed-timestep simulation tick.
    ///
    /// Consumes the contacts, overlaps, and intent accumulated since the last
    /// call and returns the velocity the external body should take on.
    pub fn simulate(
        &mut self,
        dt: f32,
        body: &AgentBody,
        scene: &dyn SceneQuery,
        field: &GravityField,
    ) -> TickOutput {
        let (gravity, up_axis) = field.get_gravity_and_up(body.position, self.up_axis);
        self.up_axis = up_axis;
        self.right_axis = self.intent.input_right().project_direction_on_plane(&up_axis);
        self.forward_axis = self.intent.input_forward().project_direction_on_plane(&up_axis);

        if self.swimming() {
            self.intent.set_climb_desired(false);
        }

        self.update_state(dt, body, scene);

        if self.in_water() {
            // Drag before adjustment, so the player can still accelerate.
            self.velocity *= 1.0 - self.config.water_drag * self.submergence * dt;
        }

        self.adjust_velocity(dt);

        if self.intent.take_jump() {
            self.jump(gravity);
        }

        if self.climbing() {
            // Pull into the wall so the agent tracks it around corners.
            self.velocity -=
                self.contact_normal * (self.config.max_climb_acceleration * 0.9 * dt);
        } else if self.in_water() {
            self.velocity += gravity * ((1.0 - self.config.buoyancy * self.submergence) * dt);
        } else if self.on_ground() && self.velocity.length_squared() < 0.01 {
            // At rest on a slope, cancel only the normal component of gravity
            // so the agent neither slides nor jitters.
            self.velocity +=
                self.contact_normal * (gravity.dot(&self.contact_normal) * dt);
        } else if self.intent.climb_desired() && self.on_ground() {
            self.velocity += (gravity
                - self.contact_normal * (self.config.max_climb_acceleration * 0.9))
                * dt;
        } else {
            self.velocity += gravity * dt;
        }

        let output = TickOutput {
            velocity: self.velocity,
            state: self.state,
            up_axis: self.up_axis,
        };
        self.clear_state();
        output
    }

    /// Resolves the tick's movement state from the accumulated contacts, in
    /// precedence order: climbing, swimming, direct ground, ground snapping,
    /// steep-contact promotion, airborne.
    fn update_state(&mut self, dt: f32, body: &AgentBody, scene: &dyn SceneQuery) {
        self.steps_since_grounded = self.steps_since_grounded.saturating_add(1);
        self.steps_since_jump = self.steps_since_jump.saturating_add(1);
        self.velocity = body.velocity;

        self.state = if self.check_climbing() {
            MovementState::Climbing
        } else if self.check_swimming() {
            MovementState::Swimming
        } else if self.check_ground() || self.snap_to_ground(body, scene) || self.check_steep_contacts()
        {
            MovementState::Grounded
        } else {
            MovementState::Airborne
        };

        if self.state != MovementState::Airborne {
            self.steps_since_grounded = 0;

            // The air-jump budget refills only after at least one airborne
            // step, so a grounded agent cannot bank extra jumps.
            if self.steps_since_jump > 1 {
                self.jump_phase = 0;
            }

            if self.classifier.buckets.ground_count > 1 {
                self.contact_normal.normalize_mut();
            }
        } else {
            self.contact_normal = self.up_axis;
        }

        self.connected_body = self.classifier.buckets.connected_body;
        if let Some(handle) = self.connected_body {
            if let Some(state) = scene.body_state(handle) {
                // Light debris should not drag the agent along.
                if state.kinematic || state.mass >= body.mass {
                    self.update_connection_state(dt, body, handle, &state);
                }
            }
        }
    }

    fn check_climbing(&mut self) -> bool {
        if !self.climbing() {
            return false;
        }
        let min_ground_dot = self.classifier.params().min_ground_dot;
        let buckets = &mut self.classifier.buckets;

        if buckets.climb_count > 1 {
            buckets.climb_normal.normalize_mut();
            let up_dot = self.up_axis.dot(&buckets.climb_normal);
            if up_dot >= min_ground_dot {
                // Opposing crevasse walls sum to a ground-like normal; the
                // last individual normal is the wall actually being held.
                buckets.climb_normal = buckets.last_climb_normal;
            }
        }
        buckets.ground_count = 1;
        self.contact_normal = buckets.climb_normal;
        true
    }

    fn check_swimming(&mut self) -> bool {
        if !self.swimming() {
            return false;
        }
        // Buoyant motion ignores whatever geometry is underneath.
        self.classifier.buckets.ground_count = 0;
        self.contact_normal = self.up_axis;
        true
    }

    fn check_ground(&mut self) -> bool {
        if self.classifier.buckets.ground_count == 0 {
            return false;
        }
        self.contact_normal = self.classifier.buckets.ground_normal;
        true
    }

    /// Keeps the agent glued to uneven terrain by treating a nearby probe hit
    /// as ground even without an active contact
    fn snap_to_ground(&mut self, body: &AgentBody, scene: &dyn SceneQuery) -> bool {
        // Snap only right after losing contact, never right after a jump.
        if self.steps_since_grounded > 1 || self.steps_since_jump <= 2 {
            return false;
        }

        let speed = self.velocity.length();
        if speed > self.config.max_snap_speed {
            return false;
        }

        let ray = Ray::new(body.position, -self.up_axis);
        let hit = match scene.cast_ray(&ray, self.config.probe_distance, self.config.probe_mask) {
            Some(hit) => hit,
            None => return false,
        };

        let up_dot = self.up_axis.dot(&hit.normal);
        if up_dot < self.classifier.params().min_dot(hit.surface) {
            return false;
        }

        self.classifier.buckets.ground_count = 1;
        self.contact_normal = hit.normal;

        // Only realign when the velocity points away from the surface;
        // a velocity already converging toward it must not be slowed down.
        let dot = self.velocity.dot(&hit.normal);
        if dot > 0.0 {
            self.velocity = (self.velocity - hit.normal * dot).normalize() * speed;
        }
        self.classifier.buckets.connected_body = hit.body;
        true
    }

    /// Promotes multiple steep contacts whose average points upward enough to
    /// stand on into a synthetic ground contact
    fn check_steep_contacts(&mut self) -> bool {
        let min_ground_dot = self.classifier.params().min_ground_dot;
        let buckets = &mut self.classifier.buckets;
        if buckets.steep_count > 1 {
            buckets.steep_normal.normalize_mut();
            let up_dot = self.up_axis.dot(&buckets.steep_normal);
            if up_dot >= min_ground_dot {
                buckets.steep_count = 0;
                buckets.ground_count = 1;
                self.contact_normal = buckets.steep_normal;
                return true;
            }
        }
        false
    }

    /// Estimates the connected body's velocity from how the cached attachment
    /// point moved, which also works for animation-driven platforms whose own
    /// velocity reads zero
    fn update_connection_state(
        &mut self,
        dt: f32,
        body: &AgentBody,
        handle: BodyHandle,
        state: &ConnectedBodyState,
    ) {
        if Some(handle) == self.previous_connected_body {
            let connection_movement = state.transform.transform_point(self.connection_local_position)
                - self.connection_world_position;
            self.connection_velocity = connection_movement / dt;
        }
        self.connection_world_position = body.position;
        self.connection_local_position = state.transform.inverse_transform_point(body.position);
    }

    /// Moves the velocity toward the player's intent on state-dependent basis
    /// axes, rate-limited by the state's acceleration
    fn adjust_velocity(&mut self, dt: f32) {
        let acceleration;
        let speed;
        let x_axis;
        let z_axis;

        if self.climbing() {
            acceleration = self.config.max_climb_acceleration;
            speed = self.config.max_climb_speed;
            x_axis = self.contact_normal.cross(&self.up_axis);
            z_axis = self.up_axis;
        } else if self.in_water() {
            let swim_factor = (self.submergence / self.config.swim_threshold).min(1.0);
            acceleration = lerp(
                if self.on_ground() {
                    self.config.max_acceleration
                } else {
                    self.config.max_air_acceleration
                },
                self.config.max_swim_acceleration,
                swim_factor,
            );
            speed = lerp(self.config.max_speed, self.config.max_swim_speed, swim_factor);
            x_axis = self.right_axis;
            z_axis = self.forward_axis;
        } else {
            acceleration = if self.on_ground() {
                self.config.max_acceleration
            } else {
                self.config.max_air_acceleration
            };
            speed = if self.on_ground() && self.intent.climb_desired() {
                self.config.max_climb_speed
            } else {
                self.config.max_speed
            };
            x_axis = self.right_axis;
            z_axis = self.forward_axis;
        }

        // Keep movement tangent to whatever surface is underfoot. Either
        // projection may degenerate to zero on a vertical normal, in which
        // case that axis simply contributes nothing.
        let x_axis = x_axis.project_direction_on_plane(&self.contact_normal);
        let z_axis = z_axis.project_direction_on_plane(&self.contact_normal);

        let relative_velocity = self.velocity - self.connection_velocity;
        let movement = self.intent.movement();

        let mut adjustment = Vector3::new(
            movement.x * speed - relative_velocity.dot(&x_axis),
            if self.swimming() {
                movement.y * speed - relative_velocity.dot(&self.up_axis)
            } else {
                0.0
            },
            movement.z * speed - relative_velocity.dot(&z_axis),
        );
        adjustment = adjustment.clamp_magnitude(acceleration * dt);

        self.velocity += x_axis * adjustment.x + z_axis * adjustment.z;
        if self.swimming() {
            self.velocity += self.up_axis * adjustment.y;
        }
    }

    /// Performs a jump if any qualifying direction exists, else refuses
    fn jump(&mut self, gravity: Vector3) {
        let jump_direction;
        if self.on_ground() {
            jump_direction = self.contact_normal;
        } else if self.on_steep() {
            jump_direction = self.classifier.buckets.steep_normal;
            // A wall jump restores the full air-jump budget.
            self.jump_phase = 0;
        } else if self.config.max_air_jumps > 0 && self.jump_phase <= self.config.max_air_jumps {
            if self.jump_phase == 0 {
                // Walking off an edge without jumping must still cost the
                // first jump of the budget.
                self.jump_phase = 1;
            }
            jump_direction = self.contact_normal;
        } else {
            return;
        }

        self.steps_since_jump = 0;
        self.jump_phase += 1;

        let mut jump_speed = (2.0 * gravity.length() * self.config.jump_height).sqrt();
        if self.in_water() {
            jump_speed += (1.0 - self.submergence / self.config.swim_threshold).max(0.0);
        }

        // Blending toward up keeps wall jumps carrying upward momentum.
        let jump_direction = (jump_direction + self.up_axis).normalize();

        let aligned_speed = self.velocity.dot(&jump_direction);
        if aligned_speed > 0.0 {
            // Repeated jumps must not stack speed without bound.
            jump_speed = (jump_speed - aligned_speed).max(0.0);
        }

        self.velocity += jump_direction * jump_speed;
    }

    /// Clears the tick's accumulators; counters persist across ticks
    fn clear_state(&mut self) {
        self.classifier.clear();
        self.previous_connected_body = self.connected_body;
        self.connected_body = None;
        self.connection_velocity = Vector3::zero();
        self.submergence = 0.0;
    }
}
