//! The boundary to the external physics/collision layer.
//!
//! The locomotion core never owns bodies or geometry; it receives contact
//! samples, issues probe queries through [`SceneQuery`], and hands a
//! requested velocity back to whatever integrates motion.

use crate::contact::SurfaceMask;
use crate::math::{Ray, Transform, Vector3};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// A weak identifier for a body owned by the external simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct BodyHandle(pub u32);

/// Result of a ray-cast query against the collision layer
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// Distance from the ray origin to the hit point
    pub distance: f32,

    /// Outward-facing unit normal at the hit point
    pub normal: Vector3,

    /// Semantic categories of the hit collider
    pub surface: SurfaceMask,

    /// The body the hit collider is attached to, if any
    pub body: Option<BodyHandle>,
}

/// Snapshot of an external body the agent may be connected to
#[derive(Debug, Clone, Copy)]
pub struct ConnectedBodyState {
    /// Mass of the body
    pub mass: f32,

    /// True for bodies driven by animation or script rather than forces
    pub kinematic: bool,

    /// Current world pose of the body
    pub transform: Transform,
}

/// Per-tick snapshot of the agent's own body, owned by the external simulation
#[derive(Debug, Clone, Copy)]
pub struct AgentBody {
    /// World position of the agent
    pub position: Vector3,

    /// Current linear velocity of the agent
    pub velocity: Vector3,

    /// Mass of the agent, compared against connected bodies
    pub mass: f32,
}

/// Query interface the external collision layer must provide
pub trait SceneQuery {
    /// Casts a ray against colliders matching `mask`, returning the closest
    /// hit within `max_distance`
    fn cast_ray(&self, ray: &Ray, max_distance: f32, mask: SurfaceMask) -> Option<RayHit>;

    /// Returns true if any collider matching `mask` overlaps the sphere
    fn check_sphere(&self, center: Vector3, radius: f32, mask: SurfaceMask) -> bool;

    /// Looks up the current state of a body, or `None` if it no longer exists
    fn body_state(&self, body: BodyHandle) -> Option<ConnectedBodyState>;
}
