use crate::contact::SurfaceMask;
use crate::math::{to_radians, Vector3};
use crate::scene::BodyHandle;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// One raw contact reported by the collision layer for the current tick
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ContactSample {
    /// Outward-facing unit normal of the touched surface
    pub normal: Vector3,

    /// Semantic categories of the touched collider
    pub surface: SurfaceMask,

    /// The body the collider is attached to, if any
    pub body: Option<BodyHandle>,
}

/// Slope thresholds and mask configuration for contact classification.
///
/// The configured angles are converted to dot-product thresholds once, so
/// per-contact classification needs no trigonometry.
#[derive(Debug, Clone, Copy)]
pub struct ClassifierParams {
    /// Cosine of the maximum slope angle that still counts as ground
    pub min_ground_dot: f32,

    /// Cosine of the maximum slope angle for stairs-classified surfaces
    pub min_stairs_dot: f32,

    /// Cosine of the maximum climbable angle (past 90 degrees this is negative,
    /// letting the agent cling to overhangs)
    pub min_climb_dot: f32,

    /// Surfaces judged against the stairs threshold instead of the ground one
    pub stairs_mask: SurfaceMask,

    /// Surfaces the agent may grab while climbing is desired
    pub climb_mask: SurfaceMask,
}

impl ClassifierParams {
    /// Builds thresholds from slope angles in degrees
    pub fn from_angles(
        max_ground_angle: f32,
        max_stairs_angle: f32,
        max_climb_angle: f32,
        stairs_mask: SurfaceMask,
        climb_mask: SurfaceMask,
    ) -> Self {
        Self {
            min_ground_dot: to_radians(max_ground_angle).cos(),
            min_stairs_dot: to_radians(max_stairs_angle).cos(),
            min_climb_dot: to_radians(max_climb_angle).cos(),
            stairs_mask,
            climb_mask,
        }
    }

    /// Returns the ground threshold appropriate for a surface
    #[inline]
    pub fn min_dot(&self, surface: SurfaceMask) -> f32 {
        if surface.intersects(self.stairs_mask) {
            self.min_stairs_dot
        } else {
            self.min_ground_dot
        }
    }
}

/// Per-tick contact accumulators.
///
/// Counts and summed normals stand in for a contact list; the controller's
/// state resolution reads and rewrites them, and they are cleared at the end
/// of every tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactBuckets {
    /// Number of contacts classified as ground this tick
    pub ground_count: u32,

    /// Number of contacts too steep for ground but not overhanging
    pub steep_count: u32,

    /// Number of climbable contacts seen while climbing was desired
    pub climb_count: u32,

    /// Sum of ground contact normals
    pub ground_normal: Vector3,

    /// Sum of steep contact normals
    pub steep_normal: Vector3,

    /// Sum of climbable contact normals
    pub climb_normal: Vector3,

    /// The single most recent climbable normal, kept for crevasse geometry
    /// where the summed climb normals cancel out
    pub last_climb_normal: Vector3,

    /// The body the agent is considered connected to this tick
    pub connected_body: Option<BodyHandle>,
}

/// Buckets raw contact samples into ground, steep, and climb categories
/// against the current up axis.
#[derive(Debug, Clone)]
pub struct ContactClassifier {
    params: ClassifierParams,

    /// This tick's accumulated classification results
    pub buckets: ContactBuckets,
}

impl ContactClassifier {
    /// Creates a classifier with the given thresholds
    pub fn new(params: ClassifierParams) -> Self {
        Self {
            params,
            buckets: ContactBuckets::default(),
        }
    }

    /// Gets the classification thresholds
    #[inline]
    pub fn params(&self) -> &ClassifierParams {
        &self.params
    }

    /// Classifies one contact sample into the tick's buckets.
    ///
    /// Ground candidates take the connected-body slot unconditionally; steep
    /// candidates only while no ground contact has been seen. A surface can
    /// land in both the steep and the climb bucket.
    pub fn classify(&mut self, sample: &ContactSample, up_axis: Vector3, climb_desired: bool) {
        let up_dot = up_axis.dot(&sample.normal);
        let min_dot = self.params.min_dot(sample.surface);
        let buckets = &mut self.buckets;

        if up_dot >= min_dot {
            buckets.ground_count += 1;
            buckets.ground_normal += sample.normal;
            buckets.connected_body = sample.body;
        } else {
            // Not ground; -0.01 instead of 0 keeps near-vertical walls out of
            // the ceiling category despite normal jitter.
            if up_dot > -0.01 {
                buckets.steep_count += 1;
                buckets.steep_normal += sample.normal;
                if buckets.ground_count == 0 {
                    buckets.connected_body = sample.body;
                }
            }
            if climb_desired
                && up_dot >= self.params.min_climb_dot
                && sample.surface.intersects(self.params.climb_mask)
            {
                buckets.climb_count += 1;
                buckets.climb_normal += sample.normal;
                buckets.last_climb_normal = sample.normal;
                buckets.connected_body = sample.body;
            }
        }
    }

    /// Resets all accumulators for the next tick
    pub fn clear(&mut self) {
        self.buckets = ContactBuckets::default();
    }
}
