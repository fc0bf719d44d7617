use bitflags::bitflags;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// A bit mask of the semantic surface categories a collider belongs to
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
    #[cfg_attr(feature = "serialize", serde(transparent))]
    pub struct SurfaceMask: u32 {
        /// Generic walkable geometry
        const GROUND    = 0x00000001;

        /// Stair-like geometry, judged against the laxer stairs slope angle
        const STAIRS    = 0x00000002;

        /// Surfaces the agent may grab while climbing is desired
        const CLIMBABLE = 0x00000004;

        /// Water trigger volumes
        const WATER     = 0x00000008;

        /// All categories
        const ALL       = 0xFFFFFFFF;
    }
}
