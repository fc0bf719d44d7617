pub mod math;
pub mod gravity;
pub mod contact;
pub mod controller;
pub mod body;
pub mod scene;

/// Re-export common types for easier usage
pub use crate::contact::{ContactSample, SurfaceMask};
pub use crate::controller::{ControllerConfig, LocomotionController, MovementState, TickOutput};
pub use crate::gravity::{GravityField, GravitySource, SourceId};
pub use crate::math::Vector3;
pub use crate::scene::{AgentBody, BodyHandle, RayHit, SceneQuery};

/// Error types for the locomotion engine
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum LocomotionError {
        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),
    }
}

/// Result type for locomotion engine operations
pub type Result<T> = std::result::Result<T, error::LocomotionError>;

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
