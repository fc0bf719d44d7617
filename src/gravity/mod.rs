mod source;
mod field;

pub use self::source::{GravitySource, RadialWell};
pub use self::field::{GravityField, SourceId};
