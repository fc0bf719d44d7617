mod floating;

pub use self::floating::{FloatingBody, FloatingBodyConfig, StableFloatingBody};
