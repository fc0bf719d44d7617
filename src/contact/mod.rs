mod surface;
mod classifier;

pub use self::surface::SurfaceMask;
pub use self::classifier::{ClassifierParams, ContactBuckets, ContactClassifier, ContactSample};
