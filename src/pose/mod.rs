pub mod decoder;
#[cfg(feature = "desktop")]
pub mod detector;
pub mod joints;
#[cfg(feature = "desktop")]
pub mod preprocess;
pub mod skeleton;

pub use decoder::{decode_segments, Segment, MIN_CONFIDENCE, OUTPUT_LEN};
#[cfg(feature = "desktop")]
pub use detector::PoseDetector;
pub use joints::JointIndex;
#[cfg(feature = "desktop")]
pub use preprocess::preprocess_frame;
pub use skeleton::BONES;
