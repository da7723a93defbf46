pub mod error;
pub mod phase;
pub mod stimulus;
pub mod timecode;
pub mod trial;

pub use error::VidexError;
pub use phase::TrialPhase;
pub use stimulus::{Condition, VideoStimulus};
pub use timecode::{parse_time_code, DisruptionWindow};
pub use trial::{AnnotationEntry, TrialResult};
