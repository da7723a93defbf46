pub mod assignment;
pub mod config;
pub mod final_impression;
pub mod media;
pub mod session;
pub mod state;
pub mod terms;
pub mod trial;
pub mod view;

pub use assignment::{plan_session, DisruptionLookup, TimecodeSpan, DEFAULT_VIDEO_IDS};
pub use config::{NoticeText, SessionConfig, TrialConfig};
pub use final_impression::FinalImpression;
pub use media::{MediaPlayback, TrialHost};
pub use session::{SessionLog, TrialRecord, UploadPayload};
pub use state::{Notice, TrialEvent, VideoAnnotationTrial};
pub use terms::{AnnotationRejection, PendingTerms};
pub use trial::AnnotationLog;
pub use view::{NoticeView, PendingItem, TrialView};
