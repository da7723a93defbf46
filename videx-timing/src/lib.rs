pub mod deferred;
pub mod timer;

pub use deferred::Deferred;
pub use timer::{HighPrecisionTimer, ManualTimer, Timer};
