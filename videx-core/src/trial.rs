use serde::{Deserialize, Serialize};

/// One committed word bound to the playback position it was submitted at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationEntry {
    pub word: String,
    /// Playback position in seconds.
    pub timestamp: f64,
}

/// Recorded result per trial, handed to the host exactly once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    pub video: String,
    pub descriptors: Vec<AnnotationEntry>,
    #[serde(default)]
    pub load_failed: bool,
}

impl TrialResult {
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(|d| d.word.as_str())
    }
}
