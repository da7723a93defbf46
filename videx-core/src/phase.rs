use serde::{Deserialize, Serialize};

/// Phases of a paused-annotation video trial
#[derive(Copy, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialPhase {
    /// Playback stopped, annotation input open.
    Paused,
    Playing,
    /// Playing inside the disruption window; pause requests are inert.
    Disrupted,
    /// Media failed to load; waiting out the grace delay before finishing.
    Faulted,
    Ended,
}

impl Default for TrialPhase {
    fn default() -> Self {
        TrialPhase::Paused
    }
}

impl TrialPhase {
    pub fn allows_input(&self) -> bool {
        matches!(self, Self::Paused)
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing | Self::Disrupted)
    }

    pub fn is_disrupted(&self) -> bool {
        matches!(self, Self::Disrupted)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended)
    }

    /// Whether the media element is shown to the participant
    pub fn shows_media(&self) -> bool {
        !matches!(self, Self::Faulted)
    }
}
