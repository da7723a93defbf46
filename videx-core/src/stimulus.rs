use serde::{Deserialize, Serialize};

/// Experimental condition a video was assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Control,
    Disrupted,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Control => "control",
            Condition::Disrupted => "disrupted",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One video in the session plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoStimulus {
    pub video_id: String,
    /// Locator handed to the media element.
    pub video: String,
    pub condition: Condition,
}

impl VideoStimulus {
    /// Final path segment of the locator, used as the disruption lookup key
    pub fn file_name(&self) -> &str {
        file_name(&self.video)
    }
}

pub fn file_name(video: &str) -> &str {
    video.rsplit('/').next().unwrap_or(video)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_takes_last_segment() {
        let stim = VideoStimulus {
            video_id: "P3".into(),
            video: "assets/video/stimuli/P3_split_early.mp4".into(),
            condition: Condition::Disrupted,
        };
        assert_eq!(stim.file_name(), "P3_split_early.mp4");
        assert_eq!(file_name("P7.mp4"), "P7.mp4");
    }

    #[test]
    fn condition_serializes_lowercase() {
        let json = serde_json::to_string(&Condition::Control).unwrap();
        assert_eq!(json, "\"control\"");
        assert_eq!(Condition::Disrupted.to_string(), "disrupted");
    }
}
