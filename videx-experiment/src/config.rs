use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use videx_core::{DisruptionWindow, VidexError, VideoStimulus};

use crate::assignment::{DisruptionLookup, DEFAULT_VIDEO_IDS};

/// Participant-facing strings shown by the trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeText {
    pub instruction: String,
    pub default_notice: String,
    pub too_early: String,
    pub paused: String,
    pub cannot_add: String,
    pub video_error: String,
}

impl Default for NoticeText {
    fn default() -> Self {
        Self {
            instruction: "Enter one word at a time, using as many words as would be helpful."
                .into(),
            default_notice: "Click anywhere on the video to pause and make an entry.".into(),
            too_early: "Please wait slightly longer before pausing again.".into(),
            paused: "You cannot unpause until you submit your list of words.".into(),
            cannot_add: "You cannot add a word already in the list.".into(),
            video_error: "Error: Could not load video. Please inform the experimenter.".into(),
        }
    }
}

/// Per-trial configuration, read-only once the trial is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrialConfig {
    pub video: String,
    pub show_native_controls: bool,
    pub disruption: Option<DisruptionWindow>,
    pub min_pause_interval_s: f64,
    /// Start playback as soon as the trial starts instead of waiting for a
    /// first word list.
    pub autoplay: bool,
    pub too_early_notice_ms: u64,
    pub load_error_grace_ms: u64,
    pub text: NoticeText,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            video: String::new(),
            show_native_controls: false,
            disruption: None,
            min_pause_interval_s: 2.0,
            autoplay: false,
            too_early_notice_ms: 1500,
            load_error_grace_ms: 3000,
            text: NoticeText::default(),
        }
    }
}

impl TrialConfig {
    pub fn for_video(video: impl Into<String>) -> Self {
        Self {
            video: video.into(),
            ..Self::default()
        }
    }

    pub fn with_disruption(mut self, window: Option<DisruptionWindow>) -> Self {
        self.disruption = window;
        self
    }

    /// Either bound missing means the video runs undisrupted.
    pub fn with_disruption_bounds(self, start: Option<f64>, end: Option<f64>) -> Self {
        self.with_disruption(DisruptionWindow::from_bounds(start, end))
    }

    pub fn with_native_controls(mut self, enabled: bool) -> Self {
        self.show_native_controls = enabled;
        self
    }

    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    pub fn validate(&self) -> Result<(), VidexError> {
        if self.video.trim().is_empty() {
            return Err(VidexError::InvalidConfig("trial has no video".into()));
        }
        if !self.min_pause_interval_s.is_finite() || self.min_pause_interval_s < 0.0 {
            return Err(VidexError::InvalidConfig(format!(
                "min_pause_interval_s must be a non-negative number, got {}",
                self.min_pause_interval_s
            )));
        }
        Ok(())
    }
}

/// Session-wide settings for the runner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Videos shown per session, split between conditions.
    pub num_of_videos: usize,
    pub video_ids: Vec<String>,
    pub stimuli_dir: String,
    pub disruptions: DisruptionLookup,
    pub show_native_controls: bool,
    pub autoplay: bool,
    pub debug_logs: bool,
    /// Write the session CSV locally instead of uploading it.
    pub debug_save: bool,
    pub endpoint: String,
    /// Where the participant is sent after a successful upload.
    pub completion_url: String,
    pub output_path: PathBuf,
    /// When set, a video missing under this directory fails to load.
    pub assets_root: Option<PathBuf>,
    pub video_duration_s: f64,
    pub frame_ms: u64,
    /// Pace the simulated session in wall-clock time.
    pub realtime: bool,
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            num_of_videos: 10,
            video_ids: DEFAULT_VIDEO_IDS.iter().map(|s| s.to_string()).collect(),
            stimuli_dir: "assets/video/stimuli".into(),
            disruptions: DisruptionLookup::default(),
            show_native_controls: false,
            autoplay: false,
            debug_logs: false,
            debug_save: false,
            endpoint: "http://localhost:8000/php/write_data.php".into(),
            completion_url: "https://app.prolific.com/submissions/complete?cc=C1HROM6I".into(),
            output_path: PathBuf::from("data.csv"),
            assets_root: None,
            video_duration_s: 60.0,
            frame_ms: 250,
            realtime: false,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VidexError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), VidexError> {
        if self.num_of_videos == 0 {
            return Err(VidexError::InvalidConfig("num_of_videos must be at least 1".into()));
        }
        if self.frame_ms == 0 {
            return Err(VidexError::InvalidConfig("frame_ms must be at least 1".into()));
        }
        if !(self.video_duration_s > 0.0) {
            return Err(VidexError::InvalidConfig(
                "video_duration_s must be positive".into(),
            ));
        }
        if self.num_of_videos > self.video_ids.len() {
            log::warn!(
                "num_of_videos ({}) exceeds the video pool ({}); using the whole pool",
                self.num_of_videos,
                self.video_ids.len()
            );
        }
        Ok(())
    }

    /// Builds the trial configuration for one planned video, resolving its
    /// disruption window from the lookup table.
    pub fn trial_config(&self, stimulus: &VideoStimulus) -> TrialConfig {
        let window = self.disruptions.window_for(&stimulus.video);
        if let Some(w) = window {
            log::debug!(
                "Disruption added for {}: {:.2} to {:.2}",
                stimulus.video,
                w.start,
                w.end
            );
        }
        TrialConfig::for_video(stimulus.video.clone())
            .with_disruption(window)
            .with_native_controls(self.show_native_controls)
            .with_autoplay(self.autoplay)
    }
}
