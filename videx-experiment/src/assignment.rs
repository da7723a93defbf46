use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use videx_core::stimulus::file_name;
use videx_core::{Condition, DisruptionWindow, VideoStimulus};

pub const DEFAULT_VIDEO_IDS: [&str; 10] = [
    "P3", "P7", "P8", "P9", "P10", "P12", "P13", "P14", "P16", "P18",
];

/// Shuffles the pool and splits the first `num_videos` ids into a control
/// half (rounded down) and a disrupted remainder, then shuffles the
/// combined order.
pub fn plan_session<R: Rng + ?Sized>(
    video_ids: &[String],
    num_videos: usize,
    stimuli_dir: &str,
    rng: &mut R,
) -> Vec<VideoStimulus> {
    let mut shuffled = video_ids.to_vec();
    shuffled.shuffle(rng);

    let total = num_videos.min(shuffled.len());
    let half = (num_videos / 2).min(total);
    let dir = stimuli_dir.trim_end_matches('/');

    let control = shuffled[..half].iter().map(|id| VideoStimulus {
        video_id: id.clone(),
        video: format!("{dir}/{id}.mp4"),
        condition: Condition::Control,
    });
    let disrupted = shuffled[half..total].iter().map(|id| VideoStimulus {
        video_id: id.clone(),
        video: format!("{dir}/{id}_split_early.mp4"),
        condition: Condition::Disrupted,
    });

    let mut plan: Vec<VideoStimulus> = control.chain(disrupted).collect();
    plan.shuffle(rng);
    log::debug!(
        "{} control videos, {} disrupted videos",
        half,
        total - half
    );
    plan
}

/// Start and end timecodes (`MM:SS:CC`) of a black-screen disruption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimecodeSpan {
    pub start: String,
    pub end: String,
}

/// Video file name to disruption timecodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisruptionLookup {
    entries: BTreeMap<String, TimecodeSpan>,
}

impl Default for DisruptionLookup {
    fn default() -> Self {
        let table = [
            ("P3_split_early.mp4", "00:28:43", "00:38:43"),
            ("P7_split_early.mp4", "00:28:06", "00:38:06"),
            ("P8_split_early.mp4", "00:34:74", "00:44:74"),
            ("P9_split_early.mp4", "00:40:00", "00:50:00"),
            ("P10_split_early.mp4", "00:32:66", "00:42:66"),
            ("P12_split_early.mp4", "00:40:20", "00:50:20"),
            ("P13_split_early.mp4", "00:38:06", "00:48:06"),
            ("P14_split_early.mp4", "00:35:18", "00:45:18"),
            ("P16_split_early.mp4", "00:36:56", "00:46:56"),
            ("P18_split_early.mp4", "00:35:78", "00:45:78"),
        ];
        let mut lookup = Self::empty();
        for (file, start, end) in table {
            lookup.insert(file, start, end);
        }
        lookup
    }
}

impl DisruptionLookup {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, file: &str, start: &str, end: &str) {
        self.entries.insert(
            file.to_string(),
            TimecodeSpan {
                start: start.to_string(),
                end: end.to_string(),
            },
        );
    }

    pub fn get(&self, video: &str) -> Option<&TimecodeSpan> {
        self.entries.get(file_name(video))
    }

    /// Window for a video locator, keyed on its file name. An unknown video or
    /// an unparseable timecode means no disruption.
    pub fn window_for(&self, video: &str) -> Option<DisruptionWindow> {
        let span = self.get(video)?;
        let window = DisruptionWindow::from_time_codes(&span.start, &span.end);
        if window.is_none() {
            log::warn!(
                "Ignoring malformed disruption timecodes for {}: {} / {}",
                video,
                span.start,
                span.end
            );
        }
        window
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
