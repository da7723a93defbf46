use serde::{Deserialize, Serialize};
use videx_core::{AnnotationEntry, Condition, TrialResult, VideoStimulus, VidexError};

/// One finished video trial with its assignment metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub trial_index: usize,
    pub video_id: String,
    pub condition: Condition,
    pub video: String,
    pub load_failed: bool,
    pub descriptors: Vec<AnnotationEntry>,
    pub final_descriptors: Vec<String>,
}

/// Body sent to the data endpoint
#[derive(Debug, Clone, Serialize)]
pub struct UploadPayload {
    pub id: String,
    pub filedata: String,
}

const CSV_COLUMNS: [&str; 9] = [
    "session_id",
    "trial_index",
    "video_id",
    "condition",
    "video",
    "load_failed",
    "descriptor_count",
    "descriptors",
    "final_descriptors",
];

/// All trial results of one session, flushed once at the end
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    pub session_id: String,
    records: Vec<TrialRecord>,
    completion_url: Option<String>,
}

impl SessionLog {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            records: Vec::new(),
            completion_url: None,
        }
    }

    pub fn record(&mut self, stimulus: &VideoStimulus, result: TrialResult) {
        if result.video != stimulus.video {
            log::warn!(
                "Result for {} recorded against planned video {}",
                result.video,
                stimulus.video
            );
        }
        let record = TrialRecord {
            trial_index: self.records.len(),
            video_id: stimulus.video_id.clone(),
            condition: stimulus.condition,
            video: result.video,
            load_failed: result.load_failed,
            descriptors: result.descriptors,
            final_descriptors: Vec::new(),
        };
        self.records.push(record);
    }

    /// Attaches the closing word list to the most recent trial.
    pub fn attach_final_descriptors(&mut self, words: Vec<String>) -> bool {
        match self.records.last_mut() {
            Some(record) => {
                record.final_descriptors = words;
                true
            }
            None => false,
        }
    }

    /// Records where the participant was sent once the data was delivered.
    pub fn complete_with(&mut self, url: impl Into<String>) {
        self.completion_url = Some(url.into());
    }

    pub fn completion_url(&self) -> Option<&str> {
        self.completion_url.as_deref()
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Flat rows, one per trial; list columns are JSON-encoded.
    pub fn to_csv(&self) -> Result<String, VidexError> {
        let mut out = String::new();
        out.push_str(&CSV_COLUMNS.join(","));
        out.push('\n');

        for r in &self.records {
            let fields = [
                self.session_id.clone(),
                r.trial_index.to_string(),
                r.video_id.clone(),
                r.condition.to_string(),
                r.video.clone(),
                r.load_failed.to_string(),
                r.descriptors.len().to_string(),
                serde_json::to_string(&r.descriptors)?,
                serde_json::to_string(&r.final_descriptors)?,
            ];
            let row: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
            out.push_str(&row.join(","));
            out.push('\n');
        }
        Ok(out)
    }

    pub fn upload_payload(&self) -> Result<UploadPayload, VidexError> {
        Ok(UploadPayload {
            id: format!("data-{}", self.session_id),
            filedata: self.to_csv()?,
        })
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
