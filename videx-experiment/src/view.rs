//! Pure projection of trial state into what a display surface shows.

use videx_core::TrialPhase;
use videx_timing::Timer;

use crate::media::{MediaPlayback, TrialHost};
use crate::state::{TrialEvent, VideoAnnotationTrial};

#[derive(Debug, Clone, PartialEq)]
pub struct NoticeView {
    pub text: String,
    pub warn: bool,
}

/// One removable entry in the pending word list
#[derive(Debug, Clone, PartialEq)]
pub struct PendingItem {
    pub word: String,
    pub on_remove: TrialEvent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrialView {
    pub phase: TrialPhase,
    pub notice: NoticeView,
    pub media_visible: bool,
    pub input_enabled: bool,
    pub submit_enabled: bool,
    pub instructions: Option<String>,
    pub cannot_add: Option<String>,
    pub pending: Vec<PendingItem>,
}

impl TrialView {
    pub fn project<M, T, H>(trial: &VideoAnnotationTrial<M, T, H>) -> Self
    where
        M: MediaPlayback,
        T: Timer,
        H: TrialHost,
    {
        let phase = trial.phase();
        let input_enabled = phase.allows_input();
        let text = &trial.config.text;

        Self {
            phase,
            notice: NoticeView {
                text: trial.notice_text().to_string(),
                warn: trial.notice().is_warning(),
            },
            media_visible: phase.shows_media(),
            input_enabled,
            submit_enabled: trial.can_submit(),
            instructions: input_enabled.then(|| text.instruction.clone()),
            cannot_add: (input_enabled && trial.cannot_add_visible())
                .then(|| text.cannot_add.clone()),
            pending: trial
                .pending()
                .iter()
                .map(|word| PendingItem {
                    word: word.to_string(),
                    on_remove: TrialEvent::RemoveWord(word.to_string()),
                })
                .collect(),
        }
    }
}
