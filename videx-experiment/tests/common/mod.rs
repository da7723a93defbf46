#![allow(dead_code)]

use videx_core::TrialResult;
use videx_experiment::{MediaPlayback, TrialConfig, TrialEvent, VideoAnnotationTrial};
use videx_timing::ManualTimer;

/// Media double whose position is set by the test.
#[derive(Debug, Default)]
pub struct FakeMedia {
    pub position: f64,
    pub playing: bool,
    pub visible: bool,
    pub native_controls: bool,
}

impl MediaPlayback for FakeMedia {
    fn play(&mut self) {
        self.playing = true;
    }
    fn pause(&mut self) {
        self.playing = false;
    }
    fn current_time(&self) -> f64 {
        self.position
    }
    fn set_native_controls(&mut self, enabled: bool) {
        self.native_controls = enabled;
    }
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

pub type Trial = VideoAnnotationTrial<FakeMedia, ManualTimer, Vec<TrialResult>>;

pub fn started(config: TrialConfig) -> (Trial, ManualTimer) {
    let timer = ManualTimer::new();
    let mut trial = VideoAnnotationTrial::new(config, FakeMedia::default(), timer.clone(), Vec::new());
    trial.start();
    (trial, timer)
}

/// Moves playback to `position` and reports it, as the media element would.
pub fn play_to(trial: &mut Trial, position: f64) {
    trial.media_mut().position = position;
    trial.handle_event(TrialEvent::TimeUpdate);
}

pub fn annotate(trial: &mut Trial, words: &[&str]) -> bool {
    for w in words {
        trial.handle_event(TrialEvent::AddWord(w.to_string()));
    }
    trial.handle_event(TrialEvent::SubmitWords)
}

pub fn pump(trial: &mut Trial) {
    for event in trial.update() {
        trial.handle_event(event);
    }
}
