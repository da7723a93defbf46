use std::path::Path;

use videx_experiment::{MediaPlayback, TrialEvent};

/// Stand-in for a browser video element: a content clock that advances while
/// playing and reports position updates, end of stream and load failures.
#[derive(Debug, Clone)]
pub struct SimulatedMedia {
    position: f64,
    duration: f64,
    playing: bool,
    native_controls: bool,
    visible: bool,
    load_failed: bool,
    error_reported: bool,
    ended: bool,
}

impl SimulatedMedia {
    pub fn new(duration: f64) -> Self {
        Self {
            position: 0.0,
            duration,
            playing: false,
            native_controls: false,
            visible: false,
            load_failed: false,
            error_reported: false,
            ended: false,
        }
    }

    /// When `assets_root` is given, a video file missing beneath it fails to
    /// load.
    pub fn open(video: &str, duration: f64, assets_root: Option<&Path>) -> Self {
        let mut media = Self::new(duration);
        if let Some(root) = assets_root {
            if !root.join(video).is_file() {
                log::warn!("Video {} not found under {}", video, root.display());
                media.load_failed = true;
            }
        }
        media
    }

    /// Moves the clock `dt` seconds and returns the notifications the element
    /// would emit.
    pub fn advance(&mut self, dt: f64) -> Vec<TrialEvent> {
        if self.load_failed {
            if self.error_reported {
                return Vec::new();
            }
            self.error_reported = true;
            return vec![TrialEvent::LoadError];
        }
        if !self.playing || self.ended {
            return Vec::new();
        }

        self.position = (self.position + dt).min(self.duration);
        let mut events = vec![TrialEvent::TimeUpdate];
        if self.position >= self.duration {
            self.ended = true;
            self.playing = false;
            events.push(TrialEvent::MediaEnded);
        }
        events
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn native_controls(&self) -> bool {
        self.native_controls
    }
}

impl MediaPlayback for SimulatedMedia {
    fn play(&mut self) {
        if !self.load_failed && !self.ended {
            self.playing = true;
        }
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
