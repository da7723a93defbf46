use std::time::Duration;

use log::{debug, info, warn};
use videx_core::{AnnotationEntry, TrialPhase, TrialResult};
use videx_timing::{Deferred, Timer};

use crate::config::TrialConfig;
use crate::media::{MediaPlayback, TrialHost};
use crate::terms::{AnnotationRejection, PendingTerms};
use crate::trial::AnnotationLog;

/// Inputs to the trial: participant actions, media notifications and
/// expired deadlines reported by `update`.
#[derive(Debug, Clone, PartialEq)]
pub enum TrialEvent {
    /// Click on the video surface.
    PauseRequested,
    /// The participant paused through the native controls.
    NativePaused,
    /// The participant tried to resume playback.
    PlayRequested,
    AddWord(String),
    RemoveWord(String),
    SubmitWords,
    TimeUpdate,
    MediaEnded,
    LoadError,
    NoticeExpired,
    GraceElapsed,
}

/// Which notice the trial header shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Playing,
    Paused,
    TooEarly,
    VideoError,
}

impl Notice {
    pub fn is_warning(&self) -> bool {
        !matches!(self, Notice::Playing)
    }
}

pub struct VideoAnnotationTrial<M, T, H>
where
    M: MediaPlayback,
    T: Timer,
    H: TrialHost,
{
    pub config: TrialConfig,
    media: M,
    timer: T,
    host: H,
    phase: TrialPhase,
    pending: PendingTerms,
    log: AnnotationLog,
    /// Playback position of the most recent successful resume.
    last_pause_mark: f64,
    notice: Notice,
    cannot_add_visible: bool,
    notice_clear: Deferred<Notice, T::Timestamp>,
    grace: Deferred<(), T::Timestamp>,
    started: bool,
}

impl<M, T, H> VideoAnnotationTrial<M, T, H>
where
    M: MediaPlayback,
    T: Timer,
    H: TrialHost,
{
    pub fn new(config: TrialConfig, media: M, timer: T, host: H) -> Self {
        let last_pause_mark = -config.min_pause_interval_s;
        Self {
            config,
            media,
            timer,
            host,
            phase: TrialPhase::Paused,
            pending: PendingTerms::new(),
            log: AnnotationLog::new(),
            last_pause_mark,
            notice: Notice::Paused,
            cannot_add_visible: false,
            notice_clear: Deferred::new(),
            grace: Deferred::new(),
            started: false,
        }
    }

    /// Cues the media. Playback only begins here when `autoplay` is set;
    /// otherwise the participant starts it by submitting a first word list.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.media.set_native_controls(self.config.show_native_controls);
        self.media.set_visible(true);
        info!(
            "Trial started for {} (native controls: {}, disruption: {:?})",
            self.config.video, self.config.show_native_controls, self.config.disruption
        );

        if self.config.autoplay {
            self.resume(false);
        }
    }

    /// Applies one event. Returns true when the event changed the trial.
    pub fn handle_event(&mut self, event: TrialEvent) -> bool {
        if !self.started {
            warn!("Trial for {} received {:?} before start", self.config.video, event);
            return false;
        }
        if self.phase.is_terminal() {
            debug!("Ignoring {:?} after trial end", event);
            return false;
        }

        match (self.phase, event) {
            (TrialPhase::Faulted, TrialEvent::GraceElapsed) => {
                self.finish(true);
                true
            }
            (TrialPhase::Faulted, _) => false,

            (_, TrialEvent::LoadError) => {
                self.fault();
                true
            }
            (_, TrialEvent::MediaEnded) => {
                self.finish(false);
                true
            }
            (_, TrialEvent::NoticeExpired) => self.expire_notice(),

            (TrialPhase::Paused, TrialEvent::AddWord(word)) => self.add_word(&word).is_ok(),
            (TrialPhase::Paused, TrialEvent::RemoveWord(word)) => self.remove_word(&word),
            (TrialPhase::Paused, TrialEvent::SubmitWords) => self.submit_words(),
            (TrialPhase::Paused, TrialEvent::PlayRequested) => self.request_play(),

            (phase, TrialEvent::TimeUpdate) if phase.is_playing() => {
                let position = self.media.current_time();
                self.update_disruption(position)
            }
            (phase, TrialEvent::PauseRequested) if phase.is_playing() => self.request_pause(),
            (phase, TrialEvent::NativePaused) if phase.is_playing() => self.native_pause(),

            _ => false,
        }
    }

    /// Polls the notice and grace deadlines, returning the events the host
    /// should feed back into `handle_event`.
    pub fn update(&mut self) -> Vec<TrialEvent> {
        let mut events = Vec::new();
        if self.notice_clear.poll(&self.timer).is_some() {
            events.push(TrialEvent::NoticeExpired);
        }
        if self.grace.poll(&self.timer).is_some() {
            events.push(TrialEvent::GraceElapsed);
        }
        events
    }

    pub fn add_word(&mut self, word: &str) -> Result<(), AnnotationRejection> {
        if !self.started || !self.phase.allows_input() {
            return Err(AnnotationRejection::InputDisabled);
        }
        match self.pending.add(word) {
            Ok(added) => {
                debug!("Pending word '{}' added", added);
                self.cannot_add_visible = false;
                Ok(())
            }
            Err(AnnotationRejection::Duplicate(word)) => {
                debug!("Rejected duplicate pending word '{}'", word);
                self.cannot_add_visible = true;
                Err(AnnotationRejection::Duplicate(word))
            }
            Err(e) => Err(e),
        }
    }

    pub fn remove_word(&mut self, word: &str) -> bool {
        if !self.phase.allows_input() {
            return false;
        }
        self.pending.remove(word)
    }

    /// Commits the pending words at the current position and resumes
    /// playback. Does nothing while no word is pending.
    pub fn submit_words(&mut self) -> bool {
        if !self.started || !self.phase.allows_input() || self.pending.is_empty() {
            return false;
        }
        self.commit_pending();
        self.resume(true);
        true
    }

    fn commit_pending(&mut self) {
        let position = self.media.current_time();
        let words = self.pending.drain();
        let added = self.log.commit(words, position);
        if added > 0 {
            info!(
                "Committed {} descriptor(s) at {:.2}s (batch {})",
                added,
                position,
                self.log.batches()
            );
        }
        self.cannot_add_visible = false;
    }

    fn request_play(&mut self) -> bool {
        if !self.config.show_native_controls {
            debug!("Resume refused: the word list has to be submitted first");
            self.set_notice(Notice::Paused);
            return false;
        }
        self.commit_pending();
        self.resume(true);
        true
    }

    fn request_pause(&mut self) -> bool {
        if self.config.show_native_controls {
            debug!("Click ignored, native controls drive playback");
            return false;
        }
        self.try_pause(false)
    }

    fn native_pause(&mut self) -> bool {
        if !self.config.show_native_controls {
            debug!("Native pause reported while native controls are disabled");
            return false;
        }
        self.try_pause(true)
    }

    /// Shared pause path. A refused native pause is undone by restarting
    /// playback without any notice.
    fn try_pause(&mut self, native: bool) -> bool {
        let position = self.media.current_time();
        self.update_disruption(position);

        if self.phase.is_disrupted() {
            debug!("Pause at {:.2}s suppressed during disruption", position);
            if native {
                self.media.play();
            }
            return false;
        }

        let since_resume = position - self.last_pause_mark;
        if !position.is_finite() || since_resume <= self.config.min_pause_interval_s {
            debug!(
                "Pause at {:.2}s too early ({:.2}s since last resume)",
                position, since_resume
            );
            if native {
                self.media.play();
            } else {
                self.show_too_early();
            }
            return false;
        }

        if !native {
            self.media.pause();
        }
        self.phase = TrialPhase::Paused;
        self.set_notice(Notice::Paused);
        info!("Paused at {:.2}s", position);
        true
    }

    fn resume(&mut self, mark: bool) {
        let position = self.media.current_time();
        if mark {
            self.last_pause_mark = position;
        }
        self.phase = if self.in_window(position) {
            TrialPhase::Disrupted
        } else {
            TrialPhase::Playing
        };
        self.set_notice(Notice::Playing);
        self.media.play();
        debug!("Playback resumed at {:.2}s ({:?})", position, self.phase);
    }

    /// Re-evaluates window membership at `position`. Idempotent, so it is safe
    /// at any notification cadence.
    fn update_disruption(&mut self, position: f64) -> bool {
        if self.config.disruption.is_none() || !self.phase.is_playing() {
            return false;
        }
        let next = if self.in_window(position) {
            TrialPhase::Disrupted
        } else {
            TrialPhase::Playing
        };
        if next == self.phase {
            return false;
        }
        if next.is_disrupted() {
            info!("Disruption started at {:.2}s", position);
        } else {
            info!("Disruption ended at {:.2}s", position);
        }
        self.phase = next;
        true
    }

    fn in_window(&self, position: f64) -> bool {
        self.config
            .disruption
            .is_some_and(|window| window.contains(position))
    }

    fn show_too_early(&mut self) {
        self.notice = Notice::TooEarly;
        let delay = Duration::from_millis(self.config.too_early_notice_ms);
        self.notice_clear
            .schedule(&self.timer, delay, Notice::TooEarly);
    }

    fn set_notice(&mut self, notice: Notice) {
        self.notice_clear.cancel();
        self.notice = notice;
    }

    fn expire_notice(&mut self) -> bool {
        if self.notice != Notice::TooEarly {
            return false;
        }
        self.notice = self.phase_notice();
        true
    }

    fn phase_notice(&self) -> Notice {
        match self.phase {
            TrialPhase::Paused => Notice::Paused,
            TrialPhase::Faulted => Notice::VideoError,
            TrialPhase::Playing | TrialPhase::Disrupted | TrialPhase::Ended => Notice::Playing,
        }
    }

    fn fault(&mut self) {
        warn!(
            "Could not load video {}, finishing after {} ms",
            self.config.video, self.config.load_error_grace_ms
        );
        self.phase = TrialPhase::Faulted;
        self.media.pause();
        self.media.set_visible(false);
        self.pending.clear();
        self.cannot_add_visible = false;
        self.set_notice(Notice::VideoError);
        let grace = Duration::from_millis(self.config.load_error_grace_ms);
        self.grace.schedule(&self.timer, grace, ());
    }

    /// Hands the result to the host. Only reachable once: `Ended` has no
    /// outgoing transitions.
    fn finish(&mut self, load_failed: bool) {
        if self.phase.is_terminal() {
            return;
        }
        self.phase = TrialPhase::Ended;
        self.notice_clear.cancel();
        self.grace.cancel();
        if !self.pending.is_empty() {
            debug!("Discarding {} uncommitted word(s)", self.pending.len());
            self.pending.clear();
        }

        let result = TrialResult {
            video: self.config.video.clone(),
            descriptors: self.log.take(),
            load_failed,
        };
        info!(
            "Trial for {} finished with {} descriptor(s){}",
            result.video,
            result.descriptors.len(),
            if load_failed { " after a load error" } else { "" }
        );
        self.host.finish_trial(result);
    }

    pub fn phase(&self) -> TrialPhase {
        self.phase
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn is_disrupted(&self) -> bool {
        self.phase.is_disrupted()
    }

    pub fn pending(&self) -> &PendingTerms {
        &self.pending
    }

    pub fn descriptors(&self) -> &[AnnotationEntry] {
        self.log.entries()
    }

    pub fn last_pause_mark(&self) -> f64 {
        self.last_pause_mark
    }

    pub fn notice(&self) -> Notice {
        self.notice
    }

    pub fn notice_text(&self) -> &str {
        let text = &self.config.text;
        match self.notice {
            Notice::Playing => &text.default_notice,
            Notice::Paused => &text.paused,
            Notice::TooEarly => &text.too_early,
            Notice::VideoError => &text.video_error,
        }
    }

    pub fn cannot_add_visible(&self) -> bool {
        self.cannot_add_visible
    }

    pub fn can_submit(&self) -> bool {
        self.phase.allows_input() && !self.pending.is_empty()
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}
