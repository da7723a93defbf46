use videx_core::TrialResult;

/// Controllable media source driven by the trial.
///
/// Notifications (position update, end of stream, load error) travel the other
/// way: the host forwards them to the trial as `TrialEvent`s.
pub trait MediaPlayback {
    fn play(&mut self);
    fn pause(&mut self);
    /// Playback position in seconds of content.
    fn current_time(&self) -> f64;
    /// Native controls and the context menu are only available when enabled.
    fn set_native_controls(&mut self, enabled: bool);
    fn set_visible(&mut self, visible: bool);
}

impl<M: MediaPlayback + ?Sized> MediaPlayback for &mut M {
    fn play(&mut self) {
        (**self).play()
    }
    fn pause(&mut self) {
        (**self).pause()
    }
    fn current_time(&self) -> f64 {
        (**self).current_time()
    }
    fn set_native_controls(&mut self, enabled: bool) {
        (**self).set_native_controls(enabled)
    }
    fn set_visible(&mut self, visible: bool) {
        (**self).set_visible(visible)
    }
}

/// Receives the trial result when the trial completes
pub trait TrialHost {
    fn finish_trial(&mut self, result: TrialResult);
}

impl<H: TrialHost + ?Sized> TrialHost for &mut H {
    fn finish_trial(&mut self, result: TrialResult) {
        (**self).finish_trial(result)
    }
}

impl TrialHost for Vec<TrialResult> {
    fn finish_trial(&mut self, result: TrialResult) {
        self.push(result);
    }
}
