use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use videx_core::{TrialResult, VideoStimulus};
use videx_experiment::{
    plan_session, FinalImpression, MediaPlayback, SessionConfig, SessionLog, TrialEvent,
    TrialView, VideoAnnotationTrial,
};
use videx_timing::{HighPrecisionTimer, ManualTimer, Timer};

use crate::media::SimulatedMedia;
use crate::participant::{Participant, ParticipantScript, RandomParticipant};
use crate::upload;

/// Rounds of paused input without a successful submission before the
/// participant counts as stalled.
const MAX_IDLE_ROUNDS: usize = 3;

/// Runs one session: plans the videos, hosts each trial against simulated
/// playback and flushes the collected data once at the end.
pub struct App {
    config: SessionConfig,
    script: Option<ParticipantScript>,
    rng: StdRng,
    log: SessionLog,
}

impl App {
    pub fn new(config: SessionConfig, script: Option<ParticipantScript>) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let session_id = uuid::Uuid::new_v4().simple().to_string();
        Ok(Self {
            config,
            script,
            rng,
            log: SessionLog::new(session_id),
        })
    }

    pub fn run(mut self) -> Result<SessionLog> {
        let plan = plan_session(
            &self.config.video_ids,
            self.config.num_of_videos,
            &self.config.stimuli_dir,
            &mut self.rng,
        );
        info!(
            "Session {} planned with {} videos",
            self.log.session_id,
            plan.len()
        );

        for (index, stimulus) in plan.iter().enumerate() {
            info!(
                "Trial {}/{}: {} ({})",
                index + 1,
                plan.len(),
                stimulus.video_id,
                stimulus.condition
            );
            let mut participant = self.participant_for(index);
            let result = if self.config.realtime {
                self.run_trial(stimulus, participant.as_mut(), HighPrecisionTimer::new())?
            } else {
                self.run_trial(stimulus, participant.as_mut(), ManualTimer::new())?
            };

            let final_words = (!result.load_failed)
                .then(|| participant.final_impression(&result.descriptors));
            self.log.record(stimulus, result);
            if let Some(words) = final_words {
                self.record_final_impression(words);
            }
        }

        self.flush();
        if let Some(url) = self.log.completion_url() {
            info!("Participant handed off to {url}");
        }
        Ok(self.log)
    }

    fn participant_for(&mut self, index: usize) -> Box<dyn Participant> {
        if let Some(scripted) = self.script.as_ref().and_then(|s| s.for_trial(index)) {
            return Box::new(scripted);
        }
        let seed: u64 = self.rng.random();
        Box::new(RandomParticipant::new(StdRng::seed_from_u64(seed)))
    }

    /// Drives one trial to completion: feeds media notifications and
    /// participant actions in, and pumps the trial's deadlines every frame.
    fn run_trial<T: Timer>(
        &self,
        stimulus: &VideoStimulus,
        participant: &mut dyn Participant,
        timer: T,
    ) -> Result<TrialResult> {
        let config = self.config.trial_config(stimulus);
        config.validate()?;
        let media = SimulatedMedia::open(
            &stimulus.video,
            self.config.video_duration_s,
            self.config.assets_root.as_deref(),
        );
        let frame = Duration::from_millis(self.config.frame_ms);
        let dt = frame.as_secs_f64();

        let mut results: Vec<TrialResult> = Vec::new();
        {
            let mut trial = VideoAnnotationTrial::new(config, media, timer.clone(), &mut results);
            trial.start();
            let mut idle_rounds = 0;

            while !trial.is_finished() {
                for event in trial.media_mut().advance(dt) {
                    trial.handle_event(event);
                }

                if trial.phase().allows_input() {
                    let view = TrialView::project(&trial);
                    let position = trial.media().position();
                    for event in participant.annotate(&view, position) {
                        trial.handle_event(event);
                    }
                    if trial.phase().allows_input() {
                        idle_rounds += 1;
                        if idle_rounds >= MAX_IDLE_ROUNDS {
                            bail!(
                                "participant stalled at {:.2}s of {}",
                                position,
                                stimulus.video
                            );
                        }
                    } else {
                        idle_rounds = 0;
                    }
                } else if trial.phase().is_playing()
                    && trial.media().is_visible()
                    && participant.wants_pause(trial.media().position())
                {
                    let event = if trial.media().native_controls() {
                        trial.media_mut().pause();
                        TrialEvent::NativePaused
                    } else {
                        TrialEvent::PauseRequested
                    };
                    if !trial.handle_event(event) {
                        debug!("Pause refused at {:.2}s", trial.media().position());
                    }
                }

                timer.sleep(frame);
                for event in trial.update() {
                    trial.handle_event(event);
                }
            }
        }

        results
            .pop()
            .ok_or_else(|| anyhow!("trial for {} ended without a result", stimulus.video))
    }

    fn record_final_impression(&mut self, words: Vec<String>) {
        let mut list = FinalImpression::default();
        for word in &words {
            if let Err(e) = list.add(word) {
                debug!("Final impression word rejected: {e}");
            }
        }
        match list.submit() {
            Ok(words) => {
                self.log.attach_final_descriptors(words);
            }
            Err(e) => warn!("Final impression not recorded: {e}"),
        }
    }

    /// One-shot write of the whole session. Failures are logged, never fatal.
    /// A successful upload hands the participant off to the completion URL.
    fn flush(&mut self) {
        let payload = match self.log.upload_payload() {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Could not serialize session data: {e}");
                return;
            }
        };

        if self.config.debug_save {
            if let Err(e) = upload::save_local(&self.config.output_path, &payload.filedata) {
                warn!("Session data not saved: {e}");
            }
            return;
        }

        match upload::save_data(&self.config.endpoint, &payload) {
            Ok(()) => self.log.complete_with(self.config.completion_url.clone()),
            Err(e) => warn!("Session data not uploaded: {e}"),
        }
    }
}
