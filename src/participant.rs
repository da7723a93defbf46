use std::collections::VecDeque;
use std::path::Path;

use anyhow::{Context, Result};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Deserialize;
use videx_core::AnnotationEntry;
use videx_experiment::{TrialEvent, TrialView};

/// Simulated person at the keyboard
pub trait Participant {
    /// Asked on every frame of playback; true clicks the video.
    fn wants_pause(&mut self, position: f64) -> bool;
    /// Asked while the trial waits for a word list.
    fn annotate(&mut self, view: &TrialView, position: f64) -> Vec<TrialEvent>;
    fn final_impression(&mut self, descriptors: &[AnnotationEntry]) -> Vec<String>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptedPause {
    /// Playback position at which the participant starts clicking.
    pub at: f64,
    pub words: Vec<String>,
}

/// Per-trial scripted behaviour, indexed by trial order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParticipantScript {
    pub trials: Vec<Vec<ScriptedPause>>,
    #[serde(default)]
    pub final_words: Vec<Vec<String>>,
}

impl ParticipantScript {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading participant script {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing participant script {}", path.display()))
    }

    pub fn for_trial(&self, index: usize) -> Option<ScriptedParticipant> {
        let pauses = self.trials.get(index)?;
        Some(ScriptedParticipant {
            pauses: pauses.iter().cloned().collect(),
            final_words: self.final_words.get(index).cloned().unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ScriptedParticipant {
    pauses: VecDeque<ScriptedPause>,
    final_words: Vec<String>,
}

impl Participant for ScriptedParticipant {
    fn wants_pause(&mut self, position: f64) -> bool {
        self.pauses.front().is_some_and(|p| position >= p.at)
    }

    /// Uses the next scripted word list whatever its position, since the
    /// trial only waits for input after a pause or at the very start.
    fn annotate(&mut self, _view: &TrialView, _position: f64) -> Vec<TrialEvent> {
        let Some(pause) = self.pauses.pop_front() else {
            return Vec::new();
        };
        let mut events: Vec<TrialEvent> = pause.words.into_iter().map(TrialEvent::AddWord).collect();
        events.push(TrialEvent::SubmitWords);
        events
    }

    fn final_impression(&mut self, _descriptors: &[AnnotationEntry]) -> Vec<String> {
        std::mem::take(&mut self.final_words)
    }
}

const VOCABULARY: [&str; 16] = [
    "confident",
    "nervous",
    "articulate",
    "friendly",
    "professional",
    "warm",
    "hesitant",
    "competent",
    "energetic",
    "calm",
    "awkward",
    "trustworthy",
    "polished",
    "genuine",
    "rushed",
    "thoughtful",
];

/// Pauses every few seconds of content and picks words at random
pub struct RandomParticipant<R: Rng> {
    rng: R,
    next_pause: f64,
}

impl<R: Rng> RandomParticipant<R> {
    pub fn new(mut rng: R) -> Self {
        let next_pause = rng.random_range(3.0..8.0);
        Self { rng, next_pause }
    }
}

impl<R: Rng> Participant for RandomParticipant<R> {
    fn wants_pause(&mut self, position: f64) -> bool {
        position >= self.next_pause
    }

    fn annotate(&mut self, _view: &TrialView, position: f64) -> Vec<TrialEvent> {
        let count = self.rng.random_range(1..=3);
        let mut events: Vec<TrialEvent> = VOCABULARY
            .choose_multiple(&mut self.rng, count)
            .map(|w| TrialEvent::AddWord(w.to_string()))
            .collect();
        events.push(TrialEvent::SubmitWords);
        self.next_pause = position + self.rng.random_range(3.0..8.0);
        events
    }

    fn final_impression(&mut self, descriptors: &[AnnotationEntry]) -> Vec<String> {
        let mut pool: Vec<&str> = descriptors.iter().map(|d| d.word.as_str()).collect();
        pool.extend(VOCABULARY);
        pool.sort_unstable();
        pool.dedup();
        let count = self.rng.random_range(2..=3);
        pool.choose_multiple(&mut self.rng, count)
            .map(|w| w.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use videx_core::TrialPhase;
    use videx_experiment::NoticeView;

    fn paused_view() -> TrialView {
        TrialView {
            phase: TrialPhase::Paused,
            notice: NoticeView {
                text: String::new(),
                warn: true,
            },
            media_visible: true,
            input_enabled: true,
            submit_enabled: false,
            instructions: None,
            cannot_add: None,
            pending: Vec::new(),
        }
    }

    #[test]
    fn script_parses_and_replays_in_order() {
        let json = r#"{
            "trials": [[
                { "at": 0.0, "words": ["calm"] },
                { "at": 5.0, "words": ["warm", "open"] }
            ]],
            "final_words": [["calm", "open"]]
        }"#;
        let script: ParticipantScript = serde_json::from_str(json).unwrap();
        assert!(script.for_trial(1).is_none());
        let mut p = script.for_trial(0).unwrap();

        let first = p.annotate(&paused_view(), 0.0);
        assert_eq!(
            first,
            vec![TrialEvent::AddWord("calm".into()), TrialEvent::SubmitWords]
        );
        assert!(!p.wants_pause(4.9));
        assert!(p.wants_pause(5.0));
        assert_eq!(p.annotate(&paused_view(), 5.0).len(), 3);
        assert!(!p.wants_pause(100.0));
        assert!(p.annotate(&paused_view(), 6.0).is_empty());
        assert_eq!(p.final_impression(&[]), vec!["calm", "open"]);
    }

    #[test]
    fn random_participant_always_submits() {
        let mut p = RandomParticipant::new(StdRng::seed_from_u64(11));
        for round in 0..20 {
            let events = p.annotate(&paused_view(), round as f64 * 10.0);
            assert_eq!(events.last(), Some(&TrialEvent::SubmitWords));
            assert!((2..=4).contains(&events.len()));
        }
        let words = p.final_impression(&[]);
        assert!((2..=3).contains(&words.len()));
    }

    #[test]
    fn random_pauses_are_spaced() {
        let mut p = RandomParticipant::new(StdRng::seed_from_u64(5));
        assert!(!p.wants_pause(2.9));
        assert!(p.wants_pause(8.0));
        p.annotate(&paused_view(), 8.0);
        assert!(!p.wants_pause(10.9));
        assert!(p.wants_pause(16.0));
    }
}
