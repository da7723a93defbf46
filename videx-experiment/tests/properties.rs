mod common;

use std::time::Duration;

use common::{annotate, play_to, pump, started};
use videx_core::{DisruptionWindow, TrialPhase};
use videx_experiment::{Notice, TrialConfig, TrialEvent};

fn windowed(start: f64, end: f64) -> TrialConfig {
    TrialConfig::for_video("clip.mp4")
        .with_disruption(Some(DisruptionWindow::new(start, end)))
        .with_autoplay(true)
}

#[test]
fn adding_a_pending_word_again_never_changes_the_set() {
    let (mut trial, _) = started(TrialConfig::for_video("clip.mp4"));
    let words = ["calm", "calm", "Calm", "eager", "calm", " eager ", "eager"];
    for w in words {
        let before: Vec<String> = trial.pending().iter().map(str::to_string).collect();
        let already = before.iter().any(|b| b == w.trim());
        trial.handle_event(TrialEvent::AddWord(w.to_string()));
        let after: Vec<String> = trial.pending().iter().map(str::to_string).collect();
        if already {
            assert_eq!(before, after, "adding {w:?}");
        }
    }
    assert_eq!(
        trial.pending().iter().collect::<Vec<_>>(),
        vec!["calm", "Calm", "eager"]
    );
}

#[test]
fn pending_set_is_not_checked_against_submitted_words() {
    let (mut trial, _) = started(TrialConfig::for_video("clip.mp4"));
    annotate(&mut trial, &["calm"]);
    play_to(&mut trial, 5.0);
    assert!(trial.handle_event(TrialEvent::PauseRequested));
    assert!(trial.add_word("calm").is_ok());
}

#[test]
fn pause_within_min_interval_never_transitions() {
    let (mut trial, _) = started(TrialConfig::for_video("clip.mp4"));
    trial.media_mut().position = 3.0;
    annotate(&mut trial, &["first"]);

    for position in [3.0, 3.5, 4.0, 4.9, 5.0] {
        play_to(&mut trial, position);
        assert!(!trial.handle_event(TrialEvent::PauseRequested), "{position}");
        assert_eq!(trial.phase(), TrialPhase::Playing);
        assert_eq!(trial.last_pause_mark(), 3.0);
    }

    play_to(&mut trial, 5.01);
    assert!(trial.handle_event(TrialEvent::PauseRequested));
    assert_eq!(trial.phase(), TrialPhase::Paused);
}

#[test]
fn rejected_pause_does_not_move_the_mark() {
    let (mut trial, _) = started(TrialConfig::for_video("clip.mp4"));
    trial.media_mut().position = 1.0;
    annotate(&mut trial, &["first"]);
    play_to(&mut trial, 2.5);
    trial.handle_event(TrialEvent::PauseRequested);
    assert_eq!(trial.notice(), Notice::TooEarly);
    play_to(&mut trial, 3.1);
    assert!(trial.handle_event(TrialEvent::PauseRequested));
}

#[test]
fn pause_inside_window_is_inert() {
    let (mut trial, timer) = started(windowed(10.0, 20.0));
    for position in [10.0, 12.5, 15.0, 19.99] {
        play_to(&mut trial, position);
        assert_eq!(trial.phase(), TrialPhase::Disrupted);
        let mark = trial.last_pause_mark();
        let notice = trial.notice();

        assert!(!trial.handle_event(TrialEvent::PauseRequested), "{position}");
        assert_eq!(trial.phase(), TrialPhase::Disrupted);
        assert_eq!(trial.last_pause_mark(), mark);
        assert_eq!(trial.notice(), notice);
        assert!(trial.media().playing);

        timer.advance(Duration::from_secs(5));
        assert!(trial.update().is_empty());
    }
}

#[test]
fn window_is_half_open_for_pauses() {
    let (mut trial, _) = started(windowed(10.0, 20.0));
    play_to(&mut trial, 10.0);
    assert!(!trial.handle_event(TrialEvent::PauseRequested));

    play_to(&mut trial, 20.0);
    assert_eq!(trial.phase(), TrialPhase::Playing);
    assert!(trial.handle_event(TrialEvent::PauseRequested));
}

#[test]
fn pause_between_updates_checks_position_at_request() {
    let (mut trial, _) = started(windowed(10.0, 20.0));
    play_to(&mut trial, 9.9);
    assert_eq!(trial.phase(), TrialPhase::Playing);
    // no TimeUpdate delivered for the move to 10.1
    trial.media_mut().position = 10.1;
    assert!(!trial.handle_event(TrialEvent::PauseRequested));
    assert!(trial.is_disrupted());
}

#[test]
fn repeated_time_updates_are_idempotent() {
    let (mut trial, _) = started(windowed(10.0, 20.0));
    play_to(&mut trial, 11.0);
    assert!(trial.is_disrupted());
    trial.media_mut().position = 11.0;
    assert!(!trial.handle_event(TrialEvent::TimeUpdate));
    trial.media_mut().position = 12.0;
    assert!(!trial.handle_event(TrialEvent::TimeUpdate));
    assert!(trial.is_disrupted());
}

#[test]
fn submission_stamps_every_word_with_one_timestamp() {
    let (mut trial, _) = started(TrialConfig::for_video("clip.mp4"));
    trial.media_mut().position = 7.75;
    assert!(annotate(&mut trial, &["a", "b", "c"]));

    let entries = trial.descriptors();
    assert_eq!(entries.len(), 3);
    let words: Vec<_> = entries.iter().map(|e| e.word.as_str()).collect();
    assert_eq!(words, vec!["a", "b", "c"]);
    assert!(entries.iter().all(|e| e.timestamp == 7.75));
}

#[test]
fn normal_end_completes_once_with_all_batches() {
    let (mut trial, _) = started(TrialConfig::for_video("clip.mp4"));
    trial.media_mut().position = 0.0;
    annotate(&mut trial, &["x", "y"]);
    play_to(&mut trial, 6.0);
    trial.handle_event(TrialEvent::PauseRequested);
    annotate(&mut trial, &["z"]);
    play_to(&mut trial, 30.0);

    assert!(trial.handle_event(TrialEvent::MediaEnded));
    assert!(!trial.handle_event(TrialEvent::MediaEnded));
    assert!(!trial.handle_event(TrialEvent::LoadError));
    pump(&mut trial);

    let results = trial.into_host();
    assert_eq!(results.len(), 1);
    let words: Vec<_> = results[0].words().collect();
    assert_eq!(words, vec!["x", "y", "z"]);
    assert!(!results[0].load_failed);
}

#[test]
fn load_error_before_submission_completes_empty_after_grace() {
    let (mut trial, timer) = started(TrialConfig::for_video("missing.mp4"));
    trial.handle_event(TrialEvent::AddWord("unsent".into()));
    assert!(trial.handle_event(TrialEvent::LoadError));
    assert_eq!(trial.phase(), TrialPhase::Faulted);
    assert!(!trial.media().visible);
    assert!(!trial.handle_event(TrialEvent::AddWord("more".into())));
    assert!(!trial.handle_event(TrialEvent::MediaEnded));

    timer.advance(Duration::from_millis(2999));
    pump(&mut trial);
    assert!(trial.host().is_empty());

    timer.advance(Duration::from_millis(1));
    pump(&mut trial);
    assert!(trial.is_finished());

    timer.advance(Duration::from_secs(10));
    pump(&mut trial);
    let results = trial.into_host();
    assert_eq!(results.len(), 1);
    assert!(results[0].descriptors.is_empty());
    assert!(results[0].load_failed);
}

#[test]
fn load_error_after_submission_keeps_committed_entries() {
    let (mut trial, timer) = started(TrialConfig::for_video("clip.mp4"));
    trial.media_mut().position = 2.0;
    annotate(&mut trial, &["kept"]);
    trial.handle_event(TrialEvent::LoadError);
    timer.advance(Duration::from_millis(3000));
    pump(&mut trial);

    let results = trial.into_host();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].words().collect::<Vec<_>>(), vec!["kept"]);
    assert!(results[0].load_failed);
}
