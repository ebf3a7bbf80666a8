// Batch-level behavior: ordering, failure isolation, collisions, and the
// empty-input path.

mod fixtures;

use fixtures::{down, up, FakeRecorder, ScriptedKeys};
use phraserec::{runner, CaptureConfig};

fn single_shot_config() -> CaptureConfig {
    // Single-shot keeps the key scripts short: hold, release, done.
    let mut config = CaptureConfig::default();
    config.review = false;
    config
}

fn phrases(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn records_every_phrase_in_order() {
    let config = single_shot_config();
    let mut recorder = FakeRecorder::new();
    let mut keys = ScriptedKeys::new(vec![
        down(' '),
        up(' '),
        down(' '),
        up(' '),
        down(' '),
        up(' '),
    ]);

    let report = runner::run(
        &phrases(&["alpha", "bravo", "charlie"]),
        &config,
        &mut keys,
        &mut recorder,
    );

    assert_eq!(
        report.accepted,
        vec!["phrase.alpha.wav", "phrase.bravo.wav", "phrase.charlie.wav"]
    );
    assert!(report.failed.is_empty());

    let log = recorder.log.lock().unwrap();
    assert_eq!(
        log.starts,
        vec!["phrase.alpha.wav", "phrase.bravo.wav", "phrase.charlie.wav"]
    );
}

#[test]
fn one_spawn_failure_does_not_abort_the_batch() {
    let config = single_shot_config();
    let mut recorder = FakeRecorder::failing_on("phrase.b.wav");
    // "b" consumes only its start key before failing.
    let mut keys = ScriptedKeys::new(vec![
        down(' '),
        up(' '),
        down(' '), // b: spawn fails here
        down(' '),
        up(' '),
    ]);

    let report = runner::run(&phrases(&["a", "b", "c"]), &config, &mut keys, &mut recorder);

    assert_eq!(report.accepted, vec!["phrase.a.wav", "phrase.c.wav"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "b");
}

#[test]
fn empty_phrase_list_is_a_clean_no_op() {
    let config = single_shot_config();
    let mut recorder = FakeRecorder::new();
    let mut keys = ScriptedKeys::new(vec![]);

    let report = runner::run(&[], &config, &mut keys, &mut recorder);

    assert!(report.accepted.is_empty());
    assert!(report.failed.is_empty());
    assert!(recorder.log.lock().unwrap().starts.is_empty());
}

#[test]
fn filename_collision_fails_the_later_phrase_only() {
    // Sanitizing drops punctuation, so these collapse to the same name.
    let config = single_shot_config();
    let mut recorder = FakeRecorder::new();
    let mut keys = ScriptedKeys::new(vec![down(' '), up(' ')]);

    let report = runner::run(
        &phrases(&["a!b", "a?b"]),
        &config,
        &mut keys,
        &mut recorder,
    );

    assert_eq!(report.accepted, vec!["phrase.ab.wav"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "a?b");
    // The colliding phrase never reached the recorder.
    assert_eq!(recorder.log.lock().unwrap().starts.len(), 1);
}
