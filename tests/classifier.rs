use std::process::Command;

use grade_priority_nn::priority::dataset::expected_priority;
use grade_priority_nn::train::argmax;
use grade_priority_nn::{Error, Grade, GradeToPriorityClassifier, PriorityLevel, TrainConfig};

fn trained(seed: u64) -> GradeToPriorityClassifier {
    let mut clf = GradeToPriorityClassifier::new(TrainConfig::default().with_seed(seed))
        .expect("default config is valid");
    clf.train();
    clf
}

fn matches_table(clf: &GradeToPriorityClassifier) -> usize {
    Grade::ALL
        .into_iter()
        .filter(|&g| clf.classify(g).unwrap() == expected_priority(g))
        .count()
}

#[test]
fn learns_the_label_table_across_runs() {
    for seed in [1, 2, 3] {
        let clf = trained(seed);
        let hits = matches_table(&clf);
        assert!(hits >= 5, "seed {seed}: only {hits}/6 grades matched");
    }
}

#[test]
fn predictions_are_distributions() {
    let clf = trained(5);
    for grade in Grade::ALL {
        let p = clf.predict(grade).unwrap();
        assert_eq!(p.len(), 4);
        assert!(p.iter().all(|&x| (0.0..=1.0).contains(&x)), "{grade}: {p:?}");
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-9, "{grade}: {p:?}");
    }
}

#[test]
fn grade_c_is_high_with_fixed_seed() {
    let clf = trained(42);
    let p = clf.predict_vector(&[0.0, 0.0, 1.0, 0.0, 0.0, 0.0]).unwrap();
    assert_eq!(argmax(&p), 2);
    assert_eq!(clf.predict_priority("C").unwrap(), Some(PriorityLevel::High));
}

#[test]
fn training_reduces_loss_and_reaches_high_accuracy() {
    let mut clf = GradeToPriorityClassifier::new(TrainConfig::default().with_seed(9)).unwrap();
    let history = clf.train();
    let first = &history[0];
    let last = history.last().unwrap();
    assert!(last.train_loss < first.train_loss);
    assert!(last.train_accuracy >= 5.0 / 6.0);
}

#[test]
fn save_then_load_reproduces_predictions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("models").join("baseline_model.json");
    let clf = trained(7);
    clf.save(&path).unwrap();

    let loaded = GradeToPriorityClassifier::load(&path).unwrap();
    for grade in Grade::ALL {
        assert_eq!(loaded.predict(grade).unwrap(), clf.predict(grade).unwrap(), "{grade}");
    }
    assert_eq!(loaded.config().hidden_units, 8);
}

#[test]
fn malformed_input_fails() {
    let clf = trained(4);
    let cases: [&[f64]; 4] = [
        &[0.0, 0.0, 0.0, 0.0, 1.0],
        &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        &[0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        &[0.0, 2.0, 0.0, 0.0, 0.0, 0.0],
    ];
    for input in cases {
        assert!(matches!(clf.predict_vector(input), Err(Error::InvalidInput(_))), "{input:?}");
    }
}

#[test]
fn load_rejects_foreign_architecture() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wide.json");
    let mut clf = GradeToPriorityClassifier::new(TrainConfig {
        hidden_units: 8,
        seed: Some(1),
        ..TrainConfig::default()
    })
    .unwrap();
    clf.train();
    clf.save(&path).unwrap();

    // Drop the output layer so the file is a 6 -> 8 network.
    let text = std::fs::read_to_string(&path).unwrap();
    let mut json: serde_json::Value = serde_json::from_str(&text).unwrap();
    json["layers"].as_array_mut().unwrap().pop();
    std::fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

    assert!(matches!(GradeToPriorityClassifier::load(&path), Err(Error::ShapeMismatch(_))));
}

#[test]
fn load_of_garbage_is_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(GradeToPriorityClassifier::load(&path), Err(Error::Json(_))));
}

#[test]
fn model_saved_by_binary_predicts_urgent_for_f() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("baseline_model.json");

    let status = Command::new(env!("CARGO_BIN_EXE_grade-priority-nn"))
        .arg("--seed")
        .arg("11")
        .arg("--output")
        .arg(&path)
        .status()
        .expect("binary runs");
    assert!(status.success());

    let loaded = GradeToPriorityClassifier::load(&path).unwrap();
    let p = loaded.predict_vector(&[0.0, 0.0, 0.0, 0.0, 0.0, 1.0]).unwrap();
    assert_eq!(argmax(&p), 3);
}

#[test]
fn binary_fails_on_unwritable_output() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be opened as the output file.
    let status = Command::new(env!("CARGO_BIN_EXE_grade-priority-nn"))
        .arg("--epochs")
        .arg("1")
        .arg("--output")
        .arg(dir.path())
        .status()
        .expect("binary runs");
    assert!(!status.success());
}
