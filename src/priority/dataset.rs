use super::{Grade, PriorityLevel};

/// The grade → priority policy the model memorizes. C and D share High.
pub const TRAINING_EXAMPLES: [(Grade, PriorityLevel); 6] = [
    (Grade::A, PriorityLevel::Low),
    (Grade::B, PriorityLevel::Medium),
    (Grade::C, PriorityLevel::High),
    (Grade::D, PriorityLevel::High),
    (Grade::E, PriorityLevel::Urgent),
    (Grade::F, PriorityLevel::Urgent),
];

/// Label for `grade` under the fixed policy.
pub fn expected_priority(grade: Grade) -> PriorityLevel {
    TRAINING_EXAMPLES[grade.index()].1
}

/// One-hot encoded (inputs, labels) in the shape `train_loop` consumes.
pub fn encoded() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    TRAINING_EXAMPLES
        .iter()
        .map(|(grade, level)| (grade.one_hot().to_vec(), level.one_hot().to_vec()))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_example_per_grade_in_order() {
        for (i, (grade, _)) in TRAINING_EXAMPLES.iter().enumerate() {
            assert_eq!(grade.index(), i);
        }
    }

    #[test]
    fn encoding_matches_table() {
        let (x, y) = encoded();
        assert_eq!(x.len(), 6);
        assert_eq!(x[3], vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        assert_eq!(y[3], vec![0.0, 0.0, 1.0, 0.0]);
        assert_eq!(y[5], vec![0.0, 0.0, 0.0, 1.0]);
        assert_eq!(expected_priority(Grade::B), PriorityLevel::Medium);
    }
}
