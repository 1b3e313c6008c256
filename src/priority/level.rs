use std::fmt;

use serde::{Deserialize, Serialize};

/// Task urgency tier predicted by the model. Discriminants are output indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
    Urgent,
}

impl PriorityLevel {
    pub const ALL: [PriorityLevel; 4] = [
        PriorityLevel::Low,
        PriorityLevel::Medium,
        PriorityLevel::High,
        PriorityLevel::Urgent,
    ];

    pub const COUNT: usize = PriorityLevel::ALL.len();

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<PriorityLevel> {
        PriorityLevel::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            PriorityLevel::Low => "Low",
            PriorityLevel::Medium => "Medium",
            PriorityLevel::High => "High",
            PriorityLevel::Urgent => "Urgent",
        }
    }

    pub fn one_hot(self) -> [f64; PriorityLevel::COUNT] {
        let mut v = [0.0; PriorityLevel::COUNT];
        v[self.index()] = 1.0;
        v
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}
