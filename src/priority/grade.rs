use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Letter grade used as the only input feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    pub const ALL: [Grade; 6] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::E, Grade::F];

    /// Length of the one-hot encoding.
    pub const COUNT: usize = Grade::ALL.len();

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
        }
    }

    pub fn one_hot(self) -> [f64; Grade::COUNT] {
        let mut v = [0.0; Grade::COUNT];
        v[self.index()] = 1.0;
        v
    }

    /// Decodes a one-hot vector back to a grade.
    ///
    /// Fails on the wrong length, on anything other than 0/1 entries, and
    /// unless exactly one entry is hot.
    pub fn from_one_hot(input: &[f64]) -> Result<Grade> {
        if input.len() != Grade::COUNT {
            return Err(Error::InvalidInput(format!(
                "grade vector must have {} entries, got {}",
                Grade::COUNT,
                input.len()
            )));
        }
        if let Some(bad) = input.iter().find(|&&x| x != 0.0 && x != 1.0) {
            return Err(Error::InvalidInput(format!("grade vector entry {bad} is not 0 or 1")));
        }
        let mut hot = input.iter().enumerate().filter(|(_, x)| **x == 1.0).map(|(i, _)| i);
        match (hot.next(), hot.next()) {
            (Some(i), None) => Ok(Grade::ALL[i]),
            (None, _) => Err(Error::InvalidInput("grade vector has no hot entry".into())),
            (Some(_), Some(_)) => Err(Error::InvalidInput("grade vector has more than one hot entry".into())),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Grade {
    type Err = Error;

    fn from_str(s: &str) -> Result<Grade> {
        Grade::ALL
            .into_iter()
            .find(|g| g.label() == s)
            .ok_or_else(|| Error::UnknownGrade(s.to_string()))
    }
}
