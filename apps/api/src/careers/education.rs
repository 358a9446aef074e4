use serde::{Deserialize, Serialize};

/// Ordinal education levels used by the education sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    HighSchool = 1,
    Diploma = 2,
    Associate = 3,
    Bachelor = 4,
    Master = 5,
    Phd = 6,
}

// Checked in this order; the first key contained in the input wins.
const LEVEL_KEYS: &[(&str, EducationLevel)] = &[
    ("high school", EducationLevel::HighSchool),
    ("diploma", EducationLevel::Diploma),
    ("associate", EducationLevel::Associate),
    ("bachelor", EducationLevel::Bachelor),
    ("master", EducationLevel::Master),
    ("phd", EducationLevel::Phd),
];

impl EducationLevel {
    /// Detects a level by case-insensitive substring match, so "Master's degree"
    /// maps to `Master`.
    pub fn detect(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        LEVEL_KEYS
            .iter()
            .find(|(key, _)| lower.contains(key))
            .map(|(_, level)| *level)
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

/// Ordinal of the detected level, 0 when nothing matches.
pub fn level_of(text: &str) -> u8 {
    EducationLevel::detect(text).map_or(0, EducationLevel::ordinal)
}

/// 1.0 when the user meets the highest required level, otherwise the ratio of
/// user level to required level.
pub fn education_score(user_education: &str, required: &[String]) -> f64 {
    let user_level = level_of(user_education);
    let required_level = required.iter().map(|r| level_of(r)).max().unwrap_or(0);

    if user_level >= required_level {
        1.0
    } else {
        f64::from(user_level) / f64::from(required_level.max(1))
    }
}
