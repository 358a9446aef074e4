use serde::{Deserialize, Serialize};

/// Quiz answers fed to the career matcher. Every field is optional so a
/// partially completed quiz can still be scored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareerAnswers {
    pub education: Option<String>,
    pub field_of_study: Option<String>,
    /// Comma-separated list, e.g. "python, leadership".
    pub key_strengths: Option<String>,
    pub work_environment: Option<String>,
    pub passion: Option<String>,
    pub impact: Option<String>,
    pub five_year_goal: Option<String>,
}

impl CareerAnswers {
    /// Number of declared answer fields. Denominator of `data_completeness`.
    pub const FIELD_COUNT: usize = 7;

    pub fn education(&self) -> Option<&str> {
        present(&self.education)
    }

    pub fn field_of_study(&self) -> Option<&str> {
        present(&self.field_of_study)
    }

    pub fn key_strengths(&self) -> Option<&str> {
        present(&self.key_strengths)
    }

    pub fn work_environment(&self) -> Option<&str> {
        present(&self.work_environment)
    }

    /// The free-text aspiration answers that are present, in quiz order.
    pub fn aspirations(&self) -> Vec<&str> {
        [&self.passion, &self.impact, &self.five_year_goal]
            .into_iter()
            .filter_map(present)
            .collect()
    }

    /// Fraction of declared fields that carry a non-empty answer.
    pub fn data_completeness(&self) -> f64 {
        let filled = [
            &self.education,
            &self.field_of_study,
            &self.key_strengths,
            &self.work_environment,
            &self.passion,
            &self.impact,
            &self.five_year_goal,
        ]
        .into_iter()
        .filter(|f| present(f).is_some())
        .count();

        filled as f64 / Self::FIELD_COUNT as f64
    }
}

// An empty string counts as absent.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
