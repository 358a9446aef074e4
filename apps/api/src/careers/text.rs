//! Text signals used by the matcher: Jaccard word overlap and the dominant
//! aspiration category of free-text answers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Jaccard similarity of the lowercase whitespace-separated word sets.
/// Returns 0.0 when either text is empty.
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();
    let words_a: HashSet<&str> = a_lower.split_whitespace().collect();
    let words_b: HashSet<&str> = b_lower.split_whitespace().collect();

    let union = words_a.union(&words_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = words_a.intersection(&words_b).count();
    intersection as f64 / union as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspirationCategory {
    Technical,
    Creative,
    Business,
    Healthcare,
    Scientific,
    Legal,
    Education,
}

const CATEGORY_KEYWORDS: &[(AspirationCategory, &[&str])] = &[
    (
        AspirationCategory::Technical,
        &[
            "technology",
            "software",
            "code",
            "coding",
            "programming",
            "computer",
            "engineering",
            "data",
            "systems",
        ],
    ),
    (
        AspirationCategory::Creative,
        &["design", "art", "creative", "music", "writing", "media", "story"],
    ),
    (
        AspirationCategory::Business,
        &[
            "business",
            "manage",
            "money",
            "finance",
            "startup",
            "company",
            "market",
            "entrepreneur",
        ],
    ),
    (
        AspirationCategory::Healthcare,
        &["health", "patient", "medical", "medicine", "hospital", "heal", "nurse"],
    ),
    (
        AspirationCategory::Scientific,
        &["research", "science", "discover", "experiment", "lab", "analyze"],
    ),
    (
        AspirationCategory::Legal,
        &["law", "legal", "justice", "rights", "court", "policy"],
    ),
    (
        AspirationCategory::Education,
        &["teach", "education", "student", "mentor", "learn", "school"],
    ),
];

impl AspirationCategory {
    pub fn label(self) -> &'static str {
        match self {
            AspirationCategory::Technical => "technical",
            AspirationCategory::Creative => "creative",
            AspirationCategory::Business => "business",
            AspirationCategory::Healthcare => "healthcare",
            AspirationCategory::Scientific => "scientific",
            AspirationCategory::Legal => "legal",
            AspirationCategory::Education => "education",
        }
    }

    /// The category with the most keyword hits in `text`. Ties go to the
    /// category listed first; no hits yields `None`.
    pub fn dominant(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        let mut best: Option<(Self, usize)> = None;

        for (category, keywords) in CATEGORY_KEYWORDS {
            let hits = keywords.iter().filter(|k| lower.contains(*k)).count();
            if hits > 0 && best.map_or(true, |(_, b)| hits > b) {
                best = Some((*category, hits));
            }
        }

        best.map(|(c, _)| c)
    }
}
