//! Career matcher: scores quiz answers against every career in the catalog.
//!
//! Pure and total: no I/O, no error path, deterministic for fixed inputs.
//!
//! Algorithm, per career:
//! 1. Compute each sub-score whose input answer is present:
//!    education (0.20), skills (0.25), environment (0.10), field (0.15),
//!    aspiration (0.15).
//! 2. match_score = Σ(score × weight) / Σ(weight applied), 0 if nothing applied
//! 3. sector_alignment = jaccard(field_of_study, sector name)
//! 4. confidence = min(match_score × base_confidence × data_completeness, 0.95)
//!
//! Results are ranked by 0.7 × match_score + 0.3 × sector_alignment, then by
//! confidence. Remaining ties keep catalog order.

use serde::{Deserialize, Serialize};

use crate::careers::answers::CareerAnswers;
use crate::careers::catalog::{CareerCatalog, CareerDefinition};
use crate::careers::education::education_score;
use crate::careers::text::{jaccard_similarity, AspirationCategory};

const EDUCATION_WEIGHT: f64 = 0.20;
const SKILLS_WEIGHT: f64 = 0.25;
const ENVIRONMENT_WEIGHT: f64 = 0.10;
const FIELD_WEIGHT: f64 = 0.15;
const ASPIRATION_WEIGHT: f64 = 0.15;

const EDUCATION_FACTOR_THRESHOLD: f64 = 0.7;
const SKILLS_FACTOR_THRESHOLD: f64 = 0.5;
const ASPIRATION_FACTOR_THRESHOLD: f64 = 0.6;

const MAX_CONFIDENCE: f64 = 0.95;
const MATCH_RANK_WEIGHT: f64 = 0.7;
const SECTOR_RANK_WEIGHT: f64 = 0.3;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubScoreKind {
    Education,
    Skills,
    Environment,
    Field,
    Aspiration,
}

/// One applied sub-score. Only sub-scores whose input was present appear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    pub kind: SubScoreKind,
    pub score: f64, // 0.0 – 1.0
    pub weight: f64,
    /// Set on the aspiration sub-score when the answers lean toward a category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<AspirationCategory>,
}

/// A career enriched with its scores for one set of answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub sector: String,
    #[serde(flatten)]
    pub career: CareerDefinition,
    pub match_score: f64, // 0.0 – 1.0
    pub matching_factors: Vec<String>,
    pub confidence: f64,       // 0.0 – 0.95
    pub sector_alignment: f64, // 0.0 – 1.0
    pub detailed_scores: Vec<SubScore>,
}

impl MatchResult {
    /// Key the results are ranked by.
    pub fn rank_score(&self) -> f64 {
        MATCH_RANK_WEIGHT * self.match_score + SECTOR_RANK_WEIGHT * self.sector_alignment
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Matching
// ────────────────────────────────────────────────────────────────────────────

/// Scores every career in `catalog` and returns them best-first.
pub fn generate_career_matches(
    answers: &CareerAnswers,
    catalog: &CareerCatalog,
) -> Vec<MatchResult> {
    let data_completeness = answers.data_completeness();

    let mut results: Vec<MatchResult> = catalog
        .careers()
        .map(|(sector, career)| score_career(answers, sector, career, data_completeness))
        .collect();

    // Stable sort: equal keys keep catalog order.
    results.sort_by(|a, b| {
        b.rank_score()
            .total_cmp(&a.rank_score())
            .then_with(|| b.confidence.total_cmp(&a.confidence))
    });

    results
}

fn score_career(
    answers: &CareerAnswers,
    sector: &str,
    career: &CareerDefinition,
    data_completeness: f64,
) -> MatchResult {
    let mut detailed_scores = Vec::new();
    let mut matching_factors = Vec::new();

    if let Some(education) = answers.education() {
        let score = education_score(education, &career.required_education);
        if score > EDUCATION_FACTOR_THRESHOLD {
            matching_factors.push("Your education level fits this career's requirements".to_string());
        }
        detailed_scores.push(sub_score(SubScoreKind::Education, score, EDUCATION_WEIGHT));
    }

    if let Some(strengths) = answers.key_strengths() {
        let score = skills_score(strengths, &career.skills);
        if score > SKILLS_FACTOR_THRESHOLD {
            matching_factors
                .push("Strong overlap between your strengths and the required skills".to_string());
        }
        detailed_scores.push(sub_score(SubScoreKind::Skills, score, SKILLS_WEIGHT));
    }

    if let Some(environment) = answers.work_environment() {
        let matched = career
            .work_environment
            .iter()
            .any(|e| e.to_lowercase() == environment.to_lowercase());
        let score = if matched { 1.0 } else { 0.0 };
        if matched {
            matching_factors.push(format!("Matches your preferred work environment ({environment})"));
        }
        detailed_scores.push(sub_score(SubScoreKind::Environment, score, ENVIRONMENT_WEIGHT));
    }

    if let Some(field) = answers.field_of_study() {
        let field_lower = field.to_lowercase();
        let matched = career
            .sectors
            .iter()
            .any(|s| s.to_lowercase().contains(&field_lower));
        let score = if matched { 1.0 } else { 0.0 };
        if matched {
            matching_factors.push("Your field of study aligns with this career's sector".to_string());
        }
        detailed_scores.push(sub_score(SubScoreKind::Field, score, FIELD_WEIGHT));
    }

    let aspirations = answers.aspirations();
    if !aspirations.is_empty() {
        let text = aspirations.join(" ");
        let score = jaccard_similarity(&text, &career.description);
        let category = AspirationCategory::dominant(&text);
        if score > ASPIRATION_FACTOR_THRESHOLD {
            matching_factors.push(match category {
                Some(c) => format!("Your {} aspirations align with this career", c.label()),
                None => "Your aspirations align with this career".to_string(),
            });
        }
        detailed_scores.push(SubScore {
            category,
            ..sub_score(SubScoreKind::Aspiration, score, ASPIRATION_WEIGHT)
        });
    }

    let total_weight: f64 = detailed_scores.iter().map(|s| s.weight).sum();
    let weighted_sum: f64 = detailed_scores.iter().map(|s| s.score * s.weight).sum();
    let match_score = if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    };

    let sector_alignment = jaccard_similarity(answers.field_of_study().unwrap_or(""), sector);
    let confidence =
        (match_score * career.base_confidence * data_completeness).clamp(0.0, MAX_CONFIDENCE);

    MatchResult {
        sector: sector.to_string(),
        career: career.clone(),
        match_score,
        matching_factors,
        confidence,
        sector_alignment,
        detailed_scores,
    }
}

/// Fraction of the user's comma-separated strengths found inside any career skill.
fn skills_score(strengths: &str, career_skills: &[String]) -> f64 {
    let user_skills: Vec<String> = strengths
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    let career_skills: Vec<String> = career_skills.iter().map(|s| s.to_lowercase()).collect();

    let matched = user_skills
        .iter()
        .filter(|u| career_skills.iter().any(|c| c.contains(u.as_str())))
        .count();

    matched as f64 / user_skills.len().max(1) as f64
}

fn sub_score(kind: SubScoreKind, score: f64, weight: f64) -> SubScore {
    SubScore {
        kind,
        score,
        weight,
        category: None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::careers::catalog::Sector;

    fn career(id: &str, skills: &[&str], education: &[&str]) -> CareerDefinition {
        CareerDefinition {
            id: id.to_string(),
            title: id.to_string(),
            description: "build software that helps people".to_string(),
            required_education: education.iter().map(|s| s.to_string()).collect(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            work_environment: vec!["Remote".to_string(), "office".to_string()],
            sectors: vec!["technology".to_string(), "computer science".to_string()],
            base_confidence: 0.9,
        }
    }

    fn catalog() -> CareerCatalog {
        CareerCatalog::new(vec![
            Sector {
                name: "Technology".to_string(),
                careers: vec![
                    career("engineer", &["Python programming", "team leadership"], &["bachelor"]),
                    career("researcher", &["statistics"], &["phd"]),
                ],
            },
            Sector {
                name: "Healthcare".to_string(),
                careers: vec![CareerDefinition {
                    sectors: vec!["healthcare".to_string()],
                    work_environment: vec!["hospital".to_string()],
                    ..career("nurse", &["patient care"], &["bachelor"])
                }],
            },
        ])
    }

    fn find<'a>(results: &'a [MatchResult], id: &str) -> &'a MatchResult {
        results.iter().find(|r| r.career.id == id).unwrap()
    }

    fn score_of(result: &MatchResult, kind: SubScoreKind) -> f64 {
        result
            .detailed_scores
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.score)
            .unwrap()
    }

    #[test]
    fn test_empty_answers_score_zero_for_every_career() {
        let results = generate_career_matches(&CareerAnswers::default(), &catalog());
        assert_eq!(results.len(), 3);
        for r in &results {
            assert_eq!(r.match_score, 0.0);
            assert_eq!(r.sector_alignment, 0.0);
            assert_eq!(r.confidence, 0.0);
            assert!(r.detailed_scores.is_empty());
            assert!(r.matching_factors.is_empty());
        }
    }

    #[test]
    fn test_empty_answers_keep_catalog_order() {
        let results = generate_career_matches(&CareerAnswers::default(), &catalog());
        let ids: Vec<&str> = results.iter().map(|r| r.career.id.as_str()).collect();
        assert_eq!(ids, vec!["engineer", "researcher", "nurse"]);
    }

    #[test]
    fn test_result_count_matches_catalog() {
        let catalog = CareerCatalog::embedded().unwrap();
        let answers = CareerAnswers {
            education: Some("bachelor".to_string()),
            ..Default::default()
        };
        let results = generate_career_matches(&answers, &catalog);
        assert_eq!(results.len(), catalog.career_count());
    }

    #[test]
    fn test_empty_catalog_yields_no_results() {
        let results = generate_career_matches(&CareerAnswers::default(), &CareerCatalog::default());
        assert!(results.is_empty());
    }

    #[test]
    fn test_skills_substring_match_scores_one() {
        let answers = CareerAnswers {
            key_strengths: Some("python, leadership".to_string()),
            ..Default::default()
        };
        let results = generate_career_matches(&answers, &catalog());
        let engineer = find(&results, "engineer");
        assert_eq!(score_of(engineer, SubScoreKind::Skills), 1.0);
        assert!(engineer
            .matching_factors
            .iter()
            .any(|f| f.contains("strengths")));
    }

    #[test]
    fn test_skills_partial_overlap() {
        assert_eq!(skills_score("python, cooking", &["Python programming".to_string()]), 0.5);
        assert_eq!(skills_score(" , ", &["Python".to_string()]), 0.0);
    }

    #[test]
    fn test_education_sub_score_bachelor_vs_master() {
        let catalog = CareerCatalog::new(vec![Sector {
            name: "Research".to_string(),
            careers: vec![career("analyst", &["statistics"], &["master"])],
        }]);
        let answers = CareerAnswers {
            education: Some("bachelor".to_string()),
            ..Default::default()
        };
        let results = generate_career_matches(&answers, &catalog);
        let score = score_of(&results[0], SubScoreKind::Education);
        assert!((score - 0.8).abs() < 1e-12);
        // Only education applied, so the match score is the education score.
        assert!((results[0].match_score - 0.8).abs() < 1e-12);
        assert_eq!(results[0].matching_factors.len(), 1);
    }

    #[test]
    fn test_missing_fields_do_not_drag_score_down() {
        let answers = CareerAnswers {
            work_environment: Some("remote".to_string()),
            ..Default::default()
        };
        let results = generate_career_matches(&answers, &catalog());
        let engineer = find(&results, "engineer");
        assert_eq!(engineer.match_score, 1.0);
        assert_eq!(engineer.detailed_scores.len(), 1);
        assert_eq!(find(&results, "nurse").match_score, 0.0);
    }

    #[test]
    fn test_environment_match_is_case_insensitive_equality() {
        let answers = CareerAnswers {
            work_environment: Some("REMOTE".to_string()),
            ..Default::default()
        };
        let results = generate_career_matches(&answers, &catalog());
        assert_eq!(score_of(find(&results, "engineer"), SubScoreKind::Environment), 1.0);

        let partial = CareerAnswers {
            work_environment: Some("rem".to_string()),
            ..Default::default()
        };
        let results = generate_career_matches(&partial, &catalog());
        assert_eq!(score_of(find(&results, "engineer"), SubScoreKind::Environment), 0.0);
    }

    #[test]
    fn test_field_matches_sector_tag_substring() {
        let answers = CareerAnswers {
            field_of_study: Some("Computer".to_string()),
            ..Default::default()
        };
        let results = generate_career_matches(&answers, &catalog());
        assert_eq!(score_of(find(&results, "engineer"), SubScoreKind::Field), 1.0);
        assert_eq!(score_of(find(&results, "nurse"), SubScoreKind::Field), 0.0);
    }

    #[test]
    fn test_sector_alignment_uses_sector_name() {
        let answers = CareerAnswers {
            field_of_study: Some("technology".to_string()),
            ..Default::default()
        };
        let results = generate_career_matches(&answers, &catalog());
        assert_eq!(find(&results, "engineer").sector_alignment, 1.0);
        assert_eq!(find(&results, "nurse").sector_alignment, 0.0);
    }

    #[test]
    fn test_empty_field_of_study_has_zero_alignment() {
        let answers = CareerAnswers {
            field_of_study: Some(String::new()),
            ..Default::default()
        };
        let results = generate_career_matches(&answers, &catalog());
        assert!(results.iter().all(|r| r.sector_alignment == 0.0));
        assert!(results.iter().all(|r| r.detailed_scores.is_empty()));
    }

    #[test]
    fn test_aspiration_uses_jaccard_and_category() {
        let answers = CareerAnswers {
            passion: Some("build software".to_string()),
            impact: Some("that helps people".to_string()),
            ..Default::default()
        };
        let results = generate_career_matches(&answers, &catalog());
        let engineer = find(&results, "engineer");
        let aspiration = engineer
            .detailed_scores
            .iter()
            .find(|s| s.kind == SubScoreKind::Aspiration)
            .unwrap();
        assert_eq!(aspiration.score, 1.0);
        assert_eq!(aspiration.category, Some(AspirationCategory::Technical));
        assert!(engineer
            .matching_factors
            .iter()
            .any(|f| f == "Your technical aspirations align with this career"));
    }

    #[test]
    fn test_confidence_scaled_by_completeness_and_capped() {
        let answers = CareerAnswers {
            work_environment: Some("remote".to_string()),
            ..Default::default()
        };
        let results = generate_career_matches(&answers, &catalog());
        let engineer = find(&results, "engineer");
        // 1.0 × 0.9 × 1/7
        assert!((engineer.confidence - 0.9 / 7.0).abs() < 1e-12);

        let full = CareerAnswers {
            education: Some("phd".to_string()),
            field_of_study: Some("technology".to_string()),
            key_strengths: Some("python".to_string()),
            work_environment: Some("remote".to_string()),
            passion: Some("build software that helps people".to_string()),
            impact: Some("build software that helps people".to_string()),
            five_year_goal: Some("build software that helps people".to_string()),
        };
        let hot = CareerCatalog::new(vec![Sector {
            name: "Technology".to_string(),
            careers: vec![CareerDefinition {
                base_confidence: 1.5,
                ..career("engineer", &["python"], &["bachelor"])
            }],
        }]);
        let results = generate_career_matches(&full, &hot);
        assert_eq!(results[0].match_score, 1.0);
        assert_eq!(results[0].confidence, MAX_CONFIDENCE);
    }

    #[test]
    fn test_equal_rank_breaks_tie_on_confidence() {
        let catalog = CareerCatalog::new(vec![Sector {
            name: "Technology".to_string(),
            careers: vec![
                CareerDefinition {
                    base_confidence: 0.4,
                    ..career("hesitant", &["python"], &["bachelor"])
                },
                CareerDefinition {
                    base_confidence: 0.9,
                    ..career("assured", &["python"], &["bachelor"])
                },
            ],
        }]);
        let answers = CareerAnswers {
            work_environment: Some("remote".to_string()),
            ..Default::default()
        };

        let results = generate_career_matches(&answers, &catalog);
        assert_eq!(results[0].rank_score(), results[1].rank_score());
        assert!(results[0].confidence > results[1].confidence);
        assert_eq!(results[0].career.id, "assured");
        assert_eq!(results[1].career.id, "hesitant");
    }

    #[test]
    fn test_results_sorted_by_rank_then_confidence() {
        let catalog = CareerCatalog::embedded().unwrap();
        let answers = CareerAnswers {
            education: Some("Bachelor's degree".to_string()),
            field_of_study: Some("technology".to_string()),
            key_strengths: Some("communication, data analysis, empathy".to_string()),
            work_environment: Some("hybrid".to_string()),
            passion: Some("I want to build technology that helps patients".to_string()),
            ..Default::default()
        };
        let results = generate_career_matches(&answers, &catalog);

        for pair in results.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.rank_score() >= b.rank_score());
            if a.rank_score() == b.rank_score() {
                assert!(a.confidence >= b.confidence);
            }
        }
        for r in &results {
            assert!((0.0..=MAX_CONFIDENCE).contains(&r.confidence));
            assert!((0.0..=1.0).contains(&r.match_score));
            assert!((0.0..=1.0).contains(&r.sector_alignment));
        }
    }

    #[test]
    fn test_matching_is_idempotent() {
        let catalog = CareerCatalog::embedded().unwrap();
        let answers = CareerAnswers {
            education: Some("master".to_string()),
            key_strengths: Some("leadership, writing".to_string()),
            five_year_goal: Some("lead a creative media company".to_string()),
            ..Default::default()
        };
        let first = generate_career_matches(&answers, &catalog);
        let second = generate_career_matches(&answers, &catalog);
        assert_eq!(first, second);
    }

    #[test]
    fn test_factors_follow_evaluation_order() {
        let answers = CareerAnswers {
            education: Some("bachelor".to_string()),
            key_strengths: Some("python".to_string()),
            work_environment: Some("office".to_string()),
            field_of_study: Some("technology".to_string()),
            ..Default::default()
        };
        let results = generate_career_matches(&answers, &catalog());
        let engineer = find(&results, "engineer");
        assert_eq!(engineer.matching_factors.len(), 4);
        assert!(engineer.matching_factors[0].contains("education"));
        assert!(engineer.matching_factors[1].contains("strengths"));
        assert!(engineer.matching_factors[2].contains("work environment"));
        assert!(engineer.matching_factors[3].contains("field of study"));
    }

    #[test]
    fn test_match_result_serializes_flat_career_fields() {
        let results = generate_career_matches(&CareerAnswers::default(), &catalog());
        let json = serde_json::to_value(&results[0]).unwrap();
        assert_eq!(json["id"], "engineer");
        assert_eq!(json["sector"], "Technology");
        assert!(json.get("career").is_none());
        assert!(json["detailed_scores"].as_array().unwrap().is_empty());
    }
}
