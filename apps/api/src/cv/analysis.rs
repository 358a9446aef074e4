//! CV analysis: regex heuristics that score a CV's text from 0 to 100.
//!
//! Score budget:
//! - core sections (summary, experience, education, skills): 10 each
//! - contact details: email 5, phone 5
//! - action verbs: 2 per distinct verb, max 20
//! - quantified achievements: 3 each, max 15
//! - length: 15 for 250–900 words, 8 for 150–249 or 901–1200, else 3

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CvSection {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

const CORE_SECTIONS: &[CvSection] = &[
    CvSection::Summary,
    CvSection::Experience,
    CvSection::Education,
    CvSection::Skills,
];

const ACTION_VERBS: &[&str] = &[
    "achieved",
    "built",
    "created",
    "delivered",
    "designed",
    "developed",
    "implemented",
    "improved",
    "increased",
    "launched",
    "led",
    "managed",
    "mentored",
    "negotiated",
    "optimized",
    "organized",
    "reduced",
    "resolved",
    "streamlined",
    "trained",
];

static SECTION_HEADINGS: LazyLock<Vec<(CvSection, Regex)>> = LazyLock::new(|| {
    let heading = |alternatives: &str| {
        Regex::new(&format!(r"(?im)^[ \t]*(?:{alternatives})[ \t]*:?[ \t\r]*$"))
            .expect("section heading regex is valid")
    };
    vec![
        (
            CvSection::Summary,
            heading(r"(?:professional\s+)?summary|profile|objective|about\s+me"),
        ),
        (
            CvSection::Experience,
            heading(r"(?:work\s+|professional\s+)?experience|work\s+history|employment(?:\s+history)?"),
        ),
        (CvSection::Education, heading(r"education|academic\s+background")),
        (CvSection::Skills, heading(r"(?:technical\s+|key\s+)?skills|competencies")),
        (CvSection::Projects, heading(r"projects|portfolio")),
        (
            CvSection::Certifications,
            heading(r"certifications?|licenses?(?:\s+(?:&|and)\s+certifications?)?"),
        ),
    ]
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email regex is valid")
});

// Candidates stay on one line; `has_phone_number` then checks the digit count.
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+?\(?\d[\d \t().-]{7,}\d").expect("phone regex is valid")
});

/// International numbers carry 9 to 15 digits. Year ranges such as
/// "2018 - 2021" have 8 and are rejected.
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 9..=15;

static QUANTIFIED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[$€£]\s?\d[\d,.]*[kKmM]?|\d[\d,.]*\s?%|\b\d+[xX]\b|\b\d{2,}[\d,]*\+?\b")
        .expect("quantified regex is valid")
});

static ACTION_VERB_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    ACTION_VERBS
        .iter()
        .map(|verb| {
            let re = Regex::new(&format!(r"(?i)\b{verb}\b")).expect("verb regex is valid");
            (*verb, re)
        })
        .collect()
});

/// A section heading and the text under it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub section: CvSection,
    pub content: String,
    pub word_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordHit {
    pub keyword: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvAnalysis {
    pub score: u32, // 0 – 100
    pub word_count: usize,
    pub sections: Vec<ExtractedSection>,
    pub missing_sections: Vec<CvSection>,
    pub has_email: bool,
    pub has_phone: bool,
    pub action_verbs: Vec<KeywordHit>,
    pub quantified_achievements: usize,
    pub recommendations: Vec<String>,
}

/// Analyzes plain CV text. Total: any input, including empty text, yields a report.
pub fn analyze_cv(text: &str) -> CvAnalysis {
    let word_count = text.split_whitespace().count();
    let sections = extract_sections(text);

    let missing_sections: Vec<CvSection> = CORE_SECTIONS
        .iter()
        .filter(|core| !sections.iter().any(|s| s.section == **core))
        .copied()
        .collect();

    let has_email = EMAIL.is_match(text);
    let has_phone = has_phone_number(text);
    let action_verbs = count_action_verbs(text);
    let quantified_achievements = QUANTIFIED.find_iter(text).count();

    let section_points = (CORE_SECTIONS.len() - missing_sections.len()) as u32 * 10;
    let contact_points = u32::from(has_email) * 5 + u32::from(has_phone) * 5;
    let verb_points = (action_verbs.len() as u32 * 2).min(20);
    let quantified_points = (quantified_achievements as u32 * 3).min(15);
    let length_points = length_points(word_count);

    let score =
        (section_points + contact_points + verb_points + quantified_points + length_points).min(100);

    let recommendations = build_recommendations(
        &missing_sections,
        has_email,
        has_phone,
        action_verbs.len(),
        quantified_achievements,
        word_count,
    );

    CvAnalysis {
        score,
        word_count,
        sections,
        missing_sections,
        has_email,
        has_phone,
        action_verbs,
        quantified_achievements,
        recommendations,
    }
}

/// Splits the text at recognised headings. Text before the first heading is
/// dropped; a repeated heading yields a second entry.
pub fn extract_sections(text: &str) -> Vec<ExtractedSection> {
    let mut headings: Vec<(usize, usize, CvSection)> = SECTION_HEADINGS
        .iter()
        .flat_map(|(section, re)| re.find_iter(text).map(move |m| (m.start(), m.end(), *section)))
        .collect();
    headings.sort_by_key(|(start, _, _)| *start);

    headings
        .iter()
        .enumerate()
        .map(|(i, (_, end, section))| {
            let next_start = headings.get(i + 1).map_or(text.len(), |(s, _, _)| *s);
            let content = text[*end..next_start].trim().to_string();
            ExtractedSection {
                section: *section,
                word_count: content.split_whitespace().count(),
                content,
            }
        })
        .collect()
}

fn count_action_verbs(text: &str) -> Vec<KeywordHit> {
    ACTION_VERB_PATTERNS
        .iter()
        .filter_map(|(verb, re)| {
            let count = re.find_iter(text).count();
            (count > 0).then(|| KeywordHit {
                keyword: verb.to_string(),
                count,
            })
        })
        .collect()
}

fn has_phone_number(text: &str) -> bool {
    PHONE.find_iter(text).any(|m| {
        let digits = m.as_str().chars().filter(char::is_ascii_digit).count();
        PHONE_DIGITS.contains(&digits)
    })
}

fn length_points(word_count: usize) -> u32 {
    match word_count {
        0 => 0,
        250..=900 => 15,
        150..=249 | 901..=1200 => 8,
        _ => 3,
    }
}

fn build_recommendations(
    missing_sections: &[CvSection],
    has_email: bool,
    has_phone: bool,
    verb_count: usize,
    quantified: usize,
    word_count: usize,
) -> Vec<String> {
    let mut recommendations: Vec<String> = missing_sections
        .iter()
        .map(|s| format!("Add a clearly labelled {} section", section_label(*s)))
        .collect();

    if !has_email {
        recommendations.push("Include a professional email address".to_string());
    }
    if !has_phone {
        recommendations.push("Include a phone number recruiters can reach you on".to_string());
    }
    if verb_count < 5 {
        recommendations.push(
            "Start bullet points with strong action verbs such as led, built or delivered"
                .to_string(),
        );
    }
    if quantified < 3 {
        recommendations
            .push("Quantify achievements with numbers, percentages or amounts".to_string());
    }
    if word_count < 250 {
        recommendations.push("Expand your CV: under 250 words reads as thin".to_string());
    } else if word_count > 900 {
        recommendations.push("Tighten your CV: aim for at most two pages".to_string());
    }

    recommendations
}

fn section_label(section: CvSection) -> &'static str {
    match section {
        CvSection::Summary => "summary",
        CvSection::Experience => "experience",
        CvSection::Education => "education",
        CvSection::Skills => "skills",
        CvSection::Projects => "projects",
        CvSection::Certifications => "certifications",
    }
}
