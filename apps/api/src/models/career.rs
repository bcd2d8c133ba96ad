//! Career and assessment data models.
//!
//! `AssessmentAnswers` mirrors the two assessment variants: the short form
//! (five required categories) and the comprehensive form, which adds an
//! optional extended set. Answers are immutable once submitted — a retake
//! replaces the whole set, there are no merge semantics.

use serde::{Deserialize, Serialize};

/// Self-reported answers, keyed by question category.
///
/// Every category that is present must be non-empty at submission time;
/// the extended categories are optional and only appear for the
/// comprehensive assessment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentAnswers {
    pub interests: Vec<String>,
    pub skills: Vec<String>,
    pub work_style: Vec<String>,
    pub values: Vec<String>,
    pub subjects: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aptitudes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_environment: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_making: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_sources: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_response: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_style: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_pace: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_relationships: Option<Vec<String>>,
}

impl AssessmentAnswers {
    /// Validates a submitted answer set: every category present must map to
    /// at least one selected option. Returns the first offending category.
    pub fn validate(&self) -> Result<(), String> {
        let required: [(&str, &[String]); 5] = [
            ("interests", &self.interests),
            ("skills", &self.skills),
            ("workStyle", &self.work_style),
            ("values", &self.values),
            ("subjects", &self.subjects),
        ];
        for (name, options) in required {
            if options.is_empty() {
                return Err(format!("Category '{name}' has no selected options"));
            }
        }

        let extended: [(&str, &Option<Vec<String>>); 10] = [
            ("aptitudes", &self.aptitudes),
            ("workValues", &self.work_values),
            ("workEnvironment", &self.work_environment),
            ("decisionMaking", &self.decision_making),
            ("energySources", &self.energy_sources),
            ("stressResponse", &self.stress_response),
            ("learningStyle", &self.learning_style),
            ("workPace", &self.work_pace),
            ("impact", &self.impact),
            ("workRelationships", &self.work_relationships),
        ];
        for (name, options) in extended {
            if let Some(options) = options {
                if options.is_empty() {
                    return Err(format!("Category '{name}' has no selected options"));
                }
            }
        }

        Ok(())
    }
}

/// A single candidate career produced by the generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Career {
    pub name: String,
    /// Match score, 0–100, higher is better. The generator occasionally
    /// emits fractional scores; any JSON number is accepted and
    /// rounded/clamped into range.
    #[serde(rename = "match", deserialize_with = "deserialize_match_score")]
    pub match_score: u8,
    pub category: String,
    pub description: String,
    pub salary: String,
    pub growth: String,
    pub education: String,
    #[serde(
        rename = "isFavorite",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_favorite: Option<bool>,
}

fn deserialize_match_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

/// Everything persisted per user: the submitted answers plus the ranked
/// career list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub answers: AssessmentAnswers,
    pub careers: Vec<Career>,
}

/// Sorts careers by descending match score. Ties keep their relative order
/// (stable sort).
pub fn sort_by_match(careers: &mut [Career]) {
    careers.sort_by(|a, b| b.match_score.cmp(&a.match_score));
}

/// Looks up a career by name: exact match first, then case-insensitive,
/// then bidirectional substring. The substring tier is known to be fuzzy
/// when stored names overlap ("Designer" vs "UX Designer") — first match
/// in list order wins.
pub fn find_career<'a>(careers: &'a [Career], name: &str) -> Option<&'a Career> {
    careers
        .iter()
        .find(|c| c.name == name)
        .or_else(|| careers.iter().find(|c| c.name.eq_ignore_ascii_case(name)))
        .or_else(|| {
            careers
                .iter()
                .find(|c| c.name.contains(name) || name.contains(&c.name))
        })
}
