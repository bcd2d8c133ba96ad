//! Career content generation — ranked matches, roadmaps, and overviews.
//!
//! Every operation follows the same shape: build a prompt embedding the
//! caller's structured data, call the generative endpoint through the
//! `TextGenerator` seam, extract the first balanced JSON value from the raw
//! text, and parse it. What happens on failure differs per operation:
//!
//! - `generate_career_matches` degrades to the static fallback catalog and
//!   never returns an empty list.
//! - `generate_additional_career_matches` propagates the error so the
//!   "load more" caller can tell "upstream failed" from "nothing new".
//! - roadmap/overview degrade to fixed templates.
//!
//! Match generation is memoized in a TTL cache keyed by a fingerprint of
//! the full input set (operation discriminator included).

pub mod fallback;
pub mod handlers;
pub mod prompts;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cache::{fingerprint, TtlCache};
use crate::gemini::extract::{extract_json_array, extract_json_object};
use crate::gemini::{GeminiError, TextGenerator};
use crate::models::career::{AssessmentAnswers, Career};

/// Phased plan for reaching a career.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Roadmap {
    pub phases: Vec<RoadmapPhase>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoadmapPhase {
    pub title: String,
    pub timeframe: String,
    pub steps: Vec<String>,
}

/// Cache key per operation. The enum variant is the operation discriminator:
/// two calls are cache-equivalent iff the variant and every input value are
/// structurally equal.
#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum CacheKey<'a> {
    Matches {
        answers: &'a AssessmentAnswers,
        count: usize,
    },
    AdditionalMatches {
        answers: &'a AssessmentAnswers,
        exclude: &'a [String],
        count: usize,
    },
}

pub struct CareerGenerator {
    llm: Arc<dyn TextGenerator>,
    cache: TtlCache,
}

impl CareerGenerator {
    pub fn new(llm: Arc<dyn TextGenerator>, cache: TtlCache) -> Self {
        Self { llm, cache }
    }

    /// Ranked career matches for a submitted assessment. Never empty: a
    /// failed call or an empty parse substitutes the fallback catalog.
    pub async fn generate_career_matches(
        &self,
        answers: &AssessmentAnswers,
        count: usize,
    ) -> Vec<Career> {
        let key = fingerprint(&CacheKey::Matches { answers, count });
        if let Some(cached) = self.cache.get::<Vec<Career>>(&key) {
            info!("Using cached career matches");
            return cached;
        }

        let prompt = matches_prompt(answers, count);
        let careers = match self.llm.generate(&prompt).await {
            Ok(text) => match parse_career_list(&text) {
                Ok(careers) if careers.is_empty() => fallback::fallback_careers(),
                Ok(careers) => careers,
                Err(e) => {
                    warn!("Career matches response unparseable, using fallback catalog: {e}");
                    return fallback::fallback_careers();
                }
            },
            Err(e) => {
                warn!("Career matches call failed, using fallback catalog: {e}");
                return fallback::fallback_careers();
            }
        };

        self.cache.insert(key, &careers);
        careers
    }

    /// Additional matches biased away from `exclude`. Unlike the other
    /// operations this one has no fallback: any failure propagates so the
    /// caller can leave the existing list untouched and surface an error.
    pub async fn generate_additional_career_matches(
        &self,
        answers: &AssessmentAnswers,
        exclude: &[String],
        count: usize,
    ) -> Result<Vec<Career>, GeminiError> {
        let key = fingerprint(&CacheKey::AdditionalMatches {
            answers,
            exclude,
            count,
        });
        if let Some(cached) = self.cache.get::<Vec<Career>>(&key) {
            info!("Using cached additional career matches");
            return Ok(cached);
        }

        let prompt = additional_prompt(answers, exclude, count);
        let text = self.llm.generate(&prompt).await?;
        let careers = parse_career_list(&text)?;
        info!("Generated {} additional career matches", careers.len());

        self.cache.insert(key, &careers);
        Ok(careers)
    }

    /// Phased roadmap for one career. Not cached; degrades to a generic
    /// three-phase template.
    pub async fn generate_career_roadmap(&self, career_name: &str) -> Roadmap {
        let prompt = prompts::ROADMAP_PROMPT.replace("{career_name}", career_name);
        match self.llm.generate(&prompt).await {
            Ok(text) => match extract_json_object(&text)
                .ok_or(GeminiError::MissingJson)
                .and_then(|json| serde_json::from_str::<Roadmap>(json).map_err(GeminiError::Parse))
            {
                Ok(roadmap) => roadmap,
                Err(e) => {
                    warn!("Roadmap response unparseable for '{career_name}', using template: {e}");
                    fallback::fallback_roadmap()
                }
            },
            Err(e) => {
                warn!("Roadmap call failed for '{career_name}', using template: {e}");
                fallback::fallback_roadmap()
            }
        }
    }

    /// Plain-text overview of one career. Not cached; degrades to a generic
    /// three-paragraph template.
    pub async fn generate_career_overview(&self, career_name: &str) -> String {
        let prompt = prompts::OVERVIEW_PROMPT.replace("{career_name}", career_name);
        match self.llm.generate(&prompt).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!("Overview call failed for '{career_name}', using template: {e}");
                fallback::fallback_overview(career_name)
            }
        }
    }
}

fn matches_prompt(answers: &AssessmentAnswers, count: usize) -> String {
    let answers_json = serde_json::to_string(answers).unwrap_or_default();
    prompts::CAREER_MATCHES_PROMPT
        .replace("{answers_json}", &answers_json)
        .replace("{count}", &count.to_string())
}

fn additional_prompt(answers: &AssessmentAnswers, exclude: &[String], count: usize) -> String {
    let answers_json = serde_json::to_string(answers).unwrap_or_default();
    prompts::ADDITIONAL_MATCHES_PROMPT
        .replace("{answers_json}", &answers_json)
        .replace("{exclude}", &exclude.join(", "))
        .replace("{count}", &count.to_string())
}

fn parse_career_list(text: &str) -> Result<Vec<Career>, GeminiError> {
    let json = extract_json_array(text).ok_or(GeminiError::MissingJson)?;
    serde_json::from_str(json).map_err(GeminiError::Parse)
}
