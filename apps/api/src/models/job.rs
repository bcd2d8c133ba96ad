//! Normalized job listing shape shared by all provider adapters.
//!
//! `JobRecord` is ephemeral: constructed per search request, never persisted.
//! The id is provider-namespaced (`jsearch-…`, `remotive-…`) so merged lists
//! stay unique across sources.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobRecord {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<u32>,
    /// Upstream HTML stripped and truncated to a bounded length.
    pub description: String,
    pub url: String,
    /// ISO-8601 creation timestamp as reported by the provider.
    pub created: String,
    /// Category or employment type, provider-dependent.
    pub category: String,
    /// Which provider produced this record.
    pub source: String,
}

/// Result of one aggregated search: a page of records, the full deduplicated
/// count, and the providers that actually contributed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSearchResult {
    pub jobs: Vec<JobRecord>,
    pub total: usize,
    pub sources: Vec<String>,
}
