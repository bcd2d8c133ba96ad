//! Upstream job-provider adapters.
//!
//! Each adapter is the only code aware of its provider's wire shape; the
//! rest of the system sees `JobRecord`. Adapters catch their own transport,
//! HTTP, and parse failures and degrade to an empty list — a provider
//! failure never propagates to the aggregator. Every call carries an
//! explicit timeout so one slow provider cannot stall a search; a timeout
//! is treated like any other failure.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::job::JobRecord;

const JSEARCH_API_URL: &str = "https://jsearch.p.rapidapi.com/search";
const REMOTIVE_API_URL: &str = "https://remotive.io/api/remote-jobs";
const FINDWORK_API_URL: &str = "https://findwork.dev/api/jobs/";

/// Per-provider request deadline. Aborts the in-flight call on expiry.
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);
/// Max records taken from any single provider response.
const MAX_PER_PROVIDER: usize = 10;
/// Descriptions are truncated to this many characters after HTML stripping.
const DESCRIPTION_LIMIT: usize = 300;

/// Where a provider sits in the aggregator's consultation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderTier {
    /// Authoritative, always tried first.
    Primary,
    /// Location-insensitive; only consulted on remote-work intent.
    RemoteOnly,
    /// Free fallback, consulted when everything above came up empty.
    Secondary,
}

#[async_trait]
pub trait JobProvider: Send + Sync {
    fn name(&self) -> &'static str;
    fn tier(&self) -> ProviderTier;
    /// Fetches and normalizes listings. Infallible by contract: adapters
    /// absorb their own failures and return an empty list.
    async fn fetch(&self, query: &str, location: &str) -> Vec<JobRecord>;
}

#[derive(Debug, Error)]
enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("status {0}")]
    Status(u16),
}

// ────────────────────────────────────────────────────────────────────────────
// Shared normalization helpers
// ────────────────────────────────────────────────────────────────────────────

fn strip_html(text: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid HTML tag pattern"));
    tag.replace_all(text, "").into_owned()
}

/// Strips upstream HTML and truncates on a char boundary.
pub(crate) fn clean_description(raw: &str) -> String {
    let text = strip_html(raw);
    if text.chars().count() <= DESCRIPTION_LIMIT {
        return text;
    }
    let truncated: String = text.chars().take(DESCRIPTION_LIMIT).collect();
    format!("{truncated}...")
}

fn join_location(city: Option<&str>, state: Option<&str>, country: Option<&str>) -> String {
    let city = city.unwrap_or("").trim();
    let region = state.filter(|s| !s.trim().is_empty()).or(country);
    let region = region.unwrap_or("").trim();
    match (city.is_empty(), region.is_empty()) {
        (true, true) => String::new(),
        (true, false) => region.to_string(),
        (false, true) => city.to_string(),
        (false, false) => format!("{city}, {region}"),
    }
}

fn now_iso() -> String {
    Utc::now().to_rfc3339()
}

// ────────────────────────────────────────────────────────────────────────────
// JSearch (RapidAPI) — primary, authoritative, key required
// ────────────────────────────────────────────────────────────────────────────

pub struct JSearchProvider {
    client: Client,
    api_key: Option<String>,
}

impl JSearchProvider {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    async fn try_fetch(
        &self,
        key: &str,
        query: &str,
        location: &str,
    ) -> Result<Vec<JobRecord>, ProviderError> {
        let response = self
            .client
            .get(JSEARCH_API_URL)
            .query(&[
                ("query", format!("{query} in {location}").as_str()),
                ("page", "1"),
                ("num_pages", "1"),
                ("country", "us"),
                ("date_posted", "all"),
            ])
            .header("x-rapidapi-key", key)
            .header("x-rapidapi-host", "jsearch.p.rapidapi.com")
            .timeout(PROVIDER_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body: JSearchResponse = response.json().await?;
        Ok(body
            .data
            .into_iter()
            .take(MAX_PER_PROVIDER)
            .map(normalize_jsearch)
            .collect())
    }
}

#[async_trait]
impl JobProvider for JSearchProvider {
    fn name(&self) -> &'static str {
        "jsearch"
    }

    fn tier(&self) -> ProviderTier {
        ProviderTier::Primary
    }

    async fn fetch(&self, query: &str, location: &str) -> Vec<JobRecord> {
        let Some(key) = self.api_key.clone() else {
            debug!("JSearch disabled: no API key configured");
            return vec![];
        };
        match self.try_fetch(&key, query, location).await {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!("JSearch provider failed: {e}");
                vec![]
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct JSearchResponse {
    #[serde(default)]
    data: Vec<JSearchJob>,
}

#[derive(Debug, Deserialize)]
struct JSearchJob {
    job_id: Option<String>,
    job_title: Option<String>,
    employer_name: Option<String>,
    job_city: Option<String>,
    job_state: Option<String>,
    job_country: Option<String>,
    job_min_salary: Option<f64>,
    job_max_salary: Option<f64>,
    job_description: Option<String>,
    job_apply_link: Option<String>,
    job_url: Option<String>,
    job_posted_at_datetime_utc: Option<String>,
    job_employment_type: Option<String>,
}

fn normalize_jsearch(job: JSearchJob) -> JobRecord {
    JobRecord {
        id: format!("jsearch-{}", job.job_id.unwrap_or_default()),
        title: job.job_title.unwrap_or_default(),
        company: job.employer_name.unwrap_or_default(),
        location: join_location(
            job.job_city.as_deref(),
            job.job_state.as_deref(),
            job.job_country.as_deref(),
        ),
        salary_min: job.job_min_salary.map(|v| v as u32),
        salary_max: job.job_max_salary.map(|v| v as u32),
        description: job
            .job_description
            .as_deref()
            .map(clean_description)
            .unwrap_or_else(|| "No description available".to_string()),
        url: job
            .job_apply_link
            .or(job.job_url)
            .unwrap_or_else(|| "#".to_string()),
        created: job.job_posted_at_datetime_utc.unwrap_or_else(now_iso),
        category: job
            .job_employment_type
            .unwrap_or_else(|| "Full-time".to_string()),
        source: "jsearch".to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Remotive — free, remote listings only
// ────────────────────────────────────────────────────────────────────────────

pub struct RemotiveProvider {
    client: Client,
}

impl RemotiveProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn try_fetch(&self, query: &str) -> Result<Vec<JobRecord>, ProviderError> {
        let response = self
            .client
            .get(REMOTIVE_API_URL)
            .query(&[("search", query), ("limit", "10")])
            .timeout(PROVIDER_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body: RemotiveResponse = response.json().await?;
        Ok(body
            .jobs
            .into_iter()
            .take(MAX_PER_PROVIDER)
            .map(normalize_remotive)
            .collect())
    }
}

#[async_trait]
impl JobProvider for RemotiveProvider {
    fn name(&self) -> &'static str {
        "remotive"
    }

    fn tier(&self) -> ProviderTier {
        ProviderTier::RemoteOnly
    }

    async fn fetch(&self, query: &str, _location: &str) -> Vec<JobRecord> {
        match self.try_fetch(query).await {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!("Remotive provider failed: {e}");
                vec![]
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RemotiveResponse {
    #[serde(default)]
    jobs: Vec<RemotiveJob>,
}

#[derive(Debug, Deserialize)]
struct RemotiveJob {
    id: Option<i64>,
    title: Option<String>,
    company_name: Option<String>,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
    description: Option<String>,
    url: Option<String>,
    publication_date: Option<String>,
    category: Option<String>,
}

fn normalize_remotive(job: RemotiveJob) -> JobRecord {
    JobRecord {
        id: format!("remotive-{}", job.id.unwrap_or_default()),
        title: job.title.unwrap_or_default(),
        company: job.company_name.unwrap_or_default(),
        location: "Remote".to_string(),
        salary_min: job.salary_min.map(|v| v as u32),
        salary_max: job.salary_max.map(|v| v as u32),
        description: job
            .description
            .as_deref()
            .map(clean_description)
            .unwrap_or_default(),
        url: job.url.unwrap_or_default(),
        created: job.publication_date.unwrap_or_else(now_iso),
        category: job.category.unwrap_or_default(),
        source: "remotive".to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Findwork — free, last-resort fallback
// ────────────────────────────────────────────────────────────────────────────

pub struct FindworkProvider {
    client: Client,
}

impl FindworkProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn try_fetch(
        &self,
        query: &str,
        location: &str,
    ) -> Result<Vec<JobRecord>, ProviderError> {
        let response = self
            .client
            .get(FINDWORK_API_URL)
            .query(&[
                ("search", query),
                ("location", location),
                ("source", "indeed,stackoverflow"),
                ("sort_by", "date"),
            ])
            .timeout(PROVIDER_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body: FindworkResponse = response.json().await?;
        Ok(body
            .results
            .into_iter()
            .take(MAX_PER_PROVIDER)
            .map(normalize_findwork)
            .collect())
    }
}

#[async_trait]
impl JobProvider for FindworkProvider {
    fn name(&self) -> &'static str {
        "findwork"
    }

    fn tier(&self) -> ProviderTier {
        ProviderTier::Secondary
    }

    async fn fetch(&self, query: &str, location: &str) -> Vec<JobRecord> {
        match self.try_fetch(query, location).await {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!("Findwork provider failed: {e}");
                vec![]
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct FindworkResponse {
    #[serde(default)]
    results: Vec<FindworkJob>,
}

#[derive(Debug, Deserialize)]
struct FindworkJob {
    id: Option<i64>,
    role: Option<String>,
    company_name: Option<String>,
    location: Option<String>,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
    text: Option<String>,
    url: Option<String>,
    date_posted: Option<String>,
    employment_type: Option<String>,
}

fn normalize_findwork(job: FindworkJob) -> JobRecord {
    JobRecord {
        id: format!("findwork-{}", job.id.unwrap_or_default()),
        title: job.role.unwrap_or_default(),
        company: job.company_name.unwrap_or_default(),
        location: job.location.unwrap_or_default(),
        salary_min: job.salary_min.map(|v| v as u32),
        salary_max: job.salary_max.map(|v| v as u32),
        description: job.text.as_deref().map(clean_description).unwrap_or_default(),
        url: job.url.unwrap_or_default(),
        created: job.date_posted.unwrap_or_else(now_iso),
        category: job
            .employment_type
            .unwrap_or_else(|| "General".to_string()),
        source: "findwork".to_string(),
    }
}
