//! Multi-source job search aggregation.
//!
//! Providers are consulted strictly in tier order — the authoritative
//! primary first, then (only on remote-work intent) the remote-only tier,
//! then free secondary providers — stopping as soon as any provider yields
//! at least one result. If everything comes up empty the synthetic `mock`
//! set keeps the response non-empty and well-formed. Merged results are
//! deduplicated by (title, company) in first-seen order and paginated in
//! pages of twenty.
//!
//! No error ever escapes `search`: adapters absorb their own failures, and
//! the worst case is the synthetic fallback.

pub mod handlers;
pub mod mock;
pub mod providers;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::info;

use crate::config::Config;
use crate::models::job::{JobRecord, JobSearchResult};
use providers::{FindworkProvider, JSearchProvider, JobProvider, ProviderTier, RemotiveProvider};

pub const PAGE_SIZE: usize = 20;

pub struct JobAggregator {
    providers: Vec<Arc<dyn JobProvider>>,
}

impl JobAggregator {
    pub fn from_config(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self::with_providers(vec![
            Arc::new(JSearchProvider::new(
                client.clone(),
                config.jsearch_api_key.clone(),
            )),
            Arc::new(RemotiveProvider::new(client.clone())),
            Arc::new(FindworkProvider::new(client)),
        ])
    }

    pub fn with_providers(providers: Vec<Arc<dyn JobProvider>>) -> Self {
        Self { providers }
    }

    /// Aggregated search. `page` is 1-based; `total` reports the full
    /// deduplicated count, invariant across pages of the same snapshot.
    pub async fn search(&self, query: &str, location: &str, page: usize) -> JobSearchResult {
        let mut jobs: Vec<JobRecord> = Vec::new();
        let mut sources: Vec<String> = Vec::new();
        let remote_intent = wants_remote(query, location);

        'tiers: for tier in [
            ProviderTier::Primary,
            ProviderTier::RemoteOnly,
            ProviderTier::Secondary,
        ] {
            if tier == ProviderTier::RemoteOnly && !remote_intent {
                continue;
            }
            for provider in self.providers.iter().filter(|p| p.tier() == tier) {
                let batch = provider.fetch(query, location).await;
                if !batch.is_empty() {
                    sources.push(provider.name().to_string());
                    jobs.extend(batch);
                    break 'tiers;
                }
            }
        }

        if jobs.is_empty() {
            jobs = mock::synthetic_jobs(query, location);
            sources.push(mock::MOCK_SOURCE.to_string());
        } else {
            info!(
                "Job search complete: {} jobs from {}",
                jobs.len(),
                sources.join(", ")
            );
        }

        let deduped = dedup_by_title_company(jobs);
        let total = deduped.len();
        let page = page.max(1);
        let start = (page - 1) * PAGE_SIZE;
        let paginated: Vec<JobRecord> = deduped.into_iter().skip(start).take(PAGE_SIZE).collect();

        JobSearchResult {
            jobs: paginated,
            total,
            sources,
        }
    }
}

fn wants_remote(query: &str, location: &str) -> bool {
    query.to_lowercase().contains("remote") || location.to_lowercase().contains("remote")
}

/// Removes records with an already-seen (title, company) pair, preserving
/// first-seen order.
fn dedup_by_title_company(jobs: Vec<JobRecord>) -> Vec<JobRecord> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    jobs.into_iter()
        .filter(|job| seen.insert((job.title.clone(), job.company.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FakeProvider {
        name: &'static str,
        tier: ProviderTier,
        jobs: Vec<JobRecord>,
        called: AtomicBool,
    }

    impl FakeProvider {
        fn new(name: &'static str, tier: ProviderTier, jobs: Vec<JobRecord>) -> Arc<Self> {
            Arc::new(Self {
                name,
                tier,
                jobs,
                called: AtomicBool::new(false),
            })
        }
    }

    #[async_trait]
    impl JobProvider for FakeProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        fn tier(&self) -> ProviderTier {
            self.tier
        }

        async fn fetch(&self, _query: &str, _location: &str) -> Vec<JobRecord> {
            self.called.store(true, Ordering::SeqCst);
            self.jobs.clone()
        }
    }

    fn job(id: &str, title: &str, company: &str) -> JobRecord {
        JobRecord {
            id: id.to_string(),
            title: title.to_string(),
            company: company.to_string(),
            location: "Denver, CO".to_string(),
            salary_min: None,
            salary_max: None,
            description: String::new(),
            url: String::new(),
            created: String::new(),
            category: "Full-time".to_string(),
            source: "fake".to_string(),
        }
    }

    fn many_jobs(n: usize) -> Vec<JobRecord> {
        (0..n)
            .map(|i| job(&format!("j{i}"), &format!("Role {i}"), "Acme"))
            .collect()
    }

    #[tokio::test]
    async fn test_primary_result_stops_the_cascade() {
        let primary = FakeProvider::new(
            "primary",
            ProviderTier::Primary,
            vec![job("p1", "Engineer", "Acme")],
        );
        let secondary = FakeProvider::new(
            "secondary",
            ProviderTier::Secondary,
            vec![job("s1", "Engineer", "Globex")],
        );
        let agg = JobAggregator::with_providers(vec![primary.clone(), secondary.clone()]);

        let result = agg.search("engineer", "Denver", 1).await;

        assert_eq!(result.sources, vec!["primary"]);
        assert_eq!(result.total, 1);
        assert!(!secondary.called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_empty_primary_falls_through_to_secondary() {
        let primary = FakeProvider::new("primary", ProviderTier::Primary, vec![]);
        let secondary = FakeProvider::new(
            "secondary",
            ProviderTier::Secondary,
            vec![job("s1", "Engineer", "Globex")],
        );
        let agg = JobAggregator::with_providers(vec![primary, secondary]);

        let result = agg.search("engineer", "Denver", 1).await;
        assert_eq!(result.sources, vec!["secondary"]);
    }

    #[tokio::test]
    async fn test_remote_tier_skipped_without_remote_intent() {
        let remote = FakeProvider::new(
            "remote",
            ProviderTier::RemoteOnly,
            vec![job("r1", "Engineer", "Distributed")],
        );
        let secondary = FakeProvider::new(
            "secondary",
            ProviderTier::Secondary,
            vec![job("s1", "Engineer", "Globex")],
        );
        let agg = JobAggregator::with_providers(vec![remote.clone(), secondary]);

        let result = agg.search("engineer", "Denver", 1).await;

        assert!(!remote.called.load(Ordering::SeqCst));
        assert_eq!(result.sources, vec!["secondary"]);
    }

    #[tokio::test]
    async fn test_remote_tier_consulted_on_remote_location() {
        let remote = FakeProvider::new(
            "remote",
            ProviderTier::RemoteOnly,
            vec![job("r1", "Engineer", "Distributed")],
        );
        let agg = JobAggregator::with_providers(vec![remote]);

        let result = agg.search("engineer", "Remote", 1).await;
        assert_eq!(result.sources, vec!["remote"]);
    }

    #[tokio::test]
    async fn test_all_providers_empty_yields_mock_fallback() {
        let primary = FakeProvider::new("primary", ProviderTier::Primary, vec![]);
        let secondary = FakeProvider::new("secondary", ProviderTier::Secondary, vec![]);
        let agg = JobAggregator::with_providers(vec![primary, secondary]);

        let result = agg.search("software", "Remote", 1).await;

        assert_eq!(result.sources, vec!["mock"]);
        assert!(!result.jobs.is_empty());
        assert!(result.jobs.len() <= PAGE_SIZE);
        assert!(result.jobs.iter().all(|j| j.source == "mock"));
    }

    #[tokio::test]
    async fn test_no_duplicate_title_company_pairs() {
        let primary = FakeProvider::new(
            "primary",
            ProviderTier::Primary,
            vec![
                job("a", "Engineer", "Acme"),
                job("b", "Engineer", "Acme"),
                job("c", "Engineer", "Globex"),
            ],
        );
        let agg = JobAggregator::with_providers(vec![primary]);

        let result = agg.search("engineer", "Denver", 1).await;

        assert_eq!(result.total, 2);
        let mut pairs: Vec<(String, String)> = result
            .jobs
            .iter()
            .map(|j| (j.title.clone(), j.company.clone()))
            .collect();
        pairs.dedup();
        assert_eq!(pairs.len(), result.jobs.len());
        // First-seen order preserved.
        assert_eq!(result.jobs[0].id, "a");
    }

    #[tokio::test]
    async fn test_pagination_slices_and_total_is_invariant() {
        let primary = FakeProvider::new("primary", ProviderTier::Primary, many_jobs(45));
        let agg = JobAggregator::with_providers(vec![primary]);

        let page1 = agg.search("role", "Denver", 1).await;
        let page2 = agg.search("role", "Denver", 2).await;
        let page3 = agg.search("role", "Denver", 3).await;

        assert_eq!(page1.jobs.len(), 20);
        assert_eq!(page2.jobs.len(), 20);
        assert_eq!(page3.jobs.len(), 5);
        assert_eq!(page1.total, 45);
        assert_eq!(page2.total, 45);
        assert_eq!(page3.total, 45);
        assert_eq!(page1.jobs[0].id, "j0");
        assert_eq!(page2.jobs[0].id, "j20");
    }

    #[tokio::test]
    async fn test_page_zero_is_clamped_to_first_page() {
        let primary = FakeProvider::new("primary", ProviderTier::Primary, many_jobs(5));
        let agg = JobAggregator::with_providers(vec![primary]);

        let result = agg.search("role", "Denver", 0).await;
        assert_eq!(result.jobs.len(), 5);
        assert_eq!(result.jobs[0].id, "j0");
    }
}
