//! Synthetic job listings, used when every real provider fails or returns
//! empty. The shape is deterministic (always well-formed `JobRecord`s,
//! always non-empty) while the content is randomized; everything is tagged
//! with the `mock` source so callers can tell synthetic data apart.

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::job::JobRecord;

pub const MOCK_SOURCE: &str = "mock";

const COMPANIES: [&str; 16] = [
    "Google",
    "Microsoft",
    "Apple",
    "Amazon",
    "Meta",
    "Netflix",
    "Tesla",
    "Spotify",
    "Airbnb",
    "Uber",
    "Twitter",
    "LinkedIn",
    "Salesforce",
    "Adobe",
    "Intel",
    "IBM",
];

const TITLE_POOLS: [(&str, [&str; 5]); 5] = [
    (
        "software",
        [
            "Software Engineer",
            "Senior Software Developer",
            "Full Stack Developer",
            "Backend Engineer",
            "Frontend Developer",
        ],
    ),
    (
        "data",
        [
            "Data Scientist",
            "Data Analyst",
            "Machine Learning Engineer",
            "Data Engineer",
            "Business Intelligence Analyst",
        ],
    ),
    (
        "design",
        [
            "UX Designer",
            "UI Designer",
            "Product Designer",
            "Visual Designer",
            "Design Manager",
        ],
    ),
    (
        "marketing",
        [
            "Marketing Manager",
            "Digital Marketing Specialist",
            "Content Marketing Manager",
            "SEO Specialist",
            "Brand Manager",
        ],
    ),
    (
        "project",
        [
            "Project Manager",
            "Product Manager",
            "Scrum Master",
            "Program Manager",
            "Operations Manager",
        ],
    ),
];

const DEFAULT_TITLES: [&str; 3] = [
    "Software Engineer",
    "Product Manager",
    "Marketing Specialist",
];

fn sample_catalog() -> Vec<JobRecord> {
    let entry = |id: &str,
                 title: &str,
                 company: &str,
                 location: &str,
                 salary_min: u32,
                 salary_max: u32,
                 description: &str,
                 url: &str,
                 category: &str| JobRecord {
        id: id.to_string(),
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        salary_min: Some(salary_min),
        salary_max: Some(salary_max),
        description: description.to_string(),
        url: url.to_string(),
        created: Utc::now().to_rfc3339(),
        category: category.to_string(),
        source: MOCK_SOURCE.to_string(),
    };

    vec![
        entry(
            "sample-1",
            "Software Developer",
            "Tech Corp",
            "New York, NY",
            80_000,
            120_000,
            "We are looking for a talented software developer to join our team. You will be \
             responsible for developing and maintaining web applications using modern technologies.",
            "https://example.com/job/1",
            "Technology",
        ),
        entry(
            "sample-2",
            "Frontend Developer",
            "StartupTech",
            "San Francisco, CA",
            75_000,
            105_000,
            "Join our team to build amazing user interfaces using React, TypeScript, and modern \
             web technologies. Experience with responsive design and accessibility required.",
            "https://example.com/frontend-dev",
            "Technology",
        ),
        entry(
            "sample-3",
            "UX/UI Designer",
            "Design Hub",
            "Los Angeles, CA",
            65_000,
            85_000,
            "Create beautiful and functional user experiences for web and mobile applications. \
             Proficiency in Figma, Adobe Creative Suite, and user research methodologies required.",
            "https://example.com/ux-designer",
            "Design",
        ),
        entry(
            "sample-4",
            "Data Scientist",
            "DataCorp",
            "Austin, TX",
            85_000,
            125_000,
            "Work with machine learning models and big data to derive business insights. \
             Experience with Python, SQL, and statistical analysis required.",
            "https://example.com/data-scientist",
            "Analytics",
        ),
        entry(
            "sample-5",
            "Product Manager",
            "Innovation Inc",
            "Seattle, WA",
            90_000,
            130_000,
            "Lead product development from conception to launch. Work closely with engineering, \
             design, and marketing teams to deliver exceptional user experiences.",
            "https://example.com/product-manager",
            "Management",
        ),
        entry(
            "sample-6",
            "Marketing Specialist",
            "Growth Agency",
            "Chicago, IL",
            55_000,
            75_000,
            "Develop and execute marketing campaigns across digital channels. Experience with \
             content marketing, social media, and analytics tools preferred.",
            "https://example.com/marketing-specialist",
            "Marketing",
        ),
    ]
}

fn relevant_titles(query: &str) -> &'static [&'static str] {
    let query = query.to_lowercase();
    for (keyword, titles) in &TITLE_POOLS {
        if query.contains(keyword) {
            return titles;
        }
    }
    &DEFAULT_TITLES
}

fn generated_jobs(query: &str, location: &str) -> Vec<JobRecord> {
    let titles = relevant_titles(query);
    let mut rng = rand::thread_rng();
    let location = if location.is_empty() {
        "Remote"
    } else {
        location
    };

    (0..8)
        .map(|i| {
            let company = *COMPANIES.choose(&mut rng).unwrap_or(&COMPANIES[0]);
            let title = *titles.choose(&mut rng).unwrap_or(&titles[0]);
            let salary_min = 60_000 + rng.gen_range(0..40_000);
            let salary_max = salary_min + 30_000 + rng.gen_range(0..50_000);
            let days_old = rng.gen_range(0..7);
            let category = if rng.gen_bool(0.7) {
                "Full-time"
            } else {
                "Contract"
            };

            JobRecord {
                id: format!("generated-{i}"),
                title: title.to_string(),
                company: company.to_string(),
                location: location.to_string(),
                salary_min: Some(salary_min),
                salary_max: Some(salary_max),
                description: format!(
                    "Join {company} as a {title}. We're looking for talented individuals to help \
                     drive innovation and growth in our dynamic team environment."
                ),
                url: format!(
                    "https://careers.{}.com/jobs/{}",
                    company.to_lowercase().replace(' ', ""),
                    title.to_lowercase().replace(' ', "-")
                ),
                created: (Utc::now() - Duration::days(days_old)).to_rfc3339(),
                category: category.to_string(),
                source: MOCK_SOURCE.to_string(),
            }
        })
        .collect()
}

/// Builds the synthetic result set: catalog entries filtered by the query,
/// plus randomized generated listings. Always non-empty.
pub fn synthetic_jobs(query: &str, location: &str) -> Vec<JobRecord> {
    let needle = query.to_lowercase();
    let mut jobs: Vec<JobRecord> = sample_catalog()
        .into_iter()
        .filter(|job| {
            needle.is_empty()
                || job.title.to_lowercase().contains(&needle)
                || job.category.to_lowercase().contains(&needle)
                || job.description.to_lowercase().contains(&needle)
                || job.company.to_lowercase().contains(&needle)
        })
        .map(|mut job| {
            if !location.is_empty() {
                job.location = location.to_string();
            }
            job
        })
        .collect();

    jobs.extend(generated_jobs(query, location));
    jobs
}
