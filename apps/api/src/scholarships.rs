//! Scholarship directory — a read-only static catalog, paginated for
//! display. There is no upstream for this data; the catalog is hand
//! authored and served as-is.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scholarship {
    pub id: String,
    pub title: String,
    pub amount: String,
    pub deadline: String,
    pub description: String,
    pub eligibility: Vec<String>,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ScholarshipPage {
    pub scholarships: Vec<Scholarship>,
    pub total: usize,
    pub has_more: bool,
}

fn entry(
    id: &str,
    title: &str,
    amount: &str,
    deadline: &str,
    description: &str,
    eligibility: &[&str],
    url: &str,
) -> Scholarship {
    Scholarship {
        id: id.to_string(),
        title: title.to_string(),
        amount: amount.to_string(),
        deadline: deadline.to_string(),
        description: description.to_string(),
        eligibility: eligibility.iter().map(|e| e.to_string()).collect(),
        url: url.to_string(),
    }
}

fn catalog() -> Vec<Scholarship> {
    vec![
        entry(
            "s1",
            "Future Leaders in Technology Scholarship",
            "$5,000",
            "March 15, 2026",
            "Supports high-school seniors planning to study computer science, software \
             engineering, or a related technology field.",
            &[
                "High school senior",
                "Minimum 3.0 GPA",
                "Intended major in a technology field",
            ],
            "https://example.org/scholarships/future-leaders-tech",
        ),
        entry(
            "s2",
            "First-Generation College Student Grant",
            "$2,500",
            "April 1, 2026",
            "Awarded to students who are the first in their family to attend college.",
            &["First-generation college student", "Demonstrated financial need"],
            "https://example.org/scholarships/first-gen",
        ),
        entry(
            "s3",
            "Women in STEM Achievement Award",
            "$7,500",
            "February 28, 2026",
            "Recognizes young women pursuing degrees in science, technology, engineering, \
             or mathematics.",
            &["Identifies as female", "Enrolled or enrolling in a STEM program"],
            "https://example.org/scholarships/women-in-stem",
        ),
        entry(
            "s4",
            "Community Service Excellence Scholarship",
            "$3,000",
            "May 10, 2026",
            "For students with a strong record of volunteering and community leadership.",
            &["100+ documented volunteer hours", "One recommendation letter"],
            "https://example.org/scholarships/community-service",
        ),
        entry(
            "s5",
            "Creative Arts Portfolio Scholarship",
            "$4,000",
            "March 31, 2026",
            "Supports students pursuing visual arts, design, music, or creative writing, \
             judged on a submitted portfolio.",
            &["Portfolio submission required", "Intended major in the arts"],
            "https://example.org/scholarships/creative-arts",
        ),
        entry(
            "s6",
            "Rural Students Opportunity Fund",
            "$2,000",
            "April 20, 2026",
            "Helps students from rural communities cover first-year college expenses.",
            &["Resident of a rural community", "Entering first year of college"],
            "https://example.org/scholarships/rural-opportunity",
        ),
        entry(
            "s7",
            "Healthcare Heroes of Tomorrow Scholarship",
            "$6,000",
            "June 1, 2026",
            "For students entering nursing, pre-med, or allied health programs.",
            &["Intended major in a healthcare field", "Minimum 3.2 GPA"],
            "https://example.org/scholarships/healthcare-heroes",
        ),
        entry(
            "s8",
            "Trade and Technical Careers Grant",
            "$1,500",
            "Rolling",
            "Supports students entering skilled-trade apprenticeships or technical \
             certificate programs.",
            &["Enrolled in a trade or technical program"],
            "https://example.org/scholarships/trade-careers",
        ),
    ]
}

/// Returns one page of the catalog. `page` is 1-based.
pub fn get_scholarships(page: usize, per_page: usize) -> ScholarshipPage {
    let all = catalog();
    let total = all.len();
    let page = page.max(1);
    let start = (page - 1) * per_page;
    let scholarships: Vec<Scholarship> = all.into_iter().skip(start).take(per_page).collect();
    let has_more = start + scholarships.len() < total;
    ScholarshipPage {
        scholarships,
        total,
        has_more,
    }
}

fn default_page() -> usize {
    1
}

fn default_per_page() -> usize {
    6
}

#[derive(Debug, Deserialize)]
pub struct ScholarshipsQuery {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

/// GET /api/v1/scholarships
pub async fn handle_list_scholarships(
    State(_state): State<AppState>,
    Query(params): Query<ScholarshipsQuery>,
) -> Result<Json<ScholarshipPage>, AppError> {
    Ok(Json(get_scholarships(params.page, params.per_page)))
}
