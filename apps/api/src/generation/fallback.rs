//! Static fallback content returned when a live generation fails.
//!
//! The guiding rule is "never show the user a broken page because a third
//! party is down": a failed matches call degrades to this catalog, a failed
//! roadmap/overview call degrades to a generic template.

use crate::generation::{Roadmap, RoadmapPhase};
use crate::models::career::Career;

fn catalog_entry(
    name: &str,
    match_score: u8,
    category: &str,
    description: &str,
    salary: &str,
    growth: &str,
) -> Career {
    Career {
        name: name.to_string(),
        match_score,
        category: category.to_string(),
        description: description.to_string(),
        salary: salary.to_string(),
        growth: growth.to_string(),
        education: "Bachelor's degree".to_string(),
        is_favorite: None,
    }
}

/// The five-entry fallback catalog, already in descending match order.
pub fn fallback_careers() -> Vec<Career> {
    vec![
        catalog_entry(
            "Software Developer",
            95,
            "Technology",
            "Design and develop software applications.",
            "$70,000-$120,000",
            "22% (Much faster than average)",
        ),
        catalog_entry(
            "Data Scientist",
            88,
            "Analytics",
            "Analyze complex data for business decisions.",
            "$80,000-$130,000",
            "35% (Much faster than average)",
        ),
        catalog_entry(
            "UX Designer",
            82,
            "Design",
            "Create user-friendly interfaces.",
            "$60,000-$100,000",
            "13% (Faster than average)",
        ),
        catalog_entry(
            "Marketing Specialist",
            78,
            "Marketing",
            "Develop marketing campaigns.",
            "$45,000-$75,000",
            "10% (Faster than average)",
        ),
        catalog_entry(
            "Project Manager",
            75,
            "Management",
            "Manage projects and teams.",
            "$65,000-$110,000",
            "7% (As fast as average)",
        ),
    ]
}

/// Generic three-phase roadmap used when the live call fails.
pub fn fallback_roadmap() -> Roadmap {
    let phase = |title: &str, timeframe: &str, steps: &[&str]| RoadmapPhase {
        title: title.to_string(),
        timeframe: timeframe.to_string(),
        steps: steps.iter().map(|s| s.to_string()).collect(),
    };

    Roadmap {
        phases: vec![
            phase(
                "Getting Started",
                "0-6 months",
                &[
                    "Research the field and requirements",
                    "Identify key skills needed",
                    "Begin foundational learning",
                    "Connect with professionals in the field",
                ],
            ),
            phase(
                "Skill Development",
                "6-18 months",
                &[
                    "Complete relevant courses or certifications",
                    "Build a portfolio of projects",
                    "Gain practical experience through internships",
                    "Develop both technical and soft skills",
                ],
            ),
            phase(
                "Career Launch",
                "18+ months",
                &[
                    "Apply for entry-level positions",
                    "Network within the industry",
                    "Continue learning and staying updated",
                    "Seek mentorship and career guidance",
                ],
            ),
        ],
    }
}

/// Generic three-paragraph overview with the career name interpolated.
pub fn fallback_overview(career_name: &str) -> String {
    format!(
        "{career_name} is a dynamic and evolving career field that offers numerous opportunities \
for professional growth and development. This role typically involves working with cutting-edge \
technologies and methodologies to solve complex problems and deliver innovative solutions.\n\n\
Professionals in this field need a combination of technical expertise, analytical thinking, and \
strong communication skills. The ability to adapt to changing technologies and continuous \
learning are essential qualities for success. Collaboration with cross-functional teams and \
stakeholders is often a key component of the role.\n\n\
The future outlook for {career_name} remains positive, with growing demand across various \
industries. As organizations continue to embrace digital transformation and innovation, \
opportunities in this field are expected to expand significantly. Career advancement often \
includes roles in leadership, specialization, or entrepreneurship."
    )
}
