// Prompt templates for the career generator. Placeholders are substituted
// with `str::replace` before sending; the literal JSON shapes double as
// few-shot guidance for the low-temperature decoder.

/// Ranked career matches. Replace `{answers_json}` and `{count}`.
pub const CAREER_MATCHES_PROMPT: &str = r#"Assessment: {answers_json}

Generate {count} career matches. Return JSON only:
[{"name":"Career","match":85,"category":"Tech","description":"Brief desc","salary":"$60K-$90K","growth":"5%","education":"Bachelor's"}]"#;

/// Additional matches biased away from careers the user already has.
/// Replace `{answers_json}`, `{exclude}` and `{count}`.
pub const ADDITIONAL_MATCHES_PROMPT: &str = r#"Assessment: {answers_json}
Avoid: {exclude}

Generate {count} different careers. JSON only:
[{"name":"Career","match":75,"category":"Field","description":"Brief","salary":"$50K-$80K","growth":"3%","education":"Degree"}]"#;

/// Phased roadmap for a single career. Replace `{career_name}`.
pub const ROADMAP_PROMPT: &str = r#"Create a detailed career roadmap for: {career_name}

Return ONLY a valid JSON object with this structure:
{
  "phases": [
    {
      "title": "Phase Name",
      "timeframe": "Time period",
      "steps": ["Step 1", "Step 2", "Step 3"]
    }
  ]
}

No other text or explanation."#;

/// Free-text overview of a single career. Replace `{career_name}`.
pub const OVERVIEW_PROMPT: &str = r#"Write a comprehensive 3-paragraph overview of the career: {career_name}

Include:
- What the job entails day-to-day
- Skills and qualities needed
- Future outlook and opportunities

Write in a professional, informative tone. Do not include any formatting or markdown."#;
