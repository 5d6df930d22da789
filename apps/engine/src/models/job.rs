use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Description text kept per posting. Scraped pages can be arbitrarily long;
/// everything past the cap adds noise, not signal.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Skills listed per posting when derived from description text.
pub const MAX_SKILLS_LISTED: usize = 15;

/// Seniority band detected from posting text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "Entry Level")]
    EntryLevel,
    #[serde(rename = "Mid Level")]
    MidLevel,
    Senior,
    Management,
    #[default]
    #[serde(rename = "Not Specified")]
    NotSpecified,
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExperienceLevel::EntryLevel => "Entry Level",
            ExperienceLevel::MidLevel => "Mid Level",
            ExperienceLevel::Senior => "Senior",
            ExperienceLevel::Management => "Management",
            ExperienceLevel::NotSpecified => "Not Specified",
        };
        f.write_str(s)
    }
}

/// A scraped or manually submitted job posting.
///
/// `category`, `employer_score`, and `is_verified` arrive defaulted from the
/// scraping collaborator and are filled by the classifier and the (external)
/// employer verifier respectively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPosting {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub skills_required: Vec<String>,
    pub experience_level: ExperienceLevel,
    pub category: String,
    /// Exact-duplicate key: pure function of normalized title/company/location.
    pub content_hash: String,
    pub application_link: String,
    pub source_url: String,
    pub employer_score: f64,
    pub is_verified: bool,
    pub scraped_at: DateTime<Utc>,
}

impl Default for JobPosting {
    fn default() -> Self {
        JobPosting {
            id: Uuid::new_v4(),
            title: String::new(),
            company: String::new(),
            location: String::new(),
            description: String::new(),
            skills_required: Vec::new(),
            experience_level: ExperienceLevel::NotSpecified,
            category: "Other".to_string(),
            content_hash: String::new(),
            application_link: String::new(),
            source_url: String::new(),
            employer_score: 0.0,
            is_verified: false,
            scraped_at: Utc::now(),
        }
    }
}

impl JobPosting {
    /// Returns the stored content hash, computing it from the normalized
    /// title/company/location triple when the record arrived without one.
    pub fn content_hash(&self) -> String {
        if self.content_hash.is_empty() {
            compute_hash(&self.title, &self.company, &self.location)
        } else {
            self.content_hash.clone()
        }
    }

    /// Truncates the description to [`MAX_DESCRIPTION_LEN`] characters,
    /// respecting char boundaries.
    pub fn cap_description(&mut self) {
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            self.description = self.description.chars().take(MAX_DESCRIPTION_LEN).collect();
        }
    }
}

/// Deterministic exact-duplicate key over the normalized posting identity.
/// Two postings with the same lower-cased, trimmed (title, company, location)
/// always collide, by design.
pub fn compute_hash(title: &str, company: &str, location: &str) -> String {
    let raw = format!(
        "{}|{}|{}",
        title.trim().to_lowercase(),
        company.trim().to_lowercase(),
        location.trim().to_lowercase()
    );
    hex::encode(Sha256::digest(raw.as_bytes()))
}

/// Keyword heuristic over posting text. Order matters: explicit entry/senior
/// wording beats the generic year-count buckets.
pub fn detect_experience_level(text: &str) -> ExperienceLevel {
    let t = text.to_lowercase();
    let any = |keys: &[&str]| keys.iter().any(|k| t.contains(k));

    if any(&["entry level", "entry-level", "junior", "graduate", "fresh"]) {
        ExperienceLevel::EntryLevel
    } else if any(&["senior", "lead", "principal", "staff", "7+ year", "8+ year", "10+ year"]) {
        ExperienceLevel::Senior
    } else if any(&["mid level", "mid-level", "3+ year", "4+ year", "5+ year"]) {
        ExperienceLevel::MidLevel
    } else if any(&["manager", "director", "head of", "vp", "executive"]) {
        ExperienceLevel::Management
    } else {
        ExperienceLevel::NotSpecified
    }
}

/// A job annotated with its match against a candidate profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedJob {
    #[serde(flatten)]
    pub job: JobPosting,
    pub match_score: u32,
    pub match_reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_hash_deterministic() {
        let h1 = compute_hash("Engineer", "Corp", "City");
        let h2 = compute_hash("Engineer", "Corp", "City");
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_compute_hash_normalizes_case_and_whitespace() {
        let h1 = compute_hash("Engineer", "Corp", "City");
        let h2 = compute_hash("  ENGINEER ", "corp", " city ");
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_compute_hash_differs_for_distinct_inputs() {
        let h1 = compute_hash("Engineer", "Corp A", "City");
        let h2 = compute_hash("Engineer", "Corp B", "City");
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_content_hash_computed_when_absent() {
        let job = JobPosting {
            title: "Engineer".to_string(),
            company: "Corp".to_string(),
            location: "City".to_string(),
            ..JobPosting::default()
        };
        assert_eq!(job.content_hash(), compute_hash("Engineer", "Corp", "City"));
    }

    #[test]
    fn test_experience_level_detection() {
        assert_eq!(
            detect_experience_level("Junior developer wanted"),
            ExperienceLevel::EntryLevel
        );
        assert_eq!(
            detect_experience_level("Senior Rust engineer, 8+ years"),
            ExperienceLevel::Senior
        );
        assert_eq!(
            detect_experience_level("Mid-level analyst, 3+ years required"),
            ExperienceLevel::MidLevel
        );
        assert_eq!(
            detect_experience_level("Head of Operations"),
            ExperienceLevel::Management
        );
        assert_eq!(
            detect_experience_level("A role"),
            ExperienceLevel::NotSpecified
        );
    }

    #[test]
    fn test_experience_level_serde_display_strings() {
        let s = serde_json::to_string(&ExperienceLevel::EntryLevel).unwrap();
        assert_eq!(s, "\"Entry Level\"");
        let back: ExperienceLevel = serde_json::from_str("\"Not Specified\"").unwrap();
        assert_eq!(back, ExperienceLevel::NotSpecified);
    }

    #[test]
    fn test_cap_description() {
        let mut job = JobPosting {
            description: "x".repeat(MAX_DESCRIPTION_LEN + 100),
            ..JobPosting::default()
        };
        job.cap_description();
        assert_eq!(job.description.chars().count(), MAX_DESCRIPTION_LEN);
    }
}
