use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Human-readable band for a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLabel {
    High,
    Medium,
    Low,
    Missing,
}

/// One education entry extracted from the résumé's education section.
/// `raw` keeps the source block so the review UI can show provenance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub year: String,
    pub raw: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    pub dates: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub technologies: String,
}

/// A structured candidate profile extracted from résumé text.
///
/// Shape invariant: every field is always present — extraction defaults a
/// field to its zero value rather than omitting it, so downstream consumers
/// (review UI, persistence) never need to probe for missing keys.
/// Created fresh per extraction call and treated as immutable once returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub linkedin: String,
    pub github: String,
    pub summary: String,
    pub education: Vec<EducationEntry>,
    /// Canonical skills, title-cased, sorted, deduplicated.
    pub skills: Vec<String>,
    pub certifications: Vec<Certification>,
    pub work_experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    /// Total years of experience claimed in the text; 0 when not stated.
    pub experience_years: u32,
    /// The raw input text, preserved verbatim for re-extraction and audit.
    pub raw_text: String,
    /// Per-field confidence in [0, 1], plus an "overall" weighted mean.
    pub confidence_scores: BTreeMap<String, f64>,
    pub confidence_labels: BTreeMap<String, ConfidenceLabel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_fully_empty() {
        let p = Profile::default();
        assert_eq!(p.full_name, "");
        assert_eq!(p.email, "");
        assert!(p.education.is_empty());
        assert!(p.skills.is_empty());
        assert_eq!(p.experience_years, 0);
        assert!(p.confidence_scores.is_empty());
    }

    #[test]
    fn test_profile_roundtrips_through_json_with_all_fields() {
        let p = Profile {
            full_name: "Jane Roe".to_string(),
            skills: vec!["Python".to_string()],
            ..Profile::default()
        };
        let json = serde_json::to_value(&p).unwrap();
        // Every canonical field must be present in serialized output.
        for key in [
            "full_name",
            "email",
            "phone",
            "address",
            "linkedin",
            "github",
            "summary",
            "education",
            "skills",
            "certifications",
            "work_experience",
            "projects",
            "experience_years",
            "raw_text",
            "confidence_scores",
            "confidence_labels",
        ] {
            assert!(json.get(key).is_some(), "missing field: {key}");
        }
        let back: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_partial_json_defaults_missing_fields() {
        // Callers may persist user-edited subsets; deserialization must
        // restore the full canonical shape.
        let back: Profile = serde_json::from_str(r#"{"email": "a@b.co"}"#).unwrap();
        assert_eq!(back.email, "a@b.co");
        assert_eq!(back.full_name, "");
        assert!(back.projects.is_empty());
    }

    #[test]
    fn test_confidence_label_serializes_snake_case() {
        let s = serde_json::to_string(&ConfidenceLabel::High).unwrap();
        assert_eq!(s, "\"high\"");
    }
}
