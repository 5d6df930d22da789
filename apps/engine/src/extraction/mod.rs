//! Résumé text → structured [`Profile`] pipeline.
//!
//! Stages run in a fixed order: normalize, entity recognition (optional),
//! section split, field extraction. Extraction is total — any text input
//! produces a profile, with unparseable fields left at their zero values.

pub mod entities;
pub mod fields;
pub mod normalize;
pub mod sections;

use std::sync::Arc;

use crate::models::Profile;

use entities::{Entity, EntityRecognizer};
use normalize::normalize_text;
use sections::{split_sections, HEADER_SECTION};

/// Extraction pipeline with an injected entity-recognition backend.
pub struct ProfileExtractor {
    recognizer: Arc<dyn EntityRecognizer>,
}

impl ProfileExtractor {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self { recognizer }
    }

    /// Runs the full pipeline over raw résumé text.
    ///
    /// A recognizer failure is logged and treated as "no entities"; the regex
    /// heuristics carry the extraction alone in that case.
    pub async fn extract(&self, raw_text: &str) -> Profile {
        if raw_text.trim().is_empty() {
            return Profile {
                raw_text: raw_text.to_string(),
                ..Profile::default()
            };
        }

        let text = normalize_text(raw_text);

        let entities: Vec<Entity> = match self.recognizer.process(&text).await {
            Ok(entities) => entities,
            Err(err) => {
                tracing::warn!("Entity recognition failed, using heuristics only: {err:#}");
                Vec::new()
            }
        };

        let sections = split_sections(&text);
        let section = |name: &str| sections.get(name).map(String::as_str).unwrap_or("");

        // Contact details usually sit above the first header; keep the
        // location search there so a job posting quoted later in the text
        // cannot hijack the address.
        let header_text = [section(HEADER_SECTION), section("contact")].join("\n");

        // Skills can appear anywhere (experience blocks, project stacks), so
        // the dedicated section only supplements the full-text scan.
        let skills_source = format!("{} {}", section("skills"), text);

        Profile {
            full_name: fields::extract_name(&text, &entities),
            email: fields::extract_email(&text),
            phone: fields::extract_phone(&text),
            address: fields::extract_address(&header_text, &entities),
            linkedin: fields::extract_linkedin(&text),
            github: fields::extract_github(&text),
            summary: section("summary").trim().to_string(),
            education: fields::extract_education(section("education")),
            skills: fields::extract_skills(&skills_source, &entities),
            certifications: fields::extract_certifications(section("certifications")),
            work_experience: fields::extract_experience(section("work_experience")),
            projects: fields::extract_projects(section("projects")),
            experience_years: fields::extract_experience_years(&text),
            raw_text: raw_text.to_string(),
            ..Profile::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use super::entities::{DisabledRecognizer, EntityLabel};

    struct FailingRecognizer;

    #[async_trait]
    impl EntityRecognizer for FailingRecognizer {
        async fn process(&self, _text: &str) -> anyhow::Result<Vec<Entity>> {
            Err(anyhow!("backend offline"))
        }
    }

    struct FixedRecognizer(Vec<Entity>);

    #[async_trait]
    impl EntityRecognizer for FixedRecognizer {
        async fn process(&self, _text: &str) -> anyhow::Result<Vec<Entity>> {
            Ok(self.0.clone())
        }
    }

    // Headers sit between blank lines: the normalizer joins single line
    // breaks, so only blank-line-delimited headers survive as section
    // boundaries. Bodies likewise collapse to one paragraph line each.
    fn sample_resume() -> &'static str {
        "John Doe\n\njohn@example.com\n+1 (555) 987-6543\nlinkedin.com/in/johndoe\n\nSummary\n\nSeasoned engineer with 6+ years building data platforms and keeping them alive in production.\n\nSkills\n\nPython, SQL, Docker, Machine Learning\n\nWork Experience\n\nSenior Engineer, Acme Corp\n2020 - Present, built ingestion pipelines.\n\nEducation\n\nState University\nBachelor of Science 2016"
    }

    #[tokio::test]
    async fn test_extracts_contact_fields() {
        let extractor = ProfileExtractor::new(Arc::new(DisabledRecognizer));
        let profile = extractor.extract(sample_resume()).await;

        assert_eq!(profile.full_name, "John Doe");
        assert_eq!(profile.email, "john@example.com");
        assert!(profile.phone.contains("555"));
        assert_eq!(profile.linkedin, "https://linkedin.com/in/johndoe");
        assert_eq!(profile.experience_years, 6);
    }

    #[tokio::test]
    async fn test_extracts_sectioned_fields() {
        let extractor = ProfileExtractor::new(Arc::new(DisabledRecognizer));
        let profile = extractor.extract(sample_resume()).await;

        assert!(profile.skills.contains(&"Python".to_string()));
        assert!(profile.skills.contains(&"Sql".to_string()));
        assert!(profile.summary.starts_with("Seasoned engineer"));
        assert_eq!(profile.work_experience.len(), 1);
        assert!(profile.work_experience[0]
            .role
            .starts_with("Senior Engineer"));
        assert!(profile.work_experience[0].dates.contains("2020"));
        assert_eq!(profile.education.len(), 1);
        assert_eq!(profile.education[0].year, "2016");
        assert_eq!(profile.education[0].degree.to_lowercase(), "bachelor");
    }

    #[tokio::test]
    async fn test_skills_found_outside_skills_section() {
        let extractor = ProfileExtractor::new(Arc::new(DisabledRecognizer));
        let text = "Jane Roe\n\nSkills\n\nPython\n\nWork Experience\n\nUsed Docker and Kubernetes at Acme Corp daily";
        let profile = extractor.extract(text).await;
        assert!(profile.skills.contains(&"Python".to_string()));
        assert!(profile.skills.contains(&"Docker".to_string()));
        assert!(profile.skills.contains(&"Kubernetes".to_string()));
    }

    #[tokio::test]
    async fn test_empty_input_yields_default_profile() {
        let extractor = ProfileExtractor::new(Arc::new(DisabledRecognizer));
        let profile = extractor.extract("   \n ").await;
        assert_eq!(profile.full_name, "");
        assert!(profile.skills.is_empty());
        assert_eq!(profile.raw_text, "   \n ");
    }

    #[tokio::test]
    async fn test_recognizer_failure_falls_back_to_heuristics() {
        let extractor = ProfileExtractor::new(Arc::new(FailingRecognizer));
        let profile = extractor.extract(sample_resume()).await;
        assert_eq!(profile.full_name, "John Doe");
        assert_eq!(profile.email, "john@example.com");
    }

    #[tokio::test]
    async fn test_entities_refine_name_and_address() {
        let recognizer = FixedRecognizer(vec![
            Entity {
                label: EntityLabel::Person,
                text: "John Doe".to_string(),
            },
            Entity {
                label: EntityLabel::Location,
                text: "Springfield, Illinois".to_string(),
            },
        ]);
        let extractor = ProfileExtractor::new(Arc::new(recognizer));
        let profile = extractor.extract(sample_resume()).await;
        assert_eq!(profile.full_name, "John Doe");
        assert_eq!(profile.address, "Springfield, Illinois");
    }

    #[tokio::test]
    async fn test_raw_text_preserved_verbatim() {
        let extractor = ProfileExtractor::new(Arc::new(DisabledRecognizer));
        let raw = "John Doe\n\njohn@x.com";
        let profile = extractor.extract(raw).await;
        assert_eq!(profile.raw_text, raw);
    }
}
