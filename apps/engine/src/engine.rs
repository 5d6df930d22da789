//! The engine: one explicit container wiring configuration and every
//! processing component together.
//!
//! All optional capabilities (entity recognition, learned classifier model,
//! remote ranking) are resolved once at construction from [`Config`]; nothing
//! re-checks availability per call.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::confidence;
use crate::errors::EngineError;
use crate::extraction::entities::{DisabledRecognizer, EntityRecognizer, RemoteRecognizer};
use crate::extraction::ProfileExtractor;
use crate::jobs::{
    JobClassifier, JobDeduplicator, Matcher, RankingClient, RemoteRankingMatcher,
    SkillOverlapMatcher,
};
use crate::models::job::MAX_SKILLS_LISTED;
use crate::models::{detect_experience_level, ExperienceLevel, JobPosting, MatchedJob, Profile};

/// Result of admitting a job into the index. Both variants carry the job
/// back enriched (capped description, filled skills/level/category/hash).
#[derive(Debug)]
pub enum AdmitOutcome {
    Admitted(JobPosting),
    Duplicate(JobPosting),
}

pub struct Engine {
    config: Config,
    extractor: ProfileExtractor,
    classifier: JobClassifier,
    dedup: Mutex<JobDeduplicator>,
    matcher: Arc<dyn Matcher>,
}

impl Engine {
    pub fn new(config: Config) -> Self {
        let recognizer: Arc<dyn EntityRecognizer> = match &config.entity_service_url {
            Some(url) => Arc::new(RemoteRecognizer::new(url.clone())),
            None => Arc::new(DisabledRecognizer),
        };

        let matcher: Arc<dyn Matcher> = match &config.ranking_service_url {
            Some(url) => Arc::new(RemoteRankingMatcher::new(RankingClient::new(
                url.clone(),
                config.ranking_api_key.clone(),
            ))),
            None => Arc::new(SkillOverlapMatcher),
        };

        Engine {
            extractor: ProfileExtractor::new(recognizer),
            classifier: JobClassifier::from_config(&config),
            dedup: Mutex::new(JobDeduplicator::from_config(&config)),
            matcher,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Ingestion entry for raw bytes from the upstream document extractor.
    /// Bytes that do not decode as UTF-8 are the one unrecoverable input.
    pub async fn process_resume_bytes(&self, bytes: &[u8]) -> Result<Profile, EngineError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| EngineError::UnreadableSource(e.to_string()))?;
        self.process_resume(text).await
    }

    /// Extracts a profile from résumé text and attaches per-field confidence
    /// scores and labels. Empty text yields an all-default profile with
    /// all-zero confidence, not an error.
    pub async fn process_resume(&self, raw_text: &str) -> Result<Profile, EngineError> {
        let mut profile = self.extractor.extract(raw_text).await;
        profile.confidence_scores = confidence::score_profile(&profile);
        profile.confidence_labels = confidence::label_scores(&profile.confidence_scores);
        Ok(profile)
    }

    /// Enriches, classifies, and indexes one job posting.
    pub async fn admit_job(&self, mut job: JobPosting) -> AdmitOutcome {
        job.cap_description();
        if job.skills_required.is_empty() {
            job.skills_required =
                crate::extraction::fields::extract_skills(&job.description, &[]);
            job.skills_required.truncate(MAX_SKILLS_LISTED);
        }
        if job.experience_level == ExperienceLevel::NotSpecified {
            let text = format!("{} {}", job.title, job.description);
            job.experience_level = detect_experience_level(&text);
        }
        job.content_hash = job.content_hash();
        job.category = self.classifier.classify(&job);

        let mut dedup = self.dedup.lock().await;
        if dedup.add_job(&job) {
            AdmitOutcome::Admitted(job)
        } else {
            AdmitOutcome::Duplicate(job)
        }
    }

    /// Seeds the duplicate index from persisted state at startup.
    pub async fn preload_jobs(&self, hashes: Vec<String>, jobs: &[JobPosting]) {
        let mut dedup = self.dedup.lock().await;
        dedup.load_existing_hashes(hashes);
        dedup.load_existing_jobs(jobs);
    }

    /// Scores and sorts jobs against a candidate profile using the configured
    /// matcher backend.
    pub async fn rank_jobs(&self, profile: &Profile, jobs: Vec<JobPosting>) -> Vec<MatchedJob> {
        self.matcher.match_jobs(profile, jobs).await
    }
}
