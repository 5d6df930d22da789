//! Candidate-to-job matching.
//!
//! Two backends share one output contract: every input job comes back
//! annotated with a 0-100 `match_score` and a one-line `match_reason`,
//! sorted descending by score (stable, so ties keep input order). The
//! backend is selected at startup and held as an `Arc<dyn Matcher>`.

use std::collections::BTreeSet;

use async_trait::async_trait;
use tracing::warn;

use crate::extraction::fields::title_case;
use crate::jobs::ranking::{RankScore, RankingClient};
use crate::models::{JobPosting, MatchedJob, Profile};

pub const NO_OVERLAP_REASON: &str = "No overlapping skills with this role";
pub const FALLBACK_REASON: &str = "Match could not be evaluated";
pub const FALLBACK_SCORE: u32 = 50;

#[async_trait]
pub trait Matcher: Send + Sync {
    async fn match_jobs(&self, profile: &Profile, jobs: Vec<JobPosting>) -> Vec<MatchedJob>;
}

/// Local heuristic: Jaccard overlap between candidate and required skills,
/// scaled to 0-100, plus a small experience bonus.
pub struct SkillOverlapMatcher;

impl SkillOverlapMatcher {
    fn score(profile: &Profile, job: &JobPosting) -> (u32, String) {
        let candidate: BTreeSet<String> =
            profile.skills.iter().map(|s| s.to_lowercase()).collect();
        let required: BTreeSet<String> = job
            .skills_required
            .iter()
            .map(|s| s.to_lowercase())
            .collect();

        let matched: Vec<&String> = candidate.intersection(&required).collect();
        let union = candidate.union(&required).count();
        let base = if union == 0 {
            0.0
        } else {
            matched.len() as f64 / union as f64 * 100.0
        };

        let bonus = if profile.experience_years >= 5 {
            10.0
        } else if profile.experience_years >= 2 {
            5.0
        } else {
            0.0
        };

        let score = (base + bonus).clamp(0.0, 100.0).round() as u32;

        let reason = if matched.is_empty() {
            NO_OVERLAP_REASON.to_string()
        } else {
            // BTreeSet intersection is already alphabetically ordered.
            let listed: Vec<String> = matched.iter().map(|s| title_case(s)).collect();
            format!("Matched skills: {}", listed.join(", "))
        };

        (score, reason)
    }
}

#[async_trait]
impl Matcher for SkillOverlapMatcher {
    async fn match_jobs(&self, profile: &Profile, jobs: Vec<JobPosting>) -> Vec<MatchedJob> {
        let mut matched: Vec<MatchedJob> = jobs
            .into_iter()
            .map(|job| {
                let (match_score, match_reason) = Self::score(profile, &job);
                MatchedJob {
                    job,
                    match_score,
                    match_reason,
                }
            })
            .collect();
        sort_by_score(&mut matched);
        matched
    }
}

/// Delegates scoring to the external ranking service in one batch call.
/// Exhausted retries or a response of the wrong length degrade to a uniform
/// neutral score rather than failing the request.
pub struct RemoteRankingMatcher {
    client: RankingClient,
}

impl RemoteRankingMatcher {
    pub fn new(client: RankingClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Matcher for RemoteRankingMatcher {
    async fn match_jobs(&self, profile: &Profile, jobs: Vec<JobPosting>) -> Vec<MatchedJob> {
        if jobs.is_empty() {
            return Vec::new();
        }

        let scores = match self.client.rank(profile, &jobs).await {
            Ok(scores) if scores.len() == jobs.len() => scores,
            Ok(scores) => {
                warn!(
                    "Ranking response length mismatch: expected {}, got {}",
                    jobs.len(),
                    scores.len()
                );
                fallback_scores(jobs.len())
            }
            Err(err) => {
                warn!("Ranking service failed, using fallback scores: {err}");
                fallback_scores(jobs.len())
            }
        };

        let mut matched: Vec<MatchedJob> = jobs
            .into_iter()
            .zip(scores)
            .map(|(job, score)| MatchedJob {
                job,
                match_score: score.score.min(100),
                match_reason: score.reason,
            })
            .collect();
        sort_by_score(&mut matched);
        matched
    }
}

/// Uniform neutral scores used when the service cannot evaluate the batch.
pub fn fallback_scores(count: usize) -> Vec<RankScore> {
    (0..count)
        .map(|_| RankScore {
            score: FALLBACK_SCORE,
            reason: FALLBACK_REASON.to_string(),
        })
        .collect()
}

/// Stable descending sort: equal scores keep their input order.
fn sort_by_score(jobs: &mut [MatchedJob]) {
    jobs.sort_by(|a, b| b.match_score.cmp(&a.match_score));
}
