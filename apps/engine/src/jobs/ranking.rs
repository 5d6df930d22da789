//! HTTP client for the external batch ranking service.
//!
//! The service receives a candidate summary plus the job batch and returns a
//! JSON array with one score object per job, in order. Some deployments wrap
//! the array in markdown code fences; those are stripped before parsing.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{JobPosting, Profile};

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Ranking service error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Ranking service unavailable after {retries} retries")]
    Unavailable { retries: u32 },
}

#[derive(Debug, Serialize)]
struct RankRequest<'a> {
    candidate: CandidateSummary<'a>,
    jobs: Vec<JobSummary<'a>>,
}

#[derive(Debug, Serialize)]
struct CandidateSummary<'a> {
    skills: &'a [String],
    experience_years: u32,
}

#[derive(Debug, Serialize)]
struct JobSummary<'a> {
    title: &'a str,
    skills: &'a [String],
}

/// One score object per job, in request order.
#[derive(Debug, Deserialize)]
pub struct RankScore {
    pub score: u32,
    pub reason: String,
}

/// Client for the batch ranking endpoint, with retry on transient failures.
#[derive(Clone)]
pub struct RankingClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl RankingClient {
    pub fn new(endpoint: String, api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
            api_key,
        }
    }

    /// Scores the batch. Retries on transport errors, 429, and 5xx with
    /// exponential backoff; other HTTP errors and unparseable bodies fail
    /// immediately.
    pub async fn rank(
        &self,
        profile: &Profile,
        jobs: &[JobPosting],
    ) -> Result<Vec<RankScore>, RankingError> {
        let request_body = RankRequest {
            candidate: CandidateSummary {
                skills: &profile.skills,
                experience_years: profile.experience_years,
            },
            jobs: jobs
                .iter()
                .map(|job| JobSummary {
                    title: &job.title,
                    skills: &job.skills_required,
                })
                .collect(),
        };

        let mut last_error: Option<RankingError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Ranking call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self.client.post(&self.endpoint).json(&request_body);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(RankingError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Ranking service returned {}: {}", status, body);
                last_error = Some(RankingError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(RankingError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let body = response.text().await.map_err(RankingError::Http)?;
            let scores: Vec<RankScore> = serde_json::from_str(strip_json_fences(&body))?;

            debug!("Ranking service scored {} jobs", scores.len());
            return Ok(scores);
        }

        Err(last_error.unwrap_or(RankingError::Unavailable {
            retries: MAX_RETRIES,
        }))
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from a response body.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n[{\"score\": 80, \"reason\": \"ok\"}]\n```";
        assert_eq!(
            strip_json_fences(input),
            "[{\"score\": 80, \"reason\": \"ok\"}]"
        );
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n[]\n```";
        assert_eq!(strip_json_fences(input), "[]");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "[{\"score\": 10, \"reason\": \"weak\"}]";
        assert_eq!(strip_json_fences(input), input);
    }

    #[test]
    fn test_rank_scores_parse_after_fence_strip() {
        let body = "```json\n[{\"score\": 91, \"reason\": \"strong overlap\"}]\n```";
        let scores: Vec<RankScore> = serde_json::from_str(strip_json_fences(body)).unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].score, 91);
    }
}
