//! Duplicate job detection: exact content hashes plus TF-IDF near-duplicate
//! matching over an in-memory corpus.
//!
//! The similarity model is refit eagerly every Nth insertion and lazily when
//! a query finds the index dirty — refitting on each add would be quadratic
//! over a crawl. The batch size bounds amortized insert cost; the dirty flag
//! keeps queries from running against a model missing recent additions.

use std::collections::HashSet;

use tracing::debug;

use crate::config::Config;
use crate::jobs::similarity::TfidfModel;
use crate::models::JobPosting;

pub const DEFAULT_THRESHOLD: f64 = 0.85;
pub const DEFAULT_REBUILD_EVERY: usize = 20;

/// In-memory duplicate index over seen jobs.
pub struct JobDeduplicator {
    threshold: f64,
    rebuild_every: usize,
    hashes: HashSet<String>,
    corpus: Vec<String>,
    model: Option<TfidfModel>,
    dirty: bool,
}

impl JobDeduplicator {
    pub fn new(threshold: f64, rebuild_every: usize) -> Self {
        JobDeduplicator {
            threshold,
            rebuild_every: rebuild_every.max(1),
            hashes: HashSet::new(),
            corpus: Vec::new(),
            model: None,
            dirty: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.dedup_threshold, config.dedup_rebuild_every)
    }

    /// True if the job is an exact duplicate (content hash already seen) or a
    /// near-duplicate (max cosine similarity against the corpus ≥ threshold).
    ///
    /// Takes `&mut self` because the check may trigger a lazy model rebuild.
    /// An unavailable model (degenerate corpus) fails open: not a duplicate.
    pub fn is_duplicate(&mut self, job: &JobPosting) -> bool {
        if self.hashes.contains(&job.content_hash()) {
            return true;
        }

        if self.corpus.len() >= 2 {
            if self.dirty || self.model.is_none() {
                self.rebuild();
            }
            if let Some(model) = &self.model {
                let similarity = model.max_similarity(&job_to_text(job));
                if similarity >= self.threshold {
                    debug!(
                        "Near-duplicate detected (sim={:.2}): {}",
                        similarity, job.title
                    );
                    return true;
                }
            }
        }

        false
    }

    /// Indexes the job. Returns true if it was new, false (without mutating
    /// state) if it was a duplicate.
    pub fn add_job(&mut self, job: &JobPosting) -> bool {
        if self.is_duplicate(job) {
            return false;
        }

        self.hashes.insert(job.content_hash());
        self.corpus.push(job_to_text(job));
        self.dirty = true;

        if self.corpus.len() % self.rebuild_every == 0 {
            self.rebuild();
        }

        true
    }

    /// Seeds exact hashes from persisted state at startup.
    pub fn load_existing_hashes<I: IntoIterator<Item = String>>(&mut self, hashes: I) {
        self.hashes.extend(hashes);
    }

    /// Seeds the near-duplicate corpus from persisted jobs at startup.
    pub fn load_existing_jobs(&mut self, jobs: &[JobPosting]) {
        for job in jobs {
            self.corpus.push(job_to_text(job));
        }
        if self.corpus.len() >= 2 {
            self.rebuild();
        }
    }

    fn rebuild(&mut self) {
        if self.corpus.len() < 2 {
            return;
        }
        self.model = TfidfModel::fit(&self.corpus);
        self.dirty = false;
    }
}

/// Text vectorized for near-duplicate matching. Description is truncated so
/// near-identical postings differing only in trailing boilerplate still
/// collide.
fn job_to_text(job: &JobPosting) -> String {
    let description: String = job.description.chars().take(500).collect();
    [
        job.title.as_str(),
        job.company.as_str(),
        job.location.as_str(),
        description.as_str(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .cloned()
    .collect::<Vec<&str>>()
    .join(" ")
    .to_lowercase()
}
