use std::path::PathBuf;

use anyhow::{Context, Result};

/// Engine configuration loaded from environment variables.
/// Every knob has a default so the engine runs with an empty environment;
/// `from_env` only fails on values that are present but unparseable.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cosine similarity at or above which a job counts as a near-duplicate.
    pub dedup_threshold: f64,
    /// Refit the similarity model eagerly every Nth insertion; between those
    /// batch points a dirty index is refit lazily on the next query.
    /// Amortization knob, not a correctness guarantee.
    pub dedup_rebuild_every: usize,
    /// Path to the trained classifier artifact (JSON). Missing file means
    /// keyword-fallback classification.
    pub classifier_model_path: PathBuf,
    /// Base URL of the external ranking service. Unset means the local
    /// skill-overlap matcher is used.
    pub ranking_service_url: Option<String>,
    pub ranking_api_key: Option<String>,
    /// Endpoint of the entity-recognition service. Unset means extraction
    /// runs on regex heuristics alone.
    pub entity_service_url: Option<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            dedup_threshold: parse_env("DEDUP_COSINE_THRESHOLD", 0.85)?,
            dedup_rebuild_every: parse_env("DEDUP_REBUILD_EVERY", 20)?,
            classifier_model_path: std::env::var("CLASSIFIER_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("models/job_classifier.json")),
            ranking_service_url: std::env::var("RANKING_SERVICE_URL").ok(),
            ranking_api_key: std::env::var("RANKING_API_KEY").ok(),
            entity_service_url: std::env::var("ENTITY_SERVICE_URL").ok(),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dedup_threshold: 0.85,
            dedup_rebuild_every: 20,
            classifier_model_path: PathBuf::from("models/job_classifier.json"),
            ranking_service_url: None,
            ranking_api_key: None,
            entity_service_url: None,
            rust_log: "info".to_string(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' is not a valid value")),
        Err(_) => Ok(default),
    }
}

/// Skill vocabulary matched against résumé and job text, grouped by domain.
/// Expandable; matching is case-insensitive whole-word.
pub const SKILL_VOCABULARY: &[(&str, &[&str])] = &[
    (
        "programming",
        &[
            "python", "java", "javascript", "typescript", "c++", "c#", "php", "ruby", "go",
            "rust", "swift", "kotlin", "scala", "matlab",
        ],
    ),
    (
        "web",
        &[
            "html", "css", "react", "angular", "vue", "node.js", "django", "flask", "fastapi",
            "spring", "laravel", "express",
        ],
    ),
    (
        "data",
        &[
            "sql", "mysql", "postgresql", "mongodb", "redis", "elasticsearch", "pandas", "numpy",
            "tensorflow", "pytorch", "scikit-learn", "power bi", "tableau", "excel",
            "data analysis", "machine learning",
        ],
    ),
    (
        "cloud_devops",
        &[
            "aws", "azure", "gcp", "docker", "kubernetes", "ci/cd", "git", "linux", "bash",
            "terraform", "ansible",
        ],
    ),
    (
        "soft",
        &[
            "leadership", "communication", "project management", "teamwork", "problem solving",
            "critical thinking", "time management",
        ],
    ),
];

/// Flat, deduplicated view of [`SKILL_VOCABULARY`].
pub fn skill_vocabulary() -> Vec<&'static str> {
    let mut flat: Vec<&'static str> = SKILL_VOCABULARY
        .iter()
        .flat_map(|(_, group)| group.iter().copied())
        .collect();
    flat.sort_unstable();
    flat.dedup();
    flat
}

/// Fixed job category taxonomy. "Other" is the catch-all and must stay last.
pub const JOB_CATEGORIES: &[&str] = &[
    "Information Technology",
    "Engineering",
    "Healthcare",
    "Education",
    "Finance & Accounting",
    "Marketing & Communications",
    "Administration",
    "Construction & Trades",
    "Agriculture",
    "Other",
];
