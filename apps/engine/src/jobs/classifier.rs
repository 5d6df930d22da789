//! Job category classification.
//!
//! Primary: a trained linear model loaded from a JSON artifact.
//! Fallback: keyword scoring against a fixed table — always works, no
//! training needed. Any artifact problem (missing file, parse error, shape
//! mismatch) silently selects the fallback.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Config;
use crate::models::JobPosting;

/// Keyword table in fixed priority order: ties on keyword count keep the
/// earlier category. "Other" is the zero-hit catch-all and has no row here.
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Information Technology",
        &[
            "software", "developer", "engineer", "programmer", "python", "java", "javascript",
            "backend", "frontend", "fullstack", "devops", "cloud", "aws", "azure", "database",
            "sql", "api", "cybersecurity", "network", "system administrator", "it support",
            "data science", "machine learning", "artificial intelligence", "ios", "android",
            "mobile", "web developer",
        ],
    ),
    (
        "Engineering",
        &[
            "civil engineer", "mechanical engineer", "electrical engineer", "structural",
            "geotechnical", "construction", "autocad", "solidworks", "project engineer",
            "site engineer", "piping", "hvac", "surveyor", "quantity surveyor",
            "material engineer",
        ],
    ),
    (
        "Healthcare",
        &[
            "nurse", "doctor", "physician", "pharmacist", "medical", "clinical", "hospital",
            "healthcare", "patient", "surgery", "diagnosis", "lab", "radiologist", "dentist",
            "therapist", "midwife", "health officer", "public health", "nutrition",
        ],
    ),
    (
        "Education",
        &[
            "teacher", "lecturer", "professor", "tutor", "instructor", "curriculum", "school",
            "university", "college", "education", "training", "trainer", "e-learning",
            "academic", "pedagogy",
        ],
    ),
    (
        "Finance & Accounting",
        &[
            "accountant", "auditor", "finance", "financial analyst", "treasurer", "budget",
            "tax", "bookkeeper", "cpa", "cfa", "banking", "investment", "risk management",
            "compliance", "payroll",
        ],
    ),
    (
        "Marketing & Communications",
        &[
            "marketing", "brand", "social media", "content", "copywriter", "seo",
            "digital marketing", "public relations", "communications", "advertising",
            "campaign", "media", "journalist", "editor",
        ],
    ),
    (
        "Administration",
        &[
            "administrative", "office manager", "receptionist", "secretary",
            "executive assistant", "data entry", "records", "coordinator", "logistics",
            "operations", "procurement", "hr", "human resource", "recruitment",
        ],
    ),
    (
        "Construction & Trades",
        &[
            "carpenter", "electrician", "plumber", "welder", "mason", "construction worker",
            "foreman", "technician", "maintenance", "mechanic", "fitter", "rigger",
            "scaffolding",
        ],
    ),
    (
        "Agriculture",
        &[
            "agriculture", "farm", "agri", "crops", "livestock", "fisheries", "horticulture",
            "agronomist", "plantation", "forestry", "veterinary",
        ],
    ),
];

/// On-disk artifact layout for a trained model.
#[derive(Debug, Serialize, Deserialize)]
struct ModelArtifact {
    vocabulary: Vec<String>,
    categories: Vec<String>,
    /// One weight row per category, one column per vocabulary term.
    weights: Vec<Vec<f64>>,
}

/// A loaded, shape-validated linear model.
struct LinearModel {
    vocabulary: HashMap<String, usize>,
    categories: Vec<String>,
    weights: Vec<Vec<f64>>,
}

impl LinearModel {
    fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read classifier artifact at {}", path.display()))?;
        let artifact: ModelArtifact =
            serde_json::from_str(&raw).context("Classifier artifact is not valid JSON")?;

        if artifact.categories.is_empty()
            || artifact.vocabulary.is_empty()
            || artifact.weights.len() != artifact.categories.len()
            || artifact
                .weights
                .iter()
                .any(|row| row.len() != artifact.vocabulary.len())
        {
            bail!("Classifier artifact has mismatched shapes");
        }

        let vocabulary = artifact
            .vocabulary
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term, index))
            .collect();

        Ok(LinearModel {
            vocabulary,
            categories: artifact.categories,
            weights: artifact.weights,
        })
    }

    /// Bag-of-words score per category, argmax. `None` when the text shares
    /// no vocabulary with the model — the caller falls back to keywords.
    fn predict(&self, text: &str) -> Option<&str> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            if let Some(&index) = self.vocabulary.get(word) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }
        if counts.is_empty() {
            return None;
        }

        let mut best: Option<(usize, f64)> = None;
        for (category_index, row) in self.weights.iter().enumerate() {
            let score: f64 = counts.iter().map(|(&term, &tf)| tf * row[term]).sum();
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((category_index, score));
            }
        }
        best.map(|(index, _)| self.categories[index].as_str())
    }
}

/// Classifier instance holding the optional learned model. Construct once at
/// startup and share; the artifact is read exactly once.
pub struct JobClassifier {
    model: Option<LinearModel>,
}

impl JobClassifier {
    pub fn new(model_path: &Path) -> Self {
        let model = match LinearModel::load(model_path) {
            Ok(model) => {
                info!(
                    "Loaded classifier model from {} ({} categories)",
                    model_path.display(),
                    model.categories.len()
                );
                Some(model)
            }
            Err(err) => {
                warn!("Classifier model unavailable, using keyword fallback: {err:#}");
                None
            }
        };
        JobClassifier { model }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.classifier_model_path)
    }

    /// Category for a posting, from title + description.
    pub fn classify(&self, job: &JobPosting) -> String {
        let text = format!("{} {}", job.title, job.description).to_lowercase();

        if let Some(model) = &self.model {
            if let Some(category) = model.predict(&text) {
                return category.to_string();
            }
        }
        keyword_classify(&text)
    }

    /// Classifies a batch in place.
    pub fn classify_batch(&self, jobs: &mut [JobPosting]) {
        for job in jobs {
            job.category = self.classify(job);
        }
    }
}

/// Counts keyword substring hits per category; the strictly highest count
/// wins, first-seen on ties, "Other" when nothing matches. Expects lowercased
/// text.
pub fn keyword_classify(text: &str) -> String {
    let mut best_category = "Other";
    let mut best_score = 0usize;

    for (category, keywords) in CATEGORY_KEYWORDS {
        let score = keywords.iter().filter(|kw| text.contains(*kw)).count();
        if score > best_score {
            best_score = score;
            best_category = category;
        }
    }
    best_category.to_string()
}

/// A labeled training example.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledExample {
    pub text: String,
    pub category: String,
}

/// Trains a linear model as per-category normalized term frequencies and
/// writes the JSON artifact. Categories appear in first-seen example order.
pub fn train(examples: &[LabeledExample], path: &Path) -> Result<()> {
    if examples.is_empty() {
        bail!("Cannot train a classifier from zero examples");
    }

    let mut categories: Vec<String> = Vec::new();
    let mut vocabulary: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<HashMap<usize, f64>> = Vec::new();

    for example in examples {
        let category_index = match categories.iter().position(|c| c == &example.category) {
            Some(index) => index,
            None => {
                categories.push(example.category.clone());
                counts.push(HashMap::new());
                categories.len() - 1
            }
        };
        for word in example
            .text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let next_index = vocabulary.len();
            let term_index = *vocabulary.entry(word.to_string()).or_insert(next_index);
            *counts[category_index].entry(term_index).or_insert(0.0) += 1.0;
        }
    }
    if vocabulary.is_empty() {
        bail!("Training examples contain no usable terms");
    }

    let mut terms: Vec<String> = vec![String::new(); vocabulary.len()];
    for (term, index) in vocabulary {
        terms[index] = term;
    }

    let weights = counts
        .into_iter()
        .map(|category_counts| {
            let total: f64 = category_counts.values().sum();
            let mut row = vec![0.0; terms.len()];
            for (term_index, count) in category_counts {
                row[term_index] = count / total;
            }
            row
        })
        .collect();

    let artifact = ModelArtifact {
        vocabulary: terms,
        categories,
        weights,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, serde_json::to_string_pretty(&artifact)?)
        .with_context(|| format!("Failed to write classifier artifact to {}", path.display()))?;
    info!("Classifier model saved to {}", path.display());
    Ok(())
}
