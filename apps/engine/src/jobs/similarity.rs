//! Bag-of-n-grams TF-IDF similarity over a fixed corpus.
//!
//! The model is fit once over a corpus snapshot and then queried; it never
//! mutates. Vectors are l2-normalized at construction so cosine similarity
//! reduces to a sparse dot product.

use std::collections::HashMap;

/// Vocabulary cap: terms are ranked by document frequency and the rest
/// dropped, keeping the index bounded on large crawls.
pub const MAX_FEATURES: usize = 5000;

/// Common English function words excluded from the vocabulary.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "an", "and", "any", "are", "as", "at", "be",
    "because", "been", "before", "being", "between", "both", "but", "by", "can", "could", "did",
    "do", "does", "down", "during", "each", "few", "for", "from", "further", "had", "has", "have",
    "having", "he", "her", "here", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "just", "more", "most", "my", "no", "not", "now", "of", "off", "on", "once", "only", "or",
    "other", "our", "out", "over", "own", "same", "she", "should", "so", "some", "such", "than",
    "that", "the", "their", "them", "then", "there", "these", "they", "this", "those", "through",
    "to", "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "why", "will", "with", "would", "you", "your",
];

/// A fitted TF-IDF model over word 1-grams and 2-grams.
pub struct TfidfModel {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    /// One l2-normalized sparse row per corpus document, term-index sorted.
    rows: Vec<Vec<(usize, f64)>>,
}

impl TfidfModel {
    /// Fits the model over a corpus snapshot. Returns `None` for degenerate
    /// corpora (fewer than two documents, or an empty vocabulary) — callers
    /// treat that as "similarity unavailable".
    pub fn fit(corpus: &[String]) -> Option<Self> {
        if corpus.len() < 2 {
            return None;
        }

        let docs: Vec<Vec<String>> = corpus.iter().map(|d| ngrams(d)).collect();

        let mut document_freq: HashMap<&str, usize> = HashMap::new();
        for doc in &docs {
            let mut seen: Vec<&str> = doc.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *document_freq.entry(term).or_insert(0) += 1;
            }
        }
        if document_freq.is_empty() {
            return None;
        }

        // Highest document frequency first; alphabetical tie-break keeps the
        // vocabulary deterministic across runs.
        let mut ranked: Vec<(&str, usize)> = document_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(MAX_FEATURES);

        let n_docs = corpus.len() as f64;
        let mut vocabulary = HashMap::with_capacity(ranked.len());
        let mut idf = Vec::with_capacity(ranked.len());
        for (index, (term, df)) in ranked.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), index);
            // Smoothed idf, as if one extra document contained every term.
            idf.push(((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0);
        }

        let mut model = TfidfModel {
            vocabulary,
            idf,
            rows: Vec::new(),
        };
        let rows: Vec<Vec<(usize, f64)>> = docs.iter().map(|doc| model.vectorize(doc)).collect();
        model.rows = rows;
        Some(model)
    }

    /// Highest cosine similarity between `text` and any corpus document.
    /// 0.0 when the query shares no vocabulary with the corpus.
    pub fn max_similarity(&self, text: &str) -> f64 {
        let query = self.vectorize(&ngrams(text));
        if query.is_empty() {
            return 0.0;
        }
        self.rows
            .iter()
            .map(|row| sparse_dot(&query, row))
            .fold(0.0, f64::max)
    }

    /// Term counts → tf-idf weights → l2-normalized sparse vector.
    fn vectorize(&self, terms: &[String]) -> Vec<(usize, f64)> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in terms {
            if let Some(&index) = self.vocabulary.get(term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf[index]))
            .collect();
        vector.sort_unstable_by_key(|(index, _)| *index);

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut vector {
                *w /= norm;
            }
        }
        vector
    }
}

/// Lowercased word 1-grams and 2-grams, stop words removed before n-gram
/// formation so bigrams bridge over them.
fn ngrams(text: &str) -> Vec<String> {
    let words: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty() && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect();

    let mut terms = words.clone();
    for pair in words.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms
}

/// Dot product of two index-sorted sparse vectors.
fn sparse_dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let mut sum = 0.0;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(docs: &[&str]) -> Vec<String> {
        docs.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_fit_requires_two_documents() {
        assert!(TfidfModel::fit(&corpus(&["only one document"])).is_none());
        assert!(TfidfModel::fit(&[]).is_none());
    }

    #[test]
    fn test_fit_fails_on_stop_word_only_corpus() {
        assert!(TfidfModel::fit(&corpus(&["the of and", "a an or"])).is_none());
    }

    #[test]
    fn test_identical_document_scores_one() {
        let model = TfidfModel::fit(&corpus(&[
            "senior rust engineer nairobi",
            "junior accountant mombasa",
        ]))
        .unwrap();
        let sim = model.max_similarity("senior rust engineer nairobi");
        assert!((sim - 1.0).abs() < 1e-9, "sim = {sim}");
    }

    #[test]
    fn test_disjoint_document_scores_zero() {
        let model = TfidfModel::fit(&corpus(&[
            "senior rust engineer nairobi",
            "junior accountant mombasa",
        ]))
        .unwrap();
        assert_eq!(model.max_similarity("marine biologist reykjavik"), 0.0);
    }

    #[test]
    fn test_near_duplicate_scores_high() {
        let model = TfidfModel::fit(&corpus(&[
            "software engineer acme corp nairobi build distributed systems",
            "junior accountant mombasa ledgers and payroll",
        ]))
        .unwrap();
        let sim =
            model.max_similarity("software engineer acme corp nairobi build distributed platforms");
        assert!(sim > 0.8, "sim = {sim}");
    }

    #[test]
    fn test_bigrams_distinguish_word_order() {
        let model = TfidfModel::fit(&corpus(&[
            "data science role",
            "completely unrelated posting text",
        ]))
        .unwrap();
        // Same unigrams, different bigrams: similar but not identical.
        let sim = model.max_similarity("role science data");
        assert!(sim > 0.3 && sim < 1.0 - 1e-9, "sim = {sim}");
    }

    #[test]
    fn test_stop_words_carry_no_weight() {
        let model = TfidfModel::fit(&corpus(&[
            "engineer with the team",
            "accountant for the firm",
        ]))
        .unwrap();
        assert_eq!(model.max_similarity("the with for and"), 0.0);
    }
}
