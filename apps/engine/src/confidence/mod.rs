//! Per-field confidence scoring for extracted profiles.
//!
//! Score levels:
//!   1.0  — format-validated (strict regex match)
//!   0.88 — well-formed name shape
//!   0.72 — plausible but loosely formatted
//!   0.45 — present, weak signal
//!   0.0  — field missing / empty / below its minimum
//!
//! Every scorer is a pure function into [0.0, 1.0]. The overall score is a
//! weighted mean, so it is itself bounded to [0.0, 1.0].

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ConfidenceLabel, Profile};

/// Field weights for the overall score. Contact identity fields dominate;
/// optional profile links barely move the needle.
pub const WEIGHTS: &[(&str, f64)] = &[
    ("full_name", 3.0),
    ("email", 3.0),
    ("phone", 2.0),
    ("skills", 2.5),
    ("work_experience", 2.5),
    ("education", 2.0),
    ("address", 1.0),
    ("summary", 1.0),
    ("certifications", 1.0),
    ("projects", 1.0),
    ("linkedin", 0.5),
    ("github", 0.5),
];

static STRICT_EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").unwrap());
static STRICT_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[\d\s\-()]{7,20}$").unwrap());

/// Name shape: 2-5 space-separated tokens, all capitalized, scores best;
/// a lone capitalized token is plausible; anything else is suspect.
pub fn score_name(name: &str) -> f64 {
    let name = name.trim();
    if name.chars().count() < 2 {
        return 0.0;
    }
    let words: Vec<&str> = name.split_whitespace().collect();
    let all_capitalized = words
        .iter()
        .all(|w| w.chars().next().is_some_and(char::is_uppercase));
    if (2..=5).contains(&words.len()) && all_capitalized {
        0.88
    } else if words.len() == 1 && all_capitalized {
        0.55
    } else {
        0.35
    }
}

/// 1.0 only when the whole field is one well-formed address.
pub fn score_email(email: &str) -> f64 {
    if email.is_empty() {
        0.0
    } else if STRICT_EMAIL_RE.is_match(email.trim()) {
        1.0
    } else {
        0.40
    }
}

/// Full format match with 7-15 digits validates outright; a bare plausible
/// digit count still earns partial credit.
pub fn score_phone(phone: &str) -> f64 {
    if phone.is_empty() {
        return 0.0;
    }
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if (7..=15).contains(&digits) && STRICT_PHONE_RE.is_match(phone.trim()) {
        1.0
    } else if (7..=15).contains(&digits) {
        0.72
    } else {
        0.25
    }
}

pub fn score_url(url: &str) -> f64 {
    if url.is_empty() {
        0.0
    } else if url.starts_with("http") {
        0.95
    } else {
        0.50
    }
}

/// Free-text fields score on trimmed length, gated by a field-specific
/// minimum below which the field counts as missing.
pub fn score_text_field(value: &str, min_len: usize) -> f64 {
    let len = value.trim().chars().count();
    if len < min_len {
        0.0
    } else if len >= 100 {
        0.80
    } else if len >= 30 {
        0.65
    } else {
        0.45
    }
}

/// List fields score on cardinality, gated by a field-specific minimum.
pub fn score_list_field(len: usize, min_items: usize) -> f64 {
    if len < min_items {
        0.0
    } else if len >= 5 {
        0.85
    } else if len >= 2 {
        0.70
    } else {
        0.50
    }
}

/// Weighted mean over the fields present in the map, rounded to 3 decimal
/// places. 0.0 when no weighted field is present.
pub fn compute_overall(scores: &BTreeMap<String, f64>) -> f64 {
    let mut total_weight = 0.0;
    let mut total_score = 0.0;
    for (field, weight) in WEIGHTS {
        if let Some(score) = scores.get(*field) {
            total_score += score * weight;
            total_weight += weight;
        }
    }
    if total_weight > 0.0 {
        ((total_score / total_weight) * 1000.0).round() / 1000.0
    } else {
        0.0
    }
}

/// Coarse label for a numeric score, for display and triage.
pub fn label(score: f64) -> ConfidenceLabel {
    if score >= 0.85 {
        ConfidenceLabel::High
    } else if score >= 0.55 {
        ConfidenceLabel::Medium
    } else if score > 0.0 {
        ConfidenceLabel::Low
    } else {
        ConfidenceLabel::Missing
    }
}

/// Scores every profile field plus the `"overall"` aggregate.
pub fn score_profile(profile: &Profile) -> BTreeMap<String, f64> {
    let mut scores = BTreeMap::new();
    scores.insert("full_name".to_string(), score_name(&profile.full_name));
    scores.insert("email".to_string(), score_email(&profile.email));
    scores.insert("phone".to_string(), score_phone(&profile.phone));
    scores.insert("address".to_string(), score_text_field(&profile.address, 5));
    scores.insert("linkedin".to_string(), score_url(&profile.linkedin));
    scores.insert("github".to_string(), score_url(&profile.github));
    scores.insert("summary".to_string(), score_text_field(&profile.summary, 30));
    scores.insert(
        "education".to_string(),
        score_list_field(profile.education.len(), 1),
    );
    scores.insert(
        "skills".to_string(),
        score_list_field(profile.skills.len(), 3),
    );
    scores.insert(
        "certifications".to_string(),
        score_list_field(profile.certifications.len(), 1),
    );
    scores.insert(
        "work_experience".to_string(),
        score_list_field(profile.work_experience.len(), 1),
    );
    scores.insert(
        "projects".to_string(),
        score_list_field(profile.projects.len(), 1),
    );
    let overall = compute_overall(&scores);
    scores.insert("overall".to_string(), overall);
    scores
}

/// Labels for a score map, skipping the `"overall"` aggregate.
pub fn label_scores(scores: &BTreeMap<String, f64>) -> BTreeMap<String, ConfidenceLabel> {
    scores
        .iter()
        .filter(|(field, _)| field.as_str() != "overall")
        .map(|(field, score)| (field.clone(), label(*score)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_well_formed_scores_high() {
        assert_eq!(score_name("Jane Roe"), 0.88);
        assert_eq!(score_name("Jane Van Der Berg"), 0.88);
    }

    #[test]
    fn test_name_single_capitalized_token() {
        assert_eq!(score_name("Jane"), 0.55);
    }

    #[test]
    fn test_name_lowercase_or_overlong_scores_low() {
        assert_eq!(score_name("jane roe"), 0.35);
        assert_eq!(score_name("a b c d e f g"), 0.35);
    }

    #[test]
    fn test_name_empty_or_single_char_is_missing() {
        assert_eq!(score_name(""), 0.0);
        assert_eq!(score_name("J"), 0.0);
    }

    #[test]
    fn test_email_valid_scores_exactly_one() {
        assert_eq!(score_email("jane@example.com"), 1.0);
    }

    #[test]
    fn test_email_malformed_scores_low() {
        assert_eq!(score_email("jane-at-example"), 0.40);
        assert_eq!(score_email("jane@example.com and more"), 0.40);
    }

    #[test]
    fn test_phone_strict_format_validates() {
        assert_eq!(score_phone("+1 (555) 987-6543"), 1.0);
    }

    #[test]
    fn test_phone_right_digits_wrong_format_is_partial() {
        assert_eq!(score_phone("call 5551234567"), 0.72);
    }

    #[test]
    fn test_phone_bad_digit_count() {
        assert_eq!(score_phone("123"), 0.25);
    }

    #[test]
    fn test_url_tiers() {
        assert_eq!(score_url("https://linkedin.com/in/jane"), 0.95);
        assert_eq!(score_url("linkedin.com/in/jane"), 0.50);
    }

    #[test]
    fn test_empty_fields_always_score_zero() {
        assert_eq!(score_email(""), 0.0);
        assert_eq!(score_phone(""), 0.0);
        assert_eq!(score_url(""), 0.0);
        assert_eq!(score_text_field("", 5), 0.0);
        assert_eq!(score_list_field(0, 1), 0.0);
    }

    #[test]
    fn test_text_field_below_minimum_is_missing() {
        assert_eq!(score_text_field("too short", 30), 0.0);
    }

    #[test]
    fn test_text_field_length_tiers() {
        assert_eq!(score_text_field(&"x".repeat(100), 30), 0.80);
        assert_eq!(score_text_field(&"x".repeat(40), 30), 0.65);
        assert_eq!(score_text_field(&"x".repeat(10), 5), 0.45);
    }

    #[test]
    fn test_list_field_cardinality_tiers() {
        assert_eq!(score_list_field(5, 1), 0.85);
        assert_eq!(score_list_field(3, 3), 0.70);
        assert_eq!(score_list_field(1, 1), 0.50);
        assert_eq!(score_list_field(2, 3), 0.0);
    }

    #[test]
    fn test_overall_bounded_and_one_when_perfect() {
        let mut scores = BTreeMap::new();
        for (field, _) in WEIGHTS {
            scores.insert(field.to_string(), 1.0);
        }
        assert_eq!(compute_overall(&scores), 1.0);

        scores.insert("email".to_string(), 0.333_333);
        let overall = compute_overall(&scores);
        assert!((0.0..=1.0).contains(&overall));
    }

    #[test]
    fn test_overall_ignores_absent_fields() {
        let mut scores = BTreeMap::new();
        scores.insert("email".to_string(), 1.0);
        // Only email present: the weighted mean is over email alone.
        assert_eq!(compute_overall(&scores), 1.0);
    }

    #[test]
    fn test_overall_empty_map_is_zero() {
        assert_eq!(compute_overall(&BTreeMap::new()), 0.0);
    }

    #[test]
    fn test_label_boundaries() {
        assert_eq!(label(0.85), ConfidenceLabel::High);
        assert_eq!(label(0.84), ConfidenceLabel::Medium);
        assert_eq!(label(0.55), ConfidenceLabel::Medium);
        assert_eq!(label(0.10), ConfidenceLabel::Low);
        assert_eq!(label(0.0), ConfidenceLabel::Missing);
    }

    #[test]
    fn test_score_profile_covers_all_weighted_fields() {
        let scores = score_profile(&Profile::default());
        for (field, _) in WEIGHTS {
            assert_eq!(scores.get(*field), Some(&0.0), "missing field {field}");
        }
        assert_eq!(scores.get("overall"), Some(&0.0));
    }

    #[test]
    fn test_label_scores_skips_overall() {
        let profile = Profile {
            email: "jane@example.com".to_string(),
            ..Profile::default()
        };
        let scores = score_profile(&profile);
        let labels = label_scores(&scores);
        assert_eq!(labels.get("email"), Some(&ConfidenceLabel::High));
        assert!(labels.get("overall").is_none());
        assert_eq!(labels.get("phone"), Some(&ConfidenceLabel::Missing));
    }
}
