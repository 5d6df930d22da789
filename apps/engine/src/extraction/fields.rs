//! Field extractors: pure functions from (normalized text, optional section
//! text) to typed values.
//!
//! Failure semantics are uniform — extractors never fail; absent source text
//! or no match yields the type's zero value. Each list extractor caps its
//! output so garbled input cannot produce unbounded entries.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::skill_vocabulary;
use crate::extraction::entities::{Entity, EntityLabel};
use crate::models::{Certification, EducationEntry, ExperienceEntry, ProjectEntry};

pub const MAX_EDUCATION_ENTRIES: usize = 6;
pub const MAX_CERTIFICATION_ENTRIES: usize = 10;
pub const MAX_EXPERIENCE_ENTRIES: usize = 8;
pub const MAX_PROJECT_ENTRIES: usize = 6;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}").unwrap());
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\+?[\d\-()\s]{7,20}").unwrap());
static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+|www\.\S+").unwrap());
static LINKEDIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)linkedin\.com/in/[a-zA-Z0-9\-]+").unwrap());
static GITHUB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)github\.com/[a-zA-Z0-9\-]+").unwrap());
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());
static DEGREE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(bachelor|master|phd|doctorate|associate|diploma|certificate|b\.?sc|m\.?sc|m\.?a|b\.?a|b\.?eng|m\.?eng|mba)\b",
    )
    .unwrap()
});
static DATE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{4}|\d{4}\s*[-–—]\s*(?:\d{4}|present|current|now)",
    )
    .unwrap()
});
static TECH_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)tech(?:nologies|nology|stack)?\s*[:\-]\s*(.+)").unwrap());
static LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z][a-z]+(?: [A-Z][a-z]+)*,\s*[A-Z][a-z]+(?: [A-Z][a-z]+)*(?:,\s*[A-Z]{2,})?")
        .unwrap()
});
static YEARS_DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*\+?\s*years?").unwrap());
static YEARS_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(one|two|three|four|five|six|seven|eight|nine|ten)\s+years?").unwrap()
});
static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Word-boundary matchers for every vocabulary skill, compiled once.
static SKILL_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    skill_vocabulary()
        .into_iter()
        .map(|skill| {
            let pattern = format!(r"\b{}\b", regex::escape(skill));
            (skill, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// First well-formed email address in the text, or empty.
pub fn extract_email(text: &str) -> String {
    EMAIL_RE
        .find(text)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Among loose phone-shaped substrings (7–20 chars of digits/separators),
/// the longest whose digit count lands in [7, 15]. Empty if none qualify.
pub fn extract_phone(text: &str) -> String {
    let mut candidates: Vec<&str> = PHONE_RE.find_iter(text).map(|m| m.as_str()).collect();
    candidates.sort_by_key(|c| std::cmp::Reverse(c.len()));
    for candidate in candidates {
        let digits = candidate.chars().filter(|c| c.is_ascii_digit()).count();
        if (7..=15).contains(&digits) {
            return candidate.trim().to_string();
        }
    }
    String::new()
}

pub fn extract_linkedin(text: &str) -> String {
    LINKEDIN_RE
        .find(text)
        .map(|m| format!("https://{}", m.as_str()))
        .unwrap_or_default()
}

pub fn extract_github(text: &str) -> String {
    GITHUB_RE
        .find(text)
        .map(|m| format!("https://{}", m.as_str()))
        .unwrap_or_default()
}

/// Candidate name.
///
/// Strategy: a PERSON span from the entity stage is used when it has 2–5
/// words and appears within the first 15 lines. Otherwise: the first of the
/// first 8 non-empty lines that carries no email/phone/URL substring, has at
/// most 5 words, and contains no digit.
pub fn extract_name(text: &str, entities: &[Entity]) -> String {
    let first_chunk: String = text.lines().take(15).collect::<Vec<_>>().join("\n");

    for entity in entities {
        if entity.label != EntityLabel::Person {
            continue;
        }
        let span = entity.text.trim();
        let words = span.split_whitespace().count();
        if (2..=5).contains(&words) && first_chunk.contains(span) {
            return span.to_string();
        }
    }

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()).take(8) {
        if line.len() > 3
            && !EMAIL_RE.is_match(line)
            && !PHONE_RE.is_match(line)
            && !URL_RE.is_match(line)
            && line.split_whitespace().count() <= 5
            && !line.chars().any(|c| c.is_ascii_digit())
        {
            return line.to_string();
        }
    }
    String::new()
}

/// Candidate location: a LOCATION entity if present, else a comma-separated
/// Title-Case run in the header/contact text.
pub fn extract_address(header_text: &str, entities: &[Entity]) -> String {
    for entity in entities {
        if entity.label == EntityLabel::Location && !entity.text.trim().is_empty() {
            return entity.text.trim().to_string();
        }
    }
    LOCATION_RE
        .find(header_text)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Case-insensitive whole-word vocabulary matching plus any SKILL entities.
/// Returns title-cased, sorted, deduplicated skills.
pub fn extract_skills(text: &str, entities: &[Entity]) -> Vec<String> {
    let text_lower = text.to_lowercase();
    let mut found: Vec<String> = SKILL_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(&text_lower))
        .map(|(skill, _)| title_case(skill))
        .collect();

    for entity in entities {
        if entity.label == EntityLabel::Skill && !entity.text.trim().is_empty() {
            found.push(title_case(entity.text.trim()));
        }
    }

    found.sort();
    found.dedup();
    found
}

/// Total claimed years of experience: "5 years" / "5+ years", number-word
/// forms ("four years"), or an explicit "year of experience" labelled line.
pub fn extract_experience_years(text: &str) -> u32 {
    let lower = text.to_lowercase();

    if let Some(caps) = YEARS_DIGIT_RE.captures(&lower) {
        return caps[1].parse().unwrap_or(0);
    }

    if let Some(caps) = YEARS_WORD_RE.captures(&lower) {
        return match &caps[1] {
            "one" => 1,
            "two" => 2,
            "three" => 3,
            "four" => 4,
            "five" => 5,
            "six" => 6,
            "seven" => 7,
            "eight" => 8,
            "nine" => 9,
            "ten" => 10,
            _ => 0,
        };
    }

    for line in lower.lines() {
        if line.trim_start().starts_with("year of experience") {
            if let Some(m) = DIGITS_RE.find(line) {
                return m.as_str().parse().unwrap_or(0);
            }
        }
    }
    0
}

/// Education entries from the education section. Blocks start at each
/// non-blank-leading line; within a block the last 4-digit year wins,
/// degree keywords are matched against a fixed list, and the first line is
/// taken as the institution.
pub fn extract_education(section: &str) -> Vec<EducationEntry> {
    if section.trim().is_empty() {
        return Vec::new();
    }

    let mut entries = Vec::new();
    for block in split_on_unindented_lines(section) {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }
        let year = YEAR_RE
            .find_iter(block)
            .last()
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let degree = DEGREE_RE
            .find(block)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        let institution = block
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default()
            .to_string();

        entries.push(EducationEntry {
            institution,
            degree,
            field: String::new(),
            year,
            raw: block.to_string(),
        });
        if entries.len() == MAX_EDUCATION_ENTRIES {
            break;
        }
    }
    entries
}

/// Certifications: one entry per line of at least 5 chars; the last 4-digit
/// year on the line becomes the entry year.
pub fn extract_certifications(section: &str) -> Vec<Certification> {
    section
        .lines()
        .map(str::trim)
        .filter(|line| line.len() >= 5)
        .take(MAX_CERTIFICATION_ENTRIES)
        .map(|line| Certification {
            name: line.to_string(),
            issuer: String::new(),
            year: YEAR_RE
                .find_iter(line)
                .last()
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        })
        .collect()
}

/// Work experience: blank-line-separated blocks of at least 15 chars.
/// First line is the role, second the company; date ranges found anywhere in
/// the block are joined with " | ".
pub fn extract_experience(section: &str) -> Vec<ExperienceEntry> {
    if section.trim().is_empty() {
        return Vec::new();
    }

    let mut entries = Vec::new();
    for block in section.split("\n\n") {
        let block = block.trim();
        if block.is_empty() || block.len() < 15 {
            continue;
        }
        let lines: Vec<&str> = block
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let dates: Vec<&str> = DATE_RANGE_RE.find_iter(block).map(|m| m.as_str()).collect();

        entries.push(ExperienceEntry {
            role: lines.first().copied().unwrap_or_default().to_string(),
            company: lines.get(1).copied().unwrap_or_default().to_string(),
            dates: dates.join(" | "),
            description: block.to_string(),
        });
        if entries.len() == MAX_EXPERIENCE_ENTRIES {
            break;
        }
    }
    entries
}

/// Projects: blank-line-separated blocks of at least 10 chars. First line is
/// the project name; a "Technologies:" label yields the technology list.
pub fn extract_projects(section: &str) -> Vec<ProjectEntry> {
    if section.trim().is_empty() {
        return Vec::new();
    }

    let mut entries = Vec::new();
    for block in section.split("\n\n") {
        let block = block.trim();
        if block.is_empty() || block.len() < 10 {
            continue;
        }
        let name = block
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default()
            .to_string();
        let technologies = TECH_LABEL_RE
            .captures(block)
            .map(|c| c[1].trim().to_string())
            .unwrap_or_default();

        entries.push(ProjectEntry {
            name,
            description: block.to_string(),
            technologies,
        });
        if entries.len() == MAX_PROJECT_ENTRIES {
            break;
        }
    }
    entries
}

/// Title-cases a string the way the skill set is canonicalized: a letter is
/// uppercased when it follows a non-letter, lowercased otherwise
/// ("machine learning" → "Machine Learning", "sql" → "Sql").
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Splits text into blocks that each begin at a line starting with a
/// non-whitespace character. Continuation lines (indented or blank) stay
/// attached to the preceding block.
fn split_on_unindented_lines(text: &str) -> Vec<String> {
    let mut blocks: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        let starts_block = line.chars().next().is_some_and(|c| !c.is_whitespace());
        if starts_block && !current.is_empty() {
            blocks.push(current.join("\n"));
            current.clear();
        }
        current.push(line);
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }
    blocks
}
