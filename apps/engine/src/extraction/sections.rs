use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Section label for content appearing before the first recognized header.
pub const HEADER_SECTION: &str = "header";

/// Header patterns in fixed priority order: when a line matches more than one
/// pattern, the first entry here wins. Patterns are anchored whole-line so
/// prose containing a keyword mid-sentence never opens a section.
static SECTION_HEADERS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    vec![
        (
            "education",
            Regex::new(r"(?i)^\s*(education|academic|qualification|degree)s?\s*$").unwrap(),
        ),
        (
            "work_experience",
            Regex::new(
                r"(?i)^\s*(work\s*experience|employment|experience|career\s*history|professional\s*experience)\s*$",
            )
            .unwrap(),
        ),
        (
            "skills",
            Regex::new(r"(?i)^\s*(skills?|technical\s*skills?|core\s*competenc\w*|expertise)\s*$")
                .unwrap(),
        ),
        (
            "certifications",
            Regex::new(r"(?i)^\s*(certif\w*|licenses?|credentials?|accreditations?)\s*$").unwrap(),
        ),
        (
            "projects",
            Regex::new(r"(?i)^\s*(projects?|portfolio|key\s*projects?)\s*$").unwrap(),
        ),
        (
            "summary",
            Regex::new(r"(?i)^\s*(summary|objective|profile|about\s*me|professional\s*summary)\s*$")
                .unwrap(),
        ),
        (
            "contact",
            Regex::new(r"(?i)^\s*(contact|personal\s*information|personal\s*details)\s*$").unwrap(),
        ),
        (
            "references",
            Regex::new(r"(?i)^\s*(references?|referees?)\s*$").unwrap(),
        ),
    ]
});

/// Splits normalized résumé text into named sections.
///
/// Scans lines top to bottom; a header line closes the current buffer (saved
/// under its label, `"header"` before the first recognized header) and opens
/// a new one. Sections never encountered are absent from the map — callers
/// default to the empty string.
pub fn split_sections(text: &str) -> HashMap<String, String> {
    let mut sections = HashMap::new();
    let mut current_name = HEADER_SECTION;
    let mut current_lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        let matched = SECTION_HEADERS
            .iter()
            .find(|(_, pattern)| pattern.is_match(line));
        match matched {
            Some((name, _)) => {
                sections.insert(current_name.to_string(), current_lines.join("\n").trim().to_string());
                current_name = name;
                current_lines.clear();
            }
            None => current_lines.push(line),
        }
    }
    sections.insert(current_name.to_string(), current_lines.join("\n").trim().to_string());

    sections
}
