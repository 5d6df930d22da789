use std::sync::LazyLock;

use regex::Regex;

static EXCESS_NEWLINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());
static HORIZONTAL_WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]{2,}").unwrap());

/// Cleans raw extracted text of common OCR artifacts and whitespace noise.
///
/// Steps run in a fixed order:
/// 1. stray `|` → `l` (frequent OCR misread),
/// 2. single line breaks joined into spaces, blank-line paragraph breaks kept,
/// 3. runs of 3+ newlines collapsed to exactly 2,
/// 4. runs of horizontal whitespace collapsed to one space,
/// 5. leading/trailing whitespace trimmed.
///
/// Total function: never fails, empty input yields empty output.
pub fn normalize_text(text: &str) -> String {
    let text = text.replace('|', "l");
    let text = join_single_breaks(&text);
    let text = EXCESS_NEWLINES_RE.replace_all(&text, "\n\n");
    let text = HORIZONTAL_WS_RE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Replaces each newline whose neighbors are both non-newline characters with
/// a space. Done with a manual scan: the `regex` crate has no lookaround.
fn join_single_breaks(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == '\n' {
            let prev_nl = i > 0 && chars[i - 1] == '\n';
            let next_nl = i + 1 < chars.len() && chars[i + 1] == '\n';
            if !prev_nl && !next_nl {
                out.push(' ');
                continue;
            }
        }
        out.push(c);
    }
    out
}
