use once_cell::sync::Lazy;
use regex::Regex;

static NON_SLUG_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());
static SEPARATOR_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+").unwrap());

/// Generate a URL-friendly slug from a company name.
///
/// Lowercases, drops everything that is not a word character, whitespace or
/// hyphen, collapses separator runs into one hyphen and trims hyphens from
/// both ends. Distinct names may produce the same slug.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(&lowered, "");
    let hyphenated = SEPARATOR_RUNS.replace_all(&stripped, "-");
    hyphenated.trim_matches('-').to_string()
}
