//! Stage predicates.
//!
//! Each function inspects one side of a record. The driver in
//! [`crate::pipeline`] combines them per record: a record is rejected when
//! any of its sides fails. All thresholds are fixed.

use crate::lang::Language;
use regex::Regex;
use std::sync::LazyLock;

/// Minimum sentence length in characters.
pub const MIN_CHARS: usize = 3;

/// Maximum sentence length in characters.
pub const MAX_CHARS: usize = 100;

/// Maximum occurrences of each of `/`, `|` and `-`.
pub const MAX_SEPARATOR_COUNT: usize = 5;

/// Maximum absolute number of ASCII punctuation characters.
pub const MAX_PUNCTUATION: usize = 10;

/// Share of a sentence above which a character class counts as noise, and
/// below which a script counts as missing.
pub const DENSITY_LIMIT: f64 = 0.5;

/// Maximum source/target ratio of alphanumeric counts.
pub const MAX_BALANCE_RATIO: f64 = 2.0;

/// Smoothing term for ratios with a possibly-zero denominator.
const EPSILON: f64 = 1e-9;

// Regex patterns (compiled once using LazyLock)
static RE_SEPARATOR_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\d\-|/]").unwrap());

static RE_DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{8}").unwrap());

static RE_ALNUM_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9]{15}").unwrap());

static RE_HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").unwrap());

static RE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S*").unwrap());

static RE_DIMENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{3,4}x[0-9]{3,4}").unwrap());

/// Characters whose presence marks a line as corrupted.
const SPECIAL_MARKERS: &[&str] = &[
    r"\x",      // Escaped byte left over from a bad decode
    "\u{00A0}", // No-break space
    "\u{3000}", // Ideographic space
    "▅",
];

/// Emoji blocks (inclusive).
const EMOJI_RANGES: &[(char, char)] = &[
    ('\u{1F600}', '\u{1F64F}'), // Emoticons
    ('\u{1F300}', '\u{1F5FF}'), // Symbols & pictographs
    ('\u{1F680}', '\u{1F6FF}'), // Transport & map symbols
    ('\u{1F1E0}', '\u{1F1FF}'), // Regional indicators (flags)
];

/// Length in Unicode scalar values.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// `count / len(text)`, or 0 for empty text.
fn share(count: usize, text: &str) -> f64 {
    match char_len(text) {
        0 => 0.0,
        len => count as f64 / len as f64,
    }
}

/// Check if the sentence length is within `MIN_CHARS..=MAX_CHARS`
pub fn within_length_bounds(text: &str) -> bool {
    (MIN_CHARS..=MAX_CHARS).contains(&char_len(text))
}

/// Too many path/table separators, or mostly digits and separators.
pub fn has_separator_noise(text: &str) -> bool {
    if ['/', '|', '-']
        .iter()
        .any(|&sep| text.matches(sep).count() > MAX_SEPARATOR_COUNT)
    {
        return true;
    }

    share(RE_SEPARATOR_CHARS.find_iter(text).count(), text) > DENSITY_LIMIT
}

/// Contains a literal `\x` escape, a no-break or ideographic space, or `▅`.
pub fn has_special_chars(text: &str) -> bool {
    SPECIAL_MARKERS.iter().any(|marker| text.contains(marker))
}

/// Number of ASCII punctuation characters.
pub fn punctuation_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_ascii_punctuation()).count()
}

/// More than half punctuation, or more than `MAX_PUNCTUATION` marks.
pub fn is_punctuation_heavy(text: &str) -> bool {
    let count = punctuation_count(text);
    count as f64 / (char_len(text) as f64 + EPSILON) > DENSITY_LIMIT || count > MAX_PUNCTUATION
}

/// Number of ASCII letters and digits.
pub fn alphanumeric_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_ascii_alphanumeric()).count()
}

/// Long digit run (IDs, phone numbers), long alphanumeric run (hashes,
/// tokens), or mostly Latin letters and digits.
pub fn is_alphanumeric_heavy(text: &str) -> bool {
    RE_DIGIT_RUN.is_match(text)
        || RE_ALNUM_RUN.is_match(text)
        || share(alphanumeric_count(text), text) > DENSITY_LIMIT
}

/// Source and target disagree on how much Latin/digit content they carry.
pub fn is_alphanumeric_unbalanced(source: &str, target: &str) -> bool {
    let src = alphanumeric_count(source) as f64;
    let tgt = alphanumeric_count(target) as f64;
    src / (tgt + EPSILON) > MAX_BALANCE_RATIO || tgt / (src + EPSILON) > MAX_BALANCE_RATIO
}

/// Contains an HTML-like tag or an http(s) URL.
pub fn has_markup(text: &str) -> bool {
    RE_HTML_TAG.is_match(text) || text.contains("http://") || text.contains("https://")
}

/// Removes HTML-like tags and http(s) URLs, keeping the rest of the text.
pub fn strip_markup(text: &str) -> String {
    let without_tags = RE_HTML_TAG.replace_all(text.trim(), "");
    RE_URL.replace_all(&without_tags, "").trim().to_string()
}

/// Contains an image-dimension token such as `1920x1080`.
pub fn has_dimension_pattern(text: &str) -> bool {
    RE_DIMENSION.is_match(text)
}

/// Share of characters belonging to `language`'s script.
pub fn script_ratio(text: &str, language: Language) -> f64 {
    share(
        text.chars().filter(|&c| language.is_script_char(c)).count(),
        text,
    )
}

/// Too little of `language`'s script. Languages without a script table
/// never fail this check.
pub fn is_script_sparse(text: &str, language: Language) -> bool {
    language.has_script() && script_ratio(text, language) < DENSITY_LIMIT
}

/// Check if character falls in one of the emoji blocks
pub fn is_emoji(c: char) -> bool {
    EMOJI_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&c))
}

/// Contains at least one emoji.
pub fn has_emoji(text: &str) -> bool {
    text.chars().any(is_emoji)
}
