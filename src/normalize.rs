//! Line normalization.
//!
//! The first stage of the chain: NFKC compatibility normalization, then
//! removal of ASCII spaces and invisible format characters.

use unicode_normalization::UnicodeNormalization;

/// Invisible control/format characters stripped from every line.
const INVISIBLE_CHARS: &[char] = &[
    '\u{200D}', // Zero width joiner
    '\u{FEFF}', // BOM / zero width no-break space
    '\u{200B}', // Zero width space
    '\u{00AD}', // Soft hyphen
    '\u{202C}', // Pop directional formatting
    '\u{202D}', // Left-to-right override
    '\u{200C}', // Zero width non-joiner
    '\u{202A}', // Left-to-right embedding
    '\u{200E}', // Left-to-right mark
    '\u{FDD3}', // Noncharacter
];

/// Normalizes one line.
///
/// - Trim surrounding whitespace
/// - Unicode NFKC normalization
/// - Remove every ASCII space (NFKC turns U+00A0 and U+3000 into spaces, so
///   those go too)
/// - Remove [`INVISIBLE_CHARS`]
///
/// Removing characters can leave a sequence that NFKC would still compose,
/// so the pass repeats until the output stops changing. This keeps
/// `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(line: &str) -> String {
    let mut current = normalize_once(line);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_once(line: &str) -> String {
    let mut result = String::with_capacity(line.len());

    for c in line.trim().nfkc() {
        if c == ' ' || is_invisible(c) {
            continue;
        }
        result.push(c);
    }

    let trimmed = result.trim();
    if trimmed.len() == result.len() {
        result
    } else {
        trimmed.to_string()
    }
}

/// Check if character is one of the stripped invisible characters
fn is_invisible(c: char) -> bool {
    INVISIBLE_CHARS.contains(&c)
}
