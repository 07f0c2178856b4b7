//! Language configuration.
//!
//! Languages are identified by ISO 639-1 code (ISO 639-3 is also accepted
//! when parsing). A language may carry a script
//! range table used by the script-ratio stage; languages without one skip
//! that stage.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Languages the pipeline can be configured for.
///
/// Covers every language the default classifier can predict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Chinese,
    Japanese,
    Korean,
    English,
    French,
    German,
    Spanish,
    Portuguese,
    Italian,
    Russian,
    Vietnamese,
    Arabic,
    Afrikaans,
    Akan,
    Amharic,
    Armenian,
    Azerbaijani,
    Belarusian,
    Bengali,
    Bulgarian,
    Catalan,
    Croatian,
    Czech,
    Danish,
    Dutch,
    Esperanto,
    Estonian,
    Finnish,
    Georgian,
    Greek,
    Gujarati,
    Hebrew,
    Hindi,
    Hungarian,
    Indonesian,
    Javanese,
    Kannada,
    Khmer,
    Latin,
    Latvian,
    Lithuanian,
    Macedonian,
    Malayalam,
    Marathi,
    Burmese,
    Nepali,
    NorwegianBokmal,
    Oriya,
    Punjabi,
    Persian,
    Polish,
    Romanian,
    Serbian,
    Shona,
    Sinhala,
    Slovak,
    Slovene,
    Swedish,
    Tagalog,
    Tamil,
    Telugu,
    Thai,
    Turkish,
    Turkmen,
    Ukrainian,
    Urdu,
    Uzbek,
    Yiddish,
    Zulu,
}

/// Inclusive code point ranges.
type ScriptRanges = &'static [(char, char)];

/// CJK Unified Ideographs subset `一`..=`龥`
const HAN_RANGES: ScriptRanges = &[('\u{4E00}', '\u{9FA5}')];

/// Hiragana `ぁ`..=`ん`, Katakana `ァ`..=`ン`, Kanji `一`..=`龥`
const JAPANESE_RANGES: ScriptRanges = &[
    ('\u{3041}', '\u{3093}'),
    ('\u{30A1}', '\u{30F3}'),
    ('\u{4E00}', '\u{9FA5}'),
];

impl Language {
    /// All supported languages.
    pub const ALL: [Language; 69] = [
        Language::Chinese,
        Language::Japanese,
        Language::Korean,
        Language::English,
        Language::French,
        Language::German,
        Language::Spanish,
        Language::Portuguese,
        Language::Italian,
        Language::Russian,
        Language::Vietnamese,
        Language::Arabic,
        Language::Afrikaans,
        Language::Akan,
        Language::Amharic,
        Language::Armenian,
        Language::Azerbaijani,
        Language::Belarusian,
        Language::Bengali,
        Language::Bulgarian,
        Language::Catalan,
        Language::Croatian,
        Language::Czech,
        Language::Danish,
        Language::Dutch,
        Language::Esperanto,
        Language::Estonian,
        Language::Finnish,
        Language::Georgian,
        Language::Greek,
        Language::Gujarati,
        Language::Hebrew,
        Language::Hindi,
        Language::Hungarian,
        Language::Indonesian,
        Language::Javanese,
        Language::Kannada,
        Language::Khmer,
        Language::Latin,
        Language::Latvian,
        Language::Lithuanian,
        Language::Macedonian,
        Language::Malayalam,
        Language::Marathi,
        Language::Burmese,
        Language::Nepali,
        Language::NorwegianBokmal,
        Language::Oriya,
        Language::Punjabi,
        Language::Persian,
        Language::Polish,
        Language::Romanian,
        Language::Serbian,
        Language::Shona,
        Language::Sinhala,
        Language::Slovak,
        Language::Slovene,
        Language::Swedish,
        Language::Tagalog,
        Language::Tamil,
        Language::Telugu,
        Language::Thai,
        Language::Turkish,
        Language::Turkmen,
        Language::Ukrainian,
        Language::Urdu,
        Language::Uzbek,
        Language::Yiddish,
        Language::Zulu,
    ];

    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Chinese => "zh",
            Language::Japanese => "ja",
            Language::Korean => "ko",
            Language::English => "en",
            Language::French => "fr",
            Language::German => "de",
            Language::Spanish => "es",
            Language::Portuguese => "pt",
            Language::Italian => "it",
            Language::Russian => "ru",
            Language::Vietnamese => "vi",
            Language::Arabic => "ar",
            Language::Afrikaans => "af",
            Language::Akan => "ak",
            Language::Amharic => "am",
            Language::Armenian => "hy",
            Language::Azerbaijani => "az",
            Language::Belarusian => "be",
            Language::Bengali => "bn",
            Language::Bulgarian => "bg",
            Language::Catalan => "ca",
            Language::Croatian => "hr",
            Language::Czech => "cs",
            Language::Danish => "da",
            Language::Dutch => "nl",
            Language::Esperanto => "eo",
            Language::Estonian => "et",
            Language::Finnish => "fi",
            Language::Georgian => "ka",
            Language::Greek => "el",
            Language::Gujarati => "gu",
            Language::Hebrew => "he",
            Language::Hindi => "hi",
            Language::Hungarian => "hu",
            Language::Indonesian => "id",
            Language::Javanese => "jv",
            Language::Kannada => "kn",
            Language::Khmer => "km",
            Language::Latin => "la",
            Language::Latvian => "lv",
            Language::Lithuanian => "lt",
            Language::Macedonian => "mk",
            Language::Malayalam => "ml",
            Language::Marathi => "mr",
            Language::Burmese => "my",
            Language::Nepali => "ne",
            Language::NorwegianBokmal => "nb",
            Language::Oriya => "or",
            Language::Punjabi => "pa",
            Language::Persian => "fa",
            Language::Polish => "pl",
            Language::Romanian => "ro",
            Language::Serbian => "sr",
            Language::Shona => "sn",
            Language::Sinhala => "si",
            Language::Slovak => "sk",
            Language::Slovene => "sl",
            Language::Swedish => "sv",
            Language::Tagalog => "tl",
            Language::Tamil => "ta",
            Language::Telugu => "te",
            Language::Thai => "th",
            Language::Turkish => "tr",
            Language::Turkmen => "tk",
            Language::Ukrainian => "uk",
            Language::Urdu => "ur",
            Language::Uzbek => "uz",
            Language::Yiddish => "yi",
            Language::Zulu => "zu",
        }
    }

    /// ISO 639-3 code, as reported by the classifier.
    pub fn iso639_3(&self) -> &'static str {
        match self {
            Language::Chinese => "cmn",
            Language::Japanese => "jpn",
            Language::Korean => "kor",
            Language::English => "eng",
            Language::French => "fra",
            Language::German => "deu",
            Language::Spanish => "spa",
            Language::Portuguese => "por",
            Language::Italian => "ita",
            Language::Russian => "rus",
            Language::Vietnamese => "vie",
            Language::Arabic => "ara",
            Language::Afrikaans => "afr",
            Language::Akan => "aka",
            Language::Amharic => "amh",
            Language::Armenian => "hye",
            Language::Azerbaijani => "aze",
            Language::Belarusian => "bel",
            Language::Bengali => "ben",
            Language::Bulgarian => "bul",
            Language::Catalan => "cat",
            Language::Croatian => "hrv",
            Language::Czech => "ces",
            Language::Danish => "dan",
            Language::Dutch => "nld",
            Language::Esperanto => "epo",
            Language::Estonian => "est",
            Language::Finnish => "fin",
            Language::Georgian => "kat",
            Language::Greek => "ell",
            Language::Gujarati => "guj",
            Language::Hebrew => "heb",
            Language::Hindi => "hin",
            Language::Hungarian => "hun",
            Language::Indonesian => "ind",
            Language::Javanese => "jav",
            Language::Kannada => "kan",
            Language::Khmer => "khm",
            Language::Latin => "lat",
            Language::Latvian => "lav",
            Language::Lithuanian => "lit",
            Language::Macedonian => "mkd",
            Language::Malayalam => "mal",
            Language::Marathi => "mar",
            Language::Burmese => "mya",
            Language::Nepali => "nep",
            Language::NorwegianBokmal => "nob",
            Language::Oriya => "ori",
            Language::Punjabi => "pan",
            Language::Persian => "pes",
            Language::Polish => "pol",
            Language::Romanian => "ron",
            Language::Serbian => "srp",
            Language::Shona => "sna",
            Language::Sinhala => "sin",
            Language::Slovak => "slk",
            Language::Slovene => "slv",
            Language::Swedish => "swe",
            Language::Tagalog => "tgl",
            Language::Tamil => "tam",
            Language::Telugu => "tel",
            Language::Thai => "tha",
            Language::Turkish => "tur",
            Language::Turkmen => "tuk",
            Language::Ukrainian => "ukr",
            Language::Urdu => "urd",
            Language::Uzbek => "uzb",
            Language::Yiddish => "yid",
            Language::Zulu => "zul",
        }
    }

    /// Script ranges checked by the script-ratio stage, if any.
    fn script_ranges(&self) -> Option<ScriptRanges> {
        match self {
            Language::Chinese => Some(HAN_RANGES),
            Language::Japanese => Some(JAPANESE_RANGES),
            _ => None,
        }
    }

    /// Returns true if this language has a script-ratio check.
    pub fn has_script(&self) -> bool {
        self.script_ranges().is_some()
    }

    /// Returns true if `c` belongs to this language's script.
    ///
    /// Always false for languages without a script table.
    pub fn is_script_char(&self, c: char) -> bool {
        self.script_ranges()
            .is_some_and(|ranges| ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&c)))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == code || lang.iso639_3() == code)
            .ok_or_else(|| Error::UnsupportedLanguage(s.to_string()))
    }
}

/// Source/target languages of a parallel corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguagePair {
    pub source: Language,
    pub target: Language,
}

impl LanguagePair {
    /// Creates a new language pair.
    pub fn new(source: Language, target: Language) -> Self {
        Self { source, target }
    }
}

impl Default for LanguagePair {
    /// Chinese to Japanese.
    fn default() -> Self {
        Self::new(Language::Chinese, Language::Japanese)
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.source, self.target)
    }
}

/// Languages the pipeline expects, matching the corpus shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageSelection {
    /// Monolingual corpus in one language.
    Mono(Language),
    /// Parallel corpus.
    Parallel(LanguagePair),
}

impl LanguageSelection {
    /// Expected language for the source side.
    pub fn source(&self) -> Language {
        match self {
            LanguageSelection::Mono(lang) => *lang,
            LanguageSelection::Parallel(pair) => pair.source,
        }
    }

    /// Expected language for the target side, if parallel.
    pub fn target(&self) -> Option<Language> {
        match self {
            LanguageSelection::Mono(_) => None,
            LanguageSelection::Parallel(pair) => Some(pair.target),
        }
    }

    /// Returns true for a parallel selection.
    pub fn is_parallel(&self) -> bool {
        matches!(self, LanguageSelection::Parallel(_))
    }
}

impl Default for LanguageSelection {
    fn default() -> Self {
        LanguageSelection::Parallel(LanguagePair::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("zh".parse::<Language>().unwrap(), Language::Chinese);
        assert_eq!("JA".parse::<Language>().unwrap(), Language::Japanese);
        assert!(matches!(
            "xx".parse::<Language>(),
            Err(Error::UnsupportedLanguage(code)) if code == "xx"
        ));
    }

    #[test]
    fn test_parse_three_letter_codes() {
        assert_eq!("cmn".parse::<Language>().unwrap(), Language::Chinese);
        assert_eq!("tha".parse::<Language>().unwrap(), Language::Thai);
        assert_eq!("nl".parse::<Language>().unwrap(), Language::Dutch);
    }

    #[test]
    fn test_code_round_trip() {
        for lang in Language::ALL {
            assert_eq!(lang.to_string().parse::<Language>().unwrap(), lang);
        }
    }

    #[test]
    fn test_chinese_script() {
        let zh = Language::Chinese;
        assert!(zh.is_script_char('中'));
        assert!(!zh.is_script_char('の'));
        assert!(!zh.is_script_char('a'));
    }

    #[test]
    fn test_japanese_script() {
        let ja = Language::Japanese;
        assert!(ja.is_script_char('の'));
        assert!(ja.is_script_char('カ'));
        assert!(ja.is_script_char('日'));
        assert!(!ja.is_script_char('ー')); // Prolonged sound mark is outside ァ-ン
    }

    #[test]
    fn test_no_script_for_english() {
        assert!(!Language::English.has_script());
        assert!(!Language::English.is_script_char('a'));
    }

    #[test]
    fn test_default_pair() {
        assert_eq!(LanguagePair::default().to_string(), "zh-ja");
    }
}
