//! Language identification.
//!
//! The pipeline only needs a top-1 language guess per sentence. The
//! [`LanguageClassifier`] trait is the seam; [`WhatlangClassifier`] is the
//! default implementation.

use crate::error::Result;
use crate::lang::Language;
use whatlang::Lang;

/// Predicts the language of a sentence.
pub trait LanguageClassifier {
    /// Returns the most likely language, or `None` when the prediction is
    /// not one of the supported [`Language`]s.
    ///
    /// An `Err` aborts the pipeline run.
    fn classify(&self, text: &str) -> Result<Option<Language>>;
}

impl<F> LanguageClassifier for F
where
    F: Fn(&str) -> Option<Language>,
{
    fn classify(&self, text: &str) -> Result<Option<Language>> {
        Ok(self(text))
    }
}

/// Classifier backed by the `whatlang` trigram detector.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangClassifier;

impl WhatlangClassifier {
    /// Creates a new classifier.
    pub fn new() -> Self {
        Self
    }
}

impl LanguageClassifier for WhatlangClassifier {
    fn classify(&self, text: &str) -> Result<Option<Language>> {
        Ok(whatlang::detect(text).and_then(|info| from_whatlang(info.lang())))
    }
}

/// Maps a whatlang language onto [`Language`] by ISO 639-3 code.
fn from_whatlang(lang: Lang) -> Option<Language> {
    Language::ALL
        .into_iter()
        .find(|language| language.iso639_3() == lang.code())
}
