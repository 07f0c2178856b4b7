//! Error types for mtclean library.

use std::io;
use thiserror::Error;

/// Result type alias for mtclean operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for mtclean library.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading or writing corpus files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Source and target sequences lost index alignment.
    ///
    /// Raised after any stage whose output breaks the pairing. This always
    /// indicates a bug in a stage and aborts the run.
    #[error("Corpus misaligned after {stage}: {source_len} source vs {target_len} target lines")]
    Misaligned {
        stage: String,
        source_len: usize,
        target_len: usize,
    },

    /// The language code is not one the pipeline knows about.
    #[error("Unsupported language code: {0}")]
    UnsupportedLanguage(String),

    /// The corpus shape does not match the configured languages
    /// (e.g. a parallel corpus run with a single language).
    #[error("Mode mismatch: {0}")]
    ModeMismatch(String),

    /// The language classifier failed on an input.
    #[error("Language classifier error: {0}")]
    Classifier(String),
}
