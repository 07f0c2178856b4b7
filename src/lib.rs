//! # mtclean
//!
//! A rule-based cleaning pipeline for machine-translation training corpora.
//!
//! A corpus is either monolingual (one sentence per record) or parallel
//! (aligned source/target pairs). It passes through a fixed chain of
//! normalization and filtering stages. Surviving records are written to
//! `<input>.clean`; records rejected by reviewable stages of a parallel run
//! are written to `<input>.trash`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mtclean::{clean_parallel, LanguagePair, PipelineOptions};
//!
//! fn main() -> mtclean::Result<()> {
//!     let options = PipelineOptions::parallel(LanguagePair::default());
//!     let outcome = clean_parallel("train.zh", "train.ja", options)?;
//!
//!     println!("{} pairs kept, {} in trash", outcome.clean.len(), outcome.trash.len());
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod corpus;
pub mod error;
pub mod filters;
pub mod io;
pub mod lang;
pub mod normalize;
pub mod pipeline;

// Re-exports
pub use classify::{LanguageClassifier, WhatlangClassifier};
pub use corpus::{Corpus, Record};
pub use error::{Error, Result};
pub use lang::{Language, LanguagePair, LanguageSelection};
pub use normalize::normalize;
pub use pipeline::{
    MarkupMode, Outcome, Pipeline, PipelineEvent, PipelineOptions, Routing, Stage, StageOutput,
    StageReport,
};

use std::path::Path;

/// Cleans a monolingual corpus file and writes `<path>.clean`.
///
/// # Example
///
/// ```no_run
/// use mtclean::{clean_mono, Language, PipelineOptions};
///
/// let outcome = clean_mono("news.zh", PipelineOptions::mono(Language::Chinese))?;
/// println!("Kept {} sentences", outcome.clean.len());
/// # Ok::<(), mtclean::Error>(())
/// ```
pub fn clean_mono(path: impl AsRef<Path>, options: PipelineOptions) -> Result<Outcome> {
    let path = path.as_ref();
    let corpus = io::read_corpus_mono(path)?;
    let outcome = Pipeline::with_options(options).run(corpus)?;
    io::write_outcome(&outcome, path, None)?;
    Ok(outcome)
}

/// Cleans a parallel corpus and writes `.clean` and `.trash` files for
/// both sides.
pub fn clean_parallel(
    source: impl AsRef<Path>,
    target: impl AsRef<Path>,
    options: PipelineOptions,
) -> Result<Outcome> {
    let (source, target) = (source.as_ref(), target.as_ref());
    let corpus = io::read_corpus_parallel(source, target)?;
    let outcome = Pipeline::with_options(options).run(corpus)?;
    io::write_outcome(&outcome, source, Some(target))?;
    Ok(outcome)
}
