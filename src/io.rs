//! Corpus file reading and writing.
//!
//! Corpora are UTF-8 text files with one sentence per line. Outputs are
//! written next to their input as `<input>.clean` and `<input>.trash`.

use crate::corpus::Corpus;
use crate::error::{Error, Result};
use crate::pipeline::Outcome;
use std::ffi::OsString;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Suffix for surviving records.
pub const CLEAN_SUFFIX: &str = ".clean";

/// Suffix for trash-routed records.
pub const TRASH_SUFFIX: &str = ".trash";

/// Reads a UTF-8 file into lines. Both LF and CRLF endings are accepted.
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Reads a monolingual corpus.
pub fn read_corpus_mono(path: impl AsRef<Path>) -> Result<Corpus> {
    Ok(Corpus::mono(read_lines(path)?))
}

/// Reads a parallel corpus from two line-aligned files.
pub fn read_corpus_parallel(
    source: impl AsRef<Path>,
    target: impl AsRef<Path>,
) -> Result<Corpus> {
    let source_lines = read_lines(source.as_ref())?;
    let target_lines = read_lines(target.as_ref())?;
    Corpus::parallel(source_lines, target_lines)
}

/// Writes one line per item, each terminated by `\n`.
pub fn write_lines<S: AsRef<str>>(path: impl AsRef<Path>, lines: &[S]) -> Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line.as_ref())?;
    }
    writer.flush()?;
    Ok(())
}

/// Appends `suffix` to the full file name: `corpus.zh` -> `corpus.zh.clean`.
pub fn output_path(input: impl AsRef<Path>, suffix: &str) -> PathBuf {
    let mut name: OsString = input.as_ref().as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Writes the outcome of a run next to its inputs.
///
/// Clean files are always written. Trash files are written only for
/// parallel corpora, when `target` is given. Returns the written paths.
pub fn write_outcome(
    outcome: &Outcome,
    source: impl AsRef<Path>,
    target: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let source = source.as_ref();
    let mut written = Vec::new();

    let clean_source = output_path(source, CLEAN_SUFFIX);
    write_lines(&clean_source, outcome.clean.source())?;
    written.push(clean_source);

    let Some(target) = target else {
        return Ok(written);
    };

    let (Some(clean_target), Some(trash_target)) =
        (outcome.clean.target(), outcome.trash.target())
    else {
        return Err(Error::ModeMismatch(
            "target path given for a monolingual outcome".to_string(),
        ));
    };

    let path = output_path(target, CLEAN_SUFFIX);
    write_lines(&path, clean_target)?;
    written.push(path);

    let path = output_path(source, TRASH_SUFFIX);
    write_lines(&path, outcome.trash.source())?;
    written.push(path);

    let path = output_path(target, TRASH_SUFFIX);
    write_lines(&path, trash_target)?;
    written.push(path);

    Ok(written)
}
