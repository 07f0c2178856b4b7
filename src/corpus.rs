//! Line-pair store.
//!
//! A [`Corpus`] holds the records currently surviving the filter chain as
//! index-aligned source and (optionally) target sequences. Stages never touch
//! one side alone: every split goes through [`Corpus::partition`], which moves
//! whole records.

use crate::error::{Error, Result};

/// One unit of work: a sentence, or an aligned sentence pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Record<'a> {
    /// Source-side sentence.
    pub source: &'a str,
    /// Target-side sentence (parallel corpora only).
    pub target: Option<&'a str>,
}

impl<'a> Record<'a> {
    /// Iterates over the sides present in this record.
    pub fn sides(&self) -> impl Iterator<Item = &'a str> {
        std::iter::once(self.source).chain(self.target)
    }

    /// Returns true if `predicate` holds for every side.
    pub fn all_sides(&self, mut predicate: impl FnMut(&str) -> bool) -> bool {
        self.sides().all(|side| predicate(side))
    }
}

/// Ordered, index-aligned collection of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    source: Vec<String>,
    target: Option<Vec<String>>,
}

impl Corpus {
    /// Creates a monolingual corpus.
    pub fn mono(lines: Vec<String>) -> Self {
        Self {
            source: lines,
            target: None,
        }
    }

    /// Creates a parallel corpus from two line sequences.
    ///
    /// Fails if the sequences differ in length.
    pub fn parallel(source: Vec<String>, target: Vec<String>) -> Result<Self> {
        let corpus = Self {
            source,
            target: Some(target),
        };
        corpus.check_alignment("load")?;
        Ok(corpus)
    }

    /// Creates an empty corpus with the same shape as `self`.
    pub fn empty_like(&self) -> Self {
        Self {
            source: Vec::new(),
            target: self.target.as_ref().map(|_| Vec::new()),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Returns true if there are no records.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Returns true if this corpus carries a target side.
    pub fn is_parallel(&self) -> bool {
        self.target.is_some()
    }

    /// Source-side sentences.
    pub fn source(&self) -> &[String] {
        &self.source
    }

    /// Target-side sentences, if parallel.
    pub fn target(&self) -> Option<&[String]> {
        self.target.as_deref()
    }

    /// Iterates over records in order.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        debug_assert!(self.check_alignment("records").is_ok());
        self.source.iter().enumerate().map(move |(i, source)| Record {
            source,
            target: self.target.as_ref().map(|t| t[i].as_str()),
        })
    }

    /// Appends a record.
    ///
    /// The record must have the corpus's shape: a target for a parallel
    /// corpus, none for a monolingual one.
    pub fn push(&mut self, source: String, target: Option<String>) -> Result<()> {
        match (self.target.as_mut(), target) {
            (Some(mine), Some(target)) => mine.push(target),
            (None, None) => {}
            (Some(_), None) => {
                return Err(Error::ModeMismatch(
                    "record without a target pushed to a parallel corpus".to_string(),
                ))
            }
            (None, Some(_)) => {
                return Err(Error::ModeMismatch(
                    "record with a target pushed to a monolingual corpus".to_string(),
                ))
            }
        }
        self.source.push(source);
        Ok(())
    }

    /// Appends every record of `other`, which must have the same shape.
    pub fn extend(&mut self, other: Corpus) -> Result<()> {
        other.check_alignment("extend")?;
        match (self.target.as_mut(), other.target) {
            (Some(mine), Some(theirs)) => mine.extend(theirs),
            (None, None) => {}
            (mine, _) => {
                return Err(Error::ModeMismatch(format!(
                    "cannot extend a {} corpus with a {} one",
                    if mine.is_some() { "parallel" } else { "monolingual" },
                    if mine.is_some() { "monolingual" } else { "parallel" },
                )))
            }
        }
        self.source.extend(other.source);
        Ok(())
    }

    /// Splits the corpus into `(kept, rejected)` by a per-record predicate.
    ///
    /// Records move as a unit and relative order is preserved on both sides.
    pub fn partition(self, mut keep: impl FnMut(Record<'_>) -> bool) -> (Corpus, Corpus) {
        let decisions: Vec<bool> = self.records().map(&mut keep).collect();
        self.split(&decisions)
    }

    /// Same as [`Corpus::partition`], for predicates that can fail.
    pub fn try_partition(
        self,
        keep: impl FnMut(Record<'_>) -> Result<bool>,
    ) -> Result<(Corpus, Corpus)> {
        let decisions = self.records().map(keep).collect::<Result<Vec<bool>>>()?;
        Ok(self.split(&decisions))
    }

    fn split(self, decisions: &[bool]) -> (Corpus, Corpus) {
        let (kept_source, rejected_source) = split_lines(self.source, decisions);
        let (kept_target, rejected_target) = match self.target {
            Some(t) => {
                let (kept, rejected) = split_lines(t, decisions);
                (Some(kept), Some(rejected))
            }
            None => (None, None),
        };
        (
            Corpus {
                source: kept_source,
                target: kept_target,
            },
            Corpus {
                source: rejected_source,
                target: rejected_target,
            },
        )
    }

    /// Applies `f` to every side of every record.
    pub fn map(self, mut f: impl FnMut(&str) -> String) -> Corpus {
        Corpus {
            source: self.source.iter().map(|s| f(s)).collect(),
            target: self.target.map(|t| t.iter().map(|s| f(s)).collect()),
        }
    }

    /// Verifies that both sides hold the same number of lines.
    ///
    /// `stage` names the step that produced this corpus and ends up in the
    /// error message.
    pub fn check_alignment(&self, stage: &str) -> Result<()> {
        match &self.target {
            Some(t) if t.len() != self.source.len() => Err(Error::Misaligned {
                stage: stage.to_string(),
                source_len: self.source.len(),
                target_len: t.len(),
            }),
            _ => Ok(()),
        }
    }
}

fn split_lines(lines: Vec<String>, decisions: &[bool]) -> (Vec<String>, Vec<String>) {
    let mut kept = Vec::new();
    let mut rejected = Vec::new();
    for (line, &keep) in lines.into_iter().zip(decisions) {
        if keep {
            kept.push(line);
        } else {
            rejected.push(line);
        }
    }
    (kept, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parallel_rejects_length_mismatch() {
        let err = Corpus::parallel(lines(&["a", "b"]), lines(&["x"])).unwrap_err();
        assert!(matches!(
            err,
            Error::Misaligned {
                source_len: 2,
                target_len: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_partition_moves_pairs_together() {
        let corpus = Corpus::parallel(
            lines(&["keep1", "drop", "keep2"]),
            lines(&["k1", "d", "k2"]),
        )
        .unwrap();

        let (kept, rejected) = corpus.partition(|r| r.source.starts_with("keep"));

        assert_eq!(kept.source(), lines(&["keep1", "keep2"]).as_slice());
        assert_eq!(kept.target().unwrap(), lines(&["k1", "k2"]).as_slice());
        assert_eq!(rejected.source(), lines(&["drop"]).as_slice());
        assert_eq!(rejected.target().unwrap(), lines(&["d"]).as_slice());
        kept.check_alignment("test").unwrap();
        rejected.check_alignment("test").unwrap();
    }

    #[test]
    fn test_mono_records_have_no_target() {
        let corpus = Corpus::mono(lines(&["one", "two"]));
        assert!(!corpus.is_parallel());
        assert!(corpus.records().all(|r| r.target.is_none()));
        assert_eq!(corpus.records().count(), 2);
    }

    #[test]
    fn test_extend_accumulates_in_order() {
        let mut trash = Corpus::parallel(Vec::new(), Vec::new()).unwrap();
        trash
            .extend(Corpus::parallel(lines(&["a"]), lines(&["b"])).unwrap())
            .unwrap();
        trash
            .extend(Corpus::parallel(lines(&["c"]), lines(&["d"])).unwrap())
            .unwrap();
        assert_eq!(trash.source(), lines(&["a", "c"]).as_slice());
        assert_eq!(trash.target().unwrap(), lines(&["b", "d"]).as_slice());
    }

    #[test]
    fn test_extend_rejects_shape_mismatch() {
        let mut parallel = Corpus::parallel(lines(&["a"]), lines(&["b"])).unwrap();
        let err = parallel
            .extend(Corpus::mono(lines(&["x", "y"])))
            .unwrap_err();
        assert!(matches!(err, Error::ModeMismatch(_)));
        assert_eq!(parallel.len(), 1);
        assert_eq!(parallel.target().unwrap(), lines(&["b"]).as_slice());

        let mut mono = Corpus::mono(lines(&["a"]));
        let err = mono
            .extend(Corpus::parallel(lines(&["x"]), lines(&["y"])).unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::ModeMismatch(_)));
        assert_eq!(mono.len(), 1);
    }

    #[test]
    fn test_push_requires_matching_shape() {
        let mut parallel = Corpus::parallel(Vec::new(), Vec::new()).unwrap();
        assert!(matches!(
            parallel.push("src".to_string(), None),
            Err(Error::ModeMismatch(_))
        ));
        assert!(parallel.is_empty());
        assert!(parallel.target().unwrap().is_empty());

        parallel
            .push("src".to_string(), Some("tgt".to_string()))
            .unwrap();
        assert_eq!(parallel.target().unwrap(), lines(&["tgt"]).as_slice());

        let mut mono = Corpus::mono(Vec::new());
        assert!(mono
            .push("src".to_string(), Some("tgt".to_string()))
            .is_err());
        mono.push("src".to_string(), None).unwrap();
        assert_eq!(mono.source(), lines(&["src"]).as_slice());
    }

    #[test]
    fn test_try_partition_stops_on_error() {
        let corpus = Corpus::parallel(lines(&["a", "b"]), lines(&["x", "y"])).unwrap();
        let mut seen = 0;
        let result = corpus.try_partition(|_| {
            seen += 1;
            Err(Error::Classifier("down".to_string()))
        });
        assert!(matches!(result, Err(Error::Classifier(_))));
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_map_touches_both_sides() {
        let corpus = Corpus::parallel(lines(&[" a "]), lines(&[" b "])).unwrap();
        let mapped = corpus.map(|s| s.trim().to_string());
        assert_eq!(mapped.source(), lines(&["a"]).as_slice());
        assert_eq!(mapped.target().unwrap(), lines(&["b"]).as_slice());
    }

    #[test]
    fn test_all_sides() {
        let record = Record {
            source: "abc",
            target: Some("x"),
        };
        assert!(!record.all_sides(|s| s.len() >= 3));
        assert!(record.all_sides(|s| !s.is_empty()));
    }
}
