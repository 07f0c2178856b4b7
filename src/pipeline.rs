//! # Filter Chain
//!
//! The fixed, ordered chain of cleaning stages applied to a [`Corpus`].
//!
//! ## Stages
//!
//! 1. **Normalize** - NFKC, spaces and invisible characters removed
//! 2. **Deduplicate** - exact duplicate records collapsed
//! 3. **SameSourceTarget** - source identical to target (parallel only)
//! 4. **LengthBounds** - shorter than 3 or longer than 100 characters
//! 5. **SeparatorDensity** - too many `/`, `|`, `-` or digits
//! 6. **SpecialChars** - `\x` escapes, no-break/ideographic spaces, `▅`
//! 7. **PunctuationRatio** - too much ASCII punctuation (trash)
//! 8. **AlphanumericDensity** - long digit/alphanumeric runs (trash)
//! 9. **AlphanumericBalance** - source/target alphanumeric mismatch (trash, parallel only)
//! 10. **Markup** - HTML tags and URLs (rejected, or stripped in soft mode)
//! 11. **DimensionPattern** - `1920x1080`-style tokens
//! 12. **ScriptRatio** - too little of the expected script (trash)
//! 13. **Emoji** - emoji code points (trash)
//! 14. **LanguageId** - classifier disagrees with the configured language
//!
//! Stages marked "trash" route rejected records into the trash corpus when
//! the corpus is parallel. Every other rejection is dropped.

use crate::classify::{LanguageClassifier, WhatlangClassifier};
use crate::corpus::{Corpus, Record};
use crate::error::{Error, Result};
use crate::filters;
use crate::lang::{Language, LanguagePair, LanguageSelection};
use crate::normalize::normalize;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// One step of the filter chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Normalize,
    Deduplicate,
    SameSourceTarget,
    LengthBounds,
    SeparatorDensity,
    SpecialChars,
    PunctuationRatio,
    AlphanumericDensity,
    AlphanumericBalance,
    Markup,
    DimensionPattern,
    ScriptRatio,
    Emoji,
    LanguageId,
}

/// What happens to records a stage rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Routing {
    /// The stage rewrites records and never rejects.
    Transform,
    /// Rejected records are dropped.
    Discard,
    /// Rejected records go to the trash corpus for review.
    Trash,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 14] = [
        Stage::Normalize,
        Stage::Deduplicate,
        Stage::SameSourceTarget,
        Stage::LengthBounds,
        Stage::SeparatorDensity,
        Stage::SpecialChars,
        Stage::PunctuationRatio,
        Stage::AlphanumericDensity,
        Stage::AlphanumericBalance,
        Stage::Markup,
        Stage::DimensionPattern,
        Stage::ScriptRatio,
        Stage::Emoji,
        Stage::LanguageId,
    ];

    /// Short machine-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Normalize => "normalize",
            Stage::Deduplicate => "deduplicate",
            Stage::SameSourceTarget => "same_source_target",
            Stage::LengthBounds => "length_bounds",
            Stage::SeparatorDensity => "separator_density",
            Stage::SpecialChars => "special_chars",
            Stage::PunctuationRatio => "punctuation_ratio",
            Stage::AlphanumericDensity => "alphanumeric_density",
            Stage::AlphanumericBalance => "alphanumeric_balance",
            Stage::Markup => "markup",
            Stage::DimensionPattern => "dimension_pattern",
            Stage::ScriptRatio => "script_ratio",
            Stage::Emoji => "emoji",
            Stage::LanguageId => "language_id",
        }
    }

    /// Human-readable summary of what the stage removes.
    pub fn description(&self) -> &'static str {
        match self {
            Stage::Normalize => "normalization",
            Stage::Deduplicate => "removing duplicated sentences",
            Stage::SameSourceTarget => "removing identical source and target",
            Stage::LengthBounds => "removing too short or too long sentences",
            Stage::SeparatorDensity => "removing sentences with too many separators",
            Stage::SpecialChars => "removing sentences with special characters",
            Stage::PunctuationRatio => "removing sentences with too much punctuation",
            Stage::AlphanumericDensity => "removing sentences with too many letters or digits",
            Stage::AlphanumericBalance => "removing unbalanced source-target letters and digits",
            Stage::Markup => "removing html tags and urls",
            Stage::DimensionPattern => "removing dimension patterns",
            Stage::ScriptRatio => "removing sentences with too little native script",
            Stage::Emoji => "removing sentences with emoji",
            Stage::LanguageId => "removing sentences in other languages",
        }
    }

    /// Where this stage sends rejected records.
    pub fn routing(&self) -> Routing {
        match self {
            Stage::Normalize => Routing::Transform,
            Stage::PunctuationRatio
            | Stage::AlphanumericDensity
            | Stage::AlphanumericBalance
            | Stage::ScriptRatio
            | Stage::Emoji => Routing::Trash,
            _ => Routing::Discard,
        }
    }

    /// Returns true for stages that compare source against target.
    pub fn is_parallel_only(&self) -> bool {
        matches!(self, Stage::SameSourceTarget | Stage::AlphanumericBalance)
    }

    /// Returns true if the stage runs for a corpus of this shape.
    pub fn applies_to(&self, parallel: bool) -> bool {
        parallel || !self.is_parallel_only()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the markup stage treats HTML tags and URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkupMode {
    /// Reject records containing markup.
    #[default]
    Hard,
    /// Strip markup from records and keep them.
    Soft,
}

/// Pipeline configuration.
///
/// Thresholds are fixed; only the languages and the markup mode vary.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// How the markup stage treats tags and URLs.
    pub markup: MarkupMode,
    /// Expected language(s), which also fixes the corpus shape.
    pub languages: LanguageSelection,
}

impl PipelineOptions {
    /// Options for a monolingual corpus in `language`.
    pub fn mono(language: Language) -> Self {
        Self {
            markup: MarkupMode::Hard,
            languages: LanguageSelection::Mono(language),
        }
    }

    /// Options for a parallel corpus.
    pub fn parallel(pair: LanguagePair) -> Self {
        Self {
            markup: MarkupMode::Hard,
            languages: LanguageSelection::Parallel(pair),
        }
    }

    /// Strips markup instead of rejecting it.
    pub fn with_soft_markup(mut self) -> Self {
        self.markup = MarkupMode::Soft;
        self
    }

    /// Sets the markup mode.
    pub fn with_markup(mut self, mode: MarkupMode) -> Self {
        self.markup = mode;
        self
    }

    /// Sets the expected languages.
    pub fn with_languages(mut self, languages: LanguageSelection) -> Self {
        self.languages = languages;
        self
    }
}

/// Result of a single stage.
#[derive(Debug, Clone)]
pub struct StageOutput {
    /// Surviving records.
    pub kept: Corpus,
    /// Records the stage rejected, whatever their routing.
    pub rejected: Corpus,
}

/// Record counts for one executed stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    /// Records entering the stage.
    pub input: usize,
    /// Records surviving the stage.
    pub kept: usize,
    /// Rejected records added to the trash corpus.
    pub trashed: usize,
    /// Rejected records dropped without trace.
    pub discarded: usize,
}

/// Progress notifications emitted during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineEvent {
    /// A stage is about to run on `input` records.
    StageStarted { stage: Stage, input: usize },
    /// A stage completed.
    StageFinished(StageReport),
    /// Language identification has classified `done` of `total` records.
    Classified { done: usize, total: usize },
}

/// Output of a full run.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Records surviving every stage.
    pub clean: Corpus,
    /// Records rejected by trash-routed stages (parallel corpora only).
    pub trash: Corpus,
    /// One report per executed stage, in order.
    pub reports: Vec<StageReport>,
}

/// The filter chain runner.
pub struct Pipeline<C = WhatlangClassifier> {
    options: PipelineOptions,
    classifier: C,
}

impl Pipeline<WhatlangClassifier> {
    /// Creates a pipeline using the whatlang classifier.
    pub fn with_options(options: PipelineOptions) -> Self {
        Self::new(options, WhatlangClassifier::new())
    }
}

impl<C: LanguageClassifier> Pipeline<C> {
    /// Creates a pipeline with a custom language classifier.
    pub fn new(options: PipelineOptions, classifier: C) -> Self {
        Self {
            options,
            classifier,
        }
    }

    /// Pipeline options.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Runs every stage over `corpus`.
    pub fn run(&self, corpus: Corpus) -> Result<Outcome> {
        self.run_with(corpus, |_| {})
    }

    /// Runs every stage over `corpus`, reporting progress to `observer`.
    ///
    /// Fails without partial output if the corpus shape does not match the
    /// configured languages, if any stage breaks source/target alignment,
    /// or if the classifier fails.
    pub fn run_with(
        &self,
        corpus: Corpus,
        mut observer: impl FnMut(PipelineEvent),
    ) -> Result<Outcome> {
        let parallel = corpus.is_parallel();
        if parallel != self.options.languages.is_parallel() {
            return Err(Error::ModeMismatch(format!(
                "{} corpus configured with {:?}",
                if parallel { "parallel" } else { "monolingual" },
                self.options.languages
            )));
        }
        corpus.check_alignment("load")?;

        tracing::info!(records = corpus.len(), parallel, "starting filter chain");

        let mut trash = corpus.empty_like();
        let mut reports = Vec::with_capacity(Stage::ALL.len());
        let mut current = corpus;

        for stage in Stage::ALL {
            if !stage.applies_to(parallel) {
                continue;
            }

            let input = current.len();
            observer(PipelineEvent::StageStarted { stage, input });

            let StageOutput { kept, rejected } =
                self.execute(stage, current, &mut observer)?;
            kept.check_alignment(stage.name())?;
            rejected.check_alignment(stage.name())?;

            let trashed = if parallel && stage.routing() == Routing::Trash {
                let count = rejected.len();
                trash.extend(rejected)?;
                count
            } else {
                0
            };

            let report = StageReport {
                stage,
                input,
                kept: kept.len(),
                trashed,
                discarded: input - kept.len() - trashed,
            };
            tracing::debug!(
                stage = stage.name(),
                input,
                kept = report.kept,
                trashed,
                discarded = report.discarded,
                "stage finished"
            );
            observer(PipelineEvent::StageFinished(report));
            reports.push(report);

            current = kept;
        }

        trash.check_alignment("trash")?;
        tracing::info!(
            clean = current.len(),
            trash = trash.len(),
            "filter chain finished"
        );

        Ok(Outcome {
            clean: current,
            trash,
            reports,
        })
    }

    /// Runs a single stage over `corpus`.
    pub fn run_stage(&self, stage: Stage, corpus: Corpus) -> Result<StageOutput> {
        self.execute(stage, corpus, &mut |_: PipelineEvent| {})
    }

    fn execute(
        &self,
        stage: Stage,
        corpus: Corpus,
        observer: &mut dyn FnMut(PipelineEvent),
    ) -> Result<StageOutput> {
        let (kept, rejected) = match stage {
            Stage::Normalize => transform(corpus, |s| normalize(s)),
            Stage::Deduplicate => deduplicate(corpus),
            Stage::SameSourceTarget => corpus.partition(|r| r.target != Some(r.source)),
            Stage::LengthBounds => {
                corpus.partition(|r| r.all_sides(filters::within_length_bounds))
            }
            Stage::SeparatorDensity => {
                corpus.partition(|r| !any_side(r, filters::has_separator_noise))
            }
            Stage::SpecialChars => {
                corpus.partition(|r| !any_side(r, filters::has_special_chars))
            }
            Stage::PunctuationRatio => {
                corpus.partition(|r| !any_side(r, filters::is_punctuation_heavy))
            }
            Stage::AlphanumericDensity => {
                corpus.partition(|r| !any_side(r, filters::is_alphanumeric_heavy))
            }
            Stage::AlphanumericBalance => corpus.partition(|r| match r.target {
                Some(target) => !filters::is_alphanumeric_unbalanced(r.source, target),
                None => true,
            }),
            Stage::Markup => match self.options.markup {
                MarkupMode::Hard => corpus.partition(|r| !any_side(r, filters::has_markup)),
                MarkupMode::Soft => transform(corpus, filters::strip_markup),
            },
            Stage::DimensionPattern => {
                corpus.partition(|r| !any_side(r, filters::has_dimension_pattern))
            }
            Stage::ScriptRatio => {
                let languages = self.options.languages;
                corpus.partition(|r| {
                    !expected_sides(r, languages)
                        .any(|(text, lang)| filters::is_script_sparse(text, lang))
                })
            }
            Stage::Emoji => corpus.partition(|r| !any_side(r, filters::has_emoji)),
            Stage::LanguageId => self.identify(corpus, observer)?,
        };

        Ok(StageOutput { kept, rejected })
    }

    /// Keeps records whose every side is classified as its expected language.
    fn identify(
        &self,
        corpus: Corpus,
        observer: &mut dyn FnMut(PipelineEvent),
    ) -> Result<(Corpus, Corpus)> {
        let languages = self.options.languages;
        let total = corpus.len();
        let mut done = 0;

        corpus.try_partition(|r| {
            let mut matches = true;
            for (text, expected) in expected_sides(r, languages) {
                if self.classifier.classify(text)? != Some(expected) {
                    matches = false;
                    break;
                }
            }
            done += 1;
            observer(PipelineEvent::Classified { done, total });
            Ok(matches)
        })
    }
}

/// Rewrites every side; nothing is rejected.
fn transform(corpus: Corpus, f: impl FnMut(&str) -> String) -> (Corpus, Corpus) {
    let rejected = corpus.empty_like();
    (corpus.map(f), rejected)
}

/// Keeps the first occurrence of each record.
fn deduplicate(corpus: Corpus) -> (Corpus, Corpus) {
    let mut seen: HashSet<(String, Option<String>)> = HashSet::with_capacity(corpus.len());
    corpus.partition(|r| seen.insert((r.source.to_string(), r.target.map(str::to_string))))
}

fn any_side(record: Record<'_>, predicate: fn(&str) -> bool) -> bool {
    record.sides().any(predicate)
}

/// Pairs each side of `record` with the language it is expected to be in.
fn expected_sides<'a>(
    record: Record<'a>,
    languages: LanguageSelection,
) -> impl Iterator<Item = (&'a str, Language)> {
    let source = std::iter::once((record.source, languages.source()));
    let target = record.target.zip(languages.target());
    source.chain(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn pairs(items: &[(&str, &str)]) -> Corpus {
        Corpus::parallel(
            items.iter().map(|(s, _)| s.to_string()).collect(),
            items.iter().map(|(_, t)| t.to_string()).collect(),
        )
        .unwrap()
    }

    /// Kana means Japanese, any other non-ASCII means Chinese, ASCII means
    /// English. Sentences starting with `英` are forced to English.
    fn script_classifier(text: &str) -> Option<Language> {
        if text.starts_with('英') || text.is_ascii() {
            Some(Language::English)
        } else if text
            .chars()
            .any(|c| ('\u{3041}'..='\u{30F3}').contains(&c))
        {
            Some(Language::Japanese)
        } else {
            Some(Language::Chinese)
        }
    }

    fn zh_ja() -> Pipeline<fn(&str) -> Option<Language>> {
        Pipeline::new(
            PipelineOptions::parallel(LanguagePair::default()),
            script_classifier as fn(&str) -> Option<Language>,
        )
    }

    #[test]
    fn test_stage_order_and_routing() {
        assert_eq!(Stage::ALL[0], Stage::Normalize);
        assert_eq!(Stage::ALL[13], Stage::LanguageId);
        let trash: Vec<Stage> = Stage::ALL
            .into_iter()
            .filter(|s| s.routing() == Routing::Trash)
            .collect();
        assert_eq!(
            trash,
            vec![
                Stage::PunctuationRatio,
                Stage::AlphanumericDensity,
                Stage::AlphanumericBalance,
                Stage::ScriptRatio,
                Stage::Emoji,
            ]
        );
        assert_eq!(Stage::LengthBounds.routing(), Routing::Discard);
        assert_eq!(Stage::LanguageId.routing(), Routing::Discard);
    }

    #[test]
    fn test_report_serializes_stage_name() {
        let report = StageReport {
            stage: Stage::LanguageId,
            input: 3,
            kept: 1,
            trashed: 0,
            discarded: 2,
        };
        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["stage"], "language_id");
        assert_eq!(json["discarded"], 2);
    }

    #[test]
    fn test_parallel_only_stages_skipped_for_mono() {
        assert!(!Stage::SameSourceTarget.applies_to(false));
        assert!(!Stage::AlphanumericBalance.applies_to(false));
        assert!(Stage::Emoji.applies_to(false));
        assert!(Stage::SameSourceTarget.applies_to(true));
    }

    #[test]
    fn test_deduplicate_pairs() {
        let corpus = pairs(&[("a", "b"), ("a", "b"), ("c", "d")]);
        let out = zh_ja().run_stage(Stage::Deduplicate, corpus).unwrap();

        let kept: Vec<(String, String)> = out
            .kept
            .records()
            .map(|r| (r.source.to_string(), r.target.unwrap().to_string()))
            .collect();
        assert_eq!(kept.len(), 2);
        assert_eq!(kept.iter().filter(|(s, t)| s == "a" && t == "b").count(), 1);
        assert_eq!(kept.iter().filter(|(s, t)| s == "c" && t == "d").count(), 1);
        assert_eq!(out.rejected.len(), 1);
    }

    #[test]
    fn test_deduplicate_keeps_pairing_distinct() {
        // Same source with different targets are different records
        let corpus = pairs(&[("a", "b"), ("a", "c")]);
        let out = zh_ja().run_stage(Stage::Deduplicate, corpus).unwrap();
        assert_eq!(out.kept.len(), 2);
    }

    #[test]
    fn test_same_source_target() {
        let corpus = pairs(&[("相同", "相同"), ("中文", "日本語")]);
        let out = zh_ja().run_stage(Stage::SameSourceTarget, corpus).unwrap();
        assert_eq!(out.kept.source(), lines(&["中文"]).as_slice());
    }

    #[test]
    fn test_length_bounds_scenario() {
        let hundred = "中".repeat(100);
        let hundred_one = "中".repeat(101);
        let corpus = pairs(&[
            ("ab", "有效的句子"),
            (hundred.as_str(), "有效的句子"),
            (hundred_one.as_str(), "有效的句子"),
        ]);
        let out = zh_ja().run_stage(Stage::LengthBounds, corpus).unwrap();
        assert_eq!(out.kept.source(), std::slice::from_ref(&hundred));
        assert_eq!(out.rejected.len(), 2);
    }

    #[test]
    fn test_length_rejects_when_target_fails() {
        let corpus = pairs(&[("有效的句子", "短")]);
        let out = zh_ja().run_stage(Stage::LengthBounds, corpus).unwrap();
        assert!(out.kept.is_empty());
    }

    #[test]
    fn test_markup_hard_rejects() {
        let corpus = pairs(&[("click http://example.com now", "リンク先です")]);
        let out = zh_ja().run_stage(Stage::Markup, corpus).unwrap();
        assert!(out.kept.is_empty());
        assert_eq!(out.rejected.len(), 1);
    }

    #[test]
    fn test_markup_hard_rejects_when_only_target_has_markup() {
        let corpus = pairs(&[
            ("普通的句子", "<b>リンク</b>です"),
            ("普通的句子", "ふつうのぶんです"),
        ]);
        let out = zh_ja().run_stage(Stage::Markup, corpus).unwrap();
        assert_eq!(out.kept.source(), ["普通的句子".to_string()].as_slice());
        assert_eq!(
            out.kept.target().unwrap(),
            ["ふつうのぶんです".to_string()].as_slice()
        );
        assert_eq!(
            out.rejected.target().unwrap(),
            ["<b>リンク</b>です".to_string()].as_slice()
        );
    }

    #[test]
    fn test_markup_soft_strips() {
        let pipeline = Pipeline::new(
            PipelineOptions::parallel(LanguagePair::default()).with_soft_markup(),
            script_classifier,
        );
        let corpus = pairs(&[("click http://example.com now", "<b>リンク</b>先です")]);
        let out = pipeline.run_stage(Stage::Markup, corpus).unwrap();
        assert_eq!(out.kept.len(), 1);
        assert!(out.rejected.is_empty());
        let record = out.kept.records().next().unwrap();
        assert!(!record.source.contains("http"));
        assert!(record.source.starts_with("click"));
        assert_eq!(record.target, Some("リンク先です"));
    }

    #[test]
    fn test_script_ratio_uses_side_language() {
        let corpus = pairs(&[
            ("今天天气很好", "今日は天気がいいです"),
            ("今天天气很好", "hello world"),
            ("こんにちは", "今日は天気がいいです"),
        ]);
        let out = zh_ja().run_stage(Stage::ScriptRatio, corpus).unwrap();
        assert_eq!(out.kept.len(), 1);
        assert_eq!(out.rejected.len(), 2);
    }

    #[test]
    fn test_punctuation_scenario_goes_to_trash() {
        let corpus = pairs(&[
            ("!!!!!!!!!!!", "今日は天気がいいです"),
            ("今天天气很好", "今日は天気がいいです"),
        ]);
        let outcome = zh_ja().run(corpus).unwrap();

        assert_eq!(outcome.clean.source(), lines(&["今天天气很好"]).as_slice());
        assert_eq!(outcome.trash.source(), lines(&["!!!!!!!!!!!"]).as_slice());
        assert_eq!(
            outcome.trash.target().unwrap(),
            lines(&["今日は天気がいいです"]).as_slice()
        );
        let punct = outcome
            .reports
            .iter()
            .find(|r| r.stage == Stage::PunctuationRatio)
            .unwrap();
        assert_eq!(punct.trashed, 1);
        assert_eq!(punct.discarded, 0);
    }

    #[test]
    fn test_language_mismatch_is_discarded() {
        let corpus = pairs(&[
            ("英文被误认为中文", "今日は天気がいいです"),
            ("今天天气很好", "今日は天気がいいです"),
        ]);
        let outcome = zh_ja().run(corpus).unwrap();

        assert_eq!(outcome.clean.source(), lines(&["今天天气很好"]).as_slice());
        assert!(outcome.trash.is_empty());
        let lid = outcome.reports.last().unwrap();
        assert_eq!(lid.stage, Stage::LanguageId);
        assert_eq!(lid.discarded, 1);
    }

    #[test]
    fn test_classifier_error_aborts() {
        struct Failing;
        impl LanguageClassifier for Failing {
            fn classify(&self, _text: &str) -> Result<Option<Language>> {
                Err(Error::Classifier("model unavailable".into()))
            }
        }

        let pipeline = Pipeline::new(
            PipelineOptions::parallel(LanguagePair::default()),
            Failing,
        );
        let corpus = pairs(&[("今天天气很好", "今日は天気がいいです")]);
        assert!(matches!(pipeline.run(corpus), Err(Error::Classifier(_))));
    }

    #[test]
    fn test_mode_mismatch() {
        let corpus = Corpus::mono(lines(&["今天天气很好"]));
        assert!(matches!(zh_ja().run(corpus), Err(Error::ModeMismatch(_))));
    }

    #[test]
    fn test_mono_pipeline_has_no_trash() {
        let pipeline = Pipeline::new(
            PipelineOptions::mono(Language::Chinese),
            script_classifier,
        );
        let corpus = Corpus::mono(lines(&[
            "今天天气很好",
            "今天天气很好",
            "!!!!!!!!!!!",
            "好开心😀😀",
            "ab",
        ]));
        let outcome = pipeline.run(corpus).unwrap();

        assert_eq!(outcome.clean.source(), lines(&["今天天气很好"]).as_slice());
        assert!(outcome.trash.is_empty());
        assert!(!outcome.trash.is_parallel());
        assert!(outcome
            .reports
            .iter()
            .all(|r| r.stage != Stage::SameSourceTarget && r.trashed == 0));
    }

    #[test]
    fn test_every_stage_shrinks_and_stays_aligned() {
        let corpus = pairs(&[
            (" 今天 天气 很好 ", "今日は 天気が いいです"),
            ("今天天气很好", "今日は天気がいいです"),
            ("相同的句子", "相同的句子"),
            ("ab", "短い"),
            ("a/b/c/d/e/f/g路径", "パス"),
            ("乱码\\x00这里", "文字化け"),
            ("!!!!!!!!!!!", "感嘆符です"),
            ("编号1234567890", "番号です"),
            ("我用iPhone", "私はスマホ"),
            ("<b>粗体</b>", "太字です"),
            ("图片1920x1080", "画像です"),
            ("hello中文", "こんにちは"),
            ("好开心😀", "嬉しいです"),
            ("英文被误认为中文", "今日は天気がいいです"),
        ]);

        let mut events = Vec::new();
        let outcome = zh_ja().run_with(corpus, |e| events.push(e)).unwrap();

        for report in &outcome.reports {
            assert!(report.kept <= report.input, "{} grew", report.stage);
            assert_eq!(
                report.kept + report.trashed + report.discarded,
                report.input,
                "{} lost records",
                report.stage
            );
        }
        outcome.clean.check_alignment("clean").unwrap();
        outcome.trash.check_alignment("trash").unwrap();

        let trashed: usize = outcome.reports.iter().map(|r| r.trashed).sum();
        assert_eq!(outcome.trash.len(), trashed);
        assert_eq!(outcome.clean.source(), lines(&["今天天气很好"]).as_slice());

        let finished = events
            .iter()
            .filter(|e| matches!(e, PipelineEvent::StageFinished(_)))
            .count();
        assert_eq!(finished, Stage::ALL.len());
        assert!(events.contains(&PipelineEvent::Classified { done: 2, total: 2 }));
    }
}
