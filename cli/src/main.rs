//! mtclean CLI - MT training corpus cleaning tool
//!
//! A command-line tool for filtering monolingual and parallel corpora.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use mtclean::io::{read_corpus_mono, read_corpus_parallel, write_outcome};
use mtclean::{
    Language, LanguagePair, Outcome, Pipeline, PipelineEvent, PipelineOptions, Stage, StageReport,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Rule-based cleaning of machine-translation training corpora
#[derive(Parser)]
#[command(
    name = "mtclean",
    author = "iyulab",
    version,
    about = "Clean monolingual and parallel MT training corpora",
    long_about = "mtclean - Rule-based cleaning of MT training corpora.\n\n\
                  Runs a fixed chain of normalization and filtering rules and writes\n\
                  surviving lines to <file>.clean. Parallel runs also write records\n\
                  rejected by reviewable rules to <file>.trash.\n\n\
                  Usage:\n  \
                  mtclean mono <file> <lang>        Clean a monolingual corpus\n  \
                  mtclean parallel <src> <tgt>      Clean a parallel corpus (zh-ja by default)"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v: info, -vv: debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a monolingual corpus
    Mono {
        /// Input file path
        input: PathBuf,

        /// Expected language (ISO 639-1, e.g. zh, ja, en)
        lang: Language,

        /// Strip HTML tags and URLs instead of dropping the sentence
        #[arg(long)]
        soft_html: bool,

        /// Write per-stage counts as JSON to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Clean a parallel corpus
    #[command(visible_alias = "pair")]
    Parallel {
        /// Source file path
        source: PathBuf,

        /// Target file path (line-aligned with source)
        target: PathBuf,

        /// Source language
        #[arg(long, default_value = "zh")]
        src_lang: Language,

        /// Target language
        #[arg(long, default_value = "ja")]
        tgt_lang: Language,

        /// Strip HTML tags and URLs instead of dropping the pair
        #[arg(long)]
        soft_html: bool,

        /// Write per-stage counts as JSON to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// List the filter stages in execution order
    Stages,

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,mtclean={level},mtclean_cli={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Mono {
            input,
            lang,
            soft_html,
            report,
        } => {
            let options = apply_markup(PipelineOptions::mono(lang), soft_html);

            let pb = create_spinner("Reading corpus...");
            let corpus = read_corpus_mono(&input)?;
            pb.finish_and_clear();
            println!("Loaded {} sentences from {}", corpus.len(), input.display());

            let outcome = run_pipeline(options, corpus)?;
            let written = write_outcome(&outcome, &input, None)?;

            write_report(report.as_deref(), &outcome.reports)?;
            print_summary(&outcome, &written, "sentences");
        }

        Commands::Parallel {
            source,
            target,
            src_lang,
            tgt_lang,
            soft_html,
            report,
        } => {
            let pair = LanguagePair::new(src_lang, tgt_lang);
            let options = apply_markup(PipelineOptions::parallel(pair), soft_html);

            let pb = create_spinner("Reading corpus...");
            let corpus = read_corpus_parallel(&source, &target)?;
            pb.finish_and_clear();
            println!(
                "Loaded {} pairs ({}) from {} / {}",
                corpus.len(),
                pair,
                source.display(),
                target.display()
            );

            let outcome = run_pipeline(options, corpus)?;
            let written = write_outcome(&outcome, &source, Some(target.as_path()))?;

            write_report(report.as_deref(), &outcome.reports)?;
            print_summary(&outcome, &written, "pairs");
        }

        Commands::Stages => print_stages(),

        Commands::Version => print_version(),
    }

    Ok(())
}

fn apply_markup(options: PipelineOptions, soft_html: bool) -> PipelineOptions {
    if soft_html {
        options.with_soft_markup()
    } else {
        options
    }
}

/// Runs the chain, printing per-stage counts and showing a progress bar
/// during language identification.
fn run_pipeline(
    options: PipelineOptions,
    corpus: mtclean::Corpus,
) -> Result<Outcome, Box<dyn std::error::Error>> {
    let unit = if corpus.is_parallel() { "pairs" } else { "sentences" };
    let pipeline = Pipeline::with_options(options);
    let mut progress: Option<ProgressBar> = None;

    let outcome = pipeline.run_with(corpus, |event| match event {
        PipelineEvent::StageStarted {
            stage: Stage::LanguageId,
            input,
        } => {
            progress = Some(create_progress_bar(input as u64, "Identifying languages"));
        }
        PipelineEvent::StageStarted { .. } => {}
        PipelineEvent::Classified { done, .. } => {
            if let Some(pb) = &progress {
                pb.set_position(done as u64);
            }
        }
        PipelineEvent::StageFinished(report) => {
            if let Some(pb) = progress.take() {
                pb.finish_and_clear();
            }
            print_stage(&report, unit);
        }
    })?;

    Ok(outcome)
}

fn print_stage(report: &StageReport, unit: &str) {
    let mut line = format!(
        "After {}, remain {} {}",
        report.stage.description(),
        report.kept,
        unit
    );
    if report.trashed > 0 {
        line.push_str(&format!(" ({} to trash)", report.trashed).yellow().to_string());
    }
    println!("{}", line);
}

fn write_report(
    path: Option<&Path>,
    reports: &[StageReport],
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = path {
        let json = serde_json::to_string_pretty(reports)?;
        fs::write(path, json)?;
    }
    Ok(())
}

fn print_summary(outcome: &Outcome, written: &[PathBuf], unit: &str) {
    println!();
    println!("{}", "Cleaning Complete".green().bold());
    println!("{}", "─".repeat(40));
    println!(
        "{}: {} {}",
        "Clean".bold(),
        outcome.clean.len(),
        unit
    );
    if outcome.clean.is_parallel() {
        println!(
            "{}: {} {} waiting for review",
            "Trash".bold(),
            outcome.trash.len(),
            unit
        );
    }
    for path in written {
        println!("  {} {}", "✓".green(), path.display());
    }
}

fn print_stages() {
    println!("{}", "Filter Stages".cyan().bold());
    println!("{}", "─".repeat(40));
    for (i, stage) in Stage::ALL.iter().enumerate() {
        let mut flags = vec![format!("{:?}", stage.routing()).to_lowercase()];
        if stage.is_parallel_only() {
            flags.push("parallel only".to_string());
        }
        println!(
            "{:>2}. {:<22} {}",
            i + 1,
            stage.name(),
            format!("[{}]", flags.join(", ")).dimmed()
        );
    }
}

fn print_version() {
    println!("{} {}", "mtclean".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Rule-based cleaning of machine-translation training corpora");
    println!();
    println!("Default language pair: {}", LanguagePair::default());
    println!(
        "Supported languages: {}",
        Language::ALL
            .iter()
            .map(Language::code)
            .collect::<Vec<_>>()
            .join(", ")
    );
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:30.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("=> "),
    );
    pb.set_message(message.to_string());
    pb
}
