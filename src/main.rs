//! @ai:module:intent CLI for the CSS naming convention tokenization benchmark
//! @ai:module:layer presentation

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use csstok_bench::{
    config::{BenchConfig, DEFAULT_CONFIG_FILE},
    corpus::{CorpusLoader, CorpusLoaderTrait},
    metrics::{MetricsAggregator, MetricsAggregatorTrait},
    report::{ReportFiles, ReportGenerator},
    results::{ResultStore, ResultStoreTrait},
    runner::{BatchRunner, RunOutcome, RunSummary, Selection},
    tokenizer::{TokenizerRegistry, TOKENIZERS},
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "csstok-bench")]
#[command(about = "Compare tokenizer token counts across CSS class-naming conventions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize the corpus with one tokenizer, or `all`
    Run {
        /// Tokenizer id from `list`, or `all`
        tokenizer: String,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Corpus file overriding the configured one
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Directory result documents are written to
        #[arg(long)]
        results_dir: Option<PathBuf>,
    },

    /// Aggregate stored results into markdown, JSON and chart reports
    Report {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory result documents are read from
        #[arg(long)]
        results_dir: Option<PathBuf>,

        /// Output directory for reports
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// README whose results section is rewritten
        #[arg(long)]
        readme: Option<PathBuf>,

        /// Leave the README untouched
        #[arg(long, conflicts_with = "readme")]
        no_readme: bool,

        /// Refinement cycles used for the savings projection
        #[arg(long)]
        iterations: Option<u32>,
    },

    /// List available tokenizers
    List,

    /// Initialize default configuration and sample corpus
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,

        /// Corpus file to create if absent
        #[arg(long)]
        corpus: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("csstok_bench=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            tokenizer,
            config,
            corpus,
            results_dir,
        } => run_tokenizers(RunArgs {
            tokenizer,
            config,
            corpus,
            results_dir,
        }),
        Commands::Report {
            config,
            results_dir,
            output,
            readme,
            no_readme,
            iterations,
        } => generate_reports(ReportArgs {
            config,
            results_dir,
            output,
            readme,
            no_readme,
            iterations,
        }),
        Commands::List => {
            list_tokenizers();
            Ok(())
        }
        Commands::Init { output, corpus } => init_config(output, corpus),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

struct RunArgs {
    tokenizer: String,
    config: Option<PathBuf>,
    corpus: Option<PathBuf>,
    results_dir: Option<PathBuf>,
}

struct ReportArgs {
    config: Option<PathBuf>,
    results_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    readme: Option<PathBuf>,
    no_readme: bool,
    iterations: Option<u32>,
}

/// @ai:intent Batch-tokenize the corpus and store one document per tokenizer
/// @ai:effects network, fs:read, fs:write
fn run_tokenizers(args: RunArgs) -> Result<()> {
    let mut config = BenchConfig::load_or_default(args.config.as_deref())?;

    if let Some(corpus) = args.corpus {
        config.paths.corpus_file = corpus;
    }
    if let Some(dir) = args.results_dir {
        config.paths.results_dir = dir;
    }

    tracing::info!("Loading corpus from {}", config.paths.corpus_file.display());

    let corpus = CorpusLoader::new().load(&config.paths.corpus_file)?;
    tracing::info!(
        "Found {} samples across {} conventions",
        corpus.sample_count(),
        corpus.conventions().count()
    );

    let runner = BatchRunner::new(
        TokenizerRegistry::new(config.hub.clone()),
        ResultStore::new(config.paths.results_dir.clone()),
        corpus,
    );

    let summary = runner.run(&Selection::parse(&args.tokenizer))?;
    print_run_summary(&summary);

    Ok(())
}

/// @ai:intent Aggregate stored documents and write every report
/// @ai:effects fs:read, fs:write
fn generate_reports(args: ReportArgs) -> Result<()> {
    let mut config = BenchConfig::load_or_default(args.config.as_deref())?;

    if let Some(dir) = args.results_dir {
        config.paths.results_dir = dir;
    }
    if let Some(dir) = args.output {
        config.paths.report_dir = dir;
    }
    if let Some(readme) = args.readme {
        config.paths.readme_file = readme;
    }
    if let Some(iterations) = args.iterations {
        config.report.iteration_cycles = iterations;
    }

    let store = ResultStore::new(config.paths.results_dir.clone());
    let documents = store.load_all()?;
    if documents.is_empty() {
        tracing::warn!("No result files found in {}", store.dir().display());
    } else {
        tracing::info!("Loaded {} result documents", documents.len());
    }

    let summary = MetricsAggregator::new(config.report.clone()).aggregate(&documents);

    let readme = (!args.no_readme).then_some(config.paths.readme_file.as_path());
    let files = ReportGenerator::new().generate_all(&summary, &config.paths.report_dir, readme)?;

    print_report_files(&files);
    Ok(())
}

/// @ai:intent Print the registry table
/// @ai:effects io
fn list_tokenizers() {
    println!("Available tokenizers ({}):", TOKENIZERS.len());
    println!();
    println!("{:<10} {:<14} {}", "ID", "Backend", "Model");
    println!("{}", "-".repeat(60));

    for spec in TOKENIZERS {
        println!("{:<10} {:<14} {}", spec.id, spec.backend.as_str(), spec.model);
    }
}

/// @ai:intent Write the default configuration and the sample corpus
/// @ai:effects fs:write
fn init_config(output: PathBuf, corpus: Option<PathBuf>) -> Result<()> {
    let mut config = BenchConfig::default();
    if let Some(corpus) = corpus {
        config.paths.corpus_file = corpus;
    }

    config.save(&output)?;
    println!("Configuration saved to {}", output.display());

    if CorpusLoader::new().write_sample_if_absent(&config.paths.corpus_file)? {
        println!("Sample corpus written to {}", config.paths.corpus_file.display());
    } else {
        println!("Keeping existing corpus {}", config.paths.corpus_file.display());
    }

    Ok(())
}

/// @ai:intent Print which tokenizer runs succeeded and failed
/// @ai:effects io
fn print_run_summary(summary: &RunSummary) {
    println!();
    println!("Tokenization Run Summary");
    println!("========================");
    println!();

    for run in &summary.runs {
        match &run.outcome {
            RunOutcome::Saved {
                path,
                records,
                failed_samples,
            } => {
                let detail = format!("{} records -> {}", records, path.display());
                if *failed_samples > 0 {
                    println!(
                        "{} {:<10} {} ({} samples skipped)",
                        "OK".green().bold(),
                        run.tokenizer_id,
                        detail,
                        failed_samples.to_string().yellow()
                    );
                } else {
                    println!("{} {:<10} {}", "OK".green().bold(), run.tokenizer_id, detail);
                }
            }
            RunOutcome::Failed { reason } => {
                println!("{} {:<10} {}", "FAIL".red().bold(), run.tokenizer_id, reason.dimmed());
            }
        }
    }

    println!();
    println!("Successfully processed: {}", joined_or_none(&summary.succeeded()).green());
    println!("Failed: {}", joined_or_none(&summary.failed()).red());
}

/// @ai:intent Comma-joined ids, or "None"
/// @ai:effects pure
fn joined_or_none(ids: &[&str]) -> String {
    if ids.is_empty() {
        "None".to_string()
    } else {
        ids.join(", ")
    }
}

/// @ai:intent Print where the reports were written
/// @ai:effects io
fn print_report_files(files: &ReportFiles) {
    println!("Markdown report: {}", files.markdown.display());
    println!("JSON summary:    {}", files.json.display());

    match &files.chart {
        Some(chart) => println!("Chart:           {}", chart.display()),
        None => println!("Chart:           {}", "skipped".yellow()),
    }

    if files.readme_updated {
        println!("README results section updated");
    }
}
