use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use console::style;
use courseprep_core::{
    BriefInputs, CourseprepError, RuleSet, assemble_brief, format_quality_readable,
    format_terminology_readable,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tokio::fs;
use tracing_subscriber::{EnvFilter, fmt, util::SubscriberInitExt};

use crate::pipeline::{Inputs, analyze_terms, load_inputs, load_rules, load_structure, validate};

mod pipeline;

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", secs / 60.0, secs % 60.0)
    }
}

#[derive(Parser)]
#[command(name = "courseprep")]
#[command(
    about = "Validate course research, rank its terminology, and assemble a generation brief"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON file overriding any of the built-in rule tables
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Only print machine output, no progress or readable summary
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Args)]
struct ChannelArgs {
    /// Web research document (JSON)
    #[arg(long)]
    web: Option<PathBuf>,

    /// YouTube transcription document (JSON)
    #[arg(long)]
    youtube: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Score how sufficient and credible the collected material is
    Quality {
        #[command(flatten)]
        channels: ChannelArgs,

        /// Write the JSON report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Rank the terms the course has to teach
    Terms {
        #[command(flatten)]
        channels: ChannelArgs,

        /// Course theme recorded in the report
        #[arg(short, long)]
        theme: Option<String>,

        /// Write the JSON report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Merge course structure, research and both reports into one brief
    Brief {
        /// Course structure document (JSON)
        #[arg(long)]
        structure: PathBuf,

        #[command(flatten)]
        channels: ChannelArgs,

        /// Course theme, defaults to the course name
        #[arg(short, long)]
        theme: Option<String>,

        /// Write the brief here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn create_spinner(msg: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
        .try_init();
}

/// Usage and configuration problems exit with 2, everything else with 1.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<CourseprepError>() {
        Some(
            CourseprepError::NoInputSupplied
            | CourseprepError::ReadFailed { .. }
            | CourseprepError::MalformedInput { .. },
        ) => 2,
        _ => 1,
    }
}

async fn write_output(path: &Path, contents: &str, quiet: bool) -> Result<()> {
    fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    if !quiet {
        eprintln!("{} {}", style("Saved:").dim(), style(path.display()).cyan());
    }
    Ok(())
}

/// Write the report as JSON to `output`, or print it when no path is given.
/// The readable summary is only shown when stdout is not carrying the JSON.
async fn emit_report<T: Serialize>(
    report: &T,
    output: Option<&Path>,
    quiet: bool,
    readable: impl FnOnce(&T) -> String,
) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    match output {
        Some(path) => {
            write_output(path, &json, quiet).await?;
            if !quiet {
                println!("{}", readable(report));
            }
        }
        None => println!("{}", json),
    }
    Ok(())
}

async fn prepare(
    channels: &ChannelArgs,
    rules: Option<&Path>,
) -> Result<(Arc<Inputs>, Arc<RuleSet>)> {
    let rules = load_rules(rules).await?;
    let inputs = load_inputs(channels.web.as_deref(), channels.youtube.as_deref()).await?;
    Ok((Arc::new(inputs), Arc::new(rules)))
}

async fn run(cli: Cli) -> Result<()> {
    let quiet = cli.quiet;
    let rules_path = cli.rules.as_deref();

    if !quiet {
        eprintln!(
            "\n{}  {}\n",
            style("courseprep").cyan().bold(),
            style("Course Research Analyzer").dim()
        );
    }

    let total_start = Instant::now();

    match cli.command {
        Command::Quality { channels, output } => {
            let (inputs, rules) = prepare(&channels, rules_path).await?;

            let spinner = create_spinner("Validating research...", quiet);
            let report = match validate(&inputs, &rules, Utc::now()) {
                Ok(report) => report,
                Err(e) => {
                    spinner.finish_and_clear();
                    return Err(e);
                }
            };
            spinner.finish_with_message(format!(
                "{} Validated: web {}, youtube {} {}",
                style("✓").green().bold(),
                style(report.web_research.status()).yellow(),
                style(report.youtube_research.status()).yellow(),
                style(format!("[{}]", format_duration(total_start.elapsed()))).dim()
            ));

            emit_report(&report, output.as_deref(), quiet, format_quality_readable).await?;
        }
        Command::Terms {
            channels,
            theme,
            output,
        } => {
            let (inputs, rules) = prepare(&channels, rules_path).await?;

            let spinner = create_spinner("Extracting terminology...", quiet);
            let report = match analyze_terms(inputs, rules, theme, Utc::now()).await {
                Ok(report) => report,
                Err(e) => {
                    spinner.finish_and_clear();
                    return Err(e);
                }
            };
            spinner.finish_with_message(format!(
                "{} Extracted: {} unique terms, top {} {}",
                style("✓").green().bold(),
                report.terminology_summary.total_unique_terms,
                report.terminology_summary.top_terms_count,
                style(format!("[{}]", format_duration(total_start.elapsed()))).dim()
            ));

            emit_report(
                &report,
                output.as_deref(),
                quiet,
                format_terminology_readable,
            )
            .await?;
        }
        Command::Brief {
            structure,
            channels,
            theme,
            output,
        } => {
            let structure = load_structure(&structure).await?;
            let (inputs, rules) = prepare(&channels, rules_path).await?;
            let now = Utc::now();

            let spinner = create_spinner("Analyzing research...", quiet);
            let theme = theme.unwrap_or_else(|| structure.course_name.clone());
            let analyzed = match validate(&inputs, &rules, now) {
                Ok(quality) => analyze_terms(Arc::clone(&inputs), rules, Some(theme), now)
                    .await
                    .map(|terms| (quality, terms)),
                Err(e) => Err(e),
            };
            let (quality, terminology) = match analyzed {
                Ok(reports) => reports,
                Err(e) => {
                    spinner.finish_and_clear();
                    return Err(e);
                }
            };
            spinner.finish_with_message(format!(
                "{} Analyzed: {} quality, {} terms {}",
                style("✓").green().bold(),
                style(quality.overall_quality.label()).yellow(),
                terminology.terminology_summary.top_terms_count,
                style(format!("[{}]", format_duration(total_start.elapsed()))).dim()
            ));

            let brief = assemble_brief(&BriefInputs {
                structure: &structure,
                web: inputs.web_collection(),
                video: inputs.video_collection(),
                quality: Some(&quality),
                terminology: Some(&terminology),
            });

            match output.as_deref() {
                Some(path) => write_output(path, &brief, quiet).await?,
                None => println!("{}", brief),
            }
        }
    }

    if !quiet {
        eprintln!(
            "{} {}",
            style("Total time:").dim(),
            style(format_duration(total_start.elapsed())).cyan().bold()
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(exit_code(&e));
    }
}
