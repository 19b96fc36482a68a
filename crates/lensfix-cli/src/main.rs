mod logging;
mod settings;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use lensfix_core::{
    BuildOptions, DEFAULT_VERSION_TAG, Error as CoreError, TimeRange, chart_json_schema,
    validate_chart_json,
};
use lensfix_generate::{
    BatchOrchestrator, BatchSummary, DEFAULT_OUTPUT_ROOT, ExampleRegistry, FixtureError,
    FixtureWriter, LensAttributesBuilder, OutputLayout, VERSION_TAG_ENV, format_display_name,
};
use logging::{LoggingError, init_logging};
use settings::{DEFAULT_SETTINGS_FILE, FixtureSettings, SettingsError, load_settings};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("fixture error: {0}")]
    Fixture(#[from] FixtureError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no fixture examples generated ({total} attempted)")]
    BatchFailed { total: usize },
}

#[derive(Parser, Debug)]
#[command(name = "lensfix", version, about = "Chart configuration fixture generator")]
struct Cli {
    /// Output root; fixtures land in <OUTPUT_DIR>/<VERSION_TAG>/.
    #[arg(long, global = true, env = "LENSFIX_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,
    /// Version subdirectory for fixtures.
    #[arg(long, global = true, env = VERSION_TAG_ENV)]
    version_tag: Option<String>,
    /// TOML settings file.
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,
    /// Also write JSON log events to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every registered example (default).
    GenerateAll,
    /// Run the named examples only.
    Generate(GenerateArgs),
    /// List registered examples.
    List,
    /// Build one fixture from a chart configuration file.
    Build(BuildArgs),
    /// Print the chart configuration JSON Schema.
    Schema,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Example names, as shown by `lensfix list`.
    #[arg(value_name = "NAME", required = true)]
    names: Vec<String>,
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Chart configuration JSON file.
    #[arg(long)]
    config: PathBuf,
    /// Fixture filename inside the version directory.
    #[arg(long)]
    out: String,
    /// Start of the time range, e.g. `now-24h`.
    #[arg(long)]
    time_from: Option<String>,
    /// End of the time range.
    #[arg(long, default_value = "now")]
    time_to: String,
    /// Wrap attributes in an embeddable input document.
    #[arg(long, default_value_t = false)]
    embeddable: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = load_settings(&cli.settings)?;

    let log_file = cli.log_file.clone().or_else(|| settings.log_file.clone());
    init_logging(settings.log_level(), log_file.as_deref())?;

    let layout = resolve_layout(&cli, &settings)?;
    let command = cli.command.unwrap_or(Command::GenerateAll);

    match command {
        Command::GenerateAll => run_batch(layout, None).await,
        Command::Generate(args) => run_batch(layout, Some(args.names)).await,
        Command::List => {
            list_examples();
            Ok(())
        }
        Command::Build(args) => run_build(layout, args).await,
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&chart_json_schema())?);
            Ok(())
        }
    }
}

/// Flag or environment first, then the settings file, then defaults.
fn resolve_layout(cli: &Cli, settings: &FixtureSettings) -> Result<OutputLayout, CliError> {
    let root = cli
        .output_dir
        .clone()
        .or_else(|| settings.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_ROOT));
    let version_tag = cli
        .version_tag
        .clone()
        .filter(|tag| !tag.trim().is_empty())
        .or_else(|| settings.version_tag.clone())
        .unwrap_or_else(|| DEFAULT_VERSION_TAG.to_string());
    Ok(OutputLayout::checked(root, version_tag)?)
}

fn new_writer(layout: OutputLayout) -> FixtureWriter {
    FixtureWriter::new(Arc::new(LensAttributesBuilder::new()), layout)
}

async fn run_batch(layout: OutputLayout, names: Option<Vec<String>>) -> Result<(), CliError> {
    let registry = ExampleRegistry::builtin();
    tracing::info!(event = "batch_started", examples = registry.len());

    let version_dir = layout.version_dir();
    let orchestrator = BatchOrchestrator::new(registry, new_writer(layout));
    let timer = Instant::now();

    let summary = match names {
        Some(names) => orchestrator.run_selected(&names).await,
        None => orchestrator.run_all().await,
    };

    let duration_ms = timer.elapsed().as_millis();
    tracing::info!(
        event = "batch_finished",
        succeeded = summary.succeeded,
        failed = summary.failed.len(),
        duration_ms = duration_ms
    );

    print_report(&summary, &version_dir);
    if summary.is_success() {
        Ok(())
    } else {
        Err(CliError::BatchFailed {
            total: summary.total,
        })
    }
}

fn print_report(summary: &BatchSummary, version_dir: &std::path::Path) {
    for display_name in &summary.generated {
        println!("generated {display_name}");
    }

    println!();
    println!("Output directory: {}/", version_dir.display());

    if !summary.failed.is_empty() {
        println!();
        println!("{} fixture example(s) failed to generate:", summary.failed.len());
        for failure in &summary.failed {
            println!("  - {}: {}", failure.name, failure.reason);
        }
    }

    println!();
    if summary.failed.is_empty() && summary.succeeded > 0 {
        println!("All {} fixture examples generated successfully", summary.succeeded);
    } else if summary.succeeded > 0 {
        println!(
            "Generated {}/{} fixture examples",
            summary.succeeded, summary.total
        );
    }
}

fn list_examples() {
    let registry = ExampleRegistry::builtin();
    for example in registry.iter() {
        println!(
            "{:<32} {}",
            example.name(),
            format_display_name(example.entry_point())
        );
    }
}

async fn run_build(layout: OutputLayout, args: BuildArgs) -> Result<(), CliError> {
    let BuildArgs {
        config,
        out,
        time_from,
        time_to,
        embeddable,
    } = args;

    let content = std::fs::read_to_string(&config).map_err(|source| CliError::Read {
        path: config.clone(),
        source,
    })?;
    let document: serde_json::Value = serde_json::from_str(&content)?;
    let chart = validate_chart_json(&document)?;

    let options = BuildOptions {
        time_range: time_from.map(|from| TimeRange::relative(from, time_to)),
        embeddable,
    };

    let path = new_writer(layout)
        .write_fixture(&out, &chart, &options)
        .await?;
    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_tag_flag_overrides_settings() {
        let cli = Cli::parse_from(["lensfix", "--output-dir", "out", "--version-tag", "v1.2.3"]);
        let settings = FixtureSettings {
            version_tag: Some("v0.0.1".to_string()),
            ..FixtureSettings::default()
        };

        let layout = resolve_layout(&cli, &settings).expect("layout");
        assert_eq!(layout.version_dir(), PathBuf::from("out").join("v1.2.3"));
    }

    #[test]
    fn escaping_version_tag_is_rejected() {
        let cli = Cli::parse_from(["lensfix", "--version-tag", "../outside"]);
        let err = resolve_layout(&cli, &FixtureSettings::default()).expect_err("escaping tag");
        assert!(matches!(
            err,
            CliError::Fixture(FixtureError::InvalidOutputPath(_))
        ));

        let settings = FixtureSettings {
            version_tag: Some("nested/tag".to_string()),
            ..FixtureSettings::default()
        };
        let cli = Cli::parse_from(["lensfix", "--version-tag", " "]);
        assert!(resolve_layout(&cli, &settings).is_err());
    }
}
