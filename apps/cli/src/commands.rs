//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use contentindex_core::{ConvertReport, ProgressReporter, convert_all, flatten_item};
use contentindex_shared::{AppConfig, ConvertSettings, init_config, load_config, load_config_from};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// contentindex: flatten CMS content into search-index records.
#[derive(Parser)]
#[command(
    name = "contentindex",
    version,
    about = "Flatten CMS content items into search-index records.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.contentindex/contentindex.toml.
    #[arg(long, global = true, env = "CONTENTINDEX_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Convert every page in a snapshot into search records.
    Convert {
        /// Snapshot JSON (array of items or `{ "items": [...] }`).
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the records JSON.
        #[arg(short, long)]
        output: PathBuf,

        /// Element key that marks an item as a page (overrides config).
        #[arg(long)]
        slug_field: Option<String>,

        /// Fail if any item cannot be converted.
        #[arg(long)]
        strict: bool,
    },

    /// Print the flattened content blocks of one item.
    Inspect {
        /// Snapshot JSON.
        #[arg(short, long)]
        input: PathBuf,

        /// Codename of the item to flatten.
        #[arg(short, long)]
        codename: String,

        /// Element key that marks an item as a page (overrides config).
        #[arg(long)]
        slug_field: Option<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "contentindex=info",
        1 => "contentindex=debug",
        _ => "contentindex=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Convert {
            input,
            output,
            slug_field,
            strict,
        } => cmd_convert(config_path, &input, &output, slug_field, strict),
        Command::Inspect {
            input,
            codename,
            slug_field,
        } => cmd_inspect(config_path, &input, &codename, slug_field),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

/// Load config from `--config` if given, else from the user config dir.
fn resolve_config(config_path: Option<&Path>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Merge config with CLI overrides.
fn resolve_settings(config_path: Option<&Path>, slug_field: Option<String>) -> Result<ConvertSettings> {
    let config = resolve_config(config_path)?;
    let settings = ConvertSettings::from(&config);
    Ok(match slug_field {
        Some(field) => settings.with_slug_field(field),
        None => settings,
    })
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_convert(
    config_path: Option<&Path>,
    input: &Path,
    output: &Path,
    slug_field: Option<String>,
    strict: bool,
) -> Result<()> {
    let settings = resolve_settings(config_path, slug_field)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        slug_field = %settings.slug_field,
        "converting snapshot"
    );

    let snapshot = contentindex_core::load_snapshot(input)?;

    let reporter = CliProgress::new();
    let mut report = convert_all(&snapshot.universe, &settings, &reporter);

    // Entries that never decoded count as failures too.
    let mut failures = snapshot.rejected;
    failures.append(&mut report.failures);
    report.failures = failures;

    if strict && !report.failures.is_empty() {
        return Err(eyre!(
            "{} item(s) failed to convert; first: {} ({})",
            report.failures.len(),
            report.failures[0].codename,
            report.failures[0].reason
        ));
    }

    contentindex_core::write_records(output, &report.records)?;

    // Print summary
    println!();
    println!("  Conversion complete!");
    println!("  Records:  {}", report.records.len());
    println!("  Skipped:  {}", report.skipped);
    println!("  Failed:   {}", report.failures.len());
    for failure in &report.failures {
        println!("    - {}_{}: {}", failure.codename, failure.language, failure.reason);
    }
    println!("  Output:   {}", output.display());
    println!("  Time:     {:.1}s", report.elapsed.as_secs_f64());
    println!();

    Ok(())
}

fn cmd_inspect(
    config_path: Option<&Path>,
    input: &Path,
    codename: &str,
    slug_field: Option<String>,
) -> Result<()> {
    let settings = resolve_settings(config_path, slug_field)?;
    let snapshot = contentindex_core::load_snapshot(input)?;

    let blocks = flatten_item(&snapshot.universe, codename, &settings)?;
    println!("{}", serde_json::to_string_pretty(&blocks)?);
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(
                style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn item_converted(&self, codename: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Converting [{current}/{total}] {codename}"));
    }

    fn done(&self, _report: &ConvertReport) {
        self.spinner.finish_and_clear();
    }
}
