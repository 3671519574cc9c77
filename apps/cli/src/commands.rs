//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use syllabus_core::{ContentResolver, IdentifierCodec, ModuleContent, ScanProgress, ScanResult};
use syllabus_shared::{AppConfig, CurriculumConfig, init_config, load_config, load_config_from};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Syllabus: turn a folder of lesson documents into a navigable curriculum.
#[derive(Parser)]
#[command(
    name = "syllabus",
    version,
    about = "Scan lesson documents into a structured curriculum model.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Config file (defaults to ~/.syllabus/syllabus.toml).
    #[arg(long, global = true, env = "SYLLABUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

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
    /// Scan a curriculum root and print the tree as JSON.
    Scan {
        /// Directory holding one folder per phase.
        root: PathBuf,

        /// Write JSON to this file instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Emit compact JSON.
        #[arg(long)]
        compact: bool,
    },

    /// Print the relative document path for a phase and module slug.
    Resolve {
        /// Phase slug, e.g. `phase-6`.
        phase: String,
        /// Module slug, e.g. `module-6-1-modern-build-tools`.
        module: String,
    },

    /// Print the raw document for a phase and module slug.
    Show {
        /// Directory holding one folder per phase.
        root: PathBuf,
        /// Phase slug.
        phase: String,
        /// Module slug.
        module: String,
    },

    /// Encode a document filename into its slug.
    Encode {
        filename: String,
    },

    /// Decode a slug into the document filename it refers to.
    Decode {
        id: String,
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

/// Initialize tracing based on CLI flags. Logs go to stderr so JSON on
/// stdout stays clean.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = ["syllabus_cli", "syllabus_core", "syllabus_markdown", "syllabus_shared"]
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
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
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Scan { root, out, compact } => {
            cmd_scan(config_path, &root, out.as_deref(), compact)
        }
        Command::Resolve { phase, module } => cmd_resolve(config_path, &phase, &module),
        Command::Show {
            root,
            phase,
            module,
        } => cmd_show(config_path, &root, &phase, &module).await,
        Command::Encode { filename } => cmd_encode(config_path, &filename),
        Command::Decode { id } => cmd_decode(config_path, &id),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

/// Load the file config (explicit path or default location).
fn load_app_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Load and validate the runtime config.
fn load_curriculum_config(path: Option<&Path>) -> Result<CurriculumConfig> {
    let app = load_app_config(path)?;
    Ok(CurriculumConfig::try_from(&app)?)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_scan(config_path: Option<&Path>, root: &Path, out: Option<&Path>, compact: bool) -> Result<()> {
    let config = load_curriculum_config(config_path)?;

    info!(root = %root.display(), phases = config.phases.len(), "scanning curriculum");

    let reporter = CliProgress::new();
    let result = syllabus_core::scan(root, &config, &reporter)?;

    let json = if compact {
        serde_json::to_string(&result.tree)?
    } else {
        serde_json::to_string_pretty(&result.tree)?
    };

    match out {
        Some(path) => {
            std::fs::write(path, &json)
                .map_err(|e| eyre!("failed to write '{}': {e}", path.display()))?;
            eprintln!();
            eprintln!("  Curriculum scanned!");
            eprintln!("  Phases:  {}", result.tree.phases.len());
            eprintln!("  Modules: {}", result.tree.module_count());
            eprintln!("  Skipped: {}", result.skipped.len());
            eprintln!("  Output:  {}", path.display());
            eprintln!("  Time:    {:.1}s", result.elapsed.as_secs_f64());
            eprintln!();
        }
        None => println!("{json}"),
    }

    for skipped in &result.skipped {
        eprintln!("  skipped {}: {}", skipped.path.display(), skipped.reason);
    }

    Ok(())
}

fn cmd_resolve(config_path: Option<&Path>, phase: &str, module: &str) -> Result<()> {
    let config = load_curriculum_config(config_path)?;
    // Resolution does not touch the filesystem, so any root will do.
    let resolver = ContentResolver::new(".", &config);
    let path = resolver
        .resolve(phase, module)
        .ok_or_else(|| eyre!("cannot resolve '{phase}' / '{module}'"))?;
    println!("{}", path.display());
    Ok(())
}

async fn cmd_show(config_path: Option<&Path>, root: &Path, phase: &str, module: &str) -> Result<()> {
    let config = load_curriculum_config(config_path)?;
    let resolver = ContentResolver::new(root, &config);

    let content = resolver.fetch(phase, module).await?;
    if let ModuleContent::NotFound { expected_path, .. } = &content {
        info!(expected = %expected_path.display(), "showing placeholder");
    }
    print!("{}", content.text());
    Ok(())
}

fn cmd_encode(config_path: Option<&Path>, filename: &str) -> Result<()> {
    let config = load_curriculum_config(config_path)?;
    let codec = IdentifierCodec::new(&config.codec);
    println!("{}", codec.encode(filename));
    Ok(())
}

fn cmd_decode(config_path: Option<&Path>, id: &str) -> Result<()> {
    let config = load_curriculum_config(config_path)?;
    let codec = IdentifierCodec::new(&config.codec);
    println!("{}", codec.decode(id));
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let app = load_app_config(config_path)?;
    // Validate before printing so a broken file is reported, not echoed.
    CurriculumConfig::try_from(&app)?;
    println!("{}", toml::to_string_pretty(&app)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner on stderr.
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

impl ScanProgress for CliProgress {
    fn phase_started(&self, title: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Phase [{current}/{total}] {title}"));
    }

    fn module_parsed(&self, filename: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Parsing [{current}/{total}] {filename}"));
    }

    fn done(&self, _result: &ScanResult) {
        self.spinner.finish_and_clear();
    }
}
