//! sbom-migrate: CycloneDX schema detection and upgrade tool
//!
//! Reads a CycloneDX 1.0, 1.1 or 1.2 document in JSON or XML and rewrites it
//! as a normalized CycloneDX 1.2 document.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use sbom_migrate::{
    cli::{self, ReportStyle},
    codec::Encoding,
    config::{AppConfig, AppConfigBuilder, Validatable},
    model::SchemaVersion,
    pipeline::exit_codes,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nSupported input:",
        "\n  CycloneDX: 1.0, 1.1, 1.2 (JSON, XML)",
        "\n\nOutput:",
        "\n  CycloneDX 1.2 (JSON, XML)"
    )
}

#[derive(Parser)]
#[command(name = "sbom-migrate")]
#[command(version, long_version = build_long_version())]
#[command(about = "Detect and upgrade CycloneDX SBOM schema versions", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Validation errors
    2  Validation warnings (with --fail-on-warning)
    3  Error occurred

EXAMPLES:
    # Upgrade an old XML document to CycloneDX 1.2 JSON
    sbom-migrate upgrade bom.xml --format json -O bom.cdx.json

    # Show which schema revision a document uses
    sbom-migrate detect bom.json

    # CI check for reference-key problems
    sbom-migrate validate bom.json --fail-on-warning")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Options shared by every command that loads a document
#[derive(Args)]
struct DetectionArgs {
    /// Only try decoders for this encoding (can be repeated)
    #[arg(long = "input-format", value_enum)]
    input_formats: Vec<Encoding>,

    /// Oldest schema revision to accept (1.0, 1.1, 1.2)
    #[arg(long)]
    min_version: Option<SchemaVersion>,

    /// Try every decoder instead of guessing the encoding from the first character
    #[arg(long)]
    no_sniff: bool,
}

/// Arguments for the `upgrade` subcommand
#[derive(Parser)]
struct UpgradeArgs {
    /// Path to the input document
    input: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Output encoding (defaults to the output file's extension, then the input's encoding)
    #[arg(short, long, value_enum)]
    format: Option<Encoding>,

    /// Write without indentation
    #[arg(long)]
    compact: bool,

    /// Skip validation of the upgraded document
    #[arg(long)]
    no_validate: bool,

    /// Exit with code 2 when validation reports warnings
    #[arg(long)]
    fail_on_warning: bool,

    #[command(flatten)]
    detection: DetectionArgs,
}

/// Arguments for the `detect` subcommand
#[derive(Parser)]
struct DetectArgs {
    /// Path to the input document
    input: PathBuf,

    /// Output style
    #[arg(short, long, value_enum, default_value = "text")]
    output: ReportStyle,

    #[command(flatten)]
    detection: DetectionArgs,
}

/// Arguments for the `validate` subcommand
#[derive(Parser)]
struct ValidateArgs {
    /// Path to the input document
    input: PathBuf,

    /// Output style
    #[arg(short, long, value_enum, default_value = "text")]
    output: ReportStyle,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit with non-zero code when warnings are found (not just errors)
    #[arg(long)]
    fail_on_warning: bool,

    /// Report dangling dependency references as errors
    #[arg(long)]
    strict_refs: bool,

    #[command(flatten)]
    detection: DetectionArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Upgrade a document to the newest supported schema revision
    Upgrade(UpgradeArgs),

    /// Report the schema revision and encoding of a document
    Detect(DetectArgs),

    /// Check reference keys, the dependency graph and document metadata
    Validate(ValidateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .sbom-migrate.yaml in the current directory
    Init,
}

impl DetectionArgs {
    fn apply(&self, builder: AppConfigBuilder) -> AppConfigBuilder {
        let mut builder = builder.sniff_encoding(!self.no_sniff);
        if !self.input_formats.is_empty() {
            builder = builder.encodings(self.input_formats.clone());
        }
        if let Some(version) = self.min_version {
            builder = builder.min_version(version);
        }
        builder
    }
}

/// Layer CLI overrides over the discovered config file and check the result.
///
/// `force_validation` turns validation on regardless of the file setting.
fn effective_config(
    cli_config: Option<&Path>,
    overrides: &AppConfig,
    force_validation: bool,
) -> Result<AppConfig> {
    let (mut config, loaded_from) = AppConfig::from_file_with_overrides(cli_config, overrides);
    if let Some(path) = &loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }
    if force_validation {
        config.validation.enabled = true;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("Invalid configuration:\n  {}", messages.join("\n  "));
    }
    Ok(config)
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            exit_codes::ERROR
        }
    };
    std::process::exit(exit_code);
}

/// Dispatch to command handlers, returning the process exit code.
fn run(cli: Cli) -> Result<i32> {
    let code = match cli.command {
        Commands::Upgrade(args) => {
            let mut builder = args
                .detection
                .apply(AppConfig::builder())
                .output_file(args.output_file)
                .pretty(!args.compact)
                .validate(!args.no_validate)
                .fail_on_warning(args.fail_on_warning)
                .quiet(cli.quiet);
            if let Some(format) = args.format {
                builder = builder.output_encoding(format);
            }
            let config = effective_config(cli.config.as_deref(), &builder.build(), false)?;
            cli::run_upgrade(&args.input, &config)?
        }

        Commands::Detect(args) => {
            let overrides = args.detection.apply(AppConfig::builder()).quiet(cli.quiet).build();
            let config = effective_config(cli.config.as_deref(), &overrides, false)?;
            cli::run_detect(&args.input, &config, args.output)?;
            exit_codes::SUCCESS
        }

        Commands::Validate(args) => {
            let overrides = args
                .detection
                .apply(AppConfig::builder())
                .fail_on_dangling_refs(args.strict_refs)
                .fail_on_warning(args.fail_on_warning)
                .quiet(cli.quiet)
                .build();
            let config = effective_config(cli.config.as_deref(), &overrides, true)?;
            cli::run_validate(&args.input, &config, args.output, args.output_file)?
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "sbom-migrate", &mut io::stdout());
            exit_codes::SUCCESS
        }

        Commands::ConfigSchema { output } => {
            let schema = sbom_migrate::config::generate_json_schema()
                .context("failed to serialize config schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            exit_codes::SUCCESS
        }

        Commands::Config { action } => {
            run_config_action(action, cli.config.as_deref())?;
            exit_codes::SUCCESS
        }
    };
    Ok(code)
}

fn run_config_action(action: ConfigAction, explicit: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = sbom_migrate::config::load_or_default(explicit);
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml_ng::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                dirs::config_dir().map(|p| p.join("sbom-migrate").display().to_string()),
                dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in &[
                ".sbom-migrate.yaml",
                ".sbom-migrate.yml",
                "sbom-migrate.yaml",
                "sbom-migrate.yml",
            ] {
                eprintln!("  {name}");
            }
            eprintln!();
            match sbom_migrate::config::discover_config_file(explicit) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".sbom-migrate.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = sbom_migrate::config::generate_full_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(())
}
