//! jxsd command-line interface.
//!
//! Thin shim over jxsd_core: reads the project config, builds the
//! generation request, and runs the orchestrator.
//!
//! Usage:
//!   jxsd init
//!   jxsd generate [--dry-run] [--json]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use jxsd_core::config::ConfigManager;
use jxsd_core::generator::{format_directives_pretty, render};
use jxsd_core::logging::{init_tracing, LogLevel, RunLogger};
use jxsd_core::model::InvocationReport;
use jxsd_core::orchestrator::SchemaGeneration;

/// jxsd - XML schema generation from annotated Java sources.
#[derive(Parser)]
#[command(name = "jxsd", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the config file.
    #[arg(long, global = true, default_value = "jxsd.toml")]
    config: PathBuf,

    /// Enable verbose logging.
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a commented default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Run the schema generator
    Generate {
        /// Print the composed invocation without running the generator
        #[arg(long)]
        dry_run: bool,
        /// Print the invocation report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    init_tracing(default_level);

    let config_path = absolute_config_path(&cli.config)?;
    tracing::debug!("Using config at {}", config_path.display());

    match cli.command {
        Commands::Init { force } => run_init(&config_path, force),
        Commands::Generate { dry_run, json } => {
            run_generate(&config_path, dry_run, json, cli.verbose)
        }
    }
}

/// Execute `jxsd init`.
fn run_init(config_path: &Path, force: bool) -> Result<()> {
    let manager = ConfigManager::new(config_path);
    if manager.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    manager
        .save()
        .with_context(|| format!("writing {}", config_path.display()))?;

    println!("Config written to {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Point [classpath].tool at the schema generator jars");
    println!("  2. Add [[schemas]] bindings for your namespaces");
    println!("  3. Run: jxsd generate");
    Ok(())
}

/// Execute `jxsd generate`.
fn run_generate(config_path: &Path, dry_run: bool, json: bool, verbose: bool) -> Result<()> {
    let mut manager = ConfigManager::new(config_path);
    manager.load()?;

    let base_dir = manager.project_dir();
    let settings = manager.settings();

    let request = settings.to_request(&base_dir)?;
    let classpaths = settings.to_classpaths(&base_dir);
    let launcher = settings.launcher(&base_dir);

    let generation = SchemaGeneration::configure(request, classpaths)?
        .with_runner(launcher)
        .with_verbose_arguments(verbose || settings.logging.verbose_arguments);

    if dry_run {
        let invocation = generation.plan();
        print!("{}", format_directives_pretty(&invocation));
        println!();
        print!("{}", render(&invocation));
        return Ok(());
    }

    let logger = RunLogger::new("generate", settings.logs_dir(&base_dir), settings.log_config())
        .context("creating run logger")?;
    let logger = Arc::new(logger);
    let generation = generation.with_logger(Arc::clone(&logger));

    let report = generation.execute()?;

    if json {
        println!("{}", report_json(&report)?);
        return Ok(());
    }

    println!("Schema generation succeeded:");
    println!("  exit code: {}", report.exit_code);
    println!("  files:     {}", report.file_count());
    for file in &report.generated_files {
        println!("    {}", file.display());
    }
    if let Some(ref log_path) = report.log_path {
        println!("  log:       {}", log_path.display());
    }
    Ok(())
}

/// Render an invocation report the way `--json` prints it.
fn report_json(report: &InvocationReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn absolute_config_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let cwd = std::env::current_dir().context("resolving current directory")?;
        Ok(cwd.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn init_creates_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("jxsd.toml");

        run_init(&config_path, false).unwrap();

        assert!(config_path.exists());
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[generator]"));
    }

    #[test]
    fn init_refuses_overwrite_without_force() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("jxsd.toml");

        run_init(&config_path, false).unwrap();
        let err = run_init(&config_path, false).unwrap_err();
        assert!(err.to_string().contains("--force"));
    }

    #[test]
    fn init_force_overwrites() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("jxsd.toml");

        run_init(&config_path, false).unwrap();
        run_init(&config_path, true).unwrap();
    }

    #[test]
    fn generate_requires_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("jxsd.toml");

        let err = run_generate(&config_path, true, false, false).unwrap_err();
        assert!(err.to_string().contains("jxsd init"));
    }

    #[test]
    fn generate_dry_run_composes_without_running() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("jxsd.toml");
        run_init(&config_path, false).unwrap();
        fs::create_dir_all(dir.path().join("src/main/java")).unwrap();

        run_generate(&config_path, true, false, false).unwrap();

        // Nothing ran: no output directory, no logs.
        assert!(!dir.path().join("build/generated/schemas").exists());
        assert!(!dir.path().join(".jxsd-logs").exists());
    }

    #[test]
    fn flags_parse_after_subcommand() {
        let cli =
            Cli::try_parse_from(["jxsd", "generate", "--config", "other.toml", "--verbose"])
                .unwrap();

        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Generate { .. }));
    }

    #[test]
    fn flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["jxsd", "--config", "other.toml", "init"]).unwrap();

        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(matches!(cli.command, Commands::Init { .. }));
    }

    #[test]
    fn report_json_lists_core_fields() {
        let report = InvocationReport {
            exit_code: 0,
            command: "ant -f schemagen-build.xml".to_string(),
            generated_files: vec![PathBuf::from("/out/orders.xsd")],
            started_at: "2025-06-01T12:00:00+00:00".to_string(),
            log_path: None,
        };

        let json = report_json(&report).unwrap();
        assert!(json.contains("\"exit_code\": 0"));
        assert!(json.contains("\"generated_files\""));
        assert!(json.contains("orders.xsd"));
        // log_path is omitted rather than serialized as null.
        assert!(!json.contains("log_path"));
    }
}
