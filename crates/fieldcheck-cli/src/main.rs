use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use fieldcheck_core::config::DEFAULT_CONFIG_FILE;
use fieldcheck_core::{record_from_json, record_to_json, Engine, EngineConfig, Report, UnknownRules};
use serde_json::json;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "fieldcheck")]
#[command(about = "Validate JSON records against declarative field rules", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a JSON object against a rule file
    Check {
        /// Path to the rule file (defaults to .fieldcheck.toml)
        #[arg(long)]
        rules: Option<String>,

        /// JSON input file; reads stdin when omitted
        #[arg(long)]
        input: Option<String>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: String,

        /// Treatment of unknown validator names: ignore, warn or error
        #[arg(long)]
        unknown_rules: Option<String>,
    },

    /// List all available validators
    Validators {
        /// Output format
        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Write a starter rule file
    Init {
        /// Destination path
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        path: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Check {
            rules,
            input,
            format,
            unknown_rules,
        } => {
            let passed = check_command(rules, input, format, unknown_rules)?;
            // Exit code: 1 if any field failed, 0 otherwise
            std::process::exit(if passed { 0 } else { 1 });
        }
        Commands::Validators { format } => {
            validators_command(format)?;
        }
        Commands::Init { path, force } => {
            init_command(path, force)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "fieldcheck_core=debug,fieldcheck=debug"
    } else {
        "fieldcheck_core=warn,fieldcheck=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn check_command(
    rules_path: Option<String>,
    input_path: Option<String>,
    format: String,
    unknown_rules: Option<String>,
) -> Result<bool> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = EngineConfig::load(rules_path.as_deref())?;

    // Override config with command-line arguments
    if let Some(policy) = unknown_rules {
        config.engine.unknown_rules = UnknownRules::from_str(&policy)
            .with_context(|| format!("Unknown --unknown-rules value: {}", policy))?;
    }
    if config.rules.is_empty() {
        bail!("No rules configured; add a [rules] table or run `fieldcheck init`");
    }

    let raw = read_input(input_path.as_deref())?;
    let json: serde_json::Value =
        serde_json::from_str(&raw).context("Input is not valid JSON")?;
    let mut record = record_from_json(json).context("Input must be a JSON object")?;
    debug!(fields = record.len(), rules = config.rules.len(), "input loaded");

    let engine = Engine::from_config(&config);
    let report = engine
        .validate(&mut record, &config.rules)
        .context("Rule file is invalid")?;

    let duration = start_time.elapsed();

    if format == "json" {
        let output = json!({
            "success": report.is_none(),
            "errors": report,
            "input": record_to_json(&record),
            "duration_ms": duration.as_millis()
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        output_human(report.as_ref(), config.rules.len(), duration);
    }

    Ok(report.is_none())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path)),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read input from stdin")?;
            Ok(buffer)
        }
    }
}

fn output_human(report: Option<&Report>, field_count: usize, duration: std::time::Duration) {
    let summary = match report {
        Some(report) => {
            report.print_human();
            println!();
            let failures = report.failure_count();
            let fields = report.len();
            format!(
                "Found {} {} in {} of {} {}",
                failures,
                if failures == 1 { "failure" } else { "failures" },
                fields,
                field_count,
                if field_count == 1 { "field" } else { "fields" }
            )
            .red()
            .bold()
        }
        None => format!(
            "All {} {} passed!",
            field_count,
            if field_count == 1 { "field" } else { "fields" }
        )
        .green()
        .bold(),
    };

    println!(
        "{}. Validation completed in {:.1}ms.",
        summary,
        duration.as_secs_f64() * 1000.0
    );
}

fn validators_command(format: String) -> Result<()> {
    let engine = Engine::new();
    let validators = engine.list_validators();

    if format == "json" {
        let validators_json: Vec<_> = validators
            .iter()
            .map(|(name, params)| {
                json!({
                    "name": name,
                    "params": params
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&validators_json)?);
    } else {
        println!("Available Validators:\n");
        for (name, params) in &validators {
            let mut token = name.clone();
            for param in params.iter() {
                token.push(':');
                token.push_str(param);
            }
            println!("  {}", token.cyan());
        }
        println!("\nTotal: {} validators", validators.len());
    }

    Ok(())
}

fn init_command(path: String, force: bool) -> Result<()> {
    if Path::new(&path).exists() && !force {
        bail!("{} already exists; pass --force to overwrite", path);
    }
    EngineConfig::example().save(&path)?;
    println!("{} {}", "Wrote".green().bold(), path);
    Ok(())
}
