use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use iacshield::config::{Config, CONFIG_FILE_NAME};
use iacshield::error::ShieldError;
use iacshield::output::OutputFormat;
use iacshield::rules::{RuleEngine, Severity};
use iacshield::ScanOptions;

#[derive(Parser)]
#[command(
    name = "iacshield",
    about = "Static security scanner for infrastructure-as-code",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan an exported configuration graph for misconfigurations
    Scan {
        /// Graph file, or a directory of graph files
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json, sarif)
        #[arg(long, short = 'f', default_value = "console", env = "IACSHIELD_FORMAT")]
        format: String,

        /// Minimum severity to fail (low, medium, high, critical)
        #[arg(long)]
        fail_on: Option<String>,

        /// Include passed checks in the report
        #[arg(long)]
        include_passed: bool,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List all built-in rules
    ListRules {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Generate a starter .iacshield.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("IACSHIELD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan {
            path,
            config,
            format,
            fail_on,
            include_passed,
            output,
        } => cmd_scan(path, config, format, fail_on, include_passed, output),
        Commands::ListRules { format } => cmd_list_rules(format),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_input_error() {
                eprintln!("Expected a JSON block graph file or a directory containing one.");
            }
            process::exit(e.exit_code());
        }
    }
}

fn cmd_scan(
    path: PathBuf,
    config: Option<PathBuf>,
    format_str: String,
    fail_on_str: Option<String>,
    include_passed: bool,
    output_path: Option<PathBuf>,
) -> Result<i32, ShieldError> {
    let format = OutputFormat::from_str_lenient(&format_str).ok_or_else(|| {
        ShieldError::Config(format!("unknown output format '{}'", format_str))
    })?;

    let fail_on = fail_on_str
        .map(|s| {
            Severity::from_str_lenient(&s)
                .ok_or_else(|| ShieldError::Config(format!("unknown severity '{}'", s)))
        })
        .transpose()?;

    let options = ScanOptions {
        config_path: config,
        format,
        fail_on_override: fail_on,
        include_passed: include_passed.then_some(true),
    };

    let report = iacshield::scan(&path, &options)?;
    let rendered = iacshield::render_report(&report, format)?;

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)
            .map_err(|e| ShieldError::Output(format!("{}: {}", out.display(), e)))?,
        None => print!("{}", rendered),
    }

    // 0 = pass, 1 = a failed check at or above the threshold
    Ok(if report.verdict.pass { 0 } else { 1 })
}

fn cmd_list_rules(format_str: String) -> Result<i32, ShieldError> {
    let engine = RuleEngine::new()?;
    let rules = engine.list_rules();

    match format_str.as_str() {
        "json" => {
            let listing: Vec<serde_json::Value> = rules
                .iter()
                .map(|rule| {
                    serde_json::json!({
                        "id": rule.id,
                        "long_id": rule.long_id(),
                        "severity": rule.severity,
                        "summary": rule.summary,
                        "impact": rule.impact,
                        "resolution": rule.resolution,
                        "links": rule.links,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        _ => {
            println!("{:<14} {:<52} {:<10} SUMMARY", "ID", "LONG ID", "SEVERITY");
            println!("{}", "-".repeat(110));
            for rule in &rules {
                println!(
                    "{:<14} {:<52} {:<10} {}",
                    rule.id,
                    rule.long_id(),
                    rule.severity.to_string(),
                    rule.summary,
                );
            }
        }
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, ShieldError> {
    let path = PathBuf::from(CONFIG_FILE_NAME);

    if path.exists() && !force {
        eprintln!("{} already exists. Use --force to overwrite.", CONFIG_FILE_NAME);
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created {}", CONFIG_FILE_NAME);

    Ok(0)
}
