use anyhow::{Context, Result};
use clap::Parser;
use credit_cleaner::{process, CleanerConfig};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Clean a `;`-delimited credit-request export.
#[derive(Debug, Parser)]
#[command(name = "credit-cleaner", version, about)]
struct Cli {
    /// YAML file with `input_path`, `output_dir` and/or `output_file_name`.
    #[arg(long, env = "CREDIT_CLEANER_CONFIG")]
    config: Option<PathBuf>,

    /// Source file.
    #[arg(long, env = "CREDIT_CLEANER_INPUT")]
    input: Option<PathBuf>,

    /// Destination directory; created if absent.
    #[arg(long, env = "CREDIT_CLEANER_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Output file name inside the destination directory.
    #[arg(long, env = "CREDIT_CLEANER_OUTPUT_NAME")]
    output_name: Option<String>,

    /// Print the run report as JSON on stdout.
    #[arg(long)]
    report: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<CleanerConfig> {
        let mut cfg = match &self.config {
            Some(path) => CleanerConfig::from_yaml_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => CleanerConfig::default(),
        };
        if let Some(input) = &self.input {
            cfg.input_path = input.clone();
        }
        if let Some(dir) = &self.output_dir {
            cfg.output_dir = dir.clone();
        }
        if let Some(name) = &self.output_name {
            cfg.output_file_name = name.clone();
        }
        Ok(cfg)
    }
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) resolve paths ────────────────────────────────────────────
    let cli = Cli::parse();
    let cfg = cli.resolve_config()?;
    info!(
        input = %cfg.input_path.display(),
        output = %cfg.output_path().display(),
        "startup"
    );

    // ─── 3) run the pipeline ─────────────────────────────────────────
    let report = match process::clean_file(&cfg) {
        Ok(r) => r,
        Err(e) => {
            error!("cleaning {} failed: {}", cfg.input_path.display(), e);
            return Err(e).with_context(|| format!("cleaning {}", cfg.input_path.display()));
        }
    };

    // ─── 4) report ───────────────────────────────────────────────────
    if cli.report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    info!("all done");
    Ok(())
}
