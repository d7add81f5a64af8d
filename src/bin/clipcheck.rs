use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "clipcheck", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a template JSON file before rendering.
    Check(CheckArgs),
    /// Print every accepted transition, effect, filter, aspect ratio and asset type.
    Rules,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input template JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Treat vocabulary, placeholder and missing-file warnings as errors.
    #[arg(long)]
    strict: bool,

    /// Only print errors.
    #[arg(long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print every result, including passed checks.
    #[arg(long)]
    verbose: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// TOML file with a `[validation]` table. Defaults to the nearest config file above the input.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not check that referenced media files exist.
    #[arg(long)]
    skip_files: bool,

    /// Upper bound on file-check workers.
    #[arg(long)]
    max_workers: Option<usize>,

    /// Number of unchecked files above which checks run in parallel.
    #[arg(long)]
    parallel_threshold: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = match &cli.cmd {
        Command::Check(args) if args.verbose => "debug",
        _ => "warn",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Rules => cmd_rules(),
    }
}

fn load_config(args: &CheckArgs) -> anyhow::Result<clipcheck::ValidationConfig> {
    let file = match &args.config {
        Some(path) => Some(path.clone()),
        None => {
            let start = args
                .in_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            clipcheck::ValidationConfig::find_config_file(start)
        }
    };

    let mut config = match &file {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading validation config");
            clipcheck::ValidationConfig::from_file(path)
                .with_context(|| format!("load config '{}'", path.display()))?
        }
        None => clipcheck::ValidationConfig::default(),
    };
    config = config
        .with_env_overrides()
        .context("apply VALIDATION_* environment overrides")?;

    if args.strict {
        config.strict_mode = true;
    }
    if args.verbose {
        config.verbose = true;
    }
    if args.skip_files {
        config.skip_file_validation = true;
    }
    if let Some(n) = args.max_workers {
        config.max_workers = Some(n);
    }
    if let Some(n) = args.parallel_threshold {
        config.parallel_threshold = n;
    }
    config.check()?;
    Ok(config)
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<ExitCode> {
    let config = load_config(&args)?;
    let pipeline = clipcheck::Pipeline::from_config(&config, Some(args.in_path.clone()))?;
    let report = pipeline.run_file(&args.in_path);

    match args.format {
        Format::Json => {
            let json =
                serde_json::to_string_pretty(&report).context("serialize validation report")?;
            println!("{json}");
        }
        Format::Text => {
            let verbosity = if args.quiet {
                clipcheck::Verbosity::Quiet
            } else if config.verbose {
                clipcheck::Verbosity::Verbose
            } else {
                clipcheck::Verbosity::Normal
            };
            print!("{}", clipcheck::render_report(&report, verbosity));
        }
    }

    Ok(if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_rules() -> anyhow::Result<ExitCode> {
    for (name, values) in clipcheck::rules::valid_values_summary() {
        println!("{name}: {}", values.join(", "));
    }
    Ok(ExitCode::SUCCESS)
}
