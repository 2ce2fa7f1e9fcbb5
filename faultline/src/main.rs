use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use faultline::config::{ColorMode, ReportConfig};
use faultline::error::FaultlineError;
use faultline::format::ctx::make_ctx;
use faultline::format::helpers::pluralize;
use faultline::format::styler::styler_for;
use faultline::render::{count_reportable, render_failures};
use faultline::report_model::FailureDump;

#[derive(Debug, Parser)]
#[command(name = "faultline", version, about = "Render collected test failures as numbered reports")]
struct Cli {
    /// JSON failure dump; read from stdin when omitted.
    dump: Option<PathBuf>,

    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    color: Option<ColorMode>,

    #[arg(long)]
    full_backtrace: bool,

    #[arg(long)]
    project_root: Option<PathBuf>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("FAULTLINE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<ReportConfig, FaultlineError> {
    let mut config = match &cli.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };
    if let Some(mode) = cli.color {
        config.color_mode = mode;
    }
    if cli.full_backtrace {
        config.full_backtrace = true;
    }
    if let Some(root) = &cli.project_root {
        config.project_root = Some(root.clone());
    }
    Ok(config)
}

fn read_dump(path: Option<&PathBuf>) -> Result<FailureDump, FaultlineError> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| FaultlineError::Io {
                path: path.clone(),
                source,
            })?;
            FailureDump::from_json_str(&text, &path.to_string_lossy())
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| FaultlineError::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            FailureDump::from_json_str(&text, "<stdin>")
        }
    }
}

fn run(cli: &Cli) -> Result<(), FaultlineError> {
    let config = load_config(cli)?;
    let styler = styler_for(config.color_mode, config.palette);
    let ctx = make_ctx(config)?;
    let examples = read_dump(cli.dump.as_ref())?.into_examples();
    tracing::debug!(examples = examples.len(), root = %ctx.project_root, "rendering failure dump");

    let reportable = count_reportable(&examples);
    if reportable == 0 {
        return Ok(());
    }
    println!("\nFailures:");
    print!("{}", render_failures(&examples, &ctx, styler.as_ref()));
    println!("\n{}", pluralize(reportable, "reported example"));
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("faultline: {err}");
            ExitCode::FAILURE
        }
    }
}
