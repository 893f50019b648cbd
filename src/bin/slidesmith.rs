//! Populate a slide deck from a run configuration.
//!
//! # Usage
//!
//! Fill a copy of the match template and hand it over:
//! ```sh
//! SLIDESMITH_ACCESS_TOKEN=ya29... slidesmith --config run.yaml
//! ```
//!
//! Print the batch without calling any service:
//! ```sh
//! slidesmith --config run.yaml --dry-run
//! ```
//!
//! Build the `report` section on a fresh presentation, logging to a file too:
//! ```sh
//! slidesmith --config run.json --scratch --log-file slidesmith.log
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde_json::json;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use slidesmith::config::RunConfig;
use slidesmith::pipeline::{DeckRun, RunSummary};
use slidesmith::service::{GoogleClient, TokenFile, TokenSource};

/// Populate a Google Slides deck through batched edit operations
#[derive(Parser, Debug)]
#[command(name = "slidesmith", version)]
struct Args {
    /// Run configuration (.json, .yaml or .yml)
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,

    /// Build the report section on a new presentation instead of copying the template
    #[arg(long)]
    scratch: bool,

    /// Print the batch as JSON and exit without calling any service
    #[arg(long)]
    dry_run: bool,

    /// Also write the log to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Read the access token from this file, overriding the configuration
    #[arg(long, value_name = "FILE")]
    token_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = match path.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
                _ => PathBuf::from("."),
            };
            let name = path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| "slidesmith.log".into());
            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        },
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let _log_guard = init_logging(args.log_file.as_deref());

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "run failed");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        },
    }
}

async fn run(args: &Args) -> slidesmith::Result<()> {
    let config = RunConfig::load(&args.config)?;
    let plan = config.plan(args.scratch)?;

    if args.dry_run {
        let operations = plan.operations()?;
        let body = json!({ "title": plan.title, "requests": operations });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let tokens: Box<dyn TokenSource> = match &args.token_file {
        Some(path) => Box::new(TokenFile::new(path)),
        None => config.token_source()?,
    };
    let client = GoogleClient::with_timeout(tokens, config.request_timeout())?;

    let summary = DeckRun::new(&client, &client).execute(&plan).await?;
    report(&summary);
    Ok(())
}

fn report(summary: &RunSummary) {
    info!(
        document = %summary.document_id,
        operations = summary.operations_applied,
        patched = ?summary.patched_element,
        "run complete"
    );
    if !summary.permissions.is_complete() {
        for failure in summary.permissions.failures() {
            eprintln!("Warning: {}", failure);
        }
    }
    println!("{}", summary.document_id);
}
