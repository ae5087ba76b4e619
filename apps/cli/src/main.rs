//! `bucketbrigade`: uploads a directory tree to an object-storage bucket and
//! appends one audit record per file to a CSV log.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bucketbrigade_audit_log::AuditLog;
use bucketbrigade_record::RunSummary;
use bucketbrigade_store::{FsStore, ObjectStore, S3Store};
use bucketbrigade_transfer::Uploader;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Upload a directory tree to an object-storage bucket with a CSV audit trail"
)]
struct Cli {
    /// Source directory to upload.
    #[arg(long)]
    source: PathBuf,

    /// Destination bucket name, or `file:///path` for a local store.
    #[arg(long)]
    bucket: String,

    /// Key prefix prepended to every relative path.
    #[arg(long, default_value = "")]
    prefix: String,

    /// Audit log path. Appended across runs, never truncated.
    #[arg(long, default_value = "transfers.csv")]
    log: PathBuf,

    /// AWS region override (S3 destinations only).
    #[arg(long)]
    region: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,bucketbrigade=debug")),
        )
        .init();

    let cli = Cli::parse();
    let log_path = cli.log.clone();

    match run(cli).await {
        Ok(summary) => {
            info!(%summary, log = %log_path.display(), "transfer summary");
            if summary.has_failures() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<RunSummary> {
    let store: Box<dyn ObjectStore> = match cli.bucket.strip_prefix("file://") {
        Some(root) => Box::new(FsStore::new(root)),
        None => Box::new(S3Store::connect(cli.bucket.clone(), cli.region.clone()).await),
    };

    let log = AuditLog::new(&cli.log);
    Uploader::new(store.as_ref(), &log)
        .run(&cli.source, &cli.prefix)
        .await
        .with_context(|| format!("upload of {} failed", cli.source.display()))
}
