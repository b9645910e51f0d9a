//! gelf-tool: normalize newline-delimited GELF JSON.
//!
//! - stdin: one GELF record per line
//! - stdout: canonical record per line (fixed keys first, defaults applied)
//! - stderr: tracing output, filtered by `RUST_LOG`
//!
//! Usage: `gelf-tool [CONFIG_PATH]`. Without a path the built-in defaults apply.

use std::process::ExitCode;

use tokio::io::BufReader;
use tracing_subscriber::{fmt, EnvFilter};

use gelf_tool::{config, normalize::Normalizer, Result};

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.code(), error = %e, "gelf-tool failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg = match std::env::args().nth(1) {
        Some(path) => {
            let cfg = config::load_from_file(&path)?;
            tracing::info!(%path, "config loaded");
            cfg
        }
        None => config::ToolConfig::default(),
    };
    tracing::debug!(?cfg, "effective config");

    let normalizer = Normalizer::new(cfg);
    let summary = normalizer
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    tracing::info!(
        processed = summary.processed,
        skipped = summary.skipped,
        by_code = ?summary.skipped_by_code,
        "gelf-tool finished"
    );
    Ok(())
}
