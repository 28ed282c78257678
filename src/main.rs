use anyhow::{bail, Result};
use ledger_executor::{CommandExecutor, ExecutorConfig, MemoryStore};
use ledger_executor_shared::{Invocation, Response};
use std::io::Write;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let mut argv = std::env::args().skip(1);
    let command = match argv.next() {
        Some(c) => c,
        None => bail!("usage: ledger-executor <command> [args...]"),
    };
    let invocation = Invocation::new(command, argv);

    let config = ExecutorConfig::from_env();
    info!("Work directory: {}", config.work_dir.display());

    let executor = CommandExecutor::new(Arc::new(MemoryStore::new()), config);
    info!("Commands: {}", executor.registry().names().join(", "));

    match executor.execute(&invocation).await {
        Response::Success(payload) => {
            let mut stdout = std::io::stdout();
            stdout.write_all(&payload)?;
            stdout.write_all(b"\n")?;
            Ok(())
        }
        Response::Error(message) => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
    }
}
