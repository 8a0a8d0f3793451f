use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payments_api::application::handlers::PaymentHandlers;
use payments_api::config::{DEFAULT_MAX_AMOUNT, Environment, Settings};
use payments_api::infrastructure::open_store;
use payments_api::interfaces::http::router;
use rust_decimal::Decimal;
use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address the HTTP server listens on
    #[arg(long, env = "PAYMENTS_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "PAYMENTS_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Largest amount accepted for a single payment
    #[arg(long, env = "PAYMENTS_MAX_AMOUNT", default_value_t = DEFAULT_MAX_AMOUNT)]
    max_amount: Decimal,

    /// Runtime environment; `test` always uses the in-memory store
    #[arg(long = "env", env = "PAYMENTS_ENV", default_value_t = Environment::Development)]
    environment: Environment,

    /// Log filter directives
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log: String,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            environment: self.environment,
            bind: self.bind,
            db_path: self.db_path.clone(),
            max_amount: self.max_amount,
        }
    }
}

/// Resolves once `signal` fires. If the signal handler cannot be installed the
/// server keeps running until it is killed.
async fn shutdown_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_new(&cli.log).into_diagnostic()?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = cli.settings().validate().into_diagnostic()?;

    let store = open_store(&settings.store_backend()).into_diagnostic()?;
    let handlers = Arc::new(PaymentHandlers::new(store, settings.max_amount));
    let app = router(handlers.clone());

    let listener = tokio::net::TcpListener::bind(settings.bind)
        .await
        .into_diagnostic()?;
    info!(
        listen = %settings.bind,
        environment = %settings.environment,
        max_amount = %handlers.max_amount(),
        "payments api listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(tokio::signal::ctrl_c()))
        .await
        .into_diagnostic()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_shutdown_on_signal() {
        let shutdown = shutdown_signal(async { Ok(()) });
        assert!(timeout(Duration::from_millis(100), shutdown).await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_signal_handler_keeps_serving() {
        let shutdown = shutdown_signal(async { Err(std::io::Error::other("no signals")) });
        assert!(timeout(Duration::from_millis(100), shutdown).await.is_err());
    }
}
