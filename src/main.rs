use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use integration_monitor::server::config::ServerConfig;
use integration_monitor::server::logging;
use integration_monitor::services::alert_service::RandomChooser;
use integration_monitor::store::MemoryStore;
use integration_monitor::version::VERSION;
use integration_monitor::web;

#[derive(Parser, Debug)]
#[command(author, version = VERSION, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<String>,
}

fn init_logging(log_dir: &str) -> Result<(), tracing_appender::rolling::InitError> {
    // Log to a file: JSON format, daily rotation
    let file_appender = logging::file_appender(log_dir)?;
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .json();

    let stdout_layer = fmt::layer().with_writer(std::io::stdout);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal.");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received.");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let server_config = Arc::new(ServerConfig::load(args.config.as_deref())?);

    if let Err(e) = init_logging(&server_config.log_dir) {
        eprintln!("Failed to set up logging in '{}': {}", server_config.log_dir, e);
        return Err(e.into());
    }
    info!("Starting integration monitor, version: {}", VERSION);

    let templates = match web::dashboard::load_templates() {
        Ok(tera) => Arc::new(tera),
        Err(e) => {
            error!(error = %e, "Failed to load dashboard templates.");
            return Err(e.into());
        }
    };

    let store = MemoryStore::seeded();
    let http_router = web::create_axum_router(store, templates, Arc::new(RandomChooser));

    let addr = server_config.socket_addr()?;
    let socket = if addr.is_ipv4() {
        tokio::net::TcpSocket::new_v4()?
    } else {
        tokio::net::TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket.set_keepalive(true)?;
    socket.bind(addr)?;
    let listener = socket.listen(1024)?;
    info!(address = %addr, "HTTP server listening");

    axum::serve(listener, http_router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Box::new)?;

    info!("Server stopped.");
    Ok(())
}
