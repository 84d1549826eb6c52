use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};

use radiostation::config::Config;

#[derive(Parser)]
#[command(version)]
struct Args {
    /// Set config file path
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let cfg = Config::parse(args.config);

    radiostation::log::set(&cfg.log.level);

    let listener = match TcpListener::bind(cfg.http.listen).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", cfg.http.listen, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = radiostation::serve(cfg, listener, shutdown_signal()).await {
        error!("Application error: {:?}", e);
        std::process::exit(1);
    }
}

#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let (mut terminate, mut interrupt) =
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(terminate), Ok(interrupt)) => (terminate, interrupt),
            _ => {
                error!("Failed to install signal handlers, falling back to Ctrl-C");
                let _ = tokio::signal::ctrl_c().await;
                return "CTRL_C";
            }
        };

    tokio::select! {
        _ = terminate.recv() => "SIGTERM",
        _ = interrupt.recv() => "SIGINT",
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> &'static str {
    let _ = tokio::signal::ctrl_c().await;
    "CTRL_C"
}

async fn shutdown_signal() {
    let signal = wait_for_signal().await;
    info!("Received {}, shutting down", signal);
}
