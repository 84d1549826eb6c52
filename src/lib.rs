use std::future::Future;

use axum::{extract::Request, Router};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, info_span};

use crate::config::Config;
use crate::route::AppState;
use crate::service::database::DatabaseService;

pub mod config;
pub mod entity;
pub mod error;
pub mod log;
pub mod migration;
pub mod result;
pub mod route;
pub mod service;
pub mod utils;

mod convert;

pub async fn serve<F>(cfg: Config, listener: TcpListener, signal: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let database = DatabaseService::new(&cfg.database).await?;

    let app_state = AppState {
        config: cfg.clone(),
        database,
    };

    let app = Router::new()
        .merge(route::source::route())
        .merge(route::channel::route())
        .with_state(app_state)
        .layer(if cfg.http.cors {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
        })
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                info_span!(
                    "http_request",
                    uri = ?request.uri(),
                    method = ?request.method(),
                )
            }),
        );

    info!("Server listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .await?;
    info!("Server shutdown");
    Ok(())
}
