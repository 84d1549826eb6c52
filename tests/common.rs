use std::net::{Ipv4Addr, SocketAddr};

use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use radiostation::config::Config;

pub struct Server {
    pub addr: SocketAddr,
    _dir: TempDir,
    _shutdown: oneshot::Sender<()>,
}

impl Server {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

pub async fn start() -> Server {
    start_with(Config::default()).await
}

/// Runs the server on a random port against a fresh SQLite file.
pub async fn start_with(mut cfg: Config) -> Server {
    let dir = tempfile::tempdir().unwrap();
    cfg.database.url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("radiostation.db").display()
    );
    cfg.database.max_connections = 4;

    let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(radiostation::serve(cfg, listener, async move {
        let _ = rx.await;
    }));

    Server {
        addr,
        _dir: dir,
        _shutdown: tx,
    }
}
