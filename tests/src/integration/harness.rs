//! Helpers that bind servers to ephemeral ports for the flows.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use inv_admin::api::InventoryClient;
use inv_api_server::{serve, InventoryService, InventoryStore, ServerConfig};

/// Password of the default configuration.
pub const ADMIN_PASSWORD: &str = inv_api_server::domain::config::DEFAULT_ADMIN_PASSWORD;

/// A backend running on `127.0.0.1:<ephemeral>`; stops when dropped.
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<InventoryStore>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Seeded backend with the default admin password.
    pub async fn start() -> Self {
        let service = InventoryService::new(ServerConfig::default()).expect("default config is valid");
        let store = service.store();
        let (base_url, shutdown) = spawn_router(service.router()).await;
        Self {
            base_url,
            store,
            shutdown: Some(shutdown),
        }
    }

    pub fn client(&self) -> InventoryClient {
        client_for(&self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Serve any router; returns its base URL and a shutdown trigger.
pub async fn spawn_router(router: Router) -> (String, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let (tx, rx) = oneshot::channel::<()>();

    tokio::spawn(serve(listener, router, async move {
        let _ = rx.await;
    }));

    (format!("http://{}", addr), tx)
}

pub fn client_for(base_url: &str) -> InventoryClient {
    InventoryClient::new(base_url, Duration::from_secs(5)).expect("client builds")
}
