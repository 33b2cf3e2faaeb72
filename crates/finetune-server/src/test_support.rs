use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use finetune::UpstreamConfig;

use crate::routes;
use crate::state::AppState;

pub struct TestServerHandle {
    pub base_url: String,
    shutdown_tx: Option<oneshot::Sender<()>>,
    join_handle: Option<JoinHandle<()>>,
}

impl TestServerHandle {
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.join_handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.join_handle.take() {
            handle.abort();
        }
    }
}

/// Spawn an in-process proxy bound to an ephemeral port, pointed at the
/// given upstream endpoint.
///
/// Intended for integration tests that want a hermetic server instance
/// without spawning a separate process or touching the environment.
pub async fn spawn_test_server(upstream_base_url: &str) -> Result<TestServerHandle> {
    let state = AppState::with_config(UpstreamConfig::new(upstream_base_url, "test-api-key"))?;
    let app = routes::configure(Arc::clone(&state));

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let join_handle = tokio::spawn(async move {
        let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        });
        let _ = serve.await;
    });

    Ok(TestServerHandle {
        base_url: format!("http://{}", addr),
        shutdown_tx: Some(shutdown_tx),
        join_handle: Some(join_handle),
    })
}
