//! Test server wrapper that starts promptsmith on a random port

use std::net::SocketAddr;

use promptsmith_config::Config;
use promptsmith_dispatch::{Dispatcher, StaticKeySource};
use promptsmith_server::Server;
use tokio_util::sync::CancellationToken;

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a test server with the given configuration
    ///
    /// Keys come from the config only, so the host environment cannot leak
    /// into assertions. Binds to port 0 for automatic port assignment.
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        let keys = StaticKeySource::from_config(&config.dispatch);
        let dispatcher = Dispatcher::with_key_source(&config.dispatch, keys)?;
        let server = Server::with_dispatcher(&config, dispatcher);

        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        // Bind the listener here so we know the actual port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, server.into_router())
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        let client = reqwest::Client::new();

        Ok(Self { addr, shutdown, client })
    }

    /// URL of `path` on the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Dispatcher endpoint URL
    pub fn endpoint(&self) -> String {
        self.url("/api/proxy-api")
    }

    /// Get a reference to the HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// POST a JSON body to the dispatcher, returning status and parsed body
    pub async fn dispatch(&self, body: &serde_json::Value) -> (u16, serde_json::Value) {
        let response = self
            .client
            .post(self.endpoint())
            .json(body)
            .send()
            .await
            .expect("request to test server");

        let status = response.status().as_u16();
        let json = response.json().await.unwrap_or(serde_json::Value::Null);
        (status, json)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
