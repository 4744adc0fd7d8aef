#![allow(clippy::must_use_candidate)]

mod cors;
mod health;

use std::net::SocketAddr;

use axum::Router;
use promptsmith_config::Config;
use promptsmith_dispatch::Dispatcher;
use tower_http::trace::TraceLayer;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the dispatcher cannot be built from the
    /// `[dispatch]` section
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let dispatcher = Dispatcher::from_config(&config.dispatch)?;
        Ok(Self::with_dispatcher(config, dispatcher))
    }

    /// Build the server around an already constructed dispatcher
    pub fn with_dispatcher(config: &Config, dispatcher: Dispatcher) -> Self {
        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Dispatcher routes
        app = app.merge(promptsmith_dispatch::dispatch_router(dispatcher));

        // Apply middleware layers (innermost first)

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // CORS
        app = app.layer(cors::cors_layer(&config.server.cors));

        let cors_headers = cors::CorsHeaders::from_config(&config.server.cors);
        app = app.layer(axum::middleware::from_fn(move |req, next| {
            let headers = cors_headers.clone();
            async move { cors::cors_headers_middleware(&headers, req, next).await }
        }));

        Self {
            router: app,
            listen_address: config.server.listen_address(),
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
