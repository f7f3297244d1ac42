//! Stockroom Web Server
//!
//! Main web server implementation using Axum.

use crate::{create_app, AppState, WebConfig, WebError, WebResult};
use axum::serve;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Main Stockroom web server
pub struct StockroomServer {
    config: WebConfig,
    state: AppState,
}

impl StockroomServer {
    /// Create a new server; fails if the menu model cannot be loaded
    pub fn new(config: WebConfig) -> WebResult<Self> {
        let state = AppState::new(config.clone())?;

        Ok(Self { config, state })
    }

    /// Start the web server
    pub async fn start(self) -> WebResult<()> {
        let address = self.config.address();

        info!("Starting Stockroom Web Server");
        info!("Server address: http://{}", address);
        info!("Development mode: {}", self.config.dev_mode);

        let app = create_app(self.state.clone());

        let listener = TcpListener::bind(&address)
            .await
            .map_err(WebError::Server)?;

        info!("Server listening on http://{}", address);

        if let Err(e) = serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
        {
            error!("Server error: {}", e);
            return Err(WebError::Server(e));
        }

        info!("Server shut down");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &WebConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Builder for StockroomServer
pub struct StockroomServerBuilder {
    config: WebConfig,
}

impl StockroomServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self {
            config: WebConfig::default(),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: WebConfig) -> Self {
        Self { config }
    }

    /// Set the server host
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Enable development mode
    pub fn dev_mode(mut self, dev_mode: bool) -> Self {
        self.config.dev_mode = dev_mode;
        self
    }

    /// Set static files directory
    pub fn static_dir<S: Into<String>>(mut self, static_dir: S) -> Self {
        self.config.static_dir = Some(static_dir.into());
        self
    }

    /// Load the menu model from a TOML file
    pub fn menu_file<S: Into<String>>(mut self, menu_file: S) -> Self {
        self.config.menu_file = Some(menu_file.into());
        self
    }

    /// Set the session secret
    pub fn session_secret<S: Into<String>>(mut self, secret: S) -> Self {
        self.config.session_secret = secret.into();
        self
    }

    /// Build the server
    pub fn build(self) -> WebResult<StockroomServer> {
        StockroomServer::new(self.config)
    }
}

impl Default for StockroomServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let server = StockroomServer::new(WebConfig::default());
        assert!(server.is_ok());
    }

    #[test]
    fn test_server_builder() {
        let builder = StockroomServerBuilder::new()
            .host("localhost")
            .port(3000)
            .dev_mode(true);

        assert_eq!(builder.config.host, "localhost");
        assert_eq!(builder.config.port, 3000);
        assert!(builder.config.dev_mode);
    }

    #[test]
    fn test_missing_menu_file_fails_build() {
        let result = StockroomServerBuilder::new()
            .menu_file("/no/such/menu.toml")
            .build();
        assert!(matches!(result, Err(WebError::Core(_))));
    }

    #[test]
    fn test_config_defaults() {
        let config = WebConfig::default();
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert!(config.uses_default_secret());
        assert_eq!(config.cookie_name, "stockroom_session");
    }
}
