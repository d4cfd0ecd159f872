//! HTTP server for the browser front end

pub mod assets;
pub mod handlers;
pub mod highlight;
pub mod router;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use simplyfi_ai::Explainer;
use simplyfi_flow::{FlowchartBuilder, SyntaxTreeGrapher};

pub use highlight::Highlighter;
pub use router::create_router;

/// Where the server listens.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

/// Shared, read-only state behind every request.
pub struct ServerState {
    pub explainer: Explainer,
    pub highlighter: Highlighter,
    pub flowchart: FlowchartBuilder,
    pub syntax_tree: SyntaxTreeGrapher,
}

impl ServerState {
    pub fn new(explainer: Explainer) -> Self {
        Self {
            explainer,
            highlighter: Highlighter::new(),
            flowchart: FlowchartBuilder::new(),
            syntax_tree: SyntaxTreeGrapher::new(),
        }
    }
}

pub struct SimplyfiServer {
    state: Arc<ServerState>,
    config: ServerConfig,
}

impl SimplyfiServer {
    pub fn new(state: ServerState, config: ServerConfig) -> Self {
        Self {
            state: Arc::new(state),
            config,
        }
    }

    pub fn state(&self) -> Arc<ServerState> {
        Arc::clone(&self.state)
    }

    /// Bind the listener without serving yet, so callers can learn the
    /// actual address (port 0 picks a free one).
    pub async fn bind(&self) -> anyhow::Result<tokio::net::TcpListener> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))
    }

    /// Serve on an already bound listener until the process exits.
    pub async fn serve(self, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
        let addr: SocketAddr = listener.local_addr()?;
        tracing::info!("Simplyfi listening on http://{}", addr);
        tracing::info!("Explanations via {}", self.state.explainer.provider_name());

        axum::serve(listener, create_router(self.state))
            .await
            .context("server error")
    }

    pub async fn start(self) -> anyhow::Result<()> {
        let listener = self.bind().await?;
        self.serve(listener).await
    }
}
