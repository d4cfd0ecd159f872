//! REST API handlers for the Simplyfi server

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use simplyfi_ai::ExplainError;
use simplyfi_core::{to_dot, CoreError, Graph, GraphData, Language};
use simplyfi_flow::FlowError;

use crate::ServerState;

fn default_language() -> String {
    Language::Python.display_name().to_string()
}

/// Body for flowchart, syntax-tree and highlight requests
#[derive(Debug, Deserialize)]
pub struct CodeRequest {
    pub code: String,
    #[serde(default = "default_language")]
    pub language: String,
}

/// Body for explanation requests
#[derive(Debug, Deserialize)]
pub struct ExplainBody {
    pub code: String,
    #[serde(default)]
    pub instruction: Option<String>,
}

/// A built graph, both as data and as Graphviz source
#[derive(Debug, Serialize)]
pub struct GraphResponse {
    pub graph: GraphData,
    pub dot: String,
}

impl From<Graph> for GraphResponse {
    fn from(graph: Graph) -> Self {
        GraphResponse {
            dot: to_dot(&graph),
            graph: graph.to_data(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub explanation: String,
    pub provider: String,
}

#[derive(Debug, Serialize)]
pub struct HighlightResponse {
    pub html: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Every failure a request can hit. Converted to a JSON message; none of
/// them stop the server.
#[derive(Debug)]
pub enum ApiError {
    BlankCode,
    Language(CoreError),
    Flow(FlowError),
    Explain(ExplainError),
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError::Language(e)
    }
}

impl From<FlowError> for ApiError {
    fn from(e: FlowError) -> Self {
        ApiError::Flow(e)
    }
}

impl From<ExplainError> for ApiError {
    fn from(e: ExplainError) -> Self {
        ApiError::Explain(e)
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::BlankCode => (
                StatusCode::BAD_REQUEST,
                "blank_code",
                "Please enter some code first.".to_string(),
            ),
            ApiError::Language(e) => (StatusCode::BAD_REQUEST, "unknown_language", e.to_string()),
            ApiError::Flow(e @ FlowError::InvalidSyntax { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_syntax", e.to_string())
            }
            ApiError::Flow(e @ FlowError::UnsupportedLanguage(_)) => {
                (StatusCode::BAD_REQUEST, "unsupported_language", e.to_string())
            }
            ApiError::Flow(e) => (StatusCode::INTERNAL_SERVER_ERROR, "parser_failure", e.to_string()),
            ApiError::Explain(ExplainError::EmptyCode) => (
                StatusCode::BAD_REQUEST,
                "blank_code",
                ExplainError::EmptyCode.to_string(),
            ),
            ApiError::Explain(e @ ExplainError::Timeout(_)) => {
                (StatusCode::GATEWAY_TIMEOUT, "upstream_timeout", e.to_string())
            }
            ApiError::Explain(e) => (StatusCode::BAD_GATEWAY, "upstream_unavailable", e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = self.parts();
        tracing::debug!("Request failed with {}: {}", status, message);
        let body = ErrorResponse {
            error: error.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

fn non_blank(code: &str) -> Result<(), ApiError> {
    if code.trim().is_empty() {
        Err(ApiError::BlankCode)
    } else {
        Ok(())
    }
}

/// Build the heuristic flowchart for any supported language
pub async fn flowchart(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<CodeRequest>,
) -> Result<Json<GraphResponse>, ApiError> {
    non_blank(&request.code)?;
    let language: Language = request.language.parse()?;
    let graph = state.flowchart.build(&request.code, language);
    Ok(Json(graph.into()))
}

/// Build the syntax tree graph (Python only)
pub async fn syntax_tree(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<CodeRequest>,
) -> Result<Json<GraphResponse>, ApiError> {
    non_blank(&request.code)?;
    let language: Language = request.language.parse()?;
    let graph = state.syntax_tree.build_for(&request.code, language)?;
    Ok(Json(graph.into()))
}

/// Ask the configured language model to explain the code
pub async fn explain(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<ExplainBody>,
) -> Result<Json<ExplainResponse>, ApiError> {
    let explanation = state
        .explainer
        .explain(&request.code, request.instruction.as_deref())
        .await?;
    Ok(Json(ExplainResponse {
        explanation: explanation.text,
        provider: explanation.provider,
    }))
}

/// Syntax-highlight code to inline-styled HTML
pub async fn highlight(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<CodeRequest>,
) -> Result<Json<HighlightResponse>, ApiError> {
    let language: Language = request.language.parse()?;
    Ok(Json(HighlightResponse {
        html: state.highlighter.highlight_html(&request.code, language),
    }))
}

/// Languages offered in the selector
pub async fn languages() -> Json<Vec<&'static str>> {
    Json(Language::ALL.iter().map(|l| l.display_name()).collect())
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Json(health)
}
