//! HTTP server: the translation form, a JSON API and health/OpenAPI endpoints

use axum::{
    extract::{Form, Json, State},
    response::Html,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use utoipa::{OpenApi, ToSchema};

use crate::core::config::TranslatorConfig;
use crate::server::page::render_page;
use crate::shell::{Panel, PanelKind, ShellReport, TranslationShell};

/// Application state
#[derive(Clone)]
pub struct AppState {
    shell: TranslationShell,
    config: Arc<TranslatorConfig>,
}

impl AppState {
    pub fn new(shell: TranslationShell, config: TranslatorConfig) -> Self {
        Self {
            shell,
            config: Arc::new(config),
        }
    }

    fn target_language(&self, requested: Option<&str>) -> String {
        self.config.resolve_target_language(requested).to_string()
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub model: String,
}

/// Form and JSON translation input
#[derive(Debug, Deserialize, ToSchema)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
    /// Defaults to the configured language (normally `en`)
    #[serde(default)]
    pub target_language: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health_check, translate_json),
    components(schemas(HealthResponse, TranslateRequest, ShellReport, Panel, PanelKind))
)]
struct ApiDoc;

/// Health check handler
#[utoipa::path(get, path = "/health", responses((status = 200, description = "Service is up", body = HealthResponse)))]
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.shell.model_name().to_string(),
    })
}

/// Empty form
async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page("", &state.config.default_target_language, None))
}

/// Form submission: the page again, with the result panels
async fn translate_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TranslateRequest>,
) -> Html<String> {
    let target_language = state.target_language(form.target_language.as_deref());
    let report = state.shell.run(&form.text, &target_language).await;

    Html(render_page(&form.text, &target_language, Some(&report)))
}

/// JSON translation handler. Blank text yields an empty panel list.
#[utoipa::path(
    post,
    path = "/api/translate",
    request_body = TranslateRequest,
    responses((status = 200, description = "Panels for the unguarded and guarded translations", body = ShellReport))
)]
async fn translate_json(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TranslateRequest>,
) -> Json<ShellReport> {
    let target_language = state.target_language(payload.target_language.as_deref());
    Json(state.shell.run(&payload.text, &target_language).await)
}

/// OpenAPI document
async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the router around an already wired shell
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(translate_form))
        .route("/api/translate", post(translate_json))
        .route("/health", get(health_check))
        .route("/api-docs/openapi.json", get(openapi))
        .with_state(Arc::new(state))
}

/// Run the HTTP server
pub async fn run_server(config: TranslatorConfig, host: String, port: u16) -> anyhow::Result<()> {
    let shell = TranslationShell::from_config(config.clone())?;

    let app = build_app(AppState::new(shell, config));

    // Bind address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::translator::tests::StubModel;
    use crate::guard::gate::tests::StubClassifier;

    fn state(default_target_language: &str) -> AppState {
        AppState::new(
            TranslationShell::with_collaborators(StubModel::replying("Hola"), StubClassifier::clean()),
            TranslatorConfig {
                api_key: "test_key".to_string(),
                default_target_language: default_target_language.to_string(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_target_language_fallback() {
        let state = state("de");
        assert_eq!(state.target_language(Some("es")), "es");
        assert_eq!(state.target_language(Some(" fr ")), "fr");
        assert_eq!(state.target_language(Some("")), "de");
        assert_eq!(state.target_language(None), "de");
    }

    #[test]
    fn test_openapi_lists_paths() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        assert!(doc["paths"]["/api/translate"]["post"].is_object());
        assert!(doc["paths"]["/health"]["get"].is_object());
        assert!(doc["components"]["schemas"]["ShellReport"].is_object());
    }
}
