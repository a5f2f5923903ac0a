//! API documentation: the OpenAPI description and an explorer page

use axum::{
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

const OPENAPI_DOCUMENT: &str = include_str!("../../../assets/openapi.yaml");
const EXPLORER_PAGE: &str = include_str!("../../../assets/explorer.html");

/// GET /openapi.yaml
async fn openapi() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/yaml")], OPENAPI_DOCUMENT)
}

/// GET / - interactive explorer pointed at ./openapi.yaml
async fn explorer() -> Html<&'static str> {
    Html(EXPLORER_PAGE)
}

/// Documentation routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(explorer))
        .route("/openapi.yaml", get(openapi))
}
