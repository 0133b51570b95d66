//! Page shell handler.

use axum::{extract::State, response::Html, Extension};
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::RequestId;
use crate::state::AppState;

/// Renders the page: site title, environment list, health line and footer.
///
/// The health line is whatever the mounted status panel holds at render time.
#[instrument(name = "home::index", skip(state, request_id), fields(request_id = %request_id.0))]
pub async fn index(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Html<String>, AppError> {
    let status = state.status.current();

    let mut context = tera::Context::new();
    context.insert("config", &state.config.ui);
    context.insert("environment", &state.status.env().display_rows());
    context.insert("status", &status.to_string());
    context.insert("settled", &status.is_settled());

    let html = state.tera.render("index.html", &context)?;
    Ok(Html(html))
}
