//! Toast fragment.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::state::AppState;

/// Current notification, or nothing once it has expired.
#[derive(Template, WebTemplate)]
#[template(
    ext = "html",
    source = r#"{% if let Some(message) = message %}<div class="toast-message" role="status">{{ message }}</div>{% endif %}"#
)]
pub struct ToastTemplate {
    pub message: Option<String>,
}

/// Render the visible toast (polled by HTMX).
pub async fn current(State(state): State<AppState>) -> ToastTemplate {
    ToastTemplate {
        message: state.notifier().current().map(|toast| toast.message),
    }
}
