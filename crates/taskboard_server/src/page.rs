//! Single-page task list UI.

use axum::response::Html;

/// Serves the browser UI.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}
