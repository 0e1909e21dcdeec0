use axum::{extract::State, response::Html};
use minijinja::context;

use crate::error::AppResult;
use crate::views::render;
use crate::AppState;

/// Landing page
pub async fn home(State(state): State<AppState>) -> AppResult<Html<String>> {
    render(&state.templates, "index.html", context! {})
}
