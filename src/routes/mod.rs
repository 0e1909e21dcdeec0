use axum::{routing::get, Router};

use crate::handlers::{cafes, pages};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/cafes", get(cafes::list_cafes))
        .route("/add", get(cafes::add_form).post(cafes::add_cafe))
        .route("/search", get(cafes::search_form).post(cafes::search_cafes))
        // Browsers can only POST a form; PATCH and DELETE submit the same way.
        .route(
            "/edit",
            get(cafes::edit_form)
                .post(cafes::edit_cafe)
                .patch(cafes::edit_cafe)
                .delete(cafes::edit_cafe),
        )
        .route("/delete", get(cafes::delete_cafe).delete(cafes::delete_cafe))
        .with_state(state)
}
