use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/theme/toggle", post(handlers::toggle_theme_form))
        .route("/api/theme", get(handlers::get_theme))
        .route("/api/theme/toggle", post(handlers::toggle_theme))
        .route("/api/quote", get(handlers::get_quote))
        .route("/api/background", get(handlers::get_background))
        .route("/images/:name", get(handlers::get_image))
        .with_state(state)
}
