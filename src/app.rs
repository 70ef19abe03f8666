use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/habits/report/:year", get(handlers::get_report))
        .route(
            "/api/habits/:year/:month",
            get(handlers::get_habits).post(handlers::save_habits),
        )
        .route(
            "/api/sleep/:year/:month",
            get(handlers::get_sleep).post(handlers::save_sleep),
        )
        .with_state(state)
}
