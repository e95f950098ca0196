use crate::handlers::{credits, styles};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/credits", get(credits::get_credits))
        .route("/credits/topup", post(credits::topup_credits))
        .route("/styles", get(styles::list_styles))
        .route("/styles/render", post(styles::render_style));

    Router::new()
        .nest("/v1", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
