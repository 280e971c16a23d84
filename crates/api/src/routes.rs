use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub const DOH_PATH: &str = "/dns-query";

pub fn create_doh_routes(state: AppState) -> Router {
    Router::new()
        .route(
            DOH_PATH,
            get(handlers::get_dns_query)
                .post(handlers::post_dns_query)
                .fallback(handlers::unsupported_method),
        )
        .with_state(state)
}
