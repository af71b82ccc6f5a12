// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{admin, auth, health, problem, result, vote},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Assembles the main application router.
///
/// * Public: health, signup/login, problem reads, results.
/// * Authenticated: casting votes.
/// * Admin: problem create/delete and user management.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(health::root))
        .route("/healthz", get(health::healthz))
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/problems", get(problem::list_problems))
        .route("/problems/random", get(problem::random_problem))
        .route("/problems/{id}", get(problem::get_problem))
        .route("/results", get(result::get_results));

    let voter_routes = Router::new()
        .route("/votes", post(vote::cast_vote))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let admin_routes = Router::new()
        .route("/problems", post(problem::create_problem))
        .route("/problems/{id}", delete(problem::delete_problem))
        .route("/users", get(admin::list_users))
        .route("/users/{id}", delete(admin::delete_user))
        .route("/users/{id}/votes", get(admin::user_votes))
        // Auth runs first, then the admin check. `route_layer` keeps both off
        // the fallback, so unknown paths stay 404.
        .route_layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
                .layer(middleware::from_fn(admin_middleware)),
        );

    Router::new()
        .merge(public_routes)
        .merge(voter_routes)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
