use axum::{
    http::{header, HeaderName, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use error::{LedgerError, LedgerResult};
pub use services::AppState;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(middlewares::trace::TRACE_ID_HEADER),
        ])
        .expose_headers([HeaderName::from_static(
            middlewares::trace::TRACE_ID_HEADER,
        )])
        .allow_origin(tower_http::cors::Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .nest("/api/v1", api_routes())
        .with_state(app_state)
        .layer(cors)
        .layer(middleware::from_fn(
            middlewares::metrics::metrics_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(
            middlewares::trace::trace_context_middleware,
        ))
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(quiz_routes())
        .merge(tournament_routes())
        .route("/matches/{id}", get(handlers::matches::get_match))
        .route("/matches/{id}/score", post(handlers::matches::submit_score))
        .route("/users/{id}/stats", get(handlers::users::get_user_stats))
        .route("/users/{id}/results", get(handlers::users::list_user_results))
        .route("/users/{id}/teams", get(handlers::users::list_user_teams))
        .merge(team_routes())
        .route(
            "/rankings/weekly",
            get(handlers::rankings::weekly_rankings),
        )
}

fn quiz_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/tests",
            get(handlers::quizzes::list_quizzes).post(handlers::quizzes::save_quiz),
        )
        .route(
            "/tests/{id}",
            get(handlers::quizzes::get_quiz).delete(handlers::quizzes::delete_quiz),
        )
        .route("/tests/{id}/submit", post(handlers::quizzes::submit_attempt))
}

fn tournament_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/tournaments",
            get(handlers::tournaments::list_tournaments)
                .post(handlers::tournaments::create_tournament),
        )
        .route("/tournaments/{id}", get(handlers::tournaments::get_tournament))
        .route(
            "/tournaments/{id}/participants",
            post(handlers::tournaments::join_tournament),
        )
        .route(
            "/tournaments/{id}/leaderboard",
            get(handlers::tournaments::get_leaderboard).post(handlers::tournaments::submit_score),
        )
        .route(
            "/tournaments/{id}/matches",
            get(handlers::tournaments::list_matches).post(handlers::tournaments::find_match),
        )
}

fn team_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/teams",
            get(handlers::teams::list_teams).post(handlers::teams::create_team),
        )
        .route("/teams/{id}", get(handlers::teams::get_team))
        .route("/teams/{id}/join", post(handlers::teams::join_team))
        .route("/teams/{id}/members", post(handlers::teams::add_member))
        .route("/teams/{id}/leave", post(handlers::teams::leave_team))
}
