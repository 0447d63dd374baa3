use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};
use hireflow_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let auth_api = Router::new()
        .route("/api/auth/signup", post(routes::auth::signup))
        .route("/api/auth/signin", post(routes::auth::signin))
        .layer(axum::middleware::from_fn_with_state(
            hireflow_backend::middleware::rate_limit::new_rps_state(config.public_rps),
            hireflow_backend::middleware::rate_limit::rps_middleware,
        ));

    let integration_api = Router::new()
        .route("/api/auth/me", get(routes::auth::me))
        .route(
            "/api/jobs",
            get(routes::job_routes::list_jobs).post(routes::job_routes::create_job),
        )
        .route(
            "/api/jobs/enhance",
            post(routes::job_routes::enhance_description),
        )
        .route(
            "/api/jobs/:id/status",
            patch(routes::job_routes::update_job_status),
        )
        .route(
            "/api/candidates",
            get(routes::candidate_routes::list_candidates),
        )
        .route(
            "/api/candidates/shortlist",
            post(routes::candidate_routes::shortlist_candidates),
        )
        .route(
            "/api/candidates/compare",
            post(routes::candidate_routes::compare_candidates),
        )
        .route("/api/dashboard/stats", get(routes::dashboard::stats))
        .layer(axum::middleware::from_fn(
            hireflow_backend::middleware::auth::require_bearer_auth,
        ))
        .layer(axum::middleware::from_fn_with_state(
            hireflow_backend::middleware::rate_limit::new_rps_state(config.integration_rps),
            hireflow_backend::middleware::rate_limit::rps_middleware,
        ));

    let public_api = Router::new()
        .route(
            "/api/public/jobs/:reference",
            get(routes::public::resolve_job),
        )
        .route("/api/public/apply", post(routes::public::submit_application))
        .layer(axum::middleware::from_fn_with_state(
            hireflow_backend::middleware::rate_limit::new_rps_state(config.public_rps),
            hireflow_backend::middleware::rate_limit::rps_middleware,
        ));

    info!("Serving uploads from: {}", config.uploads_dir);

    let app = base_routes
        .merge(auth_api)
        .merge(integration_api)
        .merge(public_api)
        .nest_service(
            "/uploads",
            tower_http::services::ServeDir::new(config.uploads_dir.clone()),
        )
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
