use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use jobboard_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware, routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    // Register and login stand outside the session layer and carry the
    // brute-force throttle instead.
    let credential_api = Router::new()
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::AuthThrottle::new(config.auth_rps),
            middleware::rate_limit::throttle_middleware,
        ));

    let session_api = Router::new()
        .route("/api/auth/logout", post(routes::auth::logout))
        .route("/api/dashboard", get(routes::dashboard::dashboard))
        .route("/api/employer", get(routes::dashboard::employer_dashboard))
        .route(
            "/api/applicant",
            get(routes::dashboard::applicant_dashboard),
        )
        .route(
            "/api/jobs",
            get(routes::job::list_jobs).post(routes::job::post_job),
        )
        .route("/api/jobs/:id", get(routes::job::get_job))
        .route("/api/apply/:job_id", post(routes::application::apply))
        .route(
            "/api/view-applicants/:job_id",
            get(routes::application::view_applicants),
        )
        .route(
            "/api/review/:application_id",
            get(routes::application::review_form).post(routes::application::review),
        )
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth::require_session,
        ));

    std::fs::create_dir_all(&config.uploads_dir)?;
    info!("Serving uploads from: {}", config.uploads_dir);

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .merge(credential_api)
        .merge(session_api)
        .nest_service("/uploads", ServeDir::new(&config.uploads_dir))
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
