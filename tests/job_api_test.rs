use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use uuid::Uuid;

use jobboard_backend::{middleware, routes, AppState};

async fn test_app() -> Option<Router> {
    dotenvy::dotenv().ok();
    if env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return None;
    }
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("AUTH_RPS", "1000");
    env::set_var(
        "UPLOADS_DIR",
        env::temp_dir()
            .join("jobboard-test-uploads")
            .display()
            .to_string(),
    );
    let _ = jobboard_backend::config::init_config();

    let config = jobboard_backend::config::get_config();
    let pool = jobboard_backend::database::pool::create_pool(&config.database_url)
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    let app_state = AppState::new(pool);

    let credential_api = Router::new()
        .route("/api/auth/register", post(routes::auth::register))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::AuthThrottle::new(config.auth_rps),
            middleware::rate_limit::throttle_middleware,
        ));

    let session_api = Router::new()
        .route("/api/employer", get(routes::dashboard::employer_dashboard))
        .route(
            "/api/jobs",
            get(routes::job::list_jobs).post(routes::job::post_job),
        )
        .route("/api/jobs/:id", get(routes::job::get_job))
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth::require_session,
        ));

    Some(credential_api.merge(session_api).with_state(app_state))
}

async fn register(app: &Router, username: &str, role: &str) -> String {
    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "username": username,
                "email": format!("{}@mail.example", username),
                "password": "correct horse battery",
                "role": role
            })
            .to_string(),
        ))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    body["token"].as_str().unwrap().to_string()
}

async fn get_with_token(app: &Router, uri: &str, token: &str) -> (StatusCode, JsonValue) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, body)
}

fn job_titles(body: &JsonValue) -> Vec<String> {
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|j| j["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn job_posting_and_search_flow() {
    let Some(app) = test_app().await else {
        return;
    };

    let suffix = Uuid::new_v4().simple().to_string();
    let employer_token = register(&app, &format!("acme_hr_{}", suffix), "employer").await;
    let other_token = register(&app, &format!("initech_hr_{}", suffix), "employer").await;
    let applicant_token = register(&app, &format!("jdoe_{}", suffix), "applicant").await;

    let title = format!("Backend Engineer {}", suffix);
    let req = Request::builder()
        .method("POST")
        .uri("/api/jobs")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", employer_token))
        .body(Body::from(
            json!({
                "title": title,
                "company_name": "Acme",
                "location": "Remote",
                "description": "Own the server side of the product."
            })
            .to_string(),
        ))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let job: JsonValue = serde_json::from_slice(&bytes).unwrap();
    let job_id = job["id"].as_str().unwrap().to_string();

    // Applicants posting a job are bounced to the dashboard, silently.
    let req = Request::builder()
        .method("POST")
        .uri("/api/jobs")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", applicant_token))
        .body(Body::from(
            json!({
                "title": "Should Not Exist",
                "company_name": "Nope",
                "location": "Nowhere",
                "description": "n/a"
            })
            .to_string(),
        ))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/api/dashboard");

    // The employer dashboard holds exactly the owner's jobs.
    let (status, body) = get_with_token(&app, "/api/employer", &employer_token).await;
    assert_eq!(status, StatusCode::OK);
    assert!(job_titles(&body).contains(&title));

    let (status, body) = get_with_token(&app, "/api/employer", &other_token).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!job_titles(&body).contains(&title));

    // Search is case-insensitive across title, company and location.
    let (status, body) = get_with_token(
        &app,
        &format!("/api/jobs?q=backend%20engineer%20{}", suffix.to_uppercase()),
        &applicant_token,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(job_titles(&body).contains(&title));

    let (status, body) =
        get_with_token(&app, &format!("/api/jobs?q=zzz_{}", suffix), &applicant_token).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["items"].as_array().unwrap().is_empty());

    // No query returns everything, including our job.
    let (status, body) = get_with_token(&app, "/api/jobs", &applicant_token).await;
    assert_eq!(status, StatusCode::OK);
    assert!(job_titles(&body).contains(&title));

    // Detail lookup, then a missing id.
    let (status, body) =
        get_with_token(&app, &format!("/api/jobs/{}", job_id), &applicant_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], title.as_str());

    let (status, _) = get_with_token(
        &app,
        &format!("/api/jobs/{}", Uuid::new_v4()),
        &applicant_token,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
