use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

/// Fixed one-second window over the credential endpoints; a single
/// global window, no per-client tracking.
#[derive(Clone, Debug)]
pub struct AuthThrottle {
    limit: u32,
    window: Arc<Mutex<Window>>,
}

#[derive(Debug)]
struct Window {
    opened: Instant,
    hits: u32,
}

impl AuthThrottle {
    pub fn new(limit: u32) -> Self {
        Self {
            limit: limit.max(1),
            window: Arc::new(Mutex::new(Window {
                opened: Instant::now(),
                hits: 0,
            })),
        }
    }

    fn try_acquire(&self) -> bool {
        let mut window = self.window.lock().expect("auth throttle mutex poisoned");
        if window.opened.elapsed() >= Duration::from_secs(1) {
            window.opened = Instant::now();
            window.hits = 0;
        }
        if window.hits >= self.limit {
            return false;
        }
        window.hits += 1;
        true
    }
}

pub async fn throttle_middleware(
    State(throttle): State<AuthThrottle>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !throttle.try_acquire() {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"error":"too_many_requests"})),
        )
            .into_response();
    }
    next.run(req).await
}
