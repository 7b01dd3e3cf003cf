use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::RwLock;

use crate::config::AppState;
use crate::utils::api_response::ResponseBuilder;

/// Sliding-window limiter keyed by client address.
pub struct RateLimiter {
    requests: RwLock<HashMap<String, Vec<Instant>>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            requests: RwLock::new(HashMap::new()),
            max_requests,
            window,
        }
    }

    pub async fn check_rate_limit(&self, identifier: &str) -> bool {
        self.check_at(identifier, Instant::now()).await
    }

    async fn check_at(&self, identifier: &str, now: Instant) -> bool {
        let mut requests = self.requests.write().await;
        let cutoff = now.checked_sub(self.window).unwrap_or(now);

        // Idle clients are dropped so the map does not grow without bound.
        requests.retain(|_, hits| hits.last().is_some_and(|&t| t > cutoff));

        let hits = requests.entry(identifier.to_string()).or_default();
        hits.retain(|&t| t > cutoff);
        if hits.len() >= self.max_requests {
            return false;
        }
        hits.push(now);
        true
    }
}

fn client_identifier(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn rate_limit_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let identifier = client_identifier(request.headers(), peer);

    if !state.rate_limiter.check_rate_limit(&identifier).await {
        tracing::warn!(client = %identifier, "rate limit exceeded");
        return ResponseBuilder::error::<()>(
            StatusCode::TOO_MANY_REQUESTS,
            "RATE_LIMIT_EXCEEDED",
            "Too many requests. Please try again later.",
        )
        .into_response();
    }

    next.run(request).await
}
