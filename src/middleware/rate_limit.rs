//! Fixed-window rate limiting per client IP.
//!
//! A client's window opens with its first request. Within the window the
//! first `max_requests` requests pass and the rest get 429; once the window
//! has elapsed the count starts over. Counters live in a [`DashMap`] and
//! each check holds the entry's shard lock for its read-modify-write, so
//! concurrent requests from one client never lose an increment.
//!
//! Behind a trusted proxy the key is the rightmost `X-Forwarded-For` entry,
//! the address appended by the one proxy hop that is trusted. Entries to its
//! left are client-supplied and ignored. Otherwise, or when the header is
//! absent or unparsable, the key is the peer address from
//! `tower_governor`'s [`PeerIpKeyExtractor`].

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use jobboard_config::RateLimitConfig;
use jobboard_core::AppError;
use tokio::{task::JoinHandle, time::Instant};
use tower_governor::key_extractor::{KeyExtractor, PeerIpKeyExtractor};
use tracing::{debug, warn};

use crate::state::AppState;

pub const LIMIT_HEADER: &str = "x-ratelimit-limit";
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Outcome of counting one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Time until the client's window resets.
    pub reset_after: Duration,
}

impl RateLimitDecision {
    fn apply_headers(&self, headers: &mut HeaderMap) {
        headers.insert(LIMIT_HEADER, HeaderValue::from(self.limit));
        headers.insert(REMAINING_HEADER, HeaderValue::from(self.remaining));
        if !self.allowed {
            // Round up so clients never retry before the window resets
            let secs = self.reset_after.as_secs_f64().ceil().max(1.0) as u64;
            headers.insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
    }
}

#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: Arc<DashMap<IpAddr, Window>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(DashMap::new()),
        }
    }

    /// Counts one request from `ip`.
    pub fn check(&self, ip: IpAddr) -> RateLimitDecision {
        let now = Instant::now();
        let window_len = self.config.window();
        let limit = self.config.max_requests;

        let mut window = self.windows.entry(ip).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(window.started) >= window_len {
            window.started = now;
            window.count = 0;
        }

        let reset_after = window_len.saturating_sub(now.duration_since(window.started));
        if window.count >= limit {
            return RateLimitDecision {
                allowed: false,
                limit,
                remaining: 0,
                reset_after,
            };
        }

        window.count += 1;
        RateLimitDecision {
            allowed: true,
            limit,
            remaining: limit - window.count,
            reset_after,
        }
    }

    /// Drops windows that have fully elapsed. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let window_len = self.config.window();
        let before = self.windows.len();
        self.windows
            .retain(|_, w| now.duration_since(w.started) < window_len);
        before.saturating_sub(self.windows.len())
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }

    /// Purges expired windows once per window length until aborted.
    pub fn spawn_purge_task(&self) -> JoinHandle<()> {
        let limiter = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(limiter.config.window());
            // The first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                let removed = limiter.purge_expired();
                if removed > 0 {
                    debug!(removed, "Purged expired rate limit windows");
                }
            }
        })
    }
}

/// The address appended by the nearest proxy: the last entry of the last
/// `X-Forwarded-For` header.
fn nearest_forwarded_hop(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get_all(FORWARDED_FOR_HEADER)
        .iter()
        .next_back()?
        .to_str()
        .ok()?
        .rsplit(',')
        .next()?
        .trim()
        .parse()
        .ok()
}

/// Resolves the client address used as the rate limit key.
pub fn client_ip<T>(req: &axum::http::Request<T>, trust_proxy: bool) -> IpAddr {
    let forwarded = if trust_proxy {
        nearest_forwarded_hop(req.headers())
    } else {
        None
    };
    forwarded
        .or_else(|| PeerIpKeyExtractor.extract(req).ok())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

pub async fn rate_limit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let ip = client_ip(&req, state.trust_proxy);
    let decision = state.rate_limiter.check(ip);

    if !decision.allowed {
        warn!(ip = %ip, path = %req.uri().path(), "Rate limit exceeded");
        let mut response = AppError::too_many_requests().into_response();
        decision.apply_headers(response.headers_mut());
        return response;
    }

    let mut response = next.run(req).await;
    decision.apply_headers(response.headers_mut());
    response
}
