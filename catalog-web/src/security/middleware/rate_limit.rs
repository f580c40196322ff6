use axum::extract::{ConnectInfo, MatchedPath, Request, State};
use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use catalog_infra::security::{RateLimitCheck, RateLimitDecision, RateLimitRule};
use crate::AppState;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::warn;

const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// 速率限制策略
///
/// `default_rules` 按客户端计数，跨所有受保护路由共享；
/// `route_rules` 按 (路由, 客户端) 计数，在默认规则之外额外生效。
#[derive(Debug, Clone)]
pub struct RateLimitPolicy {
    pub enabled: bool,
    pub default_rules: Vec<RateLimitRule>,
    pub route_rules: Vec<RateLimitRule>,
    /// 为true时信任 X-Forwarded-For / X-Real-IP 头
    pub trust_forwarded_headers: bool,
}

impl RateLimitPolicy {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            default_rules: Vec::new(),
            route_rules: Vec::new(),
            trust_forwarded_headers: false,
        }
    }

    fn checks(&self, client: &str, route: &str) -> Vec<RateLimitCheck> {
        vec![
            RateLimitCheck::new(client, self.default_rules.clone()),
            RateLimitCheck::new(format!("{}:{}", route, client), self.route_rules.clone()),
        ]
    }
}

/// 速率限制中间件
///
/// 超限的请求直接返回429，不读取请求体，也不进入业务逻辑。
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let policy = &state.rate_limit_policy;
    if !policy.enabled {
        return next.run(request).await;
    }

    let client = client_identity(
        request.headers(),
        connect_info.map(|ConnectInfo(addr)| addr),
        policy.trust_forwarded_headers,
    );
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let route = format!("{} {}", request.method(), path);

    let decision = match state.rate_limiter.acquire(&policy.checks(&client, &route)).await {
        Ok(decision) => decision,
        Err(e) => {
            // 速率限制检查错误，允许继续（避免因基础设施问题影响服务）
            warn!(error = %e, "Rate limiter unavailable, allowing request");
            return next.run(request).await;
        }
    };

    if !decision.allowed {
        warn!(client = %client, route = %route, limit = decision.limit, "Rate limit exceeded");
        return too_many_requests(&decision);
    }

    let mut response = next.run(request).await;
    if decision.limit > 0 {
        set_rate_limit_headers(response.headers_mut(), &decision);
    }
    response
}

/// 客户端标识：默认取对端IP
fn client_identity(headers: &HeaderMap, peer: Option<SocketAddr>, trust_forwarded: bool) -> String {
    if trust_forwarded {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .or_else(|| headers.get("x-real-ip").and_then(|v| v.to_str().ok()))
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn ceil_secs(duration: Duration) -> u64 {
    duration.as_secs() + u64::from(duration.subsec_nanos() > 0)
}

fn set_rate_limit_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(decision.limit));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(decision.remaining));
    headers.insert(X_RATELIMIT_RESET, HeaderValue::from(ceil_secs(decision.reset_after)));
}

fn too_many_requests(decision: &RateLimitDecision) -> Response {
    let mut response = (StatusCode::TOO_MANY_REQUESTS, "Too many requests").into_response();
    set_rate_limit_headers(response.headers_mut(), decision);
    response.headers_mut().insert(
        RETRY_AFTER,
        HeaderValue::from(ceil_secs(decision.reset_after).max(1)),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer() -> Option<SocketAddr> {
        Some("192.168.1.10:54321".parse().unwrap())
    }

    #[test]
    fn test_client_identity_uses_peer_address() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("1.2.3.4"));
        assert_eq!(client_identity(&headers, peer(), false), "192.168.1.10");
        assert_eq!(client_identity(&HeaderMap::new(), None, false), "unknown");
    }

    #[test]
    fn test_client_identity_trusts_forwarded_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("1.2.3.4, 10.0.0.1"));
        assert_eq!(client_identity(&headers, peer(), true), "1.2.3.4");

        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("5.6.7.8"));
        assert_eq!(client_identity(&headers, peer(), true), "5.6.7.8");

        assert_eq!(client_identity(&HeaderMap::new(), peer(), true), "192.168.1.10");
    }

    #[test]
    fn test_ceil_secs() {
        assert_eq!(ceil_secs(Duration::from_millis(700)), 1);
        assert_eq!(ceil_secs(Duration::from_secs(3)), 3);
        assert_eq!(ceil_secs(Duration::from_millis(3_001)), 4);
        assert_eq!(ceil_secs(Duration::ZERO), 0);
    }

    #[test]
    fn test_policy_checks_scope_route_rules() {
        let policy = RateLimitPolicy {
            enabled: true,
            default_rules: vec![RateLimitRule::new(50, Duration::from_secs(3_600))],
            route_rules: vec![RateLimitRule::per_second(1)],
            trust_forwarded_headers: false,
        };

        let checks = policy.checks("1.2.3.4", "GET /");
        assert_eq!(checks.len(), 2);
        assert_eq!(checks[0].key, "1.2.3.4");
        assert_eq!(checks[1].key, "GET /:1.2.3.4");
        assert_eq!(checks[1].rules, vec![RateLimitRule::per_second(1)]);
    }
}
