//! Request logging and `x-request-id` handling.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tower_http::request_id::{
    MakeRequestUuid, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};

/// Coarse grouping of request paths used as a log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Health,
    Api,
    Page,
}

impl RouteKind {
    pub fn of(path: &str) -> Self {
        if path == "/health" || path.starts_with("/health/") {
            RouteKind::Health
        } else if path.starts_with("/api/") {
            RouteKind::Api
        } else {
            RouteKind::Page
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RouteKind::Health => "health",
            RouteKind::Api => "api",
            RouteKind::Page => "page",
        }
    }
}

fn request_id_of(request: &Request) -> String {
    request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

pub async fn log_request(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let kind = RouteKind::of(uri.path());
    let req_id = request_id_of(&request);

    // Probes hit /health constantly
    if kind == RouteKind::Health {
        tracing::debug!(request_id = %req_id, method = %method, uri = %uri, "incoming request");
    } else {
        tracing::info!(
            request_id = %req_id,
            method = %method,
            uri = %uri,
            route = kind.as_str(),
            "incoming request"
        );
    }

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis();
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            request_id = %req_id,
            method = %method,
            uri = %uri,
            route = kind.as_str(),
            status = %status,
            duration_ms = %duration_ms,
            "request completed with error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            request_id = %req_id,
            method = %method,
            uri = %uri,
            route = kind.as_str(),
            status = %status,
            duration_ms = %duration_ms,
            "request completed with client error"
        );
    } else if kind == RouteKind::Health {
        tracing::debug!(request_id = %req_id, status = %status, duration_ms = %duration_ms, "health probe");
    } else {
        tracing::info!(
            request_id = %req_id,
            method = %method,
            uri = %uri,
            route = kind.as_str(),
            status = %status,
            duration_ms = %duration_ms,
            "request completed successfully"
        );
    }

    response
}

pub fn request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    #[test]
    fn test_route_kind() {
        assert_eq!(RouteKind::of("/health"), RouteKind::Health);
        assert_eq!(RouteKind::of("/health/ready"), RouteKind::Health);
        assert_eq!(RouteKind::of("/healthy-living"), RouteKind::Page);
        assert_eq!(RouteKind::of("/api/blocks"), RouteKind::Api);
        assert_eq!(RouteKind::of("/"), RouteKind::Page);
    }

    #[tokio::test]
    async fn test_request_id_is_set_and_propagated() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(propagate_request_id_layer())
            .layer(axum::middleware::from_fn(log_request))
            .layer(request_id_layer());

        let res = app
            .oneshot(axum::http::Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(res.headers().contains_key("x-request-id"));
    }
}
