use std::net::SocketAddr;

use axum::{routing::get, Router};

/// Эндпоинт живости для healthcheck-ов оркестратора
pub fn router() -> Router {
    Router::new().route("/", get(|| async { "UP" }))
}

pub async fn serve(addr: SocketAddr) {
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            log::error!("Failed to bind health endpoint on {}: {}", addr, err);
            return;
        }
    };
    log::info!("Health endpoint listening on {}", addr);
    if let Err(err) = axum::serve(listener, router()).await {
        log::error!("Health endpoint failed: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn root_returns_up() {
        let response = router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"UP");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = router()
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
