//! HTTP surface of the caption proxy.

use super::{CaptionProxy, ProxyReply};
use crate::Result;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, StatusCode};
use axum::routing::post;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub fn router(proxy: Arc<CaptionProxy>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ]);

    Router::new()
        .route("/", post(generate_captions).options(preflight))
        .route(
            "/generate-captions",
            post(generate_captions).options(preflight),
        )
        .layer(cors)
        .with_state(proxy)
}

pub async fn serve(addr: SocketAddr, proxy: Arc<CaptionProxy>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Caption proxy listening on {}", listener.local_addr()?);
    axum::serve(listener, router(proxy)).await?;
    Ok(())
}

async fn generate_captions(State(proxy): State<Arc<CaptionProxy>>, body: Bytes) -> ProxyReply {
    proxy.handle(&body).await
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}
