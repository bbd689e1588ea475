//! HTTP + TCP front door for the matchmaking core.

use crate::page;
use crate::tcp;
use crate::ws::{handle_socket, AppState};
use axum::{
    extract::{State, WebSocketUpgrade},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use parlor_core::{Matcher, ServerConfig};
use parlor_markov::Chain;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Bind both listeners and serve until either fails.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let chain = Arc::new(Chain::new(config.prefix_len));
    let matcher = Arc::new(Matcher::new(
        chain.clone(),
        config.matching.clone(),
        config.bot.clone(),
    ));

    let state = Arc::new(AppState {
        matcher: matcher.clone(),
        chain,
        http_addr: config.http_addr.clone(),
    });

    let app = router(state);

    let http_addr = config.http_socket_addr()?;
    let tcp_addr = config.tcp_socket_addr()?;
    let http_listener = tokio::net::TcpListener::bind(&http_addr).await?;
    let tcp_listener = tokio::net::TcpListener::bind(&tcp_addr).await?;

    info!("parlor v{} starting", env!("CARGO_PKG_VERSION"));
    info!("  Chat page: http://{}", http_addr);
    info!("  WebSocket: ws://{}/socket", http_addr);
    info!("  Raw TCP:   {}", tcp_addr);

    tokio::try_join!(
        async {
            axum::serve(http_listener, app)
                .await
                .map_err(anyhow::Error::from)
        },
        async {
            tcp::accept_loop(tcp_listener, matcher)
                .await
                .map_err(anyhow::Error::from)
        },
    )?;
    Ok(())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/socket", get(ws_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(page::render(&state.http_addr))
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "chain_prefixes": state.chain.prefix_count(),
    })
    .to_string()
}
