use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use engine::Engine;

use crate::movements;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Builds the application router.
///
/// Shared by [`run_with_listener`] and the integration tests, so both drive
/// exactly the same stack.
pub fn router(engine: Arc<Engine>) -> Router {
    let state = ServerState { engine };
    Router::new()
        .route("/movements", post(movements::create))
        .route(
            "/movements/{id}",
            get(movements::get).delete(movements::delete),
        )
        .route("/movements/{id}/entries", get(movements::entries))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let app = router(Arc::new(engine));
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}

pub async fn run(engine: Engine, addr: &str) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    run_with_listener(engine, listener).await
}
