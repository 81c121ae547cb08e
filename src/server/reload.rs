//! Live-reload notifications over Server-Sent Events.
//!
//! Development clients open `GET /__reload` and receive a `full-reload`
//! event each time regenerated reference pages are ready.

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures::stream::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_util::sync::CancellationToken;

/// Path of the reload event stream.
pub const RELOAD_PATH: &str = "/__reload";

/// Server → client notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ReloadEvent {
    /// Reload the whole page.
    FullReload,
}

impl ReloadEvent {
    /// SSE event name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FullReload => "full-reload",
        }
    }

    fn to_sse(self) -> Event {
        let data = serde_json::to_string(&self).unwrap_or_default();
        Event::default().event(self.name()).data(data)
    }
}

/// Fan-out of reload notifications to every connected client.
#[derive(Debug, Clone)]
pub struct ReloadBroadcaster {
    tx: broadcast::Sender<ReloadEvent>,
}

impl Default for ReloadBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl ReloadBroadcaster {
    /// Create a broadcaster with no clients.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    /// Subscribe a new client.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ReloadEvent> {
        self.tx.subscribe()
    }

    /// Notify all clients; returns how many were reached.
    pub fn send_full_reload(&self) -> usize {
        self.tx.send(ReloadEvent::FullReload).unwrap_or(0)
    }

    /// Number of connected clients.
    #[must_use]
    pub fn client_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[derive(Clone)]
struct ReloadState {
    reload: ReloadBroadcaster,
    shutdown: CancellationToken,
}

/// Create the reload router. Streams end when `shutdown` is cancelled.
pub fn create_reload_router(reload: ReloadBroadcaster, shutdown: CancellationToken) -> Router {
    Router::new()
        .route(RELOAD_PATH, get(reload_handler))
        .with_state(ReloadState { reload, shutdown })
}

async fn reload_handler(
    State(state): State<ReloadState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.reload.subscribe();
    tracing::info!(clients = state.reload.client_count(), "Reload client connected");

    // A lagged client missed some reloads; one reload covers all of them.
    let stream = BroadcastStream::new(rx)
        .map(|msg| Ok(msg.unwrap_or(ReloadEvent::FullReload).to_sse()))
        .take_until(state.shutdown.cancelled_owned());

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn test_reload_event_json() {
        let json = serde_json::to_string(&ReloadEvent::FullReload).unwrap();
        assert_eq!(json, r#"{"type":"full-reload"}"#);
        assert_eq!(ReloadEvent::FullReload.name(), "full-reload");
    }

    #[tokio::test]
    async fn test_broadcast_reaches_subscribers() {
        let reload = ReloadBroadcaster::new();
        assert_eq!(reload.send_full_reload(), 0);

        let mut a = reload.subscribe();
        let mut b = reload.subscribe();
        assert_eq!(reload.client_count(), 2);
        assert_eq!(reload.send_full_reload(), 2);
        assert_eq!(a.recv().await.unwrap(), ReloadEvent::FullReload);
        assert_eq!(b.recv().await.unwrap(), ReloadEvent::FullReload);
    }

    #[tokio::test]
    async fn test_sse_stream_delivers_reload() {
        let reload = ReloadBroadcaster::new();
        let shutdown = CancellationToken::new();
        let router = create_reload_router(reload.clone(), shutdown.clone());

        let response = router
            .oneshot(Request::get(RELOAD_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(reload.client_count(), 1);

        let mut body = response.into_body().into_data_stream();
        reload.send_full_reload();
        let chunk = body.next().await.unwrap().unwrap();
        let text = String::from_utf8(chunk.to_vec()).unwrap();
        assert!(text.contains("event: full-reload"), "{text}");
        assert!(text.contains(r#"data: {"type":"full-reload"}"#), "{text}");

        shutdown.cancel();
        assert!(body.next().await.is_none());
    }
}
