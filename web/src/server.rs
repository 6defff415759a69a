//! HTTP server for the swipe page and its JSON API.
//!
//! Routes:
//!   GET  /                  → the swipe page
//!   GET  /api/health        → health check
//!   GET  /api/gesture       → gesture thresholds
//!   GET  /api/deck          → current deck view
//!   POST /api/deck/swipe    → decide the active card (buttons)
//!   POST /api/deck/release  → interpret a finished drag
//!   POST /api/deck/load     → request the next page (retry after an error)
//!   GET  /api/party         → liked cards

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, Json};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use pokedeck_common::gesture::GestureThresholds;
use pokedeck_common::protocol::HealthResponse;

use crate::model::{DeckView, ReleaseRequest, SwipeRequest, SwipeResponse};
use crate::session::{LoadRequest, SharedSession};
use crate::view::CardView;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Shared state for route handlers.
#[derive(Clone)]
pub struct AppState {
    pub session: SharedSession,
    pub load_tx: mpsc::Sender<LoadRequest>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(session: SharedSession, load_tx: mpsc::Sender<LoadRequest>) -> Self {
        AppState {
            session,
            load_tx,
            start_time: Instant::now(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/gesture", get(gesture))
        .route("/api/deck", get(deck))
        .route("/api/deck/swipe", post(swipe))
        .route("/api/deck/release", post(release))
        .route("/api/deck/load", post(load))
        .route("/api/party", get(party))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server. Blocks until shutdown.
pub async fn run(
    state: AppState,
    listen_addr: &str,
    shutdown: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let app = router(state);

    let listener = TcpListener::bind(listen_addr).await?;
    info!("PokéDeck listening on http://{listen_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            loop {
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                if shutdown.load(Ordering::Relaxed) {
                    break;
                }
            }
        })
        .await?;

    Ok(())
}

// ── route handlers ───────────────────────────────────────────────────────

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

async fn gesture(State(state): State<AppState>) -> Json<GestureThresholds> {
    Json(state.session.lock().await.thresholds())
}

async fn deck(State(state): State<AppState>) -> Json<DeckView> {
    Json(state.session.lock().await.view())
}

async fn swipe(
    State(state): State<AppState>,
    Json(req): Json<SwipeRequest>,
) -> Json<SwipeResponse> {
    let mut session = state.session.lock().await;
    let decision = session.swipe(req.direction);
    Json(SwipeResponse {
        decision,
        deck: session.view(),
    })
}

async fn release(
    State(state): State<AppState>,
    Json(req): Json<ReleaseRequest>,
) -> Json<SwipeResponse> {
    let drag = req.to_release();
    let mut session = state.session.lock().await;
    let decision = session.release(drag);
    if decision.is_none() {
        debug!("Drag released at {:.0} ({:.0}/s) – springing back", drag.offset, drag.velocity);
    }
    Json(SwipeResponse {
        decision,
        deck: session.view(),
    })
}

async fn load(State(state): State<AppState>) -> StatusCode {
    match state.load_tx.try_send(LoadRequest::Retry) {
        Ok(()) => StatusCode::ACCEPTED,
        // A queued request will do the same work.
        Err(mpsc::error::TrySendError::Full(_)) => StatusCode::ACCEPTED,
        Err(mpsc::error::TrySendError::Closed(_)) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

async fn party(State(state): State<AppState>) -> Json<Vec<CardView>> {
    let session = state.session.lock().await;
    Json(session.party().iter().map(CardView::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use pokedeck_common::card::CardRecord;
    use serde_json::Value;
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    use crate::session::Session;

    fn state_with(ids: std::ops::RangeInclusive<u32>) -> (AppState, mpsc::Receiver<LoadRequest>) {
        let (tx, rx) = mpsc::channel(4);
        let mut session = Session::new(tx.clone(), GestureThresholds::default());
        let cards = ids
            .map(|id| CardRecord::new(id, &format!("mon-{id}"), "https://img.example"))
            .collect();
        session.finish_load(cards, true);
        (AppState::new(Arc::new(Mutex::new(session)), tx), rx)
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_index_served() {
        let (state, _rx) = state_with(1..=1);
        let resp = router(state)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_and_gesture() {
        let (state, _rx) = state_with(1..=1);
        let (status, json) = send(router(state.clone()), "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");

        let (_, json) = send(router(state), "GET", "/api/gesture", None).await;
        assert_eq!(json["distance"], 160.0);
        assert_eq!(json["velocity"], 800.0);
    }

    #[tokio::test]
    async fn test_gesture_serves_feedback_inputs() {
        let (state, _rx) = state_with(1..=1);
        let (_, json) = send(router(state), "GET", "/api/gesture", None).await;
        let g: GestureThresholds = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(g, GestureThresholds::default());

        // The page's feedback() reads these and mirrors Feedback::at.
        for field in ["feedback_start", "feedback_full", "rotation_range", "max_rotation_deg"] {
            assert!(json[field].is_number(), "{field} missing");
        }
        let f = pokedeck_common::gesture::Feedback::at(85.0, &g);
        assert!((f.like_opacity - 0.5).abs() < 1e-9);
        assert_eq!(f.nope_opacity, 0.0);
        assert!((f.rotation_deg - 85.0 / 250.0 * 15.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_deck_view() {
        let (state, _rx) = state_with(1..=3);
        let (_, json) = send(router(state), "GET", "/api/deck", None).await;
        assert_eq!(json["active"]["id"], 3);
        assert_eq!(json["next"]["id"], 2);
        assert_eq!(json["remaining"], 3);
        assert_eq!(json["has_more"], true);
    }

    #[tokio::test]
    async fn test_swipe_and_party() {
        let (state, _rx) = state_with(1..=3);
        let (status, json) = send(
            router(state.clone()),
            "POST",
            "/api/deck/swipe",
            Some(r#"{"direction":"right"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["decision"]["direction"], "right");
        assert_eq!(json["deck"]["active"]["id"], 2);

        let (_, json) = send(router(state), "GET", "/api/party", None).await;
        assert_eq!(json.as_array().map(Vec::len), Some(1));
        assert_eq!(json[0]["id"], 3);
    }

    #[tokio::test]
    async fn test_release_spring_back_and_decide() {
        let (state, _rx) = state_with(1..=2);
        let (_, json) = send(
            router(state.clone()),
            "POST",
            "/api/deck/release",
            Some(r#"{"offset":50,"velocity":0}"#),
        )
        .await;
        assert!(json["decision"].is_null());
        assert_eq!(json["deck"]["active"]["id"], 2);

        let (_, json) = send(
            router(state),
            "POST",
            "/api/deck/release",
            Some(r#"{"offset":-200,"velocity":0}"#),
        )
        .await;
        assert_eq!(json["decision"]["direction"], "left");
        assert_eq!(json["deck"]["active"]["id"], 1);
    }

    #[tokio::test]
    async fn test_depletion_requests_load() {
        let (state, mut rx) = state_with(1..=1);
        let (_, json) = send(
            router(state),
            "POST",
            "/api/deck/swipe",
            Some(r#"{"direction":"left"}"#),
        )
        .await;
        assert_eq!(json["decision"]["depleted"], true);
        assert!(json["deck"]["active"].is_null());
        assert_eq!(rx.try_recv().unwrap(), LoadRequest::Depleted);
    }

    #[tokio::test]
    async fn test_manual_load() {
        let (state, mut rx) = state_with(1..=1);
        let (status, _) = send(router(state), "POST", "/api/deck/load", None).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(rx.try_recv().unwrap(), LoadRequest::Retry);
    }

    #[tokio::test]
    async fn test_bad_direction_rejected() {
        let (state, _rx) = state_with(1..=1);
        let (status, _) = send(
            router(state),
            "POST",
            "/api/deck/swipe",
            Some(r#"{"direction":"up"}"#),
        )
        .await;
        assert!(status.is_client_error());
    }
}
