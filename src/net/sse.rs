use std::convert::Infallible;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_stream::stream;
use axum::extract::{Path, Query, State};
use axum::http::header::HeaderName;
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use axum::response::IntoResponse;
use futures::Stream;
use serde_json::json;
use tracing::info;

use crate::cache::{AuthResolver, Broadcaster, GoalLog};
use crate::engine::{project_home, project_panel};
use crate::error::AppError;
use crate::model::Filter;
use crate::net::admin::ReloadSignal;
use crate::sources::{fetch_preferences, CacheStore};

pub struct SseState {
    pub broadcaster: Arc<Broadcaster>,
    pub auth: AuthResolver,
    pub cache_store: CacheStore,
    pub reload: Arc<ReloadSignal>,
    pub connections: Arc<AtomicI64>,
    pub max_connections: i64,
    pub subscriber_tick: Duration,
    pub free_tick: Duration,
    pub goal_log_ttl_secs: u64,
}

/// Logs the open/close event for every connection while the active count is
/// ≤ 10, and every 100th connection thereafter, per spec §4.8's logging
/// discipline.
fn should_log(count: i64) -> bool {
    count <= 10 || count % 100 == 0
}

/// Decrements the shared connection counter when the per-connection task
/// ends, regardless of which branch (disconnect/reload/finished) it ends on.
struct ConnectionGuard {
    connections: Arc<AtomicI64>,
    endpoint: &'static str,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        let count = self.connections.fetch_sub(1, Ordering::SeqCst) - 1;
        if should_log(count) {
            info!(endpoint = self.endpoint, count, "sse connection closed");
        }
    }
}

async fn admit(state: &SseState, filter: &Filter, endpoint: &'static str) -> Result<ConnectionGuard, AppError> {
    let current = state.connections.load(Ordering::SeqCst);
    if current >= state.max_connections {
        return Err(AppError::CapacityExceeded);
    }

    if !filter.token.is_empty() {
        let entry = state.auth.resolve(&filter.token).await;
        if !entry.is_valid {
            return Err(AppError::InvalidToken);
        }
    }

    let count = state.connections.fetch_add(1, Ordering::SeqCst) + 1;
    if should_log(count) {
        info!(endpoint, count, "sse connection opened");
    }

    Ok(ConnectionGuard {
        connections: state.connections.clone(),
        endpoint,
    })
}

fn tick_interval(is_subscriber: bool, state: &SseState) -> Duration {
    if is_subscriber {
        state.subscriber_tick
    } else {
        state.free_tick
    }
}

/// Reverse proxies (nginx and similar) buffer upstream responses by default,
/// which defeats an SSE stream; spec §4.8 step 3 requires this header on
/// every streaming response alongside axum's own `content-type`/`cache-control`.
fn with_sse_headers(
    sse: Sse<impl Stream<Item = Result<SseEvent, Infallible>> + Send + 'static>,
) -> impl IntoResponse {
    ([(HeaderName::from_static("x-accel-buffering"), "no")], sse)
}

pub async fn panel(
    State(state): State<Arc<SseState>>,
    Query(filter): Query<Filter>,
) -> Result<impl IntoResponse, AppError> {
    let guard = admit(&state, &filter, "panel").await?;
    let auth = state.auth.resolve(&filter.token).await;
    let interval = tick_interval(auth.is_subscriber, &state);
    let mut reload_rx = state.reload.subscribe();

    let stream = stream! {
        let _guard = guard;
        yield Ok(SseEvent::default().retry(Duration::from_millis(10_000)));
        let prefs = fetch_preferences(&state.cache_store, filter.user_id.max(auth.user_id)).await;
        let mut goal_log = GoalLog::load(&state.cache_store, filter.user_id.max(auth.user_id), state.goal_log_ttl_secs).await;

        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;

        let mut first = true;
        loop {
            if first {
                first = false;
            } else {
                tokio::select! {
                    _ = reload_rx.changed() => {
                        yield Ok(SseEvent::default().event("reload").data(r#"{"reason":"server_update"}"#));
                        break;
                    }
                    _ = ticker.tick() => {}
                }
            }

            let Some(snapshot) = state.broadcaster.get_snapshot().await else {
                yield Ok(SseEvent::default().event("error").data(json!({"error": "Jogo nao encontrado no cache"}).to_string()));
                continue;
            };

            let payload = project_panel(&snapshot, &filter, &prefs, auth.is_subscriber, &mut goal_log);
            goal_log.flush().await;

            match serde_json::to_string(&payload) {
                Ok(body) => yield Ok(SseEvent::default().event("update").data(body)),
                Err(_) => continue,
            }
        }
    };

    Ok(with_sse_headers(Sse::new(stream).keep_alive(KeepAlive::default())))
}

pub async fn home(
    State(state): State<Arc<SseState>>,
    Query(filter): Query<Filter>,
) -> Result<impl IntoResponse, AppError> {
    let guard = admit(&state, &filter, "home").await?;
    let auth = state.auth.resolve(&filter.token).await;
    let interval = tick_interval(auth.is_subscriber, &state);
    let mut reload_rx = state.reload.subscribe();

    let stream = stream! {
        let _guard = guard;
        yield Ok(SseEvent::default().retry(Duration::from_millis(10_000)));
        let prefs = fetch_preferences(&state.cache_store, filter.user_id.max(auth.user_id)).await;
        let mut goal_log = GoalLog::load(&state.cache_store, filter.user_id.max(auth.user_id), state.goal_log_ttl_secs).await;

        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;

        let mut first = true;
        loop {
            if first {
                first = false;
            } else {
                tokio::select! {
                    _ = reload_rx.changed() => {
                        yield Ok(SseEvent::default().event("reload").data(r#"{"reason":"server_update"}"#));
                        break;
                    }
                    _ = ticker.tick() => {}
                }
            }

            let Some(snapshot) = state.broadcaster.get_snapshot().await else {
                yield Ok(SseEvent::default().event("error").data(json!({"error": "Jogo nao encontrado no cache"}).to_string()));
                continue;
            };

            let payload = project_home(&snapshot, &filter, &prefs, auth.is_subscriber, &mut goal_log);
            goal_log.flush().await;

            match serde_json::to_string(&payload) {
                Ok(body) => yield Ok(SseEvent::default().event("update").data(body)),
                Err(_) => continue,
            }
        }
    };

    Ok(with_sse_headers(Sse::new(stream).keep_alive(KeepAlive::default())))
}

pub async fn oracle(
    State(state): State<Arc<SseState>>,
    Path(match_id): Path<String>,
    Query(filter): Query<Filter>,
) -> Result<impl IntoResponse, AppError> {
    let guard = admit(&state, &filter, "oracle").await?;
    let auth = state.auth.resolve(&filter.token).await;
    let interval = tick_interval(auth.is_subscriber, &state);
    let mut reload_rx = state.reload.subscribe();

    let stream = stream! {
        let _guard = guard;
        yield Ok(SseEvent::default().retry(Duration::from_millis(10_000)));

        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;

        let mut first = true;
        loop {
            if first {
                first = false;
            } else {
                tokio::select! {
                    _ = reload_rx.changed() => {
                        yield Ok(SseEvent::default().event("reload").data(r#"{"reason":"server_update"}"#));
                        break;
                    }
                    _ = ticker.tick() => {}
                }
            }

            let Some(record) = state.broadcaster.get_oracle(&match_id).await else {
                yield Ok(SseEvent::default().event("error").data(json!({"error": "Jogo nao encontrado no cache"}).to_string()));
                continue;
            };

            let finished = record.get("status").and_then(|v| v.as_str()) == Some("finished");
            let body = json!({
                "oracle": record,
                "timestamp": chrono::Utc::now().timestamp(),
            });

            match serde_json::to_string(&body) {
                Ok(encoded) => yield Ok(SseEvent::default().event("update").data(encoded)),
                Err(_) => continue,
            }

            if finished {
                yield Ok(SseEvent::default().event("finished").data("{}"));
                break;
            }
        }
    };

    Ok(with_sse_headers(Sse::new(stream).keep_alive(KeepAlive::default())))
}
