use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::future::Cache;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::model::Event;
use crate::sources::cache_store::CacheStore;
use crate::sources::event_info::EventInfoSource;
use crate::sources::snapshot_source;

fn oracle_key(bookmaker_id: &str) -> String {
    format!("oraculo-cache:idJogo-{bookmaker_id}")
}

#[derive(Clone)]
struct OracleEntry {
    data: Value,
    updated_at: Instant,
}

/// Owns the process-wide shared snapshot and the per-match oracle cache
/// (C5). The snapshot pointer has a single writer (the refresh task) and
/// many readers; readers capture an `Arc` clone under a brief read lock and
/// never see a torn update.
pub struct Broadcaster {
    store: CacheStore,
    event_info: EventInfoSource,
    current: RwLock<Option<Arc<Vec<Event>>>>,
    oracle_cache: Cache<String, OracleEntry>,
    oracle_ttl: Duration,
}

impl Broadcaster {
    pub fn new(
        store: CacheStore,
        event_info: EventInfoSource,
        oracle_ttl: Duration,
        oracle_eviction_idle: Duration,
    ) -> Arc<Self> {
        let oracle_cache = Cache::builder().time_to_idle(oracle_eviction_idle).build();
        Arc::new(Broadcaster {
            store,
            event_info,
            current: RwLock::new(None),
            oracle_cache,
            oracle_ttl,
        })
    }

    /// Spawns the 2s-cadence refresh task. Failures are logged and the
    /// previous snapshot is kept; the task never returns.
    pub fn spawn_refresh_task(self: &Arc<Self>, interval: Duration) {
        let broadcaster = self.clone();
        tokio::spawn(async move {
            broadcaster.refresh_once().await;
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                broadcaster.refresh_once().await;
            }
        });
    }

    async fn refresh_once(&self) {
        let fetched = match snapshot_source::fetch_snapshot(&self.store).await {
            Some(events) => Some(events),
            None => {
                let has_current = self.current.read().await.is_some();
                if has_current {
                    None
                } else {
                    snapshot_source::fetch_fallback(&self.store, false).await
                }
            }
        };

        if let Some(events) = fetched {
            log_snapshot_size(&events);
            let mut guard = self.current.write().await;
            *guard = Some(Arc::new(events));
        }
    }

    /// Returns the currently published snapshot by reference. Callers must
    /// not mutate what they get back.
    pub async fn get_snapshot(&self) -> Option<Arc<Vec<Event>>> {
        self.current.read().await.clone()
    }

    /// C5's `getOracle`: serve from cache if fresher than `oracle_ttl`,
    /// otherwise fetch upstream and merge live fields from the snapshot (or
    /// the C2 fallback if the match has dropped out of it).
    pub async fn get_oracle(&self, bookmaker_id: &str) -> Option<Value> {
        if let Some(entry) = self.oracle_cache.get(bookmaker_id).await {
            if entry.updated_at.elapsed() < self.oracle_ttl {
                return Some(entry.data);
            }
        }

        let raw = match self.store.get_string(&oracle_key(bookmaker_id)).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, bookmaker_id, "oracle cache store read failed");
                return self.oracle_cache.get(bookmaker_id).await.map(|e| e.data);
            }
        };

        let Ok(mut document) = serde_json::from_str::<Value>(&raw) else {
            warn!(bookmaker_id, "oracle document decode failed");
            return None;
        };

        self.merge_live_fields(bookmaker_id, &mut document).await;

        let entry = OracleEntry {
            data: document.clone(),
            updated_at: Instant::now(),
        };
        self.oracle_cache.insert(bookmaker_id.to_string(), entry).await;

        Some(document)
    }

    async fn merge_live_fields(&self, bookmaker_id: &str, document: &mut Value) {
        let snapshot = self.get_snapshot().await;
        let live_match = snapshot
            .as_ref()
            .and_then(|events| events.iter().find(|e| e.bookmaker_id == bookmaker_id));

        let Some(obj) = document.as_object_mut() else {
            return;
        };

        if let Some(event) = live_match {
            obj.insert("status".into(), Value::String(event.status.clone()));
            obj.insert("temEscalacao".into(), Value::from(event.has_lineup));
            obj.insert("problemaRadar".into(), Value::from(event.problem_radar));
            obj.insert(
                "acrescimo1Tempo".into(),
                Value::String(event.injury_time_1h.as_str().to_string()),
            );
            obj.insert(
                "acrescimo2Tempo".into(),
                Value::String(event.injury_time_2h.as_str().to_string()),
            );
        } else if let Some(info) = self.event_info.lookup(bookmaker_id).await {
            obj.insert("status".into(), Value::String(info.status.clone()));
            obj.insert("temEscalacao".into(), Value::from(info.has_lineup));
            obj.insert("problemaRadar".into(), Value::from(info.problem_radar));
            obj.insert("acrescimo1Tempo".into(), Value::from(info.injury_time_1));
            obj.insert("acrescimo2Tempo".into(), Value::from(info.injury_time_2));
        }
    }
}

impl std::fmt::Debug for Broadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broadcaster").finish_non_exhaustive()
    }
}

pub fn log_snapshot_size(events: &[Event]) {
    info!(count = events.len(), "snapshot refreshed");
}
