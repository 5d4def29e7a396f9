use tracing::warn;

use crate::model::Event;

use super::cache_store::CacheStore;

const SNAPSHOT_KEY: &str = "eventos-painel-json";
const FALLBACK_PANEL_KEY: &str = "sse:painel";
const FALLBACK_HOME_KEY: &str = "sse:home";

/// Reads and decodes the latest global event list (C1). Tolerant of
/// malformed upstream JSON: decode failures are logged and surfaced as
/// `None` so the caller keeps the last good snapshot rather than erroring
/// the whole refresh cycle.
pub async fn fetch_snapshot(store: &CacheStore) -> Option<Vec<Event>> {
    match store.get_string(SNAPSHOT_KEY).await {
        Ok(Some(raw)) => decode_events(&raw, SNAPSHOT_KEY),
        Ok(None) => None,
        Err(e) => {
            warn!(error = %e, key = SNAPSHOT_KEY, "cache store read failed");
            None
        }
    }
}

/// Raw pass-through fallback, used only when the broadcaster has never
/// successfully populated a snapshot — never bypasses the normal cache read
/// once a snapshot exists.
pub async fn fetch_fallback(store: &CacheStore, home: bool) -> Option<Vec<Event>> {
    let key = if home { FALLBACK_HOME_KEY } else { FALLBACK_PANEL_KEY };
    match store.get_string(key).await {
        Ok(Some(raw)) => decode_events(&raw, key),
        Ok(None) => None,
        Err(e) => {
            warn!(error = %e, key, "fallback cache read failed");
            None
        }
    }
}

fn decode_events(raw: &str, key: &str) -> Option<Vec<Event>> {
    match serde_json::from_str::<Vec<Event>>(raw) {
        Ok(events) => Some(events),
        Err(e) => {
            warn!(error = %e, key, "snapshot decode failed, keeping previous snapshot");
            None
        }
    }
}
