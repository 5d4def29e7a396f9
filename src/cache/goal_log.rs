use std::collections::HashMap;

use tracing::debug;

use crate::sources::cache_store::CacheStore;

/// Per-user mapping of match id -> last clock string at which a goal alert
/// fired, so periodic ticks don't double-count the same goal. Backed by the
/// shared cache store under a 5-minute TTL key, matching the original's
/// `getAlertasGolUsuario`/`setAlertasGolUsuario`.
pub struct GoalLog<'a> {
    store: Option<&'a CacheStore>,
    user_id: i64,
    ttl_secs: u64,
    entries: HashMap<String, String>,
    dirty: bool,
}

fn log_key(user_id: i64) -> String {
    format!("alerta-gol-usuario-{user_id}")
}

impl<'a> GoalLog<'a> {
    pub async fn load(store: &'a CacheStore, user_id: i64, ttl_secs: u64) -> GoalLog<'a> {
        let entries = if user_id > 0 {
            store
                .get_json::<HashMap<String, String>>(&log_key(user_id))
                .await
                .ok()
                .flatten()
                .unwrap_or_default()
        } else {
            HashMap::new()
        };

        GoalLog {
            store: Some(store),
            user_id,
            ttl_secs,
            entries,
            dirty: false,
        }
    }

    /// A store-less instance, for anonymous requests and for tests that
    /// exercise the projection engine without a live cache connection.
    pub fn in_memory(user_id: i64, ttl_secs: u64) -> GoalLog<'static> {
        GoalLog {
            store: None,
            user_id,
            ttl_secs,
            entries: HashMap::new(),
            dirty: false,
        }
    }

    /// Returns true if this clock value represents a newly-seen goal for
    /// `match_id` (no prior entry, or the clock advanced), and records it.
    pub fn observe(&mut self, match_id: &str, clock: &str) -> bool {
        let is_new = match self.entries.get(match_id) {
            Some(previous) => previous != clock,
            None => true,
        };
        if is_new {
            self.entries.insert(match_id.to_string(), clock.to_string());
            self.dirty = true;
        }
        is_new
    }

    /// Persists the log only if at least one entry changed this tick.
    pub async fn flush(&self) {
        if !self.dirty || self.user_id <= 0 {
            return;
        }
        let Some(store) = self.store else {
            return;
        };
        let Ok(encoded) = serde_json::to_string(&self.entries) else {
            return;
        };
        if let Err(e) = store
            .set_string(&log_key(self.user_id), &encoded, self.ttl_secs)
            .await
        {
            debug!(error = %e, user_id = self.user_id, "goal log flush failed");
        }
    }
}
