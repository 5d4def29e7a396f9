use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;
use tracing::warn;

use super::db::{self, EventInfo};

/// C2: fallback lookup for matches that have dropped out of the active
/// snapshot, memoized locally for 10 s so a burst of oracle requests for the
/// same finished match doesn't hammer the relational store.
#[derive(Clone)]
pub struct EventInfoSource {
    pool: PgPool,
    memo: Cache<String, Arc<EventInfo>>,
}

impl EventInfoSource {
    pub fn new(pool: PgPool, ttl: Duration) -> Self {
        let memo = Cache::builder().time_to_live(ttl).build();
        EventInfoSource { pool, memo }
    }

    pub async fn lookup(&self, bookmaker_id: &str) -> Option<Arc<EventInfo>> {
        if let Some(cached) = self.memo.get(bookmaker_id).await {
            return Some(cached);
        }

        match db::fetch_event_info(&self.pool, bookmaker_id).await {
            Ok(Some(info)) => {
                let info = Arc::new(info);
                self.memo.insert(bookmaker_id.to_string(), info.clone()).await;
                Some(info)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, bookmaker_id, "event info lookup failed");
                None
            }
        }
    }
}
