use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;
use tracing::warn;

use crate::sources::db;

/// Resolved token identity (C4). `user_id = 0` and `tier = 0` denote the
/// anonymous identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthEntry {
    pub user_id: i64,
    pub is_valid: bool,
    pub is_subscriber: bool,
    pub tier: i32,
}

impl AuthEntry {
    pub const ANONYMOUS: AuthEntry = AuthEntry {
        user_id: 0,
        is_valid: true,
        is_subscriber: false,
        tier: 0,
    };
}

/// Keys the cache on the first 20 characters of the token, per spec.md
/// §4.4 (the original implementation used 16; the spec's explicit number
/// wins, see SPEC_FULL.md Open Question resolutions).
const CACHE_KEY_PREFIX_LEN: usize = 20;

fn cache_key(token: &str) -> String {
    token.chars().take(CACHE_KEY_PREFIX_LEN).collect()
}

#[derive(Clone)]
pub struct AuthResolver {
    pool: Option<PgPool>,
    cache: Cache<String, Arc<AuthEntry>>,
}

impl AuthResolver {
    pub fn new(pool: Option<PgPool>, ttl: Duration) -> Self {
        let cache = Cache::builder().time_to_live(ttl).build();
        AuthResolver { pool, cache }
    }

    pub async fn resolve(&self, token: &str) -> AuthEntry {
        if token.is_empty() {
            return AuthEntry::ANONYMOUS;
        }

        let key = cache_key(token);
        if let Some(cached) = self.cache.get(&key).await {
            return *cached;
        }

        let entry = self.lookup(token).await;
        if entry.is_valid {
            self.cache.insert(key, Arc::new(entry)).await;
        }
        entry
    }

    async fn lookup(&self, token: &str) -> AuthEntry {
        let Some(pool) = &self.pool else {
            // No relational store configured: degrade to anonymous-only mode.
            return AuthEntry::ANONYMOUS;
        };

        match db::fetch_user_tier_by_token(pool, token).await {
            Ok(Some(row)) => AuthEntry {
                user_id: row.user_id,
                is_valid: true,
                is_subscriber: (1..=4).contains(&row.tier),
                tier: row.tier,
            },
            Ok(None) => AuthEntry {
                user_id: 0,
                is_valid: false,
                is_subscriber: false,
                tier: 0,
            },
            Err(e) => {
                warn!(error = %e, "auth lookup transport error, treating as anonymous");
                AuthEntry::ANONYMOUS
            }
        }
    }
}
