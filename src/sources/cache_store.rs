use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::de::DeserializeOwned;

/// Thin typed wrapper over the upstream key/value cache. `ConnectionManager`
/// reconnects transparently on transport errors, so callers see ordinary
/// `redis::RedisError`s rather than having to manage reconnect themselves.
#[derive(Clone)]
pub struct CacheStore {
    conn: ConnectionManager,
}

impl CacheStore {
    pub async fn connect(url: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(CacheStore { conn })
    }

    pub async fn get_string(&self, key: &str) -> Result<Option<String>, redis::RedisError> {
        self.conn.clone().get(key).await
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, redis::RedisError> {
        let raw: Option<String> = self.get_string(key).await?;
        Ok(match raw {
            Some(s) => serde_json::from_str(&s).ok(),
            None => None,
        })
    }

    pub async fn set_string(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
    ) -> Result<(), redis::RedisError> {
        self.conn.clone().set_ex(key, value, ttl_secs).await
    }
}
