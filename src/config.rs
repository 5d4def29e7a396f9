/// Env-driven configuration. Every field has a default so the process can
/// boot from a bare environment; `DATABASE_URL` is the only effectively
/// required value once a relational store is actually wired up, and even
/// its absence only degrades the service to anonymous-only auth rather than
/// aborting (see `cache::auth`).
#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub redis_host: String,
    pub redis_port: u16,
    pub redis_password: Option<String>,
    pub max_connections: i64,
    pub subscriber_tick_secs: u64,
    pub free_tick_secs: u64,
    pub snapshot_refresh_secs: u64,
    pub oracle_ttl_secs: u64,
    pub oracle_cleanup_interval_secs: u64,
    pub auth_ttl_secs: u64,
    pub auth_cleanup_interval_secs: u64,
    pub event_info_ttl_secs: u64,
    pub goal_log_ttl_secs: u64,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            let host = env_or("MYSQL_HOST", "localhost");
            let port = env_or("MYSQL_PORT", "5432");
            let user = env_or("MYSQL_USER", "postgres");
            let password = env_or("MYSQL_PASSWORD", "");
            let database = env_or("MYSQL_DATABASE", "radar");
            format!("postgres://{user}:{password}@{host}:{port}/{database}")
        });

        Self {
            server_port: env_parse("SERVER_PORT", 8080),
            database_url,
            redis_host: env_or("REDIS_HOST", "127.0.0.1"),
            redis_port: env_parse("REDIS_PORT", 6379),
            redis_password: std::env::var("REDIS_PASSWORD").ok().filter(|s| !s.is_empty()),
            max_connections: env_parse("MAX_CONNECTIONS", 10_000),
            subscriber_tick_secs: env_parse("SUBSCRIBER_TICK_SECS", 2),
            free_tick_secs: env_parse("FREE_TICK_SECS", 10),
            snapshot_refresh_secs: env_parse("SNAPSHOT_REFRESH_SECS", 2),
            oracle_ttl_secs: env_parse("ORACLE_TTL_SECS", 2),
            oracle_cleanup_interval_secs: env_parse("ORACLE_CLEANUP_INTERVAL_SECS", 300),
            auth_ttl_secs: env_parse("AUTH_TTL_SECS", 300),
            auth_cleanup_interval_secs: env_parse("AUTH_CLEANUP_INTERVAL_SECS", 300),
            event_info_ttl_secs: env_parse("EVENT_INFO_TTL_SECS", 10),
            goal_log_ttl_secs: env_parse("GOAL_LOG_TTL_SECS", 300),
        }
    }

    pub fn redis_url(&self) -> String {
        match &self.redis_password {
            Some(password) => format!(
                "redis://:{password}@{}:{}",
                self.redis_host, self.redis_port
            ),
            None => format!("redis://{}:{}", self.redis_host, self.redis_port),
        }
    }
}
