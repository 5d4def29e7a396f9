use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::info;

/// Per-match fallback record returned by C2, looked up by bookmaker id when
/// a requested match has dropped out of the active snapshot.
#[derive(Debug, Clone)]
pub struct EventInfo {
    pub status: String,
    pub has_lineup: bool,
    pub problem_radar: bool,
    pub injury_time_1: i32,
    pub injury_time_2: i32,
}

/// Tier 1..=4 is a subscriber, matching the original's `IsAssinanteTeamId`.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub user_id: i64,
    pub tier: i32,
}

pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await?;
    info!("connected to relational store");
    Ok(pool)
}

pub async fn fetch_event_info(
    pool: &PgPool,
    bookmaker_id: &str,
) -> Result<Option<EventInfo>, sqlx::Error> {
    let query = r#"
        SELECT status, escalacao, problema_radar, desconto_ht, desconto_ft
        FROM eventos
        WHERE id_williamhill = $1
        LIMIT 1
    "#;

    let row = sqlx::query(query)
        .bind(bookmaker_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| EventInfo {
        status: r.try_get::<Option<String>, _>("status").ok().flatten().unwrap_or_default(),
        has_lineup: r.try_get::<Option<i32>, _>("escalacao").ok().flatten().unwrap_or(0) != 0,
        problem_radar: r
            .try_get::<Option<i32>, _>("problema_radar")
            .ok()
            .flatten()
            .unwrap_or(0)
            != 0,
        injury_time_1: r.try_get::<Option<i32>, _>("desconto_ht").ok().flatten().unwrap_or(0),
        injury_time_2: r.try_get::<Option<i32>, _>("desconto_ft").ok().flatten().unwrap_or(0),
    }))
}

/// Looks up a user's subscription tier by bearer token. Returns `None` on a
/// no-row miss; a transport error propagates for the caller to treat as
/// anonymous per §4.4.
pub async fn fetch_user_tier_by_token(
    pool: &PgPool,
    token: &str,
) -> Result<Option<UserRow>, sqlx::Error> {
    let row = sqlx::query("SELECT id, current_team_id FROM users WHERE token_access = $1")
        .bind(token)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| UserRow {
        user_id: r.try_get::<Option<i64>, _>("id").ok().flatten().unwrap_or(0),
        tier: r.try_get::<Option<i32>, _>("current_team_id").ok().flatten().unwrap_or(0),
    }))
}
