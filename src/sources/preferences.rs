use std::collections::HashSet;

use tracing::debug;

use super::cache_store::CacheStore;

/// Per-user favorite sets (C3). Misses and decode failures both yield empty
/// sets — the original's `GetPreferenciasUsuarioCompletas` never fails the
/// request over a preference lookup.
#[derive(Debug, Clone, Default)]
pub struct Preferences {
    pub favorite_matches: HashSet<String>,
    pub favorite_leagues: HashSet<String>,
}

impl Preferences {
    pub fn is_match_favorite(&self, match_id: &str) -> bool {
        self.favorite_matches.contains(match_id)
    }

    pub fn is_league_favorite(&self, league_id: &str) -> bool {
        self.favorite_leagues.contains(league_id)
    }
}

fn favorite_key(prefix: &str, user_id: i64) -> String {
    format!("preferencias:{prefix}-{user_id}")
}

pub async fn fetch_preferences(store: &CacheStore, user_id: i64) -> Preferences {
    if user_id <= 0 {
        return Preferences::default();
    }

    let matches = fetch_id_set(store, &favorite_key("jogos-favoritos", user_id)).await;
    let leagues = fetch_id_set(store, &favorite_key("campeonatos-favoritos", user_id)).await;

    Preferences {
        favorite_matches: matches,
        favorite_leagues: leagues,
    }
}

async fn fetch_id_set(store: &CacheStore, key: &str) -> HashSet<String> {
    match store.get_json::<std::collections::HashMap<String, bool>>(key).await {
        Ok(Some(map)) => map
            .into_iter()
            .filter_map(|(id, enabled)| enabled.then_some(id))
            .collect(),
        Ok(None) => HashSet::new(),
        Err(e) => {
            debug!(error = %e, key, "preference lookup failed, defaulting to empty");
            HashSet::new()
        }
    }
}
