use indexmap::IndexMap;
use serde::Serialize;

use super::event::Event;

/// Post-predicate counters, shared by both payload shapes.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Counts {
    pub live: i32,
    pub total: i32,
    pub gols: i32,
}

/// The panel endpoint's payload: a flat, ordered list of events.
#[derive(Debug, Clone, Serialize)]
pub struct PainelResponse {
    pub eventos: Vec<Event>,
    pub counts: Counts,
}

impl PainelResponse {
    pub fn empty() -> Self {
        PainelResponse {
            eventos: Vec::new(),
            counts: Counts::default(),
        }
    }
}

/// One league group in the home payload. `eventos` is keyed by event id
/// (as a string, matching the upstream wire convention) in insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct Campeonato {
    #[serde(rename = "idCampeonato")]
    pub league_id: i64,
    #[serde(rename = "nomeCampeonato")]
    pub league_name: String,
    #[serde(rename = "slugCampeonato")]
    pub league_slug: String,
    pub flag: String,
    pub prioridade: i32,
    pub eventos: IndexMap<String, Event>,
}

/// The home endpoint's payload: events grouped by league, in first-seen
/// league order.
#[derive(Debug, Clone, Serialize)]
pub struct HomeResponse {
    pub campeonatos: Vec<Campeonato>,
    pub counts: Counts,
}

impl HomeResponse {
    pub fn empty() -> Self {
        HomeResponse {
            campeonatos: Vec::new(),
            counts: Counts::default(),
        }
    }
}
