use indexmap::IndexMap;

use crate::cache::goal_log::GoalLog;
use crate::engine::redact::redact;
use crate::engine::text_match;
use crate::model::event::Event;
use crate::model::filter::Filter;
use crate::model::payload::{Campeonato, Counts, HomeResponse, PainelResponse};
use crate::sources::preferences::Preferences;

/// The original implementation parses the injury-time operator/conjunction
/// query parameters but never actually branches on them: both halves are
/// always OR'd against a fixed `>=` comparator. Kept as an explicit named
/// constant rather than silently reproduced, per the recorded open-question
/// resolution.
pub const INJURY_TIME_IGNORES_OPERATOR: bool = true;

const TEXT_SEARCH_THRESHOLD: f64 = 0.4;

fn goals_or_zero(goals: Option<i32>) -> i32 {
    goals.unwrap_or(0)
}

fn parse_odd(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

/// The team with the numerically lower odd is the favorite. Returns
/// `Some(true)` if the favorite is strictly ahead, `Some(false)` if
/// strictly behind, `None` if odds are missing/equal or the scoreline is
/// level (neither leading nor trailing).
fn favorite_leading(event: &Event) -> Option<bool> {
    let home_odd = parse_odd(&event.odd_home)?;
    let away_odd = parse_odd(&event.odd_away)?;
    if (home_odd - away_odd).abs() < f64::EPSILON {
        return None;
    }
    let home_goals = goals_or_zero(event.home_goals);
    let away_goals = goals_or_zero(event.away_goals);
    if home_odd < away_odd {
        Some(home_goals > away_goals).filter(|_| home_goals != away_goals)
    } else {
        Some(away_goals > home_goals).filter(|_| home_goals != away_goals)
    }
}

fn passes_filters(event: &Event, filter: &Filter, prefs: &Preferences) -> bool {
    if filter.live_only && !event.is_live() {
        return false;
    }

    if filter.favorites_only {
        let match_fav = prefs.is_match_favorite(&event.id.to_string());
        let league_fav = prefs.is_league_favorite(&event.league_unique_id);
        if !(match_fav || league_fav) {
            return false;
        }
    }

    if filter.oracle_only && event.oraculo == 0 {
        return false;
    }

    if filter.bookmaker_only && event.bookmaker_id.is_empty() {
        return false;
    }

    if filter.over_only && event.over == 0 {
        return false;
    }

    if filter.lay_cs_only && event.lay_cs == 0 {
        return false;
    }

    if filter.injury_time_only {
        let predicted_1h = event.predicted_injury_time_1h.as_f64();
        let predicted_2h = event.predicted_injury_time_2h.as_f64();
        let below_ht = predicted_1h < filter.injury_time_ht_threshold as f64;
        let below_ft = predicted_2h < filter.injury_time_ft_threshold as f64;
        if below_ht && below_ft {
            return false;
        }
    }

    let home_goals = goals_or_zero(event.home_goals);
    let away_goals = goals_or_zero(event.away_goals);

    if filter.home_leading && !(home_goals > away_goals) {
        return false;
    }
    if filter.away_leading && !(away_goals > home_goals) {
        return false;
    }
    if filter.is_tied() && home_goals != away_goals {
        return false;
    }

    if filter.favorite_leading && favorite_leading(event) != Some(true) {
        return false;
    }
    if filter.favorite_trailing && favorite_leading(event) != Some(false) {
        return false;
    }

    if filter.goal_moment_only && !event.goal_moment_active.is_true() {
        return false;
    }
    if filter.pressure_only && !event.individual_pressure_active.is_true() {
        return false;
    }
    if filter.any_alert_only
        && !(event.goal_moment_active.is_true() || event.individual_pressure_active.is_true())
    {
        return false;
    }
    if filter.xg_diff_only && !event.xg_diff_active.is_true() {
        return false;
    }

    if !filter.search_text.is_empty() {
        let hit = text_match::matches(&event.home_team, &filter.search_text, TEXT_SEARCH_THRESHOLD)
            || text_match::matches(&event.away_team, &filter.search_text, TEXT_SEARCH_THRESHOLD)
            || text_match::matches(&event.league_name, &filter.search_text, TEXT_SEARCH_THRESHOLD);
        if !hit {
            return false;
        }
    }

    true
}

/// Stamps favorite flags onto a per-response copy without touching the
/// source event, per spec invariant 1 and §4.6's favorite-stamping note.
fn stamp_favorites(event: &Event, prefs: &Preferences) -> Event {
    let mut copy = event.clone();
    copy.favorite_match = crate::model::event::FlexBool(prefs.is_match_favorite(&event.id.to_string()));
    copy.favorite_league =
        crate::model::event::FlexBool(prefs.is_league_favorite(&event.league_unique_id));
    copy
}

struct Kept {
    event: Event,
}

fn filter_and_stamp(
    snapshot: &[Event],
    filter: &Filter,
    prefs: &Preferences,
    is_subscriber: bool,
    goal_log: &mut GoalLog<'_>,
    count_goals: bool,
) -> (Vec<Kept>, Counts) {
    let mut kept = Vec::with_capacity(snapshot.len());
    let mut counts = Counts::default();

    for event in snapshot {
        if !passes_filters(event, filter, prefs) {
            continue;
        }

        let is_live = event.is_live();
        counts.total += 1;
        if is_live {
            counts.live += 1;
        }

        if count_goals
            && event.alert_sound_goal.is_true()
            && goal_log.observe(&event.id.to_string(), &event.clock)
        {
            counts.gols += 1;
        }

        let mut stamped = stamp_favorites(event, prefs);
        if !is_subscriber {
            stamped = redact(&stamped);
        }

        kept.push(Kept { event: stamped });
    }

    (kept, counts)
}

fn sort_panel(kept: &mut [Kept], order_by_kickoff: bool) {
    // Stable sort on composite keys, favorite-match desc then favorite-league
    // desc first (shared by both tiebreak orders), matching
    // `ordenarEventosPainel`.
    kept.sort_by(|a, b| {
        let fav_a = (a.event.favorite_match.is_true(), a.event.favorite_league.is_true());
        let fav_b = (b.event.favorite_match.is_true(), b.event.favorite_league.is_true());
        let fav_cmp = fav_b.cmp(&fav_a);
        if fav_cmp != std::cmp::Ordering::Equal {
            return fav_cmp;
        }
        if order_by_kickoff {
            a.event
                .kickoff
                .cmp(&b.event.kickoff)
                .then(a.event.league_priority.cmp(&b.event.league_priority))
        } else {
            a.event
                .league_priority
                .cmp(&b.event.league_priority)
                .then(a.event.kickoff.cmp(&b.event.kickoff))
        }
    });
}

fn sort_home(kept: &mut [Kept], order_by_kickoff: bool) {
    kept.sort_by(|a, b| {
        let fav_cmp = b.event.favorite_league.is_true().cmp(&a.event.favorite_league.is_true());
        if fav_cmp != std::cmp::Ordering::Equal {
            return fav_cmp;
        }
        if order_by_kickoff {
            a.event
                .kickoff
                .cmp(&b.event.kickoff)
                .then(a.event.league_priority.cmp(&b.event.league_priority))
        } else {
            a.event
                .league_priority
                .cmp(&b.event.league_priority)
                .then(a.event.kickoff.cmp(&b.event.kickoff))
        }
    });
}

/// C6's panel projection: `(snapshot, filter, prefs) -> PainelResponse`.
pub fn project_panel(
    snapshot: &[Event],
    filter: &Filter,
    prefs: &Preferences,
    is_subscriber: bool,
    goal_log: &mut GoalLog<'_>,
) -> PainelResponse {
    if snapshot.is_empty() {
        return PainelResponse::empty();
    }

    let count_goals = is_subscriber || filter.user_id > 0;
    let (mut kept, counts) = filter_and_stamp(
        snapshot,
        filter,
        prefs,
        is_subscriber,
        goal_log,
        count_goals && filter.sound_enabled,
    );

    sort_panel(&mut kept, filter.order_by_kickoff);

    let mut eventos: Vec<Event> = kept.into_iter().map(|k| k.event).collect();
    if filter.count_to_show > 0 && eventos.len() > filter.count_to_show as usize {
        eventos.truncate(filter.count_to_show as usize);
    }

    PainelResponse { eventos, counts }
}

/// C6's home projection: groups kept events by league in first-seen order,
/// stopping once `countToShow` total events have been placed.
pub fn project_home(
    snapshot: &[Event],
    filter: &Filter,
    prefs: &Preferences,
    is_subscriber: bool,
    goal_log: &mut GoalLog<'_>,
) -> HomeResponse {
    if snapshot.is_empty() {
        return HomeResponse::empty();
    }

    let count_goals = is_subscriber || filter.user_id > 0;
    let (mut kept, counts) = filter_and_stamp(
        snapshot,
        filter,
        prefs,
        is_subscriber,
        goal_log,
        count_goals && filter.sound_enabled,
    );

    sort_home(&mut kept, filter.order_by_kickoff);

    let limit = filter.count_to_show;
    let mut placed = 0i32;
    let mut league_order: Vec<String> = Vec::new();
    let mut leagues: IndexMap<String, Campeonato> = IndexMap::new();

    for k in kept {
        if limit > 0 && placed >= limit {
            break;
        }
        let event = k.event;
        let league = leagues.entry(event.league_unique_id.clone()).or_insert_with(|| {
            league_order.push(event.league_unique_id.clone());
            Campeonato {
                league_id: event.league_id,
                league_name: event.league_name.clone(),
                league_slug: event.league_slug.clone(),
                flag: event.flag.clone(),
                prioridade: event.league_priority,
                eventos: IndexMap::new(),
            }
        });
        league.eventos.insert(event.id.to_string(), event);
        placed += 1;
    }

    HomeResponse {
        campeonatos: league_order
            .into_iter()
            .map(|id| leagues.shift_remove(&id).expect("league was just inserted"))
            .collect(),
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::event::{FlexBool, FlexValue};

    fn base_event(id: i64, home_goals: i32, away_goals: i32) -> Event {
        Event {
            id,
            bookmaker_id: format!("bm-{id}"),
            status: "inprogress".into(),
            clock: "10'".into(),
            home_team: "Flamengo".into(),
            away_team: "Palmeiras".into(),
            home_goals: Some(home_goals),
            away_goals: Some(away_goals),
            odd_home: "1.50".into(),
            odd_away: "3.00".into(),
            league_id: 1,
            league_unique_id: "1".into(),
            league_name: "Brasileirao".into(),
            kickoff: "2026-07-26T12:00:00Z".into(),
            ..Default::default()
        }
    }

    fn empty_prefs() -> Preferences {
        Preferences::default()
    }

    #[test]
    fn empty_snapshot_yields_non_null_empty_payloads() {
        let mut log = GoalLog::in_memory(0, 300);
        let filter = test_filter();
        let panel = project_panel(&[], &filter, &empty_prefs(), true, &mut log);
        assert!(panel.eventos.is_empty());
        assert_eq!(panel.counts.total, 0);

        let home = project_home(&[], &filter, &empty_prefs(), true, &mut log);
        assert!(home.campeonatos.is_empty());
    }

    fn test_filter() -> Filter {
        serde_json::from_value(serde_json::json!({})).unwrap()
    }

    #[test]
    fn favorites_only_keeps_matching_events() {
        let events = vec![base_event(1, 0, 0), base_event(2, 0, 0), base_event(3, 0, 0)];
        let mut prefs = empty_prefs();
        prefs.favorite_matches.insert("2".to_string());

        let mut filter = test_filter();
        filter.favorites_only = true;

        let mut log = GoalLog::in_memory(0, 300);
        let panel = project_panel(&events, &filter, &prefs, true, &mut log);

        assert_eq!(panel.eventos.len(), 1);
        assert_eq!(panel.eventos[0].id, 2);
        assert!(panel.eventos[0].favorite_match.is_true());
    }

    #[test]
    fn display_limit_truncates_panel() {
        let events: Vec<Event> = (0..5).map(|i| base_event(i, 0, 0)).collect();
        let mut filter = test_filter();
        filter.count_to_show = 2;

        let mut log = GoalLog::in_memory(0, 300);
        let panel = project_panel(&events, &filter, &empty_prefs(), true, &mut log);
        assert_eq!(panel.eventos.len(), 2);
    }

    #[test]
    fn home_groups_by_league_in_first_seen_order() {
        let mut e1 = base_event(1, 0, 0);
        e1.league_id = 10;
        e1.league_unique_id = "10".into();
        let mut e2 = base_event(2, 0, 0);
        e2.league_id = 20;
        e2.league_unique_id = "20".into();
        let mut e3 = base_event(3, 0, 0);
        e3.league_id = 10;
        e3.league_unique_id = "10".into();

        let filter = test_filter();
        let mut log = GoalLog::in_memory(0, 300);
        let home = project_home(&[e1, e2, e3], &filter, &empty_prefs(), true, &mut log);

        assert_eq!(home.campeonatos.len(), 2);
        assert_eq!(home.campeonatos[0].league_id, 10);
        assert_eq!(home.campeonatos[0].eventos.len(), 2);
        assert_eq!(home.campeonatos[1].league_id, 20);
    }

    #[test]
    fn non_subscriber_events_are_redacted() {
        let mut event = base_event(1, 0, 0);
        event.stats.possession_home = FlexValue("67".into());
        event.goal_moment_active = FlexBool(true);

        let filter = test_filter();
        let mut log = GoalLog::in_memory(0, 300);
        let panel = project_panel(&[event], &filter, &empty_prefs(), false, &mut log);

        assert_eq!(panel.eventos[0].stats.possession_home.as_str(), "");
    }

    #[test]
    fn search_text_matches_despite_diacritics() {
        let mut event = base_event(1, 0, 0);
        event.home_team = "Sao Paulo".into();

        let mut other = base_event(2, 0, 0);
        other.home_team = "Corinthians".into();

        let mut filter = test_filter();
        filter.search_text = "sao paulo".into();

        let mut log = GoalLog::in_memory(0, 300);
        let panel = project_panel(&[event, other], &filter, &empty_prefs(), true, &mut log);

        assert_eq!(panel.eventos.len(), 1);
        assert_eq!(panel.eventos[0].id, 1);
    }

    #[test]
    fn goal_counter_only_fires_once_per_clock_value() {
        let mut filter = test_filter();
        filter.sound_enabled = true;
        filter.user_id = 42;

        let mut e10 = base_event(10, 1, 0);
        e10.alert_sound_goal = FlexBool(true);
        e10.clock = "12'".into();
        let mut e11 = base_event(11, 1, 0);
        e11.alert_sound_goal = FlexBool(true);
        e11.clock = "20'".into();

        let mut log = GoalLog::in_memory(42, 300);

        let first = project_panel(&[e10.clone(), e11.clone()], &filter, &empty_prefs(), true, &mut log);
        assert_eq!(first.counts.gols, 2);

        let second = project_panel(&[e10.clone(), e11.clone()], &filter, &empty_prefs(), true, &mut log);
        assert_eq!(second.counts.gols, 0);

        e10.clock = "13'".into();
        let third = project_panel(&[e10, e11], &filter, &empty_prefs(), true, &mut log);
        assert_eq!(third.counts.gols, 1);
    }

    #[test]
    fn ordering_is_stable_for_equal_sort_keys() {
        let events = vec![base_event(1, 0, 0), base_event(2, 0, 0), base_event(3, 0, 0)];
        let filter = test_filter();
        let mut log = GoalLog::in_memory(0, 300);
        let panel = project_panel(&events, &filter, &empty_prefs(), true, &mut log);
        let ids: Vec<i64> = panel.eventos.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn home_display_limit_stops_accumulating_across_leagues() {
        let mut e1 = base_event(1, 0, 0);
        e1.league_id = 10;
        e1.league_unique_id = "10".into();
        let mut e2 = base_event(2, 0, 0);
        e2.league_id = 10;
        e2.league_unique_id = "10".into();
        let mut e3 = base_event(3, 0, 0);
        e3.league_id = 20;
        e3.league_unique_id = "20".into();

        let mut filter = test_filter();
        filter.count_to_show = 2;

        let mut log = GoalLog::in_memory(0, 300);
        let home = project_home(&[e1, e2, e3], &filter, &empty_prefs(), true, &mut log);

        let total: usize = home.campeonatos.iter().map(|c| c.eventos.len()).sum();
        assert_eq!(total, 2);
        assert_eq!(home.campeonatos.len(), 1);
    }
}
