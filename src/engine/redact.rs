use crate::model::event::{FlexBool, FlexValue};
use crate::model::Event;

/// Clears every subscriber-only field on a copy of `event`, per spec §4.7.
/// Identification, status, clock, score, primary odds, alert flags on score
/// events, links, icons, and favorite flags are left untouched. Implemented
/// as a straight-line set of field clears rather than a generic "table of
/// field groups" indirection — the field set is fixed and small enough that
/// the indirection would only obscure which fields are actually redacted.
pub fn redact(event: &Event) -> Event {
    let mut copy = event.clone();

    copy.stats.possession_home = FlexValue::cleared();
    copy.stats.shots_on_goal_home = FlexValue::cleared();
    copy.stats.shots_off_home = FlexValue::cleared();
    copy.stats.shots_post_home = FlexValue::cleared();
    copy.stats.shots_blocked_home = FlexValue::cleared();
    copy.stats.corners_home = FlexValue::cleared();
    copy.stats.dangerous_attacks_home = FlexValue::cleared();
    copy.stats.penalties_home = FlexValue::cleared();
    copy.stats.probabilities_home = FlexValue::cleared();
    copy.stats.points_10min_home = FlexValue::cleared();
    copy.stats.class_possession_home.clear();
    copy.stats.class_shots_on_goal_home.clear();
    copy.stats.class_shots_off_home.clear();
    copy.stats.class_shots_post_home.clear();
    copy.stats.class_shots_blocked_home.clear();
    copy.stats.class_corners_home.clear();
    copy.stats.class_dangerous_attacks_home.clear();
    copy.stats.class_penalties_home.clear();
    copy.stats.class_probabilities_home.clear();
    copy.stats.class_points_10min_home.clear();

    copy.stats.possession_away = FlexValue::cleared();
    copy.stats.shots_on_goal_away = FlexValue::cleared();
    copy.stats.shots_off_away = FlexValue::cleared();
    copy.stats.shots_post_away = FlexValue::cleared();
    copy.stats.shots_blocked_away = FlexValue::cleared();
    copy.stats.corners_away = FlexValue::cleared();
    copy.stats.dangerous_attacks_away = FlexValue::cleared();
    copy.stats.penalties_away = FlexValue::cleared();
    copy.stats.probabilities_away = FlexValue::cleared();
    copy.stats.points_10min_away = FlexValue::cleared();
    copy.stats.class_possession_away.clear();
    copy.stats.class_shots_on_goal_away.clear();
    copy.stats.class_shots_off_away.clear();
    copy.stats.class_shots_post_away.clear();
    copy.stats.class_shots_blocked_away.clear();
    copy.stats.class_corners_away.clear();
    copy.stats.class_dangerous_attacks_away.clear();
    copy.stats.class_penalties_away.clear();
    copy.stats.class_probabilities_away.clear();
    copy.stats.class_points_10min_away.clear();

    for (h, a) in [
        (&mut copy.stats.shots_on_goal_home_1h, &mut copy.stats.shots_on_goal_away_1h),
        (&mut copy.stats.shots_off_home_1h, &mut copy.stats.shots_off_away_1h),
        (&mut copy.stats.shots_post_home_1h, &mut copy.stats.shots_post_away_1h),
        (&mut copy.stats.shots_blocked_home_1h, &mut copy.stats.shots_blocked_away_1h),
        (&mut copy.stats.corners_home_1h, &mut copy.stats.corners_away_1h),
        (&mut copy.stats.dangerous_attacks_home_1h, &mut copy.stats.dangerous_attacks_away_1h),
        (&mut copy.stats.penalties_home_1h, &mut copy.stats.penalties_away_1h),
        (&mut copy.stats.shots_on_goal_home_2h, &mut copy.stats.shots_on_goal_away_2h),
        (&mut copy.stats.shots_off_home_2h, &mut copy.stats.shots_off_away_2h),
        (&mut copy.stats.shots_post_home_2h, &mut copy.stats.shots_post_away_2h),
        (&mut copy.stats.shots_blocked_home_2h, &mut copy.stats.shots_blocked_away_2h),
        (&mut copy.stats.corners_home_2h, &mut copy.stats.corners_away_2h),
        (&mut copy.stats.dangerous_attacks_home_2h, &mut copy.stats.dangerous_attacks_away_2h),
        (&mut copy.stats.penalties_home_2h, &mut copy.stats.penalties_away_2h),
        (&mut copy.stats.shots_on_goal_home_10min, &mut copy.stats.shots_on_goal_away_10min),
        (&mut copy.stats.shots_off_home_10min, &mut copy.stats.shots_off_away_10min),
        (&mut copy.stats.shots_post_home_10min, &mut copy.stats.shots_post_away_10min),
        (&mut copy.stats.shots_blocked_home_10min, &mut copy.stats.shots_blocked_away_10min),
        (&mut copy.stats.corners_home_10min, &mut copy.stats.corners_away_10min),
        (&mut copy.stats.dangerous_attacks_home_10min, &mut copy.stats.dangerous_attacks_away_10min),
        (&mut copy.stats.penalties_home_10min, &mut copy.stats.penalties_away_10min),
    ] {
        *h = FlexValue::cleared();
        *a = FlexValue::cleared();
    }

    copy.stats.pressure_individual_home = FlexValue::cleared();
    copy.stats.pressure_individual_away = FlexValue::cleared();
    copy.stats.pressure_summed_home = FlexValue::cleared();
    copy.stats.pressure_summed_away = FlexValue::cleared();
    copy.stats.class_pressure_individual_home.clear();
    copy.stats.class_pressure_individual_away.clear();
    copy.stats.class_pressure_summed_home.clear();
    copy.stats.class_pressure_summed_away.clear();

    copy.stats.score_of_plays_home = FlexValue::cleared();
    copy.stats.score_of_plays_away = FlexValue::cleared();
    copy.stats.class_score_of_plays_home.clear();
    copy.stats.class_score_of_plays_away.clear();

    copy.goal_moment_active = FlexBool::default();
    copy.individual_pressure_active = FlexBool::default();
    copy.individual_pressure_team.clear();
    copy.individual_pressure_name.clear();
    copy.individual_pressure_value = FlexValue::cleared();
    copy.xg_diff_active = FlexBool::default();

    copy.injury_time_1h = FlexValue::cleared();
    copy.injury_time_2h = FlexValue::cleared();
    copy.class_injury_time_1h.clear();
    copy.class_injury_time_2h.clear();
    copy.predicted_injury_time_1h = FlexValue::cleared();
    copy.predicted_injury_time_2h = FlexValue::cleared();
    copy.class_predicted_injury_time_1h.clear();
    copy.class_predicted_injury_time_2h.clear();

    copy.ai_analysis.clear();

    copy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> Event {
        Event {
            id: 7,
            status: "inprogress".into(),
            clock: "45'".into(),
            home_goals: Some(1),
            away_goals: Some(0),
            odd_home: "1.50".into(),
            odd_away: "3.00".into(),
            stats: crate::model::event::StatBlock {
                possession_home: FlexValue("58".into()),
                ..Default::default()
            },
            ai_analysis: "some generated text".into(),
            ..Default::default()
        }
    }

    #[test]
    fn redact_is_idempotent() {
        let event = sample_event();
        let once = redact(&event);
        let twice = redact(&once);
        assert_eq!(
            serde_json::to_value(&once).unwrap(),
            serde_json::to_value(&twice).unwrap()
        );
    }

    #[test]
    fn redact_preserves_identification_and_score() {
        let event = sample_event();
        let redacted = redact(&event);
        assert_eq!(redacted.id, event.id);
        assert_eq!(redacted.status, event.status);
        assert_eq!(redacted.clock, event.clock);
        assert_eq!(redacted.home_goals, event.home_goals);
        assert_eq!(redacted.away_goals, event.away_goals);
        assert_eq!(redacted.odd_home, event.odd_home);
    }

    #[test]
    fn redact_clears_stats() {
        let event = sample_event();
        let redacted = redact(&event);
        assert_eq!(redacted.stats.possession_home.as_str(), "");
        assert_eq!(redacted.ai_analysis, "");
    }
}
