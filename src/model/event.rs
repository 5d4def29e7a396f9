use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A field the upstream producer may emit as a string, an int, or a float.
/// Normalized on decode to a canonical string: integers keep no fractional
/// part, floats keep one, everything else (including null) becomes "".
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct FlexValue(pub String);

impl<'de> Deserialize<'de> for FlexValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(FlexValue(flex_value_to_string(&value)))
    }
}

fn flex_value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(f) = n.as_f64() {
                format!("{:.1}", f)
            } else {
                n.to_string()
            }
        }
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl FlexValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the canonical string as a float, treating "" and "-" as 0,
    /// matching the original implementation's `FlexValue.Float()`.
    pub fn as_f64(&self) -> f64 {
        let s = self.0.trim();
        if s.is_empty() || s == "-" {
            return 0.0;
        }
        s.parse().unwrap_or(0.0)
    }

    pub fn as_i64(&self) -> i64 {
        self.as_f64() as i64
    }

    pub fn cleared() -> Self {
        FlexValue(String::new())
    }
}

/// A boolean the upstream producer may emit as `true`/`false`, `0`/`1`, or
/// the strings `"true"`/`"1"`.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct FlexBool(pub bool);

impl<'de> Deserialize<'de> for FlexBool {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let b = match &value {
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_i64().map(|i| i != 0).unwrap_or(false),
            Value::String(s) => s == "true" || s == "1",
            _ => false,
        };
        Ok(FlexBool(b))
    }
}

impl FlexBool {
    pub fn is_true(&self) -> bool {
        self.0
    }
}

/// One match/event as published by the upstream producer. Field names mirror
/// the upstream wire shape one-for-one, translated from the original's
/// Portuguese identifiers into English so the crate reads as an
/// English-language rewrite; serde renames preserve the actual wire
/// contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    // Identification
    #[serde(rename = "idEvento")]
    pub id: i64,
    #[serde(rename = "idWilliamhill")]
    pub bookmaker_id: String,
    #[serde(rename = "idBetfair")]
    pub exchange_id: String,
    #[serde(rename = "slugEvento")]
    pub slug: String,

    // Home team
    #[serde(rename = "idTimeCasa")]
    pub home_team_id: i64,
    #[serde(rename = "timeCasa")]
    pub home_team: String,
    #[serde(rename = "slugTimeCasa")]
    pub home_team_slug: String,
    #[serde(rename = "golTimeCasaFt")]
    pub home_goals: Option<i32>,
    #[serde(rename = "golTimeCasaHt")]
    pub home_goals_ht: Option<i32>,
    #[serde(rename = "oddTimeCasa")]
    pub odd_home: String,
    #[serde(rename = "classOddTimeCasa")]
    pub class_odd_home: String,

    // Away team
    #[serde(rename = "idTimeFora")]
    pub away_team_id: i64,
    #[serde(rename = "timeFora")]
    pub away_team: String,
    #[serde(rename = "slugTimeFora")]
    pub away_team_slug: String,
    #[serde(rename = "golTimeForaFt")]
    pub away_goals: Option<i32>,
    #[serde(rename = "golTimeForaHt")]
    pub away_goals_ht: Option<i32>,
    #[serde(rename = "oddTimeFora")]
    pub odd_away: String,
    #[serde(rename = "classOddTimeFora")]
    pub class_odd_away: String,

    // Status
    pub status: String,
    #[serde(rename = "tempoAtual")]
    pub clock: String,
    #[serde(rename = "inicio")]
    pub kickoff: String,
    pub oraculo: i32,
    #[serde(rename = "oraculoFree")]
    pub oracle_free: i32,
    #[serde(rename = "overEvento")]
    pub over: i32,
    #[serde(rename = "layCsEvento")]
    pub lay_cs: i32,
    #[serde(rename = "problemaRadar")]
    pub problem_radar: i32,
    #[serde(rename = "temEscalacao")]
    pub has_lineup: i32,
    #[serde(rename = "bookmakerIvertido", alias = "williamhillIvertido")]
    pub bookmaker_inverted: i32,

    // League
    #[serde(rename = "idCampeonato")]
    pub league_id: i64,
    #[serde(rename = "idCampeonatoUnico")]
    pub league_unique_id: String,
    #[serde(rename = "nomeCampeonato")]
    pub league_name: String,
    #[serde(rename = "nomeCampeonatoReduzido")]
    pub league_name_short: String,
    #[serde(rename = "slugCampeonato")]
    pub league_slug: String,
    #[serde(rename = "nomeCategoria")]
    pub category_name: String,
    #[serde(rename = "slugCategoria")]
    pub category_slug: String,
    pub flag: String,
    #[serde(rename = "prioridade")]
    pub league_priority: i32,
    #[serde(rename = "temClassificacao")]
    pub has_standings: i32,
    #[serde(rename = "idTemporada")]
    pub season_id: String,

    // Primary odds
    #[serde(rename = "oddEmpate")]
    pub odd_draw: String,
    #[serde(rename = "oddUnder15FT")]
    pub odd_under_1_5: String,
    #[serde(rename = "oddOver15FT")]
    pub odd_over_1_5: String,
    #[serde(rename = "oddUnder25FT")]
    pub odd_under_2_5: String,
    #[serde(rename = "oddOver25FT")]
    pub odd_over_2_5: String,
    #[serde(rename = "oddBttsSim")]
    pub odd_btts_yes: String,
    #[serde(rename = "oddBttsNao")]
    pub odd_btts_no: String,
    #[serde(rename = "classOddEmpate")]
    pub class_odd_draw: String,
    #[serde(rename = "classOddUnder15FT")]
    pub class_odd_under_1_5: String,
    #[serde(rename = "classOddOver15FT")]
    pub class_odd_over_1_5: String,
    #[serde(rename = "classOddUnder25FT")]
    pub class_odd_under_2_5: String,
    #[serde(rename = "classOddOver25FT")]
    pub class_odd_over_2_5: String,
    #[serde(rename = "classOddBttsSim")]
    pub class_odd_btts_yes: String,
    #[serde(rename = "classOddBttsNao")]
    pub class_odd_btts_no: String,

    // Links
    #[serde(rename = "linkWilliamhill")]
    pub link_bookmaker: String,
    #[serde(rename = "linkBetfair")]
    pub link_exchange: String,
    #[serde(rename = "linkOddjusta")]
    pub link_fair_odds: String,
    #[serde(rename = "linkBolsadeaposta")]
    pub link_betting_exchange: String,
    #[serde(rename = "linkOrbit")]
    pub link_orbit: String,

    // Statistics, both teams, current + half + 10-min windows.
    #[serde(flatten)]
    pub stats: StatBlock,

    // Alerts
    #[serde(rename = "alertarGolTimeCasa")]
    pub alert_goal_home: FlexBool,
    #[serde(rename = "alertarPenalTimeCasa")]
    pub alert_penalty_home: FlexBool,
    #[serde(rename = "alertarGolTimeFora")]
    pub alert_goal_away: FlexBool,
    #[serde(rename = "alertarPenalTimeFora")]
    pub alert_penalty_away: FlexBool,
    #[serde(rename = "alertarSomGol")]
    pub alert_sound_goal: FlexBool,
    #[serde(rename = "cuidado")]
    pub alert_care: FlexBool,
    #[serde(rename = "alertaMomentoGolAtivo")]
    pub goal_moment_active: FlexBool,
    #[serde(rename = "alertaPressaoIndividualAtivo")]
    pub individual_pressure_active: FlexBool,
    #[serde(rename = "alertaPressaoIndividualTime")]
    #[serde(default)]
    pub individual_pressure_team: String,
    #[serde(rename = "alertaPressaoIndividualNome")]
    #[serde(default)]
    pub individual_pressure_name: String,
    #[serde(rename = "alertaPressaoIndividualValor")]
    #[serde(default)]
    pub individual_pressure_value: FlexValue,
    #[serde(rename = "xgDiffAtivo", default)]
    pub xg_diff_active: FlexBool,

    // Icons
    #[serde(rename = "iconeComentarioTimeCasa", default)]
    pub icon_comment_home: String,
    #[serde(rename = "iconeComentarioTimeFora", default)]
    pub icon_comment_away: String,

    // Injury time
    #[serde(rename = "acrescimo1Tempo")]
    pub injury_time_1h: FlexValue,
    #[serde(rename = "acrescimo2Tempo")]
    pub injury_time_2h: FlexValue,
    #[serde(rename = "classAcrescimo1Tempo")]
    pub class_injury_time_1h: String,
    #[serde(rename = "classAcrescimo2Tempo")]
    pub class_injury_time_2h: String,
    #[serde(rename = "previsaoAcrescimo1Tempo")]
    pub predicted_injury_time_1h: FlexValue,
    #[serde(rename = "previsaoAcrescimo2Tempo")]
    pub predicted_injury_time_2h: FlexValue,
    #[serde(rename = "classPrevisaoAcrescimo1Tempo")]
    pub class_predicted_injury_time_1h: String,
    #[serde(rename = "classPrevisaoAcrescimo2Tempo")]
    pub class_predicted_injury_time_2h: String,

    // Extras
    #[serde(rename = "analiseIA", default)]
    pub ai_analysis: String,
    #[serde(rename = "teamStreaks", default)]
    pub team_streaks: Vec<Value>,
    #[serde(rename = "favorito", default)]
    pub favorite_match: FlexBool,
    #[serde(rename = "campeonatoFavorito", default)]
    pub favorite_league: FlexBool,
}

/// The wide per-team statistic catalog, flattened into `Event` on the wire.
/// Pulled out as its own struct purely so `redact()` can walk it as a unit
/// rather than a hundred individual field clears.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatBlock {
    #[serde(rename = "posseBolaTimeCasa")]
    pub possession_home: FlexValue,
    #[serde(rename = "chutesGolTimeCasa")]
    pub shots_on_goal_home: FlexValue,
    #[serde(rename = "chutesForaTimeCasa")]
    pub shots_off_home: FlexValue,
    #[serde(rename = "chutesTraveTimeCasa")]
    pub shots_post_home: FlexValue,
    #[serde(rename = "chutesBloqueadoTimeCasa")]
    pub shots_blocked_home: FlexValue,
    #[serde(rename = "escanteiosTimeCasa")]
    pub corners_home: FlexValue,
    #[serde(rename = "ataquesPerigososTimeCasa")]
    pub dangerous_attacks_home: FlexValue,
    #[serde(rename = "penalidadesTimeCasa")]
    pub penalties_home: FlexValue,
    #[serde(rename = "probabilidadesTimeCasa")]
    pub probabilities_home: FlexValue,
    #[serde(rename = "pontos10MinTimeCasa")]
    pub points_10min_home: FlexValue,

    #[serde(rename = "chutesGolTimeCasa1Tempo")]
    pub shots_on_goal_home_1h: FlexValue,
    #[serde(rename = "chutesForaTimeCasa1Tempo")]
    pub shots_off_home_1h: FlexValue,
    #[serde(rename = "chutesTraveTimeCasa1Tempo")]
    pub shots_post_home_1h: FlexValue,
    #[serde(rename = "chutesBloqueadoTimeCasa1Tempo")]
    pub shots_blocked_home_1h: FlexValue,
    #[serde(rename = "escanteiosTimeCasa1Tempo")]
    pub corners_home_1h: FlexValue,
    #[serde(rename = "ataquesPerigososTimeCasa1Tempo")]
    pub dangerous_attacks_home_1h: FlexValue,
    #[serde(rename = "penalidadesTimeCasa1Tempo")]
    pub penalties_home_1h: FlexValue,

    #[serde(rename = "chutesGolTimeCasa2Tempo")]
    pub shots_on_goal_home_2h: FlexValue,
    #[serde(rename = "chutesForaTimeCasa2Tempo")]
    pub shots_off_home_2h: FlexValue,
    #[serde(rename = "chutesTraveTimeCasa2Tempo")]
    pub shots_post_home_2h: FlexValue,
    #[serde(rename = "chutesBloqueadoTimeCasa2Tempo")]
    pub shots_blocked_home_2h: FlexValue,
    #[serde(rename = "escanteiosTimeCasa2Tempo")]
    pub corners_home_2h: FlexValue,
    #[serde(rename = "ataquesPerigososTimeCasa2Tempo")]
    pub dangerous_attacks_home_2h: FlexValue,
    #[serde(rename = "penalidadesTimeCasa2Tempo")]
    pub penalties_home_2h: FlexValue,

    #[serde(rename = "chutesGolTimeCasa10Min")]
    pub shots_on_goal_home_10min: FlexValue,
    #[serde(rename = "chutesForaTimeCasa10Min")]
    pub shots_off_home_10min: FlexValue,
    #[serde(rename = "chutesTraveTimeCasa10Min")]
    pub shots_post_home_10min: FlexValue,
    #[serde(rename = "chutesBloqueadoTimeCasa10Min")]
    pub shots_blocked_home_10min: FlexValue,
    #[serde(rename = "escanteiosTimeCasa10Min")]
    pub corners_home_10min: FlexValue,
    #[serde(rename = "ataquesPerigososTimeCasa10Min")]
    pub dangerous_attacks_home_10min: FlexValue,
    #[serde(rename = "penalidadesTimeCasa10Min")]
    pub penalties_home_10min: FlexValue,

    #[serde(rename = "classPosseBolaTimeCasa")]
    pub class_possession_home: String,
    #[serde(rename = "classChutesGolTimeCasa")]
    pub class_shots_on_goal_home: String,
    #[serde(rename = "classChutesForaTimeCasa")]
    pub class_shots_off_home: String,
    #[serde(rename = "classChutesTraveTimeCasa")]
    pub class_shots_post_home: String,
    #[serde(rename = "classChutesBloqueadoTimeCasa")]
    pub class_shots_blocked_home: String,
    #[serde(rename = "classEscanteiosTimeCasa")]
    pub class_corners_home: String,
    #[serde(rename = "classAtaquesPerigososTimeCasa")]
    pub class_dangerous_attacks_home: String,
    #[serde(rename = "classPenalidadesTimeCasa")]
    pub class_penalties_home: String,
    #[serde(rename = "classProbabilidadesTimeCasa")]
    pub class_probabilities_home: String,
    #[serde(rename = "classPontos10MinTimeCasa")]
    pub class_points_10min_home: String,

    // Away team mirrors.
    #[serde(rename = "posseBolaTimeFora")]
    pub possession_away: FlexValue,
    #[serde(rename = "chutesGolTimeFora")]
    pub shots_on_goal_away: FlexValue,
    #[serde(rename = "chutesForaTimeFora")]
    pub shots_off_away: FlexValue,
    #[serde(rename = "chutesTraveTimeFora")]
    pub shots_post_away: FlexValue,
    #[serde(rename = "chutesBloqueadoTimeFora")]
    pub shots_blocked_away: FlexValue,
    #[serde(rename = "escanteiosTimeFora")]
    pub corners_away: FlexValue,
    #[serde(rename = "ataquesPerigososTimeFora")]
    pub dangerous_attacks_away: FlexValue,
    #[serde(rename = "penalidadesTimeFora")]
    pub penalties_away: FlexValue,
    #[serde(rename = "probabilidadesTimeFora")]
    pub probabilities_away: FlexValue,
    #[serde(rename = "pontos10MinTimeFora")]
    pub points_10min_away: FlexValue,

    #[serde(rename = "chutesGolTimeFora1Tempo")]
    pub shots_on_goal_away_1h: FlexValue,
    #[serde(rename = "chutesForaTimeFora1Tempo")]
    pub shots_off_away_1h: FlexValue,
    #[serde(rename = "chutesTraveTimeFora1Tempo")]
    pub shots_post_away_1h: FlexValue,
    #[serde(rename = "chutesBloqueadoTimeFora1Tempo")]
    pub shots_blocked_away_1h: FlexValue,
    #[serde(rename = "escanteiosTimeFora1Tempo")]
    pub corners_away_1h: FlexValue,
    #[serde(rename = "ataquesPerigososTimeFora1Tempo")]
    pub dangerous_attacks_away_1h: FlexValue,
    #[serde(rename = "penalidadesTimeFora1Tempo")]
    pub penalties_away_1h: FlexValue,

    #[serde(rename = "chutesGolTimeFora2Tempo")]
    pub shots_on_goal_away_2h: FlexValue,
    #[serde(rename = "chutesForaTimeFora2Tempo")]
    pub shots_off_away_2h: FlexValue,
    #[serde(rename = "chutesTraveTimeFora2Tempo")]
    pub shots_post_away_2h: FlexValue,
    #[serde(rename = "chutesBloqueadoTimeFora2Tempo")]
    pub shots_blocked_away_2h: FlexValue,
    #[serde(rename = "escanteiosTimeFora2Tempo")]
    pub corners_away_2h: FlexValue,
    #[serde(rename = "ataquesPerigososTimeFora2Tempo")]
    pub dangerous_attacks_away_2h: FlexValue,
    #[serde(rename = "penalidadesTimeFora2Tempo")]
    pub penalties_away_2h: FlexValue,

    #[serde(rename = "chutesGolTimeFora10Min")]
    pub shots_on_goal_away_10min: FlexValue,
    #[serde(rename = "chutesForaTimeFora10Min")]
    pub shots_off_away_10min: FlexValue,
    #[serde(rename = "chutesTraveTimeFora10Min")]
    pub shots_post_away_10min: FlexValue,
    #[serde(rename = "chutesBloqueadoTimeFora10Min")]
    pub shots_blocked_away_10min: FlexValue,
    #[serde(rename = "escanteiosTimeFora10Min")]
    pub corners_away_10min: FlexValue,
    #[serde(rename = "ataquesPerigososTimeFora10Min")]
    pub dangerous_attacks_away_10min: FlexValue,
    #[serde(rename = "penalidadesTimeFora10Min")]
    pub penalties_away_10min: FlexValue,

    #[serde(rename = "classPosseBolaTimeFora")]
    pub class_possession_away: String,
    #[serde(rename = "classChutesGolTimeFora")]
    pub class_shots_on_goal_away: String,
    #[serde(rename = "classChutesForaTimeFora")]
    pub class_shots_off_away: String,
    #[serde(rename = "classChutesTraveTimeFora")]
    pub class_shots_post_away: String,
    #[serde(rename = "classChutesBloqueadoTimeFora")]
    pub class_shots_blocked_away: String,
    #[serde(rename = "classEscanteiosTimeFora")]
    pub class_corners_away: String,
    #[serde(rename = "classAtaquesPerigososTimeFora")]
    pub class_dangerous_attacks_away: String,
    #[serde(rename = "classPenalidadesTimeFora")]
    pub class_penalties_away: String,
    #[serde(rename = "classProbabilidadesTimeFora")]
    pub class_probabilities_away: String,
    #[serde(rename = "classPontos10MinTimeFora")]
    pub class_points_10min_away: String,

    // Pressure (individual + summed), present on both panel and oracle docs.
    #[serde(rename = "pressaoIndividualTimeCasa", default)]
    pub pressure_individual_home: FlexValue,
    #[serde(rename = "pressaoIndividualTimeFora", default)]
    pub pressure_individual_away: FlexValue,
    #[serde(rename = "pressaoSomadaTimeCasa", default)]
    pub pressure_summed_home: FlexValue,
    #[serde(rename = "pressaoSomadaTimeFora", default)]
    pub pressure_summed_away: FlexValue,
    #[serde(rename = "classPressaoIndividualTimeCasa", default)]
    pub class_pressure_individual_home: String,
    #[serde(rename = "classPressaoIndividualTimeFora", default)]
    pub class_pressure_individual_away: String,
    #[serde(rename = "classPressaoSomadaTimeCasa", default)]
    pub class_pressure_summed_home: String,
    #[serde(rename = "classPressaoSomadaTimeFora", default)]
    pub class_pressure_summed_away: String,

    // Score-of-plays windows (xg-diff family).
    #[serde(rename = "placarJogadasTimeCasa", default)]
    pub score_of_plays_home: FlexValue,
    #[serde(rename = "placarJogadasTimeFora", default)]
    pub score_of_plays_away: FlexValue,
    #[serde(rename = "classPlacarJogadasTimeCasa", default)]
    pub class_score_of_plays_home: String,
    #[serde(rename = "classPlacarJogadasTimeFora", default)]
    pub class_score_of_plays_away: String,
}

impl Event {
    pub fn is_live(&self) -> bool {
        self.status == "inprogress"
    }
}
