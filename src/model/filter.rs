use serde::{Deserialize, Deserializer};

/// Accepts `true|1|yes|on` (case-insensitive) as true, anything else as false.
/// Mirrors the original's `getBoolParam`.
fn query_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(match raw {
        Some(s) => matches!(s.to_ascii_lowercase().as_str(), "true" | "1" | "yes" | "on"),
        None => false,
    })
}

fn default_count_jogos_mostrar() -> i32 {
    25
}

fn default_filtro_acrescimo() -> i32 {
    1
}

fn default_operador() -> String {
    ">=".to_string()
}

fn default_condicao() -> String {
    "ou".to_string()
}

/// The parsed query parameters of one connection. Field names keep the
/// original wire query-parameter spelling via `serde(rename)` so the
/// external contract is untouched while the Rust identifiers read in
/// English.
#[derive(Debug, Clone, Deserialize)]
pub struct Filter {
    #[serde(default)]
    pub token: String,

    #[serde(rename = "idUsuario", default)]
    pub user_id: i64,

    #[serde(rename = "somLigado", default, deserialize_with = "query_bool")]
    pub sound_enabled: bool,

    #[serde(rename = "ordemInicio", default, deserialize_with = "query_bool")]
    pub order_by_kickoff: bool,

    #[serde(rename = "campoBusca", default)]
    pub search_text: String,

    #[serde(
        rename = "mostrarApenasJogosLive",
        default,
        deserialize_with = "query_bool"
    )]
    pub live_only: bool,

    #[serde(
        rename = "mostrarApenasJogosFavoritos",
        default,
        deserialize_with = "query_bool"
    )]
    pub favorites_only: bool,

    #[serde(rename = "countJogosMostrar", default = "default_count_jogos_mostrar")]
    pub count_to_show: i32,

    #[serde(
        rename = "mostrarFiltroAcrescimo",
        default,
        deserialize_with = "query_bool"
    )]
    pub injury_time_only: bool,

    #[serde(rename = "filtroAcrescimoHt", default = "default_filtro_acrescimo")]
    pub injury_time_ht_threshold: i32,

    #[serde(rename = "filtroAcrescimoFt", default = "default_filtro_acrescimo")]
    pub injury_time_ft_threshold: i32,

    #[serde(rename = "filtroAcrescimoHtOperador", default = "default_operador")]
    pub injury_time_ht_operator: String,

    #[serde(rename = "filtroAcrescimoFtOperador", default = "default_operador")]
    pub injury_time_ft_operator: String,

    #[serde(rename = "filtroAcrescimoCondicao", default = "default_condicao")]
    pub injury_time_conjunction: String,

    #[serde(
        rename = "mostrarApenasJogosOraculo",
        default,
        deserialize_with = "query_bool"
    )]
    pub oracle_only: bool,

    #[serde(
        rename = "mostrarApenasJogosBetfair",
        default,
        deserialize_with = "query_bool"
    )]
    pub bookmaker_only: bool,

    #[serde(
        rename = "mostrarApenasJogosOver",
        default,
        deserialize_with = "query_bool"
    )]
    pub over_only: bool,

    #[serde(
        rename = "mostrarApenasJogosLayCs",
        default,
        deserialize_with = "query_bool"
    )]
    pub lay_cs_only: bool,

    #[serde(rename = "favoritoVencendo", default, deserialize_with = "query_bool")]
    pub favorite_leading: bool,

    #[serde(rename = "favoritoPerdendo", default, deserialize_with = "query_bool")]
    pub favorite_trailing: bool,

    #[serde(rename = "casaVencendo", default, deserialize_with = "query_bool")]
    pub home_leading: bool,

    #[serde(rename = "visitanteVencendo", default, deserialize_with = "query_bool")]
    pub away_leading: bool,

    #[serde(default, deserialize_with = "query_bool")]
    pub empatado: bool,

    #[serde(rename = "filtroMomentoGol", default, deserialize_with = "query_bool")]
    pub goal_moment_only: bool,

    #[serde(rename = "filtroPressao", default, deserialize_with = "query_bool")]
    pub pressure_only: bool,

    #[serde(rename = "filtroAlertas", default, deserialize_with = "query_bool")]
    pub any_alert_only: bool,

    #[serde(rename = "filtroDiferencaXg", default, deserialize_with = "query_bool")]
    pub xg_diff_only: bool,
}

impl Filter {
    pub fn is_tied(&self) -> bool {
        self.empatado
    }
}
