//! Fallback strategy: JSON records embedded in `data-prop` attributes.

use std::sync::LazyLock;

use common::{Direction, Error, Proposition, Result};
use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::warn;

pub const PROP_DATA_ATTR: &str = "data-prop";

static PROP_DATA_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[data-prop]").expect("static data-prop selector"));

/// A number that may arrive as a JSON number or a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => n.as_f64(),
            Scalar::Text(s) => s.trim().parse().ok(),
        }
    }

    fn into_text(self) -> String {
        match self {
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EmbeddedProp {
    #[serde(alias = "externalId", alias = "prizepicks_id")]
    external_id: Option<Scalar>,
    #[serde(alias = "side")]
    direction: Option<String>,
    line: Option<Scalar>,
    #[serde(alias = "edgePercent", alias = "ev_percent")]
    edge_percent: Option<Scalar>,
    #[serde(alias = "subjectName", alias = "player_name")]
    subject_name: Option<String>,
    #[serde(alias = "stat_type")]
    category: Option<String>,
    #[serde(alias = "sport")]
    league: Option<String>,
}

impl EmbeddedProp {
    fn into_proposition(self) -> Result<Proposition> {
        let id = self.external_id.map(Scalar::into_text).unwrap_or_default();
        let side = self.direction.unwrap_or_default();
        let direction = Direction::from_label(&side)
            .ok_or_else(|| Error::Parse(format!("unknown side {side:?}")))?;
        let line = numeric_or_zero(self.line, "line")?;
        let edge = numeric_or_zero(self.edge_percent, "edge percent")?;

        let prop = Proposition::new(id, direction, line)
            .ok_or_else(|| Error::Parse("empty id or non-finite line".into()))?;

        Ok(prop
            .with_edge_percent(edge)
            .with_subject_name(self.subject_name.unwrap_or_default())
            .with_category(self.category.unwrap_or_default())
            .with_league(self.league.unwrap_or_default()))
    }
}

fn numeric_or_zero(value: Option<Scalar>, field: &str) -> Result<f64> {
    match value {
        None => Ok(0.0),
        Some(scalar) => scalar
            .as_f64()
            .ok_or_else(|| Error::Parse(format!("{field} is not numeric"))),
    }
}

/// Parse one `data-prop` attribute value.
pub fn parse_prop_data(raw: &str) -> Result<Proposition> {
    let record: EmbeddedProp = serde_json::from_str(raw)?;
    record.into_proposition()
}

/// Props from every element carrying a `data-prop` attribute, in document order.
pub fn mine_embedded_props(document: &Html) -> Vec<Proposition> {
    let mut props = Vec::new();

    for element in document.select(&PROP_DATA_SELECTOR) {
        let Some(raw) = element.value().attr(PROP_DATA_ATTR) else {
            continue;
        };
        match parse_prop_data(raw) {
            Ok(prop) => props.push(prop),
            Err(e) => warn!("Skipping {} record: {}", PROP_DATA_ATTR, e),
        }
    }

    props
}
