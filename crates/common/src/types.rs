//! Domain types shared across the slip generator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder for descriptive fields that could not be recovered from the page.
pub const UNKNOWN: &str = "Unknown";

// ── Direction ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Over,
    Under,
}

impl Direction {
    /// Single-character side code used in deep-link tokens.
    pub fn code(self) -> char {
        match self {
            Direction::Over => 'o',
            Direction::Under => 'u',
        }
    }

    /// Parse a token side code. Only `o` and `u` are accepted.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "o" => Some(Direction::Over),
            "u" => Some(Direction::Under),
            _ => None,
        }
    }

    /// Lenient parse for structured data: side codes or full words, any case.
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "o" | "over" => Some(Direction::Over),
            "u" | "under" => Some(Direction::Under),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Over => "Over",
            Direction::Under => "Under",
        }
    }
}

// ── Proposition ───────────────────────────────────────────────────────

/// A single wagerable line scraped from the source page.
///
/// Construction validates the identifying triple (id, direction, line);
/// the descriptive fields start as [`UNKNOWN`] and can only be filled in
/// through the `with_*` builders before the value is handed on.
#[derive(Debug, Clone, PartialEq)]
pub struct Proposition {
    external_id: String,
    direction: Direction,
    line: f64,
    edge_percent: f64,
    subject_name: String,
    category: String,
    league: String,
}

impl Proposition {
    /// Returns `None` when the id is blank or the line is not finite.
    pub fn new(external_id: impl Into<String>, direction: Direction, line: f64) -> Option<Self> {
        let external_id = external_id.into().trim().to_string();
        if external_id.is_empty() || !line.is_finite() {
            return None;
        }
        Some(Self {
            external_id,
            direction,
            line,
            edge_percent: 0.0,
            subject_name: UNKNOWN.to_string(),
            category: UNKNOWN.to_string(),
            league: UNKNOWN.to_string(),
        })
    }

    /// Non-finite values are ignored and leave the edge at 0.
    pub fn with_edge_percent(mut self, edge_percent: f64) -> Self {
        if edge_percent.is_finite() {
            self.edge_percent = edge_percent;
        }
        self
    }

    pub fn with_subject_name(mut self, name: impl Into<String>) -> Self {
        self.subject_name = non_blank_or_unknown(name.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = non_blank_or_unknown(category.into());
        self
    }

    pub fn with_league(mut self, league: impl Into<String>) -> Self {
        self.league = non_blank_or_unknown(league.into());
        self
    }

    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn line(&self) -> f64 {
        self.line
    }

    pub fn edge_percent(&self) -> f64 {
        self.edge_percent
    }

    pub fn subject_name(&self) -> &str {
        &self.subject_name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn league(&self) -> &str {
        &self.league
    }

    /// Deep-link token: `<id>-<side>-<line>`, e.g. `555-o-24.5`.
    pub fn token(&self) -> String {
        format!("{}-{}-{}", self.external_id, self.direction.code(), self.line)
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} ({}, {:.1}% edge)",
            self.subject_name,
            self.category,
            self.direction.label(),
            self.line,
            self.league,
            self.edge_percent
        )
    }
}

fn non_blank_or_unknown(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        UNKNOWN.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_id_and_non_finite_line() {
        assert!(Proposition::new("", Direction::Over, 1.5).is_none());
        assert!(Proposition::new("   ", Direction::Over, 1.5).is_none());
        assert!(Proposition::new("12", Direction::Under, f64::NAN).is_none());
        assert!(Proposition::new("12", Direction::Under, f64::INFINITY).is_none());
    }

    #[test]
    fn test_descriptive_fields_default_to_unknown() {
        let prop = Proposition::new("12", Direction::Under, 3.5).unwrap();
        assert_eq!(prop.subject_name(), UNKNOWN);
        assert_eq!(prop.category(), UNKNOWN);
        assert_eq!(prop.league(), UNKNOWN);
        assert_eq!(prop.edge_percent(), 0.0);

        let prop = prop.with_subject_name("  ").with_league("NHL");
        assert_eq!(prop.subject_name(), UNKNOWN);
        assert_eq!(prop.league(), "NHL");
    }

    #[test]
    fn test_token_uses_natural_decimal_form() {
        let over = Proposition::new("555", Direction::Over, 24.5).unwrap();
        let under = Proposition::new("77", Direction::Under, 7.0).unwrap();
        assert_eq!(over.token(), "555-o-24.5");
        assert_eq!(under.token(), "77-u-7");
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!(Direction::from_code("o"), Some(Direction::Over));
        assert_eq!(Direction::from_code("u"), Some(Direction::Under));
        assert_eq!(Direction::from_code("O"), None);
        assert_eq!(Direction::from_code("over"), None);
        assert_eq!(Direction::from_label(" Under "), Some(Direction::Under));
        assert_eq!(Direction::from_label("x"), None);
    }
}
