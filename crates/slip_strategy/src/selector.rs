//! Shortlist selection: edge floor, league allow-list, rank, cap.

use common::config::FilterConfig;
use common::Proposition;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionCriteria {
    /// Minimum edge percentage, inclusive.
    pub min_edge_percent: f64,
    /// Allowed leagues. Empty means unrestricted.
    pub leagues: Vec<String>,
    pub max_legs: usize,
}

impl From<&FilterConfig> for SelectionCriteria {
    fn from(cfg: &FilterConfig) -> Self {
        Self {
            min_edge_percent: cfg.min_edge_percent,
            leagues: cfg.leagues.clone(),
            max_legs: cfg.max_legs,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SlipSelector {
    criteria: SelectionCriteria,
}

impl SlipSelector {
    pub fn new(criteria: SelectionCriteria) -> Self {
        Self { criteria }
    }

    /// Filter, rank by edge (highest first) and truncate. The sort is stable,
    /// so equal edges keep their document order. An empty result is normal.
    pub fn select(&self, candidates: Vec<Proposition>) -> Vec<Proposition> {
        let total = candidates.len();

        let mut shortlist: Vec<Proposition> = candidates
            .into_iter()
            .filter(|p| p.edge_percent() >= self.criteria.min_edge_percent)
            .filter(|p| self.league_allowed(p.league()))
            .collect();
        debug!(
            "{} of {} props pass edge>={}% and league filters",
            shortlist.len(),
            total,
            self.criteria.min_edge_percent
        );

        shortlist.sort_by(|a, b| b.edge_percent().total_cmp(&a.edge_percent()));
        shortlist.truncate(self.criteria.max_legs);

        info!("Filtered {} props to {} top picks", total, shortlist.len());
        shortlist
    }

    fn league_allowed(&self, league: &str) -> bool {
        self.criteria.leagues.is_empty()
            || self
                .criteria
                .leagues
                .iter()
                .any(|allowed| allowed.trim().eq_ignore_ascii_case(league))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Direction;

    fn prop(id: &str, edge: f64, league: &str) -> Proposition {
        Proposition::new(id, Direction::Over, 10.5)
            .unwrap()
            .with_edge_percent(edge)
            .with_league(league)
    }

    fn criteria(min_edge: f64, leagues: &[&str], max_legs: usize) -> SelectionCriteria {
        SelectionCriteria {
            min_edge_percent: min_edge,
            leagues: leagues.iter().map(|s| s.to_string()).collect(),
            max_legs,
        }
    }

    fn ids(props: &[Proposition]) -> Vec<&str> {
        props.iter().map(|p| p.external_id()).collect()
    }

    #[test]
    fn test_min_edge_is_inclusive() {
        let selector = SlipSelector::new(criteria(5.0, &[], 10));
        let picked = selector.select(vec![prop("a", 4.99, "NBA"), prop("b", 5.0, "NBA")]);
        assert_eq!(ids(&picked), vec!["b"]);
    }

    #[test]
    fn test_sorted_descending_and_capped() {
        let selector = SlipSelector::new(criteria(0.0, &[], 3));
        let picked = selector.select(vec![
            prop("a", 6.0, "NBA"),
            prop("b", 12.0, "NBA"),
            prop("c", 9.0, "NBA"),
            prop("d", 15.0, "NBA"),
        ]);
        assert_eq!(ids(&picked), vec!["d", "b", "c"]);
    }

    #[test]
    fn test_ties_keep_document_order() {
        let selector = SlipSelector::new(criteria(0.0, &[], 10));
        let picked = selector.select(vec![
            prop("first", 7.0, "NBA"),
            prop("top", 9.0, "NBA"),
            prop("second", 7.0, "NBA"),
            prop("third", 7.0, "NBA"),
        ]);
        assert_eq!(ids(&picked), vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_league_allow_list() {
        let selector = SlipSelector::new(criteria(0.0, &["nfl", "NHL"], 10));
        let picked = selector.select(vec![
            prop("a", 8.0, "NBA"),
            prop("b", 7.0, "NFL"),
            prop("c", 6.0, "NHL"),
            prop("d", 9.0, "Unknown"),
        ]);
        assert_eq!(ids(&picked), vec!["b", "c"]);
    }

    #[test]
    fn test_empty_allow_list_is_unrestricted() {
        let selector = SlipSelector::new(criteria(0.0, &[], 10));
        let picked = selector.select(vec![prop("a", 1.0, "Unknown"), prop("b", 2.0, "Golf")]);
        assert_eq!(ids(&picked), vec!["b", "a"]);
    }

    #[test]
    fn test_nothing_meets_criteria() {
        let selector = SlipSelector::new(criteria(50.0, &[], 3));
        assert!(selector.select(vec![prop("a", 10.0, "NBA")]).is_empty());
        assert!(selector.select(Vec::new()).is_empty());
    }

    #[test]
    fn test_output_respects_bounds_for_many_inputs() {
        let selector = SlipSelector::new(criteria(5.0, &[], 4));
        let candidates: Vec<Proposition> = (0..40)
            .map(|i| prop(&format!("p{i}"), (i * 7 % 23) as f64, "NBA"))
            .collect();
        let picked = selector.select(candidates);

        assert!(picked.len() <= 4);
        assert!(picked.iter().all(|p| p.edge_percent() >= 5.0));
        assert!(picked
            .windows(2)
            .all(|w| w[0].edge_percent() >= w[1].edge_percent()));
    }

    #[test]
    fn test_from_filter_config_defaults() {
        let criteria = SelectionCriteria::from(&FilterConfig::default());
        assert_eq!(criteria.min_edge_percent, 5.0);
        assert_eq!(criteria.max_legs, 3);
        assert!(criteria.leagues.is_empty());
    }
}
