//! Deep-link composition: `base + token(,token)*`.

use common::Proposition;
use tracing::info;

#[derive(Debug, Clone)]
pub struct LinkComposer {
    base_url: String,
}

impl LinkComposer {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Returns an empty string for an empty shortlist, meaning there is
    /// nothing to send.
    pub fn compose(&self, shortlist: &[Proposition]) -> String {
        if shortlist.is_empty() {
            return String::new();
        }

        let tokens: Vec<String> = shortlist.iter().map(Proposition::token).collect();
        let link = format!("{}{}", self.base_url, tokens.join(","));

        info!("Generated deep-link with {} legs", shortlist.len());
        link
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Direction;

    const BASE: &str = "https://app.prizepicks.com/board?projections=";

    #[test]
    fn test_empty_shortlist_gives_empty_link() {
        assert_eq!(LinkComposer::new(BASE).compose(&[]), "");
    }

    #[test]
    fn test_single_leg() {
        let prop = Proposition::new("555", Direction::Over, 24.5).unwrap();
        assert_eq!(
            LinkComposer::new(BASE).compose(&[prop]),
            format!("{BASE}555-o-24.5")
        );
    }

    #[test]
    fn test_multiple_legs_keep_order() {
        let legs = vec![
            Proposition::new("9", Direction::Under, 3.0).unwrap(),
            Proposition::new("4", Direction::Over, 0.5).unwrap(),
            Proposition::new("77", Direction::Under, 210.5).unwrap(),
        ];
        assert_eq!(
            LinkComposer::new(BASE).compose(&legs),
            format!("{BASE}9-u-3,4-o-0.5,77-u-210.5")
        );
    }
}
