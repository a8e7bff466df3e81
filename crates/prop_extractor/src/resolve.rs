//! Best-effort resolution of the descriptive fields around an outbound link.
//!
//! Each resolver walks from the link upward a bounded number of levels and
//! returns the first match found at the shallowest level. `None` means the
//! field could not be recovered; callers fall back to the sentinel.

use std::sync::LazyLock;

use regex::Regex;

use crate::node::{ancestors_within, MarkupNode};

pub const EDGE_SEARCH_DEPTH: usize = 5;
pub const SUBJECT_SEARCH_DEPTH: usize = 3;
pub const CATEGORY_SEARCH_DEPTH: usize = 3;
pub const LEAGUE_SEARCH_DEPTH: usize = 3;

/// Stat categories in priority order. Each also matches its plural.
pub const CATEGORY_KEYWORDS: [&str; 10] = [
    "point",
    "rebound",
    "assist",
    "steal",
    "block",
    "touchdown",
    "yard",
    "reception",
    "goal",
    "save",
];

/// Leagues in priority order, matched as case-insensitive substrings.
pub const LEAGUES: [&str; 7] = ["NBA", "NFL", "NHL", "MLB", "Soccer", "Tennis", "Golf"];

static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)%").expect("static percent regex"));

static SUBJECT_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)player|name").expect("static subject class regex"));

static CATEGORY_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    CATEGORY_KEYWORDS
        .iter()
        .map(|kw| Regex::new(&format!("(?i){kw}s?")).expect("static category regex"))
        .collect()
});

pub fn resolve_edge_percent<N: MarkupNode>(link: &N) -> Option<f64> {
    ancestors_within(link, EDGE_SEARCH_DEPTH).find_map(|node| percent_in(&node.text_content()))
}

/// Text of the first name-classed element at the shallowest level. A blank
/// match still ends the search.
pub fn resolve_subject_name<N: MarkupNode>(link: &N) -> Option<String> {
    ancestors_within(link, SUBJECT_SEARCH_DEPTH)
        .find_map(|node| node.find_descendant(&|candidate| has_subject_class(candidate)))
        .map(|el| el.text_content().trim().to_string())
        .filter(|name| !name.is_empty())
}

pub fn resolve_category<N: MarkupNode>(link: &N) -> Option<String> {
    ancestors_within(link, CATEGORY_SEARCH_DEPTH).find_map(|node| category_in(&node.text_content()))
}

pub fn resolve_league<N: MarkupNode>(link: &N) -> Option<&'static str> {
    ancestors_within(link, LEAGUE_SEARCH_DEPTH).find_map(|node| league_in(&node.text_content()))
}

/// First `<number>%` in the text.
pub fn percent_in(text: &str) -> Option<f64> {
    PERCENT_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Earliest keyword in priority order that appears anywhere in the text,
/// returned as written on the page.
pub fn category_in(text: &str) -> Option<String> {
    CATEGORY_RES
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().to_string())
}

pub fn league_in(text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    LEAGUES
        .iter()
        .find(|league| lowered.contains(&league.to_lowercase()))
        .copied()
}

fn has_subject_class<N: MarkupNode>(node: &N) -> bool {
    node.attribute("class")
        .map(|classes| classes.split_whitespace().any(|c| SUBJECT_CLASS_RE.is_match(c)))
        .unwrap_or(false)
}
