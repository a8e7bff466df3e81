//! Primary strategy: mine outbound links to the wager-builder.

use std::sync::LazyLock;

use common::{Direction, Error, Proposition, Result};
use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::resolve;

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static anchor selector"));

/// Parse a deep-link token of the form `<id>-<side>-<line>`.
pub fn parse_token(raw: &str) -> Result<Proposition> {
    let parts: Vec<&str> = raw.trim().split('-').collect();
    let [id, side, line] = parts.as_slice() else {
        return Err(Error::Parse(format!(
            "token {raw:?} has {} parts, expected <id>-<side>-<line>",
            parts.len()
        )));
    };

    let direction = Direction::from_code(side)
        .ok_or_else(|| Error::Parse(format!("token {raw:?} has unknown side {side:?}")))?;
    let line: f64 = line
        .parse()
        .map_err(|_| Error::Parse(format!("token {raw:?} has non-numeric line {line:?}")))?;

    Proposition::new(*id, direction, line)
        .ok_or_else(|| Error::Parse(format!("token {raw:?} has an empty id or non-finite line")))
}

/// Props from every `<a href>` pointing at `target_host`, in document order.
pub fn mine_anchor_links(document: &Html, target_host: &str, query_param: &str) -> Vec<Proposition> {
    let mut props = Vec::new();

    for link in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };

        // Relative links can never point at another host.
        let Ok(url) = Url::parse(href.trim()) else {
            continue;
        };
        let on_target = url
            .host_str()
            .is_some_and(|host| host.eq_ignore_ascii_case(target_host));
        if !on_target {
            continue;
        }

        let Some(token) = url
            .query_pairs()
            .find(|(key, _)| key == query_param)
            .map(|(_, value)| value.into_owned())
        else {
            debug!("Link {} has no {} parameter", href, query_param);
            continue;
        };

        let prop = match parse_token(&token) {
            Ok(p) => p,
            Err(e) => {
                warn!("Skipping link {}: {}", href, e);
                continue;
            }
        };

        let mut prop = prop.with_edge_percent(resolve::resolve_edge_percent(&link).unwrap_or(0.0));
        if let Some(name) = resolve::resolve_subject_name(&link) {
            prop = prop.with_subject_name(name);
        }
        if let Some(category) = resolve::resolve_category(&link) {
            prop = prop.with_category(category);
        }
        if let Some(league) = resolve::resolve_league(&link) {
            prop = prop.with_league(league);
        }

        props.push(prop);
    }

    props
}
