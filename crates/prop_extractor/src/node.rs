//! Minimal read-only view of a markup tree.
//!
//! The field resolvers only need text, attributes, the parent and a
//! descendant search, so they are written against this trait rather than
//! a particular HTML library.

use scraper::ElementRef;

pub trait MarkupNode: Clone {
    /// Concatenated text of this node and everything below it.
    fn text_content(&self) -> String;

    fn attribute(&self, name: &str) -> Option<String>;

    /// Enclosing element, or `None` at the root.
    fn parent_node(&self) -> Option<Self>;

    /// First descendant in document order matching `predicate`. The node
    /// itself is not considered.
    fn find_descendant(&self, predicate: &dyn Fn(&Self) -> bool) -> Option<Self>;
}

impl<'a> MarkupNode for ElementRef<'a> {
    fn text_content(&self) -> String {
        self.text().collect()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(str::to_string)
    }

    fn parent_node(&self) -> Option<Self> {
        self.parent().and_then(ElementRef::wrap)
    }

    fn find_descendant(&self, predicate: &dyn Fn(&Self) -> bool) -> Option<Self> {
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|el| predicate(el))
    }
}

/// The node itself followed by up to `levels - 1` ancestors.
pub fn ancestors_within<N: MarkupNode>(start: &N, levels: usize) -> impl Iterator<Item = N> {
    std::iter::successors(Some(start.clone()), |node| node.parent_node()).take(levels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_ancestor_walk_is_bounded() {
        let html = Html::parse_document(
            r#"<div id="outer"><section id="mid"><p id="inner"><b id="leaf">x</b></p></section></div>"#,
        );
        let selector = Selector::parse("#leaf").unwrap();
        let leaf = html.select(&selector).next().unwrap();

        let ids: Vec<String> = ancestors_within(&leaf, 3)
            .filter_map(|n| n.attribute("id"))
            .collect();
        assert_eq!(ids, vec!["leaf", "inner", "mid"]);
    }

    #[test]
    fn test_find_descendant_skips_self() {
        let html = Html::parse_document(
            r#"<div class="player"><span class="player">Inner</span></div>"#,
        );
        let selector = Selector::parse("div.player").unwrap();
        let div = html.select(&selector).next().unwrap();

        let found = div
            .find_descendant(&|n| n.attribute("class").as_deref() == Some("player"))
            .unwrap();
        assert_eq!(found.text_content(), "Inner");
        assert!(found
            .find_descendant(&|n| n.attribute("class").is_some())
            .is_none());
    }
}
