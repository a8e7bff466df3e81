//! Document extractor.
//!
//! Turns a fetched odds page into proposition records. Outbound links to the
//! wager-builder are tried first; `data-prop` attributes are only consulted
//! when no link yields a record.

pub mod anchor;
pub mod embedded;
pub mod node;
pub mod resolve;

use common::{Error, Proposition, Result};
use scraper::Html;
use tracing::info;
use url::Url;

pub use anchor::parse_token;
pub use node::MarkupNode;

#[derive(Debug, Clone)]
pub struct PropExtractor {
    target_host: String,
    query_param: String,
}

impl PropExtractor {
    /// `target_base_url` is the deep-link prefix; only links to its host count.
    pub fn new(target_base_url: &str, query_param: impl Into<String>) -> Result<Self> {
        let url = Url::parse(target_base_url)
            .map_err(|e| Error::Config(format!("target.base_url is not a URL: {e}")))?;
        let target_host = url
            .host_str()
            .ok_or_else(|| Error::Config("target.base_url has no host".into()))?
            .to_ascii_lowercase();

        Ok(Self {
            target_host,
            query_param: query_param.into(),
        })
    }

    /// Extract candidates in document order. Never fails; unusable
    /// candidates are skipped.
    pub fn extract(&self, html: &str) -> Vec<Proposition> {
        let document = Html::parse_document(html);

        let props = anchor::mine_anchor_links(&document, &self.target_host, &self.query_param);
        if !props.is_empty() {
            info!("Extracted {} props from outbound links", props.len());
            return props;
        }

        let props = embedded::mine_embedded_props(&document);
        info!("Extracted {} props from embedded data", props.len());
        props
    }
}
