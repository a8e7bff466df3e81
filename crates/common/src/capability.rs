//! Seams to the outside world: fetching the source page and sending chat
//! messages. The cycle only ever talks to these traits.

use async_trait::async_trait;

use crate::Result;

/// A fetched page: the HTTP status and the decoded body.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub status: u16,
    pub body: String,
}

impl FetchedDocument {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fetches a document by URL. Transport failures are `Err`; any response,
/// including a non-2xx one, comes back as `Ok`.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument>;
}

/// Delivers a text message to a chat destination.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<()>;
}
