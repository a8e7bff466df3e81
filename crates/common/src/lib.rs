//! Shared types, config, and error definitions for the slip generator.

pub mod capability;
pub mod config;
pub mod error;
pub mod types;

pub use capability::{DocumentFetcher, FetchedDocument, MessageSender};
pub use config::SlipConfig;
pub use error::Error;
pub use types::*;

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
