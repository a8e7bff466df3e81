//! Slip strategy crate.
//!
//! Picks the shortlist from extracted candidates and turns it into a
//! wager-builder deep-link.

pub mod link;
pub mod selector;

pub use link::LinkComposer;
pub use selector::{SelectionCriteria, SlipSelector};
