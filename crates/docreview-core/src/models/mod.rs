//! Data models for the review client
//!
//! Wire types mirror the JSON bodies exchanged with the review server;
//! `PreviewPayload` is the transient result of a fetch-by-id.

mod action_item;
mod document;
mod review;
mod upload;

pub use action_item::*;
pub use document::*;
pub use review::*;
pub use upload::*;
