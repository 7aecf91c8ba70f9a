//! # mws-feeds
//!
//! Feed submission for Amazon MWS.
//!
//! Feeds are built either as `AmazonEnvelope` XML documents (inventory,
//! price, product deletion, order fulfillment) or as tab-delimited flat
//! files (listings). Both are encoded in the charset of the target
//! marketplace before they are submitted.
//!
//! ## Example
//!
//! ```rust,ignore
//! use mws_feeds::{FeedsClient, PriceUpdate, FeedSubmissionResult};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mws_feeds::Error> {
//!     let mut feeds = FeedsClient::from_env()?;
//!
//!     let outcome = feeds.update_price(&[PriceUpdate::new("SKU-1", "19.99")]).await?;
//!     let info = outcome.submission().expect("not in debug mode");
//!
//!     // later
//!     if let FeedSubmissionResult::Report(report) =
//!         feeds.get_feed_submission_result(&info.feed_submission_id).await?
//!     {
//!         println!("{} errors", report.summary.messages_with_error);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod envelope;
mod error;
mod flat_file;
mod messages;
mod types;

pub use client::FeedsClient;
pub use envelope::{
    FeedEnvelope, FeedMessage, MessageType, OperationType, DOCUMENT_VERSION, ENVELOPE_ROOT,
};
pub use error::{Error, ErrorKind, Result};
pub use flat_file::{FlatFileFeed, FlatFileRecord, ListingProduct};
pub use messages::{
    FulfillmentItem, InventoryUpdate, OrderFulfillment, PriceUpdate, Sale, DEFAULT_CURRENCY,
};
pub use types::*;
