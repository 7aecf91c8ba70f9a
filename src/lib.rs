//! # mws-api
//!
//! A client library for the Amazon Marketplace Web Service (MWS).
//!
//! Every request goes through one pipeline: parameters are assembled and
//! sorted, signed with HMAC-SHA256 (Signature Version 2), sent with the
//! headers the target marketplace needs, and the XML or tab-delimited
//! response is decoded into typed values.
//!
//! ## Crates
//!
//! - **mws-client** - Signing, content negotiation, transport, XML codec and errors
//! - **mws-feeds** - Feed building and submission: inventory, prices, products,
//!   order fulfillment, flat-file listings, shipment invoices
//! - **mws-reports** - Report requests, status polling and report downloads
//! - **mws-seller** - Orders, products, pricing, finances, inventory supply,
//!   sellers, recommendations and notification subscriptions
//!
//! Each crate sits behind a feature of the same name; `full` (the default)
//! enables all of them.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mws_api::{MwsCredentials, ListOrders, SellerClient, FeedsClient};
//! use chrono::{Duration, Utc};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = MwsCredentials::from_env()?;
//!
//!     let mut seller = SellerClient::new(creds.clone())?;
//!     let page = seller
//!         .list_orders(ListOrders::new(Utc::now() - Duration::days(1)))
//!         .await?;
//!     println!("{} new orders", page.orders.len());
//!
//!     let mut feeds = FeedsClient::new(creds)?;
//!     feeds.update_stock([("SKU-1", 10)]).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! Clients take `&mut self` for every call: the "debug next feed" switch and
//! the last raw response live on the client. Use one client per task.

// Re-export all crates for convenient access
#[cfg(feature = "client")]
pub use mws_client as client;
#[cfg(feature = "feeds")]
pub use mws_feeds as feeds;
#[cfg(feature = "reports")]
pub use mws_reports as reports;
#[cfg(feature = "seller")]
pub use mws_seller as seller;

// Re-export commonly used types at the top level
#[cfg(feature = "client")]
pub use mws_client::{ClientConfig, MwsClient, MwsCredentials, MwsRequest, QueryParams, XmlValue};
#[cfg(feature = "feeds")]
pub use mws_feeds::{FeedOutcome, FeedsClient, InventoryUpdate, OrderFulfillment, PriceUpdate};
#[cfg(feature = "reports")]
pub use mws_reports::{ReportContent, ReportTable, ReportsClient};
#[cfg(feature = "seller")]
pub use mws_seller::{ListOrders, SellerClient};
