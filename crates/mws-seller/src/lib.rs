//! # mws-seller
//!
//! Seller-side Amazon MWS operations on top of `mws-client`:
//!
//! - **Orders**: list by creation or update time, page with next tokens,
//!   fetch single orders and their items
//! - **Products**: catalog lookup by id, free-text search, categories
//! - **Pricing**: competitive prices, own prices, lowest offers
//! - **Finances**: financial events by order, group or posting date
//! - **Fulfillment inventory**: FBA supply per SKU
//! - **Sellers and recommendations**
//! - **Subscriptions**: SQS destinations and notification subscriptions
//!
//! Every operation is a typed request in [`requests`]. The
//! [`SellerClient`] methods send them and read the response into the types
//! in this crate.
//!
//! ## Example
//!
//! ```rust,ignore
//! use mws_seller::{GetCompetitivePricingForAsin, SellerClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mws_seller::Error> {
//!     let mut seller = SellerClient::from_env()?;
//!
//!     let prices = seller
//!         .competitive_pricing_for_asin(GetCompetitivePricingForAsin::new(["B00EXAMPLE"]))
//!         .await?;
//!     for (asin, price) in &prices {
//!         println!("{asin}: {:?}", price.landed_price);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod notifications;
pub mod requests;
mod types;

pub use client::SellerClient;
pub use error::{Error, ErrorKind, Result};
pub use notifications::{
    Destination, NotificationType, Subscription, DEFAULT_DELIVERY_CHANNEL, SQS_QUEUE_URL,
};
pub use requests::*;
pub use types::*;
