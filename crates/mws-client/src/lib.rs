//! # mws-client
//!
//! Core request pipeline for Amazon Marketplace Web Service (MWS).
//!
//! This crate provides:
//! - Credential and marketplace validation
//! - The operation descriptor table (endpoint path, version, action)
//! - Canonical query construction and Signature Version 2 signing
//! - Content negotiation for body-bearing operations (`Content-MD5`,
//!   per-marketplace charset)
//! - A pluggable [`Transport`] with a reqwest default
//! - An XML tree codec used for responses and feed envelopes
//! - Classification of MWS error documents
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (mws-feeds, mws-reports, mws-seller)                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       MwsClient                             │
//! │  - Merges common + operation parameters                     │
//! │  - Negotiates headers, signs, keeps the last response       │
//! │  - Decodes XML bodies, classifies error documents           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Transport                             │
//! │  - One round trip per call (HttpTransport: reqwest, TLS1.2) │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use mws_client::{MwsClient, MwsCredentials, QueryParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mws_client::Error> {
//!     let creds = MwsCredentials::from_env()?;
//!     let mut client = MwsClient::new(creds)?;
//!
//!     let doc = client
//!         .request_xml("GetOrder", QueryParams::new().with("AmazonOrderId.Id.1", "902-3159896-1390916"))
//!         .await?;
//!     println!("{:?}", doc.path(&["GetOrderResult", "Orders"]));
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod credentials;
mod error;
pub mod marketplace;
pub mod negotiate;
pub mod operation;
pub mod query;
mod request;
pub mod response;
pub mod signer;
pub mod transport;
pub mod xml;

pub use client::MwsClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use credentials::MwsCredentials;
pub use error::{Error, ErrorKind, Result, GENERIC_ERROR_MESSAGE};
pub use marketplace::{FeedCharset, Marketplace, MarketplaceRegistry};
pub use negotiate::{BodyFormat, RequestBody};
pub use operation::{HttpMethod, OperationDescriptor};
pub use query::{ParamValue, QueryParams};
pub use request::{MwsRequest, RequestContext};
pub use response::ResponseBody;
pub use transport::{HttpTransport, Transport, TransportRequest, TransportResponse};
pub use xml::{XmlDocument, XmlMap, XmlValue};

#[cfg(any(test, feature = "test-util"))]
pub use transport::MockTransport;

/// Application name reported in `x-amazon-user-agent`.
pub const APPLICATION_NAME: &str = "mws-api/MwsClient";

/// Default application version reported in `x-amazon-user-agent`.
pub const APPLICATION_VERSION: &str = env!("CARGO_PKG_VERSION");
