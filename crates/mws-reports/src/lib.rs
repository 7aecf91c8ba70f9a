//! # mws-reports
//!
//! Amazon MWS Reports API.
//!
//! Reports are requested, polled and downloaded in three steps. Tab-delimited
//! reports are decoded into a [`ReportTable`] using the charset announced in
//! the response; XML reports are returned as decoded documents.
//!
//! ## Example
//!
//! ```rust,ignore
//! use mws_reports::{ReportsClient, ReportProcessingStatus};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mws_reports::Error> {
//!     let mut reports = ReportsClient::from_env()?;
//!     let id = reports.request_report("_GET_MERCHANT_LISTINGS_DATA_", None, None).await?;
//!
//!     loop {
//!         let status = reports.report_request_status(&id).await?;
//!         if status.is_some_and(|s| s.report_processing_status.is_terminal()) {
//!             break;
//!         }
//!         tokio::time::sleep(std::time::Duration::from_secs(60)).await;
//!     }
//!
//!     if let Some(content) = reports.get_report(&id, true).await? {
//!         println!("{:?}", content.as_table().map(|t| t.len()));
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::ReportsClient;
pub use error::{Error, ErrorKind, Result};
pub use types::*;
