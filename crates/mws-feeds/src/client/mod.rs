//! Feeds API client.

use mws_client::{ClientConfig, HttpTransport, MwsClient, MwsCredentials, Transport, XmlDocument};

use crate::error::{Error, ErrorKind, Result};

mod fulfillment;
mod inventory;
mod invoice;
mod pricing;
mod products;
mod results;
mod submit;

/// Feeds and shipment-invoicing client.
///
/// Wraps an [`MwsClient`] and adds feed building, submission and result
/// polling on top of it.
///
/// # Example
///
/// ```rust,ignore
/// use mws_feeds::{FeedsClient, FeedOutcome};
///
/// let mut feeds = FeedsClient::from_env()?;
/// let outcome = feeds.update_stock([("SKU-1", 5), ("SKU-2", 0)]).await?;
/// if let FeedOutcome::Submitted(info) = outcome {
///     println!("submitted {}", info.feed_submission_id);
/// }
/// ```
#[derive(Debug)]
pub struct FeedsClient<T = HttpTransport> {
    client: MwsClient<T>,
}

impl FeedsClient<HttpTransport> {
    pub fn new(credentials: MwsCredentials) -> Result<Self> {
        Ok(Self::from_client(MwsClient::new(credentials)?))
    }

    pub fn with_config(credentials: MwsCredentials, config: ClientConfig) -> Result<Self> {
        Ok(Self::from_client(MwsClient::with_config(credentials, config)?))
    }

    /// Create a client from `MWS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_client(MwsClient::from_env()?))
    }
}

impl<T: Transport> FeedsClient<T> {
    /// Wrap an existing core client.
    pub fn from_client(client: MwsClient<T>) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &MwsClient<T> {
        &self.client
    }

    pub fn inner_mut(&mut self) -> &mut MwsClient<T> {
        &mut self.client
    }

    pub fn into_inner(self) -> MwsClient<T> {
        self.client
    }

    /// Make the next feed submission return its body instead of sending it.
    pub fn debug_next_feed(&mut self) -> &mut Self {
        self.client.debug_next_feed();
        self
    }
}

/// Element at `path` or an invalid-response error naming it.
pub(crate) fn required<'a>(
    doc: &'a XmlDocument,
    path: &[&str],
) -> Result<&'a mws_client::XmlValue> {
    doc.path(path).ok_or_else(|| {
        Error::new(ErrorKind::InvalidResponse(format!(
            "{} missing from {}",
            path.join("/"),
            doc.root
        )))
    })
}
