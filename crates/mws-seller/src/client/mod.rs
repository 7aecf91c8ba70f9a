//! Seller operations client.

use mws_client::{ClientConfig, HttpTransport, MwsClient, MwsCredentials, Transport};

use crate::error::Result;

mod finances;
mod orders;
mod pricing;
mod products;
mod sellers;
mod subscriptions;

/// Client for the read-side seller APIs and notification subscriptions.
///
/// Wraps an [`MwsClient`]; every call goes through its signing pipeline and
/// the raw response of the latest call stays available through
/// [`inner`](Self::inner).
///
/// # Example
///
/// ```rust,ignore
/// use chrono::{Duration, Utc};
/// use mws_seller::{ListOrders, SellerClient};
///
/// let mut seller = SellerClient::from_env()?;
/// let mut page = seller
///     .list_orders(ListOrders::new(Utc::now() - Duration::days(2)))
///     .await?;
/// loop {
///     for order in &page.orders {
///         println!("{} {}", order.amazon_order_id, order.order_status);
///     }
///     match page.next_token.take() {
///         Some(token) => page = seller.list_orders_by_next_token(&token).await?,
///         None => break,
///     }
/// }
/// ```
#[derive(Debug)]
pub struct SellerClient<T = HttpTransport> {
    client: MwsClient<T>,
}

impl SellerClient<HttpTransport> {
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

impl<T: Transport> SellerClient<T> {
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

    /// Check the credentials against MWS. See
    /// [`MwsClient::validate_credentials`].
    pub async fn validate_credentials(&mut self) -> Result<bool> {
        Ok(self.client.validate_credentials().await?)
    }
}
