//! Typed operation requests.

use crate::credentials::MwsCredentials;
use crate::error::Result;
use crate::marketplace::{Marketplace, MarketplaceRegistry};
use crate::negotiate::RequestBody;
use crate::query::QueryParams;

/// What a request needs to know about the client to shape its parameters.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub credentials: &'a MwsCredentials,
    pub marketplace: &'a Marketplace,
    pub registry: &'a MarketplaceRegistry,
}

impl RequestContext<'_> {
    pub fn seller_id(&self) -> &str {
        self.credentials.seller_id()
    }

    pub fn marketplace_id(&self) -> &str {
        self.marketplace.id()
    }
}

/// An operation request that knows how to turn itself into parameters.
///
/// `to_params` runs before any I/O, so batch limits and other input checks
/// belong there.
pub trait MwsRequest {
    /// Name of the operation in the descriptor table.
    const OPERATION: &'static str;

    /// Operation parameters, merged over the common ones.
    fn to_params(&self, ctx: &RequestContext<'_>) -> Result<QueryParams>;

    /// Request body for body-bearing operations.
    fn body(&self, _ctx: &RequestContext<'_>) -> Result<Option<RequestBody>> {
        Ok(None)
    }
}
