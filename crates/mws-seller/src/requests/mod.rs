//! Typed requests for the seller operations.
//!
//! Each request implements [`MwsRequest`](mws_client::MwsRequest) and can be
//! sent through [`MwsClient::send`](mws_client::MwsClient::send) directly.
//! Batch limits are checked while building the parameters, so an oversized
//! request fails before anything goes over the wire.

mod finances;
mod orders;
mod pricing;
mod products;
mod sellers;
mod subscriptions;

pub use finances::*;
pub use orders::*;
pub use pricing::*;
pub use products::*;
pub use sellers::*;
pub use subscriptions::*;

use mws_client::query::ensure_max_items;
use mws_client::{QueryParams, RequestContext, Result};

/// Most ids a pricing lookup accepts.
pub const MAX_PRICING_IDS: usize = 20;

/// Most ids `GetMatchingProductForId` accepts.
pub const MAX_MATCHING_PRODUCT_IDS: usize = 5;

/// Most SKUs `ListInventorySupply` accepts.
pub const MAX_INVENTORY_SUPPLY_SKUS: usize = 50;

fn to_strings<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

/// `MarketplaceId` plus an indexed id list, after checking the batch size.
fn id_list_params(
    ctx: &RequestContext<'_>,
    prefix: &str,
    ids: &[String],
    max: usize,
    what: &str,
) -> Result<QueryParams> {
    ensure_max_items(ids, max, what)?;
    let mut params = QueryParams::new().with("MarketplaceId", ctx.marketplace_id());
    params.insert_list(prefix, ids);
    Ok(params)
}
