use mws_client::query::ensure_max_items;
use mws_client::{MwsRequest, QueryParams, RequestContext, Result};

use super::{to_strings, MAX_INVENTORY_SUPPLY_SKUS};

/// `ListInventorySupply`: FBA supply for up to 50 SKUs.
#[derive(Debug, Clone)]
pub struct ListInventorySupply {
    pub skus: Vec<String>,
}

impl ListInventorySupply {
    pub fn new<I, S>(skus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skus: to_strings(skus),
        }
    }
}

impl MwsRequest for ListInventorySupply {
    const OPERATION: &'static str = "ListInventorySupply";

    fn to_params(&self, ctx: &RequestContext<'_>) -> Result<QueryParams> {
        ensure_max_items(&self.skus, MAX_INVENTORY_SUPPLY_SKUS, "SKU's")?;
        let mut params = QueryParams::new().with("MarketplaceId", ctx.marketplace_id());
        params.insert_list("SellerSkus.member", &self.skus);
        Ok(params)
    }
}

/// `ListMarketplaceParticipations`
#[derive(Debug, Clone, Copy, Default)]
pub struct ListMarketplaceParticipations;

impl MwsRequest for ListMarketplaceParticipations {
    const OPERATION: &'static str = "ListMarketplaceParticipations";

    fn to_params(&self, _ctx: &RequestContext<'_>) -> Result<QueryParams> {
        Ok(QueryParams::new())
    }
}

/// `ListRecommendations`
#[derive(Debug, Clone, Default)]
pub struct ListRecommendations {
    /// For example `Inventory`, `Selection`, `Pricing`, `Fulfillment`,
    /// `ListingQuality`, `GlobalSelling` or `Advertising`.
    pub category: Option<String>,
}

impl MwsRequest for ListRecommendations {
    const OPERATION: &'static str = "ListRecommendations";

    fn to_params(&self, ctx: &RequestContext<'_>) -> Result<QueryParams> {
        let mut params = QueryParams::new().with("MarketplaceId", ctx.marketplace_id());
        params.insert_opt("RecommendationCategory", self.category.as_ref());
        Ok(params)
    }
}
