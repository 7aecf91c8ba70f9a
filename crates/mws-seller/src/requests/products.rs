use mws_client::query::ensure_max_items;
use mws_client::{Error, MwsRequest, QueryParams, RequestContext, Result};

use super::MAX_MATCHING_PRODUCT_IDS;

/// `GetMatchingProductForId`: catalog lookup by ASIN, SellerSKU, UPC, EAN,
/// ISBN, JAN or GCID.
#[derive(Debug, Clone)]
pub struct GetMatchingProductForId {
    /// Distinct ids in first-seen order.
    pub ids: Vec<String>,
    pub id_type: String,
}

impl GetMatchingProductForId {
    /// Duplicate ids are dropped.
    pub fn new<I, S>(ids: I, id_type: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for id in ids {
            let id = id.into();
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Self {
            ids: unique,
            id_type: id_type.into(),
        }
    }

    pub fn asins<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ids, "ASIN")
    }
}

impl MwsRequest for GetMatchingProductForId {
    const OPERATION: &'static str = "GetMatchingProductForId";

    fn to_params(&self, ctx: &RequestContext<'_>) -> Result<QueryParams> {
        ensure_max_items(&self.ids, MAX_MATCHING_PRODUCT_IDS, "id's")?;
        let mut params = QueryParams::new()
            .with("MarketplaceId", ctx.marketplace_id())
            .with("IdType", &self.id_type);
        params.insert_list("IdList.Id", &self.ids);
        Ok(params)
    }
}

/// `ListMatchingProducts`: free-text catalog search.
#[derive(Debug, Clone)]
pub struct ListMatchingProducts {
    pub query: String,
    pub query_context_id: Option<String>,
}

impl ListMatchingProducts {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            query_context_id: None,
        }
    }

    pub fn in_context(mut self, query_context_id: impl Into<String>) -> Self {
        self.query_context_id = Some(query_context_id.into());
        self
    }
}

impl MwsRequest for ListMatchingProducts {
    const OPERATION: &'static str = "ListMatchingProducts";

    fn to_params(&self, ctx: &RequestContext<'_>) -> Result<QueryParams> {
        if self.query.trim().is_empty() {
            return Err(Error::validation("Missing query"));
        }
        let mut params = QueryParams::new()
            .with("MarketplaceId", ctx.marketplace_id())
            .with("Query", &self.query);
        params.insert_opt("QueryContextId", self.query_context_id.as_ref());
        Ok(params)
    }
}

/// `GetProductCategoriesForSKU`
#[derive(Debug, Clone)]
pub struct GetProductCategoriesForSku {
    pub seller_sku: String,
}

impl MwsRequest for GetProductCategoriesForSku {
    const OPERATION: &'static str = "GetProductCategoriesForSKU";

    fn to_params(&self, ctx: &RequestContext<'_>) -> Result<QueryParams> {
        Ok(QueryParams::new()
            .with("MarketplaceId", ctx.marketplace_id())
            .with("SellerSKU", &self.seller_sku))
    }
}

/// `GetProductCategoriesForASIN`
#[derive(Debug, Clone)]
pub struct GetProductCategoriesForAsin {
    pub asin: String,
}

impl MwsRequest for GetProductCategoriesForAsin {
    const OPERATION: &'static str = "GetProductCategoriesForASIN";

    fn to_params(&self, ctx: &RequestContext<'_>) -> Result<QueryParams> {
        Ok(QueryParams::new()
            .with("MarketplaceId", ctx.marketplace_id())
            .with("ASIN", &self.asin))
    }
}
