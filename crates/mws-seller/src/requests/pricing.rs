use mws_client::{MwsRequest, QueryParams, RequestContext, Result};

use super::{id_list_params, to_strings, MAX_PRICING_IDS};

const ASIN_LIST: &str = "ASINList.ASIN";
const SKU_LIST: &str = "SellerSKUList.SellerSKU";

/// `GetCompetitivePricingForASIN`, up to 20 ASINs.
#[derive(Debug, Clone)]
pub struct GetCompetitivePricingForAsin {
    pub asins: Vec<String>,
}

impl GetCompetitivePricingForAsin {
    pub fn new<I, S>(asins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            asins: to_strings(asins),
        }
    }
}

impl MwsRequest for GetCompetitivePricingForAsin {
    const OPERATION: &'static str = "GetCompetitivePricingForASIN";

    fn to_params(&self, ctx: &RequestContext<'_>) -> Result<QueryParams> {
        id_list_params(ctx, ASIN_LIST, &self.asins, MAX_PRICING_IDS, "ASIN's")
    }
}

/// `GetCompetitivePricingForSKU`, up to 20 SKUs.
#[derive(Debug, Clone)]
pub struct GetCompetitivePricingForSku {
    pub skus: Vec<String>,
}

impl GetCompetitivePricingForSku {
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

impl MwsRequest for GetCompetitivePricingForSku {
    const OPERATION: &'static str = "GetCompetitivePricingForSKU";

    fn to_params(&self, ctx: &RequestContext<'_>) -> Result<QueryParams> {
        id_list_params(ctx, SKU_LIST, &self.skus, MAX_PRICING_IDS, "SKU's")
    }
}

/// `GetLowestPricedOffersForASIN` for one ASIN.
#[derive(Debug, Clone)]
pub struct GetLowestPricedOffersForAsin {
    pub asin: String,
    /// One of New, Used, Collectible, Refurbished or Club.
    pub item_condition: String,
}

impl GetLowestPricedOffersForAsin {
    /// Offers for new items.
    pub fn new(asin: impl Into<String>) -> Self {
        Self {
            asin: asin.into(),
            item_condition: "New".to_string(),
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.item_condition = condition.into();
        self
    }
}

impl MwsRequest for GetLowestPricedOffersForAsin {
    const OPERATION: &'static str = "GetLowestPricedOffersForASIN";

    fn to_params(&self, ctx: &RequestContext<'_>) -> Result<QueryParams> {
        Ok(QueryParams::new()
            .with("MarketplaceId", ctx.marketplace_id())
            .with("ASIN", &self.asin)
            .with("ItemCondition", &self.item_condition))
    }
}

/// `GetMyPriceForSKU`, up to 20 SKUs.
#[derive(Debug, Clone)]
pub struct GetMyPriceForSku {
    pub skus: Vec<String>,
    pub item_condition: Option<String>,
}

impl GetMyPriceForSku {
    pub fn new<I, S>(skus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skus: to_strings(skus),
            item_condition: None,
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.item_condition = Some(condition.into());
        self
    }
}

impl MwsRequest for GetMyPriceForSku {
    const OPERATION: &'static str = "GetMyPriceForSKU";

    fn to_params(&self, ctx: &RequestContext<'_>) -> Result<QueryParams> {
        let mut params = id_list_params(ctx, SKU_LIST, &self.skus, MAX_PRICING_IDS, "SKU's")?;
        params.insert_opt("ItemCondition", self.item_condition.as_ref());
        Ok(params)
    }
}

/// `GetMyPriceForASIN`, up to 20 ASINs.
#[derive(Debug, Clone)]
pub struct GetMyPriceForAsin {
    pub asins: Vec<String>,
    pub item_condition: Option<String>,
}

impl GetMyPriceForAsin {
    pub fn new<I, S>(asins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            asins: to_strings(asins),
            item_condition: None,
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.item_condition = Some(condition.into());
        self
    }
}

impl MwsRequest for GetMyPriceForAsin {
    const OPERATION: &'static str = "GetMyPriceForASIN";

    fn to_params(&self, ctx: &RequestContext<'_>) -> Result<QueryParams> {
        let mut params = id_list_params(ctx, ASIN_LIST, &self.asins, MAX_PRICING_IDS, "ASIN's")?;
        params.insert_opt("ItemCondition", self.item_condition.as_ref());
        Ok(params)
    }
}

/// `GetLowestOfferListingsForASIN`, up to 20 ASINs.
#[derive(Debug, Clone)]
pub struct GetLowestOfferListingsForAsin {
    pub asins: Vec<String>,
    pub item_condition: Option<String>,
}

impl GetLowestOfferListingsForAsin {
    pub fn new<I, S>(asins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            asins: to_strings(asins),
            item_condition: None,
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.item_condition = Some(condition.into());
        self
    }
}

impl MwsRequest for GetLowestOfferListingsForAsin {
    const OPERATION: &'static str = "GetLowestOfferListingsForASIN";

    fn to_params(&self, ctx: &RequestContext<'_>) -> Result<QueryParams> {
        let mut params = id_list_params(ctx, ASIN_LIST, &self.asins, MAX_PRICING_IDS, "ASIN's")?;
        params.insert_opt("ItemCondition", self.item_condition.as_ref());
        Ok(params)
    }
}
