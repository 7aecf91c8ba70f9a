use std::collections::BTreeMap;

use tracing::instrument;

use mws_client::{Transport, XmlDocument, XmlValue};

use crate::error::Result;
use crate::requests::{
    GetCompetitivePricingForAsin, GetCompetitivePricingForSku, GetLowestOfferListingsForAsin,
    GetLowestPricedOffersForAsin, GetMyPriceForAsin, GetMyPriceForSku,
};
use crate::types::{
    competitive_price, lowest_offer_listings, my_offers, sales_ranks, PriceInfo,
    SkuCompetitivePricing,
};

/// Per-id result elements of a batch pricing response.
fn results<'a>(doc: &'a XmlDocument, element: &str) -> Vec<&'a XmlValue> {
    doc.get(element).map(XmlValue::items).unwrap_or_default()
}

fn product_asin(result: &XmlValue) -> Option<&str> {
    result
        .path_text(&["Product", "Identifiers", "MarketplaceASIN", "ASIN"])
        .or_else(|| result.attribute("ASIN"))
}

impl<T: Transport> super::SellerClient<T> {
    /// Competitive price per ASIN. ASINs without one are left out.
    #[instrument(skip(self, request))]
    pub async fn competitive_pricing_for_asin(
        &mut self,
        request: GetCompetitivePricingForAsin,
    ) -> Result<BTreeMap<String, PriceInfo>> {
        let doc = self.client.send_xml(&request).await?;
        Ok(results(&doc, "GetCompetitivePricingForASINResult")
            .into_iter()
            .filter_map(|result| {
                let product = result.get("Product")?;
                let asin = product_asin(result)?;
                Some((asin.to_string(), competitive_price(product)?))
            })
            .collect())
    }

    /// Competitive price and sales ranks per SKU. SKUs without a competitive
    /// price are left out.
    #[instrument(skip(self, request))]
    pub async fn competitive_pricing_for_sku(
        &mut self,
        request: GetCompetitivePricingForSku,
    ) -> Result<BTreeMap<String, SkuCompetitivePricing>> {
        let doc = self.client.send_xml(&request).await?;
        Ok(results(&doc, "GetCompetitivePricingForSKUResult")
            .into_iter()
            .filter_map(|result| {
                let product = result.get("Product")?;
                let sku = product
                    .path_text(&["Identifiers", "SKUIdentifier", "SellerSKU"])
                    .or_else(|| result.attribute("SellerSKU"))?;
                let pricing = SkuCompetitivePricing {
                    price: competitive_price(product)?,
                    sales_ranks: sales_ranks(product),
                };
                Some((sku.to_string(), pricing))
            })
            .collect())
    }

    /// Lowest priced offers for one ASIN, as the decoded
    /// `GetLowestPricedOffersForASINResult` element.
    #[instrument(skip(self, request))]
    pub async fn lowest_priced_offers_for_asin(
        &mut self,
        request: GetLowestPricedOffersForAsin,
    ) -> Result<Option<XmlValue>> {
        let doc = self.client.send_xml(&request).await?;
        Ok(doc.value.get("GetLowestPricedOffersForASINResult").cloned())
    }

    /// Own offers per SKU; `None` for SKUs MWS could not answer.
    #[instrument(skip(self, request))]
    pub async fn my_price_for_sku(
        &mut self,
        request: GetMyPriceForSku,
    ) -> Result<BTreeMap<String, Option<Vec<XmlValue>>>> {
        let doc = self.client.send_xml(&request).await?;
        Ok(results(&doc, "GetMyPriceForSKUResult")
            .into_iter()
            .filter_map(|result| {
                let sku = result.attribute("SellerSKU")?;
                Some((sku.to_string(), my_offers(result)))
            })
            .collect())
    }

    /// Own offers per ASIN; `None` for ASINs MWS could not answer.
    #[instrument(skip(self, request))]
    pub async fn my_price_for_asin(
        &mut self,
        request: GetMyPriceForAsin,
    ) -> Result<BTreeMap<String, Option<Vec<XmlValue>>>> {
        let doc = self.client.send_xml(&request).await?;
        Ok(results(&doc, "GetMyPriceForASINResult")
            .into_iter()
            .filter_map(|result| {
                let asin = result.attribute("ASIN")?;
                Some((asin.to_string(), my_offers(result)))
            })
            .collect())
    }

    /// Lowest offer listings per ASIN; `None` when there are none.
    #[instrument(skip(self, request))]
    pub async fn lowest_offer_listings_for_asin(
        &mut self,
        request: GetLowestOfferListingsForAsin,
    ) -> Result<BTreeMap<String, Option<Vec<XmlValue>>>> {
        let doc = self.client.send_xml(&request).await?;
        Ok(results(&doc, "GetLowestOfferListingsForASINResult")
            .into_iter()
            .filter_map(|result| {
                let asin = product_asin(result)?;
                Some((asin.to_string(), lowest_offer_listings(result)))
            })
            .collect())
    }
}
