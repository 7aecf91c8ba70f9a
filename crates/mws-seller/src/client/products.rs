use tracing::{debug, instrument};

use mws_client::{Transport, XmlValue};

use crate::error::Result;
use crate::requests::{
    GetMatchingProductForId, GetProductCategoriesForAsin, GetProductCategoriesForSku,
    ListMatchingProducts,
};
use crate::types::{MatchingProducts, ProductCategory};

impl<T: Transport> super::SellerClient<T> {
    /// Look up catalog products by id.
    ///
    /// `ItemAttributes` of the returned products carry their locale as a
    /// `Language` child.
    #[instrument(skip(self, request))]
    pub async fn get_matching_product_for_id(
        &mut self,
        request: GetMatchingProductForId,
    ) -> Result<MatchingProducts> {
        let doc = self.client.send_xml(&request).await?;
        let results = doc
            .get("GetMatchingProductForIdResult")
            .map(XmlValue::items)
            .unwrap_or_default();
        let matches = MatchingProducts::from_results(results);
        debug!(
            found = matches.found.len(),
            not_found = matches.not_found.len(),
            "Matched products"
        );
        Ok(matches)
    }

    /// Search the catalog. Returns the matching `Product` elements in
    /// relevance order.
    #[instrument(skip(self, request))]
    pub async fn list_matching_products(
        &mut self,
        request: ListMatchingProducts,
    ) -> Result<Vec<XmlValue>> {
        let doc = self.client.send_xml(&request).await?;
        Ok(doc
            .path(&["ListMatchingProductsResult", "Products", "Product"])
            .map(|products| products.items().into_iter().cloned().collect())
            .unwrap_or_default())
    }

    /// Categories a SKU belongs to. Empty when MWS returns none.
    #[instrument(skip(self))]
    pub async fn product_categories_for_sku(
        &mut self,
        seller_sku: &str,
    ) -> Result<Vec<ProductCategory>> {
        let request = GetProductCategoriesForSku {
            seller_sku: seller_sku.to_string(),
        };
        let doc = self.client.send_xml(&request).await?;
        Ok(categories(doc.get("GetProductCategoriesForSKUResult")))
    }

    /// Categories an ASIN belongs to. Empty when MWS returns none.
    #[instrument(skip(self))]
    pub async fn product_categories_for_asin(
        &mut self,
        asin: &str,
    ) -> Result<Vec<ProductCategory>> {
        let request = GetProductCategoriesForAsin {
            asin: asin.to_string(),
        };
        let doc = self.client.send_xml(&request).await?;
        Ok(categories(doc.get("GetProductCategoriesForASINResult")))
    }
}

fn categories(result: Option<&XmlValue>) -> Vec<ProductCategory> {
    result
        .and_then(|result| result.get("Self"))
        .map(|entries| entries.items().into_iter().map(ProductCategory::from_xml).collect())
        .unwrap_or_default()
}
