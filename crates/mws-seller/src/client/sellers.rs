use tracing::instrument;

use mws_client::{Transport, XmlValue};

use crate::error::{Error, ErrorKind, Result};
use crate::requests::{ListInventorySupply, ListMarketplaceParticipations, ListRecommendations};
use crate::types::{InventorySupply, MarketplaceParticipations};

impl<T: Transport> super::SellerClient<T> {
    /// FBA inventory supply of up to 50 SKUs.
    #[instrument(skip(self, request))]
    pub async fn list_inventory_supply(
        &mut self,
        request: ListInventorySupply,
    ) -> Result<Vec<InventorySupply>> {
        let doc = self.client.send_xml(&request).await?;
        Ok(doc
            .path(&["ListInventorySupplyResult", "InventorySupplyList", "member"])
            .map(|members| members.items().into_iter().map(InventorySupply::from_xml).collect())
            .unwrap_or_default())
    }

    /// Marketplaces the seller participates in.
    #[instrument(skip(self))]
    pub async fn list_marketplace_participations(&mut self) -> Result<MarketplaceParticipations> {
        let doc = self.client.send_xml(&ListMarketplaceParticipations).await?;
        let result = doc.get("ListMarketplaceParticipationsResult").ok_or_else(|| {
            Error::new(ErrorKind::InvalidResponse(format!(
                "ListMarketplaceParticipationsResult missing from {}",
                doc.root
            )))
        })?;
        Ok(MarketplaceParticipations::from_result(result))
    }

    /// Selling recommendations, optionally for one category. Returns the
    /// decoded `ListRecommendationsResult`.
    #[instrument(skip(self))]
    pub async fn list_recommendations(
        &mut self,
        category: Option<&str>,
    ) -> Result<Option<XmlValue>> {
        let request = ListRecommendations {
            category: category.map(str::to_string),
        };
        let doc = self.client.send_xml(&request).await?;
        Ok(doc.get("ListRecommendationsResult").cloned())
    }
}
