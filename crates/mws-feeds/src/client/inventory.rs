use mws_client::Transport;
use tracing::instrument;

use crate::envelope::{FeedEnvelope, FeedMessage, MessageType, OperationType};
use crate::error::Result;
use crate::messages::InventoryUpdate;
use crate::types::{FeedOutcome, SubmitFeedOptions, POST_INVENTORY_AVAILABILITY_DATA};

impl<T: Transport> super::FeedsClient<T> {
    /// Submit an inventory availability feed.
    #[instrument(skip(self, updates), fields(count = updates.len()))]
    pub async fn post_inventory_availability(
        &mut self,
        updates: &[InventoryUpdate],
    ) -> Result<FeedOutcome> {
        let mut envelope = FeedEnvelope::new(MessageType::Inventory);
        for update in updates {
            envelope.push(FeedMessage::new(OperationType::Update, update.to_xml_value()));
        }
        self.submit_envelope(
            POST_INVENTORY_AVAILABILITY_DATA,
            &envelope,
            SubmitFeedOptions::default(),
        )
        .await
    }

    /// Set the quantity of each SKU.
    pub async fn update_stock<I, S>(&mut self, stock: I) -> Result<FeedOutcome>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let updates: Vec<_> = stock
            .into_iter()
            .map(|(sku, quantity)| InventoryUpdate::quantity(sku, quantity))
            .collect();
        self.post_inventory_availability(&updates).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{client, SUBMIT_FEED_RESPONSE};
    use crate::messages::InventoryUpdate;
    use mws_client::xml::{decode, DecodeOptions};

    #[tokio::test]
    async fn test_update_stock() {
        let (mut feeds, mock) = client();
        mock.push_xml(200, SUBMIT_FEED_RESPONSE);

        feeds.update_stock([("SKU-1", 5), ("SKU-2", 0)]).await.unwrap();

        let sent = mock.last_request().unwrap();
        assert_eq!(sent.query_value("FeedType"), Some("_POST_INVENTORY_AVAILABILITY_DATA_"));

        let body = sent.body.unwrap();
        let doc = decode(&body, &DecodeOptions::new().with_repeated(&["Message"])).unwrap();
        assert_eq!(doc.path_text(&["MessageType"]), Some("Inventory"));
        let messages = doc.get("Message").unwrap().items();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].path_text(&["Inventory", "SKU"]), Some("SKU-1"));
        assert_eq!(messages[0].path_text(&["Inventory", "Quantity"]), Some("5"));
        assert_eq!(messages[1].path_text(&["Inventory", "Quantity"]), Some("0"));
        assert_eq!(messages[1].get_text("OperationType"), Some("Update"));
    }

    #[tokio::test]
    async fn test_inventory_with_latency_and_lookup() {
        let (mut feeds, mock) = client();
        mock.push_xml(200, SUBMIT_FEED_RESPONSE);

        let update = InventoryUpdate::quantity("SKU-1", 3)
            .with_fulfillment_latency(4)
            .with_lookup("FulfillmentNetwork");
        feeds.post_inventory_availability(&[update]).await.unwrap();

        let body = mock.last_request().unwrap().body.unwrap();
        let doc = decode(&body, &DecodeOptions::new()).unwrap();
        assert_eq!(doc.path_text(&["Message", "Inventory", "FulfillmentLatency"]), Some("4"));
        assert_eq!(doc.path_text(&["Message", "Inventory", "Lookup"]), Some("FulfillmentNetwork"));
    }
}
