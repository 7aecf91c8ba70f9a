use mws_client::Transport;
use tracing::instrument;

use crate::envelope::{FeedEnvelope, FeedMessage, MessageType, OperationType};
use crate::error::Result;
use crate::messages::OrderFulfillment;
use crate::types::{FeedOutcome, SubmitFeedOptions, POST_ORDER_FULFILLMENT_DATA};

impl<T: Transport> super::FeedsClient<T> {
    /// Confirm shipment of one order.
    ///
    /// Fails before any request if neither carrier code nor carrier name is set.
    #[instrument(skip(self, fulfillment), fields(order_id = %fulfillment.amazon_order_id))]
    pub async fn set_delivery_state(
        &mut self,
        fulfillment: &OrderFulfillment,
    ) -> Result<FeedOutcome> {
        self.confirm_shipments(std::slice::from_ref(fulfillment)).await
    }

    /// Confirm shipment of several orders in one feed.
    pub async fn confirm_shipments(
        &mut self,
        fulfillments: &[OrderFulfillment],
    ) -> Result<FeedOutcome> {
        let mut envelope = FeedEnvelope::new(MessageType::OrderFulfillment);
        for fulfillment in fulfillments {
            envelope.push(FeedMessage::new(OperationType::Update, fulfillment.to_xml_value()?));
        }
        self.submit_envelope(POST_ORDER_FULFILLMENT_DATA, &envelope, SubmitFeedOptions::default())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{client, SUBMIT_FEED_RESPONSE};
    use crate::messages::OrderFulfillment;
    use mws_client::xml::{decode, DecodeOptions};

    #[tokio::test]
    async fn test_set_delivery_state() {
        let (mut feeds, mock) = client();
        mock.push_xml(200, SUBMIT_FEED_RESPONSE);

        let fulfillment = OrderFulfillment::new("028-1234567-1234567")
            .with_carrier_name("DHL")
            .with_tracking_number("00340434161094042557");
        feeds.set_delivery_state(&fulfillment).await.unwrap();

        let sent = mock.last_request().unwrap();
        assert_eq!(sent.query_value("FeedType"), Some("_POST_ORDER_FULFILLMENT_DATA_"));
        let doc = decode(sent.body.as_deref().unwrap(), &DecodeOptions::new()).unwrap();
        assert_eq!(doc.path_text(&["MessageType"]), Some("OrderFulfillment"));
        let order = doc.path(&["Message", "OrderFulfillment"]).unwrap();
        assert_eq!(order.get_text("AmazonOrderID"), Some("028-1234567-1234567"));
        assert_eq!(order.path_text(&["FulfillmentData", "CarrierName"]), Some("DHL"));
        assert_eq!(order.path_text(&["FulfillmentData", "CarrierCode"]), None);
    }

    #[tokio::test]
    async fn test_missing_carrier_sends_nothing() {
        let (mut feeds, mock) = client();
        let err = feeds
            .set_delivery_state(&OrderFulfillment::new("028-1"))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(mock.request_count(), 0);
    }
}
