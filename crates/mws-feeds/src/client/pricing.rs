use mws_client::Transport;
use tracing::instrument;

use crate::envelope::{FeedEnvelope, FeedMessage, MessageType, OperationType};
use crate::error::Result;
use crate::messages::PriceUpdate;
use crate::types::{FeedOutcome, SubmitFeedOptions, POST_PRODUCT_PRICING_DATA};

impl<T: Transport> super::FeedsClient<T> {
    /// Submit a price feed.
    #[instrument(skip(self, prices), fields(count = prices.len()))]
    pub async fn update_price(&mut self, prices: &[PriceUpdate]) -> Result<FeedOutcome> {
        let mut envelope = FeedEnvelope::new(MessageType::Price);
        for price in prices {
            envelope.push(FeedMessage::new(OperationType::Update, price.to_xml_value()));
        }
        self.submit_envelope(POST_PRODUCT_PRICING_DATA, &envelope, SubmitFeedOptions::default())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::client;
    use crate::messages::PriceUpdate;
    use crate::types::FeedOutcome;
    use chrono::{TimeZone, Utc};
    use mws_client::xml::{decode, DecodeOptions};

    #[tokio::test]
    async fn test_price_feed_in_debug_mode() {
        let (mut feeds, mock) = client();
        feeds.debug_next_feed();

        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 6, 8, 0, 0, 0).unwrap();
        let prices = [
            PriceUpdate::new("SKU-1", "19.99").with_sale("15.00", start, end),
            PriceUpdate::new("SKU-2", "7.50").with_currency("EUR"),
        ];

        let outcome = feeds.update_price(&prices).await.unwrap();
        let FeedOutcome::Debug(body) = outcome else {
            panic!("expected debug outcome");
        };
        assert_eq!(mock.request_count(), 0);

        let doc = decode(&body.content, &DecodeOptions::new()).unwrap();
        let messages = doc.get("Message").unwrap().items();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].get_text("OperationType"), Some("Update"));
        assert_eq!(
            messages[0].path(&["Price", "StandardPrice"]).and_then(|p| p.attribute("currency")),
            Some("DEFAULT")
        );
        assert_eq!(
            messages[0].path_text(&["Price", "Sale", "StartDate"]),
            Some("2024-06-01T00:00:00.000Z")
        );
        assert_eq!(
            messages[1].path(&["Price", "StandardPrice"]).and_then(|p| p.attribute("currency")),
            Some("EUR")
        );
    }
}
