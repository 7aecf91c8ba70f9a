use mws_client::{Transport, XmlValue};
use tracing::instrument;

use crate::envelope::{FeedEnvelope, FeedMessage, MessageType, OperationType};
use crate::error::Result;
use crate::flat_file::{FlatFileFeed, FlatFileRecord};
use crate::types::{FeedOutcome, SubmitFeedOptions, POST_FLAT_FILE_LISTINGS_DATA, POST_PRODUCT_DATA};

impl<T: Transport> super::FeedsClient<T> {
    /// Delete listings by SKU.
    #[instrument(skip(self, skus), fields(count = skus.len()))]
    pub async fn delete_products_by_sku<S: AsRef<str>>(
        &mut self,
        skus: &[S],
    ) -> Result<FeedOutcome> {
        let mut envelope = FeedEnvelope::new(MessageType::Product);
        for sku in skus {
            let payload = XmlValue::map([("SKU", XmlValue::text(sku.as_ref()))]);
            envelope.push(FeedMessage::new(OperationType::Delete, payload));
        }
        self.submit_envelope(POST_PRODUCT_DATA, &envelope, SubmitFeedOptions::default())
            .await
    }

    /// Create or update listings through a flat-file feed.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn post_product<R: FlatFileRecord>(&mut self, records: &[R]) -> Result<FeedOutcome> {
        let feed = FlatFileFeed::from_records(records)?;
        self.post_flat_file(&feed).await
    }

    /// Submit a prepared flat-file feed, e.g. one with a custom template.
    pub async fn post_flat_file(&mut self, feed: &FlatFileFeed) -> Result<FeedOutcome> {
        let body = feed.to_request_body(self.client.marketplace().feed_charset())?;
        self.submit_feed(POST_FLAT_FILE_LISTINGS_DATA, body, SubmitFeedOptions::default())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{client, client_for, SUBMIT_FEED_RESPONSE};
    use crate::flat_file::{FlatFileFeed, ListingProduct};
    use mws_client::marketplace::MEXICO;
    use mws_client::xml::{decode, DecodeOptions};

    #[tokio::test]
    async fn test_delete_products() {
        let (mut feeds, mock) = client();
        mock.push_xml(200, SUBMIT_FEED_RESPONSE);

        feeds.delete_products_by_sku(&["A", "B", "C"]).await.unwrap();

        let sent = mock.last_request().unwrap();
        assert_eq!(sent.query_value("FeedType"), Some("_POST_PRODUCT_DATA_"));
        let doc = decode(sent.body.as_deref().unwrap(), &DecodeOptions::new()).unwrap();
        let messages = doc.get("Message").unwrap().items();
        assert_eq!(messages.len(), 3);
        assert!(messages.iter().all(|m| m.get_text("OperationType") == Some("Delete")));
        assert_eq!(messages[2].path_text(&["Product", "SKU"]), Some("C"));
    }

    #[tokio::test]
    async fn test_post_product_flat_file() {
        let (mut feeds, mock) = client_for(MEXICO);
        mock.push_xml(200, SUBMIT_FEED_RESPONSE);

        let products = [
            ListingProduct::new("SKU-1", "B000000001", "99.00").with_quantity(2),
            ListingProduct::new("SKU-2", "B000000002", "12.50").with_title("Cañón"),
        ];
        feeds.post_product(&products).await.unwrap();

        let sent = mock.last_request().unwrap();
        assert_eq!(sent.query_value("FeedType"), Some("_POST_FLAT_FILE_LISTINGS_DATA_"));
        assert_eq!(
            sent.header("Content-Type"),
            Some("text/tab-separated-values; charset=UTF-8")
        );

        let text = String::from_utf8(sent.body.unwrap().to_vec()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("TemplateType=Custom"));
        assert!(lines[4].contains("Cañón"));
    }

    #[tokio::test]
    async fn test_post_flat_file_with_template() {
        let (mut feeds, mock) = client();
        feeds.debug_next_feed();

        let feed = FlatFileFeed::from_records(&[ListingProduct::new("S", "B", 1)])
            .unwrap()
            .with_template("Offer", "2014.0703", "T2ZmZXI=");
        let outcome = feeds.post_flat_file(&feed).await.unwrap();

        let body = outcome.debug_body().unwrap();
        let text = body.as_text();
        let metadata = "TemplateType=Offer\tVersion=2014.0703\tTemplateSignature=T2ZmZXI=";
        assert!(text.starts_with(metadata));
        assert_eq!(mock.request_count(), 0);
    }
}
