//! Feed submission over the wire: body digest, charset and debug mode.

use base64::Engine;
use md5::{Digest, Md5};
use mws_api::client::marketplace::GERMANY;
use mws_api::{FeedOutcome, FeedsClient, InventoryUpdate, PriceUpdate};

use super::common::*;

const SUBMIT_FEED_RESPONSE: &str = r#"<?xml version="1.0"?>
<SubmitFeedResponse xmlns="http://mws.amazonaws.com/doc/2009-01-01/">
  <SubmitFeedResult>
    <FeedSubmissionInfo>
      <FeedSubmissionId>50001017</FeedSubmissionId>
      <FeedType>_POST_PRODUCT_PRICING_DATA_</FeedType>
      <SubmittedDate>2020-03-04T10:11:12+00:00</SubmittedDate>
      <FeedProcessingStatus>_SUBMITTED_</FeedProcessingStatus>
    </FeedSubmissionInfo>
  </SubmitFeedResult>
</SubmitFeedResponse>"#;

async fn feeds() -> (wiremock::MockServer, FeedsClient) {
    init_tracing();
    let server = wiremock::MockServer::start().await;
    respond_xml(&server, "SubmitFeed", 200, SUBMIT_FEED_RESPONSE).await;
    let feeds = FeedsClient::with_config(credentials(), config(&server)).unwrap();
    (server, feeds)
}

#[tokio::test]
async fn test_submit_feed_headers_and_query() {
    let (server, mut feeds) = feeds().await;

    let outcome = feeds.update_price(&[PriceUpdate::new("SKU-1", "19.99")]).await.unwrap();
    let info = outcome.submission().unwrap();
    assert_eq!(info.feed_submission_id, "50001017");
    assert!(!info.is_done());

    let requests = received(&server).await;
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    let digest = base64::engine::general_purpose::STANDARD.encode(Md5::digest(&request.body));
    assert_eq!(header(request, "content-md5"), Some(digest));
    assert_eq!(
        header(request, "content-type").as_deref(),
        Some("text/xml; charset=iso-8859-16")
    );

    assert_eq!(query_value(request, "FeedType").as_deref(), Some("_POST_PRODUCT_PRICING_DATA_"));
    assert_eq!(query_value(request, "Merchant").as_deref(), Some(SELLER_ID));
    assert_eq!(query_value(request, "MarketplaceIdList.Id.1").as_deref(), Some(GERMANY));
    assert!(query_value(request, "MarketplaceId.Id.1").is_none());
    assert!(query_value(request, "SellerId").is_none());

    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains("<MerchantIdentifier>A2SELLER000001</MerchantIdentifier>"));
    assert!(body.contains("<SKU>SKU-1</SKU>"));
}

#[tokio::test]
async fn test_body_is_encoded_for_marketplace() {
    let (server, mut feeds) = feeds().await;

    feeds.delete_products_by_sku(&["Käse-1"]).await.unwrap();

    let request = &received(&server).await[0];
    let body = &request.body;
    assert!(body.windows(5).any(|w| w == b"K\xE4se-"), "latin charset byte for the umlaut");
    assert!(!body.windows(2).any(|w| w == b"\xC3\xA4"), "no UTF-8 sequence in the body");
}

#[tokio::test]
async fn test_debug_toggle_skips_one_submission() {
    let (server, mut feeds) = feeds().await;

    feeds.debug_next_feed();
    let first = feeds
        .post_inventory_availability(&[InventoryUpdate::quantity("SKU-1", 2)])
        .await
        .unwrap();
    let FeedOutcome::Debug(body) = first else {
        panic!("expected the body back in debug mode");
    };
    assert!(body.as_text().contains("<Quantity>2</Quantity>"));
    assert!(received(&server).await.is_empty());

    let second = feeds.update_stock([("SKU-1", 3)]).await.unwrap();
    assert!(second.submission().is_some());
    assert_eq!(received(&server).await.len(), 1);
}
