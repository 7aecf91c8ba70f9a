//! Order paging and seller calls over HTTP.

use chrono::{TimeZone, Utc};
use mws_api::seller::{GetCompetitivePricingForAsin, NotificationType};
use mws_api::{ListOrders, SellerClient};

use super::common::*;

const FIRST_PAGE: &str = r#"<ListOrdersResponse xmlns="https://mws.amazonservices.com/Orders/2013-09-01">
  <ListOrdersResult>
    <NextToken>2YgYW55IGNhcm5hbCBwbGVhcw==</NextToken>
    <Orders>
      <Order>
        <AmazonOrderId>028-0000001-0000001</AmazonOrderId>
        <OrderStatus>Unshipped</OrderStatus>
        <OrderTotal><CurrencyCode>EUR</CurrencyCode><Amount>24.90</Amount></OrderTotal>
        <NumberOfItemsUnshipped>1</NumberOfItemsUnshipped>
      </Order>
      <Order>
        <AmazonOrderId>028-0000002-0000002</AmazonOrderId>
        <OrderStatus>PartiallyShipped</OrderStatus>
      </Order>
    </Orders>
  </ListOrdersResult>
</ListOrdersResponse>"#;

const LAST_PAGE: &str = r#"<ListOrdersByNextTokenResponse xmlns="https://mws.amazonservices.com/Orders/2013-09-01">
  <ListOrdersByNextTokenResult>
    <Orders>
      <Order>
        <AmazonOrderId>028-0000003-0000003</AmazonOrderId>
        <OrderStatus>Unshipped</OrderStatus>
      </Order>
    </Orders>
  </ListOrdersByNextTokenResult>
</ListOrdersByNextTokenResponse>"#;

#[tokio::test]
async fn test_list_orders_follows_next_token() {
    init_tracing();
    let server = wiremock::MockServer::start().await;
    respond_xml(&server, "ListOrders", 200, FIRST_PAGE).await;
    respond_xml(&server, "ListOrdersByNextToken", 200, LAST_PAGE).await;

    let mut seller = SellerClient::with_config(credentials(), config(&server)).unwrap();
    let since = Utc.with_ymd_and_hms(2020, 1, 15, 8, 0, 0).unwrap();

    let mut page = seller.list_orders(ListOrders::new(since)).await.unwrap();
    let mut ids: Vec<String> = page.orders.iter().map(|o| o.amazon_order_id.clone()).collect();
    while let Some(token) = page.next_token.take() {
        page = seller.list_orders_by_next_token(&token).await.unwrap();
        ids.extend(page.orders.iter().map(|o| o.amazon_order_id.clone()));
    }

    assert_eq!(
        ids,
        vec!["028-0000001-0000001", "028-0000002-0000002", "028-0000003-0000003"]
    );

    let requests = received(&server).await;
    assert_eq!(requests.len(), 2);

    let first = &requests[0];
    assert_eq!(first.url.path(), "/Orders/2013-09-01");
    assert_eq!(query_value(first, "CreatedAfter").as_deref(), Some("2020-01-15T08:00:00.000Z"));
    assert_eq!(query_value(first, "OrderStatus.Status.1").as_deref(), Some("Unshipped"));
    assert_eq!(query_value(first, "OrderStatus.Status.2").as_deref(), Some("PartiallyShipped"));
    assert_eq!(query_value(first, "FulfillmentChannel.Channel.1").as_deref(), Some("MFN"));

    let second = &requests[1];
    assert_eq!(
        query_value(second, "NextToken").as_deref(),
        Some("2YgYW55IGNhcm5hbCBwbGVhcw==")
    );
}

#[tokio::test]
async fn test_competitive_pricing_limit_is_checked_locally() {
    let server = wiremock::MockServer::start().await;
    let mut seller = SellerClient::with_config(credentials(), config(&server)).unwrap();

    let asins: Vec<String> = (0..21).map(|i| format!("B0000000{i:02}")).collect();
    let err = seller
        .competitive_pricing_for_asin(GetCompetitivePricingForAsin::new(asins))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert!(err.to_string().contains("Maximum amount of ASIN's for this call is 20"));
    assert!(received(&server).await.is_empty());
}

#[tokio::test]
async fn test_unknown_notification_type() {
    let err = "AnyOfferChangedX".parse::<NotificationType>().unwrap_err();
    assert!(err.is_validation());
}
