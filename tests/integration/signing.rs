//! Signing, common parameters and error classification over the wire.

use mws_api::client::marketplace::GERMANY;
use mws_api::client::signer;
use mws_api::client::HttpMethod;
use mws_api::{MwsClient, QueryParams, SellerClient};

use super::common::*;

#[tokio::test]
async fn test_signature_matches_wire_query() {
    init_tracing();
    let server = wiremock::MockServer::start().await;
    respond_xml(
        &server,
        "GetOrder",
        200,
        "<GetOrderResponse><GetOrderResult><Orders/></GetOrderResult></GetOrderResponse>",
    )
    .await;

    let mut seller = SellerClient::with_config(credentials(), config(&server)).unwrap();
    seller.get_order("028-1234567-1234567").await.unwrap();

    let requests = received(&server).await;
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.url.path(), "/Orders/2013-09-01");

    let pairs = query(request);
    let (last_key, signature) = pairs.last().unwrap().clone();
    assert_eq!(last_key, "Signature");

    let signed: Vec<(String, String)> = pairs[..pairs.len() - 1].to_vec();
    let mut sorted = signed.clone();
    sorted.sort();
    assert_eq!(signed, sorted, "parameters are sent in canonical order");

    let expected = signer::sign(
        HttpMethod::Post,
        "mws-eu.amazonservices.com",
        "/Orders/2013-09-01",
        &signed,
        SECRET,
    );
    assert_eq!(signature, expected);

    assert_eq!(query_value(request, "AWSAccessKeyId").as_deref(), Some(ACCESS_KEY));
    assert_eq!(query_value(request, "SellerId").as_deref(), Some(SELLER_ID));
    assert_eq!(query_value(request, "SignatureMethod").as_deref(), Some("HmacSHA256"));
    assert_eq!(query_value(request, "SignatureVersion").as_deref(), Some("2"));
    assert_eq!(query_value(request, "Version").as_deref(), Some("2013-09-01"));
    assert_eq!(
        pairs.iter().filter(|(k, _)| k == "MarketplaceId.Id.1").count(),
        1,
        "default marketplace appears exactly once"
    );
    assert_eq!(query_value(request, "MarketplaceId.Id.1").as_deref(), Some(GERMANY));
    assert_eq!(header(request, "accept").as_deref(), Some("application/xml"));
}

#[tokio::test]
async fn test_auth_token_is_sent() {
    let server = wiremock::MockServer::start().await;
    respond_xml(
        &server,
        "ListMarketplaceParticipations",
        200,
        "<ListMarketplaceParticipationsResponse>\
         <ListMarketplaceParticipationsResult/>\
         </ListMarketplaceParticipationsResponse>",
    )
    .await;

    let creds = credentials().with_auth_token("amzn.mws.token");
    let mut seller = SellerClient::with_config(creds, config(&server)).unwrap();
    seller.list_marketplace_participations().await.unwrap();

    let request = &received(&server).await[0];
    assert_eq!(query_value(request, "MWSAuthToken").as_deref(), Some("amzn.mws.token"));
}

#[tokio::test]
async fn test_error_envelope_is_classified() {
    let server = wiremock::MockServer::start().await;
    respond_xml(
        &server,
        "GetOrder",
        400,
        r#"<?xml version="1.0"?>
<ErrorResponse xmlns="https://mws.amazonservices.com/Orders/2013-09-01">
  <Error>
    <Type>Sender</Type>
    <Code>InvalidParameterValue</Code>
    <Message>Invalid AmazonOrderId: nope</Message>
  </Error>
  <RequestId>b1b2c3</RequestId>
</ErrorResponse>"#,
    )
    .await;

    let mut client = MwsClient::with_config(credentials(), config(&server)).unwrap();
    let err = client
        .request("GetOrder", QueryParams::new().with("AmazonOrderId.Id.1", "nope"))
        .await
        .unwrap_err();

    assert!(err.is_remote());
    assert_eq!(err.code(), "InvalidParameterValue");
    assert_eq!(err.message(), "Invalid AmazonOrderId: nope");
    assert_eq!(err.status(), Some(400));
    assert_eq!(client.last_response().map(|r| r.status()), Some(400));
}

#[tokio::test]
async fn test_validate_credentials() {
    let server = wiremock::MockServer::start().await;
    respond_xml(
        &server,
        "ListOrderItems",
        400,
        "<ErrorResponse><Error><Code>InvalidParameterValue</Code><Message>Invalid AmazonOrderId: validate</Message></Error></ErrorResponse>",
    )
    .await;

    let mut seller = SellerClient::with_config(credentials(), config(&server)).unwrap();
    assert!(seller.validate_credentials().await.unwrap());
}

#[tokio::test]
async fn test_unknown_marketplace_fails_before_io() {
    let server = wiremock::MockServer::start().await;
    let err = MwsClient::with_config(credentials_for("NOT-A-MARKETPLACE"), config(&server))
        .err()
        .unwrap();
    assert!(err.is_config());
    assert!(received(&server).await.is_empty());
}
