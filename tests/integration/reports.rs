//! Report requests and downloads against a mock MWS endpoint.

use mws_api::client::marketplace::GERMANY;
use mws_api::reports::ReportProcessingStatus;
use mws_api::{ReportContent, ReportsClient};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::common::*;

fn status_response(status: &str, generated: Option<&str>) -> String {
    let generated = generated
        .map(|id| format!("<GeneratedReportId>{id}</GeneratedReportId>"))
        .unwrap_or_default();
    format!(
        r#"<GetReportRequestListResponse xmlns="http://mws.amazonaws.com/doc/2009-01-01/">
  <GetReportRequestListResult>
    <HasNext>false</HasNext>
    <ReportRequestInfo>
      <ReportRequestId>2291326454</ReportRequestId>
      <ReportType>_GET_MERCHANT_LISTINGS_DATA_</ReportType>
      <Scheduled>false</Scheduled>
      <ReportProcessingStatus>{status}</ReportProcessingStatus>
      {generated}
    </ReportRequestInfo>
  </GetReportRequestListResult>
</GetReportRequestListResponse>"#
    )
}

async fn reports() -> (MockServer, ReportsClient) {
    init_tracing();
    let server = MockServer::start().await;
    let reports = ReportsClient::with_config(credentials(), config(&server)).unwrap();
    (server, reports)
}

#[tokio::test]
async fn test_request_report_uses_marketplace_list() {
    let (server, mut reports) = reports().await;
    respond_xml(
        &server,
        "RequestReport",
        200,
        "<RequestReportResponse><RequestReportResult><ReportRequestInfo><ReportRequestId>2291326454</ReportRequestId></ReportRequestInfo></RequestReportResult></RequestReportResponse>",
    )
    .await;

    let id = reports
        .request_report("_GET_MERCHANT_LISTINGS_DATA_", None, None)
        .await
        .unwrap();
    assert_eq!(id, "2291326454");

    let request = &received(&server).await[0];
    assert_eq!(query_value(request, "MarketplaceIdList.Id.1").as_deref(), Some(GERMANY));
    assert!(query_value(request, "MarketplaceId.Id.1").is_none());
    assert_eq!(query_value(request, "Version").as_deref(), Some("2009-01-01"));
}

#[tokio::test]
async fn test_get_report_waits_for_done() {
    let (server, mut reports) = reports().await;
    let body = status_response("_IN_PROGRESS_", None);
    respond_xml(&server, "GetReportRequestList", 200, &body).await;

    let content = reports.get_report("2291326454", true).await.unwrap();
    assert!(content.is_none());

    let requests = received(&server).await;
    assert_eq!(requests.len(), 1, "no download while the request is in progress");
    assert_eq!(
        query_value(&requests[0], "ReportRequestIdList.Id.1").as_deref(),
        Some("2291326454")
    );
}

#[tokio::test]
async fn test_get_report_downloads_generated_report() {
    let (server, mut reports) = reports().await;
    respond_xml(
        &server,
        "GetReportRequestList",
        200,
        &status_response("_DONE_", Some("7788990011")),
    )
    .await;
    Mock::given(method("POST"))
        .and(query_param("Action", "GetReport"))
        .and(query_param("ReportId", "7788990011"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            b"seller-sku\titem-name\tprice\r\nSKU-1\tCaf\xE9 cr\xE8me\t4.50\r\n".to_vec(),
            "text/plain;charset=Cp1252",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let content = reports.get_report("2291326454", true).await.unwrap().unwrap();
    let ReportContent::Table(table) = content else {
        panic!("expected a tab-delimited report");
    };
    assert_eq!(table.headers, vec!["seller-sku", "item-name", "price"]);
    assert_eq!(table.get(0, "item-name"), Some("Café crème"));
    assert_eq!(table.get(0, "price"), Some("4.50"));

    let json = serde_json::to_value(&table).unwrap();
    assert_eq!(json["rows"][0][0], "SKU-1");
}

#[tokio::test]
async fn test_done_without_data_is_empty_table() {
    let (server, mut reports) = reports().await;
    let body = status_response("_DONE_NO_DATA_", None);
    respond_xml(&server, "GetReportRequestList", 200, &body).await;

    let content = reports.get_report("2291326454", true).await.unwrap().unwrap();
    assert!(content.as_table().unwrap().is_empty());
    assert_eq!(received(&server).await.len(), 1);
}

#[tokio::test]
async fn test_report_request_status() {
    let (server, mut reports) = reports().await;
    respond_xml(&server, "GetReportRequestList", 200, &status_response("_CANCELLED_", None)).await;

    let info = reports.report_request_status("2291326454").await.unwrap().unwrap();
    assert_eq!(info.report_processing_status, ReportProcessingStatus::Cancelled);
    assert!(info.report_processing_status.is_terminal());
    assert!(!info.scheduled);
}
