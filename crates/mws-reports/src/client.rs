//! Reports API client.

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use mws_client::{
    ClientConfig, HttpTransport, MwsClient, MwsCredentials, QueryParams, ResponseBody, Transport,
};

use crate::error::{Error, ErrorKind, Result};
use crate::types::*;

/// Amazon MWS Reports API client.
///
/// Reports are produced asynchronously: request one, poll its request
/// status, then download the generated report.
///
/// # Example
///
/// ```rust,ignore
/// use mws_reports::ReportsClient;
///
/// let mut reports = ReportsClient::from_env()?;
/// let request_id = reports
///     .request_report("_GET_MERCHANT_LISTINGS_DATA_", None, None)
///     .await?;
///
/// // poll until the report is ready
/// if let Some(content) = reports.get_report(&request_id, true).await? {
///     for record in content.as_table().into_iter().flat_map(|t| t.records()) {
///         println!("{record:?}");
///     }
/// }
/// ```
#[derive(Debug)]
pub struct ReportsClient<T = HttpTransport> {
    client: MwsClient<T>,
}

impl ReportsClient<HttpTransport> {
    pub fn new(credentials: MwsCredentials) -> Result<Self> {
        Ok(Self::from_client(MwsClient::new(credentials)?))
    }

    pub fn with_config(credentials: MwsCredentials, config: ClientConfig) -> Result<Self> {
        Ok(Self::from_client(MwsClient::with_config(credentials, config)?))
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::from_client(MwsClient::from_env()?))
    }
}

impl<T: Transport> ReportsClient<T> {
    pub fn from_client(client: MwsClient<T>) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &MwsClient<T> {
        &self.client
    }

    pub fn inner_mut(&mut self) -> &mut MwsClient<T> {
        &mut self.client
    }

    pub fn into_inner(self) -> MwsClient<T> {
        self.client
    }

    /// Request a report for this client's marketplace and return the
    /// `ReportRequestId`.
    #[instrument(skip(self))]
    pub async fn request_report(
        &mut self,
        report_type: &str,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<String> {
        let mut params = QueryParams::new()
            .with("MarketplaceIdList.Id.1", self.client.marketplace_id())
            .with("ReportType", report_type);
        if let Some(start) = start_date {
            params.insert_date("StartDate", start);
        }
        if let Some(end) = end_date {
            params.insert_date("EndDate", end);
        }

        let doc = self.client.request_xml("RequestReport", params).await?;
        let id = doc
            .path_text(&["RequestReportResult", "ReportRequestInfo", "ReportRequestId"])
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                Error::new(ErrorKind::InvalidResponse(
                    "RequestReport returned no ReportRequestId".to_string(),
                ))
            })?;

        debug!(report_request_id = id, "Report requested");
        Ok(id.to_string())
    }

    /// Status of one report request, `None` if MWS does not know it.
    #[instrument(skip(self))]
    pub async fn report_request_status(
        &mut self,
        report_request_id: &str,
    ) -> Result<Option<ReportRequestInfo>> {
        let params = QueryParams::new().with("ReportRequestIdList.Id.1", report_request_id);
        let doc = self.client.request_xml("GetReportRequestStatus", params).await?;

        Ok(doc
            .path(&["GetReportRequestListResult", "ReportRequestInfo"])
            .and_then(|info| info.items().into_iter().next())
            .map(ReportRequestInfo::from_xml))
    }

    /// Download a report.
    ///
    /// With `check_status`, `id` is a report request id: its status is
    /// looked up first and `None` is returned while the report is not done.
    /// A request that finished without data yields an empty table. Without
    /// `check_status`, `id` is the report id itself.
    #[instrument(skip(self))]
    pub async fn get_report(
        &mut self,
        id: &str,
        check_status: bool,
    ) -> Result<Option<ReportContent>> {
        let report_id = if check_status {
            let Some(status) = self.report_request_status(id).await? else {
                return Ok(None);
            };
            match status.report_processing_status {
                ReportProcessingStatus::DoneNoData => {
                    return Ok(Some(ReportContent::Table(ReportTable::default())));
                }
                ReportProcessingStatus::Done => status.generated_report_id.ok_or_else(|| {
                    Error::new(ErrorKind::InvalidResponse(format!(
                        "report request {id} is done but has no GeneratedReportId"
                    )))
                })?,
                other => {
                    debug!(status = other.as_str(), "Report not ready");
                    return Ok(None);
                }
            }
        } else {
            id.to_string()
        };

        let params = QueryParams::new().with("ReportId", report_id);
        let content = match self.client.request("GetReport", params).await? {
            ResponseBody::Text(text) => ReportContent::Table(ReportTable::parse(&text)?),
            ResponseBody::Xml(doc) => ReportContent::Xml(doc),
        };
        Ok(Some(content))
    }

    /// Reports generated in the last 90 days, optionally filtered by type.
    #[instrument(skip(self, report_types))]
    pub async fn report_list<S: AsRef<str>>(&mut self, report_types: &[S]) -> Result<ReportList> {
        let params = report_type_params(report_types);
        let doc = self.client.request_xml("GetReportList", params).await?;
        Ok(Page::from_result(doc.get("GetReportListResult"), "ReportInfo", ReportInfo::from_xml))
    }

    /// Next page of [`report_list`](Self::report_list).
    #[instrument(skip(self, next_token))]
    pub async fn report_list_by_next_token(&mut self, next_token: &str) -> Result<ReportList> {
        let params = QueryParams::new().with("NextToken", next_token);
        let doc = self.client.request_xml("GetReportListByNextToken", params).await?;
        Ok(Page::from_result(
            doc.get("GetReportListByNextTokenResult"),
            "ReportInfo",
            ReportInfo::from_xml,
        ))
    }

    /// Recent report requests, optionally filtered by type.
    #[instrument(skip(self, report_types))]
    pub async fn report_request_list<S: AsRef<str>>(
        &mut self,
        report_types: &[S],
        max_count: Option<u32>,
    ) -> Result<ReportRequestList> {
        let mut params = report_type_params(report_types);
        params.insert_opt("MaxCount", max_count);
        let doc = self.client.request_xml("GetReportRequestList", params).await?;
        Ok(Page::from_result(
            doc.get("GetReportRequestListResult"),
            "ReportRequestInfo",
            ReportRequestInfo::from_xml,
        ))
    }
}

fn report_type_params<S: AsRef<str>>(report_types: &[S]) -> QueryParams {
    let mut params = QueryParams::new();
    params.insert_list("ReportTypeList.Type", report_types.iter().map(|t| -> &str { t.as_ref() }));
    params
}
