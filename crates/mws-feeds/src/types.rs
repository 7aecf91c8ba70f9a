//! Feed types and results.

use mws_client::{RequestBody, XmlValue};
use serde::Serialize;

/// `_POST_PRODUCT_DATA_`
pub const POST_PRODUCT_DATA: &str = "_POST_PRODUCT_DATA_";
/// `_POST_INVENTORY_AVAILABILITY_DATA_`
pub const POST_INVENTORY_AVAILABILITY_DATA: &str = "_POST_INVENTORY_AVAILABILITY_DATA_";
/// `_POST_PRODUCT_PRICING_DATA_`
pub const POST_PRODUCT_PRICING_DATA: &str = "_POST_PRODUCT_PRICING_DATA_";
/// `_POST_ORDER_FULFILLMENT_DATA_`
pub const POST_ORDER_FULFILLMENT_DATA: &str = "_POST_ORDER_FULFILLMENT_DATA_";
/// `_POST_FLAT_FILE_LISTINGS_DATA_`
pub const POST_FLAT_FILE_LISTINGS_DATA: &str = "_POST_FLAT_FILE_LISTINGS_DATA_";

/// Options for a feed submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitFeedOptions {
    /// Replace all existing data of this feed type.
    pub purge_and_replace: bool,
    /// Send `MarketplaceIdList.Id.1` with the client's marketplace.
    pub set_marketplace_id: bool,
    /// Return the body instead of submitting it.
    pub debug: bool,
}

impl Default for SubmitFeedOptions {
    fn default() -> Self {
        Self {
            purge_and_replace: false,
            set_marketplace_id: true,
            debug: false,
        }
    }
}

impl SubmitFeedOptions {
    pub fn purge_and_replace(mut self, enabled: bool) -> Self {
        self.purge_and_replace = enabled;
        self
    }

    pub fn set_marketplace_id(mut self, enabled: bool) -> Self {
        self.set_marketplace_id = enabled;
        self
    }

    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }
}

/// Result of a feed submission.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedOutcome {
    /// The feed was accepted for processing.
    Submitted(FeedSubmissionInfo),
    /// Debug mode: the body that would have been sent.
    Debug(RequestBody),
}

impl FeedOutcome {
    pub fn submission(&self) -> Option<&FeedSubmissionInfo> {
        match self {
            FeedOutcome::Submitted(info) => Some(info),
            FeedOutcome::Debug(_) => None,
        }
    }

    pub fn debug_body(&self) -> Option<&RequestBody> {
        match self {
            FeedOutcome::Debug(body) => Some(body),
            FeedOutcome::Submitted(_) => None,
        }
    }
}

/// `FeedSubmissionInfo` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeedSubmissionInfo {
    pub feed_submission_id: String,
    pub feed_type: String,
    pub submitted_date: Option<String>,
    pub feed_processing_status: String,
    pub started_processing_date: Option<String>,
    pub completed_processing_date: Option<String>,
}

impl FeedSubmissionInfo {
    pub fn from_xml(value: &XmlValue) -> Self {
        let text = |key: &str| value.get_text(key).map(str::to_string);
        Self {
            feed_submission_id: text("FeedSubmissionId").unwrap_or_default(),
            feed_type: text("FeedType").unwrap_or_default(),
            submitted_date: text("SubmittedDate"),
            feed_processing_status: text("FeedProcessingStatus").unwrap_or_default(),
            started_processing_date: text("StartedProcessingDate"),
            completed_processing_date: text("CompletedProcessingDate"),
        }
    }

    /// `_DONE_` or `_CANCELLED_`.
    pub fn is_done(&self) -> bool {
        matches!(self.feed_processing_status.as_str(), "_DONE_" | "_CANCELLED_")
    }
}

/// Counters of a processing report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingSummary {
    pub messages_processed: u32,
    pub messages_successful: u32,
    pub messages_with_error: u32,
    pub messages_with_warning: u32,
}

/// Outcome of one message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingResult {
    pub message_id: String,
    /// `Error` or `Warning`.
    pub result_code: String,
    pub result_message_code: String,
    pub result_description: String,
    pub sku: Option<String>,
}

/// `ProcessingReport` of a finished feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingReport {
    pub document_transaction_id: String,
    pub status_code: String,
    pub summary: ProcessingSummary,
    pub results: Vec<ProcessingResult>,
    /// The report as received.
    pub raw: XmlValue,
}

impl ProcessingReport {
    pub fn from_xml(value: &XmlValue) -> Self {
        let count = |key: &str| {
            value
                .path_text(&["ProcessingSummary", key])
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0)
        };
        let results = value
            .get("Result")
            .map(XmlValue::items)
            .unwrap_or_default()
            .into_iter()
            .map(|r| ProcessingResult {
                message_id: r.get_text("MessageID").unwrap_or_default().to_string(),
                result_code: r.get_text("ResultCode").unwrap_or_default().to_string(),
                result_message_code: r
                    .get_text("ResultMessageCode")
                    .unwrap_or_default()
                    .to_string(),
                result_description: r.get_text("ResultDescription").unwrap_or_default().to_string(),
                sku: r.path_text(&["AdditionalInfo", "SKU"]).map(str::to_string),
            })
            .collect();

        Self {
            document_transaction_id: value
                .get_text("DocumentTransactionID")
                .unwrap_or_default()
                .to_string(),
            status_code: value.get_text("StatusCode").unwrap_or_default().to_string(),
            summary: ProcessingSummary {
                messages_processed: count("MessagesProcessed"),
                messages_successful: count("MessagesSuccessful"),
                messages_with_error: count("MessagesWithError"),
                messages_with_warning: count("MessagesWithWarning"),
            },
            results,
            raw: value.clone(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.summary.messages_with_error > 0
    }
}

/// Response of `GetFeedSubmissionResult`.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedSubmissionResult {
    /// The `Message/ProcessingReport` of the result envelope.
    Report(ProcessingReport),
    /// Any other document, returned as received.
    Other(mws_client::XmlDocument),
    /// Non-XML body, such as the tab-delimited report of a flat-file feed.
    Text(String),
}

/// Invoice processing state of one FBA outbound shipment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShipmentInvoiceStatus {
    pub amazon_shipment_id: String,
    /// `Pending`, `Processing`, `Accepted`, `Errored` or `NotFound`.
    pub invoice_status: String,
}

impl ShipmentInvoiceStatus {
    pub fn from_xml(value: &XmlValue) -> Self {
        Self {
            amazon_shipment_id: value.get_text("AmazonShipmentId").unwrap_or_default().to_string(),
            invoice_status: value.get_text("InvoiceStatus").unwrap_or_default().to_string(),
        }
    }
}
