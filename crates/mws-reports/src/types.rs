//! Types for the Reports API.

use mws_client::{XmlDocument, XmlValue};
use serde::Serialize;

use crate::error::Result;

/// Processing state of a report request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReportProcessingStatus {
    /// `_SUBMITTED_`
    Submitted,
    /// `_IN_PROGRESS_`
    InProgress,
    /// `_CANCELLED_`
    Cancelled,
    /// `_DONE_`
    Done,
    /// `_DONE_NO_DATA_`
    DoneNoData,
    /// Any status this crate does not know.
    Other(String),
}

impl ReportProcessingStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "_SUBMITTED_" => ReportProcessingStatus::Submitted,
            "_IN_PROGRESS_" => ReportProcessingStatus::InProgress,
            "_CANCELLED_" => ReportProcessingStatus::Cancelled,
            "_DONE_" => ReportProcessingStatus::Done,
            "_DONE_NO_DATA_" => ReportProcessingStatus::DoneNoData,
            other => ReportProcessingStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReportProcessingStatus::Submitted => "_SUBMITTED_",
            ReportProcessingStatus::InProgress => "_IN_PROGRESS_",
            ReportProcessingStatus::Cancelled => "_CANCELLED_",
            ReportProcessingStatus::Done => "_DONE_",
            ReportProcessingStatus::DoneNoData => "_DONE_NO_DATA_",
            ReportProcessingStatus::Other(s) => s,
        }
    }

    /// Check if the request will not change state anymore.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReportProcessingStatus::Cancelled
                | ReportProcessingStatus::Done
                | ReportProcessingStatus::DoneNoData
        )
    }
}

fn text(value: &XmlValue, key: &str) -> Option<String> {
    value.get_text(key).filter(|s| !s.is_empty()).map(str::to_string)
}

/// `ReportRequestInfo` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRequestInfo {
    pub report_request_id: String,
    pub report_type: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub scheduled: bool,
    pub submitted_date: Option<String>,
    pub report_processing_status: ReportProcessingStatus,
    /// Set once the report is `_DONE_`.
    pub generated_report_id: Option<String>,
    pub started_processing_date: Option<String>,
    pub completed_date: Option<String>,
}

impl ReportRequestInfo {
    pub fn from_xml(value: &XmlValue) -> Self {
        Self {
            report_request_id: text(value, "ReportRequestId").unwrap_or_default(),
            report_type: text(value, "ReportType").unwrap_or_default(),
            start_date: text(value, "StartDate"),
            end_date: text(value, "EndDate"),
            scheduled: value.get_text("Scheduled") == Some("true"),
            submitted_date: text(value, "SubmittedDate"),
            report_processing_status: ReportProcessingStatus::parse(
                value.get_text("ReportProcessingStatus").unwrap_or_default(),
            ),
            generated_report_id: text(value, "GeneratedReportId"),
            started_processing_date: text(value, "StartedProcessingDate"),
            completed_date: text(value, "CompletedDate"),
        }
    }
}

/// `ReportInfo` element of a report list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportInfo {
    pub report_id: String,
    pub report_type: String,
    pub report_request_id: String,
    pub available_date: Option<String>,
    pub acknowledged: bool,
}

impl ReportInfo {
    pub fn from_xml(value: &XmlValue) -> Self {
        Self {
            report_id: text(value, "ReportId").unwrap_or_default(),
            report_type: text(value, "ReportType").unwrap_or_default(),
            report_request_id: text(value, "ReportRequestId").unwrap_or_default(),
            available_date: text(value, "AvailableDate"),
            acknowledged: value.get_text("Acknowledged") == Some("true"),
        }
    }
}

/// A page of entries plus the token for the next page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
    pub has_next: bool,
}

impl<T> Page<T> {
    /// Read `element` entries and the paging fields from `result`.
    pub(crate) fn from_result(
        result: Option<&XmlValue>,
        element: &str,
        parse: fn(&XmlValue) -> T,
    ) -> Self {
        let Some(result) = result else {
            return Self {
                items: Vec::new(),
                next_token: None,
                has_next: false,
            };
        };
        Self {
            items: result
                .get(element)
                .map(XmlValue::items)
                .unwrap_or_default()
                .into_iter()
                .map(parse)
                .collect(),
            next_token: text(result, "NextToken"),
            has_next: result.get_text("HasNext") == Some("true"),
        }
    }
}

pub type ReportList = Page<ReportInfo>;
pub type ReportRequestList = Page<ReportRequestInfo>;

/// A tab-delimited report: the header line and the data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    /// Parse a tab-delimited report. The first line holds the column names;
    /// every row must have as many fields as the header.
    pub fn parse(text: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .has_headers(true)
            .flexible(false)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let rows = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<std::result::Result<_, _>>()?;

        Ok(Self { headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Value of `column` in row `row`.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column(column)?;
        self.rows.get(row)?.get(index).map(String::as_str)
    }

    /// Rows as `(column, value)` pairs in header order.
    pub fn records(&self) -> impl Iterator<Item = Vec<(&str, &str)>> + '_ {
        self.rows.iter().map(|row| {
            self.headers
                .iter()
                .map(String::as_str)
                .zip(row.iter().map(String::as_str))
                .collect()
        })
    }
}

/// Content of a generated report.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportContent {
    /// Tab-delimited reports.
    Table(ReportTable),
    /// XML reports, decoded.
    Xml(XmlDocument),
}

impl ReportContent {
    pub fn as_table(&self) -> Option<&ReportTable> {
        match self {
            ReportContent::Table(table) => Some(table),
            ReportContent::Xml(_) => None,
        }
    }
}
