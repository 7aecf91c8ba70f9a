use chrono::{DateTime, Utc};
use mws_client::{MwsRequest, QueryParams, RequestContext, Result};

/// Which financial events `ListFinancialEvents` returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinancialEventsFilter {
    /// Events of one order.
    Order(String),
    /// Events of one financial event group.
    Group(String),
    /// Events posted in a date range; an open end means "until now".
    Posted {
        after: DateTime<Utc>,
        before: Option<DateTime<Utc>>,
    },
}

/// `ListFinancialEvents`
#[derive(Debug, Clone)]
pub struct ListFinancialEvents {
    pub filter: FinancialEventsFilter,
    pub max_results_per_page: Option<u32>,
}

impl ListFinancialEvents {
    pub fn new(filter: FinancialEventsFilter) -> Self {
        Self {
            filter,
            max_results_per_page: None,
        }
    }

    pub fn max_results_per_page(mut self, max: u32) -> Self {
        self.max_results_per_page = Some(max);
        self
    }
}

impl MwsRequest for ListFinancialEvents {
    const OPERATION: &'static str = "ListFinancialEvents";

    fn to_params(&self, _ctx: &RequestContext<'_>) -> Result<QueryParams> {
        let mut params = QueryParams::new();
        match &self.filter {
            FinancialEventsFilter::Order(id) => params.insert("AmazonOrderId", id),
            FinancialEventsFilter::Group(id) => params.insert("FinancialEventGroupId", id),
            FinancialEventsFilter::Posted { after, before } => {
                params.insert_date("PostedAfter", *after);
                if let Some(before) = before {
                    params.insert_date("PostedBefore", *before);
                }
            }
        }
        params.insert_opt("MaxResultsPerPage", self.max_results_per_page);
        Ok(params)
    }
}

/// `ListFinancialEventsByNextToken`
#[derive(Debug, Clone)]
pub struct ListFinancialEventsByNextToken {
    pub next_token: String,
}

impl MwsRequest for ListFinancialEventsByNextToken {
    const OPERATION: &'static str = "ListFinancialEventsByNextToken";

    fn to_params(&self, _ctx: &RequestContext<'_>) -> Result<QueryParams> {
        Ok(QueryParams::new().with("NextToken", &self.next_token))
    }
}
