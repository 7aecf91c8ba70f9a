use chrono::{DateTime, Utc};
use mws_client::{MwsRequest, ParamValue, QueryParams, RequestContext, Result};

use super::to_strings;

/// `ListOrders`: orders created in a time frame.
#[derive(Debug, Clone)]
pub struct ListOrders {
    pub created_after: DateTime<Utc>,
    pub created_before: Option<DateTime<Utc>>,
    pub order_statuses: Vec<String>,
    pub fulfillment_channels: Vec<String>,
    /// Ask for every marketplace served by the client's regional host.
    pub all_marketplaces: bool,
}

impl ListOrders {
    /// Unshipped and partially shipped merchant-fulfilled orders created
    /// after `created_after`.
    pub fn new(created_after: DateTime<Utc>) -> Self {
        Self {
            created_after,
            created_before: None,
            order_statuses: to_strings(["Unshipped", "PartiallyShipped"]),
            fulfillment_channels: to_strings(["MFN"]),
            all_marketplaces: false,
        }
    }

    pub fn created_before(mut self, date: DateTime<Utc>) -> Self {
        self.created_before = Some(date);
        self
    }

    pub fn with_statuses<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_statuses = to_strings(statuses);
        self
    }

    pub fn with_fulfillment_channels<I, S>(mut self, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fulfillment_channels = to_strings(channels);
        self
    }

    pub fn all_marketplaces(mut self, enabled: bool) -> Self {
        self.all_marketplaces = enabled;
        self
    }
}

impl MwsRequest for ListOrders {
    const OPERATION: &'static str = "ListOrders";

    fn to_params(&self, ctx: &RequestContext<'_>) -> Result<QueryParams> {
        let mut params = QueryParams::new();
        params.insert_date("CreatedAfter", self.created_after);
        if let Some(before) = self.created_before {
            params.insert_date("CreatedBefore", before);
        }
        params.insert_list("OrderStatus.Status", &self.order_statuses);
        params.insert_list("FulfillmentChannel.Channel", &self.fulfillment_channels);
        if self.all_marketplaces {
            let ids = ctx.registry.ids_for_host(ctx.marketplace.host());
            params.insert_list("MarketplaceId.Id", ids);
        }
        Ok(params)
    }
}

/// `ListOrders` filtered on the last update time.
#[derive(Debug, Clone)]
pub struct ListOrdersUpdated {
    pub last_updated_after: DateTime<Utc>,
    pub last_updated_before: Option<DateTime<Utc>>,
    /// Extra filters such as `OrderStatus.Status.1`, set verbatim.
    pub extra: QueryParams,
}

impl ListOrdersUpdated {
    pub fn new(last_updated_after: DateTime<Utc>) -> Self {
        Self {
            last_updated_after,
            last_updated_before: None,
            extra: QueryParams::new(),
        }
    }

    pub fn updated_before(mut self, date: DateTime<Utc>) -> Self {
        self.last_updated_before = Some(date);
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.extra.insert(key, value);
        self
    }
}

impl MwsRequest for ListOrdersUpdated {
    const OPERATION: &'static str = "ListOrdersUpdated";

    fn to_params(&self, _ctx: &RequestContext<'_>) -> Result<QueryParams> {
        let mut params = QueryParams::new();
        params.insert_date("LastUpdatedAfter", self.last_updated_after);
        if let Some(before) = self.last_updated_before {
            params.insert_date("LastUpdatedBefore", before);
        }
        params.merge(self.extra.clone());
        Ok(params)
    }
}

/// `ListOrdersByNextToken`
#[derive(Debug, Clone)]
pub struct ListOrdersByNextToken {
    pub next_token: String,
}

impl MwsRequest for ListOrdersByNextToken {
    const OPERATION: &'static str = "ListOrdersByNextToken";

    fn to_params(&self, _ctx: &RequestContext<'_>) -> Result<QueryParams> {
        Ok(QueryParams::new().with("NextToken", &self.next_token))
    }
}

/// `GetOrder` for a single order id.
#[derive(Debug, Clone)]
pub struct GetOrder {
    pub amazon_order_id: String,
}

impl MwsRequest for GetOrder {
    const OPERATION: &'static str = "GetOrder";

    fn to_params(&self, _ctx: &RequestContext<'_>) -> Result<QueryParams> {
        Ok(QueryParams::new().with("AmazonOrderId.Id.1", &self.amazon_order_id))
    }
}

/// `ListOrderItems`
#[derive(Debug, Clone)]
pub struct ListOrderItems {
    pub amazon_order_id: String,
}

impl MwsRequest for ListOrderItems {
    const OPERATION: &'static str = "ListOrderItems";

    fn to_params(&self, _ctx: &RequestContext<'_>) -> Result<QueryParams> {
        Ok(QueryParams::new().with("AmazonOrderId", &self.amazon_order_id))
    }
}
