//! Operation descriptor table.
//!
//! Every operation the client can issue is described here: HTTP method,
//! endpoint path, API version and the `Action` sent on the wire. The
//! `repeated` list names elements that may occur more than once in the
//! response; the decoder always yields a list for them.

use crate::error::{Error, ErrorKind, Result};

/// HTTP method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one MWS operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    /// Name used by callers to select the operation.
    pub name: &'static str,
    /// `Action` parameter sent to MWS.
    pub action: &'static str,
    pub method: HttpMethod,
    /// Endpoint path, e.g. `/Orders/2013-09-01`.
    pub path: &'static str,
    /// `Version` parameter.
    pub version: &'static str,
    /// Response elements that are always decoded as lists.
    pub repeated: &'static [&'static str],
    /// Whether product namespaces are normalized in the response.
    pub product_attributes: bool,
}

impl OperationDescriptor {
    /// Whether this operation sends a request body.
    pub fn has_body(&self) -> bool {
        BODY_ACTIONS.contains(&self.action)
    }
}

/// Actions that carry a request body.
pub const BODY_ACTIONS: &[&str] = &["SubmitFeed", "SubmitFBAOutboundShipmentInvoice"];

const FEEDS: (&str, &str) = ("/", "2009-01-01");
const ORDERS: (&str, &str) = ("/Orders/2013-09-01", "2013-09-01");
const PRODUCTS: (&str, &str) = ("/Products/2011-10-01", "2011-10-01");
const SELLERS: (&str, &str) = ("/Sellers/2011-07-01", "2011-07-01");
const RECOMMENDATIONS: (&str, &str) = ("/Recommendations/2013-04-01", "2013-04-01");
const INVENTORY: (&str, &str) = ("/FulfillmentInventory/2010-10-01", "2010-10-01");
const FINANCES: (&str, &str) = ("/Finances/2015-05-01", "2015-05-01");
const SUBSCRIPTIONS: (&str, &str) = ("/Subscriptions/2013-07-01", "2013-07-01");
const SHIPMENT_INVOICING: (&str, &str) = ("/ShipmentInvoicing/2018-11-01", "2018-11-01");

const fn op(
    name: &'static str,
    action: &'static str,
    section: (&'static str, &'static str),
    repeated: &'static [&'static str],
) -> OperationDescriptor {
    OperationDescriptor {
        name,
        action,
        method: HttpMethod::Post,
        path: section.0,
        version: section.1,
        repeated,
        product_attributes: false,
    }
}

const fn product_op(
    name: &'static str,
    repeated: &'static [&'static str],
) -> OperationDescriptor {
    OperationDescriptor {
        product_attributes: true,
        ..op(name, name, PRODUCTS, repeated)
    }
}

static OPERATIONS: &[OperationDescriptor] = &[
    // Feeds
    op("SubmitFeed", "SubmitFeed", FEEDS, &[]),
    op("GetFeedSubmissionResult", "GetFeedSubmissionResult", FEEDS, &["Result"]),
    op("GetFeedSubmissionList", "GetFeedSubmissionList", FEEDS, &["FeedSubmissionInfo"]),
    // Reports
    op("RequestReport", "RequestReport", FEEDS, &[]),
    op("GetReport", "GetReport", FEEDS, &[]),
    op("GetReportList", "GetReportList", FEEDS, &["ReportInfo"]),
    op("GetReportListByNextToken", "GetReportListByNextToken", FEEDS, &["ReportInfo"]),
    op("GetReportRequestList", "GetReportRequestList", FEEDS, &["ReportRequestInfo"]),
    op("GetReportRequestStatus", "GetReportRequestList", FEEDS, &["ReportRequestInfo"]),
    // Orders
    op("ListOrders", "ListOrders", ORDERS, &["Order"]),
    op("ListOrdersUpdated", "ListOrders", ORDERS, &["Order"]),
    op("ListOrdersByNextToken", "ListOrdersByNextToken", ORDERS, &["Order"]),
    op("GetOrder", "GetOrder", ORDERS, &["Order"]),
    op("ListOrderItems", "ListOrderItems", ORDERS, &["OrderItem"]),
    // Products
    op(
        "GetCompetitivePricingForASIN",
        "GetCompetitivePricingForASIN",
        PRODUCTS,
        &["GetCompetitivePricingForASINResult", "CompetitivePrice"],
    ),
    op(
        "GetCompetitivePricingForSKU",
        "GetCompetitivePricingForSKU",
        PRODUCTS,
        &["GetCompetitivePricingForSKUResult", "CompetitivePrice", "SalesRank"],
    ),
    op(
        "GetLowestPricedOffersForASIN",
        "GetLowestPricedOffersForASIN",
        PRODUCTS,
        &["Offer", "LowestPrice", "BuyBoxPrice", "OfferCount"],
    ),
    op(
        "GetMyPriceForSKU",
        "GetMyPriceForSKU",
        PRODUCTS,
        &["GetMyPriceForSKUResult", "Offer"],
    ),
    op(
        "GetMyPriceForASIN",
        "GetMyPriceForASIN",
        PRODUCTS,
        &["GetMyPriceForASINResult", "Offer"],
    ),
    op(
        "GetLowestOfferListingsForASIN",
        "GetLowestOfferListingsForASIN",
        PRODUCTS,
        &["GetLowestOfferListingsForASINResult", "LowestOfferListing"],
    ),
    op("GetProductCategoriesForSKU", "GetProductCategoriesForSKU", PRODUCTS, &["Self"]),
    op("GetProductCategoriesForASIN", "GetProductCategoriesForASIN", PRODUCTS, &["Self"]),
    product_op("GetMatchingProductForId", &["GetMatchingProductForIdResult", "Product"]),
    product_op("ListMatchingProducts", &["Product"]),
    // Sellers
    op(
        "ListMarketplaceParticipations",
        "ListMarketplaceParticipations",
        SELLERS,
        &["Participation", "Marketplace"],
    ),
    // Recommendations
    op("ListRecommendations", "ListRecommendations", RECOMMENDATIONS, &[]),
    // Fulfillment inventory
    op("ListInventorySupply", "ListInventorySupply", INVENTORY, &["member"]),
    // Finances
    op("ListFinancialEvents", "ListFinancialEvents", FINANCES, &[]),
    op("ListFinancialEventsByNextToken", "ListFinancialEventsByNextToken", FINANCES, &[]),
    // Subscriptions
    op("RegisterDestination", "RegisterDestination", SUBSCRIPTIONS, &[]),
    op("ListRegisteredDestinations", "ListRegisteredDestinations", SUBSCRIPTIONS, &["member"]),
    op(
        "SendTestNotificationToDestination",
        "SendTestNotificationToDestination",
        SUBSCRIPTIONS,
        &[],
    ),
    op("CreateSubscription", "CreateSubscription", SUBSCRIPTIONS, &[]),
    op("DeleteSubscription", "DeleteSubscription", SUBSCRIPTIONS, &[]),
    op("ListSubscriptions", "ListSubscriptions", SUBSCRIPTIONS, &["member"]),
    // Shipment invoicing
    op(
        "GetFBAOutboundShipmentDetail",
        "GetFBAOutboundShipmentDetail",
        SHIPMENT_INVOICING,
        &["ShipmentItem"],
    ),
    op(
        "SubmitFBAOutboundShipmentInvoice",
        "SubmitFBAOutboundShipmentInvoice",
        SHIPMENT_INVOICING,
        &[],
    ),
    op(
        "GetFBAOutboundShipmentInvoiceStatus",
        "GetFBAOutboundShipmentInvoiceStatus",
        SHIPMENT_INVOICING,
        &["member"],
    ),
];

/// Look up an operation by name.
pub fn lookup(name: &str) -> Result<&'static OperationDescriptor> {
    OPERATIONS
        .iter()
        .find(|op| op.name == name)
        .ok_or_else(|| Error::new(ErrorKind::Config(format!("Call to undefined endpoint {name}"))))
}

/// Every registered operation.
pub fn all() -> &'static [OperationDescriptor] {
    OPERATIONS
}
