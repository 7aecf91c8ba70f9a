//! Response types for the seller operations.
//!
//! Fields that every integration needs are typed; each record also keeps the
//! decoded element in `raw` for the rest.

use std::collections::BTreeMap;

use mws_client::XmlValue;
use serde::Serialize;

fn text(value: &XmlValue, key: &str) -> Option<String> {
    value.get_text(key).filter(|s| !s.is_empty()).map(str::to_string)
}

fn text_or_default(value: &XmlValue, key: &str) -> String {
    value.get_text(key).unwrap_or_default().to_string()
}

fn number(value: &XmlValue, key: &str) -> u32 {
    value.get_text(key).and_then(|s| s.trim().parse().ok()).unwrap_or_default()
}

/// Children named `key`, always as a sequence.
fn children<'a>(value: &'a XmlValue, key: &str) -> Vec<&'a XmlValue> {
    value.get(key).map(XmlValue::items).unwrap_or_default()
}

/// An amount of money as sent by MWS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Money {
    pub currency_code: String,
    /// Decimal string, unchanged.
    pub amount: String,
}

impl Money {
    /// Read a `CurrencyCode`/`Amount` element.
    pub fn from_xml(value: &XmlValue) -> Option<Self> {
        Some(Self {
            currency_code: text(value, "CurrencyCode").unwrap_or_default(),
            amount: text(value, "Amount")?,
        })
    }

    fn child(value: &XmlValue, key: &str) -> Option<Self> {
        value.get(key).and_then(Self::from_xml)
    }
}

// Orders

/// An `Order` element.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub amazon_order_id: String,
    pub seller_order_id: Option<String>,
    pub purchase_date: Option<String>,
    pub last_update_date: Option<String>,
    pub order_status: String,
    pub fulfillment_channel: Option<String>,
    pub marketplace_id: Option<String>,
    pub order_total: Option<Money>,
    pub number_of_items_shipped: u32,
    pub number_of_items_unshipped: u32,
    pub buyer_name: Option<String>,
    pub buyer_email: Option<String>,
    pub raw: XmlValue,
}

impl Order {
    pub fn from_xml(value: &XmlValue) -> Self {
        Self {
            amazon_order_id: text_or_default(value, "AmazonOrderId"),
            seller_order_id: text(value, "SellerOrderId"),
            purchase_date: text(value, "PurchaseDate"),
            last_update_date: text(value, "LastUpdateDate"),
            order_status: text_or_default(value, "OrderStatus"),
            fulfillment_channel: text(value, "FulfillmentChannel"),
            marketplace_id: text(value, "MarketplaceId"),
            order_total: Money::child(value, "OrderTotal"),
            number_of_items_shipped: number(value, "NumberOfItemsShipped"),
            number_of_items_unshipped: number(value, "NumberOfItemsUnshipped"),
            buyer_name: text(value, "BuyerName"),
            buyer_email: text(value, "BuyerEmail"),
            raw: value.clone(),
        }
    }
}

/// One page of `ListOrders` results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    /// Pass to `list_orders_by_next_token` for the next page.
    pub next_token: Option<String>,
}

impl OrderPage {
    pub(crate) fn from_result(result: Option<&XmlValue>) -> Self {
        let Some(result) = result else {
            return Self::default();
        };
        Self {
            orders: result
                .get("Orders")
                .map(|orders| children(orders, "Order"))
                .unwrap_or_default()
                .into_iter()
                .map(Order::from_xml)
                .collect(),
            next_token: text(result, "NextToken"),
        }
    }

    pub fn has_next(&self) -> bool {
        self.next_token.is_some()
    }
}

/// An `OrderItem` element.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub order_item_id: String,
    pub asin: Option<String>,
    pub seller_sku: Option<String>,
    pub title: Option<String>,
    pub quantity_ordered: u32,
    pub quantity_shipped: u32,
    pub item_price: Option<Money>,
    pub shipping_price: Option<Money>,
    pub item_tax: Option<Money>,
    pub promotion_discount: Option<Money>,
    pub raw: XmlValue,
}

impl OrderItem {
    pub fn from_xml(value: &XmlValue) -> Self {
        Self {
            order_item_id: text_or_default(value, "OrderItemId"),
            asin: text(value, "ASIN"),
            seller_sku: text(value, "SellerSKU"),
            title: text(value, "Title"),
            quantity_ordered: number(value, "QuantityOrdered"),
            quantity_shipped: number(value, "QuantityShipped"),
            item_price: Money::child(value, "ItemPrice"),
            shipping_price: Money::child(value, "ShippingPrice"),
            item_tax: Money::child(value, "ItemTax"),
            promotion_discount: Money::child(value, "PromotionDiscount"),
            raw: value.clone(),
        }
    }
}

// Products

/// Result of a catalog lookup by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchingProducts {
    /// Products per requested id. One id can match several products.
    pub found: BTreeMap<String, Vec<XmlValue>>,
    /// Ids MWS did not answer with `Success`.
    pub not_found: Vec<String>,
}

impl MatchingProducts {
    pub(crate) fn from_results(results: Vec<&XmlValue>) -> Self {
        let mut matches = Self::default();
        for result in results {
            let id = result.attribute("Id").unwrap_or_default().to_string();
            if result.attribute("status") != Some("Success") {
                matches.not_found.push(id);
                continue;
            }
            let products = result
                .get("Products")
                .map(|products| children(products, "Product"))
                .unwrap_or_default();
            matches
                .found
                .entry(id)
                .or_default()
                .extend(products.into_iter().cloned());
        }
        matches
    }
}

/// A category from `GetProductCategoriesFor*`, with its ancestors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCategory {
    pub id: String,
    pub name: String,
    pub parent: Option<Box<ProductCategory>>,
}

impl ProductCategory {
    pub fn from_xml(value: &XmlValue) -> Self {
        Self {
            id: text_or_default(value, "ProductCategoryId"),
            name: text_or_default(value, "ProductCategoryName"),
            parent: value
                .get("Parent")
                .map(|parent| Box::new(ProductCategory::from_xml(parent))),
        }
    }

    /// Names from the root category down to this one.
    pub fn path(&self) -> Vec<&str> {
        let mut names = match &self.parent {
            Some(parent) => parent.path(),
            None => Vec::new(),
        };
        names.push(&self.name);
        names
    }
}

// Pricing

/// The `Price` element of a competitive price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PriceInfo {
    pub landed_price: Option<Money>,
    pub listing_price: Option<Money>,
    pub shipping: Option<Money>,
}

impl PriceInfo {
    pub fn from_xml(value: &XmlValue) -> Self {
        Self {
            landed_price: Money::child(value, "LandedPrice"),
            listing_price: Money::child(value, "ListingPrice"),
            shipping: Money::child(value, "Shipping"),
        }
    }
}

/// A `SalesRank` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesRank {
    pub product_category_id: String,
    pub rank: u32,
}

impl SalesRank {
    pub fn from_xml(value: &XmlValue) -> Self {
        Self {
            product_category_id: text_or_default(value, "ProductCategoryId"),
            rank: number(value, "Rank"),
        }
    }
}

/// Competitive price and sales ranks of one SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkuCompetitivePricing {
    pub price: PriceInfo,
    pub sales_ranks: Vec<SalesRank>,
}

/// `Price` of the first competitive price of a `Product`.
pub(crate) fn competitive_price(product: &XmlValue) -> Option<PriceInfo> {
    product
        .path(&["CompetitivePricing", "CompetitivePrices"])
        .map(|prices| children(prices, "CompetitivePrice"))
        .unwrap_or_default()
        .into_iter()
        .find_map(|price| price.get("Price"))
        .map(PriceInfo::from_xml)
}

pub(crate) fn sales_ranks(product: &XmlValue) -> Vec<SalesRank> {
    product
        .get("SalesRankings")
        .map(|rankings| children(rankings, "SalesRank"))
        .unwrap_or_default()
        .into_iter()
        .map(SalesRank::from_xml)
        .collect()
}

/// Offers of a `GetMyPrice*` result: `None` when MWS did not answer the id
/// with `Success`.
pub(crate) fn my_offers(result: &XmlValue) -> Option<Vec<XmlValue>> {
    if result.attribute("status") != Some("Success") {
        return None;
    }
    Some(
        result
            .path(&["Product", "Offers"])
            .map(|offers| children(offers, "Offer"))
            .unwrap_or_default()
            .into_iter()
            .cloned()
            .collect(),
    )
}

/// Offer listings of a `GetLowestOfferListingsForASIN` result, `None` when
/// there are none.
pub(crate) fn lowest_offer_listings(result: &XmlValue) -> Option<Vec<XmlValue>> {
    let listings = result.path(&["Product", "LowestOfferListings", "LowestOfferListing"])?;
    Some(listings.items().into_iter().cloned().collect())
}

// Finances

/// One page of financial events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinancialEventsPage {
    /// Event lists by name, for example `ShipmentEventList`. Empty lists
    /// are left out.
    pub events: BTreeMap<String, XmlValue>,
    /// Token for the next page, without trailing `=`.
    pub next_token: Option<String>,
}

impl FinancialEventsPage {
    pub(crate) fn from_result(result: Option<&XmlValue>) -> Self {
        let Some(result) = result else {
            return Self::default();
        };
        let events = result
            .get("FinancialEvents")
            .and_then(XmlValue::as_map)
            .map(|lists| {
                lists
                    .entries()
                    .filter(|(_, list)| !list.is_empty())
                    .map(|(name, list)| (name.to_string(), list.clone()))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            events,
            next_token: result
                .get_text("NextToken")
                .map(|token| token.trim_end_matches('='))
                .filter(|token| !token.is_empty())
                .map(str::to_string),
        }
    }

    /// Events of one list, e.g. `events_of("ShipmentEventList", "ShipmentEvent")`.
    pub fn events_of(&self, list: &str, event: &str) -> Vec<&XmlValue> {
        self.events
            .get(list)
            .map(|list| children(list, event))
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// Inventory

/// A `member` of `InventorySupplyList`.
#[derive(Debug, Clone, PartialEq)]
pub struct InventorySupply {
    pub seller_sku: String,
    pub asin: Option<String>,
    pub fnsku: Option<String>,
    pub condition: Option<String>,
    pub total_supply_quantity: u32,
    pub in_stock_supply_quantity: u32,
    pub raw: XmlValue,
}

impl InventorySupply {
    pub fn from_xml(value: &XmlValue) -> Self {
        Self {
            seller_sku: text_or_default(value, "SellerSKU"),
            asin: text(value, "ASIN"),
            fnsku: text(value, "FNSKU"),
            condition: text(value, "Condition"),
            total_supply_quantity: number(value, "TotalSupplyQuantity"),
            in_stock_supply_quantity: number(value, "InStockSupplyQuantity"),
            raw: value.clone(),
        }
    }
}

// Sellers

/// A `Participation` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participation {
    pub marketplace_id: String,
    pub seller_id: String,
    pub has_seller_suspended_listings: bool,
}

/// A `Marketplace` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketplaceInfo {
    pub marketplace_id: String,
    pub name: String,
    pub default_country_code: Option<String>,
    pub default_currency_code: Option<String>,
    pub default_language_code: Option<String>,
    pub domain_name: Option<String>,
}

/// Marketplaces the seller can sell in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MarketplaceParticipations {
    pub participations: Vec<Participation>,
    pub marketplaces: Vec<MarketplaceInfo>,
}

impl MarketplaceParticipations {
    pub(crate) fn from_result(result: &XmlValue) -> Self {
        let participations = result
            .get("ListParticipations")
            .map(|list| children(list, "Participation"))
            .unwrap_or_default()
            .into_iter()
            .map(|p| Participation {
                marketplace_id: text_or_default(p, "MarketplaceId"),
                seller_id: text_or_default(p, "SellerId"),
                has_seller_suspended_listings: p.get_text("HasSellerSuspendedListings")
                    == Some("Yes"),
            })
            .collect();
        let marketplaces = result
            .get("ListMarketplaces")
            .map(|list| children(list, "Marketplace"))
            .unwrap_or_default()
            .into_iter()
            .map(|m| MarketplaceInfo {
                marketplace_id: text_or_default(m, "MarketplaceId"),
                name: text_or_default(m, "Name"),
                default_country_code: text(m, "DefaultCountryCode"),
                default_currency_code: text(m, "DefaultCurrencyCode"),
                default_language_code: text(m, "DefaultLanguageCode"),
                domain_name: text(m, "DomainName"),
            })
            .collect();
        Self {
            participations,
            marketplaces,
        }
    }

    pub fn participates_in(&self, marketplace_id: &str) -> bool {
        self.participations.iter().any(|p| p.marketplace_id == marketplace_id)
    }
}
