//! Typed payloads for the XML feeds.

use chrono::{DateTime, Utc};
use mws_client::query::format_timestamp;
use mws_client::xml::XmlValue;

use crate::error::{Error, ErrorKind, Result};

/// Currency attribute value that tells MWS to use the marketplace currency.
pub const DEFAULT_CURRENCY: &str = "DEFAULT";

fn push_opt(entries: &mut Vec<(&'static str, XmlValue)>, key: &'static str, value: Option<String>) {
    if let Some(value) = value {
        entries.push((key, XmlValue::Text(value)));
    }
}

/// One row of an inventory availability feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryUpdate {
    pub sku: String,
    pub fulfillment_center_id: Option<String>,
    pub quantity: Option<u32>,
    pub available: Option<bool>,
    /// `FulfillmentNetwork` lets Amazon derive availability.
    pub lookup: Option<String>,
    pub fulfillment_latency: Option<u32>,
    pub switch_fulfillment_to: Option<String>,
}

impl InventoryUpdate {
    /// Set the quantity of a merchant-fulfilled SKU.
    pub fn quantity(sku: impl Into<String>, quantity: u32) -> Self {
        Self {
            sku: sku.into(),
            fulfillment_center_id: None,
            quantity: Some(quantity),
            available: None,
            lookup: None,
            fulfillment_latency: None,
            switch_fulfillment_to: None,
        }
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    pub fn with_lookup(mut self, lookup: impl Into<String>) -> Self {
        self.lookup = Some(lookup.into());
        self
    }

    pub fn with_fulfillment_latency(mut self, days: u32) -> Self {
        self.fulfillment_latency = Some(days);
        self
    }

    pub fn with_fulfillment_center(mut self, id: impl Into<String>) -> Self {
        self.fulfillment_center_id = Some(id.into());
        self
    }

    /// Switch the SKU to `MFN` or `AFN`.
    pub fn with_switch_fulfillment_to(mut self, channel: impl Into<String>) -> Self {
        self.switch_fulfillment_to = Some(channel.into());
        self
    }

    pub fn to_xml_value(&self) -> XmlValue {
        let mut entries = vec![("SKU", XmlValue::text(&self.sku))];
        push_opt(&mut entries, "FulfillmentCenterID", self.fulfillment_center_id.clone());
        push_opt(&mut entries, "Available", self.available.map(|a| a.to_string()));
        push_opt(&mut entries, "Quantity", self.quantity.map(|q| q.to_string()));
        push_opt(&mut entries, "Lookup", self.lookup.clone());
        push_opt(
            &mut entries,
            "FulfillmentLatency",
            self.fulfillment_latency.map(|l| l.to_string()),
        );
        push_opt(&mut entries, "SwitchFulfillmentTo", self.switch_fulfillment_to.clone());
        XmlValue::map(entries)
    }
}

/// A temporary sale price.
#[derive(Debug, Clone, PartialEq)]
pub struct Sale {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub price: String,
}

/// One row of a price feed.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceUpdate {
    pub sku: String,
    pub price: String,
    pub currency: String,
    pub sale: Option<Sale>,
}

impl PriceUpdate {
    pub fn new(sku: impl Into<String>, price: impl ToString) -> Self {
        Self {
            sku: sku.into(),
            price: price.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            sale: None,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_sale(
        mut self,
        price: impl ToString,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        self.sale = Some(Sale {
            start_date,
            end_date,
            price: price.to_string(),
        });
        self
    }

    pub fn to_xml_value(&self) -> XmlValue {
        let currency = [("currency", self.currency.as_str())];
        let mut entries = vec![
            ("SKU", XmlValue::text(&self.sku)),
            ("StandardPrice", XmlValue::text_with_attributes(&self.price, currency)),
        ];
        if let Some(sale) = &self.sale {
            entries.push((
                "Sale",
                XmlValue::map([
                    ("StartDate", XmlValue::text(format_timestamp(sale.start_date))),
                    ("EndDate", XmlValue::text(format_timestamp(sale.end_date))),
                    ("SalePrice", XmlValue::text_with_attributes(&sale.price, currency)),
                ]),
            ));
        }
        XmlValue::map(entries)
    }
}

/// A shipped order line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FulfillmentItem {
    pub amazon_order_item_code: String,
    pub quantity: u32,
}

/// Shipping confirmation for one order.
///
/// Either a carrier code or a carrier name is required.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderFulfillment {
    pub amazon_order_id: String,
    pub fulfillment_date: DateTime<Utc>,
    pub carrier_code: Option<String>,
    pub carrier_name: Option<String>,
    pub shipping_method: Option<String>,
    pub tracking_number: Option<String>,
    pub items: Vec<FulfillmentItem>,
}

impl OrderFulfillment {
    /// Confirmation dated now with the `Standard` shipping method.
    pub fn new(amazon_order_id: impl Into<String>) -> Self {
        Self {
            amazon_order_id: amazon_order_id.into(),
            fulfillment_date: Utc::now(),
            carrier_code: None,
            carrier_name: None,
            shipping_method: Some("Standard".to_string()),
            tracking_number: None,
            items: Vec::new(),
        }
    }

    pub fn with_carrier_code(mut self, code: impl Into<String>) -> Self {
        self.carrier_code = Some(code.into());
        self
    }

    pub fn with_carrier_name(mut self, name: impl Into<String>) -> Self {
        self.carrier_name = Some(name.into());
        self
    }

    pub fn with_shipping_method(mut self, method: impl Into<String>) -> Self {
        self.shipping_method = Some(method.into());
        self
    }

    pub fn with_tracking_number(mut self, number: impl Into<String>) -> Self {
        self.tracking_number = Some(number.into());
        self
    }

    pub fn with_fulfillment_date(mut self, date: DateTime<Utc>) -> Self {
        self.fulfillment_date = date;
        self
    }

    /// Confirm only part of the order.
    pub fn with_item(mut self, amazon_order_item_code: impl Into<String>, quantity: u32) -> Self {
        self.items.push(FulfillmentItem {
            amazon_order_item_code: amazon_order_item_code.into(),
            quantity,
        });
        self
    }

    /// Reject a confirmation without carrier code or name.
    pub fn validate(&self) -> Result<()> {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        if !present(&self.carrier_code) && !present(&self.carrier_name) {
            return Err(Error::new(ErrorKind::Validation(
                "Missing required carrierCode or carrierName".to_string(),
            )));
        }
        Ok(())
    }

    pub fn to_xml_value(&self) -> Result<XmlValue> {
        self.validate()?;

        let mut data = Vec::new();
        push_opt(&mut data, "CarrierCode", self.carrier_code.clone());
        push_opt(&mut data, "CarrierName", self.carrier_name.clone());
        push_opt(&mut data, "ShippingMethod", self.shipping_method.clone());
        push_opt(&mut data, "ShipperTrackingNumber", self.tracking_number.clone());

        let mut entries = vec![
            ("AmazonOrderID", XmlValue::text(&self.amazon_order_id)),
            ("FulfillmentDate", XmlValue::text(format_timestamp(self.fulfillment_date))),
            ("FulfillmentData", XmlValue::map(data)),
        ];
        if !self.items.is_empty() {
            let items = self
                .items
                .iter()
                .map(|item| {
                    XmlValue::map([
                        ("AmazonOrderItemCode", XmlValue::text(&item.amazon_order_item_code)),
                        ("Quantity", XmlValue::text(item.quantity.to_string())),
                    ])
                })
                .collect();
            entries.push(("Item", XmlValue::List(items)));
        }
        Ok(XmlValue::map(entries))
    }
}
