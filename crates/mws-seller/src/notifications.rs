//! Destinations and subscriptions for MWS push notifications.

use std::fmt;
use std::str::FromStr;

use mws_client::{QueryParams, XmlValue};
use serde::Serialize;

use crate::error::{Error, ErrorKind};

/// Delivery channel used when none is given.
pub const DEFAULT_DELIVERY_CHANNEL: &str = "SQS";

/// Attribute key of the queue URL for SQS destinations.
pub const SQS_QUEUE_URL: &str = "sqsQueueUrl";

/// Notification types a subscription can be created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NotificationType {
    AnyOfferChanged,
    FeedProcessingFinished,
    #[serde(rename = "FBAOutboundShipmentStatus")]
    FbaOutboundShipmentStatus,
    FeePromotion,
    FulfillmentOrderStatus,
    ReportProcessingFinished,
}

impl NotificationType {
    pub const ALL: [NotificationType; 6] = [
        NotificationType::AnyOfferChanged,
        NotificationType::FeedProcessingFinished,
        NotificationType::FbaOutboundShipmentStatus,
        NotificationType::FeePromotion,
        NotificationType::FulfillmentOrderStatus,
        NotificationType::ReportProcessingFinished,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::AnyOfferChanged => "AnyOfferChanged",
            NotificationType::FeedProcessingFinished => "FeedProcessingFinished",
            NotificationType::FbaOutboundShipmentStatus => "FBAOutboundShipmentStatus",
            NotificationType::FeePromotion => "FeePromotion",
            NotificationType::FulfillmentOrderStatus => "FulfillmentOrderStatus",
            NotificationType::ReportProcessingFinished => "ReportProcessingFinished",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                Error::new(ErrorKind::Validation(format!("Unknown notification type: {s}")))
            })
    }
}

/// Where notifications are delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    pub delivery_channel: String,
    /// Key/value pairs in insertion order.
    pub attributes: Vec<(String, String)>,
}

impl Default for Destination {
    fn default() -> Self {
        Self::new(DEFAULT_DELIVERY_CHANNEL)
    }
}

impl Destination {
    pub fn new(delivery_channel: impl Into<String>) -> Self {
        Self {
            delivery_channel: delivery_channel.into(),
            attributes: Vec::new(),
        }
    }

    /// An SQS destination for `queue_url`.
    pub fn sqs(queue_url: impl Into<String>) -> Self {
        Self::default().with_attribute(SQS_QUEUE_URL, queue_url)
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attribute(key, value);
        self
    }

    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((key.into(), value.into()));
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Write `{prefix}.DeliveryChannel` and the indexed attribute list.
    pub(crate) fn write_params(&self, prefix: &str, params: &mut QueryParams) {
        params.insert(format!("{prefix}.DeliveryChannel"), &self.delivery_channel);
        for (index, (key, value)) in self.attributes.iter().enumerate() {
            let member = format!("{prefix}.AttributeList.member.{}", index + 1);
            params.insert(format!("{member}.Key"), key);
            params.insert(format!("{member}.Value"), value);
        }
    }

    /// Read a `Destination` element of a list response.
    pub fn from_xml(value: &XmlValue) -> Self {
        let mut destination = Self::new(value.get_text("DeliveryChannel").unwrap_or_default());
        if let Some(members) = value.path(&["AttributeList", "member"]) {
            for member in members.items() {
                destination.add_attribute(
                    member.get_text("Key").unwrap_or_default(),
                    member.get_text("Value").unwrap_or_default(),
                );
            }
        }
        destination
    }
}

/// A notification type bound to a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscription {
    /// Kept as text so types MWS adds later still round-trip.
    pub notification_type: String,
    pub destination: Destination,
    pub is_enabled: bool,
}

impl Subscription {
    /// An enabled subscription.
    pub fn new(notification_type: NotificationType, destination: Destination) -> Self {
        Self {
            notification_type: notification_type.as_str().to_string(),
            destination,
            is_enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.is_enabled = enabled;
        self
    }

    /// The notification type, if it is one this crate knows.
    pub fn kind(&self) -> Option<NotificationType> {
        self.notification_type.parse().ok()
    }

    /// Read a `member` element of `ListSubscriptions`.
    pub fn from_xml(value: &XmlValue) -> Self {
        Self {
            notification_type: value.get_text("NotificationType").unwrap_or_default().to_string(),
            destination: value
                .get("Destination")
                .map(Destination::from_xml)
                .unwrap_or_default(),
            is_enabled: value.get_text("IsEnabled") == Some("true"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_type_parse() {
        for kind in NotificationType::ALL {
            assert_eq!(kind.as_str().parse::<NotificationType>().unwrap(), kind);
        }
        let err = "OrderChanged".parse::<NotificationType>().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_destination_params() {
        let destination = Destination::sqs("https://sqs.eu-west-1.amazonaws.com/1/queue")
            .with_attribute("extra", "x");
        let mut params = QueryParams::new();
        destination.write_params("Subscription.Destination", &mut params);

        assert_eq!(
            params.get_str("Subscription.Destination.DeliveryChannel").as_deref(),
            Some("SQS")
        );
        assert_eq!(
            params.get_str("Subscription.Destination.AttributeList.member.1.Key").as_deref(),
            Some(SQS_QUEUE_URL)
        );
        assert_eq!(
            params.get_str("Subscription.Destination.AttributeList.member.2.Value").as_deref(),
            Some("x")
        );
    }
}
