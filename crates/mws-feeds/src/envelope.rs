//! `AmazonEnvelope` XML feeds.

use std::collections::HashSet;

use mws_client::xml::{encode_document, XmlValue};
use mws_client::{BodyFormat, FeedCharset, RequestBody};
use rand::Rng;

use crate::error::{Error, ErrorKind, Result};

/// Root element of every XML feed.
pub const ENVELOPE_ROOT: &str = "AmazonEnvelope";
/// `Header/DocumentVersion`.
pub const DOCUMENT_VERSION: &str = "1.01";

const MAX_MESSAGE_ID: u32 = i32::MAX as u32;

/// Kind of messages carried by an envelope. Also names the payload element
/// of each message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Product,
    Inventory,
    Price,
    OrderFulfillment,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Product => "Product",
            MessageType::Inventory => "Inventory",
            MessageType::Price => "Price",
            MessageType::OrderFulfillment => "OrderFulfillment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Update,
    Delete,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Update => "Update",
            OperationType::Delete => "Delete",
        }
    }
}

/// One message of an envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedMessage {
    /// Caller-chosen id; a random one is assigned when `None`.
    pub message_id: Option<u32>,
    pub operation_type: OperationType,
    pub payload: XmlValue,
}

impl FeedMessage {
    pub fn new(operation_type: OperationType, payload: XmlValue) -> Self {
        Self {
            message_id: None,
            operation_type,
            payload,
        }
    }

    pub fn with_message_id(mut self, id: u32) -> Self {
        self.message_id = Some(id);
        self
    }
}

/// An XML feed: header, message type and messages.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEnvelope {
    pub message_type: MessageType,
    pub messages: Vec<FeedMessage>,
}

impl FeedEnvelope {
    pub fn new(message_type: MessageType) -> Self {
        Self {
            message_type,
            messages: Vec::new(),
        }
    }

    pub fn push(&mut self, message: FeedMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: FeedMessage) -> Self {
        self.push(message);
        self
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Message ids in order, generating random unique ids for messages
    /// without one. Duplicate caller ids are rejected.
    fn message_ids(&self) -> Result<Vec<u32>> {
        let mut used = HashSet::new();
        for id in self.messages.iter().filter_map(|m| m.message_id) {
            if !used.insert(id) {
                return Err(Error::new(ErrorKind::Validation(format!(
                    "duplicate MessageID {id}"
                ))));
            }
        }

        let mut rng = rand::rng();
        Ok(self
            .messages
            .iter()
            .map(|m| {
                m.message_id.unwrap_or_else(|| loop {
                    let id = rng.random_range(1..=MAX_MESSAGE_ID);
                    if used.insert(id) {
                        break id;
                    }
                })
            })
            .collect())
    }

    /// The envelope as an XML tree rooted below `AmazonEnvelope`.
    pub fn to_xml_value(&self, merchant_id: &str) -> Result<XmlValue> {
        let ids = self.message_ids()?;
        let messages = self
            .messages
            .iter()
            .zip(ids)
            .map(|(message, id)| {
                XmlValue::map([
                    ("MessageID", XmlValue::text(id.to_string())),
                    ("OperationType", XmlValue::text(message.operation_type.as_str())),
                    (self.message_type.as_str(), message.payload.clone()),
                ])
            })
            .collect();

        Ok(XmlValue::map([
            (
                "Header",
                XmlValue::map([
                    ("DocumentVersion", XmlValue::text(DOCUMENT_VERSION)),
                    ("MerchantIdentifier", XmlValue::text(merchant_id)),
                ]),
            ),
            ("MessageType", XmlValue::text(self.message_type.as_str())),
            ("Message", XmlValue::List(messages)),
        ]))
    }

    /// Serialize to an XML string declaring `charset`.
    pub fn to_xml(&self, merchant_id: &str, charset: FeedCharset) -> Result<String> {
        let value = self.to_xml_value(merchant_id)?;
        Ok(encode_document(ENVELOPE_ROOT, &value, charset.label())?)
    }

    /// Serialize and encode into `charset`.
    pub fn to_request_body(&self, merchant_id: &str, charset: FeedCharset) -> Result<RequestBody> {
        let xml = self.to_xml(merchant_id, charset)?;
        let content = charset.encode(&xml)?;
        Ok(RequestBody::new(content, BodyFormat::Xml, charset))
    }
}
