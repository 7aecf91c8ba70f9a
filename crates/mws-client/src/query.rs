//! Canonical query construction.
//!
//! Parameters live in a `BTreeMap`, so iteration is always in byte-wise key
//! order and the canonical form does not depend on insertion order.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::credentials::MwsCredentials;
use crate::error::{Error, Result};
use crate::operation::OperationDescriptor;
use crate::signer;

/// Format of the `Timestamp` parameter and of every date sent to MWS.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.000Z";

/// Default marketplace key injected when no marketplace is given.
pub const MARKETPLACE_ID_KEY: &str = "MarketplaceId.Id.1";

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Bool(bool),
    /// Explicitly omitted. The key suppresses any default and is dropped
    /// from the final query.
    Absent,
}

impl ParamValue {
    fn render(&self) -> Option<String> {
        match self {
            ParamValue::Str(s) => Some(s.clone()),
            ParamValue::Bool(b) => Some(b.to_string()),
            ParamValue::Absent => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Str(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

macro_rules! param_from_number {
    ($($ty:ty),*) => {
        $(impl From<$ty> for ParamValue {
            fn from(value: $ty) -> Self {
                ParamValue::Str(value.to_string())
            }
        })*
    };
}

param_from_number!(u8, u16, u32, u64, usize, i32, i64);

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ParamValue::Absent)
    }
}

/// Operation parameters keyed by MWS parameter name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: BTreeMap<String, ParamValue>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a parameter only when a value is given.
    pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<impl Into<ParamValue>>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Format a date the way MWS expects and set it.
    pub fn insert_date(&mut self, key: impl Into<String>, date: DateTime<Utc>) {
        self.insert(key, format_timestamp(date));
    }

    /// Flatten a list into 1-based indexed keys: `{prefix}.1`, `{prefix}.2`, ...
    pub fn insert_list<I, V>(&mut self, prefix: &str, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        for (index, value) in values.into_iter().enumerate() {
            self.insert(format!("{prefix}.{}", index + 1), value);
        }
    }

    /// Mark a key as explicitly omitted.
    pub fn omit(&mut self, key: impl Into<String>) {
        self.values.insert(key.into(), ParamValue::Absent);
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.values.remove(key)
    }

    /// Whether the key is present, including as [`ParamValue::Absent`].
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    /// Rendered string value of a key, if set.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.values.get(key).and_then(ParamValue::render)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn merge(&mut self, other: QueryParams) {
        self.values.extend(other.values);
    }

    /// Rendered `(key, value)` pairs in canonical order with omitted keys
    /// dropped.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .filter_map(|(k, v)| v.render().map(|v| (k.clone(), v)))
            .collect()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// Format a UTC instant as `YYYY-MM-DDTHH:MM:SS.000Z`.
pub fn format_timestamp(date: DateTime<Utc>) -> String {
    date.format(TIMESTAMP_FORMAT).to_string()
}

/// RFC 3986 percent-encoding: only `A-Z a-z 0-9 - _ . ~` stay literal.
pub fn encode_component(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Join `(key, value)` pairs into an encoded query string.
pub fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Reject batches larger than MWS accepts for a single call.
pub fn ensure_max_items<T>(items: &[T], max: usize, what: &str) -> Result<()> {
    if items.len() > max {
        return Err(Error::validation(format!(
            "Maximum amount of {what} for this call is {max}"
        )));
    }
    Ok(())
}

/// Merge the common parameters with the operation's own.
///
/// Operation keys overwrite the defaults. `MarketplaceId.Id.1` is injected
/// unless present (in any form), then dropped again when the operation
/// names its marketplaces through `MarketplaceId` or
/// `MarketplaceIdList.Id.1`.
pub fn assemble(
    operation: &OperationDescriptor,
    credentials: &MwsCredentials,
    params: QueryParams,
    timestamp: DateTime<Utc>,
) -> QueryParams {
    let mut query = QueryParams::new()
        .with("Timestamp", format_timestamp(timestamp))
        .with("AWSAccessKeyId", credentials.access_key_id())
        .with("Action", operation.action)
        .with("SellerId", credentials.seller_id())
        .with("SignatureMethod", signer::SIGNATURE_METHOD)
        .with("SignatureVersion", signer::SIGNATURE_VERSION)
        .with("Version", operation.version);

    query.merge(params);

    if !query.contains_key(MARKETPLACE_ID_KEY) {
        query.insert(MARKETPLACE_ID_KEY, credentials.marketplace_id());
    }

    if let Some(token) = credentials.auth_token() {
        query.insert("MWSAuthToken", token);
    }

    if query.contains_key("MarketplaceId") || query.contains_key("MarketplaceIdList.Id.1") {
        query.remove(MARKETPLACE_ID_KEY);
    }

    query
}
