//! XML tree used for MWS responses and feed envelopes.
//!
//! A document is decoded into an [`XmlValue`] tree: text leaves, ordered
//! maps of child elements, and lists for repeated siblings. Attributes are
//! kept on the map under [`ATTRIBUTES_KEY`] when exported to JSON.
//!
//! ## Single vs repeated elements
//!
//! An element that occurs once decodes to a single value; one that occurs
//! several times decodes to a list. Element names listed in
//! [`DecodeOptions::repeated`] always decode to a list. Consumers that read
//! an element which may occur once or many times use [`XmlValue::items`],
//! which yields a slice-like view in both cases.

mod decode;
mod encode;

pub use decode::{decode, DecodeOptions, PRODUCT_LANGUAGES};
pub use encode::encode_document;

/// Key holding attributes in the JSON export.
pub const ATTRIBUTES_KEY: &str = "@attributes";

/// A decoded XML node.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlValue {
    /// Element with text content only.
    Text(String),
    /// Element with attributes or child elements.
    Map(XmlMap),
    /// Repeated sibling elements sharing one name.
    List(Vec<XmlValue>),
}

/// Ordered child elements plus attributes of one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlMap {
    attributes: Vec<(String, String)>,
    entries: Vec<(String, XmlValue)>,
    text: Option<String>,
}

impl XmlMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Child value by element name.
    pub fn get(&self, key: &str) -> Option<&XmlValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut XmlValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Add a child. A second child with the same name turns the entry into a
    /// list.
    pub fn push(&mut self, key: impl Into<String>, value: XmlValue) {
        let key = key.into();
        match self.get_mut(&key) {
            Some(XmlValue::List(items)) => items.push(value),
            Some(existing) => {
                let first = std::mem::replace(existing, XmlValue::List(Vec::new()));
                *existing = XmlValue::List(vec![first, value]);
            }
            None => self.entries.push((key, value)),
        }
    }

    /// Set a child, replacing any existing entry of that name.
    pub fn insert(&mut self, key: impl Into<String>, value: XmlValue) {
        let key = key.into();
        match self.get_mut(&key) {
            Some(existing) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Insert a child in front of all others.
    pub fn insert_first(&mut self, key: impl Into<String>, value: XmlValue) {
        self.entries.insert(0, (key.into(), value));
    }

    pub fn remove(&mut self, key: &str) -> Option<XmlValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Keep only entries for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &XmlValue) -> bool) {
        self.entries.retain(|(k, v)| keep(k, v));
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &XmlValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_entries(self) -> Vec<(String, XmlValue)> {
        self.entries
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(k, _)| k == name)?;
        Some(self.attributes.remove(index).1)
    }

    /// Text content of an element that also has attributes or children.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// True when there are no children, attributes or text.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.attributes.is_empty() && self.text.is_none()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl XmlValue {
    /// Text element.
    pub fn text(value: impl Into<String>) -> Self {
        XmlValue::Text(value.into())
    }

    /// Element with text content and attributes, e.g.
    /// `<StandardPrice currency="EUR">9.99</StandardPrice>`.
    pub fn text_with_attributes<K, V>(
        value: impl Into<String>,
        attributes: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = XmlMap::new();
        map.set_text(value);
        for (k, v) in attributes {
            map.set_attribute(k, v);
        }
        XmlValue::Map(map)
    }

    /// Map built from `(name, value)` pairs in order.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, XmlValue)>) -> Self {
        let mut map = XmlMap::new();
        for (k, v) in entries {
            map.push(k, v);
        }
        XmlValue::Map(map)
    }

    /// Child by name. `None` for text and list values.
    pub fn get(&self, key: &str) -> Option<&XmlValue> {
        match self {
            XmlValue::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Follow a path of child names.
    pub fn path(&self, keys: &[&str]) -> Option<&XmlValue> {
        keys.iter().try_fold(self, |node, key| node.get(key))
    }

    /// Text content of this value. Maps yield their own text, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            XmlValue::Text(s) => Some(s),
            XmlValue::Map(map) => map.text(),
            XmlValue::List(_) => None,
        }
    }

    /// Text of a child element.
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(XmlValue::as_text)
    }

    /// Text at the end of a path.
    pub fn path_text(&self, keys: &[&str]) -> Option<&str> {
        self.path(keys).and_then(XmlValue::as_text)
    }

    /// Attribute of a map value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            XmlValue::Map(map) => map.attribute(name),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&XmlMap> {
        match self {
            XmlValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut XmlMap> {
        match self {
            XmlValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Elements of a list, or this value alone.
    pub fn items(&self) -> Vec<&XmlValue> {
        match self {
            XmlValue::List(items) => items.iter().collect(),
            other => vec![other],
        }
    }

    /// Owned form of [`items`](Self::items).
    pub fn into_items(self) -> Vec<XmlValue> {
        match self {
            XmlValue::List(items) => items,
            other => vec![other],
        }
    }

    /// True for empty text, an empty map or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            XmlValue::Text(s) => s.is_empty(),
            XmlValue::Map(map) => map.is_empty(),
            XmlValue::List(items) => items.is_empty(),
        }
    }

    /// Export as JSON with attributes under `@attributes` and mixed text
    /// under `#text`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::{Map, Value};

        match self {
            XmlValue::Text(s) => Value::String(s.clone()),
            XmlValue::List(items) => Value::Array(items.iter().map(XmlValue::to_json).collect()),
            XmlValue::Map(map) => {
                let mut object = Map::new();
                if !map.attributes.is_empty() {
                    let attributes = map
                        .attributes
                        .iter()
                        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                        .collect();
                    object.insert(ATTRIBUTES_KEY.to_string(), Value::Object(attributes));
                }
                if let Some(text) = &map.text {
                    object.insert("#text".to_string(), Value::String(text.clone()));
                }
                for (k, v) in &map.entries {
                    object.insert(k.clone(), v.to_json());
                }
                Value::Object(object)
            }
        }
    }
}

/// A decoded document: root element name and its content.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub root: String,
    pub value: XmlValue,
}

impl XmlDocument {
    /// Child of the root element.
    pub fn get(&self, key: &str) -> Option<&XmlValue> {
        self.value.get(key)
    }

    /// Path below the root element.
    pub fn path(&self, keys: &[&str]) -> Option<&XmlValue> {
        self.value.path(keys)
    }

    pub fn path_text(&self, keys: &[&str]) -> Option<&str> {
        self.value.path_text(keys)
    }

    pub fn into_value(self) -> XmlValue {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_promotes_to_list() {
        let mut map = XmlMap::new();
        map.push("Order", XmlValue::text("1"));
        map.push("Order", XmlValue::text("2"));
        map.push("Order", XmlValue::text("3"));
        map.push("NextToken", XmlValue::text("t"));

        let orders = map.get("Order").unwrap();
        assert_eq!(orders.items().len(), 3);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_items_wraps_single_value() {
        let single = XmlValue::text("only");
        assert_eq!(single.items(), vec![&XmlValue::text("only")]);
        assert_eq!(single.into_items().len(), 1);
    }

    #[test]
    fn test_path_lookup() {
        let value = XmlValue::map([(
            "ListOrdersResult",
            XmlValue::map([("NextToken", XmlValue::text("abc"))]),
        )]);
        assert_eq!(value.path_text(&["ListOrdersResult", "NextToken"]), Some("abc"));
        assert!(value.path(&["ListOrdersResult", "Orders"]).is_none());
    }

    #[test]
    fn test_to_json_layout() {
        let value = XmlValue::map([
            ("Price", XmlValue::text_with_attributes("9.99", [("currency", "EUR")])),
            ("SKU", XmlValue::text("A1")),
        ]);
        assert_eq!(
            value.to_json(),
            serde_json::json!({
                "Price": {"@attributes": {"currency": "EUR"}, "#text": "9.99"},
                "SKU": "A1"
            })
        );
    }
}
