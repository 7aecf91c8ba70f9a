use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{XmlDocument, XmlMap, XmlValue};
use crate::error::{Error, ErrorKind, Result};
use crate::operation::OperationDescriptor;

/// Locales whose `ItemAttributes` namespace is turned into a `Language`
/// child in product responses.
pub const PRODUCT_LANGUAGES: &[&str] = &[
    "de-DE", "en-EN", "es-ES", "fr-FR", "it-IT", "en-US", "pt-BR",
];

/// Decoder settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions<'a> {
    /// Element names always decoded as lists.
    pub repeated: &'a [&'a str],
    /// Move the `xml:lang` of `ItemAttributes` into a `Language` child.
    pub product_attributes: bool,
}

impl<'a> DecodeOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repeated(mut self, names: &'a [&'a str]) -> Self {
        self.repeated = names;
        self
    }

    pub fn with_product_attributes(mut self, enabled: bool) -> Self {
        self.product_attributes = enabled;
        self
    }
}

impl DecodeOptions<'static> {
    /// Options matching the response schema of `operation`.
    pub fn for_operation(operation: &OperationDescriptor) -> Self {
        Self {
            repeated: operation.repeated,
            product_attributes: operation.product_attributes,
        }
    }
}

struct Frame {
    name: String,
    map: XmlMap,
    text: String,
}

impl Frame {
    fn into_value(self) -> (String, XmlValue) {
        let Frame {
            name,
            mut map,
            text,
        } = self;
        let value = if map.is_empty() && !text.is_empty() {
            XmlValue::Text(text)
        } else {
            if !text.is_empty() {
                map.set_text(text);
            }
            XmlValue::Map(map)
        };
        (name, value)
    }
}

pub(crate) fn xml_error(err: impl std::fmt::Display) -> Error {
    Error::new(ErrorKind::Xml(err.to_string()))
}

/// Decode an XML document.
///
/// Element names lose their namespace prefix and `xmlns` declarations are
/// dropped. The root element's content becomes [`XmlDocument::value`].
/// Malformed input is an error.
pub fn decode(input: &[u8], options: &DecodeOptions<'_>) -> Result<XmlDocument> {
    let text = to_utf8(input)?;
    let mut reader = Reader::from_str(&text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, XmlValue)> = None;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(xml_error("content after the root element"));
                }
                stack.push(open(&start, options)?);
            }
            Event::Empty(start) => {
                if root.is_some() {
                    return Err(xml_error("content after the root element"));
                }
                let frame = open(&start, options)?;
                close(frame, &mut stack, &mut root, options);
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| xml_error("unexpected closing tag"))?;
                close(frame, &mut stack, &mut root, options);
            }
            Event::Text(t) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&t.unescape().map_err(xml_error)?);
                }
            }
            Event::CData(c) => {
                if let Some(frame) = stack.last_mut() {
                    let data = c.into_inner();
                    frame
                        .text
                        .push_str(std::str::from_utf8(&data).map_err(xml_error)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(xml_error(format!("unclosed element <{}>", open.name)));
    }

    let (root, value) = root.ok_or_else(|| xml_error("document has no root element"))?;
    Ok(XmlDocument { root, value })
}

fn open(start: &BytesStart<'_>, options: &DecodeOptions<'_>) -> Result<Frame> {
    let name = std::str::from_utf8(start.local_name().as_ref())
        .map_err(xml_error)?
        .to_string();

    let mut map = XmlMap::new();
    for attr in start.attributes() {
        let attr = attr.map_err(xml_error)?;
        let key = std::str::from_utf8(attr.key.as_ref()).map_err(xml_error)?;
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }
        let value = attr.unescape_value().map_err(xml_error)?;
        map.set_attribute(key, value.into_owned());
    }

    if options.product_attributes && name == "ItemAttributes" {
        let lang = map.attribute("xml:lang").map(str::to_string);
        if let Some(lang) = lang.filter(|l| PRODUCT_LANGUAGES.contains(&l.as_str())) {
            map.remove_attribute("xml:lang");
            map.insert_first("Language", XmlValue::Text(lang));
        }
    }

    Ok(Frame {
        name,
        map,
        text: String::new(),
    })
}

fn close(
    frame: Frame,
    stack: &mut [Frame],
    root: &mut Option<(String, XmlValue)>,
    options: &DecodeOptions<'_>,
) {
    let (name, value) = frame.into_value();
    match stack.last_mut() {
        Some(parent) => {
            if options.repeated.contains(&name.as_str()) && parent.map.get(&name).is_none() {
                parent.map.push(name, XmlValue::List(vec![value]));
            } else {
                parent.map.push(name, value);
            }
        }
        None => *root = Some((name, value)),
    }
}

/// Convert the input to UTF-8, honoring a non-UTF-8 encoding declared in
/// the XML declaration.
fn to_utf8(input: &[u8]) -> Result<Cow<'_, str>> {
    if let Some(encoding) = declared_encoding(input)
        .and_then(encoding_rs::Encoding::for_label)
        .filter(|e| *e != encoding_rs::UTF_8)
    {
        let (text, had_errors) = encoding.decode_without_bom_handling(input);
        if had_errors {
            return Err(Error::new(ErrorKind::Encoding(format!(
                "document is not valid {}",
                encoding.name()
            ))));
        }
        return Ok(text);
    }

    let input = input.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(input);
    std::str::from_utf8(input)
        .map(Cow::Borrowed)
        .map_err(|e| Error::with_source(ErrorKind::Encoding(e.to_string()), e))
}

fn declared_encoding(input: &[u8]) -> Option<&[u8]> {
    let decl = input.strip_prefix(b"<?xml")?;
    let end = decl.windows(2).position(|w| w == b"?>")?;
    let decl = &decl[..end];
    let start = decl.windows(9).position(|w| w == b"encoding=")? + 9;
    let rest = &decl[start..];
    let quote = *rest.first()?;
    let rest = &rest[1..];
    let close = rest.iter().position(|b| *b == quote)?;
    Some(&rest[..close])
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_ORDERS: &str = r#"<?xml version="1.0"?>
<ListOrdersResponse xmlns="https://mws.amazonservices.com/Orders/2013-09-01">
  <ListOrdersResult>
    <NextToken>2YgYW55IGNhcm5hbCBwbGVhc3VyZS4=</NextToken>
    <Orders>
      <Order>
        <AmazonOrderId>902-3159896-1390916</AmazonOrderId>
        <OrderTotal><CurrencyCode>USD</CurrencyCode><Amount>25.00</Amount></OrderTotal>
      </Order>
    </Orders>
  </ListOrdersResult>
  <ResponseMetadata><RequestId>88faca76-b600-46d2-b53c-0c8c4533e43a</RequestId></ResponseMetadata>
</ListOrdersResponse>"#;

    #[test]
    fn test_decode_nested_document() {
        let doc = decode(LIST_ORDERS.as_bytes(), &DecodeOptions::new()).unwrap();
        assert_eq!(doc.root, "ListOrdersResponse");
        assert_eq!(
            doc.path_text(&["ListOrdersResult", "NextToken"]),
            Some("2YgYW55IGNhcm5hbCBwbGVhc3VyZS4=")
        );
        let order = doc.path(&["ListOrdersResult", "Orders", "Order"]).unwrap();
        assert!(matches!(order, XmlValue::Map(_)));
        assert_eq!(order.path_text(&["OrderTotal", "Amount"]), Some("25.00"));
    }

    #[test]
    fn test_repeated_option_forces_list() {
        let options = DecodeOptions::new().with_repeated(&["Order"]);
        let doc = decode(LIST_ORDERS.as_bytes(), &options).unwrap();
        let orders = doc.path(&["ListOrdersResult", "Orders", "Order"]).unwrap();
        match orders {
            XmlValue::List(items) => assert_eq!(items.len(), 1),
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_single_item_matches_first_of_many() {
        let one = "<R><L><I><A>1</A></I></L></R>";
        let two = "<R><L><I><A>1</A></I><I><A>2</A></I></L></R>";

        for options in [DecodeOptions::new(), DecodeOptions::new().with_repeated(&["I"])] {
            let single = decode(one.as_bytes(), &options).unwrap();
            let pair = decode(two.as_bytes(), &options).unwrap();

            let single_items = single.path(&["L", "I"]).unwrap().items();
            let mut pair_items = pair.path(&["L", "I"]).unwrap().items();
            assert_eq!(pair_items.len(), 2);
            pair_items.truncate(1);
            assert_eq!(single_items, pair_items);

            let owned = single.path(&["L", "I"]).unwrap().clone().into_items();
            let mut pair_owned = pair.path(&["L", "I"]).unwrap().clone().into_items();
            pair_owned.truncate(1);
            assert_eq!(owned, pair_owned);
            assert_eq!(owned[0].get_text("A"), Some("1"));
        }
    }

    #[test]
    fn test_repeated_siblings_become_list() {
        let xml = "<R><Item>a</Item><Item>b</Item><Other>c</Other></R>";
        let doc = decode(xml.as_bytes(), &DecodeOptions::new()).unwrap();
        let items: Vec<_> = doc
            .get("Item")
            .unwrap()
            .items()
            .into_iter()
            .filter_map(XmlValue::as_text)
            .collect();
        assert_eq!(items, vec!["a", "b"]);
        assert_eq!(doc.get("Other").and_then(XmlValue::as_text), Some("c"));
    }

    #[test]
    fn test_attributes_and_text() {
        let xml = r#"<R><Price currency="USD">10.00</Price><Empty/></R>"#;
        let doc = decode(xml.as_bytes(), &DecodeOptions::new()).unwrap();
        let price = doc.get("Price").unwrap();
        assert_eq!(price.attribute("currency"), Some("USD"));
        assert_eq!(price.as_text(), Some("10.00"));
        assert!(doc.get("Empty").unwrap().is_empty());
    }

    #[test]
    fn test_entities_unescaped() {
        let doc = decode(b"<R><T>Fish &amp; Chips</T></R>", &DecodeOptions::new()).unwrap();
        assert_eq!(doc.get("T").and_then(XmlValue::as_text), Some("Fish & Chips"));
    }

    #[test]
    fn test_product_language_normalization() {
        let xml = r#"<GetMatchingProductForIdResponse xmlns:ns2="http://mws.amazonservices.com/schema/Products/2011-10-01/default.xsd">
  <GetMatchingProductForIdResult Id="B00TEST" IdType="ASIN" status="Success">
    <Products><Product><AttributeSets>
      <ns2:ItemAttributes xml:lang="de-DE"><ns2:Title>Becher</ns2:Title></ns2:ItemAttributes>
    </AttributeSets></Product></Products>
  </GetMatchingProductForIdResult>
</GetMatchingProductForIdResponse>"#;
        let options = DecodeOptions::new().with_product_attributes(true);
        let doc = decode(xml.as_bytes(), &options).unwrap();
        let attrs = doc
            .path(&[
                "GetMatchingProductForIdResult",
                "Products",
                "Product",
                "AttributeSets",
                "ItemAttributes",
            ])
            .unwrap();
        let map = attrs.as_map().unwrap();
        assert_eq!(map.entries().next().map(|(k, _)| k), Some("Language"));
        assert_eq!(attrs.get_text("Language"), Some("de-DE"));
        assert_eq!(attrs.get_text("Title"), Some("Becher"));
        assert_eq!(attrs.attribute("xml:lang"), None);
    }

    #[test]
    fn test_unknown_language_kept_as_attribute() {
        let xml = concat!(
            r#"<R><ns2:ItemAttributes xml:lang="nl-NL">"#,
            "<ns2:Title>Beker</ns2:Title></ns2:ItemAttributes></R>",
        );
        let options = DecodeOptions::new().with_product_attributes(true);
        let doc = decode(xml.as_bytes(), &options).unwrap();
        let attrs = doc.get("ItemAttributes").unwrap();
        assert_eq!(attrs.get_text("Language"), None);
        assert_eq!(attrs.attribute("xml:lang"), Some("nl-NL"));
    }

    #[test]
    fn test_malformed_documents() {
        let options = DecodeOptions::new();
        assert!(decode(b"", &options).unwrap_err().is_decode());
        assert!(decode(b"not xml at all", &options).unwrap_err().is_decode());
        assert!(decode(b"<a><b></a>", &options).unwrap_err().is_decode());
        assert!(decode(b"<a><b>", &options).unwrap_err().is_decode());
    }

    #[test]
    fn test_declared_latin1_encoding() {
        let mut xml = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><R><T>".to_vec();
        xml.push(0xE9);
        xml.extend_from_slice(b"</T></R>");
        let doc = decode(&xml, &DecodeOptions::new()).unwrap();
        assert_eq!(doc.get("T").and_then(XmlValue::as_text), Some("é"));
    }
}
