use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::decode::xml_error;
use super::{XmlMap, XmlValue};
use crate::error::Result;

/// Serialize `value` as the content of a `root` element, with an XML
/// declaration naming `charset`.
///
/// Lists repeat their parent's element name; maps carry attributes and
/// optional text; empty values become self-closing elements.
pub fn encode_document(root: &str, value: &XmlValue, charset: &str) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some(charset), None)))
        .map_err(xml_error)?;
    write_element(&mut writer, root, value)?;

    String::from_utf8(writer.into_inner()).map_err(xml_error)
}

fn write_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &XmlValue) -> Result<()> {
    match value {
        XmlValue::List(items) => {
            for item in items {
                write_element(writer, name, item)?;
            }
        }
        XmlValue::Text(text) if text.is_empty() => {
            writer
                .write_event(Event::Empty(BytesStart::new(name)))
                .map_err(xml_error)?;
        }
        XmlValue::Text(text) => {
            writer
                .write_event(Event::Start(BytesStart::new(name)))
                .map_err(xml_error)?;
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(xml_error)?;
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(xml_error)?;
        }
        XmlValue::Map(map) => write_map(writer, name, map)?,
    }
    Ok(())
}

fn write_map(writer: &mut Writer<Vec<u8>>, name: &str, map: &XmlMap) -> Result<()> {
    let mut start = BytesStart::new(name);
    for (k, v) in map.attributes() {
        start.push_attribute((k.as_str(), v.as_str()));
    }

    if map.len() == 0 && map.text().is_none() {
        writer.write_event(Event::Empty(start)).map_err(xml_error)?;
        return Ok(());
    }

    writer.write_event(Event::Start(start)).map_err(xml_error)?;
    if let Some(text) = map.text() {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_error)?;
    }
    for (child, value) in map.entries() {
        write_element(writer, child, value)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_error)?;
    Ok(())
}
