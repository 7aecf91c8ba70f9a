//! Response interpretation and error classification.

use crate::error::{Error, ErrorKind, Result};
use crate::transport::TransportResponse;
use crate::xml::{self, DecodeOptions, XmlDocument};

/// Marker of an MWS error document.
const ERROR_RESPONSE_MARKER: &str = "<ErrorResponse";

/// Body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Decoded XML document.
    Xml(XmlDocument),
    /// Non-XML payload such as a tab-delimited report.
    Text(String),
}

impl ResponseBody {
    pub fn as_xml(&self) -> Option<&XmlDocument> {
        match self {
            ResponseBody::Xml(doc) => Some(doc),
            ResponseBody::Text(_) => None,
        }
    }

    pub fn into_xml(self) -> Result<XmlDocument> {
        match self {
            ResponseBody::Xml(doc) => Ok(doc),
            ResponseBody::Text(_) => Err(Error::new(ErrorKind::InvalidResponse(
                "expected an XML response".to_string(),
            ))),
        }
    }
}

/// Whether a Content-Type denotes XML.
pub fn is_xml_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "text/xml" || mime == "application/xml" || mime.ends_with("+xml")
}

/// Decode a successful response: XML when the Content-Type says so (or the
/// body looks like XML and no type was sent), text otherwise.
pub fn interpret(
    response: &TransportResponse,
    options: &DecodeOptions<'_>,
) -> Result<ResponseBody> {
    let is_xml = match response.content_type() {
        Some(content_type) => is_xml_content_type(content_type),
        None => response.body().starts_with(b"<?xml"),
    };
    if is_xml {
        xml::decode(response.body(), options).map(ResponseBody::Xml)
    } else {
        response.text().map(ResponseBody::Text)
    }
}

/// Turn a non-2xx response into an error.
///
/// MWS error documents yield their `Error/Code` and `Error/Message`;
/// anything else yields a message naming the status and an empty code.
pub fn classify(response: &TransportResponse) -> Error {
    let status = response.status();
    let body = String::from_utf8_lossy(response.body());

    if body.contains(ERROR_RESPONSE_MARKER) {
        if let Ok(doc) = xml::decode(response.body(), &DecodeOptions::new()) {
            let error = doc.get("Error").map(|e| e.items()).and_then(|e| e.first().copied());
            if let Some(error) = error {
                return Error::new(ErrorKind::Mws {
                    status,
                    code: error.get_text("Code").unwrap_or_default().to_string(),
                    message: error.get_text("Message").unwrap_or_default().to_string(),
                });
            }
        }
    }

    Error::new(ErrorKind::Mws {
        status,
        code: String::new(),
        message: format!("HTTP {status} error"),
    })
}
