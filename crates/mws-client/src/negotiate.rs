//! Content negotiation: headers and the query carve-outs of body-bearing
//! operations.

use base64::Engine;
use md5::{Digest, Md5};

use crate::marketplace::{FeedCharset, Marketplace};
use crate::operation::OperationDescriptor;
use crate::query::{QueryParams, MARKETPLACE_ID_KEY};

/// Layout of a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    Xml,
    /// Tab-delimited flat file.
    TabDelimited,
}

impl BodyFormat {
    fn mime(&self) -> &'static str {
        match self {
            BodyFormat::Xml => "text/xml",
            BodyFormat::TabDelimited => "text/tab-separated-values",
        }
    }
}

/// A request body already encoded in its target charset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    pub content: Vec<u8>,
    pub format: BodyFormat,
    pub charset: FeedCharset,
}

impl RequestBody {
    pub fn new(content: impl Into<Vec<u8>>, format: BodyFormat, charset: FeedCharset) -> Self {
        Self {
            content: content.into(),
            format,
            charset,
        }
    }

    /// `Content-Type` value, e.g. `text/xml; charset=UTF-8`.
    pub fn content_type(&self) -> String {
        format!("{}; charset={}", self.format.mime(), self.charset.label())
    }

    /// Base64 of the MD5 digest of the body.
    pub fn content_md5(&self) -> String {
        content_md5(&self.content)
    }

    /// Body as text, for inspection.
    pub fn as_text(&self) -> String {
        let (text, _, _) = self.charset.encoding().decode(&self.content);
        text.into_owned()
    }
}

/// Base64 of the MD5 digest of `content`.
pub fn content_md5(content: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(Md5::digest(content))
}

/// Headers for a request and, for `SubmitFeed`, the removal of the
/// marketplace and seller defaults from the query.
pub fn negotiate(
    operation: &OperationDescriptor,
    marketplace: &Marketplace,
    user_agent: &str,
    body: Option<&RequestBody>,
    query: &mut QueryParams,
) -> Vec<(String, String)> {
    let mut headers = vec![
        ("Accept".to_string(), "application/xml".to_string()),
        ("x-amazon-user-agent".to_string(), user_agent.to_string()),
    ];

    if operation.action == "SubmitFeed" {
        query.remove(MARKETPLACE_ID_KEY);
        query.remove("SellerId");
    }

    if operation.has_body() {
        if let Some(body) = body {
            headers.push(("Content-MD5".to_string(), body.content_md5()));
            headers.push(("Content-Type".to_string(), body.content_type()));
        }
        headers.push(("Host".to_string(), marketplace.host().to_string()));
    }

    headers
}
