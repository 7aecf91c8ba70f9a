//! Transport boundary.
//!
//! The pipeline hands a fully signed [`TransportRequest`] to a [`Transport`]
//! and gets back status, headers and body. [`HttpTransport`] is the default
//! reqwest-backed implementation.

use std::collections::HashMap;
use std::future::Future;

use bytes::Bytes;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::operation::HttpMethod;
use crate::query::encode_pairs;

/// A signed request ready to send.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: HttpMethod,
    /// Base URL without query, e.g. `https://mws.amazonservices.com/Orders/2013-09-01`.
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Rendered query pairs in canonical order, `Signature` last.
    pub query: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl TransportRequest {
    /// The URL with the percent-encoded query appended exactly as signed.
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, encode_pairs(&self.query))
        }
    }

    /// Value of a query parameter.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value of a header, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A raw HTTP response.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    status: u16,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl TransportResponse {
    pub fn new(status: u16, headers: HashMap<String, String>, body: impl Into<Bytes>) -> Self {
        // Header names are stored lowercase for case-insensitive lookup.
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns true if the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|s| s.as_str())
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body decoded using the `charset` of the Content-Type header, UTF-8
    /// when none is given.
    pub fn text(&self) -> Result<String> {
        let encoding = self
            .content_type()
            .and_then(charset_param)
            .and_then(|label| encoding_rs::Encoding::for_label(label.as_bytes()))
            .unwrap_or(encoding_rs::UTF_8);
        let (text, had_errors) = encoding.decode_with_bom_removal(&self.body);
        if had_errors {
            return Err(Error::new(ErrorKind::Encoding(format!(
                "response body is not valid {}",
                encoding.name()
            ))));
        }
        Ok(text.into_owned())
    }
}

fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}

/// Sends signed requests.
///
/// Implementations perform exactly one round trip per call: no retries and
/// no backoff.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse>> + Send;
}

/// reqwest-backed transport. TLS 1.2 is the minimum accepted version.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: reqwest::Client,
    enable_tracing: bool,
}

impl HttpTransport {
    /// Build a transport from client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .min_tls_version(reqwest::tls::Version::TLS_1_2)
            .user_agent(config.user_agent());

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        let inner = builder
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self {
            inner,
            enable_tracing: config.enable_tracing,
        })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let url = request.full_url();
        let mut req = self.inner.request(request.method.to_reqwest(), &url);

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            req = req.body(body);
        }

        if self.enable_tracing {
            debug!(method = %request.method, url = %request.url, "Sending request");
        }

        let response = req.send().await?;
        let status = response.status().as_u16();

        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response.bytes().await?;

        if self.enable_tracing {
            if (200..300).contains(&status) {
                debug!(status, content_length = body.len(), "Response received");
            } else {
                info!(status, content_length = body.len(), "Non-success response");
            }
        }

        Ok(TransportResponse::new(status, headers, body))
    }
}

#[cfg(any(test, feature = "test-util"))]
pub use mock::MockTransport;

#[cfg(any(test, feature = "test-util"))]
mod mock {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Transport that records requests and replays queued responses.
    ///
    /// When the queue is empty, `send` fails with a transport error.
    #[derive(Debug, Default)]
    pub struct MockTransport {
        responses: Mutex<VecDeque<TransportResponse>>,
        requests: Mutex<Vec<TransportRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a response.
        pub fn push_response(&self, response: TransportResponse) {
            lock(&self.responses).push_back(response);
        }

        /// Queue a response with the given status, Content-Type and body.
        pub fn push(&self, status: u16, content_type: &str, body: impl Into<Bytes>) {
            let headers = HashMap::from([("Content-Type".to_string(), content_type.to_string())]);
            self.push_response(TransportResponse::new(status, headers, body));
        }

        /// Queue a `text/xml` response.
        pub fn push_xml(&self, status: u16, body: &str) {
            self.push(status, "text/xml", body.to_string());
        }

        /// Every request sent so far.
        pub fn requests(&self) -> Vec<TransportRequest> {
            lock(&self.requests).clone()
        }

        /// The most recent request.
        pub fn last_request(&self) -> Option<TransportRequest> {
            lock(&self.requests).last().cloned()
        }

        pub fn request_count(&self) -> usize {
            lock(&self.requests).len()
        }
    }

    fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    impl Transport for MockTransport {
        async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
            lock(&self.requests).push(request);
            lock(&self.responses).pop_front().ok_or_else(|| {
                Error::new(ErrorKind::Transport(
                    crate::error::GENERIC_ERROR_MESSAGE.to_string(),
                ))
            })
        }
    }

    impl Transport for std::sync::Arc<MockTransport> {
        async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
            (**self).send(request).await
        }
    }
}
