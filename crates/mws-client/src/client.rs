//! The MWS request pipeline.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::credentials::MwsCredentials;
use crate::error::Result;
use crate::marketplace::Marketplace;
use crate::negotiate::{self, RequestBody};
use crate::operation;
use crate::query::{self, QueryParams};
use crate::request::{MwsRequest, RequestContext};
use crate::response::{self, ResponseBody};
use crate::signer;
use crate::transport::{HttpTransport, Transport, TransportRequest, TransportResponse};
use crate::xml::{DecodeOptions, XmlDocument};

/// Message MWS returns for the probe order id used by
/// [`MwsClient::validate_credentials`].
const VALID_CREDENTIALS_MESSAGE: &str = "Invalid AmazonOrderId: validate";

/// Client for one seller account in one marketplace.
///
/// Each call is a single signed round trip. The client keeps the last raw
/// response and a one-shot feed debug flag, so calls take `&mut self`; use
/// one client per concurrent caller.
#[derive(Debug)]
pub struct MwsClient<T = HttpTransport> {
    credentials: MwsCredentials,
    marketplace: Marketplace,
    config: ClientConfig,
    transport: T,
    debug_next_feed: bool,
    last_response: Option<TransportResponse>,
}

impl MwsClient<HttpTransport> {
    /// Create a client with the default configuration.
    pub fn new(credentials: MwsCredentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with a custom configuration.
    pub fn with_config(credentials: MwsCredentials, config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(credentials, config, transport)
    }

    /// Create a client from `MWS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(MwsCredentials::from_env()?)
    }
}

impl<T: Transport> MwsClient<T> {
    /// Create a client that sends through `transport`.
    ///
    /// Fails with a configuration error if a credential is missing or the
    /// marketplace is not registered.
    pub fn with_transport(
        credentials: MwsCredentials,
        config: ClientConfig,
        transport: T,
    ) -> Result<Self> {
        credentials.validate()?;
        let marketplace = config
            .marketplaces
            .resolve(credentials.marketplace_id())?
            .clone();

        Ok(Self {
            credentials,
            marketplace,
            config,
            transport,
            debug_next_feed: false,
            last_response: None,
        })
    }

    pub fn credentials(&self) -> &MwsCredentials {
        &self.credentials
    }

    pub fn marketplace(&self) -> &Marketplace {
        &self.marketplace
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn seller_id(&self) -> &str {
        self.credentials.seller_id()
    }

    pub fn marketplace_id(&self) -> &str {
        self.marketplace.id()
    }

    /// Context handed to [`MwsRequest::to_params`].
    pub fn context(&self) -> RequestContext<'_> {
        RequestContext {
            credentials: &self.credentials,
            marketplace: &self.marketplace,
            registry: &self.config.marketplaces,
        }
    }

    /// Make the next feed submission return its body instead of sending it.
    pub fn debug_next_feed(&mut self) -> &mut Self {
        self.debug_next_feed = true;
        self
    }

    /// Read and clear the debug flag.
    pub fn take_debug_next_feed(&mut self) -> bool {
        std::mem::take(&mut self.debug_next_feed)
    }

    /// The raw response of the most recent call, successful or not.
    pub fn last_response(&self) -> Option<&TransportResponse> {
        self.last_response.as_ref()
    }

    /// Build the signed request for `operation` without sending it.
    pub fn prepare(
        &self,
        operation: &str,
        params: QueryParams,
        body: Option<RequestBody>,
    ) -> Result<TransportRequest> {
        self.prepare_at(operation, params, body, Utc::now())
    }

    /// [`prepare`](Self::prepare) with an explicit `Timestamp`.
    pub fn prepare_at(
        &self,
        operation: &str,
        params: QueryParams,
        body: Option<RequestBody>,
        timestamp: DateTime<Utc>,
    ) -> Result<TransportRequest> {
        let op = operation::lookup(operation)?;
        let mut query = query::assemble(op, &self.credentials, params, timestamp);
        let headers = negotiate::negotiate(
            op,
            &self.marketplace,
            &self.config.user_agent(),
            body.as_ref(),
            &mut query,
        );

        let mut pairs = query.to_pairs();
        let signature = signer::sign(
            op.method,
            self.marketplace.host(),
            op.path,
            &pairs,
            self.credentials.secret_access_key(),
        );
        pairs.push(("Signature".to_string(), signature));

        let base = self
            .config
            .endpoint_override
            .clone()
            .unwrap_or_else(|| self.marketplace.region_url());

        Ok(TransportRequest {
            method: op.method,
            url: format!("{}{}", base.trim_end_matches('/'), op.path),
            headers,
            query: pairs,
            body: body.map(|b| Bytes::from(b.content)),
        })
    }

    /// Send `operation` and return the raw response.
    ///
    /// Non-2xx responses become errors; the response is kept either way and
    /// is available through [`last_response`](Self::last_response).
    #[instrument(skip(self, params, body))]
    pub async fn execute(
        &mut self,
        operation: &str,
        params: QueryParams,
        body: Option<RequestBody>,
    ) -> Result<TransportResponse> {
        self.last_response = None;
        let request = self.prepare(operation, params, body)?;

        if self.config.enable_tracing {
            debug!(action = request.query_value("Action"), "Sending MWS request");
        }

        let response = self.transport.send(request).await?;
        self.last_response = Some(response.clone());

        if !response.is_success() {
            let err = response::classify(&response);
            if self.config.enable_tracing {
                info!(status = response.status(), code = err.code(), "MWS returned an error");
            }
            return Err(err);
        }

        Ok(response)
    }

    /// Send `operation` and decode the response body.
    pub async fn request(&mut self, operation: &str, params: QueryParams) -> Result<ResponseBody> {
        self.request_with_body(operation, params, None).await
    }

    /// Send a body-bearing operation and decode the response body.
    pub async fn request_with_body(
        &mut self,
        operation: &str,
        params: QueryParams,
        body: Option<RequestBody>,
    ) -> Result<ResponseBody> {
        let op = operation::lookup(operation)?;
        let response = self.execute(operation, params, body).await?;
        response::interpret(&response, &DecodeOptions::for_operation(op))
    }

    /// Send `operation` and require an XML response.
    pub async fn request_xml(
        &mut self,
        operation: &str,
        params: QueryParams,
    ) -> Result<XmlDocument> {
        self.request(operation, params).await?.into_xml()
    }

    /// Send a typed request.
    pub async fn send<R: MwsRequest>(&mut self, request: &R) -> Result<ResponseBody> {
        let (params, body) = {
            let ctx = self.context();
            (request.to_params(&ctx)?, request.body(&ctx)?)
        };
        self.request_with_body(R::OPERATION, params, body).await
    }

    /// Send a typed request and require an XML response.
    pub async fn send_xml<R: MwsRequest>(&mut self, request: &R) -> Result<XmlDocument> {
        self.send(request).await?.into_xml()
    }

    /// Check the credentials against MWS.
    ///
    /// Asks for the items of a nonexistent order: MWS only reports the
    /// order id as invalid once the signature and seller are accepted.
    /// Other MWS errors mean the credentials were rejected; transport
    /// failures are returned as errors.
    pub async fn validate_credentials(&mut self) -> Result<bool> {
        let params = QueryParams::new().with("AmazonOrderId", "validate");
        match self.request("ListOrderItems", params).await {
            Ok(_) => Ok(true),
            Err(err) if err.is_remote() => Ok(err.message() == VALID_CREDENTIALS_MESSAGE),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marketplace::{FeedCharset, GERMANY};
    use crate::negotiate::BodyFormat;
    use crate::transport::MockTransport;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn creds() -> MwsCredentials {
        MwsCredentials::new("SELLER1", GERMANY, "AKID", "secret")
    }

    fn client() -> (MwsClient<Arc<MockTransport>>, Arc<MockTransport>) {
        let mock = Arc::new(MockTransport::new());
        let client =
            MwsClient::with_transport(creds(), ClientConfig::default(), Arc::clone(&mock)).unwrap();
        (client, mock)
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_construction_validates() {
        let missing = MwsCredentials::new("", GERMANY, "AKID", "secret");
        let err = MwsClient::with_transport(missing, ClientConfig::default(), MockTransport::new())
            .unwrap_err();
        assert!(err.is_config());

        let unknown = MwsCredentials::new("S", "XXXX", "AKID", "secret");
        let err = MwsClient::with_transport(unknown, ClientConfig::default(), MockTransport::new())
            .unwrap_err();
        assert!(err.to_string().contains("Invalid Marketplace Id"));
    }

    #[test]
    fn test_prepare_signs_last() {
        let (client, _) = client();
        let req = client
            .prepare_at("GetOrder", QueryParams::new().with("AmazonOrderId.Id.1", "1"), None, at())
            .unwrap();

        assert_eq!(req.url, "https://mws-eu.amazonservices.com/Orders/2013-09-01");
        assert_eq!(req.query.last().map(|(k, _)| k.as_str()), Some("Signature"));
        let keys: Vec<_> = req.query[..req.query.len() - 1]
            .iter()
            .map(|(k, _)| k.clone())
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);

        let expected = signer::sign(
            req.method,
            "mws-eu.amazonservices.com",
            "/Orders/2013-09-01",
            &req.query[..req.query.len() - 1],
            "secret",
        );
        assert_eq!(req.query_value("Signature"), Some(expected.as_str()));
        assert_eq!(req.query_value("Timestamp"), Some("2024-03-01T12:00:00.000Z"));
        assert_eq!(req.query_value("MarketplaceId.Id.1"), Some(GERMANY));
    }

    #[test]
    fn test_prepare_is_deterministic() {
        let (client, _) = client();
        let params = QueryParams::new().with("A", "1").with("B", "2");
        let a = client.prepare_at("GetOrder", params.clone(), None, at()).unwrap();
        let b = client.prepare_at("GetOrder", params, None, at()).unwrap();
        assert_eq!(a.full_url(), b.full_url());
    }

    #[test]
    fn test_endpoint_override_keeps_regional_signature() {
        let config = ClientConfig::builder()
            .with_endpoint("http://127.0.0.1:9999/")
            .build()
            .unwrap();
        let overridden = MwsClient::with_transport(creds(), config, MockTransport::new()).unwrap();
        let (regional, _) = client();

        let a = overridden.prepare_at("GetOrder", QueryParams::new(), None, at()).unwrap();
        let b = regional.prepare_at("GetOrder", QueryParams::new(), None, at()).unwrap();
        assert_eq!(a.url, "http://127.0.0.1:9999/Orders/2013-09-01");
        assert_eq!(a.query_value("Signature"), b.query_value("Signature"));
    }

    #[test]
    fn test_submit_feed_request_shape() {
        let (client, _) = client();
        let body = RequestBody::new(
            b"<AmazonEnvelope/>".to_vec(),
            BodyFormat::Xml,
            FeedCharset::Iso8859_16,
        );
        let params = QueryParams::new().with("FeedType", "_POST_PRODUCT_DATA_");
        let req = client.prepare_at("SubmitFeed", params, Some(body), at()).unwrap();

        assert_eq!(req.url, "https://mws-eu.amazonservices.com/");
        assert!(req.query_value("SellerId").is_none());
        assert!(req.query_value("MarketplaceId.Id.1").is_none());
        assert_eq!(req.header("Content-Type"), Some("text/xml; charset=iso-8859-16"));
        assert_eq!(req.header("Host"), Some("mws-eu.amazonservices.com"));
        assert_eq!(req.body.as_deref(), Some(&b"<AmazonEnvelope/>"[..]));
    }

    #[test]
    fn test_unknown_operation() {
        let (client, _) = client();
        assert!(client.prepare("Nope", QueryParams::new(), None).unwrap_err().is_config());
    }

    #[tokio::test]
    async fn test_request_decodes_and_keeps_last_response() {
        let (mut client, mock) = client();
        mock.push_xml(
            200,
            "<GetOrderResponse><GetOrderResult><Orders><Order><AmazonOrderId>1</AmazonOrderId></Order></Orders></GetOrderResult></GetOrderResponse>",
        );

        let doc = client
            .request_xml("GetOrder", QueryParams::new().with("AmazonOrderId.Id.1", "1"))
            .await
            .unwrap();

        let orders = doc.path(&["GetOrderResult", "Orders", "Order"]).unwrap();
        assert!(matches!(orders, crate::xml::XmlValue::List(_)));
        assert_eq!(client.last_response().map(|r| r.status()), Some(200));
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_error_response_is_classified() {
        let (mut client, mock) = client();
        mock.push_xml(
            401,
            "<ErrorResponse><Error><Type>Sender</Type><Code>InvalidAccessKeyId</Code><Message>The AWS Access Key Id you provided does not exist in our records.</Message></Error></ErrorResponse>",
        );

        let err = client.request("GetOrder", QueryParams::new()).await.unwrap_err();
        assert_eq!(err.code(), "InvalidAccessKeyId");
        assert_eq!(err.status(), Some(401));
        assert_eq!(client.last_response().map(|r| r.status()), Some(401));
    }

    #[tokio::test]
    async fn test_transport_failure_clears_last_response() {
        let (mut client, mock) = client();
        mock.push_xml(200, "<A/>");
        client.request("GetOrder", QueryParams::new()).await.unwrap();
        assert!(client.last_response().is_some());

        let err = client.request("GetOrder", QueryParams::new()).await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.message(), "An error occurred");
        assert!(client.last_response().is_none());
    }

    #[tokio::test]
    async fn test_validate_credentials() {
        let (mut client, mock) = client();
        mock.push_xml(
            400,
            "<ErrorResponse><Error><Code>InvalidParameterValue</Code><Message>Invalid AmazonOrderId: validate</Message></Error></ErrorResponse>",
        );
        assert!(client.validate_credentials().await.unwrap());
        let sent = mock.last_request().unwrap();
        assert_eq!(sent.query_value("Action"), Some("ListOrderItems"));
        assert_eq!(sent.query_value("AmazonOrderId"), Some("validate"));

        mock.push_xml(
            403,
            "<ErrorResponse><Error><Code>SignatureDoesNotMatch</Code><Message>bad</Message></Error></ErrorResponse>",
        );
        assert!(!client.validate_credentials().await.unwrap());
    }

    #[test]
    fn test_debug_flag_is_one_shot() {
        let (mut client, _) = client();
        assert!(!client.take_debug_next_feed());
        client.debug_next_feed();
        assert!(client.take_debug_next_feed());
        assert!(!client.take_debug_next_feed());
    }
}
