use mws_api::client::marketplace::GERMANY;
use mws_api::{ClientConfig, MwsCredentials};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const SELLER_ID: &str = "A2SELLER000001";
pub const ACCESS_KEY: &str = "AKIAEXAMPLE";
pub const SECRET: &str = "example-secret-key";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn credentials_for(marketplace_id: &str) -> MwsCredentials {
    MwsCredentials::new(SELLER_ID, marketplace_id, ACCESS_KEY, SECRET)
}

pub fn credentials() -> MwsCredentials {
    credentials_for(GERMANY)
}

/// Client configuration sending every call to `server`.
pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .with_endpoint(server.uri())
        .build()
        .expect("valid test config")
}

/// Answer `action` with an XML body.
pub async fn respond_xml(server: &MockServer, action: &str, status: u16, body: &str) {
    Mock::given(method("POST"))
        .and(query_param("Action", action))
        .respond_with(ResponseTemplate::new(status).set_body_raw(body, "text/xml"))
        .mount(server)
        .await;
}

/// Decoded query pairs in wire order.
pub fn query(request: &Request) -> Vec<(String, String)> {
    request
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

pub fn query_value(request: &Request, key: &str) -> Option<String> {
    query(request).into_iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

pub fn header(request: &Request, name: &str) -> Option<String> {
    request
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub async fn received(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap_or_default()
}
