//! Marketplace registry and per-marketplace character sets.
//!
//! Each marketplace id maps to exactly one regional MWS host. The registry is
//! validated when a client is constructed, so an unknown marketplace never
//! reaches the wire.

use crate::error::{Error, ErrorKind, Result};

/// Canada.
pub const CANADA: &str = "A2EUQ1WTGCTBG2";
/// United States.
pub const UNITED_STATES: &str = "ATVPDKIKX0DER";
/// Mexico.
pub const MEXICO: &str = "A1AM78C64UM0Y8";
/// Germany.
pub const GERMANY: &str = "A1PA6795UKMFR9";
/// Spain.
pub const SPAIN: &str = "A1RKKUPIHCS9HS";
/// France.
pub const FRANCE: &str = "A13V1IB3VIYZZH";
/// India.
pub const INDIA: &str = "A21TJRUUN4KGV";
/// Italy.
pub const ITALY: &str = "APJ6JRA9NG5V4";
/// United Kingdom.
pub const UNITED_KINGDOM: &str = "A1F83G8C2ARO7P";
/// Japan.
pub const JAPAN: &str = "A1VC38T7YXB528";
/// China.
pub const CHINA: &str = "AAHKV2X7AFYLW";
/// Australia.
pub const AUSTRALIA: &str = "A39IBJ37TRP1C6";
/// Brazil.
pub const BRAZIL: &str = "A2Q3Y263D00KWC";

/// Marketplaces whose feeds are sent as UTF-8. Every other marketplace uses
/// ISO-8859-16.
pub const UTF8_MARKETPLACES: &[&str] = &[JAPAN, MEXICO, CHINA, AUSTRALIA];

const BUILTIN: &[(&str, &str, &str)] = &[
    (CANADA, "mws.amazonservices.ca", "CA"),
    (UNITED_STATES, "mws.amazonservices.com", "US"),
    (MEXICO, "mws.amazonservices.com.mx", "MX"),
    (GERMANY, "mws-eu.amazonservices.com", "DE"),
    (SPAIN, "mws-eu.amazonservices.com", "ES"),
    (FRANCE, "mws-eu.amazonservices.com", "FR"),
    (INDIA, "mws.amazonservices.in", "IN"),
    (ITALY, "mws-eu.amazonservices.com", "IT"),
    (UNITED_KINGDOM, "mws-eu.amazonservices.com", "UK"),
    (JAPAN, "mws.amazonservices.jp", "JP"),
    (CHINA, "mws.amazonservices.com.cn", "CN"),
    (AUSTRALIA, "mws.amazonservices.com.au", "AU"),
    (BRAZIL, "mws.amazonservices.com", "BR"),
];

/// A marketplace and the regional host that serves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marketplace {
    id: String,
    host: String,
    country: String,
}

impl Marketplace {
    /// Create a marketplace entry.
    pub fn new(id: impl Into<String>, host: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            host: host.into(),
            country: country.into(),
        }
    }

    /// Marketplace id, e.g. `ATVPDKIKX0DER`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Regional host, e.g. `mws.amazonservices.com`.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Two-letter country code.
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Base URL of the regional endpoint.
    pub fn region_url(&self) -> String {
        format!("https://{}", self.host)
    }

    /// Charset used for feed bodies sent to this marketplace.
    pub fn feed_charset(&self) -> FeedCharset {
        FeedCharset::for_marketplace(&self.id)
    }
}

/// Lookup table from marketplace id to regional host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketplaceRegistry {
    entries: Vec<Marketplace>,
}

impl Default for MarketplaceRegistry {
    fn default() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|(id, host, country)| Marketplace::new(*id, *host, *country))
                .collect(),
        }
    }
}

impl MarketplaceRegistry {
    /// Registry containing only the built-in marketplaces.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Add or replace a marketplace.
    pub fn with_marketplace(
        mut self,
        id: impl Into<String>,
        host: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        let marketplace = Marketplace::new(id, host, country);
        self.entries.retain(|m| m.id != marketplace.id);
        self.entries.push(marketplace);
        self
    }

    /// Find a marketplace by id.
    pub fn get(&self, id: &str) -> Option<&Marketplace> {
        self.entries.iter().find(|m| m.id == id)
    }

    /// Find a marketplace by id, failing with a configuration error.
    pub fn resolve(&self, id: &str) -> Result<&Marketplace> {
        self.get(id).ok_or_else(|| {
            Error::new(ErrorKind::Config(format!("Invalid Marketplace Id: {id}")))
        })
    }

    /// All registered marketplace ids, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|m| m.id.as_str())
    }

    /// Ids of every marketplace served by `host`.
    pub fn ids_for_host<'a>(&'a self, host: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |m| m.host == host)
            .map(|m| m.id.as_str())
    }
}

/// Character set of a body sent to MWS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedCharset {
    Utf8,
    Iso8859_16,
}

impl FeedCharset {
    /// Charset for the given marketplace id.
    pub fn for_marketplace(marketplace_id: &str) -> Self {
        if UTF8_MARKETPLACES.contains(&marketplace_id) {
            FeedCharset::Utf8
        } else {
            FeedCharset::Iso8859_16
        }
    }

    /// Label used in `Content-Type` and XML declarations.
    pub fn label(&self) -> &'static str {
        match self {
            FeedCharset::Utf8 => "UTF-8",
            FeedCharset::Iso8859_16 => "iso-8859-16",
        }
    }

    /// The matching `encoding_rs` encoding.
    pub fn encoding(&self) -> &'static encoding_rs::Encoding {
        match self {
            FeedCharset::Utf8 => encoding_rs::UTF_8,
            FeedCharset::Iso8859_16 => encoding_rs::ISO_8859_16,
        }
    }

    /// Encode `text` into this charset.
    ///
    /// Characters the charset cannot represent are rejected instead of being
    /// replaced.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        if *self == FeedCharset::Utf8 {
            return Ok(text.as_bytes().to_vec());
        }
        if let Some(ch) = text
            .chars()
            .find(|c| !self.can_represent(*c))
        {
            return Err(Error::new(ErrorKind::Encoding(format!(
                "character {ch:?} cannot be represented in {}",
                self.label()
            ))));
        }
        let (bytes, _, _) = self.encoding().encode(text);
        Ok(bytes.into_owned())
    }

    fn can_represent(&self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        let (_, _, had_errors) = self.encoding().encode(ch.encode_utf8(&mut buf));
        !had_errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_hosts() {
        let registry = MarketplaceRegistry::builtin();
        assert_eq!(registry.resolve(UNITED_STATES).unwrap().host(), "mws.amazonservices.com");
        assert_eq!(registry.resolve(GERMANY).unwrap().host(), "mws-eu.amazonservices.com");
        assert_eq!(registry.resolve(JAPAN).unwrap().host(), "mws.amazonservices.jp");
        assert_eq!(
            registry.resolve(AUSTRALIA).unwrap().region_url(),
            "https://mws.amazonservices.com.au"
        );
        assert_eq!(registry.ids().count(), 13);
    }

    #[test]
    fn test_unknown_marketplace_is_config_error() {
        let err = MarketplaceRegistry::builtin().resolve("NOPE").unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("NOPE"));
    }

    #[test]
    fn test_custom_marketplace() {
        let registry = MarketplaceRegistry::builtin()
            .with_marketplace("A1805IZSGTT6HS", "mws-eu.amazonservices.com", "NL");
        assert_eq!(registry.resolve("A1805IZSGTT6HS").unwrap().country(), "NL");

        let eu: Vec<_> = registry.ids_for_host("mws-eu.amazonservices.com").collect();
        assert_eq!(eu.len(), 6);
    }

    #[test]
    fn test_feed_charset_selection() {
        assert_eq!(FeedCharset::for_marketplace(JAPAN), FeedCharset::Utf8);
        assert_eq!(FeedCharset::for_marketplace(MEXICO), FeedCharset::Utf8);
        assert_eq!(FeedCharset::for_marketplace(CHINA), FeedCharset::Utf8);
        assert_eq!(FeedCharset::for_marketplace(AUSTRALIA), FeedCharset::Utf8);
        assert_eq!(FeedCharset::for_marketplace(GERMANY), FeedCharset::Iso8859_16);
        assert_eq!(FeedCharset::for_marketplace(UNITED_STATES).label(), "iso-8859-16");
    }

    #[test]
    fn test_iso_8859_16_encoding() {
        let bytes = FeedCharset::Iso8859_16.encode("Größe").unwrap();
        assert_eq!(bytes, vec![b'G', b'r', 0xF6, 0xDF, b'e']);

        let err = FeedCharset::Iso8859_16.encode("日本").unwrap_err();
        assert!(err.is_decode());

        assert_eq!(FeedCharset::Utf8.encode("日本").unwrap(), "日本".as_bytes());
    }
}
