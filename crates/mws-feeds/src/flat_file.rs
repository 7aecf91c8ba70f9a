//! Tab-delimited flat-file feeds (`_POST_FLAT_FILE_LISTINGS_DATA_`).
//!
//! Layout: a template line (`TemplateType=`, `Version=`, `TemplateSignature=`),
//! the column header written twice, then one line per record. The whole file
//! is encoded in the marketplace charset.

use mws_client::{BodyFormat, FeedCharset, RequestBody};

use crate::error::{Error, ErrorKind, Result};

/// A record that can be written as one flat-file row.
pub trait FlatFileRecord {
    /// Column names and values, in column order.
    fn fields(&self) -> Vec<(String, String)>;
}

/// A listing row with the common offer columns. Unset columns are written
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingProduct {
    pub sku: String,
    pub price: String,
    pub quantity: Option<u32>,
    pub product_id: String,
    pub product_id_type: String,
    pub condition_type: String,
    pub condition_note: String,
    pub title: Option<String>,
    pub leadtime_to_ship: Option<u32>,
    pub operation_type: Option<String>,
}

impl ListingProduct {
    /// New-condition offer for an ASIN.
    pub fn new(sku: impl Into<String>, asin: impl Into<String>, price: impl ToString) -> Self {
        Self {
            sku: sku.into(),
            price: price.to_string(),
            product_id: asin.into(),
            product_id_type: "ASIN".to_string(),
            condition_type: "New".to_string(),
            ..Self::default()
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_product_id(mut self, id: impl Into<String>, id_type: impl Into<String>) -> Self {
        self.product_id = id.into();
        self.product_id_type = id_type.into();
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>, note: impl Into<String>) -> Self {
        self.condition_type = condition.into();
        self.condition_note = note.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_leadtime_to_ship(mut self, days: u32) -> Self {
        self.leadtime_to_ship = Some(days);
        self
    }

    /// `Update`, `PartialUpdate` or `Delete`.
    pub fn with_operation_type(mut self, operation: impl Into<String>) -> Self {
        self.operation_type = Some(operation.into());
        self
    }
}

impl FlatFileRecord for ListingProduct {
    fn fields(&self) -> Vec<(String, String)> {
        let opt = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_default();
        [
            ("sku", self.sku.clone()),
            ("price", self.price.clone()),
            ("quantity", opt(self.quantity)),
            ("product-id", self.product_id.clone()),
            ("product-id-type", self.product_id_type.clone()),
            ("condition-type", self.condition_type.clone()),
            ("condition-note", self.condition_note.clone()),
            ("item-name", self.title.clone().unwrap_or_default()),
            ("leadtime-to-ship", opt(self.leadtime_to_ship)),
            ("operation-type", self.operation_type.clone().unwrap_or_default()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }
}

/// A flat-file feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatFileFeed {
    pub template_type: String,
    pub version: String,
    pub signature: String,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Default for FlatFileFeed {
    fn default() -> Self {
        Self {
            template_type: "Custom".to_string(),
            version: String::new(),
            signature: String::new(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
}

impl FlatFileFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(
        mut self,
        template_type: impl Into<String>,
        version: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        self.template_type = template_type.into();
        self.version = version.into();
        self.signature = signature.into();
        self
    }

    /// Feed whose columns come from the first record.
    pub fn from_records<R: FlatFileRecord>(records: &[R]) -> Result<Self> {
        let mut feed = Self::new();
        for record in records {
            feed.push_record(record)?;
        }
        Ok(feed)
    }

    /// Append a record. The first record fixes the columns; later records
    /// are aligned to them by name and may not add new ones.
    pub fn push_record<R: FlatFileRecord + ?Sized>(&mut self, record: &R) -> Result<()> {
        let fields = record.fields();
        if self.columns.is_empty() {
            self.columns = fields.iter().map(|(k, _)| k.clone()).collect();
        }

        let mut row = vec![String::new(); self.columns.len()];
        for (key, value) in fields {
            let index = self.columns.iter().position(|c| *c == key).ok_or_else(|| {
                Error::new(ErrorKind::Validation(format!(
                    "column {key} is not part of the feed header"
                )))
            })?;
            row[index] = value;
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The feed as UTF-8 text.
    pub fn to_text(&self) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record([
            format!("TemplateType={}", self.template_type),
            format!("Version={}", self.version),
            format!("TemplateSignature={}", self.signature),
        ])?;
        writer.write_record(&self.columns)?;
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| Error::new(ErrorKind::Csv(e.to_string())))?;
        String::from_utf8(bytes).map_err(|e| Error::with_source(ErrorKind::Csv(e.to_string()), e))
    }

    /// Serialize and encode into `charset`.
    pub fn to_request_body(&self, charset: FeedCharset) -> Result<RequestBody> {
        let content = charset.encode(&self.to_text()?)?;
        Ok(RequestBody::new(content, BodyFormat::TabDelimited, charset))
    }
}
