//! Shipment invoicing for FBA outbound shipments.

use mws_client::negotiate::content_md5;
use mws_client::{BodyFormat, QueryParams, RequestBody, Transport, XmlValue};
use tracing::instrument;

use crate::error::Result;
use crate::types::ShipmentInvoiceStatus;

impl<T: Transport> super::FeedsClient<T> {
    /// Submit the invoice XML for a shipment.
    ///
    /// The invoice bytes are sent unchanged, so its own XML declaration
    /// stays accurate. The digest is sent both as `Content-MD5` and as the
    /// `ContentMD5Value` parameter.
    #[instrument(skip(self, invoice_xml))]
    pub async fn submit_fba_outbound_shipment_invoice(
        &mut self,
        amazon_shipment_id: &str,
        invoice_xml: &str,
    ) -> Result<()> {
        let charset = self.client.marketplace().feed_charset();
        let body = RequestBody::new(invoice_xml.as_bytes().to_vec(), BodyFormat::Xml, charset);

        let params = QueryParams::new()
            .with("MarketplaceId", self.client.marketplace_id())
            .with("AmazonShipmentId", amazon_shipment_id)
            .with("ContentMD5Value", content_md5(&body.content));

        self.client
            .request_with_body("SubmitFBAOutboundShipmentInvoice", params, Some(body))
            .await?;
        Ok(())
    }

    /// Invoice status of each shipment. An empty list sends no request.
    #[instrument(skip(self, amazon_shipment_ids), fields(count = amazon_shipment_ids.len()))]
    pub async fn get_fba_outbound_shipment_invoice_status<S: AsRef<str>>(
        &mut self,
        amazon_shipment_ids: &[S],
    ) -> Result<Vec<ShipmentInvoiceStatus>> {
        if amazon_shipment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut params = QueryParams::new().with("MarketplaceId", self.client.marketplace_id());
        params.insert_list(
            "AmazonShipmentId.Id",
            amazon_shipment_ids.iter().map(|id| -> &str { id.as_ref() }),
        );

        let doc = self
            .client
            .request("GetFBAOutboundShipmentInvoiceStatus", params)
            .await?
            .into_xml()?;

        Ok(doc
            .path(&["GetFBAOutboundShipmentInvoiceStatusResult", "Shipments", "member"])
            .map(XmlValue::items)
            .unwrap_or_default()
            .into_iter()
            .map(ShipmentInvoiceStatus::from_xml)
            .collect())
    }

    /// Details of an outbound shipment, as the `ShipmentDetail` tree.
    #[instrument(skip(self))]
    pub async fn get_fba_outbound_shipment_detail(
        &mut self,
        amazon_shipment_id: &str,
    ) -> Result<XmlValue> {
        let params = QueryParams::new()
            .with("MarketplaceId", self.client.marketplace_id())
            .with("AmazonShipmentId", amazon_shipment_id);

        let doc = self
            .client
            .request("GetFBAOutboundShipmentDetail", params)
            .await?
            .into_xml()?;
        let detail =
            super::required(&doc, &["GetFBAOutboundShipmentDetailResult", "ShipmentDetail"])?;
        Ok(detail.clone())
    }
}
