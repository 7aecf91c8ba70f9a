use mws_client::{QueryParams, RequestBody, Transport};
use tracing::{debug, instrument};

use crate::envelope::FeedEnvelope;
use crate::error::Result;
use crate::types::{FeedOutcome, FeedSubmissionInfo, SubmitFeedOptions};

impl<T: Transport> super::FeedsClient<T> {
    /// Submit an encoded feed.
    ///
    /// In debug mode, either from `options` or from
    /// [`debug_next_feed`](Self::debug_next_feed), nothing is sent and the
    /// body is returned. The toggle is cleared by the first submission
    /// that does not ask for debug itself.
    #[instrument(skip(self, body, options))]
    pub async fn submit_feed(
        &mut self,
        feed_type: &str,
        body: RequestBody,
        options: SubmitFeedOptions,
    ) -> Result<FeedOutcome> {
        if options.debug || self.client.take_debug_next_feed() {
            debug!(bytes = body.content.len(), "Feed debug mode, not submitting");
            return Ok(FeedOutcome::Debug(body));
        }

        let mut params = QueryParams::new()
            .with("FeedType", feed_type)
            .with("PurgeAndReplace", options.purge_and_replace)
            .with("Merchant", self.client.seller_id());
        if options.set_marketplace_id {
            params.insert("MarketplaceIdList.Id.1", self.client.marketplace_id());
        }

        let doc = self
            .client
            .request_with_body("SubmitFeed", params, Some(body))
            .await?
            .into_xml()?;
        let info = FeedSubmissionInfo::from_xml(super::required(
            &doc,
            &["SubmitFeedResult", "FeedSubmissionInfo"],
        )?);

        debug!(feed_submission_id = %info.feed_submission_id, "Feed submitted");
        Ok(FeedOutcome::Submitted(info))
    }

    /// Encode `envelope` for this seller and marketplace, then submit it.
    pub async fn submit_envelope(
        &mut self,
        feed_type: &str,
        envelope: &FeedEnvelope,
        options: SubmitFeedOptions,
    ) -> Result<FeedOutcome> {
        let body = envelope.to_request_body(
            self.client.seller_id(),
            self.client.marketplace().feed_charset(),
        )?;
        self.submit_feed(feed_type, body, options).await
    }
}
