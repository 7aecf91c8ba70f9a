use mws_client::{QueryParams, ResponseBody, Transport, XmlValue};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::types::{FeedSubmissionInfo, FeedSubmissionResult, ProcessingReport};

impl<T: Transport> super::FeedsClient<T> {
    /// Fetch the processing report of a submitted feed.
    ///
    /// Flat-file feeds report in tab-delimited text, returned as
    /// [`FeedSubmissionResult::Text`].
    #[instrument(skip(self))]
    pub async fn get_feed_submission_result(
        &mut self,
        feed_submission_id: &str,
    ) -> Result<FeedSubmissionResult> {
        let params = QueryParams::new().with("FeedSubmissionId", feed_submission_id);
        let doc = match self.client.request("GetFeedSubmissionResult", params).await? {
            ResponseBody::Xml(doc) => doc,
            ResponseBody::Text(text) => {
                debug!(bytes = text.len(), "Feed result in text form");
                return Ok(FeedSubmissionResult::Text(text));
            }
        };

        let report = doc
            .get("Message")
            .and_then(|m| m.items().into_iter().next())
            .and_then(|m| m.get("ProcessingReport"));
        match report {
            Some(report) => Ok(FeedSubmissionResult::Report(ProcessingReport::from_xml(report))),
            None => {
                debug!(root = %doc.root, "Feed result without processing report");
                Ok(FeedSubmissionResult::Other(doc))
            }
        }
    }

    /// Status of the given submissions. An empty list sends no request.
    #[instrument(skip(self, feed_submission_ids), fields(count = feed_submission_ids.len()))]
    pub async fn get_feed_submission_list<S: AsRef<str>>(
        &mut self,
        feed_submission_ids: &[S],
    ) -> Result<Vec<FeedSubmissionInfo>> {
        if feed_submission_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut params = QueryParams::new();
        params.insert_list(
            "FeedSubmissionIdList.Id",
            feed_submission_ids.iter().map(|id| -> &str { id.as_ref() }),
        );

        let doc = self
            .client
            .request("GetFeedSubmissionList", params)
            .await?
            .into_xml()?;

        Ok(doc
            .path(&["GetFeedSubmissionListResult", "FeedSubmissionInfo"])
            .map(XmlValue::items)
            .unwrap_or_default()
            .into_iter()
            .map(FeedSubmissionInfo::from_xml)
            .collect())
    }
}
