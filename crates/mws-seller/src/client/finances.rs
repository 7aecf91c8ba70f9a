use tracing::{debug, instrument};

use mws_client::Transport;

use crate::error::Result;
use crate::requests::{FinancialEventsFilter, ListFinancialEvents, ListFinancialEventsByNextToken};
use crate::types::FinancialEventsPage;

impl<T: Transport> super::SellerClient<T> {
    /// Financial events matching `request`.
    #[instrument(skip(self, request))]
    pub async fn list_financial_events(
        &mut self,
        request: ListFinancialEvents,
    ) -> Result<FinancialEventsPage> {
        let doc = self.client.send_xml(&request).await?;
        let page = FinancialEventsPage::from_result(doc.get("ListFinancialEventsResult"));
        debug!(
            lists = page.events.len(),
            has_next = page.next_token.is_some(),
            "Listed financial events"
        );
        Ok(page)
    }

    pub async fn financial_events_by_order_id(
        &mut self,
        amazon_order_id: &str,
    ) -> Result<FinancialEventsPage> {
        let filter = FinancialEventsFilter::Order(amazon_order_id.to_string());
        self.list_financial_events(ListFinancialEvents::new(filter)).await
    }

    pub async fn financial_events_by_group_id(
        &mut self,
        group_id: &str,
    ) -> Result<FinancialEventsPage> {
        let filter = FinancialEventsFilter::Group(group_id.to_string());
        self.list_financial_events(ListFinancialEvents::new(filter)).await
    }

    /// Events posted after `after` and, when given, before `before`.
    pub async fn financial_events_by_date_range(
        &mut self,
        after: chrono::DateTime<chrono::Utc>,
        before: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<FinancialEventsPage> {
        let filter = FinancialEventsFilter::Posted { after, before };
        self.list_financial_events(ListFinancialEvents::new(filter)).await
    }

    /// Next page of a previous financial events listing.
    #[instrument(skip(self))]
    pub async fn financial_events_by_next_token(
        &mut self,
        next_token: &str,
    ) -> Result<FinancialEventsPage> {
        let request = ListFinancialEventsByNextToken {
            next_token: next_token.to_string(),
        };
        let doc = self.client.send_xml(&request).await?;
        Ok(FinancialEventsPage::from_result(doc.get("ListFinancialEventsByNextTokenResult")))
    }
}
