use tracing::{debug, instrument};

use mws_client::{Transport, XmlValue};

use crate::error::Result;
use crate::notifications::{Destination, Subscription};
use crate::requests::{
    CreateSubscription, DeleteSubscription, ListRegisteredDestinations, ListSubscriptions,
    RegisterDestination, SendTestNotificationToDestination,
};

fn members(result: Option<&XmlValue>, list: &str) -> Vec<XmlValue> {
    result
        .and_then(|result| result.path(&[list, "member"]))
        .map(|members| members.items().into_iter().cloned().collect())
        .unwrap_or_default()
}

impl<T: Transport> super::SellerClient<T> {
    #[instrument(skip(self, destination))]
    pub async fn register_destination(&mut self, destination: &Destination) -> Result<()> {
        let request = RegisterDestination {
            destination: destination.clone(),
        };
        self.client.send_xml(&request).await?;
        debug!(channel = %destination.delivery_channel, "Destination registered");
        Ok(())
    }

    /// Destinations registered for `marketplace_id`, or for the client's
    /// marketplace.
    #[instrument(skip(self))]
    pub async fn list_registered_destinations(
        &mut self,
        marketplace_id: Option<&str>,
    ) -> Result<Vec<Destination>> {
        let request = ListRegisteredDestinations {
            marketplace_id: marketplace_id.map(str::to_string),
        };
        let doc = self.client.send_xml(&request).await?;
        Ok(members(doc.get("ListRegisteredDestinationsResult"), "DestinationList")
            .iter()
            .map(Destination::from_xml)
            .collect())
    }

    #[instrument(skip(self, destination))]
    pub async fn send_test_notification(&mut self, destination: &Destination) -> Result<()> {
        let request = SendTestNotificationToDestination {
            destination: destination.clone(),
        };
        self.client.send_xml(&request).await?;
        Ok(())
    }

    #[instrument(
        skip(self, subscription),
        fields(notification_type = %subscription.notification_type)
    )]
    pub async fn create_subscription(&mut self, subscription: &Subscription) -> Result<()> {
        let request = CreateSubscription {
            subscription: subscription.clone(),
        };
        self.client.send_xml(&request).await?;
        Ok(())
    }

    #[instrument(
        skip(self, subscription),
        fields(notification_type = %subscription.notification_type)
    )]
    pub async fn delete_subscription(&mut self, subscription: &Subscription) -> Result<()> {
        let request = DeleteSubscription {
            subscription: subscription.clone(),
        };
        self.client.send_xml(&request).await?;
        Ok(())
    }

    /// Subscriptions for `marketplace_id`, or for the client's marketplace.
    #[instrument(skip(self))]
    pub async fn list_subscriptions(
        &mut self,
        marketplace_id: Option<&str>,
    ) -> Result<Vec<Subscription>> {
        let request = ListSubscriptions {
            marketplace_id: marketplace_id.map(str::to_string),
        };
        let doc = self.client.send_xml(&request).await?;
        Ok(members(doc.get("ListSubscriptionsResult"), "SubscriptionList")
            .iter()
            .map(Subscription::from_xml)
            .collect())
    }
}
