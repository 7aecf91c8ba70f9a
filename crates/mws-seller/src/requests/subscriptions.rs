use mws_client::{MwsRequest, QueryParams, RequestContext, Result};

use crate::notifications::{Destination, Subscription};

fn with_destination(
    ctx: &RequestContext<'_>,
    prefix: &str,
    destination: &Destination,
) -> QueryParams {
    let mut params = QueryParams::new().with("MarketplaceId", ctx.marketplace_id());
    destination.write_params(prefix, &mut params);
    params
}

/// `RegisterDestination`
#[derive(Debug, Clone)]
pub struct RegisterDestination {
    pub destination: Destination,
}

impl MwsRequest for RegisterDestination {
    const OPERATION: &'static str = "RegisterDestination";

    fn to_params(&self, ctx: &RequestContext<'_>) -> Result<QueryParams> {
        Ok(with_destination(ctx, "Destination", &self.destination))
    }
}

/// `SendTestNotificationToDestination`
#[derive(Debug, Clone)]
pub struct SendTestNotificationToDestination {
    pub destination: Destination,
}

impl MwsRequest for SendTestNotificationToDestination {
    const OPERATION: &'static str = "SendTestNotificationToDestination";

    fn to_params(&self, ctx: &RequestContext<'_>) -> Result<QueryParams> {
        Ok(with_destination(ctx, "Destination", &self.destination))
    }
}

/// `ListRegisteredDestinations`, for the client's marketplace unless another
/// one is named.
#[derive(Debug, Clone, Default)]
pub struct ListRegisteredDestinations {
    pub marketplace_id: Option<String>,
}

impl MwsRequest for ListRegisteredDestinations {
    const OPERATION: &'static str = "ListRegisteredDestinations";

    fn to_params(&self, ctx: &RequestContext<'_>) -> Result<QueryParams> {
        let marketplace = self.marketplace_id.as_deref().unwrap_or(ctx.marketplace_id());
        Ok(QueryParams::new().with("MarketplaceId", marketplace))
    }
}

/// `CreateSubscription`
#[derive(Debug, Clone)]
pub struct CreateSubscription {
    pub subscription: Subscription,
}

impl MwsRequest for CreateSubscription {
    const OPERATION: &'static str = "CreateSubscription";

    fn to_params(&self, ctx: &RequestContext<'_>) -> Result<QueryParams> {
        let subscription = &self.subscription;
        Ok(with_destination(ctx, "Subscription.Destination", &subscription.destination)
            .with("Subscription.NotificationType", &subscription.notification_type)
            .with("Subscription.IsEnabled", subscription.is_enabled))
    }
}

/// `DeleteSubscription`
#[derive(Debug, Clone)]
pub struct DeleteSubscription {
    pub subscription: Subscription,
}

impl MwsRequest for DeleteSubscription {
    const OPERATION: &'static str = "DeleteSubscription";

    fn to_params(&self, ctx: &RequestContext<'_>) -> Result<QueryParams> {
        let subscription = &self.subscription;
        Ok(with_destination(ctx, "Destination", &subscription.destination)
            .with("NotificationType", &subscription.notification_type))
    }
}

/// `ListSubscriptions`, for the client's marketplace unless another one is
/// named.
#[derive(Debug, Clone, Default)]
pub struct ListSubscriptions {
    pub marketplace_id: Option<String>,
}

impl MwsRequest for ListSubscriptions {
    const OPERATION: &'static str = "ListSubscriptions";

    fn to_params(&self, ctx: &RequestContext<'_>) -> Result<QueryParams> {
        let marketplace = self.marketplace_id.as_deref().unwrap_or(ctx.marketplace_id());
        Ok(QueryParams::new().with("MarketplaceId", marketplace))
    }
}
