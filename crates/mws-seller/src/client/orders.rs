use tracing::{debug, instrument};

use mws_client::Transport;

use crate::error::Result;
use crate::requests::{
    GetOrder, ListOrderItems, ListOrders, ListOrdersByNextToken, ListOrdersUpdated,
};
use crate::types::{Order, OrderItem, OrderPage};

impl<T: Transport> super::SellerClient<T> {
    /// Orders created in the requested time frame.
    #[instrument(skip(self, request))]
    pub async fn list_orders(&mut self, request: ListOrders) -> Result<OrderPage> {
        let doc = self.client.send_xml(&request).await?;
        let page = OrderPage::from_result(doc.get("ListOrdersResult"));
        debug!(count = page.orders.len(), has_next = page.has_next(), "Listed orders");
        Ok(page)
    }

    /// Orders last updated in the requested time frame.
    #[instrument(skip(self, request))]
    pub async fn list_orders_updated(&mut self, request: ListOrdersUpdated) -> Result<OrderPage> {
        let doc = self.client.send_xml(&request).await?;
        Ok(OrderPage::from_result(doc.get("ListOrdersResult")))
    }

    /// Next page of a previous order listing.
    #[instrument(skip(self))]
    pub async fn list_orders_by_next_token(&mut self, next_token: &str) -> Result<OrderPage> {
        let request = ListOrdersByNextToken {
            next_token: next_token.to_string(),
        };
        let doc = self.client.send_xml(&request).await?;
        Ok(OrderPage::from_result(doc.get("ListOrdersByNextTokenResult")))
    }

    /// One order, `None` if MWS returns none.
    #[instrument(skip(self))]
    pub async fn get_order(&mut self, amazon_order_id: &str) -> Result<Option<Order>> {
        let request = GetOrder {
            amazon_order_id: amazon_order_id.to_string(),
        };
        let doc = self.client.send_xml(&request).await?;
        Ok(OrderPage::from_result(doc.get("GetOrderResult"))
            .orders
            .into_iter()
            .next())
    }

    #[instrument(skip(self))]
    pub async fn list_order_items(&mut self, amazon_order_id: &str) -> Result<Vec<OrderItem>> {
        let request = ListOrderItems {
            amazon_order_id: amazon_order_id.to_string(),
        };
        let doc = self.client.send_xml(&request).await?;
        Ok(doc
            .path(&["ListOrderItemsResult", "OrderItems", "OrderItem"])
            .map(|items| items.items().into_iter().map(OrderItem::from_xml).collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::client::test_support::client;
    use crate::requests::ListOrders;

    const LIST_ORDERS: &str = r#"<?xml version="1.0"?>
<ListOrdersResponse xmlns="https://mws.amazonservices.com/Orders/2013-09-01">
  <ListOrdersResult>
    <NextToken>2YgYW55IGNhcm5hbCBwbGVhcw==</NextToken>
    <Orders>
      <Order>
        <AmazonOrderId>028-4521934-1234567</AmazonOrderId>
        <PurchaseDate>2024-03-01T10:00:00Z</PurchaseDate>
        <OrderStatus>Unshipped</OrderStatus>
        <FulfillmentChannel>MFN</FulfillmentChannel>
      </Order>
      <Order>
        <AmazonOrderId>028-4521934-7654321</AmazonOrderId>
        <OrderStatus>PartiallyShipped</OrderStatus>
      </Order>
    </Orders>
  </ListOrdersResult>
</ListOrdersResponse>"#;

    #[tokio::test]
    async fn test_list_orders() {
        let (mut seller, mock) = client();
        mock.push_xml(200, LIST_ORDERS);

        let from = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let page = seller.list_orders(ListOrders::new(from)).await.unwrap();

        assert_eq!(page.orders.len(), 2);
        assert_eq!(page.orders[1].order_status, "PartiallyShipped");
        // Order tokens are passed back unchanged.
        assert_eq!(page.next_token.as_deref(), Some("2YgYW55IGNhcm5hbCBwbGVhcw=="));

        let sent = mock.last_request().unwrap();
        assert!(sent.url.ends_with("/Orders/2013-09-01"));
        assert_eq!(sent.query_value("Action"), Some("ListOrders"));
        assert_eq!(sent.query_value("Version"), Some("2013-09-01"));
        assert_eq!(sent.query_value("CreatedAfter"), Some("2024-03-01T00:00:00.000Z"));
    }

    #[tokio::test]
    async fn test_list_orders_empty_result() {
        let (mut seller, mock) = client();
        mock.push_xml(
            200,
            "<ListOrdersResponse><ListOrdersResult><Orders/></ListOrdersResult></ListOrdersResponse>",
        );
        let from = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let page = seller.list_orders(ListOrders::new(from)).await.unwrap();
        assert!(page.orders.is_empty());
        assert!(page.next_token.is_none());
    }

    #[tokio::test]
    async fn test_list_orders_by_next_token() {
        let (mut seller, mock) = client();
        mock.push_xml(
            200,
            r#"<ListOrdersByNextTokenResponse><ListOrdersByNextTokenResult>
                 <Orders><Order><AmazonOrderId>1</AmazonOrderId></Order></Orders>
               </ListOrdersByNextTokenResult></ListOrdersByNextTokenResponse>"#,
        );

        let page = seller.list_orders_by_next_token("tok").await.unwrap();
        assert_eq!(page.orders.len(), 1);
        assert_eq!(mock.last_request().unwrap().query_value("NextToken"), Some("tok"));
    }

    #[tokio::test]
    async fn test_get_order() {
        let (mut seller, mock) = client();
        mock.push_xml(
            200,
            r#"<GetOrderResponse><GetOrderResult><Orders>
                 <Order><AmazonOrderId>028-1</AmazonOrderId><BuyerName>Erika</BuyerName></Order>
               </Orders></GetOrderResult></GetOrderResponse>"#,
        );
        let order = seller.get_order("028-1").await.unwrap().unwrap();
        assert_eq!(order.buyer_name.as_deref(), Some("Erika"));
        assert_eq!(mock.last_request().unwrap().query_value("AmazonOrderId.Id.1"), Some("028-1"));

        mock.push_xml(
            200,
            "<GetOrderResponse><GetOrderResult><Orders/></GetOrderResult></GetOrderResponse>",
        );
        assert!(seller.get_order("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_order_items_single() {
        let (mut seller, mock) = client();
        mock.push_xml(
            200,
            r#"<ListOrderItemsResponse><ListOrderItemsResult>
                 <AmazonOrderId>028-1</AmazonOrderId>
                 <OrderItems>
                   <OrderItem>
                     <ASIN>B000000001</ASIN>
                     <SellerSKU>SKU-1</SellerSKU>
                     <OrderItemId>68828574383266</OrderItemId>
                     <QuantityOrdered>2</QuantityOrdered>
                     <ItemPrice><CurrencyCode>EUR</CurrencyCode><Amount>25.00</Amount></ItemPrice>
                   </OrderItem>
                 </OrderItems>
               </ListOrderItemsResult></ListOrderItemsResponse>"#,
        );

        let items = seller.list_order_items("028-1").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity_ordered, 2);
        assert_eq!(items[0].seller_sku.as_deref(), Some("SKU-1"));
        assert_eq!(items[0].item_price.as_ref().unwrap().currency_code, "EUR");
        assert_eq!(mock.last_request().unwrap().query_value("AmazonOrderId"), Some("028-1"));
    }
}
