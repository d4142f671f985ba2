//! API DTOs (Data Transfer Objects)

use auth::domain::value_object::address::Address;
use kernel::id::{OrderId, ProductId};
use kernel::query::{PageRequest, SortDirection};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::{IntentInput, PlaceOrderInput};
use crate::domain::value_object::{OrderQuery, OrderSort, OrderSortField, PaymentMethod};
use crate::error::CheckoutResult;

/// Largest `_limit` accepted on `GET /orders`
pub const MAX_ORDER_PAGE_SIZE: u32 = 100;

/// `POST /cart`
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    #[serde(alias = "productId")]
    pub product: ProductId,
    #[serde(default = "one")]
    pub quantity: i32,
}

fn one() -> i32 {
    1
}

/// `PATCH /cart/{id}`
#[derive(Debug, Deserialize)]
pub struct CartQuantityRequest {
    pub quantity: i32,
}

/// `POST /orders`. Items and totals come from the caller's cart, so any
/// sent by the client are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub selected_address: Option<Address>,
}

impl From<PlaceOrderRequest> for PlaceOrderInput {
    fn from(req: PlaceOrderRequest) -> Self {
        Self {
            payment_method: req.payment_method,
            selected_address: req.selected_address,
        }
    }
}

/// Raw `GET /orders` query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderListParams {
    #[serde(rename = "_sort")]
    pub sort: Option<String>,
    #[serde(rename = "_order")]
    pub order: Option<String>,
    #[serde(rename = "_page")]
    pub page: Option<u32>,
    #[serde(rename = "_limit")]
    pub limit: Option<u32>,
}

impl OrderListParams {
    pub fn into_query(self) -> CheckoutResult<OrderQuery> {
        let sort = match self.sort.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(field) => Some(OrderSort {
                field: OrderSortField::parse(field)?,
                direction: self
                    .order
                    .as_deref()
                    .map(SortDirection::parse)
                    .transpose()?
                    .unwrap_or_default(),
            }),
            None => None,
        };

        Ok(OrderQuery {
            sort,
            page: PageRequest::from_params(self.page, self.limit, MAX_ORDER_PAGE_SIZE)?,
        })
    }
}

/// `POST /create-payment-intent`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_amount: Option<Decimal>,
    #[serde(default, alias = "OrderId", alias = "order_id")]
    pub order_id: Option<OrderId>,
}

impl From<PaymentIntentRequest> for IntentInput {
    fn from(req: PaymentIntentRequest) -> Self {
        Self {
            total_amount: req.total_amount,
            order_id: req.order_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn test_add_to_cart_defaults_quantity() {
        let id = ProductId::new();
        let req: AddToCartRequest =
            serde_json::from_value(serde_json::json!({ "product": id.to_string() })).unwrap();
        assert_eq!(req.product, id);
        assert_eq!(req.quantity, 1);
    }

    #[test]
    fn test_intent_request_aliases() {
        let id = OrderId::new();
        let req: PaymentIntentRequest = serde_json::from_value(serde_json::json!({
            "totalAmount": 478.5,
            "OrderId": id.to_string()
        }))
        .unwrap();
        assert_eq!(req.total_amount, Some(dec!(478.5)));
        assert_eq!(req.order_id, Some(id));

        let empty: PaymentIntentRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(empty.total_amount.is_none() && empty.order_id.is_none());
    }

    #[test]
    fn test_place_order_ignores_client_totals() {
        let req: PlaceOrderRequest = serde_json::from_value(serde_json::json!({
            "items": [],
            "totalAmount": 1,
            "paymentMethod": "card"
        }))
        .unwrap();
        assert_eq!(req.payment_method, PaymentMethod::Card);
        assert!(req.selected_address.is_none());
    }

    #[test]
    fn test_order_params() {
        let query = OrderListParams {
            sort: Some("totalAmount".into()),
            order: Some("desc".into()),
            page: Some(1),
            limit: Some(500),
        }
        .into_query()
        .unwrap();
        assert_eq!(query.sort.unwrap().field, OrderSortField::TotalAmount);
        assert_eq!(query.page.unwrap().limit(), MAX_ORDER_PAGE_SIZE);
    }
}
