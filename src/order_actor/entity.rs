//! [`ActorEntity`] implementation for [`Order`].
//!
//! Orders are append-only: the update and action types are uninhabited, so the
//! ledger cannot be asked to change a committed order.

use super::error::OrderError;
use crate::framework::ActorEntity;
use crate::model::{Order, OrderCreate, OrderId};
use std::convert::Infallible;

impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Query = Infallible;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.line_items.is_empty() {
            return Err(OrderError::ValidationError("order has no line items".into()));
        }
        if params.line_items.iter().any(|item| item.quantity == 0) {
            return Err(OrderError::ValidationError("line item quantity must be positive".into()));
        }
        Ok(Self::from_create(id, params))
    }

    fn on_update(&mut self, update: Infallible) -> Result<(), OrderError> {
        match update {}
    }

    fn handle_action(&mut self, action: Infallible) -> Result<(), OrderError> {
        match action {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LessonId, LineItem, OrderStatus};
    use chrono::Utc;

    fn params(line_items: Vec<LineItem>) -> OrderCreate {
        OrderCreate {
            customer_name: "Grace Hopper".into(),
            customer_phone: "0123".into(),
            line_items,
            total_amount: 100,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_new_orders_are_confirmed() {
        let order =
            Order::from_create_params(OrderId::from(1), params(vec![LineItem::new(LessonId::from(1), 1)])).unwrap();
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.total_amount, 100);
    }

    #[test]
    fn test_empty_or_zero_quantity_orders_are_rejected() {
        assert!(Order::from_create_params(OrderId::from(1), params(vec![])).is_err());
        assert!(
            Order::from_create_params(OrderId::from(1), params(vec![LineItem::new(LessonId::from(1), 0)])).is_err()
        );
    }
}
