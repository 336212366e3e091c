//! # Order Client
//!
//! High-level API for the Order actor. Implements [`OrderLedger`].

use crate::clients::actor_client::ActorClient;
use crate::framework::ResourceClient;
use crate::model::{Order, OrderCreate, OrderId};
use crate::order_actor::OrderError;
use crate::store::OrderLedger;
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
///
/// Booking logic lives in [`BookingService`](crate::booking::BookingService); this
/// client only appends and reads.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }
}

#[async_trait]
impl OrderLedger for OrderClient {
    #[instrument(skip(self, order))]
    async fn append(&self, order: OrderCreate) -> Result<Order, OrderError> {
        debug!(?order, "append called");
        // The actor builds the record deterministically from (id, params), so the
        // committed order can be rebuilt here without a second round trip.
        let id = self.inner.create(order.clone()).await?;
        info!(order_id = %id, "Order appended");
        Ok(Order::from_create(id, order))
    }

    async fn list_all(&self) -> Result<Vec<Order>, OrderError> {
        self.list().await
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderError> {
        self.get(id).await
    }
}
