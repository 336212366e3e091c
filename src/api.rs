//! Request and response envelopes for an outer HTTP router.
//!
//! Each handler returns a `(status, body)` pair. Routing, headers and transport
//! belong to whoever serves these.
//!
//! | Route                | Handler          | Success |
//! |----------------------|------------------|---------|
//! | `GET /lessons`       | [`list_lessons`] | 200     |
//! | `GET /search?q=`     | [`search`]       | 200     |
//! | `POST /orders`       | [`create_order`] | 201     |
//! | `PUT /lessons/:id`   | [`update_lesson`]| 200     |
//! | `GET /orders`        | [`list_orders`]  | 200     |

use crate::booking::{BookingError, BookingRequest, BookingService, ErrorKind};
use crate::model::{Lesson, LessonPatch, Order, OrderId};
use crate::store::{CatalogStore, OrderLedger};
use crate::validation::ValidationError;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::error;

pub type Reply = (u16, Value);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub message: String,
    pub order_id: OrderId,
    pub order: Order,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateResponse {
    pub message: String,
    pub lesson: Lesson,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&BookingError> for ErrorBody {
    fn from(e: &BookingError) -> Self {
        Self {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

fn reply<T: Serialize>(status: u16, body: &T) -> Reply {
    match serde_json::to_value(body) {
        Ok(value) => (status, value),
        Err(e) => {
            error!(error = %e, "Failed to encode response");
            (
                500,
                json!({"kind": ErrorKind::Storage, "message": "Failed to encode response"}),
            )
        }
    }
}

fn failure(e: BookingError) -> Reply {
    reply(e.status_code(), &ErrorBody::from(&e))
}

fn respond<T: Serialize>(status: u16, result: Result<T, BookingError>) -> Reply {
    match result {
        Ok(body) => reply(status, &body),
        Err(e) => failure(e),
    }
}

pub async fn list_lessons<C, L>(service: &BookingService<C, L>) -> Reply
where
    C: CatalogStore + Clone + 'static,
    L: OrderLedger + Clone + 'static,
{
    respond(200, service.list_lessons().await)
}

pub async fn search<C, L>(service: &BookingService<C, L>, q: Option<&str>) -> Reply
where
    C: CatalogStore + Clone + 'static,
    L: OrderLedger + Clone + 'static,
{
    respond(200, service.search(q).await)
}

pub async fn create_order<C, L>(service: &BookingService<C, L>, body: Value) -> Reply
where
    C: CatalogStore + Clone + 'static,
    L: OrderLedger + Clone + 'static,
{
    let request: BookingRequest = match serde_json::from_value(body) {
        Ok(request) => request,
        Err(e) => return failure(ValidationError::MalformedBody(e.to_string()).into()),
    };

    respond(
        201,
        service.place_order(request).await.map(|order| OrderConfirmation {
            message: "Order created successfully".to_string(),
            order_id: order.id.clone(),
            order,
        }),
    )
}

pub async fn update_lesson<C, L>(service: &BookingService<C, L>, id: &str, body: Value) -> Reply
where
    C: CatalogStore + Clone + 'static,
    L: OrderLedger + Clone + 'static,
{
    let patch: LessonPatch = match serde_json::from_value(body) {
        Ok(patch) => patch,
        Err(e) => return failure(ValidationError::MalformedBody(e.to_string()).into()),
    };

    respond(
        200,
        service
            .update_lesson(id, patch)
            .await
            .map(|lesson| UpdateResponse {
                message: "Lesson updated successfully".to_string(),
                lesson,
            }),
    )
}

pub async fn list_orders<C, L>(service: &BookingService<C, L>) -> Reply
where
    C: CatalogStore + Clone + 'static,
    L: OrderLedger + Clone + 'static,
{
    respond(200, service.list_orders().await)
}
