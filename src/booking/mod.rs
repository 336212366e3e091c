//! # Booking Service
//!
//! Turns booking requests into committed [`Order`]s, and fronts catalog search and
//! update.
//!
//! ## Reservation Protocol
//!
//! The catalog only guarantees that a single `try_reserve` is atomic. A booking with
//! several line items is therefore a sequence of independent reservations plus
//! compensation:
//!
//! 1. Validate the customer and line items. Nothing is touched on rejection.
//! 2. Reserve each line item in input order, adding `price × quantity` to the
//!    total using the price returned by that reservation.
//! 3. Append the order to the ledger.
//!
//! If step 2 or 3 fails, every place already taken is released in reverse order
//! before the error is returned.
//!
//! ## Cancellation
//!
//! Steps 2 and 3 run on their own task, so dropping the `place_order` future never
//! interrupts a reservation or an append half way. The task notices the caller is
//! gone at the next step boundary: before each reservation and before the append.
//! A booking abandoned before its append is rolled back once the in-flight
//! reservation has answered. Once the append has been sent the booking completes.
//!
//! ```rust,ignore
//! let order = service.place_order(BookingRequest {
//!     name: "Ada Lovelace".into(),
//!     phone: "07700900123".into(),
//!     lessons: vec![LineItem::new(LessonId::from(1), 2)],
//! }).await?;
//! ```

mod error;
mod hold;

pub use error::*;

use crate::model::{Lesson, LessonId, LessonPatch, LineItem, Order, OrderCreate, OrderId};
use crate::store::{CatalogStore, OrderLedger};
use crate::validation::{validate_booking, validate_patch, ValidationError};
use chrono::Utc;
use hold::Hold;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tracing::{debug, error, info, instrument, warn, Instrument, Span};

/// A customer's request to book one or more lessons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub phone: String,
    pub lessons: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub results: Vec<Lesson>,
    pub count: usize,
}

pub struct BookingService<C, L> {
    catalog: C,
    ledger: L,
}

impl<C, L> BookingService<C, L>
where
    C: CatalogStore + Clone + 'static,
    L: OrderLedger + Clone + 'static,
{
    pub fn new(catalog: C, ledger: L) -> Self {
        Self { catalog, ledger }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub async fn list_lessons(&self) -> Result<Vec<Lesson>, BookingError> {
        Ok(self.catalog.list_all().await?)
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, BookingError> {
        Ok(self.ledger.list_all().await?)
    }

    pub async fn find_order(&self, id: &str) -> Result<Order, BookingError> {
        let order_id: OrderId = id
            .parse()
            .map_err(|_| ValidationError::MalformedId(id.to_string()))?;
        self.ledger
            .find_by_id(order_id.clone())
            .await?
            .ok_or_else(|| BookingError::NotFound {
                entity: "Order",
                id: order_id.to_string(),
            })
    }

    /// Lessons matching `term`, wrapped with the query and a count.
    #[instrument(skip(self))]
    pub async fn search(&self, term: Option<&str>) -> Result<SearchResults, BookingError> {
        let term = term
            .filter(|t| !t.trim().is_empty())
            .ok_or(ValidationError::EmptySearchTerm)?;
        let results = self.catalog.search(term).await?;
        debug!(count = results.len(), "Search done");
        Ok(SearchResults {
            query: term.to_string(),
            count: results.len(),
            results,
        })
    }

    /// Applies a partial update to one lesson.
    ///
    /// The lesson must exist before the payload is looked at, so an unknown id
    /// wins over a bad field.
    #[instrument(skip(self, patch))]
    pub async fn update_lesson(&self, id: &str, patch: LessonPatch) -> Result<Lesson, BookingError> {
        let lesson_id: LessonId = id
            .parse()
            .map_err(|_| ValidationError::MalformedId(id.to_string()))?;

        if self.catalog.find_by_id(lesson_id.clone()).await?.is_none() {
            return Err(BookingError::NotFound {
                entity: "Lesson",
                id: lesson_id.to_string(),
            });
        }

        let update = validate_patch(patch)?;
        let lesson = self.catalog.update(lesson_id, update).await?;
        info!(lesson_id = %lesson.id, space = lesson.space, "Lesson updated");
        Ok(lesson)
    }

    /// Runs the reservation protocol for `request`.
    ///
    /// On error the catalog is left as if the request never arrived.
    #[instrument(skip(self, request), fields(customer = %request.name, items = request.lessons.len()))]
    pub async fn place_order(&self, request: BookingRequest) -> Result<Order, BookingError> {
        debug!(?request, "place_order called");
        validate_booking(&request.name, &request.phone, &request.lessons)?;

        // Dropped together with this future; the booking task watches for that.
        let (caller, caller_gone) = oneshot::channel::<()>();
        let booking = tokio::spawn(
            reserve_and_append(self.catalog.clone(), self.ledger.clone(), request, caller_gone)
                .instrument(Span::current()),
        );

        let outcome = booking.await;
        drop(caller);
        outcome.unwrap_or_else(|e| {
            error!(error = %e, "Booking task failed");
            Err(BookingError::Storage)
        })
    }
}

fn abandoned(caller_gone: &mut oneshot::Receiver<()>) -> bool {
    matches!(caller_gone.try_recv(), Err(oneshot::error::TryRecvError::Closed))
}

async fn reserve_and_append<C, L>(
    catalog: C,
    ledger: L,
    request: BookingRequest,
    mut caller_gone: oneshot::Receiver<()>,
) -> Result<Order, BookingError>
where
    C: CatalogStore + Clone + 'static,
    L: OrderLedger,
{
    let mut hold = Hold::new(catalog.clone());
    let mut total_amount: u64 = 0;

    for item in &request.lessons {
        if abandoned(&mut caller_gone) {
            warn!(held = hold.len(), "Caller went away, rolling back");
            hold.release_all().await;
            return Err(BookingError::Storage);
        }

        let lesson = match catalog.try_reserve(item.lesson_id.clone(), item.quantity).await {
            Ok(lesson) => lesson,
            Err(e) => {
                warn!(
                    lesson_id = %item.lesson_id,
                    error = %e,
                    held = hold.len(),
                    "Reservation failed, rolling back"
                );
                hold.release_all().await;
                return Err(e.into());
            }
        };
        hold.record(item.clone());
        debug!(lesson_id = %item.lesson_id, quantity = item.quantity, left = lesson.space, "Reserved");

        let line_amount = u64::from(lesson.price) * u64::from(item.quantity);
        total_amount = match total_amount.checked_add(line_amount) {
            Some(total) => total,
            None => {
                warn!(lesson_id = %item.lesson_id, "Order total overflows, rolling back");
                hold.release_all().await;
                return Err(ValidationError::AmountOverflow.into());
            }
        };
    }

    if abandoned(&mut caller_gone) {
        warn!(held = hold.len(), "Caller went away before the order was recorded, rolling back");
        hold.release_all().await;
        return Err(BookingError::Storage);
    }

    let params = OrderCreate {
        customer_name: request.name,
        customer_phone: request.phone,
        line_items: request.lessons,
        total_amount,
        created_at: Utc::now(),
    };

    match ledger.append(params).await {
        Ok(order) => {
            hold.commit();
            info!(order_id = %order.id, total_amount, "Order confirmed");
            Ok(order)
        }
        Err(e) => {
            warn!(error = %e, held = hold.len(), "Order append failed, rolling back");
            hold.release_all().await;
            Err(e.into())
        }
    }
}
