//! Rollback bookkeeping for a booking in flight.

use crate::model::LineItem;
use crate::store::CatalogStore;
use std::mem;
use tracing::{debug, error, warn};

/// Places reserved so far for one booking.
///
/// A hold ends in exactly one of two ways: [`Hold::commit`] once the order is
/// durable, or [`Hold::release_all`] when any step fails. A hold dropped while
/// still carrying places (the booking task panicked or the runtime is shutting
/// down) hands them back on a background task.
pub(crate) struct Hold<C: CatalogStore + Clone + 'static> {
    catalog: C,
    reserved: Vec<LineItem>,
    committed: bool,
}

impl<C: CatalogStore + Clone + 'static> Hold<C> {
    pub(crate) fn new(catalog: C) -> Self {
        Self {
            catalog,
            reserved: Vec::new(),
            committed: false,
        }
    }

    pub(crate) fn record(&mut self, item: LineItem) {
        self.reserved.push(item);
    }

    pub(crate) fn len(&self) -> usize {
        self.reserved.len()
    }

    pub(crate) fn commit(mut self) {
        self.committed = true;
        self.reserved.clear();
    }

    /// Releases every recorded reservation, most recent first.
    ///
    /// Failed releases are logged and skipped; the remaining ones still run.
    pub(crate) async fn release_all(mut self) {
        // Pop before awaiting so Drop never releases an item twice. An item whose
        // release is interrupted is lost to both paths; the booking task is never
        // cancelled by its caller, so only a runtime shutdown can do that.
        while let Some(item) = self.reserved.pop() {
            release_one(&self.catalog, item).await;
        }
    }
}

async fn release_one<C: CatalogStore>(catalog: &C, item: LineItem) {
    match catalog.release(item.lesson_id.clone(), item.quantity).await {
        Ok(()) => debug!(lesson_id = %item.lesson_id, quantity = item.quantity, "Released"),
        Err(e) => error!(
            lesson_id = %item.lesson_id,
            quantity = item.quantity,
            error = %e,
            "Rollback release failed"
        ),
    }
}

impl<C: CatalogStore + Clone + 'static> Drop for Hold<C> {
    fn drop(&mut self) {
        if self.committed || self.reserved.is_empty() {
            return;
        }

        let items = mem::take(&mut self.reserved);
        warn!(count = items.len(), "Booking abandoned with places held, releasing");

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let catalog = self.catalog.clone();
                handle.spawn(async move {
                    for item in items.into_iter().rev() {
                        release_one(&catalog, item).await;
                    }
                });
            }
            Err(_) => error!(?items, "No runtime left to release held places"),
        }
    }
}
