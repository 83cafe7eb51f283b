//! DTOs returned by the order back-office endpoints.

use serde::Serialize;

use crate::domain::order::{Order, OrderDraft, OrderStatus};
use crate::domain::sync::{Reconciled, SyncState, SyncWarning};
use crate::pagination::Paginated;

fn warning_messages(warnings: &[SyncWarning]) -> Vec<String> {
    warnings.iter().map(ToString::to_string).collect()
}

/// Data required to render the order list.
#[derive(Debug, Serialize)]
pub struct OrdersPageData {
    pub orders: Paginated<Order>,
    /// Status filter echoed back when present.
    pub status: Option<OrderStatus>,
}

/// Everything the edit form needs when it opens.
#[derive(Debug, Serialize)]
pub struct OrderPageData {
    pub order: Order,
    pub draft: OrderDraft,
    pub state: SyncState,
    pub is_complete: bool,
    pub statuses: &'static [OrderStatus],
}

/// Reconciled draft sent back to the edit form after a field change.
#[derive(Debug, Serialize)]
pub struct OrderSyncOutcome {
    pub draft: OrderDraft,
    pub state: SyncState,
    pub warnings: Vec<String>,
    pub is_complete: bool,
}

impl OrderSyncOutcome {
    pub fn new(reconciled: Reconciled, order: &Order) -> Self {
        Self {
            is_complete: reconciled
                .draft
                .is_complete(order.payment_method, order.delivery_type),
            warnings: warning_messages(&reconciled.warnings),
            draft: reconciled.draft,
            state: reconciled.state,
        }
    }
}

/// Stored order after a save, with the advisory warnings of the final pass.
#[derive(Debug, Serialize)]
pub struct SaveOrderOutcome {
    pub order: Order,
    pub warnings: Vec<String>,
}

impl SaveOrderOutcome {
    pub fn new(order: Order, warnings: &[SyncWarning]) -> Self {
        Self {
            order,
            warnings: warning_messages(warnings),
        }
    }
}
