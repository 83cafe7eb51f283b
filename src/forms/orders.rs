//! Forms submitted by the order edit page.

use serde::Deserialize;
use validator::Validate;

use crate::domain::order::{OrderDraft, OrderStatus};
use crate::domain::sync::{SyncState, TouchedFlags};
use crate::forms::FormError;

fn parse_status(value: &str) -> Result<OrderStatus, FormError> {
    value.trim().parse().map_err(|_| FormError::InvalidStatus)
}

#[derive(Debug, Deserialize, Validate)]
/// Draft sent by the edit form after every field change.
pub struct OrderSyncForm {
    #[validate(length(min = 1))]
    pub status: String,
    pub is_paid: bool,
    pub is_delivered: bool,
    /// Status the form held before this change.
    #[validate(length(min = 1))]
    pub previous_status: String,
    /// Set when the admin ticked or unticked the delivery box by hand.
    #[serde(default)]
    pub touched_delivery: bool,
    #[serde(default)]
    pub touched_payment: bool,
}

/// Typed draft and synchronizer state.
#[derive(Debug, PartialEq, Eq)]
pub struct OrderSyncPayload {
    pub draft: OrderDraft,
    pub state: SyncState,
}

impl TryFrom<OrderSyncForm> for OrderSyncPayload {
    type Error = FormError;

    fn try_from(form: OrderSyncForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let draft = OrderDraft::new(parse_status(&form.status)?, form.is_paid, form.is_delivered);
        let state = SyncState::new(
            parse_status(&form.previous_status)?,
            TouchedFlags {
                delivery: form.touched_delivery,
                payment: form.touched_payment,
            },
        );

        Ok(Self { draft, state })
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Draft submitted with the save button.
pub struct SaveOrderForm {
    #[validate(length(min = 1))]
    pub status: String,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub is_delivered: bool,
}

pub struct SaveOrderPayload {
    pub draft: OrderDraft,
}

impl TryFrom<SaveOrderForm> for SaveOrderPayload {
    type Error = FormError;

    fn try_from(form: SaveOrderForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            draft: OrderDraft::new(parse_status(&form.status)?, form.is_paid, form.is_delivered),
        })
    }
}

/// Query string of the order list page.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    /// Optional status filter; empty means all orders.
    pub status: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct OrdersFilter {
    pub status: Option<OrderStatus>,
    pub page: usize,
}

impl TryFrom<OrdersQuery> for OrdersFilter {
    type Error = FormError;

    fn try_from(query: OrdersQuery) -> Result<Self, Self::Error> {
        let status = query
            .status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_status)
            .transpose()?;

        Ok(Self {
            status,
            page: query.page.unwrap_or(1).max(1),
        })
    }
}
