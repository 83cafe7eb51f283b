//! Services backing the admin order list and order edit form.

use chrono::Utc;

use crate::SERVICE_ADMIN_ROLE;
use crate::domain::order::{Order, OrderStatus, OrderStatusUpdate};
use crate::domain::sync::{SyncContext, SyncState, reconcile};
use crate::domain::types::OrderId;
use crate::dto::orders::{OrderPageData, OrderSyncOutcome, OrdersPageData, SaveOrderOutcome};
use crate::forms::FormError;
use crate::forms::orders::{
    OrderSyncForm, OrderSyncPayload, OrdersFilter, OrdersQuery, SaveOrderForm, SaveOrderPayload,
};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{OrderListQuery, OrderReader, OrderWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};

fn load_snapshot<R>(repo: &R, order_id: i32) -> ServiceResult<Order>
where
    R: OrderReader + ?Sized,
{
    let order_id = OrderId::new(order_id).map_err(|_| FormError::InvalidOrderId)?;

    repo.get_order_by_id(order_id)
        .map_err(|err| {
            log::error!("Failed to load order {order_id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)
}

/// Loads one page of orders, optionally filtered by status.
pub fn list_orders<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: OrdersQuery,
) -> ServiceResult<OrdersPageData>
where
    R: OrderReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let filter = OrdersFilter::try_from(query)?;

    let mut list_query = OrderListQuery::new().paginate(filter.page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(status) = filter.status {
        list_query = list_query.status(status);
    }

    let (total, orders) = repo.list_orders(list_query)?;

    Ok(OrdersPageData {
        orders: Paginated::new(orders, filter.page, total, DEFAULT_ITEMS_PER_PAGE),
        status: filter.status,
    })
}

/// Loads the order and seeds the edit form.
pub fn load_order<R>(repo: &R, user: &AuthenticatedUser, order_id: i32) -> ServiceResult<OrderPageData>
where
    R: OrderReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let order = load_snapshot(repo, order_id)?;

    Ok(OrderPageData {
        draft: order.draft(),
        state: SyncState::for_order(&order),
        is_complete: order.is_complete(),
        statuses: OrderStatus::ALL,
        order,
    })
}

/// Reconciles the draft after a field change. Nothing is persisted.
pub fn sync_order_draft<R>(
    repo: &R,
    user: &AuthenticatedUser,
    order_id: i32,
    form: OrderSyncForm,
) -> ServiceResult<OrderSyncOutcome>
where
    R: OrderReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let payload = OrderSyncPayload::try_from(form)?;

    let order = load_snapshot(repo, order_id)?;

    let reconciled = reconcile(payload.draft, payload.state, &SyncContext::from(&order));

    Ok(OrderSyncOutcome::new(reconciled, &order))
}

/// Persists the submitted draft with a single status write.
///
/// The draft goes through one more reconcile pass with its own status as the
/// baseline, which leaves synced drafts untouched.
pub fn save_order<R>(
    repo: &R,
    user: &AuthenticatedUser,
    order_id: i32,
    form: SaveOrderForm,
) -> ServiceResult<SaveOrderOutcome>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let payload = SaveOrderPayload::try_from(form)?;

    let order = load_snapshot(repo, order_id)?;

    let baseline = SyncState::new(payload.draft.status, Default::default());
    let reconciled = reconcile(payload.draft, baseline, &SyncContext::from(&order));
    if reconciled.draft != payload.draft {
        log::info!(
            "Order {} draft normalized on save: {:?} -> {:?}",
            order.id,
            payload.draft,
            reconciled.draft
        );
    }
    for warning in &reconciled.warnings {
        log::warn!("Order {} saved with warning {warning:?} by {}", order.id, user.email);
    }

    let update = OrderStatusUpdate::derive(&order, &reconciled.draft, Utc::now().naive_utc());

    let saved = repo
        .update_order_status(order.id, &update)
        .map_err(|err| {
            log::error!("Failed to save order {}: {err}", order.id);
            err
        })?;

    log::info!(
        "Order {} saved by {}: {} paid={} delivered={}",
        saved.id,
        user.email,
        saved.status,
        saved.is_paid,
        saved.is_delivered
    );

    Ok(SaveOrderOutcome::new(saved, &reconciled.warnings))
}
