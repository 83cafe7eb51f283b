//! Order status synchronizer.
//!
//! Keeps the `status` of an [`OrderDraft`] consistent with its payment and
//! delivery flags while an admin edits an order. The synchronizer is a pure
//! function: everything it needs between calls travels in [`SyncState`], and
//! it never persists anything itself. Callers run [`reconcile`] after every
//! change to the draft and store the result only on explicit submit.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::order::{Order, OrderDraft, OrderStatus, PaymentMethod};

/// Which checkboxes the admin toggled by hand since the last status change.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TouchedFlags {
    pub delivery: bool,
    pub payment: bool,
}

/// State threaded from one [`reconcile`] call to the next.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncState {
    /// Status observed by the previous call.
    pub previous_status: OrderStatus,
    pub touched: TouchedFlags,
}

impl SyncState {
    #[must_use]
    pub const fn new(previous_status: OrderStatus, touched: TouchedFlags) -> Self {
        Self {
            previous_status,
            touched,
        }
    }

    /// Initial state for an edit session opened on `order`.
    #[must_use]
    pub fn for_order(order: &Order) -> Self {
        Self::new(order.status, TouchedFlags::default())
    }
}

/// Read-only facts about the stored order the rules depend on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncContext {
    pub payment_method: PaymentMethod,
    pub original_is_paid: bool,
    pub original_is_delivered: bool,
}

impl From<&Order> for SyncContext {
    fn from(order: &Order) -> Self {
        Self {
            payment_method: order.payment_method,
            original_is_paid: order.is_paid,
            original_is_delivered: order.is_delivered,
        }
    }
}

/// Advisory notices shown next to the edit form. They never block a save.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SyncWarning {
    /// Goods handed over although a prepaid method has not been confirmed.
    DeliveredWithoutPayment,
    /// A confirmed payment is being unchecked.
    PaymentRevoked,
    /// A confirmed delivery is being unchecked.
    DeliveryRevoked,
}

impl Display for SyncWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            SyncWarning::DeliveredWithoutPayment => {
                "Заказ отмечен доставленным без подтверждения оплаты."
            }
            SyncWarning::PaymentRevoked => {
                "Снимается подтверждение оплаты: заказ ранее был отмечен оплаченным."
            }
            SyncWarning::DeliveryRevoked => {
                "Снимается подтверждение доставки: заказ ранее был отмечен доставленным."
            }
        };
        f.write_str(message)
    }
}

/// Result of a single [`reconcile`] pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reconciled {
    pub draft: OrderDraft,
    pub warnings: Vec<SyncWarning>,
    /// State to pass into the next call.
    pub state: SyncState,
}

/// Reconciles `current` against its flags in one pass.
///
/// A status chosen by hand resets the touched flags; choosing `DELIVERED`
/// also ticks the delivery box once for that transition. After that the
/// first matching forward rule rewrites the status. `is_paid` is never
/// written and terminal statuses are never moved.
pub fn reconcile(current: OrderDraft, state: SyncState, context: &SyncContext) -> Reconciled {
    let mut draft = current;
    let mut touched = state.touched;

    let status_changed = draft.status != state.previous_status;
    if status_changed {
        touched = TouchedFlags::default();

        if draft.status == OrderStatus::Delivered && !draft.is_delivered && !touched.delivery {
            draft.is_delivered = true;
        }
    }

    if let Some(status) = forward_status(&draft, context.payment_method) {
        draft.status = status;
    }

    let warnings = collect_warnings(&draft, context);

    Reconciled {
        draft,
        warnings,
        state: SyncState::new(draft.status, touched),
    }
}

/// Applies the first matching flag rule, in precedence order.
fn forward_status(draft: &OrderDraft, payment_method: PaymentMethod) -> Option<OrderStatus> {
    use OrderStatus::*;

    let OrderDraft {
        status,
        is_paid,
        is_delivered,
    } = *draft;

    if is_delivered && is_paid && matches!(status, Pending | Processing | Shipped) {
        return Some(Delivered);
    }
    if is_delivered
        && !is_paid
        && !payment_method.allows_delivery_before_payment()
        && matches!(status, Pending | Processing)
    {
        return Some(Shipped);
    }
    if is_paid && !is_delivered && status == Pending {
        return Some(Processing);
    }
    if !is_paid && !is_delivered && matches!(status, Processing | Shipped | Delivered) {
        return Some(Pending);
    }
    None
}

fn collect_warnings(draft: &OrderDraft, context: &SyncContext) -> Vec<SyncWarning> {
    let mut warnings = Vec::new();

    if draft.is_delivered
        && !draft.is_paid
        && !context.payment_method.allows_delivery_before_payment()
    {
        warnings.push(SyncWarning::DeliveredWithoutPayment);
    }
    if context.original_is_paid && !draft.is_paid {
        warnings.push(SyncWarning::PaymentRevoked);
    }
    if context.original_is_delivered && !draft.is_delivered {
        warnings.push(SyncWarning::DeliveryRevoked);
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderStatus::*;

    fn context(payment_method: PaymentMethod) -> SyncContext {
        SyncContext {
            payment_method,
            original_is_paid: false,
            original_is_delivered: false,
        }
    }

    /// State for a call where only a flag changed.
    fn steady(status: OrderStatus) -> SyncState {
        SyncState::new(status, TouchedFlags::default())
    }

    fn all_drafts() -> impl Iterator<Item = OrderDraft> {
        OrderStatus::ALL.iter().flat_map(|&status| {
            [(false, false), (false, true), (true, false), (true, true)]
                .into_iter()
                .map(move |(is_paid, is_delivered)| OrderDraft::new(status, is_paid, is_delivered))
        })
    }

    #[test]
    fn terminal_statuses_are_never_rewritten() {
        for &method in PaymentMethod::ALL {
            for draft in all_drafts().filter(|d| d.status.is_terminal()) {
                for &previous in OrderStatus::ALL {
                    let out = reconcile(draft, steady(previous), &context(method));
                    assert_eq!(out.draft.status, draft.status, "{draft:?} from {previous}");
                }
            }
        }
    }

    #[test]
    fn paid_and_delivered_pending_becomes_delivered() {
        for &method in PaymentMethod::ALL {
            let out = reconcile(
                OrderDraft::new(Pending, true, true),
                steady(Pending),
                &context(method),
            );
            assert_eq!(out.draft.status, Delivered);
        }
    }

    #[test]
    fn delivered_unpaid_prepaid_order_becomes_shipped() {
        for method in [PaymentMethod::Visa, PaymentMethod::Cliq] {
            let out = reconcile(
                OrderDraft::new(Pending, false, true),
                steady(Pending),
                &context(method),
            );
            assert_eq!(out.draft.status, Shipped);
            assert_eq!(out.warnings, vec![SyncWarning::DeliveredWithoutPayment]);
        }
    }

    #[test]
    fn clearing_both_flags_regresses_to_pending() {
        for &method in PaymentMethod::ALL {
            let out = reconcile(
                OrderDraft::new(Shipped, false, false),
                steady(Shipped),
                &context(method),
            );
            assert_eq!(out.draft.status, Pending);
        }
    }

    #[test]
    fn output_is_a_fixed_point() {
        for &method in PaymentMethod::ALL {
            for draft in all_drafts() {
                for &previous in OrderStatus::ALL {
                    let ctx = context(method);
                    let first = reconcile(draft, steady(previous), &ctx);
                    let second = reconcile(first.draft, first.state, &ctx);
                    assert_eq!(second.draft, first.draft, "{draft:?} from {previous}");
                    assert_eq!(second.state, first.state);
                }
            }
        }
    }

    #[test]
    fn is_paid_is_never_written() {
        for &method in PaymentMethod::ALL {
            for draft in all_drafts() {
                for &previous in OrderStatus::ALL {
                    let out = reconcile(draft, steady(previous), &context(method));
                    assert_eq!(out.draft.is_paid, draft.is_paid);
                }
            }
        }
    }

    #[test]
    fn confirming_payment_moves_pending_to_processing() {
        let ctx = context(PaymentMethod::Visa);
        let opened = reconcile(OrderDraft::new(Pending, false, false), steady(Pending), &ctx);
        assert_eq!(opened.draft.status, Pending);

        let mut state = opened.state;
        state.touched.payment = true;
        let paid = OrderDraft {
            is_paid: true,
            ..opened.draft
        };
        let out = reconcile(paid, state, &ctx);

        assert_eq!(out.draft.status, Processing);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn choosing_delivered_ticks_delivery_and_resets_touched() {
        let state = SyncState::new(
            Processing,
            TouchedFlags {
                delivery: false,
                payment: true,
            },
        );
        let out = reconcile(
            OrderDraft::new(Delivered, true, false),
            state,
            &context(PaymentMethod::Visa),
        );

        assert!(out.draft.is_delivered);
        assert_eq!(out.draft.status, Delivered);
        assert_eq!(out.state.touched, TouchedFlags::default());
        assert_eq!(out.state.previous_status, Delivered);
    }

    #[test]
    fn unticking_delivery_after_choosing_delivered_sticks() {
        let ctx = context(PaymentMethod::Visa);
        let chosen = reconcile(
            OrderDraft::new(Delivered, true, false),
            steady(Processing),
            &ctx,
        );
        assert!(chosen.draft.is_delivered);

        let mut state = chosen.state;
        state.touched.delivery = true;
        let unticked = OrderDraft {
            is_delivered: false,
            ..chosen.draft
        };
        let out = reconcile(unticked, state, &ctx);

        assert!(!out.draft.is_delivered);
        assert_eq!(out.draft.status, Delivered);
        assert!(out.state.touched.delivery);
    }

    #[test]
    fn cash_on_delivery_tolerates_unpaid_delivery() {
        let out = reconcile(
            OrderDraft::new(Shipped, false, true),
            steady(Shipped),
            &context(PaymentMethod::CashOnDelivery),
        );

        assert_eq!(out.draft, OrderDraft::new(Shipped, false, true));
        assert!(!out.warnings.contains(&SyncWarning::DeliveredWithoutPayment));
    }

    #[test]
    fn unchecking_confirmed_payment_warns() {
        let ctx = SyncContext {
            payment_method: PaymentMethod::Cliq,
            original_is_paid: true,
            original_is_delivered: false,
        };
        for &status in OrderStatus::ALL {
            let out = reconcile(OrderDraft::new(status, false, false), steady(status), &ctx);
            assert!(out.warnings.contains(&SyncWarning::PaymentRevoked), "{status}");
        }
        assert!(SyncWarning::PaymentRevoked.to_string().contains("оплат"));
    }

    #[test]
    fn unchecking_confirmed_delivery_warns() {
        let ctx = SyncContext {
            payment_method: PaymentMethod::Visa,
            original_is_paid: true,
            original_is_delivered: true,
        };
        let out = reconcile(
            OrderDraft::new(Delivered, true, false),
            steady(Delivered),
            &ctx,
        );

        assert_eq!(out.warnings, vec![SyncWarning::DeliveryRevoked]);
    }

    #[test]
    fn first_matching_rule_wins_for_batched_updates() {
        // Both flags ticked at once on a pending order: the delivered rule
        // outranks the processing rule.
        let out = reconcile(
            OrderDraft::new(Pending, true, true),
            steady(Pending),
            &context(PaymentMethod::Visa),
        );
        assert_eq!(out.draft.status, Delivered);
        assert_eq!(out.state.previous_status, Delivered);
    }
}
