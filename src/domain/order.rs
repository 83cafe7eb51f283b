//! Order aggregate, its enumerations and the status write set.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AmountCents, CustomerEmail, OrderId, PublicId, TypeConstraintError};

/// Generates a closed enumeration with a canonical upper-snake-case text form.
macro_rules! text_enum {
    ($name:ident, $doc:expr, { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical text form used on the wire and in the database.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(TypeConstraintError::InvalidValue(format!(
                        "unknown {}: {other}",
                        stringify!($name)
                    ))),
                }
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

text_enum!(OrderStatus, "Fulfillment stage of an order.", {
    Pending => "PENDING",
    Processing => "PROCESSING",
    Shipped => "SHIPPED",
    Delivered => "DELIVERED",
    Cancelled => "CANCELLED",
    Refunded => "REFUNDED",
});

text_enum!(PaymentMethod, "How the customer pays for an order.", {
    CashOnDelivery => "CASH_ON_DELIVERY",
    Visa => "VISA",
    Cliq => "CLIQ",
});

text_enum!(DeliveryType, "How the goods reach the customer.", {
    Delivery => "DELIVERY",
    Pickup => "PICKUP",
});

impl OrderStatus {
    /// Cancelled and refunded orders are never moved by automation.
    pub const fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Cancelled | OrderStatus::Refunded)
    }
}

impl PaymentMethod {
    /// Cash on delivery tolerates delivery ahead of payment confirmation.
    pub const fn allows_delivery_before_payment(self) -> bool {
        matches!(self, PaymentMethod::CashOnDelivery)
    }
}

/// Persisted order as seen by the back-office.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub public_id: PublicId,
    pub customer_email: CustomerEmail,
    pub total_cents: AmountCents,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub delivery_type: DeliveryType,
    pub is_paid: bool,
    pub paid_at: Option<NaiveDateTime>,
    pub is_delivered: bool,
    pub delivered_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Order {
    /// Seeds an edit draft from the stored values.
    #[must_use]
    pub fn draft(&self) -> OrderDraft {
        OrderDraft {
            status: self.status,
            is_paid: self.is_paid,
            is_delivered: self.is_delivered,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.draft()
            .is_complete(self.payment_method, self.delivery_type)
    }
}

/// Order placed by checkout, before any back-office processing.
#[derive(Clone, Debug, PartialEq)]
pub struct NewOrder {
    pub public_id: PublicId,
    pub customer_email: CustomerEmail,
    pub total_cents: AmountCents,
    pub payment_method: PaymentMethod,
    pub delivery_type: DeliveryType,
}

impl NewOrder {
    #[must_use]
    pub fn new(
        customer_email: CustomerEmail,
        total_cents: AmountCents,
        payment_method: PaymentMethod,
        delivery_type: DeliveryType,
    ) -> Self {
        Self {
            public_id: PublicId::new(),
            customer_email,
            total_cents,
            payment_method,
            delivery_type,
        }
    }

    /// Status every freshly placed order starts in.
    pub const fn initial_status(&self) -> OrderStatus {
        OrderStatus::Pending
    }
}

/// Unsaved status fields of an order being edited.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderDraft {
    pub status: OrderStatus,
    pub is_paid: bool,
    pub is_delivered: bool,
}

impl OrderDraft {
    #[must_use]
    pub const fn new(status: OrderStatus, is_paid: bool, is_delivered: bool) -> Self {
        Self {
            status,
            is_paid,
            is_delivered,
        }
    }

    /// Whether the draft describes a fully fulfilled order.
    ///
    /// Pickup orders paid in cash are handed over at the counter, so the
    /// delivery flag is not required there; the collected payment is.
    pub fn is_complete(&self, payment_method: PaymentMethod, delivery_type: DeliveryType) -> bool {
        if self.status != OrderStatus::Delivered {
            return false;
        }
        match (delivery_type, payment_method) {
            (DeliveryType::Pickup, PaymentMethod::CashOnDelivery) => self.is_paid,
            _ => self.is_delivered,
        }
    }
}

/// Write set persisted when an admin submits the order edit form.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
    pub is_paid: bool,
    pub paid_at: Option<NaiveDateTime>,
    pub is_delivered: bool,
    pub delivered_at: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}

impl OrderStatusUpdate {
    /// Builds the write set for `draft`, stamping flags that flip on and
    /// clearing the stamps of flags that flip off.
    #[must_use]
    pub fn derive(snapshot: &Order, draft: &OrderDraft, now: NaiveDateTime) -> Self {
        Self {
            status: draft.status,
            is_paid: draft.is_paid,
            paid_at: stamp(snapshot.is_paid, draft.is_paid, snapshot.paid_at, now),
            is_delivered: draft.is_delivered,
            delivered_at: stamp(
                snapshot.is_delivered,
                draft.is_delivered,
                snapshot.delivered_at,
                now,
            ),
            updated_at: now,
        }
    }
}

fn stamp(
    was: bool,
    is: bool,
    current: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> Option<NaiveDateTime> {
    match (was, is) {
        (false, true) => Some(now),
        (true, false) => None,
        _ => current,
    }
}
