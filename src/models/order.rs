//! Diesel models for storing orders.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::{
    NewOrder as DomainNewOrder, Order as DomainOrder, OrderStatusUpdate as DomainOrderStatusUpdate,
};
use crate::domain::types::{AmountCents, CustomerEmail, OrderId, PublicId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::order::Order`].
pub struct Order {
    pub id: i32,
    pub public_id: Vec<u8>,
    pub customer_email: String,
    pub total_cents: i64,
    pub status: String,
    pub payment_method: String,
    pub delivery_type: String,
    pub is_paid: bool,
    pub paid_at: Option<NaiveDateTime>,
    pub is_delivered: bool,
    pub delivered_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
/// Insertable form of [`Order`].
pub struct NewOrder<'a> {
    pub public_id: &'a [u8],
    pub customer_email: &'a str,
    pub total_cents: i64,
    pub status: &'static str,
    pub payment_method: &'static str,
    pub delivery_type: &'static str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(treat_none_as_null = true)]
/// Status columns rewritten when an admin saves an order.
pub struct UpdateOrderStatus {
    pub status: &'static str,
    pub is_paid: bool,
    pub paid_at: Option<NaiveDateTime>,
    pub is_delivered: bool,
    pub delivered_at: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Order> for DomainOrder {
    type Error = TypeConstraintError;

    fn try_from(order: Order) -> Result<Self, Self::Error> {
        Ok(Self {
            id: OrderId::new(order.id)?,
            public_id: PublicId::from_bytes(&order.public_id)?,
            customer_email: CustomerEmail::new(order.customer_email)?,
            total_cents: AmountCents::new(order.total_cents)?,
            status: order.status.parse()?,
            payment_method: order.payment_method.parse()?,
            delivery_type: order.delivery_type.parse()?,
            is_paid: order.is_paid,
            paid_at: order.paid_at,
            is_delivered: order.is_delivered,
            delivered_at: order.delivered_at,
            created_at: order.created_at,
            updated_at: order.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewOrder> for NewOrder<'a> {
    fn from(order: &'a DomainNewOrder) -> Self {
        Self {
            public_id: order.public_id.as_bytes(),
            customer_email: order.customer_email.as_str(),
            total_cents: order.total_cents.get(),
            status: order.initial_status().as_str(),
            payment_method: order.payment_method.as_str(),
            delivery_type: order.delivery_type.as_str(),
        }
    }
}

impl From<&DomainOrderStatusUpdate> for UpdateOrderStatus {
    fn from(update: &DomainOrderStatusUpdate) -> Self {
        Self {
            status: update.status.as_str(),
            is_paid: update.is_paid,
            paid_at: update.paid_at,
            is_delivered: update.is_delivered,
            delivered_at: update.delivered_at,
            updated_at: update.updated_at,
        }
    }
}
