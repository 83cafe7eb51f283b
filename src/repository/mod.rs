//! Persistence ports for orders and their Diesel implementation.

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::order::{NewOrder, Order, OrderStatus, OrderStatusUpdate};
use crate::domain::types::OrderId;
use crate::repository::errors::RepositoryResult;

pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod order;

/// Page window requested by a list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Rows to skip; page numbers start at 1 and 0 is read as 1.
    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1).saturating_mul(self.per_page)
    }
}

/// Filter and pagination for the admin order list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
    pub pagination: Option<Pagination>,
}

impl OrderListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait OrderReader {
    fn get_order_by_id(&self, id: OrderId) -> RepositoryResult<Option<Order>>;
    /// Returns the total number of matching orders and the requested page.
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
}

pub trait OrderWriter {
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    /// Writes the status columns of one order in a single statement.
    fn update_order_status(
        &self,
        id: OrderId,
        update: &OrderStatusUpdate,
    ) -> RepositoryResult<Order>;
}

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}
