//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::order::{NewOrder, Order, OrderStatusUpdate};
use crate::domain::types::OrderId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{OrderListQuery, OrderReader, OrderWriter};

mock! {
    pub Repository {}

    impl OrderReader for Repository {
        fn get_order_by_id(&self, id: OrderId) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
    }

    impl OrderWriter for Repository {
        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn update_order_status(
            &self,
            id: OrderId,
            update: &OrderStatusUpdate,
        ) -> RepositoryResult<Order>;
    }
}
