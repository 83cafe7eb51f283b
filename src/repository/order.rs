//! Repository implementation for orders.

use diesel::prelude::*;

use crate::{
    domain::{
        order::{NewOrder, Order, OrderStatusUpdate},
        types::OrderId,
    },
    models::order::{
        NewOrder as DbNewOrder, Order as DbOrder, UpdateOrderStatus as DbUpdateOrderStatus,
    },
    repository::{
        DieselRepository, OrderListQuery, OrderReader, OrderWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: OrderId) -> RepositoryResult<Option<Order>> {
        use crate::schema::orders;

        let mut conn = self.conn()?;
        let db_order = orders::table
            .find(id.get())
            .select(DbOrder::as_select())
            .first::<DbOrder>(&mut conn)
            .optional()?;

        match db_order {
            Some(db_order) => Ok(Some(Order::try_from(db_order)?)),
            None => Ok(None),
        }
    }

    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = orders::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(status) = query.status {
                items = items.filter(orders::status.eq(status.as_str()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(i64::try_from(pagination.offset()).unwrap_or(i64::MAX))
                .limit(i64::try_from(pagination.per_page).unwrap_or(i64::MAX));
        }

        let orders = items
            .order((orders::created_at.desc(), orders::id.desc()))
            .load::<DbOrder>(&mut conn)?
            .into_iter()
            .map(|db_order| Order::try_from(db_order).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, orders))
    }
}

impl OrderWriter for DieselRepository {
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        let db_new_order: DbNewOrder = new_order.into();

        let db_order = diesel::insert_into(orders::table)
            .values(&db_new_order)
            .returning(DbOrder::as_returning())
            .get_result::<DbOrder>(&mut conn)?;

        Ok(Order::try_from(db_order)?)
    }

    fn update_order_status(
        &self,
        id: OrderId,
        update: &OrderStatusUpdate,
    ) -> RepositoryResult<Order> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        let changes: DbUpdateOrderStatus = update.into();

        let db_order = diesel::update(orders::table.find(id.get()))
            .set(&changes)
            .returning(DbOrder::as_returning())
            .get_result::<DbOrder>(&mut conn)?;

        Ok(Order::try_from(db_order)?)
    }
}
