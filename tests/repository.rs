use chrono::{NaiveDateTime, Utc};
use pushkind_orders::domain::order::{
    DeliveryType, NewOrder, OrderDraft, OrderStatus, OrderStatusUpdate, PaymentMethod,
};
use pushkind_orders::domain::types::{AmountCents, CustomerEmail, OrderId};
use pushkind_orders::repository::errors::RepositoryError;
use pushkind_orders::repository::{DieselRepository, OrderListQuery, OrderReader, OrderWriter};

mod common;

fn new_order(email: &str, method: PaymentMethod, delivery: DeliveryType) -> NewOrder {
    NewOrder::new(
        CustomerEmail::new(email).unwrap(),
        AmountCents::new(4_990).unwrap(),
        method,
        delivery,
    )
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[test]
fn test_order_create_and_get() {
    let test_db = common::TestDb::new("test_order_create_and_get.db");
    let repo = DieselRepository::new(test_db.pool());

    let payload = new_order(" Buyer@Example.com ", PaymentMethod::Visa, DeliveryType::Delivery);
    let created = repo.create_order(&payload).unwrap();

    assert_eq!(created.public_id, payload.public_id);
    assert_eq!(created.customer_email.as_str(), "buyer@example.com");
    assert_eq!(created.total_cents.get(), 4_990);
    assert_eq!(created.status, OrderStatus::Pending);
    assert!(!created.is_paid && !created.is_delivered);
    assert!(created.paid_at.is_none() && created.delivered_at.is_none());

    let loaded = repo.get_order_by_id(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);

    let missing = repo
        .get_order_by_id(OrderId::new(created.id.get() + 100).unwrap())
        .unwrap();
    assert!(missing.is_none());
}

#[test]
fn test_order_list_filters_and_paginates() {
    let test_db = common::TestDb::new("test_order_list_filters_and_paginates.db");
    let repo = DieselRepository::new(test_db.pool());

    let mut ids = Vec::new();
    for i in 0..5 {
        let order = repo
            .create_order(&new_order(
                &format!("buyer{i}@example.com"),
                PaymentMethod::Cliq,
                DeliveryType::Delivery,
            ))
            .unwrap();
        ids.push(order.id);
    }

    let shipped = OrderStatusUpdate::derive(
        &repo.get_order_by_id(ids[1]).unwrap().unwrap(),
        &OrderDraft::new(OrderStatus::Shipped, true, false),
        now(),
    );
    repo.update_order_status(ids[1], &shipped).unwrap();

    let (total, all) = repo.list_orders(OrderListQuery::new()).unwrap();
    assert_eq!(total, 5);
    assert_eq!(all.len(), 5);
    // Newest first.
    assert_eq!(all[0].id, ids[4]);

    let (total, page) = repo
        .list_orders(OrderListQuery::new().paginate(2, 2))
        .unwrap();
    assert_eq!(total, 5);
    assert_eq!(
        page.iter().map(|o| o.id).collect::<Vec<_>>(),
        vec![ids[2], ids[1]]
    );

    let (total, past_end) = repo
        .list_orders(OrderListQuery::new().paginate(usize::MAX, 20))
        .unwrap();
    assert_eq!(total, 5);
    assert!(past_end.is_empty());

    let (total, filtered) = repo
        .list_orders(OrderListQuery::new().status(OrderStatus::Shipped))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(filtered[0].id, ids[1]);

    let (total, empty) = repo
        .list_orders(OrderListQuery::new().status(OrderStatus::Refunded))
        .unwrap();
    assert_eq!(total, 0);
    assert!(empty.is_empty());
}

#[test]
fn test_update_order_status_writes_and_clears_stamps() {
    let test_db = common::TestDb::new("test_update_order_status_writes_and_clears_stamps.db");
    let repo = DieselRepository::new(test_db.pool());

    let order = repo
        .create_order(&new_order(
            "cod@example.com",
            PaymentMethod::CashOnDelivery,
            DeliveryType::Delivery,
        ))
        .unwrap();

    let delivered_at = NaiveDateTime::parse_from_str("2025-03-02 12:00:00", "%Y-%m-%d %H:%M:%S")
        .unwrap();
    let update = OrderStatusUpdate::derive(
        &order,
        &OrderDraft::new(OrderStatus::Delivered, true, true),
        delivered_at,
    );
    let delivered = repo.update_order_status(order.id, &update).unwrap();

    assert_eq!(delivered.status, OrderStatus::Delivered);
    assert!(delivered.is_paid && delivered.is_delivered);
    assert_eq!(delivered.paid_at, Some(delivered_at));
    assert_eq!(delivered.delivered_at, Some(delivered_at));
    assert_eq!(delivered.updated_at, delivered_at);
    assert!(delivered.is_complete());

    let refunded_at = NaiveDateTime::parse_from_str("2025-03-05 08:15:00", "%Y-%m-%d %H:%M:%S")
        .unwrap();
    let update = OrderStatusUpdate::derive(
        &delivered,
        &OrderDraft::new(OrderStatus::Refunded, false, true),
        refunded_at,
    );
    let refunded = repo.update_order_status(order.id, &update).unwrap();

    assert_eq!(refunded.status, OrderStatus::Refunded);
    assert!(!refunded.is_paid);
    assert_eq!(refunded.paid_at, None);
    assert_eq!(refunded.delivered_at, Some(delivered_at));
    assert_eq!(refunded.updated_at, refunded_at);

    let stored = repo.get_order_by_id(order.id).unwrap().unwrap();
    assert_eq!(stored, refunded);
}

#[test]
fn test_update_missing_order_is_not_found() {
    let test_db = common::TestDb::new("test_update_missing_order_is_not_found.db");
    let repo = DieselRepository::new(test_db.pool());

    let update = OrderStatusUpdate {
        status: OrderStatus::Processing,
        is_paid: true,
        paid_at: Some(now()),
        is_delivered: false,
        delivered_at: None,
        updated_at: now(),
    };

    let result = repo.update_order_status(OrderId::new(42).unwrap(), &update);

    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[test]
fn test_duplicate_public_id_is_a_constraint_violation() {
    let test_db = common::TestDb::new("test_duplicate_public_id_is_a_constraint_violation.db");
    let repo = DieselRepository::new(test_db.pool());

    let payload = new_order("twice@example.com", PaymentMethod::Visa, DeliveryType::Pickup);
    repo.create_order(&payload).unwrap();

    let result = repo.create_order(&payload);

    assert!(matches!(
        result,
        Err(RepositoryError::ConstraintViolation {
            column: "public_id",
            ..
        })
    ));
}
