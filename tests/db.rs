use diesel::connection::SimpleConnection;

mod common;

#[test]
fn test_creates_migrated_db_file() {
    let test_db = common::TestDb::new("test_creates_migrated_db_file.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}

#[test]
fn test_connections_enforce_check_constraints() {
    let test_db = common::TestDb::new("test_connections_enforce_check_constraints.db");
    let mut conn = test_db.pool().get().unwrap();

    let result = conn.batch_execute(
        "INSERT INTO orders (public_id, customer_email, total_cents, status, payment_method, \
         delivery_type, is_paid, is_delivered, created_at, updated_at) \
         VALUES (X'00', 'a@example.com', 100, 'LOST', 'VISA', 'DELIVERY', 0, 0, \
         '2025-03-01 00:00:00', '2025-03-01 00:00:00')",
    );

    assert!(result.is_err());
}
