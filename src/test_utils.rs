//! Shared test utilities for the order schema.
//!
//! This module provides helpers for setting up in-memory databases and
//! inserting rows with sensible defaults, so tests only spell out the columns
//! they care about.

use crate::{
    config::{
        database::{create_connection, create_tables},
        reference::Config,
    },
    core::{customer, invoice, order, product, reference::seed_reference_data, shipment},
    entities::{
        self, InvoiceStatusCode, OrderItemStatusCode, OrderStatusCode, PaymentMethodCode,
        ProductTypeCode,
    },
    errors::Result,
};
use sea_orm::{ActiveValue::Set, DatabaseConnection};

/// Creates an in-memory `SQLite` database with all tables created and the
/// lookup tables seeded with the built-in descriptions.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = setup_bare_test_db().await?;
    seed_reference_data(&db, &Config::default()).await?;
    Ok(db)
}

/// Creates an in-memory database with empty tables.
/// Use this when a test needs the lookup tables unseeded.
pub async fn setup_bare_test_db() -> Result<DatabaseConnection> {
    let db = create_connection("sqlite::memory:").await?;
    create_tables(&db).await?;
    Ok(db)
}

/// Creates a test customer.
///
/// # Defaults
/// * `first_name`: "Test"
/// * `last_name`: "Customer {id}"
/// * every other column: NULL
pub async fn create_test_customer(
    db: &DatabaseConnection,
    customer_id: i32,
) -> Result<entities::customer::Model> {
    customer::insert_customer(
        db,
        entities::customer::ActiveModel {
            customer_id: Set(customer_id),
            first_name: Set(Some("Test".to_string())),
            last_name: Set(Some(format!("Customer {customer_id}"))),
            ..Default::default()
        },
    )
    .await
}

/// Stores a payment method for a customer. The id is assigned by the database.
pub async fn create_test_payment_method(
    db: &DatabaseConnection,
    customer_id: i32,
    code: PaymentMethodCode,
) -> Result<entities::customer_payment_method::Model> {
    customer::insert_payment_method(
        db,
        entities::customer_payment_method::ActiveModel {
            customer_id: Set(customer_id),
            payment_method_code: Set(code),
            ..Default::default()
        },
    )
    .await
}

/// Creates a test product.
///
/// # Defaults
/// * `product_type_code`: `HARDWARE`
/// * `product_name`: "Product {id}"
pub async fn create_test_product(
    db: &DatabaseConnection,
    product_id: i32,
    price: f64,
) -> Result<entities::product::Model> {
    product::insert_product(
        db,
        entities::product::ActiveModel {
            product_id: Set(product_id),
            product_type_code: Set(ProductTypeCode::Hardware),
            product_name: Set(Some(format!("Product {product_id}"))),
            product_price: Set(Some(price)),
            ..Default::default()
        },
    )
    .await
}

/// Creates a pending test order with no placement date.
pub async fn create_test_order(
    db: &DatabaseConnection,
    order_id: i32,
    customer_id: i32,
) -> Result<entities::order::Model> {
    order::insert_order(
        db,
        entities::order::ActiveModel {
            order_id: Set(order_id),
            customer_id: Set(customer_id),
            order_status_code: Set(OrderStatusCode::Pending),
            ..Default::default()
        },
    )
    .await
}

/// Creates a pending order item.
///
/// # Defaults
/// * `order_item_price`: 1.0
pub async fn create_test_order_item(
    db: &DatabaseConnection,
    order_item_id: i32,
    order_id: i32,
    product_id: i32,
    quantity: i32,
) -> Result<entities::order_item::Model> {
    order::insert_order_item(
        db,
        entities::order_item::ActiveModel {
            order_item_id: Set(order_item_id),
            order_id: Set(order_id),
            product_id: Set(product_id),
            order_item_status_code: Set(OrderItemStatusCode::Pending),
            order_item_quantity: Set(Some(quantity)),
            order_item_price: Set(Some(1.0)),
            ..Default::default()
        },
    )
    .await
}

/// Creates an issued invoice for an order.
pub async fn create_test_invoice(
    db: &DatabaseConnection,
    invoice_number: i32,
    order_id: i32,
) -> Result<entities::invoice::Model> {
    invoice::insert_invoice(
        db,
        entities::invoice::ActiveModel {
            invoice_number: Set(invoice_number),
            order_id: Set(order_id),
            invoice_status_code: Set(InvoiceStatusCode::Issued),
            ..Default::default()
        },
    )
    .await
}

/// Records a payment against an invoice.
pub async fn create_test_payment(
    db: &DatabaseConnection,
    payment_id: i32,
    invoice_number: i32,
    amount: f64,
) -> Result<entities::payment::Model> {
    invoice::insert_payment(
        db,
        entities::payment::ActiveModel {
            payment_id: Set(payment_id),
            invoice_number: Set(invoice_number),
            payment_amount: Set(Some(amount)),
            ..Default::default()
        },
    )
    .await
}

/// Creates a shipment for an order, optionally tied to an invoice.
pub async fn create_test_shipment(
    db: &DatabaseConnection,
    shipment_id: i32,
    order_id: i32,
    invoice_number: Option<i32>,
) -> Result<entities::shipment::Model> {
    shipment::insert_shipment(
        db,
        entities::shipment::ActiveModel {
            shipment_id: Set(shipment_id),
            order_id: Set(order_id),
            invoice_number: Set(invoice_number),
            ..Default::default()
        },
    )
    .await
}

/// Sets up a seeded database with customer 1 and their order 100.
/// Returns (db, order) for common test scenarios.
pub async fn setup_with_order() -> Result<(DatabaseConnection, entities::order::Model)> {
    let db = setup_test_db().await?;
    create_test_customer(&db, 1).await?;
    let order = create_test_order(&db, 100, 1).await?;
    Ok((db, order))
}
