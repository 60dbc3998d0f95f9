//! Database configuration module for the order schema.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the storage layout always matches the
//! Rust declarations, foreign keys included.
//!
//! The [`registry`] lists every table in foreign-key dependency order: reference
//! tables first, then each parent before its children. Creation follows that
//! order, and deleting a whole database's contents should follow it in reverse.

use crate::entities::{
    Customer, CustomerPaymentMethod, Invoice, Order, OrderItem, Payment, Product,
    RefInvoiceStatusCode, RefOrderItemStatusCode, RefOrderStatusCode, RefPaymentMethod,
    RefProductType, Shipment, ShipmentItem,
};
use crate::errors::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, EntityTrait, Schema,
    sea_query::TableCreateStatement,
};
use tracing::{debug, info, instrument};

/// Used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/orders.sqlite?mode=rwc";

/// A table known to the schema registry.
#[derive(Debug, Clone)]
pub struct RegisteredTable {
    /// Table name as stored in the database
    pub name: String,
    /// `CREATE TABLE IF NOT EXISTS` statement generated from the entity
    pub statement: TableCreateStatement,
}

/// Gets the database URL from environment variable or returns default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection and turns on foreign-key enforcement.
///
/// In-memory databases are limited to a single pooled connection, since every
/// new `SQLite` memory connection would otherwise see an empty database.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Opening database connection");
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(false);
    if database_url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }

    let db = Database::connect(options).await?;
    if db.get_database_backend() == DbBackend::Sqlite {
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;
    }
    info!("Database connection opened");
    Ok(db)
}

fn register<E>(schema: &Schema, entity: E) -> RegisteredTable
where
    E: EntityTrait,
{
    RegisteredTable {
        name: entity.table_name().to_string(),
        statement: schema
            .create_table_from_entity(entity)
            .if_not_exists()
            .to_owned(),
    }
}

/// Every table of the schema, in creation order.
#[must_use]
pub fn registry(backend: DbBackend) -> Vec<RegisteredTable> {
    let schema = Schema::new(backend);
    vec![
        register(&schema, RefPaymentMethod),
        register(&schema, RefProductType),
        register(&schema, RefOrderStatusCode),
        register(&schema, RefOrderItemStatusCode),
        register(&schema, RefInvoiceStatusCode),
        register(&schema, Customer),
        register(&schema, CustomerPaymentMethod),
        register(&schema, Product),
        register(&schema, Order),
        register(&schema, OrderItem),
        register(&schema, Invoice),
        register(&schema, Payment),
        register(&schema, Shipment),
        register(&schema, ShipmentItem),
    ]
}

/// Creates all registered tables that do not exist yet.
#[instrument(skip(db))]
pub async fn create_tables<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    let backend = db.get_database_backend();
    let tables = registry(backend);
    for table in &tables {
        debug!(table = %table.name, "Creating table if missing");
        db.execute(backend.build(&table.statement)).await?;
    }
    info!(count = tables.len(), "Database tables ensured");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{CustomerModel, ShipmentItemModel};
    use sea_orm::QuerySelect;

    #[test]
    fn test_registry_order_and_names() {
        let names: Vec<String> = registry(DbBackend::Sqlite)
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Ref_Payment_Methods",
                "Ref_Product_Types",
                "Ref_Order_Status_Codes",
                "Ref_Order_Item_Status_Codes",
                "Ref_Invoice_Status_Codes",
                "Customers",
                "Customer_Payment_Methods",
                "Products",
                "Orders",
                "Order_Items",
                "Invoices",
                "Payments",
                "Shipments",
                "Shipment_Items",
            ]
        );
    }

    #[test]
    fn test_generated_ddl_declares_keys() {
        let tables = registry(DbBackend::Sqlite);
        let ddl = |name: &str| {
            let table = tables.iter().find(|t| t.name == name).unwrap();
            DbBackend::Sqlite.build(&table.statement).to_string()
        };

        let shipment_items = ddl("Shipment_Items");
        assert!(shipment_items.contains("PRIMARY KEY (\"shipment_id\", \"order_item_id\")"));
        assert!(shipment_items.contains("REFERENCES \"Order_Items\" (\"order_item_id\")"));
        assert!(shipment_items.contains("REFERENCES \"Shipments\" (\"shipment_id\")"));

        let orders = ddl("Orders");
        assert!(orders.contains("REFERENCES \"Customers\" (\"customer_id\")"));
        assert!(orders.contains("REFERENCES \"Ref_Order_Status_Codes\" (\"order_status_code\")"));
        assert!(orders.contains("ON DELETE RESTRICT"));
    }

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        let _: Vec<CustomerModel> = Customer::find().limit(1).all(&db).await?;
        let _: Vec<ShipmentItemModel> = ShipmentItem::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
