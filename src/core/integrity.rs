//! Integrity audit - finds foreign keys that point at missing rows.
//!
//! With enforcement on, the database refuses such rows, so a healthy database
//! audits clean. The audit exists for databases that were filled with
//! enforcement off (bulk imports, `PRAGMA foreign_keys = OFF`, older files).

use crate::{
    entities::{
        Customer, CustomerPaymentMethod, Invoice, Order, OrderItem, Payment, Product,
        RefInvoiceStatusCode, RefOrderItemStatusCode, RefOrderStatusCode, RefPaymentMethod,
        RefProductType, Shipment, ShipmentItem, customer, customer_payment_method, invoice, order,
        order_item, payment, product, ref_invoice_status_code, ref_order_item_status_code,
        ref_order_status_code, ref_payment_method, ref_product_type, shipment, shipment_item,
    },
    errors::Result,
};
use sea_orm::{QuerySelect, prelude::*};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{info, instrument, warn};

/// A row whose foreign key has no target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Table holding the bad row
    pub table: &'static str,
    /// Primary key of the bad row
    pub key: String,
    /// Foreign-key column
    pub column: &'static str,
    /// Table the column should point into
    pub references: &'static str,
    /// Value that has no match
    pub value: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} = {} not found in {}",
            self.table, self.key, self.column, self.value, self.references
        )
    }
}

/// Describes one foreign key for [`dangling`].
struct ForeignKey {
    table: &'static str,
    column: &'static str,
    references: &'static str,
}

impl ForeignKey {
    const fn new(table: &'static str, column: &'static str, references: &'static str) -> Self {
        Self {
            table,
            column,
            references,
        }
    }
}

fn dangling<K, V>(
    fk: &ForeignKey,
    rows: impl IntoIterator<Item = (K, Option<V>)>,
    targets: &BTreeSet<V>,
) -> Vec<Violation>
where
    K: fmt::Display,
    V: Ord + fmt::Display,
{
    rows.into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .filter(|(_, value)| !targets.contains(value))
        .map(|(key, value)| Violation {
            table: fk.table,
            key: key.to_string(),
            column: fk.column,
            references: fk.references,
            value: value.to_string(),
        })
        .collect()
}

async fn keys<C, E, V>(db: &C, column: E::Column) -> Result<BTreeSet<V>>
where
    C: ConnectionTrait,
    E: EntityTrait,
    V: sea_orm::TryGetable + Ord,
{
    let values: Vec<V> = E::find()
        .select_only()
        .column(column)
        .into_tuple()
        .all(db)
        .await?;
    Ok(values.into_iter().collect())
}

/// Reads `(primary key, foreign key)` for every row of `E` and reports the
/// foreign keys missing from `targets`.
async fn check<C, E, V>(
    db: &C,
    fk: &ForeignKey,
    (key, value): (E::Column, E::Column),
    targets: &BTreeSet<V>,
) -> Result<Vec<Violation>>
where
    C: ConnectionTrait,
    E: EntityTrait,
    V: sea_orm::TryGetable + Ord + fmt::Display,
{
    let rows: Vec<(i32, Option<V>)> = E::find()
        .select_only()
        .column(key)
        .column(value)
        .into_tuple()
        .all(db)
        .await?;
    Ok(dangling(fk, rows, targets))
}

/// Scans every foreign key of the schema and reports rows without a target.
#[instrument(skip(db))]
pub async fn audit<C>(db: &C) -> Result<Vec<Violation>>
where
    C: ConnectionTrait,
{
    let customers = keys::<_, Customer, i32>(db, customer::Column::CustomerId).await?;
    let products = keys::<_, Product, i32>(db, product::Column::ProductId).await?;
    let orders = keys::<_, Order, i32>(db, order::Column::OrderId).await?;
    let order_items = keys::<_, OrderItem, i32>(db, order_item::Column::OrderItemId).await?;
    let invoices = keys::<_, Invoice, i32>(db, invoice::Column::InvoiceNumber).await?;
    let shipments = keys::<_, Shipment, i32>(db, shipment::Column::ShipmentId).await?;
    let payment_methods = keys::<_, RefPaymentMethod, String>(
        db,
        ref_payment_method::Column::PaymentMethodCode,
    )
    .await?;
    let product_types =
        keys::<_, RefProductType, String>(db, ref_product_type::Column::ProductTypeCode).await?;
    let order_statuses =
        keys::<_, RefOrderStatusCode, String>(db, ref_order_status_code::Column::OrderStatusCode)
            .await?;
    let item_statuses = keys::<_, RefOrderItemStatusCode, String>(
        db,
        ref_order_item_status_code::Column::OrderItemStatusCode,
    )
    .await?;
    let invoice_statuses = keys::<_, RefInvoiceStatusCode, String>(
        db,
        ref_invoice_status_code::Column::InvoiceStatusCode,
    )
    .await?;

    let mut violations = Vec::new();

    // Customer_Payment_Methods
    {
        use customer_payment_method::Column as Col;
        let fk = |column, references| {
            ForeignKey::new("Customer_Payment_Methods", column, references)
        };
        let id = Col::CustomerPaymentId;
        violations.extend(
            check::<_, CustomerPaymentMethod, _>(
                db,
                &fk("customer_id", "Customers"),
                (id, Col::CustomerId),
                &customers,
            )
            .await?,
        );
        violations.extend(
            check::<_, CustomerPaymentMethod, _>(
                db,
                &fk("payment_method_code", "Ref_Payment_Methods"),
                (id, Col::PaymentMethodCode),
                &payment_methods,
            )
            .await?,
        );
    }

    // Products
    {
        use product::Column as Col;
        let fk = ForeignKey::new("Products", "product_type_code", "Ref_Product_Types");
        violations.extend(
            check::<_, Product, _>(db, &fk, (Col::ProductId, Col::ProductTypeCode), &product_types)
                .await?,
        );
    }

    // Orders
    {
        use order::Column as Col;
        let fk = |column, references| ForeignKey::new("Orders", column, references);
        violations.extend(
            check::<_, Order, _>(
                db,
                &fk("customer_id", "Customers"),
                (Col::OrderId, Col::CustomerId),
                &customers,
            )
            .await?,
        );
        violations.extend(
            check::<_, Order, _>(
                db,
                &fk("order_status_code", "Ref_Order_Status_Codes"),
                (Col::OrderId, Col::OrderStatusCode),
                &order_statuses,
            )
            .await?,
        );
    }

    // Order_Items
    {
        use order_item::Column as Col;
        let fk = |column, references| ForeignKey::new("Order_Items", column, references);
        let id = Col::OrderItemId;
        violations.extend(
            check::<_, OrderItem, _>(db, &fk("order_id", "Orders"), (id, Col::OrderId), &orders)
                .await?,
        );
        violations.extend(
            check::<_, OrderItem, _>(
                db,
                &fk("product_id", "Products"),
                (id, Col::ProductId),
                &products,
            )
            .await?,
        );
        violations.extend(
            check::<_, OrderItem, _>(
                db,
                &fk("order_item_status_code", "Ref_Order_Item_Status_Codes"),
                (id, Col::OrderItemStatusCode),
                &item_statuses,
            )
            .await?,
        );
    }

    // Invoices
    {
        use invoice::Column as Col;
        let fk = |column, references| ForeignKey::new("Invoices", column, references);
        let id = Col::InvoiceNumber;
        violations.extend(
            check::<_, Invoice, _>(db, &fk("order_id", "Orders"), (id, Col::OrderId), &orders)
                .await?,
        );
        violations.extend(
            check::<_, Invoice, _>(
                db,
                &fk("invoice_status_code", "Ref_Invoice_Status_Codes"),
                (id, Col::InvoiceStatusCode),
                &invoice_statuses,
            )
            .await?,
        );
    }

    // Payments
    {
        use payment::Column as Col;
        let fk = ForeignKey::new("Payments", "invoice_number", "Invoices");
        violations.extend(
            check::<_, Payment, _>(db, &fk, (Col::PaymentId, Col::InvoiceNumber), &invoices)
                .await?,
        );
    }

    // Shipments
    {
        use shipment::Column as Col;
        let fk = |column, references| ForeignKey::new("Shipments", column, references);
        let id = Col::ShipmentId;
        violations.extend(
            check::<_, Shipment, _>(db, &fk("order_id", "Orders"), (id, Col::OrderId), &orders)
                .await?,
        );
        violations.extend(
            check::<_, Shipment, _>(
                db,
                &fk("invoice_number", "Invoices"),
                (id, Col::InvoiceNumber),
                &invoices,
            )
            .await?,
        );
    }

    // Shipment_Items
    {
        let links: Vec<(i32, i32)> = ShipmentItem::find()
            .select_only()
            .column(shipment_item::Column::ShipmentId)
            .column(shipment_item::Column::OrderItemId)
            .into_tuple()
            .all(db)
            .await?;
        let fk = |column, references| ForeignKey::new("Shipment_Items", column, references);
        let key = |s: i32, i: i32| format!("({s}, {i})");
        violations.extend(dangling(
            &fk("shipment_id", "Shipments"),
            links.iter().map(|&(s, i)| (key(s, i), Some(s))),
            &shipments,
        ));
        violations.extend(dangling(
            &fk("order_item_id", "Order_Items"),
            links.iter().map(|&(s, i)| (key(s, i), Some(i))),
            &order_items,
        ));
    }

    if violations.is_empty() {
        info!("Integrity audit clean");
    } else {
        for violation in &violations {
            warn!(%violation, "Dangling foreign key");
        }
    }
    Ok(violations)
}
