//! Order graph - an order together with everything that hangs off it.
//!
//! The graph is plain owned data: rows grouped by parent, with no references
//! between them. Saving writes it in a single database transaction so a failure
//! part way leaves nothing behind; loading reads it back in primary-key order.

use crate::{
    entities::{
        Invoice, Order, OrderItem, Payment, Shipment, ShipmentItem, invoice, order, order_item,
        payment, shipment, shipment_item,
    },
    errors::{Error, Result},
};
use sea_orm::{Iterable, QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// An invoice with the payments made against it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvoiceGraph {
    /// The invoice row
    pub invoice: invoice::Model,
    /// Payments, ordered by payment id
    pub payments: Vec<payment::Model>,
}

/// A shipment with the ids of the order items it carries
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentGraph {
    /// The shipment row
    pub shipment: shipment::Model,
    /// Carried order item ids, ascending
    pub order_item_ids: Vec<i32>,
}

/// An order and all of its dependent rows
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderGraph {
    /// The order row
    pub order: order::Model,
    /// Order items, ordered by id
    pub items: Vec<order_item::Model>,
    /// Invoices with their payments, ordered by invoice number
    pub invoices: Vec<InvoiceGraph>,
    /// Shipments with their items, ordered by shipment id
    pub shipments: Vec<ShipmentGraph>,
}

impl OrderGraph {
    /// Checks that every row in the graph points back at rows of this graph.
    ///
    /// The database only checks that referenced rows exist somewhere; this also
    /// rejects an item that belongs to a different order, which would silently
    /// fall out of the graph on reload.
    ///
    /// # Errors
    /// [`Error::InvalidGraph`] describing the first stray row found.
    pub fn validate(&self) -> Result<()> {
        let order_id = self.order.order_id;
        let invalid = |message: String| Err(Error::InvalidGraph { message });

        if let Some(item) = self.items.iter().find(|i| i.order_id != order_id) {
            return invalid(format!(
                "order item {} belongs to order {}, not {order_id}",
                item.order_item_id, item.order_id
            ));
        }
        for graph in &self.invoices {
            if graph.invoice.order_id != order_id {
                return invalid(format!(
                    "invoice {} belongs to order {}, not {order_id}",
                    graph.invoice.invoice_number, graph.invoice.order_id
                ));
            }
            if let Some(p) = graph
                .payments
                .iter()
                .find(|p| p.invoice_number != graph.invoice.invoice_number)
            {
                return invalid(format!(
                    "payment {} is for invoice {}, listed under {}",
                    p.payment_id, p.invoice_number, graph.invoice.invoice_number
                ));
            }
        }
        for graph in &self.shipments {
            let shipment = &graph.shipment;
            if shipment.order_id != order_id {
                return invalid(format!(
                    "shipment {} belongs to order {}, not {order_id}",
                    shipment.shipment_id, shipment.order_id
                ));
            }
            if let Some(number) = shipment.invoice_number {
                if !self.invoices.iter().any(|i| i.invoice.invoice_number == number) {
                    return invalid(format!(
                        "shipment {} refers to invoice {number} outside the graph",
                        shipment.shipment_id
                    ));
                }
            }
            if let Some(id) = graph
                .order_item_ids
                .iter()
                .find(|id| !self.items.iter().any(|i| i.order_item_id == **id))
            {
                return invalid(format!(
                    "shipment {} carries order item {id} outside the graph",
                    shipment.shipment_id
                ));
            }
        }
        Ok(())
    }
}

/// Turns a loaded model into an insertable active model with every column set.
fn insertable<A>(model: &<A::Entity as EntityTrait>::Model) -> A
where
    A: ActiveModelTrait + Default,
{
    let mut active = <A as Default>::default();
    for column in <A::Entity as EntityTrait>::Column::iter() {
        active.set(column, model.get(column));
    }
    active
}

/// Writes a complete order graph atomically.
///
/// The customer and products the graph refers to must already exist.
///
/// # Errors
/// - [`Error::InvalidGraph`] if rows point outside the graph
/// - [`Error::ForeignKeyViolation`] / [`Error::DuplicateKey`] from the database;
///   the transaction is rolled back and no row of the graph is kept
#[instrument(skip_all, fields(order_id = graph.order.order_id))]
pub async fn save_order_graph<C>(db: &C, graph: &OrderGraph) -> Result<()>
where
    C: TransactionTrait,
{
    graph.validate()?;
    let txn = db.begin().await?;

    insertable::<order::ActiveModel>(&graph.order)
        .insert(&txn)
        .await?;
    for item in &graph.items {
        insertable::<order_item::ActiveModel>(item)
            .insert(&txn)
            .await?;
    }
    for invoice_graph in &graph.invoices {
        insertable::<invoice::ActiveModel>(&invoice_graph.invoice)
            .insert(&txn)
            .await?;
        for payment in &invoice_graph.payments {
            insertable::<payment::ActiveModel>(payment)
                .insert(&txn)
                .await?;
        }
    }
    for shipment_graph in &graph.shipments {
        insertable::<shipment::ActiveModel>(&shipment_graph.shipment)
            .insert(&txn)
            .await?;
        for &order_item_id in &shipment_graph.order_item_ids {
            shipment_item::ActiveModel {
                shipment_id: Set(shipment_graph.shipment.shipment_id),
                order_item_id: Set(order_item_id),
            }
            .insert(&txn)
            .await?;
        }
    }

    txn.commit().await?;
    info!(
        items = graph.items.len(),
        invoices = graph.invoices.len(),
        shipments = graph.shipments.len(),
        "Order graph saved"
    );
    Ok(())
}

/// Reads an order and all of its dependent rows.
///
/// # Errors
/// [`Error::NotFound`] if the order does not exist.
#[instrument(skip(db))]
pub async fn load_order_graph<C>(db: &C, order_id: i32) -> Result<OrderGraph>
where
    C: ConnectionTrait,
{
    let order = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("Orders", order_id))?;

    let items = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .order_by_asc(order_item::Column::OrderItemId)
        .all(db)
        .await?;

    let invoices = Invoice::find()
        .filter(invoice::Column::OrderId.eq(order_id))
        .order_by_asc(invoice::Column::InvoiceNumber)
        .find_with_related(Payment)
        .all(db)
        .await?
        .into_iter()
        .map(|(invoice, mut payments)| {
            payments.sort_by_key(|p| p.payment_id);
            InvoiceGraph { invoice, payments }
        })
        .collect();

    let shipments = Shipment::find()
        .filter(shipment::Column::OrderId.eq(order_id))
        .order_by_asc(shipment::Column::ShipmentId)
        .find_with_related(ShipmentItem)
        .all(db)
        .await?
        .into_iter()
        .map(|(shipment, links)| {
            let mut order_item_ids: Vec<i32> = links.iter().map(|l| l.order_item_id).collect();
            order_item_ids.sort_unstable();
            ShipmentGraph {
                shipment,
                order_item_ids,
            }
        })
        .collect();

    Ok(OrderGraph {
        order,
        items,
        invoices,
        shipments,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{invoice::payments_for_invoice, order::items_for_order};
    use crate::entities::{InvoiceStatusCode, OrderItemStatusCode, OrderStatusCode};
    use crate::test_utils::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> DateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(hour, 15, 0)
            .unwrap()
    }

    fn sample_graph() -> OrderGraph {
        let item = |id: i32, quantity: i32, price: f64| order_item::Model {
            order_item_id: id,
            product_id: 10,
            order_id: 100,
            order_item_status_code: OrderItemStatusCode::Pending,
            order_item_quantity: Some(quantity),
            order_item_price: Some(price),
            rma_number: None,
            rma_issued_by: None,
            rma_issued_date: None,
            other_order_item_details: None,
        };

        let mut returned = item(1002, 1, 4.5);
        returned.order_item_status_code = OrderItemStatusCode::Returned;
        returned.rma_number = Some("RMA-1".to_string());
        returned.rma_issued_by = Some("support".to_string());
        returned.rma_issued_date = Some(at(20, 11));

        OrderGraph {
            order: order::Model {
                order_id: 100,
                customer_id: 1,
                order_status_code: OrderStatusCode::PartShipped,
                date_order_placed: Some(at(1, 9)),
                order_details: Some("leave at door".to_string()),
            },
            items: vec![item(1000, 2, 9.99), item(1001, 5, 0.25), returned],
            invoices: vec![InvoiceGraph {
                invoice: invoice::Model {
                    invoice_number: 500,
                    order_id: 100,
                    invoice_status_code: InvoiceStatusCode::PartPaid,
                    invoice_date: Some(at(2, 10)),
                    invoice_details: None,
                },
                payments: vec![
                    payment::Model {
                        payment_id: 1,
                        invoice_number: 500,
                        payment_date: Some(at(3, 8)),
                        payment_amount: Some(10.0),
                    },
                    payment::Model {
                        payment_id: 2,
                        invoice_number: 500,
                        payment_date: Some(at(4, 8)),
                        payment_amount: Some(5.23),
                    },
                ],
            }],
            shipments: vec![
                ShipmentGraph {
                    shipment: shipment::Model {
                        shipment_id: 900,
                        order_id: 100,
                        invoice_number: Some(500),
                        shipment_tracking_number: Some("TRACK-900".to_string()),
                        shipment_date: Some(at(5, 14)),
                        other_shipment_details: None,
                    },
                    order_item_ids: vec![1000, 1001],
                },
                ShipmentGraph {
                    shipment: shipment::Model {
                        shipment_id: 901,
                        order_id: 100,
                        invoice_number: None,
                        shipment_tracking_number: None,
                        shipment_date: None,
                        other_shipment_details: Some("split".to_string()),
                    },
                    order_item_ids: vec![1002],
                },
            ],
        }
    }

    async fn setup_parents() -> Result<DatabaseConnection> {
        let db = setup_test_db().await?;
        create_test_customer(&db, 1).await?;
        create_test_product(&db, 10, 9.99).await?;
        Ok(db)
    }

    #[tokio::test]
    async fn test_order_graph_round_trip() -> Result<()> {
        let db = setup_parents().await?;
        let graph = sample_graph();

        save_order_graph(&db, &graph).await?;
        let loaded = load_order_graph(&db, 100).await?;

        assert_eq!(loaded, graph);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_missing_order() -> Result<()> {
        let db = setup_parents().await?;
        assert!(matches!(
            load_order_graph(&db, 100).await,
            Err(Error::NotFound { table: "Orders", .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_save_is_atomic() -> Result<()> {
        let db = setup_parents().await?;
        let mut graph = sample_graph();
        // Product 11 does not exist; the last item insert fails.
        graph.items[2].product_id = 11;

        let result = save_order_graph(&db, &graph).await;
        assert!(matches!(result, Err(Error::ForeignKeyViolation { .. })));

        assert!(Order::find_by_id(100).one(&db).await?.is_none());
        assert!(items_for_order(&db, 100).await?.is_empty());
        assert!(Payment::find().all(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_rejects_stray_rows() -> Result<()> {
        let db = setup_parents().await?;

        let mut graph = sample_graph();
        graph.items[0].order_id = 200;
        assert!(matches!(
            save_order_graph(&db, &graph).await,
            Err(Error::InvalidGraph { .. })
        ));

        let mut graph = sample_graph();
        graph.shipments[1].order_item_ids.push(7777);
        assert!(matches!(
            save_order_graph(&db, &graph).await,
            Err(Error::InvalidGraph { .. })
        ));

        let mut graph = sample_graph();
        graph.invoices[0].payments[1].invoice_number = 501;
        assert!(graph.validate().is_err());

        assert!(Order::find_by_id(100).one(&db).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_saved_graph_is_navigable() -> Result<()> {
        let db = setup_parents().await?;
        save_order_graph(&db, &sample_graph()).await?;

        assert_eq!(items_for_order(&db, 100).await?.len(), 3);
        assert_eq!(payments_for_invoice(&db, 500).await?.len(), 2);
        assert_eq!(
            crate::core::shipment::items_for_shipment(&db, 900)
                .await?
                .iter()
                .map(|i| i.order_item_id)
                .collect::<Vec<_>>(),
            vec![1000, 1001]
        );
        Ok(())
    }
}
