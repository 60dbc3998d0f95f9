//! Relationship index - parent-to-children lookups held as plain id maps.
//!
//! Each map is owned independently; there are no back-pointers between rows.
//! Build it once with [`RelationshipIndex::load`] when many navigations are
//! needed, instead of issuing a query per step.

use crate::{
    entities::{
        CustomerPaymentMethod, Invoice, Order, OrderItem, Payment, Shipment, ShipmentItem,
        customer_payment_method, invoice, order, order_item, payment, shipment, shipment_item,
    },
    errors::Result,
};
use sea_orm::{QuerySelect, prelude::*};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

type Links = BTreeMap<i32, BTreeSet<i32>>;

static NO_LINKS: BTreeSet<i32> = BTreeSet::new();

fn collect_links(pairs: impl IntoIterator<Item = (i32, i32)>) -> Links {
    let mut links = Links::new();
    for (parent, child) in pairs {
        links.entry(parent).or_default().insert(child);
    }
    links
}

fn children(links: &Links, parent: i32) -> &BTreeSet<i32> {
    links.get(&parent).unwrap_or(&NO_LINKS)
}

/// Snapshot of every one-to-many and many-to-many link in the schema
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RelationshipIndex {
    orders_by_customer: Links,
    payment_methods_by_customer: Links,
    items_by_order: Links,
    invoices_by_order: Links,
    shipments_by_order: Links,
    payments_by_invoice: Links,
    shipments_by_invoice: Links,
    items_by_shipment: Links,
    shipments_by_item: Links,
}

impl RelationshipIndex {
    /// Reads all link columns, one query per table.
    #[instrument(skip(db))]
    pub async fn load<C>(db: &C) -> Result<Self>
    where
        C: ConnectionTrait,
    {
        let orders: Vec<(i32, i32)> = Order::find()
            .select_only()
            .column(order::Column::CustomerId)
            .column(order::Column::OrderId)
            .into_tuple()
            .all(db)
            .await?;
        let methods: Vec<(i32, i32)> = CustomerPaymentMethod::find()
            .select_only()
            .column(customer_payment_method::Column::CustomerId)
            .column(customer_payment_method::Column::CustomerPaymentId)
            .into_tuple()
            .all(db)
            .await?;
        let items: Vec<(i32, i32)> = OrderItem::find()
            .select_only()
            .column(order_item::Column::OrderId)
            .column(order_item::Column::OrderItemId)
            .into_tuple()
            .all(db)
            .await?;
        let invoices: Vec<(i32, i32)> = Invoice::find()
            .select_only()
            .column(invoice::Column::OrderId)
            .column(invoice::Column::InvoiceNumber)
            .into_tuple()
            .all(db)
            .await?;
        let payments: Vec<(i32, i32)> = Payment::find()
            .select_only()
            .column(payment::Column::InvoiceNumber)
            .column(payment::Column::PaymentId)
            .into_tuple()
            .all(db)
            .await?;
        let shipments: Vec<(i32, i32, Option<i32>)> = Shipment::find()
            .select_only()
            .column(shipment::Column::OrderId)
            .column(shipment::Column::ShipmentId)
            .column(shipment::Column::InvoiceNumber)
            .into_tuple()
            .all(db)
            .await?;
        let shipment_items: Vec<(i32, i32)> = ShipmentItem::find()
            .select_only()
            .column(shipment_item::Column::ShipmentId)
            .column(shipment_item::Column::OrderItemId)
            .into_tuple()
            .all(db)
            .await?;

        let index = Self {
            orders_by_customer: collect_links(orders),
            payment_methods_by_customer: collect_links(methods),
            items_by_order: collect_links(items),
            invoices_by_order: collect_links(invoices),
            payments_by_invoice: collect_links(payments),
            shipments_by_order: collect_links(shipments.iter().map(|&(o, s, _)| (o, s))),
            shipments_by_invoice: collect_links(
                shipments
                    .iter()
                    .filter_map(|&(_, s, invoice)| invoice.map(|i| (i, s))),
            ),
            items_by_shipment: collect_links(shipment_items.iter().copied()),
            shipments_by_item: collect_links(shipment_items.iter().map(|&(s, i)| (i, s))),
        };
        debug!(
            customers = index.orders_by_customer.len(),
            orders = index.items_by_order.len(),
            "Relationship index loaded"
        );
        Ok(index)
    }

    /// Order ids placed by a customer
    #[must_use]
    pub fn orders_of_customer(&self, customer_id: i32) -> &BTreeSet<i32> {
        children(&self.orders_by_customer, customer_id)
    }

    /// Payment method ids stored for a customer
    #[must_use]
    pub fn payment_methods_of_customer(&self, customer_id: i32) -> &BTreeSet<i32> {
        children(&self.payment_methods_by_customer, customer_id)
    }

    /// Order item ids of an order
    #[must_use]
    pub fn items_of_order(&self, order_id: i32) -> &BTreeSet<i32> {
        children(&self.items_by_order, order_id)
    }

    /// Invoice numbers raised against an order
    #[must_use]
    pub fn invoices_of_order(&self, order_id: i32) -> &BTreeSet<i32> {
        children(&self.invoices_by_order, order_id)
    }

    /// Shipment ids of an order
    #[must_use]
    pub fn shipments_of_order(&self, order_id: i32) -> &BTreeSet<i32> {
        children(&self.shipments_by_order, order_id)
    }

    /// Payment ids settling an invoice
    #[must_use]
    pub fn payments_of_invoice(&self, invoice_number: i32) -> &BTreeSet<i32> {
        children(&self.payments_by_invoice, invoice_number)
    }

    /// Shipment ids sent against an invoice
    #[must_use]
    pub fn shipments_of_invoice(&self, invoice_number: i32) -> &BTreeSet<i32> {
        children(&self.shipments_by_invoice, invoice_number)
    }

    /// Order item ids carried by a shipment
    #[must_use]
    pub fn items_of_shipment(&self, shipment_id: i32) -> &BTreeSet<i32> {
        children(&self.items_by_shipment, shipment_id)
    }

    /// Shipment ids carrying an order item
    #[must_use]
    pub fn shipments_of_item(&self, order_item_id: i32) -> &BTreeSet<i32> {
        children(&self.shipments_by_item, order_item_id)
    }
}
