//! Order operations - orders and the items they contain.
//!
//! Navigation goes both ways: from an order to its items, invoices and shipments,
//! and from an order or item back to its customer, product or shipments. Each
//! direction is a separate query; nothing holds references between rows.

use crate::{
    core::guard_delete,
    entities::{
        Customer, Invoice, Order, OrderItem, Product, Shipment, ShipmentItem, customer, invoice,
        order, order_item, product, shipment, shipment_item,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, prelude::*};
use tracing::{debug, instrument};

/// Inserts an order and returns the stored row.
///
/// # Errors
/// [`Error::ForeignKeyViolation`] if the customer or status code does not exist.
#[instrument(skip_all)]
pub async fn insert_order<C>(db: &C, order: order::ActiveModel) -> Result<order::Model>
where
    C: ConnectionTrait,
{
    let stored = order.insert(db).await?;
    debug!(
        order_id = stored.order_id,
        customer_id = stored.customer_id,
        "Inserted order"
    );
    Ok(stored)
}

/// Finds an order by its unique ID.
pub async fn get_order_by_id<C>(db: &C, order_id: i32) -> Result<Option<order::Model>>
where
    C: ConnectionTrait,
{
    Order::find_by_id(order_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Customer who placed the order.
pub async fn customer_for_order<C>(db: &C, order: &order::Model) -> Result<Option<customer::Model>>
where
    C: ConnectionTrait,
{
    order
        .find_related(Customer)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Items of an order, ordered by order item id.
pub async fn items_for_order<C>(db: &C, order_id: i32) -> Result<Vec<order_item::Model>>
where
    C: ConnectionTrait,
{
    OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .order_by_asc(order_item::Column::OrderItemId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Invoices raised against an order, ordered by invoice number.
pub async fn invoices_for_order<C>(db: &C, order_id: i32) -> Result<Vec<invoice::Model>>
where
    C: ConnectionTrait,
{
    Invoice::find()
        .filter(invoice::Column::OrderId.eq(order_id))
        .order_by_asc(invoice::Column::InvoiceNumber)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Shipments sent for an order, ordered by shipment id.
pub async fn shipments_for_order<C>(db: &C, order_id: i32) -> Result<Vec<shipment::Model>>
where
    C: ConnectionTrait,
{
    Shipment::find()
        .filter(shipment::Column::OrderId.eq(order_id))
        .order_by_asc(shipment::Column::ShipmentId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Inserts an order item and returns the stored row.
///
/// # Errors
/// [`Error::ForeignKeyViolation`] if the order, product or status code does not exist.
#[instrument(skip_all)]
pub async fn insert_order_item<C>(
    db: &C,
    item: order_item::ActiveModel,
) -> Result<order_item::Model>
where
    C: ConnectionTrait,
{
    let stored = item.insert(db).await?;
    debug!(
        order_item_id = stored.order_item_id,
        order_id = stored.order_id,
        product_id = stored.product_id,
        "Inserted order item"
    );
    Ok(stored)
}

/// Finds an order item by its unique ID.
pub async fn get_order_item_by_id<C>(
    db: &C,
    order_item_id: i32,
) -> Result<Option<order_item::Model>>
where
    C: ConnectionTrait,
{
    OrderItem::find_by_id(order_item_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Product an order item refers to.
pub async fn product_for_order_item<C>(
    db: &C,
    item: &order_item::Model,
) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    item.find_related(Product).one(db).await.map_err(Into::into)
}

/// Shipments carrying an order item, through `Shipment_Items`.
pub async fn shipments_for_order_item<C>(
    db: &C,
    item: &order_item::Model,
) -> Result<Vec<shipment::Model>>
where
    C: ConnectionTrait,
{
    item.find_related(Shipment)
        .order_by_asc(shipment::Column::ShipmentId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes an order item that no shipment carries.
///
/// # Errors
/// - [`Error::NotFound`] if the item does not exist
/// - [`Error::DeleteRestricted`] while shipment items reference it
#[instrument(skip(db))]
pub async fn delete_order_item<C>(db: &C, order_item_id: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    if get_order_item_by_id(db, order_item_id).await?.is_none() {
        return Err(Error::not_found("Order_Items", order_item_id));
    }

    let links = ShipmentItem::find()
        .filter(shipment_item::Column::OrderItemId.eq(order_item_id))
        .count(db)
        .await?;
    guard_delete("Order_Items", order_item_id, &[("Shipment_Items", links)])?;

    OrderItem::delete_by_id(order_item_id).exec(db).await?;
    debug!(order_item_id, "Deleted order item");
    Ok(())
}

/// Deletes an order with no items, invoices or shipments left.
///
/// # Errors
/// - [`Error::NotFound`] if the order does not exist
/// - [`Error::DeleteRestricted`] while any dependant row references it
#[instrument(skip(db))]
pub async fn delete_order<C>(db: &C, order_id: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    if get_order_by_id(db, order_id).await?.is_none() {
        return Err(Error::not_found("Orders", order_id));
    }

    let items = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .count(db)
        .await?;
    let invoices = Invoice::find()
        .filter(invoice::Column::OrderId.eq(order_id))
        .count(db)
        .await?;
    let shipments = Shipment::find()
        .filter(shipment::Column::OrderId.eq(order_id))
        .count(db)
        .await?;
    guard_delete(
        "Orders",
        order_id,
        &[
            ("Order_Items", items),
            ("Invoices", invoices),
            ("Shipments", shipments),
        ],
    )?;

    Order::delete_by_id(order_id).exec(db).await?;
    debug!(order_id, "Deleted order");
    Ok(())
}
