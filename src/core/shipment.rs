//! Shipment operations - shipments and the order items they carry.
//!
//! `Shipment_Items` is a pure link table keyed by (shipment, order item), so a
//! given order item appears at most once per shipment.

use crate::{
    core::guard_delete,
    entities::{OrderItem, Shipment, ShipmentItem, order_item, shipment, shipment_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

/// Inserts a shipment and returns the stored row.
///
/// # Errors
/// [`Error::ForeignKeyViolation`] if the order or invoice does not exist.
#[instrument(skip_all)]
pub async fn insert_shipment<C>(db: &C, shipment: shipment::ActiveModel) -> Result<shipment::Model>
where
    C: ConnectionTrait,
{
    let stored = shipment.insert(db).await?;
    debug!(
        shipment_id = stored.shipment_id,
        order_id = stored.order_id,
        "Inserted shipment"
    );
    Ok(stored)
}

/// Finds a shipment by its unique ID.
pub async fn get_shipment_by_id<C>(db: &C, shipment_id: i32) -> Result<Option<shipment::Model>>
where
    C: ConnectionTrait,
{
    Shipment::find_by_id(shipment_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Records that a shipment carries an order item.
///
/// # Errors
/// - [`Error::ForeignKeyViolation`] if either side does not exist
/// - [`Error::DuplicateKey`] if the pair is already linked
#[instrument(skip(db))]
pub async fn link_order_item<C>(
    db: &C,
    shipment_id: i32,
    order_item_id: i32,
) -> Result<shipment_item::Model>
where
    C: ConnectionTrait,
{
    let link = shipment_item::ActiveModel {
        shipment_id: Set(shipment_id),
        order_item_id: Set(order_item_id),
    }
    .insert(db)
    .await?;
    debug!(shipment_id, order_item_id, "Linked order item to shipment");
    Ok(link)
}

/// Removes a shipment / order item link.
#[instrument(skip(db))]
pub async fn unlink_order_item<C>(db: &C, shipment_id: i32, order_item_id: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = ShipmentItem::delete_by_id((shipment_id, order_item_id))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found(
            "Shipment_Items",
            format!("({shipment_id}, {order_item_id})"),
        ));
    }
    Ok(())
}

/// Link rows of a shipment, ordered by order item id.
pub async fn shipment_items_for_shipment<C>(
    db: &C,
    shipment_id: i32,
) -> Result<Vec<shipment_item::Model>>
where
    C: ConnectionTrait,
{
    ShipmentItem::find()
        .filter(shipment_item::Column::ShipmentId.eq(shipment_id))
        .order_by_asc(shipment_item::Column::OrderItemId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Order items carried by a shipment, through `Shipment_Items`.
pub async fn items_for_shipment<C>(db: &C, shipment_id: i32) -> Result<Vec<order_item::Model>>
where
    C: ConnectionTrait,
{
    let Some(shipment) = get_shipment_by_id(db, shipment_id).await? else {
        return Ok(Vec::new());
    };
    shipment
        .find_related(OrderItem)
        .order_by_asc(order_item::Column::OrderItemId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a shipment that no longer carries any order item.
///
/// # Errors
/// - [`Error::NotFound`] if the shipment does not exist
/// - [`Error::DeleteRestricted`] while shipment items reference it
#[instrument(skip(db))]
pub async fn delete_shipment<C>(db: &C, shipment_id: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    if get_shipment_by_id(db, shipment_id).await?.is_none() {
        return Err(Error::not_found("Shipments", shipment_id));
    }

    let links = ShipmentItem::find()
        .filter(shipment_item::Column::ShipmentId.eq(shipment_id))
        .count(db)
        .await?;
    guard_delete("Shipments", shipment_id, &[("Shipment_Items", links)])?;

    Shipment::delete_by_id(shipment_id).exec(db).await?;
    debug!(shipment_id, "Deleted shipment");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_link_rejects_missing_order_item() -> Result<()> {
        let (db, order) = setup_with_order().await?;
        create_test_shipment(&db, 900, order.order_id, None).await?;

        let result = link_order_item(&db, 900, 4242).await;
        assert!(matches!(result, Err(Error::ForeignKeyViolation { message: _ })));
        assert!(result.unwrap_err().is_foreign_key_violation());
        assert!(shipment_items_for_shipment(&db, 900).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_link_rejects_missing_shipment() -> Result<()> {
        let (db, order) = setup_with_order().await?;
        create_test_product(&db, 10, 1.0).await?;
        create_test_order_item(&db, 1, order.order_id, 10, 1).await?;

        let result = link_order_item(&db, 404, 1).await;
        assert!(matches!(result, Err(Error::ForeignKeyViolation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_link_pair_is_unique() -> Result<()> {
        let (db, order) = setup_with_order().await?;
        create_test_product(&db, 10, 1.0).await?;
        create_test_order_item(&db, 1, order.order_id, 10, 1).await?;
        create_test_shipment(&db, 900, order.order_id, None).await?;

        let link = link_order_item(&db, 900, 1).await?;
        assert_eq!(
            link,
            shipment_item::Model {
                shipment_id: 900,
                order_item_id: 1
            }
        );

        let again = link_order_item(&db, 900, 1).await;
        assert!(matches!(again, Err(Error::DuplicateKey { message: _ })));
        assert_eq!(shipment_items_for_shipment(&db, 900).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_items_for_shipment() -> Result<()> {
        let (db, order) = setup_with_order().await?;
        create_test_product(&db, 10, 1.0).await?;
        create_test_order_item(&db, 1, order.order_id, 10, 1).await?;
        create_test_order_item(&db, 2, order.order_id, 10, 4).await?;
        create_test_order_item(&db, 3, order.order_id, 10, 9).await?;
        create_test_shipment(&db, 900, order.order_id, None).await?;
        link_order_item(&db, 900, 3).await?;
        link_order_item(&db, 900, 1).await?;

        let quantities: Vec<Option<i32>> = items_for_shipment(&db, 900)
            .await?
            .into_iter()
            .map(|i| i.order_item_quantity)
            .collect();
        assert_eq!(quantities, vec![Some(1), Some(9)]);

        assert!(items_for_shipment(&db, 404).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_shipment_attributes() -> Result<()> {
        let (db, order) = setup_with_order().await?;
        let shipped = NaiveDate::from_ymd_opt(2024, 5, 2)
            .unwrap()
            .and_hms_opt(16, 0, 0)
            .unwrap();

        insert_shipment(
            &db,
            shipment::ActiveModel {
                shipment_id: Set(1),
                order_id: Set(order.order_id),
                invoice_number: Set(None),
                shipment_tracking_number: Set(Some("1Z999AA10123456784".to_string())),
                shipment_date: Set(Some(shipped)),
                other_shipment_details: Set(None),
            },
        )
        .await?;

        let found = get_shipment_by_id(&db, 1).await?.unwrap();
        assert_eq!(
            found.shipment_tracking_number.as_deref(),
            Some("1Z999AA10123456784")
        );
        assert_eq!(found.shipment_date, Some(shipped));
        assert!(found.invoice_number.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_shipment_invoice_must_exist() -> Result<()> {
        let (db, order) = setup_with_order().await?;

        let result = create_test_shipment(&db, 1, order.order_id, Some(777)).await;
        assert!(matches!(result, Err(Error::ForeignKeyViolation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_unlink_and_delete_shipment() -> Result<()> {
        let (db, order) = setup_with_order().await?;
        create_test_product(&db, 10, 1.0).await?;
        create_test_order_item(&db, 1, order.order_id, 10, 1).await?;
        create_test_shipment(&db, 900, order.order_id, None).await?;
        link_order_item(&db, 900, 1).await?;

        assert!(matches!(
            delete_shipment(&db, 900).await,
            Err(Error::DeleteRestricted { .. })
        ));

        unlink_order_item(&db, 900, 1).await?;
        assert!(matches!(
            unlink_order_item(&db, 900, 1).await,
            Err(Error::NotFound { table: "Shipment_Items", .. })
        ));
        delete_shipment(&db, 900).await?;
        assert!(get_shipment_by_id(&db, 900).await?.is_none());
        Ok(())
    }
}
