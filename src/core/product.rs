//! Product operations.
//!
//! Products are referenced by order items, so a product can only be deleted once
//! no order line mentions it.

use crate::{
    core::guard_delete,
    entities::{OrderItem, Product, order_item, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, prelude::*};
use tracing::{debug, instrument};

/// Inserts a product and returns the stored row.
///
/// # Errors
/// [`Error::ForeignKeyViolation`] if the product type code has not been seeded.
#[instrument(skip_all)]
pub async fn insert_product<C>(db: &C, product: product::ActiveModel) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    let stored = product.insert(db).await?;
    debug!(product_id = stored.product_id, "Inserted product");
    Ok(stored)
}

/// Retrieves a specific product by its unique ID.
pub async fn get_product_by_id<C>(db: &C, product_id: i32) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Every order line that refers to the product, ordered by order item id.
pub async fn order_items_for_product<C>(db: &C, product_id: i32) -> Result<Vec<order_item::Model>>
where
    C: ConnectionTrait,
{
    OrderItem::find()
        .filter(order_item::Column::ProductId.eq(product_id))
        .order_by_asc(order_item::Column::OrderItemId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a product that no order item refers to.
///
/// # Errors
/// - [`Error::NotFound`] if the product does not exist
/// - [`Error::DeleteRestricted`] while order items reference it
#[instrument(skip(db))]
pub async fn delete_product<C>(db: &C, product_id: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    if get_product_by_id(db, product_id).await?.is_none() {
        return Err(Error::not_found("Products", product_id));
    }

    let lines = OrderItem::find()
        .filter(order_item::Column::ProductId.eq(product_id))
        .count(db)
        .await?;
    guard_delete("Products", product_id, &[("Order_Items", lines)])?;

    Product::delete_by_id(product_id).exec(db).await?;
    debug!(product_id, "Deleted product");
    Ok(())
}
