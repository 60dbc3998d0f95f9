//! Customer operations - customers and their stored payment methods.
//!
//! A customer can only be deleted once it has no orders and no payment methods left.

use crate::{
    core::guard_delete,
    entities::{Customer, CustomerPaymentMethod, Order, customer, customer_payment_method, order},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, prelude::*};
use tracing::{debug, instrument};

/// Inserts a customer and returns the stored row.
///
/// Leave `customer_id` as `NotSet` to let the database assign it.
#[instrument(skip_all)]
pub async fn insert_customer<C>(db: &C, customer: customer::ActiveModel) -> Result<customer::Model>
where
    C: ConnectionTrait,
{
    let stored = customer.insert(db).await?;
    debug!(customer_id = stored.customer_id, "Inserted customer");
    Ok(stored)
}

/// Finds a customer by primary key.
pub async fn get_customer_by_id<C>(db: &C, customer_id: i32) -> Result<Option<customer::Model>>
where
    C: ConnectionTrait,
{
    Customer::find_by_id(customer_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// All orders placed by a customer, ordered by order id.
pub async fn orders_for_customer<C>(db: &C, customer_id: i32) -> Result<Vec<order::Model>>
where
    C: ConnectionTrait,
{
    Order::find()
        .filter(order::Column::CustomerId.eq(customer_id))
        .order_by_asc(order::Column::OrderId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// All payment methods stored for a customer, ordered by id.
pub async fn payment_methods_for_customer<C>(
    db: &C,
    customer_id: i32,
) -> Result<Vec<customer_payment_method::Model>>
where
    C: ConnectionTrait,
{
    CustomerPaymentMethod::find()
        .filter(customer_payment_method::Column::CustomerId.eq(customer_id))
        .order_by_asc(customer_payment_method::Column::CustomerPaymentId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Stores a payment method for an existing customer.
///
/// # Errors
/// [`Error::ForeignKeyViolation`] if the customer or the method code does not exist.
#[instrument(skip_all)]
pub async fn insert_payment_method<C>(
    db: &C,
    method: customer_payment_method::ActiveModel,
) -> Result<customer_payment_method::Model>
where
    C: ConnectionTrait,
{
    let stored = method.insert(db).await?;
    debug!(
        customer_payment_id = stored.customer_payment_id,
        customer_id = stored.customer_id,
        "Inserted payment method"
    );
    Ok(stored)
}

/// Finds a stored payment method by primary key.
pub async fn get_payment_method_by_id<C>(
    db: &C,
    customer_payment_id: i32,
) -> Result<Option<customer_payment_method::Model>>
where
    C: ConnectionTrait,
{
    CustomerPaymentMethod::find_by_id(customer_payment_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Removes a stored payment method. Nothing references payment methods, so this
/// only fails if the row does not exist.
#[instrument(skip(db))]
pub async fn delete_payment_method<C>(db: &C, customer_payment_id: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = CustomerPaymentMethod::delete_by_id(customer_payment_id)
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found("Customer_Payment_Methods", customer_payment_id));
    }
    Ok(())
}

/// Deletes a customer that has no orders and no payment methods.
///
/// # Errors
/// - [`Error::NotFound`] if the customer does not exist
/// - [`Error::DeleteRestricted`] while orders or payment methods reference it
#[instrument(skip(db))]
pub async fn delete_customer<C>(db: &C, customer_id: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    if get_customer_by_id(db, customer_id).await?.is_none() {
        return Err(Error::not_found("Customers", customer_id));
    }

    let orders = Order::find()
        .filter(order::Column::CustomerId.eq(customer_id))
        .count(db)
        .await?;
    let methods = CustomerPaymentMethod::find()
        .filter(customer_payment_method::Column::CustomerId.eq(customer_id))
        .count(db)
        .await?;
    guard_delete(
        "Customers",
        customer_id,
        &[("Orders", orders), ("Customer_Payment_Methods", methods)],
    )?;

    Customer::delete_by_id(customer_id).exec(db).await?;
    debug!(customer_id, "Deleted customer");
    Ok(())
}
