//! Invoice and payment operations.
//!
//! Payments settle invoices; shipments may be sent against an invoice. Both block
//! deleting the invoice until they are removed.

use crate::{
    core::guard_delete,
    entities::{Invoice, Order, Payment, Shipment, invoice, order, payment, shipment},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, prelude::*};
use tracing::{debug, instrument};

/// Inserts an invoice and returns the stored row.
///
/// # Errors
/// [`Error::ForeignKeyViolation`] if the order or status code does not exist.
#[instrument(skip_all)]
pub async fn insert_invoice<C>(db: &C, invoice: invoice::ActiveModel) -> Result<invoice::Model>
where
    C: ConnectionTrait,
{
    let stored = invoice.insert(db).await?;
    debug!(
        invoice_number = stored.invoice_number,
        order_id = stored.order_id,
        "Inserted invoice"
    );
    Ok(stored)
}

/// Finds an invoice by its number.
pub async fn get_invoice_by_number<C>(
    db: &C,
    invoice_number: i32,
) -> Result<Option<invoice::Model>>
where
    C: ConnectionTrait,
{
    Invoice::find_by_id(invoice_number)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Order an invoice bills.
pub async fn order_for_invoice<C>(db: &C, invoice: &invoice::Model) -> Result<Option<order::Model>>
where
    C: ConnectionTrait,
{
    invoice.find_related(Order).one(db).await.map_err(Into::into)
}

/// Payments made against an invoice, ordered by payment id.
pub async fn payments_for_invoice<C>(db: &C, invoice_number: i32) -> Result<Vec<payment::Model>>
where
    C: ConnectionTrait,
{
    Payment::find()
        .filter(payment::Column::InvoiceNumber.eq(invoice_number))
        .order_by_asc(payment::Column::PaymentId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Shipments sent against an invoice, ordered by shipment id.
pub async fn shipments_for_invoice<C>(db: &C, invoice_number: i32) -> Result<Vec<shipment::Model>>
where
    C: ConnectionTrait,
{
    Shipment::find()
        .filter(shipment::Column::InvoiceNumber.eq(invoice_number))
        .order_by_asc(shipment::Column::ShipmentId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sum of all payment amounts recorded against an invoice. Payments without an
/// amount count as zero.
pub async fn total_paid<C>(db: &C, invoice_number: i32) -> Result<f64>
where
    C: ConnectionTrait,
{
    Ok(payments_for_invoice(db, invoice_number)
        .await?
        .iter()
        .filter_map(|p| p.payment_amount)
        .sum())
}

/// Deletes an invoice with no payments or shipments left.
///
/// # Errors
/// - [`Error::NotFound`] if the invoice does not exist
/// - [`Error::DeleteRestricted`] while payments or shipments reference it
#[instrument(skip(db))]
pub async fn delete_invoice<C>(db: &C, invoice_number: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    if get_invoice_by_number(db, invoice_number).await?.is_none() {
        return Err(Error::not_found("Invoices", invoice_number));
    }

    let payments = Payment::find()
        .filter(payment::Column::InvoiceNumber.eq(invoice_number))
        .count(db)
        .await?;
    let shipments = Shipment::find()
        .filter(shipment::Column::InvoiceNumber.eq(invoice_number))
        .count(db)
        .await?;
    guard_delete(
        "Invoices",
        invoice_number,
        &[("Payments", payments), ("Shipments", shipments)],
    )?;

    Invoice::delete_by_id(invoice_number).exec(db).await?;
    debug!(invoice_number, "Deleted invoice");
    Ok(())
}

/// Records a payment and returns the stored row.
///
/// # Errors
/// [`Error::ForeignKeyViolation`] if the invoice does not exist.
#[instrument(skip_all)]
pub async fn insert_payment<C>(db: &C, payment: payment::ActiveModel) -> Result<payment::Model>
where
    C: ConnectionTrait,
{
    let stored = payment.insert(db).await?;
    debug!(
        payment_id = stored.payment_id,
        invoice_number = stored.invoice_number,
        "Inserted payment"
    );
    Ok(stored)
}

/// Finds a payment by its unique ID.
pub async fn get_payment_by_id<C>(db: &C, payment_id: i32) -> Result<Option<payment::Model>>
where
    C: ConnectionTrait,
{
    Payment::find_by_id(payment_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Removes a payment. Nothing references payments.
#[instrument(skip(db))]
pub async fn delete_payment<C>(db: &C, payment_id: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = Payment::delete_by_id(payment_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found("Payments", payment_id));
    }
    Ok(())
}
