//! Reference data - seeding and reading the `Ref_*` lookup tables.
//!
//! Every code enum variant gets one row in its lookup table. Seeding is an upsert:
//! missing codes are inserted and existing descriptions are brought in line with
//! the configuration, so running it again is harmless.

use crate::{
    config::reference::{CodeDescription, Config, resolve_description},
    entities::{
        InvoiceStatusCode, OrderItemStatusCode, OrderStatusCode, PaymentMethodCode,
        ProductTypeCode, ReferenceCode,
    },
    errors::Result,
};
use sea_orm::{IntoActiveModel, QuerySelect, TransactionTrait, prelude::*, sea_query::OnConflict};
use tracing::{debug, info, instrument};

async fn seed_codes<C, Code>(db: &C, overrides: &[CodeDescription]) -> Result<usize>
where
    C: ConnectionTrait,
    Code: ReferenceCode,
    <Code::Table as EntityTrait>::ActiveModel: Default + Send,
    <Code::Table as EntityTrait>::Model:
        IntoActiveModel<<Code::Table as EntityTrait>::ActiveModel>,
{
    let mut seeded = 0;
    for code in Code::iter() {
        let description = resolve_description(overrides, code)?;

        let mut row = <<Code::Table as EntityTrait>::ActiveModel as Default>::default();
        row.set(Code::code_column(), code.code().into());
        row.set(Code::description_column(), description.into());

        <Code::Table as EntityTrait>::insert(row)
            .on_conflict(
                OnConflict::column(Code::code_column())
                    .update_column(Code::description_column())
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
        seeded += 1;
    }
    debug!(table = Code::TABLE, rows = seeded, "Reference table seeded");
    Ok(seeded)
}

/// Fills every lookup table from the code enums, using `config` for descriptions.
///
/// The whole configuration is checked before anything is written, and all five
/// tables are seeded in one transaction. Returns the number of rows written.
///
/// # Errors
/// - [`crate::errors::Error::Config`] if the configuration names an unknown code;
///   the database is left untouched
/// - a database error if a lookup table is missing
#[instrument(skip_all)]
pub async fn seed_reference_data<C>(db: &C, config: &Config) -> Result<usize>
where
    C: TransactionTrait,
{
    config.validate()?;
    let txn = db.begin().await?;

    let total = seed_codes::<_, PaymentMethodCode>(&txn, &config.payment_methods).await?
        + seed_codes::<_, ProductTypeCode>(&txn, &config.product_types).await?
        + seed_codes::<_, OrderStatusCode>(&txn, &config.order_statuses).await?
        + seed_codes::<_, OrderItemStatusCode>(&txn, &config.order_item_statuses).await?
        + seed_codes::<_, InvoiceStatusCode>(&txn, &config.invoice_statuses).await?;

    txn.commit().await?;
    info!(rows = total, "Reference data seeded");
    Ok(total)
}

/// Display description stored for a code, or `None` if the code was never seeded.
pub async fn describe<C, Code>(db: &C, code: Code) -> Result<Option<String>>
where
    C: ConnectionTrait,
    Code: ReferenceCode,
{
    <Code::Table as EntityTrait>::find()
        .select_only()
        .column(Code::description_column())
        .filter(Code::code_column().eq(code.code()))
        .into_tuple::<String>()
        .one(db)
        .await
        .map_err(Into::into)
}

/// All codes currently present in a lookup table, sorted.
pub async fn seeded_codes<C, Code>(db: &C) -> Result<Vec<String>>
where
    C: ConnectionTrait,
    Code: ReferenceCode,
{
    let mut codes: Vec<String> = <Code::Table as EntityTrait>::find()
        .select_only()
        .column(Code::code_column())
        .into_tuple::<String>()
        .all(db)
        .await?;
    codes.sort();
    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_seed_fills_every_table() -> Result<()> {
        let db = setup_bare_test_db().await?;

        let rows = seed_reference_data(&db, &Config::default()).await?;
        assert_eq!(rows, 25);

        assert_eq!(
            seeded_codes::<_, OrderStatusCode>(&db).await?,
            vec!["CANCELLED", "COMPLETED", "CONFIRMED", "PART_SHIPPED", "PENDING"]
        );
        assert_eq!(seeded_codes::<_, PaymentMethodCode>(&db).await?.len(), 5);
        assert_eq!(
            describe(&db, ProductTypeCode::Food).await?.as_deref(),
            Some("Food and drink")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() -> Result<()> {
        let db = setup_bare_test_db().await?;

        seed_reference_data(&db, &Config::default()).await?;
        seed_reference_data(&db, &Config::default()).await?;

        assert_eq!(seeded_codes::<_, InvoiceStatusCode>(&db).await?.len(), 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_applies_description_overrides() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(
            describe(&db, OrderItemStatusCode::OutOfStock).await?.as_deref(),
            Some("Out of stock")
        );

        let config = Config {
            order_item_statuses: vec![CodeDescription {
                code: "OUT_OF_STOCK".to_string(),
                description: "Backordered".to_string(),
            }],
            ..Config::default()
        };
        seed_reference_data(&db, &config).await?;

        assert_eq!(
            describe(&db, OrderItemStatusCode::OutOfStock).await?.as_deref(),
            Some("Backordered")
        );
        assert_eq!(
            describe(&db, OrderItemStatusCode::Returned).await?.as_deref(),
            Some("Returned")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_rejects_unknown_codes() -> Result<()> {
        let db = setup_bare_test_db().await?;
        let config = Config {
            payment_methods: vec![CodeDescription {
                code: "BARTER".to_string(),
                description: "Goats".to_string(),
            }],
            ..Config::default()
        };

        let result = seed_reference_data(&db, &config).await;
        assert!(matches!(result, Err(Error::Config { message: _ })));
        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_config_leaves_descriptions_unchanged() -> Result<()> {
        let db = setup_test_db().await?;
        let config = Config {
            payment_methods: vec![CodeDescription {
                code: "CASH".to_string(),
                description: "Changed".to_string(),
            }],
            invoice_statuses: vec![CodeDescription {
                code: "BOGUS".to_string(),
                description: "Never stored".to_string(),
            }],
            ..Config::default()
        };

        let result = seed_reference_data(&db, &config).await;
        assert!(matches!(result, Err(Error::Config { message: _ })));
        assert_eq!(
            describe(&db, PaymentMethodCode::Cash).await?.as_deref(),
            Some("Cash")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_describe_unseeded_code() -> Result<()> {
        let db = setup_bare_test_db().await?;
        assert!(describe(&db, InvoiceStatusCode::Paid).await?.is_none());
        Ok(())
    }
}
