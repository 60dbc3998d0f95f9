//! Invoice status lookup table - one row per
//! [`InvoiceStatusCode`](super::codes::InvoiceStatusCode) variant.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Invoice status reference row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Ref_Invoice_Status_Codes")]
pub struct Model {
    /// Code string of a [`InvoiceStatusCode`](super::codes::InvoiceStatusCode) variant
    #[sea_orm(primary_key, auto_increment = false)]
    pub invoice_status_code: String,
    /// Display text for the code
    pub invoice_status_description: String,
}

/// Code columns referencing this table
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Rows carrying this code
    #[sea_orm(has_many = "super::invoice::Entity")]
    Invoices,
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
