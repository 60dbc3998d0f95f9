//! Payment method lookup table - one row per
//! [`PaymentMethodCode`](super::codes::PaymentMethodCode) variant.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment method reference row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Ref_Payment_Methods")]
pub struct Model {
    /// Code string of a [`PaymentMethodCode`](super::codes::PaymentMethodCode) variant
    #[sea_orm(primary_key, auto_increment = false)]
    pub payment_method_code: String,
    /// Display text for the code
    pub payment_method_description: String,
}

/// Code columns referencing this table
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Rows carrying this code
    #[sea_orm(has_many = "super::customer_payment_method::Entity")]
    CustomerPaymentMethods,
}

impl Related<super::customer_payment_method::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerPaymentMethods.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
