//! Customer payment method entity - a stored way for a customer to pay.

use super::codes::PaymentMethodCode;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer payment method database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Customer_Payment_Methods")]
pub struct Model {
    /// Unique identifier for the stored payment method
    #[sea_orm(primary_key)]
    pub customer_payment_id: i32,
    /// Owning customer
    pub customer_id: i32,
    /// Kind of payment method, constrained by `Ref_Payment_Methods`
    pub payment_method_code: PaymentMethodCode,
    pub credit_card_number: Option<String>,
    pub payment_method_details: Option<String>,
}

/// Defines relationships between `CustomerPaymentMethod` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each payment method belongs to one customer
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::CustomerId",
        on_delete = "Restrict"
    )]
    Customer,
    /// Display metadata for the method code
    #[sea_orm(
        belongs_to = "super::ref_payment_method::Entity",
        from = "Column::PaymentMethodCode",
        to = "super::ref_payment_method::Column::PaymentMethodCode",
        on_delete = "Restrict"
    )]
    MethodDetails,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::ref_payment_method::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MethodDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
