//! Order status lookup table - one row per
//! [`OrderStatusCode`](super::codes::OrderStatusCode) variant.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order status reference row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Ref_Order_Status_Codes")]
pub struct Model {
    /// Code string of a [`OrderStatusCode`](super::codes::OrderStatusCode) variant
    #[sea_orm(primary_key, auto_increment = false)]
    pub order_status_code: String,
    /// Display text for the code
    pub order_status_description: String,
}

/// Code columns referencing this table
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Rows carrying this code
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
