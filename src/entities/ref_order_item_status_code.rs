//! Order item status lookup table - one row per
//! [`OrderItemStatusCode`](super::codes::OrderItemStatusCode) variant.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order item status reference row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Ref_Order_Item_Status_Codes")]
pub struct Model {
    /// Code string of a [`OrderItemStatusCode`](super::codes::OrderItemStatusCode) variant
    #[sea_orm(primary_key, auto_increment = false)]
    pub order_item_status_code: String,
    /// Display text for the code
    pub order_item_status_description: String,
}

/// Code columns referencing this table
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Rows carrying this code
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
