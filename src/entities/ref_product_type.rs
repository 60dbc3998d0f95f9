//! Product type lookup table - one row per
//! [`ProductTypeCode`](super::codes::ProductTypeCode) variant.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product type reference row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Ref_Product_Types")]
pub struct Model {
    /// Code string of a [`ProductTypeCode`](super::codes::ProductTypeCode) variant
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_type_code: String,
    /// Display text for the code
    pub product_type_description: String,
}

/// Code columns referencing this table
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Rows carrying this code
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
