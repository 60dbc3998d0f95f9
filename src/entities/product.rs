//! Product entity - an item that can be ordered.
//!
//! Products are referenced by order items; a product's price is a catalogue price,
//! the price actually charged is recorded on each order item.

use super::codes::ProductTypeCode;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub product_id: i32,
    /// Product classification, constrained by `Ref_Product_Types`
    pub product_type_code: ProductTypeCode,
    /// Return merchandise authorization number
    pub return_merchandise_authorization_nr: Option<String>,
    pub product_name: Option<String>,
    /// Catalogue price
    pub product_price: Option<f64>,
    pub product_color: Option<String>,
    pub product_size: Option<String>,
    pub product_description: Option<String>,
    pub other_product_details: Option<String>,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Display metadata for the product type
    #[sea_orm(
        belongs_to = "super::ref_product_type::Entity",
        from = "Column::ProductTypeCode",
        to = "super::ref_product_type::Column::ProductTypeCode",
        on_delete = "Restrict"
    )]
    ProductType,
    /// Order lines for this product
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::ref_product_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductType.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
