//! Order item entity - one product line within an order.
//!
//! Carries the quantity and price charged, plus the RMA fields filled in when the
//! line is returned.

use super::codes::OrderItemStatusCode;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Order_Items")]
pub struct Model {
    /// Unique identifier for the order line
    #[sea_orm(primary_key)]
    pub order_item_id: i32,
    /// Product being ordered
    pub product_id: i32,
    /// Order this line belongs to
    pub order_id: i32,
    /// Line status, constrained by `Ref_Order_Item_Status_Codes`
    pub order_item_status_code: OrderItemStatusCode,
    pub order_item_quantity: Option<i32>,
    /// Unit price charged on this line
    pub order_item_price: Option<f64>,
    /// Return merchandise authorization number
    pub rma_number: Option<String>,
    pub rma_issued_by: Option<String>,
    pub rma_issued_date: Option<DateTime>,
    pub other_order_item_details: Option<String>,
}

/// Defines relationships between `OrderItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::OrderId",
        on_delete = "Restrict"
    )]
    Order,
    /// Each line refers to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::ProductId",
        on_delete = "Restrict"
    )]
    Product,
    /// Display metadata for the status code
    #[sea_orm(
        belongs_to = "super::ref_order_item_status_code::Entity",
        from = "Column::OrderItemStatusCode",
        to = "super::ref_order_item_status_code::Column::OrderItemStatusCode",
        on_delete = "Restrict"
    )]
    Status,
    /// Shipment links for this line
    #[sea_orm(has_many = "super::shipment_item::Entity")]
    ShipmentItems,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::ref_order_item_status_code::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Status.def()
    }
}

impl Related<super::shipment_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShipmentItems.def()
    }
}

// Many-to-many through Shipment_Items
impl Related<super::shipment::Entity> for Entity {
    fn to() -> RelationDef {
        super::shipment_item::Relation::Shipment.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::shipment_item::Relation::OrderItem.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
