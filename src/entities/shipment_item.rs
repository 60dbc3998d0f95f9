//! Shipment item entity - links a shipment to an order item it carries.
//!
//! The composite primary key allows at most one link per (shipment, order item)
//! pair. There are no other columns.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Shipment item database model
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Shipment_Items")]
pub struct Model {
    /// Shipment carrying the item
    #[sea_orm(primary_key, auto_increment = false)]
    pub shipment_id: i32,
    /// Order item carried
    #[sea_orm(primary_key, auto_increment = false)]
    pub order_item_id: i32,
}

/// Defines relationships between `ShipmentItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::shipment::Entity",
        from = "Column::ShipmentId",
        to = "super::shipment::Column::ShipmentId",
        on_delete = "Restrict"
    )]
    Shipment,
    #[sea_orm(
        belongs_to = "super::order_item::Entity",
        from = "Column::OrderItemId",
        to = "super::order_item::Column::OrderItemId",
        on_delete = "Restrict"
    )]
    OrderItem,
}

impl Related<super::shipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shipment.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
