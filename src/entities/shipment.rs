//! Shipment entity - a parcel sent for an order.
//!
//! A shipment may be linked to an invoice once one exists. The order items it
//! carries are recorded in `Shipment_Items`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Shipment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Shipments")]
pub struct Model {
    /// Unique identifier for the shipment
    #[sea_orm(primary_key)]
    pub shipment_id: i32,
    /// Order being shipped
    pub order_id: i32,
    /// Invoice the shipment was sent against, if invoiced
    pub invoice_number: Option<i32>,
    pub shipment_tracking_number: Option<String>,
    pub shipment_date: Option<DateTime>,
    pub other_shipment_details: Option<String>,
}

/// Defines relationships between Shipment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each shipment belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::OrderId",
        on_delete = "Restrict"
    )]
    Order,
    /// Each shipment may belong to one invoice
    #[sea_orm(
        belongs_to = "super::invoice::Entity",
        from = "Column::InvoiceNumber",
        to = "super::invoice::Column::InvoiceNumber",
        on_delete = "Restrict"
    )]
    Invoice,
    /// Links to the order items carried
    #[sea_orm(has_many = "super::shipment_item::Entity")]
    ShipmentItems,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoice.def()
    }
}

impl Related<super::shipment_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShipmentItems.def()
    }
}

// Many-to-many through Shipment_Items
impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        super::shipment_item::Relation::OrderItem.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::shipment_item::Relation::Shipment.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
