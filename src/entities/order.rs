//! Order entity - a customer's request for products.
//!
//! An order owns its items, invoices and shipments. Navigation in either direction
//! goes through the `Related` impls below and is resolved by query.

use super::codes::OrderStatusCode;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub order_id: i32,
    /// Customer who placed the order
    pub customer_id: i32,
    /// Current status, constrained by `Ref_Order_Status_Codes`
    pub order_status_code: OrderStatusCode,
    /// When the order was placed
    pub date_order_placed: Option<DateTime>,
    pub order_details: Option<String>,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one customer
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::CustomerId",
        on_delete = "Restrict"
    )]
    Customer,
    /// Display metadata for the status code
    #[sea_orm(
        belongs_to = "super::ref_order_status_code::Entity",
        from = "Column::OrderStatusCode",
        to = "super::ref_order_status_code::Column::OrderStatusCode",
        on_delete = "Restrict"
    )]
    Status,
    /// One order has many items
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
    /// One order has many invoices
    #[sea_orm(has_many = "super::invoice::Entity")]
    Invoices,
    /// One order has many shipments
    #[sea_orm(has_many = "super::shipment::Entity")]
    Shipments,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::ref_order_status_code::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Status.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoices.def()
    }
}

impl Related<super::shipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shipments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
