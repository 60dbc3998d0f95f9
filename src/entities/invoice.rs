//! Invoice entity - a bill raised against an order.

use super::codes::InvoiceStatusCode;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Invoice database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Invoices")]
pub struct Model {
    /// Invoice number, the primary key
    #[sea_orm(primary_key)]
    pub invoice_number: i32,
    /// Order being billed
    pub order_id: i32,
    /// Current status, constrained by `Ref_Invoice_Status_Codes`
    pub invoice_status_code: InvoiceStatusCode,
    pub invoice_date: Option<DateTime>,
    pub invoice_details: Option<String>,
}

/// Defines relationships between Invoice and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each invoice bills one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::OrderId",
        on_delete = "Restrict"
    )]
    Order,
    /// Display metadata for the status code
    #[sea_orm(
        belongs_to = "super::ref_invoice_status_code::Entity",
        from = "Column::InvoiceStatusCode",
        to = "super::ref_invoice_status_code::Column::InvoiceStatusCode",
        on_delete = "Restrict"
    )]
    Status,
    /// Payments settling this invoice
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
    /// Shipments sent against this invoice
    #[sea_orm(has_many = "super::shipment::Entity")]
    Shipments,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::ref_invoice_status_code::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Status.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::shipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shipments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
