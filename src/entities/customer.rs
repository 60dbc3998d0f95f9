//! Customer entity - a person or organisation that places orders.
//!
//! Every contact and address attribute is optional; only the identifier is required.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer database model
#[derive(Clone, Debug, PartialEq, Eq, Default, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Customers")]
pub struct Model {
    /// Unique identifier for the customer
    #[sea_orm(primary_key)]
    pub customer_id: i32,
    /// Whether the customer is an organisation or a person
    pub organisation_or_person: Option<String>,
    /// Organisation name, for organisation customers
    pub organisation_name: Option<String>,
    pub gender: Option<String>,
    pub first_name: Option<String>,
    pub middle_initial: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub login_name: Option<String>,
    pub login_password: Option<String>,
    pub phone_number: Option<String>,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub address_line_3: Option<String>,
    pub address_line_4: Option<String>,
    pub town_city: Option<String>,
    pub county: Option<String>,
    pub country: Option<String>,
}

/// Defines relationships between Customer and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One customer has many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
    /// One customer has many stored payment methods
    #[sea_orm(has_many = "super::customer_payment_method::Entity")]
    PaymentMethods,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::customer_payment_method::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentMethods.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
