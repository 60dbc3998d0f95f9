//! Entity module - Contains all SeaORM entity definitions for the order schema.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.
//!
//! Domain tables: customers, payment methods, products, orders, order items,
//! invoices, payments, shipments and shipment items. Reference tables (`ref_*`)
//! hold the allowed values of the enums in [`codes`].

pub mod codes;
pub mod customer;
pub mod customer_payment_method;
pub mod invoice;
pub mod order;
pub mod order_item;
pub mod payment;
pub mod product;
pub mod ref_invoice_status_code;
pub mod ref_order_item_status_code;
pub mod ref_order_status_code;
pub mod ref_payment_method;
pub mod ref_product_type;
pub mod shipment;
pub mod shipment_item;

// Re-export specific types to avoid conflicts
pub use codes::{
    InvoiceStatusCode, OrderItemStatusCode, OrderStatusCode, PaymentMethodCode, ProductTypeCode,
    ReferenceCode,
};
pub use customer::{Entity as Customer, Model as CustomerModel};
pub use customer_payment_method::{
    Entity as CustomerPaymentMethod, Model as CustomerPaymentMethodModel,
};
pub use invoice::{Entity as Invoice, Model as InvoiceModel};
pub use order::{Entity as Order, Model as OrderModel};
pub use order_item::{Entity as OrderItem, Model as OrderItemModel};
pub use payment::{Entity as Payment, Model as PaymentModel};
pub use product::{Entity as Product, Model as ProductModel};
pub use ref_invoice_status_code::Entity as RefInvoiceStatusCode;
pub use ref_order_item_status_code::Entity as RefOrderItemStatusCode;
pub use ref_order_status_code::Entity as RefOrderStatusCode;
pub use ref_payment_method::Entity as RefPaymentMethod;
pub use ref_product_type::Entity as RefProductType;
pub use shipment::{Entity as Shipment, Model as ShipmentModel};
pub use shipment_item::{Entity as ShipmentItem, Model as ShipmentItemModel};
