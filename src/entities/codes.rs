//! Reference codes - closed enumerations backing the `Ref_*` lookup tables.
//!
//! Domain tables store these enums directly. Each `Ref_*` table holds one row per
//! variant (the code plus a display description) and is the foreign-key target of
//! the matching code column, so the database only accepts codes that were seeded.

use sea_orm::{Iterable, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// How a customer pays (`Ref_Payment_Methods`)
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum PaymentMethodCode {
    /// Cash on delivery or at counter
    #[sea_orm(string_value = "CASH")]
    Cash,
    /// Credit card
    #[sea_orm(string_value = "CREDIT_CARD")]
    CreditCard,
    /// Debit card
    #[sea_orm(string_value = "DEBIT_CARD")]
    DebitCard,
    /// Direct bank transfer
    #[sea_orm(string_value = "BANK_TRANSFER")]
    BankTransfer,
    /// Paper cheque
    #[sea_orm(string_value = "CHEQUE")]
    Cheque,
}

/// Product classification (`Ref_Product_Types`)
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ProductTypeCode {
    /// Books and printed media
    #[sea_orm(string_value = "BOOKS")]
    Books,
    /// Apparel
    #[sea_orm(string_value = "CLOTHING")]
    Clothing,
    /// Consumer electronics
    #[sea_orm(string_value = "ELECTRONICS")]
    Electronics,
    /// Food and drink
    #[sea_orm(string_value = "FOOD")]
    Food,
    /// Tools and hardware
    #[sea_orm(string_value = "HARDWARE")]
    Hardware,
}

/// Lifecycle of an order (`Ref_Order_Status_Codes`)
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum OrderStatusCode {
    /// Placed, not yet confirmed
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Accepted for fulfilment
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    /// Some items shipped
    #[sea_orm(string_value = "PART_SHIPPED")]
    PartShipped,
    /// Everything shipped and invoiced
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    /// Cancelled before completion
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

/// Lifecycle of a single order line (`Ref_Order_Item_Status_Codes`)
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum OrderItemStatusCode {
    /// Awaiting fulfilment
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Delivered to the customer
    #[sea_orm(string_value = "DELIVERED")]
    Delivered,
    /// Cannot be fulfilled from stock
    #[sea_orm(string_value = "OUT_OF_STOCK")]
    OutOfStock,
    /// Returned under an RMA
    #[sea_orm(string_value = "RETURNED")]
    Returned,
    /// Cancelled
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

/// Lifecycle of an invoice (`Ref_Invoice_Status_Codes`)
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum InvoiceStatusCode {
    /// Sent to the customer
    #[sea_orm(string_value = "ISSUED")]
    Issued,
    /// Partly settled
    #[sea_orm(string_value = "PART_PAID")]
    PartPaid,
    /// Fully settled
    #[sea_orm(string_value = "PAID")]
    Paid,
    /// Past its due date
    #[sea_orm(string_value = "OVERDUE")]
    Overdue,
    /// Cancelled
    #[sea_orm(string_value = "VOID")]
    Void,
}

/// Ties a code enum to its lookup table and display metadata.
pub trait ReferenceCode: ActiveEnum<Value = String> + Iterable + Copy + Send + Sync {
    /// Lookup table holding the allowed codes
    type Table: EntityTrait;

    /// Name of the lookup table
    const TABLE: &'static str;

    /// Primary key column of the lookup table
    fn code_column() -> <Self::Table as EntityTrait>::Column;

    /// Description column of the lookup table
    fn description_column() -> <Self::Table as EntityTrait>::Column;

    /// Built-in display text, used when no override is configured
    fn default_description(self) -> &'static str;

    /// Stable code string as stored in the database
    fn code(self) -> String {
        self.to_value()
    }
}

impl ReferenceCode for PaymentMethodCode {
    type Table = super::ref_payment_method::Entity;

    const TABLE: &'static str = "Ref_Payment_Methods";

    fn code_column() -> super::ref_payment_method::Column {
        super::ref_payment_method::Column::PaymentMethodCode
    }

    fn description_column() -> super::ref_payment_method::Column {
        super::ref_payment_method::Column::PaymentMethodDescription
    }

    fn default_description(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::CreditCard => "Credit card",
            Self::DebitCard => "Debit card",
            Self::BankTransfer => "Bank transfer",
            Self::Cheque => "Cheque",
        }
    }
}

impl ReferenceCode for ProductTypeCode {
    type Table = super::ref_product_type::Entity;

    const TABLE: &'static str = "Ref_Product_Types";

    fn code_column() -> super::ref_product_type::Column {
        super::ref_product_type::Column::ProductTypeCode
    }

    fn description_column() -> super::ref_product_type::Column {
        super::ref_product_type::Column::ProductTypeDescription
    }

    fn default_description(self) -> &'static str {
        match self {
            Self::Books => "Books and printed media",
            Self::Clothing => "Clothing",
            Self::Electronics => "Electronics",
            Self::Food => "Food and drink",
            Self::Hardware => "Hardware and tools",
        }
    }
}

impl ReferenceCode for OrderStatusCode {
    type Table = super::ref_order_status_code::Entity;

    const TABLE: &'static str = "Ref_Order_Status_Codes";

    fn code_column() -> super::ref_order_status_code::Column {
        super::ref_order_status_code::Column::OrderStatusCode
    }

    fn description_column() -> super::ref_order_status_code::Column {
        super::ref_order_status_code::Column::OrderStatusDescription
    }

    fn default_description(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::PartShipped => "Partly shipped",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl ReferenceCode for OrderItemStatusCode {
    type Table = super::ref_order_item_status_code::Entity;

    const TABLE: &'static str = "Ref_Order_Item_Status_Codes";

    fn code_column() -> super::ref_order_item_status_code::Column {
        super::ref_order_item_status_code::Column::OrderItemStatusCode
    }

    fn description_column() -> super::ref_order_item_status_code::Column {
        super::ref_order_item_status_code::Column::OrderItemStatusDescription
    }

    fn default_description(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Delivered => "Delivered",
            Self::OutOfStock => "Out of stock",
            Self::Returned => "Returned",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl ReferenceCode for InvoiceStatusCode {
    type Table = super::ref_invoice_status_code::Entity;

    const TABLE: &'static str = "Ref_Invoice_Status_Codes";

    fn code_column() -> super::ref_invoice_status_code::Column {
        super::ref_invoice_status_code::Column::InvoiceStatusCode
    }

    fn description_column() -> super::ref_invoice_status_code::Column {
        super::ref_invoice_status_code::Column::InvoiceStatusDescription
    }

    fn default_description(self) -> &'static str {
        match self {
            Self::Issued => "Issued",
            Self::PartPaid => "Partly paid",
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
            Self::Void => "Void",
        }
    }
}
