//! Persistence helpers over the declared schema.
//!
//! The schema itself only declares structure; these functions are thin wrappers
//! that insert, fetch and navigate rows through `SeaORM`. They are generic over
//! [`sea_orm::ConnectionTrait`] so they run equally on a connection or inside a
//! database transaction.
//!
//! Deletion uses a restrict policy: a row that is still referenced cannot be
//! deleted, and callers remove children before parents.

/// Customers and their stored payment methods
pub mod customer;
/// Whole-order read and write
pub mod graph;
/// Explicit parent-to-children lookup indices
pub mod index;
/// Dangling foreign-key audit
pub mod integrity;
/// Invoices and payments
pub mod invoice;
/// Orders and order items
pub mod order;
/// Products
pub mod product;
/// Reference table seeding and lookups
pub mod reference;
/// Shipments and shipment items
pub mod shipment;

use crate::errors::{Error, Result};

/// Refuses a delete while any dependant table still references the row.
///
/// `dependants` pairs a table name with the number of referencing rows found.
pub(crate) fn guard_delete(
    table: &'static str,
    key: impl ToString,
    dependants: &[(&'static str, u64)],
) -> Result<()> {
    let blocking: Vec<String> = dependants
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(name, count)| format!("{name} ({count})"))
        .collect();

    if blocking.is_empty() {
        Ok(())
    } else {
        Err(Error::DeleteRestricted {
            table,
            key: key.to_string(),
            dependants: blocking.join(", "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_delete_allows_unreferenced() {
        assert!(guard_delete("Orders", 1, &[("Order_Items", 0), ("Invoices", 0)]).is_ok());
    }

    #[test]
    fn test_guard_delete_lists_blocking_tables() {
        let dependants = [("Order_Items", 2), ("Invoices", 0), ("Shipments", 1)];
        let err = guard_delete("Orders", 7, &dependants).unwrap_err();
        match err {
            Error::DeleteRestricted {
                table,
                key,
                dependants,
            } => {
                assert_eq!(table, "Orders");
                assert_eq!(key, "7");
                assert_eq!(dependants, "Order_Items (2), Shipments (1)");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
