//! Reference data configuration loading from config.toml
//!
//! The set of codes in each lookup table is fixed by the enums in
//! [`crate::entities::codes`]. This file only lets a deployment choose the display
//! descriptions seeded for them. Codes not listed keep their built-in text.
//!
//! ```toml
//! [[order_statuses]]
//! code = "PENDING"
//! description = "Awaiting confirmation"
//! ```

use crate::entities::{
    InvoiceStatusCode, OrderItemStatusCode, OrderStatusCode, PaymentMethodCode, ProductTypeCode,
    ReferenceCode,
};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Descriptions for `Ref_Payment_Methods`
    pub payment_methods: Vec<CodeDescription>,
    /// Descriptions for `Ref_Product_Types`
    pub product_types: Vec<CodeDescription>,
    /// Descriptions for `Ref_Order_Status_Codes`
    pub order_statuses: Vec<CodeDescription>,
    /// Descriptions for `Ref_Order_Item_Status_Codes`
    pub order_item_statuses: Vec<CodeDescription>,
    /// Descriptions for `Ref_Invoice_Status_Codes`
    pub invoice_statuses: Vec<CodeDescription>,
}

impl Config {
    /// Checks every override list against its code enum.
    ///
    /// # Errors
    /// Returns [`Error::Config`] naming the first unknown code.
    pub fn validate(&self) -> Result<()> {
        check_codes::<PaymentMethodCode>(&self.payment_methods)?;
        check_codes::<ProductTypeCode>(&self.product_types)?;
        check_codes::<OrderStatusCode>(&self.order_statuses)?;
        check_codes::<OrderItemStatusCode>(&self.order_item_statuses)?;
        check_codes::<InvoiceStatusCode>(&self.invoice_statuses)
    }
}

fn check_codes<C>(overrides: &[CodeDescription]) -> Result<()>
where
    C: ReferenceCode,
{
    match overrides
        .iter()
        .find(|o| C::try_from_value(&o.code).is_err())
    {
        Some(unknown) => Err(Error::Config {
            message: format!("Unknown code `{}` for {}", unknown.code, C::TABLE),
        }),
        None => Ok(()),
    }
}

/// Display override for a single code
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CodeDescription {
    /// Code string, e.g. `"CREDIT_CARD"`
    pub code: String,
    /// Text to store in the lookup table
    pub description: String,
}

/// Picks the description for `code`: the configured override if any, otherwise the
/// built-in text.
///
/// # Errors
/// Returns [`Error::Config`] if `overrides` names a code the enum does not have,
/// so typos in config.toml are reported instead of silently ignored.
pub fn resolve_description<C>(overrides: &[CodeDescription], code: C) -> Result<String>
where
    C: ReferenceCode,
{
    check_codes::<C>(overrides)?;

    let code_str = code.code();
    Ok(overrides
        .iter()
        .find(|o| o.code == code_str)
        .map_or_else(
            || code.default_description().to_string(),
            |o| o.description.clone(),
        ))
}

/// Loads reference data configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid or contains unknown sections
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    debug!("Loading reference configuration from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads the config file if it exists, otherwise returns the built-in defaults.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_optional_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    if path.as_ref().exists() {
        load_config(path)
    } else {
        debug!("No reference configuration at {:?}, using defaults", path.as_ref());
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{OrderStatusCode, PaymentMethodCode};
    use std::io::Write;

    #[test]
    fn test_parse_reference_config() {
        let toml_str = r#"
            [[payment_methods]]
            code = "CREDIT_CARD"
            description = "Visa / Mastercard"

            [[order_statuses]]
            code = "PENDING"
            description = "Awaiting confirmation"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.payment_methods.len(), 1);
        assert_eq!(config.payment_methods[0].code, "CREDIT_CARD");
        assert_eq!(config.order_statuses[0].description, "Awaiting confirmation");
        assert!(config.product_types.is_empty());
        assert!(config.invoice_statuses.is_empty());
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        let result: std::result::Result<Config, _> =
            toml::from_str("[[currencies]]\ncode = \"EUR\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_description_override_and_default() {
        let overrides = vec![CodeDescription {
            code: "CASH".to_string(),
            description: "Cash on delivery".to_string(),
        }];

        assert_eq!(
            resolve_description(&overrides, PaymentMethodCode::Cash).unwrap(),
            "Cash on delivery"
        );
        assert_eq!(
            resolve_description(&overrides, PaymentMethodCode::Cheque).unwrap(),
            "Cheque"
        );
    }

    #[test]
    fn test_resolve_description_rejects_unknown_code() {
        let overrides = vec![CodeDescription {
            code: "SHIPPED_TO_MARS".to_string(),
            description: "?".to_string(),
        }];

        let result = resolve_description(&overrides, OrderStatusCode::Pending);
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }

    #[test]
    fn test_validate_checks_every_list() {
        let mut config = Config {
            payment_methods: vec![CodeDescription {
                code: "CASH".to_string(),
                description: "Notes and coins".to_string(),
            }],
            ..Config::default()
        };
        assert!(config.validate().is_ok());

        config.invoice_statuses.push(CodeDescription {
            code: "BOGUS".to_string(),
            description: "?".to_string(),
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Ref_Invoice_Status_Codes"));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[invoice_statuses]]\ncode = \"VOID\"\ndescription = \"Written off\""
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.invoice_statuses[0].code, "VOID");
    }

    #[test]
    fn test_load_optional_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_optional_config(dir.path().join("config.toml")).unwrap();
        assert!(config.payment_methods.is_empty());
    }

    #[test]
    fn test_load_config_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(dir.path().join("nope.toml"));
        assert!(matches!(result, Err(Error::Config { message: _ })));
    }
}
