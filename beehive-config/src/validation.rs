// Configuration validation

use crate::{ConfigError, Result};

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Reusable validation rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Value must not be empty or whitespace
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::invalid(field, "cannot be empty"));
        }
        Ok(())
    }

    /// Number must be strictly positive
    pub fn positive(value: u64, field: &str) -> Result<()> {
        if value == 0 {
            return Err(ConfigError::invalid(field, "must be greater than zero"));
        }
        Ok(())
    }

    /// Template string must contain `placeholder`
    pub fn contains_placeholder(value: &str, placeholder: &str, field: &str) -> Result<()> {
        if !value.contains(placeholder) {
            return Err(ConfigError::invalid(
                field,
                format!("must contain the `{}` placeholder", placeholder),
            ));
        }
        Ok(())
    }

    /// Value must be one of the allowed values
    pub fn one_of<T: PartialEq + std::fmt::Debug>(value: &T, allowed: &[T], field: &str) -> Result<()> {
        if !allowed.contains(value) {
            return Err(ConfigError::invalid(
                field,
                format!("must be one of {:?}", allowed),
            ));
        }
        Ok(())
    }

    /// Collection must hold at least one element
    pub fn non_empty_list<T>(values: &[T], field: &str) -> Result<()> {
        if values.is_empty() {
            return Err(ConfigError::invalid(field, "needs at least one entry"));
        }
        Ok(())
    }

    /// Absolute http(s) URL
    pub fn is_url(value: &str, field: &str) -> Result<()> {
        if !value.starts_with("http://") && !value.starts_with("https://") {
            return Err(ConfigError::invalid(field, "must be an http(s) URL"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_empty_validation() {
        assert!(ConfigValidator::not_empty("beehive_lang", "field").is_ok());
        assert!(ConfigValidator::not_empty("  ", "field").is_err());
    }

    #[test]
    fn test_positive_validation() {
        assert!(ConfigValidator::positive(5500, "interval").is_ok());
        assert!(ConfigValidator::positive(0, "interval").is_err());
    }

    #[test]
    fn test_placeholder_validation() {
        assert!(ConfigValidator::contains_placeholder("data/{locale}.json", "{locale}", "f").is_ok());
        let err = ConfigValidator::contains_placeholder("data/fr.json", "{locale}", "f").unwrap_err();
        assert!(err.to_string().contains("{locale}"));
    }

    #[test]
    fn test_one_of_validation() {
        let allowed = ["flat", "nested", "detect"];
        assert!(ConfigValidator::one_of(&"flat", &allowed, "mode").is_ok());
        assert!(ConfigValidator::one_of(&"deep", &allowed, "mode").is_err());
    }

    #[test]
    fn test_list_and_url_validation() {
        assert!(ConfigValidator::non_empty_list(&[1], "images").is_ok());
        assert!(ConfigValidator::non_empty_list::<u8>(&[], "images").is_err());
        assert!(ConfigValidator::is_url("https://example.com", "base").is_ok());
        assert!(ConfigValidator::is_url("example.com", "base").is_err());
    }
}
