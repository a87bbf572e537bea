//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 2xxx: Permission errors
/// - 3xxx: Category errors
/// - 4xxx: Product errors
/// - 5xxx: Variant errors
/// - 6xxx: Stock errors
/// - 8xxx: Role errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Permission errors (2xxx)
    Permission,
    /// Category errors (3xxx)
    Category,
    /// Product errors (4xxx)
    Product,
    /// Variant errors (5xxx)
    Variant,
    /// Stock errors (6xxx)
    Stock,
    /// Role errors (8xxx)
    Role,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..2000 => Self::General,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Category,
            4000..5000 => Self::Product,
            5000..6000 => Self::Variant,
            6000..7000 => Self::Stock,
            7000..9000 => Self::Role,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Permission => "permission",
            Self::Category => "category",
            Self::Product => "product",
            Self::Variant => "variant",
            Self::Stock => "stock",
            Self::Role => "role",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(9), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Category);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Product);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Variant);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Stock);
        assert_eq!(ErrorCategory::from_code(8001), ErrorCategory::Role);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(
            ErrorCode::PermissionDenied.category(),
            ErrorCategory::Permission
        );
        assert_eq!(
            ErrorCode::CategoryNotFound.category(),
            ErrorCategory::Category
        );
        assert_eq!(ErrorCode::ProductNotFound.category(), ErrorCategory::Product);
        assert_eq!(ErrorCode::VariantNotFound.category(), ErrorCategory::Variant);
        assert_eq!(ErrorCode::InternalError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Permission).unwrap();
        assert_eq!(json, "\"permission\"");
        let category: ErrorCategory = serde_json::from_str("\"stock\"").unwrap();
        assert_eq!(category, ErrorCategory::Stock);
    }
}
