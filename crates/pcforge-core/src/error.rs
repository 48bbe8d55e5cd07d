//! # Error Types
//!
//! Domain-specific error types for pcforge-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pcforge-core errors (this file)                                       │
//! │  ├── CoreError        - Selection, build and cart rule violations      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  pcforge-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  configurator app                                                      │
//! │  └── ApiError         - What callers see (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError ← DbError                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The compatibility resolver itself never fails: empty option sets and
//! missing attributes are normal states. These errors come from the session
//! and cart operations that sit around it.

use thiserror::Error;

use crate::types::Category;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No catalog entry has this ID.
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// The component exists but belongs to another category.
    #[error("Component {component_id} is a {actual}, not a {expected}")]
    WrongCategory {
        component_id: String,
        expected: Category,
        actual: Category,
    },

    /// The category is catalogue-only (prebuilt PCs, peripherals).
    #[error("{0} is not a configurator slot")]
    NotABuildSlot(Category),

    /// The component exists but is not flagged for the configurator.
    #[error("Component {0} is not available in the configurator")]
    NotConfigurable(String),

    /// The component is not in the current option set for its slot.
    ///
    /// ## When This Occurs
    /// ```text
    /// Case selected: max GPU 300mm
    ///      │
    ///      ▼
    /// select(gpu, "RTX 4090 (336mm)")
    ///      │
    ///      ▼
    /// Incompatible { category: gpu, .. }
    /// ```
    #[error("Component {component_id} is not compatible with the current {category} options")]
    Incompatible {
        component_id: String,
        category: Category,
    },

    /// Adding the build to the cart before every slot is filled.
    #[error("Build is incomplete, missing: {}", join_categories(.missing))]
    BuildIncomplete { missing: Vec<Category> },

    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    #[error("Cart line not found: {0}")]
    CartLineNotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

fn join_categories(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|c| c.label())
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Attribute bag and product category disagree.
    #[error("compatibility attributes are for {found}, but the product is a {expected}")]
    CategoryMismatch { expected: Category, found: Category },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_incomplete_lists_labels() {
        let err = CoreError::BuildIncomplete {
            missing: vec![Category::Ram, Category::Psu],
        };
        assert_eq!(
            err.to_string(),
            "Build is incomplete, missing: memory, power supply"
        );
    }

    #[test]
    fn test_wrong_category_message() {
        let err = CoreError::WrongCategory {
            component_id: "abc".to_string(),
            expected: Category::Cpu,
            actual: Category::Gpu,
        };
        assert_eq!(err.to_string(), "Component abc is a gpu, not a cpu");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Validation error: name is required");
    }
}
