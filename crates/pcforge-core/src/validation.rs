//! # Validation Module
//!
//! Input validation for the admin product editor, cart and catalogue page.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form                                                 │
//! │  ├── Basic format checks (empty, length)                                │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command (Rust)                                                │
//! │  ├── Type validation (deserialization)                                  │
//! │  └── THIS MODULE: business rule validation                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  ├── NOT NULL / CHECK constraints                                       │
//! │  └── UNIQUE (user_id, product_name, unit_price_cents) on cart lines     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pcforge_core::validation::{validate_product_name, validate_quantity};
//!
//! validate_product_name("Ryzen 7 7800X3D").unwrap();
//! validate_quantity(2).unwrap();
//! ```

use crate::cart::NewCartLine;
use crate::catalog::CatalogQuery;
use crate::error::ValidationError;
use crate::types::{Category, Compatibility, ComponentDraft};
use crate::{COMPOSITE_BUILD_PREFIX, MAX_LINE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
/// A cart line may wrap a product name as `"<prefix> (<name>)"`.
const MAX_LINE_NAME_LEN: usize = MAX_NAME_LEN + COMPOSITE_BUILD_PREFIX.len() + 3;
const MAX_QUERY_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use pcforge_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Corsair RM850x").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_name(name, MAX_NAME_LEN)
}

fn validate_name(name: &str, max: usize) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a search query and returns it trimmed. Empty is allowed.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart quantity: `1..=MAX_LINE_QUANTITY`.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents. Zero is allowed.
///
/// ```rust
/// use pcforge_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents("price", 0).is_ok());
/// assert!(validate_price_cents("price", -100).is_err());
/// ```
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a review score in `0..=5`.
pub fn validate_rating(rating: f64) -> ValidationResult<()> {
    if !(0.0..=5.0).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: 5,
        });
    }

    Ok(())
}

fn positive(field: &str, value: u32) -> ValidationResult<()> {
    if value == 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn positive_opt(field: &str, value: Option<u32>) -> ValidationResult<()> {
    value.map_or(Ok(()), |v| positive(field, v))
}

// =============================================================================
// Compatibility Attributes
// =============================================================================

/// Validates an attribute bag against the product's category.
///
/// ## Rules
/// - The bag variant must match the category
/// - Sizes, frequencies and wattages must be positive
/// - A case must support at least one form factor
pub fn validate_compatibility(
    category: Category,
    compatibility: &Compatibility,
) -> ValidationResult<()> {
    if compatibility.category() != category {
        return Err(ValidationError::CategoryMismatch {
            expected: category,
            found: compatibility.category(),
        });
    }

    match compatibility {
        Compatibility::Cpu(cpu) => positive_opt("tdp_watts", cpu.tdp_watts),
        Compatibility::Motherboard(_) => Ok(()),
        Compatibility::Ram(ram) => {
            positive("frequency_mhz", ram.frequency_mhz)?;
            positive_opt("capacity_gb", ram.capacity_gb)
        }
        Compatibility::Gpu(gpu) => {
            positive("length_mm", gpu.length_mm)?;
            positive("recommended_psu_watts", gpu.recommended_psu_watts)
        }
        Compatibility::Storage(storage) => positive("capacity_gb", storage.capacity_gb),
        Compatibility::Psu(psu) => positive("wattage", psu.wattage),
        Compatibility::Case(case) => {
            positive("max_gpu_length_mm", case.max_gpu_length_mm)?;
            if case.supported_form_factors.is_empty() {
                return Err(ValidationError::Required {
                    field: "supported_form_factors".to_string(),
                });
            }
            Ok(())
        }
        Compatibility::Cooling(cooling) => positive_opt("radiator_size_mm", cooling.radiator_size_mm),
    }
}

// =============================================================================
// Form Validators
// =============================================================================

/// Validates the admin product form.
pub fn validate_draft(draft: &ComponentDraft) -> ValidationResult<()> {
    validate_product_name(&draft.name)?;
    validate_price_cents("price", draft.price_cents)?;
    if let Some(original) = draft.original_price_cents {
        validate_price_cents("original_price", original)?;
    }
    if let Some(rating) = draft.rating {
        validate_rating(rating)?;
    }
    if let Some(compatibility) = &draft.compatibility {
        validate_compatibility(draft.category, compatibility)?;
    }
    Ok(())
}

/// Validates a line before it is added to a cart.
///
/// Names may be longer than a product name so a complete build's line always
/// fits.
pub fn validate_new_cart_line(line: &NewCartLine) -> ValidationResult<()> {
    validate_name(&line.product_name, MAX_LINE_NAME_LEN)?;
    validate_price_cents("unit_price", line.unit_price_cents)?;
    validate_quantity(line.quantity)
}

/// Validates the catalogue filter's search text and price range.
pub fn validate_catalog_query(query: &CatalogQuery) -> ValidationResult<()> {
    validate_search_query(&query.search)?;
    validate_price_cents("min_price", query.min_price_cents)?;
    if query.max_price_cents < query.min_price_cents {
        return Err(ValidationError::OutOfRange {
            field: "max_price".to_string(),
            min: query.min_price_cents,
            max: i64::MAX,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{CaseSpec, FormFactor, GpuSpec, PsuSpec};

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Corsair RM850x").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
        assert!(validate_product_name(&"A".repeat(200)).is_ok());
    }

    #[test]
    fn test_cart_line_name_fits_wrapped_product_name() {
        let product = "A".repeat(MAX_NAME_LEN);
        let wrapped = NewCartLine {
            product_name: format!("{} ({})", COMPOSITE_BUILD_PREFIX, product),
            image_url: None,
            unit_price_cents: 100,
            quantity: 1,
        };
        assert!(validate_new_cart_line(&wrapped).is_ok());

        let too_long = NewCartLine {
            product_name: "A".repeat(MAX_LINE_NAME_LEN + 1),
            ..wrapped
        };
        assert!(matches!(
            validate_new_cart_line(&too_long),
            Err(ValidationError::TooLong { max: MAX_LINE_NAME_LEN, .. })
        ));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_LINE_QUANTITY).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(MAX_LINE_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(4.5).is_ok());
        assert!(validate_rating(5.0).is_ok());
        assert!(validate_rating(5.1).is_err());
        assert!(validate_rating(-0.1).is_err());
        assert!(validate_rating(f64::NAN).is_err());
    }

    #[test]
    fn test_bag_must_match_category() {
        let bag = Compatibility::Psu(PsuSpec {
            wattage: 850,
            modularity: None,
        });
        assert!(validate_compatibility(Category::Psu, &bag).is_ok());
        assert!(matches!(
            validate_compatibility(Category::Gpu, &bag),
            Err(ValidationError::CategoryMismatch {
                expected: Category::Gpu,
                found: Category::Psu
            })
        ));
    }

    #[test]
    fn test_bag_numbers_must_be_positive() {
        let gpu = Compatibility::Gpu(GpuSpec {
            length_mm: 0,
            recommended_psu_watts: 650,
        });
        assert!(matches!(
            validate_compatibility(Category::Gpu, &gpu),
            Err(ValidationError::MustBePositive { .. })
        ));

        let case = Compatibility::Case(CaseSpec {
            max_gpu_length_mm: 400,
            supported_form_factors: vec![],
        });
        assert!(validate_compatibility(Category::Case, &case).is_err());

        let case = Compatibility::Case(CaseSpec {
            max_gpu_length_mm: 400,
            supported_form_factors: vec![FormFactor::Atx],
        });
        assert!(validate_compatibility(Category::Case, &case).is_ok());
    }

    #[test]
    fn test_validate_draft() {
        let mut draft = ComponentDraft::new("RTX 4070", Category::Gpu, Money::from_cents(59900));
        assert!(validate_draft(&draft).is_ok());

        draft.rating = Some(6.0);
        assert!(validate_draft(&draft).is_err());

        draft.rating = None;
        draft.original_price_cents = Some(-1);
        assert!(validate_draft(&draft).is_err());
    }

    #[test]
    fn test_validate_catalog_query() {
        assert!(validate_catalog_query(&CatalogQuery::default()).is_ok());

        let inverted =
            CatalogQuery::default().price_range(Money::from_cents(500), Money::from_cents(100));
        assert!(validate_catalog_query(&inverted).is_err());
    }
}
