//! Endpoint operations and request validation.

mod crud;
mod validation;
pub use crud::{CatalogService, PIZZA_NOT_FOUND, RESTAURANT_NOT_FOUND};
pub use validation::{RequestValidator, ValidationRule, INVALID_FIELDS, MISSING_FIELDS};
