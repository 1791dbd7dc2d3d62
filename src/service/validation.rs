//! Request validation for priced-edge creation.

use crate::error::AppError;
use crate::models::NewRestaurantPizza;
use serde_json::Value;

pub const MISSING_FIELDS: &str = "Missing required fields";
pub const INVALID_FIELDS: &str = "validation errors";

pub const MIN_PRICE: i64 = 1;
pub const MAX_PRICE: i64 = 30;

/// Integer field rule. Bounds are inclusive.
#[derive(Clone, Copy, Debug)]
pub struct ValidationRule {
    pub field: &'static str,
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
}

const fn required_int(field: &'static str) -> ValidationRule {
    ValidationRule {
        field,
        minimum: None,
        maximum: None,
    }
}

pub const RESTAURANT_PIZZA_RULES: &[ValidationRule] = &[
    ValidationRule {
        field: "price",
        minimum: Some(MIN_PRICE),
        maximum: Some(MAX_PRICE),
    },
    required_int("pizza_id"),
    required_int("restaurant_id"),
];

pub struct RequestValidator;

impl RequestValidator {
    /// Check every rule in two passes: presence of all fields first, then type and range.
    /// Returns the integer values in rule order. A null field counts as missing.
    pub fn validate(body: &Value, rules: &[ValidationRule]) -> Result<Vec<i64>, AppError> {
        let obj = body
            .as_object()
            .ok_or_else(|| AppError::validation(MISSING_FIELDS))?;
        let mut present = Vec::with_capacity(rules.len());
        for rule in rules {
            match obj.get(rule.field) {
                None | Some(Value::Null) => return Err(AppError::validation(MISSING_FIELDS)),
                Some(v) => present.push((rule, v)),
            }
        }
        present
            .into_iter()
            .map(|(rule, v)| validate_field(v, rule))
            .collect()
    }

    pub fn restaurant_pizza(body: &Value) -> Result<NewRestaurantPizza, AppError> {
        match Self::validate(body, RESTAURANT_PIZZA_RULES)?.as_slice() {
            &[price, pizza_id, restaurant_id] => Ok(NewRestaurantPizza {
                price,
                pizza_id,
                restaurant_id,
            }),
            _ => Err(AppError::validation(INVALID_FIELDS)),
        }
    }
}

fn validate_field(v: &Value, rule: &ValidationRule) -> Result<i64, AppError> {
    let n = v.as_i64().ok_or_else(|| {
        tracing::debug!(field = rule.field, value = %v, "not an integer");
        AppError::validation(INVALID_FIELDS)
    })?;
    let below = rule.minimum.is_some_and(|min| n < min);
    let above = rule.maximum.is_some_and(|max| n > max);
    if below || above {
        tracing::debug!(field = rule.field, value = n, "out of range");
        return Err(AppError::validation(INVALID_FIELDS));
    }
    Ok(n)
}
