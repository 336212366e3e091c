//! Syntactic checks applied before any store is touched.
//!
//! Everything here is pure. A rejection short-circuits the request, so no partial
//! write can follow from bad input.

use crate::model::{LessonPatch, LessonUpdate, LineItem};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("name pattern is a valid regex"));
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("phone pattern is a valid regex"));

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Name must contain only letters and spaces")]
    InvalidName,

    #[error("Phone must contain only digits")]
    InvalidPhone,

    #[error("Order must contain at least one lesson")]
    NoLineItems,

    #[error("Quantity for lesson {lesson_id} must be a positive integer")]
    InvalidQuantity { lesson_id: String },

    #[error("{field} must be a non-negative whole number, got {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Order total is too large")]
    AmountOverflow,

    #[error("Search query is required")]
    EmptySearchTerm,

    #[error("Invalid id: {0}")]
    MalformedId(String),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

pub fn is_valid_price_update(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

pub fn is_valid_space_update(space: f64) -> bool {
    space.is_finite() && space >= 0.0
}

/// Checks customer details and line items of a booking request.
pub fn validate_booking(name: &str, phone: &str, items: &[LineItem]) -> Result<(), ValidationError> {
    if !is_valid_name(name) {
        return Err(ValidationError::InvalidName);
    }
    if !is_valid_phone(phone) {
        return Err(ValidationError::InvalidPhone);
    }
    if items.is_empty() {
        return Err(ValidationError::NoLineItems);
    }
    if let Some(item) = items.iter().find(|item| item.quantity == 0) {
        return Err(ValidationError::InvalidQuantity {
            lesson_id: item.lesson_id.to_string(),
        });
    }
    Ok(())
}

/// Turns a raw update payload into a typed [`LessonUpdate`].
///
/// `price` and `space` may arrive as JSON numbers or numeric strings. They must
/// be finite, non-negative and whole.
pub fn validate_patch(patch: LessonPatch) -> Result<LessonUpdate, ValidationError> {
    let price = patch
        .price
        .as_ref()
        .map(|value| parse_count("price", value, is_valid_price_update))
        .transpose()?;
    let space = patch
        .space
        .as_ref()
        .map(|value| parse_count("space", value, is_valid_space_update))
        .transpose()?;

    Ok(LessonUpdate {
        subject: patch.subject,
        location: patch.location,
        price,
        space,
        image: patch.image,
    })
}

fn parse_count(field: &'static str, value: &Value, is_valid: fn(f64) -> bool) -> Result<u32, ValidationError> {
    let invalid = || ValidationError::InvalidNumber {
        field,
        value: value.to_string(),
    };
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(invalid)?;

    if !is_valid(number) || number.fract() != 0.0 || number > f64::from(u32::MAX) {
        return Err(invalid());
    }
    Ok(number as u32)
}
