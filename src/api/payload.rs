use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::str::FromStr;

use crate::database::models::NewRecipe;

const MAX_CHAR_LENGTH: usize = 255;
const PRICE_DECIMAL_PLACES: u32 = 2;
const PRICE_MAX_DIGITS: u32 = 5;

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_BLANK: &str = "This field may not be blank.";
const NOT_STRING: &str = "Not a valid string.";
const NOT_INTEGER: &str = "A valid integer is required.";
const NOT_NUMBER: &str = "A valid number is required.";
const NOT_NEGATIVE: &str = "Ensure this value is greater than or equal to 0.";

/// Per-field validation failures, collected before anything is persisted
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: HashMap<String, String>,
}

impl ValidationErrors {
    fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields.insert(field.to_string(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn into_field_errors(self) -> HashMap<String, String> {
        self.fields
    }
}

impl NewRecipe {
    /// Validate a create payload. Every bad field is reported, not just the first.
    ///
    /// `id`, `user` and any other unknown keys are ignored.
    pub fn from_payload(body: &Value) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let Value::Object(map) = body else {
            errors.add("non_field_errors", "Invalid data. Expected a JSON object.");
            return Err(errors);
        };

        let title = required(map, "title", &mut errors)
            .and_then(|v| char_field(v, false).map_err(|e| errors.add("title", e)).ok());
        let time_minutes = required(map, "time_minutes", &mut errors)
            .and_then(|v| parse_time_minutes(v).map_err(|e| errors.add("time_minutes", e)).ok());
        let price = required(map, "price", &mut errors)
            .and_then(|v| parse_price(v).map_err(|e| errors.add("price", e)).ok());
        let description = optional(map, "description")
            .map(char_field_unbounded)
            .transpose()
            .map_err(|e| errors.add("description", e))
            .ok()
            .flatten();
        let link = optional(map, "link")
            .map(|v| char_field(v, true))
            .transpose()
            .map_err(|e| errors.add("link", e))
            .ok()
            .flatten();

        match (title, time_minutes, price) {
            (Some(title), Some(time_minutes), Some(price)) if errors.is_empty() => Ok(NewRecipe {
                title,
                time_minutes,
                price,
                description: description.unwrap_or_default(),
                link: link.unwrap_or_default(),
            }),
            _ => Err(errors),
        }
    }
}

fn required<'a>(map: &'a Map<String, Value>, field: &str, errors: &mut ValidationErrors) -> Option<&'a Value> {
    match map.get(field) {
        None => {
            errors.add(field, REQUIRED);
            None
        }
        Some(Value::Null) => {
            errors.add(field, NOT_NULL);
            None
        }
        Some(v) => Some(v),
    }
}

/// Absent and null both fall back to the default
fn optional<'a>(map: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    map.get(field).filter(|v| !v.is_null())
}

fn as_text(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(NOT_STRING.to_string()),
    }
}

fn char_field(value: &Value, allow_blank: bool) -> Result<String, String> {
    let text = as_text(value)?;
    if text.is_empty() && !allow_blank {
        return Err(NOT_BLANK.to_string());
    }
    if text.chars().count() > MAX_CHAR_LENGTH {
        return Err(format!("Ensure this field has no more than {} characters.", MAX_CHAR_LENGTH));
    }
    Ok(text)
}

fn char_field_unbounded(value: &Value) -> Result<String, String> {
    as_text(value)
}

fn parse_time_minutes(value: &Value) -> Result<i32, String> {
    let minutes: i64 = match value {
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i,
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => f as i64,
            _ => return Err(NOT_INTEGER.to_string()),
        },
        Value::String(s) => {
            let s = s.trim();
            // "30.0" and "30." are accepted as 30
            let s = match s.split_once('.') {
                Some((whole, frac)) if frac.chars().all(|c| c == '0') => whole,
                _ => s,
            };
            s.parse().map_err(|_| NOT_INTEGER.to_string())?
        }
        _ => return Err(NOT_INTEGER.to_string()),
    };

    if minutes < 0 {
        return Err(NOT_NEGATIVE.to_string());
    }
    i32::try_from(minutes).map_err(|_| format!("Ensure this value is less than or equal to {}.", i32::MAX))
}

fn parse_price(value: &Value) -> Result<Decimal, String> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(NOT_NUMBER.to_string()),
    };
    let approx: f64 = text.parse().map_err(|_| NOT_NUMBER.to_string())?;
    if !approx.is_finite() {
        return Err(NOT_NUMBER.to_string());
    }
    if approx < 0.0 {
        return Err(NOT_NEGATIVE.to_string());
    }

    // Counted on the text: Decimal rounds anything past 28 places on parse
    let places = fraction_digits(&text).ok_or_else(|| NOT_NUMBER.to_string())?;
    if places > i64::from(PRICE_DECIMAL_PLACES) {
        return Err(format!(
            "Ensure that there are no more than {} decimal places.",
            PRICE_DECIMAL_PLACES
        ));
    }

    let mut price = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| NOT_NUMBER.to_string())?;

    let max_whole = Decimal::from(10_i64.pow(PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES));
    if price.trunc() >= max_whole {
        return Err(format!(
            "Ensure that there are no more than {} digits before the decimal point.",
            PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES
        ));
    }

    // Stored as NUMERIC(5, 2): always two places
    price.rescale(PRICE_DECIMAL_PLACES);
    price.set_sign_positive(true);
    Ok(price)
}

/// Significant digits after the point, with any exponent applied
fn fraction_digits(text: &str) -> Option<i64> {
    let (mantissa, exponent) = match text.find(|c| c == 'e' || c == 'E') {
        Some(i) => (&text[..i], text[i + 1..].parse::<i64>().ok()?),
        None => (text, 0),
    };
    let fraction = mantissa
        .split_once('.')
        .map_or("", |(_, fraction)| fraction)
        .trim_end_matches('0');
    Some(i64::try_from(fraction.len()).ok()?.saturating_sub(exponent))
}
