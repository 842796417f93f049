//! Cell coercion applied to every CSV field before it lands in a [`Record`].
//!
//! The rule, in order:
//!
//! 1. empty or whitespace-only cells, and cells equal to a configured null token, become `null`
//! 2. cells whose trimmed text parses as an integer (`i64`, then `u64`) become JSON integers
//! 3. cells whose trimmed text parses as a finite `f64` become JSON floats
//! 4. anything else is kept verbatim as a string
//!
//! `"inf"` and `"NaN"` parse as `f64` but have no JSON representation, so they stay strings
//! unless listed as null tokens.
//!
//! [`Record`]: crate::domain::model::Record

use serde_json::{Number, Value};

#[derive(Debug, Clone, Default)]
pub struct CellCoercion {
    null_values: Vec<String>,
}

impl CellCoercion {
    pub fn new(null_values: Vec<String>) -> Self {
        Self { null_values }
    }

    pub fn null_values(&self) -> &[String] {
        &self.null_values
    }

    pub fn coerce(&self, cell: &str) -> Value {
        let trimmed = cell.trim();
        if trimmed.is_empty() || self.null_values.iter().any(|token| token == trimmed) {
            return Value::Null;
        }

        if let Ok(int) = trimmed.parse::<i64>() {
            return Value::Number(int.into());
        }
        if let Ok(uint) = trimmed.parse::<u64>() {
            return Value::Number(uint.into());
        }
        if let Some(number) = trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(number);
        }

        Value::String(cell.to_string())
    }
}
