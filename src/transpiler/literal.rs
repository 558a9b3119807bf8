//! Literal formatting for OData v4.
//!
//! Some datatype literals changed between v3 and v4: dates lost their
//! `datetime'...'` wrapper and are written as bare ISO-8601 text. Every other
//! type keeps the datatype's own canonical form.

use crate::ast::types::{iso_string, parse_date_time};
use crate::ast::{DataType, Value};
use crate::error::UriResult;

/// Format a scalar `(datatype, value)` pair as protocol text.
pub fn format_literal(data_type: DataType, value: &Value) -> UriResult<String> {
    if data_type.is_date() {
        return format_date_time(data_type, value);
    }
    data_type.fmt_odata(value)
}

fn format_date_time(data_type: DataType, value: &Value) -> UriResult<String> {
    if let Value::Null = value {
        return Ok("null".to_string());
    }
    parse_date_time(data_type, value).map(|d| iso_string(&d))
}
