use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{UriError, UriResult};

/// Declared datatype of a literal or data property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DataType {
    String,
    Int16,
    Int32,
    Int64,
    Byte,
    Decimal,
    Double,
    Single,
    Boolean,
    DateTime,
    DateTimeOffset,
    Time,
    Guid,
    Binary,
    #[default]
    Undefined,
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DataType::String => "String",
            DataType::Int16 => "Int16",
            DataType::Int32 => "Int32",
            DataType::Int64 => "Int64",
            DataType::Byte => "Byte",
            DataType::Decimal => "Decimal",
            DataType::Double => "Double",
            DataType::Single => "Single",
            DataType::Boolean => "Boolean",
            DataType::DateTime => "DateTime",
            DataType::DateTimeOffset => "DateTimeOffset",
            DataType::Time => "Time",
            DataType::Guid => "Guid",
            DataType::Binary => "Binary",
            DataType::Undefined => "Undefined",
        };
        write!(f, "{}", name)
    }
}

/// A literal value.
///
/// Deserializes from plain JSON: `null`, booleans, numbers, strings and
/// arrays. `DateTime` is only produced programmatically; date strings are
/// parsed when formatted against a date datatype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    DateTime(DateTime<FixedOffset>),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Value::DateTime(d) => write!(f, "{}", iso_string(d)),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(d: DateTime<FixedOffset>) -> Self {
        Value::DateTime(d)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::DateTime(d.fixed_offset())
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(items: Vec<V>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Canonical ISO-8601 form: UTC, millisecond precision, `Z` suffix.
pub(crate) fn iso_string(d: &DateTime<FixedOffset>) -> String {
    d.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a date/time value given either natively or as RFC 3339 text.
pub(crate) fn parse_date_time(data_type: DataType, value: &Value) -> UriResult<DateTime<FixedOffset>> {
    match value {
        Value::DateTime(d) => Ok(*d),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map_err(|_| UriError::invalid_value(data_type, s)),
        other => Err(UriError::invalid_value(data_type, other)),
    }
}

impl DataType {
    /// Whether this type carries a calendar date and time.
    pub fn is_date(&self) -> bool {
        matches!(self, DataType::DateTime | DataType::DateTimeOffset)
    }

    /// Format a scalar value as this datatype's canonical protocol literal.
    ///
    /// Date types render in their quoted long form here (`datetime'...'`);
    /// the v4 literal formatter overrides that with the bare ISO string.
    pub fn fmt_odata(&self, value: &Value) -> UriResult<String> {
        if let Value::Null = value {
            return Ok("null".to_string());
        }
        if let Value::List(_) = value {
            return Err(UriError::invalid_value(self, value));
        }

        match self {
            DataType::String => match value {
                Value::String(s) => Ok(quote(s)),
                Value::Int(_) | Value::Float(_) => Ok(quote(&value.to_string())),
                other => Err(UriError::invalid_value(self, other)),
            },
            DataType::Int16 => fmt_int(*self, value, i16::MIN as i64, i16::MAX as i64),
            DataType::Int32 => fmt_int(*self, value, i32::MIN as i64, i32::MAX as i64),
            DataType::Int64 => fmt_int(*self, value, i64::MIN, i64::MAX),
            DataType::Byte => fmt_int(*self, value, 0, u8::MAX as i64),
            DataType::Decimal | DataType::Double | DataType::Single => fmt_float(*self, value),
            DataType::Boolean => match value {
                Value::Bool(b) => Ok(b.to_string()),
                Value::String(s) if s == "true" || s == "false" => Ok(s.clone()),
                other => Err(UriError::invalid_value(self, other)),
            },
            DataType::DateTime => parse_date_time(*self, value)
                .map(|d| format!("datetime'{}'", iso_string(&d))),
            DataType::DateTimeOffset => parse_date_time(*self, value)
                .map(|d| format!("datetimeoffset'{}'", iso_string(&d))),
            DataType::Time => match value {
                Value::String(s) => Ok(format!("duration'{}'", s)),
                other => Err(UriError::invalid_value(self, other)),
            },
            DataType::Guid => match value {
                Value::String(s) if is_guid(s) => Ok(s.clone()),
                other => Err(UriError::invalid_value(self, other)),
            },
            DataType::Binary => match value {
                Value::String(s) => Ok(format!("binary'{}'", s)),
                other => Err(UriError::invalid_value(self, other)),
            },
            DataType::Undefined => Ok(value.to_string()),
        }
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn fmt_int(data_type: DataType, value: &Value, min: i64, max: i64) -> UriResult<String> {
    let n = match value {
        Value::Int(n) => *n,
        // 2^63 itself is out of range; `as` would saturate it to i64::MAX.
        Value::Float(f) if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 => {
            *f as i64
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| UriError::invalid_value(data_type, s))?,
        other => return Err(UriError::invalid_value(data_type, other)),
    };
    if n < min || n > max {
        return Err(UriError::invalid_value(data_type, n));
    }
    Ok(n.to_string())
}

fn fmt_float(data_type: DataType, value: &Value) -> UriResult<String> {
    let f = match value {
        Value::Int(n) => return Ok(n.to_string()),
        Value::Float(f) => *f,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| UriError::invalid_value(data_type, s))?,
        other => return Err(UriError::invalid_value(data_type, other)),
    };
    if !f.is_finite() {
        return Err(UriError::invalid_value(data_type, f));
    }
    Ok(f.to_string())
}

/// 8-4-4-4-12 hex digits.
fn is_guid(s: &str) -> bool {
    let groups: Vec<&str> = s.split('-').collect();
    let lens = [8, 4, 4, 4, 12];
    groups.len() == lens.len()
        && groups
            .iter()
            .zip(lens)
            .all(|(g, len)| g.len() == len && g.chars().all(|c| c.is_ascii_hexdigit()))
}
