use serde::{Deserialize, Serialize};

use crate::error::UriError;

/// Operator keys renamed by the v4 builder, inherited from the v3 grammar.
const LEGACY_OPERATORS: &[(&str, &str)] = &[("contains", "substringof")];

/// Target protocol revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Dialect {
    /// OData v4 with the legacy quirks: `contains` renders as `substringof`
    /// and `in` expands to an `or` chain.
    #[default]
    #[serde(rename = "v4")]
    ODataV4,
    /// OData v4.01: native `contains` and `in (...)`.
    #[serde(rename = "v401")]
    ODataV401,
}

impl Dialect {
    /// Protocol token for a logical operator key.
    pub fn operator<'k>(&self, key: &'k str) -> &'k str {
        match self {
            Dialect::ODataV4 => LEGACY_OPERATORS
                .iter()
                .find(|(from, _)| *from == key)
                .map_or(key, |(_, to)| *to),
            Dialect::ODataV401 => key,
        }
    }

    pub fn native_in(&self) -> bool {
        matches!(self, Dialect::ODataV401)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::ODataV4 => write!(f, "v4"),
            Dialect::ODataV401 => write!(f, "v401"),
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v4" | "4" | "4.0" => Ok(Dialect::ODataV4),
            "v401" | "4.01" => Ok(Dialect::ODataV401),
            other => Err(UriError::Config(format!(
                "unknown dialect '{}', expected v4 or v401",
                other
            ))),
        }
    }
}
