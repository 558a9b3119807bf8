//! Query option encoding.

use indexmap::IndexMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use tracing::trace;

use crate::ast::ParamValue;
use crate::error::{UriError, UriResult};

/// Everything `encodeURIComponent` escapes: all but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

pub fn decode_component(value: &str) -> UriResult<String> {
    percent_decode_str(value)
        .decode_utf8()
        .map(|cow| cow.into_owned())
        .map_err(|e| UriError::InvalidValue {
            data_type: "uri component".to_string(),
            value: e.to_string(),
        })
}

/// Join options as `name=value` pairs. Names are written as given; values are
/// percent-encoded. Lists repeat the name once per element.
pub fn encode_query_options(options: &IndexMap<String, Option<ParamValue>>) -> String {
    let mut entries = Vec::new();
    for (name, value) in options {
        match value {
            None => continue,
            Some(ParamValue::Scalar(v)) => {
                trace!(option = %name, value = %v, "encoding option");
                entries.push(format!("{}={}", name, encode_component(v)));
            }
            Some(ParamValue::List(items)) => {
                for v in items {
                    entries.push(format!("{}={}", name, encode_component(v)));
                }
            }
        }
    }
    entries.join("&")
}

/// Split a query string (with or without the leading `?`) into decoded pairs.
pub fn decode_query_options(query: &str) -> UriResult<Vec<(String, String)>> {
    crate::parser::parse_query(query.strip_prefix('?').unwrap_or(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_component_matches_encode_uri_component() {
        assert_eq!(encode_component("a b,c"), "a%20b%2Cc");
        assert_eq!(encode_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_component("$/?=&#"), "%24%2F%3F%3D%26%23");
        assert_eq!(encode_component("é"), "%C3%A9");
    }

    #[test]
    fn test_options_skip_none_and_repeat_lists() {
        let mut options = IndexMap::new();
        options.insert("$filter".to_string(), None);
        options.insert("tags".to_string(), Some(ParamValue::from(vec!["a", "b"])));
        options.insert("$top".to_string(), Some(ParamValue::from("1")));
        assert_eq!(encode_query_options(&options), "tags=a&tags=b&$top=1");
    }

    #[test]
    fn test_empty_options() {
        assert_eq!(encode_query_options(&IndexMap::new()), "");
    }

    #[test]
    fn test_decode_strips_question_mark() {
        let pairs = decode_query_options("?$filter=Name%20eq%20'x'&$top=2").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("$filter".to_string(), "Name eq 'x'".to_string()),
                ("$top".to_string(), "2".to_string()),
            ]
        );
    }
}
