//! Query string parser using nom.
//!
//! Reads compiled URIs back into their parts, the inverse of the options
//! encoder. Used by the `decode` command and round-trip tests.
//!
//! # Syntax Overview
//!
//! ```text
//! Customers?$filter=Name%20eq%20'x'&$top=5
//! ────┬──── ──────────┬────────── ──┬───
//!     │               │             │
//!     │               │             └── Option without encoding
//!     │               └── Option: name '=' percent-encoded value
//!     └── Resource path (everything before the first '?')
//! ```

use nom::{
    bytes::complete::{take_till, take_while, take_while1},
    character::complete::char,
    combinator::opt,
    multi::separated_list0,
    sequence::{pair, preceded},
    IResult,
};

use crate::error::{UriError, UriResult};
use crate::transpiler::options::decode_component;

/// A URI split into its resource path and decoded query options.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedUri {
    pub resource: String,
    pub options: Vec<(String, String)>,
}

impl ParsedUri {
    /// First value of the named option.
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Parse a full URI such as `Customers?$top=1`.
pub fn parse_uri(input: &str) -> UriResult<ParsedUri> {
    let input = input.trim();
    let (rest, resource) = parse_resource(input).map_err(|e| nom_error(input, e))?;
    let options = match rest.strip_prefix('?') {
        Some(query) => parse_query(query)?,
        None => Vec::new(),
    };
    Ok(ParsedUri {
        resource: resource.to_string(),
        options,
    })
}

/// Parse the part after `?` into decoded `(name, value)` pairs.
pub fn parse_query(input: &str) -> UriResult<Vec<(String, String)>> {
    match parse_options(input) {
        Ok(("", raw)) => raw
            .into_iter()
            .flatten()
            .map(|(name, value)| -> UriResult<(String, String)> {
                Ok((
                    decode_component(name)?,
                    decode_component(value.unwrap_or(""))?,
                ))
            })
            .collect(),
        Ok((remaining, _)) => Err(UriError::parse(
            input.len() - remaining.len(),
            format!("Unexpected trailing content: '{}'", remaining),
        )),
        Err(e) => Err(nom_error(input, e)),
    }
}

fn nom_error(input: &str, e: nom::Err<nom::error::Error<&str>>) -> UriError {
    match e {
        nom::Err::Error(inner) | nom::Err::Failure(inner) => UriError::parse(
            input.len() - inner.input.len(),
            format!("Parse failed: {:?}", inner.code),
        ),
        nom::Err::Incomplete(_) => UriError::parse(input.len(), "Incomplete input"),
    }
}

/// Everything before the first '?'.
fn parse_resource(input: &str) -> IResult<&str, &str> {
    take_till(|c: char| c == '?')(input)
}

/// `&`-separated options; empty segments are allowed and dropped.
fn parse_options(input: &str) -> IResult<&str, Vec<Option<(&str, Option<&str>)>>> {
    separated_list0(char('&'), opt(parse_option))(input)
}

/// `name` or `name=value`.
fn parse_option(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    pair(
        take_while1(|c: char| c != '=' && c != '&'),
        opt(preceded(char('='), take_while(|c: char| c != '&'))),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_uri() {
        let uri = parse_uri("Customers?$filter=Country%20eq%20'UK'&$top=5").unwrap();
        assert_eq!(uri.resource, "Customers");
        assert_eq!(uri.option("$filter"), Some("Country eq 'UK'"));
        assert_eq!(uri.option("$top"), Some("5"));
        assert_eq!(uri.option("$skip"), None);
    }

    #[test]
    fn test_resource_only() {
        let uri = parse_uri("Customers").unwrap();
        assert_eq!(uri.resource, "Customers");
        assert!(uri.options.is_empty());
    }

    #[test]
    fn test_repeated_and_valueless_options() {
        let pairs = parse_query("tags=a&tags=b&&flag").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("tags".to_string(), "a".to_string()),
                ("tags".to_string(), "b".to_string()),
                ("flag".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_missing_name_is_error() {
        let err = parse_query("$top=1&=oops").unwrap_err();
        assert!(matches!(err, UriError::Parse { position: 7, .. }));
    }

    #[test]
    fn test_bad_utf8_escape() {
        assert!(parse_query("a=%FF").is_err());
    }
}
