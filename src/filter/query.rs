use serde_json::Value;

use super::error::FilterError;
use super::filter::Filter;
use super::types::Page;

const OFFSET_KEY: &str = "offset";
const LIMIT_KEY: &str = "limit";

/// Parses raw query-string pairs into a filter and a page.
///
/// `offset` and `limit` are reserved. Every other key becomes a filter
/// condition; repeated keys accumulate. Keys listed in `boolean_attributes`
/// are parsed as booleans and dropped when they do not parse.
pub struct QueryParams<'a> {
    boolean_attributes: &'a [&'a str],
}

impl<'a> QueryParams<'a> {
    pub fn new(boolean_attributes: &'a [&'a str]) -> Self {
        Self { boolean_attributes }
    }

    pub fn parse(&self, pairs: &[(String, String)]) -> Result<(Filter, Page), FilterError> {
        let mut filter = Filter::new();
        let mut offset = 0;
        let mut limit = Page::UNBOUNDED;

        for (key, raw) in pairs {
            match key.as_str() {
                OFFSET_KEY => {
                    offset = raw
                        .trim()
                        .parse()
                        .map_err(|_| FilterError::InvalidOffset(format!("'{raw}' is not an integer")))?;
                }
                LIMIT_KEY => {
                    limit = raw
                        .trim()
                        .parse()
                        .map_err(|_| FilterError::InvalidLimit(format!("'{raw}' is not an integer")))?;
                }
                attribute if self.boolean_attributes.contains(&attribute) => match parse_bool(raw) {
                    Some(flag) => filter.push(attribute, Value::Bool(flag))?,
                    None => tracing::debug!("Dropping unparsable boolean filter {}={:?}", attribute, raw),
                },
                attribute => filter.push(attribute, Value::String(raw.clone()))?,
            }
        }

        Ok((filter, Page::new(offset, limit)?))
    }
}

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults_to_unbounded_page() {
        let (filter, page) = QueryParams::new(&[]).parse(&[]).unwrap();
        assert!(filter.is_empty());
        assert_eq!(page, Page::default());
    }

    #[test]
    fn reads_pagination_and_repeated_keys() {
        let (filter, page) = QueryParams::new(&[])
            .parse(&pairs(&[("type", "event"), ("offset", "2"), ("limit", "1"), ("type", "pob")]))
            .unwrap();
        assert_eq!(page, Page { offset: 2, limit: 1 });
        assert_eq!(filter.conditions()[0].values, vec![json!("event"), json!("pob")]);
    }

    #[test]
    fn bad_pagination_is_rejected() {
        let parser = QueryParams::new(&[]);
        assert!(matches!(parser.parse(&pairs(&[("limit", "ten")])), Err(FilterError::InvalidLimit(_))));
        assert!(matches!(parser.parse(&pairs(&[("offset", "x")])), Err(FilterError::InvalidOffset(_))));
        assert!(matches!(parser.parse(&pairs(&[("offset", "-3")])), Err(FilterError::InvalidOffset(_))));
    }

    #[test]
    fn boolean_attributes_parse_or_drop() {
        let parser = QueryParams::new(&["is_favorite"]);

        let (filter, _) = parser.parse(&pairs(&[("is_favorite", "true")])).unwrap();
        assert_eq!(filter.conditions()[0].values, vec![json!(true)]);

        let (filter, _) = parser.parse(&pairs(&[("is_favorite", "maybe")])).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn boolean_attributes_accept_short_and_upper_case_forms() {
        let parser = QueryParams::new(&["is_favorite"]);
        for (raw, expected) in [("1", true), ("t", true), ("T", true), ("TRUE", true), ("True", true), ("0", false), ("F", false), ("FALSE", false)] {
            let (filter, _) = parser.parse(&pairs(&[("is_favorite", raw)])).unwrap();
            assert_eq!(filter.conditions()[0].values, vec![json!(expected)], "value {raw}");
        }

        let (filter, _) = parser.parse(&pairs(&[("is_favorite", "yes")])).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn invalid_attribute_names_fail() {
        let result = QueryParams::new(&[]).parse(&pairs(&[("doc'->x", "1")]));
        assert!(matches!(result, Err(FilterError::InvalidAttribute(_))));
    }
}
