use std::cmp::Ordering;

use serde_json::Value;

use super::types::{Sort, SortDirection};

pub struct FilterOrder;

impl FilterOrder {
    /// ORDER BY over a JSONB attribute, with `id` as tiebreaker. Without a sort the
    /// rows come back in insertion order.
    pub fn generate(sort: Option<&Sort>) -> String {
        match sort {
            Some(sort) => format!(
                "ORDER BY \"doc\" ->> '{}' {}, \"id\" ASC",
                sort.attribute,
                sort.direction.to_sql()
            ),
            None => "ORDER BY \"seq\" ASC".to_string(),
        }
    }

    /// In-memory equivalent of [`FilterOrder::generate`]. Compares the text form of
    /// the attribute, as `->>` does; missing attributes sort first.
    pub fn compare(sort: &Sort, a: &Value, b: &Value) -> Ordering {
        let ordering = text_of(a.get(&sort.attribute)).cmp(&text_of(b.get(&sort.attribute)));
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

fn text_of(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
