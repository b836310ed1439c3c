use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::FilterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOp {
    /// Attribute matches exactly one value.
    #[serde(rename = "$eq")]
    Eq,
    /// Attribute matches any of the listed values.
    #[serde(rename = "$in")]
    In,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub attribute: String,
    pub operator: FilterOp,
    pub values: Vec<Value>,
}

impl FilterCondition {
    /// A document attribute matches when it equals one of the values, or when it
    /// is an array containing one of them.
    pub fn matches(&self, document: &Value) -> bool {
        let Some(field) = document.get(&self.attribute) else {
            return false;
        };
        self.values.iter().any(|value| match field {
            Value::Array(items) => items.contains(value),
            other => other == value,
        })
    }
}

/// Offset/limit window over a result set. A negative limit means "no limit".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl Page {
    pub const UNBOUNDED: i64 = -1;

    pub fn new(offset: i64, limit: i64) -> Result<Self, FilterError> {
        if offset < 0 {
            return Err(FilterError::InvalidOffset("Offset must be non-negative".to_string()));
        }
        Ok(Self { offset, limit })
    }

    pub fn is_unbounded(&self) -> bool {
        self.limit < 0
    }

    /// Caps an explicit limit at `max`. Unbounded pages stay unbounded.
    pub fn capped(self, max: Option<i64>) -> Self {
        match max {
            Some(max) if self.limit > max => {
                tracing::debug!("Limit {} exceeds max {}, capping to max", self.limit, max);
                Self { limit: max, ..self }
            }
            _ => self,
        }
    }

    /// Applies the window to an already ordered sequence.
    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let skipped = items.into_iter().skip(usize::try_from(self.offset).unwrap_or(0));
        match usize::try_from(self.limit) {
            Ok(limit) => skipped.take(limit).collect(),
            Err(_) => skipped.collect(),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: Self::UNBOUNDED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub attribute: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            direction: SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn condition_matches_scalars_and_array_members() {
        let cond = FilterCondition {
            attribute: "idol_ids".to_string(),
            operator: FilterOp::In,
            values: vec![json!("i2"), json!("i9")],
        };
        assert!(cond.matches(&json!({ "idol_ids": ["i1", "i2"] })));
        assert!(!cond.matches(&json!({ "idol_ids": ["i1"] })));
        assert!(!cond.matches(&json!({ "name": "x" })));

        let cond = FilterCondition {
            attribute: "is_favorite".to_string(),
            operator: FilterOp::Eq,
            values: vec![json!(true)],
        };
        assert!(cond.matches(&json!({ "is_favorite": true })));
        assert!(!cond.matches(&json!({ "is_favorite": false })));
    }

    #[test]
    fn page_slices_offset_and_limit() {
        let items = vec![1, 2, 3, 4, 5];
        assert_eq!(Page::new(2, 1).unwrap().slice(items.clone()), vec![3]);
        assert_eq!(Page::default().slice(items.clone()), items);
        assert_eq!(Page::new(4, 10).unwrap().slice(items.clone()), vec![5]);
        assert!(Page::new(9, -1).unwrap().slice(items).is_empty());
    }

    #[test]
    fn page_rejects_negative_offset() {
        assert!(matches!(Page::new(-1, 10), Err(FilterError::InvalidOffset(_))));
    }

    #[test]
    fn capping_leaves_unbounded_alone() {
        assert_eq!(Page::default().capped(Some(100)).limit, Page::UNBOUNDED);
        assert_eq!(Page::new(0, 500).unwrap().capped(Some(100)).limit, 100);
        assert_eq!(Page::new(0, 50).unwrap().capped(Some(100)).limit, 50);
    }
}
