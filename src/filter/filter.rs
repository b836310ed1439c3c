use serde_json::Value;

use super::error::FilterError;
use super::types::{FilterCondition, FilterOp};

/// Conjunction of attribute conditions. Values inside one condition are OR'd.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<FilterCondition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality condition, appending to an existing condition on the same attribute.
    pub fn eq(mut self, attribute: &str, value: impl Into<Value>) -> Result<Self, FilterError> {
        self.push(attribute, value.into())?;
        Ok(self)
    }

    /// Adds an any-of condition.
    pub fn any_of<I, V>(mut self, attribute: &str, values: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        for value in values {
            self.push(attribute, value.into())?;
        }
        Ok(self)
    }

    /// Replaces whatever the filter says about `attribute` with a single equality.
    pub fn set(&mut self, attribute: &str, value: impl Into<Value>) -> Result<(), FilterError> {
        Self::validate_attribute(attribute)?;
        self.conditions.retain(|c| c.attribute != attribute);
        self.conditions.push(FilterCondition {
            attribute: attribute.to_string(),
            operator: FilterOp::Eq,
            values: vec![value.into()],
        });
        Ok(())
    }

    pub(crate) fn push(&mut self, attribute: &str, value: Value) -> Result<(), FilterError> {
        Self::validate_attribute(attribute)?;
        match self.conditions.iter_mut().find(|c| c.attribute == attribute) {
            Some(condition) => {
                condition.values.push(value);
                condition.operator = FilterOp::In;
            }
            None => self.conditions.push(FilterCondition {
                attribute: attribute.to_string(),
                operator: FilterOp::Eq,
                values: vec![value],
            }),
        }
        Ok(())
    }

    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, document: &Value) -> bool {
        self.conditions.iter().all(|c| c.matches(document))
    }

    /// Attribute names end up inside SQL text, so only plain identifiers pass.
    pub fn validate_attribute(name: &str) -> Result<(), FilterError> {
        let mut chars = name.chars();
        let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
        if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(FilterError::InvalidAttribute(name.to_string()));
        }
        Ok(())
    }
}
