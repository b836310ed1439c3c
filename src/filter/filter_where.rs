use serde_json::Value;

use super::filter::Filter;
use super::types::{FilterCondition, SqlResult};

/// Renders a [`Filter`] as a WHERE clause over a `doc JSONB` column.
///
/// Each value is bound as a JSONB parameter and tested with `@>`, which covers
/// both scalar equality and array membership.
pub struct FilterWhere {
    param_values: Vec<Value>,
    param_index: usize,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    /// `starting_param_index` is the number of parameters already bound by the caller.
    pub fn generate(filter: &Filter, starting_param_index: usize) -> SqlResult {
        let mut filter_where = Self::new(starting_param_index);
        let clauses: Vec<String> = filter
            .conditions()
            .iter()
            .map(|condition| filter_where.build_condition(condition))
            .collect();

        let query = if clauses.is_empty() {
            "1=1".to_string()
        } else {
            clauses.join(" AND ")
        };
        SqlResult {
            query,
            params: filter_where.param_values,
        }
    }

    fn build_condition(&mut self, condition: &FilterCondition) -> String {
        if condition.values.is_empty() {
            return "1=0".to_string();
        }
        let alternatives: Vec<String> = condition
            .values
            .iter()
            .map(|value| {
                let param = self.param(value.clone());
                format!("\"doc\" -> '{}' @> {}::jsonb", condition.attribute, param)
            })
            .collect();

        if alternatives.len() == 1 {
            alternatives.join("")
        } else {
            format!("({})", alternatives.join(" OR "))
        }
    }

    fn param(&mut self, value: Value) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}
