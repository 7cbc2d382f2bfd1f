//! Schema and per-field validation rules.
//!
//! A [`RuleSet`] is the single source of truth for validation: every rule's
//! column is a required schema column bound to the numeric type class, and
//! rules are evaluated against each row in declaration order.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::value::format_numeric;

/// What to do when a validated field is missing (null or NaN).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Store an explicit null and keep evaluating the row.
    #[default]
    NullSubstitute,
    /// Reject the row.
    Reject,
}

/// Value constraint applied to non-missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// Value must equal one of these numbers. `1` and `1.0` are the same value.
    OneOf(Vec<i64>),
    /// Value must be numeric and lie within `[min, max]`.
    Range { min: f64, max: f64 },
}

impl Constraint {
    /// Human-readable form used in row diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Constraint::OneOf(values) => match values.as_slice() {
                [single] => format!("must be {single}"),
                [a, b] => format!("must be {a} or {b}"),
                _ => {
                    let list: Vec<String> = values.iter().map(ToString::to_string).collect();
                    format!("must be one of {}", list.join(", "))
                }
            },
            Constraint::Range { min, max } => {
                format!("must be {}-{}", format_numeric(*min), format_numeric(*max))
            }
        }
    }
}

/// Validation policy for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Column name, matched case-insensitively after trimming.
    pub column: String,
    #[serde(default)]
    pub missing: MissingPolicy,
    #[serde(default)]
    pub constraint: Option<Constraint>,
}

impl FieldRule {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            missing: MissingPolicy::default(),
            constraint: None,
        }
    }

    #[must_use]
    pub fn with_missing(mut self, missing: MissingPolicy) -> Self {
        self.missing = missing;
        self
    }

    #[must_use]
    pub fn one_of(mut self, values: impl IntoIterator<Item = i64>) -> Self {
        self.constraint = Some(Constraint::OneOf(values.into_iter().collect()));
        self
    }

    #[must_use]
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.constraint = Some(Constraint::Range { min, max });
        self
    }
}

/// Declared type class of a required column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeClass {
    Numeric,
}

impl TypeClass {
    pub fn label(self) -> &'static str {
        match self {
            TypeClass::Numeric => "numeric",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredColumn {
    pub name: String,
    pub type_class: TypeClass,
}

/// Required columns and their type classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub required: Vec<RequiredColumn>,
}

/// Ordered field rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub rules: Vec<FieldRule>,
}

impl RuleSet {
    /// Builds and checks a rule set.
    pub fn new(rules: Vec<FieldRule>) -> Result<Self> {
        let set = Self { rules };
        set.check()?;
        Ok(set)
    }

    /// Passenger manifest rules: `survived` is a 0/1 flag, `age` is 0-120.
    /// Both substitute null for missing values.
    pub fn titanic() -> Self {
        Self {
            rules: vec![
                FieldRule::new("survived").one_of([0, 1]),
                FieldRule::new("age").range(0.0, 120.0),
            ],
        }
    }

    /// Parses a rule set from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let set: Self = serde_json::from_str(text)?;
        set.check()?;
        Ok(set)
    }

    /// Loads a rule set from a JSON file.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Schema implied by the rules.
    pub fn schema(&self) -> Schema {
        Schema {
            required: self
                .rules
                .iter()
                .map(|rule| RequiredColumn {
                    name: rule.column.trim().to_string(),
                    type_class: TypeClass::Numeric,
                })
                .collect(),
        }
    }

    fn check(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(ModelError::InvalidRuleSet("no field rules declared".into()));
        }
        let mut seen = HashSet::new();
        for rule in &self.rules {
            let key = rule.column.trim().to_lowercase();
            if key.is_empty() {
                return Err(ModelError::InvalidRuleSet("empty column name".into()));
            }
            if !seen.insert(key) {
                return Err(ModelError::InvalidRuleSet(format!(
                    "duplicate rule for column '{}'",
                    rule.column
                )));
            }
            match &rule.constraint {
                Some(Constraint::OneOf(values)) if values.is_empty() => {
                    return Err(ModelError::InvalidRuleSet(format!(
                        "empty value set for column '{}'",
                        rule.column
                    )));
                }
                Some(Constraint::Range { min, max }) if !(min <= max) => {
                    return Err(ModelError::InvalidRuleSet(format!(
                        "invalid range {}-{} for column '{}'",
                        format_numeric(*min),
                        format_numeric(*max),
                        rule.column
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::titanic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_constraints() {
        assert_eq!(Constraint::OneOf(vec![0, 1]).describe(), "must be 0 or 1");
        assert_eq!(Constraint::OneOf(vec![7]).describe(), "must be 7");
        assert_eq!(
            Constraint::OneOf(vec![1, 2, 3]).describe(),
            "must be one of 1, 2, 3"
        );
        assert_eq!(
            Constraint::Range {
                min: 0.0,
                max: 120.0
            }
            .describe(),
            "must be 0-120"
        );
    }

    #[test]
    fn titanic_rule_order() {
        let set = RuleSet::titanic();
        let names: Vec<&str> = set.rules.iter().map(|r| r.column.as_str()).collect();
        assert_eq!(names, vec!["survived", "age"]);
        assert_eq!(set.schema().required.len(), 2);
    }

    #[test]
    fn rejects_duplicate_columns() {
        let err = RuleSet::new(vec![FieldRule::new("Age"), FieldRule::new(" age ")]).unwrap_err();
        assert!(matches!(err, ModelError::InvalidRuleSet(_)));
    }

    #[test]
    fn rejects_inverted_range() {
        let err = RuleSet::new(vec![FieldRule::new("age").range(10.0, 1.0)]).unwrap_err();
        assert!(err.to_string().contains("invalid range 10-1"));
    }

    #[test]
    fn parses_json_with_defaults() {
        let set = RuleSet::from_json(
            r#"{"rules": [
                {"column": "pclass", "missing": "reject", "constraint": {"one_of": [1, 2, 3]}},
                {"column": "fare", "constraint": {"range": {"min": 0, "max": 600}}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(set.rules[0].missing, MissingPolicy::Reject);
        assert_eq!(set.rules[1].missing, MissingPolicy::NullSubstitute);
        assert_eq!(
            set.rules[1].constraint,
            Some(Constraint::Range {
                min: 0.0,
                max: 600.0
            })
        );
    }
}
