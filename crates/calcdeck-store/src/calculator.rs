//! Calculator record types

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// A persisted calculator definition
///
/// Field names serialize in camelCase, matching the on-disk document format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculator {
    /// Unique identifier, assigned by the store at creation and immutable
    /// afterwards
    pub id: Uuid,
    /// Display name
    pub title: String,
    /// Optional free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Infix arithmetic expression
    pub formula: String,
    /// Free variables of `formula`: sorted, duplicate-free, re-derived by the
    /// store on every write and never caller-settable
    pub variables: Vec<char>,
    /// Human-friendly labels keyed by variable name
    ///
    /// Labels for variables not present in `variables` are harmless and are
    /// kept as supplied.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variable_labels: BTreeMap<char, String>,
    /// Creation timestamp, fixed for the lifetime of the record
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful mutation
    pub updated_at: DateTime<Utc>,
}

impl Calculator {
    /// The label for a variable, falling back to the variable name itself
    pub fn label_for(&self, variable: char) -> String {
        self.variable_labels
            .get(&variable)
            .cloned()
            .unwrap_or_else(|| variable.to_string())
    }
}

/// Input for creating or updating a calculator
///
/// `title` and `formula` are required on both paths. On update, `None` fields
/// leave the stored value unchanged; `variables` and `updated_at` are always
/// recomputed by the store.
#[derive(Debug, Clone, Default)]
pub struct CalculatorDraft {
    pub title: String,
    pub formula: String,
    pub description: Option<String>,
    pub variable_labels: Option<BTreeMap<char, String>>,
}

impl CalculatorDraft {
    /// Create a draft with the two required fields
    pub fn new(title: impl Into<String>, formula: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            formula: formula.into(),
            description: None,
            variable_labels: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a label for a variable
    pub fn with_label(mut self, variable: char, label: impl Into<String>) -> Self {
        self.variable_labels
            .get_or_insert_with(BTreeMap::new)
            .insert(variable, label.into());
        self
    }

    pub(crate) fn validate(&self) -> StoreResult<()> {
        if self.title.trim().is_empty() {
            return Err(StoreError::Validation("title"));
        }
        if self.formula.trim().is_empty() {
            return Err(StoreError::Validation("formula"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_draft_builder() {
        let draft = CalculatorDraft::new("Circle area", "3.14159*r^2")
            .with_description("Area from radius")
            .with_label('r', "Radius");

        assert_eq!(draft.title, "Circle area");
        assert_eq!(draft.description.as_deref(), Some("Area from radius"));
        assert_eq!(
            draft.variable_labels.unwrap().get(&'r').map(String::as_str),
            Some("Radius")
        );
    }

    #[test]
    fn test_draft_validation() {
        assert!(CalculatorDraft::new("Circle", "r*2").validate().is_ok());
        assert!(matches!(
            CalculatorDraft::new("", "r*2").validate(),
            Err(StoreError::Validation("title"))
        ));
        assert!(matches!(
            CalculatorDraft::new("Circle", "  ").validate(),
            Err(StoreError::Validation("formula"))
        ));
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = Calculator {
            id: Uuid::nil(),
            title: "Circle".into(),
            description: None,
            formula: "3.14159*r^2".into(),
            variables: vec!['r'],
            variable_labels: BTreeMap::from([('r', "Radius".into())]),
            created_at: DateTime::UNIX_EPOCH,
            updated_at: DateTime::UNIX_EPOCH,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["variables"][0], "r");
        assert_eq!(json["variableLabels"]["r"], "Radius");
        assert!(json["createdAt"].is_string());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_label_fallback() {
        let record = Calculator {
            id: Uuid::nil(),
            title: "Sum".into(),
            description: None,
            formula: "a+b".into(),
            variables: vec!['a', 'b'],
            variable_labels: BTreeMap::from([('a', "First".into())]),
            created_at: DateTime::UNIX_EPOCH,
            updated_at: DateTime::UNIX_EPOCH,
        };

        assert_eq!(record.label_for('a'), "First");
        assert_eq!(record.label_for('b'), "b");
    }
}
