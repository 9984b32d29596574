//! Provider-neutral assignment types.
//!
//! These types represent school assignments in a storage-agnostic way.
//! The store, the projector, the export transform and the provider
//! protocol all work exclusively with them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{DeskError, DeskResult};

/// A school assignment (the sole entity of the assignment list)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub name: String,
    pub class_name: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

/// Assignment priority. Defaults to `Medium` when the input omits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Assignment {
    /// Validate raw user input and build a new assignment with a fresh id.
    ///
    /// Name and class must be non-blank; the due date must parse as
    /// `YYYY-MM-DD`. New assignments start at medium priority, not completed.
    pub fn new(name: &str, class_name: &str, due_date: &str) -> DeskResult<Assignment> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DeskError::Validation(
                "Assignment name must not be blank".to_string(),
            ));
        }

        let class_name = class_name.trim();
        if class_name.is_empty() {
            return Err(DeskError::Validation(
                "Class name must not be blank".to_string(),
            ));
        }

        Ok(Assignment {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            class_name: class_name.to_string(),
            due_date: parse_due_date(due_date)?,
            priority: Priority::default(),
            completed: false,
        })
    }

    /// Check the invariants every accepted assignment must satisfy.
    ///
    /// Used when taking in lists from outside the process (durable state,
    /// remote snapshots), where individual bad records are dropped rather
    /// than rejecting the whole list.
    pub fn validate(&self) -> DeskResult<()> {
        if self.id.trim().is_empty() {
            return Err(DeskError::Validation(
                "Assignment id must not be blank".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(DeskError::Validation(
                "Assignment name must not be blank".to_string(),
            ));
        }
        if self.class_name.trim().is_empty() {
            return Err(DeskError::Validation(
                "Class name must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse a due date in `YYYY-MM-DD` form.
pub fn parse_due_date(input: &str) -> DeskResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        DeskError::Validation(format!(
            "Could not parse due date '{}' (expected YYYY-MM-DD)",
            input
        ))
    })
}

impl FromStr for Priority {
    type Err = DeskError;

    fn from_str(s: &str) -> DeskResult<Priority> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(DeskError::Validation(format!(
                "Unknown priority '{}' (expected low, medium or high)",
                other
            ))),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- construction ---

    #[test]
    fn new_assignment_gets_fresh_id_and_defaults() {
        let a = Assignment::new("Problem Set 4", "IB Math", "2026-09-01").unwrap();
        let b = Assignment::new("Problem Set 4", "IB Math", "2026-09-01").unwrap();

        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert_eq!(a.priority, Priority::Medium);
        assert!(!a.completed);
    }

    #[test]
    fn new_trims_name_and_class() {
        let a = Assignment::new("  Essay draft ", "  History ", "2026-09-01").unwrap();
        assert_eq!(a.name, "Essay draft");
        assert_eq!(a.class_name, "History");
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Assignment::new("   ", "IB Math", "2026-09-01").unwrap_err();
        assert!(matches!(err, DeskError::Validation(_)));
    }

    #[test]
    fn blank_class_is_rejected() {
        let err = Assignment::new("Problem Set 4", "", "2026-09-01").unwrap_err();
        assert!(matches!(err, DeskError::Validation(_)));
    }

    #[test]
    fn unparseable_due_date_is_rejected() {
        for bad in ["tomorrow", "2026-13-40", "01/09/2026", ""] {
            let err = Assignment::new("Problem Set 4", "IB Math", bad).unwrap_err();
            assert!(matches!(err, DeskError::Validation(_)), "accepted {:?}", bad);
        }
    }

    // --- wire format ---

    #[test]
    fn serializes_with_camel_case_keys() {
        let a = Assignment::new("Problem Set 4", "IB Math", "2026-09-01").unwrap();
        let json = serde_json::to_value(&a).unwrap();

        assert_eq!(json["className"], "IB Math");
        assert_eq!(json["dueDate"], "2026-09-01");
        assert_eq!(json["priority"], "medium");
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn deserializes_with_missing_priority_and_completed() {
        let a: Assignment = serde_json::from_str(
            r#"{"id":"1","name":"Essay","className":"History","dueDate":"2026-09-10"}"#,
        )
        .unwrap();

        assert_eq!(a.priority, Priority::Medium);
        assert!(!a.completed);
    }

    // --- priority parsing ---

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" low ".parse::<Priority>().unwrap(), Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());
    }
}
