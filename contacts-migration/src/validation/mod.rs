//! Field-level validation of migration requests.
//!
//! Every rule is checked before a store transaction is opened. All violations of a
//! request are collected and reported together, sorted and de-duplicated, so a caller
//! sees the complete list in one round trip.
mod contact;
mod organisation;

use std::collections::HashSet;
use std::fmt::Display;

use chrono::NaiveDate;
use contacts_shared::types::AuditOverride;

use crate::errors::MigrationError;

pub use contact::validate_contact;
pub use organisation::validate_organisation;

/// Longest username the audit and staff columns hold.
pub(crate) const USERNAME: usize = 100;

/// Joins a field name onto its parent path; the request root has an empty path.
pub(crate) fn nested(field: &str, name: &str) -> String {
    if field.is_empty() {
        name.to_string()
    } else {
        format!("{field}.{name}")
    }
}

/// Collects rule violations against dotted field paths.
#[derive(Debug, Default)]
pub(crate) struct Violations {
    messages: Vec<String>,
}

impl Violations {
    pub(crate) fn required(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.messages.push(format!("{field} must not be blank"));
        }
    }

    pub(crate) fn max_length(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.messages
                .push(format!("{field} must be at most {max} characters"));
        }
    }

    pub(crate) fn max_length_opt(&mut self, field: &str, value: Option<&str>, max: usize) {
        if let Some(value) = value {
            self.max_length(field, value, max);
        }
    }

    /// A required text value that must also fit its column.
    pub(crate) fn text(&mut self, field: &str, value: &str, max: usize) {
        self.required(field, value);
        self.max_length(field, value, max);
    }

    /// Usernames carried by the audit values of one request element.
    pub(crate) fn audit(&mut self, field: &str, audit: &AuditOverride) {
        self.max_length_opt(
            &nested(field, "createUsername"),
            audit.create_username.as_deref(),
            USERNAME,
        );
        self.max_length_opt(
            &nested(field, "modifyUsername"),
            audit.modify_username.as_deref(),
            USERNAME,
        );
    }

    pub(crate) fn positive_id(&mut self, field: &str, id: i64) {
        if id <= 0 {
            self.messages
                .push(format!("{field} must be a positive identifier"));
        }
    }

    pub(crate) fn unique<K, I>(&mut self, field: &str, keys: I)
    where
        K: Display,
        I: IntoIterator<Item = K>,
    {
        let mut seen = HashSet::new();
        for key in keys {
            if !seen.insert(key.to_string()) {
                self.messages
                    .push(format!("{field} contains duplicate identifier {key}"));
            }
        }
    }

    pub(crate) fn date_order(
        &mut self,
        field: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                self.messages
                    .push(format!("{field} end date must not be before start date"));
            }
        }
    }

    pub(crate) fn into_result(mut self) -> Result<(), MigrationError> {
        if self.messages.is_empty() {
            return Ok(());
        }
        self.messages.sort();
        self.messages.dedup();
        Err(MigrationError::Validation(self.messages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_sorted_and_deduplicated() {
        let mut violations = Violations::default();
        violations.required("lastName", " ");
        violations.required("firstName", "");
        violations.required("lastName", "");

        let Err(MigrationError::Validation(messages)) = violations.into_result() else {
            panic!("expected validation error");
        };

        assert_eq!(
            messages,
            vec![
                "firstName must not be blank".to_string(),
                "lastName must not be blank".to_string(),
            ]
        );
    }

    #[test]
    fn test_length_is_counted_in_characters() {
        let mut violations = Violations::default();
        violations.max_length("name", "ééééé", 5);
        violations.max_length_opt("other", None, 1);

        assert!(violations.into_result().is_ok());
    }

    #[test]
    fn test_duplicates_and_date_order() {
        let mut violations = Violations::default();
        violations.unique("phoneNumbers", [1, 2, 1]);
        violations.date_order(
            "addresses[0]",
            NaiveDate::from_ymd_opt(2024, 2, 1),
            NaiveDate::from_ymd_opt(2024, 1, 1),
        );

        let Err(MigrationError::Validation(messages)) = violations.into_result() else {
            panic!("expected validation error");
        };

        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("addresses[0] end date"));
        assert_eq!(messages[1], "phoneNumbers contains duplicate identifier 1");
    }
}
