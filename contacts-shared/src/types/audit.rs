use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Username recorded as the creator when a migrated record carries none.
pub const MIGRATION_USER: &str = "MIGRATION";

/// Audit columns stored on every row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    pub created_by: String,
    pub created_time: NaiveDateTime,
    pub updated_by: Option<String>,
    pub updated_time: Option<NaiveDateTime>,
}

/// Optional audit values supplied by NOMIS alongside each migrated element.
///
/// Flattened into every request element so the JSON carries `createUsername`,
/// `createDateTime`, `modifyUsername` and `modifyDateTime` next to the element's own fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditOverride {
    #[serde(default)]
    pub create_username: Option<String>,
    #[serde(default)]
    pub create_date_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub modify_username: Option<String>,
    #[serde(default)]
    pub modify_date_time: Option<NaiveDateTime>,
}

impl AuditOverride {
    /// Resolves the override into stored audit columns.
    ///
    /// A missing creator defaults to [`MIGRATION_USER`] and a missing creation time to `now`.
    /// Modify values are copied through as given.
    pub fn resolve(&self, now: NaiveDateTime) -> Audit {
        Audit {
            created_by: self
                .create_username
                .clone()
                .filter(|user| !user.trim().is_empty())
                .unwrap_or_else(|| MIGRATION_USER.to_string()),
            created_time: self.create_date_time.unwrap_or(now),
            updated_by: self.modify_username.clone(),
            updated_time: self.modify_date_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_resolve_defaults_creator_and_time() {
        let audit = AuditOverride::default().resolve(at(9));

        assert_eq!(audit.created_by, MIGRATION_USER);
        assert_eq!(audit.created_time, at(9));
        assert!(audit.updated_by.is_none());
        assert!(audit.updated_time.is_none());
    }

    #[test]
    fn test_resolve_keeps_supplied_values() {
        let supplied = AuditOverride {
            create_username: Some("JSMITH".to_string()),
            create_date_time: Some(at(7)),
            modify_username: Some("ADOE".to_string()),
            modify_date_time: Some(at(8)),
        };

        let audit = supplied.resolve(at(9));

        assert_eq!(audit.created_by, "JSMITH");
        assert_eq!(audit.created_time, at(7));
        assert_eq!(audit.updated_by.as_deref(), Some("ADOE"));
        assert_eq!(audit.updated_time, Some(at(8)));
    }

    #[test]
    fn test_resolve_treats_blank_creator_as_missing() {
        let supplied = AuditOverride {
            create_username: Some("  ".to_string()),
            ..Default::default()
        };

        assert_eq!(supplied.resolve(at(9)).created_by, MIGRATION_USER);
    }
}
