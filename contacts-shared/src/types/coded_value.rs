use serde::{Deserialize, Serialize};

/// A NOMIS reference-data value. Only the code is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodedValue {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

impl CodedValue {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }
}

