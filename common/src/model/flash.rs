use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One-shot feedback carried from a form submission to the next page load.
///
/// Mutating endpoints never answer with an error payload. They redirect back to
/// the page the form was submitted from and leave a `Flash` behind, which the
/// following listing request hands to the front end exactly once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Field name to the list of messages raised for it.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_errors(errors: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            errors,
            ..Self::default()
        }
    }
}
