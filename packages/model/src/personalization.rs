//! Merge tag catalog.
//!
//! Merge tags are placeholder tokens ("first name", "company") that
//! the user drops into text-bearing elements. The editor only records
//! them; substitution happens in the external mailer at send time.

use serde::{Deserialize, Serialize};

/// One merge tag descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeTag {
    pub id: String,
    pub label: String,
    pub default_value: String,
}

impl MergeTag {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        default_value: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            default_value: default_value.into(),
        }
    }
}

/// Read-only lookup over an externally supplied tag list.
#[derive(Debug, Clone)]
pub struct MergeTagCatalog {
    tags: Vec<MergeTag>,
}

impl MergeTagCatalog {
    pub fn new(tags: Vec<MergeTag>) -> Self {
        Self { tags }
    }

    /// The built-in tag set offered by the editor.
    pub fn standard() -> Self {
        Self::new(vec![
            MergeTag::new("firstName", "First Name", "{{firstName}}"),
            MergeTag::new("lastName", "Last Name", "{{lastName}}"),
            MergeTag::new("email", "Email Address", "{{email}}"),
            MergeTag::new("company", "Company", "{{company}}"),
        ])
    }

    pub fn get(&self, id: &str) -> Option<&MergeTag> {
        self.tags.iter().find(|t| t.id == id)
    }

    pub fn tags(&self) -> &[MergeTag] {
        &self.tags
    }
}
