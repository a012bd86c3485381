//! Payloads exchanged with the import service.

use std::fmt;
use std::str::FromStr;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::table::Table;

/// Column-name prefix the service used for unmatched columns before it
/// started sending an explicit `unmappedColumns` list.
pub const UNMAPPED_PREFIX: &str = "unmappedColumn";

/// A field of the destination schema, with the pattern its values must match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetField {
    pub name: String,
    /// Regex source as written by the service.
    #[serde(default)]
    pub validation: String,
}

impl TargetField {
    pub fn new(name: impl Into<String>, validation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            validation: validation.into(),
        }
    }
}

/// Template the service should use when parsing an upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    Shopify,
    Amazon,
    #[default]
    Other,
}

impl TemplateType {
    pub const ALL: [TemplateType; 3] = [Self::Shopify, Self::Amazon, Self::Other];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shopify => "shopify",
            Self::Amazon => "amazon",
            Self::Other => "other",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Shopify => "Shopify",
            Self::Amazon => "Amazon",
            Self::Other => "Other",
        }
    }

    /// Only the generic template is fully supported by the service.
    pub const fn is_supported(&self) -> bool {
        matches!(self, Self::Other)
    }

    /// Notice shown when a template that is still being built is picked.
    pub fn notice(&self) -> Option<&'static str> {
        (!self.is_supported()).then_some("This template is still in development")
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TemplateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shopify" => Ok(Self::Shopify),
            "amazon" => Ok(Self::Amazon),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown template: {other}")),
        }
    }
}

/// Parsed upload returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub data: Table,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unmapped_columns: Vec<IndexMap<String, String>>,
    /// Labels the user may assign to columns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub empty_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_fields: Vec<TargetField>,
}

impl UploadResponse {
    /// Columns the service could not match to the target schema.
    ///
    /// Names come from the explicit `unmappedColumns` records (keys or
    /// values naming a table column); columns carrying the legacy
    /// [`UNMAPPED_PREFIX`] are included as well.
    pub fn unmapped_column_names(&self) -> IndexSet<String> {
        let mut names = IndexSet::new();
        for record in &self.unmapped_columns {
            for (key, value) in record {
                for candidate in [key, value] {
                    if self.data.has_column(candidate) {
                        names.insert(candidate.clone());
                    }
                }
            }
        }
        for column in self.data.columns() {
            if column.starts_with(UNMAPPED_PREFIX) {
                names.insert(column.clone());
            }
        }
        names
    }
}

/// Body of `POST /save` and `POST /save/templates`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest<'a> {
    pub data: &'a Table,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_name: Option<&'a str>,
}

impl<'a> SaveRequest<'a> {
    pub fn data(data: &'a Table) -> Self {
        Self {
            data,
            template_name: None,
        }
    }

    pub fn template(data: &'a Table, name: &'a str) -> Self {
        Self {
            data,
            template_name: Some(name),
        }
    }
}

/// Response of the save endpoints.
///
/// Either a plain message, or a base64 file the client should offer as a
/// download.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
}

impl SaveResponse {
    pub fn is_rejected(&self) -> bool {
        self.success == Some(false)
    }

    pub fn has_download(&self) -> bool {
        self.data.as_deref().is_some_and(|d| !d.trim().is_empty())
    }
}
