use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{CyncityError, Result};
use crate::validation::{validate_document_type, OrderedValidate};

/// MIME types accepted for dataset uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum DocumentType {
    #[serde(rename = "application/pdf")]
    Pdf,
    #[serde(rename = "text/plain")]
    PlainText,
    #[serde(rename = "text/markdown")]
    Markdown,
    #[serde(rename = "application/vnd.openxmlformats-officedocument.wordprocessingml.document")]
    Docx,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Pdf,
        DocumentType::PlainText,
        DocumentType::Markdown,
        DocumentType::Docx,
    ];

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::PlainText => "text/plain",
            Self::Markdown => "text/markdown",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mime())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    /// Parameters such as `; charset=utf-8` are ignored.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let essence = s.split(';').next().unwrap_or_default().trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.mime() == essence)
            .ok_or_else(|| {
                let allowed = Self::ALL.map(|t| t.mime()).join(", ");
                format!("Unsupported file type '{s}'. Allowed types: {allowed}")
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Uploaded,
    Embedded,
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uploaded => write!(f, "uploaded"),
            Self::Embedded => write!(f, "embedded"),
        }
    }
}

/// Dataset document metadata. The raw bytes live next to it in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub size: u64,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
    pub status: DocumentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding_dim: Option<u32>,
}

/// Untrusted metadata of an uploaded file, as read from the multipart form.
#[derive(Debug, Clone, Validate)]
pub struct DocumentMeta {
    #[validate(length(min = 1, message = "File name is required"))]
    pub name: String,
    #[validate(custom(function = "validate_document_type"))]
    pub content_type: String,
    #[validate(range(min = 1, message = "File is empty"))]
    pub size: u64,
}

impl OrderedValidate for DocumentMeta {
    const FIELD_ORDER: &'static [&'static str] = &["name", "content_type", "size"];
}

/// Validated metadata for a document about to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub name: String,
    pub doc_type: DocumentType,
    pub size: u64,
}

impl TryFrom<DocumentMeta> for NewDocument {
    type Error = CyncityError;

    fn try_from(meta: DocumentMeta) -> Result<Self> {
        meta.validate_ordered()?;
        let doc_type = meta
            .content_type
            .parse::<DocumentType>()
            .map_err(CyncityError::Validation)?;
        Ok(Self {
            name: meta.name,
            doc_type,
            size: meta.size,
        })
    }
}
