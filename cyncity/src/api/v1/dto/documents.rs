use serde::Deserialize;
use validator::Validate;

use crate::validation::OrderedValidate;

/// Optional body for `PATCH /api/v1/datasets/docs/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Validate, utoipa::ToSchema)]
pub struct EmbedDocumentRequest {
    /// Simulated embedding size. Defaults to the configured dimension.
    #[validate(range(min = 1, max = 4096, message = "Dimensions must be between 1 and 4096"))]
    pub dimensions: Option<u32>,
}

impl OrderedValidate for EmbedDocumentRequest {
    const FIELD_ORDER: &'static [&'static str] = &["dimensions"];
}

/// Query string of `GET /api/v1/datasets/docs/{id}`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DownloadQuery {
    /// When truthy, respond with `Content-Disposition: attachment`.
    pub download: Option<String>,
}
