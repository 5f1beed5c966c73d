use serde::Deserialize;

use crate::error::{CyncityError, Result};
use crate::models::ServiceFilter;

/// Query string of `GET /api/v1/services`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ServicesQuery {
    /// `Points of Sale`, `Drug Stores`, or `Diagnostic Centers`. `all` or
    /// empty disables the filter.
    pub category: Option<String>,
    /// Free-text search over name, location, and tags.
    pub q: Option<String>,
}

impl TryFrom<ServicesQuery> for ServiceFilter {
    type Error = CyncityError;

    fn try_from(query: ServicesQuery) -> Result<Self> {
        let category = match query.category.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(c) if c.eq_ignore_ascii_case("all") => None,
            Some(c) => Some(c.parse().map_err(CyncityError::Validation)?),
        };
        Ok(Self {
            category,
            query: query.q,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServiceCategory;

    #[test]
    fn all_disables_category() {
        let filter = ServiceFilter::try_from(ServicesQuery {
            category: Some("All".to_string()),
            q: None,
        })
        .unwrap();
        assert!(filter.category.is_none());
    }

    #[test]
    fn label_selects_category() {
        let filter = ServiceFilter::try_from(ServicesQuery {
            category: Some("Drug Stores".to_string()),
            q: Some("green".to_string()),
        })
        .unwrap();
        assert_eq!(filter.category, Some(ServiceCategory::DrugStores));
        assert_eq!(filter.query.as_deref(), Some("green"));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = ServiceFilter::try_from(ServicesQuery {
            category: Some("Bakeries".to_string()),
            q: None,
        })
        .unwrap_err();
        assert_eq!(err.public_message(), "Unknown service category: Bakeries");
    }
}
