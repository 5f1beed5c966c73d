use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum ServiceCategory {
    #[serde(rename = "Points of Sale")]
    PointsOfSale,
    #[serde(rename = "Drug Stores")]
    DrugStores,
    #[serde(rename = "Diagnostic Centers")]
    DiagnosticCenters,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 3] = [
        ServiceCategory::PointsOfSale,
        ServiceCategory::DrugStores,
        ServiceCategory::DiagnosticCenters,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::PointsOfSale => "Points of Sale",
            Self::DrugStores => "Drug Stores",
            Self::DiagnosticCenters => "Diagnostic Centers",
        }
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ServiceCategory {
    type Err = String;

    /// Accepts the display label in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown service category: {s}"))
    }
}

/// Entry in the service directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServicePoint {
    pub id: String,
    pub name: String,
    pub category: ServiceCategory,
    pub location: String,
    pub contact: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceFilter {
    pub category: Option<ServiceCategory>,
    /// Case-insensitive match against name, location, and tags.
    pub query: Option<String>,
}

impl ServiceFilter {
    pub fn matches(&self, point: &ServicePoint) -> bool {
        if let Some(category) = self.category {
            if point.category != category {
                return false;
            }
        }

        let needle = match self.query.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => q.to_lowercase(),
            _ => return true,
        };

        point.name.to_lowercase().contains(&needle)
            || point.location.to_lowercase().contains(&needle)
            || point
                .tags
                .iter()
                .any(|t| t.to_lowercase().contains(&needle))
    }
}
