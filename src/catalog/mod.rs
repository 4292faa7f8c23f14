//! Service catalog: the read-only input the recommendation engine scores.

pub mod taxonomy;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Catalog entry id designated as the membership conversion nudge.
pub const MEMBERSHIP_BENEFITS_ID: &str = "membership-benefits";
/// Catalog entry id designated as the general workplace advisory service.
pub const WORKPLACE_ADVISORY_ID: &str = "workplace-advisory";

/// Fixed top-level grouping for catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pillar {
    Protection,
    Progression,
    Placement,
    Privileges,
}

impl Pillar {
    pub const ALL: [Pillar; 4] = [
        Pillar::Protection,
        Pillar::Progression,
        Pillar::Placement,
        Pillar::Privileges,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Pillar::Protection => "protection",
            Pillar::Progression => "progression",
            Pillar::Placement => "placement",
            Pillar::Privileges => "privileges",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "protection" => Some(Pillar::Protection),
            "progression" => Some(Pillar::Progression),
            "placement" => Some(Pillar::Placement),
            "privileges" => Some(Pillar::Privileges),
            _ => None,
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable catalog record. Audience and channel tags come from fixed
/// vocabularies, but unknown tags are tolerated; they simply never match a
/// scoring rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub pillar: Pillar,
    pub description: String,
    #[serde(default)]
    pub target_audience: Vec<String>,
    pub benefit: String,
    #[serde(default)]
    pub channels: Vec<String>,
}

impl Service {
    pub fn audience_includes(&self, tag: &str) -> bool {
        self.target_audience.iter().any(|candidate| candidate == tag)
    }

    pub fn audience_includes_any(&self, tags: &[&str]) -> bool {
        tags.iter().any(|tag| self.audience_includes(tag))
    }

    pub fn channel_includes(&self, tag: &str) -> bool {
        self.channels.iter().any(|candidate| candidate == tag)
    }

    pub fn channel_includes_any(&self, tags: &[&str]) -> bool {
        tags.iter().any(|tag| self.channel_includes(tag))
    }
}

/// Ordered collection of services. Order is significant: the scoring engine
/// breaks score ties by catalog position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCatalog {
    pub services: Vec<Service>,
}

const EMBEDDED_CATALOG: &str = include_str!("../../data/services.json");

impl ServiceCatalog {
    pub fn new(services: Vec<Service>) -> Self {
        Self { services }
    }

    /// The catalog compiled into the binary, produced by the taxonomy sync.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(raw).map_err(CatalogError::Parse)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn find(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|service| service.id == id)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Structural checks applied at catalog-preparation time, never on the
    /// recommendation path. Empty tag lists are warnings, not errors.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        let mut seen_ids: Vec<&str> = Vec::new();

        for (index, service) in self.services.iter().enumerate() {
            let position = index + 1;
            let id = if service.id.is_empty() {
                "unknown"
            } else {
                service.id.as_str()
            };

            for (field, value) in [
                ("id", &service.id),
                ("name", &service.name),
                ("description", &service.description),
                ("benefit", &service.benefit),
            ] {
                if value.trim().is_empty() {
                    report
                        .errors
                        .push(format!("service {position} ({id}): missing required field '{field}'"));
                }
            }

            if seen_ids.contains(&service.id.as_str()) {
                report
                    .errors
                    .push(format!("service {position} ({id}): duplicate id"));
            } else {
                seen_ids.push(service.id.as_str());
            }

            if service.target_audience.is_empty() {
                report
                    .warnings
                    .push(format!("service {position} ({id}): empty targetAudience list"));
            }
            if service.channels.is_empty() {
                report
                    .warnings
                    .push(format!("service {position} ({id}): empty channels list"));
            }
        }

        report
    }

    /// Number of services per pillar, in fixed pillar order.
    pub fn pillar_counts(&self) -> Vec<(Pillar, usize)> {
        Pillar::ALL
            .iter()
            .map(|pillar| {
                let count = self
                    .services
                    .iter()
                    .filter(|service| service.pillar == *pillar)
                    .count();
                (*pillar, count)
            })
            .collect()
    }
}

/// Outcome of a structural catalog check. Errors abort a sync; warnings are
/// surfaced but tolerated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} error(s), {} warning(s)",
            self.errors.len(),
            self.warnings.len()
        )
    }
}

/// Error raised while loading or preparing a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog at {path}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("catalog validation failed: {0}")]
    Invalid(ValidationReport),
}
