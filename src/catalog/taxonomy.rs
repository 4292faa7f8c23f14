//! Transforms the master services taxonomy into the concierge catalog.
//!
//! This is the offline data-preparation step: audience and channel tags are
//! remapped to the concierge vocabularies, benefit strings are derived, and
//! the result is validated before it can replace `data/services.json`.

use super::{CatalogError, Pillar, Service, ServiceCatalog, ValidationReport};
use chrono::{DateTime, Local};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Master taxonomy file layout: pillars keyed by name, each carrying its
/// service list. A `BTreeMap` keeps extraction order deterministic, which the
/// engine's tie-break rule depends on downstream.
#[derive(Debug, Deserialize)]
pub struct MasterTaxonomy {
    pub pillars: BTreeMap<String, TaxonomyPillar>,
}

#[derive(Debug, Deserialize)]
pub struct TaxonomyPillar {
    #[serde(default)]
    pub services: Vec<TaxonomyService>,
}

/// Raw taxonomy record before remapping into the concierge shape.
#[derive(Debug, Deserialize)]
pub struct TaxonomyService {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_audiences: Vec<String>,
    #[serde(default)]
    pub delivery_channels: Vec<String>,
    #[serde(default)]
    pub max_benefit: Option<String>,
    #[serde(default)]
    pub max_coverage: Option<String>,
    #[serde(default)]
    pub discount_rate: Option<String>,
}

static AUDIENCE_MAP: OnceLock<HashMap<&'static str, &'static [&'static str]>> = OnceLock::new();
static CHANNEL_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn audience_map() -> &'static HashMap<&'static str, &'static [&'static str]> {
    AUDIENCE_MAP.get_or_init(|| {
        const MAPPING: &[(&str, &[&str])] = &[
            ("all-workers", &["worker"]),
            ("all-members", &["member"]),
            ("pmes", &["worker", "professional"]),
            ("freelancers", &["freelancer"]),
            ("gig-workers", &["gig_worker", "freelancer"]),
            ("lower-wage-workers", &["worker"]),
            ("women-family", &["parent", "worker"]),
            ("young-workers", &["young", "worker"]),
            ("older-workers", &["senior", "worker"]),
            ("migrant-workers", &["worker"]),
            ("job-seekers", &["job_seeker"]),
            ("employers", &["employer"]),
            ("retrenched-workers", &["job_seeker"]),
            ("displaced-workers", &["job_seeker"]),
            ("career-switchers", &["job_seeker", "worker"]),
            ("union-members", &["member"]),
            ("new-members", &["member"]),
            ("eligible-members", &["member"]),
            ("families", &["parent"]),
            ("volunteers", &["volunteer"]),
            ("seniors", &["senior", "retired"]),
            ("low-income-families", &["parent"]),
        ];
        MAPPING.iter().copied().collect()
    })
}

fn channel_map() -> &'static HashMap<&'static str, &'static str> {
    CHANNEL_MAP.get_or_init(|| {
        const MAPPING: &[(&str, &str)] = &[
            ("physical", "physical"),
            ("digital", "digital"),
            ("hotline", "hotline"),
            ("virtual", "virtual"),
            ("online", "online"),
            ("physical-stores", "physical"),
            ("online-learning", "online"),
            ("workshops", "workshops"),
            ("community-centres", "community"),
            ("training-centres", "physical"),
            ("physical-meetings", "physical"),
            ("digital-platforms", "digital"),
            ("online-booking", "online"),
            ("digital-signup", "digital"),
            ("online-communities", "online"),
            ("volunteer-programs", "community"),
            ("campaigns", "campaigns"),
            ("media", "media"),
            ("events", "events"),
            ("exhibitions", "events"),
            ("policy", "policy"),
            ("advocacy", "advocacy"),
        ];
        MAPPING.iter().copied().collect()
    })
}

/// Result of a completed sync: the catalog, its validation report (warnings
/// only, by construction), and a summary for operator logs.
#[derive(Debug)]
pub struct SyncOutcome {
    pub catalog: ServiceCatalog,
    pub report: ValidationReport,
    pub synced_at: DateTime<Local>,
    pub pillar_counts: Vec<(Pillar, usize)>,
}

/// Error raised by the taxonomy sync step.
#[derive(Debug, thiserror::Error)]
pub enum TaxonomyError {
    #[error("failed to read taxonomy at {path}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("taxonomy is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("taxonomy produced an invalid catalog: {0}")]
    Validation(ValidationReport),
}

pub fn load_taxonomy(path: &Path) -> Result<MasterTaxonomy, TaxonomyError> {
    let raw = fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(TaxonomyError::Parse)
}

/// Extract, remap, and validate. Validation errors abort the sync; warnings
/// ride along in the outcome.
pub fn sync(taxonomy: &MasterTaxonomy) -> Result<SyncOutcome, TaxonomyError> {
    let mut services = Vec::new();
    let mut report = ValidationReport::default();

    for (pillar_key, pillar_entry) in &taxonomy.pillars {
        let Some(pillar) = Pillar::parse(pillar_key) else {
            report
                .errors
                .push(format!("unknown pillar '{pillar_key}' in taxonomy"));
            continue;
        };
        for raw in &pillar_entry.services {
            services.push(transform_service(raw, pillar));
        }
    }

    let catalog = ServiceCatalog::new(services);
    let structural = catalog.validate();
    report.errors.extend(structural.errors);
    report.warnings.extend(structural.warnings);

    if !report.is_ok() {
        return Err(TaxonomyError::Validation(report));
    }

    let pillar_counts = catalog.pillar_counts();
    Ok(SyncOutcome {
        catalog,
        report,
        synced_at: Local::now(),
        pillar_counts,
    })
}

fn transform_service(raw: &TaxonomyService, pillar: Pillar) -> Service {
    // Insertion-ordered dedup keeps the output stable across runs.
    let mut target_audience: Vec<String> = Vec::new();
    for audience in &raw.target_audiences {
        if let Some(mapped) = audience_map().get(audience.as_str()) {
            for tag in mapped.iter() {
                if !target_audience.iter().any(|existing| existing == tag) {
                    target_audience.push((*tag).to_string());
                }
            }
        }
    }

    let mut channels: Vec<String> = Vec::new();
    for channel in &raw.delivery_channels {
        if let Some(mapped) = channel_map().get(channel.as_str()) {
            if !channels.iter().any(|existing| existing == mapped) {
                channels.push((*mapped).to_string());
            }
        }
    }

    Service {
        id: raw.id.clone(),
        name: raw.name.clone(),
        pillar,
        description: raw.description.clone(),
        target_audience,
        benefit: derive_benefit(raw),
        channels,
    }
}

fn derive_benefit(raw: &TaxonomyService) -> String {
    if let Some(max_benefit) = &raw.max_benefit {
        format!("{max_benefit} in funding support")
    } else if let Some(max_coverage) = &raw.max_coverage {
        format!("Coverage up to {max_coverage}")
    } else if let Some(discount_rate) = &raw.discount_rate {
        format!("{discount_rate} discount")
    } else {
        raw.description.clone()
    }
}

/// Serialize a synced catalog in the on-disk `services.json` layout.
pub fn render_catalog(catalog: &ServiceCatalog) -> Result<String, CatalogError> {
    let mut rendered = serde_json::to_string_pretty(catalog).map_err(CatalogError::Parse)?;
    rendered.push('\n');
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy_from(raw: &str) -> MasterTaxonomy {
        serde_json::from_str(raw).expect("taxonomy parses")
    }

    const SAMPLE: &str = r#"{
        "pillars": {
            "protection": {
                "services": [{
                    "id": "workplace-advisory",
                    "name": "Workplace Advisory",
                    "description": "Advice on workplace disputes",
                    "target_audiences": ["all-workers", "young-workers", "freelancers"],
                    "delivery_channels": ["hotline", "training-centres", "digital-platforms"],
                    "max_coverage": "$200,000"
                }]
            },
            "privileges": {
                "services": [{
                    "id": "daily-deals",
                    "name": "Daily Deals",
                    "description": "Partner discounts",
                    "target_audiences": ["all-members", "seniors"],
                    "delivery_channels": ["physical-stores", "online-booking"],
                    "discount_rate": "15%"
                }]
            }
        }
    }"#;

    #[test]
    fn sync_remaps_audiences_and_channels() {
        let outcome = sync(&taxonomy_from(SAMPLE)).expect("sync succeeds");
        let advisory = outcome
            .catalog
            .find("workplace-advisory")
            .expect("advisory present");

        // Insertion order with duplicates collapsed: worker before young.
        assert_eq!(advisory.target_audience, vec!["worker", "young", "freelancer"]);
        assert_eq!(advisory.channels, vec!["hotline", "physical", "digital"]);
        assert_eq!(advisory.pillar, Pillar::Protection);
    }

    #[test]
    fn sync_derives_benefit_by_precedence() {
        let outcome = sync(&taxonomy_from(SAMPLE)).expect("sync succeeds");
        let advisory = outcome.catalog.find("workplace-advisory").expect("present");
        assert_eq!(advisory.benefit, "Coverage up to $200,000");

        let deals = outcome.catalog.find("daily-deals").expect("present");
        assert_eq!(deals.benefit, "15% discount");
    }

    #[test]
    fn sync_counts_services_per_pillar() {
        let outcome = sync(&taxonomy_from(SAMPLE)).expect("sync succeeds");
        let counts: BTreeMap<_, _> = outcome
            .pillar_counts
            .into_iter()
            .map(|(pillar, count)| (pillar.label(), count))
            .collect();
        assert_eq!(counts["protection"], 1);
        assert_eq!(counts["privileges"], 1);
        assert_eq!(counts["placement"], 0);
    }

    #[test]
    fn unknown_pillar_key_fails_the_sync() {
        let raw = r#"{"pillars": {"partnerships": {"services": [{
            "id": "x", "name": "X", "description": "d"
        }]}}}"#;
        match sync(&taxonomy_from(raw)) {
            Err(TaxonomyError::Validation(report)) => {
                assert!(report
                    .errors
                    .iter()
                    .any(|error| error.contains("unknown pillar 'partnerships'")));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn unmapped_tags_are_dropped_with_a_warning_free_catalog() {
        let raw = r#"{"pillars": {"progression": {"services": [{
            "id": "course", "name": "Course", "description": "d",
            "target_audiences": ["all-workers", "made-up-tag"],
            "delivery_channels": ["workshops", "carrier-pigeon"]
        }]}}}"#;
        let outcome = sync(&taxonomy_from(raw)).expect("sync succeeds");
        let course = outcome.catalog.find("course").expect("present");
        assert_eq!(course.target_audience, vec!["worker"]);
        assert_eq!(course.channels, vec!["workshops"]);
    }

    #[test]
    fn missing_required_fields_abort_the_sync() {
        let raw = r#"{"pillars": {"placement": {"services": [{
            "id": "", "name": "Nameless", "description": "d"
        }]}}}"#;
        assert!(matches!(
            sync(&taxonomy_from(raw)),
            Err(TaxonomyError::Validation(_))
        ));
    }
}
