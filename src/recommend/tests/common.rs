use crate::catalog::{Pillar, Service, ServiceCatalog};
use crate::recommend::AnswerSet;

pub(super) fn service(
    id: &str,
    pillar: Pillar,
    audience: &[&str],
    channels: &[&str],
) -> Service {
    Service {
        id: id.to_string(),
        name: id.replace('-', " "),
        pillar,
        description: format!("{id} description"),
        target_audience: audience.iter().map(|tag| tag.to_string()).collect(),
        benefit: format!("{id} benefit"),
        channels: channels.iter().map(|tag| tag.to_string()).collect(),
    }
}

/// Representative catalog covering every pillar, the designated fallback
/// entries, and a hotline-capable protection service.
pub(super) fn catalog() -> ServiceCatalog {
    ServiceCatalog::new(vec![
        service(
            "workplace-advisory",
            Pillar::Protection,
            &["worker", "freelancer", "gig_worker"],
            &["hotline", "physical", "digital"],
        ),
        service(
            "gig-workers-support",
            Pillar::Protection,
            &["freelancer", "gig_worker", "young"],
            &["digital", "online"],
        ),
        service(
            "skills-training-grants",
            Pillar::Progression,
            &["worker", "member", "young"],
            &["online", "digital"],
        ),
        service(
            "job-matching",
            Pillar::Placement,
            &["job_seeker"],
            &["digital", "online", "physical"],
        ),
        service(
            "membership-benefits",
            Pillar::Privileges,
            &["worker", "member", "young"],
            &["digital", "physical"],
        ),
        service(
            "daily-essentials-deals",
            Pillar::Privileges,
            &["member", "parent", "senior"],
            &["physical", "digital"],
        ),
    ])
}

pub(super) fn answers(pairs: &[(&str, &str)]) -> AnswerSet {
    let mut set = AnswerSet::default();
    for (key, value) in pairs {
        let slot = match *key {
            "persona" => &mut set.persona,
            "employment_type" => &mut set.employment_type,
            "immediate_need" => &mut set.immediate_need,
            "urgency" => &mut set.urgency,
            "life_stage" => &mut set.life_stage,
            "membership" => &mut set.membership,
            "channel" => &mut set.channel,
            other => panic!("unknown question key '{other}'"),
        };
        *slot = Some(value.to_string());
    }
    set
}
