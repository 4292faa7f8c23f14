//! Fallback-filling strategies, applied when organic scoring produces too
//! few or too weak matches.
//!
//! The heuristics form an ordered list of `(condition, selector, fixed
//! score, fixed reason)` records. Candidates never duplicate an already
//! selected service; on equal scores the stable re-rank keeps organic
//! entries ahead.

use super::{AnswerSet, ScoredService};
use crate::catalog::{
    Pillar, Service, ServiceCatalog, MEMBERSHIP_BENEFITS_ID, WORKPLACE_ADVISORY_ID,
};

const MEMBERSHIP_REASON: &str = "Membership unlocks savings and support across every pillar";
const ADVISORY_REASON: &str = "Workplace advice every worker can lean on";
const PRIVILEGES_REASON: &str = "Make the most of your member privileges";

struct FallbackRule {
    score: u32,
    reason: &'static str,
    applies: fn(&AnswerSet) -> bool,
    select: for<'a> fn(&'a ServiceCatalog, &[ScoredService]) -> Option<&'a Service>,
}

fn not_a_member(answers: &AnswerSet) -> bool {
    !answers.is_member()
}

fn in_the_workforce(answers: &AnswerSet) -> bool {
    answers.persona.as_deref() == Some("worker") || answers.employment_type.is_some()
}

fn select_membership_entry<'a>(
    catalog: &'a ServiceCatalog,
    _selected: &[ScoredService],
) -> Option<&'a Service> {
    catalog
        .services
        .iter()
        .find(|service| service.id.contains(MEMBERSHIP_BENEFITS_ID))
}

fn select_advisory_entry<'a>(
    catalog: &'a ServiceCatalog,
    _selected: &[ScoredService],
) -> Option<&'a Service> {
    catalog
        .services
        .iter()
        .find(|service| service.id.contains(WORKPLACE_ADVISORY_ID))
}

fn select_privileges_entry<'a>(
    catalog: &'a ServiceCatalog,
    selected: &[ScoredService],
) -> Option<&'a Service> {
    if selected
        .iter()
        .any(|entry| entry.service.pillar == Pillar::Privileges)
    {
        return None;
    }
    catalog.services.iter().find(|service| {
        service.pillar == Pillar::Privileges && service.audience_includes("member")
    })
}

fn strategies() -> [FallbackRule; 3] {
    [
        // Non-members (including the undecided) get the membership nudge.
        FallbackRule {
            score: 5,
            reason: MEMBERSHIP_REASON,
            applies: not_a_member,
            select: select_membership_entry,
        },
        // Anyone in the workforce benefits from the advisory service.
        FallbackRule {
            score: 4,
            reason: ADVISORY_REASON,
            applies: in_the_workforce,
            select: select_advisory_entry,
        },
        // Members with no privileges entry selected yet get one.
        FallbackRule {
            score: 3,
            reason: PRIVILEGES_REASON,
            applies: AnswerSet::is_member,
            select: select_privileges_entry,
        },
    ]
}

/// Produce annotated fallback candidates in fixed priority order, skipping
/// ids already present in the shortlist.
pub(super) fn candidates(
    answers: &AnswerSet,
    catalog: &ServiceCatalog,
    selected: &[ScoredService],
) -> Vec<ScoredService> {
    let mut picked: Vec<ScoredService> = Vec::new();

    for strategy in strategies() {
        if !(strategy.applies)(answers) {
            continue;
        }
        let Some(service) = (strategy.select)(catalog, selected) else {
            continue;
        };
        let already_selected = selected
            .iter()
            .chain(picked.iter())
            .any(|entry| entry.service.id == service.id);
        if already_selected {
            continue;
        }
        picked.push(ScoredService::annotated(
            service,
            answers,
            strategy.score,
            vec![strategy.reason.to_string()],
        ));
    }

    picked
}
