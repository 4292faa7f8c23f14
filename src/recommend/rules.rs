//! The declarative scoring rule table.
//!
//! Each rule is an independent predicate over `(answers, service)` with a
//! point value and an optional reason string. Rules are evaluated uniformly
//! for every service, so adding or removing one is a data change, not a code
//! change. Persona and need matches deliberately outweigh channel
//! preference.

use super::{chose, chose_any, AnswerSet};
use crate::catalog::{Pillar, Service, MEMBERSHIP_BENEFITS_ID};

pub(crate) struct ScoringRule {
    pub(crate) weight: u32,
    pub(crate) reason: Option<&'static str>,
    pub(crate) applies: fn(&AnswerSet, &Service) -> bool,
}

pub(crate) fn standard_rules() -> Vec<ScoringRule> {
    vec![
        // Persona matches. Independent checks: a service with a broad
        // audience set may legitimately satisfy more than one.
        ScoringRule {
            weight: 10,
            reason: Some("Designed for workers like you"),
            applies: |answers, service| {
                chose(&answers.persona, "worker") && service.audience_includes("worker")
            },
        },
        ScoringRule {
            weight: 10,
            reason: Some("Perfect for job seekers"),
            applies: |answers, service| {
                chose(&answers.persona, "job_seeker") && service.audience_includes("job_seeker")
            },
        },
        ScoringRule {
            weight: 10,
            reason: Some("Built for employers and HR professionals"),
            applies: |answers, service| {
                chose(&answers.persona, "employer") && service.audience_includes("employer")
            },
        },
        ScoringRule {
            weight: 10,
            reason: Some("Keeps retirees connected and supported"),
            applies: |answers, service| {
                chose(&answers.persona, "retired") && service.audience_includes("retired")
            },
        },
        // Employment type.
        ScoringRule {
            weight: 8,
            reason: Some("Essential protection for freelancers and gig workers"),
            applies: |answers, service| {
                chose_any(&answers.employment_type, &["freelancer", "gig_worker"])
                    && (service.pillar == Pillar::Protection || service.id.contains("gig"))
            },
        },
        ScoringRule {
            weight: 6,
            reason: Some("Support for employees like you"),
            applies: |answers, service| {
                chose_any(&answers.employment_type, &["full_time", "part_time"])
                    && service.audience_includes("worker")
            },
        },
        // Immediate need.
        ScoringRule {
            weight: 8,
            reason: Some("Addresses workplace concerns directly"),
            applies: |answers, service| {
                chose(&answers.immediate_need, "workplace_issue")
                    && service.pillar == Pillar::Protection
            },
        },
        ScoringRule {
            weight: 8,
            reason: Some("Supports your career advancement"),
            applies: |answers, service| {
                chose(&answers.immediate_need, "career_growth")
                    && matches!(service.pillar, Pillar::Progression | Pillar::Placement)
            },
        },
        ScoringRule {
            weight: 8,
            reason: Some("Helps reduce cost of living"),
            applies: |answers, service| {
                chose(&answers.immediate_need, "financial") && service.pillar == Pillar::Privileges
            },
        },
        ScoringRule {
            weight: 8,
            reason: Some("Ways to give back to the community"),
            applies: |answers, service| {
                chose(&answers.immediate_need, "community")
                    && (service.pillar == Pillar::Privileges || service.id.contains("volunteer"))
            },
        },
        ScoringRule {
            weight: 8,
            reason: Some("Room for personal growth and enrichment"),
            applies: |answers, service| {
                chose(&answers.immediate_need, "personal")
                    && (service.pillar == Pillar::Progression || service.id.contains("learning"))
            },
        },
        // Life stage.
        ScoringRule {
            weight: 4,
            reason: Some("Popular with younger workers"),
            applies: |answers, service| {
                chose(&answers.life_stage, "young")
                    && service.audience_includes_any(&["young", "worker", "freelancer", "gig_worker"])
            },
        },
        ScoringRule {
            weight: 4,
            reason: Some("Family-friendly support"),
            applies: |answers, service| {
                chose(&answers.life_stage, "parent")
                    && (service.audience_includes("parent") || service.pillar == Pillar::Privileges)
            },
        },
        // Urgency.
        ScoringRule {
            weight: 5,
            reason: Some("Available 24/7 for immediate help"),
            applies: |answers, service| {
                chose(&answers.urgency, "immediate") && service.channel_includes("hotline")
            },
        },
        // Membership.
        ScoringRule {
            weight: 3,
            reason: Some("Exclusive member benefit"),
            applies: |answers, service| {
                answers.is_member()
                    && service.audience_includes_any(&[
                        "worker",
                        "freelancer",
                        "gig_worker",
                        "retired",
                        "member",
                    ])
            },
        },
        ScoringRule {
            weight: 10,
            reason: Some("See what membership could unlock for you"),
            applies: |answers, service| {
                chose_any(&answers.membership, &["no_interested", "not_sure"])
                    && service.id.contains(MEMBERSHIP_BENEFITS_ID)
            },
        },
        ScoringRule {
            weight: 2,
            reason: Some("Open to everyone in the workforce"),
            applies: |answers, service| {
                chose(&answers.membership, "no")
                    && service.audience_includes_any(&["worker", "job_seeker"])
            },
        },
        // Channel preference: points only, no reason text.
        ScoringRule {
            weight: 2,
            reason: None,
            applies: |answers, service| {
                chose(&answers.channel, "digital")
                    && service.channel_includes_any(&["digital", "online"])
            },
        },
        ScoringRule {
            weight: 2,
            reason: None,
            applies: |answers, service| {
                chose(&answers.channel, "physical") && service.channel_includes("physical")
            },
        },
        ScoringRule {
            weight: 2,
            reason: None,
            applies: |answers, service| {
                chose(&answers.channel, "phone")
                    && service.channel_includes_any(&["phone", "hotline"])
            },
        },
    ]
}
