//! The recommendation scoring engine.
//!
//! A pure function over an answer set and a catalog: every service is scored
//! against a declarative rule table, annotated with reasons, an access
//! method, and a confidence tier, then ranked. When organic matches are too
//! few or too weak, an ordered list of fallback strategies fills the
//! shortlist.

mod access;
mod fallback;
mod router;
mod rules;

#[cfg(test)]
mod tests;

pub use router::{rank_badge, recommendation_router, RecommendationState};

use crate::catalog::{Service, ServiceCatalog};
use serde::{Deserialize, Serialize};

/// Maximum number of entries in a shortlist.
pub const MAX_RESULTS: usize = 3;
/// Scores at or above this are labeled high confidence.
pub const HIGH_CONFIDENCE_SCORE: u32 = 20;
/// Scores at or above this (but below high) are labeled medium confidence.
pub const MEDIUM_CONFIDENCE_SCORE: u32 = 12;
/// A third-ranked score below this triggers the fallback pass.
pub const WEAK_MATCH_SCORE: u32 = 5;

pub(crate) const GENERIC_REASON: &str = "Matches your profile";

/// One selected option per question key. Partial sets are legal; an
/// unanswered or unrecognized value simply never satisfies a rule, so the
/// engine stays total over any input shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immediate_need: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl AnswerSet {
    pub fn is_member(&self) -> bool {
        chose(&self.membership, "yes")
    }
}

/// True when the answer slot holds exactly `value`.
pub(crate) fn chose(answer: &Option<String>, value: &str) -> bool {
    answer.as_deref() == Some(value)
}

/// True when the answer slot holds any of `values`.
pub(crate) fn chose_any(answer: &Option<String>, values: &[&str]) -> bool {
    values.iter().any(|value| chose(answer, value))
}

/// Coarse three-level summary of a score, shown instead of the raw number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn from_score(score: u32) -> Self {
        if score >= HIGH_CONFIDENCE_SCORE {
            Confidence::High
        } else if score >= MEDIUM_CONFIDENCE_SCORE {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

/// A catalog entry annotated for one recommendation call. Rank is positional
/// in the returned list, not a stored field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredService {
    #[serde(flatten)]
    pub service: Service,
    pub score: u32,
    pub reasons: Vec<String>,
    pub access: String,
    pub confidence: Confidence,
}

impl ScoredService {
    pub(crate) fn annotated(
        service: &Service,
        answers: &AnswerSet,
        score: u32,
        reasons: Vec<String>,
    ) -> Self {
        Self {
            access: access::derive(answers, service),
            confidence: Confidence::from_score(score),
            service: service.clone(),
            score,
            reasons,
        }
    }
}

/// Stateless scorer holding the ordered rule table.
pub struct RecommendationEngine {
    rules: Vec<rules::ScoringRule>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self {
            rules: rules::standard_rules(),
        }
    }

    /// Score the whole catalog and return the ranked shortlist.
    ///
    /// Deterministic and side-effect-free: the sort is stable, so services
    /// tied on score keep their catalog order, and repeated calls with the
    /// same inputs produce identical output.
    pub fn recommend(&self, answers: &AnswerSet, catalog: &ServiceCatalog) -> Vec<ScoredService> {
        let mut scored: Vec<ScoredService> = catalog
            .services
            .iter()
            .map(|service| self.score_service(answers, service))
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(MAX_RESULTS);

        if needs_fallback(&scored) {
            let candidates = fallback::candidates(answers, catalog, &scored);
            scored.extend(candidates);
            // Re-rank so a qualifying fallback can displace a weak organic
            // tail entry; stable sort keeps organic entries ahead on ties.
            scored.sort_by(|a, b| b.score.cmp(&a.score));
            scored.truncate(MAX_RESULTS);
        }

        scored
    }

    fn score_service(&self, answers: &AnswerSet, service: &Service) -> ScoredService {
        let mut score = 0;
        let mut reasons = Vec::new();

        for rule in &self.rules {
            if (rule.applies)(answers, service) {
                score += rule.weight;
                if let Some(reason) = rule.reason {
                    reasons.push(reason.to_string());
                }
            }
        }

        if reasons.is_empty() {
            reasons.push(GENERIC_REASON.to_string());
        }

        ScoredService::annotated(service, answers, score, reasons)
    }
}

fn needs_fallback(shortlist: &[ScoredService]) -> bool {
    shortlist.len() < MAX_RESULTS
        || shortlist
            .last()
            .map_or(true, |entry| entry.score < WEAK_MATCH_SCORE)
}
