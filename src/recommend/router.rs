//! HTTP surface for the questionnaire and the recommendation engine.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::{AnswerSet, RecommendationEngine, ScoredService};
use crate::catalog::ServiceCatalog;
use crate::questions;

/// Shared state for the recommendation routes: the engine is stateless, the
/// catalog is read-only, so one instance serves every request.
#[derive(Clone)]
pub struct RecommendationState {
    engine: Arc<RecommendationEngine>,
    catalog: Arc<ServiceCatalog>,
}

impl RecommendationState {
    pub fn new(catalog: Arc<ServiceCatalog>) -> Self {
        Self {
            engine: Arc::new(RecommendationEngine::new()),
            catalog,
        }
    }
}

/// Router builder exposing the questionnaire, catalog, and recommendations.
pub fn recommendation_router(catalog: Arc<ServiceCatalog>) -> Router {
    Router::new()
        .route("/api/v1/questions", get(questions_handler))
        .route("/api/v1/services", get(services_handler))
        .route("/api/v1/recommendations", post(recommendations_handler))
        .with_state(RecommendationState::new(catalog))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RecommendationRequest {
    #[serde(default)]
    pub(crate) answers: AnswerSet,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecommendationResponse {
    pub(crate) recommendations: Vec<RankedRecommendation>,
}

/// One shortlist entry plus its positional rank badge.
#[derive(Debug, Serialize)]
pub(crate) struct RankedRecommendation {
    pub(crate) rank: usize,
    pub(crate) badge: &'static str,
    #[serde(flatten)]
    pub(crate) result: ScoredService,
}

/// Positional rank badges shown by the presentation layer.
pub fn rank_badge(rank: usize) -> &'static str {
    match rank {
        1 => "top match",
        2 => "recommended",
        _ => "also consider",
    }
}

async fn questions_handler() -> Json<&'static [questions::Question]> {
    Json(questions::all())
}

async fn services_handler(State(state): State<RecommendationState>) -> Json<ServiceCatalog> {
    Json(state.catalog.as_ref().clone())
}

pub(crate) async fn recommendations_handler(
    State(state): State<RecommendationState>,
    Json(request): Json<RecommendationRequest>,
) -> Json<RecommendationResponse> {
    let shortlist = state.engine.recommend(&request.answers, &state.catalog);
    let recommendations = shortlist
        .into_iter()
        .enumerate()
        .map(|(index, result)| RankedRecommendation {
            rank: index + 1,
            badge: rank_badge(index + 1),
            result,
        })
        .collect();

    Json(RecommendationResponse { recommendations })
}
