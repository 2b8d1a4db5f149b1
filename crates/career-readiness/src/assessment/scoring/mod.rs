mod aggregate;
mod aptitude;
mod likert;
mod overall;
mod recommendation;
mod roles;

pub use aggregate::{aggregate, CategoryDefinition, SCORE_CEILING, SCORE_FLOOR};
pub use aptitude::{calculate as calculate_aptitude, score_section, AptitudeResult};
pub use likert::{
    score_categories, score_readiness, score_traits, ReadinessScores, TraitScores,
    READINESS_SCALE_MULTIPLIER, TRAIT_SCALE_MULTIPLIER,
};
pub use overall::{
    combine, trait_percent, APTITUDE_WEIGHT, READINESS_WEIGHT, TRAIT_PERCENT_MULTIPLIER,
    TRAIT_WEIGHT,
};
pub use recommendation::{
    Recommendation, ScoreBand, CONDITIONAL_THRESHOLD, PROCEED_THRESHOLD,
};
pub use roles::{match_roles, CareerRole, RoleMatch, ScoreSource, CAREER_ROLES};

use serde::{Deserialize, Serialize};

/// The persisted shape: per-instrument category scores and nothing derived
/// from combining them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssessmentScores {
    #[serde(default)]
    pub psychometric: TraitScores,
    #[serde(default)]
    pub technical: AptitudeResult,
    #[serde(default)]
    pub wiscar: ReadinessScores,
}

/// Category scores plus the overall score and recommendation derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    #[serde(flatten)]
    pub scores: AssessmentScores,
    pub overall_score: f64,
    pub recommendation: Recommendation,
}

/// Combines and classifies a set of category scores. Pure: the same scores
/// always produce the same result.
pub fn evaluate(scores: &AssessmentScores) -> AssessmentResult {
    let overall_score = combine(
        &scores.psychometric,
        scores.technical.total_score,
        &scores.wiscar,
    );
    let recommendation = Recommendation::classify(overall_score);

    AssessmentResult {
        scores: scores.clone(),
        overall_score,
        recommendation,
    }
}
