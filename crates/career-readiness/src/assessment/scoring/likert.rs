use std::collections::BTreeMap;

use super::super::domain::{
    LikertInstrument, ReadinessDimension, ReadinessSurvey, ResponseSet, TraitCategory,
    TraitSurvey,
};
use super::aggregate::{aggregate, CategoryDefinition};

/// Trait survey category scores on the 1-5 answer scale.
pub type TraitScores = BTreeMap<TraitCategory, f64>;

/// Readiness dimension scores already expressed on 0-100.
pub type ReadinessScores = BTreeMap<ReadinessDimension, f64>;

/// Trait scores stay on the answer scale until they are combined.
pub const TRAIT_SCALE_MULTIPLIER: f64 = 1.0;

/// Readiness scores are stored as percentages.
pub const READINESS_SCALE_MULTIPLIER: f64 = 20.0;

/// Scores every category of a Likert instrument, answered or not, on the
/// instrument's own scale.
pub fn score_categories<I: LikertInstrument>(responses: &ResponseSet<I>) -> BTreeMap<I::Category, f64> {
    I::categories()
        .iter()
        .map(|category| {
            let definition = CategoryDefinition::of::<I>(*category);
            (*category, aggregate(&definition, responses, I::SCALE_MULTIPLIER))
        })
        .collect()
}

pub fn score_traits(responses: &ResponseSet<TraitSurvey>) -> TraitScores {
    let scores = score_categories(responses);
    tracing::debug!(answered = responses.answered(), "trait categories rescored");
    scores
}

pub fn score_readiness(responses: &ResponseSet<ReadinessSurvey>) -> ReadinessScores {
    let scores = score_categories(responses);
    tracing::debug!(answered = responses.answered(), "readiness dimensions rescored");
    scores
}
