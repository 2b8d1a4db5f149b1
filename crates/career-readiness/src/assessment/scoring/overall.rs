use super::aggregate::{clamp_score, mean};
use super::likert::{ReadinessScores, TraitScores};

pub const TRAIT_WEIGHT: f64 = 0.30;
pub const APTITUDE_WEIGHT: f64 = 0.40;
pub const READINESS_WEIGHT: f64 = 0.30;

/// Converts a 1-5 trait score to a percentage. Applied once, here and in role
/// matching; stored trait scores are never pre-multiplied.
pub const TRAIT_PERCENT_MULTIPLIER: f64 = 20.0;

pub fn trait_percent(score: f64) -> f64 {
    score * TRAIT_PERCENT_MULTIPLIER
}

/// Weighted 0-100 readiness score. Every category counts once in its
/// instrument's mean, however many questions feed it.
pub fn combine(traits: &TraitScores, aptitude_total: f64, readiness: &ReadinessScores) -> f64 {
    let trait_component = clamp_score(trait_percent(mean(traits.values().copied())));
    let readiness_component = clamp_score(mean(readiness.values().copied()));
    let aptitude_component = clamp_score(aptitude_total);

    clamp_score(
        trait_component * TRAIT_WEIGHT
            + aptitude_component * APTITUDE_WEIGHT
            + readiness_component * READINESS_WEIGHT,
    )
}
