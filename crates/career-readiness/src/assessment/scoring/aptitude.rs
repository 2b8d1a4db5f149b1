use serde::{Deserialize, Serialize};

use super::super::domain::{AptitudeQuiz, AptitudeSection, GradedInstrument, QuestionId, ResponseSet};
use super::aggregate::{clamp_score, mean};

/// Aptitude quiz outcome: three section percentages and their plain mean.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AptitudeResult {
    pub logical_reasoning: f64,
    pub numerical_ability: f64,
    pub domain_knowledge: f64,
    pub total_score: f64,
}

impl AptitudeResult {
    pub fn from_sections(logical_reasoning: f64, numerical_ability: f64, domain_knowledge: f64) -> Self {
        let logical_reasoning = clamp_score(logical_reasoning);
        let numerical_ability = clamp_score(numerical_ability);
        let domain_knowledge = clamp_score(domain_knowledge);
        Self {
            logical_reasoning,
            numerical_ability,
            domain_knowledge,
            total_score: clamp_score(mean([logical_reasoning, numerical_ability, domain_knowledge])),
        }
    }

    pub fn section(&self, section: AptitudeSection) -> f64 {
        match section {
            AptitudeSection::LogicalReasoning => self.logical_reasoning,
            AptitudeSection::NumericalAbility => self.numerical_ability,
            AptitudeSection::DomainKnowledge => self.domain_knowledge,
        }
    }
}

/// Percentage of a section's items answered correctly. The denominator is
/// every item in the section, so a skipped item costs the same as a wrong one.
pub fn score_section<I: GradedInstrument>(responses: &ResponseSet<I>, section: I::Category) -> f64 {
    let total = I::question_count(section);
    if total == 0 {
        return 0.0;
    }

    let key = I::category_key(section);
    let correct = (0..total)
        .filter(|index| {
            responses
                .get(&QuestionId::new(key, *index))
                .is_some_and(|given| I::is_correct(section, *index, given))
        })
        .count();

    clamp_score(correct as f64 / total as f64 * 100.0)
}

/// Grades the whole quiz. Callers run this on an explicit calculate action,
/// never per answer.
pub fn calculate(responses: &ResponseSet<AptitudeQuiz>) -> AptitudeResult {
    let result = AptitudeResult::from_sections(
        score_section(responses, AptitudeSection::LogicalReasoning),
        score_section(responses, AptitudeSection::NumericalAbility),
        score_section(responses, AptitudeSection::DomainKnowledge),
    );
    tracing::debug!(
        answered = responses.answered(),
        total_score = result.total_score,
        "aptitude quiz graded"
    );
    result
}
