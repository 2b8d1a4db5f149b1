use serde::Serialize;

use super::domain::{
    AnswerSubmission, AnswerValue, AptitudeQuiz, InstrumentKind, InstrumentProgress,
    QuestionId, ReadinessSurvey, ResponseError, ResponseSet, TraitSurvey,
};
use super::scoring::{
    calculate_aptitude, score_readiness, score_traits, AptitudeResult, AssessmentScores,
    ReadinessScores, TraitScores,
};

/// In-progress answers for one candidate plus the scores shown so far.
///
/// Trait and readiness scores are refreshed after every answer. The aptitude
/// result only changes when [`AssessmentSession::calculate_aptitude`] runs.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentSession {
    traits: ResponseSet<TraitSurvey>,
    aptitude: ResponseSet<AptitudeQuiz>,
    readiness: ResponseSet<ReadinessSurvey>,
    trait_scores: TraitScores,
    aptitude_result: AptitudeResult,
    readiness_scores: ReadinessScores,
}

impl Default for AssessmentSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentSession {
    pub fn new() -> Self {
        let traits = ResponseSet::new();
        let readiness = ResponseSet::new();
        Self {
            trait_scores: score_traits(&traits),
            readiness_scores: score_readiness(&readiness),
            traits,
            aptitude: ResponseSet::new(),
            readiness,
            aptitude_result: AptitudeResult::default(),
        }
    }

    pub fn answer_trait(&mut self, question_id: &str, value: f64) -> Result<&TraitScores, ResponseError> {
        self.traits.record(question_id, value)?;
        self.trait_scores = score_traits(&self.traits);
        Ok(&self.trait_scores)
    }

    pub fn answer_readiness(
        &mut self,
        question_id: &str,
        value: f64,
    ) -> Result<&ReadinessScores, ResponseError> {
        self.readiness.record(question_id, value)?;
        self.readiness_scores = score_readiness(&self.readiness);
        Ok(&self.readiness_scores)
    }

    pub fn answer_aptitude(&mut self, question_id: &str, value: f64) -> Result<QuestionId, ResponseError> {
        self.aptitude.record(question_id, value)
    }

    /// Free-text entry; unparseable text leaves a numeric item unanswered and
    /// is rejected for multiple-choice items.
    pub fn enter_aptitude(&mut self, question_id: &str, raw: &str) -> Result<QuestionId, ResponseError> {
        self.aptitude.record_entry(question_id, raw)
    }

    /// Routes one client answer to its instrument and returns the instrument's
    /// state afterwards.
    pub fn apply(&mut self, answer: &AnswerSubmission) -> Result<InstrumentSnapshot, ResponseError> {
        let question_id = answer.question_id.as_str();
        match (answer.instrument, &answer.value) {
            (InstrumentKind::Psychometric, AnswerValue::Number(value)) => {
                self.answer_trait(question_id, *value)?;
            }
            (InstrumentKind::Wiscar, AnswerValue::Number(value)) => {
                self.answer_readiness(question_id, *value)?;
            }
            (InstrumentKind::Technical, AnswerValue::Number(value)) => {
                self.answer_aptitude(question_id, *value)?;
            }
            (InstrumentKind::Technical, AnswerValue::Entry(raw)) => {
                self.enter_aptitude(question_id, raw)?;
            }
            (InstrumentKind::Psychometric, AnswerValue::Entry(raw)) => {
                self.traits.record_entry(question_id, raw)?;
                self.trait_scores = score_traits(&self.traits);
            }
            (InstrumentKind::Wiscar, AnswerValue::Entry(raw)) => {
                self.readiness.record_entry(question_id, raw)?;
                self.readiness_scores = score_readiness(&self.readiness);
            }
        }
        Ok(self.snapshot(answer.instrument))
    }

    pub fn calculate_aptitude(&mut self) -> AptitudeResult {
        self.aptitude_result = calculate_aptitude(&self.aptitude);
        self.aptitude_result
    }

    pub fn trait_scores(&self) -> &TraitScores {
        &self.trait_scores
    }

    pub fn readiness_scores(&self) -> &ReadinessScores {
        &self.readiness_scores
    }

    /// Last calculated aptitude result, all zeros before the first calculation.
    pub fn aptitude_result(&self) -> AptitudeResult {
        self.aptitude_result
    }

    pub fn scores(&self) -> AssessmentScores {
        AssessmentScores {
            psychometric: self.trait_scores.clone(),
            technical: self.aptitude_result,
            wiscar: self.readiness_scores.clone(),
        }
    }

    pub fn is_submitted(&self) -> bool {
        self.traits.is_finalized() && self.aptitude.is_finalized() && self.readiness.is_finalized()
    }

    /// Locks all three response sets and returns the scores to persist.
    pub fn finalize(&mut self) -> AssessmentScores {
        self.traits.finalize();
        self.aptitude.finalize();
        self.readiness.finalize();
        self.scores()
    }

    /// Unlocks a session whose scores could not be saved.
    pub(crate) fn reopen(&mut self) {
        self.traits.reopen();
        self.aptitude.reopen();
        self.readiness.reopen();
    }

    pub fn progress(&self) -> [InstrumentProgress; 3] {
        [
            self.traits.progress(),
            self.aptitude.progress(),
            self.readiness.progress(),
        ]
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            scores: self.scores(),
            progress: self.progress(),
            submitted: self.is_submitted(),
        }
    }

    pub fn snapshot(&self, instrument: InstrumentKind) -> InstrumentSnapshot {
        match instrument {
            InstrumentKind::Psychometric => InstrumentSnapshot::Psychometric {
                scores: self.trait_scores.clone(),
                progress: self.traits.progress(),
            },
            InstrumentKind::Technical => InstrumentSnapshot::Technical {
                last_calculated: self.aptitude_result,
                progress: self.aptitude.progress(),
            },
            InstrumentKind::Wiscar => InstrumentSnapshot::Wiscar {
                scores: self.readiness_scores.clone(),
                progress: self.readiness.progress(),
            },
        }
    }
}

/// Live view of a whole session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub scores: AssessmentScores,
    pub progress: [InstrumentProgress; 3],
    pub submitted: bool,
}

/// Current state of one instrument after an answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "instrument", rename_all = "snake_case")]
pub enum InstrumentSnapshot {
    Psychometric {
        scores: TraitScores,
        progress: InstrumentProgress,
    },
    Technical {
        #[serde(rename = "lastCalculated")]
        last_calculated: AptitudeResult,
        progress: InstrumentProgress,
    },
    Wiscar {
        scores: ReadinessScores,
        progress: InstrumentProgress,
    },
}
