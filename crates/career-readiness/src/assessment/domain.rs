use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

/// Stable question key of the form `{categoryKey}_{questionIndex}`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn new(category_key: &str, index: usize) -> Self {
        Self(format!("{category_key}_{index}"))
    }

    /// Splits the id into its category key and question index.
    pub fn split(&self) -> Option<(&str, usize)> {
        let (key, index) = self.0.rsplit_once('_')?;
        if key.is_empty() {
            return None;
        }
        let index = index.parse().ok()?;
        Some((key, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The three instruments a candidate completes, in the order they are taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentKind {
    Psychometric,
    Technical,
    Wiscar,
}

impl InstrumentKind {
    pub const ALL: [InstrumentKind; 3] = [
        InstrumentKind::Psychometric,
        InstrumentKind::Technical,
        InstrumentKind::Wiscar,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            InstrumentKind::Psychometric => "psychometric",
            InstrumentKind::Technical => "technical",
            InstrumentKind::Wiscar => "wiscar",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            InstrumentKind::Psychometric => "Psychometric Assessment",
            InstrumentKind::Technical => "Technical & Aptitude",
            InstrumentKind::Wiscar => "WISCAR Analysis",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a skipped question affects its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnansweredPolicy {
    /// Dropped from the category average.
    Excluded,
    /// Graded as a wrong answer.
    Incorrect,
}

/// How an instrument turns answers into category scores. Each rule fixes what
/// a skipped question means for that instrument.
pub trait ScoringRule {
    const UNANSWERED: UnansweredPolicy;
}

/// Category mean over the answered questions only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Averaged {}

/// Share of items matching the answer key, over every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Graded {}

impl ScoringRule for Averaged {
    const UNANSWERED: UnansweredPolicy = UnansweredPolicy::Excluded;
}

impl ScoringRule for Graded {
    const UNANSWERED: UnansweredPolicy = UnansweredPolicy::Incorrect;
}

/// Static description of an instrument: its categories, question counts, and
/// what counts as a valid answer. Implemented by the marker types below so a
/// [`ResponseSet`] can only be scored by the scorer written for it.
pub trait Instrument {
    type Category: Copy + Ord + fmt::Debug + Serialize + 'static;
    type Scoring: ScoringRule;

    const KIND: InstrumentKind;

    fn categories() -> &'static [Self::Category];

    fn category_key(category: Self::Category) -> &'static str;

    fn question_count(category: Self::Category) -> usize;

    /// Checks a value against the question's answer domain, returning a
    /// description of the domain on failure.
    fn accepts(category: Self::Category, index: usize, value: f64) -> Result<(), &'static str>;

    /// Whether text that does not parse as a number leaves this question
    /// unanswered. When false such text is rejected.
    fn skips_unreadable_entry(_category: Self::Category, _index: usize) -> bool {
        false
    }

    fn category_from_key(key: &str) -> Option<Self::Category> {
        Self::categories()
            .iter()
            .copied()
            .find(|category| Self::category_key(*category) == key)
    }

    fn total_questions() -> usize {
        Self::categories()
            .iter()
            .map(|category| Self::question_count(*category))
            .sum()
    }
}

/// Skip policy of an instrument, read from its scoring rule.
pub fn unanswered_policy<I: Instrument>() -> UnansweredPolicy {
    <I::Scoring as ScoringRule>::UNANSWERED
}

/// Likert instruments: category scores are the mean answer times a fixed
/// multiplier, and skipped questions are left out of the mean.
pub trait LikertInstrument: Instrument<Scoring = Averaged> {
    const SCALE_MULTIPLIER: f64;
}

/// Instruments graded against an answer key, where a skip scores as wrong.
pub trait GradedInstrument: Instrument<Scoring = Graded> {
    fn is_correct(category: Self::Category, index: usize, value: f64) -> bool;
}

/// Trait and interest Likert survey (1-5 agreement).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraitSurvey;

/// Aptitude quiz mixing multiple-choice and numeric items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AptitudeQuiz;

/// Six-dimension WISCAR readiness survey (1-5 frequency).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadinessSurvey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TraitCategory {
    Interest,
    Conscientiousness,
    Agreeableness,
    Openness,
    Motivation,
    Persistence,
}

impl TraitCategory {
    pub const ALL: [TraitCategory; 6] = [
        TraitCategory::Interest,
        TraitCategory::Conscientiousness,
        TraitCategory::Agreeableness,
        TraitCategory::Openness,
        TraitCategory::Motivation,
        TraitCategory::Persistence,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            TraitCategory::Interest => "interest",
            TraitCategory::Conscientiousness => "conscientiousness",
            TraitCategory::Agreeableness => "agreeableness",
            TraitCategory::Openness => "openness",
            TraitCategory::Motivation => "motivation",
            TraitCategory::Persistence => "persistence",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            TraitCategory::Interest => "Environmental Interest",
            TraitCategory::Conscientiousness => "Conscientiousness",
            TraitCategory::Agreeableness => "Teamwork & Communication",
            TraitCategory::Openness => "Openness to Learning",
            TraitCategory::Motivation => "Motivation",
            TraitCategory::Persistence => "Persistence & Grit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadinessDimension {
    Will,
    Interest,
    Skill,
    CognitiveReadiness,
    AbilityToLearn,
    RealWorldAlignment,
}

impl ReadinessDimension {
    pub const ALL: [ReadinessDimension; 6] = [
        ReadinessDimension::Will,
        ReadinessDimension::Interest,
        ReadinessDimension::Skill,
        ReadinessDimension::CognitiveReadiness,
        ReadinessDimension::AbilityToLearn,
        ReadinessDimension::RealWorldAlignment,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            ReadinessDimension::Will => "will",
            ReadinessDimension::Interest => "interest",
            ReadinessDimension::Skill => "skill",
            ReadinessDimension::CognitiveReadiness => "cognitiveReadiness",
            ReadinessDimension::AbilityToLearn => "abilityToLearn",
            ReadinessDimension::RealWorldAlignment => "realWorldAlignment",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            ReadinessDimension::Will => "Will - Inner Drive & Persistence",
            ReadinessDimension::Interest => "Interest - Genuine Curiosity & Engagement",
            ReadinessDimension::Skill => "Skill - Current Technical & Soft Skills",
            ReadinessDimension::CognitiveReadiness => {
                "Cognitive Readiness - Problem-Solving Ability"
            }
            ReadinessDimension::AbilityToLearn => "Ability to Learn - Adaptability & Growth",
            ReadinessDimension::RealWorldAlignment => "Real-World Alignment - Job Compatibility",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AptitudeSection {
    LogicalReasoning,
    NumericalAbility,
    DomainKnowledge,
}

impl AptitudeSection {
    pub const ALL: [AptitudeSection; 3] = [
        AptitudeSection::LogicalReasoning,
        AptitudeSection::NumericalAbility,
        AptitudeSection::DomainKnowledge,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            AptitudeSection::LogicalReasoning => "logicalReasoning",
            AptitudeSection::NumericalAbility => "numericalAbility",
            AptitudeSection::DomainKnowledge => "domainKnowledge",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            AptitudeSection::LogicalReasoning => "Logical Reasoning",
            AptitudeSection::NumericalAbility => "Numerical Ability",
            AptitudeSection::DomainKnowledge => "Domain Knowledge",
        }
    }
}

/// Per-instrument answers keyed by question id. A missing key means the
/// question was skipped, which is different from any recorded value.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSet<I: Instrument> {
    answers: BTreeMap<QuestionId, f64>,
    finalized: bool,
    instrument: PhantomData<I>,
}

impl<I: Instrument> Default for ResponseSet<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Instrument> ResponseSet<I> {
    pub fn new() -> Self {
        Self {
            answers: BTreeMap::new(),
            finalized: false,
            instrument: PhantomData,
        }
    }

    /// Sets or overwrites one answer after checking the id and value against
    /// the instrument content.
    pub fn record(&mut self, question_id: &str, value: f64) -> Result<QuestionId, ResponseError> {
        let id = self.resolve(question_id)?;
        let (category, index) = Self::locate(&id)?;

        if !value.is_finite() {
            tracing::warn!(
                instrument = I::KIND.label(),
                question = id.as_str(),
                "non-finite answer treated as unanswered"
            );
            self.answers.remove(&id);
            return Ok(id);
        }

        I::accepts(category, index, value).map_err(|expected| ResponseError::OutOfRange {
            question_id: id.0.clone(),
            value,
            expected,
        })?;

        self.answers.insert(id.clone(), value);
        Ok(id)
    }

    /// Records a free-text entry. Text that does not parse as a number leaves
    /// numeric-entry questions unanswered and is rejected everywhere else.
    pub fn record_entry(&mut self, question_id: &str, raw: &str) -> Result<QuestionId, ResponseError> {
        match raw.trim().parse::<f64>() {
            Ok(value) => self.record(question_id, value),
            Err(_) => {
                let id = self.resolve(question_id)?;
                let (category, index) = Self::locate(&id)?;
                if !I::skips_unreadable_entry(category, index) {
                    return Err(ResponseError::UnreadableEntry {
                        question_id: id.0,
                        entry: raw.to_string(),
                    });
                }
                tracing::warn!(
                    instrument = I::KIND.label(),
                    question = id.as_str(),
                    "unparseable entry treated as unanswered"
                );
                self.answers.remove(&id);
                Ok(id)
            }
        }
    }

    pub fn get(&self, question_id: &QuestionId) -> Option<f64> {
        self.answers.get(question_id).copied()
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, f64)> {
        self.answers.iter().map(|(id, value)| (id, *value))
    }

    /// Locks the set once its instrument is submitted.
    pub fn finalize(&mut self) {
        self.finalized = true;
    }

    pub(crate) fn reopen(&mut self) {
        self.finalized = false;
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn progress(&self) -> InstrumentProgress {
        InstrumentProgress {
            instrument: I::KIND,
            answered: self.answered(),
            total: I::total_questions(),
            unanswered: unanswered_policy::<I>(),
        }
    }

    fn resolve(&self, question_id: &str) -> Result<QuestionId, ResponseError> {
        if self.finalized {
            return Err(ResponseError::Finalized(I::KIND));
        }
        Ok(QuestionId(question_id.trim().to_string()))
    }

    fn locate(id: &QuestionId) -> Result<(I::Category, usize), ResponseError> {
        let (key, index) = id
            .split()
            .ok_or_else(|| ResponseError::MalformedQuestionId(id.0.clone()))?;
        let category = I::category_from_key(key).ok_or_else(|| ResponseError::UnknownCategory {
            instrument: I::KIND,
            category: key.to_string(),
        })?;
        if index >= I::question_count(category) {
            return Err(ResponseError::UnknownQuestion {
                instrument: I::KIND,
                question_id: id.0.clone(),
            });
        }
        Ok((category, index))
    }
}

/// Answered and total question counts for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentProgress {
    pub instrument: InstrumentKind,
    pub answered: usize,
    pub total: usize,
    pub unanswered: UnansweredPolicy,
}

/// One answer update arriving from a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    pub instrument: InstrumentKind,
    pub question_id: String,
    pub value: AnswerValue,
}

/// Numeric answers arrive as numbers; free-text numeric entries arrive as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Entry(String),
}

/// Rejections raised at the answer input boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResponseError {
    #[error("question id '{0}' must look like '<category>_<index>'")]
    MalformedQuestionId(String),
    #[error("{instrument} has no category '{category}'")]
    UnknownCategory {
        instrument: InstrumentKind,
        category: String,
    },
    #[error("{instrument} has no question '{question_id}'")]
    UnknownQuestion {
        instrument: InstrumentKind,
        question_id: String,
    },
    #[error("answer {value} to '{question_id}' must be {expected}")]
    OutOfRange {
        question_id: String,
        value: f64,
        expected: &'static str,
    },
    #[error("'{entry}' is not a valid answer to '{question_id}'")]
    UnreadableEntry { question_id: String, entry: String },
    #[error("{0} answers were already submitted")]
    Finalized(InstrumentKind),
}
