//! Question banks and answer keys for the three instruments.
//!
//! Category membership comes from here and nowhere else: a question belongs to
//! a category because it is listed under it, and `QuestionId`s are derived
//! from a category key plus the question's position in its list.

use serde::Serialize;

use super::domain::{
    unanswered_policy, AptitudeQuiz, AptitudeSection, Averaged, Graded, GradedInstrument,
    Instrument, InstrumentKind, LikertInstrument, QuestionId, ReadinessDimension,
    ReadinessSurvey, TraitCategory, TraitSurvey, UnansweredPolicy,
};
use super::scoring::{READINESS_SCALE_MULTIPLIER, TRAIT_SCALE_MULTIPLIER};

pub const AGREEMENT_SCALE: [&str; 5] = [
    "Strongly Disagree",
    "Disagree",
    "Neutral",
    "Agree",
    "Strongly Agree",
];

pub const FREQUENCY_SCALE: [&str; 5] = ["Never", "Rarely", "Sometimes", "Often", "Always"];

pub fn trait_prompts(category: TraitCategory) -> &'static [&'static str] {
    match category {
        TraitCategory::Interest => &[
            "I am passionate about solving environmental waste challenges",
            "I find recycling and waste reduction personally fulfilling",
            "I stay updated on environmental regulations and policies",
        ],
        TraitCategory::Conscientiousness => &[
            "I pay close attention to detail in my work",
            "I prefer clearly defined procedures over ambiguous situations",
            "I complete tasks thoroughly even when no one is checking",
        ],
        TraitCategory::Agreeableness => &[
            "I work well with diverse teams and stakeholders",
            "I can explain complex environmental concepts to non-experts",
            "I enjoy collaborating on sustainability initiatives",
        ],
        TraitCategory::Openness => &[
            "I embrace new waste management technologies and methods",
            "I enjoy learning about innovative environmental solutions",
            "I adapt quickly to changing regulations and standards",
        ],
        TraitCategory::Motivation => &[
            "Making a positive environmental impact motivates me more than salary",
            "I would work in waste management even if it's not glamorous",
            "I see waste reduction as crucial for future generations",
        ],
        TraitCategory::Persistence => &[
            "I persist through challenges to complete long-term projects",
            "I maintain focus on environmental goals despite setbacks",
            "I continue learning even when topics are difficult",
        ],
    }
}

pub fn readiness_prompts(dimension: ReadinessDimension) -> &'static [&'static str] {
    match dimension {
        ReadinessDimension::Will => &[
            "I persist through environmental challenges even when progress is slow",
            "I maintain motivation to work on waste reduction projects long-term",
            "I take initiative to improve waste management processes without being asked",
            "I stay committed to sustainability goals despite obstacles",
        ],
        ReadinessDimension::Interest => &[
            "I actively seek out information about new waste management technologies",
            "I find myself discussing environmental issues in my free time",
            "I am curious about the environmental impact of everyday decisions",
            "I enjoy learning about circular economy principles",
        ],
        ReadinessDimension::Skill => &[
            "I can analyze waste stream data and identify improvement opportunities",
            "I effectively communicate environmental concepts to different audiences",
            "I understand basic environmental regulations and compliance requirements",
            "I can organize and manage waste reduction projects",
        ],
        ReadinessDimension::CognitiveReadiness => &[
            "I can quickly identify root causes of waste management problems",
            "I think systematically about complex environmental systems",
            "I can balance multiple factors when making waste management decisions",
            "I adapt my thinking when new environmental information becomes available",
        ],
        ReadinessDimension::AbilityToLearn => &[
            "I quickly grasp new environmental concepts and technologies",
            "I actively seek feedback to improve my environmental knowledge",
            "I learn from failed sustainability initiatives to improve future efforts",
            "I embrace changes in environmental regulations and standards",
        ],
        ReadinessDimension::RealWorldAlignment => &[
            "I am comfortable working with waste materials and in industrial settings",
            "I can handle the administrative aspects of environmental compliance",
            "I work well with government agencies and regulatory bodies",
            "I am prepared for the physical and mental demands of waste management work",
        ],
    }
}

/// Correctness data for one aptitude item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnswerKey {
    /// Zero-based index of the correct option.
    Choice { correct: usize },
    /// Expected value with an inclusive absolute tolerance.
    Numeric { expected: f64, tolerance: f64 },
}

impl AnswerKey {
    pub fn accepts(&self, given: f64) -> bool {
        match *self {
            AnswerKey::Choice { correct } => given == correct as f64,
            AnswerKey::Numeric {
                expected,
                tolerance,
            } => (given - expected).abs() <= tolerance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AptitudeItem {
    pub prompt: &'static str,
    pub options: &'static [&'static str],
    pub key: AnswerKey,
}

static LOGICAL_ITEMS: [AptitudeItem; 3] = [
    AptitudeItem {
        prompt: "If Facility A processes 500 tons of waste daily and sends 30% to recycling, 20% to composting, and the rest to landfill, how many tons go to landfill?",
        options: &["150 tons", "250 tons", "300 tons", "350 tons"],
        key: AnswerKey::Choice { correct: 1 },
    },
    AptitudeItem {
        prompt: "What is the most appropriate disposal method for lithium batteries?",
        options: &[
            "Regular landfill",
            "Incineration",
            "Specialized recycling facility",
            "Composting",
        ],
        key: AnswerKey::Choice { correct: 2 },
    },
    AptitudeItem {
        prompt: "Which waste hierarchy principle should be prioritized first?",
        options: &["Recycle", "Reduce", "Reuse", "Recover"],
        key: AnswerKey::Choice { correct: 1 },
    },
];

static NUMERICAL_ITEMS: [AptitudeItem; 2] = [
    AptitudeItem {
        prompt: "A city generates 1,200 tons of waste per day. If the recycling rate increases from 25% to 40%, how many additional tons are diverted from landfill daily?",
        options: &[],
        key: AnswerKey::Numeric {
            expected: 180.0,
            tolerance: 5.0,
        },
    },
    AptitudeItem {
        prompt: "If hazardous waste disposal costs $800 per ton and regular waste costs $120 per ton, what's the cost difference for 50 tons of hazardous waste?",
        options: &[],
        key: AnswerKey::Numeric {
            expected: 34000.0,
            tolerance: 1000.0,
        },
    },
];

static DOMAIN_ITEMS: [AptitudeItem; 3] = [
    AptitudeItem {
        prompt: "Which EPA regulation primarily governs hazardous waste management?",
        options: &[
            "Clean Air Act",
            "Resource Conservation and Recovery Act (RCRA)",
            "Clean Water Act",
            "Safe Drinking Water Act",
        ],
        key: AnswerKey::Choice { correct: 1 },
    },
    AptitudeItem {
        prompt: "What does the term 'cradle-to-grave' mean in waste management?",
        options: &[
            "Product lifecycle assessment",
            "Waste tracking from generation to disposal",
            "Recycling process",
            "Composting timeline",
        ],
        key: AnswerKey::Choice { correct: 1 },
    },
    AptitudeItem {
        prompt: "Which material has the highest recycling rate in the US?",
        options: &[
            "Plastic bottles",
            "Aluminum cans",
            "Paper products",
            "Glass bottles",
        ],
        key: AnswerKey::Choice { correct: 1 },
    },
];

pub fn aptitude_items(section: AptitudeSection) -> &'static [AptitudeItem] {
    match section {
        AptitudeSection::LogicalReasoning => &LOGICAL_ITEMS,
        AptitudeSection::NumericalAbility => &NUMERICAL_ITEMS,
        AptitudeSection::DomainKnowledge => &DOMAIN_ITEMS,
    }
}

fn likert_point(value: f64) -> Result<(), &'static str> {
    if value.fract() == 0.0 && (1.0..=5.0).contains(&value) {
        Ok(())
    } else {
        Err("a whole Likert point between 1 and 5")
    }
}

impl Instrument for TraitSurvey {
    type Category = TraitCategory;
    type Scoring = Averaged;

    const KIND: InstrumentKind = InstrumentKind::Psychometric;

    fn categories() -> &'static [TraitCategory] {
        &TraitCategory::ALL
    }

    fn category_key(category: TraitCategory) -> &'static str {
        category.key()
    }

    fn question_count(category: TraitCategory) -> usize {
        trait_prompts(category).len()
    }

    fn accepts(_category: TraitCategory, _index: usize, value: f64) -> Result<(), &'static str> {
        likert_point(value)
    }
}

impl Instrument for ReadinessSurvey {
    type Category = ReadinessDimension;
    type Scoring = Averaged;

    const KIND: InstrumentKind = InstrumentKind::Wiscar;

    fn categories() -> &'static [ReadinessDimension] {
        &ReadinessDimension::ALL
    }

    fn category_key(category: ReadinessDimension) -> &'static str {
        category.key()
    }

    fn question_count(category: ReadinessDimension) -> usize {
        readiness_prompts(category).len()
    }

    fn accepts(
        _category: ReadinessDimension,
        _index: usize,
        value: f64,
    ) -> Result<(), &'static str> {
        likert_point(value)
    }
}

impl Instrument for AptitudeQuiz {
    type Category = AptitudeSection;
    type Scoring = Graded;

    const KIND: InstrumentKind = InstrumentKind::Technical;

    fn categories() -> &'static [AptitudeSection] {
        &AptitudeSection::ALL
    }

    fn category_key(category: AptitudeSection) -> &'static str {
        category.key()
    }

    fn question_count(category: AptitudeSection) -> usize {
        aptitude_items(category).len()
    }

    fn accepts(category: AptitudeSection, index: usize, value: f64) -> Result<(), &'static str> {
        let Some(item) = aptitude_items(category).get(index) else {
            return Err("an answer to an existing question");
        };
        match item.key {
            AnswerKey::Choice { .. } => {
                if value.fract() == 0.0 && value >= 0.0 && (value as usize) < item.options.len() {
                    Ok(())
                } else {
                    Err("the index of one of the listed options")
                }
            }
            AnswerKey::Numeric { .. } => Ok(()),
        }
    }

    fn skips_unreadable_entry(category: AptitudeSection, index: usize) -> bool {
        aptitude_items(category)
            .get(index)
            .is_some_and(|item| matches!(item.key, AnswerKey::Numeric { .. }))
    }
}

impl LikertInstrument for TraitSurvey {
    const SCALE_MULTIPLIER: f64 = TRAIT_SCALE_MULTIPLIER;
}

impl LikertInstrument for ReadinessSurvey {
    const SCALE_MULTIPLIER: f64 = READINESS_SCALE_MULTIPLIER;
}

impl GradedInstrument for AptitudeQuiz {
    fn is_correct(category: AptitudeSection, index: usize, value: f64) -> bool {
        aptitude_items(category)
            .get(index)
            .is_some_and(|item| item.key.accepts(value))
    }
}

/// Client-facing listing of one question. Answer keys are never included.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub question_id: QuestionId,
    pub category: &'static str,
    pub category_title: &'static str,
    pub prompt: &'static str,
    #[serde(skip_serializing_if = "has_no_options")]
    pub options: &'static [&'static str],
}

fn has_no_options(options: &&'static [&'static str]) -> bool {
    options.is_empty()
}

/// One instrument's questions in presentation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentView {
    pub instrument: InstrumentKind,
    pub title: &'static str,
    pub scale: &'static [&'static str],
    pub unanswered: UnansweredPolicy,
    pub questions: Vec<QuestionView>,
}

/// The full question bank across the three instruments.
pub fn question_bank() -> Vec<InstrumentView> {
    let psychometric = TraitCategory::ALL
        .iter()
        .flat_map(|category| {
            trait_prompts(*category)
                .iter()
                .enumerate()
                .map(move |(index, prompt)| QuestionView {
                    question_id: QuestionId::new(category.key(), index),
                    category: category.key(),
                    category_title: category.title(),
                    prompt: *prompt,
                    options: &[],
                })
        })
        .collect();

    let technical = AptitudeSection::ALL
        .iter()
        .flat_map(|section| {
            aptitude_items(*section)
                .iter()
                .enumerate()
                .map(move |(index, item)| QuestionView {
                    question_id: QuestionId::new(section.key(), index),
                    category: section.key(),
                    category_title: section.title(),
                    prompt: item.prompt,
                    options: item.options,
                })
        })
        .collect();

    let wiscar = ReadinessDimension::ALL
        .iter()
        .flat_map(|dimension| {
            readiness_prompts(*dimension)
                .iter()
                .enumerate()
                .map(move |(index, prompt)| QuestionView {
                    question_id: QuestionId::new(dimension.key(), index),
                    category: dimension.key(),
                    category_title: dimension.title(),
                    prompt: *prompt,
                    options: &[],
                })
        })
        .collect();

    vec![
        InstrumentView {
            instrument: InstrumentKind::Psychometric,
            title: InstrumentKind::Psychometric.title(),
            scale: &AGREEMENT_SCALE,
            unanswered: unanswered_policy::<TraitSurvey>(),
            questions: psychometric,
        },
        InstrumentView {
            instrument: InstrumentKind::Technical,
            title: InstrumentKind::Technical.title(),
            scale: &[],
            unanswered: unanswered_policy::<AptitudeQuiz>(),
            questions: technical,
        },
        InstrumentView {
            instrument: InstrumentKind::Wiscar,
            title: InstrumentKind::Wiscar.title(),
            scale: &FREQUENCY_SCALE,
            unanswered: unanswered_policy::<ReadinessSurvey>(),
            questions: wiscar,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_key_tolerance_is_inclusive() {
        let key = AnswerKey::Numeric {
            expected: 180.0,
            tolerance: 5.0,
        };
        assert!(key.accepts(185.0));
        assert!(key.accepts(175.0));
        assert!(!key.accepts(186.0));
        assert!(!key.accepts(174.0));
    }

    #[test]
    fn question_bank_lists_every_question_once() {
        let bank = question_bank();
        let counts: Vec<usize> = bank.iter().map(|view| view.questions.len()).collect();
        assert_eq!(counts, vec![18, 8, 24]);
        assert_eq!(bank[0].questions[0].question_id.as_str(), "interest_0");
        assert_eq!(
            bank[2].questions[23].question_id.as_str(),
            "realWorldAlignment_3"
        );
    }

    #[test]
    fn choice_items_reject_missing_options() {
        assert!(AptitudeQuiz::accepts(AptitudeSection::LogicalReasoning, 0, 3.0).is_ok());
        assert!(AptitudeQuiz::accepts(AptitudeSection::LogicalReasoning, 0, 4.0).is_err());
        assert!(AptitudeQuiz::accepts(AptitudeSection::DomainKnowledge, 2, -1.0).is_err());
        assert!(AptitudeQuiz::accepts(AptitudeSection::NumericalAbility, 1, -12.5).is_ok());
    }
}
