use super::common::*;
use crate::assessment::domain::{
    AnswerValue, AptitudeQuiz, AptitudeSection, InstrumentKind, ReadinessDimension,
    ReadinessSurvey, ResponseSet, TraitCategory, TraitSurvey,
};
use crate::assessment::scoring::{
    calculate_aptitude, evaluate, match_roles, score_readiness, score_section, score_traits,
    AptitudeResult, AssessmentScores, Recommendation,
};

fn record_all<I: crate::assessment::domain::Instrument>(
    responses: &mut ResponseSet<I>,
    answers: Vec<crate::assessment::domain::AnswerSubmission>,
) {
    for answer in answers {
        let AnswerValue::Number(value) = answer.value else {
            panic!("fixture answers are numeric");
        };
        responses
            .record(&answer.question_id, value)
            .expect("fixture answer is valid");
    }
}

#[test]
fn maximum_likert_answers_reach_the_top_of_each_scale() {
    let mut traits = ResponseSet::<TraitSurvey>::new();
    record_all(&mut traits, uniform_trait_answers(5.0));
    let mut readiness = ResponseSet::<ReadinessSurvey>::new();
    record_all(&mut readiness, readiness_answers(&[5.0]));

    let trait_scores = score_traits(&traits);
    let readiness_scores = score_readiness(&readiness);

    assert_eq!(trait_scores.len(), TraitCategory::ALL.len());
    assert!(trait_scores.values().all(|score| *score == 5.0));
    assert_eq!(readiness_scores.len(), ReadinessDimension::ALL.len());
    assert!(readiness_scores.values().all(|score| *score == 100.0));
}

#[test]
fn untouched_instruments_score_zero_everywhere() {
    let traits = score_traits(&ResponseSet::new());
    let readiness = score_readiness(&ResponseSet::new());
    let aptitude = calculate_aptitude(&ResponseSet::new());

    assert!(traits.values().all(|score| *score == 0.0));
    assert!(readiness.values().all(|score| *score == 0.0));
    assert_eq!(aptitude, AptitudeResult::default());

    let result = evaluate(&AssessmentScores {
        psychometric: traits,
        technical: aptitude,
        wiscar: readiness,
    });
    assert_eq!(result.overall_score, 0.0);
    assert_eq!(result.recommendation, Recommendation::NotRecommended);
}

#[test]
fn only_multiple_choice_answered_leaves_numerical_at_zero() {
    let mut responses = ResponseSet::<AptitudeQuiz>::new();
    record_all(&mut responses, correct_choice_answers());

    let result = calculate_aptitude(&responses);

    assert_eq!(result.logical_reasoning, 100.0);
    assert_eq!(result.numerical_ability, 0.0);
    assert_eq!(result.domain_knowledge, 100.0);
    assert!((result.total_score - 200.0 / 3.0).abs() < 1e-9);
}

#[test]
fn numeric_tolerance_boundary_is_inclusive() {
    let mut responses = ResponseSet::<AptitudeQuiz>::new();

    responses.record("numericalAbility_0", 185.0).expect("valid");
    assert_eq!(score_section(&responses, AptitudeSection::NumericalAbility), 50.0);

    responses.record("numericalAbility_0", 175.0).expect("valid");
    assert_eq!(score_section(&responses, AptitudeSection::NumericalAbility), 50.0);

    responses.record("numericalAbility_0", 186.0).expect("valid");
    assert_eq!(score_section(&responses, AptitudeSection::NumericalAbility), 0.0);

    responses.record_entry("numericalAbility_1", " 33000 ").expect("valid");
    assert_eq!(score_section(&responses, AptitudeSection::NumericalAbility), 50.0);
}

#[test]
fn wrong_choice_costs_the_same_as_a_skip() {
    let mut answered_wrong = ResponseSet::<AptitudeQuiz>::new();
    answered_wrong.record("domainKnowledge_0", 0.0).expect("valid");
    answered_wrong.record("domainKnowledge_1", 1.0).expect("valid");

    let mut skipped = ResponseSet::<AptitudeQuiz>::new();
    skipped.record("domainKnowledge_1", 1.0).expect("valid");

    let expected = 100.0 / 3.0;
    assert!((score_section(&answered_wrong, AptitudeSection::DomainKnowledge) - expected).abs() < 1e-9);
    assert!((score_section(&skipped, AptitudeSection::DomainKnowledge) - expected).abs() < 1e-9);
}

#[test]
fn quiz_option_index_is_graded_not_averaged() {
    let mut responses = ResponseSet::<AptitudeQuiz>::new();
    responses.record("logicalReasoning_0", 3.0).expect("valid option");

    assert_eq!(score_section(&responses, AptitudeSection::LogicalReasoning), 0.0);
    assert_eq!(calculate_aptitude(&responses), AptitudeResult::default());

    responses.record("logicalReasoning_0", 1.0).expect("valid option");
    let one_of_three = 100.0 / 3.0;
    assert!((score_section(&responses, AptitudeSection::LogicalReasoning) - one_of_three).abs() < 1e-9);
}

#[test]
fn weighted_combination_matches_worked_example() {
    let mut scores = AssessmentScores::default();
    for category in TraitCategory::ALL {
        scores.psychometric.insert(category, 4.0);
    }
    scores.technical = AptitudeResult {
        logical_reasoning: 100.0,
        numerical_ability: 50.0,
        domain_knowledge: 90.0,
        total_score: 80.0,
    };
    for dimension in ReadinessDimension::ALL {
        scores.wiscar.insert(dimension, 75.0);
    }

    // 80 * 0.3 + 80 * 0.4 + 75 * 0.3
    let result = evaluate(&scores);
    assert!((result.overall_score - 78.5).abs() < 1e-9);
    assert_eq!(result.recommendation, Recommendation::Proceed);
}

#[test]
fn trait_scores_are_scaled_to_percent_exactly_once() {
    let mut scores = AssessmentScores::default();
    for category in TraitCategory::ALL {
        scores.psychometric.insert(category, 5.0);
    }

    // A second x20 would clamp the trait component at 100 for any score above 1.
    let full = evaluate(&scores).overall_score;
    assert!((full - 30.0).abs() < 1e-9);

    for category in TraitCategory::ALL {
        scores.psychometric.insert(category, 2.0);
    }
    let partial = evaluate(&scores).overall_score;
    assert!((partial - 12.0).abs() < 1e-9);
}

#[test]
fn evaluation_is_idempotent() {
    let mut scores = AssessmentScores::default();
    scores.psychometric.insert(TraitCategory::Motivation, 3.0);
    scores.technical = AptitudeResult::from_sections(33.0, 50.0, 66.0);
    scores.wiscar.insert(ReadinessDimension::Skill, 55.0);

    let first = evaluate(&scores);
    let second = evaluate(&first.scores);

    assert_eq!(first, second);
    assert_eq!(match_roles(&scores), match_roles(&first.scores));
}

#[test]
fn role_match_averages_its_two_sources() {
    let mut scores = AssessmentScores::default();
    scores.technical.total_score = 60.0;
    scores.wiscar.insert(ReadinessDimension::Skill, 80.0);

    let roles = match_roles(&scores);
    let specialist = roles
        .iter()
        .find(|role| role.title == "Waste Management Specialist")
        .expect("specialist role listed");
    assert_eq!(specialist.match_percent, 70);
}

#[test]
fn category_map_keys_serialize_in_camel_case() {
    let mut responses = ResponseSet::<ReadinessSurvey>::new();
    record_all(&mut responses, readiness_answers(&[4.0, 4.0, 4.0, 3.0]));
    let readiness = score_readiness(&responses);

    assert!(readiness.values().all(|score| *score == 75.0));

    let json = serde_json::to_value(&readiness).expect("serializes");
    assert_eq!(json["cognitiveReadiness"], 75.0);
    assert_eq!(json["realWorldAlignment"], 75.0);

    let kind = serde_json::to_value(InstrumentKind::Wiscar).expect("serializes");
    assert_eq!(kind, "wiscar");
}
