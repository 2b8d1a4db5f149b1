use crate::infra::InMemoryAssessmentStore;
use career_readiness::assessment::{
    question_bank, AnswerSubmission, AnswerValue, AssessmentReport, AssessmentScores,
    AssessmentService, AssessmentServiceError, CategoryScoreView, InstrumentKind, SessionId,
};
use career_readiness::error::AppError;
use chrono::Local;
use clap::{Args, ValueEnum};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding psychometric, technical, and wiscar category scores
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Which scripted candidate to run through the assessment
    #[arg(long, value_enum, default_value_t = DemoProfile::Borderline)]
    pub(crate) profile: DemoProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum DemoProfile {
    Strong,
    #[default]
    Borderline,
    Emerging,
}

impl DemoProfile {
    fn likert_pattern(self) -> &'static [f64] {
        match self {
            DemoProfile::Strong => &[5.0, 4.0, 5.0],
            DemoProfile::Borderline => &[3.0, 4.0, 3.0],
            DemoProfile::Emerging => &[2.0, 3.0, 2.0],
        }
    }

    /// Quiz answers as typed into the form; unlisted questions are skipped.
    fn quiz_entries(self) -> &'static [(&'static str, &'static str)] {
        match self {
            DemoProfile::Strong => &[
                ("logicalReasoning_0", "1"),
                ("logicalReasoning_1", "2"),
                ("logicalReasoning_2", "1"),
                ("numericalAbility_0", "180"),
                ("numericalAbility_1", "34000"),
                ("domainKnowledge_0", "1"),
                ("domainKnowledge_1", "1"),
                ("domainKnowledge_2", "1"),
            ],
            DemoProfile::Borderline => &[
                ("logicalReasoning_0", "1"),
                ("logicalReasoning_1", "2"),
                ("logicalReasoning_2", "0"),
                ("numericalAbility_0", "183"),
                ("numericalAbility_1", "30000"),
                ("domainKnowledge_0", "1"),
                ("domainKnowledge_1", "0"),
            ],
            DemoProfile::Emerging => &[
                ("logicalReasoning_0", "0"),
                ("numericalAbility_0", "about 200"),
                ("domainKnowledge_0", "1"),
            ],
        }
    }
}

fn scripted_answers(profile: DemoProfile) -> Vec<AnswerSubmission> {
    let pattern = profile.likert_pattern();
    let mut answers = Vec::new();

    for instrument in question_bank() {
        if instrument.instrument == InstrumentKind::Technical {
            continue;
        }
        for (position, question) in instrument.questions.iter().enumerate() {
            answers.push(AnswerSubmission {
                instrument: instrument.instrument,
                question_id: question.question_id.to_string(),
                value: AnswerValue::Number(pattern[position % pattern.len()]),
            });
        }
    }

    answers.extend(
        profile
            .quiz_entries()
            .iter()
            .map(|(question_id, raw)| AnswerSubmission {
                instrument: InstrumentKind::Technical,
                question_id: (*question_id).to_string(),
                value: AnswerValue::Entry((*raw).to_string()),
            }),
    );
    answers
}

fn run_session(profile: DemoProfile) -> Result<AssessmentReport, AssessmentServiceError> {
    let service = AssessmentService::new(Arc::new(InMemoryAssessmentStore::default()));
    let session = SessionId::primary();

    let answers = scripted_answers(profile);
    for answer in &answers {
        service.record_answer(&session, answer)?;
    }
    println!("- Recorded {} answers for session '{}'", answers.len(), session);

    let aptitude = service.calculate_aptitude(&session)?;
    println!(
        "- Quiz graded: logical {:.0}% | numerical {:.0}% | domain {:.0}%",
        aptitude.logical_reasoning, aptitude.numerical_ability, aptitude.domain_knowledge
    );

    let submitted = service.submit(&session)?;
    println!(
        "- Submitted: overall {:.1} -> {}",
        submitted.overall_score,
        submitted.recommendation.label()
    );

    service.results(&session)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!(
        "Career readiness demo ({:?} candidate) - {}",
        args.profile,
        Local::now().format("%Y-%m-%d %H:%M")
    );

    let report = run_session(args.profile)?;
    println!();
    render_report(&report);
    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = fs::read_to_string(&args.input)?;
    let scores: AssessmentScores = serde_json::from_str(&raw)?;
    let report = AssessmentReport::build(&scores);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report);
    }
    Ok(())
}

pub(crate) fn run_questions() {
    for instrument in question_bank() {
        println!(
            "{} ({} questions, unanswered items {:?})",
            instrument.title,
            instrument.questions.len(),
            instrument.unanswered
        );
        if !instrument.scale.is_empty() {
            println!("  Scale: {}", instrument.scale.join(" | "));
        }
        for question in &instrument.questions {
            println!("  {:<22} {}", question.question_id.as_str(), question.prompt);
            for (index, option) in question.options.iter().enumerate() {
                println!("  {:<22}   [{index}] {option}", "");
            }
        }
        println!();
    }
}

fn render_report(report: &AssessmentReport) {
    println!(
        "Overall readiness: {}% ({:.2})",
        report.overall_percent, report.overall_score
    );
    println!("{}", report.headline);
    println!("  {}", report.guidance);

    render_section("Psychometric fit", &report.psychometric);
    render_section("Technical aptitude", &report.technical);
    render_section("WISCAR readiness", &report.wiscar);

    println!("\nCareer role matches");
    for role in &report.roles {
        println!(
            "  - {}: {}% ({:?}) | {}",
            role.title,
            role.match_percent,
            role.band,
            role.skills.join(", ")
        );
    }

    println!("\nLearning path");
    for stage in report.learning_path {
        println!("  {}: {}", stage.level, stage.topics.join("; "));
    }
}

fn render_section(title: &str, categories: &[CategoryScoreView]) {
    println!("\n{title}");
    for category in categories {
        println!(
            "  - {:<28} {:>3}% ({:?})",
            category.title, category.percent, category.band
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use career_readiness::assessment::Recommendation;

    #[test]
    fn scripted_profiles_land_in_each_recommendation() {
        let strong = run_session(DemoProfile::Strong).expect("strong session runs");
        assert_eq!(strong.recommendation, Recommendation::Proceed);

        let borderline = run_session(DemoProfile::Borderline).expect("borderline session runs");
        assert_eq!(borderline.recommendation, Recommendation::Conditional);

        let emerging = run_session(DemoProfile::Emerging).expect("emerging session runs");
        assert_eq!(emerging.recommendation, Recommendation::NotRecommended);
    }

    #[test]
    fn scripted_answers_cover_both_likert_instruments() {
        let answers = scripted_answers(DemoProfile::Strong);
        let likert = answers
            .iter()
            .filter(|answer| answer.instrument != InstrumentKind::Technical)
            .count();
        assert_eq!(likert, 18 + 24);
        assert_eq!(answers.len(), likert + 8);
    }

    #[test]
    fn score_command_reads_saved_results() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("assessmentData.json");
        fs::write(
            &input,
            r#"{
                "psychometric": { "interest": 4.2, "openness": 3.8 },
                "technical": {
                    "logicalReasoning": 66.7,
                    "numericalAbility": 50,
                    "domainKnowledge": 100,
                    "totalScore": 72.2
                },
                "wiscar": { "will": 80, "skill": 60 },
                "overallScore": 12,
                "recommendation": "no"
            }"#,
        )
        .expect("write fixture");

        run_score(ScoreArgs { input, json: true }).expect("score command succeeds");
    }

    #[test]
    fn score_command_rejects_malformed_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("broken.json");
        fs::write(&input, "[1, 2").expect("write fixture");

        assert!(matches!(
            run_score(ScoreArgs { input, json: false }),
            Err(AppError::Decode(_))
        ));
    }
}
