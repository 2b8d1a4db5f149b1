use serde::Serialize;

use super::domain::{AptitudeSection, ReadinessDimension, TraitCategory};
use super::scoring::{
    evaluate, match_roles, trait_percent, AssessmentScores, Recommendation, RoleMatch, ScoreBand,
};

/// One category as shown on the results page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScoreView {
    pub key: &'static str,
    pub title: &'static str,
    /// Score as stored (1-5 for trait categories, 0-100 otherwise).
    pub score: f64,
    pub percent: u8,
    pub band: ScoreBand,
}

impl CategoryScoreView {
    fn new(key: &'static str, title: &'static str, score: f64, percent: f64) -> Self {
        Self {
            key,
            title,
            score,
            percent: percent.round().clamp(0.0, 100.0) as u8,
            band: ScoreBand::from_percent(percent),
        }
    }
}

/// A level of the recommended learning path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStage {
    pub level: &'static str,
    pub topics: &'static [&'static str],
}

pub const LEARNING_PATH: [LearningStage; 3] = [
    LearningStage {
        level: "Beginner Level",
        topics: &[
            "Environmental science fundamentals",
            "Waste hierarchy concepts",
            "Basic recycling principles",
            "Sustainability introduction",
        ],
    },
    LearningStage {
        level: "Intermediate Level",
        topics: &[
            "Regulatory frameworks (EPA, RCRA)",
            "Waste processing technologies",
            "Environmental impact assessment",
            "Hazardous waste management",
        ],
    },
    LearningStage {
        level: "Job-Ready Level",
        topics: &[
            "Project management",
            "Data analytics & reporting",
            "Certified Waste Manager (CWM)",
            "Industry certifications",
        ],
    },
];

/// Everything the results page displays, recomputed from stored category
/// scores on every read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub overall_score: f64,
    pub overall_percent: u8,
    pub recommendation: Recommendation,
    pub headline: &'static str,
    pub guidance: &'static str,
    pub psychometric: Vec<CategoryScoreView>,
    pub technical: Vec<CategoryScoreView>,
    pub wiscar: Vec<CategoryScoreView>,
    pub roles: Vec<RoleMatch>,
    pub learning_path: &'static [LearningStage],
}

impl AssessmentReport {
    pub fn build(scores: &AssessmentScores) -> Self {
        let result = evaluate(scores);
        let recommendation = result.recommendation;

        let psychometric = TraitCategory::ALL
            .iter()
            .map(|category| {
                let score = scores.psychometric.get(category).copied().unwrap_or(0.0);
                CategoryScoreView::new(category.key(), category.title(), score, trait_percent(score))
            })
            .collect();

        let mut technical: Vec<CategoryScoreView> = AptitudeSection::ALL
            .iter()
            .map(|section| {
                let score = scores.technical.section(*section);
                CategoryScoreView::new(section.key(), section.title(), score, score)
            })
            .collect();
        technical.push(CategoryScoreView::new(
            "totalScore",
            "Overall Technical Score",
            scores.technical.total_score,
            scores.technical.total_score,
        ));

        let wiscar = ReadinessDimension::ALL
            .iter()
            .map(|dimension| {
                let score = scores.wiscar.get(dimension).copied().unwrap_or(0.0);
                CategoryScoreView::new(dimension.key(), dimension.title(), score, score)
            })
            .collect();

        Self {
            overall_score: result.overall_score,
            overall_percent: result.overall_score.round() as u8,
            recommendation,
            headline: recommendation.headline(),
            guidance: recommendation.guidance(),
            psychometric,
            technical,
            wiscar,
            roles: match_roles(scores),
            learning_path: &LEARNING_PATH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::scoring::AptitudeResult;

    #[test]
    fn trait_categories_display_as_percentages() {
        let mut scores = AssessmentScores::default();
        scores.psychometric.insert(TraitCategory::Openness, 3.5);

        let report = AssessmentReport::build(&scores);
        let openness = report
            .psychometric
            .iter()
            .find(|view| view.key == "openness")
            .expect("openness listed");
        assert_eq!(openness.score, 3.5);
        assert_eq!(openness.percent, 70);
        assert_eq!(openness.band, ScoreBand::Strong);
    }

    #[test]
    fn report_lists_all_categories_even_when_unscored() {
        let report = AssessmentReport::build(&AssessmentScores::default());
        assert_eq!(report.psychometric.len(), 6);
        assert_eq!(report.technical.len(), 4);
        assert_eq!(report.wiscar.len(), 6);
        assert_eq!(report.recommendation, Recommendation::NotRecommended);
        assert_eq!(report.overall_percent, 0);
        assert_eq!(report.learning_path.len(), 3);
    }

    #[test]
    fn narrative_follows_recommendation() {
        let mut scores = AssessmentScores::default();
        scores.technical = AptitudeResult::from_sections(100.0, 100.0, 100.0);
        for dimension in ReadinessDimension::ALL {
            scores.wiscar.insert(dimension, 100.0);
        }

        // 0 * 0.3 + 100 * 0.4 + 100 * 0.3 = 70
        let report = AssessmentReport::build(&scores);
        assert_eq!(report.recommendation, Recommendation::Proceed);
        assert!(report.headline.starts_with("YES"));
    }
}
