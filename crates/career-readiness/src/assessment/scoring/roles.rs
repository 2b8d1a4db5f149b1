use serde::Serialize;

use super::super::domain::{AptitudeSection, ReadinessDimension, TraitCategory};
use super::aggregate::{SCORE_CEILING, SCORE_FLOOR};
use super::overall::trait_percent;
use super::recommendation::ScoreBand;
use super::AssessmentScores;

/// Where a role draws one of its two percentages from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreSource {
    /// Trait category, converted from 1-5 to a percentage.
    Trait(TraitCategory),
    Aptitude(AptitudeSection),
    AptitudeTotal,
    Readiness(ReadinessDimension),
}

impl ScoreSource {
    pub fn percent(self, scores: &AssessmentScores) -> f64 {
        match self {
            ScoreSource::Trait(category) => {
                trait_percent(scores.psychometric.get(&category).copied().unwrap_or(0.0))
            }
            ScoreSource::Aptitude(section) => scores.technical.section(section),
            ScoreSource::AptitudeTotal => scores.technical.total_score,
            ScoreSource::Readiness(dimension) => {
                scores.wiscar.get(&dimension).copied().unwrap_or(0.0)
            }
        }
    }
}

/// A career role with a fixed pair of contributing scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CareerRole {
    pub title: &'static str,
    pub description: &'static str,
    pub skills: &'static [&'static str],
    pub sources: [ScoreSource; 2],
}

pub const CAREER_ROLES: [CareerRole; 4] = [
    CareerRole {
        title: "Waste Management Specialist",
        description: "Oversee waste collection and processing systems",
        skills: &["Waste segregation", "Regulations", "Data analysis"],
        sources: [
            ScoreSource::AptitudeTotal,
            ScoreSource::Readiness(ReadinessDimension::Skill),
        ],
    },
    CareerRole {
        title: "Recycling Coordinator",
        description: "Manage recycling programs and community outreach",
        skills: &["Public engagement", "Logistics", "Program management"],
        sources: [
            ScoreSource::Trait(TraitCategory::Agreeableness),
            ScoreSource::Readiness(ReadinessDimension::RealWorldAlignment),
        ],
    },
    CareerRole {
        title: "Environmental Compliance Officer",
        description: "Ensure adherence to environmental laws",
        skills: &["Law knowledge", "Inspection", "Reporting"],
        sources: [
            ScoreSource::Trait(TraitCategory::Conscientiousness),
            ScoreSource::Aptitude(AptitudeSection::DomainKnowledge),
        ],
    },
    CareerRole {
        title: "Sustainability Consultant",
        description: "Advise companies on waste reduction & green policies",
        skills: &["Consulting", "Policy", "Data analysis"],
        sources: [
            ScoreSource::Readiness(ReadinessDimension::CognitiveReadiness),
            ScoreSource::Trait(TraitCategory::Openness),
        ],
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleMatch {
    pub title: &'static str,
    pub description: &'static str,
    pub skills: &'static [&'static str],
    #[serde(rename = "match")]
    pub match_percent: u8,
    pub band: ScoreBand,
}

impl CareerRole {
    /// Rounded mean of the role's two percentages.
    pub fn match_against(&self, scores: &AssessmentScores) -> RoleMatch {
        let [first, second] = self.sources;
        let percent = ((first.percent(scores) + second.percent(scores)) / 2.0)
            .round()
            .clamp(SCORE_FLOOR, SCORE_CEILING);
        let match_percent = percent as u8;

        RoleMatch {
            title: self.title,
            description: self.description,
            skills: self.skills,
            match_percent,
            band: ScoreBand::from_percent(percent),
        }
    }
}

pub fn match_roles(scores: &AssessmentScores) -> Vec<RoleMatch> {
    CAREER_ROLES
        .iter()
        .map(|role| role.match_against(scores))
        .collect()
}
