use serde::{Deserialize, Serialize};

pub const PROCEED_THRESHOLD: f64 = 70.0;
pub const CONDITIONAL_THRESHOLD: f64 = 40.0;

/// Career recommendation derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recommendation {
    Proceed,
    Conditional,
    NotRecommended,
}

impl Recommendation {
    /// Lower bounds are inclusive.
    pub fn classify(overall: f64) -> Self {
        if overall >= PROCEED_THRESHOLD {
            Recommendation::Proceed
        } else if overall >= CONDITIONAL_THRESHOLD {
            Recommendation::Conditional
        } else {
            Recommendation::NotRecommended
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Recommendation::Proceed => "proceed",
            Recommendation::Conditional => "conditional",
            Recommendation::NotRecommended => "not-recommended",
        }
    }

    pub const fn headline(self) -> &'static str {
        match self {
            Recommendation::Proceed => {
                "YES - You are well-suited for a career in waste management!"
            }
            Recommendation::Conditional => {
                "MAYBE - You have potential with some development needed."
            }
            Recommendation::NotRecommended => {
                "NO - Consider foundational learning before specializing."
            }
        }
    }

    pub const fn guidance(self) -> &'static str {
        match self {
            Recommendation::Proceed => {
                "You demonstrate strong alignment with waste management careers. Start targeted learning immediately!"
            }
            Recommendation::Conditional => {
                "You have potential but should focus on developing key skills and knowledge areas."
            }
            Recommendation::NotRecommended => {
                "Consider foundational studies in environmental science before specializing in waste management."
            }
        }
    }
}

/// Display band for any 0-100 percentage, on the same cut points as the
/// recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Strong,
    Developing,
    Low,
}

impl ScoreBand {
    pub fn from_percent(percent: f64) -> Self {
        match Recommendation::classify(percent) {
            Recommendation::Proceed => ScoreBand::Strong,
            Recommendation::Conditional => ScoreBand::Developing,
            Recommendation::NotRecommended => ScoreBand::Low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_use_inclusive_lower_bounds() {
        assert_eq!(Recommendation::classify(70.0), Recommendation::Proceed);
        assert_eq!(Recommendation::classify(69.999), Recommendation::Conditional);
        assert_eq!(Recommendation::classify(40.0), Recommendation::Conditional);
        assert_eq!(Recommendation::classify(39.999), Recommendation::NotRecommended);
    }

    #[test]
    fn extremes_still_get_a_label() {
        assert_eq!(Recommendation::classify(100.0), Recommendation::Proceed);
        assert_eq!(Recommendation::classify(0.0), Recommendation::NotRecommended);
    }

    #[test]
    fn labels_serialize_in_kebab_case() {
        let json = serde_json::to_string(&Recommendation::NotRecommended).expect("serializes");
        assert_eq!(json, "\"not-recommended\"");
        assert_eq!(Recommendation::NotRecommended.label(), "not-recommended");
    }

    #[test]
    fn bands_follow_recommendation_cut_points() {
        assert_eq!(ScoreBand::from_percent(70.0), ScoreBand::Strong);
        assert_eq!(ScoreBand::from_percent(55.0), ScoreBand::Developing);
        assert_eq!(ScoreBand::from_percent(12.0), ScoreBand::Low);
    }
}
