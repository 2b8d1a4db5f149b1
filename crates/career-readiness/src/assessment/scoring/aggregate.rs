use super::super::domain::{Instrument, LikertInstrument, QuestionId, ResponseSet};

pub const SCORE_FLOOR: f64 = 0.0;
pub const SCORE_CEILING: f64 = 100.0;

/// A category and the questions that feed it, in content order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDefinition<C> {
    pub category: C,
    pub questions: Vec<QuestionId>,
}

impl<C: Copy> CategoryDefinition<C> {
    pub fn of<I>(category: C) -> Self
    where
        I: Instrument<Category = C>,
    {
        let key = I::category_key(category);
        let questions = (0..I::question_count(category))
            .map(|index| QuestionId::new(key, index))
            .collect();
        Self {
            category,
            questions,
        }
    }
}

/// Mean of the answered questions times `scale_multiplier`, clamped to
/// [0, 100]. Skipped questions are left out of the mean; a category with no
/// answers scores exactly 0.
pub fn aggregate<I: LikertInstrument>(
    definition: &CategoryDefinition<I::Category>,
    responses: &ResponseSet<I>,
    scale_multiplier: f64,
) -> f64 {
    let answered: Vec<f64> = definition
        .questions
        .iter()
        .filter_map(|question| responses.get(question))
        .collect();

    if answered.is_empty() {
        return 0.0;
    }

    clamp_score(mean(answered) * scale_multiplier)
}

pub(crate) fn clamp_score(value: f64) -> f64 {
    value.clamp(SCORE_FLOOR, SCORE_CEILING)
}

/// Arithmetic mean; 0 for an empty input.
pub(crate) fn mean<V>(values: V) -> f64
where
    V: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
