use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use quiz_core::model::{CategoryFilter, Question};

/// Selection result for a quiz build.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizPlan {
    pub questions: Vec<Question>,
    /// Distinct questions that matched the filter before truncation.
    pub available: usize,
}

impl QuizPlan {
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Draws a randomized, de-duplicated sample of questions from the bank.
pub struct QuizBuilder<'a> {
    bank: &'a [Question],
    sample_size: usize,
}

impl<'a> QuizBuilder<'a> {
    pub const DEFAULT_SAMPLE_SIZE: usize = 10;

    #[must_use]
    pub fn new(bank: &'a [Question]) -> Self {
        Self {
            bank,
            sample_size: Self::DEFAULT_SAMPLE_SIZE,
        }
    }

    #[must_use]
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Build a plan for `filter`.
    ///
    /// - Questions are filtered by category (`All` keeps everything).
    /// - Repeated ids keep their first occurrence.
    /// - The survivors are shuffled uniformly, then truncated to the sample size.
    pub fn build<R: Rng + ?Sized>(self, filter: CategoryFilter, rng: &mut R) -> QuizPlan {
        let mut seen = HashSet::new();
        let mut candidates: Vec<Question> = self
            .bank
            .iter()
            .filter(|q| filter.matches(q.category()))
            .filter(|q| seen.insert(q.id()))
            .cloned()
            .collect();

        let available = candidates.len();
        candidates.as_mut_slice().shuffle(rng);
        candidates.truncate(self.sample_size);

        QuizPlan {
            questions: candidates,
            available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Category, QuestionId};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn question(id: u64, category: Category) -> Question {
        Question::new(
            QuestionId::new(id),
            category,
            format!("Q{id}"),
            vec!["a".into(), "b".into(), "c".into()],
            0,
            "",
        )
        .unwrap()
    }

    fn bank() -> Vec<Question> {
        let mut bank = Vec::new();
        for id in 1..=12 {
            bank.push(question(id, Category::Journal));
        }
        for id in 13..=15 {
            bank.push(question(id, Category::Term));
        }
        bank.push(question(16, Category::Financial));
        bank
    }

    #[test]
    fn all_filter_caps_at_sample_size() {
        let bank = bank();
        let mut rng = StdRng::seed_from_u64(7);
        let plan = QuizBuilder::new(&bank).build(CategoryFilter::All, &mut rng);

        assert_eq!(plan.total(), 10);
        assert_eq!(plan.available, 16);
    }

    #[test]
    fn category_filter_keeps_only_matching_questions() {
        let bank = bank();
        let mut rng = StdRng::seed_from_u64(7);
        let plan = QuizBuilder::new(&bank).build(CategoryFilter::Only(Category::Term), &mut rng);

        assert_eq!(plan.total(), 3);
        assert!(plan.questions.iter().all(|q| q.category() == Category::Term));
    }

    #[test]
    fn length_is_min_of_sample_and_matches_for_every_filter() {
        let bank = bank();
        let filters = [
            (CategoryFilter::All, 16),
            (CategoryFilter::Only(Category::Journal), 12),
            (CategoryFilter::Only(Category::Term), 3),
            (CategoryFilter::Only(Category::Financial), 1),
            (CategoryFilter::Only(Category::Calculation), 0),
        ];
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            for (filter, matching) in filters {
                let plan = QuizBuilder::new(&bank).build(filter, &mut rng);
                assert_eq!(plan.total(), matching.min(10));

                let ids: HashSet<_> = plan.questions.iter().map(Question::id).collect();
                assert_eq!(ids.len(), plan.total());
            }
        }
    }

    #[test]
    fn duplicate_ids_are_drawn_once() {
        let mut bank = vec![question(1, Category::Journal); 5];
        bank.push(question(2, Category::Journal));
        let mut rng = StdRng::seed_from_u64(1);

        let plan = QuizBuilder::new(&bank).build(CategoryFilter::All, &mut rng);

        assert_eq!(plan.available, 2);
        assert_eq!(plan.total(), 2);
    }

    #[test]
    fn empty_match_yields_empty_plan() {
        let bank = bank();
        let mut rng = StdRng::seed_from_u64(3);
        let plan =
            QuizBuilder::new(&bank).build(CategoryFilter::Only(Category::Calculation), &mut rng);
        assert!(plan.is_empty());
    }

    #[test]
    fn shuffle_varies_order_across_seeds() {
        let bank = bank();
        let orders: HashSet<Vec<QuestionId>> = (0..10)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                QuizBuilder::new(&bank)
                    .build(CategoryFilter::Only(Category::Journal), &mut rng)
                    .questions
                    .iter()
                    .map(Question::id)
                    .collect()
            })
            .collect();
        assert!(orders.len() > 1);
    }

    #[test]
    fn custom_sample_size_is_honored() {
        let bank = bank();
        let mut rng = StdRng::seed_from_u64(11);
        let plan = QuizBuilder::new(&bank)
            .with_sample_size(4)
            .build(CategoryFilter::All, &mut rng);
        assert_eq!(plan.total(), 4);
    }
}
