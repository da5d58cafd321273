//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Quiz question selection. The candidate set is narrowed to questions that have not been asked
// yet and a single uniform sample is drawn from what is left.
//--------------------------------------------------------------------------------------------------

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::models::types::Question;

/// Category id that selects questions from every category.
pub const ALL_CATEGORIES: i64 = 0;

/// Outcome of picking the next quiz question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPick {
    /// An unseen question drawn from the candidate set.
    Next(Question),
    /// Every candidate has already been asked.
    Exhausted,
}

/// Picks a random candidate whose id is not in `previous`.
///
/// The caller is responsible for rejecting an empty candidate set; an empty
/// input here reads as exhausted.
pub fn pick_next_question<R: Rng + ?Sized>(
    candidates: Vec<Question>,
    previous: &HashSet<i64>,
    rng: &mut R,
) -> QuizPick {
    let eligible: Vec<Question> = candidates
        .into_iter()
        .filter(|question| !previous.contains(&question.id))
        .collect();

    match eligible.choose(rng) {
        Some(question) => QuizPick::Next(question.clone()),
        None => QuizPick::Exhausted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn question(id: i64, category: i64) -> Question {
        Question {
            id,
            question: format!("Question {}", id),
            answer: format!("Answer {}", id),
            category,
            difficulty: 1,
        }
    }

    #[test]
    fn test_never_returns_previous_question() {
        let mut rng = StdRng::seed_from_u64(42);
        let previous: HashSet<i64> = [1, 2, 3, 4].into_iter().collect();

        for _ in 0..200 {
            let candidates = (1..=5).map(|id| question(id, 1)).collect();
            match pick_next_question(candidates, &previous, &mut rng) {
                QuizPick::Next(q) => assert_eq!(q.id, 5),
                QuizPick::Exhausted => panic!("one candidate is still unseen"),
            }
        }
    }

    #[test]
    fn test_exhausted_when_all_seen() {
        let mut rng = StdRng::seed_from_u64(7);
        let previous: HashSet<i64> = [1, 2].into_iter().collect();
        let candidates = vec![question(1, 2), question(2, 2)];

        assert_eq!(
            pick_next_question(candidates, &previous, &mut rng),
            QuizPick::Exhausted
        );
    }

    #[test]
    fn test_previous_ids_outside_candidates_are_ignored() {
        // Ids from another category do not count towards exhaustion.
        let mut rng = StdRng::seed_from_u64(1);
        let previous: HashSet<i64> = [10, 11].into_iter().collect();
        let candidates = vec![question(1, 3), question(2, 3)];

        assert!(matches!(
            pick_next_question(candidates, &previous, &mut rng),
            QuizPick::Next(_)
        ));
    }

    #[test]
    fn test_samples_every_eligible_candidate() {
        let mut rng = StdRng::seed_from_u64(99);
        let previous = HashSet::new();
        let mut seen = HashSet::new();

        for _ in 0..500 {
            let candidates = (1..=4).map(|id| question(id, 1)).collect();
            if let QuizPick::Next(q) = pick_next_question(candidates, &previous, &mut rng) {
                seen.insert(q.id);
            }
        }

        assert_eq!(seen, (1..=4).collect::<HashSet<_>>());
    }
}
