use std::collections::HashSet;

use rand::seq::IndexedRandom;
use rand::Rng;

/// Which questions a quiz round draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizScope {
    Any,
    Category(i64),
}

impl QuizScope {
    /// Category id 0 stands for every category.
    pub fn from_category_id(id: i64) -> Self {
        match id {
            0 => QuizScope::Any,
            id => QuizScope::Category(id),
        }
    }

    pub fn category(self) -> Option<i64> {
        match self {
            QuizScope::Any => None,
            QuizScope::Category(id) => Some(id),
        }
    }
}

/// Picks a candidate not in `previous` uniformly at random. `None` once every
/// candidate has been asked.
pub fn pick_unseen<R: Rng + ?Sized>(
    candidates: &[i64],
    previous: &[i64],
    rng: &mut R,
) -> Option<i64> {
    let seen: HashSet<i64> = previous.iter().copied().collect();
    let pool: Vec<i64> = candidates
        .iter()
        .copied()
        .filter(|id| !seen.contains(id))
        .collect();
    pool.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn never_repeats_previous_questions() {
        let mut rng = StdRng::seed_from_u64(7);
        let candidates: Vec<i64> = (1..=20).collect();
        let previous = vec![1, 2, 3, 5, 8, 13];
        for _ in 0..500 {
            let picked = pick_unseen(&candidates, &previous, &mut rng).unwrap();
            assert!(!previous.contains(&picked));
            assert!(candidates.contains(&picked));
        }
    }

    #[test]
    fn drains_the_pool_without_repetition() {
        let mut rng = StdRng::seed_from_u64(42);
        let candidates = vec![4, 9, 16, 25];
        let mut previous = Vec::new();
        while let Some(id) = pick_unseen(&candidates, &previous, &mut rng) {
            assert!(!previous.contains(&id));
            previous.push(id);
        }
        previous.sort();
        assert_eq!(previous, candidates);
    }

    #[test]
    fn exhausted_pool_yields_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_unseen(&[1, 2], &[2, 1, 99], &mut rng), None);
        assert_eq!(pick_unseen(&[], &[], &mut rng), None);
    }

    #[test]
    fn every_unseen_candidate_is_reachable() {
        let mut rng = StdRng::seed_from_u64(3);
        let candidates = vec![1, 2, 3, 4];
        let mut hits = HashSet::new();
        for _ in 0..200 {
            hits.insert(pick_unseen(&candidates, &[3], &mut rng).unwrap());
        }
        assert_eq!(hits, HashSet::from([1, 2, 4]));
    }

    #[test]
    fn zero_means_any_category() {
        assert_eq!(QuizScope::from_category_id(0), QuizScope::Any);
        assert_eq!(QuizScope::from_category_id(4).category(), Some(4));
        assert_eq!(QuizScope::Any.category(), None);
    }
}
