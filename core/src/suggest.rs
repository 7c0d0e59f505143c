use rand::{Rng, RngExt};

/// Uniform choice among `candidates`, `None` when the slice is empty.
///
/// The hint sequence of a whole game is reproducible from the engine seed
/// because this is the only place the engine consumes randomness.
pub fn choose<T: Copy, R: Rng + ?Sized>(rng: &mut R, candidates: &[T]) -> Option<T> {
    if candidates.is_empty() {
        None
    } else {
        Some(candidates[rng.random_range(0..candidates.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn empty_candidates_give_no_choice() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(choose::<u8, _>(&mut rng, &[]), None);
    }

    #[test]
    fn choice_always_comes_from_candidates() {
        let mut rng = SmallRng::seed_from_u64(2);
        let candidates = [3u8, 5, 7, 11];
        for _ in 0..100 {
            let picked = choose(&mut rng, &candidates).unwrap();
            assert!(candidates.contains(&picked));
        }
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let candidates: Vec<u16> = (0..100).collect();
        let mut a = SmallRng::seed_from_u64(42);
        let mut b = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(choose(&mut a, &candidates), choose(&mut b, &candidates));
        }
    }
}
