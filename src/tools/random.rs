//! Random number generator tool.

use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RandomError {
    #[error("min ({min}) must not exceed max ({max})")]
    InvalidRange { min: i64, max: i64 },
}

/// Uniform integer in the inclusive range `[min, max]`.
///
/// # Errors
///
/// Returns [`RandomError::InvalidRange`] when `min > max`.
pub fn random_in_range(min: i64, max: i64) -> Result<i64, RandomError> {
    random_with(&mut rand::rng(), min, max)
}

/// Same as [`random_in_range`] with a caller-supplied generator.
///
/// # Errors
///
/// Returns [`RandomError::InvalidRange`] when `min > max`.
pub fn random_with<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> Result<i64, RandomError> {
    if min > max {
        return Err(RandomError::InvalidRange { min, max });
    }
    Ok(rng.random_range(min..=max))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn stays_within_inclusive_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let n = random_with(&mut rng, -3, 3).unwrap();
            assert!((-3..=3).contains(&n));
        }
    }

    #[test]
    fn both_ends_are_reachable() {
        let mut rng = StdRng::seed_from_u64(11);
        let seen: Vec<i64> = (0..500).map(|_| random_with(&mut rng, 1, 2).unwrap()).collect();
        assert!(seen.contains(&1));
        assert!(seen.contains(&2));
    }

    #[test]
    fn degenerate_range_returns_the_bound() {
        assert_eq!(random_in_range(5, 5).unwrap(), 5);
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert_eq!(random_in_range(10, 1), Err(RandomError::InvalidRange { min: 10, max: 1 }));
    }
}
