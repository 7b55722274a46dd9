use crate::utils::error::{RentError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffles `0..n` with a seeded RNG and splits off `test_size` of it.
/// Returns `(train, test)` index sets.
pub fn train_test_split(n: usize, test_size: f64, seed: u64) -> Result<(Vec<usize>, Vec<usize>)> {
    if !(0.0..1.0).contains(&test_size) {
        return Err(RentError::training(format!(
            "test_size must be in [0, 1), got {}",
            test_size
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = (n as f64 * test_size).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(RentError::training(format!(
            "{} rows cannot be split into non-empty train and test sets",
            n
        )));
    }

    let train = indices.split_off(n_test);
    Ok((train, indices))
}

/// Contiguous, unshuffled folds; the first `n % k` folds take one extra row.
pub fn k_fold_indices(n: usize, k: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
    if k < 2 || n < k {
        return Err(RentError::training(format!(
            "{}-fold cross-validation needs at least {} rows, got {}",
            k, k, n
        )));
    }

    let mut folds = Vec::with_capacity(k);
    let mut start = 0;
    for fold in 0..k {
        let size = n / k + usize::from(fold < n % k);
        let end = start + size;
        let test: Vec<usize> = (start..end).collect();
        let train: Vec<usize> = (0..start).chain(end..n).collect();
        folds.push((train, test));
        start = end;
    }
    Ok(folds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes_and_disjointness() {
        let (train, test) = train_test_split(200, 0.2, 42).unwrap();
        assert_eq!(train.len(), 160);
        assert_eq!(test.len(), 40);

        let mut all: Vec<usize> = train.iter().chain(&test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..200).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_is_seeded() {
        assert_eq!(
            train_test_split(50, 0.2, 42).unwrap(),
            train_test_split(50, 0.2, 42).unwrap()
        );
        assert_ne!(
            train_test_split(50, 0.2, 42).unwrap(),
            train_test_split(50, 0.2, 43).unwrap()
        );
    }

    #[test]
    fn test_split_rejects_tiny_inputs() {
        assert!(train_test_split(1, 0.2, 42).is_err());
        assert!(train_test_split(10, 1.5, 42).is_err());
    }

    #[test]
    fn test_k_fold_covers_every_row_once() {
        let folds = k_fold_indices(12, 5).unwrap();
        let sizes: Vec<usize> = folds.iter().map(|(_, test)| test.len()).collect();
        assert_eq!(sizes, vec![3, 3, 2, 2, 2]);
        assert_eq!(folds[1].1, vec![3, 4, 5]);
        assert_eq!(folds[1].0.len(), 9);
        assert!(k_fold_indices(3, 5).is_err());
    }
}
