use ed_community::AbundanceVector;

/// Rank-abundance distribution: nonzero counts sorted descending, so
/// index 0 is the most abundant species.
pub fn rank_abundance(sample: &AbundanceVector) -> Vec<u32> {
    sample.ranked()
}

/// Rank-abundance distribution as relative abundances.
pub fn relative_rank_abundance(sample: &AbundanceVector) -> Vec<f64> {
    let total = sample.total();
    if total == 0 {
        return Vec::new();
    }
    sample.ranked()
        .into_iter()
        .map(|n| n as f64 / total as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_abundance_sorted() {
        let av = AbundanceVector::from(vec![2, 0, 7, 1]);
        assert_eq!(rank_abundance(&av), vec![7, 2, 1]);
    }

    #[test]
    fn test_relative_ranks() {
        let av = AbundanceVector::from(vec![1, 3]);
        let rel = relative_rank_abundance(&av);
        assert_eq!(rel.len(), 2);
        assert!((rel[0] - 0.75).abs() < 1e-12);
        assert!((rel[1] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_empty_sample() {
        let av = AbundanceVector::from(vec![0, 0]);
        assert!(rank_abundance(&av).is_empty());
        assert!(relative_rank_abundance(&av).is_empty());
    }
}
