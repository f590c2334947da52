use std::fmt;
use std::ops::Deref;
use std::ops::DerefMut;

use crate::Community;
use crate::SPIDX;

/// Per-species abundance counts of a single sample.
///
/// Index i holds the number of individuals of species i; absent species
/// are stored as explicit zeros, so the vector length is the size of the
/// species pool, not the richness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbundanceVector(pub Vec<u32>);

impl Deref for AbundanceVector {
    type Target = [u32];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for AbundanceVector {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<u32>> for AbundanceVector {
    fn from(counts: Vec<u32>) -> Self {
        AbundanceVector(counts)
    }
}

impl From<&Community> for AbundanceVector {
    fn from(community: &Community) -> Self {
        AbundanceVector(community.counts().to_vec())
    }
}

impl AbundanceVector {
    /// Total number of individuals in the sample (J).
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&n| n as u64).sum()
    }

    /// Number of species with at least one individual.
    pub fn richness(&self) -> u32 {
        self.0.iter().filter(|&&n| n > 0).count() as u32
    }

    /// Iterate over present species as (species index, count).
    pub fn iter_present(&self) -> impl Iterator<Item = (SPIDX, u32)> + '_ {
        self.0.iter()
            .enumerate()
            .filter(|&(_, &n)| n > 0)
            .map(|(i, &n)| (i as SPIDX, n))
    }

    /// Relative abundances p_i = n_i / J for present species, dense over
    /// the species pool. Empty samples give all zeros.
    pub fn relative(&self) -> Vec<f64> {
        let total = self.total();
        if total == 0 {
            return vec![0.0; self.0.len()];
        }
        self.0.iter().map(|&n| n as f64 / total as f64).collect()
    }

    /// Nonzero counts sorted in descending order (rank abundance).
    pub fn ranked(&self) -> Vec<u32> {
        let mut ranks: Vec<u32> = self.0.iter().copied().filter(|&n| n > 0).collect();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        ranks
    }

    /// The count of the most abundant species, or 0 for an empty sample.
    pub fn dominant(&self) -> u32 {
        self.0.iter().copied().max().unwrap_or(0)
    }
}

impl fmt::Display for AbundanceVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranks = self.ranked();
        write!(f, "J={} S={} [", self.total(), self.richness())?;
        for (k, n) in ranks.iter().enumerate() {
            if k > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", n)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_and_richness() {
        let av = AbundanceVector::from(vec![3, 0, 1, 0, 2]);
        assert_eq!(av.total(), 6);
        assert_eq!(av.richness(), 3);
        assert_eq!(av.dominant(), 3);
    }

    #[test]
    fn test_ranked_descending() {
        let av = AbundanceVector::from(vec![1, 0, 5, 2, 0, 2]);
        assert_eq!(av.ranked(), vec![5, 2, 2, 1]);
    }

    #[test]
    fn test_relative_sums_to_one() {
        let av = AbundanceVector::from(vec![2, 2, 4]);
        let rel = av.relative();
        assert!((rel.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!((rel[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_sample() {
        let av = AbundanceVector::from(vec![0, 0, 0]);
        assert_eq!(av.total(), 0);
        assert_eq!(av.richness(), 0);
        assert!(av.ranked().is_empty());
        assert!(av.relative().iter().all(|&p| p == 0.0));
    }

    #[test]
    fn test_iter_present() {
        let av = AbundanceVector::from(vec![0, 4, 0, 1]);
        let present: Vec<_> = av.iter_present().collect();
        assert_eq!(present, vec![(1, 4), (3, 1)]);
    }
}
