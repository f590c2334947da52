use std::fmt;
use rand::Rng;

use crate::AbundanceVector;
use crate::CommunityError;
use crate::SPIDX;

/// A fixed-size population of individuals, each carrying a species label
/// from a pool of `species_pool` possible species.
///
/// This is the state a drift simulation mutates in place. Per-species
/// counts and the richness (number of species with nonzero count) are
/// maintained incrementally, so sampling an observable never requires a
/// pass over all individuals.
///
/// # Invariants
/// - every label is `< species_pool`
/// - `counts` sums to `len()`
/// - `richness` equals the number of nonzero entries of `counts`
#[derive(Debug, Clone)]
pub struct Community {
    labels: Vec<SPIDX>,
    counts: Vec<u32>,
    richness: u32,
}

impl Community {
    /// Assign each of `j` individuals a uniform random label from a pool
    /// of `s` species.
    pub fn random<R: Rng + ?Sized>(s: SPIDX, j: usize, rng: &mut R) -> Self {
        let labels: Vec<SPIDX> = (0..j).map(|_| rng.random_range(0..s)).collect();
        Self::from_labels(labels, s).expect("random labels are always in range")
    }

    /// Build a community from explicit per-individual labels, e.g. an
    /// initial condition read from a file or drawn from a log-series.
    pub fn from_labels(labels: Vec<SPIDX>, s: SPIDX) -> Result<Self, CommunityError> {
        if labels.is_empty() {
            return Err(CommunityError::EmptyCommunity);
        }
        let mut counts = vec![0u32; s as usize];
        for (i, &label) in labels.iter().enumerate() {
            if label >= s {
                return Err(CommunityError::LabelOutOfRange {
                    individual: i,
                    label,
                    species_pool: s,
                });
            }
            counts[label as usize] += 1;
        }
        let richness = counts.iter().filter(|&&n| n > 0).count() as u32;
        Ok(Self { labels, counts, richness })
    }

    /// Number of individuals (J).
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Size of the species pool (S).
    pub fn species_pool(&self) -> SPIDX {
        self.counts.len() as SPIDX
    }

    /// The label of individual `i`.
    pub fn label(&self, i: usize) -> SPIDX {
        self.labels[i]
    }

    /// Dense per-species counts.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Number of distinct species currently present.
    pub fn richness(&self) -> u32 {
        self.richness
    }

    /// Individual `i` drops its label and takes on `label` instead,
    /// updating counts and richness in O(1).
    pub fn adopt(&mut self, i: usize, label: SPIDX) {
        let old = self.labels[i];
        if old == label {
            return;
        }
        self.counts[old as usize] -= 1;
        if self.counts[old as usize] == 0 {
            self.richness -= 1;
        }
        if self.counts[label as usize] == 0 {
            self.richness += 1;
        }
        self.counts[label as usize] += 1;
        self.labels[i] = label;
    }

    /// Snapshot the current per-species counts.
    pub fn abundance(&self) -> AbundanceVector {
        AbundanceVector::from(self)
    }
}

impl fmt::Display for Community {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Community(J={}, S={}, richness={})",
            self.len(), self.species_pool(), self.richness())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_from_labels_counts() {
        let c = Community::from_labels(vec![0, 2, 2, 1, 2], 4).unwrap();
        assert_eq!(c.len(), 5);
        assert_eq!(c.species_pool(), 4);
        assert_eq!(c.counts(), &[1, 1, 3, 0]);
        assert_eq!(c.richness(), 3);
    }

    #[test]
    fn test_from_labels_rejects_out_of_range() {
        let res = Community::from_labels(vec![0, 5], 3);
        assert!(matches!(res,
            Err(CommunityError::LabelOutOfRange { individual: 1, label: 5, species_pool: 3 })));
    }

    #[test]
    fn test_from_labels_rejects_empty() {
        assert!(matches!(Community::from_labels(vec![], 3),
            Err(CommunityError::EmptyCommunity)));
    }

    #[test]
    fn test_adopt_updates_richness() {
        let mut c = Community::from_labels(vec![0, 1, 1], 3).unwrap();
        assert_eq!(c.richness(), 2);

        // last individual of species 0 switches away
        c.adopt(0, 1);
        assert_eq!(c.counts(), &[0, 3, 0]);
        assert_eq!(c.richness(), 1);

        // speciation into an unseen species
        c.adopt(2, 2);
        assert_eq!(c.counts(), &[0, 2, 1]);
        assert_eq!(c.richness(), 2);

        // a self-copy is a no-op
        c.adopt(2, 2);
        assert_eq!(c.counts(), &[0, 2, 1]);
        assert_eq!(c.richness(), 2);
    }

    #[test]
    fn test_random_invariants() {
        let mut rng = StdRng::seed_from_u64(7);
        let c = Community::random(10, 200, &mut rng);
        assert_eq!(c.len(), 200);
        assert_eq!(c.counts().iter().sum::<u32>(), 200);
        let nonzero = c.counts().iter().filter(|&&n| n > 0).count() as u32;
        assert_eq!(c.richness(), nonzero);
    }

    #[test]
    fn test_abundance_snapshot() {
        let c = Community::from_labels(vec![1, 1, 0], 3).unwrap();
        let av = c.abundance();
        assert_eq!(&*av, &[1, 2, 0]);
        assert_eq!(av.total(), 3);
    }
}
