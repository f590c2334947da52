use log::debug;
use rand::Rng;
use rand::distr::Distribution;

use ed_community::AbundanceVector;
use ed_community::SPIDX;

use crate::StatsError;

/// Truncated logarithmic-series distribution over abundances 1..=max.
///
/// The classic Fisher log-series is the stationary species abundance
/// distribution of neutral community models. Its PMF is
///
///   p(k) = -theta^k / (k ln(1 - theta)),  k = 1, 2, ...
///
/// truncated at `max_abundance` and renormalized over the kept support.
#[derive(Debug, Clone)]
pub struct LogSeries {
    theta: f64,
    pmf: Vec<f64>,
    cdf: Vec<f64>,
}

impl LogSeries {
    pub fn new(theta: f64, max_abundance: u32) -> Result<Self, StatsError> {
        if !(0.0 < theta && theta < 1.0) {
            return Err(StatsError::ThetaOutOfRange(theta));
        }
        if max_abundance == 0 {
            return Err(StatsError::EmptyDistribution);
        }

        let norm = -(1.0 - theta).ln();
        let mut pmf = Vec::with_capacity(max_abundance as usize);
        let mut theta_k = 1.0;
        for k in 1..=max_abundance {
            theta_k *= theta;
            pmf.push(theta_k / (k as f64 * norm));
        }
        let mass: f64 = pmf.iter().sum();
        debug!("Log-series theta={}, support 1..={}, truncated mass={:.6}",
            theta, max_abundance, mass);
        for p in pmf.iter_mut() {
            *p /= mass;
        }

        let mut cdf = Vec::with_capacity(pmf.len());
        let mut acc = 0.0;
        for &p in &pmf {
            acc += p;
            cdf.push(acc);
        }
        // guard against roundoff at the tail
        if let Some(last) = cdf.last_mut() {
            *last = 1.0;
        }

        Ok(Self { theta, pmf, cdf })
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn max_abundance(&self) -> u32 {
        self.pmf.len() as u32
    }

    /// P(abundance = k) for k in 1..=max_abundance, 0 outside.
    pub fn pmf(&self, k: u32) -> f64 {
        if k == 0 || k > self.max_abundance() {
            return 0.0;
        }
        self.pmf[(k - 1) as usize]
    }

    /// Mean abundance under the truncated distribution.
    pub fn mean(&self) -> f64 {
        self.pmf.iter()
            .enumerate()
            .map(|(i, &p)| (i + 1) as f64 * p)
            .sum()
    }

    /// Draw an abundance for each of `s` species.
    pub fn sample_community<R: Rng + ?Sized>(&self, s: SPIDX, rng: &mut R) -> AbundanceVector {
        let counts: Vec<u32> = (0..s).map(|_| self.sample(rng)).collect();
        AbundanceVector::from(counts)
    }
}

impl Distribution<u32> for LogSeries {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let u: f64 = rng.random();
        // first index with cdf >= u; cdf ends at exactly 1.0
        let idx = self.cdf.partition_point(|&c| c < u);
        (idx as u32 + 1).min(self.max_abundance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_theta_validation() {
        assert!(matches!(LogSeries::new(0.0, 100), Err(StatsError::ThetaOutOfRange(_))));
        assert!(matches!(LogSeries::new(1.0, 100), Err(StatsError::ThetaOutOfRange(_))));
        assert!(matches!(LogSeries::new(-0.5, 100), Err(StatsError::ThetaOutOfRange(_))));
        assert!(LogSeries::new(0.99, 100).is_ok());
    }

    #[test]
    fn test_empty_support_rejected() {
        assert!(matches!(LogSeries::new(0.5, 0), Err(StatsError::EmptyDistribution)));
    }

    #[test]
    fn test_pmf_normalized_and_decreasing() {
        let dist = LogSeries::new(0.9, 1000).unwrap();
        let mass: f64 = (1..=1000).map(|k| dist.pmf(k)).sum();
        assert!((mass - 1.0).abs() < 1e-12);
        // log-series PMF decreases monotonically in k
        for k in 1..1000 {
            assert!(dist.pmf(k) > dist.pmf(k + 1));
        }
        assert_eq!(dist.pmf(0), 0.0);
        assert_eq!(dist.pmf(1001), 0.0);
    }

    #[test]
    fn test_samples_within_support() {
        let dist = LogSeries::new(0.99, 50).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let k: u32 = dist.sample(&mut rng);
            assert!((1..=50).contains(&k));
        }
    }

    #[test]
    fn test_sample_mean_tracks_distribution_mean() {
        let dist = LogSeries::new(0.95, 200).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20_000;
        let sum: u64 = (0..n).map(|_| dist.sample(&mut rng) as u64).sum();
        let sample_mean = sum as f64 / n as f64;
        assert!((sample_mean - dist.mean()).abs() < 0.1 * dist.mean());
    }

    #[test]
    fn test_sample_community_shape() {
        let dist = LogSeries::new(0.9, 100).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let av = dist.sample_community(30, &mut rng);
        assert_eq!(av.len(), 30);
        // every species draws at least one individual
        assert_eq!(av.richness(), 30);
    }
}
