use ed_community::AbundanceVector;

use crate::StatsError;

/// Expected richness of a uniform subsample of `m` individuals drawn
/// without replacement from `sample` (hypergeometric rarefaction).
///
/// E[S_m] = sum_i (1 - C(J - n_i, m) / C(J, m)). The binomial ratio is
/// evaluated as a product in log space, so large counts never overflow.
pub fn expected_richness(sample: &AbundanceVector, m: u64) -> Result<f64, StatsError> {
    let total = sample.total();
    if m > total {
        return Err(StatsError::SubsampleTooLarge { m, total });
    }
    if m == 0 {
        return Ok(0.0);
    }

    let mut expected = 0.0;
    for (_, n) in sample.iter_present() {
        let remaining = total - n as u64;
        if remaining < m {
            // fewer than m individuals of other species, so species i
            // appears in every subsample
            expected += 1.0;
            continue;
        }
        // ln P(absent) = sum_k ln((J - n - k) / (J - k))
        let mut log_p_absent = 0.0;
        for k in 0..m {
            log_p_absent += ((remaining - k) as f64).ln() - ((total - k) as f64).ln();
        }
        expected += 1.0 - log_p_absent.exp();
    }
    Ok(expected)
}

/// Rarefaction curve: expected richness at `points` evenly spaced
/// subsample sizes from 0 to the sample total (inclusive).
pub fn rarefaction_curve(
    sample: &AbundanceVector,
    points: usize,
) -> Result<Vec<(u64, f64)>, StatsError> {
    let total = sample.total();
    let mut curve = Vec::with_capacity(points + 1);
    for i in 0..=points {
        let m = (total as f64 * i as f64 / points.max(1) as f64).round() as u64;
        curve.push((m, expected_richness(sample, m)?));
    }
    curve.dedup_by_key(|&mut (m, _)| m);
    Ok(curve)
}
