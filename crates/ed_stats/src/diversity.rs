use std::fmt;
use ed_community::AbundanceVector;

/// Shannon entropy H = -sum p_i ln(p_i), in nats.
///
/// Empty samples have H = 0 by convention.
pub fn shannon(sample: &AbundanceVector) -> f64 {
    let total = sample.total();
    if total == 0 {
        return 0.0;
    }
    -sample.iter_present()
        .map(|(_, n)| {
            let p = n as f64 / total as f64;
            p * p.ln()
        })
        .sum::<f64>()
}

/// Gini-Simpson index 1 - sum p_i^2, the probability that two randomly
/// drawn individuals belong to different species.
pub fn simpson(sample: &AbundanceVector) -> f64 {
    let total = sample.total();
    if total == 0 {
        return 0.0;
    }
    1.0 - sample.iter_present()
        .map(|(_, n)| {
            let p = n as f64 / total as f64;
            p * p
        })
        .sum::<f64>()
}

/// Berger-Parker dominance: the relative abundance of the most abundant
/// species.
pub fn berger_parker(sample: &AbundanceVector) -> f64 {
    let total = sample.total();
    if total == 0 {
        return 0.0;
    }
    sample.dominant() as f64 / total as f64
}

/// Pielou evenness J' = H / ln(S). Defined as 0 when fewer than two
/// species are present.
pub fn pielou(sample: &AbundanceVector) -> f64 {
    let s = sample.richness();
    if s < 2 {
        return 0.0;
    }
    shannon(sample) / (s as f64).ln()
}

/// All per-sample summary statistics in one pass-friendly bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct DiversitySummary {
    pub individuals: u64,
    pub richness: u32,
    pub shannon: f64,
    pub simpson: f64,
    pub pielou: f64,
    pub berger_parker: f64,
}

impl DiversitySummary {
    pub fn of(sample: &AbundanceVector) -> Self {
        Self {
            individuals: sample.total(),
            richness: sample.richness(),
            shannon: shannon(sample),
            simpson: simpson(sample),
            pielou: pielou(sample),
            berger_parker: berger_parker(sample),
        }
    }

    /// Column header matching the `Display` row layout.
    pub fn header() -> String {
        format!("{:>10} {:>6} {:>9} {:>9} {:>9} {:>9}",
            "J", "S", "shannon", "simpson", "pielou", "dominance")
    }
}

impl fmt::Display for DiversitySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>10} {:>6} {:>9.4} {:>9.4} {:>9.4} {:>9.4}",
            self.individuals,
            self.richness,
            self.shannon,
            self.simpson,
            self.pielou,
            self.berger_parker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_uniform_is_ln_s() {
        let av = AbundanceVector::from(vec![5, 5, 5, 5]);
        assert!((shannon(&av) - 4.0f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_shannon_single_species_is_zero() {
        let av = AbundanceVector::from(vec![0, 9, 0]);
        assert_eq!(shannon(&av), 0.0);
    }

    #[test]
    fn test_simpson_two_even_species() {
        // p = (1/2, 1/2): 1 - 2*(1/4) = 1/2
        let av = AbundanceVector::from(vec![4, 4]);
        assert!((simpson(&av) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_berger_parker() {
        let av = AbundanceVector::from(vec![6, 2, 2]);
        assert!((berger_parker(&av) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_pielou_even_sample_is_one() {
        let av = AbundanceVector::from(vec![3, 3, 3]);
        assert!((pielou(&av) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_sample_all_zero() {
        let av = AbundanceVector::from(vec![0, 0]);
        let summary = DiversitySummary::of(&av);
        assert_eq!(summary.individuals, 0);
        assert_eq!(summary.richness, 0);
        assert_eq!(summary.shannon, 0.0);
        assert_eq!(summary.simpson, 0.0);
        assert_eq!(summary.pielou, 0.0);
        assert_eq!(summary.berger_parker, 0.0);
    }
}
