use std::fmt;
use std::error::Error;
use nohash_hasher::IntMap;

use ed_community::Community;
use ed_community::SPIDX;

use crate::SampleSchedule;

#[derive(Debug)]
pub enum TimelineError {
    Io(std::io::Error),
    Json(serde_json::Error),
    PointCountMismatch { found: usize, expected: usize },
    StepMismatch { file_step: u64, expected_step: u64 },
    SpeciesPoolMismatch { found: SPIDX, expected: SPIDX },
}

impl fmt::Display for TimelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Json(e) => write!(f, "JSON parse error: {}", e),
            Self::PointCountMismatch { found, expected } =>
                write!(f, "Timeline file has {found} sample points, expected {expected}"),
            Self::StepMismatch { file_step, expected_step } =>
                write!(f, "Sample step mismatch: {file_step} vs {expected_step}"),
            Self::SpeciesPoolMismatch { found, expected } =>
                write!(f, "Species pool mismatch: {found} vs {expected}"),
        }
    }
}

impl Error for TimelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TimelineError {
    fn from(e: std::io::Error) -> Self { Self::Io(e) }
}

impl From<serde_json::Error> for TimelineError {
    fn from(e: serde_json::Error) -> Self { Self::Json(e) }
}

/// One sample point with observations pooled over replicate runs.
#[derive(Debug)]
pub struct Timepoint {
    /// Absolute update step of this sample point
    pub step: u64,
    /// The same instant in generations (step / J)
    pub generation: f64,
    /// Mapping from species index → summed abundance across replicates
    pub ensemble: IntMap<SPIDX, u64>,
    /// Summed richness across replicates
    pub richness_sum: u64,
    /// Number of replicate runs that reached this sample point
    pub replicates: usize,
}

impl Timepoint {
    pub fn new(step: u64, generation: f64) -> Self {
        Self {
            step,
            generation,
            ensemble: IntMap::default(),
            richness_sum: 0,
            replicates: 0,
        }
    }

    /// Record one replicate's state at this sample point.
    pub fn record(&mut self, community: &Community) {
        for (sp, &n) in community.counts().iter().enumerate() {
            if n > 0 {
                *self.ensemble.entry(sp as SPIDX).or_insert(0) += n as u64;
            }
        }
        self.richness_sum += community.richness() as u64;
        self.replicates += 1;
    }

    /// Summed abundance of a species across replicates (0 if absent).
    pub fn count(&self, species: SPIDX) -> u64 {
        *self.ensemble.get(&species).unwrap_or(&0)
    }

    /// Mean richness over the replicates that reached this point.
    pub fn mean_richness(&self) -> f64 {
        if self.replicates == 0 {
            0.0
        } else {
            self.richness_sum as f64 / self.replicates as f64
        }
    }

    /// Mean abundance of a species over the replicates that reached
    /// this point.
    pub fn mean_abundance(&self, species: SPIDX) -> f64 {
        if self.replicates == 0 {
            0.0
        } else {
            self.count(species) as f64 / self.replicates as f64
        }
    }

    /// Fraction of all recorded individuals belonging to a species.
    pub fn occupancy(&self, species: SPIDX) -> f64 {
        let total: u64 = self.ensemble.values().sum();
        if total == 0 {
            0.0
        } else {
            self.count(species) as f64 / total as f64
        }
    }

    /// Iterate over all species with their summed abundance.
    pub fn iter(&self) -> impl Iterator<Item = (SPIDX, u64)> + '_ {
        self.ensemble.iter().map(|(k, v)| (*k, *v))
    }
}

/// Ensemble record of a drift experiment: one `Timepoint` per sample
/// step, pooled over replicate runs that share a schedule and pool size.
pub struct Timeline {
    /// Size of the species pool (S)
    pub species_pool: SPIDX,
    /// Number of individuals per replicate (J)
    pub individuals: usize,
    /// One `Timepoint` per sample step of the schedule
    pub points: Vec<Timepoint>,
}

impl Timeline {
    /// Build an empty timeline for the given schedule and species pool.
    pub fn new(schedule: &SampleSchedule, species_pool: SPIDX) -> Self {
        let points = schedule.steps().iter()
            .map(|&s| Timepoint::new(s, schedule.generation(s)))
            .collect();
        Self {
            species_pool,
            individuals: schedule.individuals(),
            points,
        }
    }

    /// Record a replicate's state at sample point `t_idx`.
    pub fn record(&mut self, t_idx: usize, community: &Community) {
        self.points[t_idx].record(community);
    }

    pub fn point(&self, t_idx: usize) -> &Timepoint {
        &self.points[t_idx]
    }

    /// Iterate over all sample points with their index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Timepoint)> {
        self.points.iter().enumerate()
    }

    /// Mean richness trajectory as (generation, mean richness), keeping
    /// only points at least one replicate reached.
    pub fn mean_richness(&self) -> Vec<(f64, f64)> {
        self.points.iter()
            .filter(|tp| tp.replicates > 0)
            .map(|tp| (tp.generation, tp.mean_richness()))
            .collect()
    }

    /// Mean abundance trajectory of one species as (generation, mean
    /// abundance), keeping only points at least one replicate reached.
    pub fn mean_abundance(&self, species: SPIDX) -> Vec<(f64, f64)> {
        self.points.iter()
            .filter(|tp| tp.replicates > 0)
            .map(|tp| (tp.generation, tp.mean_abundance(species)))
            .collect()
    }

    /// Species indices ranked by their peak summed abundance over the
    /// whole timeline, most abundant first.
    pub fn ranked_species(&self) -> Vec<SPIDX> {
        let mut peak: IntMap<SPIDX, u64> = IntMap::default();
        for tp in &self.points {
            for (sp, n) in tp.iter() {
                let entry = peak.entry(sp).or_insert(0);
                *entry = (*entry).max(n);
            }
        }
        let mut ranked: Vec<(SPIDX, u64)> = peak.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.into_iter().map(|(sp, _)| sp).collect()
    }

    pub fn merge(&mut self, other: Timeline) {
        assert_eq!(self.species_pool, other.species_pool,
            "Cannot merge timelines with different species pools");
        assert_eq!(self.individuals, other.individuals,
            "Cannot merge timelines with different population sizes");
        assert_eq!(self.points.len(), other.points.len(),
            "Cannot merge timelines with different numbers of sample points");

        for (self_tp, other_tp) in self.points.iter_mut().zip(other.points) {
            assert_eq!(self_tp.step, other_tp.step,
                "Cannot merge timelines with different sample schedules");
            for (sp, count) in other_tp.iter() {
                *self_tp.ensemble.entry(sp).or_insert(0) += count;
            }
            self_tp.richness_sum += other_tp.richness_sum;
            self_tp.replicates += other_tp.replicates;
        }
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>13} {:>12} {:>10} {:>13} {:>12}",
            "generation", "step", "runs", "richness", "dominance")?;
        for tp in self.points.iter().filter(|tp| tp.replicates > 0) {
            let dominant = tp.iter().map(|(_, n)| n).max().unwrap_or(0);
            let total: u64 = tp.ensemble.values().sum();
            let dominance = if total == 0 { 0.0 } else { dominant as f64 / total as f64 };
            writeln!(f, "{:13.4} {:>12} {:>10} {:13.4} {:12.6}",
                tp.generation,
                tp.step,
                tp.replicates,
                tp.mean_richness(),
                dominance,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed_community::Community;

    fn schedule() -> SampleSchedule {
        SampleSchedule::log_spaced(4, 4, 3)
    }

    #[test]
    fn test_record_and_means() {
        let mut timeline = Timeline::new(&schedule(), 3);
        let a = Community::from_labels(vec![0, 0, 1, 2], 3).unwrap();
        let b = Community::from_labels(vec![1, 1, 1, 1], 3).unwrap();

        timeline.record(0, &a);
        timeline.record(0, &b);

        let tp = timeline.point(0);
        assert_eq!(tp.replicates, 2);
        assert_eq!(tp.count(0), 2);
        assert_eq!(tp.count(1), 5);
        assert_eq!(tp.count(2), 1);
        assert!((tp.mean_richness() - 2.0).abs() < 1e-12);
        assert!((tp.occupancy(1) - 5.0 / 8.0).abs() < 1e-12);
        assert!((tp.mean_abundance(1) - 2.5).abs() < 1e-12);
        assert!((tp.mean_abundance(2) - 0.5).abs() < 1e-12);
        assert_eq!(tp.mean_abundance(9), 0.0);
    }

    #[test]
    fn test_mean_abundance_trajectory() {
        let mut timeline = Timeline::new(&schedule(), 3);
        let a = Community::from_labels(vec![1, 1, 1, 0], 3).unwrap();
        let b = Community::from_labels(vec![1, 0, 0, 0], 3).unwrap();

        timeline.record(0, &a);
        timeline.record(0, &b);
        timeline.record(1, &b);

        let trajectory = timeline.mean_abundance(1);
        assert_eq!(trajectory.len(), 2);
        assert_eq!(trajectory[0].0, 0.0);
        assert!((trajectory[0].1 - 2.0).abs() < 1e-12);
        assert!((trajectory[1].1 - 1.0).abs() < 1e-12);
        // unreached points report a zero mean
        assert_eq!(timeline.point(2).mean_abundance(1), 0.0);
    }

    #[test]
    fn test_unreached_points_are_skipped() {
        let mut timeline = Timeline::new(&schedule(), 3);
        let a = Community::from_labels(vec![0, 0, 0, 0], 3).unwrap();
        timeline.record(0, &a);

        assert_eq!(timeline.mean_richness().len(), 1);
        assert_eq!(timeline.point(1).replicates, 0);
        assert_eq!(timeline.point(1).mean_richness(), 0.0);
    }

    #[test]
    fn test_merge_sums_ensembles() {
        let mut left = Timeline::new(&schedule(), 3);
        let mut right = Timeline::new(&schedule(), 3);
        let a = Community::from_labels(vec![0, 1, 1, 2], 3).unwrap();
        let b = Community::from_labels(vec![2, 2, 2, 2], 3).unwrap();

        left.record(0, &a);
        right.record(0, &b);
        right.record(1, &b);
        left.merge(right);

        assert_eq!(left.point(0).replicates, 2);
        assert_eq!(left.point(0).count(2), 5);
        assert_eq!(left.point(0).richness_sum, 4);
        assert_eq!(left.point(1).replicates, 1);
    }

    #[test]
    #[should_panic]
    fn test_merge_rejects_mismatched_pool() {
        let mut left = Timeline::new(&schedule(), 3);
        let right = Timeline::new(&schedule(), 5);
        left.merge(right);
    }

    #[test]
    fn test_ranked_species() {
        let mut timeline = Timeline::new(&schedule(), 3);
        let a = Community::from_labels(vec![1, 1, 1, 0], 3).unwrap();
        timeline.record(0, &a);
        let ranked = timeline.ranked_species();
        assert_eq!(ranked, vec![1, 0]);
    }
}
