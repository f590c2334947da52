/// Log-spaced recording steps for a drift simulation.
///
/// Voter Model observables relax over many orders of magnitude in time,
/// so sample points are spread geometrically between one generation
/// (J steps) and the end of the run (T * J steps), rounded to whole
/// steps and deduplicated. Step 0 (the initial state) is always included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSchedule {
    individuals: usize,
    steps: Vec<u64>,
}

impl SampleSchedule {
    /// Build a schedule of at most `num_points` log-spaced sample steps
    /// for a run of `generations` generations over `individuals` (J)
    /// individuals.
    pub fn log_spaced(individuals: usize, generations: u64, num_points: usize) -> Self {
        assert!(individuals > 0, "need at least one individual");
        assert!(generations > 0, "need at least one generation");
        assert!(num_points > 0, "need at least one sample point");

        let total = generations * individuals as u64;
        let log_start = (individuals as f64).ln();
        let log_end = (total as f64).ln();

        let mut steps = vec![0];
        for i in 0..num_points {
            let frac = if num_points == 1 {
                1.0
            } else {
                i as f64 / (num_points - 1) as f64
            };
            let value = (log_start + frac * (log_end - log_start)).exp().round() as u64;
            steps.push(value.min(total));
        }
        steps.dedup();

        Self { individuals, steps }
    }

    /// Number of individuals (J) the schedule was built for.
    pub fn individuals(&self) -> usize {
        self.individuals
    }

    /// Recording steps in ascending order, starting at 0.
    pub fn steps(&self) -> &[u64] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The last step of the run (T * J).
    pub fn total_steps(&self) -> u64 {
        *self.steps.last().unwrap()
    }

    /// Convert an absolute step to generations, t / J.
    pub fn generation(&self, step: u64) -> f64 {
        step as f64 / self.individuals as f64
    }

    /// All sample points in generations.
    pub fn generations(&self) -> Vec<f64> {
        self.steps.iter().map(|&s| self.generation(s)).collect()
    }
}
