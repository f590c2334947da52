use clap::Args;
use anyhow::Result;
use anyhow::bail;
use rand::SeedableRng;
use rand::rngs::StdRng;

use ed_community::Community;
use ed_community::SPIDX;
use ed_drift::SampleSchedule;

#[derive(Debug, Args)]
pub struct VoterModelParams {
    /// Species pool size (S).
    #[arg(short = 'S', long, default_value_t = 1000)]
    pub species: SPIDX,

    /// Number of individuals (J).
    #[arg(short = 'J', long, default_value_t = 1000)]
    pub individuals: usize,

    /// Number of generations to simulate (one generation is J steps).
    #[arg(short = 'T', long, default_value_t = 1000)]
    pub generations: u64,

    /// Speciation probability per update step.
    #[arg(long, default_value_t = 0.0)]
    pub nu: f64,

    /// RNG seed; runs are randomized when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl VoterModelParams {
    /// Validate that all parameters make sense.
    pub fn validate(&self) -> Result<()> {
        if self.species == 0 {
            bail!("species pool must not be empty");
        }
        if self.individuals == 0 {
            bail!("need at least one individual");
        }
        if self.generations == 0 {
            bail!("need at least one generation");
        }
        if !(0.0..=1.0).contains(&self.nu) {
            bail!("nu ({}) must be a probability in [0, 1]", self.nu);
        }
        Ok(())
    }

    /// A master RNG, seeded when `--seed` was given.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// An RNG for replicate run `replicate`, decorrelated from the
    /// master seed so parallel runs stay reproducible. Callers that
    /// extend an existing ensemble must offset `replicate` by the
    /// number of runs already recorded, or the new batch replays the
    /// old seed streams.
    pub fn replicate_rng(&self, replicate: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(replicate)),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Build the initial community: either from explicit per-individual
    /// labels (overriding J) or a uniform random assignment.
    pub fn build_community(
        &self,
        ic: Option<Vec<SPIDX>>,
        rng: &mut StdRng,
    ) -> Result<Community> {
        match ic {
            Some(labels) => Ok(Community::from_labels(labels, self.species)?),
            None => Ok(Community::random(self.species, self.individuals, rng)),
        }
    }
}

#[derive(Debug, Args)]
pub struct ScheduleParams {
    /// Number of log-spaced sample points between J and T*J steps.
    #[arg(long, default_value_t = 100)]
    pub samples: usize,
}

impl ScheduleParams {
    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            bail!("need at least one sample point");
        }
        Ok(())
    }

    pub fn build_schedule(&self, individuals: usize, generations: u64) -> SampleSchedule {
        SampleSchedule::log_spaced(individuals, generations, self.samples)
    }
}
