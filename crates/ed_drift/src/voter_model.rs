use std::fmt;
use rand::Rng;

use ed_community::Community;

/// The Voter Model of neutral ecological drift.
///
/// Each update step picks one individual uniformly at random. With
/// probability `1 - nu` it adopts the species label of another uniformly
/// chosen individual (the peer may be itself, in which case nothing
/// changes); with probability `nu` it speciates into a uniform random
/// label from the pool. One generation is J update steps.
///
/// With `nu = 0` the process is absorbing: once a single species remains
/// the community never changes again, so the simulation stops early.
pub struct VoterModel {
    community: Community,
    nu: f64,
}

impl fmt::Debug for VoterModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoterModel")
            .field("nu", &self.nu)
            .field("community", &format!("{}", self.community))
            .finish()
    }
}

impl From<(Community, f64)> for VoterModel {
    fn from((community, nu): (Community, f64)) -> Self {
        assert!((0.0..=1.0).contains(&nu), "speciation probability must be in [0, 1]");
        Self { community, nu }
    }
}

impl VoterModel {
    pub fn community(&self) -> &Community {
        &self.community
    }

    pub fn nu(&self) -> f64 {
        self.nu
    }

    pub fn into_community(self) -> Community {
        self.community
    }

    /// Apply a single update step.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let j = self.community.len();
        let i = rng.random_range(0..j);
        if rng.random::<f64>() >= self.nu {
            let peer = rng.random_range(0..j);
            let label = self.community.label(peer);
            self.community.adopt(i, label);
        } else {
            let label = rng.random_range(0..self.community.species_pool());
            self.community.adopt(i, label);
        }
    }

    /// Run up to `total_steps` update steps, invoking the callback after
    /// each with the step number (starting at 1) and the current state.
    /// Returns the number of steps actually executed; the run ends early
    /// at consensus when `nu = 0`.
    pub fn simulate<R, F>(
        &mut self,
        rng: &mut R,
        total_steps: u64,
        mut callback: F,
    ) -> u64
    where
        R: Rng + ?Sized,
        F: FnMut(u64, &Community),
    {
        for t in 1..=total_steps {
            self.step(rng);
            callback(t, &self.community);
            if self.nu == 0.0 && self.community.richness() == 1 {
                return t;
            }
        }
        total_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_step_preserves_population_size() {
        let mut rng = StdRng::seed_from_u64(11);
        let community = Community::random(20, 100, &mut rng);
        let mut model = VoterModel::from((community, 0.01));
        for _ in 0..1000 {
            model.step(&mut rng);
        }
        assert_eq!(model.community().len(), 100);
        assert_eq!(model.community().counts().iter().sum::<u32>(), 100);
    }

    #[test]
    fn test_drift_reaches_consensus_without_speciation() {
        let mut rng = StdRng::seed_from_u64(3);
        let community = Community::random(5, 30, &mut rng);
        let mut model = VoterModel::from((community, 0.0));

        // J=30 fixates in O(J^2) steps with overwhelming probability
        let executed = model.simulate(&mut rng, 1_000_000, |_, _| {});
        assert_eq!(model.community().richness(), 1);
        assert!(executed < 1_000_000);
    }

    #[test]
    fn test_consensus_is_absorbing() {
        let mut rng = StdRng::seed_from_u64(5);
        let community = Community::from_labels(vec![2; 50], 10).unwrap();
        let mut model = VoterModel::from((community, 0.0));
        let executed = model.simulate(&mut rng, 1000, |_, c| {
            assert_eq!(c.richness(), 1);
        });
        assert_eq!(executed, 1);
    }

    #[test]
    fn test_speciation_maintains_diversity() {
        let mut rng = StdRng::seed_from_u64(9);
        let community = Community::random(100, 200, &mut rng);
        let mut model = VoterModel::from((community, 0.1));

        // with nu this high, drift cannot keep richness at 1
        let executed = model.simulate(&mut rng, 50_000, |_, _| {});
        assert_eq!(executed, 50_000);
        assert!(model.community().richness() > 1);
    }

    #[test]
    fn test_callback_sees_every_step() {
        let mut rng = StdRng::seed_from_u64(1);
        let community = Community::random(50, 40, &mut rng);
        let mut model = VoterModel::from((community, 0.5));
        let mut seen = Vec::new();
        model.simulate(&mut rng, 10, |t, _| seen.push(t));
        assert_eq!(seen, (1..=10).collect::<Vec<u64>>());
    }

    #[test]
    #[should_panic]
    fn test_invalid_nu_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let community = Community::random(5, 10, &mut rng);
        let _ = VoterModel::from((community, 1.5));
    }
}
