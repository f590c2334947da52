use std::hint::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use rand::SeedableRng;
use rand::rngs::StdRng;

use ed_community::Community;
use ed_drift::SampleSchedule;
use ed_drift::VoterModel;
use ed_drift::timeline::Timeline;

fn simulate_generations(j: usize, generations: u64, nu: f64) {
    let mut rng = StdRng::seed_from_u64(42);
    let community = Community::random(j as u32, j, &mut rng);
    let mut model = VoterModel::from((community, nu));
    model.simulate(&mut rng, black_box(generations * j as u64), |_, _| {});
}

fn simulate_with_timeline(j: usize, generations: u64) {
    let mut rng = StdRng::seed_from_u64(42);
    let schedule = SampleSchedule::log_spaced(j, generations, 100);
    let community = Community::random(j as u32, j, &mut rng);
    let mut timeline = Timeline::new(&schedule, j as u32);
    let mut model = VoterModel::from((community, 0.01));

    let mut t_idx = 1; // step 0 recorded up front
    timeline.record(0, model.community());
    model.simulate(&mut rng, schedule.total_steps(), |t, community| {
        while t_idx < schedule.len() && t >= schedule.steps()[t_idx] {
            timeline.record(t_idx, community);
            t_idx += 1;
        }
    });
}

fn bench_voter_model(c: &mut Criterion) {
    c.bench_function("drift_j1000_t10_neutral", |b| {
        b.iter(|| simulate_generations(1000, 10, 0.0))
    });
    c.bench_function("drift_j1000_t10_speciation", |b| {
        b.iter(|| simulate_generations(1000, 10, 0.01))
    });
    c.bench_function("drift_j1000_t10_timeline", |b| {
        b.iter(|| simulate_with_timeline(1000, 10))
    });
}

criterion_group!(benches, bench_voter_model);
criterion_main!(benches);
