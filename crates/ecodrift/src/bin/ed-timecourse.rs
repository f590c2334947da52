use clap::Parser;
use anyhow::Result;
use colored::*;
use std::path::Path;
use std::path::PathBuf;
use rayon::prelude::*;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;

use ed_drift::VoterModel;
use ed_drift::SampleSchedule;
use ed_drift::timeline::Timeline;
use ed_drift::timeline_plotting::plot_richness_decay;
use ed_drift::timeline_plotting::plot_abundance_trajectories;
use ed_community::Community;
use ed_community::SPIDX;

use ecodrift::input_parsers::read_labels_input;
use ecodrift::drift_parsers::ScheduleParams;
use ecodrift::drift_parsers::VoterModelParams;

#[derive(Debug, Parser)]
#[command(name = "ed-timecourse")]
#[command(version, about = "Ensemble Voter Model runs merged into one timeline")]
pub struct Cli {
    /// Initial-condition label file, or "-" for stdin (random if omitted).
    #[arg(long, value_name = "FILE")]
    ic: Option<String>,

    #[arg(short, long, default_value_t = 100)]
    num_sims: usize,

    /// Backup/Store timeline in this file.
    #[arg(long, value_name = "FILE")]
    timeline: Option<PathBuf>,

    /// Basename for the SVG plots (no plots if omitted).
    #[arg(long, value_name = "NAME")]
    plot: Option<String>,

    /// Number of species shown in the abundance-trajectory plot.
    #[arg(long, default_value_t = 10)]
    top_species: usize,

    #[command(flatten, next_help_heading = "Voter Model parameters")]
    model: VoterModelParams,

    #[command(flatten, next_help_heading = "Sampling parameters")]
    sampling: ScheduleParams,
}

fn run_replicate(
    cli: &Cli,
    schedule: &SampleSchedule,
    ic: Option<&[SPIDX]>,
    replicate: u64,
) -> Timeline {
    let mut rng = cli.model.replicate_rng(replicate);
    let community = match ic {
        Some(labels) => Community::from_labels(labels.to_vec(), cli.model.species)
            .expect("initial condition was validated before the run"),
        None => Community::random(cli.model.species, cli.model.individuals, &mut rng),
    };

    let mut timeline = Timeline::new(schedule, cli.model.species);
    let mut model = VoterModel::from((community, cli.model.nu));

    timeline.record(0, model.community());
    let mut t_idx = 1; // step 0 recorded up front
    model.simulate(&mut rng, schedule.total_steps(), |t, community| {
        while t_idx < schedule.len() && t >= schedule.steps()[t_idx] {
            timeline.record(t_idx, community);
            t_idx += 1;
        }
    });
    timeline
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.model.validate()?;
    cli.sampling.validate()?;

    let ic = match &cli.ic {
        Some(input) => {
            let labels = read_labels_input(input)?;
            // fail fast on out-of-range labels before spawning replicas
            Community::from_labels(labels.clone(), cli.model.species)?;
            Some(labels)
        }
        None => None,
    };
    let individuals = ic.as_ref().map_or(cli.model.individuals, Vec::len);
    let schedule = cli.sampling.build_schedule(individuals, cli.model.generations);

    println!("{}", format!("# J={} S={} T={} nu={}",
        individuals, cli.model.species, cli.model.generations, cli.model.nu).yellow());
    println!("Output after {} simulations: \n - {:?}\n - {:?}",
        cli.num_sims, cli.model, cli.sampling);

    // If timeline.json exists, reload instead of starting empty
    let mut master = if let Some(path) = &cli.timeline {
        if Path::new(path).exists() {
            println!("Loading existing timeline from: {}", path.display());
            Timeline::from_file(path, &schedule, cli.model.species)?
        } else {
            println!("A new timeline file will be created: {}", path.display());
            Timeline::new(&schedule, cli.model.species)
        }
    } else {
        Timeline::new(&schedule, cli.model.species)
    };

    // Replicates already stored in a reloaded timeline consumed the
    // first seeds; start this batch after them so resuming with the
    // same --seed extends the ensemble instead of repeating it.
    let seed_offset = master.point(0).replicates as u64;

    println!("Simulation progress:");
    let pb = ProgressBar::new(cli.num_sims as u64);
    pb.set_style(
        ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        .unwrap()
        .progress_chars("#>-"),
    );

    let timelines: Vec<Timeline> = (0..cli.num_sims as u64)
        .into_par_iter()
        .map_init(
            || pb.clone(), // each thread gets a clone
            |pb, replicate| {
                let timeline = run_replicate(&cli, &schedule, ic.as_deref(), seed_offset + replicate);
                pb.inc(1);
                timeline
            },
        ).collect();
    pb.finish_with_message("All simulations complete!");

    // Master timeline
    for timeline in timelines {
        master.merge(timeline);
    }

    println!("Final Timeline:\n{}", master);

    if let Some(name) = &cli.plot {
        plot_richness_decay(&master, &format!("{}_richness.svg", name));
        plot_abundance_trajectories(&master, &format!("{}_abundance.svg", name), cli.top_species);
        println!("Plots written to {0}_richness.svg and {0}_abundance.svg", name);
    }

    if let Some(path) = cli.timeline {
        let serial = master.to_serializable();
        let json = serde_json::to_string_pretty(&serial)?;
        std::fs::write(path, json)?;
    }

    Ok(())
}
