use clap::Parser;
use colored::*;
use anyhow::Result;

use ed_stats::DiversitySummary;
use ed_drift::VoterModel;

use ecodrift::input_parsers::read_labels_input;
use ecodrift::drift_parsers::ScheduleParams;
use ecodrift::drift_parsers::VoterModelParams;

#[derive(Debug, Parser)]
#[command(name = "ed-trajectory")]
#[command(version, about = "A single Voter Model run, sampled at log-spaced times")]
pub struct Cli {
    /// Initial-condition label file, or "-" for stdin (random if omitted).
    #[arg(long, value_name = "FILE")]
    ic: Option<String>,

    #[command(flatten, next_help_heading = "Voter Model parameters")]
    model: VoterModelParams,

    #[command(flatten, next_help_heading = "Sampling parameters")]
    sampling: ScheduleParams,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.model.validate()?;
    cli.sampling.validate()?;

    let mut rng = cli.model.rng();
    let ic = match &cli.ic {
        Some(input) => Some(read_labels_input(input)?),
        None => None,
    };
    let community = cli.model.build_community(ic, &mut rng)?;
    let schedule = cli.sampling.build_schedule(community.len(), cli.model.generations);

    println!("{}", format!("# {}", community).yellow());
    println!("{} {:>13} {:>12} {:>9} {:>9} {:>9}",
        "#".yellow(),
        "generation".cyan(),
        "step".cyan(),
        "richness".green(),
        "shannon".green(),
        "dominance".green(),
    );

    let mut model = VoterModel::from((community, cli.model.nu));

    let print_row = |step: u64, generation: f64, summary: &DiversitySummary| {
        println!("  {:>13.4} {:>12} {:>9} {:>9.4} {:>9.4}",
            generation,
            step,
            summary.richness,
            summary.shannon,
            summary.berger_parker,
        );
    };

    print_row(0, 0.0, &DiversitySummary::of(&model.community().abundance()));

    let mut t_idx = 1; // step 0 printed above
    let executed = model.simulate(&mut rng, schedule.total_steps(), |t, community| {
        while t_idx < schedule.len() && t >= schedule.steps()[t_idx] {
            let summary = DiversitySummary::of(&community.abundance());
            print_row(t, schedule.generation(t), &summary);
            t_idx += 1;
        }
    });

    if executed < schedule.total_steps() {
        println!("{}", format!("# consensus after {:.4} generations",
            schedule.generation(executed)).yellow());
    }
    Ok(())
}
