use clap::Parser;
use colored::*;
use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;

use ed_stats::LogSeries;
use ed_stats::octave_lower_bound;
use ed_stats::preston_octaves;

use ecodrift::input_parsers::write_labels;

#[derive(Debug, Parser)]
#[command(name = "ed-logseries")]
#[command(version, about = "Sample a log-series community, e.g. as a drift initial condition")]
pub struct Cli {
    /// Log-series parameter, in (0, 1).
    #[arg(long, default_value_t = 0.99)]
    theta: f64,

    /// Truncate the distribution at this abundance.
    #[arg(long, default_value_t = 1000)]
    max_abundance: u32,

    /// Number of species to draw.
    #[arg(short = 'S', long, default_value_t = 100)]
    species: u32,

    /// RNG seed; randomized when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the sampled community as an initial-condition label file.
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let dist = LogSeries::new(cli.theta, cli.max_abundance)?;
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let community = dist.sample_community(cli.species, &mut rng);
    println!("{}", format!("# theta={} mean abundance={:.2}", dist.theta(), dist.mean()).yellow());
    println!("{}", community);

    println!("{} {:>6}", "# octave".cyan(), "species".cyan());
    for (octave, count) in preston_octaves(&community).iter().enumerate() {
        println!("{:>8}+ {:>6}", octave_lower_bound(octave), count);
    }

    if let Some(path) = &cli.output {
        write_labels(path, &community)?;
        println!("Initial condition ({} individuals) written to {}",
            community.total(), path);
    }

    Ok(())
}
