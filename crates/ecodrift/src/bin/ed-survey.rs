use std::io::Write;
use log::info;
use colored::*;
use env_logger::Builder;
use clap::Parser;
use clap::ArgAction;
use anyhow::Result;

use ed_community::OtuTable;
use ed_stats::DiversitySummary;
use ed_stats::expected_richness;
use ed_stats::octave_lower_bound;
use ed_stats::preston_octaves;
use ed_stats::rank_plotting::plot_rank_abundance;

#[derive(Debug, Parser)]
#[command(name = "ed-survey")]
#[command(author, version, about = "Macroecological summary of an OTU count table")]
pub struct Cli {
    /// OTU table (CSV: station column, OTU columns).
    #[arg(value_name = "INPUT")]
    input: String,

    /// Only report this station.
    #[arg(long, value_name = "NAME")]
    station: Option<String>,

    /// Write rank-abundance curves of all reported stations to this SVG.
    #[arg(long, value_name = "FILE")]
    rad: Option<String>,

    /// Print a rarefaction curve of the pooled sample with this many points.
    #[arg(long, value_name = "POINTS")]
    rarefaction: Option<usize>,

    /// Verbosity (-v = info, -vv = debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            // no prefix, just the message
            writeln!(buf, "{}", record.args())
        })
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let table = OtuTable::from_csv_file(&cli.input)?;
    info!("{}: {} stations, {} OTUs", cli.input, table.n_stations(), table.n_otus());

    let samples: Vec<(&str, _)> = match &cli.station {
        Some(name) => {
            let av = table.station_by_name(name)
                .ok_or_else(|| anyhow::anyhow!("No station named '{}'", name))?;
            vec![(name.as_str(), av)]
        }
        None => table.iter().collect(),
    };

    let width = samples.iter().map(|(name, _)| name.len()).max().unwrap_or(7).max(7);
    println!("{:>width$} {}", "station".cyan(), DiversitySummary::header().cyan());
    for (name, av) in &samples {
        println!("{:>width$} {}", name.green(), DiversitySummary::of(av));
    }

    let pooled = table.pooled();
    if cli.station.is_none() {
        println!("{:>width$} {}", "pooled".yellow(), DiversitySummary::of(&pooled));
    }

    if let Some(points) = cli.rarefaction {
        println!("\nRarefaction of the pooled sample:");
        println!("{:>12} {:>12}", "subsample".cyan(), "E[richness]".cyan());
        for i in 0..=points.max(1) {
            let m = pooled.total() * i as u64 / points.max(1) as u64;
            println!("{:>12} {:>12.2}", m, expected_richness(&pooled, m)?);
        }
    }

    info!("\nPreston octaves of the pooled sample:");
    for (octave, count) in preston_octaves(&pooled).iter().enumerate() {
        info!("{:>8}+ {:>6}", octave_lower_bound(octave), count);
    }

    if let Some(filename) = &cli.rad {
        plot_rank_abundance(&samples, filename);
        println!("Rank-abundance plot written to {}", filename);
    }

    Ok(())
}
