use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, info};
use rand::SeedableRng;
use rand::prelude::SmallRng;
use shelfrun::generator::{InstanceSpec, generate_instance};
use shelfrun::io;

/// Generates a random nesting instance of star-shaped polygons
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct GenCli {
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,
    #[arg(short, long, default_value_t = 400)]
    n_pieces: usize,
    #[arg(long, default_value_t = 500.0)]
    fabric_width: f64,
    #[arg(long, default_value_t = 700.0)]
    fabric_length: f64,
    #[arg(short, long, default_value_t = 0.0)]
    margin: f64,
    /// Seed for the PRNG. If undefined, the instance is generated from entropy
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = GenCli::parse();
    io::init_logger(LevelFilter::Info)?;

    let spec = InstanceSpec {
        n_pieces: args.n_pieces,
        fabric_width: args.fabric_width,
        fabric_length: args.fabric_length,
        margin: args.margin,
        ..InstanceSpec::default()
    };
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let instance = generate_instance(&spec, &mut rng);
    io::write_json(&instance, &args.output)?;
    info!(
        "[GEN] wrote {} random polygons ({} x {} fabric)",
        instance.pieces.len(),
        instance.fabric_width,
        instance.fabric_length
    );
    Ok(())
}
