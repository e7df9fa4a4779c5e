//! Transit light-curve calculator.
//!
//! Reads a JSON setup file, integrates the light curve and writes it as a
//! text table, by default beside the setup file as
//! `<setup stem>_lightcurve.txt`.
//!
//! Usage:
//! ```text
//! transit-rs setups/wasp49b_sodium.json
//! transit-rs setups/wasp49b_sodium.json --output curve.txt --verbose
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use transit_rs::config::load_setup;
use transit_rs::output::{default_output_path, export_light_curve};

#[derive(Parser)]
#[command(name = "transit-rs")]
#[command(about = "Wavelength- and phase-resolved transit light curves")]
#[command(version)]
struct Args {
    /// Setup file (JSON)
    #[arg(value_name = "SETUP")]
    setup: PathBuf,

    /// Output file (default: <setup stem>_lightcurve.txt beside the setup)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let start = Instant::now();

    let setup = load_setup(&args.setup).with_context(|| format!("Invalid setup {}", args.setup.display()))?;
    let curve = setup.engine().run().context("Light-curve integration failed")?;

    let output = args
        .output
        .or_else(|| setup.output.path.clone())
        .unwrap_or_else(|| default_output_path(&args.setup));
    export_light_curve(&curve, &output, Some(&setup.table_config()))
        .with_context(|| format!("Cannot write light curve to {}", output.display()))?;
    info!("Light curve written to {}", output.display());

    println!("transit-rs finished. Elapsed time: {:.3?}", start.elapsed());
    println!(
        "The maximal flux decrease due to atmospheric/exospheric absorption in percent is: {:.5}",
        curve.max_flux_decrease_percent()
    );
    println!(
        "The minimal flux decrease due to atmospheric/exospheric absorption in percent is: {:.5}",
        curve.min_flux_decrease_percent()
    );

    Ok(())
}
