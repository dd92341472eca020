//! Volume of water in a horizontal tank with spherical end caps
//!
//! Usage: tankvol [--height <HEIGHT>]

mod logging;
mod report;

pub use logging::*;
pub use report::*;

use clap::Parser;
use eyre::WrapErr;
use tank_gems::{TANK_GEOMETRY, volume_to_liters};

#[derive(Parser, Debug)]
#[command(name = "tankvol")]
#[command(about = "Calculates tank volume of a tank as integral of a function.")]
struct Cli {
    /// Height of water in the tank [m]
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    height: f64,
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    LogConfig::default().init();

    log::debug!("tank: {TANK_GEOMETRY:?}");
    log::debug!("fill height: {} m", cli.height);

    let volume = TANK_GEOMETRY
        .volume(cli.height)
        .wrap_err_with(|| format!("failed to compute volume for height {} m", cli.height))?;

    log::debug!("total: {} l", volume_to_liters(volume.total));

    for line in report_lines(&volume) {
        println!("{line}");
    }

    Ok(())
}
