mod adjust;
mod burn;
mod options;
mod progress;
mod sample_horseshoes;
mod sample_lines;
mod vector;

use anyhow::Result;
use clap::Parser;
use options::Cli;
#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli {
        Cli::SampleLines(sample_lines) => sample_lines.run(),
        Cli::SampleHorseshoes(sample_horseshoes) => sample_horseshoes.run(),
        Cli::Burn(burn) => burn.run(),
        Cli::Adjust(adjust) => adjust.run(),
    }
}
