//! Burning of hydrological connectors into digital terrain models.
//!
//! Culverts and other short connectors are given as lines, bridges and
//! similar openings as four-point horseshoes. Both are sampled against
//! the terrain raster, turned into 3D segments, and burned into a
//! working copy of the raster so that water can flow through them.
//!
//! ```no_run
//! use hydroburn::{dem::{Raster, RasterMode}, pipeline, Config};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dtm = Raster::open("dtm.hdem", RasterMode::MemMap)?;
//! let (adjusted, result) = pipeline::adjust(&dtm, &[], &[], &Config::default())?;
//! adjusted.save("dtm.hydro.hdem")?;
//! println!("{} pixels written", result.pixels_written);
//! # Ok(())
//! # }
//! ```

mod burner;
mod config;
mod error;
mod geometry;
mod horseshoe;
mod line;
mod math;
mod orchestrator;
pub mod pipeline;
mod profile;

pub use crate::{
    burner::LineBurner,
    config::{BurnConfig, Config, EdgePolicy, OverlapPolicy, SamplingConfig},
    error::BurnError,
    geometry::{Horseshoe, LineFeature, Point3, Segment3},
    horseshoe::Grill,
    line::sample_line,
    orchestrator::{BurnResult, Feature, Layer, Orchestrator, SkippedFeature},
    profile::{sample_count, Profile, ProfileBuilder, MAX_SAMPLES},
};
pub use dem;
pub use geo;
