//! Elevation rasters.
//!
//! A [RasterGrid] is an in-memory, writable grid of `f32` elevation
//! samples; a [Raster] is a read-only raster backed by a `.hdem` file,
//! either loaded into memory or memory mapped. Both expose the
//! [ElevationSampler] capability: an affine pixel transform, point
//! elevation lookup, and windowed bulk reads.

mod error;
mod grid;
mod raster;
mod sampler;
mod transform;

pub use crate::{
    error::DemError,
    grid::RasterGrid,
    raster::{Raster, RasterMode},
    sampler::{ElevationSampler, Window},
    transform::GeoTransform,
};
pub use geo;

/// Base floating point type used for all coordinates and calculations.
pub type C = f64;
