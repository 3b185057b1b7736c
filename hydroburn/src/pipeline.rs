//! End-to-end stages of a hydro adjustment run.
//!
//! Each stage works on features independently: a feature that fails is
//! carried forward as an error in its [`Layer`] and reported by the
//! burn, while the rest of the layer proceeds.

use crate::{
    config::{Config, SamplingConfig},
    line::sample_line,
    orchestrator::{BurnResult, Feature, Layer, Orchestrator},
    BurnError, Horseshoe, LineBurner,
};
use dem::{ElevationSampler, RasterGrid, C};
use geo::geometry::LineString;
use log::info;

/// Samples raster elevations at the vertices of every line.
pub fn sample_lines<S: ElevationSampler + ?Sized>(
    name: &str,
    lines: &[LineString<C>],
    sampler: &S,
    config: &SamplingConfig,
) -> Layer {
    let now = std::time::Instant::now();
    let mut layer = Layer::new(name);
    for line in lines {
        layer.push(sample_line(line, sampler, config.edge_policy).map(Feature::Line));
    }
    info!(
        "sampled {name}; valid: {}, invalid: {}, exec: {:?}",
        layer.valid(),
        lines.len() - layer.valid(),
        now.elapsed()
    );
    layer
}

/// Renders every horseshoe into a grill.
///
/// Each horseshoe is sampled from a small window of the raster around
/// its bounding box, so a memory-mapped raster is only touched where
/// horseshoes are. Sample spacing is resolved once against the full
/// raster. Windows are cut at the raster edge, so under
/// [`EdgePolicy::Clamp`](crate::EdgePolicy::Clamp) samples clamp to the
/// same pixel centers as they would on the full raster.
pub fn render_horseshoes<S: ElevationSampler + ?Sized>(
    name: &str,
    horseshoes: &[Horseshoe],
    sampler: &S,
    config: &SamplingConfig,
) -> Layer {
    let now = std::time::Instant::now();
    let config = SamplingConfig {
        max_sample_dist: Some(config.max_sample_dist(sampler.transform())),
        ..*config
    };
    let mut layer = Layer::new(name);
    for horseshoe in horseshoes {
        let grill = sampler
            .window(horseshoe.bounding_rect(), 1)
            .ok_or_else(|| {
                BurnError::Bounds(format!(
                    "horseshoe at ({}, {}) lies outside the raster extent",
                    horseshoe.a.x, horseshoe.a.y
                ))
            })
            .and_then(|window| horseshoe.render(&sampler.read_window(&window), &config));
        layer.push(grill.map(Feature::Grill));
    }
    info!(
        "rendered {name}; valid: {}, invalid: {}, exec: {:?}",
        layer.valid(),
        horseshoes.len() - layer.valid(),
        now.elapsed()
    );
    layer
}

/// Runs a full adjustment of `dtm`.
///
/// Lines are burned first and horseshoes second, so horseshoes win
/// wherever both touch the same pixel under last-write-wins. `dtm`
/// itself is never modified; the adjusted raster is returned with the
/// burn summary.
pub fn adjust<S: ElevationSampler + ?Sized>(
    dtm: &S,
    lines: &[LineString<C>],
    horseshoes: &[Horseshoe],
    config: &Config,
) -> Result<(RasterGrid, BurnResult), BurnError> {
    let layers = [
        sample_lines("lines", lines, dtm, &config.sampling),
        render_horseshoes("horseshoes", horseshoes, dtm, &config.sampling),
    ];
    let mut grid = dtm.working_copy();
    let result = Orchestrator::new(LineBurner::new(config.burn.overlap)).burn(layers, &mut grid)?;
    info!(
        "adjusted; pixels: {}, processed: {}, skipped: {}",
        result.pixels_written, result.features_processed, result.features_skipped
    );
    Ok((grid, result))
}
