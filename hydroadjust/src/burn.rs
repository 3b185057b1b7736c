use crate::{options::Burn, vector};
use anyhow::Result;
use hydroburn::{
    dem::{ElevationSampler, Raster},
    BurnResult, Feature, Layer, LineBurner, Orchestrator, OverlapPolicy,
};
use std::{ffi::OsStr, path::Path};

impl Burn {
    pub fn run(&self) -> Result<()> {
        let dtm = Raster::open(&self.dtm, self.raster.mode())?;
        let layers = self
            .layers
            .iter()
            .map(|path| read_layer(path))
            .collect::<Result<Vec<_>>>()?;
        let overlap = if self.min_elevation {
            OverlapPolicy::MinElevation
        } else {
            OverlapPolicy::LastWriteWins
        };

        let mut grid = dtm.working_copy();
        let result = Orchestrator::new(LineBurner::new(overlap)).burn(layers, &mut grid)?;
        report(&self.dtm, &result);
        grid.save(&self.output)?;
        Ok(())
    }
}

/// Reads a file of 3D lines as a layer named after the file.
fn read_layer(path: &Path) -> Result<Layer> {
    let name = path
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("layer");
    let mut layer = Layer::new(name);
    for feature in vector::read_line_features(path)? {
        layer.push(feature.map(Feature::Line));
    }
    Ok(layer)
}

/// Prints a one line summary of a burn, plus each skipped feature.
pub fn report(dtm: &Path, result: &BurnResult) {
    if result.no_overlap() {
        println!("{}: no features intersect the raster", dtm.display());
    } else {
        println!(
            "{}: {} pixels written, {} features processed, {} skipped",
            dtm.display(),
            result.pixels_written,
            result.features_processed,
            result.features_skipped
        );
    }
    for skipped in &result.skipped {
        println!("  {}[{}]: {}", skipped.layer, skipped.index, skipped.error);
    }
}
