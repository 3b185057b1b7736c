//! Ordered burning of feature layers.
//!
//! Overlapping burns are resolved by iteration order: layers in the
//! order given, features in layer order, and segments in feature order.
//! Callers control the outcome of overlaps by ordering their input.

use crate::{geometry::segments_bounding_rect, BurnError, Grill, LineBurner, LineFeature, Segment3};
use dem::{ElevationSampler, RasterGrid, C};
use geo::{geometry::Rect, Intersects};
use log::{debug, info, warn};

/// Anything that can be burned: a connected line or a horseshoe grill.
#[derive(Debug, Clone, PartialEq)]
pub enum Feature {
    Line(LineFeature),
    Grill(Grill),
}

impl Feature {
    pub fn segments(&self) -> &[Segment3] {
        match self {
            Self::Line(line) => line.segments(),
            Self::Grill(grill) => grill.segments(),
        }
    }

    pub fn bounding_rect(&self) -> Option<Rect<C>> {
        segments_bounding_rect(self.segments())
    }
}

impl From<LineFeature> for Feature {
    fn from(line: LineFeature) -> Self {
        Self::Line(line)
    }
}

impl From<Grill> for Feature {
    fn from(grill: Grill) -> Self {
        Self::Grill(grill)
    }
}

/// A named, ordered collection of features.
///
/// Features which could not be produced upstream (for example, failed
/// elevation sampling) are kept in place as errors so that they are
/// reported alongside burn-time skips.
#[derive(Debug)]
pub struct Layer {
    pub name: String,
    pub features: Vec<Result<Feature, BurnError>>,
}

impl Layer {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            features: Vec::new(),
        }
    }

    pub fn push(&mut self, feature: Result<Feature, BurnError>) {
        self.features.push(feature);
    }

    /// Number of features that are available to burn.
    pub fn valid(&self) -> usize {
        self.features.iter().filter(|f| f.is_ok()).count()
    }
}

/// A feature that was not burned.
#[derive(Debug)]
pub struct SkippedFeature {
    pub layer: String,

    /// Position of the feature within its layer.
    pub index: usize,

    pub error: BurnError,
}

/// Summary of a burn run.
#[derive(Debug, Default)]
pub struct BurnResult {
    pub pixels_written: usize,
    pub features_processed: usize,
    pub features_skipped: usize,
    pub skipped: Vec<SkippedFeature>,
}

impl BurnResult {
    /// Returns `true` if no feature intersected the raster.
    pub fn no_overlap(&self) -> bool {
        self.features_processed == 0
    }

    fn skip(&mut self, layer: &str, index: usize, error: BurnError) {
        warn!("skipping {layer}[{index}]: {error}");
        self.features_skipped += 1;
        self.skipped.push(SkippedFeature {
            layer: layer.to_owned(),
            index,
            error,
        });
    }
}

/// Burns layers of features into a raster, strictly in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Orchestrator {
    burner: LineBurner,
}

impl Orchestrator {
    pub fn new(burner: LineBurner) -> Self {
        Self { burner }
    }

    /// Burns every feature of every layer into `grid`.
    ///
    /// Layers are burned in the order given and features in layer
    /// order, so later layers and features win overlaps under
    /// last-write-wins. A feature that failed upstream or lies entirely
    /// outside the raster is recorded as skipped and does not stop the
    /// run. Only an empty raster fails the run as a whole.
    pub fn burn<L>(&self, layers: L, grid: &mut RasterGrid) -> Result<BurnResult, BurnError>
    where
        L: IntoIterator<Item = Layer>,
    {
        if grid.is_empty() {
            return Err(BurnError::Bounds("cannot burn into an empty raster".into()));
        }
        let extent = grid.extent();
        let mut result = BurnResult::default();

        for Layer { name, features } in layers {
            let now = std::time::Instant::now();
            let pixels_before = result.pixels_written;
            for (index, feature) in features.into_iter().enumerate() {
                let feature = match feature {
                    Ok(feature) => feature,
                    Err(e) => {
                        result.skip(&name, index, e);
                        continue;
                    }
                };
                let overlaps = feature
                    .segments()
                    .iter()
                    .any(|segment| segment.planar().intersects(&extent));
                if !overlaps {
                    result.skip(
                        &name,
                        index,
                        BurnError::Bounds("feature lies outside the raster extent".into()),
                    );
                    continue;
                }
                let mut written = 0;
                for segment in feature.segments() {
                    written += self.burner.burn(segment, grid)?;
                }
                debug!("{name}[{index}]; segments: {}, pixels: {written}", feature.segments().len());
                result.pixels_written += written;
                result.features_processed += 1;
            }
            info!(
                "burned layer {name}; pixels: {}, exec: {:?}",
                result.pixels_written - pixels_before,
                now.elapsed()
            );
        }

        if result.no_overlap() {
            warn!("no features intersect the raster extent");
        }
        Ok(result)
    }
}
