use crate::{raster, DemError, ElevationSampler, GeoTransform};
use std::path::Path;

/// An in-memory, writable elevation grid.
///
/// Samples are stored row-major with row 0 at the top of the raster.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterGrid {
    transform: GeoTransform,

    /// Number of (columns, rows) in this grid.
    dimensions: (usize, usize),

    nodata: Option<f32>,

    samples: Vec<f32>,
}

impl RasterGrid {
    pub fn new(
        transform: GeoTransform,
        dimensions @ (width, height): (usize, usize),
        nodata: Option<f32>,
        samples: Vec<f32>,
    ) -> Result<Self, DemError> {
        if samples.len() != width * height {
            return Err(DemError::Shape {
                width,
                height,
                len: samples.len(),
            });
        }
        Ok(Self::from_parts(transform, dimensions, nodata, samples))
    }

    /// Returns a grid with every cell set to `value`.
    pub fn filled(transform: GeoTransform, (width, height): (usize, usize), value: f32) -> Self {
        Self::from_parts(
            transform,
            (width, height),
            None,
            vec![value; width * height],
        )
    }

    pub(crate) fn from_parts(
        transform: GeoTransform,
        dimensions: (usize, usize),
        nodata: Option<f32>,
        samples: Vec<f32>,
    ) -> Self {
        debug_assert_eq!(samples.len(), dimensions.0 * dimensions.1);
        Self {
            transform,
            dimensions,
            nodata,
            samples,
        }
    }

    /// Returns `true` if this grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the cell value at `(col, row)`, if in bounds.
    pub fn get(&self, col: usize, row: usize) -> Option<f32> {
        self.index(col, row).map(|idx| self.samples[idx])
    }

    /// Writes `value` at `(col, row)`. Returns `false`, leaving the grid
    /// untouched, if the cell is out of bounds.
    pub fn set(&mut self, col: usize, row: usize, value: f32) -> bool {
        match self.index(col, row) {
            Some(idx) => {
                self.samples[idx] = value;
                true
            }
            None => false,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Saves this grid in the `.hdem` raster format.
    ///
    /// The file is written next to `path` first and renamed into place
    /// once complete.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DemError> {
        raster::write(path.as_ref(), self)
    }

    fn index(&self, col: usize, row: usize) -> Option<usize> {
        let (width, height) = self.dimensions;
        (col < width && row < height).then_some(row * width + col)
    }
}

impl ElevationSampler for RasterGrid {
    fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    fn dimensions(&self) -> (usize, usize) {
        self.dimensions
    }

    fn nodata(&self) -> Option<f32> {
        self.nodata
    }

    fn cell(&self, col: usize, row: usize) -> Option<f32> {
        self.get(col, row)
    }
}
