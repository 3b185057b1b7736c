use crate::{config::OverlapPolicy, math::Supercover, BurnError, Segment3};
use dem::{ElevationSampler, RasterGrid};

/// Rasterizes elevation-bearing segments into a grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineBurner {
    overlap: OverlapPolicy,
}

impl LineBurner {
    pub fn new(overlap: OverlapPolicy) -> Self {
        Self { overlap }
    }

    pub fn overlap(&self) -> OverlapPolicy {
        self.overlap
    }

    /// Burns `segment` into `grid` and returns the number of pixels
    /// written.
    ///
    /// Every pixel the segment crosses, including pixels it only
    /// touches at a corner, receives the segment's elevation at the
    /// projection of the pixel center onto the segment. The pixels
    /// containing the endpoints receive the endpoint elevations.
    /// Pixels outside the grid are ignored and zero-length segments
    /// write nothing.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn burn(&self, segment: &Segment3, grid: &mut RasterGrid) -> Result<usize, BurnError> {
        if grid.is_empty() {
            return Err(BurnError::Bounds("cannot burn into an empty raster".into()));
        }
        if segment.is_degenerate() {
            return Ok(0);
        }

        let gt = *grid.transform();
        let start_pixel = gt.containing_pixel(segment.start.xy());
        let end_pixel = gt.containing_pixel(segment.end.xy());
        let traversal = Supercover::new(
            gt.coord_to_pixel(segment.start.xy()),
            gt.coord_to_pixel(segment.end.xy()),
            grid.dimensions(),
        );

        let mut written = 0;
        for (col, row) in traversal {
            let pixel = (col as i64, row as i64);
            let t = if pixel == end_pixel {
                1.0
            } else if pixel == start_pixel {
                0.0
            } else {
                segment.project(gt.pixel_center((col, row)))
            };
            let z = segment.elevation_at(t) as f32;
            if self.write(grid, (col, row), z) {
                written += 1;
            }
        }
        Ok(written)
    }

    fn write(&self, grid: &mut RasterGrid, (col, row): (usize, usize), z: f32) -> bool {
        match self.overlap {
            OverlapPolicy::LastWriteWins => grid.set(col, row, z),
            OverlapPolicy::MinElevation => match grid.get(col, row) {
                Some(existing) if grid.is_valid(existing) && existing <= z => false,
                Some(_) => grid.set(col, row, z),
                None => false,
            },
        }
    }
}
