use crate::{GeoTransform, RasterGrid, C};
use geo::geometry::{Coord, Rect};

/// A pixel window into a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub col_off: usize,
    pub row_off: usize,
    pub width: usize,
    pub height: usize,
}

/// Read access to an elevation raster.
///
/// Implementors provide raw cell access and the pixel transform; point
/// lookup, windowed reads, and working copies come for free.
pub trait ElevationSampler {
    fn transform(&self) -> &GeoTransform;

    /// Returns `(width, height)` in pixels.
    fn dimensions(&self) -> (usize, usize);

    fn nodata(&self) -> Option<f32>;

    /// Returns the raw cell value at `(col, row)`, if in bounds.
    fn cell(&self, col: usize, row: usize) -> Option<f32>;

    /// Returns `true` if `value` is a finite, non-nodata elevation.
    fn is_valid(&self, value: f32) -> bool {
        value.is_finite() && self.nodata().map_or(true, |nodata| value != nodata)
    }

    /// World extent covered by the outer pixel edges.
    #[allow(clippy::cast_precision_loss)]
    fn extent(&self) -> Rect<C> {
        let (width, height) = self.dimensions();
        let gt = self.transform();
        let a = gt.pixel_to_coord(Coord { x: -0.5, y: -0.5 });
        let b = gt.pixel_to_coord(Coord {
            x: width as C - 0.5,
            y: height as C - 0.5,
        });
        Rect::new(a, b)
    }

    /// Moves `coord` onto the nearest point of the pixel-center extent,
    /// where interpolation is defined.
    #[allow(clippy::cast_precision_loss)]
    fn clamp_to_centers(&self, coord: Coord<C>) -> Coord<C> {
        let (width, height) = self.dimensions();
        let gt = self.transform();
        let pixel = gt.coord_to_pixel(coord);
        gt.pixel_to_coord(Coord {
            x: pixel.x.clamp(0.0, width.saturating_sub(1) as C),
            y: pixel.y.clamp(0.0, height.saturating_sub(1) as C),
        })
    }

    /// Returns the bilinearly interpolated elevation at `coord`.
    ///
    /// Interpolation is between the four surrounding pixel centers.
    /// Returns `None` outside the pixel-center extent, or when a cell
    /// contributing to the result is not a valid elevation.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn elevation(&self, coord: Coord<C>) -> Option<C> {
        let (width, height) = self.dimensions();
        if width == 0 || height == 0 {
            return None;
        }
        let Coord { x, y } = self.transform().coord_to_pixel(coord);
        let in_range = |v: C, len: usize| (0.0..=(len - 1) as C).contains(&v);
        if !(in_range(x, width) && in_range(y, height)) {
            return None;
        }

        let col0 = (x.floor() as usize).min(width - 1);
        let row0 = (y.floor() as usize).min(height - 1);
        let col1 = (col0 + 1).min(width - 1);
        let row1 = (row0 + 1).min(height - 1);
        let fx = x - col0 as C;
        let fy = y - row0 as C;

        let mut acc = 0.0;
        for (col, row, weight) in [
            (col0, row0, (1.0 - fx) * (1.0 - fy)),
            (col1, row0, fx * (1.0 - fy)),
            (col0, row1, (1.0 - fx) * fy),
            (col1, row1, fx * fy),
        ] {
            if weight == 0.0 {
                continue;
            }
            let value = self.cell(col, row)?;
            if !self.is_valid(value) {
                return None;
            }
            acc += weight * C::from(value);
        }
        Some(acc)
    }

    /// Returns the pixel window covering `rect`, grown by `pad` pixels
    /// on every side and clipped to the raster. Returns `None` if `rect`
    /// does not overlap the raster.
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn window(&self, rect: Rect<C>, pad: usize) -> Option<Window> {
        let (width, height) = self.dimensions();
        if width == 0 || height == 0 {
            return None;
        }
        let gt = self.transform();
        let (c0, r0) = gt.containing_pixel(rect.min());
        let (c1, r1) = gt.containing_pixel(rect.max());
        let pad = pad as i64;
        let clip = |a: i64, b: i64, len: usize| -> Option<(usize, usize)> {
            let lo = a.min(b) - pad;
            let hi = a.max(b) + pad;
            if hi < 0 || lo >= len as i64 {
                None
            } else {
                Some((lo.max(0) as usize, hi.min(len as i64 - 1) as usize))
            }
        };
        let (col_lo, col_hi) = clip(c0, c1, width)?;
        let (row_lo, row_hi) = clip(r0, r1, height)?;
        Some(Window {
            col_off: col_lo,
            row_off: row_lo,
            width: col_hi - col_lo + 1,
            height: row_hi - row_lo + 1,
        })
    }

    /// Reads the cells of `window` into a new grid positioned at the
    /// window's origin. Cells beyond the raster become nodata (or NaN).
    fn read_window(&self, window: &Window) -> RasterGrid {
        let fill = self.nodata().unwrap_or(f32::NAN);
        let mut samples = Vec::with_capacity(window.width * window.height);
        for row in window.row_off..window.row_off + window.height {
            for col in window.col_off..window.col_off + window.width {
                samples.push(self.cell(col, row).unwrap_or(fill));
            }
        }
        RasterGrid::from_parts(
            self.transform().shifted((window.col_off, window.row_off)),
            (window.width, window.height),
            self.nodata(),
            samples,
        )
    }

    /// Returns an in-memory, writable copy of the whole raster.
    fn working_copy(&self) -> RasterGrid {
        let (width, height) = self.dimensions();
        self.read_window(&Window {
            col_off: 0,
            row_off: 0,
            width,
            height,
        })
    }
}
