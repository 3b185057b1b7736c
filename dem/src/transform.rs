use crate::{DemError, C};
use geo::geometry::Coord;

/// North-up affine transform between pixel and world coordinates.
///
/// Pixel `(col, row)` has its _center_ at the continuous pixel
/// coordinate `(col, row)`; its footprint spans half a pixel in every
/// direction. Rotated transforms are rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    /// World coordinate of the outer top-left corner of pixel `(0, 0)`.
    origin: Coord<C>,

    /// Signed world units per pixel column.
    pixel_width: C,

    /// Signed world units per pixel row (negative for north-up rasters).
    pixel_height: C,
}

impl GeoTransform {
    pub fn new(origin: Coord<C>, pixel_width: C, pixel_height: C) -> Result<Self, DemError> {
        let valid = |v: C| v.is_finite() && v != 0.0;
        if !(valid(pixel_width) && valid(pixel_height)) {
            return Err(DemError::PixelSize(pixel_width, pixel_height));
        }
        Ok(Self {
            origin,
            pixel_width,
            pixel_height,
        })
    }

    /// Builds a transform from the six GDAL coefficients
    /// `[origin_x, pixel_width, row_rotation, origin_y, col_rotation, pixel_height]`.
    pub fn from_gdal(coefficients: [C; 6]) -> Result<Self, DemError> {
        let [x0, dx, rx, y0, ry, dy] = coefficients;
        if rx != 0.0 || ry != 0.0 {
            return Err(DemError::Rotation);
        }
        Self::new(Coord { x: x0, y: y0 }, dx, dy)
    }

    pub fn to_gdal(&self) -> [C; 6] {
        [
            self.origin.x,
            self.pixel_width,
            0.0,
            self.origin.y,
            0.0,
            self.pixel_height,
        ]
    }

    pub fn origin(&self) -> Coord<C> {
        self.origin
    }

    pub fn pixel_width(&self) -> C {
        self.pixel_width
    }

    pub fn pixel_height(&self) -> C {
        self.pixel_height
    }

    /// Length of a pixel's diagonal in world units.
    pub fn pixel_diagonal(&self) -> C {
        self.pixel_width.hypot(self.pixel_height)
    }

    /// Default maximum distance between profile samples: half the
    /// pixel diagonal.
    pub fn default_max_sample_dist(&self) -> C {
        0.5 * self.pixel_diagonal()
    }

    /// Returns the continuous pixel coordinate of a world coordinate.
    pub fn coord_to_pixel(&self, coord: Coord<C>) -> Coord<C> {
        Coord {
            x: (coord.x - self.origin.x) / self.pixel_width - 0.5,
            y: (coord.y - self.origin.y) / self.pixel_height - 0.5,
        }
    }

    /// Returns the world coordinate of a continuous pixel coordinate.
    pub fn pixel_to_coord(&self, pixel: Coord<C>) -> Coord<C> {
        Coord {
            x: self.origin.x + (pixel.x + 0.5) * self.pixel_width,
            y: self.origin.y + (pixel.y + 0.5) * self.pixel_height,
        }
    }

    /// Returns the world coordinate of a pixel's center.
    #[allow(clippy::cast_precision_loss)]
    pub fn pixel_center(&self, (col, row): (usize, usize)) -> Coord<C> {
        self.pixel_to_coord(Coord {
            x: col as C,
            y: row as C,
        })
    }

    /// Returns the pixel whose footprint contains `coord`, which may lie
    /// outside any particular grid.
    #[allow(clippy::cast_possible_truncation)]
    pub fn containing_pixel(&self, coord: Coord<C>) -> (i64, i64) {
        let Coord { x, y } = self.coord_to_pixel(coord);
        ((x + 0.5).floor() as i64, (y + 0.5).floor() as i64)
    }

    /// Returns a transform whose pixel `(0, 0)` is this transform's
    /// pixel `(col, row)`.
    #[allow(clippy::cast_precision_loss)]
    pub fn shifted(&self, (col, row): (usize, usize)) -> Self {
        Self {
            origin: Coord {
                x: self.origin.x + col as C * self.pixel_width,
                y: self.origin.y + row as C * self.pixel_height,
            },
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Coord, DemError, GeoTransform};
    use approx::assert_relative_eq;

    fn north_up() -> GeoTransform {
        GeoTransform::from_gdal([500_000.0, 0.4, 0.0, 6_200_000.0, 0.0, -0.4]).unwrap()
    }

    #[test]
    fn test_rotation_rejected() {
        let res = GeoTransform::from_gdal([0.0, 1.0, 0.1, 0.0, 0.0, -1.0]);
        assert!(matches!(res, Err(DemError::Rotation)));
        let res = GeoTransform::from_gdal([0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(matches!(res, Err(DemError::PixelSize(..))));
    }

    #[test]
    fn test_pixel_center_convention() {
        let gt = north_up();
        let center = gt.pixel_center((0, 0));
        assert_relative_eq!(center.x, 500_000.2, epsilon = 1e-6);
        assert_relative_eq!(center.y, 6_199_999.8, epsilon = 1e-6);
        let pixel = gt.coord_to_pixel(center);
        assert_relative_eq!(pixel.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(pixel.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_containing_pixel() {
        let gt = north_up();
        // Just inside the outer corner of pixel (0, 0).
        let corner = Coord {
            x: 500_000.01,
            y: 6_199_999.99,
        };
        assert_eq!(gt.containing_pixel(corner), (0, 0));
        // Just outside to the west.
        let west = Coord {
            x: 499_999.99,
            y: 6_199_999.99,
        };
        assert_eq!(gt.containing_pixel(west), (-1, 0));
    }

    #[test]
    fn test_default_max_sample_dist() {
        let gt = GeoTransform::from_gdal([0.0, 3.0, 0.0, 0.0, 0.0, -4.0]).unwrap();
        assert_relative_eq!(gt.pixel_diagonal(), 5.0);
        assert_relative_eq!(gt.default_max_sample_dist(), 2.5);
    }

    #[test]
    fn test_shifted() {
        let gt = north_up().shifted((10, 5));
        let center = gt.pixel_center((0, 0));
        assert_relative_eq!(center.x, 500_004.2, epsilon = 1e-6);
        assert_relative_eq!(center.y, 6_199_997.8, epsilon = 1e-6);
    }
}
