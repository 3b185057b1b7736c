use crate::{config::EdgePolicy, math::linspace, BurnError, Point3};
use dem::{ElevationSampler, C};
use geo::{
    geometry::{Coord, Line},
    EuclideanLength,
};
use log::debug;

/// Elevation samples evenly spaced along a straight line.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Planar distance from `start` to `end`.
    pub length: C,

    /// Samples from `start` to `end`, both inclusive.
    pub points: Vec<Point3>,
}

impl Profile {
    pub fn builder() -> ProfileBuilder {
        ProfileBuilder {
            start: None,
            end: None,
            max_sample_dist: None,
            samples: None,
            edge_policy: EdgePolicy::default(),
        }
    }

    /// Number of samples in this profile.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Upper bound on the number of samples in a single profile.
pub const MAX_SAMPLES: usize = 1 << 20;

/// Returns the number of samples needed so that no two consecutive
/// samples along `length` are further apart than `max_sample_dist`.
///
/// Fails with [`BurnError::Builder`] when `max_sample_dist` is not a
/// positive finite distance or would need more than [`MAX_SAMPLES`]
/// samples.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn sample_count(length: C, max_sample_dist: C) -> Result<usize, BurnError> {
    if !(max_sample_dist.is_finite() && max_sample_dist > 0.0) {
        return Err(BurnError::Builder("max_sample_dist"));
    }
    let n = (length / max_sample_dist).ceil() + 1.0;
    if !n.is_finite() || n > MAX_SAMPLES as C {
        return Err(BurnError::Builder("max_sample_dist"));
    }
    Ok((n as usize).max(2))
}

pub struct ProfileBuilder {
    /// Start point of the profile (required).
    start: Option<Coord<C>>,

    /// End point of the profile (required).
    end: Option<Coord<C>>,

    /// Maximum distance between samples (defaults to half the
    /// sampler's pixel diagonal).
    max_sample_dist: Option<C>,

    /// Exact number of samples, overriding `max_sample_dist`.
    samples: Option<usize>,

    /// Handling of samples outside the raster (defaults to failing).
    edge_policy: EdgePolicy,
}

impl ProfileBuilder {
    /// Start point of the profile (required).
    #[must_use]
    pub fn start(mut self, coord: Coord<C>) -> Self {
        self.start = Some(coord);
        self
    }

    /// End point of the profile (required).
    #[must_use]
    pub fn end(mut self, coord: Coord<C>) -> Self {
        self.end = Some(coord);
        self
    }

    /// Maximum distance between samples.
    #[must_use]
    pub fn max_sample_dist(mut self, dist: C) -> Self {
        self.max_sample_dist = Some(dist);
        self
    }

    /// Exact number of samples; used to give two profiles the same
    /// cardinality.
    #[must_use]
    pub fn samples(mut self, n: usize) -> Self {
        self.samples = Some(n);
        self
    }

    #[must_use]
    pub fn edge_policy(mut self, policy: EdgePolicy) -> Self {
        self.edge_policy = policy;
        self
    }

    pub fn build<S: ElevationSampler + ?Sized>(&self, sampler: &S) -> Result<Profile, BurnError> {
        let start = self.start.ok_or(BurnError::Builder("start"))?;
        let end = self.end.ok_or(BurnError::Builder("end"))?;

        let length = Line::new(start, end).euclidean_length();
        if length == 0.0 {
            return Err(BurnError::Geometry(format!(
                "profile at ({}, {}) has zero length",
                start.x, start.y
            )));
        }

        let n = match self.samples {
            Some(n) if n < 2 => {
                return Err(BurnError::Geometry(format!(
                    "profile needs at least 2 samples, got {n}"
                )))
            }
            Some(n) if n > MAX_SAMPLES => return Err(BurnError::Builder("samples")),
            Some(n) => n,
            None => {
                let max_sample_dist = self
                    .max_sample_dist
                    .unwrap_or_else(|| sampler.transform().default_max_sample_dist());
                sample_count(length, max_sample_dist)?
            }
        };

        let now = std::time::Instant::now();
        let delta = end - start;
        let points = linspace(0.0, 1.0, n)
            .map(|t| {
                let coord = start + delta * t;
                let lookup = match self.edge_policy {
                    EdgePolicy::Fail => coord,
                    EdgePolicy::Clamp => sampler.clamp_to_centers(coord),
                };
                sampler
                    .elevation(lookup)
                    .map(|z| Point3::from_coord(coord, z))
                    .ok_or(BurnError::Sampling {
                        x: coord.x,
                        y: coord.y,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "profile; len: {}, length: {length:.3}, exec: {:?}",
            points.len(),
            now.elapsed()
        );

        Ok(Profile { length, points })
    }
}

#[cfg(test)]
mod tests {
    use super::{sample_count, Profile, MAX_SAMPLES};
    use crate::{config::EdgePolicy, BurnError};
    use approx::assert_relative_eq;
    use dem::{GeoTransform, RasterGrid};
    use geo::coord;

    /// 20x20 grid of 1m pixels covering (0, 0)..(20, 20) where the
    /// elevation equals the x coordinate of the pixel center.
    fn x_ramp() -> RasterGrid {
        let gt = GeoTransform::from_gdal([0.0, 1.0, 0.0, 20.0, 0.0, -1.0]).unwrap();
        let mut samples = Vec::new();
        for _row in 0..20 {
            for col in 0..20_u8 {
                samples.push(f32::from(col) + 0.5);
            }
        }
        RasterGrid::new(gt, (20, 20), None, samples).unwrap()
    }

    #[test]
    fn test_sample_count() {
        assert_eq!(sample_count(10.0, 2.0).unwrap(), 6);
        assert_eq!(sample_count(4.0, 2.0).unwrap(), 3);
        assert_eq!(sample_count(4.1, 2.0).unwrap(), 4);
        assert_eq!(sample_count(0.1, 2.0).unwrap(), 2);
    }

    #[test]
    fn test_sample_count_limits() {
        for dist in [1e-300, 1e-9, 0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(sample_count(10.0, dist), Err(BurnError::Builder("max_sample_dist"))),
                "{dist}"
            );
        }
        assert_eq!(sample_count(MAX_SAMPLES as f64 - 1.0, 1.0).unwrap(), MAX_SAMPLES);
        assert!(sample_count(MAX_SAMPLES as f64, 1.0).is_err());

        let builder = Profile::builder()
            .start(coord! { x: 2.5, y: 10.0 })
            .end(coord! { x: 12.5, y: 10.0 });
        let res = builder.max_sample_dist(1e-300).build(&x_ramp());
        assert!(matches!(res, Err(BurnError::Builder("max_sample_dist"))));
        let res = Profile::builder()
            .start(coord! { x: 2.5, y: 10.0 })
            .end(coord! { x: 12.5, y: 10.0 })
            .samples(MAX_SAMPLES + 1)
            .build(&x_ramp());
        assert!(matches!(res, Err(BurnError::Builder("samples"))));
    }

    #[test]
    fn test_profile() {
        let grid = x_ramp();
        let profile = Profile::builder()
            .start(coord! { x: 2.5, y: 10.0 })
            .end(coord! { x: 12.5, y: 10.0 })
            .max_sample_dist(2.0)
            .build(&grid)
            .unwrap();
        assert_eq!(profile.len(), 6);
        assert_relative_eq!(profile.length, 10.0);
        for (i, point) in profile.points.iter().enumerate() {
            let expected_x = 2.5 + 2.0 * i as f64;
            assert_relative_eq!(point.x, expected_x, epsilon = 1e-9);
            assert_relative_eq!(point.y, 10.0);
            assert_relative_eq!(point.z, expected_x, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_default_sample_dist() {
        let grid = x_ramp();
        // Half the diagonal of a 1m pixel.
        let profile = Profile::builder()
            .start(coord! { x: 2.5, y: 10.0 })
            .end(coord! { x: 3.5, y: 10.0 })
            .build(&grid)
            .unwrap();
        assert_eq!(profile.len(), sample_count(1.0, 0.5 * 2.0_f64.sqrt()).unwrap());
        assert_eq!(profile.len(), 3);
    }

    #[test]
    fn test_zero_length() {
        let res = Profile::builder()
            .start(coord! { x: 2.5, y: 10.0 })
            .end(coord! { x: 2.5, y: 10.0 })
            .max_sample_dist(1.0)
            .build(&x_ramp());
        assert!(matches!(res, Err(BurnError::Geometry(_))));
    }

    #[test]
    fn test_missing_parameters() {
        let res = Profile::builder().end(coord! { x: 1.0, y: 1.0 }).build(&x_ramp());
        assert!(matches!(res, Err(BurnError::Builder("start"))));
        let res = Profile::builder()
            .start(coord! { x: 1.0, y: 1.0 })
            .end(coord! { x: 3.0, y: 1.0 })
            .samples(1)
            .build(&x_ramp());
        assert!(matches!(res, Err(BurnError::Geometry(_))));
    }

    #[test]
    fn test_edge_policy() {
        let grid = x_ramp();
        // The end lies in the outer half of the last pixel column.
        let builder = Profile::builder()
            .start(coord! { x: 15.0, y: 10.0 })
            .end(coord! { x: 19.8, y: 10.0 })
            .max_sample_dist(1.0);
        let res = builder.build(&grid);
        assert!(matches!(res, Err(BurnError::Sampling { .. })));

        let profile = builder
            .edge_policy(EdgePolicy::Clamp)
            .build(&grid)
            .unwrap();
        let last = profile.points.last().unwrap();
        assert_relative_eq!(last.x, 19.8);
        assert_relative_eq!(last.z, 19.5);
    }
}
