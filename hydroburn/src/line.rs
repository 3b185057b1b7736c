use crate::{config::EdgePolicy, BurnError, LineFeature, Point3};
use dem::{ElevationSampler, C};
use geo::geometry::LineString;

/// Samples the raster elevation at every vertex of a planar line
/// object.
pub fn sample_line<S: ElevationSampler + ?Sized>(
    line: &LineString<C>,
    sampler: &S,
    edge_policy: EdgePolicy,
) -> Result<LineFeature, BurnError> {
    let vertices = line
        .coords()
        .map(|&coord| {
            let lookup = match edge_policy {
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
    LineFeature::from_vertices(&vertices)
}
