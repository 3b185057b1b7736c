//! Horseshoe rendering.
//!
//! A horseshoe spans a bridge or similar opening: elevation is known
//! along its open (A→D) and closed (B→C) profiles, and the surface in
//! between should interpolate both. Rather than evaluating a bilinear
//! surface over the quadrilateral, both profiles are sampled densely
//! with the same number of points and paired up into a "grill" of
//! cross segments. Burning each grill segment then interpolates across
//! the horseshoe, while the dense sampling interpolates along it.

use crate::{
    config::SamplingConfig,
    profile::{sample_count, Profile},
    BurnError, Horseshoe, Segment3,
};
use dem::ElevationSampler;
use geo::EuclideanLength;
use log::debug;

/// Cross segments connecting two equally sampled profiles.
#[derive(Debug, Clone, PartialEq)]
pub struct Grill {
    segments: Vec<Segment3>,
}

impl Grill {
    /// Pairs sample `i` of `open` with sample `i` of `closed`.
    pub fn from_profiles(open: &Profile, closed: &Profile) -> Result<Self, BurnError> {
        if open.len() != closed.len() {
            return Err(BurnError::ProfileMismatch {
                open: open.len(),
                closed: closed.len(),
            });
        }
        let segments = open
            .points
            .iter()
            .zip(&closed.points)
            .map(|(a, b)| Segment3::new(*a, *b))
            .collect();
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment3] {
        &self.segments
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

impl Horseshoe {
    /// Samples both profiles from `sampler` and returns the grill
    /// between them.
    ///
    /// Both profiles get the sample count required by the longer one,
    /// so neither exceeds the maximum sample distance.
    pub fn render<S: ElevationSampler + ?Sized>(
        &self,
        sampler: &S,
        config: &SamplingConfig,
    ) -> Result<Grill, BurnError> {
        let max_sample_dist = config.max_sample_dist(sampler.transform());

        let open_length = self.open().euclidean_length();
        let closed_length = self.closed().euclidean_length();
        for (name, length) in [("open", open_length), ("closed", closed_length)] {
            if length == 0.0 {
                return Err(BurnError::Geometry(format!(
                    "horseshoe {name} profile at ({}, {}) has zero length",
                    self.a.x, self.a.y
                )));
            }
        }

        let n = sample_count(open_length, max_sample_dist)?
            .max(sample_count(closed_length, max_sample_dist)?);
        debug!("horseshoe; open: {open_length:.3}, closed: {closed_length:.3}, samples: {n}");

        let open = Profile::builder()
            .start(self.a)
            .end(self.d)
            .samples(n)
            .edge_policy(config.edge_policy)
            .build(sampler)?;
        let closed = Profile::builder()
            .start(self.b)
            .end(self.c)
            .samples(n)
            .edge_policy(config.edge_policy)
            .build(sampler)?;

        Grill::from_profiles(&open, &closed)
    }
}
