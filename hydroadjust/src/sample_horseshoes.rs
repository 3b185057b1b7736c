use crate::{options::SampleHorseshoes, vector};
use anyhow::Result;
use hydroburn::{dem::Raster, pipeline, EdgePolicy, SamplingConfig};
use log::warn;

impl SampleHorseshoes {
    pub fn run(&self) -> Result<()> {
        let dtm = Raster::open(&self.dtm, self.raster.mode())?;
        let horseshoes = vector::read_horseshoes(&self.input)?;
        let config = SamplingConfig {
            max_sample_dist: self.max_sample_dist,
            edge_policy: if self.clamp {
                EdgePolicy::Clamp
            } else {
                EdgePolicy::Fail
            },
        };

        let layer = pipeline::render_horseshoes("horseshoes", &horseshoes, &dtm, &config);
        let mut segments = Vec::new();
        for (index, feature) in layer.features.into_iter().enumerate() {
            match feature {
                Ok(grill) => {
                    segments.extend(grill.segments().iter().map(|s| vec![s.start, s.end]));
                }
                Err(e) => warn!("skipping horseshoe {index}: {e}"),
            }
        }

        vector::write_lines(&self.output, segments)
    }
}
