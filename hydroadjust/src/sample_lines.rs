use crate::{options::SampleLines, vector};
use anyhow::Result;
use hydroburn::{dem::Raster, sample_line, EdgePolicy, Point3};
use log::{info, warn};

impl SampleLines {
    pub fn run(&self) -> Result<()> {
        let dtm = Raster::open(&self.dtm, self.raster.mode())?;
        let lines = vector::read_lines(&self.input)?;
        let edge_policy = if self.clamp {
            EdgePolicy::Clamp
        } else {
            EdgePolicy::Fail
        };

        let mut sampled: Vec<Vec<Point3>> = Vec::with_capacity(lines.len());
        for (index, line) in lines.iter().enumerate() {
            match sample_line(line, &dtm, edge_policy) {
                Ok(feature) => sampled.push(feature.vertices().collect()),
                Err(e) => warn!("skipping line {index}: {e}"),
            }
        }
        info!(
            "sampled lines; valid: {}, invalid: {}",
            sampled.len(),
            lines.len() - sampled.len()
        );

        vector::write_lines(&self.output, sampled)
    }
}
