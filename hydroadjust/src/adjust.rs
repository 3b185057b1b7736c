use crate::{burn::report, options::Adjust, progress, vector};
use anyhow::{anyhow, Result};
use hydroburn::{
    dem::{geo::geometry::LineString, Raster, C},
    pipeline, Config, Horseshoe,
};
use indicatif::{MultiProgress, ProgressDrawTarget};
use log::{debug, info};
use rayon::prelude::*;
use std::{
    ffi::OsStr,
    fs::{self, File},
    io::BufReader,
    path::Path,
};

impl Adjust {
    pub fn run(&self) -> Result<()> {
        let config = self.config()?;
        debug!("{config:?}");
        let lines = match &self.lines {
            Some(path) => vector::read_lines(path)?,
            None => Vec::new(),
        };
        let horseshoes = match &self.horseshoes {
            Some(path) => vector::read_horseshoes(path)?,
            None => Vec::new(),
        };
        info!(
            "adjusting {} tiles; lines: {}, horseshoes: {}",
            self.input.len(),
            lines.len(),
            horseshoes.len()
        );

        fs::create_dir_all(&self.out_dir)?;
        let progress_group = MultiProgress::with_draw_target(ProgressDrawTarget::stderr_with_hz(4));
        let pb = progress_group.add(progress::tiles(self.input.len() as u64));
        self.input.par_iter().try_for_each(|dtm_path| {
            self._run(dtm_path, &lines, &horseshoes, &config)?;
            pb.inc(1);
            Ok::<(), anyhow::Error>(())
        })?;
        pb.finish();
        Ok(())
    }

    fn config(&self) -> Result<Config> {
        match &self.config {
            None => Ok(Config::default()),
            Some(path) => {
                let rdr = BufReader::new(File::open(path)?);
                Ok(serde_json::from_reader(rdr)?)
            }
        }
    }

    fn _run(
        &self,
        dtm_path: &Path,
        lines: &[LineString<C>],
        horseshoes: &[Horseshoe],
        config: &Config,
    ) -> Result<()> {
        let file_stem = dtm_path
            .file_stem()
            .and_then(OsStr::to_str)
            .ok_or_else(|| anyhow!("invalid raster path {}", dtm_path.display()))?;
        let out_file_path = self.out_dir.join(format!("{file_stem}.hydro.hdem"));

        if out_file_path.exists() && !self.overwrite {
            info!("{} exists, skipping", out_file_path.display());
            return Ok(());
        }

        let dtm = Raster::open(dtm_path, self.raster.mode())?;
        let (adjusted, result) = pipeline::adjust(&dtm, lines, horseshoes, config)?;
        report(dtm_path, &result);
        adjusted.save(&out_file_path)?;
        Ok(())
    }
}
