use clap::{Args, Parser};
use hydroburn::dem::RasterMode;
use std::path::PathBuf;

/// Burn culverts and bridges into terrain rasters so that water can
/// flow through them.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub enum Cli {
    /// Sample raster elevation at the vertices of each line and write
    /// them out as 3D lines.
    SampleLines(SampleLines),

    /// Render each horseshoe into a grill and write one 3D line per
    /// grill segment.
    SampleHorseshoes(SampleHorseshoes),

    /// Burn 3D lines into a copy of a raster.
    Burn(Burn),

    /// Run the complete adjustment for one or more raster tiles.
    Adjust(Adjust),
}

#[derive(Debug, Clone, Args)]
pub struct RasterArgs {
    /// Memory-map the raster instead of loading it.
    #[arg(long)]
    pub memmap: bool,
}

#[derive(Debug, Clone, Args)]
pub struct SampleLines {
    /// Terrain raster (.hdem).
    #[arg(long)]
    pub dtm: PathBuf,

    /// GeoJSON file of planar lines.
    #[arg(short, long)]
    pub input: PathBuf,

    /// GeoJSON file to write the sampled 3D lines to.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Sample at the nearest pixel center when a vertex lies too close
    /// to the raster edge.
    #[arg(long)]
    pub clamp: bool,

    #[command(flatten)]
    pub raster: RasterArgs,
}

#[derive(Debug, Clone, Args)]
pub struct SampleHorseshoes {
    /// Terrain raster (.hdem).
    #[arg(long)]
    pub dtm: PathBuf,

    /// GeoJSON file of four-point horseshoe lines.
    #[arg(short, long)]
    pub input: PathBuf,

    /// GeoJSON file to write the grill segments to.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Maximum distance between profile samples. Defaults to half the
    /// raster's pixel diagonal.
    #[arg(long)]
    pub max_sample_dist: Option<f64>,

    /// Sample at the nearest pixel center when a profile runs too close
    /// to the raster edge.
    #[arg(long)]
    pub clamp: bool,

    #[command(flatten)]
    pub raster: RasterArgs,
}

#[derive(Debug, Clone, Args)]
pub struct Burn {
    /// Terrain raster (.hdem) to burn into. It is not modified.
    #[arg(long)]
    pub dtm: PathBuf,

    /// Raster file to write the burned raster to.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Keep the lower elevation where burns overlap instead of the
    /// later one.
    #[arg(long)]
    pub min_elevation: bool,

    #[command(flatten)]
    pub raster: RasterArgs,

    /// GeoJSON files of 3D lines. Each file is a layer; layers are
    /// burned in the order given.
    #[arg(required = true)]
    pub layers: Vec<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct Adjust {
    /// Reprocess a tile even if the corresponding output already
    /// exists.
    #[arg(short = 'O', long)]
    pub overwrite: bool,

    /// Output directory.
    #[arg(short, long)]
    pub out_dir: PathBuf,

    /// GeoJSON file of planar culvert lines.
    #[arg(long)]
    pub lines: Option<PathBuf>,

    /// GeoJSON file of four-point horseshoe lines.
    #[arg(long)]
    pub horseshoes: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub raster: RasterArgs,

    /// Input terrain rasters (.hdem).
    #[arg(required = true)]
    pub input: Vec<PathBuf>,
}

impl RasterArgs {
    pub fn mode(&self) -> RasterMode {
        if self.memmap {
            RasterMode::MemMap
        } else {
            RasterMode::InMem
        }
    }
}
