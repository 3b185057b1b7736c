use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("not a raster file {0}")]
    Magic(PathBuf),

    #[error("invalid raster file len {0} for {1}, expected {2}")]
    Len(u64, PathBuf, u64),

    #[error("geotransforms with rotation are unsupported")]
    Rotation,

    #[error("invalid pixel size ({0}, {1})")]
    PixelSize(f64, f64),

    #[error("{width}x{height} raster is too large")]
    Dimensions { width: usize, height: usize },

    #[error("{len} samples do not fill a {width}x{height} grid")]
    Shape {
        width: usize,
        height: usize,
        len: usize,
    },
}
