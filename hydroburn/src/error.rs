use dem::DemError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BurnError {
    #[error("missing or invalid parameter '{0}'")]
    Builder(&'static str),

    #[error("degenerate geometry: {0}")]
    Geometry(String),

    #[error("no elevation at ({x}, {y})")]
    Sampling { x: f64, y: f64 },

    #[error("profiles have {open} and {closed} samples")]
    ProfileMismatch { open: usize, closed: usize },

    #[error("{0}")]
    Bounds(String),

    #[error("{0}")]
    Dem(#[from] DemError),
}
