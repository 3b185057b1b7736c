//! `.hdem` elevation raster files.
//!
//! Layout (all values little-endian):
//!
//! | bytes     | content                                          |
//! |-----------|--------------------------------------------------|
//! | 8         | magic `HYDRODEM`                                 |
//! | 4 + 4     | width, height (`u32`)                            |
//! | 6 * 8     | GDAL-ordered geotransform (`f64`)                |
//! | 8         | nodata (`f64`, `NaN` when the raster has none)   |
//! | 4 * w * h | samples (`f32`), row-major, top row first        |

use crate::{DemError, ElevationSampler, GeoTransform, RasterGrid};
use byteorder::{LittleEndian as LE, ReadBytesExt, WriteBytesExt};
use memmap2::Mmap;
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Read, Write},
    mem::size_of,
    path::Path,
};

const MAGIC: &[u8; 8] = b"HYDRODEM";

const HEADER_LEN: usize = MAGIC.len() + 2 * size_of::<u32>() + 7 * size_of::<f64>();

/// A read-only elevation raster loaded from disk.
pub struct Raster {
    transform: GeoTransform,

    /// Number of (columns, rows) in this raster.
    dimensions: (usize, usize),

    nodata: Option<f32>,

    /// Elevation samples.
    samples: SampleStore,
}

enum SampleStore {
    InMem(Box<[f32]>),
    MemMap(Mmap),
}

impl SampleStore {
    fn get_unchecked(&self, index: usize) -> f32 {
        match self {
            Self::InMem(samples) => samples[index],
            Self::MemMap(raw) => {
                let start = HEADER_LEN + index * size_of::<f32>();
                let mut bytes = [0_u8; size_of::<f32>()];
                bytes.copy_from_slice(&raw[start..start + size_of::<f32>()]);
                f32::from_le_bytes(bytes)
            }
        }
    }
}

/// How to access raster samples.
///
/// The trade off between loading raster data into memory versus memory
/// mapping is not obvious, and you should measure both before
/// deciding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterMode {
    /// Parse samples and load into memory.
    #[default]
    InMem,

    /// Memory map file contents.
    MemMap,
}

struct Header {
    transform: GeoTransform,
    dimensions: (usize, usize),
    nodata: Option<f32>,
}

impl Raster {
    pub fn open<P: AsRef<Path>>(path: P, mode: RasterMode) -> Result<Self, DemError> {
        match mode {
            RasterMode::InMem => Self::load(path),
            RasterMode::MemMap => Self::memmap(path),
        }
    }

    /// Returns a Raster read into memory from the file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DemError> {
        let path = path.as_ref();
        let mut file = BufReader::new(File::open(path)?);
        let header = read_header(&mut file, path)?;
        check_len(path, header.dimensions)?;

        let (width, height) = header.dimensions;
        let mut samples = Vec::with_capacity(width * height);
        for _ in 0..(width * height) {
            samples.push(file.read_f32::<LE>()?);
        }

        Ok(Self {
            transform: header.transform,
            dimensions: header.dimensions,
            nodata: header.nodata,
            samples: SampleStore::InMem(samples.into_boxed_slice()),
        })
    }

    /// Returns a Raster using the memory-mapped file as storage.
    pub fn memmap<P: AsRef<Path>>(path: P) -> Result<Self, DemError> {
        let path = path.as_ref();
        let header = read_header(&mut BufReader::new(File::open(path)?), path)?;
        check_len(path, header.dimensions)?;

        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        Ok(Self {
            transform: header.transform,
            dimensions: header.dimensions,
            nodata: header.nodata,
            samples: SampleStore::MemMap(mmap),
        })
    }

    /// Returns the number of samples in this raster.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        let (width, height) = self.dimensions;
        width * height
    }
}

impl ElevationSampler for Raster {
    fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    fn dimensions(&self) -> (usize, usize) {
        self.dimensions
    }

    fn nodata(&self) -> Option<f32> {
        self.nodata
    }

    fn cell(&self, col: usize, row: usize) -> Option<f32> {
        let (width, height) = self.dimensions;
        (col < width && row < height).then(|| self.samples.get_unchecked(row * width + col))
    }
}

fn read_header<R: Read>(rdr: &mut R, path: &Path) -> Result<Header, DemError> {
    let mut magic = [0_u8; 8];
    rdr.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(DemError::Magic(path.to_owned()));
    }
    let width = rdr.read_u32::<LE>()? as usize;
    let height = rdr.read_u32::<LE>()? as usize;
    let mut coefficients = [0.0; 6];
    rdr.read_f64_into::<LE>(&mut coefficients)?;
    let transform = GeoTransform::from_gdal(coefficients)?;
    let nodata = rdr.read_f64::<LE>()?;
    #[allow(clippy::cast_possible_truncation)]
    let nodata = (!nodata.is_nan()).then_some(nodata as f32);
    Ok(Header {
        transform,
        dimensions: (width, height),
        nodata,
    })
}

fn check_len(path: &Path, (width, height): (usize, usize)) -> Result<(), DemError> {
    let expected = width
        .checked_mul(height)
        .and_then(|len| len.checked_mul(size_of::<f32>()))
        .and_then(|len| len.checked_add(HEADER_LEN))
        .ok_or(DemError::Dimensions { width, height })? as u64;
    let actual = path.metadata()?.len();
    if actual == expected {
        Ok(())
    } else {
        Err(DemError::Len(actual, path.to_owned(), expected))
    }
}

pub(crate) fn write(path: &Path, grid: &RasterGrid) -> Result<(), DemError> {
    let (width, height) = grid.dimensions();
    let too_large = |_| DemError::Dimensions { width, height };
    let dimensions = (
        u32::try_from(width).map_err(too_large)?,
        u32::try_from(height).map_err(too_large)?,
    );

    let tmp_path = path.with_extension("tmp");
    let res = write_tmp(&tmp_path, dimensions, grid)
        .and_then(|()| fs::rename(&tmp_path, path).map_err(DemError::from));
    if res.is_err() {
        // Leave no partial file behind; the write error is what matters.
        let _ = fs::remove_file(&tmp_path);
    }
    res
}

fn write_tmp(
    tmp_path: &Path,
    (width, height): (u32, u32),
    grid: &RasterGrid,
) -> Result<(), DemError> {
    let mut wtr = BufWriter::new(File::create(tmp_path)?);
    wtr.write_all(MAGIC)?;
    wtr.write_u32::<LE>(width)?;
    wtr.write_u32::<LE>(height)?;
    for coefficient in grid.transform().to_gdal() {
        wtr.write_f64::<LE>(coefficient)?;
    }
    wtr.write_f64::<LE>(grid.nodata().map_or(f64::NAN, f64::from))?;
    for sample in grid.samples() {
        wtr.write_f32::<LE>(*sample)?;
    }
    wtr.flush()?;
    Ok(())
}
