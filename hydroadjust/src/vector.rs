//! GeoJSON line I/O.
//!
//! Lines are read from every `LineString` and `MultiLineString` in a
//! file, in file order; other geometry is ignored. Lines are written as
//! a `FeatureCollection` of 3D `LineString`s.

use anyhow::{anyhow, Result};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use hydroburn::{
    dem::C,
    geo::geometry::{Coord, LineString},
    BurnError, Horseshoe, LineFeature, Point3,
};
use log::warn;
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::Path,
};

type Position = Vec<f64>;

fn read_positions(path: &Path) -> Result<Vec<Vec<Position>>> {
    let file = File::open(path)?;
    let geometries: Vec<Geometry> = match GeoJson::from_reader(BufReader::new(file))? {
        GeoJson::Geometry(geometry) => vec![geometry],
        GeoJson::Feature(feature) => feature.geometry.into_iter().collect(),
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .filter_map(|feature| feature.geometry)
            .collect(),
    };

    let mut lines = Vec::new();
    for geometry in geometries {
        match geometry.value {
            Value::LineString(line) => lines.push(line),
            Value::MultiLineString(parts) => lines.extend(parts),
            _ => warn!("{}: ignoring non-line geometry", path.display()),
        }
    }
    Ok(lines)
}

fn planar(position: &[f64]) -> Result<Coord<C>> {
    match position {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => Err(anyhow!("position with {} coordinates", position.len())),
    }
}

/// Reads planar lines, dropping any elevation.
pub fn read_lines(path: &Path) -> Result<Vec<LineString<C>>> {
    read_positions(path)?
        .into_iter()
        .map(|line| {
            line.iter()
                .map(|p| planar(p))
                .collect::<Result<Vec<_>>>()
                .map(LineString::from)
        })
        .collect()
}

/// Reads horseshoes, skipping lines that do not have exactly four
/// points.
pub fn read_horseshoes(path: &Path) -> Result<Vec<Horseshoe>> {
    let mut horseshoes = Vec::new();
    for (index, line) in read_lines(path)?.iter().enumerate() {
        match Horseshoe::try_from(line) {
            Ok(horseshoe) => horseshoes.push(horseshoe),
            Err(e) => warn!("{}[{index}]: {e}", path.display()),
        }
    }
    Ok(horseshoes)
}

/// Reads 3D lines. A line with fewer than two vertices, or with a
/// vertex missing its elevation, is returned as an error in its place.
pub fn read_line_features(path: &Path) -> Result<Vec<Result<LineFeature, BurnError>>> {
    Ok(read_positions(path)?
        .into_iter()
        .map(|line| {
            let vertices = line
                .iter()
                .map(|position| match position.as_slice() {
                    [x, y, z, ..] => Ok(Point3::new(*x, *y, *z)),
                    _ => Err(BurnError::Geometry(format!(
                        "vertex {position:?} has no elevation"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?;
            LineFeature::from_vertices(&vertices)
        })
        .collect())
}

/// Writes each vertex list as a 3D `LineString` feature.
///
/// Features carry their position in `lines` as an `index` property.
/// The file is written next to `path` first and renamed into place once
/// complete.
pub fn write_lines<I>(path: &Path, lines: I) -> Result<()>
where
    I: IntoIterator<Item = Vec<Point3>>,
{
    let features = lines
        .into_iter()
        .enumerate()
        .map(|(index, vertices)| {
            let positions = vertices.iter().map(|p| vec![p.x, p.y, p.z]).collect();
            let mut properties = JsonObject::new();
            properties.insert("index".into(), index.into());
            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::LineString(positions))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();
    let collection = GeoJson::from(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    });

    let tmp_path = path.with_extension("tmp");
    let res = write_tmp(&tmp_path, &collection).and_then(|()| Ok(fs::rename(&tmp_path, path)?));
    if res.is_err() {
        // Leave no partial file behind; the write error is what matters.
        let _ = fs::remove_file(&tmp_path);
    }
    res
}

fn write_tmp(tmp_path: &Path, collection: &GeoJson) -> Result<()> {
    let mut wtr = BufWriter::new(File::create(tmp_path)?);
    serde_json::to_writer(&mut wtr, collection)?;
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{read_horseshoes, read_line_features, read_lines, write_lines};
    use approx::assert_relative_eq;
    use hydroburn::{BurnError, Point3};
    use std::{fs, path::PathBuf};

    fn tmp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hydroadjust-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_read_mixed_geometry() {
        let path = tmp_path("mixed.geojson");
        fs::write(
            &path,
            r#"{
              "type": "FeatureCollection",
              "features": [
                { "type": "Feature", "properties": {},
                  "geometry": { "type": "Point", "coordinates": [0.0, 0.0] } },
                { "type": "Feature", "properties": {},
                  "geometry": { "type": "LineString", "coordinates": [[1.0, 2.0], [3.0, 4.0]] } },
                { "type": "Feature", "properties": {},
                  "geometry": { "type": "MultiLineString", "coordinates": [
                    [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]],
                    [[5.0, 5.0], [6.0, 6.0]]
                  ] } }
              ]
            }"#,
        )
        .unwrap();

        let lines = read_lines(&path).unwrap();
        assert_eq!(lines.len(), 3);
        assert_relative_eq!(lines[0].0[1].y, 4.0);

        let horseshoes = read_horseshoes(&path).unwrap();
        assert_eq!(horseshoes.len(), 1);
        assert_relative_eq!(horseshoes[0].c.x, 1.0);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_then_read_3d() {
        let path = tmp_path("lines3d.geojson");
        let lines = vec![
            vec![Point3::new(0.0, 0.0, 10.0), Point3::new(4.0, 3.0, 12.5)],
            vec![
                Point3::new(1.0, 1.0, 1.0),
                Point3::new(2.0, 1.0, 2.0),
                Point3::new(3.0, 1.0, 3.0),
            ],
        ];
        write_lines(&path, lines.clone()).unwrap();
        assert!(!path.with_extension("tmp").exists());

        let features = read_line_features(&path).unwrap();
        assert_eq!(features.len(), 2);
        let first = features[0].as_ref().unwrap();
        assert_eq!(first.vertices().collect::<Vec<_>>(), lines[0]);
        let second = features[1].as_ref().unwrap();
        assert_eq!(second.segments().len(), 2);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_planar_as_3d() {
        let path = tmp_path("planar.geojson");
        fs::write(
            &path,
            r#"{ "type": "LineString", "coordinates": [[1.0, 2.0], [3.0, 4.0]] }"#,
        )
        .unwrap();
        let features = read_line_features(&path).unwrap();
        assert!(matches!(features[0], Err(BurnError::Geometry(_))));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_failed_write_removes_tmp_file() {
        let path = tmp_path("is-dir.geojson");
        fs::create_dir_all(&path).unwrap();
        let lines = vec![vec![Point3::new(0.0, 0.0, 1.0), Point3::new(1.0, 0.0, 1.0)]];
        assert!(write_lines(&path, lines).is_err());
        assert!(!path.with_extension("tmp").exists());
        fs::remove_dir(&path).unwrap();
    }
}
