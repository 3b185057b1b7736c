use crate::BurnError;
use dem::C;
use geo::{
    geometry::{Coord, Line, LineString, MultiPoint, Rect},
    BoundingRect, EuclideanLength,
};

/// A planar coordinate with an elevation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: C,
    pub y: C,
    pub z: C,
}

impl Point3 {
    pub fn new(x: C, y: C, z: C) -> Self {
        Self { x, y, z }
    }

    pub fn from_coord(Coord { x, y }: Coord<C>, z: C) -> Self {
        Self { x, y, z }
    }

    /// Returns the planar part of this point.
    pub fn xy(&self) -> Coord<C> {
        Coord {
            x: self.x,
            y: self.y,
        }
    }
}

/// A straight line between two elevation-bearing points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment3 {
    pub start: Point3,
    pub end: Point3,
}

impl Segment3 {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    pub fn planar(&self) -> Line<C> {
        Line::new(self.start.xy(), self.end.xy())
    }

    /// Planar length.
    pub fn length(&self) -> C {
        self.planar().euclidean_length()
    }

    /// Returns `true` if both endpoints share the same planar location.
    pub fn is_degenerate(&self) -> bool {
        self.start.xy() == self.end.xy()
    }

    /// Returns the parameter in `[0, 1]` of the point on this segment
    /// closest to `coord`.
    pub fn project(&self, coord: Coord<C>) -> C {
        let d = self.end.xy() - self.start.xy();
        let len_sq = d.x * d.x + d.y * d.y;
        if len_sq == 0.0 {
            return 0.0;
        }
        let v = coord - self.start.xy();
        ((v.x * d.x + v.y * d.y) / len_sq).clamp(0.0, 1.0)
    }

    /// Linearly interpolated elevation at parameter `t`.
    pub fn elevation_at(&self, t: C) -> C {
        self.start.z + t * (self.end.z - self.start.z)
    }
}

/// An ordered sequence of connected segments.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFeature {
    segments: Vec<Segment3>,
}

impl LineFeature {
    /// Connects consecutive `vertices`; at least two are required.
    pub fn from_vertices(vertices: &[Point3]) -> Result<Self, BurnError> {
        if vertices.len() < 2 {
            return Err(BurnError::Geometry(format!(
                "line has {} vertices, need at least 2",
                vertices.len()
            )));
        }
        let segments = vertices
            .windows(2)
            .map(|pair| Segment3::new(pair[0], pair[1]))
            .collect();
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment3] {
        &self.segments
    }

    /// Returns the vertices this line was built from.
    pub fn vertices(&self) -> impl Iterator<Item = Point3> + '_ {
        self.segments
            .first()
            .map(|s| s.start)
            .into_iter()
            .chain(self.segments.iter().map(|s| s.end))
    }
}

/// A four point (A, B, C, D) horseshoe outline.
///
/// The "open" profile runs A→D across the mouth of the horseshoe and
/// the "closed" profile runs B→C across its back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horseshoe {
    pub a: Coord<C>,
    pub b: Coord<C>,
    pub c: Coord<C>,
    pub d: Coord<C>,
}

impl Horseshoe {
    pub fn new(a: Coord<C>, b: Coord<C>, c: Coord<C>, d: Coord<C>) -> Self {
        Self { a, b, c, d }
    }

    /// Profile A→D.
    pub fn open(&self) -> Line<C> {
        Line::new(self.a, self.d)
    }

    /// Profile B→C.
    pub fn closed(&self) -> Line<C> {
        Line::new(self.b, self.c)
    }

    pub fn bounding_rect(&self) -> Rect<C> {
        let points = MultiPoint::from(vec![self.a, self.b, self.c, self.d]);
        // Four points always have a bounding rect.
        points
            .bounding_rect()
            .unwrap_or_else(|| Rect::new(self.a, self.a))
    }
}

impl TryFrom<&LineString<C>> for Horseshoe {
    type Error = BurnError;

    fn try_from(line: &LineString<C>) -> Result<Self, BurnError> {
        match line.0.as_slice() {
            [a, b, c, d] => Ok(Self::new(*a, *b, *c, *d)),
            other => Err(BurnError::Geometry(format!(
                "horseshoe has {} points, need exactly 4",
                other.len()
            ))),
        }
    }
}

/// Returns the bounding rect of a set of segments.
pub(crate) fn segments_bounding_rect(segments: &[Segment3]) -> Option<Rect<C>> {
    let points: MultiPoint<C> = segments
        .iter()
        .flat_map(|s| [s.start.xy(), s.end.xy()])
        .collect::<Vec<_>>()
        .into();
    points.bounding_rect()
}
