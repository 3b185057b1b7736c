//! Supercover line traversal.
//!
//! Works in continuous pixel coordinates where pixel `(col, row)` is
//! centered on `(col, row)` and covers the closed square
//! `[col - 0.5, col + 0.5] x [row - 0.5, row + 0.5]`. Every pixel whose
//! closed footprint the segment touches is yielded exactly once,
//! including both side pixels when the segment passes through a shared
//! corner.
//!
//! The traversal sweeps columns in the direction of travel; within a
//! column it yields the rows spanned by the part of the segment inside
//! that column. Neighbouring columns share their boundary intersection,
//! so consecutive pixels are always edge-adjacent (or, at an exact
//! corner crossing, all four pixels around the corner are yielded).

use dem::C;
use geo::geometry::Coord;

/// Iterator over the in-bounds pixels a segment crosses.
#[derive(Debug, Clone)]
pub struct Supercover {
    start: Coord<C>,
    end: Coord<C>,
    x_lo: C,
    x_hi: C,
    height: i64,

    /// Column currently being emitted.
    col: i64,
    next_col: i64,
    col_end: i64,
    col_step: i64,

    row: i64,
    row_end: i64,
    row_step: i64,
}

impl Supercover {
    /// Traverses `start` to `end` clipped to a `width x height` grid.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn new(start: Coord<C>, end: Coord<C>, (width, height): (usize, usize)) -> Self {
        let x_lo = start.x.min(end.x);
        let x_hi = start.x.max(end.x);
        let col_step = if end.x >= start.x { 1 } else { -1 };
        let row_step = if end.y >= start.y { 1 } else { -1 };

        let finite = [start.x, start.y, end.x, end.y]
            .iter()
            .all(|v| v.is_finite());
        let first = ((x_lo - 0.5).ceil() as i64).max(0);
        let last = ((x_hi + 0.5).floor() as i64).min(width as i64 - 1);
        let (next_col, col_end) = if !finite || first > last {
            (0, 0)
        } else if col_step > 0 {
            (first, last + 1)
        } else {
            (last, first - 1)
        };

        Self {
            start,
            end,
            x_lo,
            x_hi,
            height: height as i64,
            col: 0,
            next_col,
            col_end,
            col_step,
            row: 0,
            row_end: 0,
            row_step,
        }
    }

    fn y_at(&self, x: C) -> C {
        if x == self.end.x {
            self.end.y
        } else if x == self.start.x {
            self.start.y
        } else {
            let t = (x - self.start.x) / (self.end.x - self.start.x);
            self.start.y + t * (self.end.y - self.start.y)
        }
    }

    /// Returns the clipped, inclusive range of rows touched in `col`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn row_span(&self, col: i64) -> (i64, i64) {
        let (y_a, y_b) = if self.start.x == self.end.x {
            (self.start.y, self.end.y)
        } else {
            let x_a = (col as C - 0.5).max(self.x_lo);
            let x_b = (col as C + 0.5).min(self.x_hi);
            (self.y_at(x_a), self.y_at(x_b))
        };
        let lo = ((y_a.min(y_b) - 0.5).ceil() as i64).max(0);
        let hi = ((y_a.max(y_b) + 0.5).floor() as i64).min(self.height - 1);
        (lo, hi)
    }
}

impl Iterator for Supercover {
    type Item = (usize, usize);

    #[allow(clippy::cast_sign_loss)]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.row != self.row_end {
                let row = self.row;
                self.row += self.row_step;
                return Some((self.col as usize, row as usize));
            }
            if self.next_col == self.col_end {
                return None;
            }
            self.col = self.next_col;
            self.next_col += self.col_step;
            let (lo, hi) = self.row_span(self.col);
            (self.row, self.row_end) = if lo > hi {
                (0, 0)
            } else if self.row_step > 0 {
                (lo, hi + 1)
            } else {
                (hi, lo - 1)
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Supercover;
    use geo::{coord, Intersects, Line, Rect};
    use std::collections::HashSet;

    fn cover(start: (f64, f64), end: (f64, f64), dims: (usize, usize)) -> Vec<(usize, usize)> {
        Supercover::new(
            coord! { x: start.0, y: start.1 },
            coord! { x: end.0, y: end.1 },
            dims,
        )
        .collect()
    }

    /// Every pixel whose closed footprint intersects the segment.
    #[allow(clippy::cast_precision_loss)]
    fn brute_force(
        start: (f64, f64),
        end: (f64, f64),
        (width, height): (usize, usize),
    ) -> HashSet<(usize, usize)> {
        let line = Line::new(coord! { x: start.0, y: start.1 }, coord! { x: end.0, y: end.1 });
        let mut pixels = HashSet::new();
        for row in 0..height {
            for col in 0..width {
                let (c, r) = (col as f64, row as f64);
                let footprint = Rect::new(
                    coord! { x: c - 0.5, y: r - 0.5 },
                    coord! { x: c + 0.5, y: r + 0.5 },
                );
                if line.intersects(&footprint) {
                    pixels.insert((col, row));
                }
            }
        }
        pixels
    }

    fn assert_edge_connected(pixels: &[(usize, usize)]) {
        for pair in pixels.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let d = a.0.abs_diff(b.0) + a.1.abs_diff(b.1);
            assert_eq!(d, 1, "{a:?} -> {b:?} is not edge adjacent");
        }
    }

    #[test]
    fn test_horizontal_through_centers() {
        assert_eq!(
            cover((0.0, 0.0), (3.0, 0.0), (5, 3)),
            vec![(0, 0), (1, 0), (2, 0), (3, 0)]
        );
        assert_eq!(
            cover((3.0, 1.0), (1.0, 1.0), (5, 3)),
            vec![(3, 1), (2, 1), (1, 1)]
        );
    }

    #[test]
    fn test_vertical() {
        assert_eq!(
            cover((2.2, 2.4), (2.2, 0.1), (5, 3)),
            vec![(2, 2), (2, 1), (2, 0)]
        );
    }

    #[test]
    fn test_generic_segments_match_brute_force() {
        let dims = (12, 9);
        for (start, end) in [
            ((0.13, 0.27), (7.61, 4.38)),
            ((10.9, 0.2), (1.3, 7.7)),
            ((5.55, 8.1), (6.05, 0.35)),
            ((-3.3, 2.1), (14.2, 6.9)),
            ((2.71, 3.14), (2.9, 3.3)),
        ] {
            let pixels = cover(start, end, dims);
            let unique: HashSet<_> = pixels.iter().copied().collect();
            assert_eq!(unique.len(), pixels.len(), "duplicate pixels for {start:?}");
            assert_eq!(unique, brute_force(start, end, dims), "{start:?} -> {end:?}");
            assert_edge_connected(&pixels);
        }
    }

    #[test]
    fn test_exact_diagonal_includes_corner_neighbours() {
        let pixels = cover((0.0, 0.0), (2.0, 2.0), (4, 4));
        let expected: HashSet<_> = [
            (0, 0),
            (0, 1),
            (1, 0),
            (1, 1),
            (1, 2),
            (2, 1),
            (2, 2),
        ]
        .into_iter()
        .collect();
        let unique: HashSet<_> = pixels.iter().copied().collect();
        assert_eq!(unique.len(), pixels.len());
        assert_eq!(unique, expected);
    }

    #[test]
    fn test_clipped_to_grid() {
        let pixels = cover((-5.0, 1.0), (10.0, 1.0), (3, 3));
        assert_eq!(pixels, vec![(0, 1), (1, 1), (2, 1)]);
        assert!(cover((-5.0, -5.0), (-1.0, -2.0), (3, 3)).is_empty());
        assert!(cover((0.0, 0.0), (1.0, 1.0), (0, 0)).is_empty());
    }
}
