//! Grid extents and classification of cells by their position on the boundary
//!
//! A cell is a corner when all three coordinates sit on an extreme, an edge
//! when at least two do, a face when one does, and inside otherwise. Named
//! corners, edges and faces follow the front/back, bottom/top, left/right
//! convention of the direction table: front is `y = 0`, bottom is `z = 0`,
//! left is `x = 0`.

use crate::io::configuration::{EDGE_COLINEARITY_TOLERANCE, MAX_GRID_DIMENSION};
use crate::io::error::{Result, invalid_parameter};

/// Integer cell coordinate `[x, y, z]`
pub type Coordinate = [usize; 3];

/// Immutable extent of a grid along length, width and height
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
    /// Cells along the x axis
    pub length: usize,
    /// Cells along the y axis
    pub width: usize,
    /// Cells along the z axis
    pub height: usize,
}

/// Boundary classification of a cell, in priority order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellLocation {
    /// All three axes at an extreme
    Corner,
    /// Two axes at an extreme
    Edge,
    /// One axis at an extreme
    Face,
    /// No axis at an extreme
    Inside,
}

/// Named grid corners as unit multipliers of the far corner
pub const CORNERS: [(&str, [usize; 3]); 8] = [
    ("fbl", [0, 0, 0]),
    ("fbr", [1, 0, 0]),
    ("ftl", [0, 0, 1]),
    ("ftr", [1, 0, 1]),
    ("bbl", [0, 1, 0]),
    ("bbr", [1, 1, 0]),
    ("btl", [0, 1, 1]),
    ("btr", [1, 1, 1]),
];

/// Named grid edges as pairs of corner names
pub const EDGES: [(&str, &str, &str); 12] = [
    ("fb", "fbl", "fbr"),
    ("fl", "fbl", "ftl"),
    ("ft", "ftl", "ftr"),
    ("fr", "fbr", "ftr"),
    ("bb", "bbl", "bbr"),
    ("bl", "bbl", "btl"),
    ("bt", "btl", "btr"),
    ("br", "bbr", "btr"),
    ("lb", "fbl", "bbl"),
    ("lt", "ftl", "btl"),
    ("rb", "fbr", "bbr"),
    ("rt", "ftr", "btr"),
];

/// Named grid faces
pub const FACES: [&str; 6] = ["top", "bottom", "left", "right", "front", "back"];

impl GridSize {
    /// Create a validated grid size
    ///
    /// # Errors
    ///
    /// Returns an error if any dimension is zero or exceeds `MAX_GRID_DIMENSION`
    pub fn new(length: usize, width: usize, height: usize) -> Result<Self> {
        for dimension in [length, width, height] {
            if dimension == 0 || dimension > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    "grid_size",
                    &format!("{length}x{width}x{height}"),
                    &format!("each dimension must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        Ok(Self {
            length,
            width,
            height,
        })
    }

    /// Dimensions as an array in axis order
    pub const fn dims(&self) -> [usize; 3] {
        [self.length, self.width, self.height]
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.length * self.width * self.height
    }

    /// Check whether a signed coordinate lies inside the grid
    pub const fn contains(&self, position: [i64; 3]) -> bool {
        position[0] >= 0
            && position[1] >= 0
            && position[2] >= 0
            && (position[0] as usize) < self.length
            && (position[1] as usize) < self.width
            && (position[2] as usize) < self.height
    }

    /// Move a coordinate by an offset, returning `None` outside the grid
    pub const fn offset(&self, coordinate: Coordinate, offset: [i32; 3]) -> Option<Coordinate> {
        let position = [
            coordinate[0] as i64 + offset[0] as i64,
            coordinate[1] as i64 + offset[1] as i64,
            coordinate[2] as i64 + offset[2] as i64,
        ];
        if self.contains(position) {
            Some([
                position[0] as usize,
                position[1] as usize,
                position[2] as usize,
            ])
        } else {
            None
        }
    }

    /// Iterate all coordinates in x, then y, then z nesting order
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + use<> {
        let [length, width, height] = self.dims();
        (0..length).flat_map(move |x| {
            (0..width).flat_map(move |y| (0..height).map(move |z| [x, y, z]))
        })
    }

    fn extremes_hit(&self, coordinate: Coordinate) -> usize {
        self.dims()
            .iter()
            .zip(coordinate)
            .filter(|&(&dimension, value)| value == 0 || value + 1 == dimension)
            .count()
    }

    /// Classify a cell by how many axes sit on a grid extreme
    pub fn classify(&self, coordinate: Coordinate) -> CellLocation {
        match self.extremes_hit(coordinate) {
            3 => CellLocation::Corner,
            2 => CellLocation::Edge,
            1 => CellLocation::Face,
            _ => CellLocation::Inside,
        }
    }

    /// Coordinate of a named corner
    pub fn corner(&self, name: &str) -> Option<Coordinate> {
        let far = [
            self.length.saturating_sub(1),
            self.width.saturating_sub(1),
            self.height.saturating_sub(1),
        ];
        CORNERS
            .iter()
            .find(|(corner, _)| *corner == name)
            .map(|(_, unit)| [unit[0] * far[0], unit[1] * far[1], unit[2] * far[2]])
    }

    /// Check whether a cell lies on the segment between the end corners of a named edge
    pub fn is_on_edge(&self, coordinate: Coordinate, name: &str) -> bool {
        let Some((_, start, end)) = EDGES.iter().find(|(edge, _, _)| *edge == name) else {
            return false;
        };
        let (Some(a), Some(b)) = (self.corner(start), self.corner(end)) else {
            return false;
        };
        is_on_segment(coordinate, a, b)
    }

    /// Check whether a cell lies strictly inside a named face (edges excluded)
    pub fn is_on_face(&self, coordinate: Coordinate, name: &str) -> bool {
        let [x, y, z] = coordinate;
        let interior = |value: usize, dimension: usize| value > 0 && value + 1 < dimension;
        match name {
            "top" => {
                z + 1 == self.height && interior(x, self.length) && interior(y, self.width)
            }
            "bottom" => z == 0 && interior(x, self.length) && interior(y, self.width),
            "left" => x == 0 && interior(y, self.width) && interior(z, self.height),
            "right" => {
                x + 1 == self.length && interior(y, self.width) && interior(z, self.height)
            }
            "front" => y == 0 && interior(x, self.length) && interior(z, self.height),
            "back" => {
                y + 1 == self.width && interior(x, self.length) && interior(z, self.height)
            }
            _ => false,
        }
    }
}

/// Parametric test that `point` lies on the closed segment from `a` to `b`
///
/// A degenerate segment (both corners equal) contains nothing.
pub fn is_on_segment(point: Coordinate, a: Coordinate, b: Coordinate) -> bool {
    let mut parameter: Option<f64> = None;
    for ((&p, &start), &end) in point.iter().zip(&a).zip(&b) {
        let delta = end as f64 - start as f64;
        let along = p as f64 - start as f64;
        if delta == 0.0 {
            if along != 0.0 {
                return false;
            }
            continue;
        }
        let t = along / delta;
        match parameter {
            Some(first) if (t - first).abs() >= EDGE_COLINEARITY_TOLERANCE => return false,
            Some(_) => {}
            None => parameter = Some(t),
        }
    }
    parameter.is_some_and(|t| (0.0..=1.0).contains(&t))
}
