//! The 26 lattice directions around a cell
//!
//! Six face directions, twelve edge directions and eight corner directions.
//! The table order is the order in which propagation visits neighbors.

/// Shape of the shared boundary between a cell and a neighbor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NeighborKind {
    /// Neighbor shares a face (one axis differs)
    Face,
    /// Neighbor shares an edge (two axes differ)
    Edge,
    /// Neighbor shares a corner (three axes differ)
    Corner,
}

/// Selection of neighbor kinds used by frequency limits
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NeighborShape {
    /// Only face neighbors
    Face,
    /// Only edge neighbors
    Edge,
    /// Only corner neighbors
    Corner,
    /// All 26 neighbors
    Any,
}

impl NeighborShape {
    /// Check whether a neighbor kind belongs to this shape
    pub const fn includes(self, kind: NeighborKind) -> bool {
        matches!(
            (self, kind),
            (Self::Any, _)
                | (Self::Face, NeighborKind::Face)
                | (Self::Edge, NeighborKind::Edge)
                | (Self::Corner, NeighborKind::Corner)
        )
    }

    /// Iterate the directions that make up this shape
    pub fn directions(self) -> impl Iterator<Item = &'static Direction> {
        DIRECTIONS
            .iter()
            .filter(move |direction| self.includes(direction.kind))
    }
}

/// One of the three grid axes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Length axis
    X,
    /// Width axis
    Y,
    /// Height axis
    Z,
}

impl Axis {
    /// All axes in coordinate order
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Component index of this axis in a coordinate triple
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Unit step along this axis
    pub const fn unit(self) -> [i32; 3] {
        match self {
            Self::X => [1, 0, 0],
            Self::Y => [0, 1, 0],
            Self::Z => [0, 0, 1],
        }
    }
}

/// A lattice direction with its catalog data
#[derive(Debug)]
pub struct Direction {
    /// Canonical upper-case name
    pub name: &'static str,
    /// Attribute key holding the allow-list for this direction
    pub key: &'static str,
    /// Offset to the neighbor cell
    pub offset: [i32; 3],
    /// Boundary shape shared with the neighbor
    pub kind: NeighborKind,
    /// Position of the opposite direction in [`DIRECTIONS`]
    pub opposite: usize,
}

const fn direction(
    name: &'static str,
    key: &'static str,
    offset: [i32; 3],
    kind: NeighborKind,
    opposite: usize,
) -> Direction {
    Direction {
        name,
        key,
        offset,
        kind,
        opposite,
    }
}

/// Number of directions in the lattice neighborhood
pub const DIRECTION_COUNT: usize = 26;

/// Catalog of all neighbor directions
pub static DIRECTIONS: [Direction; DIRECTION_COUNT] = [
    direction("TOP", "top", [0, 0, 1], NeighborKind::Face, 1),
    direction("BOTTOM", "bottom", [0, 0, -1], NeighborKind::Face, 0),
    direction("FRONT", "front", [0, -1, 0], NeighborKind::Face, 3),
    direction("BACK", "back", [0, 1, 0], NeighborKind::Face, 2),
    direction("LEFT", "left", [-1, 0, 0], NeighborKind::Face, 5),
    direction("RIGHT", "right", [1, 0, 0], NeighborKind::Face, 4),
    direction("CN_FBL", "cn_fbl", [-1, -1, -1], NeighborKind::Corner, 13),
    direction("CN_FBR", "cn_fbr", [1, -1, -1], NeighborKind::Corner, 12),
    direction("CN_FTL", "cn_ftl", [-1, -1, 1], NeighborKind::Corner, 11),
    direction("CN_FTR", "cn_ftr", [1, -1, 1], NeighborKind::Corner, 10),
    direction("CN_BBL", "cn_bbl", [-1, 1, -1], NeighborKind::Corner, 9),
    direction("CN_BBR", "cn_bbr", [1, 1, -1], NeighborKind::Corner, 8),
    direction("CN_BTL", "cn_btl", [-1, 1, 1], NeighborKind::Corner, 7),
    direction("CN_BTR", "cn_btr", [1, 1, 1], NeighborKind::Corner, 6),
    direction("EN_FL", "en_fl", [-1, -1, 0], NeighborKind::Edge, 19),
    direction("EN_FR", "en_fr", [1, -1, 0], NeighborKind::Edge, 18),
    direction("EN_FB", "en_fb", [0, -1, -1], NeighborKind::Edge, 21),
    direction("EN_FT", "en_ft", [0, -1, 1], NeighborKind::Edge, 20),
    direction("EN_BL", "en_bl", [-1, 1, 0], NeighborKind::Edge, 15),
    direction("EN_BR", "en_br", [1, 1, 0], NeighborKind::Edge, 14),
    direction("EN_BB", "en_bb", [0, 1, -1], NeighborKind::Edge, 17),
    direction("EN_BT", "en_bt", [0, 1, 1], NeighborKind::Edge, 16),
    direction("EN_LB", "en_lb", [-1, 0, -1], NeighborKind::Edge, 25),
    direction("EN_LT", "en_lt", [-1, 0, 1], NeighborKind::Edge, 24),
    direction("EN_RB", "en_rb", [1, 0, -1], NeighborKind::Edge, 23),
    direction("EN_RT", "en_rt", [1, 0, 1], NeighborKind::Edge, 22),
];

/// Look up a direction by its canonical name or attribute key
pub fn find_direction(name: &str) -> Option<(usize, &'static Direction)> {
    DIRECTIONS
        .iter()
        .enumerate()
        .find(|(_, direction)| direction.name == name || direction.key == name)
}
