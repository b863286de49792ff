use smallvec::SmallVec;
use std::convert::From;

/// The occupancy of a single grid cell.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellState {
    Wall,
    Path,
    Goal,
}

impl CellState {
    #[inline(always)]
    pub fn is_wall(self) -> bool {
        self == CellState::Wall
    }

    /// Can a player stand in this cell - anything that is not a wall.
    #[inline(always)]
    pub fn is_open(self) -> bool {
        !self.is_wall()
    }
}

impl Default for CellState {
    fn default() -> CellState {
        CellState::Wall
    }
}

/// A (row, column) location in a grid. Row 0 is the first row in row-major order.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: usize,
    pub column: usize,
}

impl GridCoordinate {
    pub fn new(row: usize, column: usize) -> GridCoordinate {
        GridCoordinate { row, column }
    }

    /// The cell halfway between two coordinates, rounding towards zero.
    pub fn midpoint(self, other: GridCoordinate) -> GridCoordinate {
        GridCoordinate::new((self.row + other.row) / 2,
                            (self.column + other.column) / 2)
    }
}

impl From<(usize, usize)> for GridCoordinate {
    fn from(row_column_pair: (usize, usize)) -> GridCoordinate {
        GridCoordinate::new(row_column_pair.0, row_column_pair.1)
    }
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

/// The step directions tried, in order, when carving from a lattice point.
pub const STEP_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::South,
                                                  CompassPrimary::North,
                                                  CompassPrimary::West,
                                                  CompassPrimary::East];

impl CompassPrimary {
    /// Creates a new coordinate `distance` cells away in this direction.
    /// Returns None if the coordinate would be negative (or overflow). The result is not
    /// bounds checked against any grid.
    pub fn offset(self, coord: GridCoordinate, distance: usize) -> Option<GridCoordinate> {
        let GridCoordinate { row, column } = coord;
        match self {
            CompassPrimary::North => row.checked_sub(distance).map(|r| GridCoordinate::new(r, column)),
            CompassPrimary::South => row.checked_add(distance).map(|r| GridCoordinate::new(r, column)),
            CompassPrimary::East => column.checked_add(distance).map(|c| GridCoordinate::new(row, c)),
            CompassPrimary::West => column.checked_sub(distance).map(|c| GridCoordinate::new(row, c)),
        }
    }
}
