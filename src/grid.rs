use std::fmt;
use std::slice;

use crate::cells::{CellState, CoordinateSmallVec, GridCoordinate, STEP_DIRECTIONS};
use crate::errors::*;
use crate::grid_dimensions::MazeDimensions;
use crate::units::{ColumnsCount, Height, RowsCount, Width};


/// A rectangular occupancy grid of wall/path/goal cells stored in row-major order.
#[derive(Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    cells: Vec<CellState>,
    dimensions: MazeDimensions,
}

impl fmt::Debug for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "OccupancyGrid :: rows: {:?}, columns: {:?}, walls: {}",
               self.rows(), self.columns(), self.count_walls())
    }
}

impl OccupancyGrid {
    /// A grid with every cell a wall.
    pub fn new(dimensions: MazeDimensions) -> OccupancyGrid {
        OccupancyGrid {
            cells: vec![CellState::Wall; dimensions.size()],
            dimensions,
        }
    }

    #[inline]
    pub fn dimensions(&self) -> MazeDimensions {
        self.dimensions
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.dimensions.width()
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.dimensions.height()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.dimensions.rows()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.dimensions.columns()
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        self.dimensions.contains(coord)
    }

    #[inline]
    pub fn is_border(&self, coord: GridCoordinate) -> bool {
        self.dimensions.is_border(coord)
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row * self.width().0 + coord.column)
        } else {
            None
        }
    }

    #[inline]
    pub fn index_to_grid_coordinate(&self, index: usize) -> GridCoordinate {
        let row_length = self.width().0;
        GridCoordinate::new(index / row_length, index % row_length)
    }

    #[inline]
    pub fn get(&self, coord: GridCoordinate) -> Option<CellState> {
        self.grid_coordinate_to_index(coord).map(|index| self.cells[index])
    }

    pub fn set(&mut self, coord: GridCoordinate, state: CellState) -> Result<()> {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => {
                self.cells[index] = state;
                Ok(())
            }
            None => Err(ErrorKind::InvalidGridCoordinate(coord.row, coord.column).into()),
        }
    }

    #[inline]
    pub fn is_open(&self, coord: GridCoordinate) -> bool {
        self.get(coord).map_or(false, CellState::is_open)
    }

    /// Cells that are directly to the North, South, East or West of a cell, whatever their state.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        STEP_DIRECTIONS.iter()
            .filter_map(|dir| dir.offset(coord, 1))
            .filter(|adjacent| self.is_valid_coordinate(*adjacent))
            .collect()
    }

    /// Adjacent cells that are not walls.
    pub fn open_neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        self.neighbours(coord)
            .into_iter()
            .filter(|adjacent| self.is_open(*adjacent))
            .collect()
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    /// Number of cells still in the wall state.
    pub fn count_walls(&self) -> usize {
        self.count(CellState::Wall)
    }

    /// The first goal cell in row-major order.
    pub fn goal(&self) -> Option<GridCoordinate> {
        self.cells
            .iter()
            .position(|&cell| cell == CellState::Goal)
            .map(|index| self.index_to_grid_coordinate(index))
    }

    #[inline]
    pub fn iter(&self) -> CellIter<'_> {
        CellIter {
            cells: self.cells.iter().enumerate(),
            row_length: self.width().0,
        }
    }

    /// The cell states of each row in turn.
    #[inline]
    pub fn iter_row(&self) -> slice::Chunks<'_, CellState> {
        self.cells.chunks(self.width().0)
    }
}

/// Row-major iterator over every (coordinate, state) pair in a grid.
#[derive(Clone, Debug)]
pub struct CellIter<'a> {
    cells: std::iter::Enumerate<slice::Iter<'a, CellState>>,
    row_length: usize,
}

impl<'a> Iterator for CellIter<'a> {
    type Item = (GridCoordinate, CellState);

    fn next(&mut self) -> Option<Self::Item> {
        let row_length = self.row_length;
        self.cells.next().map(|(index, &state)| {
            (GridCoordinate::new(index / row_length, index % row_length), state)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }
}
impl<'a> ExactSizeIterator for CellIter<'a> {} // default impl using size_hint()

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.iter_row() {
            let line: String = row.iter()
                .map(|cell| match *cell {
                    CellState::Wall => '#',
                    CellState::Path => ' ',
                    CellState::Goal => 'G',
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
