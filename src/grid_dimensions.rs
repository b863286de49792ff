use error_chain::bail;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::units::{ColumnsCount, Height, RowsCount, Width};


/// Width and height of a maze grid, both always odd so lattice carving reaches the far border.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MazeDimensions {
    width: Width,
    height: Height,
}

impl MazeDimensions {
    /// Validates the requested size and bumps any even dimension up by one.
    pub fn new(width: Width, height: Height) -> Result<MazeDimensions> {
        if width.0 == 0 || height.0 == 0 {
            bail!(ErrorKind::InvalidDimensions(width.0, height.0));
        }

        Ok(MazeDimensions {
            width: Width(coerce_odd(width.0)),
            height: Height(coerce_odd(height.0)),
        })
    }

    #[inline(always)]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.width.0 * self.height.0
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.height.0)
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.width.0)
    }

    /// Is the coordinate anywhere inside the grid.
    #[inline]
    pub fn contains(&self, coord: GridCoordinate) -> bool {
        coord.row < self.height.0 && coord.column < self.width.0
    }

    /// Can carving reach this coordinate. The final row and column are never carvable.
    #[inline]
    pub fn is_carvable(&self, coord: GridCoordinate) -> bool {
        coord.row < self.height.0 - 1 && coord.column < self.width.0 - 1
    }

    /// Is the coordinate on the outermost ring of cells.
    pub fn is_border(&self, coord: GridCoordinate) -> bool {
        coord.row == 0 || coord.column == 0 || coord.row == self.height.0 - 1 ||
        coord.column == self.width.0 - 1
    }
}

fn coerce_odd(length: usize) -> usize {
    if length % 2 == 0 {
        length + 1
    } else {
        length
    }
}
