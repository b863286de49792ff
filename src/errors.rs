// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to get at everything `error_chain!` creates.
use error_chain::error_chain;

error_chain! {

    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("invalid maze dimensions")
            display("invalid maze dimensions: {} wide by {} high", width, height)
        }

        InvalidJumpDistance(jump: usize) {
            description("invalid jump distance")
            display("invalid jump distance {}, it must be at least 1", jump)
        }

        SeedOutOfBounds(row: usize, column: usize) {
            description("seed cell outside the carvable area")
            display("seed cell (row {}, column {}) is outside the carvable area", row, column)
        }

        MisalignedSeed(row: usize, column: usize, jump: usize) {
            description("seed cell off the carving lattice")
            display("seed cell (row {}, column {}) is not on the lattice of jump distance {}, \
                     its row and column must leave a remainder of one", row, column, jump)
        }

        InvalidGridCoordinate(row: usize, column: usize) {
            description("invalid grid coordinate")
            display("grid coordinate (row {}, column {}) is outside the grid", row, column)
        }
    }
}
