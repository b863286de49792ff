use bit_set::BitSet;
use error_chain::bail;
use log::{debug, warn};
use rand::Rng;

use crate::cells::{CellState, CompassPrimary, CoordinateSmallVec, GridCoordinate, STEP_DIRECTIONS};
use crate::config::MazeConfig;
use crate::errors::*;
use crate::grid::OccupancyGrid;
use crate::grid_dimensions::MazeDimensions;
use crate::pathing;
use crate::spawning::{self, Position3, SpawnLayout};
use crate::units::{Height, JumpDistance, Width};
use crate::utils;

/// The lattice point carving starts from unless told otherwise.
pub const DEFAULT_SEED_CELL: GridCoordinate = GridCoordinate { row: 1, column: 1 };

/// Narrowest grid whose goal cell still has a neighbour off the border.
const MIN_WIDTH: usize = 5;

/// Carve a maze with the randomized depth first (recursive backtracker) algorithm on a lattice
/// of decision points `jump` cells apart, starting from `seed`.
///
/// Every cell starts as a wall. From the top of the frontier stack a random still-walled lattice
/// neighbour is chosen and both it and the cell midway to it are carved. When no such neighbour
/// is left the stack is popped, so every carved cell hangs off the seed.
/// The last row and column are never carved.
///
/// Finally the cell at `(height - 1, width - 3)` becomes the goal, and if no carved cell touches
/// it the shortest run of interior walls to the nearest passage is carved too.
///
/// The seed must lie on the lattice: row and column one more than a multiple of `jump`.
/// Only a jump of 2 gives a perfect maze; other jumps are accepted but can carve into the
/// first row/column (jump 1) or leave unreachable pockets (jump > 2).
pub fn recursive_backtracker<R>(seed: GridCoordinate,
                                dimensions: MazeDimensions,
                                jump: JumpDistance,
                                rng: &mut R)
                                -> Result<OccupancyGrid>
    where R: Rng + ?Sized
{
    check_generation_parameters(seed, dimensions, jump)?;
    if jump.0 != 2 {
        warn!("carving with a jump distance of {}, the maze may not be fully connected", jump.0);
    }

    let mut grid = OccupancyGrid::new(dimensions);
    carve_lattice(&mut grid, seed, jump, rng)?;

    let goal = goal_cell(dimensions);
    grid.set(goal, CellState::Goal)?;
    let corridor_length = link_goal(&mut grid, goal)?;

    debug!("carved {}x{} maze from {:?}: {} walls, goal {:?} linked by {} extra cells",
           dimensions.width().0,
           dimensions.height().0,
           seed,
           grid.count_walls(),
           goal,
           corridor_length);
    Ok(grid)
}

/// Total cells still in the wall state.
#[inline]
pub fn count_walls(grid: &OccupancyGrid) -> usize {
    grid.count_walls()
}

/// The fixed goal location near the far corner, on the last row.
#[inline]
pub fn goal_cell(dimensions: MazeDimensions) -> GridCoordinate {
    GridCoordinate::new(dimensions.height().0 - 1, dimensions.width().0 - 3)
}

fn check_generation_parameters(seed: GridCoordinate,
                               dimensions: MazeDimensions,
                               jump: JumpDistance)
                               -> Result<()> {
    if jump.0 == 0 {
        bail!(ErrorKind::InvalidJumpDistance(jump.0));
    }

    let (Width(width), Height(height)) = (dimensions.width(), dimensions.height());
    if width < MIN_WIDTH {
        bail!(ErrorKind::InvalidDimensions(width, height));
    }

    if !dimensions.is_carvable(seed) {
        bail!(ErrorKind::SeedOutOfBounds(seed.row, seed.column));
    }

    // Lattice points sit one cell in from the border, so a seed off that lattice carves the border.
    let lattice_offset = 1 % jump.0;
    if seed.row % jump.0 != lattice_offset || seed.column % jump.0 != lattice_offset {
        bail!(ErrorKind::MisalignedSeed(seed.row, seed.column, jump.0));
    }

    Ok(())
}

fn carve_lattice<R>(grid: &mut OccupancyGrid,
                    seed: GridCoordinate,
                    jump: JumpDistance,
                    rng: &mut R)
                    -> Result<()>
    where R: Rng + ?Sized
{
    let dimensions = grid.dimensions();
    grid.set(seed, CellState::Path)?;
    let mut frontier = vec![seed];

    while let Some(&current) = frontier.last() {

        let unvisited: CoordinateSmallVec = STEP_DIRECTIONS.iter()
            .filter_map(|dir| dir.offset(current, jump.0))
            .filter(|next| {
                dimensions.is_carvable(*next) && grid.get(*next) == Some(CellState::Wall)
            })
            .collect();

        if unvisited.is_empty() {
            frontier.pop();
        } else {
            let next = unvisited[rng.gen_range(0..unvisited.len())];
            grid.set(current.midpoint(next), CellState::Path)?;
            grid.set(next, CellState::Path)?;
            frontier.push(next);
        }
    }

    Ok(())
}

/// Make sure the goal touches a passage. Returns how many cells had to be carved.
fn link_goal(grid: &mut OccupancyGrid, goal: GridCoordinate) -> Result<usize> {

    if !grid.open_neighbours(goal).is_empty() {
        return Ok(0);
    }

    // Floodfill out from the goal through interior walls until a passage is touched.
    let mut came_from = utils::fnv_hashmap(grid.size());
    came_from.insert(goal, goal);
    let mut frontier = vec![goal];

    while !frontier.is_empty() {

        let mut new_frontier = vec![];
        for &cell in &frontier {
            for next in grid.neighbours(cell) {
                if came_from.contains_key(&next) {
                    continue;
                }
                match grid.get(next) {
                    Some(CellState::Path) => {
                        let mut carved = 0;
                        let mut corridor_cell = cell;
                        while corridor_cell != goal {
                            grid.set(corridor_cell, CellState::Path)?;
                            carved += 1;
                            corridor_cell = came_from[&corridor_cell];
                        }
                        return Ok(carved);
                    }
                    Some(CellState::Wall) if !grid.is_border(next) => {
                        came_from.insert(next, cell);
                        new_frontier.push(next);
                    }
                    _ => {}
                }
            }
        }
        frontier = new_frontier;
    }

    Ok(0)
}

/// Nudge the grid's wall count toward `target`. Returns the wall count afterwards.
///
/// Too few walls: random dead ends are walled up again, never the seed or a cell on the
/// seed to goal path. Walling a dead end can expose the next one along its branch.
/// Too many walls: random interior walls sitting between two open cells are knocked through.
///
/// Either way every open cell stays reachable, the border is left alone and the goal is kept.
pub fn balance_walls<R>(grid: &mut OccupancyGrid,
                        seed: GridCoordinate,
                        target: usize,
                        rng: &mut R)
                        -> Result<usize>
    where R: Rng + ?Sized
{
    let walls = grid.count_walls();

    if walls < target {
        let added = rewall_dead_ends(grid, seed, target - walls, rng)?;
        debug!("walled up {} dead ends toward target {}", added, target);
    } else if walls > target {
        let removed = open_loops(grid, walls - target, rng)?;
        debug!("knocked through {} walls toward target {}", removed, target);
    }

    let balanced = grid.count_walls();
    if balanced != target {
        warn!("wall balancing ran out of candidates at {} walls, target was {}", balanced, target);
    }
    Ok(balanced)
}

fn rewall_dead_ends<R>(grid: &mut OccupancyGrid,
                       seed: GridCoordinate,
                       deficit: usize,
                       rng: &mut R)
                       -> Result<usize>
    where R: Rng + ?Sized
{
    let protected = protected_cells(grid, seed);
    let mut candidates = grid.iter()
        .map(|(coord, _)| coord)
        .filter(|coord| is_removable_dead_end(grid, *coord, &protected))
        .collect::<Vec<_>>();

    let mut rewalled = 0;
    while rewalled < deficit && !candidates.is_empty() {
        let coord = candidates.swap_remove(rng.gen_range(0..candidates.len()));
        if !is_removable_dead_end(grid, coord, &protected) {
            continue;
        }

        let exposed = grid.open_neighbours(coord);
        grid.set(coord, CellState::Wall)?;
        rewalled += 1;

        candidates.extend(exposed.into_iter()
                                 .filter(|next| is_removable_dead_end(grid, *next, &protected)));
    }

    Ok(rewalled)
}

fn open_loops<R>(grid: &mut OccupancyGrid, surplus: usize, rng: &mut R) -> Result<usize>
    where R: Rng + ?Sized
{
    let mut candidates = grid.iter()
        .map(|(coord, _)| coord)
        .filter(|coord| separates_open_cells(grid, *coord))
        .collect::<Vec<_>>();

    let mut opened = 0;
    while opened < surplus && !candidates.is_empty() {
        let coord = candidates.swap_remove(rng.gen_range(0..candidates.len()));
        if separates_open_cells(grid, coord) {
            grid.set(coord, CellState::Path)?;
            opened += 1;
        }
    }

    Ok(opened)
}

/// Row-major indices of the seed and every cell on the seed to goal shortest path.
fn protected_cells(grid: &OccupancyGrid, seed: GridCoordinate) -> BitSet {
    let mut protected = BitSet::with_capacity(grid.size());

    let mut path = vec![seed];
    if let (Some(goal), Some(distances)) = (grid.goal(), pathing::Distances::new(grid, seed)) {
        path.extend(pathing::shortest_path(grid, &distances, goal).unwrap_or_else(Vec::new));
    }

    for coord in path {
        if let Some(index) = grid.grid_coordinate_to_index(coord) {
            protected.insert(index);
        }
    }
    protected
}

fn is_removable_dead_end(grid: &OccupancyGrid, coord: GridCoordinate, protected: &BitSet) -> bool {
    grid.get(coord) == Some(CellState::Path) &&
    grid.grid_coordinate_to_index(coord).map_or(false, |index| !protected.contains(index)) &&
    grid.open_neighbours(coord).len() == 1
}

fn separates_open_cells(grid: &OccupancyGrid, coord: GridCoordinate) -> bool {
    if grid.get(coord) != Some(CellState::Wall) || grid.is_border(coord) {
        return false;
    }

    let is_open_towards = |dir: CompassPrimary| {
        dir.offset(coord, 1).map_or(false, |adjacent| grid.is_open(adjacent))
    };
    (is_open_towards(CompassPrimary::North) && is_open_towards(CompassPrimary::South)) ||
    (is_open_towards(CompassPrimary::East) && is_open_towards(CompassPrimary::West))
}

/// Generates mazes from a `MazeConfig`, remembering the wall count of the first maze so later
/// regenerations can be balanced toward it.
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    config: MazeConfig,
    seed: GridCoordinate,
    target_wall_count: Option<usize>,
}

impl MazeGenerator {
    pub fn new(config: MazeConfig) -> MazeGenerator {
        MazeGenerator {
            config,
            seed: DEFAULT_SEED_CELL,
            target_wall_count: None,
        }
    }

    pub fn with_seed_cell(mut self, seed: GridCoordinate) -> MazeGenerator {
        self.seed = seed;
        self
    }

    /// Balance every regeneration, the first included, toward `target` walls.
    pub fn with_target_wall_count(mut self, target: usize) -> MazeGenerator {
        self.target_wall_count = Some(target);
        self
    }

    #[inline]
    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    #[inline]
    pub fn seed_cell(&self) -> GridCoordinate {
        self.seed
    }

    #[inline]
    pub fn target_wall_count(&self) -> Option<usize> {
        self.target_wall_count
    }

    pub fn dimensions(&self) -> Result<MazeDimensions> {
        MazeDimensions::new(Width(self.config.width), Height(self.config.height))
    }

    /// A fresh maze, no balancing.
    pub fn generate<R>(&self, rng: &mut R) -> Result<OccupancyGrid>
        where R: Rng + ?Sized
    {
        recursive_backtracker(self.seed,
                              self.dimensions()?,
                              JumpDistance(self.config.jump_distance),
                              rng)
    }

    /// A fresh maze balanced toward the target wall count.
    /// Without a target yet, this maze's wall count becomes the target.
    pub fn regenerate<R>(&mut self, rng: &mut R) -> Result<OccupancyGrid>
        where R: Rng + ?Sized
    {
        let mut grid = self.generate(rng)?;

        match self.target_wall_count {
            Some(target) => {
                balance_walls(&mut grid, self.seed, target, rng)?;
            }
            None => {
                let walls = grid.count_walls();
                debug!("target wall count set to {}", walls);
                self.target_wall_count = Some(walls);
            }
        }

        Ok(grid)
    }

    pub fn spawn_layout(&self, grid: &OccupancyGrid) -> SpawnLayout {
        spawning::build_spawn_positions(grid,
                                        self.config.wall_spawn_height,
                                        self.config.floor_spawn_height)
    }

    pub fn player_spawn(&self) -> Position3 {
        spawning::player_spawn_position(self.seed, self.config.player_spawn_height)
    }
}


#[cfg(test)]
mod tests {
    use quickcheck::{quickcheck, Arbitrary, Gen};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::spawning::sort_by_distance_from_origin;

    fn dims(w: usize, h: usize) -> MazeDimensions {
        MazeDimensions::new(Width(w), Height(h)).unwrap()
    }

    fn carve(w: usize, h: usize, seed: (usize, usize), rng_seed: u64) -> OccupancyGrid {
        let mut rng = StdRng::seed_from_u64(rng_seed);
        recursive_backtracker(GridCoordinate::from(seed), dims(w, h), JumpDistance(2), &mut rng)
            .expect("valid maze parameters")
    }

    fn border_is_never_a_passage(grid: &OccupancyGrid) -> bool {
        grid.iter().all(|(coord, state)| !grid.is_border(coord) || state != CellState::Path)
    }

    fn wall_count_matches_open_cells(grid: &OccupancyGrid) -> bool {
        count_walls(grid) == grid.size() - grid.count(CellState::Path) - 1
    }

    fn open_grid(w: usize, h: usize, open: &[(usize, usize)], goal: (usize, usize)) -> OccupancyGrid {
        let mut g = OccupancyGrid::new(dims(w, h));
        for &(r, c) in open {
            g.set(GridCoordinate::new(r, c), CellState::Path).unwrap();
        }
        g.set(GridCoordinate::from(goal), CellState::Goal).unwrap();
        g
    }

    #[derive(Clone, Debug)]
    struct MazeParams {
        width: usize,
        height: usize,
        seed: GridCoordinate,
        rng_seed: u64,
    }

    impl Arbitrary for MazeParams {
        fn arbitrary(g: &mut Gen) -> MazeParams {
            let width = MIN_WIDTH + usize::from(u8::arbitrary(g) % 36);
            let height = 3 + usize::from(u8::arbitrary(g) % 38);
            let coerced = dims(width, height);

            // Odd lattice points inside the carvable area.
            let seed_rows = (coerced.height().0 - 1) / 2;
            let seed_columns = (coerced.width().0 - 1) / 2;
            let row = 1 + 2 * (usize::from(u8::arbitrary(g)) % seed_rows);
            let column = 1 + 2 * (usize::from(u8::arbitrary(g)) % seed_columns);

            MazeParams {
                width,
                height,
                seed: GridCoordinate::new(row, column),
                rng_seed: u64::arbitrary(g),
            }
        }
    }

    impl MazeParams {
        fn carve(&self) -> OccupancyGrid {
            carve(self.width, self.height, (self.seed.row, self.seed.column), self.rng_seed)
        }
    }

    #[test]
    fn seven_by_seven_scenario() {
        let grid = carve(7, 7, (1, 1), 7);
        assert_eq!(grid.width(), Width(7));
        assert_eq!(grid.height(), Height(7));
        assert_eq!(grid.get(GridCoordinate::new(1, 1)), Some(CellState::Path));
        assert_eq!(grid.goal(), Some(GridCoordinate::new(6, 4)));
        assert_eq!(grid.count(CellState::Goal), 1);

        let walls = count_walls(&grid);
        assert!(walls > 0 && walls < 47, "walls {}", walls);
        assert!(pathing::is_fully_connected(&grid, GridCoordinate::new(1, 1)));
    }

    #[test]
    fn even_dimensions_are_coerced_before_carving() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = recursive_backtracker(DEFAULT_SEED_CELL,
                                         MazeDimensions::new(Width(6), Height(8)).unwrap(),
                                         JumpDistance(2),
                                         &mut rng)
            .unwrap();
        assert_eq!((grid.width(), grid.height()), (Width(7), Height(9)));
        assert_eq!(grid.size(), 63);
        assert_eq!(grid.goal(), Some(GridCoordinate::new(8, 4)));
    }

    #[test]
    fn every_lattice_point_is_carved() {
        let grid = carve(11, 9, (1, 1), 3);
        for row in (1..8).step_by(2) {
            for column in (1..10).step_by(2) {
                assert_eq!(grid.get(GridCoordinate::new(row, column)), Some(CellState::Path));
            }
        }
    }

    #[test]
    fn same_rng_seed_same_maze() {
        assert_eq!(carve(21, 15, (1, 1), 99), carve(21, 15, (1, 1), 99));
    }

    #[test]
    fn zero_jump_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        match recursive_backtracker(DEFAULT_SEED_CELL, dims(7, 7), JumpDistance(0), &mut rng) {
            Err(Error(ErrorKind::InvalidJumpDistance(0), _)) => {}
            other => panic!("expected invalid jump distance, got {:?}", other),
        }
    }

    #[test]
    fn seeds_outside_the_carvable_area_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        for &(r, c) in &[(6, 1), (1, 6), (7, 7), (100, 1)] {
            match recursive_backtracker(GridCoordinate::new(r, c), dims(7, 7), JumpDistance(2), &mut rng) {
                Err(Error(ErrorKind::SeedOutOfBounds(er, ec), _)) => assert_eq!((er, ec), (r, c)),
                other => panic!("expected seed out of bounds, got {:?}", other),
            }
        }
    }

    #[test]
    fn seeds_off_the_lattice_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        for &(r, c) in &[(0, 0), (2, 2), (1, 2), (4, 1)] {
            match recursive_backtracker(GridCoordinate::new(r, c), dims(7, 7), JumpDistance(2), &mut rng) {
                Err(Error(ErrorKind::MisalignedSeed(er, ec, 2), _)) => assert_eq!((er, ec), (r, c)),
                other => panic!("expected misaligned seed, got {:?}", other),
            }
        }

        // On a jump 3 lattice the points are 1, 4, 7...
        let seed = GridCoordinate::new(4, 4);
        assert!(recursive_backtracker(seed, dims(9, 9), JumpDistance(3), &mut rng).is_ok());
        match recursive_backtracker(GridCoordinate::new(3, 1), dims(9, 9), JumpDistance(3), &mut rng) {
            Err(Error(ErrorKind::MisalignedSeed(3, 1, 3), _)) => {}
            other => panic!("expected misaligned seed, got {:?}", other),
        }

        // Every cell is a lattice point when stepping one cell at a time.
        let seed = GridCoordinate::new(2, 2);
        assert!(recursive_backtracker(seed, dims(7, 7), JumpDistance(1), &mut rng).is_ok());
    }

    #[test]
    fn grids_too_narrow_for_the_goal_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        match recursive_backtracker(DEFAULT_SEED_CELL, dims(3, 7), JumpDistance(2), &mut rng) {
            Err(Error(ErrorKind::InvalidDimensions(3, 7), _)) => {}
            other => panic!("expected invalid dimensions, got {:?}", other),
        }
    }

    #[test]
    fn a_single_row_of_lattice_points() {
        let grid = carve(5, 3, (1, 1), 0);
        assert_eq!(format!("{}", grid), "#####\n#   #\n##G##\n");
    }

    #[test]
    fn goal_is_linked_to_the_nearest_passage() {
        let mut grid = open_grid(7, 7, &[(5, 3), (5, 5)], (6, 4));
        assert_eq!(link_goal(&mut grid, GridCoordinate::new(6, 4)).unwrap(), 1);
        assert_eq!(grid.get(GridCoordinate::new(5, 4)), Some(CellState::Path));
        assert!(border_is_never_a_passage(&grid));

        // Already touching a passage, nothing to do.
        assert_eq!(link_goal(&mut grid, GridCoordinate::new(6, 4)).unwrap(), 0);
    }

    #[test]
    fn jump_longer_than_the_grid_still_reaches_the_goal() {
        let mut rng = StdRng::seed_from_u64(5);
        let grid = recursive_backtracker(DEFAULT_SEED_CELL, dims(7, 7), JumpDistance(50), &mut rng)
            .unwrap();
        assert!(pathing::is_fully_connected(&grid, DEFAULT_SEED_CELL));
        assert_eq!(grid.count(CellState::Goal), 1);
        assert!(border_is_never_a_passage(&grid));
    }

    #[test]
    fn other_jump_distances_keep_a_single_goal() {
        for jump in 1..5 {
            let mut rng = StdRng::seed_from_u64(jump as u64);
            let grid = recursive_backtracker(DEFAULT_SEED_CELL, dims(15, 15), JumpDistance(jump), &mut rng)
                .unwrap();
            assert_eq!(grid.count(CellState::Goal), 1);
            assert!(wall_count_matches_open_cells(&grid));
        }
    }

    #[test]
    fn dead_ends_off_the_goal_path_are_walled_up() {
        // Seed corridor along row 1 down column 5 to the goal, with a spur hanging off the seed.
        let open = [(1, 1), (1, 2), (1, 3), (1, 4), (1, 5), (2, 5), (3, 5), (4, 5), (5, 5), (5, 4),
                    (2, 1), (3, 1)];
        let mut grid = open_grid(7, 7, &open, (6, 4));
        assert_eq!(grid.count_walls(), 36);

        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(balance_walls(&mut grid, DEFAULT_SEED_CELL, 38, &mut rng).unwrap(), 38);
        assert_eq!(grid.get(GridCoordinate::new(2, 1)), Some(CellState::Wall));
        assert_eq!(grid.get(GridCoordinate::new(3, 1)), Some(CellState::Wall));
        assert!(pathing::is_fully_connected(&grid, DEFAULT_SEED_CELL));

        // Only the goal path is left, there is nothing more to wall up.
        assert_eq!(balance_walls(&mut grid, DEFAULT_SEED_CELL, 45, &mut rng).unwrap(), 38);
        assert_eq!(grid.goal(), Some(GridCoordinate::new(6, 4)));
    }

    #[test]
    fn surplus_walls_are_knocked_through() {
        let open = [(1, 1), (1, 2), (1, 3), (2, 3), (3, 3), (3, 2), (3, 1)];
        let mut grid = open_grid(5, 5, &open, (4, 2));
        assert_eq!(grid.count_walls(), 17);

        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(balance_walls(&mut grid, DEFAULT_SEED_CELL, 16, &mut rng).unwrap(), 16);
        assert!(border_is_never_a_passage(&grid));

        // (2, 1) and (2, 2) are the only walls between two open cells.
        assert_eq!(balance_walls(&mut grid, DEFAULT_SEED_CELL, 10, &mut rng).unwrap(), 15);
        assert_eq!(grid.get(GridCoordinate::new(2, 1)), Some(CellState::Path));
        assert_eq!(grid.get(GridCoordinate::new(2, 2)), Some(CellState::Path));
        assert!(pathing::is_fully_connected(&grid, DEFAULT_SEED_CELL));
    }

    #[test]
    fn first_regeneration_sets_the_target() {
        let mut generator = MazeGenerator::new(MazeConfig::default());
        let mut rng = StdRng::seed_from_u64(8);
        assert_eq!(generator.target_wall_count(), None);

        let first = generator.regenerate(&mut rng).unwrap();
        assert_eq!(generator.target_wall_count(), Some(first.count_walls()));

        let second = generator.regenerate(&mut rng).unwrap();
        assert_eq!(second.count_walls(), first.count_walls());
        assert_eq!(generator.target_wall_count(), Some(first.count_walls()));
    }

    #[test]
    fn regeneration_converges_on_a_preset_target() {
        let mut rng = StdRng::seed_from_u64(4);
        let natural = MazeGenerator::new(MazeConfig::default()).generate(&mut rng).unwrap().count_walls();

        for &target in &[natural + 3, natural - 3] {
            let mut generator = MazeGenerator::new(MazeConfig::default()).with_target_wall_count(target);
            let grid = generator.regenerate(&mut rng).unwrap();
            assert_eq!(grid.count_walls(), target);
            assert_eq!(grid.count(CellState::Goal), 1);
            assert!(pathing::is_fully_connected(&grid, generator.seed_cell()));
            assert!(border_is_never_a_passage(&grid));
        }
    }

    #[test]
    fn failed_generation_leaves_the_target_alone() {
        let config = MazeConfig::builder().width(0).build();
        let mut generator = MazeGenerator::new(config);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generator.regenerate(&mut rng).is_err());
        assert_eq!(generator.target_wall_count(), None);
    }

    #[test]
    fn layout_from_the_generator_config() {
        let config = MazeConfig::builder().width(9).height(9).build();
        let generator = MazeGenerator::new(config.clone());
        let mut rng = StdRng::seed_from_u64(21);
        let grid = generator.generate(&mut rng).unwrap();
        let layout = generator.spawn_layout(&grid);

        assert_eq!(layout.floor_positions.len(), 81);
        assert_eq!(layout.wall_positions.len(), grid.count_walls());
        assert_eq!(layout.goal_position, Some(Position3::new(6.0, config.floor_spawn_height, 8.0)));
        assert_eq!(generator.player_spawn(), Position3::new(1.0, config.player_spawn_height, 1.0));
    }

    #[test]
    fn quickcheck_exactly_one_goal() {
        fn p(params: MazeParams) -> bool {
            params.carve().count(CellState::Goal) == 1
        }
        quickcheck(p as fn(MazeParams) -> bool)
    }

    #[test]
    fn quickcheck_everything_reachable_from_the_seed() {
        fn p(params: MazeParams) -> bool {
            pathing::is_fully_connected(&params.carve(), params.seed)
        }
        quickcheck(p as fn(MazeParams) -> bool)
    }

    #[test]
    fn quickcheck_border_is_never_carved() {
        fn p(params: MazeParams) -> bool {
            border_is_never_a_passage(&params.carve())
        }
        quickcheck(p as fn(MazeParams) -> bool)
    }

    #[test]
    fn quickcheck_wall_count() {
        fn p(params: MazeParams) -> bool {
            wall_count_matches_open_cells(&params.carve())
        }
        quickcheck(p as fn(MazeParams) -> bool)
    }

    #[test]
    fn quickcheck_deterministic() {
        fn p(params: MazeParams) -> bool {
            params.carve() == params.carve()
        }
        quickcheck(p as fn(MazeParams) -> bool)
    }

    #[test]
    fn quickcheck_wall_spawns_sorted() {
        fn p(params: MazeParams) -> bool {
            let layout = spawning::build_spawn_positions(&params.carve(), 100.0, 0.0);
            let walls = layout.wall_positions;
            let mut resorted = walls.clone();
            sort_by_distance_from_origin(&mut resorted);
            walls.windows(2).all(|pair| {
                pair[0].distance_from_origin() <= pair[1].distance_from_origin()
            }) && resorted == walls
        }
        quickcheck(p as fn(MazeParams) -> bool)
    }

    #[test]
    fn quickcheck_balancing_moves_toward_target() {
        fn p(params: MazeParams, offset: i8) -> bool {
            let mut grid = params.carve();
            let before = grid.count_walls() as i64;
            let target = (before + i64::from(offset)).max(0) as usize;
            let mut rng = StdRng::seed_from_u64(params.rng_seed);
            let after = balance_walls(&mut grid, params.seed, target, &mut rng).unwrap() as i64;

            let target = target as i64;
            let no_overshoot = if before <= target {
                before <= after && after <= target
            } else {
                target <= after && after <= before
            };
            no_overshoot && grid.count(CellState::Goal) == 1 && border_is_never_a_passage(&grid) &&
            wall_count_matches_open_cells(&grid) &&
            pathing::is_fully_connected(&grid, params.seed)
        }
        quickcheck(p as fn(MazeParams, i8) -> bool)
    }
}
