// Breadth first floodfill over the open (non wall) cells of a grid.
//
// Every step between adjacent open cells costs one, so the first time a cell is reached is
// also its shortest distance from the start. The distances map doubles as the visited set.

use smallvec::SmallVec;

use crate::cells::GridCoordinate;
use crate::grid::OccupancyGrid;
use crate::utils;
use crate::utils::FnvHashMap;


#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Floodfill from `start_coordinate`. Returns None if the start is outside the grid or a wall.
    pub fn new(grid: &OccupancyGrid, start_coordinate: GridCoordinate) -> Option<Distances> {

        if !grid.is_open(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, 0);

        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for link_coordinate in grid.open_neighbours(*cell_coord) {
                    if !distances.contains_key(&link_coordinate) {
                        distances.insert(link_coordinate, distance_to_cell + 1);
                        new_frontier.push(link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// Number of cells reachable from the start, the start included.
    #[inline(always)]
    pub fn reached_count(&self) -> usize {
        self.distances.len()
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[GridCoordinate; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .collect()
    }
}

/// Walk back from `end_point` to the start of `distances_from_start`, always stepping to an
/// adjacent open cell one closer to the start.
/// Returns None if the end point cannot be reached from the start.
pub fn shortest_path(grid: &OccupancyGrid,
                     distances_from_start: &Distances,
                     end_point: GridCoordinate)
                     -> Option<Vec<GridCoordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let start = distances_from_start.start();
    let mut path = vec![end_point];
    let mut current_coord = end_point;

    while current_coord != start {
        let closer = grid.open_neighbours(current_coord)
            .into_iter()
            .filter_map(|coord| {
                distances_from_start.distance_from_start_to(coord).map(|d| (coord, d))
            })
            .min_by_key(|&(_, d)| d);

        match closer {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance => {
                current_coord = closer_coord;
                current_distance = closer_distance;
                path.push(current_coord);
            }
            // The distances were computed for a different grid.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// Can every open cell of the grid be reached from `start`.
pub fn is_fully_connected(grid: &OccupancyGrid, start: GridCoordinate) -> bool {
    let open_cells = grid.size() - grid.count_walls();
    Distances::new(grid, start).map_or(false, |d| d.reached_count() == open_cells)
}
