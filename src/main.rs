// `error_chain!` can recurse deeply
#![recursion_limit = "1024"]

use docopt::Docopt;
use error_chain::bail;
use itertools::Itertools;
use lattice_mazes::{
    cells::GridCoordinate,
    config::MazeConfig,
    falling::FallingWall,
    generators::MazeGenerator,
    grid::OccupancyGrid,
    pathing,
    spawning::{Position3, SpawnLayout, StagedSpawner},
};
use log::{info, warn, LevelFilter};
use rand::{rngs::StdRng, SeedableRng};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
    time::Duration,
};

const USAGE: &str = "Lattice Mazes

Usage:
    lattice_mazes_driver -h | --help
    lattice_mazes_driver [--width=<w>] [--height=<h>] [--jump=<n>] [--rng-seed=<n>] [--regenerate=<n>] [--target-walls=<n>] [--text-out=<path>] [--show-spawns] [--simulate-drop] [--tick-ms=<n>]

Options:
    -h --help              Show this screen.
    --width=<w>            Maze width in cells, even widths are bumped up to odd [default: 21].
    --height=<h>           Maze height in cells, even heights are bumped up to odd [default: 21].
    --jump=<n>             Cells between the lattice points the carver decides at. Only 2 guarantees every passage is reachable [default: 2].
    --rng-seed=<n>         Seed the random number generator so the same maze comes out every run.
    --regenerate=<n>       Throw the maze away and carve a new one n times, balancing each toward the target wall count [default: 0].
    --target-walls=<n>     Balance every maze toward n walls. Defaults to the wall count of the first maze.
    --text-out=<path>      Output file path for a textual rendering of the final maze.
    --show-spawns          List the player, goal and wall spawn positions of the final maze.
    --simulate-drop        Run the staged wall drop-in on a simulated clock until every wall has landed.
    --tick-ms=<n>          Simulated time step of the drop-in in milliseconds [default: 16].
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_width: usize,
    flag_height: usize,
    flag_jump: usize,
    flag_rng_seed: Option<u64>,
    flag_regenerate: usize,
    flag_target_walls: Option<usize>,
    flag_text_out: String,
    flag_show_spawns: bool,
    flag_simulate_drop: bool,
    flag_tick_ms: u64,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::lattice_mazes::errors::Error, ::lattice_mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let config = MazeConfig::builder()
        .width(args.flag_width)
        .height(args.flag_height)
        .jump_distance(args.flag_jump)
        .build();

    let mut rng = match args.flag_rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut generator = MazeGenerator::new(config);
    if let Some(target) = args.flag_target_walls {
        generator = generator.with_target_wall_count(target);
    }

    let mut maze = generator.regenerate(&mut rng).chain_err(|| "Failed to generate the maze")?;
    info!("generated a {}x{} maze with {} walls",
          maze.width().0,
          maze.height().0,
          maze.count_walls());

    for attempt in 1..=args.flag_regenerate {
        maze = generator.regenerate(&mut rng)
            .chain_err(|| format!("Failed to regenerate the maze on attempt {}", attempt))?;
        info!("regeneration {}: {} walls, target {:?}",
              attempt,
              maze.count_walls(),
              generator.target_wall_count());
    }

    report_distances(&maze, generator.seed_cell());
    output_maze_text(&maze, &args.flag_text_out)?;

    let layout = generator.spawn_layout(&maze);

    if args.flag_show_spawns {
        print_spawns(&generator, &layout);
    }

    if args.flag_simulate_drop {
        simulate_drop(generator.config(), &layout, Duration::from_millis(args.flag_tick_ms))?;
    }

    Ok(())
}

fn report_distances(maze: &OccupancyGrid, seed: GridCoordinate) {
    let distances = match pathing::Distances::new(maze, seed) {
        Some(distances) => distances,
        None => {
            warn!("the seed cell {:?} is walled up, no distances to report", seed);
            return;
        }
    };

    match maze.goal().and_then(|goal| distances.distance_from_start_to(goal)) {
        Some(steps) => info!("the goal is {} steps from the seed", steps),
        None => warn!("the goal cannot be reached from the seed"),
    }
    info!("the furthest cells from the seed are {} steps away: {:?}",
          distances.max(),
          distances.furthest_points_on_grid().as_slice());
}

fn output_maze_text(maze: &OccupancyGrid, text_out: &str) -> Result<()> {
    if text_out.is_empty() {
        print!("{}", maze);
    } else {
        write_text_to_file(&format!("{}", maze), text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", text_out))?;
    }
    Ok(())
}

fn print_spawns(generator: &MazeGenerator, layout: &SpawnLayout) {
    println!("player: {}", format_position(generator.player_spawn()));

    match layout.goal_position {
        Some(goal) => println!("goal: {}", format_position(goal)),
        None => warn!("the maze has no goal cell, no goal marker to spawn"),
    }

    println!("floor tiles: {}", layout.floor_positions.len());
    println!("walls ({}): {}",
             layout.wall_positions.len(),
             layout.wall_positions.iter().map(|p| format_position(*p)).join(" "));
}

fn format_position(p: Position3) -> String {
    format!("({}, {}, {})", p.x, p.y, p.z)
}

/// Step the staged spawner and every spawned wall with a fixed tick until all walls rest on the
/// floor. Nothing sleeps, the clock is simulated.
fn simulate_drop(config: &MazeConfig, layout: &SpawnLayout, tick: Duration) -> Result<()> {

    if tick == Duration::from_millis(0) {
        bail!("The drop-in tick must be at least one millisecond");
    }
    if let Some(stuck) = layout.wall_positions
        .iter()
        .map(|position| FallingWall::from_config(*position, config))
        .find(|wall| !wall.will_land()) {
        warn!("a wall spawned at {} never reaches the floor, skipping the drop-in",
              format_position(stuck.position()));
        return Ok(());
    }

    let mut spawner = StagedSpawner::new(&layout.wall_positions, config.wall_spawn_interval);
    let mut falling: Vec<FallingWall> = vec![];
    let mut landed = 0;
    let mut ticks = 0u64;
    let mut delta = Duration::from_millis(0);

    loop {
        falling.extend(spawner.advance(delta)
                              .iter()
                              .map(|position| FallingWall::from_config(*position, config)));

        for wall in &mut falling {
            wall.step(delta);
        }
        let still_falling_before = falling.len();
        falling.retain(FallingWall::is_falling);
        landed += still_falling_before - falling.len();

        if spawner.is_finished() && falling.is_empty() {
            break;
        }
        delta = tick;
        ticks += 1;
    }

    info!("{} walls landed after {} ticks ({:?} simulated)", landed, ticks, spawner.elapsed());
    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
