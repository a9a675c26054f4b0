//! Generation stepping.
//!
//! The next generation is written into a second [`Grid`] while the current
//! one stays frozen. The write side is cut into rectangular tiles (row bands
//! split into column runs), each tile owning disjoint slices of the state and
//! age buffers, and the tiles are stepped in parallel on a rayon pool. The
//! call returns once every tile is done.

use log::debug;
use rayon::prelude::*;

use crate::error::Result;
use crate::grid::{Boundary, Cell, Grid};

/// The per-cell rule: returns the next state and age of a cell given its
/// current state, age and live neighbour count.
pub fn transition(cell: Cell, age: u32, neighbors: u8) -> (Cell, u32) {
    match (cell, neighbors) {
        // under- and overpopulation
        (_, 0..=1) | (_, 4..) => (Cell::Dead, 0),
        (Cell::Dead, 3) => (Cell::Alive, 0),
        (Cell::Alive, _) => (Cell::Alive, age.saturating_add(1)),
        (Cell::Dead, _) => (Cell::Dead, 0),
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileSize {
    pub rows: usize,
    pub cols: usize,
}

impl Default for TileSize {
    fn default() -> Self {
        Self { rows: 32, cols: 256 }
    }
}

/// A rectangle of the write buffer. `rows[i]` is the run of cells at board
/// row `row + i` starting at board column `col`.
struct Tile<'a, T> {
    row: usize,
    col: usize,
    rows: Vec<&'a mut [T]>,
}

fn split_tiles<T>(buf: &mut [T], width: usize, size: TileSize) -> Vec<Tile<'_, T>> {
    let mut tiles = Vec::new();
    if width == 0 {
        return tiles;
    }
    for (band, cells) in buf.chunks_mut(width * size.rows).enumerate() {
        let first = tiles.len();
        for (r, row) in cells.chunks_mut(width).enumerate() {
            for (t, run) in row.chunks_mut(size.cols).enumerate() {
                if r == 0 {
                    tiles.push(Tile {
                        row: band * size.rows,
                        col: t * size.cols,
                        rows: Vec::with_capacity(size.rows),
                    });
                }
                tiles[first + t].rows.push(run);
            }
        }
    }
    tiles
}

fn step_tile(prev: &Grid, boundary: Boundary, cells: Tile<'_, Cell>, ages: Tile<'_, u32>) {
    for (dr, (cell_run, age_run)) in cells.rows.into_iter().zip(ages.rows).enumerate() {
        let row = cells.row + dr;
        for (dc, (cell, age)) in cell_run.iter_mut().zip(age_run.iter_mut()).enumerate() {
            let col = cells.col + dc;
            let (next, next_age) = transition(
                prev.get(row, col),
                prev.age(row, col),
                prev.live_neighbors(row, col, boundary),
            );
            *cell = next;
            *age = next_age;
        }
    }
}

/// Steps grids in parallel.
pub struct Engine {
    pool: Option<rayon::ThreadPool>,
    tile: TileSize,
    boundary: Boundary,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            pool: None,
            tile: TileSize::default(),
            boundary: Boundary::default(),
        }
    }
}

impl Engine {
    /// An engine with its own pool of `workers` threads. Zero workers means
    /// rayon's global pool.
    pub fn new(workers: usize, tile: TileSize) -> Result<Self> {
        let tile = TileSize {
            rows: tile.rows.max(1),
            cols: tile.cols.max(1),
        };
        let pool = if workers == 0 {
            None
        } else {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .thread_name(|i| format!("life-worker-{i}"))
                    .build()?,
            )
        };
        debug!("engine: {workers} workers, {}x{} tiles", tile.rows, tile.cols);
        Ok(Self {
            pool,
            tile,
            boundary: Boundary::default(),
        })
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn tile(&self) -> TileSize {
        self.tile
    }

    pub fn workers(&self) -> usize {
        self.pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, |pool| pool.current_num_threads())
    }

    /// Writes the generation after `prev` into `next`. Both grids must have
    /// the same dimensions.
    pub fn step(&self, prev: &Grid, next: &mut Grid) {
        assert_eq!(
            (prev.width(), prev.height()),
            (next.width(), next.height()),
            "step between grids of different size"
        );
        let (width, height) = (next.width(), next.height());
        let boundary = self.boundary;
        let tile = TileSize {
            rows: self.tile.rows.min(height).max(1),
            cols: self.tile.cols.min(width).max(1),
        };
        let (cells, ages) = next.buffers_mut();
        let work: Vec<_> = split_tiles(cells, width, tile)
            .into_iter()
            .zip(split_tiles(ages, width, tile))
            .collect();

        let run = move || {
            work.into_par_iter()
                .for_each(|(cells, ages)| step_tile(prev, boundary, cells, ages));
        };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}
