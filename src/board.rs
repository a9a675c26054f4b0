use std::fmt;

use clipline::clipline;
use log::{debug, trace};

use crate::engine::Engine;
use crate::grid::{Cell, Grid};

/// Generate a pseudorandom seed for the noise fill.
fn generate_seed() -> (u64, u64) {
    use byteorder::{ByteOrder, NativeEndian};
    use getrandom::getrandom;

    let mut seed = [0_u8; 16];

    if let Err(err) = getrandom(&mut seed) {
        log::warn!("getrandom failed ({err}), falling back to the clock");
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        seed = nanos.to_ne_bytes();
    }

    (
        NativeEndian::read_u64(&seed[0..8]),
        NativeEndian::read_u64(&seed[8..16]),
    )
}

/// A Game of Life board with per-cell ages.
///
/// This is what the window, the text mode and the file loader talk to. All
/// coordinate arguments are `(row, col)`; anything off the board is ignored.
pub struct Board {
    cells: Grid,
    scratch: Grid,
    engine: Engine,
    generation: u64,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_engine(width, height, Engine::default())
    }

    pub fn with_engine(width: usize, height: usize, engine: Engine) -> Self {
        Self {
            cells: Grid::new(width, height),
            scratch: Grid::new(width, height),
            engine,
            generation: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.cells.population()
    }

    pub fn grid(&self) -> &Grid {
        &self.cells
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Cell {
        self.cells.get(row, col)
    }

    pub fn get_cell_age(&self, row: usize, col: usize) -> u32 {
        self.cells.age(row, col)
    }

    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells.set(row, col, cell);
    }

    pub fn set_cell_age(&mut self, row: usize, col: usize, age: u32) {
        self.cells.set_age(row, col, age);
    }

    /// Kills every cell. The generation counter keeps running.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Computes the next generation in place. Returns once the whole board
    /// has been stepped.
    pub fn next_generation(&mut self) {
        self.generation += 1;
        self.engine.step(&self.cells, &mut self.scratch);
        std::mem::swap(&mut self.cells, &mut self.scratch);
        trace!(
            "generation {}: {} alive",
            self.generation,
            self.cells.population()
        );
    }

    /// Overwrites cells from newline separated rows of `#` (alive) and `.`
    /// (dead). Input that doesn't cover the whole board leaves the rest as is.
    pub fn load(&mut self, text: &str) {
        self.cells.load(text.lines());
    }

    /// The text dump: a `Generation: n` header then one line per row with
    /// cells separated by spaces.
    pub fn dump(&self) -> String {
        self.to_string()
    }

    /// The board in the format [`Board::load`] reads.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.width() + 1) * self.height());
        for row in 0..self.height() {
            out.extend((0..self.width()).map(|col| self.get_cell(row, col).to_char()));
            out.push('\n');
        }
        out
    }

    /// Refill with noise: each cell is alive with probability `density`.
    pub fn randomize(&mut self, density: f32) {
        let mut rng: randomize::PCG32 = generate_seed().into();
        self.randomize_with(&mut rng, density);
    }

    pub fn randomize_with(&mut self, rng: &mut randomize::PCG32, density: f32) {
        self.cells.clear();
        for row in 0..self.height() {
            for col in 0..self.width() {
                let alive = randomize::f32_half_open_right(rng.next_u32()) < density;
                self.cells.set(row, col, Cell::from(alive));
            }
        }
        debug!("randomized board, {} alive", self.population());
    }

    /// Stamps a `brush` x `brush` square centred on `(row, col)`. Signed so
    /// that brushes hanging over the top or left edge still paint what's
    /// on the board.
    pub fn paint(&mut self, row: isize, col: isize, brush: usize, cell: Cell) {
        let brush = brush.max(1) as isize;
        let start = brush / 2;
        for r in (row - start)..(row - start + brush) {
            for c in (col - start)..(col - start + brush) {
                if r >= 0 && c >= 0 {
                    self.cells.set(r as usize, c as usize, cell);
                }
            }
        }
    }

    /// Paints the line from `(x0, y0)` to `(x1, y1)` in board coordinates
    /// (x is the column), stamping the brush at every point on the board.
    pub fn set_line(
        &mut self,
        (x0, y0): (isize, isize),
        (x1, y1): (isize, isize),
        brush: usize,
        cell: Cell,
    ) {
        if self.width() == 0 || self.height() == 0 {
            return;
        }
        let clip_max = ((self.width() - 1) as isize, (self.height() - 1) as isize);
        let mut points = Vec::new();
        clipline(((x0, y0), (x1, y1)), ((0, 0), clip_max), |x, y| {
            points.push((x, y));
        });
        points.push((x1, y1));
        for (x, y) in points {
            self.paint(y, x, brush, cell);
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generation: {}", self.generation)?;
        for row in 0..self.height() {
            for col in 0..self.width() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", self.get_cell(row, col).to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
