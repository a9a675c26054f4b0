use serde::Deserialize;

/// State of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    Alive,
    #[default]
    Dead,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Cell for a load-format character. Anything but `#` is dead.
    pub fn from_char(c: char) -> Self {
        if c == '#' {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Alive => '#',
            Cell::Dead => '.',
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

/// Which neighbours exist at the board edge. Neither wraps.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Every cell sees its full 8-neighbourhood clipped to the board.
    #[default]
    Clipped,
    /// Cells in row 0 and column 0 are never counted as anyone's neighbour,
    /// though they still live and die by their own count.
    Shifted,
}

/// Row-major state and age arrays for a fixed `width` x `height` board.
///
/// Rows index the height, columns the width. Reads outside the board return
/// a dead cell of age 0, writes outside it are dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    ages: Vec<u32>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            cells: vec![Cell::Dead; size],
            ages: vec![0; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn idx(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.height && col < self.width {
            Some(row * self.width + col)
        } else {
            None
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.idx(row, col).map_or(Cell::Dead, |i| self.cells[i])
    }

    pub fn age(&self, row: usize, col: usize) -> u32 {
        self.idx(row, col).map_or(0, |i| self.ages[i])
    }

    /// Writes a state. Killing a cell or bringing a dead one to life resets
    /// its age; re-asserting the current state leaves the age alone.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if let Some(i) = self.idx(row, col) {
            if self.cells[i] != cell || cell == Cell::Dead {
                self.ages[i] = 0;
            }
            self.cells[i] = cell;
        }
    }

    /// Ages only stick to live cells.
    pub fn set_age(&mut self, row: usize, col: usize, age: u32) {
        if let Some(i) = self.idx(row, col) {
            if self.cells[i].is_alive() {
                self.ages[i] = age;
            }
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Dead);
        self.ages.fill(0);
    }

    /// Overwrites states from rows of `#`/`.` characters. Content past the
    /// board edge is ignored and cells the input doesn't reach keep their
    /// previous value.
    pub fn load<'a>(&mut self, rows: impl IntoIterator<Item = &'a str>) {
        for (row, line) in rows.into_iter().take(self.height).enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            for (col, c) in line.chars().take(self.width).enumerate() {
                self.set(row, col, Cell::from_char(c));
            }
        }
    }

    /// Live cells among the 8 surrounding ones. Neighbours past the edge
    /// don't exist.
    pub fn live_neighbors(&self, row: usize, col: usize, boundary: Boundary) -> u8 {
        let first = match boundary {
            Boundary::Clipped => 0,
            Boundary::Shifted => 1,
        };
        let last_row = (row + 1).min(self.height.saturating_sub(1));
        let last_col = (col + 1).min(self.width.saturating_sub(1));
        let mut count = 0;
        for r in row.saturating_sub(1).max(first)..=last_row {
            for c in col.saturating_sub(1).max(first)..=last_col {
                if (r, c) != (row, col) && self.cells[r * self.width + c].is_alive() {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn ages(&self) -> &[u32] {
        &self.ages
    }

    /// Both buffers at once, for the engine's tile split.
    pub(crate) fn buffers_mut(&mut self) -> (&mut [Cell], &mut [u32]) {
        (&mut self.cells, &mut self.ages)
    }
}
