//! Startup settings, read from a TOML file.
//!
//! ```text
//! # board
//! board_width = 200
//! board_height = 150
//! young_color = "#30ff60"
//! ```
//!
//! Lines starting with `#` are comments. Every key has a default, so an
//! empty or missing file is a valid configuration.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::color::{Palette, Rgb};
use crate::engine::{Engine, TileSize};
use crate::error::{Error, Result};
use crate::grid::Boundary;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub board_width: usize,
    pub board_height: usize,
    /// Pixels per cell side.
    pub cell_size: usize,
    pub brush_size: usize,
    pub generations_per_second: u32,
    /// Share of live cells after a noise refill.
    pub noise_density: f32,
    /// 0 uses one worker per core.
    pub workers: usize,
    pub tile_rows: usize,
    pub tile_cols: usize,
    pub boundary: Boundary,
    pub young_color: Rgb,
    pub old_color: Rgb,
    pub dead_color: Rgb,
    /// Age at which a cell has fully faded to `old_color`.
    pub max_age: u32,
}

impl Default for Config {
    fn default() -> Self {
        let tile = TileSize::default();
        Self {
            board_width: 320,
            board_height: 200,
            cell_size: 4,
            brush_size: 1,
            generations_per_second: 30,
            noise_density: 0.3,
            workers: 0,
            tile_rows: tile.rows,
            tile_cols: tile.cols,
            boundary: Boundary::Clipped,
            young_color: Rgb::new(0xff, 0xf0, 0x40),
            old_color: Rgb::new(0x40, 0x60, 0xff),
            dead_color: Rgb::new(0x10, 0x10, 0x18),
            max_age: 100,
        }
    }
}

impl Config {
    /// Reads `path`, falling back to the defaults when it doesn't exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => {
                info!("reading config from {}", path.display());
                Self::from_toml(&text)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("{} not found, using default config", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(Error::InvalidConfig(msg.to_string()));
        if self.board_width == 0 || self.board_height == 0 {
            return invalid("board dimensions must be non-zero");
        }
        if self.cell_size == 0 {
            return invalid("cell_size must be non-zero");
        }
        if !(0.0..=1.0).contains(&self.noise_density) {
            return invalid("noise_density must be within 0..=1");
        }
        Ok(())
    }

    pub fn tile_size(&self) -> TileSize {
        TileSize {
            rows: self.tile_rows,
            cols: self.tile_cols,
        }
    }

    pub fn engine(&self) -> Result<Engine> {
        Ok(Engine::new(self.workers, self.tile_size())?.with_boundary(self.boundary))
    }

    pub fn palette(&self) -> Palette {
        Palette::new(self.young_color, self.old_color, self.dead_color, self.max_age)
    }
}
