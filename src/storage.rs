//! Plain-text board files: one line per row, `#` alive, `.` dead.

use std::fs;
use std::path::Path;

use log::info;

use crate::board::Board;
use crate::error::{Error, Result};

/// Loads `path` into `board`. If the file can't be read the board is left
/// untouched; otherwise the contents are applied as by [`Board::load`].
pub fn load_board(path: impl AsRef<Path>, board: &mut Board) -> Result<()> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let text = String::from_utf8_lossy(&bytes);
    board.load(&text);
    info!(
        "loaded {} ({} alive on a {}x{} board)",
        path.display(),
        board.population(),
        board.width(),
        board.height()
    );
    Ok(())
}

pub fn save_board(path: impl AsRef<Path>, board: &Board) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, board.to_text()).map_err(|e| Error::io(path, e))?;
    info!("saved generation {} to {}", board.generation(), path.display());
    Ok(())
}
