use crate::board::Board;
use crate::color::Palette;

/// Paints `board` into an RGBA `frame` of `width * cell_size` by
/// `height * cell_size` pixels. Only reads the board.
pub fn draw(board: &Board, palette: &Palette, cell_size: usize, frame: &mut [u8]) {
    let cell_size = cell_size.max(1);
    let frame_width = board.width() * cell_size;
    if frame_width == 0 {
        return;
    }

    for (y, line) in frame.chunks_exact_mut(frame_width * 4).enumerate() {
        let row = y / cell_size;
        if row >= board.height() {
            break;
        }
        for (x, pixel) in line.chunks_exact_mut(4).enumerate() {
            let col = x / cell_size;
            let rgba = palette.color(board.get_cell(row, col), board.get_cell_age(row, col));
            pixel.copy_from_slice(&rgba);
        }
    }
}
