#![forbid(unsafe_code)]

pub mod board;
pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod render;
pub mod storage;

use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use error_iter::ErrorIter as _;
use log::{debug, error, info};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::KeyCode;
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

pub use crate::board::Board;
pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::grid::Cell;

const DEFAULT_SAVE_PATH: &str = "board.txt";
const MAX_SPEED: u32 = 240;

// winit_input_helper mouse button indices
const LEFT_BUTTON: usize = 0;
const RIGHT_BUTTON: usize = 1;

/// Builds the board described by `config`, loading `board_file` if given.
/// A board file that can't be read is logged and the board starts empty.
pub fn setup_board(config: &Config, board_file: Option<&PathBuf>) -> Result<Board> {
    let mut board = Board::with_engine(config.board_width, config.board_height, config.engine()?);
    match board_file {
        Some(path) => {
            if let Err(err) = storage::load_board(path, &mut board) {
                log_error("load_board", err);
            }
        }
        None => board.randomize(config.noise_density),
    }
    Ok(board)
}

/// The console mode: print the board, step, repeat.
pub fn run_text(board: &mut Board, generations: u64, out: &mut impl Write) -> Result<()> {
    let stdout = |e| Error::io("<stdout>", e);
    for _ in 0..generations {
        writeln!(out, "{board}").map_err(stdout)?;
        board.next_generation();
    }
    writeln!(out, "{board}").map_err(stdout)?;
    Ok(())
}

/// Mouse painting in progress: the state being painted.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Stroke(Cell);

/// One update of mouse painting. `cursor` is the (x, y) cell under the
/// pointer now and at the previous update; nothing is painted without one.
/// Returns the stroke still in progress.
fn apply_mouse(
    board: &mut Board,
    stroke: Option<Stroke>,
    cursor: Option<((isize, isize), (isize, isize))>,
    pressed: Option<Cell>,
    held: bool,
    released: bool,
    brush: usize,
) -> Option<Stroke> {
    if let Some(cell) = pressed {
        if let Some(((x, y), _)) = cursor {
            debug!("stroke of {cell:?} from {:?}", (x, y));
            board.paint(y, x, brush, cell);
        }
        return Some(Stroke(cell));
    }
    let Stroke(cell) = stroke?;
    if released || held {
        if let Some((now, prev)) = cursor {
            board.set_line(prev, now, brush, cell);
        }
    }
    if released || !held {
        return None;
    }
    stroke
}

/// Opens the window and runs the simulation until it's closed.
pub fn run(config: Config, mut board: Board, board_file: Option<PathBuf>) -> Result<()> {
    let event_loop = EventLoop::new()?;
    let mut input = WinitInputHelper::new();

    let frame_width = (board.width() * config.cell_size) as u32;
    let frame_height = (board.height() * config.cell_size) as u32;

    let window = {
        let size = LogicalSize::new(frame_width as f64, frame_height as f64);
        WindowBuilder::new()
            .with_title("Life")
            .with_inner_size(size)
            .with_min_inner_size(LogicalSize::new(
                board.width() as f64,
                board.height() as f64,
            ))
            .build(&event_loop)?
    };

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(frame_width, frame_height, surface_texture)?
    };

    let palette = config.palette();
    let save_path = board_file.unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_PATH));
    let mut paused = false;
    let mut brush = config.brush_size.max(1);
    let mut speed = config.generations_per_second.clamp(1, MAX_SPEED);
    let mut stroke: Option<Stroke> = None;
    let mut last_step = Instant::now();

    info!(
        "{}x{} board on {} workers; P pause, Space step, C clear, R noise, [ ] brush, Up/Down speed, S save",
        board.width(),
        board.height(),
        config.workers
    );

    let res = event_loop.run(|event, elwt| {
        if let Event::WindowEvent {
            event: WindowEvent::RedrawRequested,
            ..
        } = event
        {
            render::draw(&board, &palette, config.cell_size, pixels.frame_mut());
            if let Err(err) = pixels.render() {
                log_error("pixels.render", err);
                elwt.exit();
                return;
            }
        }

        if input.update(&event) {
            if input.key_pressed(KeyCode::Escape) || input.close_requested() {
                info!("quitting at generation {}", board.generation());
                elwt.exit();
                return;
            }
            if input.key_pressed(KeyCode::KeyP) {
                paused = !paused;
                info!("{}", if paused { "paused" } else { "resumed" });
            }
            if input.key_pressed_os(KeyCode::Space) {
                // Space steps a single generation
                paused = true;
            }
            if input.key_pressed(KeyCode::KeyC) {
                board.clear();
            }
            if input.key_pressed(KeyCode::KeyR) {
                board.randomize(config.noise_density);
            }
            if input.key_pressed_os(KeyCode::BracketRight) {
                brush += 1;
                debug!("brush size {brush}");
            }
            if input.key_pressed_os(KeyCode::BracketLeft) {
                brush = brush.saturating_sub(1).max(1);
                debug!("brush size {brush}");
            }
            if input.key_pressed_os(KeyCode::ArrowUp) {
                speed = (speed + 1).min(MAX_SPEED);
                debug!("{speed} generations per second");
            }
            if input.key_pressed_os(KeyCode::ArrowDown) {
                speed = speed.saturating_sub(1).max(1);
                debug!("{speed} generations per second");
            }
            if input.key_pressed(KeyCode::KeyS) {
                if let Err(err) = storage::save_board(&save_path, &board) {
                    log_error("save_board", err);
                }
            }

            // Cursor positions in cells, now and at the previous update.
            let cursor = input.cursor().map(|(mx, my)| {
                let (dx, dy) = input.cursor_diff();
                let (prev_x, prev_y) = (mx - dx, my - dy);

                let (mx_i, my_i) = pixels
                    .window_pos_to_pixel((mx, my))
                    .unwrap_or_else(|pos| pixels.clamp_pixel_pos(pos));
                let (px_i, py_i) = pixels
                    .window_pos_to_pixel((prev_x, prev_y))
                    .unwrap_or_else(|pos| pixels.clamp_pixel_pos(pos));

                let scale = config.cell_size as isize;
                (
                    (mx_i as isize / scale, my_i as isize / scale),
                    (px_i as isize / scale, py_i as isize / scale),
                )
            });

            let pressed = if input.mouse_pressed(LEFT_BUTTON) {
                Some(Cell::Alive)
            } else if input.mouse_pressed(RIGHT_BUTTON) {
                Some(Cell::Dead)
            } else {
                None
            };
            let button = |Stroke(cell): Stroke| {
                if cell.is_alive() {
                    LEFT_BUTTON
                } else {
                    RIGHT_BUTTON
                }
            };
            let (held, released) = stroke.map_or((false, false), |s| {
                (input.mouse_held(button(s)), input.mouse_released(button(s)))
            });
            stroke = apply_mouse(&mut board, stroke, cursor, pressed, held, released, brush);

            if let Some(size) = input.window_resized() {
                if let Err(err) = pixels.resize_surface(size.width, size.height) {
                    log_error("pixels.resize_surface", err);
                    elwt.exit();
                    return;
                }
            }

            let interval = Duration::from_secs(1) / speed;
            if input.key_pressed_os(KeyCode::Space)
                || (!paused && last_step.elapsed() >= interval)
            {
                board.next_generation();
                last_step = Instant::now();
            }
            window.request_redraw();
        }
    });
    res.map_err(Error::from)
}

pub fn log_error<E: std::error::Error + 'static>(method_name: &str, err: E) {
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  Caused by: {source}");
    }
}
