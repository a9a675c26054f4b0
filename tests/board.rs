use age_life::engine::{Engine, TileSize};
use age_life::grid::Boundary;
use age_life::{storage, Board, Cell};

fn soup(width: usize, height: usize, seed: u64, engine: Engine) -> Board {
    let mut board = Board::with_engine(width, height, engine);
    let mut rng = randomize::PCG32::from((seed, 0x5851_f42d));
    board.randomize_with(&mut rng, 0.35);
    board
}

/// Dump format back to load format: drop the header and the separators.
fn undump(dump: &str) -> String {
    dump.lines()
        .skip(1)
        .map(|line| line.split(' ').collect::<String>() + "\n")
        .collect()
}

#[test]
fn glider_moves_one_phase() {
    let mut board = Board::new(5, 5);
    board.load(".#...\n..#..\n###..\n.....\n.....");
    board.next_generation();
    assert_eq!(board.to_text(), ".....\n#.#..\n.##..\n.#...\n.....\n");
    assert_eq!(board.generation(), 1);

    // survivors aged, newborns start at zero
    assert_eq!(board.get_cell_age(1, 2), 1);
    assert_eq!(board.get_cell_age(2, 1), 1);
    assert_eq!(board.get_cell_age(2, 2), 1);
    assert_eq!(board.get_cell_age(1, 0), 0);
    assert_eq!(board.get_cell_age(3, 1), 0);
}

#[test]
fn blinker_on_clipped_board_oscillates() {
    let mut board = Board::new(3, 3);
    board.load(".#.\n.#.\n.#.");
    board.next_generation();
    assert_eq!(board.to_text(), "...\n###\n...\n");
    assert_eq!(board.get_cell_age(1, 1), 1);
    board.next_generation();
    assert_eq!(board.to_text(), ".#.\n.#.\n.#.\n");
    assert_eq!(board.get_cell_age(1, 1), 2);
}

#[test]
fn blinker_on_shifted_board_dies() {
    let engine = Engine::new(2, TileSize::default())
        .unwrap()
        .with_boundary(Boundary::Shifted);
    let mut board = Board::with_engine(3, 3, engine);
    board.load(".#.\n.#.\n.#.");
    board.next_generation();
    assert_eq!(board.population(), 0);
    assert!(board.grid().ages().iter().all(|&age| age == 0));
}

#[test]
fn rule_holds_for_every_cell() {
    let mut board = soup(48, 37, 11, Engine::default());
    for _ in 0..5 {
        let before = board.grid().clone();
        board.next_generation();
        for row in 0..board.height() {
            for col in 0..board.width() {
                let n = before.live_neighbors(row, col, Boundary::Clipped);
                let was = before.get(row, col);
                let (now, age) = (board.get_cell(row, col), board.get_cell_age(row, col));
                match (was, n) {
                    (_, 0..=1) | (_, 4..) => assert_eq!((now, age), (Cell::Dead, 0)),
                    (Cell::Dead, 3) => assert_eq!((now, age), (Cell::Alive, 0)),
                    (Cell::Alive, _) => {
                        assert_eq!(now, Cell::Alive);
                        assert_eq!(age, before.age(row, col) + 1);
                    }
                    (Cell::Dead, _) => assert_eq!((now, age), (Cell::Dead, 0)),
                }
                if now == Cell::Dead {
                    assert_eq!(age, 0);
                }
            }
        }
    }
}

#[test]
fn one_worker_matches_many() {
    let single = Engine::new(1, TileSize { rows: 1000, cols: 1000 }).unwrap();
    let many = Engine::new(8, TileSize { rows: 3, cols: 5 }).unwrap();
    let mut a = soup(101, 77, 3, single);
    let mut b = soup(101, 77, 3, many);
    assert_eq!(a.grid(), b.grid());
    for _ in 0..20 {
        a.next_generation();
        b.next_generation();
        assert_eq!(a.grid().cells(), b.grid().cells());
        assert_eq!(a.grid().ages(), b.grid().ages());
    }
}

#[test]
fn load_of_dump_reproduces_state() {
    let mut board = soup(23, 9, 5, Engine::default());
    board.next_generation();
    board.next_generation();

    let mut copy = Board::new(23, 9);
    copy.load(&undump(&board.dump()));
    assert_eq!(copy.grid().cells(), board.grid().cells());
}

#[test]
fn clear_is_idempotent_and_a_fixed_point() {
    let mut board = soup(16, 16, 9, Engine::default());
    board.next_generation();
    board.clear();
    board.clear();
    assert_eq!(board.population(), 0);
    board.next_generation();
    assert_eq!(board.population(), 0);
    assert!(board.grid().ages().iter().all(|&age| age == 0));
    assert_eq!(board.generation(), 2);
}

#[test]
fn paint_then_save_and_reload() {
    let path = std::env::temp_dir().join(format!("age-life-it-{}.txt", std::process::id()));
    let mut board = Board::new(8, 6);
    board.set_line((0, 0), (7, 5), 1, Cell::Alive);
    board.set_cell(5, 0, Cell::Alive);
    board.set_cell(99, 99, Cell::Alive);
    storage::save_board(&path, &board).unwrap();

    let mut loaded = Board::new(8, 6);
    storage::load_board(&path, &mut loaded).unwrap();
    assert_eq!(loaded.grid().cells(), board.grid().cells());
    assert!(loaded.get_cell(0, 0).is_alive());
    assert!(loaded.get_cell(5, 7).is_alive());
    std::fs::remove_file(&path).unwrap();
}
