use netbattle::{CellState, GameError, Grid};

#[test]
fn test_new_grid_is_water() {
    let grid = Grid::new(4, 6);
    assert_eq!(grid.rows(), 4);
    assert_eq!(grid.cols(), 6);
    assert_eq!(grid.count(CellState::Water), 24);
    assert!(grid.cells().all(|(_, s)| s == CellState::Water));
}

#[test]
fn test_get_set_bounds() {
    let mut grid = Grid::new(3, 5);
    grid.set(2, 4, CellState::Ship).unwrap();
    assert_eq!(grid.get(2, 4), Ok(CellState::Ship));

    assert_eq!(grid.get(3, 0), Err(GameError::OutOfBounds { row: 3, col: 0 }));
    assert_eq!(grid.get(0, 5), Err(GameError::OutOfBounds { row: 0, col: 5 }));
    assert_eq!(
        grid.set(5, 5, CellState::Hit),
        Err(GameError::OutOfBounds { row: 5, col: 5 })
    );
    // A failed set leaves nothing behind.
    assert_eq!(grid.count(CellState::Hit), 0);
}

#[test]
fn test_set_performs_no_transition_checks() {
    let mut grid = Grid::new(2, 2);
    grid.set(0, 0, CellState::Sunk).unwrap();
    grid.set(0, 0, CellState::Water).unwrap();
    assert_eq!(grid.get(0, 0), Ok(CellState::Water));
}

#[test]
fn test_probe_reads_off_grid_as_forbidden() {
    let grid = Grid::new(10, 10);
    assert_eq!(grid.probe(0, 0), CellState::Water);
    assert_eq!(grid.probe(10, 0), CellState::Forbidden);
    assert_eq!(grid.probe(0, usize::MAX), CellState::Forbidden);
}

#[test]
fn test_neighbors_clip_at_edges() {
    let grid = Grid::new(10, 10);
    assert_eq!(grid.neighbors(0, 0).count(), 3);
    assert_eq!(grid.neighbors(0, 5).count(), 5);
    assert_eq!(grid.neighbors(9, 9).count(), 3);
    assert_eq!(grid.neighbors(4, 4).count(), 8);

    let around: Vec<_> = grid.neighbors(4, 4).collect();
    assert!(!around.contains(&(4, 4)));
    assert!(around.contains(&(3, 3)));
    assert!(around.contains(&(5, 5)));
}

#[test]
fn test_replace_where_and_clear() {
    let mut grid = Grid::new(3, 3);
    grid.set(0, 0, CellState::Forbidden).unwrap();
    grid.set(1, 1, CellState::Forbidden).unwrap();
    grid.set(2, 2, CellState::Ship).unwrap();

    grid.replace_where(|s| s == CellState::Forbidden, CellState::Water);
    assert_eq!(grid.count(CellState::Forbidden), 0);
    assert_eq!(grid.get(2, 2), Ok(CellState::Ship));

    grid.clear();
    assert_eq!(grid.count(CellState::Water), 9);
}

#[test]
fn test_display_renders_headers_and_symbols() {
    let mut grid = Grid::new(2, 3);
    grid.set(0, 1, CellState::Ship).unwrap();
    grid.set(1, 2, CellState::Miss).unwrap();
    let text = grid.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains('0') && lines[0].contains('2'));
    assert!(lines[1].contains('S'));
    assert!(lines[2].contains('o'));
}
