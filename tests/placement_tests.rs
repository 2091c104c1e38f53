use netbattle::{
    canonical_origin, is_settable, remove_forbidden_squares, remove_ship, set_forbidden_squares,
    set_ship, CellState, Grid, Orientation,
};

#[test]
fn test_is_settable_checks_the_forward_line() {
    let grid = Grid::new(10, 10);
    assert!(is_settable(&grid, 3, Orientation::Horizontal, 0, 0));
    assert!(is_settable(&grid, 3, Orientation::Horizontal, 0, 7));
    assert!(!is_settable(&grid, 3, Orientation::Horizontal, 0, 8));
    assert!(is_settable(&grid, 3, Orientation::Vertical, 7, 0));
    assert!(!is_settable(&grid, 3, Orientation::Vertical, 8, 0));
    assert!(!is_settable(&grid, 2, Orientation::Vertical, 10, 0));
    assert!(!is_settable(&grid, 0, Orientation::Vertical, 0, 0));
}

#[test]
fn test_is_settable_rejects_occupied_cells() {
    let mut grid = Grid::new(10, 10);
    grid.set(2, 4, CellState::Ship).unwrap();
    assert!(!is_settable(&grid, 3, Orientation::Horizontal, 2, 2));
    assert!(is_settable(&grid, 2, Orientation::Horizontal, 2, 2));

    grid.set(5, 5, CellState::Forbidden).unwrap();
    assert!(!is_settable(&grid, 1, Orientation::Vertical, 5, 5));
}

#[test]
fn test_set_ship_commits_cells() {
    let mut grid = Grid::new(10, 10);
    assert!(set_ship(&mut grid, 3, Orientation::Vertical, 1, 6));
    for r in 1..4 {
        assert_eq!(grid.get(r, 6), Ok(CellState::Ship));
    }
    assert_eq!(grid.count(CellState::Ship), 3);
}

#[test]
fn test_set_ship_refuses_without_mutation() {
    let mut grid = Grid::new(10, 10);
    assert!(set_ship(&mut grid, 2, Orientation::Horizontal, 4, 4));
    let before = grid.clone();
    assert!(!set_ship(&mut grid, 3, Orientation::Vertical, 3, 5));
    assert!(!set_ship(&mut grid, 4, Orientation::Horizontal, 0, 8));
    assert_eq!(grid, before);
}

#[test]
fn test_forbidden_halo_surrounds_ship() {
    let mut grid = Grid::new(10, 10);
    assert!(set_ship(&mut grid, 2, Orientation::Horizontal, 3, 3));
    set_forbidden_squares(&mut grid);

    // 4x3 box around a 1x2 ship.
    assert_eq!(grid.count(CellState::Forbidden), 10);
    for r in 2..=4 {
        for c in 2..=5 {
            let expected = if r == 3 && (c == 3 || c == 4) {
                CellState::Ship
            } else {
                CellState::Forbidden
            };
            assert_eq!(grid.get(r, c), Ok(expected), "cell ({}, {})", r, c);
        }
    }
    assert!(!is_settable(&grid, 2, Orientation::Horizontal, 4, 5));

    remove_forbidden_squares(&mut grid);
    assert_eq!(grid.count(CellState::Forbidden), 0);
    assert_eq!(grid.count(CellState::Ship), 2);
}

#[test]
fn test_halo_clips_at_corner() {
    let mut grid = Grid::new(10, 10);
    assert!(set_ship(&mut grid, 2, Orientation::Vertical, 0, 0));
    set_forbidden_squares(&mut grid);
    assert_eq!(grid.count(CellState::Forbidden), 4);
    assert_eq!(grid.get(2, 0), Ok(CellState::Forbidden));
    assert_eq!(grid.get(2, 1), Ok(CellState::Forbidden));
}

#[test]
fn test_remove_ship_only_from_canonical_origin() {
    let mut grid = Grid::new(10, 10);
    assert!(set_ship(&mut grid, 3, Orientation::Horizontal, 2, 2));

    assert!(!remove_ship(&mut grid, 2, 3));
    assert!(!remove_ship(&mut grid, 2, 4));
    assert_eq!(grid.count(CellState::Ship), 3);

    assert!(remove_ship(&mut grid, 2, 2));
    assert_eq!(grid.count(CellState::Ship), 0);
}

#[test]
fn test_remove_vertical_ship_leaves_neighbours() {
    let mut grid = Grid::new(10, 10);
    assert!(set_ship(&mut grid, 3, Orientation::Vertical, 4, 7));
    assert!(set_ship(&mut grid, 2, Orientation::Horizontal, 0, 0));

    assert!(!remove_ship(&mut grid, 6, 7));
    assert!(remove_ship(&mut grid, 4, 7));
    assert_eq!(grid.count(CellState::Ship), 2);
    assert_eq!(grid.get(0, 1), Ok(CellState::Ship));
}

#[test]
fn test_remove_ship_rejects_non_ship_cells() {
    let mut grid = Grid::new(10, 10);
    assert!(!remove_ship(&mut grid, 0, 0));
    assert!(!remove_ship(&mut grid, 10, 10));
}

#[test]
fn test_canonical_origin_walks_up_and_left() {
    let mut grid = Grid::new(10, 10);
    assert!(set_ship(&mut grid, 4, Orientation::Vertical, 3, 2));
    assert!(set_ship(&mut grid, 3, Orientation::Horizontal, 8, 5));
    assert_eq!(canonical_origin(&grid, 6, 2), (3, 2));
    assert_eq!(canonical_origin(&grid, 3, 2), (3, 2));
    assert_eq!(canonical_origin(&grid, 8, 7), (8, 5));
}
