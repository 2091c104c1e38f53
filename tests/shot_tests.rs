use netbattle::{
    record_on_view, resolve_shot, set_ship, sunk_extent, CellState, GameError, Grid, Orientation,
    ShotOutcome,
};

#[test]
fn test_patrol_boat_scenario() {
    let mut grid = Grid::new(10, 10);
    assert!(set_ship(&mut grid, 2, Orientation::Horizontal, 3, 3));

    assert_eq!(resolve_shot(&mut grid, 3, 3), ShotOutcome::Hit);
    assert_eq!(grid.get(3, 3), Ok(CellState::Hit));
    assert_eq!(resolve_shot(&mut grid, 3, 4), ShotOutcome::Sunk);
    assert_eq!(grid.get(3, 3), Ok(CellState::Sunk));
    assert_eq!(grid.get(3, 4), Ok(CellState::Sunk));
    assert_eq!(resolve_shot(&mut grid, 3, 3), ShotOutcome::Forbidden);
    assert_eq!(grid.get(3, 3), Ok(CellState::Sunk));
}

#[test]
fn test_miss_marks_water() {
    let mut grid = Grid::new(10, 10);
    assert_eq!(resolve_shot(&mut grid, 0, 0), ShotOutcome::Miss);
    assert_eq!(grid.get(0, 0), Ok(CellState::Miss));
    assert_eq!(resolve_shot(&mut grid, 0, 0), ShotOutcome::Forbidden);
}

#[test]
fn test_out_of_bounds_is_forbidden() {
    let mut grid = Grid::new(10, 10);
    let before = grid.clone();
    assert_eq!(resolve_shot(&mut grid, 10, 3), ShotOutcome::Forbidden);
    assert_eq!(resolve_shot(&mut grid, 200, 200), ShotOutcome::Forbidden);
    assert_eq!(grid, before);
}

#[test]
fn test_hits_on_other_ship_do_not_join() {
    // Two ships in the same column separated by water.
    let mut grid = Grid::new(10, 10);
    assert!(set_ship(&mut grid, 2, Orientation::Vertical, 0, 0));
    assert!(set_ship(&mut grid, 2, Orientation::Vertical, 3, 0));

    assert_eq!(resolve_shot(&mut grid, 3, 0), ShotOutcome::Hit);
    assert_eq!(resolve_shot(&mut grid, 0, 0), ShotOutcome::Hit);
    assert_eq!(resolve_shot(&mut grid, 1, 0), ShotOutcome::Sunk);
    assert_eq!(grid.get(3, 0), Ok(CellState::Hit));
    assert_eq!(grid.get(4, 0), Ok(CellState::Ship));
    assert_eq!(grid.count(CellState::Sunk), 2);
}

#[test]
fn test_sunk_extent_on_edge() {
    let mut grid = Grid::new(5, 5);
    for c in 2..5 {
        grid.set(4, c, CellState::Hit).unwrap();
    }
    let mut extent = sunk_extent(&grid, 4, 3).unwrap();
    extent.sort();
    assert_eq!(extent, vec![(4, 2), (4, 3), (4, 4)]);

    grid.set(4, 2, CellState::Ship).unwrap();
    assert_eq!(sunk_extent(&grid, 4, 3), None);
}

#[test]
fn test_view_records_replies() {
    let mut view = Grid::new(10, 10);
    record_on_view(&mut view, 1, 1, ShotOutcome::Miss).unwrap();
    record_on_view(&mut view, 5, 5, ShotOutcome::Hit).unwrap();
    record_on_view(&mut view, 6, 5, ShotOutcome::Hit).unwrap();
    record_on_view(&mut view, 7, 5, ShotOutcome::Sunk).unwrap();

    assert_eq!(view.get(1, 1), Ok(CellState::Miss));
    for r in 5..=7 {
        assert_eq!(view.get(r, 5), Ok(CellState::Sunk));
    }
    assert_eq!(view.count(CellState::Ship), 0);
}

#[test]
fn test_view_rejects_reshoot() {
    let mut view = Grid::new(10, 10);
    record_on_view(&mut view, 2, 2, ShotOutcome::Miss).unwrap();
    assert_eq!(
        record_on_view(&mut view, 2, 2, ShotOutcome::Hit),
        Err(GameError::IllegalReshoot { row: 2, col: 2 })
    );
    // A Forbidden reply changes nothing.
    record_on_view(&mut view, 2, 2, ShotOutcome::Forbidden).unwrap();
    assert_eq!(view.get(2, 2), Ok(CellState::Miss));
}
