use std::io::Write;

use netbattle::shell::cli::parse_coord;
use netbattle::{
    FleetConfig, GameConfig, GameError, Handshake, MAX_FLEET_SIZE, MAX_HANDSHAKE_SIZE,
    SHIP_CLASSES,
};

fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
    let file_name = format!("netbattle-{}-{}.json", name, std::process::id());
    let path = std::env::temp_dir().join(file_name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn test_ship_class_lengths() {
    let lengths: Vec<usize> = SHIP_CLASSES.iter().map(|c| c.length()).collect();
    assert_eq!(lengths, vec![2, 3, 4, 5]);
}

#[test]
fn test_json_config_with_defaults() {
    let path = write_temp("partial", r#"{ "rows": 8, "fleet": { "carriers": 1 } }"#);
    let config = GameConfig::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.rows, 8);
    assert_eq!(config.cols, 10);
    assert_eq!(config.fleet.patrol_boats, 1);
    assert_eq!(config.fleet.cruisers, 1);
    assert_eq!(config.fleet.carriers, 1);
    assert_eq!(config.fleet.total(), Some(3));
}

#[test]
fn test_json_config_is_validated() {
    let path = write_temp("oversized", r#"{ "rows": 300, "cols": 10 }"#);
    let res = GameConfig::from_json_file(&path);
    std::fs::remove_file(&path).ok();
    assert!(res.is_err());

    assert!(GameConfig::from_json_file("/nonexistent/netbattle.json").is_err());
}

fn with_fleet(rows: usize, cols: usize, fleet: FleetConfig) -> GameConfig {
    GameConfig { rows, cols, fleet }
}

fn patrol_boats(count: usize) -> FleetConfig {
    FleetConfig {
        patrol_boats: count,
        cruisers: 0,
        submarines: 0,
        carriers: 0,
    }
}

#[test]
fn test_ship_count_overflow_is_rejected() {
    let fleet = FleetConfig {
        patrol_boats: usize::MAX,
        cruisers: 1,
        submarines: 0,
        carriers: 0,
    };
    assert_eq!(fleet.total(), None);
    assert_eq!(
        with_fleet(10, 10, fleet).validate(),
        Err(GameError::InvalidConfig("too many ships"))
    );
}

#[test]
fn test_fleet_larger_than_grid_is_rejected() {
    // 60 patrol boats need 120 cells; a 10x10 grid has 100.
    assert_eq!(
        with_fleet(10, 10, patrol_boats(60)).validate(),
        Err(GameError::InvalidConfig("fleet does not fit on the grid"))
    );
    assert_eq!(with_fleet(10, 10, patrol_boats(50)).validate(), Ok(()));

    // Cell count overflows before the grid comparison.
    let fleet = FleetConfig {
        patrol_boats: 0,
        cruisers: 0,
        submarines: 0,
        carriers: usize::MAX / 4,
    };
    assert_eq!(fleet.cells(), None);
    assert!(with_fleet(255, 255, fleet).validate().is_err());
}

#[test]
fn test_fleet_must_fit_in_handshake() {
    let largest = with_fleet(255, 255, patrol_boats(MAX_FLEET_SIZE));
    assert_eq!(largest.validate(), Ok(()));
    let encoded = bincode::serialize(&Handshake::from_config(&largest)).unwrap();
    assert!(encoded.len() <= MAX_HANDSHAKE_SIZE as usize);

    assert_eq!(
        with_fleet(255, 255, patrol_boats(MAX_FLEET_SIZE + 1)).validate(),
        Err(GameError::InvalidConfig("fleet is too large to announce"))
    );
    // Rejected without building anything per ship.
    assert!(with_fleet(255, 255, patrol_boats(1_000_000_000)).validate().is_err());
}

#[test]
fn test_parse_coord() {
    assert_eq!(parse_coord("3 4", 10, 10), Ok((3, 4)));
    assert_eq!(parse_coord(" 0,9 ", 10, 10), Ok((0, 9)));
    assert!(parse_coord("10 0", 10, 10).is_err());
    assert!(parse_coord("a 1", 10, 10).is_err());
    assert!(parse_coord("1", 10, 10).is_err());
    assert!(parse_coord("1 2 3", 10, 10).is_err());
}
