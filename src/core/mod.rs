//! Core battleship game engine (no_std compatible)
//!
//! Grid model, placement validation, shot resolution and the per-player game
//! state. Only `alloc`, `rand` and `log` are needed, so the engine builds
//! without the networking stack.

pub mod common;
pub mod config;
pub mod game;
pub mod grid;
pub mod placement;
pub mod ship;
pub mod shot;

// Re-export commonly used types
pub use common::{CellState, Direction, GameError, PlacementOutcome, ShotOutcome};
pub use config::*;
pub use game::{GameEngine, SessionState};
pub use grid::Grid;
pub use placement::{
    canonical_origin, is_settable, place_fleet_randomly, remove_forbidden_squares, remove_ship,
    set_forbidden_squares, set_ship, ShipPlacer,
};
pub use ship::{Fleet, Orientation, Ship};
pub use shot::{record_on_view, resolve_shot, sunk_extent};
