//! Ship descriptors and the ordered fleet a player has to place.

use alloc::vec::Vec;

use super::config::{FleetConfig, ShipClass, SHIP_CLASSES};

/// Orientation of a ship on the board. Ships always extend from their origin
/// towards increasing row (vertical) or column (horizontal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One ship of the fleet and, once placed, its canonical origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    class: ShipClass,
    origin: Option<(usize, usize)>,
}

impl Ship {
    pub fn new(class: ShipClass) -> Self {
        Self {
            class,
            origin: None,
        }
    }

    pub fn class(&self) -> ShipClass {
        self.class
    }

    pub fn length(&self) -> usize {
        self.class.length()
    }

    /// Top-left-most occupied cell, `None` until placed.
    pub fn origin(&self) -> Option<(usize, usize)> {
        self.origin
    }

    pub fn is_placed(&self) -> bool {
        self.origin.is_some()
    }
}

/// Insertion-ordered fleet built from per-class counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    ships: Vec<Ship>,
}

impl Fleet {
    /// Patrol boats first, then cruisers, submarines and carriers.
    pub fn from_config(config: &FleetConfig) -> Self {
        let ships = SHIP_CLASSES
            .iter()
            .zip(config.counts())
            .flat_map(|(class, count)| core::iter::repeat(Ship::new(*class)).take(count))
            .collect();
        Self { ships }
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Ordered ship lengths; what peers compare before play.
    pub fn lengths(&self) -> Vec<usize> {
        self.ships.iter().map(Ship::length).collect()
    }

    /// Index of the first ship still waiting for a position.
    pub fn next_unplaced(&self) -> Option<usize> {
        self.ships.iter().position(|s| !s.is_placed())
    }

    pub fn placed_count(&self) -> usize {
        self.ships.iter().filter(|s| s.is_placed()).count()
    }

    pub fn all_placed(&self) -> bool {
        self.ships.iter().all(Ship::is_placed)
    }

    /// Record `origin` on the first unplaced ship. Returns its index.
    pub fn mark_placed(&mut self, origin: (usize, usize)) -> Option<usize> {
        let idx = self.next_unplaced()?;
        self.ships[idx].origin = Some(origin);
        Some(idx)
    }

    /// Forget the position of the ship whose origin is `origin`.
    pub fn mark_removed(&mut self, origin: (usize, usize)) -> Option<usize> {
        let idx = self.ships.iter().position(|s| s.origin == Some(origin))?;
        self.ships[idx].origin = None;
        Some(idx)
    }
}
