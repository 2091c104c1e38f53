use super::common::GameError;
use crate::protocol::{HANDSHAKE_HEADER_LEN, MAX_HANDSHAKE_SIZE};

/// Largest row or column count the wire format can address.
pub const MAX_DIMENSION: usize = u8::MAX as usize;

/// Default board edge length.
pub const BOARD_SIZE: usize = 10;

/// Most ships a fleet may have: the handshake carries one byte per ship and
/// must stay within `MAX_HANDSHAKE_SIZE`.
pub const MAX_FLEET_SIZE: usize = MAX_HANDSHAKE_SIZE as usize - HANDSHAKE_HEADER_LEN;

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipClass {
    name: &'static str,
    length: usize,
}

impl ShipClass {
    /// Create a new ship class.
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    /// Class name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of cells a ship of this class occupies.
    pub fn length(&self) -> usize {
        self.length
    }
}

pub const PATROL_BOAT: ShipClass = ShipClass::new("Patrol boat", 2);
pub const CRUISER: ShipClass = ShipClass::new("Cruiser", 3);
pub const SUBMARINE: ShipClass = ShipClass::new("Submarine", 4);
pub const CARRIER: ShipClass = ShipClass::new("Carrier", 5);

/// Ship classes in fleet order.
pub const SHIP_CLASSES: [ShipClass; 4] = [PATROL_BOAT, CRUISER, SUBMARINE, CARRIER];

/// How many ships of each class make up a fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct FleetConfig {
    pub patrol_boats: usize,
    pub cruisers: usize,
    pub submarines: usize,
    pub carriers: usize,
}

impl FleetConfig {
    /// Per-class counts, aligned with [`SHIP_CLASSES`].
    pub fn counts(&self) -> [usize; 4] {
        [self.patrol_boats, self.cruisers, self.submarines, self.carriers]
    }

    /// Total number of ships, `None` on overflow.
    pub fn total(&self) -> Option<usize> {
        self.counts().iter().try_fold(0usize, |acc, &n| acc.checked_add(n))
    }

    /// Grid cells the whole fleet occupies, `None` on overflow.
    pub fn cells(&self) -> Option<usize> {
        SHIP_CLASSES
            .iter()
            .zip(self.counts())
            .try_fold(0usize, |acc, (class, n)| acc.checked_add(class.length().checked_mul(n)?))
    }
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            patrol_boats: 1,
            cruisers: 1,
            submarines: 0,
            carriers: 0,
        }
    }
}

/// Grid dimensions and fleet composition. Both peers must agree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub fleet: FleetConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_SIZE,
            cols: BOARD_SIZE,
            fleet: FleetConfig::default(),
        }
    }
}

impl GameConfig {
    /// Check the configuration can be played and sent over the wire.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::InvalidConfig("grid dimensions must be positive"));
        }
        if self.rows > MAX_DIMENSION || self.cols > MAX_DIMENSION {
            return Err(GameError::InvalidConfig("grid dimensions must not exceed 255"));
        }
        let ships = self
            .fleet
            .total()
            .ok_or(GameError::InvalidConfig("too many ships"))?;
        if ships == 0 {
            return Err(GameError::InvalidConfig("fleet must contain at least one ship"));
        }
        if ships > MAX_FLEET_SIZE {
            return Err(GameError::InvalidConfig("fleet is too large to announce"));
        }
        match self.fleet.cells() {
            Some(cells) if cells <= self.rows * self.cols => {}
            _ => return Err(GameError::InvalidConfig("fleet does not fit on the grid")),
        }
        let longest = SHIP_CLASSES
            .iter()
            .zip(self.fleet.counts())
            .filter(|(_, count)| *count > 0)
            .map(|(class, _)| class.length())
            .max()
            .unwrap_or(0);
        if longest > self.rows.max(self.cols) {
            return Err(GameError::InvalidConfig("a ship is longer than the grid"));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    #[cfg(feature = "std")]
    pub fn from_json_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }
}
