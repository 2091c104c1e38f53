use std::io::{self, Write};

use rand::rngs::SmallRng;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::core::{GameEngine, PlacementOutcome, SessionState, ShotOutcome};
use crate::shell::Shell;

/// Terminal front end reading `row col` pairs from stdin.
pub struct CliShell {
    lines: Lines<BufReader<Stdin>>,
}

impl Default for CliShell {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `"row col"` (zero-based, whitespace or comma separated).
pub fn parse_coord(input: &str, rows: usize, cols: usize) -> Result<(usize, usize), String> {
    let mut parts = input
        .split(|ch: char| ch.is_whitespace() || ch == ',')
        .filter(|p| !p.is_empty());
    let (Some(row_str), Some(col_str), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err("Enter a row and a column, e.g. `3 4`".to_string());
    };
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number", row_str))?;
    let col: usize = col_str
        .parse()
        .map_err(|_| format!("Invalid column '{}' - must be a number", col_str))?;
    if row >= rows {
        return Err(format!("Row {} out of bounds - must be 0-{}", row, rows - 1));
    }
    if col >= cols {
        return Err(format!("Column {} out of bounds - must be 0-{}", col, cols - 1));
    }
    Ok((row, col))
}

fn prompt(text: &str) {
    print!("{}", text);
    let _ = io::stdout().flush();
}

fn print_player_view(engine: &GameEngine) {
    println!("Opponent grid:");
    print!("{}", engine.enemy_view());
    println!("\nYour grid:");
    print!("{}", engine.own_grid());
    println!(
        "Ships lost: {}/{}   Enemy ships sunk: {}/{}",
        engine.ships_lost(),
        engine.fleet().len(),
        engine.enemy_ships_sunk(),
        engine.fleet().len()
    );
}

impl CliShell {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Next trimmed input line; `None` on end of input.
    async fn read_line(&mut self) -> Option<String> {
        match self.lines.next_line().await {
            Ok(Some(line)) => Some(line.trim().to_string()),
            Ok(None) => None,
            Err(e) => {
                log::warn!("stdin read failed: {}", e);
                None
            }
        }
    }

    /// Interactive ship placement. Returns once every ship is on the grid.
    pub async fn place_fleet(
        &mut self,
        engine: &mut GameEngine,
        rng: &mut SmallRng,
    ) -> anyhow::Result<()> {
        println!("\nSHIP PLACEMENT");
        println!("  Enter `row col` to pick a start cell, then the cell of one of the arrows.");
        println!("  Enter the coordinates of a placed ship to remove it.");
        println!("  `auto` places the remaining ships at random.\n");

        while !engine.is_ready() {
            print!("{}", engine.own_grid());
            let next = engine
                .fleet()
                .next_unplaced()
                .map(|idx| engine.fleet().ships()[idx]);
            if let Some(ship) = next {
                println!(
                    "Ship {}/{}: {} (length {})",
                    engine.fleet().placed_count() + 1,
                    engine.fleet().len(),
                    ship.class().name(),
                    ship.length()
                );
            }
            prompt("> ");
            let Some(line) = self.read_line().await else {
                anyhow::bail!("input closed during ship placement");
            };
            if line.eq_ignore_ascii_case("auto") {
                engine.place_fleet_randomly(rng).map_err(|e| anyhow::anyhow!(e))?;
                continue;
            }
            let rows = engine.config().rows;
            let cols = engine.config().cols;
            let (row, col) = match parse_coord(&line, rows, cols) {
                Ok(coord) => coord,
                Err(msg) => {
                    println!("{}", msg);
                    continue;
                }
            };
            match engine.setup_click(row, col).map_err(|e| anyhow::anyhow!(e))? {
                PlacementOutcome::ShipPlaced { origin, length } => {
                    println!("Placed a ship of length {} at {:?}", length, origin)
                }
                PlacementOutcome::PlacementStarted { directions, .. } => {
                    println!("Pick a direction: {:?}", directions)
                }
                PlacementOutcome::ShipRemoved { origin } => {
                    println!("Removed the ship at {:?}", origin)
                }
                PlacementOutcome::Failed => println!("Nothing to do there"),
            }
        }
        print!("{}", engine.own_grid());
        println!("All ships placed.");
        Ok(())
    }
}

#[async_trait::async_trait]
impl Shell for CliShell {
    async fn choose_target(&mut self, engine: &GameEngine) -> Option<(usize, usize)> {
        println!("\nYOUR TURN");
        print_player_view(engine);
        loop {
            prompt("Fire at `row col` (or `quit`): ");
            let line = self.read_line().await?;
            if line.eq_ignore_ascii_case("quit") {
                return None;
            }
            match parse_coord(&line, engine.config().rows, engine.config().cols) {
                Ok(coord) => return Some(coord),
                Err(msg) => println!("{}", msg),
            }
        }
    }

    fn shot_resolved(&mut self, coord: (usize, usize), outcome: ShotOutcome) {
        match outcome {
            ShotOutcome::Hit => println!("{:?}: Hit! Fire again.", coord),
            ShotOutcome::Sunk => println!("{:?}: Sunk! Fire again.", coord),
            ShotOutcome::Miss => println!("{:?}: Miss. Waiting for the opponent...", coord),
            ShotOutcome::Forbidden => {
                println!("{:?}: already shot there, pick another cell.", coord)
            }
        }
    }

    fn incoming_shot(&mut self, coord: (usize, usize), outcome: ShotOutcome) {
        println!("Opponent fired at {:?}: {:?}", coord, outcome);
    }

    fn game_over(&mut self, state: SessionState) {
        match state {
            SessionState::PlayerWon => println!("\nYou win! All enemy ships have been sunk."),
            SessionState::OpponentWon => println!("\nYou lose!"),
            _ => println!("\nGame ended."),
        }
    }
}
