#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::path::PathBuf;

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use netbattle::{init_logging, CliShell, GameConfig, GameEngine, Role, Session, TcpTransport};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    /// JSON file with grid size and fleet composition (both players must agree).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Fix the RNG seed for reproducible placement (e.g., --seed 12345).
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Place the whole fleet at random instead of asking.
    #[arg(long, global = true)]
    auto_place: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Listen for one opponent and take the first shot.
    Host {
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Connect to a hosting opponent.
    Join {
        #[arg(long, default_value = "127.0.0.1")]
        connect: String,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    let mut engine = GameEngine::new(config).map_err(|e| anyhow::anyhow!(e))?;

    let mut rng = if let Some(s) = cli.seed {
        println!("Using fixed seed: {} (placement will be reproducible)", s);
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    };

    let mut shell = CliShell::new();
    if cli.auto_place {
        engine
            .place_fleet_randomly(&mut rng)
            .map_err(|e| anyhow::anyhow!(e))?;
        println!("Fleet placed at random:");
        print!("{}", engine.own_grid());
    } else {
        shell.place_fleet(&mut engine, &mut rng).await?;
    }

    let (transport, role) = match cli.command {
        Commands::Host { bind, port } => {
            let addr = format!("{}:{}", bind, port);
            println!("Waiting for an opponent on {}...", addr);
            let (transport, peer) = TcpTransport::listen_once(&addr).await?;
            println!("Opponent connected from {}", peer);
            (transport, Role::Host)
        }
        Commands::Join { connect, port } => {
            let addr = format!("{}:{}", connect, port);
            println!("Connecting to {}...", addr);
            let transport = TcpTransport::connect(&addr).await?;
            println!("Connected successfully!");
            (transport, Role::Guest)
        }
    };

    let mut session = Session::new(Box::new(shell), engine);
    if let Err(e) = session.run(Box::new(transport), role).await {
        eprintln!("Game ended with an error: {}", e);
    }
    println!("\nFinal boards:");
    println!("Opponent grid:");
    print!("{}", session.engine().enemy_view());
    println!("\nYour grid:");
    print!("{}", session.engine().own_grid());
    Ok(())
}
