//! Penalty shootout CLI
//!
//! Plays headless matches with the scripted kicker and prints results,
//! presets and the player catalog.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use pk_core::roster::{catalog, Lineup};
#[cfg(feature = "cli")]
use pk_core::{simulate_shootout, MatchResult, ShootoutConfig, ShootoutRequest, Shooter};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "pk_cli")]
#[command(about = "Run headless penalty shootouts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Play one or more matches
    Simulate {
        /// RNG seed of the first match
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Config preset (standard, arcade, deterministic)
        #[arg(long, default_value = "standard")]
        profile: String,

        /// Number of matches; seeds increase by one per match
        #[arg(long, default_value = "1")]
        games: u32,

        /// Catalog ids of the takers, in round order
        #[arg(long, value_delimiter = ',')]
        takers: Option<Vec<u32>>,

        /// Print the response JSON instead of a summary
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print a config preset as JSON
    Config {
        #[arg(long, default_value = "standard")]
        profile: String,
    },

    /// List the player catalog
    Roster,
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { seed, profile, games, takers, json } => {
            let lineup = takers.map(|ids| Lineup::from_ids(&ids).takers);
            let mut tally = [0u32; 3];

            for offset in 0..games.max(1) {
                let mut request = ShootoutRequest::new(seed.wrapping_add(u64::from(offset)));
                request.profile = Some(profile.clone());
                request.lineup = lineup.clone();

                let response = simulate_shootout(&request)?;
                tally[match response.result {
                    MatchResult::Win => 0,
                    MatchResult::Draw => 1,
                    MatchResult::Lose => 2,
                }] += 1;

                if json {
                    println!("{}", serde_json::to_string_pretty(&response)?);
                    continue;
                }

                println!(
                    "seed {}: {} {} - {} (+{} gold)",
                    response.seed,
                    response.result_text,
                    response.player_score,
                    response.opponent_score,
                    response.reward
                );
                for shot in &response.shots {
                    let who = match shot.shooter {
                        Shooter::Player => response
                            .takers
                            .get(shot.round.saturating_sub(1) as usize)
                            .map(String::as_str)
                            .unwrap_or("Player"),
                        Shooter::Opponent => "Opponent",
                    };
                    println!("   R{} {:<18} {}", shot.round, who, shot.outcome.message());
                }
            }

            if games > 1 {
                tracing::info!(
                    "{} matches: {} won, {} drawn, {} lost",
                    games,
                    tally[0],
                    tally[1],
                    tally[2]
                );
            }
        }

        Commands::Config { profile } => {
            let cfg = ShootoutConfig::from_profile(&profile)?;
            println!("{}", cfg.to_json_string()?);
        }

        Commands::Roster => {
            for card in catalog() {
                println!(
                    "{:>3}  {:<22} {:>2}  {:<4} {}",
                    card.id,
                    card.name,
                    card.rating,
                    format!("{:?}", card.position),
                    card.nation
                );
            }
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("pk_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
