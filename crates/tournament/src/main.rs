//! Tournament CLI
//!
//! Replay a bracket event from its definition and result files.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use tournament::{
    fill_roster, heat_sheet, seed_key_listing, standings_report, write_roster, Event,
    RaceResults, RosterFile,
};

#[derive(Parser)]
#[command(name = "tournament")]
#[command(about = "Heat-based bracket event runner")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct EventArgs {
    /// Event definition (TOML)
    #[arg(short, long)]
    config: PathBuf,
}

#[derive(Args)]
struct ResultArgs {
    #[command(flatten)]
    event: EventArgs,

    /// Time trial export (CSV)
    #[arg(short, long)]
    time_trial: PathBuf,

    /// Heat results per round, in race order (repeat for each round)
    #[arg(short, long)]
    results: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every heat with its slot labels
    Keys {
        #[command(flatten)]
        event: EventArgs,
    },

    /// Print the heat sheet for a round
    Heats {
        #[command(flatten)]
        results: ResultArgs,

        /// Round to print (defaults to the next round to race)
        #[arg(long)]
        round: Option<u8>,
    },

    /// Fill the scheduling tool's roster with each racer's next heat
    Roster {
        #[command(flatten)]
        results: ResultArgs,

        /// Roster exported from the scheduling tool (CSV)
        #[arg(long)]
        roster: PathBuf,

        /// Where to write the filled roster (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Round the roster is for (defaults to the next round to race)
        #[arg(long)]
        round: Option<u8>,
    },

    /// Score the final round
    Standings {
        #[command(flatten)]
        results: ResultArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Dump the full bracket table as JSON
    Bracket {
        #[command(flatten)]
        results: ResultArgs,
    },
}

fn load(args: &ResultArgs) -> Result<(Event, RaceResults)> {
    let event = Event::load(&args.event.config)
        .with_context(|| format!("loading event {}", args.event.config.display()))?;
    let results = RaceResults::load(&event.config, &args.time_trial, &args.results)
        .context("loading results")?;
    Ok((event, results))
}

/// Round whose heats are populated but not yet raced
fn next_round(event: &Event, results: &RaceResults) -> u8 {
    let raced = u8::try_from(results.rounds.len()).unwrap_or(u8::MAX);
    raced.saturating_add(1).min(event.final_round())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Keys { event } => {
            let event = Event::load(&event.config)
                .with_context(|| format!("loading event {}", event.config.display()))?;
            write!(stdout, "{}", seed_key_listing(&event.keys))?;
        }
        Commands::Heats { results, round } => {
            let (event, results) = load(&results)?;
            let (table, _) = event.replay(&results)?;
            let round = round.unwrap_or_else(|| next_round(&event, &results));
            write!(stdout, "{}", heat_sheet(&event.config.name, &table, round))?;
        }
        Commands::Roster {
            results,
            roster,
            output,
            round,
        } => {
            let (event, results) = load(&results)?;
            let (table, _) = event.replay(&results)?;
            let round = round.unwrap_or_else(|| next_round(&event, &results));

            let input = RosterFile::load(&roster)
                .with_context(|| format!("reading roster {}", roster.display()))?;
            let filled = fill_roster(&input, &table, round, &event.config.roster)?;
            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("creating {}", path.display()))?;
                    write_roster(&filled, file)?;
                    tracing::info!(path = %path.display(), rows = filled.records.len(), "wrote roster");
                }
                None => write_roster(&filled, &mut stdout)?,
            }
        }
        Commands::Standings { results, json } => {
            let (event, results) = load(&results)?;
            // Replaying first surfaces any earlier-round problem before scoring.
            event.replay(&results)?;
            let standings = event.standings(&results)?;
            if json {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&standings)?)?;
            } else {
                write!(stdout, "{}", standings_report(&event.config.name, &standings))?;
            }
        }
        Commands::Bracket { results } => {
            let (event, results) = load(&results)?;
            let (table, summaries) = event.replay(&results)?;
            for summary in &summaries {
                tracing::info!(
                    round = summary.round,
                    filled = summary.filled,
                    cleared = summary.cleared,
                    ignored = summary.ignored,
                    "replayed round"
                );
            }
            writeln!(stdout, "{}", serde_json::to_string_pretty(&table)?)?;
        }
    }

    Ok(())
}
