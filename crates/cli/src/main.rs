use anyhow::{bail, Context, Result};
use shorebreak_autoplay::{MatchRecord, RunStatus, Simulator, SimulatorConfig, Tier};
use shorebreak_core::{Event, GameConfig};
use std::fs;
use std::path::PathBuf;

#[derive(Debug)]
struct CliOptions {
    seed: u64,
    games: u32,
    tiers: Vec<Tier>,
    config_path: Option<PathBuf>,
    json: bool,
    verbose: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            seed: 0x5EA,
            games: 1,
            tiers: vec![Tier::Expert, Tier::Standard],
            config_path: None,
            json: false,
            verbose: false,
        }
    }
}

fn parse_args() -> Result<CliOptions> {
    let mut options = CliOptions::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().context("--seed needs a value")?;
                options.seed = value.parse().context("--seed must be an integer")?;
            }
            "--games" => {
                let value = args.next().context("--games needs a value")?;
                options.games = value.parse().context("--games must be an integer")?;
            }
            "--tiers" => {
                let value = args.next().context("--tiers needs a value")?;
                options.tiers = value
                    .split(',')
                    .map(|name| {
                        Tier::from_name(name.trim())
                            .with_context(|| format!("unknown tier {name:?}"))
                    })
                    .collect::<Result<Vec<_>>>()?;
            }
            "--config" => {
                let value = args.next().context("--config needs a path")?;
                options.config_path = Some(PathBuf::from(value));
            }
            "--json" => options.json = true,
            "--verbose" => options.verbose = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => bail!("unknown argument {other:?} (try --help)"),
        }
    }
    if !(2..=4).contains(&options.tiers.len()) {
        bail!("--tiers needs between two and four seats");
    }
    Ok(options)
}

fn print_usage() {
    println!(
        "usage: shorebreak [--seed N] [--games N] [--tiers a,b[,c[,d]]] \
         [--config rules.json] [--json] [--verbose]\n\
         tiers: casual | standard | expert"
    );
}

fn load_game_config(options: &CliOptions) -> Result<GameConfig> {
    match &options.config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
        }
        None => Ok(GameConfig::default()),
    }
}

fn describe(record: &MatchRecord) -> String {
    let totals = record
        .totals
        .iter()
        .map(|(player, total)| format!("{player}={total}"))
        .collect::<Vec<_>>()
        .join(" ");
    let winner = record.winner.as_deref().unwrap_or("-");
    format!(
        "seed {} rounds {} steps {} winner {winner} totals [{totals}]",
        record.seed,
        record.rounds.len(),
        record.steps
    )
}

fn main() -> Result<()> {
    let options = parse_args()?;
    let game_config = load_game_config(&options)?;

    let seats: Vec<(String, Tier)> = options
        .tiers
        .iter()
        .enumerate()
        .map(|(at, tier)| (format!("{}-{}", tier.name(), at + 1), *tier))
        .collect();

    let mut records = Vec::with_capacity(options.games as usize);
    for game_at in 0..options.games {
        let sim_config = SimulatorConfig {
            seed: options.seed.wrapping_add(game_at as u64),
            ..SimulatorConfig::default()
        };
        let mut sim = Simulator::with_tiers(game_config.clone(), &seats, sim_config)?;
        let record = sim.run()?;
        if options.verbose {
            for event in sim.events.drain() {
                println!("{}", render_event(&event));
            }
        }
        if record.status == RunStatus::StepCapReached {
            eprintln!("warning: game {} hit the step cap", game_at + 1);
        }
        println!("{}", describe(&record));
        records.push(record);
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    }
    Ok(())
}

fn render_event(event: &Event) -> String {
    match event {
        Event::RoundStarted { round, starting_player, deck_size } => {
            format!("round {round} starts with {starting_player} (deck {deck_size})")
        }
        Event::CardsDrawn { player, count } => format!("{player} draws {count} to choose from"),
        Event::CardKept { player, kept, side, .. } => {
            format!("{player} keeps {kept:?}, discards {side:?}")
        }
        Event::DiscardTaken { player, side, kind } => {
            format!("{player} takes {kind:?} from the {side:?} pile")
        }
        Event::DeckReshuffled { recovered } => format!("deck reshuffled (+{recovered})"),
        Event::PairPlayed { player, kinds, effect } => {
            format!("{player} pairs {:?}+{:?} ({effect:?})", kinds[0], kinds[1])
        }
        Event::BlindDraw { player, drew } => format!("{player} blind-draws {drew:?}"),
        Event::DiscardPicked { player, side, kind } => {
            format!("{player} picks {kind:?} from the {side:?} pile")
        }
        Event::ExtraTurnArmed { player } => format!("{player} lines up an extra turn"),
        Event::CardStolen { player, from, .. } => format!("{player} steals from {from}"),
        Event::ExtraTurnStarted { player } => format!("{player} goes again"),
        Event::TurnEnded { player, next, .. } => format!("{player} ends; {next} is up"),
        Event::Declared { player, mode, score } => {
            format!("{player} declares {mode:?} showing {score}")
        }
        Event::DeclareConfirmed { player, mode } => format!("{player} confirms {mode:?}"),
        Event::RoundEnded { round, winner } => {
            format!("round {round} goes to {}", winner.as_deref().unwrap_or("-"))
        }
        Event::MatchEnded { winner, reason } => {
            format!("match over: {} ({reason:?})", winner.as_deref().unwrap_or("-"))
        }
    }
}
