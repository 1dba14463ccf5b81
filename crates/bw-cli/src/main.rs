//! Bulb wheel command line
//!
//! Usage:
//!   bulbwheel simulate          - Fair vs tweaked Monte Carlo comparison
//!   bulbwheel spin              - Spin the wheel with a player wallet
//!   bulbwheel weights           - Show and edit selection weights

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bw_core::{DEFAULT_STAKE, DEFAULT_WALLET, GameVariant, MIN_SIMULATION_RUNS};
use bw_sim::{ComparisonReport, ComparisonSpec, SimulationConfig, compare};
use bw_wheel::{
    GameRound, PrizeTable, ProbabilityModel, WeightScheme, WheelConfig, WheelSession,
};

#[derive(Parser)]
#[command(name = "bulbwheel", about = "Bulb wheel game and Monte Carlo simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Markdown,
    Json,
}

#[derive(clap::Args)]
struct WheelArgs {
    /// Number of bulbs (12-24); anything but 12 draws a random prize table
    #[arg(long, default_value_t = 12)]
    slots: usize,

    /// Seed for drawing a random prize table
    #[arg(long, default_value_t = 42)]
    prize_seed: u64,

    /// Wheel configuration file (JSON or YAML); overrides --slots
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the fair and tweaked wheels over many spins
    Simulate {
        #[command(flatten)]
        wheel: WheelArgs,

        /// Number of simulated rounds (minimum 10000)
        #[arg(short, long, default_value_t = MIN_SIMULATION_RUNS)]
        runs: usize,

        /// Random seed
        #[arg(short, long, default_value_t = 42)]
        seed: u64,

        /// Slot the tracked bet sits on
        #[arg(long, default_value_t = 0)]
        bet_slot: usize,

        /// Stake per round
        #[arg(long, default_value_t = DEFAULT_STAKE)]
        stake: u64,

        /// Initial house bank [default: from --config, else 10000]
        #[arg(long)]
        bank: Option<i64>,

        /// Report format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Spin the wheel with a player wallet
    Spin {
        #[command(flatten)]
        wheel: WheelArgs,

        /// Slot to bet on
        #[arg(long, default_value_t = 0)]
        slot: usize,

        /// Stake per spin
        #[arg(long, default_value_t = DEFAULT_STAKE)]
        stake: u64,

        /// Starting wallet
        #[arg(long, default_value_t = DEFAULT_WALLET)]
        wallet: u64,

        /// Play the tweaked wheel (a config file's own variant is kept otherwise)
        #[arg(short, long)]
        tweaked: bool,

        /// Number of spins
        #[arg(short = 'n', long, default_value_t = 1)]
        spins: u32,

        /// Random seed (omit for an unseeded wheel)
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Print uniform and tiered weights, optionally applying edits
    Weights {
        #[command(flatten)]
        wheel: WheelArgs,

        /// Edit the tiered weights: SLOT=WEIGHT, may be repeated
        #[arg(long = "set", value_name = "SLOT=WEIGHT")]
        edits: Vec<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            wheel,
            runs,
            seed,
            bet_slot,
            stake,
            bank,
            format,
        } => run_simulation(&wheel, runs, seed, bet_slot, stake, bank, format),
        Commands::Spin {
            wheel,
            slot,
            stake,
            wallet,
            tweaked,
            spins,
            seed,
        } => run_spins(&wheel, slot, stake, wallet, tweaked, spins, seed),
        Commands::Weights { wheel, edits } => show_weights(&wheel, &edits),
    }
}

/// Resolve the wheel from a config file or from the slot count
fn load_wheel(args: &WheelArgs) -> Result<WheelConfig> {
    if let Some(path) = &args.config {
        return read_config(path);
    }
    let prizes = if args.slots == PrizeTable::classic().len() {
        PrizeTable::classic()
    } else {
        let mut rng = ChaCha8Rng::seed_from_u64(args.prize_seed);
        PrizeTable::random(args.slots, &mut rng).context("Failed to draw prize table")?
    };
    Ok(WheelConfig::tweaked(&prizes, WeightScheme::TieredByPrize))
}

fn read_config(path: &Path) -> Result<WheelConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => WheelConfig::from_yaml(&text),
        Some("json") => WheelConfig::from_json(&text),
        other => bail!("Unsupported config extension: {:?}", other),
    }
    .with_context(|| format!("Invalid wheel config {}", path.display()))?;
    log::info!("Loaded wheel config from {}", path.display());
    Ok(config)
}

fn run_simulation(
    wheel: &WheelArgs,
    runs: usize,
    seed: u64,
    bet_slot: usize,
    stake: u64,
    bank: Option<i64>,
    format: OutputFormat,
) -> Result<()> {
    let config = load_wheel(wheel)?;
    let prizes = PrizeTable::new(config.prizes.clone()).context("Invalid prize table")?;
    let weights = match config.weights.clone() {
        WeightScheme::Uniform => {
            if wheel.config.is_some() {
                log::warn!("Config has uniform weights; comparing against tiered-by-prize instead");
            }
            WeightScheme::TieredByPrize
        }
        other => other,
    };
    let bank = resolve_bank(bank, &config, wheel.config.is_some());

    let simulation = SimulationConfig::default()
        .with_runs(runs)
        .with_seed(seed)
        .with_bet_slot(bet_slot)
        .with_stake(stake)
        .with_series(matches!(format, OutputFormat::Json));
    let spec = ComparisonSpec::new(prizes, simulation)
        .with_tweaked_weights(weights)
        .with_bank(bank);

    let comparison = compare(&spec).context("Simulation failed")?;
    let report = ComparisonReport::new("Bulb Wheel Simulation", comparison);

    let rendered = match format {
        OutputFormat::Text => report.to_text(),
        OutputFormat::Markdown => report.to_markdown(),
        OutputFormat::Json => report.to_json(),
    };
    println!("{rendered}");
    Ok(())
}

fn run_spins(
    wheel: &WheelArgs,
    slot: usize,
    stake: u64,
    wallet: u64,
    tweaked: bool,
    spins: u32,
    seed: Option<u64>,
) -> Result<()> {
    let mut config = load_wheel(wheel)?;
    spin_variant(&mut config, tweaked, wheel.config.is_some());
    let round: GameRound = config.build().context("Invalid wheel")?;

    let mut session = WheelSession::new(round).with_wallet(wallet);
    session.set_stake(stake).context("Invalid stake")?;

    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_os_rng(),
    };

    println!(
        "{} | prizes {:?}",
        session.round().variant(),
        session.round().prizes().as_slice()
    );
    for i in 1..=spins {
        let outcome = match session.spin(slot, &mut rng) {
            Ok(outcome) => outcome,
            Err(e) => {
                println!("Spin {i}: {e}");
                break;
            }
        };
        let result = match outcome.prize {
            Some(prize) if outcome.jackpot => format!("JACKPOT ${prize}"),
            Some(prize) => format!("won ${prize}"),
            None => "no win".to_string(),
        };
        println!(
            "Spin {i}: wheel stopped on {} ({result}) | wallet ${} | house ${}",
            outcome.selected_slot, outcome.wallet, outcome.bank
        );
    }
    Ok(())
}

/// An explicit `--bank` wins over the config file
fn resolve_bank(flag: Option<i64>, config: &WheelConfig, from_file: bool) -> i64 {
    match flag {
        Some(bank) => {
            if from_file && bank != config.initial_bank {
                log::warn!("--bank {bank} overrides the config's initial bank {}", config.initial_bank);
            }
            bank
        }
        None => config.initial_bank,
    }
}

/// Settle which wheel `spin` plays: `--tweaked` forces the tweaked wheel,
/// otherwise a config file keeps its own variant and the default is fair
fn spin_variant(config: &mut WheelConfig, tweaked: bool, from_file: bool) {
    if !config.bets.is_empty() {
        log::warn!("Ignoring {} configured bets; spins place their own", config.bets.len());
        config.bets.clear();
    }
    if tweaked {
        if from_file && config.variant == GameVariant::Fair {
            log::warn!("--tweaked overrides the config's fair wheel");
        }
        config.variant = GameVariant::Tweaked;
        if config.weights == WeightScheme::Uniform {
            config.weights = WeightScheme::TieredByPrize;
        }
    } else if !from_file {
        config.variant = GameVariant::Fair;
        config.weights = WeightScheme::Uniform;
    }
}

fn show_weights(wheel: &WheelArgs, edits: &[String]) -> Result<()> {
    let config = load_wheel(wheel)?;
    let prizes = PrizeTable::new(config.prizes.clone()).context("Invalid prize table")?;
    let uniform = ProbabilityModel::uniform(prizes.len());
    let mut tweaked = match config.weights {
        WeightScheme::Uniform => ProbabilityModel::tiered_by_prize(&prizes),
        other => other.resolve(&prizes).context("Invalid weights")?,
    };

    for edit in edits {
        let (slot, value) = parse_edit(edit)?;
        tweaked
            .redistribute(slot, value)
            .with_context(|| format!("Cannot apply {edit}"))?;
    }

    println!(
        "{:>4} {:>6} {:>12} {:>12} {:>10} {:>10}",
        "Slot", "Prize", "Fair", "Tweaked", "Fair EV", "Tweaked EV"
    );
    for (slot, prize) in prizes.iter().enumerate() {
        println!(
            "{:>4} {:>6} {:>12.8} {:>12.8} {:>10.2} {:>10.2}",
            slot,
            prize,
            uniform.weight(slot),
            tweaked.weight(slot),
            uniform.expected_payout(&prizes, slot),
            tweaked.expected_payout(&prizes, slot)
        );
    }
    println!("Total: {:.17}", tweaked.total());
    Ok(())
}

fn parse_edit(edit: &str) -> Result<(usize, f64)> {
    let (slot, value) = edit
        .split_once('=')
        .with_context(|| format!("Expected SLOT=WEIGHT, got {edit}"))?;
    let slot = slot.trim().parse().with_context(|| format!("Bad slot in {edit}"))?;
    let value = value.trim().parse().with_context(|| format!("Bad weight in {edit}"))?;
    Ok((slot, value))
}
