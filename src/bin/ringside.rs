use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use strum::IntoEnumIterator;
use tracing::{debug, info};

use ringside::csv::{write_records, CsvWriter};
use ringside::file::{ReadJsonFile, WriteJsonFile};
use ringside::model::{Party, SimulationConfig};
use ringside::print::{
    tabulate_history, tabulate_market, tabulate_outcomes, tabulate_records,
    tabulate_round_histogram, tabulate_round_weights, tabulate_summary,
};
use ringside::session::{Reveal, SessionOptions, SimulationSession};

/// Number of trailing revealed results to print.
const LAST_REVEALED: usize = 20;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to source the simulation config from
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// random seed, overriding the config
    #[clap(short = 's', long, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// include the draw among the sampled outcomes
    #[clap(long)]
    draw: bool,

    /// simulations per tick
    #[clap(long, default_value_t = 100)]
    sims_per_tick: usize,

    /// stop once this many simulations have accumulated
    #[clap(long, default_value_t = 50_000)]
    max_sims: usize,

    /// record convergence history every N ticks
    #[clap(long, default_value_t = 10)]
    history_interval: u64,

    /// pause between ticks, in milliseconds
    #[clap(long, default_value_t = 0)]
    throttle_ms: u64,

    /// number of results to reveal, or 'all'
    #[clap(short = 'r', long, default_value = "all")]
    reveal: Reveal,

    /// export the results to a CSV file
    #[clap(short = 'o', long)]
    export: Option<PathBuf>,

    /// export the results to a timestamped CSV file in the working directory
    #[clap(long)]
    export_timestamped: bool,

    /// save the effective config as JSON
    #[clap(long)]
    save_config: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.export.is_some() && self.export_timestamped {
            bail!("at most one of -o and --export-timestamped may be specified");
        }
        Ok(())
    }

    fn export_path(&self) -> Option<PathBuf> {
        if self.export_timestamped {
            let timestamp = chrono::Utc::now().timestamp();
            Some(PathBuf::from(format!("simulation_results_{timestamp}.csv")))
        } else {
            self.export.clone()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let config = read_config(&args)?;
    if let Some(path) = &args.save_config {
        config
            .write_json_file(path)
            .with_context(|| format!("writing config to {path:?}"))?;
        info!("saved config to {path:?}");
    }

    let options = SessionOptions {
        sims_per_tick: args.sims_per_tick,
        max_sims: args.max_sims,
        history_interval: args.history_interval,
    };
    let mut session = SimulationSession::new(config, options)?;

    let model = session.engine().model();
    let enable_draw = session.engine().enable_draw();
    let moneyline = model.moneyline_market()?;
    let method = model.method_market(enable_draw)?;
    let fair_probs = model.top_level_probabilities(enable_draw)?;
    let moneyline_labels: Vec<_> = Party::iter().map(|party| party.to_string()).collect();
    let method_labels: Vec<_> = fair_probs.iter().map(|(outcome, _)| outcome.to_string()).collect();
    info!(
        "moneyline:\n{}",
        Console::default().render(&tabulate_market(&moneyline_labels, &moneyline))
    );
    info!(
        "method of victory:\n{}",
        Console::default().render(&tabulate_market(&method_labels, &method))
    );
    info!(
        "assumptions:\n{}",
        Console::default().render(&tabulate_round_weights(model, &method.overround.method))
    );

    let throttle = Duration::from_millis(args.throttle_ms);
    while session.tick() > 0 {
        if !throttle.is_zero() {
            tokio::time::sleep(throttle).await;
        }
    }
    info!(
        "completed {} ticks, {} sims",
        session.ticks(),
        session.aggregator().len()
    );

    let revealed = session.reveal(args.reveal);
    let view = session.revealed_view();
    info!("revealed {revealed} of {}", session.aggregator().len());

    let summary = view.summary();
    info!("summary:\n{}", Console::default().render(&tabulate_summary(&summary)));
    info!(
        "outcomes:\n{}",
        Console::default().render(&tabulate_outcomes(
            &fair_probs,
            &summary,
            &view.outcome_distribution()
        ))
    );
    info!(
        "finish rounds:\n{}",
        Console::default().render(&tabulate_round_histogram(&view.ko_round_histogram()))
    );
    info!(
        "convergence:\n{}",
        Console::default().render(&tabulate_history(view.history()))
    );
    let last = &view.records()[view.len().saturating_sub(LAST_REVEALED)..];
    info!(
        "last {} revealed:\n{}",
        last.len(),
        Console::default().render(&tabulate_records(last))
    );

    if let Some(path) = args.export_path() {
        let mut writer = CsvWriter::create(&path)?;
        let rows = write_records(&mut writer, session.aggregator().records())?;
        info!("exported {rows} results to {path:?}");
    }
    Ok(())
}

fn read_config(args: &Args) -> anyhow::Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::read_json_file(path)
            .with_context(|| format!("reading config from {path:?}"))?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.draw {
        config.enable_draw = true;
    }
    Ok(config)
}
