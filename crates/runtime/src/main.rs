#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::unnecessary_wraps)]

mod interaction;

use std::cell::RefCell;
use std::io::IsTerminal;
use std::path::Path;
use std::rc::Rc;

use agent::{Agent, AgentOptions, BaseAgent, CoinFlip};
use anyhow::{Context, Result};
use interaction::LoopSettings;
use tracing_subscriber::EnvFilter;

fn load_options(path: Option<&Path>) -> Result<AgentOptions> {
    let Some(path) = path else {
        tracing::info!("No options file given, using defaults.");
        return Ok(AgentOptions::new());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read options file {}", path.display()))?;
    let options = AgentOptions::from_json(&json)
        .with_context(|| format!("failed to parse options file {}", path.display()))?;
    tracing::info!("Loaded {} options from {}.", options.iter().count(), path.display());
    Ok(options)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(std::io::stdout().is_terminal())
        .init();

    let path = std::env::args_os().nth(1).map(std::path::PathBuf::from);
    let options = load_options(path.as_deref())?;
    let settings = LoopSettings::from_options(&options)?;

    let probability = options.parse_or("coin-probability", 0.7)?;
    let seed = options.parse::<u64>("random-seed")?.unwrap_or_else(|| fastrand::u64(..));
    let environment = Rc::new(RefCell::new(CoinFlip::new(probability, seed)?));
    let mut agent = BaseAgent::new(Rc::clone(&environment), options)?;
    let mut rng = fastrand::Rng::with_seed(seed.wrapping_add(1));

    tracing::info!(
        "Starting interaction loop for up to {} cycles (coin probability {}, exploration {}, learning period {})...",
        settings.terminate_age,
        probability,
        settings.exploration,
        agent.core().learning_period()
    );
    let summary = interaction::run(&mut agent, &environment, &settings, &mut rng)?;

    tracing::info!(
        "Interaction finished after {} cycles ({} explored). Total reward: {}, average reward: {:.4}, std dev: {:.4}",
        summary.cycles,
        summary.explored,
        summary.total_reward,
        summary.average_reward,
        summary.reward_std_dev
    );
    Ok(())
}
