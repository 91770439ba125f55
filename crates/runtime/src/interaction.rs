use agent::{Agent, AgentOptions, Environment, SharedEnvironment};
use anyhow::{ensure, Context, Result};
use tracing::info;

/// Knobs for the interaction loop, read from the same options map the
/// agent is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopSettings {
    pub terminate_age: u64,
    pub exploration: f64,
    pub explore_decay: f64,
    pub log_interval: u64,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            terminate_age: 1000,
            exploration: 0.0,
            explore_decay: 1.0,
            log_interval: 100,
        }
    }
}

impl LoopSettings {
    pub fn from_options(options: &AgentOptions) -> Result<Self> {
        let defaults = Self::default();
        let settings = Self {
            terminate_age: options.parse_or("terminate-age", defaults.terminate_age)?,
            exploration: options.parse_or("exploration", defaults.exploration)?,
            explore_decay: options.parse_or("explore-decay", defaults.explore_decay)?,
            log_interval: options.parse_or("log-interval", defaults.log_interval)?,
        };
        ensure!(
            (0.0..=1.0).contains(&settings.exploration),
            "exploration must lie in [0, 1], got {}",
            settings.exploration
        );
        ensure!(
            (0.0..=1.0).contains(&settings.explore_decay),
            "explore-decay must lie in [0, 1], got {}",
            settings.explore_decay
        );
        Ok(settings)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub cycles: u64,
    pub explored: u64,
    pub total_reward: f64,
    pub average_reward: f64,
    pub reward_std_dev: f64,
}

/// Drive `agent` against `environment` until `terminate_age` cycles have
/// run or the environment finishes.
pub fn run<A: Agent>(
    agent: &mut A,
    environment: &SharedEnvironment<A::Env>,
    settings: &LoopSettings,
    rng: &mut fastrand::Rng,
) -> Result<RunSummary> {
    let mut exploration = settings.exploration;
    let mut explored = 0_u64;
    let mut cycles = 0_u64;

    while cycles < settings.terminate_age && !environment.borrow().is_finished() {
        let explore = agent.core().is_learning() && exploration > 0.0 && rng.f64() < exploration;
        let action = if explore {
            explored += 1;
            agent.generate_random_action()?
        } else {
            agent.search()?
        };

        agent
            .model_update_action(action)
            .with_context(|| format!("action update failed at cycle {cycles}"))?;
        let percept = environment.borrow_mut().perform_action(action)?;
        agent
            .model_update_percept(percept.observation, percept.reward)
            .with_context(|| format!("percept update failed at cycle {cycles}"))?;

        exploration *= settings.explore_decay;
        cycles += 1;

        if settings.log_interval > 0 && cycles % settings.log_interval == 0 {
            info!(
                "cycle {}: action {}, observation {}, reward {}, average reward {:.4}, exploration {:.4}, model size {}",
                cycles,
                action,
                percept.observation,
                percept.reward,
                agent.average_reward(),
                exploration,
                agent.model_size()
            );
        }
    }

    Ok(RunSummary {
        cycles,
        explored,
        total_reward: agent.total_reward(),
        average_reward: agent.average_reward(),
        reward_std_dev: agent.core().reward_std_dev(),
    })
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use agent::{BaseAgent, CoinFlip};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn coin(probability: f64) -> SharedEnvironment<CoinFlip> {
        Rc::new(RefCell::new(CoinFlip::new(probability, 5).unwrap()))
    }

    #[test]
    fn greedy_run_on_loaded_coin() {
        let env = coin(1.0);
        let mut agent = BaseAgent::new(env.clone(), AgentOptions::new()).unwrap();
        let settings = LoopSettings { terminate_age: 50, ..LoopSettings::default() };
        let summary = run(&mut agent, &env, &settings, &mut fastrand::Rng::with_seed(1)).unwrap();
        // Search always guesses heads, which always comes up.
        assert_eq!(summary.cycles, 50);
        assert_eq!(summary.explored, 0);
        assert_eq!(summary.total_reward, 50.0);
        assert_eq!(summary.average_reward, 1.0);
        assert_eq!(summary.reward_std_dev, 0.0);
        assert_eq!(agent.age(), 50);
    }

    #[test]
    fn full_exploration_only_draws_random_actions() {
        let env = coin(0.5);
        let options = AgentOptions::new().with("random-seed", 3);
        let mut agent = BaseAgent::new(env.clone(), options).unwrap();
        let settings = LoopSettings { terminate_age: 200, exploration: 1.0, ..LoopSettings::default() };
        let summary = run(&mut agent, &env, &settings, &mut fastrand::Rng::with_seed(2)).unwrap();
        assert_eq!(summary.explored, 200);
        assert!(summary.total_reward <= 200.0);
    }

    #[test]
    fn exploration_stops_after_learning_period() {
        let env = coin(0.5);
        let options = AgentOptions::new().with("learning-period", 10);
        let mut agent = BaseAgent::new(env.clone(), options).unwrap();
        let settings = LoopSettings { terminate_age: 100, exploration: 1.0, ..LoopSettings::default() };
        let summary = run(&mut agent, &env, &settings, &mut fastrand::Rng::with_seed(9)).unwrap();
        assert_eq!(summary.cycles, 100);
        assert_eq!(summary.explored, 10);
    }

    #[test]
    fn settings_from_options() {
        let options = AgentOptions::new()
            .with("terminate-age", 20)
            .with("exploration", 0.5)
            .with("explore-decay", 0.99);
        let settings = LoopSettings::from_options(&options).unwrap();
        assert_eq!(settings.terminate_age, 20);
        assert_eq!(settings.exploration, 0.5);
        assert_eq!(settings.explore_decay, 0.99);
        assert_eq!(settings.log_interval, 100);

        let bad = AgentOptions::new().with("exploration", 1.5);
        assert!(LoopSettings::from_options(&bad).is_err());
    }
}
