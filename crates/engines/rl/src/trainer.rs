//! Self-play training for the tabular policy
//!
//! Every-visit Monte-Carlo updates: the learner plays both sides in the
//! environment, and at the end of an episode each (state, action) it took is
//! pulled toward the discounted final reward as seen by the side that moved.
//!
//! Values are stored under the action indices of the [`ActionMapping`] the
//! agent will read them with, so a trained table plays as trained.

use chess_core::{Color, Piece};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::env::{move_to_action, ChessEnvironment};
use crate::error::RlError;
use crate::policy::TabularPolicy;
use crate::ActionMapping;

/// Training hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Environment steps to run in total
    pub total_timesteps: u64,
    /// Steps between checkpoint saves
    pub checkpoint_freq: u64,
    pub learning_rate: f32,
    /// Discount applied per ply back from the end of an episode
    pub gamma: f32,
    /// Probability of a random legal action instead of the greedy one
    pub exploration: f64,
    /// Episodes longer than this are cut off and scored as draws
    pub max_episode_plies: u32,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            total_timesteps: 50_000,
            checkpoint_freq: 10_000,
            learning_rate: 0.1,
            gamma: 0.99,
            exploration: 0.2,
            max_episode_plies: 200,
        }
    }
}

/// Where the trained policy lives on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPaths {
    pub model: PathBuf,
    pub checkpoint: PathBuf,
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            model: PathBuf::from("rl_model.json"),
            checkpoint: PathBuf::from("rl_model_checkpoint.json"),
        }
    }
}

impl ModelPaths {
    pub fn model_exists(&self) -> bool {
        self.model.exists()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrainStats {
    pub timesteps: u64,
    pub episodes: u64,
    pub white_wins: u64,
    pub black_wins: u64,
    pub draws: u64,
}

struct Visit {
    key: u64,
    /// Index in the policy's action space
    action: usize,
    /// +1 if White made this move, -1 for Black
    sign: f32,
}

/// A legal move as the policy names it and as the environment steps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Choice {
    action: usize,
    env_action: usize,
}

pub struct Trainer {
    config: TrainConfig,
    env: ChessEnvironment,
    policy: TabularPolicy,
    rng: StdRng,
    episode: Vec<Visit>,
    stats: TrainStats,
}

impl Trainer {
    pub fn new(config: TrainConfig, mapping: ActionMapping, seed: u64) -> Self {
        Self::with_policy(config, TabularPolicy::with_mapping(mapping), seed)
    }

    /// Continue training an existing policy, in the action space it was
    /// trained in.
    pub fn with_policy(config: TrainConfig, policy: TabularPolicy, seed: u64) -> Self {
        let mut env = ChessEnvironment::new();
        env.reset();
        Self {
            config,
            env,
            policy,
            rng: StdRng::seed_from_u64(seed),
            episode: Vec::new(),
            stats: TrainStats::default(),
        }
    }

    /// Resume from the saved model when there is one, otherwise start fresh.
    pub fn resume_or_new(
        config: TrainConfig,
        mapping: ActionMapping,
        paths: &ModelPaths,
        seed: u64,
    ) -> Result<Self, RlError> {
        if paths.model_exists() {
            info!("Loading pre-trained model from {}", paths.model.display());
            let policy = TabularPolicy::load(&paths.model)?;
            if policy.mapping() != mapping {
                warn!(
                    configured = ?mapping,
                    trained = ?policy.mapping(),
                    "saved model uses a different action mapping, continuing in its mapping"
                );
            }
            Ok(Self::with_policy(config, policy, seed))
        } else {
            info!("Training new model");
            Ok(Self::new(config, mapping, seed))
        }
    }

    pub fn policy(&self) -> &TabularPolicy {
        &self.policy
    }

    pub fn into_policy(self) -> TabularPolicy {
        self.policy
    }

    pub fn stats(&self) -> TrainStats {
        self.stats
    }

    /// Run exactly `timesteps` environment steps. An episode cut by the end of
    /// the budget carries over to the next call.
    pub fn learn(&mut self, timesteps: u64) {
        for _ in 0..timesteps {
            self.step();
        }
    }

    /// Full training run: learn in `checkpoint_freq` chunks, saving a
    /// checkpoint after each, then save the final model.
    pub fn train(&mut self, paths: &ModelPaths) -> Result<TrainStats, RlError> {
        let total = self.config.total_timesteps;
        let freq = self.config.checkpoint_freq.max(1);

        let mut done = 0;
        while done < total {
            let chunk = freq.min(total - done);
            self.learn(chunk);
            done += chunk;
            self.policy.save(&paths.checkpoint)?;
            info!("Checkpoint saved at {} steps", done);
        }

        self.policy.save(&paths.model)?;
        info!(
            episodes = self.stats.episodes,
            states = self.policy.len(),
            "Final model saved to {}",
            paths.model.display()
        );
        Ok(self.stats)
    }

    /// Legal moves of the current position in the policy's action space.
    /// Under-promotions are left out since the environment cannot play them.
    fn legal_choices(&self) -> Vec<Choice> {
        match self.policy.mapping() {
            ActionMapping::FromTo => self
                .env
                .legal_actions()
                .into_iter()
                .map(|a| Choice {
                    action: a,
                    env_action: a,
                })
                .collect(),
            ActionMapping::LegalIndex => {
                let game = self.env.game();
                game.legal_moves()
                    .into_iter()
                    .enumerate()
                    .filter(|(_, m)| m.promotion.is_none() || m.promotion == Some(Piece::Queen))
                    .map(|(i, m)| Choice {
                        action: i,
                        env_action: move_to_action(game, m),
                    })
                    .collect()
            }
        }
    }

    fn choose(&mut self, key: u64, legal: &[Choice]) -> Option<Choice> {
        let explore = self.rng.gen_bool(self.config.exploration.clamp(0.0, 1.0));
        if !explore {
            let actions: Vec<usize> = legal.iter().map(|c| c.action).collect();
            if let Some(best) = self.policy.best_action(key, &actions) {
                return legal.iter().find(|c| c.action == best).copied();
            }
        }
        legal.choose(&mut self.rng).copied()
    }

    fn step(&mut self) {
        let key = self.env.state().key();
        let legal = self.legal_choices();
        match self.choose(key, &legal) {
            Some(choice) => self.play(choice),
            // Terminal position left over from a previous step
            None => self.finish_episode(0.0),
        }
    }

    /// Step the environment with `choice` and record it for the episode update.
    fn play(&mut self, choice: Choice) {
        let key = self.env.state().key();
        let sign = match self.env.game().side_to_move() {
            Color::White => 1.0,
            Color::Black => -1.0,
        };

        let outcome = self.env.step(choice.env_action);
        self.stats.timesteps += 1;
        self.episode.push(Visit {
            key,
            action: choice.action,
            sign,
        });

        if outcome.done {
            self.finish_episode(outcome.reward);
        } else if self.episode.len() as u32 >= self.config.max_episode_plies {
            debug!("episode cut at {} plies", self.episode.len());
            self.finish_episode(0.0);
        }
    }

    fn finish_episode(&mut self, reward: f32) {
        let n = self.episode.len();
        for (i, visit) in self.episode.drain(..).enumerate() {
            let discount = self.config.gamma.powi((n - 1 - i) as i32);
            let target = visit.sign * reward * discount;
            self.policy
                .update(visit.key, visit.action, target, self.config.learning_rate);
        }

        self.stats.episodes += 1;
        if reward > 0.0 {
            self.stats.white_wins += 1;
        } else if reward < 0.0 {
            self.stats.black_wins += 1;
        } else {
            self.stats.draws += 1;
        }
        self.env.reset();
    }
}

/// Load the model if it exists, otherwise train one and save it.
pub fn load_or_train(
    config: &TrainConfig,
    mapping: ActionMapping,
    paths: &ModelPaths,
    seed: u64,
) -> Result<TabularPolicy, RlError> {
    if paths.model_exists() {
        info!("Loading pre-trained RL model from {}", paths.model.display());
        return TabularPolicy::load(&paths.model);
    }
    info!("Training RL agent...");
    let mut trainer = Trainer::new(config.clone(), mapping, seed);
    trainer.train(paths)?;
    info!("RL agent training complete.");
    Ok(trainer.into_policy())
}

#[cfg(test)]
#[path = "trainer_tests.rs"]
mod trainer_tests;
