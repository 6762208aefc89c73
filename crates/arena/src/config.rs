//! `duel.toml` configuration
//!
//! Every section and field is optional:
//!
//! ```toml
//! [game]
//! white = "llm"
//! seed = "42"
//! move_delay_ms = 500
//! move_time_ms = 2000
//!
//! [rl]
//! model_path = "models/rl_model.json"
//! action_mapping = "from-to"
//!
//! [rl.training]
//! total_timesteps = 20000
//!
//! [llm]
//! backend = "http"
//! http = { endpoint = "http://localhost:11434", model = "llama3" }
//! ```

use llm_engine::LlmConfig;
use rl_engine::{ActionMapping, ModelPaths, TrainConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ArenaError;
use crate::game_loop::LoopConfig;
use crate::seat::Seat;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    pub game: GameSection,
    pub rl: RlSection,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSection {
    /// Seat playing White; asked on the start screen when unset
    pub white: Option<Seat>,
    /// Seed text; asked on the start screen when unset
    pub seed: Option<String>,
    /// Pause between plies
    pub move_delay_ms: u64,
    /// Think budget per move (None = unlimited)
    pub move_time_ms: Option<u64>,
    /// Return as soon as the game ends instead of waiting for quit
    pub exit_on_game_over: bool,
    /// Starting position (default: standard start)
    pub start_fen: Option<String>,
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            white: None,
            seed: None,
            move_delay_ms: 1000,
            move_time_ms: None,
            exit_on_game_over: false,
            start_fen: None,
        }
    }
}

impl GameSection {
    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            move_delay: Duration::from_millis(self.move_delay_ms),
            move_time: self.move_time_ms.map(Duration::from_millis),
            exit_on_game_over: self.exit_on_game_over,
            ..LoopConfig::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RlSection {
    pub model_path: PathBuf,
    pub checkpoint_path: PathBuf,
    pub action_mapping: ActionMapping,
    /// ONNX policy network to use instead of the tabular model
    pub onnx_model: Option<PathBuf>,
    pub training: TrainConfig,
}

impl Default for RlSection {
    fn default() -> Self {
        let paths = ModelPaths::default();
        Self {
            model_path: paths.model,
            checkpoint_path: paths.checkpoint,
            action_mapping: ActionMapping::default(),
            onnx_model: None,
            training: TrainConfig::default(),
        }
    }
}

impl RlSection {
    pub fn model_paths(&self) -> ModelPaths {
        ModelPaths {
            model: self.model_path.clone(),
            checkpoint: self.checkpoint_path.clone(),
        }
    }
}

impl DuelConfig {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ArenaError> {
        toml::from_str(text).map_err(|source| ArenaError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ArenaError> {
        let text = std::fs::read_to_string(path).map_err(|source| ArenaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Load `path` if given, else `duel.toml` if present, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ArenaError> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new("duel.toml");
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
