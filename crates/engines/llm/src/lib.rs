//! Language-Model Chess Agent
//!
//! The LLM seat asks a text generator for a move and keeps every move it
//! plays in a bounded cache, so a position seen before is answered instantly.
//!
//! Decision order for each position:
//! 1. Cached move for the position key
//! 2. Up to `attempts` completions, each scanned for a legal UCI move
//! 3. Check > capture > random heuristic
//!
//! Whatever is played is written back to the cache. Without a generator
//! (`backend = "heuristic"`) step 2 is skipped.

pub mod cache;
pub mod error;
pub mod generator;
pub mod prompt;

pub use cache::{CacheKeying, MoveCache};
pub use error::GenerateError;
pub use generator::{HttpGenerator, HttpSettings, TextGenerator};
pub use prompt::{build_prompt, extract_legal_move, extract_uci};

use chess_core::{
    move_to_uci, parse_uci_move, Decision, Game, Move, MoveChooser, MoveOrigin, ThinkLimits,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Which generator backs the agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LlmBackend {
    /// No model; heuristic moves only
    #[default]
    Heuristic,
    /// OpenAI-compatible completions server
    Http,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub backend: LlmBackend,
    /// Completions requested per position before falling back
    pub attempts: u32,
    pub max_new_tokens: u32,
    pub cache_capacity: usize,
    pub cache_keying: CacheKeying,
    pub http: HttpSettings,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            backend: LlmBackend::Heuristic,
            attempts: 3,
            max_new_tokens: 10,
            cache_capacity: 4096,
            cache_keying: CacheKeying::Fen,
            http: HttpSettings::default(),
        }
    }
}

/// The LLM player.
pub struct LlmAgent {
    config: LlmConfig,
    generator: Option<Box<dyn TextGenerator>>,
    cache: MoveCache,
    rng: StdRng,
    name: String,
}

impl LlmAgent {
    /// Build an agent with an explicit generator (or none).
    pub fn new(config: LlmConfig, generator: Option<Box<dyn TextGenerator>>) -> Self {
        let name = match &generator {
            Some(g) => format!("LLM ({})", g.name()),
            None => "LLM (heuristic)".to_string(),
        };
        let cache = MoveCache::new(config.cache_capacity, config.cache_keying);
        Self {
            config,
            generator,
            cache,
            rng: StdRng::from_entropy(),
            name,
        }
    }

    /// Build the generator the config asks for.
    pub fn from_config(config: LlmConfig) -> Self {
        let generator: Option<Box<dyn TextGenerator>> = match config.backend {
            LlmBackend::Heuristic => None,
            LlmBackend::Http => {
                let http = HttpGenerator::new(config.http.clone());
                info!("LLM agent using completions endpoint {}", http.url());
                Some(Box::new(http))
            }
        };
        Self::new(config, generator)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn cache(&self) -> &MoveCache {
        &self.cache
    }

    /// Ask the generator for a legal move, stopping early when the budget
    /// runs out.
    fn query(&mut self, game: &Game, limits: &ThinkLimits) -> Option<Move> {
        let generator = self.generator.as_mut()?;
        let prompt = build_prompt(game);

        for attempt in 1..=self.config.attempts {
            if limits.should_stop() {
                debug!(attempt, "move budget exhausted, giving up on the model");
                return None;
            }
            match generator.generate(&prompt, self.config.max_new_tokens, limits.remaining()) {
                Ok(text) => match extract_legal_move(game, &text) {
                    Some(mv) => return Some(mv),
                    None => debug!(attempt, reply = %text, "no legal move in reply"),
                },
                Err(e) => warn!(attempt, "generation failed: {e}"),
            }
        }
        None
    }
}

impl MoveChooser for LlmAgent {
    fn get_action(&mut self, game: &Game, limits: &ThinkLimits) -> Decision {
        if let Some(uci) = self.cache.lookup(game) {
            // With FEN keying the entry always matches the position, but a
            // stale one is dropped rather than trusted
            if let Ok(mv) = parse_uci_move(game.board(), &uci) {
                debug!(%uci, "cache hit");
                return Decision::new(Some(mv), MoveOrigin::Cache);
            }
        }

        let (best_move, origin) = match self.query(game, limits) {
            Some(mv) => (Some(mv), MoveOrigin::Model),
            None => (
                heuristic_engine::pick_heuristic(game.board(), &mut self.rng),
                MoveOrigin::Heuristic,
            ),
        };

        if let Some(mv) = best_move {
            self.cache.store(game, move_to_uci(game.board(), mv));
        }

        Decision {
            best_move,
            origin,
            stopped: limits.should_stop(),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
