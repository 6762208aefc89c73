//! Reinforcement-Learning Chess Agent
//!
//! This crate provides the RL side of the duel:
//! - [`ChessEnvironment`]: gym-style environment over 8×8×12 board planes
//! - [`Policy`]: anything mapping an encoded board to an action index
//! - [`Trainer`]: self-play training with periodic checkpoints
//! - [`RlAgent`]: the seat at the board, which always answers with a legal move
//!
//! # Action mapping
//!
//! The policy emits a single integer. [`ActionMapping::LegalIndex`] reads it
//! as an index into the legal-move list of the current position, and
//! [`ActionMapping::FromTo`] reads it as `from * 64 + to`. Either way, an
//! index that does not land on a legal move is replaced by a random legal
//! move. A policy that records the mapping it was trained with (see
//! [`Policy::action_mapping`]) overrides the configured one.

pub mod env;
pub mod error;
pub mod policy;
pub mod trainer;

#[cfg(feature = "onnx")]
pub mod onnx_policy;

pub use env::{decode_action, move_to_action, ChessEnvironment, StepOutcome, NUM_ACTIONS};
pub use error::RlError;
pub use policy::{ActionValue, Policy, TabularPolicy};
pub use trainer::{load_or_train, ModelPaths, TrainConfig, TrainStats, Trainer};

#[cfg(feature = "onnx")]
pub use onnx_policy::OnnxPolicy;

use chess_core::{encode, Decision, Game, Move, MoveChooser, MoveOrigin, ThinkLimits};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How a policy's integer output is turned into a move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionMapping {
    /// Index into the legal-move list, in generation order
    #[default]
    LegalIndex,
    /// `from * 64 + to`, queen promotion implied
    FromTo,
}

impl ActionMapping {
    /// Map `action` onto a legal move of `game`, if it names one.
    pub fn to_move(self, game: &Game, action: usize) -> Option<Move> {
        match self {
            ActionMapping::LegalIndex => game.legal_moves().get(action).copied(),
            ActionMapping::FromTo => decode_action(game, action),
        }
    }
}

/// The RL player.
pub struct RlAgent {
    policy: Box<dyn Policy>,
    mapping: ActionMapping,
    rng: StdRng,
    name: String,
}

impl RlAgent {
    pub fn new(policy: Box<dyn Policy>, mapping: ActionMapping) -> Self {
        let name = format!("RL ({})", policy.name());
        let mapping = match policy.action_mapping() {
            Some(trained) if trained != mapping => {
                warn!(
                    configured = ?mapping,
                    ?trained,
                    "policy was trained with a different action mapping, using the trained one"
                );
                trained
            }
            _ => mapping,
        };
        Self {
            policy,
            mapping,
            rng: StdRng::from_entropy(),
            name,
        }
    }

    /// Seed the fallback RNG so replacement moves are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn mapping(&self) -> ActionMapping {
        self.mapping
    }

    /// Pick a move for the side to move, or `None` when there is none.
    pub fn choose(&mut self, game: &Game) -> (Option<Move>, MoveOrigin) {
        let state = encode(game.board());
        let action = self.policy.predict(&state);

        if let Some(mv) = self.mapping.to_move(game, action) {
            return (Some(mv), MoveOrigin::Policy);
        }

        debug!(
            action,
            mapping = ?self.mapping,
            "policy action is not a legal move, playing a random one"
        );
        (
            heuristic_engine::pick_random(game.board(), &mut self.rng),
            MoveOrigin::Random,
        )
    }
}

impl MoveChooser for RlAgent {
    fn get_action(&mut self, game: &Game, _limits: &ThinkLimits) -> Decision {
        // A single forward pass, so the budget is never consulted
        let (best_move, origin) = self.choose(game);
        Decision::new(best_move, origin)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
