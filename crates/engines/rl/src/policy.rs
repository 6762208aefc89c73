//! Policies map an encoded board to a discrete action index.

use chess_core::EncodedState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::env::NUM_ACTIONS;
use crate::error::RlError;
use crate::ActionMapping;

/// Anything that can turn an encoded position into an action index.
///
/// Implementations are deterministic: the same state gives the same action.
pub trait Policy: Send {
    fn predict(&self, state: &EncodedState) -> usize;

    fn name(&self) -> &str;

    /// The action space the policy was trained in, when it records one.
    fn action_mapping(&self) -> Option<ActionMapping> {
        None
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionValue {
    pub value: f32,
    pub visits: u32,
}

/// Action values per visited state, keyed by `EncodedState::key`.
///
/// Unvisited states predict `NUM_ACTIONS`, one past the end of the action
/// space, so callers fall back to their own choice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TabularPolicy {
    /// How the stored action indices map onto moves
    #[serde(default)]
    mapping: ActionMapping,
    states: HashMap<u64, HashMap<u16, ActionValue>>,
}

impl TabularPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mapping(mapping: ActionMapping) -> Self {
        Self {
            mapping,
            states: HashMap::new(),
        }
    }

    pub fn mapping(&self) -> ActionMapping {
        self.mapping
    }

    /// Number of states with at least one recorded action
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn value(&self, key: u64, action: usize) -> Option<ActionValue> {
        self.states.get(&key)?.get(&(action as u16)).copied()
    }

    /// Highest-valued action among `candidates`, if any of them was visited.
    /// Ties go to the lower action index.
    pub fn best_action(&self, key: u64, candidates: &[usize]) -> Option<usize> {
        let actions = self.states.get(&key)?;
        candidates
            .iter()
            .filter_map(|&a| actions.get(&(a as u16)).map(|v| (a, v.value)))
            .fold(None, |best: Option<(usize, f32)>, (a, v)| match best {
                Some((ba, bv)) if bv > v || (bv == v && ba < a) => Some((ba, bv)),
                _ => Some((a, v)),
            })
            .map(|(a, _)| a)
    }

    /// Moves the stored value of (`key`, `action`) toward `target`.
    pub fn update(&mut self, key: u64, action: usize, target: f32, learning_rate: f32) {
        let entry = self
            .states
            .entry(key)
            .or_default()
            .entry(action as u16)
            .or_default();
        entry.value += learning_rate * (target - entry.value);
        entry.visits += 1;
    }

    /// Load a policy from a JSON file
    pub fn load(path: &Path) -> Result<Self, RlError> {
        if !path.exists() {
            return Err(RlError::ModelNotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path).map_err(|source| RlError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| RlError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save the policy to a JSON file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), RlError> {
        let json = serde_json::to_string(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| RlError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, json).map_err(|source| RlError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Policy for TabularPolicy {
    fn predict(&self, state: &EncodedState) -> usize {
        let Some(actions) = self.states.get(&state.key()) else {
            return NUM_ACTIONS;
        };
        let mut ranked: Vec<(usize, f32)> =
            actions.iter().map(|(&a, v)| (a as usize, v.value)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.first().map(|&(a, _)| a).unwrap_or(NUM_ACTIONS)
    }

    fn name(&self) -> &str {
        "tabular"
    }

    fn action_mapping(&self) -> Option<ActionMapping> {
        Some(self.mapping)
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod policy_tests;
