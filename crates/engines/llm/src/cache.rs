//! Bounded move cache

use chess_core::Game;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// What identifies a cached position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheKeying {
    /// Full FEN, so transpositions share an entry
    #[default]
    Fen,
    /// Start FEN plus every move played, so each game path gets its own entry
    History,
}

impl CacheKeying {
    pub fn key_for(self, game: &Game) -> String {
        match self {
            CacheKeying::Fen => game.fen(),
            CacheKeying::History => {
                let mut key = game.start_fen().to_string();
                key.push_str(" moves");
                for uci in game.moves() {
                    key.push(' ');
                    key.push_str(uci);
                }
                key
            }
        }
    }
}

/// Least-recently-used map from position key to UCI move.
///
/// Recency order lives in `order`, front = oldest. Lookups and inserts
/// refresh an entry; inserting past `capacity` evicts the oldest one.
#[derive(Debug, Clone)]
pub struct MoveCache {
    entries: HashMap<String, String>,
    order: VecDeque<String>,
    capacity: usize,
    keying: CacheKeying,
}

impl MoveCache {
    pub fn new(capacity: usize, keying: CacheKeying) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
            keying,
        }
    }

    pub fn keying(&self) -> CacheKeying {
        self.keying
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn get(&mut self, key: &str) -> Option<String> {
        let hit = self.entries.get(key).cloned()?;
        self.touch(key);
        Some(hit)
    }

    pub fn insert(&mut self, key: String, uci: String) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.insert(key.clone(), uci).is_some() {
            self.touch(&key);
            return;
        }
        self.order.push_back(key);
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
    }

    /// Cached move for the current position of `game`.
    pub fn lookup(&mut self, game: &Game) -> Option<String> {
        let key = self.keying.key_for(game);
        self.get(&key)
    }

    pub fn store(&mut self, game: &Game, uci: String) {
        let key = self.keying.key_for(game);
        self.insert(key, uci);
    }

    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod cache_tests;
