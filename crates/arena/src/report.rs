//! Game report storage

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ArenaError;
use crate::seat::Seating;

/// Summary of one finished (or abandoned) game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameReport {
    pub seed: u64,
    pub seating: Seating,
    /// `1-0`, `0-1`, `1/2-1/2`, or `*` if the game was left unfinished
    pub result: String,
    /// Why the game ended, if it did
    pub termination: Option<String>,
    /// UCI moves in order
    pub moves: Vec<String>,
    /// Seat-tagged moves as shown on screen
    pub history: Vec<String>,
    pub start_fen: String,
    pub final_fen: String,
    /// Plies where the loop replaced a chooser's move
    pub fallbacks: u32,
    pub duration_secs: f64,
}

impl GameReport {
    pub fn is_finished(&self) -> bool {
        self.result != "*"
    }

    /// Save report to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), ArenaError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ArenaError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a report from a JSON file
    pub fn load(path: &Path) -> Result<Self, ArenaError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ArenaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Generate a text summary
    pub fn generate_summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str(&format!(
            "=== {} (White) vs {} (Black) ===\n",
            self.seating.white,
            self.seating.black()
        ));
        summary.push_str(&format!("Seed: {}\n", self.seed));
        match &self.termination {
            Some(t) => summary.push_str(&format!("Result: {} ({})\n", self.result, t)),
            None => summary.push_str(&format!("Result: {}\n", self.result)),
        }
        summary.push_str(&format!(
            "Moves: {}, duration {:.1}s\n",
            self.moves.len(),
            self.duration_secs
        ));
        if self.fallbacks > 0 {
            summary.push_str(&format!("Fallback moves: {}\n", self.fallbacks));
        }
        summary
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
