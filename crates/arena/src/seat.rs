//! Who sits on which side of the board

use chess_core::Color;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two players in a duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    Rl,
    Llm,
}

impl Seat {
    pub fn other(self) -> Seat {
        match self {
            Seat::Rl => Seat::Llm,
            Seat::Llm => Seat::Rl,
        }
    }

    /// Accepts `rl` / `llm` in any case, plus `1` / `2` as on the start screen.
    pub fn parse(text: &str) -> Option<Seat> {
        match text.trim().to_ascii_lowercase().as_str() {
            "rl" | "1" => Some(Seat::Rl),
            "llm" | "2" => Some(Seat::Llm),
            _ => None,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Rl => write!(f, "RL"),
            Seat::Llm => write!(f, "LLM"),
        }
    }
}

/// Colour assignment for a game. The seat not playing White plays Black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seating {
    pub white: Seat,
}

impl Seating {
    pub fn new(white: Seat) -> Self {
        Self { white }
    }

    pub fn black(&self) -> Seat {
        self.white.other()
    }

    pub fn seat_for(&self, color: Color) -> Seat {
        match color {
            Color::White => self.white,
            Color::Black => self.black(),
        }
    }

    pub fn color_of(&self, seat: Seat) -> Color {
        if seat == self.white {
            Color::White
        } else {
            Color::Black
        }
    }
}

impl Default for Seating {
    fn default() -> Self {
        Self::new(Seat::Rl)
    }
}

#[cfg(test)]
#[path = "seat_tests.rs"]
mod seat_tests;
