//! Start screen and seed selection

use rand::Rng;
use std::io::{self, BufRead, Write};

use crate::seat::Seat;

/// Answers gathered before the game starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartChoice {
    pub white: Seat,
    /// Raw seed text as typed; see [`resolve_seed`]
    pub seed_text: String,
}

/// Seed text made only of digits is used as-is; anything else (including
/// nothing) draws a seed from 1..=1_000_000.
pub fn resolve_seed<R: Rng + ?Sized>(text: Option<&str>, rng: &mut R) -> u64 {
    let text = text.map(str::trim).unwrap_or("");
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(seed) = text.parse() {
            return seed;
        }
    }
    rng.gen_range(1..=1_000_000)
}

/// Ask for the white player and the seed. Questions already answered by
/// `white` / `seed` are skipped. Returns `None` when the user cancels with
/// `q` or input ends before a player is chosen.
pub fn start_screen<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    white: Option<Seat>,
    seed: Option<String>,
) -> io::Result<Option<StartChoice>> {
    writeln!(output, "=== Chess: RL vs LLM ===")?;

    let white = match white {
        Some(seat) => seat,
        None => loop {
            write!(
                output,
                "Choose who plays as White: [1] RL  [2] LLM  (q to cancel): "
            )?;
            output.flush()?;

            let Some(line) = read_line(input)? else {
                return Ok(None);
            };
            if crate::events::is_quit(&line) {
                return Ok(None);
            }
            match Seat::parse(&line) {
                Some(seat) => break seat,
                None => writeln!(output, "Please answer 1, 2, rl or llm.")?,
            }
        },
    };

    let seed_text = match seed {
        Some(text) => text,
        None => {
            write!(output, "Enter seed (optional): ")?;
            output.flush()?;
            match read_line(input)? {
                Some(line) if crate::events::is_quit(&line) => return Ok(None),
                Some(line) => line.trim().to_string(),
                None => String::new(),
            }
        }
    };

    Ok(Some(StartChoice { white, seed_text }))
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

#[cfg(test)]
#[path = "setup_tests.rs"]
mod setup_tests;
