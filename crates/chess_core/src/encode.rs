//! Board encoding for policy input.
//!
//! Converts a position into an 8x8x12 one-hot tensor, one plane per
//! (piece type, colour) pair, laid out as `[rank][file][plane]`.

use cozy_chess::{Board, Color, Piece, Square};

/// 12 planes: 6 piece types × 2 colors
pub const NUM_PLANES: usize = 12;

/// Total number of features: 8 × 8 × 12 = 768
pub const NUM_FEATURES: usize = 64 * NUM_PLANES;

/// Plane for a piece: `piece_type + 6 * color`, pawns first, with Black on
/// planes 0-5 and White on planes 6-11.
pub fn plane_index(color: Color, piece: Piece) -> usize {
    let color_idx = match color {
        Color::Black => 0,
        Color::White => 1,
    };
    piece as usize + 6 * color_idx
}

#[derive(Clone, Debug, PartialEq)]
pub struct EncodedState {
    planes: [[[f32; NUM_PLANES]; 8]; 8],
}

impl EncodedState {
    pub const SHAPE: [usize; 3] = [8, 8, NUM_PLANES];

    pub fn shape(&self) -> [usize; 3] {
        Self::SHAPE
    }

    pub fn get(&self, rank: usize, file: usize, plane: usize) -> f32 {
        self.planes[rank][file][plane]
    }

    /// Row-major copy, `[rank][file][plane]`.
    pub fn flat(&self) -> Vec<f32> {
        self.planes
            .iter()
            .flat_map(|rank| rank.iter().flat_map(|file| file.iter().copied()))
            .collect()
    }

    pub fn count_set(&self) -> usize {
        self.flat().iter().filter(|&&x| x > 0.0).count()
    }

    /// Stable 64-bit key over the set features, used to index tabular policies.
    pub fn key(&self) -> u64 {
        fn mix(mut h: u64, x: u64) -> u64 {
            h ^= x;
            h = h.wrapping_mul(0x100000001b3);
            h
        }

        let mut h = 0xcbf29ce484222325u64;
        for (i, v) in self.flat().into_iter().enumerate() {
            if v > 0.0 {
                h = mix(h, i as u64 + 1);
            }
        }
        h
    }
}

pub fn encode(board: &Board) -> EncodedState {
    let mut planes = [[[0.0f32; NUM_PLANES]; 8]; 8];

    for &sq in Square::ALL.iter() {
        if let (Some(piece), Some(color)) = (board.piece_on(sq), board.color_on(sq)) {
            planes[sq.rank() as usize][sq.file() as usize][plane_index(color, piece)] = 1.0;
        }
    }

    EncodedState { planes }
}

#[cfg(test)]
#[path = "encode_tests.rs"]
mod encode_tests;
