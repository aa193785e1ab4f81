use soroban_sdk::{Bytes, BytesN, Env};

use crate::types::{Move, Outcome};
use crate::RpsError;

impl Move {
    pub fn is_playable(self) -> bool {
        self != Move::None
    }

    /// Rock > Scissors > Paper > Rock.
    pub fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors) | (Move::Scissors, Move::Paper) | (Move::Paper, Move::Rock)
        )
    }
}

/// Commitment for a hidden move: `keccak256(secret || move_u32_be)`.
///
/// Player1 computes this off-chain (or through `get_game_hash`) before
/// creating a game, and the contract recomputes it on reveal.
pub fn commitment(env: &Env, secret: &Bytes, player_move: Move) -> BytesN<32> {
    let mut preimage = secret.clone();
    preimage.append(&Bytes::from_array(env, &(player_move as u32).to_be_bytes()));
    env.crypto().keccak256(&preimage).into()
}

pub fn resolve(move1: Move, move2: Move) -> Outcome {
    if move1 == move2 {
        Outcome::Draw
    } else if move1.beats(move2) {
        Outcome::Player1Won
    } else {
        Outcome::Player2Won
    }
}

/// Split the escrow between (player1, player2) for a terminal outcome.
///
/// The two shares always add up to `escrowed`. A draw refunds player1's own
/// stake and leaves the rest to player2. `Pending` is not terminal and is
/// rejected.
pub fn split_escrow(
    outcome: Outcome,
    buy_in: i128,
    escrowed: i128,
) -> Result<(i128, i128), RpsError> {
    let shares = match outcome {
        Outcome::Player1Won | Outcome::Cancelled => (escrowed, 0),
        Outcome::Player2Won | Outcome::NoShow => (0, escrowed),
        Outcome::Draw => {
            let rest = escrowed.checked_sub(buy_in).ok_or(RpsError::Overflow)?;
            (buy_in, rest)
        }
        Outcome::Pending => return Err(RpsError::OutcomePending),
    };
    Ok(shares)
}
